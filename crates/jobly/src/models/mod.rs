//! Company and job records and their data-access operations.
//!
//! Every operation takes `&impl GenericClient`, runs one or two tagged
//! statements and maps the result into a typed record. Nothing is cached
//! between calls.

pub mod company;
pub mod job;

#[cfg(test)]
mod tests;

pub use company::{COMPANY_JS_TO_SQL, Company, CompanyDetail, CompanyUpdate, NewCompany};
pub use job::{JOB_JS_TO_SQL, Job, JobUpdate, NewJob};

use serde::{Deserialize, Deserializer};

/// Deserialize a nullable field so that an absent key stays `None` while an
/// explicit `null` becomes `Some(None)`.
///
/// Use with `#[serde(default, deserialize_with = "double_option")]`.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
