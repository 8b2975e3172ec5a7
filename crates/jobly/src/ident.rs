//! SQL identifiers (table and column names).
//!
//! Identifiers cannot be bound as parameters, so every name that ends up in a
//! statement passes through [`Ident`] first:
//!
//! - unquoted parts must match `[A-Za-z_][A-Za-z0-9_$]*`
//! - quoted parts may hold anything but NUL; `"` is escaped as `""`
//!
//! ```ignore
//! use jobly::Ident;
//!
//! let col = Ident::parse("companies.num_employees")?;
//! let quoted = Ident::quoted("logo_url")?;
//! assert_eq!(quoted.to_sql(), r#""logo_url""#);
//! # Ok::<(), jobly::JoblyError>(())
//! ```

use crate::error::{JoblyError, JoblyResult};
use std::iter::Peekable;
use std::str::Chars;

/// One dot-separated part of an identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentPart {
    Unquoted(String),
    Quoted(String),
}

/// A validated SQL identifier, possibly dotted (`table.column`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ident {
    pub parts: Vec<IdentPart>,
}

impl Ident {
    /// Create a single quoted identifier from a bare name.
    pub fn quoted(name: &str) -> JoblyResult<Self> {
        if name.is_empty() {
            return Err(JoblyError::invalid_ident("empty quoted identifier"));
        }
        if name.contains('\0') {
            return Err(JoblyError::invalid_ident(
                "identifier cannot contain NUL character",
            ));
        }
        Ok(Self {
            parts: vec![IdentPart::Quoted(name.to_string())],
        })
    }

    /// Parse an identifier string in dotted and/or quoted form.
    pub fn parse(s: &str) -> JoblyResult<Self> {
        if s.is_empty() {
            return Err(JoblyError::invalid_ident("identifier cannot be empty"));
        }
        if s.contains('\0') {
            return Err(JoblyError::invalid_ident(
                "identifier cannot contain NUL character",
            ));
        }

        let mut parts = Vec::new();
        let mut chars = s.chars().peekable();

        while chars.peek().is_some() {
            if !parts.is_empty() {
                match chars.next() {
                    Some('.') if chars.peek().is_none() => {
                        return Err(JoblyError::invalid_ident(format!(
                            "trailing '.' in identifier {s:?}"
                        )));
                    }
                    Some('.') => {}
                    Some(c) => {
                        return Err(JoblyError::invalid_ident(format!(
                            "expected '.' between identifier parts, got '{c}'"
                        )));
                    }
                    None => break,
                }
            }

            let part = if chars.peek() == Some(&'"') {
                chars.next();
                parse_quoted_part(&mut chars)?
            } else {
                parse_unquoted_part(&mut chars)?
            };
            parts.push(part);
        }

        Ok(Self { parts })
    }

    /// Render the identifier as SQL.
    pub fn to_sql(&self) -> String {
        let mut out = String::new();
        self.write_sql(&mut out);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String) {
        for (i, part) in self.parts.iter().enumerate() {
            if i > 0 {
                out.push('.');
            }
            match part {
                IdentPart::Unquoted(s) => out.push_str(s),
                IdentPart::Quoted(s) => {
                    out.push('"');
                    out.push_str(&s.replace('"', "\"\""));
                    out.push('"');
                }
            }
        }
    }
}

fn parse_quoted_part(chars: &mut Peekable<Chars<'_>>) -> JoblyResult<IdentPart> {
    let mut name = String::new();
    loop {
        match chars.next() {
            Some('"') if chars.peek() == Some(&'"') => {
                chars.next();
                name.push('"');
            }
            Some('"') => break,
            Some(c) => name.push(c),
            None => return Err(JoblyError::invalid_ident("unclosed quoted identifier")),
        }
    }
    if name.is_empty() {
        return Err(JoblyError::invalid_ident("empty quoted identifier"));
    }
    Ok(IdentPart::Quoted(name))
}

fn parse_unquoted_part(chars: &mut Peekable<Chars<'_>>) -> JoblyResult<IdentPart> {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if c == '.' {
            break;
        }
        let allowed = if name.is_empty() {
            c == '_' || c.is_ascii_alphabetic()
        } else {
            c == '_' || c == '$' || c.is_ascii_alphanumeric()
        };
        if !allowed {
            return Err(JoblyError::invalid_ident(format!(
                "invalid character in identifier: '{c}'"
            )));
        }
        name.push(c);
        chars.next();
    }
    if name.is_empty() {
        return Err(JoblyError::invalid_ident("empty identifier segment"));
    }
    Ok(IdentPart::Unquoted(name))
}

/// Convert an input into an [`Ident`].
pub trait IntoIdent {
    fn into_ident(self) -> JoblyResult<Ident>;
}

impl IntoIdent for Ident {
    fn into_ident(self) -> JoblyResult<Ident> {
        Ok(self)
    }
}

impl IntoIdent for &Ident {
    fn into_ident(self) -> JoblyResult<Ident> {
        Ok(self.clone())
    }
}

impl IntoIdent for &str {
    fn into_ident(self) -> JoblyResult<Ident> {
        Ident::parse(self)
    }
}

impl IntoIdent for String {
    fn into_ident(self) -> JoblyResult<Ident> {
        Ident::parse(&self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_simple() {
        assert_eq!(Ident::parse("companies").unwrap().to_sql(), "companies");
    }

    #[test]
    fn ident_dotted() {
        let ident = Ident::parse("companies.num_employees").unwrap();
        assert_eq!(ident.to_sql(), "companies.num_employees");
        assert_eq!(ident.parts.len(), 2);
    }

    #[test]
    fn ident_quoted_round_trips_escapes() {
        let ident = Ident::parse(r#""has""quote""#).unwrap();
        assert_eq!(ident.to_sql(), r#""has""quote""#);
    }

    #[test]
    fn quoted_constructor_wraps_name() {
        assert_eq!(Ident::quoted("logo_url").unwrap().to_sql(), r#""logo_url""#);
        assert_eq!(Ident::quoted("numEmployees").unwrap().to_sql(), r#""numEmployees""#);
    }

    #[test]
    fn quoted_constructor_rejects_empty_and_nul() {
        assert!(Ident::quoted("").is_err());
        assert!(Ident::quoted("a\0b").is_err());
    }

    #[test]
    fn ident_rejects_unsafe_input() {
        assert!(Ident::parse("").is_err());
        assert!(Ident::parse("1table").is_err());
        assert!(Ident::parse("my table").is_err());
        assert!(Ident::parse("jobs..title").is_err());
        assert!(Ident::parse("jobs.").is_err());
        assert!(Ident::parse(r#""unclosed"#).is_err());
        assert!(Ident::parse("handle; DROP TABLE companies").is_err());
    }
}
