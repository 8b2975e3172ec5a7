use super::*;
use crate::changeset::ValidationCode;
use crate::filter::{CompanyFilter, JobFilter};
use crate::testing::RecordingClient;
use rust_decimal::Decimal;
use serde_json::json;

#[tokio::test]
async fn company_get_missing_is_not_found() {
    let conn = RecordingClient::new();
    let err = Company::get(&conn, "nope").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not found: No company: nope");

    let calls = conn.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tag.as_deref(), Some("company.get"));
    assert_eq!(
        calls[0].sql,
        "SELECT handle, name, description, num_employees, logo_url FROM companies WHERE handle = $1"
    );
}

#[tokio::test]
async fn company_update_keys_after_set_params() {
    let conn = RecordingClient::new();
    let data = CompanyUpdate::new()
        .name("C1-new")
        .num_employees(None)
        .logo_url(Some("http://new.img".into()));
    let err = Company::update(&conn, "nope", data).await.unwrap_err();
    assert!(err.is_not_found());

    let calls = conn.calls();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].tag.as_deref(), Some("company.update"));
    assert_eq!(
        calls[0].sql,
        r#"UPDATE companies SET "name"=$1, "num_employees"=$2, "logo_url"=$3 WHERE handle = $4 RETURNING handle, name, description, num_employees, logo_url"#
    );
    assert_eq!(calls[0].param_count, 4);
    assert_eq!(calls[0].params[1], "None");
    assert_eq!(calls[0].params[3], format!("{:?}", "nope"));
}

#[tokio::test]
async fn company_update_without_data_never_queries() {
    let conn = RecordingClient::new();
    let err = Company::update(&conn, "c1", CompanyUpdate::new())
        .await
        .unwrap_err();

    assert!(err.is_invalid_request());
    assert!(conn.calls().is_empty());
}

#[tokio::test]
async fn company_remove_missing_is_not_found() {
    let conn = RecordingClient::new();
    let err = Company::remove(&conn, "nope").await.unwrap_err();

    assert!(err.is_not_found());
    assert_eq!(
        conn.calls()[0].sql,
        "DELETE FROM companies WHERE handle = $1 RETURNING handle"
    );
}

#[tokio::test]
async fn company_find_all_rejects_inverted_bounds_before_querying() {
    let conn = RecordingClient::new();
    let filter = CompanyFilter::new().min_employees(2).max_employees(1);
    let err = Company::find_all(&conn, &filter).await.unwrap_err();

    assert!(err.is_invalid_request());
    assert_eq!(err.status_code(), 400);
    assert!(conn.calls().is_empty());
}

#[tokio::test]
async fn company_find_all_sql_shape() {
    let conn = RecordingClient::new();

    let all = Company::find_all(&conn, &CompanyFilter::new()).await.unwrap();
    assert!(all.is_empty());

    let filter = CompanyFilter::new().name("1").max_employees(3);
    Company::find_all(&conn, &filter).await.unwrap();

    let calls = conn.calls();
    assert_eq!(
        calls[0].sql,
        "SELECT handle, name, description, num_employees, logo_url FROM companies ORDER BY name"
    );
    assert_eq!(
        calls[1].sql,
        "SELECT handle, name, description, num_employees, logo_url FROM companies \
         WHERE name ILIKE $1 AND num_employees <= $2 ORDER BY name"
    );
    assert_eq!(calls[1].params, vec![format!("{:?}", "%1%"), "3".to_string()]);
    assert_eq!(calls[1].tag.as_deref(), Some("company.find_all"));
}

#[tokio::test]
async fn company_create_checks_handle_then_inserts() {
    let conn = RecordingClient::new();
    let data = NewCompany::new("c4", "C4", "Desc4")
        .num_employees(4)
        .logo_url("http://c4.img");
    // The recording client returns no row for the INSERT.
    let _ = Company::create(&conn, data).await;

    let calls = conn.calls();
    assert_eq!(calls.len(), 2);
    assert_eq!(calls[0].tag.as_deref(), Some("company.create.check"));
    assert_eq!(calls[0].sql, "SELECT handle FROM companies WHERE handle = $1");
    assert_eq!(calls[1].tag.as_deref(), Some("company.create"));
    assert_eq!(
        calls[1].sql,
        "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
         VALUES ($1, $2, $3, $4, $5) RETURNING handle, name, description, num_employees, logo_url"
    );
}

#[tokio::test]
async fn company_create_validates_before_querying() {
    let conn = RecordingClient::new();
    let data = NewCompany::new("c4", "C4", "Desc4").logo_url("not-a-url");
    let err = Company::create(&conn, data).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.status_code(), 400);
    assert!(conn.calls().is_empty());
}

#[test]
fn new_company_validation() {
    assert!(NewCompany::new("c1", "C1", "Desc1").validate().is_ok());

    let errors = NewCompany::new("", "C1", "Desc1")
        .num_employees(-1)
        .logo_url("not-a-url")
        .validate()
        .unwrap_err();
    assert!(errors.has_field("handle"));
    assert!(errors.has_field("numEmployees"));
    assert!(errors.has_field("logoUrl"));
    assert!(!errors.has_field("name"));

    let long = "x".repeat(26);
    assert!(NewCompany::new(long, "C1", "Desc1").validate().unwrap_err().has_field("handle"));
}

#[test]
fn company_update_distinguishes_absent_from_null() {
    let update: CompanyUpdate = serde_json::from_value(json!({
        "name": "New",
        "logoUrl": null,
    }))
    .unwrap();
    assert_eq!(update.name, Some(Some("New".to_string())));
    assert_eq!(update.num_employees, None);
    assert_eq!(update.logo_url, Some(None));

    let changes = update.into_changes();
    let fields: Vec<_> = changes.iter().map(|(f, _)| *f).collect();
    assert_eq!(fields, vec!["name", "logoUrl"]);
}

#[test]
fn company_update_rejects_handle() {
    let parsed: Result<CompanyUpdate, _> =
        serde_json::from_value(json!({ "handle": "c1-new", "name": "x" }));
    assert!(parsed.is_err());
}

#[test]
fn new_company_requires_description() {
    let parsed: Result<NewCompany, _> = serde_json::from_value(json!({
        "handle": "new",
        "name": "New",
        "numEmployees": 10,
    }));
    assert!(parsed.is_err());

    let parsed: NewCompany = serde_json::from_value(json!({
        "handle": "new",
        "name": "New",
        "description": "New Description",
    }))
    .unwrap();
    assert!(parsed.validate().is_ok());
}

#[test]
fn company_update_null_name_fails_validation() {
    let update: CompanyUpdate = serde_json::from_value(json!({
        "name": null,
        "description": "d",
    }))
    .unwrap();
    assert_eq!(update.name, Some(None));

    let errors = update.validate().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.has_field("name"));
    assert_eq!(errors.items[0].code, ValidationCode::Required);

    let update: CompanyUpdate = serde_json::from_value(json!({ "description": null })).unwrap();
    assert!(update.validate().unwrap_err().has_field("description"));
}

#[tokio::test]
async fn company_update_null_name_never_queries() {
    let conn = RecordingClient::new();
    let data: CompanyUpdate = serde_json::from_value(json!({ "name": null })).unwrap();
    let err = Company::update(&conn, "c1", data).await.unwrap_err();

    assert!(err.is_validation());
    assert_eq!(err.status_code(), 400);
    assert!(conn.calls().is_empty());
}

#[test]
fn company_detail_serializes_flat() {
    let detail = CompanyDetail {
        company: Company {
            handle: "c1".into(),
            name: "C1".into(),
            description: "Desc1".into(),
            num_employees: Some(1),
            logo_url: None,
        },
        jobs: vec![],
    };
    assert_eq!(
        serde_json::to_value(&detail).unwrap(),
        json!({
            "handle": "c1",
            "name": "C1",
            "description": "Desc1",
            "numEmployees": 1,
            "logoUrl": null,
            "jobs": [],
        })
    );
}

#[tokio::test]
async fn job_update_title_only_touches_title() {
    let conn = RecordingClient::new();
    let err = Job::update(&conn, 7, JobUpdate::new().title("X"))
        .await
        .unwrap_err();
    assert!(err.is_not_found());
    assert_eq!(err.to_string(), "Not found: No job: 7");

    let calls = conn.calls();
    assert_eq!(
        calls[0].sql,
        r#"UPDATE jobs SET "title"=$1 WHERE id = $2 RETURNING id, title, salary, equity, company_handle"#
    );
    assert_eq!(calls[0].params, vec![format!("{:?}", "X"), "7".to_string()]);
}

#[tokio::test]
async fn job_update_without_data_is_invalid_request() {
    let conn = RecordingClient::new();
    let err = Job::update(&conn, 1, JobUpdate::new()).await.unwrap_err();
    assert!(err.is_invalid_request());
    assert!(conn.calls().is_empty());
}

#[tokio::test]
async fn job_update_null_title_fails_validation() {
    let update: JobUpdate = serde_json::from_value(json!({ "title": null })).unwrap();
    assert_eq!(update.title, Some(None));
    let errors = update.validate().unwrap_err();
    assert!(errors.has_field("title"));
    assert_eq!(errors.items[0].code, ValidationCode::Required);

    let conn = RecordingClient::new();
    let err = Job::update(&conn, 1, update).await.unwrap_err();
    assert!(err.is_validation());
    assert!(conn.calls().is_empty());
}

#[tokio::test]
async fn job_get_and_remove_missing_are_not_found() {
    let conn = RecordingClient::new();
    assert!(Job::get(&conn, 0).await.unwrap_err().is_not_found());
    assert!(Job::remove(&conn, 0).await.unwrap_err().is_not_found());

    let calls = conn.calls();
    assert_eq!(calls[0].tag.as_deref(), Some("job.get"));
    assert_eq!(calls[1].sql, "DELETE FROM jobs WHERE id = $1 RETURNING id");
}

#[tokio::test]
async fn job_find_all_and_by_company_sql_shape() {
    let conn = RecordingClient::new();
    let filter = JobFilter::new().min_salary(1000).has_equity(true);
    Job::find_all(&conn, &filter).await.unwrap();
    Job::find_by_company(&conn, "c1").await.unwrap();

    let calls = conn.calls();
    assert_eq!(
        calls[0].sql,
        "SELECT id, title, salary, equity, company_handle FROM jobs \
         WHERE salary >= $1 AND equity > $2 ORDER BY title"
    );
    assert_eq!(
        calls[1].sql,
        "SELECT id, title, salary, equity, company_handle FROM jobs \
         WHERE company_handle = $1 ORDER BY id"
    );
}

#[test]
fn job_update_equity_out_of_range_fails_validation() {
    let update: JobUpdate = serde_json::from_value(json!({ "equity": 1.1 })).unwrap();
    let errors = update.validate().unwrap_err();
    assert!(errors.has_field("equity"));

    let cleared: JobUpdate = serde_json::from_value(json!({ "equity": null })).unwrap();
    assert_eq!(cleared.equity, Some(None));
    assert!(cleared.validate().is_ok());
}

#[test]
fn job_update_rejects_immutable_fields() {
    for payload in [json!({ "companyHandle": "c2" }), json!({ "id": 3 })] {
        let parsed: Result<JobUpdate, _> = serde_json::from_value(payload);
        assert!(parsed.is_err());
    }
}

#[test]
fn job_equity_serializes_as_string() {
    let job = Job {
        id: 1,
        title: "J4".into(),
        salary: Some(40000),
        equity: Some(Decimal::new(4, 4)),
        company_handle: "c3".into(),
    };
    let value = serde_json::to_value(&job).unwrap();
    assert_eq!(value["equity"], json!("0.0004"));
    assert_eq!(value["companyHandle"], json!("c3"));

    let parsed: NewJob = serde_json::from_value(json!({
        "title": "J4",
        "salary": 40000,
        "equity": "0.0004",
        "companyHandle": "c3",
    }))
    .unwrap();
    assert_eq!(parsed.equity, Some(Decimal::new(4, 4)));
    assert!(parsed.validate().is_ok());
}
