use actix_web::{HttpResponse, web};
use chrono::Local;
use serde::Serialize;
use serde_json::json;
use tracing::{error, info};
use utoipa::ToSchema;

use crate::error::ConsoleError;
use crate::model::CatalogResource;
use crate::model::bonus_type::{BONUS_TYPE_LIST_FIELD, BONUS_TYPE_READ, BonusType};
use crate::model::employee::Employee;
use crate::model::job::JobRef;
use crate::model::leave_type::LeaveType;
use crate::model::salary::{
    SALARY_LIST_FIELD, SALARY_READ, SALARY_UPDATE, SalaryChange, SalaryEntry, SalaryUpdate,
};
use crate::model::section::{
    JOBS_BY_SECTION, JOBS_BY_SECTION_FIELD, SECTION_LIST_FIELD, SECTION_READ, SectionRef,
};
use crate::model::worker_profile::WorkerProfile;
use crate::payroll::overrides::parse_input;
use crate::payroll::projector::{self, ViewQuery};
use crate::remote::RemoteApi;
use crate::remote::payload::SectionQuery;

#[derive(Serialize, ToSchema)]
#[aliases(
    EmployeeList = CatalogList<Employee>,
    WorkerList = CatalogList<WorkerProfile>,
    JobList = CatalogList<JobRef>,
    LeaveTypeList = CatalogList<LeaveType>,
    SalaryList = CatalogList<SalaryEntry>
)]
pub struct CatalogList<T> {
    #[schema(example = 2)]
    pub total: usize,
    pub data: Vec<T>,
}

fn sentence(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

async fn list<R: CatalogResource + Clone>(
    remote: &RemoteApi,
    query: &ViewQuery,
) -> Result<CatalogList<R>, ConsoleError> {
    let records: Vec<R> = remote
        .fetch_list(R::READ, R::LIST_FIELD)
        .await
        .map_err(|e| {
            error!(error = %e, resource = R::LABEL, "failed to fetch catalog");
            e
        })?;

    let data: Vec<R> = projector::project(&records, query)
        .into_iter()
        .cloned()
        .collect();
    Ok(CatalogList {
        total: data.len(),
        data,
    })
}

async fn create<R: CatalogResource>(
    remote: &RemoteApi,
    mut record: R,
) -> Result<HttpResponse, ConsoleError> {
    record.prepare_create();
    let message = remote.create(R::CREATE, &record).await.map_err(|e| {
        error!(error = %e, resource = R::LABEL, "create failed");
        e
    })?;
    info!(resource = R::LABEL, "record created");

    Ok(HttpResponse::Ok().json(json!({
        "message": message.unwrap_or_else(|| format!("{} created successfully", sentence(R::LABEL)))
    })))
}

async fn update<R: CatalogResource>(
    remote: &RemoteApi,
    record: R,
) -> Result<HttpResponse, ConsoleError> {
    let id = record.record_id();
    let message = remote.update(R::UPDATE, &record).await.map_err(|e| {
        error!(error = %e, resource = R::LABEL, ?id, "update failed");
        e
    })?;
    info!(resource = R::LABEL, ?id, "record updated");

    Ok(HttpResponse::Ok().json(json!({
        "message": message.unwrap_or_else(|| format!("{} updated successfully", sentence(R::LABEL)))
    })))
}

async fn remove<R: CatalogResource>(remote: &RemoteApi, id: i64) -> Result<HttpResponse, ConsoleError> {
    let message = remote.delete(R::DELETE, id).await.map_err(|e| {
        error!(error = %e, resource = R::LABEL, id, "delete failed");
        e
    })?;
    info!(resource = R::LABEL, id, "record deleted");

    Ok(HttpResponse::Ok().json(json!({
        "message": message.unwrap_or_else(|| format!("{} deleted successfully", sentence(R::LABEL)))
    })))
}

/// List sections
#[utoipa::path(
    get,
    path = "/api/sections",
    responses(
        (status = 200, description = "All sections", body = [SectionRef]),
        (status = 502, description = "Remote API failure")
    ),
    tag = "Catalog"
)]
pub async fn list_sections(
    remote: web::Data<RemoteApi>,
) -> Result<web::Json<Vec<SectionRef>>, ConsoleError> {
    let sections = remote.fetch_list(SECTION_READ, SECTION_LIST_FIELD).await?;
    Ok(web::Json(sections))
}

/// Jobs of a section
#[utoipa::path(
    get,
    path = "/api/sections/{id}/jobs",
    params(("id" = i64, Path, description = "Section id")),
    responses(
        (status = 200, description = "Jobs of the section", body = [JobRef]),
        (status = 502, description = "Remote API failure")
    ),
    tag = "Catalog"
)]
pub async fn section_jobs(
    remote: web::Data<RemoteApi>,
    id: web::Path<i64>,
) -> Result<web::Json<Vec<JobRef>>, ConsoleError> {
    let query = SectionQuery {
        id: id.into_inner(),
        date: None,
    };
    let jobs = remote
        .fetch_by_section(JOBS_BY_SECTION, JOBS_BY_SECTION_FIELD, &query)
        .await?;
    Ok(web::Json(jobs))
}

/// List bonus types
#[utoipa::path(
    get,
    path = "/api/bonus-types",
    responses(
        (status = 200, description = "Bonus occasions", body = [BonusType]),
        (status = 502, description = "Remote API failure")
    ),
    tag = "Catalog"
)]
pub async fn list_bonus_types(
    remote: web::Data<RemoteApi>,
) -> Result<web::Json<Vec<BonusType>>, ConsoleError> {
    let types = remote
        .fetch_list(BONUS_TYPE_READ, BONUS_TYPE_LIST_FIELD)
        .await?;
    Ok(web::Json(types))
}

/// List employees
#[utoipa::path(
    get,
    path = "/api/employees",
    params(ViewQuery),
    responses((status = 200, description = "Employees", body = EmployeeList)),
    tag = "Catalog"
)]
pub async fn list_employees(
    remote: web::Data<RemoteApi>,
    query: web::Query<ViewQuery>,
) -> Result<web::Json<CatalogList<Employee>>, ConsoleError> {
    Ok(web::Json(list(&remote, &query).await?))
}

/// Create employee
#[utoipa::path(
    post,
    path = "/api/employees",
    request_body = Employee,
    responses(
        (status = 200, description = "Employee created", body = Object, example = json!({
            "message": "Employee created successfully"
        })),
        (status = 502, description = "Remote API failure")
    ),
    tag = "Catalog"
)]
pub async fn create_employee(
    remote: web::Data<RemoteApi>,
    payload: web::Json<Employee>,
) -> Result<HttpResponse, ConsoleError> {
    create(&remote, payload.into_inner()).await
}

/// Update employee
#[utoipa::path(
    put,
    path = "/api/employees",
    request_body = Employee,
    responses((status = 200, description = "Employee updated"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn update_employee(
    remote: web::Data<RemoteApi>,
    payload: web::Json<Employee>,
) -> Result<HttpResponse, ConsoleError> {
    update(&remote, payload.into_inner()).await
}

/// Delete employee
#[utoipa::path(
    delete,
    path = "/api/employees/{id}",
    params(("id" = i64, Path, description = "Employee id")),
    responses((status = 200, description = "Employee deleted"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn delete_employee(
    remote: web::Data<RemoteApi>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ConsoleError> {
    remove::<Employee>(&remote, id.into_inner()).await
}

/// List workers
#[utoipa::path(
    get,
    path = "/api/workers",
    params(ViewQuery),
    responses((status = 200, description = "Workers", body = WorkerList)),
    tag = "Catalog"
)]
pub async fn list_workers(
    remote: web::Data<RemoteApi>,
    query: web::Query<ViewQuery>,
) -> Result<web::Json<CatalogList<WorkerProfile>>, ConsoleError> {
    Ok(web::Json(list(&remote, &query).await?))
}

/// Create worker
#[utoipa::path(
    post,
    path = "/api/workers",
    request_body = WorkerProfile,
    responses((status = 200, description = "Worker created"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn create_worker(
    remote: web::Data<RemoteApi>,
    payload: web::Json<WorkerProfile>,
) -> Result<HttpResponse, ConsoleError> {
    create(&remote, payload.into_inner()).await
}

/// Update worker
#[utoipa::path(
    put,
    path = "/api/workers",
    request_body = WorkerProfile,
    responses((status = 200, description = "Worker updated"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn update_worker(
    remote: web::Data<RemoteApi>,
    payload: web::Json<WorkerProfile>,
) -> Result<HttpResponse, ConsoleError> {
    update(&remote, payload.into_inner()).await
}

/// Delete worker
#[utoipa::path(
    delete,
    path = "/api/workers/{id}",
    params(("id" = i64, Path, description = "Worker id")),
    responses((status = 200, description = "Worker deleted"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn delete_worker(
    remote: web::Data<RemoteApi>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ConsoleError> {
    remove::<WorkerProfile>(&remote, id.into_inner()).await
}

/// List jobs
#[utoipa::path(
    get,
    path = "/api/jobs",
    params(ViewQuery),
    responses((status = 200, description = "Jobs", body = JobList)),
    tag = "Catalog"
)]
pub async fn list_jobs(
    remote: web::Data<RemoteApi>,
    query: web::Query<ViewQuery>,
) -> Result<web::Json<CatalogList<JobRef>>, ConsoleError> {
    Ok(web::Json(list(&remote, &query).await?))
}

/// Create job
#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = JobRef,
    responses((status = 200, description = "Job created"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn create_job(
    remote: web::Data<RemoteApi>,
    payload: web::Json<JobRef>,
) -> Result<HttpResponse, ConsoleError> {
    create(&remote, payload.into_inner()).await
}

/// Update job
#[utoipa::path(
    put,
    path = "/api/jobs",
    request_body = JobRef,
    responses((status = 200, description = "Job updated"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn update_job(
    remote: web::Data<RemoteApi>,
    payload: web::Json<JobRef>,
) -> Result<HttpResponse, ConsoleError> {
    update(&remote, payload.into_inner()).await
}

/// Delete job
#[utoipa::path(
    delete,
    path = "/api/jobs/{id}",
    params(("id" = i64, Path, description = "Job id")),
    responses((status = 200, description = "Job deleted"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn delete_job(
    remote: web::Data<RemoteApi>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ConsoleError> {
    remove::<JobRef>(&remote, id.into_inner()).await
}

/// List leave types
#[utoipa::path(
    get,
    path = "/api/leave-types",
    params(ViewQuery),
    responses((status = 200, description = "Leave types", body = LeaveTypeList)),
    tag = "Catalog"
)]
pub async fn list_leave_types(
    remote: web::Data<RemoteApi>,
    query: web::Query<ViewQuery>,
) -> Result<web::Json<CatalogList<LeaveType>>, ConsoleError> {
    Ok(web::Json(list(&remote, &query).await?))
}

/// Create leave type
#[utoipa::path(
    post,
    path = "/api/leave-types",
    request_body = LeaveType,
    responses((status = 200, description = "Leave type created"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn create_leave_type(
    remote: web::Data<RemoteApi>,
    payload: web::Json<LeaveType>,
) -> Result<HttpResponse, ConsoleError> {
    create(&remote, payload.into_inner()).await
}

/// Update leave type
#[utoipa::path(
    put,
    path = "/api/leave-types",
    request_body = LeaveType,
    responses((status = 200, description = "Leave type updated"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn update_leave_type(
    remote: web::Data<RemoteApi>,
    payload: web::Json<LeaveType>,
) -> Result<HttpResponse, ConsoleError> {
    update(&remote, payload.into_inner()).await
}

/// Delete leave type
#[utoipa::path(
    delete,
    path = "/api/leave-types/{id}",
    params(("id" = i64, Path, description = "Leave type id")),
    responses((status = 200, description = "Leave type deleted"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn delete_leave_type(
    remote: web::Data<RemoteApi>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ConsoleError> {
    remove::<LeaveType>(&remote, id.into_inner()).await
}

/// List salaries
#[utoipa::path(
    get,
    path = "/api/salaries",
    params(ViewQuery),
    responses((status = 200, description = "Current salaries", body = SalaryList)),
    tag = "Catalog"
)]
pub async fn list_salaries(
    remote: web::Data<RemoteApi>,
    query: web::Query<ViewQuery>,
) -> Result<web::Json<CatalogList<SalaryEntry>>, ConsoleError> {
    let entries: Vec<SalaryEntry> = remote.fetch_list(SALARY_READ, SALARY_LIST_FIELD).await?;
    let data: Vec<SalaryEntry> = projector::project(&entries, &query)
        .into_iter()
        .cloned()
        .collect();
    Ok(web::Json(CatalogList {
        total: data.len(),
        data,
    }))
}

/// Update a salary
///
/// Stamps the change with today's date.
#[utoipa::path(
    put,
    path = "/api/salaries",
    request_body = SalaryChange,
    responses((status = 200, description = "Salary updated"), (status = 502, description = "Remote API failure")),
    tag = "Catalog"
)]
pub async fn update_salary(
    remote: web::Data<RemoteApi>,
    payload: web::Json<SalaryChange>,
) -> Result<HttpResponse, ConsoleError> {
    let change = payload.into_inner();
    let body = SalaryUpdate::new(
        change.id,
        parse_input(&change.salary_amount),
        Local::now().date_naive(),
    );

    let message = remote.update(SALARY_UPDATE, &body).await.map_err(|e| {
        error!(error = %e, id = change.id, "salary update failed");
        e
    })?;
    info!(id = change.id, amount = body.salary_amount, "salary updated");

    Ok(HttpResponse::Ok().json(json!({
        "message": message.unwrap_or_else(|| "Salary updated successfully".to_string())
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use crate::test_support::{FakeRemote, LOCKED_WORKER, test_config};
    use actix_web::http::{Method, StatusCode};
    use actix_web::App;
    use actix_web::test::{
        TestRequest, call_and_read_body_json, call_service, init_service, read_body_json,
    };
    use serde_json::Value;
    use std::net::SocketAddr;

    macro_rules! catalog_app {
        ($fake:expr) => {{
            let config = test_config(&$fake.base_url());
            init_service(
                App::new()
                    .app_data(web::Data::new(RemoteApi::new($fake.base_url())))
                    .configure(move |cfg| routes::configure(cfg, config)),
            )
            .await
        }};
    }

    fn request(method: Method, uri: &str) -> TestRequest {
        TestRequest::default()
            .method(method)
            .uri(uri)
            .peer_addr("127.0.0.1:40001".parse::<SocketAddr>().unwrap())
    }

    #[test]
    fn labels_read_as_sentences() {
        assert_eq!(sentence("leave type"), "Leave type");
        assert_eq!(sentence(""), "");
    }

    #[actix_web::test]
    async fn lists_are_filtered_locally() {
        let fake = FakeRemote::start().await;
        let app = catalog_app!(fake);

        let req = request(Method::GET, "/api/employees").to_request();
        let all: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(all["total"], 2);

        let req = request(Method::GET, "/api/employees?section=Sewing").to_request();
        let sewing: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(sewing["total"], 1);
        assert_eq!(sewing["data"][0]["empName"], "Omar");
        assert_eq!(fake.calls("EReadInformation"), 2);
    }

    #[actix_web::test]
    async fn reference_lists_pass_through() {
        let fake = FakeRemote::start().await;
        let app = catalog_app!(fake);

        let req = request(Method::GET, "/api/sections").to_request();
        let sections: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(sections.as_array().unwrap().len(), 3);

        let req = request(Method::GET, "/api/sections/3/jobs").to_request();
        let jobs: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(jobs.as_array().unwrap().len(), 2);
        assert_eq!(fake.last_body("JSearchInformationBySection").unwrap(), json!({ "id": 3 }));
    }

    #[actix_web::test]
    async fn create_drops_the_client_id() {
        let fake = FakeRemote::start().await;
        let app = catalog_app!(fake);

        let req = request(Method::POST, "/api/employees")
            .set_json(json!({ "empId": 99, "empName": "Rina", "sectionName": "Sewing" }))
            .to_request();
        let body: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Created");

        let sent = fake.last_body("ECreateInformation").unwrap();
        assert!(sent.get("empId").is_none());
        assert_eq!(sent["empName"], "Rina");
    }

    #[actix_web::test]
    async fn delete_failures_surface_the_remote_message() {
        let fake = FakeRemote::start().await;
        let app = catalog_app!(fake);

        let req = request(Method::DELETE, "/api/leave-types/1").to_request();
        let body: Value = call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Leave type deleted successfully");

        let req = request(Method::DELETE, &format!("/api/jobs/{LOCKED_WORKER}")).to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let body: Value = read_body_json(resp).await;
        assert_eq!(body["message"], "Error: 400 - Record in use");
    }

    #[actix_web::test]
    async fn salary_update_is_dated_today() {
        let fake = FakeRemote::start().await;
        let app = catalog_app!(fake);

        let req = request(Method::PUT, "/api/salaries")
            .set_json(json!({ "id": 1, "salary_amount": "21500" }))
            .to_request();
        let resp = call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let sent = fake.last_body("SUpdateInformation").unwrap();
        assert_eq!(sent["salary_Amount"].as_f64(), Some(21500.0));
        assert_eq!(
            sent["update_date"],
            Local::now().date_naive().format("%Y-%m-%d").to_string()
        );
    }
}
