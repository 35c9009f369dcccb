use actix_web::http::header::CONTENT_DISPOSITION;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info, warn};
use utoipa::ToSchema;

use crate::error::ConsoleError;
use crate::model::bonus_type::UNSET_PERIOD;
use crate::model::job::{JobRef, attendance_default};
use crate::model::section::{
    JOBS_BY_SECTION, JOBS_BY_SECTION_FIELD, SECTION_LIST_FIELD, SECTION_READ, SectionRef,
    find_section,
};
use crate::model::worker::WorkerRecord;
use crate::payroll::batch::{BatchReport, run_batch};
use crate::payroll::calculator::Totals;
use crate::payroll::month;
use crate::payroll::overrides::{OverrideField, WorkerId};
use crate::payroll::projector::{self, ViewQuery};
use crate::payroll::screen::{ScreenKind, ScreenRow, build_rows};
use crate::remote::RemoteApi;
use crate::remote::payload::{SectionQuery, build_update};
use crate::remote::pdf::default_filename;
use crate::session::{ConsoleSession, Session};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SelectSection {
    #[schema(example = 3)]
    pub section_id: i64,
    /// "MONTH, YYYY"
    #[schema(example = "MARCH, 2025")]
    pub month: Option<String>,
    /// Bonus screen only.
    #[schema(example = "EID-UL-FITR")]
    pub bonus_type: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct GoRequest {
    #[schema(example = "MARCH, 2025")]
    pub month: Option<String>,
    pub bonus_type: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OverrideInput {
    pub field: OverrideField,
    /// Number or numeric text; blank or unparsable counts as zero.
    #[schema(value_type = String, example = "150")]
    pub value: Value,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AttendanceInput {
    pub applied: bool,
}

/// Month-wide day counts copied into every row of the wages screen.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct WorkDetails {
    #[serde(default)]
    #[schema(example = 27)]
    pub working_days: i64,
    #[serde(default)]
    #[schema(example = 0)]
    pub festive_holidays: i64,
    #[serde(default)]
    #[schema(example = 4)]
    pub weekends: i64,
}

/// What a payroll screen shows for the current filter and sort.
#[derive(Debug, Serialize, ToSchema)]
pub struct ScreenView {
    pub kind: ScreenKind,
    pub section: Option<String>,
    pub month: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_type: Option<String>,
    /// Date key sent to the remote API.
    pub date: Option<String>,
    pub jobs: Vec<JobRef>,
    pub rows: Vec<ScreenRow>,
    pub totals: Totals,
    /// Message of the last failed fetch; rows are empty when set.
    pub error: Option<String>,
}

fn build_view(session: &Session, kind: ScreenKind, query: &ViewQuery) -> ScreenView {
    session.with_screen(kind, |s| {
        let visible = projector::project(&s.rows, query);
        let (rows, totals) = build_rows(kind, visible, &s.overrides);
        ScreenView {
            kind,
            section: s.section.as_ref().and_then(|sec| sec.name.clone()),
            month: s.month_label.clone(),
            bonus_type: s.bonus_type.clone(),
            date: kind.date_key(s.month_label.as_deref(), s.bonus_type.as_deref()),
            jobs: s.jobs.clone(),
            rows,
            totals,
            error: s.last_error.clone(),
        }
    })
}

fn row_of(session: &Session, kind: ScreenKind, worker_id: WorkerId) -> Option<ScreenRow> {
    session.with_screen(kind, |s| {
        let record = s.rows.iter().find(|r| r.valid_id() == Some(worker_id))?;
        build_rows(kind, [record], &s.overrides).0.pop()
    })
}

/// Validated month label; blank means "not given".
fn month_label(raw: Option<String>) -> Result<Option<String>, ConsoleError> {
    let Some(label) = raw.map(|l| l.trim().to_string()).filter(|l| !l.is_empty()) else {
        return Ok(None);
    };
    if month::encode(&label).is_none() {
        return Err(ConsoleError::validation(format!(
            "Invalid month \"{label}\", expected MONTH, YYYY"
        )));
    }
    Ok(Some(label))
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Re-fetch the screen's rows for its section and date. Overrides already
/// entered survive; a failed fetch empties the screen.
async fn refresh_rows(
    session: &Session,
    remote: &RemoteApi,
    kind: ScreenKind,
) -> Result<(), ConsoleError> {
    let (section_id, date) = session.with_screen(kind, |s| {
        (
            s.section_id(),
            kind.date_key(s.month_label.as_deref(), s.bonus_type.as_deref()),
        )
    });
    let Some(section_id) = section_id else {
        return Err(ConsoleError::validation("Please select a section first"));
    };

    let query = SectionQuery {
        id: section_id,
        date,
    };
    match remote
        .fetch_by_section::<WorkerRecord>(kind.fetch_endpoint(), kind.list_field(), &query)
        .await
    {
        Ok(rows) => {
            info!(%kind, section_id, rows = rows.len(), "screen rows fetched");
            session.with_screen(kind, |s| s.apply_rows(kind, rows));
            Ok(())
        }
        Err(e) => {
            error!(error = %e, %kind, section_id, "failed to fetch screen rows");
            session.with_screen(kind, |s| s.clear_rows(e.to_string()));
            Err(e.into())
        }
    }
}

/// Section, remote date key and download period of a screen that is about
/// to be saved or printed.
struct Target {
    section_id: i64,
    section: String,
    date: String,
    period: String,
}

fn require_target(session: &Session, kind: ScreenKind) -> Result<Target, ConsoleError> {
    session.with_screen(kind, |s| {
        let section_id = s
            .section_id()
            .ok_or_else(|| ConsoleError::validation("Please select a section first"))?;
        let date = kind.date_key(s.month_label.as_deref(), s.bonus_type.as_deref());

        let (date, period) = match (kind, date) {
            (ScreenKind::Bonus, Some(period)) if period != UNSET_PERIOD => {
                (period.clone(), period)
            }
            (ScreenKind::Bonus, _) => {
                return Err(ConsoleError::validation(
                    "Please select a bonus type or month first",
                ));
            }
            (_, Some(token)) => (token, s.month_label.clone().unwrap_or_default()),
            (_, None) => return Err(ConsoleError::validation("Please select a month first")),
        };

        Ok(Target {
            section_id,
            section: s.section_name().to_string(),
            date,
            period,
        })
    })
}

/// Select a section
///
/// Loads the section's jobs and rows. Values already entered for workers of
/// this screen are kept.
#[utoipa::path(
    post,
    path = "/api/screens/{kind}/select",
    params(("kind" = ScreenKind, Path, description = "Payroll screen")),
    request_body = SelectSection,
    responses(
        (status = 200, description = "Screen loaded", body = ScreenView),
        (status = 400, description = "Invalid month"),
        (status = 401, description = "Missing session"),
        (status = 404, description = "Unknown section"),
        (status = 502, description = "Remote API failure")
    ),
    tag = "Screens",
    security(("console_session" = []))
)]
pub async fn select_section(
    ConsoleSession(session): ConsoleSession,
    remote: web::Data<RemoteApi>,
    kind: web::Path<ScreenKind>,
    payload: web::Json<SelectSection>,
) -> Result<web::Json<ScreenView>, ConsoleError> {
    let kind = kind.into_inner();
    let SelectSection {
        section_id,
        month,
        bonus_type,
    } = payload.into_inner();
    let month = month_label(month)?;

    let sections: Vec<SectionRef> = remote.fetch_list(SECTION_READ, SECTION_LIST_FIELD).await?;
    let section = find_section(&sections, section_id)
        .cloned()
        .ok_or_else(|| ConsoleError::NotFound(format!("Section {section_id}")))?;

    let jobs: Vec<JobRef> = match remote
        .fetch_by_section(
            JOBS_BY_SECTION,
            JOBS_BY_SECTION_FIELD,
            &SectionQuery {
                id: section_id,
                date: None,
            },
        )
        .await
    {
        Ok(jobs) => jobs,
        Err(e) => {
            warn!(error = %e, section_id, "failed to fetch jobs for section");
            Vec::new()
        }
    };

    session.with_screen(kind, |s| {
        s.section = Some(section);
        s.jobs = jobs;
        if month.is_some() {
            s.month_label = month;
        }
        if let Some(bonus_type) = non_blank(bonus_type) {
            s.bonus_type = Some(bonus_type);
        }
    });

    refresh_rows(&session, &remote, kind).await?;
    Ok(web::Json(build_view(&session, kind, &ViewQuery::default())))
}

/// Go
///
/// Discards every value entered on the screen and re-fetches its rows.
#[utoipa::path(
    post,
    path = "/api/screens/{kind}/go",
    params(("kind" = ScreenKind, Path, description = "Payroll screen")),
    request_body = GoRequest,
    responses(
        (status = 200, description = "Screen reloaded", body = ScreenView),
        (status = 400, description = "No section selected or invalid month"),
        (status = 409, description = "Another save or refresh is running"),
        (status = 502, description = "Remote API failure")
    ),
    tag = "Screens",
    security(("console_session" = []))
)]
pub async fn go(
    ConsoleSession(session): ConsoleSession,
    remote: web::Data<RemoteApi>,
    kind: web::Path<ScreenKind>,
    payload: Option<web::Json<GoRequest>>,
) -> Result<web::Json<ScreenView>, ConsoleError> {
    let kind = kind.into_inner();
    let GoRequest { month, bonus_type } = payload.map(|p| p.into_inner()).unwrap_or_default();
    let month = month_label(month)?;

    let _guard = session.begin(kind)?;
    session.with_screen(kind, |s| {
        if s.section.is_none() {
            return Err(ConsoleError::validation("Please select a section first"));
        }
        if month.is_some() {
            s.month_label = month;
        }
        if let Some(bonus_type) = non_blank(bonus_type) {
            s.bonus_type = Some(bonus_type);
        }
        s.overrides.reset();
        Ok(())
    })?;

    refresh_rows(&session, &remote, kind).await?;
    Ok(web::Json(build_view(&session, kind, &ViewQuery::default())))
}

/// Screen rows
///
/// Rows with computed figures and totals for the given filter and sort.
#[utoipa::path(
    get,
    path = "/api/screens/{kind}/rows",
    params(("kind" = ScreenKind, Path, description = "Payroll screen"), ViewQuery),
    responses(
        (status = 200, description = "Current rows", body = ScreenView),
        (status = 401, description = "Missing session")
    ),
    tag = "Screens",
    security(("console_session" = []))
)]
pub async fn rows(
    ConsoleSession(session): ConsoleSession,
    kind: web::Path<ScreenKind>,
    query: web::Query<ViewQuery>,
) -> Result<web::Json<ScreenView>, ConsoleError> {
    Ok(web::Json(build_view(&session, kind.into_inner(), &query)))
}

fn raw_input(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    }
}

/// Edit a value
#[utoipa::path(
    put,
    path = "/api/screens/{kind}/overrides/{worker_id}",
    params(
        ("kind" = ScreenKind, Path, description = "Payroll screen"),
        ("worker_id" = i64, Path, description = "Worker id")
    ),
    request_body = OverrideInput,
    responses(
        (status = 200, description = "Row with recomputed figures", body = ScreenRow),
        (status = 400, description = "Field not editable on this screen"),
        (status = 404, description = "Worker not on screen")
    ),
    tag = "Screens",
    security(("console_session" = []))
)]
pub async fn set_override(
    ConsoleSession(session): ConsoleSession,
    path: web::Path<(ScreenKind, WorkerId)>,
    payload: web::Json<OverrideInput>,
) -> Result<web::Json<ScreenRow>, ConsoleError> {
    let (kind, worker_id) = path.into_inner();
    let field = payload.field;
    if !kind.is_editable(field) {
        return Err(ConsoleError::validation(format!(
            "{field} is not editable on the {kind} screen"
        )));
    }

    let raw = raw_input(&payload.value);
    session.with_screen(kind, |s| {
        if !s.rows.iter().any(|r| r.valid_id() == Some(worker_id)) {
            return Err(ConsoleError::NotFound(format!("Worker {worker_id}")));
        }
        s.overrides.set(worker_id, field, &raw);
        Ok(())
    })?;

    row_of(&session, kind, worker_id)
        .map(web::Json)
        .ok_or_else(|| ConsoleError::NotFound(format!("Worker {worker_id}")))
}

/// Toggle attendance bonus
///
/// Applying copies the job's attendance bonus into the worker's row,
/// removing it sets it to zero.
#[utoipa::path(
    put,
    path = "/api/screens/wage-slip/attendance/{worker_id}",
    params(("worker_id" = i64, Path, description = "Worker id")),
    request_body = AttendanceInput,
    responses(
        (status = 200, description = "Row with recomputed figures", body = ScreenRow),
        (status = 404, description = "Worker not on screen")
    ),
    tag = "Screens",
    security(("console_session" = []))
)]
pub async fn toggle_attendance(
    ConsoleSession(session): ConsoleSession,
    worker_id: web::Path<WorkerId>,
    payload: web::Json<AttendanceInput>,
) -> Result<web::Json<ScreenRow>, ConsoleError> {
    let kind = ScreenKind::WageSlip;
    let worker_id = worker_id.into_inner();

    let amount = session.with_screen(kind, |s| {
        let record = s
            .rows
            .iter()
            .find(|r| r.valid_id() == Some(worker_id))
            .ok_or_else(|| ConsoleError::NotFound(format!("Worker {worker_id}")))?;
        let default = attendance_default(&s.jobs, record.job_name.as_deref());
        Ok::<_, ConsoleError>(
            s.overrides
                .toggle_attendance(worker_id, payload.applied, default),
        )
    })?;
    info!(worker_id, applied = payload.applied, amount, "attendance bonus toggled");

    row_of(&session, kind, worker_id)
        .map(web::Json)
        .ok_or_else(|| ConsoleError::NotFound(format!("Worker {worker_id}")))
}

/// Apply work details
///
/// Sets working days, festive holidays and weekends on every worker of the
/// wages screen. Leave columns keep their values, so total days follow.
#[utoipa::path(
    post,
    path = "/api/screens/wages/work-details",
    request_body = WorkDetails,
    responses(
        (status = 200, description = "Screen with recomputed day counts", body = ScreenView),
        (status = 400, description = "No section selected"),
        (status = 401, description = "Missing session")
    ),
    tag = "Screens",
    security(("console_session" = []))
)]
pub async fn apply_work_details(
    ConsoleSession(session): ConsoleSession,
    payload: web::Json<WorkDetails>,
) -> Result<web::Json<ScreenView>, ConsoleError> {
    let kind = ScreenKind::Wages;
    let details = payload.into_inner();

    let applied = session.with_screen(kind, |s| {
        if s.section.is_none() {
            return Err(ConsoleError::validation("Please select a section first"));
        }
        let ids: Vec<WorkerId> = s.rows.iter().filter_map(WorkerRecord::valid_id).collect();
        for &id in &ids {
            s.overrides
                .set_value(id, OverrideField::WorkingDays, details.working_days as f64);
            s.overrides
                .set_value(id, OverrideField::FestiveHolidays, details.festive_holidays as f64);
            s.overrides
                .set_value(id, OverrideField::Weekends, details.weekends as f64);
        }
        Ok(ids.len())
    })?;
    info!(
        workers = applied,
        working_days = details.working_days,
        festive_holidays = details.festive_holidays,
        weekends = details.weekends,
        "work details applied"
    );

    Ok(web::Json(build_view(&session, kind, &ViewQuery::default())))
}

/// Save
///
/// Sends every row matching the filter to the remote API, one worker at a
/// time. Reloads the rows when all of them were saved.
#[utoipa::path(
    post,
    path = "/api/screens/{kind}/save",
    params(("kind" = ScreenKind, Path, description = "Payroll screen")),
    request_body = ViewQuery,
    responses(
        (status = 200, description = "Per-worker outcome", body = BatchReport),
        (status = 400, description = "No section or period selected"),
        (status = 409, description = "Another save or refresh is running")
    ),
    tag = "Screens",
    security(("console_session" = []))
)]
pub async fn save(
    ConsoleSession(session): ConsoleSession,
    remote: web::Data<RemoteApi>,
    kind: web::Path<ScreenKind>,
    query: Option<web::Json<ViewQuery>>,
) -> Result<web::Json<BatchReport>, ConsoleError> {
    let kind = kind.into_inner();
    let query = query.map(|q| q.into_inner()).unwrap_or_default();

    let _guard = session.begin(kind)?;
    let target = require_target(&session, kind)?;

    let (rows, overrides) = session.with_screen(kind, |s| {
        let rows: Vec<WorkerRecord> = projector::project(&s.rows, &query)
            .into_iter()
            .cloned()
            .collect();
        (rows, s.overrides.clone())
    });

    let report = run_batch(&rows, |id, record| {
        let payload = build_update(kind, id, record, &overrides, &target.section, &target.date);
        let remote = remote.clone();
        async move { remote.update(kind.update_endpoint(), &payload).await }
    })
    .await;

    if report.all_saved() {
        if let Err(e) = refresh_rows(&session, &remote, kind).await {
            warn!(error = %e, %kind, "reload after save failed");
        }
    }

    Ok(web::Json(report))
}

/// Print
///
/// Relays the remote report for the screen's section and period.
#[utoipa::path(
    post,
    path = "/api/screens/{kind}/pdf",
    params(("kind" = ScreenKind, Path, description = "Payroll screen")),
    responses(
        (status = 200, description = "PDF report", content_type = "application/pdf"),
        (status = 400, description = "No section or period selected"),
        (status = 502, description = "Remote API failure")
    ),
    tag = "Screens",
    security(("console_session" = []))
)]
pub async fn pdf(
    ConsoleSession(session): ConsoleSession,
    remote: web::Data<RemoteApi>,
    kind: web::Path<ScreenKind>,
) -> Result<HttpResponse, ConsoleError> {
    let kind = kind.into_inner();
    let target = require_target(&session, kind)?;

    let query = SectionQuery {
        id: target.section_id,
        date: Some(target.date.clone()),
    };
    let document = remote
        .download_pdf(kind.pdf_endpoint(), &query)
        .await
        .map_err(|e| {
            error!(error = %e, %kind, section_id = target.section_id, "report download failed");
            e
        })?;

    let filename =
        document.filename_or(|| default_filename(kind.pdf_prefix(), &target.section, &target.period));
    let content_type = document
        .content_type
        .clone()
        .unwrap_or_else(|| "application/pdf".to_string());

    Ok(HttpResponse::Ok()
        .content_type(content_type)
        .insert_header((CONTENT_DISPOSITION, format!("attachment; filename=\"{filename}\"")))
        .body(document.bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use crate::session::{SESSION_HEADER, SessionStore};
    use crate::test_support::{FakeRemote, LOCKED_WORKER, MISSING_SECTION, test_config};
    use actix_web::http::{Method, StatusCode};
    use actix_web::{App, test};
    use serde_json::json;
    use std::net::SocketAddr;
    use std::time::Duration;

    const PEER: &str = "127.0.0.1:40000";

    macro_rules! console_app {
        ($fake:expr, $store:expr) => {{
            let config = test_config(&$fake.base_url());
            test::init_service(
                App::new()
                    .app_data(web::Data::new(RemoteApi::new($fake.base_url())))
                    .app_data(web::Data::new($store.clone()))
                    .configure(move |cfg| routes::configure(cfg, config)),
            )
            .await
        }};
    }

    fn store() -> SessionStore {
        SessionStore::new(Duration::from_secs(60), 100)
    }

    fn request(session: &Session) -> test::TestRequest {
        test::TestRequest::default()
            .peer_addr(PEER.parse::<SocketAddr>().unwrap())
            .insert_header((SESSION_HEADER, session.id.to_string()))
    }

    fn select(session: &Session, kind: &str, body: Value) -> test::TestRequest {
        request(session)
            .method(Method::POST)
            .uri(&format!("/api/screens/{kind}/select"))
            .set_json(body)
    }

    #[actix_web::test]
    async fn select_loads_rows_jobs_and_figures() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let body = json!({ "section_id": 3, "month": "MARCH, 2025", "bonus_type": "EID-UL-FITR" });
        let req = select(&session, "bonus", body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let view: Value = test::read_body_json(resp).await;
        assert_eq!(view["section"], "Sewing");
        assert_eq!(view["date"], "EID-UL-FITR - MARCH, 2025");
        assert_eq!(view["jobs"].as_array().unwrap().len(), 2);
        assert_eq!(view["rows"].as_array().unwrap().len(), 3);
        assert_eq!(view["rows"][0]["figures"]["net"].as_f64(), Some(2400.0));
        assert_eq!(view["totals"]["workers"], 3);
        assert!(view["error"].is_null());

        let sent = fake.last_body("BSalSearchBySection").unwrap();
        assert_eq!(sent, json!({ "id": 3, "date": "EID-UL-FITR - MARCH, 2025" }));
    }

    #[actix_web::test]
    async fn unknown_section_is_not_found() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let req = select(&session, "wages", json!({ "section_id": 5 })).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(fake.calls("WSearchInformationBySection"), 0);
    }

    #[actix_web::test]
    async fn failed_fetch_empties_the_screen() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let body = json!({ "section_id": 3, "month": "MARCH, 2025" });
        let req = select(&session, "wages", body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body = json!({ "section_id": MISSING_SECTION });
        let req = select(&session, "wages", body).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["message"], "Section not found");

        let req = request(&session).uri("/api/screens/wages/rows").to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert!(view["rows"].as_array().unwrap().is_empty());
        assert_eq!(view["error"], "Section not found");
        assert_eq!(view["section"], "Archive");
    }

    #[actix_web::test]
    async fn overrides_recompute_until_go_resets_them() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let body = json!({ "section_id": 3, "month": "MARCH, 2025" });
        let req = select(&session, "overtime", body).to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["rows"][0]["figures"]["gross"].as_f64(), Some(2000.0));
        assert_eq!(view["rows"][0]["figures"]["net"].as_f64(), Some(1900.0));

        let req = request(&session)
            .method(Method::PUT)
            .uri("/api/screens/overtime/overrides/1")
            .set_json(json!({ "field": "hours", "value": "5" }))
            .to_request();
        let row: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(row["figures"]["hours"].as_f64(), Some(5.0));
        assert_eq!(row["figures"]["gross"].as_f64(), Some(1000.0));
        assert_eq!(row["figures"]["net"].as_f64(), Some(900.0));

        // a re-select keeps what was entered
        let body = json!({ "section_id": 3 });
        let req = select(&session, "overtime", body).to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["rows"][0]["figures"]["gross"].as_f64(), Some(1000.0));

        let req = request(&session)
            .method(Method::POST)
            .uri("/api/screens/overtime/go")
            .to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["rows"][0]["figures"]["gross"].as_f64(), Some(2000.0));
    }

    #[actix_web::test]
    async fn rejects_fields_the_screen_does_not_edit() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let body = json!({ "section_id": 3, "bonus_type": "EID-UL-FITR" });
        let req = select(&session, "bonus", body).to_request();
        test::call_service(&app, req).await;

        let req = request(&session)
            .method(Method::PUT)
            .uri("/api/screens/bonus/overrides/1")
            .set_json(json!({ "field": "hours", "value": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let req = request(&session)
            .method(Method::PUT)
            .uri("/api/screens/bonus/overrides/42")
            .set_json(json!({ "field": "deduction", "value": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn attendance_toggle_uses_the_job_bonus() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let body = json!({ "section_id": 3, "month": "MARCH, 2025" });
        let req = select(&session, "wage-slip", body).to_request();
        test::call_service(&app, req).await;

        let toggle = |applied: bool| {
            request(&session)
                .method(Method::PUT)
                .uri("/api/screens/wage-slip/attendance/1")
                .set_json(json!({ "applied": applied }))
                .to_request()
        };

        let row: Value = test::call_and_read_body_json(&app, toggle(true)).await;
        assert_eq!(row["attendance_applied"], true);
        assert_eq!(row["figures"]["attendanceBonus"].as_f64(), Some(400.0));
        assert_eq!(row["figures"]["netWages"].as_f64(), Some(5300.0));
        assert_eq!(row["figures"]["net"].as_f64(), Some(5450.0));

        let row: Value = test::call_and_read_body_json(&app, toggle(false)).await;
        assert_eq!(row["attendance_applied"], false);
        assert_eq!(row["figures"]["netWages"].as_f64(), Some(4900.0));
    }

    #[actix_web::test]
    async fn work_details_reach_every_wages_row() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let apply = |body: Value| {
            request(&session)
                .method(Method::POST)
                .uri("/api/screens/wages/work-details")
                .set_json(body)
                .to_request()
        };
        let details = json!({ "working_days": 28, "festive_holidays": 1, "weekends": 4 });

        let resp = test::call_service(&app, apply(details.clone())).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body = json!({ "section_id": 3, "month": "MARCH, 2025" });
        let req = select(&session, "wages", body).to_request();
        let view: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(view["rows"][0]["figures"]["totalDays"], 22);

        let req = request(&session)
            .method(Method::PUT)
            .uri("/api/screens/wages/overrides/13")
            .set_json(json!({ "field": "absentDays", "value": 2 }))
            .to_request();
        test::call_service(&app, req).await;

        let view: Value = test::call_and_read_body_json(&app, apply(details)).await;
        assert_eq!(view["rows"][0]["figures"]["totalDays"], 23);
        assert_eq!(view["rows"][2]["figures"]["totalDays"], 21);
        // workers without an id have no overrides to carry the days
        assert_eq!(view["rows"][1]["figures"]["totalDays"], 0);
    }

    #[actix_web::test]
    async fn save_reports_each_worker() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let body = json!({ "section_id": 3, "month": "MARCH, 2025" });
        let req = select(&session, "wages", body).to_request();
        test::call_service(&app, req).await;

        let req = request(&session)
            .method(Method::POST)
            .uri("/api/screens/wages/save")
            .to_request();
        let report: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(report["total"], 3);
        assert_eq!(report["saved"], 1);
        assert_eq!(
            report["summary"],
            "Partially successful: Updated 1 out of 3 workers. Failed: Bea, Cem"
        );
        assert_eq!(report["results"][1]["message"], crate::payroll::batch::MISSING_ID);
        assert_eq!(report["results"][2]["message"], "Error: 500 - Worker is locked");

        let sent = fake.bodies("WagUpdateInformation");
        assert_eq!(sent.len(), 2);
        assert_eq!(sent[0]["id"], 1);
        assert_eq!(sent[0]["month"], "2025-03");
        assert_eq!(sent[1]["id"], LOCKED_WORKER);
        // partial saves keep the screen as it was
        assert_eq!(fake.calls("WSearchInformationBySection"), 1);
    }

    #[actix_web::test]
    async fn save_needs_a_month() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let req = select(&session, "overtime", json!({ "section_id": 3 })).to_request();
        test::call_service(&app, req).await;

        let req = request(&session)
            .method(Method::POST)
            .uri("/api/screens/overtime/save")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let err: Value = test::read_body_json(resp).await;
        assert_eq!(err["message"], "Please select a month first");
        assert_eq!(fake.calls("OTUpdateInformation"), 0);
    }

    #[actix_web::test]
    async fn screens_need_a_session() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);

        let req = test::TestRequest::get()
            .peer_addr(PEER.parse::<SocketAddr>().unwrap())
            .uri("/api/screens/wages/rows")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let session = store.create().await;
        let req = request(&session).uri("/api/screens/payslips/rows").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn busy_screen_refuses_a_second_run() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let req = select(&session, "overtime", json!({ "section_id": 3 })).to_request();
        test::call_service(&app, req).await;

        let guard = session.begin(ScreenKind::Overtime).unwrap();
        let go = || {
            request(&session)
                .method(Method::POST)
                .uri("/api/screens/overtime/go")
                .to_request()
        };
        let resp = test::call_service(&app, go()).await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        drop(guard);
        let resp = test::call_service(&app, go()).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn pdf_names_the_download() {
        let fake = FakeRemote::start().await;
        let store = store();
        let app = console_app!(fake, store);
        let session = store.create().await;

        let body = json!({ "section_id": 3, "month": "MARCH, 2025" });
        let req = select(&session, "wages", body.clone()).to_request();
        test::call_service(&app, req).await;
        let req = select(&session, "overtime", body).to_request();
        test::call_service(&app, req).await;

        let pdf = |kind: &str| {
            request(&session)
                .method(Method::POST)
                .uri(&format!("/api/screens/{kind}/pdf"))
                .to_request()
        };

        let resp = test::call_service(&app, pdf("wages")).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers().get(CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"Salary_Report_Sewing_MARCH, 2025.pdf\""
        );
        assert_eq!(
            test::read_body(resp).await,
            web::Bytes::from_static(b"%PDF-1.4 fake")
        );
        assert_eq!(
            fake.last_body("generatesalarypdf").unwrap(),
            json!({ "id": 3, "date": "2025-03" })
        );

        let resp = test::call_service(&app, pdf("overtime")).await;
        assert_eq!(
            resp.headers().get(CONTENT_DISPOSITION).unwrap(),
            "attachment; filename=\"OT_Sewing.pdf\""
        );
    }
}
