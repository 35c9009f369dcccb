use actix_web::{HttpResponse, web};
use chrono::{Datelike, Local};
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};

use crate::error::ConsoleError;
use crate::payroll::month::{self, MonthToken};
use crate::session::{ConsoleSession, SessionStore};

#[derive(Serialize, ToSchema)]
pub struct SessionOpened {
    #[schema(example = "6f1c2a0e-8a53-4d55-9a0b-3c1d2e4f5a6b")]
    pub session_id: String,
}

/// Open a console session
///
/// The returned id goes into the `X-Console-Session` header of every screen
/// request.
#[utoipa::path(
    post,
    path = "/api/session",
    responses((status = 200, description = "Session opened", body = SessionOpened)),
    tag = "Session"
)]
pub async fn open_session(store: web::Data<SessionStore>) -> HttpResponse {
    let session = store.create().await;
    HttpResponse::Ok().json(SessionOpened {
        session_id: session.id.to_string(),
    })
}

/// Close the console session
#[utoipa::path(
    delete,
    path = "/api/session",
    responses(
        (status = 200, description = "Session closed"),
        (status = 401, description = "Missing session")
    ),
    tag = "Session",
    security(("console_session" = []))
)]
pub async fn close_session(
    ConsoleSession(session): ConsoleSession,
    store: web::Data<SessionStore>,
) -> HttpResponse {
    store.remove(&session.id).await;
    HttpResponse::Ok().json(json!({ "message": "Session closed" }))
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct YearQuery {
    /// Defaults to the current year.
    pub year: Option<i32>,
}

#[derive(Serialize, ToSchema)]
pub struct MonthOption {
    #[schema(example = "MARCH, 2025")]
    pub label: String,
    #[schema(example = "2025-03")]
    pub token: String,
}

#[derive(Serialize, ToSchema)]
pub struct MonthInfo {
    #[schema(example = "MARCH, 2025")]
    pub label: String,
    #[schema(example = "2025-03")]
    pub token: String,
    #[schema(example = 31)]
    pub days_in_month: u32,
    /// Fridays in the month.
    #[schema(example = 4)]
    pub weekends: u32,
    #[schema(example = 27)]
    pub working_days: u32,
}

impl From<MonthToken> for MonthInfo {
    fn from(token: MonthToken) -> Self {
        Self {
            label: token.label(),
            token: token.to_string(),
            days_in_month: token.days_in_month(),
            weekends: token.weekends(),
            working_days: token.working_days(),
        }
    }
}

/// Months of a year
#[utoipa::path(
    get,
    path = "/api/months",
    params(YearQuery),
    responses((status = 200, description = "The twelve month choices", body = [MonthOption])),
    tag = "Calendar"
)]
pub async fn list_months(query: web::Query<YearQuery>) -> web::Json<Vec<MonthOption>> {
    let year = query.year.unwrap_or_else(|| Local::now().year());
    let months = month::labels_for_year(year)
        .into_iter()
        .filter_map(|label| {
            let token = month::encode(&label)?;
            Some(MonthOption {
                token: token.to_string(),
                label,
            })
        })
        .collect();
    web::Json(months)
}

/// Month details
///
/// Token and calendar figures of a "MONTH, YYYY" label or a "YYYY-MM" token.
#[utoipa::path(
    get,
    path = "/api/months/{label}",
    params(("label" = String, Path, description = "MONTH, YYYY or YYYY-MM")),
    responses(
        (status = 200, description = "Month details", body = MonthInfo),
        (status = 400, description = "Not a month label")
    ),
    tag = "Calendar"
)]
pub async fn month_info(label: web::Path<String>) -> Result<web::Json<MonthInfo>, ConsoleError> {
    month::encode(&label)
        .or_else(|| label.parse::<MonthToken>().ok())
        .map(|token| web::Json(MonthInfo::from(token)))
        .ok_or_else(|| ConsoleError::validation(format!("Invalid month \"{label}\"")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes;
    use crate::session::SESSION_HEADER;
    use crate::test_support::test_config;
    use actix_web::App;
    use actix_web::http::{Method, StatusCode};
    use actix_web::test::{TestRequest, call_and_read_body_json, call_service, init_service};
    use serde_json::Value;
    use std::net::SocketAddr;
    use std::time::Duration;

    macro_rules! console_app {
        ($store:expr) => {{
            // nothing here reaches the remote API
            let config = test_config("http://127.0.0.1:9");
            init_service(
                App::new()
                    .app_data(web::Data::new($store.clone()))
                    .configure(move |cfg| routes::configure(cfg, config)),
            )
            .await
        }};
    }

    fn request(method: Method, uri: &str) -> TestRequest {
        TestRequest::default()
            .method(method)
            .uri(uri)
            .peer_addr("127.0.0.1:40002".parse::<SocketAddr>().unwrap())
    }

    #[actix_web::test]
    async fn session_opens_and_closes_once() {
        let store = SessionStore::new(Duration::from_secs(60), 100);
        let app = console_app!(store);

        let opened: Value =
            call_and_read_body_json(&app, request(Method::POST, "/api/session").to_request())
                .await;
        let id = opened["session_id"].as_str().unwrap().to_string();
        assert!(store.get(&id.parse().unwrap()).await.is_some());

        let close = || {
            request(Method::DELETE, "/api/session")
                .insert_header((SESSION_HEADER, id.clone()))
                .to_request()
        };
        let resp = call_service(&app, close()).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(store.get(&id.parse().unwrap()).await.is_none());

        let resp = call_service(&app, close()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let resp = call_service(&app, request(Method::DELETE, "/api/session").to_request()).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn month_details_accept_label_or_token() {
        let store = SessionStore::new(Duration::from_secs(60), 100);
        let app = console_app!(store);

        for uri in ["/api/months/2025-03", "/api/months/MARCH,%202025"] {
            let info: Value =
                call_and_read_body_json(&app, request(Method::GET, uri).to_request()).await;
            assert_eq!(info["token"], "2025-03", "{uri}");
            assert_eq!(info["label"], "MARCH, 2025", "{uri}");
            assert_eq!(info["days_in_month"], 31);
            assert_eq!(info["weekends"], 4);
            assert_eq!(info["working_days"], 27);
        }

        let resp = call_service(&app, request(Method::GET, "/api/months/bogus").to_request()).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_web::test]
    async fn months_list_the_whole_year() {
        let store = SessionStore::new(Duration::from_secs(60), 100);
        let app = console_app!(store);

        let months: Value = call_and_read_body_json(
            &app,
            request(Method::GET, "/api/months?year=2025").to_request(),
        )
        .await;
        let months = months.as_array().unwrap();
        assert_eq!(months.len(), 12);
        assert_eq!(months[0]["label"], "JANUARY, 2025");
        assert_eq!(months[11]["token"], "2025-12");
    }
}
