//! In-process stand-in for the remote payroll API, shared by the client and
//! handler tests.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use strum::IntoEnumIterator;

use crate::config::Config;
use crate::payroll::screen::ScreenKind;

/// Worker id the fake refuses to update.
pub const LOCKED_WORKER: i64 = 13;
/// Section the fake lists but refuses to return rows for.
pub const MISSING_SECTION: i64 = 99;

#[derive(Clone, Default)]
struct Recorder {
    bodies: Arc<Mutex<HashMap<String, Vec<Value>>>>,
}

impl Recorder {
    fn record(&self, endpoint: &str, body: Value) {
        self.bodies
            .lock()
            .unwrap()
            .entry(endpoint.to_string())
            .or_default()
            .push(body);
    }
}

pub struct FakeRemote {
    addr: SocketAddr,
    recorder: Recorder,
}

impl FakeRemote {
    pub async fn start() -> Self {
        let recorder = Recorder::default();
        let data = web::Data::new(recorder.clone());

        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .default_service(web::to(respond))
        })
        .workers(1)
        .disable_signals()
        .bind(("127.0.0.1", 0))
        .unwrap();

        let addr = server.addrs()[0];
        actix_web::rt::spawn(server.run());

        Self { addr, recorder }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}/api/CrudApplication", self.addr)
    }

    pub fn bodies(&self, endpoint: &str) -> Vec<Value> {
        self.recorder
            .bodies
            .lock()
            .unwrap()
            .get(endpoint)
            .cloned()
            .unwrap_or_default()
    }

    pub fn last_body(&self, endpoint: &str) -> Option<Value> {
        self.bodies(endpoint).pop()
    }

    pub fn calls(&self, endpoint: &str) -> usize {
        self.bodies(endpoint).len()
    }
}

/// Server configuration pointing at `remote_api_url`.
pub fn test_config(remote_api_url: &str) -> Config {
    Config {
        server_addr: "127.0.0.1:0".to_string(),
        remote_api_url: remote_api_url.to_string(),
        api_prefix: "/api".to_string(),
        session_ttl: Duration::from_secs(60),
        session_capacity: 100,
        rate_screen_per_min: 600,
        rate_catalog_per_min: 600,
        log_dir: "logs".to_string(),
        log_level: tracing::Level::DEBUG,
        warnings: Vec::new(),
    }
}

fn workers() -> Value {
    json!([
        {
            "id": 1, "name": "Ali", "sectionName": "Sewing", "jobName": "Operator",
            "cardNo": "101", "bankAcc": "0171-1", "salary": 20800, "hour": 10, "deduct": 100,
            "bonus": 2500, "gross_Wages": 5000, "att_Bonus": 300, "oT_Amount": 150,
            "work_Day": 26, "we": 4, "acT_RE": 0
        },
        {
            "name": "Bea", "sectionName": "Sewing", "jobName": "Helper", "cardNo": "102",
            "salary": 15600, "bonus": 1800
        },
        {
            "id": LOCKED_WORKER, "name": "Cem", "sectionName": "Sewing", "jobName": "Operator",
            "cardNo": "113", "bankAC": "0171-3", "salary": 10400, "hour": "4",
            "bonus": 1200, "gross_Wages": "4000", "acT_RE": 1
        }
    ])
}

fn list(field: &str, items: Value) -> HttpResponse {
    let mut body = json!({ "isSuccess": true });
    body[field] = items;
    HttpResponse::Ok().json(body)
}

fn done() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "isSuccess": true }))
}

async fn respond(req: HttpRequest, body: web::Bytes, recorder: web::Data<Recorder>) -> HttpResponse {
    let endpoint = req.path().rsplit('/').next().unwrap_or_default().to_string();
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    recorder.record(&endpoint, body.clone());

    if let Some(kind) = ScreenKind::iter().find(|k| k.fetch_endpoint() == endpoint) {
        if body["id"] == json!(MISSING_SECTION) {
            return HttpResponse::Ok().json(json!({ "isSuccess": false, "message": "Section not found" }));
        }
        return list(kind.list_field(), workers());
    }

    if ScreenKind::iter().any(|k| k.update_endpoint() == endpoint) || endpoint == "SUpdateInformation"
    {
        if body["id"] == json!(LOCKED_WORKER) {
            return HttpResponse::InternalServerError().json(json!({ "message": "Worker is locked" }));
        }
        return done();
    }

    match endpoint.as_str() {
        "JSReadInformation" => list(
            "jsreadInformation",
            json!([
                { "sectionsId": 3, "sectionsName": "Sewing" },
                { "sectionsId": 4, "sectionsName": "Cutting" },
                { "sectionsId": MISSING_SECTION, "sectionsName": "Archive" }
            ]),
        ),
        "JSearchInformationBySection" => list(
            "jSearchInformationBySections",
            json!([
                { "jobId": 12, "sectionsId": 3, "jobName": "Operator", "grade": 4, "att_Bonus": 400 },
                { "jobId": 14, "sectionsId": 3, "jobName": "Helper", "grade": 6, "attBonus": 250 }
            ]),
        ),
        "BReadInformation" => list(
            "breadInformation",
            json!([{ "bcode": "EID1", "btype": "EID-UL-FITR" }]),
        ),
        "EReadInformation" => list(
            "ereadInformation",
            json!([
                { "empId": 7, "empName": "Nadia", "sectionName": "Admin", "jobname": "Clerk", "cardNo": "E7" },
                { "empId": 8, "empName": "Omar", "sectionName": "Sewing", "jobname": "Supervisor", "cardNo": "E8" }
            ]),
        ),
        "WReadInformation" => list(
            "wreadInformation",
            json!([{ "id": 1, "name": "Ali", "sectionName": "Sewing", "jobName": "Operator", "bankAcc": "0171-1" }]),
        ),
        "JReadInformation" => list(
            "jreadInformation",
            json!([{ "jobId": 12, "sectionsId": 3, "sectionsName": "Sewing", "jobName": "Operator" }]),
        ),
        "LVTReadInformation" => list(
            "lvtreadInformation",
            json!([{ "id": 1, "status": "Casual", "valid_days": 10 }]),
        ),
        "SReadInformation" => list(
            "sreadInformation",
            json!([
                { "id": 1, "name": "Ali", "salary_Amount": 20800, "update_date": "2025-01-01" },
                { "id": 2, "name": "Bea", "salary_Amount": null }
            ]),
        ),
        "generateOTpdf" => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header(("content-disposition", "attachment; filename=\"OT_Sewing.pdf\""))
            .body("%PDF-1.4 fake"),
        e if e.starts_with("generate") => HttpResponse::Ok()
            .content_type("application/pdf")
            .body("%PDF-1.4 fake"),
        e if e.ends_with("CreateInformation") => {
            HttpResponse::Ok().json(json!({ "isSuccess": true, "message": "Created" }))
        }
        e if e.ends_with("UpdateInformation") => done(),
        e if e.ends_with("DeleteInformation") => {
            if body["id"] == json!(LOCKED_WORKER) {
                HttpResponse::BadRequest().json(json!({ "message": "Record in use" }))
            } else {
                done()
            }
        }
        _ => HttpResponse::NotFound().finish(),
    }
}
