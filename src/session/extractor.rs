use std::sync::Arc;

use actix_web::{FromRequest, HttpRequest, dev::Payload, web::Data};
use futures::future::LocalBoxFuture;
use uuid::Uuid;

use crate::error::ConsoleError;
use crate::session::store::{Session, SessionStore};

pub const SESSION_HEADER: &str = "X-Console-Session";

/// The caller's console session, resolved from the session header.
pub struct ConsoleSession(pub Arc<Session>);

impl FromRequest for ConsoleSession {
    type Error = ConsoleError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let id = req
            .headers()
            .get(SESSION_HEADER)
            .and_then(|h| h.to_str().ok())
            .and_then(|h| Uuid::parse_str(h.trim()).ok());
        let store = req.app_data::<Data<SessionStore>>().cloned();

        Box::pin(async move {
            let (Some(id), Some(store)) = (id, store) else {
                return Err(ConsoleError::NoSession);
            };
            store
                .get(&id)
                .await
                .map(ConsoleSession)
                .ok_or(ConsoleError::NoSession)
        })
    }
}
