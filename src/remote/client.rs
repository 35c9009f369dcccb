use reqwest::header::{CONTENT_DISPOSITION, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::remote::error::{ApiError, envelope_message};
use crate::remote::payload::{IdRequest, SectionQuery};
use crate::remote::pdf::{PdfDocument, filename_from_disposition};

/// JSON client for the remote payroll API. Every endpoint lives directly
/// under the base URL.
#[derive(Debug, Clone)]
pub struct RemoteApi {
    http: reqwest::Client,
    base_url: String,
}

impl RemoteApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.base_url, endpoint.trim_start_matches('/'))
    }

    /// Body of a 2xx response as JSON, `Null` when empty.
    async fn parse(resp: Response) -> Result<Value, ApiError> {
        let status = resp.status();
        let body = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::server(status.as_u16(), &body));
        }
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(format!("response body: {e}")))
    }

    /// `GET <endpoint>` returning `{ isSuccess, <field>: [...] }`.
    #[instrument(skip(self))]
    pub async fn fetch_list<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        field: &str,
    ) -> Result<Vec<T>, ApiError> {
        let resp = self.http.get(self.url(endpoint)).send().await?;
        let items = unwrap_envelope(Self::parse(resp).await?, field)?;
        debug!(count = items.len(), "list fetched");
        Ok(items)
    }

    /// `POST <endpoint> { id, date? }` returning the same envelope.
    #[instrument(skip(self))]
    pub async fn fetch_by_section<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        field: &str,
        query: &SectionQuery,
    ) -> Result<Vec<T>, ApiError> {
        let resp = self.http.post(self.url(endpoint)).json(query).send().await?;
        let items = unwrap_envelope(Self::parse(resp).await?, field)?;
        debug!(count = items.len(), "section rows fetched");
        Ok(items)
    }

    /// `PUT <endpoint>` with a full record. 200 and 204 are success; the
    /// server's message is returned when it sent one.
    #[instrument(skip(self, payload))]
    pub async fn update<P: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<Option<String>, ApiError> {
        let resp = self.http.put(self.url(endpoint)).json(payload).send().await?;
        let status = resp.status();
        let body = Self::parse(resp).await?;

        if status != StatusCode::OK && status != StatusCode::NO_CONTENT {
            return Err(ApiError::UnexpectedStatus(status.as_u16()));
        }
        if body.get("isSuccess") == Some(&Value::Bool(false)) {
            return Err(ApiError::rejected(envelope_message(&body)));
        }
        Ok(envelope_message(&body))
    }

    /// `POST <endpoint>` with a new record; the envelope must confirm it.
    #[instrument(skip(self, payload))]
    pub async fn create<P: Serialize + ?Sized>(
        &self,
        endpoint: &str,
        payload: &P,
    ) -> Result<Option<String>, ApiError> {
        let resp = self.http.post(self.url(endpoint)).json(payload).send().await?;
        let body = Self::parse(resp).await?;
        confirm(&body)
    }

    /// `POST <endpoint> { id }`.
    #[instrument(skip(self))]
    pub async fn delete(&self, endpoint: &str, id: i64) -> Result<Option<String>, ApiError> {
        let resp = self
            .http
            .post(self.url(endpoint))
            .json(&IdRequest { id })
            .send()
            .await?;
        let body = Self::parse(resp).await?;
        if body.get("isSuccess") == Some(&Value::Bool(false)) {
            return Err(ApiError::rejected(envelope_message(&body)));
        }
        Ok(envelope_message(&body))
    }

    /// `POST <endpoint> { id, date }` returning a binary report.
    #[instrument(skip(self))]
    pub async fn download_pdf(
        &self,
        endpoint: &str,
        query: &SectionQuery,
    ) -> Result<PdfDocument, ApiError> {
        let resp = self.http.post(self.url(endpoint)).json(query).send().await?;
        let status = resp.status();
        let header = |name| {
            resp.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let filename = header(CONTENT_DISPOSITION).and_then(|v| filename_from_disposition(&v));
        let content_type = header(CONTENT_TYPE);

        let bytes = resp.bytes().await?;
        if !status.is_success() {
            return Err(ApiError::server(status.as_u16(), &bytes));
        }
        debug!(size = bytes.len(), ?filename, "report downloaded");

        Ok(PdfDocument {
            bytes: bytes.to_vec(),
            filename,
            content_type,
        })
    }
}

fn confirm(body: &Value) -> Result<Option<String>, ApiError> {
    if body.get("isSuccess") == Some(&Value::Bool(true)) {
        Ok(envelope_message(body))
    } else {
        Err(ApiError::rejected(envelope_message(body)))
    }
}

/// Items of a list envelope. `isSuccess` must be `true`; a missing or null
/// array field is an empty list, anything else that is not an array is a
/// format error.
pub fn unwrap_envelope<T: DeserializeOwned>(body: Value, field: &str) -> Result<Vec<T>, ApiError> {
    let Value::Object(mut map) = body else {
        return Err(ApiError::unexpected_format());
    };

    if map.get("isSuccess") != Some(&Value::Bool(true)) {
        return Err(ApiError::rejected(envelope_message(&Value::Object(map))));
    }

    match map.remove(field) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(items @ Value::Array(_)) => serde_json::from_value(items)
            .map_err(|e| ApiError::Decode(format!("{field}: {e}"))),
        Some(_) => Err(ApiError::unexpected_format()),
    }
}
