//! API client for the bean service
//!
//! Thin asynchronous wrapper over the five CRUD endpoints. Calls are
//! single-shot: no retry, no timeout policy, no cancellation. Every failure
//! maps to a `BeanError` variant whose message is fit for direct display.

use reqwest::{Response, StatusCode};

use crate::error::BeanError;
use crate::store::beans::{BeanInput, BeanRecord};

/// Client for the bean CRUD API
#[derive(Debug, Clone)]
pub struct BeanClient {
    base_url: String,
    http: reqwest::Client,
}

impl BeanClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }

    fn beans_url(&self) -> String {
        format!("{}/beans", self.base_url)
    }

    fn bean_url(&self, id: i64) -> String {
        format!("{}/beans/{}", self.base_url, id)
    }

    /// Fetch the full list of beans
    pub async fn list(&self) -> Result<Vec<BeanRecord>, BeanError> {
        let resp = self
            .http
            .get(self.beans_url())
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp, None).await);
        }

        resp.json::<Vec<BeanRecord>>()
            .await
            .map_err(|e| BeanError::Network(format!("Malformed response body: {}", e)))
    }

    /// Fetch a single bean by id
    pub async fn get(&self, id: i64) -> Result<BeanRecord, BeanError> {
        let resp = self
            .http
            .get(self.bean_url(id))
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp, Some(id)).await);
        }

        resp.json::<BeanRecord>()
            .await
            .map_err(|e| BeanError::Network(format!("Malformed response body: {}", e)))
    }

    /// Create a bean. Validates locally first so a NaN never goes out.
    pub async fn create(&self, input: &BeanInput) -> Result<BeanRecord, BeanError> {
        input.validate()?;

        let resp = self
            .http
            .post(self.beans_url())
            .json(input)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp, None).await);
        }

        resp.json::<BeanRecord>()
            .await
            .map_err(|e| BeanError::Network(format!("Malformed response body: {}", e)))
    }

    /// Replace all fields of a bean
    pub async fn update(&self, id: i64, input: &BeanInput) -> Result<BeanRecord, BeanError> {
        input.validate()?;

        let resp = self
            .http
            .put(self.bean_url(id))
            .json(input)
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp, Some(id)).await);
        }

        resp.json::<BeanRecord>()
            .await
            .map_err(|e| BeanError::Network(format!("Malformed response body: {}", e)))
    }

    /// Delete a bean. Success carries no body.
    pub async fn delete(&self, id: i64) -> Result<(), BeanError> {
        let resp = self
            .http
            .delete(self.bean_url(id))
            .send()
            .await
            .map_err(transport_error)?;

        if !resp.status().is_success() {
            return Err(error_from_response(resp, Some(id)).await);
        }

        Ok(())
    }
}

fn transport_error(e: reqwest::Error) -> BeanError {
    BeanError::Network(e.to_string())
}

/// Map a non-2xx response to the error taxonomy, pulling the message out of
/// the `{"error": ...}` body when it parses.
async fn error_from_response(resp: Response, id: Option<i64>) -> BeanError {
    let status = resp.status();

    let message = resp
        .json::<serde_json::Value>()
        .await
        .ok()
        .and_then(|v| {
            v.get("error")
                .and_then(|m| m.as_str())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| format!("server returned {}", status));

    match (status, id) {
        (StatusCode::NOT_FOUND, Some(id)) => BeanError::NotFound(id),
        (StatusCode::BAD_REQUEST, _) => BeanError::Validation(message),
        _ => BeanError::Server {
            status: status.as_u16(),
            message,
        },
    }
}
