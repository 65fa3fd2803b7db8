//! Signed client for the DNS provider's zone record API.
//!
//! Three sequential calls: look up a record id by zone/type/subdomain,
//! rewrite its target, refresh the zone. No retry or batching.

use chrono::Utc;
use reqwest::{Method, StatusCode};
use serde_json::{json, Value};
use sha1::{Digest, Sha1};
use thiserror::Error;

const DEFAULT_ENDPOINT: &str = "https://eu.api.ovh.com/1.0";

#[derive(Error, Debug)]
pub enum ZoneError {
    #[error("missing environment variable {0}")]
    MissingVar(&'static str),
    #[error("unexpected time response: {0}")]
    BadServerTime(String),
    #[error("no record found for the given zone/type/subdomain")]
    RecordNotFound,
    #[error("api returned {status}: {body}")]
    Api { status: StatusCode, body: String },
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
}

pub struct ZoneClient {
    http: reqwest::Client,
    endpoint: String,
    application_key: String,
    application_secret: String,
    consumer_key: String,
    /// Provider clock minus local clock, fetched once from /auth/time.
    time_delta: i64,
}

impl ZoneClient {
    /// Credentials from `OVH_APPLICATION_KEY`, `OVH_APPLICATION_SECRET` and
    /// `OVH_CONSUMER_KEY`; endpoint from `OVH_ENDPOINT` with the EU API as
    /// default.
    pub async fn from_env() -> Result<Self, ZoneError> {
        let endpoint =
            std::env::var("OVH_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.into());
        Self::new(
            endpoint,
            require("OVH_APPLICATION_KEY")?,
            require("OVH_APPLICATION_SECRET")?,
            require("OVH_CONSUMER_KEY")?,
        )
        .await
    }

    pub async fn new(
        endpoint: String,
        application_key: String,
        application_secret: String,
        consumer_key: String,
    ) -> Result<Self, ZoneError> {
        let http = reqwest::Client::new();
        let text = http
            .get(format!("{}/auth/time", endpoint))
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let server_time: i64 = text
            .trim()
            .parse()
            .map_err(|_| ZoneError::BadServerTime(text.clone()))?;
        let time_delta = server_time - Utc::now().timestamp();
        tracing::debug!(time_delta, "synchronized with provider clock");
        Ok(Self {
            http,
            endpoint,
            application_key,
            application_secret,
            consumer_key,
            time_delta,
        })
    }

    /// First record id matching the filters.
    pub async fn find_record_id(
        &self,
        zone: &str,
        field_type: &str,
        sub_domain: &str,
    ) -> Result<i64, ZoneError> {
        let url = format!(
            "{}/domain/zone/{}/record?fieldType={}&subDomain={}",
            self.endpoint, zone, field_type, sub_domain
        );
        let ids: Vec<i64> = self.send(Method::GET, url, None).await?.json().await?;
        ids.first().copied().ok_or(ZoneError::RecordNotFound)
    }

    pub async fn update_record_target(
        &self,
        zone: &str,
        record_id: i64,
        sub_domain: &str,
        target: &str,
    ) -> Result<(), ZoneError> {
        let url = format!("{}/domain/zone/{}/record/{}", self.endpoint, zone, record_id);
        let body = json!({ "subDomain": sub_domain, "target": target });
        self.send(Method::PUT, url, Some(&body)).await?;
        Ok(())
    }

    pub async fn refresh_zone(&self, zone: &str) -> Result<(), ZoneError> {
        let url = format!("{}/domain/zone/{}/refresh", self.endpoint, zone);
        self.send(Method::POST, url, None).await?;
        Ok(())
    }

    async fn send(
        &self,
        method: Method,
        url: String,
        body: Option<&Value>,
    ) -> Result<reqwest::Response, ZoneError> {
        let body_str = body.map(|b| b.to_string()).unwrap_or_default();
        let timestamp = Utc::now().timestamp() + self.time_delta;
        let signature = self.sign(method.as_str(), &url, &body_str, timestamp);

        let mut req = self
            .http
            .request(method, url.as_str())
            .header("X-Ovh-Application", &self.application_key)
            .header("X-Ovh-Consumer", &self.consumer_key)
            .header("X-Ovh-Timestamp", timestamp.to_string())
            .header("X-Ovh-Signature", signature);
        if body.is_some() {
            req = req
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body_str);
        }

        let resp = req.send().await?;
        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ZoneError::Api { status, body });
        }
        Ok(resp)
    }

    /// Request signature: "$1$" + SHA-1 over the secret-joined request parts.
    fn sign(&self, method: &str, url: &str, body: &str, timestamp: i64) -> String {
        let input = format!(
            "{}+{}+{}+{}+{}+{}",
            self.application_secret, self.consumer_key, method, url, body, timestamp
        );
        format!("$1${}", hex::encode(Sha1::digest(input.as_bytes())))
    }
}

fn require(name: &'static str) -> Result<String, ZoneError> {
    std::env::var(name).map_err(|_| ZoneError::MissingVar(name))
}
