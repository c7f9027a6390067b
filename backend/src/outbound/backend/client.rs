//! Reqwest client for the hosted data service.
//!
//! Owns transport details only: URL construction, credential headers,
//! timeouts, and classification of error responses into [`StoreError`] or
//! [`ObjectStorageError`]. Table semantics live in the repositories.

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, RequestBuilder, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::debug;
use zeroize::Zeroizing;

use super::dto::{RemoveObjectsDto, StorageErrorDto, StoreErrorDto};
use crate::domain::ports::{ObjectStorageError, StoreError};

/// SQLSTATE reported by the store when an insert violates a unique index.
pub const UNIQUE_VIOLATION_CODE: &str = "23505";

const API_KEY_HEADER: &str = "apikey";
const PREFER_HEADER: &str = "prefer";
const RETURN_REPRESENTATION: &str = "return=representation";

/// Connection settings for [`BackendClient`].
#[derive(Clone)]
pub struct BackendConfig {
    /// Base URL of the hosted project, e.g. `https://abc.example.co`.
    pub base_url: Url,
    /// Service credential sent as `apikey` and bearer token.
    pub service_key: Zeroizing<String>,
    /// Per-request timeout.
    pub timeout: Duration,
}

/// Errors raised while constructing a [`BackendClient`].
#[derive(Debug, Error)]
pub enum BackendClientError {
    #[error("service key contains characters not allowed in a header")]
    InvalidServiceKey,
    #[error("base URL cannot be used as a base: {0}")]
    InvalidBaseUrl(Url),
    #[error("failed to build HTTP client: {0}")]
    Build(#[from] reqwest::Error),
}

/// Authenticated client shared by every store adapter.
///
/// Cheap to clone; clones share the connection pool.
#[derive(Clone)]
pub struct BackendClient {
    http: Client,
    base_url: Url,
}

impl BackendClient {
    /// Build a client that sends the service key on every request.
    ///
    /// # Errors
    ///
    /// Returns [`BackendClientError`] when the key cannot be encoded as a
    /// header, the URL cannot carry paths, or reqwest fails to initialise.
    pub fn new(config: BackendConfig) -> Result<Self, BackendClientError> {
        let BackendConfig {
            mut base_url,
            service_key,
            timeout,
        } = config;
        if base_url.cannot_be_a_base() {
            return Err(BackendClientError::InvalidBaseUrl(base_url));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let http = Client::builder()
            .timeout(timeout)
            .default_headers(credential_headers(&service_key)?)
            .build()?;
        Ok(Self { http, base_url })
    }

    fn endpoint(&self, path: &str) -> Result<Url, StoreError> {
        self.base_url
            .join(path)
            .map_err(|err| StoreError::connection(format!("invalid endpoint {path}: {err}")))
    }

    fn table_url(&self, table: &str) -> Result<Url, StoreError> {
        self.endpoint(&format!("rest/v1/{table}"))
    }

    /// Public URL of an object in a public bucket.
    pub fn public_object_url(
        &self,
        bucket: &str,
        path: &str,
    ) -> Result<String, ObjectStorageError> {
        self.base_url
            .join(&format!("storage/v1/object/public/{bucket}/{path}"))
            .map(String::from)
            .map_err(|err| ObjectStorageError::rejected(format!("invalid object URL: {err}")))
    }

    /// `GET /rest/v1/<table>` with PostgREST query parameters.
    pub async fn select<T>(
        &self,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError>
    where
        T: DeserializeOwned,
    {
        let url = self.table_url(table)?;
        debug!(table, "store select");
        let response = send(self.http.get(url).query(query)).await?;
        decode_rows(table, response).await
    }

    /// `POST /rest/v1/<table>` returning the inserted row.
    pub async fn insert<B, T>(&self, table: &str, body: &B) -> Result<T, StoreError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(table)?;
        debug!(table, "store insert");
        let request = self
            .http
            .post(url)
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(body);
        let rows: Vec<T> = decode_rows(table, send(request).await?).await?;
        rows.into_iter()
            .next()
            .ok_or_else(|| StoreError::decode(format!("insert into {table} returned no rows")))
    }

    /// `PATCH /rest/v1/<table>?<filter>` returning the updated row, if any.
    pub async fn update<B, T>(
        &self,
        table: &str,
        filter: &[(&str, String)],
        body: &B,
    ) -> Result<Option<T>, StoreError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.table_url(table)?;
        debug!(table, "store update");
        let request = self
            .http
            .patch(url)
            .query(filter)
            .header(PREFER_HEADER, RETURN_REPRESENTATION)
            .json(body);
        let rows: Vec<T> = decode_rows(table, send(request).await?).await?;
        Ok(rows.into_iter().next())
    }

    /// `DELETE /rest/v1/<table>?<filter>` returning how many rows were removed.
    pub async fn delete(
        &self,
        table: &str,
        filter: &[(&str, String)],
    ) -> Result<usize, StoreError> {
        let url = self.table_url(table)?;
        debug!(table, "store delete");
        let request = self
            .http
            .delete(url)
            .query(filter)
            .header(PREFER_HEADER, RETURN_REPRESENTATION);
        let rows: Vec<serde_json::Value> = decode_rows(table, send(request).await?).await?;
        Ok(rows.len())
    }

    /// `POST /storage/v1/object/<bucket>/<path>` with the raw file bytes.
    pub async fn upload_object(
        &self,
        bucket: &str,
        path: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<(), ObjectStorageError> {
        let url = self
            .base_url
            .join(&format!("storage/v1/object/{bucket}/{path}"))
            .map_err(|err| ObjectStorageError::rejected(format!("invalid object URL: {err}")))?;
        debug!(bucket, path, "storage upload");
        let response = self
            .http
            .post(url)
            .header(CONTENT_TYPE, content_type)
            .body(bytes)
            .send()
            .await
            .map_err(|err| ObjectStorageError::connection(err.to_string()))?;
        check_storage_response(response).await
    }

    /// `DELETE /storage/v1/object/<bucket>` removing the listed keys.
    pub async fn remove_objects(
        &self,
        bucket: &str,
        paths: &[&str],
    ) -> Result<(), ObjectStorageError> {
        let url = self
            .base_url
            .join(&format!("storage/v1/object/{bucket}"))
            .map_err(|err| ObjectStorageError::rejected(format!("invalid bucket URL: {err}")))?;
        debug!(bucket, count = paths.len(), "storage remove");
        let response = self
            .http
            .delete(url)
            .json(&RemoveObjectsDto {
                prefixes: paths.to_vec(),
            })
            .send()
            .await
            .map_err(|err| ObjectStorageError::connection(err.to_string()))?;
        check_storage_response(response).await
    }
}

fn credential_headers(service_key: &str) -> Result<HeaderMap, BackendClientError> {
    let mut api_key =
        HeaderValue::from_str(service_key).map_err(|_| BackendClientError::InvalidServiceKey)?;
    api_key.set_sensitive(true);
    let bearer = Zeroizing::new(format!("Bearer {service_key}"));
    let mut authorization =
        HeaderValue::from_str(&bearer).map_err(|_| BackendClientError::InvalidServiceKey)?;
    authorization.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static(API_KEY_HEADER), api_key);
    headers.insert(AUTHORIZATION, authorization);
    Ok(headers)
}

async fn send(request: RequestBuilder) -> Result<Response, StoreError> {
    let response = request
        .send()
        .await
        .map_err(|err| StoreError::connection(err.to_string()))?;
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .bytes()
        .await
        .map_err(|err| StoreError::connection(err.to_string()))?;
    Err(classify_store_error(status, &body))
}

async fn decode_rows<T: DeserializeOwned>(
    table: &str,
    response: Response,
) -> Result<Vec<T>, StoreError> {
    let body = response
        .bytes()
        .await
        .map_err(|err| StoreError::connection(err.to_string()))?;
    serde_json::from_slice(&body)
        .map_err(|err| StoreError::decode(format!("invalid {table} rows: {err}")))
}

/// Classify an error response by the store's structured code.
pub(super) fn classify_store_error(status: StatusCode, body: &[u8]) -> StoreError {
    let dto: StoreErrorDto = serde_json::from_slice(body).unwrap_or_default();
    let message = dto
        .message
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| status_message(status, body));

    if dto.code.as_deref() == Some(UNIQUE_VIOLATION_CODE) {
        return StoreError::unique_violation(message);
    }
    let details = match (dto.details, dto.hint) {
        (Some(details), Some(hint)) => Some(format!("{details} ({hint})")),
        (details, hint) => details.or(hint),
    };
    StoreError::Rejected {
        code: dto.code,
        message,
        details,
    }
}

async fn check_storage_response(response: Response) -> Result<(), ObjectStorageError> {
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response
        .bytes()
        .await
        .map_err(|err| ObjectStorageError::connection(err.to_string()))?;
    let dto: StorageErrorDto = serde_json::from_slice(&body).unwrap_or_default();
    let message = dto
        .message
        .or(dto.error)
        .unwrap_or_else(|| status_message(status, &body));
    Err(ObjectStorageError::rejected(message))
}

fn status_message(status: StatusCode, body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if compact.is_empty() {
        return format!("status {}", status.as_u16());
    }
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    format!("status {}: {preview}", status.as_u16())
}
