//! Product image upload endpoints.
//!
//! ```text
//! POST   /api/uploads          multipart/form-data, field "file"
//! DELETE /api/uploads/{path..}
//! ```
//!
//! File type and size are not policed here; the bucket's own policy applies.

use actix_multipart::{Field, Multipart, MultipartError};
use actix_web::{delete, post, web};
use futures_util::TryStreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::domain::{
    DEFAULT_CONTENT_TYPE, Error, ObjectPath, StoredObject, UploadObject,
    map_object_storage_error,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, missing_field_error, parse_object_path};

const FILE_FIELD: &str = "file";
const PATH_FIELD: FieldName = FieldName::new("path");

/// OpenAPI description of the multipart upload body.
#[derive(ToSchema)]
#[expect(dead_code, reason = "used only for OpenAPI schema generation")]
pub struct UploadForm {
    #[schema(value_type = String, format = Binary)]
    file: Vec<u8>,
}

/// Body returned after removing an object.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemovedObject {
    pub path: String,
}

struct ReceivedFile {
    file_name: Option<String>,
    content_type: Option<String>,
    bytes: Vec<u8>,
}

fn multipart_error(err: MultipartError) -> Error {
    Error::invalid_request(format!("invalid multipart body: {err}"))
        .with_details(json!({ "code": "invalid_multipart" }))
}

async fn read_field(field: &mut Field) -> Result<Vec<u8>, Error> {
    let mut bytes = Vec::new();
    while let Some(chunk) = field.try_next().await.map_err(multipart_error)? {
        bytes.extend_from_slice(&chunk);
    }
    Ok(bytes)
}

/// Pull the `file` part out of the form, skipping every other part.
async fn receive_file(mut payload: Multipart) -> Result<ReceivedFile, Error> {
    while let Some(mut field) = payload.try_next().await.map_err(multipart_error)? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let file_name = field
            .content_disposition()
            .and_then(|disposition| disposition.get_filename())
            .map(str::to_owned);
        let content_type = field.content_type().map(ToString::to_string);
        let bytes = read_field(&mut field).await?;
        return Ok(ReceivedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(missing_field_error(FieldName::new(FILE_FIELD)))
}

/// Upload a file to the product image bucket under a generated key.
#[utoipa::path(
    post,
    path = "/api/uploads",
    request_body(content = UploadForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Stored object", body = StoredObject),
        (status = 400, description = "Missing file part or malformed form", body = Error),
        (status = 500, description = "Storage not configured or storage failure", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "uploadFile"
)]
#[post("/uploads")]
pub async fn upload_file(
    state: web::Data<HttpState>,
    payload: Multipart,
) -> ApiResult<web::Json<StoredObject>> {
    let received = receive_file(payload).await?;
    let object = UploadObject {
        path: ObjectPath::generate(received.file_name.as_deref()),
        content_type: received
            .content_type
            .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_owned()),
        bytes: received.bytes,
    };
    let stored = state
        .storage
        .upload(&object)
        .await
        .map_err(map_object_storage_error)?;
    info!(path = stored.path.as_str(), size = object.bytes.len(), "stored upload");
    Ok(web::Json(stored))
}

/// Remove an uploaded object. Removing an absent object succeeds.
#[utoipa::path(
    delete,
    path = "/api/uploads/{path}",
    params(("path" = String, Path, description = "Object key inside the bucket")),
    responses(
        (status = 200, description = "Removed", body = RemovedObject),
        (status = 400, description = "Invalid object key", body = Error),
        (status = 500, description = "Storage not configured or storage failure", body = Error)
    ),
    tags = ["uploads"],
    operation_id = "deleteFile"
)]
#[delete("/uploads/{path:.*}")]
pub async fn delete_file(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RemovedObject>> {
    let object_path = parse_object_path(path.into_inner(), PATH_FIELD)?;
    state
        .storage
        .remove(&object_path)
        .await
        .map_err(map_object_storage_error)?;
    info!(path = object_path.as_str(), "removed upload");
    Ok(web::Json(RemovedObject {
        path: object_path.as_str().to_owned(),
    }))
}
