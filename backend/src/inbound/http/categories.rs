//! Category CRUD endpoints.
//!
//! ```text
//! GET    /api/categories
//! POST   /api/categories        {"name":"Outdoor","description":"Tents and boots"}
//! GET    /api/categories/{id}
//! PUT    /api/categories/{id}   {"description":"Camping gear"}
//! DELETE /api/categories/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{Category, CategoryDraft, CategoryPatch, Error, map_store_error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{DeletedRecord, record_not_found};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, catalog_error, parse_uuid};

const RESOURCE: &str = "category";
const ID_FIELD: FieldName = FieldName::new("id");

/// List categories, newest first.
#[utoipa::path(
    get,
    path = "/api/categories",
    responses(
        (status = 200, description = "Categories", body = [Category]),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Category>>> {
    let categories = state.categories.list().await.map_err(map_store_error)?;
    Ok(web::Json(categories))
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category UUID")),
    responses(
        (status = 200, description = "Category", body = Category),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown category", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Category>> {
    let id = parse_uuid(&path, ID_FIELD)?;
    state
        .categories
        .find(id)
        .await
        .map_err(map_store_error)?
        .map(web::Json)
        .ok_or_else(|| record_not_found(RESOURCE, id))
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/categories",
    request_body = CategoryDraft,
    responses(
        (status = 201, description = "Created category", body = Category),
        (status = 400, description = "Invalid category", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<CategoryDraft>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner();
    draft.validate().map_err(catalog_error)?;
    let category = state
        .categories
        .create(&draft)
        .await
        .map_err(map_store_error)?;
    Ok(HttpResponse::Created().json(category))
}

/// Update a category.
#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category UUID")),
    request_body = CategoryPatch,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 400, description = "Invalid id or patch", body = Error),
        (status = 404, description = "Unknown category", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[put("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<CategoryPatch>,
) -> ApiResult<web::Json<Category>> {
    let id = parse_uuid(&path, ID_FIELD)?;
    let patch = payload.into_inner();
    patch.validate().map_err(catalog_error)?;
    state
        .categories
        .update(id, &patch)
        .await
        .map_err(map_store_error)?
        .map(web::Json)
        .ok_or_else(|| record_not_found(RESOURCE, id))
}

/// Delete a category.
#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    params(("id" = String, Path, description = "Category UUID")),
    responses(
        (status = 200, description = "Deleted", body = DeletedRecord),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown category", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedRecord>> {
    let id = parse_uuid(&path, ID_FIELD)?;
    if state.categories.delete(id).await.map_err(map_store_error)? {
        Ok(web::Json(DeletedRecord { id }))
    } else {
        Err(record_not_found(RESOURCE, id))
    }
}
