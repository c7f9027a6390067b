//! Product CRUD endpoints.
//!
//! ```text
//! GET    /api/products?category_id=<uuid>
//! POST   /api/products        {"name":"Lamp","price":24.5,"stock":3}
//! GET    /api/products/{id}
//! PUT    /api/products/{id}   {"stock":0}
//! DELETE /api/products/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};

use crate::domain::{Error, Product, ProductDraft, ProductFilter, ProductPatch, map_store_error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{DeletedRecord, record_not_found};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, catalog_error, parse_uuid};

const RESOURCE: &str = "product";
const ID_FIELD: FieldName = FieldName::new("id");

/// List products, newest first, optionally restricted to one category.
#[utoipa::path(
    get,
    path = "/api/products",
    params(ProductFilter),
    responses(
        (status = 200, description = "Products", body = [Product]),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    filter: web::Query<ProductFilter>,
) -> ApiResult<web::Json<Vec<Product>>> {
    let products = state
        .products
        .list(&filter)
        .await
        .map_err(map_store_error)?;
    Ok(web::Json(products))
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Product", body = Product),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown product", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Product>> {
    let id = parse_uuid(&path, ID_FIELD)?;
    state
        .products
        .find(id)
        .await
        .map_err(map_store_error)?
        .map(web::Json)
        .ok_or_else(|| record_not_found(RESOURCE, id))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/products",
    request_body = ProductDraft,
    responses(
        (status = 201, description = "Created product", body = Product),
        (status = 400, description = "Invalid product", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<ProductDraft>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner();
    draft.validate().map_err(catalog_error)?;
    let product = state
        .products
        .create(&draft)
        .await
        .map_err(map_store_error)?;
    Ok(HttpResponse::Created().json(product))
}

/// Update a product.
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product UUID")),
    request_body = ProductPatch,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Invalid id or patch", body = Error),
        (status = 404, description = "Unknown product", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[put("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ProductPatch>,
) -> ApiResult<web::Json<Product>> {
    let id = parse_uuid(&path, ID_FIELD)?;
    let patch = payload.into_inner();
    patch.validate().map_err(catalog_error)?;
    state
        .products
        .update(id, &patch)
        .await
        .map_err(map_store_error)?
        .map(web::Json)
        .ok_or_else(|| record_not_found(RESOURCE, id))
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    params(("id" = String, Path, description = "Product UUID")),
    responses(
        (status = 200, description = "Deleted", body = DeletedRecord),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown product", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedRecord>> {
    let id = parse_uuid(&path, ID_FIELD)?;
    if state.products.delete(id).await.map_err(map_store_error)? {
        Ok(web::Json(DeletedRecord { id }))
    } else {
        Err(record_not_found(RESOURCE, id))
    }
}
