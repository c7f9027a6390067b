//! Order CRUD endpoints.
//!
//! ```text
//! GET    /api/orders?status=pending
//! POST   /api/orders        {"customer_name":"Ada","total":49.0,"items":[...]}
//! GET    /api/orders/{id}
//! PUT    /api/orders/{id}   {"status":"shipped"}
//! DELETE /api/orders/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use tracing::info;

use crate::domain::{Error, Order, OrderDraft, OrderFilter, OrderPatch, map_store_error};
use crate::inbound::http::ApiResult;
use crate::inbound::http::responses::{DeletedRecord, record_not_found};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, catalog_error, parse_uuid};

const RESOURCE: &str = "order";
const ID_FIELD: FieldName = FieldName::new("id");

/// List orders, newest first, optionally restricted to one status.
#[utoipa::path(
    get,
    path = "/api/orders",
    params(OrderFilter),
    responses(
        (status = 200, description = "Orders", body = [Order]),
        (status = 400, description = "Invalid filter", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["orders"],
    operation_id = "listOrders"
)]
#[get("/orders")]
pub async fn list_orders(
    state: web::Data<HttpState>,
    filter: web::Query<OrderFilter>,
) -> ApiResult<web::Json<Vec<Order>>> {
    let orders = state.orders.list(&filter).await.map_err(map_store_error)?;
    Ok(web::Json(orders))
}

/// Fetch one order.
#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Order", body = Order),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown order", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["orders"],
    operation_id = "getOrder"
)]
#[get("/orders/{id}")]
pub async fn get_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Order>> {
    let id = parse_uuid(&path, ID_FIELD)?;
    state
        .orders
        .find(id)
        .await
        .map_err(map_store_error)?
        .map(web::Json)
        .ok_or_else(|| record_not_found(RESOURCE, id))
}

/// Create an order. `status` defaults to `pending` and `items` to `[]`.
#[utoipa::path(
    post,
    path = "/api/orders",
    request_body = OrderDraft,
    responses(
        (status = 201, description = "Created order", body = Order),
        (status = 400, description = "Invalid order", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["orders"],
    operation_id = "createOrder"
)]
#[post("/orders")]
pub async fn create_order(
    state: web::Data<HttpState>,
    payload: web::Json<OrderDraft>,
) -> ApiResult<HttpResponse> {
    let draft = payload.into_inner();
    draft.validate().map_err(catalog_error)?;
    let order = state
        .orders
        .create(&draft)
        .await
        .map_err(map_store_error)?;
    Ok(HttpResponse::Created().json(order))
}

/// Update an order, typically to advance its status.
#[utoipa::path(
    put,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order UUID")),
    request_body = OrderPatch,
    responses(
        (status = 200, description = "Updated order", body = Order),
        (status = 400, description = "Invalid id or patch", body = Error),
        (status = 404, description = "Unknown order", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["orders"],
    operation_id = "updateOrder"
)]
#[put("/orders/{id}")]
pub async fn update_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<OrderPatch>,
) -> ApiResult<web::Json<Order>> {
    let id = parse_uuid(&path, ID_FIELD)?;
    let patch = payload.into_inner();
    patch.validate().map_err(catalog_error)?;
    let order = state
        .orders
        .update(id, &patch)
        .await
        .map_err(map_store_error)?
        .ok_or_else(|| record_not_found(RESOURCE, id))?;
    if let Some(status) = patch.status {
        info!(order_id = %id, status = status.as_str(), "order status updated");
    }
    Ok(web::Json(order))
}

/// Delete an order.
#[utoipa::path(
    delete,
    path = "/api/orders/{id}",
    params(("id" = String, Path, description = "Order UUID")),
    responses(
        (status = 200, description = "Deleted", body = DeletedRecord),
        (status = 400, description = "Invalid id", body = Error),
        (status = 404, description = "Unknown order", body = Error),
        (status = 500, description = "Store failure", body = Error)
    ),
    tags = ["orders"],
    operation_id = "deleteOrder"
)]
#[delete("/orders/{id}")]
pub async fn delete_order(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeletedRecord>> {
    let id = parse_uuid(&path, ID_FIELD)?;
    if state.orders.delete(id).await.map_err(map_store_error)? {
        Ok(web::Json(DeletedRecord { id }))
    } else {
        Err(record_not_found(RESOURCE, id))
    }
}
