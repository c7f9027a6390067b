//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every admin endpoint, the health checks, and the
//! domain types exchanged over HTTP. Swagger UI serves it in debug builds.

use utoipa::OpenApi;

use crate::domain::{
    Category, CategoryDraft, CategoryPatch, Error, ErrorCode, Order, OrderDraft, OrderPatch,
    OrderStatus, Product, ProductDraft, ProductPatch, Profile, ProfileRole, StoredObject,
};
use crate::inbound::http::profiles::{EnsureProfileBody, EnsureProfileResponse};
use crate::inbound::http::responses::DeletedRecord;
use crate::inbound::http::uploads::{RemovedObject, UploadForm};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront admin API",
        description = "Catalogue management, image uploads, and profile provisioning for the storefront admin panel."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
        crate::inbound::http::profiles::ensure_profile,
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::orders::list_orders,
        crate::inbound::http::orders::get_order,
        crate::inbound::http::orders::create_order,
        crate::inbound::http::orders::update_order,
        crate::inbound::http::orders::delete_order,
        crate::inbound::http::uploads::upload_file,
        crate::inbound::http::uploads::delete_file,
    ),
    components(schemas(
        Error,
        ErrorCode,
        Profile,
        ProfileRole,
        EnsureProfileBody,
        EnsureProfileResponse,
        Category,
        CategoryDraft,
        CategoryPatch,
        Product,
        ProductDraft,
        ProductPatch,
        Order,
        OrderDraft,
        OrderPatch,
        OrderStatus,
        DeletedRecord,
        StoredObject,
        RemovedObject,
        UploadForm,
    )),
    tags(
        (name = "health", description = "Endpoints for health checks"),
        (name = "profiles", description = "Profile provisioning for signed-in users"),
        (name = "categories", description = "Product category management"),
        (name = "products", description = "Product catalogue management"),
        (name = "orders", description = "Order management"),
        (name = "uploads", description = "Product image storage")
    )
)]
pub struct ApiDoc;
