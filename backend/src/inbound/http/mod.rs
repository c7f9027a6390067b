//! HTTP inbound adapter exposing the admin REST endpoints.

pub mod categories;
pub mod error;
pub mod health;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod responses;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod uploads;
pub mod validation;

use actix_web::{Scope, web};

pub use error::ApiResult;

/// Build the `/api` scope with every admin endpoint and the extractor
/// configuration that routes malformed input to the standard error body.
///
/// Callers register [`state::HttpState`] as app data.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use storefront_admin::inbound::http::api_scope;
///
/// let _app = App::new().service(api_scope());
/// ```
pub fn api_scope() -> Scope {
    web::scope("/api")
        .app_data(error::json_config())
        .app_data(error::query_config())
        .app_data(error::path_config())
        .service(profiles::ensure_profile)
        .service(categories::list_categories)
        .service(categories::create_category)
        .service(categories::get_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(products::list_products)
        .service(products::create_product)
        .service(products::get_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(orders::list_orders)
        .service(orders::create_order)
        .service(orders::get_order)
        .service(orders::update_order)
        .service(orders::delete_order)
        .service(uploads::upload_file)
        .service(uploads::delete_file)
}
