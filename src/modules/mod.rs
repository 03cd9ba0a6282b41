//! Catalog modules.
//!
//! Each module owns one collection: its schema migrations, its REST
//! routes under `/api/{name}`, and its OpenAPI fragment. The storefront
//! module carries no collection of its own and only serves pages.

pub mod categories;
pub mod company;
pub mod products;
pub mod storefront;
pub mod videos;

use vitrin_http::error::AppError;
use vitrin_kernel::ModuleRegistry;

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound a client can request per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Register every module with the registry, in boot order.
pub fn register_all(registry: &mut ModuleRegistry) {
    registry.register(categories::create_module());
    registry.register(products::create_module());
    registry.register(videos::create_module());
    registry.register(company::create_module());
    registry.register(storefront::create_module());
}

/// Clamp raw paging parameters to sane values.
pub(crate) fn clamp_paging(page: Option<i64>, limit: Option<i64>) -> (i64, i64) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    (page, limit)
}

/// Parse a path segment as a document id, rejecting anything that is
/// not a UUID with a 400 rather than a 404.
pub(crate) fn parse_doc_id(raw: &str) -> Result<uuid::Uuid, AppError> {
    uuid::Uuid::parse_str(raw)
        .map_err(|_| AppError::bad_request(format!("invalid document id: {raw}")))
}
