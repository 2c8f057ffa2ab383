//! # Field Registry Service
//!
//! Read-only access to the field configuration registry, used by the field
//! library view and by clients that render stage forms.

mod list;
mod search;

use actix_web::web::{get, scope};
use actix_web::Scope;

/// The base path for all field registry endpoints.
const API_PATH: &str = "/api/fields";

/// Configures and returns the Actix `Scope` for the field registry.
///
/// # Registered Routes:
///
/// *   **`GET ""`**: every field configuration, in declaration order.
/// *   **`GET /search?term=&category=`**: fields whose name or description
///     contains `term`, optionally restricted to one category (`all` means
///     no restriction).
pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/search", get().to(search::process))
}
