//! HTTP API of the bid workspace. Each sub-module owns one path prefix and
//! exposes a `configure_routes()` scope that `main.rs` mounts.

pub mod fields;
pub mod gem_bids;
pub mod stages;
