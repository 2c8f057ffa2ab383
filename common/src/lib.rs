//! Shared model of the GeM bid workspace.
//!
//! Everything here is pure and target independent: the backend uses it to
//! validate what it stores and the wasm frontend uses it to render and drive
//! stage forms.

pub mod form;
pub mod model;
pub mod registry;
pub mod requests;
