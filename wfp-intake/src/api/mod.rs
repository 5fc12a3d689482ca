//! HTTP API handlers for wfp-intake

pub mod health;
pub mod webform;

pub use health::health_routes;
pub use webform::webform_routes;
