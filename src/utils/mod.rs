//! Shared utilities: topology validation and naming helpers.

pub mod naming;
pub mod validation;

pub use naming::{is_valid_dns_name, numbered_names};
pub use validation::{validate, ValidationError, Violation};
