//! Preview request model.

/// JSON request types and validation.
pub mod model;
