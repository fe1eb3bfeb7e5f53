//! Request DTOs for the cache HTTP API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::context::ContextDescriptor;

/// Maximum accepted payload size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB

/// Checks the parts of a descriptor the cache cannot key on.
///
/// Returns an error message if validation fails, None if valid.
pub fn validate_descriptor(ctx: &ContextDescriptor) -> Option<String> {
    if ctx.user_id.trim().is_empty() {
        return Some("user_id cannot be empty".to_string());
    }
    None
}

/// Request body for storing a computed payload (PUT /context)
///
/// # Fields
/// - `context`: The descriptor the payload was computed for
/// - `value`: The assembled payload
#[derive(Debug, Clone, Deserialize)]
pub struct SetContextRequest {
    pub context: ContextDescriptor,
    pub value: String,
}

impl SetContextRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        if let Some(msg) = validate_descriptor(&self.context) {
            return Some(msg);
        }
        if self.value.len() > MAX_VALUE_SIZE {
            return Some(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            ));
        }
        None
    }
}
