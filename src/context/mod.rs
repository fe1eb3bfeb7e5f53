//! Context Module
//!
//! Describes the caller-supplied financial context and derives stable cache
//! keys from it by quantizing continuous quantities into bands.

mod descriptor;
mod quantizer;

pub use descriptor::{ContextDescriptor, ExperienceLevel};
pub use quantizer::{cache_key, encode_component, Band, BandTable, CacheKey, KEY_DELIMITER};
