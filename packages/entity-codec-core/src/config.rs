//! Codec configuration.

use serde::{Deserialize, Serialize};

/// Codec configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    /// Run the validator over input before decoding it
    pub validate_before_decode: bool,
    /// Maximum depth of nested entity schemas
    pub max_nesting_depth: usize,
    /// Minimum array length before parallel decoding uses the rayon pool
    pub parallel_min_batch: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            validate_before_decode: true,
            max_nesting_depth: 32,
            parallel_min_batch: 256,
        }
    }
}
