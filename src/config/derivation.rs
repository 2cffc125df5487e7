use super::traits::ConfigSection;
use crate::error::CodecError;
use crate::schema::Charset;
use crate::types::Range;
use serde::{Deserialize, Serialize};

/// Defaults applied when a member's metadata leaves a constraint unspecified.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DerivationConfig {
    pub default_range: Range,
    pub default_min_length: usize,
    pub default_max_length: usize,
    pub default_charset: Charset,
    /// Range used for boolean members; `>= 0` decodes as true.
    pub bool_range: Range,
}

impl Default for DerivationConfig {
    fn default() -> Self {
        Self {
            default_range: Range::new(0.0, 1.0),
            default_min_length: 0,
            default_max_length: 10,
            default_charset: Charset::AlphaNum,
            bool_range: Range::new(-1.0, 1.0),
        }
    }
}

impl ConfigSection for DerivationConfig {
    fn section_name() -> &'static str {
        "derivation"
    }

    fn validate(&self) -> Result<(), CodecError> {
        if self.default_max_length < self.default_min_length {
            return Err(CodecError::Configuration(
                "Default max length must not be below default min length".to_string(),
            ));
        }
        if !self.default_range.min.is_finite() || !self.default_range.max.is_finite() {
            return Err(CodecError::Configuration(
                "Default range bounds must be finite".to_string(),
            ));
        }
        if self.bool_range.min >= 0.0 || self.bool_range.max < 0.0 {
            return Err(CodecError::Configuration(
                "Bool range must straddle zero".to_string(),
            ));
        }
        Ok(())
    }
}
