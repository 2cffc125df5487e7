use super::traits::ConfigSection;
use crate::error::CodecError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    pub seed: Option<u64>,
    pub sample_count: usize,
    pub mutation_rate: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            seed: None,
            sample_count: 1,
            mutation_rate: 0.1,
        }
    }
}

impl ConfigSection for SamplingConfig {
    fn section_name() -> &'static str {
        "sampling"
    }

    fn validate(&self) -> Result<(), CodecError> {
        if self.sample_count == 0 {
            return Err(CodecError::Configuration(
                "Sample count must be at least 1".to_string(),
            ));
        }
        if self.mutation_rate < 0.0 || self.mutation_rate > 1.0 {
            return Err(CodecError::Configuration(
                "Mutation rate must be between 0 and 1".to_string(),
            ));
        }
        Ok(())
    }
}
