pub mod derivation;
pub mod manager;
pub mod sampling;
pub mod traits;

pub use derivation::DerivationConfig;
pub use manager::{AppConfig, ConfigManager};
pub use sampling::SamplingConfig;
pub use traits::ConfigSection;
