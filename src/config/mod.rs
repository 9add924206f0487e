pub mod traits;
pub mod evolution;
pub mod sweep;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use evolution::{CrossoverMethod, EvolutionConfig, MutationMethod};
pub use sweep::SweepConfig;
pub use traits::ConfigSection;
