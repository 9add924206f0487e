pub mod chromosome;
pub mod operators;
pub mod hall_of_fame;
pub mod evolution_engine;
pub mod progress;
pub mod sweep;

pub use chromosome::{Chromosome, Encoding, Genome};
pub use evolution_engine::{EngineConfig, EvolutionEngine, EvolutionReport, ProgressCallback};
pub use hall_of_fame::{EliteSolution, HallOfFame};
pub use progress::{ChannelProgressCallback, ConsoleProgressCallback, NullProgressCallback, ProgressMessage};
pub use sweep::{parameter_sweep, SweepReport};
