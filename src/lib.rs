//! Evolutionary calibration of expensive, stochastic simulations.
//!
//! The crate searches a fixed-length parameter space to minimize a scalar
//! cost returned by an external evaluator (typically a slow, stateful
//! simulation run). The search is a generational genetic algorithm with
//! tournament selection, pluggable crossover and mutation for boolean, real
//! and permutation gene encodings, and single-slot elitism. The simulation
//! itself stays behind the [`FitnessEvaluator`] trait; this crate never looks
//! inside it.
//!
//! ```no_run
//! use simcalib::config::EvolutionConfig;
//! use simcalib::engines::generation::{EngineConfig, EvolutionEngine, NullProgressCallback};
//! use simcalib::FnEvaluator;
//!
//! let config = EngineConfig::from(&EvolutionConfig::default());
//! let evaluator = FnEvaluator::new(|c| Ok(c.genes().iter().sum()));
//! let mut engine = EvolutionEngine::new(config, evaluator);
//! let report = engine.run(NullProgressCallback)?;
//! println!("best: {} (fitness {})", report.best(), report.best().fitness());
//! # Ok::<(), simcalib::SimcalibError>(())
//! ```

pub mod config;
pub mod engines;
pub mod error;

pub use engines::evaluation::{FitnessEvaluator, FnEvaluator};
pub use engines::generation::{Chromosome, Encoding, EvolutionEngine, Genome};
pub use error::{Result, SimcalibError};
