//! Evolves a genome of opaque filled circles until its rendering approximates a
//! target image. Each generation, parallel workers derive mutated offspring from
//! the current best genome, score them against the target, and the fittest
//! offspring becomes the next parent.

pub mod dna;
pub mod engine;
pub mod engine_thread;
pub mod error;
pub mod fitness;
pub mod mutate;
pub mod raster_io;
pub mod render;
pub mod settings;

pub use dna::{Gene, Genome};
pub use engine::{Candidate, Engine, Phase, ProgressReport};
pub use error::{EvolveError, Result};
pub use settings::EvolutionConfig;
