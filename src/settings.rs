/// population parameters for a run. fixed before the loop starts and never
/// mutated afterwards; every component reads from the same instance
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{EvolveError, Result};

/// radius bounds applied after a radius mutation
pub const RADIUS_CLAMP_MIN: u32 = 1;
pub const RADIUS_CLAMP_MAX: u32 = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    pub initial_gene_count: usize,  // genes in the seed genome
    pub population_size: usize,     // candidates evaluated per generation
    pub mutation_probability: f32,  // per-gene chance of a mutation pass
    pub add_probability: f32,       // chance to append one fresh gene
    pub remove_probability: f32,    // chance to drop one gene

    // radius range for freshly initialized genes, [min, max)
    pub min_radius: u32,
    pub max_radius: u32,

    pub worker_count: usize,
    pub max_generations: u64,

    /// cap on genome length; None keeps growth unbounded
    pub max_genes: Option<usize>,
    /// seed for the engine RNG; None draws one from the OS
    pub seed: Option<u64>,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            initial_gene_count: 50,
            population_size: 50,
            mutation_probability: 0.01,
            add_probability: 0.3,
            remove_probability: 0.2,

            min_radius: 5,
            max_radius: 15,

            // 5 workers x 10 candidates = one population
            worker_count: 5,
            max_generations: 2000,

            max_genes: None,
            seed: None,
        }
    }
}

impl EvolutionConfig {
    /// reject parameter combinations the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(EvolveError::InvalidConfig("population_size must be at least 1".into()));
        }
        if self.worker_count == 0 {
            return Err(EvolveError::InvalidConfig("worker_count must be at least 1".into()));
        }
        if self.min_radius >= self.max_radius {
            return Err(EvolveError::InvalidConfig(format!(
                "min_radius ({}) must be below max_radius ({})",
                self.min_radius, self.max_radius
            )));
        }
        let probabilities = [
            ("mutation_probability", self.mutation_probability),
            ("add_probability", self.add_probability),
            ("remove_probability", self.remove_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(EvolveError::InvalidConfig(format!("{name} must be within [0, 1], got {p}")));
            }
        }
        if let Some(cap) = self.max_genes {
            if cap < self.initial_gene_count {
                return Err(EvolveError::InvalidConfig(format!(
                    "max_genes ({cap}) is smaller than initial_gene_count ({})",
                    self.initial_gene_count
                )));
            }
        }
        Ok(())
    }

    /// save config to a JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// load config from a JSON file. missing keys fall back to defaults
    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        let cfg: Self = serde_json::from_str(&json)?;
        Ok(cfg)
    }

    /// load config from a JSON file, or return defaults if it is absent or unreadable
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        match Self::load(path) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("failed to read {}: {}. using defaults.", path.display(), e);
                Self::default()
            }
        }
    }
}
