// Engine module organization
// candidate: offspring generation, scheduler: fan-out + selection, metrics: progress reports

pub mod candidate;
pub mod metrics;
pub mod scheduler;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use tiny_skia as sk;

use crate::dna::Genome;
use crate::error::{EvolveError, Result};
use crate::settings::EvolutionConfig;

pub use candidate::Candidate;
pub use metrics::ProgressReport;

/// where the generational loop currently is
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Initializing,
    Evaluating,
    Selecting,
    Terminated,
}

pub struct Engine {
    pub(self) rng: Pcg32,
    pub(self) cfg: EvolutionConfig,
    pub(self) target: sk::Pixmap,  // read-only, shared by every worker
    pub(self) best: Candidate,     // current best, parent of the next generation
    pub(self) phase: Phase,
    pub seed: u64,
    pub generation: u64,
}

impl Engine {
    /// validate the config, seed the RNG and score a random initial genome
    pub fn new(target: sk::Pixmap, cfg: EvolutionConfig) -> Result<Self> {
        profiling::scope!("Engine::new");
        cfg.validate()?;

        let seed = cfg.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = Pcg32::seed_from_u64(seed);

        let genome = Genome::random(
            &mut rng,
            target.width(),
            target.height(),
            cfg.initial_gene_count,
            cfg.min_radius,
            cfg.max_radius,
        );
        Self::from_parts(rng, seed, target, cfg, genome)
    }

    /// start from a caller-provided genome instead of a random one
    pub fn with_genome(target: sk::Pixmap, cfg: EvolutionConfig, genome: Genome) -> Result<Self> {
        cfg.validate()?;
        if (genome.width, genome.height) != (target.width(), target.height()) {
            return Err(EvolveError::DimensionMismatch {
                expected: (target.width(), target.height()),
                actual: (genome.width, genome.height),
            });
        }
        let seed = cfg.seed.unwrap_or_else(|| rand::rng().random());
        let rng = Pcg32::seed_from_u64(seed);
        Self::from_parts(rng, seed, target, cfg, genome)
    }

    fn from_parts(rng: Pcg32, seed: u64, target: sk::Pixmap, cfg: EvolutionConfig, genome: Genome) -> Result<Self> {
        let best = Candidate::evaluate(genome, &target)?;
        log::info!(
            "engine ready: {}x{} target, {} initial genes, seed {}, initial fitness {:.6}",
            target.width(),
            target.height(),
            best.genome.len(),
            seed,
            best.fitness
        );
        Ok(Self {
            rng,
            cfg,
            target,
            best,
            phase: Phase::Initializing,
            seed,
            generation: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &EvolutionConfig {
        &self.cfg
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn best(&self) -> &Candidate {
        &self.best
    }

    #[inline]
    pub fn target(&self) -> &sk::Pixmap {
        &self.target
    }

    /// true once the generation counter has reached max_generations
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.generation >= self.cfg.max_generations
    }

    /// one generation: fan out offspring of the current best, wait for every
    /// worker, then replace the current best with the fittest offspring.
    /// the unmutated parent is not re-scored alongside them, so fitness can drop
    pub fn step(&mut self) -> Result<&Candidate> {
        profiling::scope!("step");

        self.phase = Phase::Evaluating;
        let results = scheduler::evaluate_generation(&mut self.rng, &self.best.genome, &self.target, &self.cfg);

        self.phase = Phase::Selecting;
        let next = scheduler::select_best(results, self.cfg.population_size)?;
        if next.fitness < self.best.fitness {
            log::trace!(
                "generation {}: best fitness regressed {:.6} -> {:.6}",
                self.generation + 1,
                self.best.fitness,
                next.fitness
            );
        }
        self.best = next;
        self.generation += 1;

        log::debug!(
            "generation {}: fitness {:.6}, {} genes",
            self.generation,
            self.best.fitness,
            self.best.genome.len()
        );
        Ok(&self.best)
    }

    /// drive the loop until max_generations, reporting after every generation.
    /// returns the final best; its raster is the run's output
    pub fn run<F>(mut self, mut on_progress: F) -> Result<Candidate>
    where
        F: FnMut(&ProgressReport),
    {
        profiling::scope!("run");
        while !self.is_finished() {
            self.step()?;
            on_progress(&self.progress_report());
        }
        self.phase = Phase::Terminated;
        log::info!(
            "finished after {} generations: fitness {:.6}, {} genes",
            self.generation,
            self.best.fitness,
            self.best.genome.len()
        );
        Ok(self.best)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, rgb: [u8; 3]) -> sk::Pixmap {
        let mut pix = sk::Pixmap::new(w, h).unwrap();
        pix.fill(sk::Color::from_rgba8(rgb[0], rgb[1], rgb[2], 255));
        pix
    }

    fn small_cfg() -> EvolutionConfig {
        EvolutionConfig {
            initial_gene_count: 5,
            population_size: 12,
            worker_count: 3,
            min_radius: 1,
            max_radius: 4,
            max_generations: 5,
            seed: Some(7),
            ..Default::default()
        }
    }

    #[test]
    fn test_new_scores_initial_genome() {
        let engine = Engine::new(solid(10, 10, [255, 0, 0]), small_cfg()).unwrap();
        assert_eq!(engine.phase(), Phase::Initializing);
        assert_eq!(engine.generation, 0);
        assert_eq!(engine.best().genome.len(), 5);
        assert!(engine.best().fitness > 0.0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let cfg = EvolutionConfig { population_size: 0, ..small_cfg() };
        assert!(matches!(
            Engine::new(solid(4, 4, [0, 0, 0]), cfg),
            Err(EvolveError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_with_genome_dimension_check() {
        let err = Engine::with_genome(solid(4, 4, [0, 0, 0]), small_cfg(), Genome::new_blank(5, 4));
        assert!(matches!(err, Err(EvolveError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_step_advances_generation() {
        let mut engine = Engine::new(solid(10, 10, [0, 255, 0]), small_cfg()).unwrap();
        engine.step().unwrap();
        engine.step().unwrap();
        assert_eq!(engine.generation, 2);
        assert_eq!(engine.phase(), Phase::Selecting);
    }

    #[test]
    fn test_run_reports_every_generation() {
        let engine = Engine::new(solid(10, 10, [0, 0, 255]), small_cfg()).unwrap();
        let mut seen = Vec::new();
        let best = engine.run(|report| seen.push(report.generation)).unwrap();
        assert_eq!(seen, vec![1, 2, 3, 4, 5]);
        assert_eq!((best.raster.width(), best.raster.height()), (10, 10));
    }

    #[test]
    fn test_zero_generations_returns_initial() {
        let cfg = EvolutionConfig { max_generations: 0, ..small_cfg() };
        let engine = Engine::new(solid(6, 6, [1, 2, 3]), cfg).unwrap();
        let initial = engine.best().genome.clone();
        let best = engine.run(|_| panic!("no generations expected")).unwrap();
        assert_eq!(best.genome, initial);
    }

    #[test]
    fn test_same_seed_same_run() {
        let run = || {
            let engine = Engine::new(solid(10, 10, [200, 50, 50]), small_cfg()).unwrap();
            let mut fits = Vec::new();
            engine.run(|r| fits.push(r.fitness)).unwrap();
            fits
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_best_is_max_of_each_generation() {
        let mut engine = Engine::new(solid(8, 8, [90, 90, 200]), small_cfg()).unwrap();
        for _ in 0..3 {
            let mut rng = engine.rng.clone();
            let parent = engine.best.genome.clone();
            let results: Vec<Candidate> =
                scheduler::evaluate_generation(&mut rng, &parent, &engine.target, &engine.cfg)
                    .into_iter()
                    .collect::<Result<_>>()
                    .unwrap();
            let best = engine.step().unwrap();
            // same RNG state, same parent: step saw exactly these offspring
            assert!(results.iter().all(|c| best.fitness >= c.fitness));
            assert!(results.iter().any(|c| c.fitness == best.fitness));
        }
    }

    #[test]
    fn test_fitness_can_regress_without_parent_rescoring() {
        // a perfect parent: every offspring that changes anything scores lower,
        // and the parent itself is not among the candidates
        let target = solid(10, 10, [255, 255, 255]);
        let cfg = EvolutionConfig {
            initial_gene_count: 0,
            population_size: 4,
            worker_count: 2,
            add_probability: 1.0,
            remove_probability: 0.0,
            min_radius: 2,
            max_radius: 5,
            max_generations: 1,
            seed: Some(3),
            ..Default::default()
        };
        let mut engine = Engine::with_genome(target, cfg, Genome::new_blank(10, 10)).unwrap();
        let before = engine.best().fitness;
        assert_eq!(before, crate::fitness::PERFECT_FITNESS);
        let after = engine.step().unwrap().fitness;
        // a random circle could be pure white, in which case the fitness stays put
        assert!(after <= before);
        let white_gene = engine.best().genome.genes.iter().all(|g| g.color == [255, 255, 255]);
        if !white_gene {
            assert!(after < before);
        }
    }
}
