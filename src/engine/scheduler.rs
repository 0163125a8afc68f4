use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use std::sync::mpsc;
use tiny_skia as sk;

use super::candidate::{generate_candidate, Candidate};
use crate::dna::Genome;
use crate::error::{EvolveError, Result};
use crate::settings::EvolutionConfig;

/// split `population` evaluations across at most `workers` tasks so the total
/// is exact. the first `population % workers` tasks take one extra
pub fn worker_quotas(population: usize, workers: usize) -> Vec<usize> {
    let workers = workers.min(population).max(1);
    let base = population / workers;
    let extra = population % workers;
    (0..workers).map(|i| base + usize::from(i < extra)).collect()
}

/// fan out one generation: every worker gets its own seeded RNG and a quota of
/// offspring of `parent`, and pushes each result into a bounded channel sized
/// to the whole generation. returns once every worker has finished
pub fn evaluate_generation<R: Rng>(
    rng: &mut R,
    parent: &Genome,
    target: &sk::Pixmap,
    cfg: &EvolutionConfig,
) -> mpsc::Receiver<Result<Candidate>> {
    profiling::scope!("evaluate_generation");
    let quotas = worker_quotas(cfg.population_size, cfg.worker_count);

    // seeds drawn up front keep a seeded run reproducible regardless of scheduling
    let seeds: Vec<u64> = quotas.iter().map(|_| rng.random::<u64>()).collect();

    let (tx, rx) = mpsc::sync_channel(cfg.population_size);

    rayon::scope(|s| {
        let mut first_ordinal = 0;
        for (worker, (&quota, &seed)) in quotas.iter().zip(&seeds).enumerate() {
            let tx = tx.clone();
            s.spawn(move |_| {
                profiling::scope!("worker");
                let mut worker_rng = Pcg32::seed_from_u64(seed);
                for i in 0..quota {
                    let result = generate_candidate(&mut worker_rng, parent, target, cfg).map(|mut c| {
                        c.ordinal = first_ordinal + i;
                        c
                    });
                    if let Err(e) = &result {
                        log::error!("worker {worker}: candidate failed: {e}");
                    }
                    if tx.send(result).is_err() {
                        // collector is gone, nothing left to report to
                        break;
                    }
                }
            });
            first_ordinal += quota;
        }
    });

    rx
}

/// (mu, 1) selection: drain up to `population` results and keep the fittest.
/// ties keep the lower ordinal, so the outcome does not depend on which worker
/// finished first. an errored candidate aborts the generation
pub fn select_best<I>(results: I, population: usize) -> Result<Candidate>
where
    I: IntoIterator<Item = Result<Candidate>>,
{
    profiling::scope!("select_best");
    let mut best: Option<Candidate> = None;
    for result in results.into_iter().take(population) {
        let candidate = result?;
        match &best {
            Some(b) if !beats(&candidate, b) => {}
            _ => best = Some(candidate),
        }
    }
    best.ok_or(EvolveError::EmptyGeneration)
}

#[inline]
fn beats(challenger: &Candidate, incumbent: &Candidate) -> bool {
    challenger.fitness > incumbent.fitness
        || (challenger.fitness == incumbent.fitness && challenger.ordinal < incumbent.ordinal)
}
