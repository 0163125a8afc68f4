use rand::seq::index;
use rand::Rng;
use tiny_skia as sk;

use crate::dna::{Gene, Genome};
use crate::error::Result;
use crate::fitness;
use crate::render::CpuRenderer;
use crate::settings::EvolutionConfig;

/// above this many genes the per-gene coin flips are replaced by one sample
/// of floor(p * len) distinct indices
pub const SAMPLED_MUTATION_THRESHOLD: usize = 200;

/// one scored offspring. owned outright: nothing in here aliases the parent
#[derive(Clone)]
pub struct Candidate {
    /// position within its generation; breaks fitness ties in favor of the lower one
    pub ordinal: usize,
    pub fitness: f64,
    pub distance: f64,
    pub genome: Genome,
    pub raster: sk::Pixmap,
}

impl Candidate {
    /// render and score a genome as-is
    pub fn evaluate(genome: Genome, target: &sk::Pixmap) -> Result<Self> {
        let raster = CpuRenderer::render(&genome)?;
        let score = fitness::evaluate(target, &raster)?;
        Ok(Self {
            ordinal: 0,
            fitness: score.fitness,
            distance: score.distance,
            genome,
            raster,
        })
    }
}

/// mutation pass over the genes of `genome`. returns how many genes were mutated
pub fn mutate_genes<R: Rng>(rng: &mut R, genome: &mut Genome, probability: f32) -> usize {
    profiling::scope!("mutate_genes");
    let (w, h) = (genome.width, genome.height);
    let len = genome.genes.len();

    if len < SAMPLED_MUTATION_THRESHOLD {
        let mut mutated = 0;
        for gene in genome.genes.iter_mut() {
            if rng.random::<f32>() < probability {
                gene.mutate(rng, w, h);
                mutated += 1;
            }
        }
        mutated
    } else {
        let amount = ((probability * len as f32) as usize).min(len);
        for i in index::sample(rng, len, amount).iter() {
            genome.genes[i].mutate(rng, w, h);
        }
        amount
    }
}

/// derive one offspring from `parent`: deep copy, mutation pass, maybe add a
/// gene, maybe swap-remove one, then render and score it
pub fn generate_candidate<R: Rng>(
    rng: &mut R,
    parent: &Genome,
    target: &sk::Pixmap,
    cfg: &EvolutionConfig,
) -> Result<Candidate> {
    profiling::scope!("generate_candidate");
    let mut child = parent.clone();

    mutate_genes(rng, &mut child, cfg.mutation_probability);

    let below_cap = cfg.max_genes.map_or(true, |cap| child.len() < cap);
    if rng.random::<f32>() < cfg.add_probability && below_cap {
        let gene = Gene::random(rng, child.width, child.height, cfg.min_radius, cfg.max_radius);
        child.genes.push(gene);
    }

    if !child.is_empty() && rng.random::<f32>() < cfg.remove_probability {
        let idx = rng.random_range(0..child.len());
        child.swap_remove(idx);
    }

    Candidate::evaluate(child, target)
}
