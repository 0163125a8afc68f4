use rand::Rng;
use serde::{Deserialize, Serialize};

/// an opaque filled circle. alpha is implicit (always 255)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Gene {
    pub center: (u32, u32),
    pub radius: u32,
    pub color: [u8; 3],
}

impl Gene {
    /// random circle anywhere on the canvas, radius in [min_radius, max_radius)
    pub fn random<R: Rng>(rng: &mut R, width: u32, height: u32, min_radius: u32, max_radius: u32) -> Self {
        debug_assert!(min_radius < max_radius);
        debug_assert!(width > 0 && height > 0);
        Self {
            center: (rng.random_range(0..width), rng.random_range(0..height)),
            radius: rng.random_range(min_radius..max_radius),
            color: [rng.random::<u8>(), rng.random::<u8>(), rng.random::<u8>()],
        }
    }

    /// RGBA bytes as painted on the canvas
    #[inline]
    pub fn rgba(&self) -> [u8; 4] {
        [self.color[0], self.color[1], self.color[2], 255]
    }
}

/// ordered circles, painted back to front. cloning deep-copies every gene
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    pub width: u32,
    pub height: u32,
    pub genes: Vec<Gene>,
}

impl Genome {
    pub fn new_blank(width: u32, height: u32) -> Self {
        Self { width, height, genes: Vec::new() }
    }

    /// seed genome of `count` random genes
    pub fn random<R: Rng>(rng: &mut R, width: u32, height: u32, count: usize, min_radius: u32, max_radius: u32) -> Self {
        profiling::scope!("Genome::random");
        let genes = (0..count)
            .map(|_| Gene::random(rng, width, height, min_radius, max_radius))
            .collect();
        Self { width, height, genes }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.genes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// drop the gene at `index` in O(1): the last gene takes its slot,
    /// so paint order changes for that one gene
    pub fn swap_remove(&mut self, index: usize) -> Option<Gene> {
        if index < self.genes.len() {
            Some(self.genes.swap_remove(index))
        } else {
            None
        }
    }

    /// save genome to a JSON file
    pub fn save_json(&self, path: &std::path::Path) -> crate::error::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
