use crate::fitness::MetricsSnapshot;

use super::Engine;

/// peak value for PSNR on 8-bit channels
pub const PSNR_PEAK: f64 = 255.0;

/// what the loop reports after each generation. pure observability,
/// nothing here feeds back into the search
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ProgressReport {
    pub generation: u64,
    pub fitness: f64,
    pub distance: f64,
    pub genes: usize,
    pub metrics: MetricsSnapshot,
}

impl Engine {
    /// resolution-invariant metrics for the current best
    pub fn metrics(&self) -> MetricsSnapshot {
        let num_px = (self.target.width() as usize) * (self.target.height() as usize);
        MetricsSnapshot::from_distance(self.best.distance, num_px, PSNR_PEAK)
    }

    pub fn progress_report(&self) -> ProgressReport {
        ProgressReport {
            generation: self.generation,
            fitness: self.best.fitness,
            distance: self.best.distance,
            genes: self.best.genome.len(),
            metrics: self.metrics(),
        }
    }
}
