// Fitness module organization
// distance is the raw pixel error, metrics turns it into size-independent numbers

pub mod distance;
pub mod metrics;

pub use distance::{rgba_distance, ssd_rgba_parallel};
pub use metrics::MetricsSnapshot;

use tiny_skia as sk;

use crate::error::{EvolveError, Result};

/// numerator of the inverse-distance score
pub const FITNESS_SCALE: f64 = 255.0;

/// score for a pixel-perfect match, where 255 / 0 would be undefined
pub const PERFECT_FITNESS: f64 = f64::MAX;

/// fitness with the distance it was derived from
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Score {
    pub fitness: f64,
    pub distance: f64,
}

/// 255 / distance, higher is better. zero distance maps to PERFECT_FITNESS
#[inline]
pub fn fitness_from_distance(distance: f64) -> f64 {
    if distance > 0.0 {
        FITNESS_SCALE / distance
    } else {
        PERFECT_FITNESS
    }
}

/// score a rendered candidate against the target. pure given both rasters
pub fn evaluate(target: &sk::Pixmap, candidate: &sk::Pixmap) -> Result<Score> {
    profiling::scope!("evaluate");
    if target.width() != candidate.width() || target.height() != candidate.height() {
        return Err(EvolveError::DimensionMismatch {
            expected: (target.width(), target.height()),
            actual: (candidate.width(), candidate.height()),
        });
    }
    let distance = rgba_distance(target.data(), candidate.data());
    Ok(Score { fitness: fitness_from_distance(distance), distance })
}
