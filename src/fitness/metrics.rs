//─────────────────────────────────────────────────────────────────────────────
// resolution-invariant metrics (RMSE, PSNR)
//─────────────────────────────────────────────────────────────────────────────

/// channels that can differ. alpha is always opaque on both sides
pub const FITNESS_CHANNELS_F64: f64 = 3.0;

/// PSNR (peak signal-to-noise ratio) in decibels.
/// - `mse`: mean squared error per channel
/// - `peak`: 255.0 for 8-bit images
/// higher PSNR = better quality. typical ranges:
///   - 20 dB = rough likeness
///   - 30 dB = acceptable
#[inline]
pub fn psnr_from_mse(mse: f64, peak: f64) -> f64 {
    let mse = mse.max(1e-12);
    10.0 * ((peak * peak) / mse).log10()
}

/// snapshot of resolution-invariant metrics for one candidate.
/// the raw distance grows with image size; these do not
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct MetricsSnapshot {
    pub rmse: f64,
    pub psnr: f64,
}

impl MetricsSnapshot {
    /// build metrics from the euclidean RGBA distance + pixel count
    #[inline]
    pub fn from_distance(distance: f64, num_pixels: usize, psnr_peak: f64) -> Self {
        let n = (num_pixels.max(1) as f64) * FITNESS_CHANNELS_F64;
        let mse = distance * distance / n;
        Self {
            rmse: mse.sqrt(),
            psnr: psnr_from_mse(mse, psnr_peak),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perfect_match_is_finite() {
        let m = MetricsSnapshot::from_distance(0.0, 100, 255.0);
        assert_eq!(m.rmse, 0.0);
        assert!(m.psnr.is_finite() && m.psnr > 100.0);
    }

    #[test]
    fn test_max_error() {
        // every channel off by 255 on 10 px
        let distance = (10.0 * 3.0 * 255.0f64 * 255.0).sqrt();
        let m = MetricsSnapshot::from_distance(distance, 10, 255.0);
        assert!((m.rmse - 255.0).abs() < 1e-9);
        assert!(m.psnr.abs() < 1e-9);
    }
}
