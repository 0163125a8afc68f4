use rand::Rng;
use rand_distr::StandardNormal;

use crate::dna::Gene;
use crate::settings::{RADIUS_CLAMP_MAX, RADIUS_CLAMP_MIN};

// relative mutation size is drawn from N(15, 4) percent, floored at 1%
const MUTATION_SIZE_MEAN_PCT: f64 = 15.0;
const MUTATION_SIZE_STDDEV_PCT: f64 = 4.0;

/// attribute touched by a single mutation call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Radius,
    Center,
    Color,
}

impl MutationKind {
    /// uniform pick, 1/3 each
    pub fn pick<R: Rng>(rng: &mut R) -> Self {
        match rng.random_range(0..3u8) {
            0 => MutationKind::Radius,
            1 => MutationKind::Center,
            _ => MutationKind::Color,
        }
    }
}

/// relative perturbation for one gene mutation, e.g. 0.15 for 15%
pub fn mutation_size<R: Rng>(rng: &mut R) -> f32 {
    let z: f64 = rng.sample(StandardNormal);
    let pct = (MUTATION_SIZE_MEAN_PCT + MUTATION_SIZE_STDDEV_PCT * z).round().max(1.0);
    (pct / 100.0) as f32
}

/// resample `value` from [value*(1-m), value*(1+m)].
/// the span is truncated to whole units; a zero span returns the lower bound
#[inline]
pub fn sample_relative<R: Rng>(rng: &mut R, value: u32, m: f32) -> i64 {
    let v = value as f32;
    let lo = v * (1.0 - m);
    let hi = v * (1.0 + m);
    let span = (hi - lo) as i64;
    let lo = lo as i64;
    if span <= 0 {
        lo
    } else {
        rng.random_range(lo..lo + span)
    }
}

impl Gene {
    pub fn mutate_radius<R: Rng>(&mut self, rng: &mut R, m: f32) {
        let r = sample_relative(rng, self.radius, m);
        self.radius = r.clamp(RADIUS_CLAMP_MIN as i64, RADIUS_CLAMP_MAX as i64) as u32;
    }

    /// center may land on the far edge (x == width), which renders as a partly clipped circle
    pub fn mutate_center<R: Rng>(&mut self, rng: &mut R, m: f32, width: u32, height: u32) {
        let x = sample_relative(rng, self.center.0, m);
        let y = sample_relative(rng, self.center.1, m);
        self.center = (
            x.clamp(0, width as i64) as u32,
            y.clamp(0, height as i64) as u32,
        );
    }

    pub fn mutate_color<R: Rng>(&mut self, rng: &mut R, m: f32) {
        for ch in self.color.iter_mut() {
            let c = sample_relative(rng, *ch as u32, m);
            *ch = c.clamp(0, 255) as u8;
        }
    }

    /// draw one mutation size and apply exactly one operator
    pub fn mutate<R: Rng>(&mut self, rng: &mut R, width: u32, height: u32) -> MutationKind {
        let m = mutation_size(rng);
        let kind = MutationKind::pick(rng);
        match kind {
            MutationKind::Radius => self.mutate_radius(rng, m),
            MutationKind::Center => self.mutate_center(rng, m, width, height),
            MutationKind::Color => self.mutate_color(rng, m),
        }
        kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn gene() -> Gene {
        Gene { center: (20, 10), radius: 50, color: [200, 100, 0] }
    }

    #[test]
    fn test_mutation_size_floor_and_typical_range() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut sum = 0.0f64;
        for _ in 0..10_000 {
            let m = mutation_size(&mut rng);
            assert!(m >= 0.01);
            // percentages are whole numbers
            let pct = m * 100.0;
            assert!((pct - pct.round()).abs() < 1e-4);
            sum += m as f64;
        }
        let mean = sum / 10_000.0;
        assert!((mean - 0.15).abs() < 0.01, "mean {mean}");
    }

    #[test]
    fn test_sample_relative_degenerate_range() {
        let mut rng = Pcg32::seed_from_u64(12);
        // 0 * anything collapses to zero width
        assert_eq!(sample_relative(&mut rng, 0, 0.2), 0);
        // 3 * 0.01 * 2 = 0.06 -> truncated span of 0, lower bound 2.97 -> 2
        assert_eq!(sample_relative(&mut rng, 3, 0.01), 2);
    }

    #[test]
    fn test_sample_relative_stays_in_range() {
        let mut rng = Pcg32::seed_from_u64(13);
        for _ in 0..1000 {
            let v = sample_relative(&mut rng, 100, 0.15);
            assert!((85..115).contains(&v), "{v}");
        }
    }

    #[test]
    fn test_radius_clamped() {
        let mut rng = Pcg32::seed_from_u64(14);
        let mut big = Gene { radius: 100, ..gene() };
        let mut small = Gene { radius: 1, ..gene() };
        for _ in 0..500 {
            big.mutate_radius(&mut rng, 0.5);
            small.mutate_radius(&mut rng, 0.5);
            assert!((1..=100).contains(&big.radius));
            assert!((1..=100).contains(&small.radius));
        }
    }

    #[test]
    fn test_center_clamped_to_canvas() {
        let mut rng = Pcg32::seed_from_u64(15);
        let mut g = Gene { center: (30, 30), ..gene() };
        for _ in 0..500 {
            g.mutate_center(&mut rng, 0.5, 32, 32);
            assert!(g.center.0 <= 32 && g.center.1 <= 32);
        }
    }

    #[test]
    fn test_color_clamped_before_narrowing() {
        let mut rng = Pcg32::seed_from_u64(16);
        let mut g = Gene { color: [255, 250, 1], ..gene() };
        for _ in 0..500 {
            g.mutate_color(&mut rng, 0.3);
        }
        // saturating at the top instead of wrapping to small values
        let mut top = Gene { color: [255, 255, 255], ..gene() };
        top.mutate_color(&mut rng, 0.5);
        assert!(top.color.iter().all(|&c| c >= 127));
    }

    #[test]
    fn test_mutate_touches_one_attribute() {
        let mut rng = Pcg32::seed_from_u64(17);
        let mut seen = [false; 3];
        for _ in 0..300 {
            let before = gene();
            let mut g = before;
            let kind = g.mutate(&mut rng, 64, 64);
            match kind {
                MutationKind::Radius => {
                    seen[0] = true;
                    assert_eq!((g.center, g.color), (before.center, before.color));
                }
                MutationKind::Center => {
                    seen[1] = true;
                    assert_eq!((g.radius, g.color), (before.radius, before.color));
                }
                MutationKind::Color => {
                    seen[2] = true;
                    assert_eq!((g.radius, g.center), (before.radius, before.center));
                }
            }
            assert!((1..=100).contains(&g.radius));
            assert!(g.center.0 <= 64 && g.center.1 <= 64);
        }
        assert_eq!(seen, [true; 3]);
    }
}
