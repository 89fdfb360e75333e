use std::f64::consts::TAU;

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::GLOBAL_CONFIG;

// TrackParams is rolled once by the race host and shipped to every peer, so
// all clients build an identical loop. Harmonic frequencies are integers;
// that is what makes the curve periodic and the loop close.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct TrackParams {
    pub sample_count: usize,
    pub half_width: f64,
    pub base_radius: f64,
    pub radius_amp1: f64,
    pub radius_freq1: u32,
    pub radius_amp2: f64,
    pub radius_freq2: u32,
    pub radius_phase: f64,
    pub height_primary: f64,
    pub height_secondary: f64,
    pub height_phase: f64,
}

impl Default for TrackParams {
    fn default() -> Self {
        TrackParams {
            sample_count: GLOBAL_CONFIG.track_samples,
            half_width: GLOBAL_CONFIG.track_half_width,
            base_radius: 90.0,
            radius_amp1: 18.0,
            radius_freq1: 3,
            radius_amp2: 9.0,
            radius_freq2: 5,
            radius_phase: 1.3,
            height_primary: 6.0,
            height_secondary: 3.5,
            height_phase: 0.7,
        }
    }
}

impl TrackParams {
    // the ranges keep the base radius comfortably above the summed harmonic
    // amplitudes, so a rolled track always passes validation
    pub fn randomized<R: Rng>(rng: &mut R) -> Self {
        TrackParams {
            base_radius: rng.gen_range(75.0..110.0),
            radius_amp1: rng.gen_range(10.0..22.0),
            radius_freq1: rng.gen_range(2..4),
            radius_amp2: rng.gen_range(4.0..12.0),
            radius_freq2: rng.gen_range(4..7),
            radius_phase: rng.gen_range(0.0..TAU),
            height_primary: rng.gen_range(2.0..8.0),
            height_secondary: rng.gen_range(1.0..5.0),
            height_phase: rng.gen_range(0.0..TAU),
            ..TrackParams::default()
        }
    }

    fn radius_at(&self, theta: f64) -> f64 {
        self.base_radius
            + self.radius_amp1 * (self.radius_freq1 as f64 * theta).sin()
            + self.radius_amp2 * (self.radius_freq2 as f64 * theta + self.radius_phase).sin()
    }

    fn height_at(&self, theta: f64) -> f64 {
        self.height_primary * (2.0 * theta).sin()
            + self.height_secondary * (3.0 * theta + self.height_phase).sin()
    }
}

// theta sweeps [0, 2pi) in sample_count equal steps
pub fn generate(params: &TrackParams) -> Vec<DVec3> {
    (0..params.sample_count)
        .map(|i| {
            let theta = TAU * i as f64 / params.sample_count as f64;
            let radius = params.radius_at(theta);
            DVec3::new(
                radius * theta.cos(),
                params.height_at(theta),
                radius * theta.sin(),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_generation_is_deterministic() {
        let params = TrackParams::default();
        assert_eq!(generate(&params), generate(&params));
    }

    #[test]
    fn test_harmonics_are_periodic() {
        let params = TrackParams::default();
        assert_relative_eq!(params.radius_at(0.0), params.radius_at(TAU), epsilon = 1e-9);
        assert_relative_eq!(params.height_at(0.0), params.height_at(TAU), epsilon = 1e-9);
    }

    #[test]
    fn test_randomized_params_never_pinch() {
        let mut rng = StdRng::seed_from_u64(125);
        for _ in 0..100 {
            let params = TrackParams::randomized(&mut rng);
            assert!(params.base_radius > params.radius_amp1.abs() + params.radius_amp2.abs());
        }
    }
}
