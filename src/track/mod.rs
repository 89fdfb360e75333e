use glam::DVec3;
use thiserror::Error;

pub mod centerline;
pub mod frames;
pub mod mesh;

pub use centerline::TrackParams;
pub use mesh::RibbonMesh;

#[derive(Error, Debug)]
pub enum TrackError {
    #[error("track needs at least 3 samples, got {0}")]
    TooFewSamples(usize),
    #[error("track half width must be positive, got {0}")]
    InvalidHalfWidth(f64),
    #[error("radius harmonics sum to {amplitude} which reaches the base radius {base}; the loop would pinch")]
    DegenerateRadius { base: f64, amplitude: f64 },
}

// one station along the centerline; {tangent, left, normal} form an
// orthonormal, banked frame
pub struct TrackSample {
    pub index: usize,
    pub position: DVec3,
    pub tangent: DVec3,
    pub left: DVec3,
    pub normal: DVec3,
    pub bank_angle: f64,
}

// built once per race session and read-only afterwards; indices are cyclic
pub struct TrackGeometry {
    samples: Vec<TrackSample>,
    half_width: f64,
    min_corner: DVec3,
    max_corner: DVec3,
}

impl TrackGeometry {
    pub fn build(params: &TrackParams) -> Result<TrackGeometry, TrackError> {
        if params.sample_count < 3 {
            return Err(TrackError::TooFewSamples(params.sample_count));
        }
        if params.half_width <= 0.0 {
            return Err(TrackError::InvalidHalfWidth(params.half_width));
        }
        let amplitude = params.radius_amp1.abs() + params.radius_amp2.abs();
        if params.base_radius <= amplitude {
            return Err(TrackError::DegenerateRadius {
                base: params.base_radius,
                amplitude,
            });
        }

        let points = centerline::generate(params);
        let samples = frames::build_frames(&points);

        let mut min_corner = points[0];
        let mut max_corner = points[0];
        for point in &points {
            min_corner = min_corner.min(*point);
            max_corner = max_corner.max(*point);
        }

        Ok(TrackGeometry {
            samples,
            half_width: params.half_width,
            min_corner,
            max_corner,
        })
    }

    pub fn samples(&self) -> &[TrackSample] {
        &self.samples
    }

    pub fn sample_count(&self) -> usize {
        self.samples.len()
    }

    pub fn half_width(&self) -> f64 {
        self.half_width
    }

    // cyclic: sample N is sample 0 again
    pub fn sample(&self, index: usize) -> &TrackSample {
        &self.samples[index % self.samples.len()]
    }

    // brute force is fine at a few hundred samples; this is the progress
    // query everything else keys off
    pub fn nearest_sample_index(&self, position: DVec3) -> usize {
        self.samples
            .iter()
            .min_by(|a, b| {
                a.position
                    .distance_squared(position)
                    .partial_cmp(&b.position.distance_squared(position))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|sample| sample.index)
            .unwrap_or(0)
    }

    pub fn build_ribbon(&self) -> RibbonMesh {
        mesh::build_ribbon(self)
    }

    // axis-aligned bounding box of the centerline
    pub fn bounds(&self) -> (DVec3, DVec3) {
        (self.min_corner, self.max_corner)
    }

    // normalized (0..1, 0..1) coordinates over the track's ground footprint,
    // for the minimap overlay
    pub fn minimap_location(&self, position: DVec3) -> (f32, f32) {
        let extent_x = (self.max_corner.x - self.min_corner.x).max(f64::EPSILON);
        let extent_z = (self.max_corner.z - self.min_corner.z).max(f64::EPSILON);
        (
            ((position.x - self.min_corner.x) / extent_x) as f32,
            ((position.z - self.min_corner.z) / extent_z) as f32,
        )
    }
}
