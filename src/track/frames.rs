use glam::{DMat3, DVec3};

use crate::track::TrackSample;
use crate::GLOBAL_CONFIG;

// signed turn angle between two directions projected to the ground plane;
// positive means the path is curving clockwise seen from above
fn turn_angle(incoming: DVec3, outgoing: DVec3) -> f64 {
    let cross = incoming.x * outgoing.z - incoming.z * outgoing.x;
    let dot = incoming.x * outgoing.x + incoming.z * outgoing.z;
    cross.atan2(dot)
}

pub fn build_frames(points: &[DVec3]) -> Vec<TrackSample> {
    let n = points.len();
    let mut samples = Vec::with_capacity(n);
    let mut prev_tangent = DVec3::Z;

    for i in 0..n {
        let before = points[(i + n - 1) % n];
        let after = points[(i + 1) % n];

        // central difference over cyclic neighbors; a smooth generator never
        // produces a zero difference, but a degenerate one falls back to the
        // previous sample's tangent
        let mut tangent = (after - before).normalize_or_zero();
        if tangent.length_squared() < 0.5 {
            tangent = prev_tangent;
        }
        prev_tangent = tangent;

        // damped turn angle instead of raw curvature, so banking stays smooth
        // and bounded through sharp corners
        let bank_angle = (turn_angle(points[i] - before, after - points[i])
            * GLOBAL_CONFIG.bank_damping)
            .clamp(-GLOBAL_CONFIG.max_bank_angle, GLOBAL_CONFIG.max_bank_angle);

        let banked_up = DMat3::from_axis_angle(tangent, bank_angle) * DVec3::Y;
        let left = banked_up.cross(tangent).normalize_or_zero();
        let normal = tangent.cross(left).normalize_or_zero();

        samples.push(TrackSample {
            index: i,
            position: points[i],
            tangent,
            left,
            normal,
            bank_angle,
        });
    }

    samples
}
