use crate::track::TrackGeometry;

// flat buffers handed to the renderer verbatim: xyz positions, uv pairs and
// a u32 index list
pub struct RibbonMesh {
    pub positions: Vec<f32>,
    pub uvs: Vec<f32>,
    pub indices: Vec<u32>,
}

// two vertices per sample offset along the frame's left axis, one quad per
// segment including the closing one, wound counter-clockwise seen from above
pub fn build_ribbon(track: &TrackGeometry) -> RibbonMesh {
    let samples = track.samples();
    let n = samples.len();
    let mut positions = Vec::with_capacity(n * 6);
    let mut uvs = Vec::with_capacity(n * 4);
    let mut indices = Vec::with_capacity(n * 6);

    for sample in samples {
        let left_edge = sample.position + sample.left * track.half_width();
        let right_edge = sample.position - sample.left * track.half_width();
        positions.extend_from_slice(&[
            left_edge.x as f32,
            left_edge.y as f32,
            left_edge.z as f32,
            right_edge.x as f32,
            right_edge.y as f32,
            right_edge.z as f32,
        ]);

        let v = sample.index as f32 * 0.25;
        uvs.extend_from_slice(&[0.0, v, 1.0, v]);
    }

    for i in 0..n {
        let j = (i + 1) % n;
        let (li, ri) = (2 * i as u32, 2 * i as u32 + 1);
        let (lj, rj) = (2 * j as u32, 2 * j as u32 + 1);
        indices.extend_from_slice(&[li, ri, lj, ri, rj, lj]);
    }

    RibbonMesh {
        positions,
        uvs,
        indices,
    }
}
