//! Tube extrusion along a polyline.
//!
//! A ring of vertices is swept along the curve with a propagated reference
//! frame, consecutive rings are stitched into quads, and the far end is
//! closed with a triangle fan. The output is flat-shaded: every triangle
//! owns its three vertices and the index buffer is the identity.

use glam::DVec3;

use crate::point;

/// CPU-side mesh data: interleaved [pos.x, pos.y, pos.z, norm.x, norm.y, norm.z]
#[derive(Clone, Debug)]
pub struct MeshData {
    /// 6 floats per vertex: position(3) + normal(3)
    pub vertices: Vec<f32>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / 6
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }
}

fn push_vert(vertices: &mut Vec<f32>, pos: DVec3, normal: DVec3) {
    let p = pos.as_vec3();
    let n = normal.as_vec3();
    vertices.extend_from_slice(&[p.x, p.y, p.z, n.x, n.y, n.z]);
}

fn push_tri(vertices: &mut Vec<f32>, indices: &mut Vec<u32>, tri: [(DVec3, DVec3); 3]) {
    for (p, n) in tri {
        let ix = (vertices.len() / 6) as u32;
        push_vert(vertices, p, n);
        indices.push(ix);
    }
}

// ── Frame propagation ──

/// Per-point radius vectors of length `radius`, orthogonal to the local
/// curve direction. Each one is the previous one projected onto the plane
/// perpendicular to the averaged tangent, which keeps twist between
/// consecutive rings minimal. A degenerate projection keeps the previous
/// direction.
fn ring_normals(pts: &[DVec3], radius: f64) -> Vec<DVec3> {
    let first_seg = pts[1] - pts[0];
    let mut dir = first_seg
        .cross(DVec3::Y)
        .try_normalize()
        .or_else(|| first_seg.cross(DVec3::X).try_normalize())
        .unwrap_or(DVec3::Z);

    let mut normals = Vec::with_capacity(pts.len());
    normals.push(dir * radius);
    for i in 1..pts.len() {
        let tangent = if i == pts.len() - 1 {
            pts[i] - pts[i - 1]
        } else {
            (pts[i + 1] - pts[i]) + (pts[i] - pts[i - 1])
        };
        dir = point::project_onto_plane(dir, tangent).try_normalize().unwrap_or(dir);
        normals.push(dir * radius);
    }
    normals
}

/// Rotation axis for the ring at point `i`: the single adjacent segment at
/// the two ends, the averaged tangent through `p` elsewhere.
fn ring_axis(pts: &[DVec3], i: usize) -> (DVec3, DVec3) {
    let last = pts.len() - 1;
    if i == 0 {
        (pts[0], pts[1])
    } else if i == last {
        (pts[last - 1], pts[last])
    } else {
        let p = pts[i];
        (p, p + (pts[i + 1] - p) + (p - pts[i - 1]))
    }
}

/// One ring of `steps` vertices around point `i`, with outward normals of
/// ring-radius length. Vertex order is reversed so the stitched quads wind
/// outward.
fn ring(pts: &[DVec3], normals: &[DVec3], i: usize, steps: usize) -> Vec<(DVec3, DVec3)> {
    let (a, b) = ring_axis(pts, i);
    let tip = pts[i] + normals[i];
    let mut out: Vec<(DVec3, DVec3)> = (0..steps)
        .map(|j| {
            let angle = 360.0 * j as f64 / steps as f64;
            let v = point::rotate_about_line(tip, a, b, angle);
            (v, v - pts[i])
        })
        .collect();
    out.reverse();
    out
}

// ── Tube assembly ──

/// Sweep a tube of the given radius along `pts` with `steps` vertices per
/// ring and close the far end with a fan cap. Triangle count is
/// `(N - 1) * steps * 2 + steps`.
pub fn tube_mesh(pts: &[DVec3], radius: f64, steps: usize) -> Result<MeshData, String> {
    if pts.len() < 2 {
        return Err(format!("tube needs at least 2 polyline points, got {}", pts.len()));
    }
    if steps < 3 {
        return Err(format!("tube needs at least 3 revolution steps, got {steps}"));
    }

    let normals = ring_normals(pts, radius);
    let rings: Vec<Vec<(DVec3, DVec3)>> =
        (0..pts.len()).map(|i| ring(pts, &normals, i, steps)).collect();

    let triangle_count = (pts.len() - 1) * steps * 2 + steps;
    let mut vertices = Vec::with_capacity(triangle_count * 3 * 6);
    let mut indices = Vec::with_capacity(triangle_count * 3);

    // Side quads: open along the curve, wrapped around the tube.
    for i in 0..rings.len() - 1 {
        let (r0, r1) = (&rings[i], &rings[i + 1]);
        for j in 0..steps {
            let k = (j + 1) % steps;
            push_tri(&mut vertices, &mut indices, [r0[j], r1[j], r1[k]]);
            push_tri(&mut vertices, &mut indices, [r0[j], r1[k], r0[k]]);
        }
    }

    // Fan cap over the final ring, every vertex carrying the exit direction.
    let last = pts.len() - 1;
    let cap_normal = pts[last] - pts[last - 1];
    let final_ring = &rings[last];
    for j in 0..steps {
        let k = (j + 1) % steps;
        push_tri(
            &mut vertices,
            &mut indices,
            [
                (pts[last], cap_normal),
                (final_ring[k].0, cap_normal),
                (final_ring[j].0, cap_normal),
            ],
        );
    }

    Ok(MeshData { vertices, indices })
}
