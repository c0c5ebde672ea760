//! Seeded Bézier curve construction for a single wire.
//!
//! A wire's centerline is a cubic Bézier from its slot on the mounting face
//! to its far endpoint, bent about the x-axis by the group's display angle,
//! subdivided, nudged at every joint by a seeded random deviation, and
//! finally flattened into a polyline.

use glam::DVec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::MeshConfig;
use crate::point;

// ── Control polygon ──

/// Cubic control polygon for a wire from `start_x` on the mounting face to
/// `end_x` on the far edge, bent by `bend_deg` about the x-axis. `at_top`
/// mirrors the run for the board's upper face.
pub fn control_polygon(
    start_x: f64,
    end_x: f64,
    bend_deg: f64,
    at_top: bool,
    cfg: &MeshConfig,
) -> [DVec3; 4] {
    let far = if at_top { cfg.span } else { -cfg.span };
    let near = if at_top { -cfg.face_offset } else { cfg.face_offset };

    let start = DVec3::new(start_x, 0.0, near);
    let mut end = DVec3::new(end_x, 0.0, far);
    let start_ctrl = DVec3::new(start_x, 0.0, far / 2.0);
    let mut end_ctrl = (end + start_ctrl) / 2.0;

    // The far half of the polygon swings about the x-axis; the sign flip
    // keeps both faces bending away from the board.
    let swing = if at_top { -bend_deg } else { bend_deg };
    end_ctrl = point::rotate_about_line(end_ctrl, DVec3::ZERO, DVec3::X, swing);
    end = point::rotate_about_line(end, DVec3::ZERO, DVec3::X, swing);

    [start, start_ctrl, end_ctrl, end]
}

// ── Subdivision ──

/// One de Casteljau binary split over every cubic segment of a piecewise
/// polygon (`3k + 1` points). Doubles the segment count, preserves the
/// exact curve shape.
pub fn subdivide(polygon: &[DVec3]) -> Vec<DVec3> {
    debug_assert!(polygon.len() >= 4 && (polygon.len() - 1) % 3 == 0);
    let segments = (polygon.len() - 1) / 3;
    let mut out = Vec::with_capacity(6 * segments + 1);
    for s in 0..segments {
        let a = polygon[3 * s];
        let b = polygon[3 * s + 1];
        let c = polygon[3 * s + 2];
        let d = polygon[3 * s + 3];
        out.push(a);
        out.push(a / 2.0 + b / 2.0);
        out.push(a / 4.0 + b / 2.0 + c / 4.0);
        out.push(a / 8.0 + b * (3.0 / 8.0) + c * (3.0 / 8.0) + d / 8.0);
        out.push(b / 4.0 + c / 2.0 + d / 4.0);
        out.push(c / 2.0 + d / 2.0);
        // Each segment's end point doubles as the next segment's start.
    }
    out.push(polygon[polygon.len() - 1]);
    out
}

// ── Perturbation ──

/// Nudge the control points around every segment joint by a random
/// deviation with magnitude in `[min_dev, max_dev]`. The two neighbors of a
/// joint move in opposite directions, so the joint itself stays put and the
/// curve remains position-continuous; the first and last joint only have
/// one neighbor to move. Four samples are drawn per joint either way.
pub fn perturb(polygon: &mut [DVec3], min_dev: f64, max_dev: f64, rng: &mut impl Rng) {
    debug_assert!(polygon.len() >= 4 && (polygon.len() - 1) % 3 == 0);
    let last = polygon.len() - 1;
    let mut i = 0;
    while i <= last {
        let dir = DVec3::new(
            rng.random::<f64>() - 0.5,
            rng.random::<f64>() - 0.5,
            rng.random::<f64>() - 0.5,
        )
        .normalize_or_zero();
        let deviation = dir * (rng.random::<f64>() * (max_dev - min_dev) + min_dev);
        if i > 0 {
            polygon[i - 1] += deviation;
        }
        if i < last {
            polygon[i + 1] -= deviation;
        }
        i += 3;
    }
}

// ── Sampling ──

fn eval_cubic(a: DVec3, b: DVec3, c: DVec3, d: DVec3, t: f64) -> DVec3 {
    let u = 1.0 - t;
    a * (u * u * u) + b * (3.0 * u * u * t) + c * (3.0 * u * t * t) + d * (t * t * t)
}

/// Flatten a piecewise cubic polygon into a polyline with
/// `samples_per_segment` evaluations per segment, dropping each segment's
/// last sample so shared joints appear once. The exact curve end is
/// appended last.
pub fn sample(polygon: &[DVec3], samples_per_segment: usize) -> Vec<DVec3> {
    debug_assert!(polygon.len() >= 4 && (polygon.len() - 1) % 3 == 0);
    debug_assert!(samples_per_segment >= 2);
    let segments = (polygon.len() - 1) / 3;
    let mut out = Vec::with_capacity(segments * (samples_per_segment - 1) + 1);
    for s in 0..segments {
        let a = polygon[3 * s];
        let b = polygon[3 * s + 1];
        let c = polygon[3 * s + 2];
        let d = polygon[3 * s + 3];
        for i in 0..samples_per_segment - 1 {
            let t = i as f64 / (samples_per_segment - 1) as f64;
            out.push(eval_cubic(a, b, c, d, t));
        }
    }
    out.push(polygon[polygon.len() - 1]);
    out
}

// ── Pipeline ──

/// Build the full perturbed polyline for one wire. Identical inputs give a
/// bit-identical polyline.
pub fn build_polyline(
    start_x: f64,
    end_x: f64,
    bend_deg: f64,
    at_top: bool,
    seed: u64,
    cfg: &MeshConfig,
) -> Result<Vec<DVec3>, String> {
    cfg.validate()?;
    let mut polygon = control_polygon(start_x, end_x, bend_deg, at_top, cfg).to_vec();
    for _ in 0..cfg.subdivisions {
        polygon = subdivide(&polygon);
    }
    let mut rng = StdRng::seed_from_u64(seed);
    perturb(&mut polygon, cfg.min_deviation, cfg.max_deviation, &mut rng);
    Ok(sample(&polygon, cfg.samples_per_segment))
}
