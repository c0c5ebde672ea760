//! Full wire generation: one perturbed centerline, three tube variants.

use crate::config::MeshConfig;
use crate::curve;
use crate::tube::{tube_mesh, MeshData};

/// The three meshes produced per wire.
#[derive(Clone, Debug)]
pub struct WireMeshes {
    /// Visible wire at the nominal radius, stopping short of the copper
    /// accent.
    pub wire: MeshData,
    /// Oversized proxy over the same run, used for pointer hit testing and
    /// the highlight overlay.
    pub highlight: MeshData,
    /// Thin accent tube over the reserved samples at the far end.
    pub copper: MeshData,
}

/// Generate the meshes for one wire. The entire output is a pure function
/// of the arguments: the same inputs always produce bit-identical buffers.
pub fn generate_wire(
    start_x: f64,
    end_x: f64,
    bend_deg: f64,
    at_top: bool,
    seed: u64,
    cfg: &MeshConfig,
) -> Result<WireMeshes, String> {
    let points = curve::build_polyline(start_x, end_x, bend_deg, at_top, seed, cfg)?;
    if points.len() < cfg.copper_reserve + 2 {
        return Err(format!(
            "polyline of {} points is too short for a copper reserve of {}",
            points.len(),
            cfg.copper_reserve
        ));
    }

    let body = &points[..points.len() - cfg.copper_reserve];
    let accent = &points[points.len() - cfg.copper_reserve - 2..];

    Ok(WireMeshes {
        wire: tube_mesh(body, cfg.wire_radius, cfg.ring_steps)?,
        highlight: tube_mesh(body, cfg.highlight_radius, cfg.ring_steps)?,
        copper: tube_mesh(accent, cfg.copper_radius, cfg.ring_steps)?,
    })
}
