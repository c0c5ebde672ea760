//! Board layout: where slots, labels, and group buttons sit on a face.
//!
//! Positions are in the module's local frame, meters, with x running
//! along the wire row. The upper face is mirrored in z because the
//! shelf is viewed from the other side after the half turn.

use glam::DVec3;

use crate::assoc;
use crate::transition::Stage;

/// Width of the wire run across the board.
pub const BOARD_WIDTH: f64 = 0.14;

/// X position of a slot. Fractional slot values are allowed so group
/// midpoints land between slots.
pub fn wire_x(slot: f64, num_wires: usize) -> f64 {
    slot * BOARD_WIDTH / (num_wires - 1) as f64 - BOARD_WIDTH / 2.0
}

/// Label shown over a slot: letters on the upper face, 1-based wire
/// numbers elsewhere.
pub fn label(slot: usize, stage: Stage) -> String {
    if stage == Stage::UpperGrouping {
        assoc::letter_char(slot).to_string()
    } else {
        (slot + 1).to_string()
    }
}

/// Position of a slot's label. Labels alternate between two rows so
/// they stay legible at the highest wire counts.
pub fn label_pos(slot: usize, num_wires: usize, stage: Stage) -> DVec3 {
    let x = wire_x(slot as f64, num_wires);
    let z = if stage == Stage::UpperGrouping {
        if slot % 2 == 0 {
            0.001
        } else {
            -0.014
        }
    } else if slot % 2 == 0 {
        0.002
    } else {
        0.017
    };
    DVec3::new(x, 0.0101, z)
}

/// Position of a slot's group button, also row-alternated and mirrored
/// on the upper face.
pub fn button_pos(slot: usize, num_wires: usize, stage: Stage) -> DVec3 {
    let x = wire_x(slot as f64, num_wires);
    let z = if slot % 2 == 0 { 0.039 } else { 0.05 };
    let side = if stage == Stage::UpperGrouping { -1.0 } else { 1.0 };
    DVec3::new(x, 0.0141, z * side)
}

/// Group buttons only exist once the first pass is committed; during the
/// first pass there is no opposite grouping to peek at.
pub fn buttons_active(stage: Stage) -> bool {
    stage != Stage::LowerGrouping
}

// ─────────────────────────── Tests ───────────────────────────
