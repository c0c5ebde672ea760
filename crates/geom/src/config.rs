//! Geometry configuration.
//!
//! All lengths are in world units (the reference board is 0.14 wide), all
//! angles in degrees.

use serde::{Deserialize, Serialize};

/// Tunable constants for wire mesh generation. `Default` matches the
/// reference board dimensions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeshConfig {
    /// Radius of the visible wire tube.
    pub wire_radius: f64,
    /// Radius of the oversized highlight/hit-test proxy tube.
    pub highlight_radius: f64,
    /// Radius of the copper accent at the wire's far end.
    pub copper_radius: f64,
    /// Smallest perturbation magnitude applied at a curve joint.
    pub min_deviation: f64,
    /// Largest perturbation magnitude applied at a curve joint.
    pub max_deviation: f64,
    /// Number of de Casteljau subdivision passes over the control polygon.
    pub subdivisions: u32,
    /// Polyline samples per cubic segment (at least 2).
    pub samples_per_segment: usize,
    /// Vertices per tube ring (at least 3).
    pub ring_steps: usize,
    /// Trailing polyline samples reserved for the copper accent.
    pub copper_reserve: usize,
    /// Depth of the wire run from the mounting face to the far edge.
    pub span: f64,
    /// Offset of the wire's near end from the mounting face.
    pub face_offset: f64,
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            wire_radius: 0.0016,
            highlight_radius: 0.0032,
            copper_radius: 0.0008,
            min_deviation: 0.0025,
            max_deviation: 0.005,
            subdivisions: 2,
            samples_per_segment: 8,
            ring_steps: 7,
            copper_reserve: 1,
            span: 0.05,
            face_offset: 0.001,
        }
    }
}

impl MeshConfig {
    /// Check the fields a caller could plausibly get wrong.
    pub fn validate(&self) -> Result<(), String> {
        if self.samples_per_segment < 2 {
            return Err(format!(
                "samples_per_segment must be at least 2, got {}",
                self.samples_per_segment
            ));
        }
        if self.ring_steps < 3 {
            return Err(format!("ring_steps must be at least 3, got {}", self.ring_steps));
        }
        if self.min_deviation > self.max_deviation {
            return Err(format!(
                "min_deviation {} exceeds max_deviation {}",
                self.min_deviation, self.max_deviation
            ));
        }
        Ok(())
    }
}
