//! Stage progression and the shelf pose timeline between stages.
//!
//! Logical stage changes land immediately; what animates is only the
//! shelf pose the host applies to its model. A change plays out in three
//! equal phases: the lid closes over the old face, the shelf yaws to the
//! new face while hidden, the lid opens again.

use serde::{Deserialize, Serialize};

/// The phases of a puzzle attempt.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    /// Grouping pass on the lower face.
    LowerGrouping,
    /// Grouping pass on the upper face.
    UpperGrouping,
    /// Pressing wires in hidden-letter order.
    Verification,
    /// Terminal state, all input ignored.
    Solved,
}

impl Stage {
    /// The stage a commit moves to. Verification and solved have no
    /// successor.
    pub fn next(self) -> Stage {
        match self {
            Stage::LowerGrouping => Stage::UpperGrouping,
            Stage::UpperGrouping => Stage::Verification,
            Stage::Verification | Stage::Solved => self,
        }
    }

    /// Shelf yaw that faces this stage's board side. Only the upper
    /// grouping pass shows the back of the shelf.
    pub fn yaw_deg(self) -> f64 {
        if self == Stage::UpperGrouping {
            0.0
        } else {
            180.0
        }
    }
}

/// Pose the host applies to the shelf model.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShelfPose {
    pub yaw_deg: f64,
    /// Lid opening, 0 closed through 1 fully open.
    pub lid: f64,
}

impl ShelfPose {
    /// The idle pose for a stage: lid open, facing the stage's side.
    pub fn resting(stage: Stage) -> Self {
        Self {
            yaw_deg: stage.yaw_deg(),
            lid: 1.0,
        }
    }
}

/// A stage change animated over a fixed duration.
#[derive(Clone, Debug)]
pub struct Transition {
    from: Stage,
    to: Stage,
    duration: f64,
    elapsed: f64,
}

impl Transition {
    pub fn new(from: Stage, to: Stage, duration: f64) -> Self {
        Self {
            from,
            to,
            duration,
            elapsed: 0.0,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.duration
    }

    /// Advance the clock by `dt` seconds (negative steps are ignored).
    /// Returns true once the timeline has finished.
    pub fn advance(&mut self, dt: f64) -> bool {
        self.elapsed = (self.elapsed + dt.max(0.0)).min(self.duration);
        self.is_finished()
    }

    /// Pose at the current clock.
    pub fn pose(&self) -> ShelfPose {
        self.pose_at(self.elapsed)
    }

    /// Pose at an absolute time since the transition began. A
    /// non-positive duration snaps straight to the target's idle pose.
    pub fn pose_at(&self, elapsed: f64) -> ShelfPose {
        if self.duration <= 0.0 {
            return ShelfPose::resting(self.to);
        }
        let t = (elapsed / self.duration).clamp(0.0, 1.0);
        let third = 1.0 / 3.0;
        if t < third {
            // Lid closing over the old face.
            ShelfPose {
                yaw_deg: self.from.yaw_deg(),
                lid: 1.0 - t / third,
            }
        } else if t < 2.0 * third {
            // Shelf turning while hidden.
            let s = (t - third) / third;
            ShelfPose {
                yaw_deg: self.from.yaw_deg()
                    + (self.to.yaw_deg() - self.from.yaw_deg()) * s,
                lid: 0.0,
            }
        } else {
            // Lid opening over the new face.
            ShelfPose {
                yaw_deg: self.to.yaw_deg(),
                lid: ((t - 2.0 * third) / third).min(1.0),
            }
        }
    }
}

// ─────────────────────────── Tests ───────────────────────────
