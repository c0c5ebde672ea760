// Core rules for the wire-association puzzle: two grouping passes over a
// hidden permutation, verified wire by wire. Geometry lives in tangle-geom;
// this crate owns the rules, the stage clock, and the scripted harness.

pub mod assoc;
pub mod harness;
pub mod layout;
pub mod module;
pub mod partition;
pub mod transition;

pub use assoc::Assoc;
pub use harness::Harness;
pub use module::{AssocModule, ModuleConfig, ModuleError, ModuleEvent};
pub use partition::Partition;
pub use transition::{ShelfPose, Stage, Transition};
