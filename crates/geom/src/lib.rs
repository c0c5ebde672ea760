// Procedural wire geometry: seeded Bézier centerlines swept into
// flat-shaded tube meshes. Knows nothing about the puzzle that drives it.

pub mod config;
pub mod curve;
pub mod point;
pub mod tube;
pub mod validation;
pub mod wire;

pub use config::MeshConfig;
pub use tube::MeshData;
pub use wire::{generate_wire, WireMeshes};
