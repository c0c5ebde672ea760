//! Mesh validation utilities.
//!
//! `MeshValidator` checks the structural properties every generated wire
//! mesh must have: stride, identity indices, finite floats, non-zero
//! normals, plausible bounds.

use glam::DVec3;

use crate::tube::MeshData;

/// Validator for `MeshData` integrity checks.
pub struct MeshValidator<'a> {
    mesh: &'a MeshData,
}

impl<'a> MeshValidator<'a> {
    pub fn new(mesh: &'a MeshData) -> Self {
        Self { mesh }
    }

    /// Check that the vertex buffer length is a multiple of 6 (the stride).
    pub fn is_stride_valid(&self) -> bool {
        self.mesh.vertices.len() % 6 == 0
    }

    /// Check that the index buffer length is a multiple of 3.
    pub fn is_index_stride_valid(&self) -> bool {
        self.mesh.indices.len() % 3 == 0
    }

    /// Flat-shaded meshes never share vertices, so the index buffer must be
    /// the identity over the vertex range.
    pub fn has_identity_indices(&self) -> bool {
        self.mesh.indices.len() == self.mesh.vertex_count()
            && self.mesh.indices.iter().enumerate().all(|(i, &ix)| ix as usize == i)
    }

    /// Check that every float in the vertex buffer is finite.
    pub fn is_finite(&self) -> bool {
        self.mesh.vertices.iter().all(|f| f.is_finite())
    }

    /// Check that no vertex carries a zero-length normal.
    pub fn has_nonzero_normals(&self) -> bool {
        (0..self.mesh.vertex_count()).all(|i| {
            let base = i * 6;
            let n = &self.mesh.vertices[base + 3..base + 6];
            n[0] != 0.0 || n[1] != 0.0 || n[2] != 0.0
        })
    }

    /// Axis-aligned bounding box over the vertex positions.
    pub fn aabb(&self) -> (DVec3, DVec3) {
        let mut min = DVec3::splat(f64::INFINITY);
        let mut max = DVec3::splat(f64::NEG_INFINITY);
        for i in 0..self.mesh.vertex_count() {
            let base = i * 6;
            let p = DVec3::new(
                self.mesh.vertices[base] as f64,
                self.mesh.vertices[base + 1] as f64,
                self.mesh.vertices[base + 2] as f64,
            );
            min = min.min(p);
            max = max.max(p);
        }
        (min, max)
    }

    /// Dimensions (width, height, depth) of the bounding box.
    pub fn dimensions(&self) -> DVec3 {
        let (min, max) = self.aabb();
        max - min
    }

    /// Run all checks and return a list of error messages. An empty list
    /// means the mesh is valid.
    pub fn validate_all(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.is_stride_valid() {
            errors.push(format!(
                "vertex buffer length {} is not a multiple of 6",
                self.mesh.vertices.len()
            ));
        }
        if !self.is_index_stride_valid() {
            errors.push(format!(
                "index buffer length {} is not a multiple of 3",
                self.mesh.indices.len()
            ));
        }
        if !self.has_identity_indices() {
            errors.push(format!(
                "index buffer is not the identity over {} vertices",
                self.mesh.vertex_count()
            ));
        }
        if !self.is_finite() {
            errors.push("vertex buffer contains non-finite floats".to_string());
        }
        if self.mesh.vertex_count() > 0 && !self.has_nonzero_normals() {
            errors.push("some vertex normals are zero".to_string());
        }

        errors
    }
}
