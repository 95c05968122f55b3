//! Vertex skinning data and its binary codec.
//!
//! A [`Skin`] holds the per-mesh skinning arrays — used-bone list, bind-pose
//! inverse matrices, per-vertex bone indices and blend weights — in one packed
//! allocation. [`SkinCodec`] serializes it to and from the chunk layout, in
//! both the legacy and the current on-disk format.

mod codec;
mod derive;
mod format;

pub use codec::*;
pub use derive::*;
pub use format::*;

use std::fmt;

use glam::Mat4;

use crate::util::{mat4_from_rows, mat4_to_rows, Error, Result};

/// Skinning data for one geometry.
///
/// The four arrays live in a single owned buffer, carved out in fixed order:
/// used-bone ids, bind-pose inverse matrices (16-byte aligned), per-vertex
/// bone indices, per-vertex weights. Freeing the skin frees everything; the
/// sub-arrays are views and never own memory.
pub struct Skin {
    num_bones: u8,
    num_used_bones: u8,
    num_weights: u8,
    num_vertices: u32,
    /// Slots reserved for used-bone ids; `num_used_bones` may shrink below
    /// this after derivation.
    used_bones_cap: u8,
    data: Box<[u8]>,
    matrices_off: usize,
    indices_off: usize,
    weights_off: usize,
}

impl Skin {
    /// Allocate a zeroed skin for the given counts.
    ///
    /// Reserves `num_used_bones` slots for the used-bone list; pass the bone
    /// count as an upper bound when the real list will be derived later.
    pub fn new(num_bones: u8, num_used_bones: u8, num_vertices: u32) -> Self {
        let nb = num_bones as usize;
        let nu = num_used_bones as usize;
        let nv = num_vertices as usize;

        let size = nu
            + nb * MATRIX_SIZE
            + nv * (VERTEX_INDICES_SIZE + VERTEX_WEIGHTS_SIZE)
            + (MATRIX_ALIGN - 1);
        let data = vec![0u8; size].into_boxed_slice();

        // Carve sub-arrays with a running cursor. Only the matrix array has an
        // alignment requirement; the trailing slack absorbs the rounding.
        let base = data.as_ptr() as usize;
        let mut cursor = nu;
        cursor += (MATRIX_ALIGN - (base + cursor) % MATRIX_ALIGN) % MATRIX_ALIGN;
        let matrices_off = cursor;
        cursor += nb * MATRIX_SIZE;
        let indices_off = cursor;
        cursor += nv * VERTEX_INDICES_SIZE;
        let weights_off = cursor;

        Self {
            num_bones,
            num_used_bones,
            num_weights: 1,
            num_vertices,
            used_bones_cap: num_used_bones,
            data,
            matrices_off,
            indices_off,
            weights_off,
        }
    }

    /// Build a skin from caller-supplied vertex data and bind-pose matrices,
    /// deriving the influence count and used-bone list.
    pub fn from_arrays(
        num_bones: u8,
        indices: &[[u8; 4]],
        weights: &[[f32; 4]],
        inverse_matrices: &[Mat4],
    ) -> Result<Self> {
        if indices.len() != weights.len() {
            return Err(Error::invalid(format!(
                "index/weight count mismatch: {} vs {}",
                indices.len(),
                weights.len()
            )));
        }
        if inverse_matrices.len() != num_bones as usize {
            return Err(Error::invalid(format!(
                "expected {} inverse matrices, got {}",
                num_bones,
                inverse_matrices.len()
            )));
        }

        let num_vertices = u32::try_from(indices.len())
            .map_err(|_| Error::invalid("vertex count exceeds u32"))?;

        let mut skin = Skin::new(num_bones, num_bones, num_vertices);
        skin.indices_mut().copy_from_slice(indices);
        skin.weights_mut().copy_from_slice(weights);
        for (i, m) in inverse_matrices.iter().enumerate() {
            skin.set_inverse_matrix(i, m);
        }
        skin.find_num_weights();
        skin.find_used_bones();
        Ok(skin)
    }

    /// Total skeleton bone count.
    #[inline]
    pub fn num_bones(&self) -> u8 {
        self.num_bones
    }

    /// Bones actually referenced by this mesh.
    #[inline]
    pub fn num_used_bones(&self) -> u8 {
        self.num_used_bones
    }

    /// Maximum simultaneous bone influences per vertex, in `[1, 4]`.
    #[inline]
    pub fn num_weights(&self) -> u8 {
        self.num_weights
    }

    /// Number of vertices the per-vertex arrays cover.
    #[inline]
    pub fn num_vertices(&self) -> u32 {
        self.num_vertices
    }

    /// Set the influence count. Meaningful values are `[1, 4]`.
    pub fn set_num_weights(&mut self, num_weights: u8) {
        self.num_weights = num_weights;
    }

    /// Used-bone ids, ascending and deduplicated. Empty when none are used.
    pub fn used_bones(&self) -> &[u8] {
        &self.data[..self.num_used_bones as usize]
    }

    /// Mutable used-bone ids.
    pub fn used_bones_mut(&mut self) -> &mut [u8] {
        &mut self.data[..self.num_used_bones as usize]
    }

    /// Bind-pose inverse matrices as row-major floats, 16 per bone.
    pub fn inverse_matrices(&self) -> &[f32] {
        let len = self.num_bones as usize * MATRIX_SIZE;
        bytemuck::cast_slice(&self.data[self.matrices_off..self.matrices_off + len])
    }

    /// Mutable bind-pose inverse matrices.
    pub fn inverse_matrices_mut(&mut self) -> &mut [f32] {
        let len = self.num_bones as usize * MATRIX_SIZE;
        bytemuck::cast_slice_mut(&mut self.data[self.matrices_off..self.matrices_off + len])
    }

    /// One bone's bind-pose inverse matrix.
    pub fn inverse_matrix(&self, bone: usize) -> Mat4 {
        let mut rows = [0.0f32; 16];
        rows.copy_from_slice(&self.inverse_matrices()[bone * 16..bone * 16 + 16]);
        mat4_from_rows(&rows)
    }

    /// Store one bone's bind-pose inverse matrix.
    pub fn set_inverse_matrix(&mut self, bone: usize, matrix: &Mat4) {
        self.inverse_matrices_mut()[bone * 16..bone * 16 + 16]
            .copy_from_slice(&mat4_to_rows(matrix));
    }

    /// Per-vertex bone indices. Empty when the geometry has no vertices.
    pub fn indices(&self) -> &[[u8; 4]] {
        let len = self.num_vertices as usize * VERTEX_INDICES_SIZE;
        bytemuck::cast_slice(&self.data[self.indices_off..self.indices_off + len])
    }

    /// Mutable per-vertex bone indices.
    pub fn indices_mut(&mut self) -> &mut [[u8; 4]] {
        let len = self.num_vertices as usize * VERTEX_INDICES_SIZE;
        bytemuck::cast_slice_mut(&mut self.data[self.indices_off..self.indices_off + len])
    }

    /// Per-vertex blend weights, zero-padded beyond `num_weights`. Empty when
    /// the geometry has no vertices.
    pub fn weights(&self) -> &[[f32; 4]] {
        let len = self.num_vertices as usize * VERTEX_WEIGHTS_SIZE;
        bytemuck::cast_slice(&self.data[self.weights_off..self.weights_off + len])
    }

    /// Mutable per-vertex blend weights.
    pub fn weights_mut(&mut self) -> &mut [[f32; 4]] {
        let len = self.num_vertices as usize * VERTEX_WEIGHTS_SIZE;
        bytemuck::cast_slice_mut(&mut self.data[self.weights_off..self.weights_off + len])
    }

    /// Deep-copy this skin into a fresh allocation.
    ///
    /// Offsets are recomputed for the new buffer, so the arrays are copied
    /// individually rather than cloning the raw bytes.
    pub fn duplicate(&self) -> Skin {
        let mut copy = Skin::new(self.num_bones, self.used_bones_cap, self.num_vertices);
        copy.num_used_bones = self.num_used_bones;
        copy.num_weights = self.num_weights;
        copy.used_bones_mut().copy_from_slice(self.used_bones());
        copy.inverse_matrices_mut()
            .copy_from_slice(self.inverse_matrices());
        copy.indices_mut().copy_from_slice(self.indices());
        copy.weights_mut().copy_from_slice(self.weights());
        copy
    }
}

impl fmt::Debug for Skin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skin")
            .field("num_bones", &self.num_bones)
            .field("num_used_bones", &self.num_used_bones)
            .field("num_weights", &self.num_weights)
            .field("num_vertices", &self.num_vertices)
            .finish_non_exhaustive()
    }
}

impl PartialEq for Skin {
    fn eq(&self, other: &Self) -> bool {
        self.num_bones == other.num_bones
            && self.num_used_bones == other.num_used_bones
            && self.num_weights == other.num_weights
            && self.num_vertices == other.num_vertices
            && self.used_bones() == other.used_bones()
            && self.inverse_matrices() == other.inverse_matrices()
            && self.indices() == other.indices()
            && self.weights() == other.weights()
    }
}
