//! Reconstruction of skin metadata from raw vertex data.
//!
//! Old-format streams store neither the influence count nor the used-bone
//! list; both are derived from the per-vertex arrays after reading. The
//! derivations are pure and total over well-formed arrays.

use super::{Skin, MAX_WEIGHTS_PER_VERTEX};

/// Influence count of a single weight tuple: one plus the number of
/// consecutive nonzero slots after the first, capped at
/// [`MAX_WEIGHTS_PER_VERTEX`].
///
/// A weight of exactly 0.0 terminates the run regardless of its paired bone
/// index, so sparse weight tuples with interior zeros are over-approximated
/// by the leading run only.
pub fn vertex_weight_count(weights: &[f32; 4]) -> u8 {
    let mut count = 1;
    while count < MAX_WEIGHTS_PER_VERTEX && weights[count] != 0.0 {
        count += 1;
    }
    count as u8
}

impl Skin {
    /// Derive `num_weights` as the maximum influence count over all vertices.
    ///
    /// Yields 1 for a mesh with no vertices; early-exits once the cap is
    /// reached.
    pub fn find_num_weights(&mut self) {
        let mut num_weights = 1u8;
        for weights in self.weights() {
            num_weights = num_weights.max(vertex_weight_count(weights));
            if num_weights as usize == MAX_WEIGHTS_PER_VERTEX {
                break;
            }
        }
        self.num_weights = num_weights;
    }

    /// Derive the used-bone list: every bone id carrying a nonzero weight in
    /// some vertex's first `num_weights` slots, collected in ascending order.
    ///
    /// Rewrites the used-bone prefix of the packed buffer in place; the
    /// allocation reserved an upper bound of slots, and ids found beyond that
    /// bound (malformed input) are dropped.
    pub fn find_used_bones(&mut self) {
        let mut present = [false; 256];
        let num_weights = self.num_weights as usize;
        for (indices, weights) in self.indices().iter().zip(self.weights()) {
            for slot in 0..num_weights {
                if weights[slot] != 0.0 {
                    present[indices[slot] as usize] = true;
                }
            }
        }

        let cap = self.used_bones_cap as usize;
        let mut count = 0;
        for (id, _) in present.iter().enumerate().filter(|(_, &p)| p) {
            if count == cap {
                break;
            }
            self.data[count] = id as u8;
            count += 1;
        }
        self.num_used_bones = count as u8;
    }
}
