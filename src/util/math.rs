//! Math type re-exports and wire-layout conversions.
//!
//! Bind-pose matrices are stored row-major on the wire; `glam` matrices are
//! column-major. These helpers convert between the two.

pub use glam::{Mat4, Vec3, Vec4};

/// Build a matrix from 16 row-major floats (the wire layout).
#[inline]
pub fn mat4_from_rows(rows: &[f32; 16]) -> Mat4 {
    Mat4::from_cols_array(rows).transpose()
}

/// Flatten a matrix into 16 row-major floats (the wire layout).
#[inline]
pub fn mat4_to_rows(m: &Mat4) -> [f32; 16] {
    m.transpose().to_cols_array()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_round_trip() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let rows = mat4_to_rows(&m);
        assert_eq!(mat4_from_rows(&rows), m);
    }

    #[test]
    fn test_translation_in_last_row() {
        // Row-major layout keeps the translation in the fourth row.
        let m = Mat4::from_translation(Vec3::new(5.0, 6.0, 7.0));
        let rows = mat4_to_rows(&m);
        assert_eq!(&rows[12..15], &[5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_identity_rows() {
        let rows = mat4_to_rows(&Mat4::IDENTITY);
        assert_eq!(rows[0], 1.0);
        assert_eq!(rows[5], 1.0);
        assert_eq!(rows[10], 1.0);
        assert_eq!(rows[15], 1.0);
    }
}
