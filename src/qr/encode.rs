//! QR symbol encoding: URL string to module matrix.

use qrcode::{EcLevel, QrCode};

use crate::error::OpinarError;

/// Quiet zone width in modules, applied on every side.
pub const QUIET_ZONE: usize = 4;

/// A square grid of dark/light QR modules, quiet zone included.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    side: usize,
    modules: Vec<bool>,
}

impl ModuleMatrix {
    /// Side length in modules, quiet zone included.
    pub fn side(&self) -> usize {
        self.side
    }

    /// Whether the module at (x, y) is dark.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the matrix.
    pub fn get(&self, x: usize, y: usize) -> bool {
        assert!(x < self.side && y < self.side, "module out of bounds");
        self.modules[y * self.side + x]
    }
}

/// Encode a URL into a module matrix at error correction level M.
///
/// The smallest symbol version that fits the payload is selected
/// automatically. Fails when the payload exceeds the capacity of the
/// largest symbol version.
pub fn encode(url: &str) -> Result<ModuleMatrix, OpinarError> {
    let code = QrCode::with_error_correction_level(url, EcLevel::M).map_err(|e| {
        OpinarError::Encoding(format!("cannot encode {} byte payload: {}", url.len(), e))
    })?;

    let width = code.width();
    let side = width + 2 * QUIET_ZONE;
    let mut modules = vec![false; side * side];

    for y in 0..width {
        for x in 0..width {
            if code[(x, y)] == qrcode::Color::Dark {
                modules[(y + QUIET_ZONE) * side + (x + QUIET_ZONE)] = true;
            }
        }
    }

    Ok(ModuleMatrix { side, modules })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Check the 7x7 finder pattern whose top-left module sits at (x, y):
    /// dark outer ring, light inner ring, dark 3x3 core.
    fn has_finder_pattern(matrix: &ModuleMatrix, x: usize, y: usize) -> bool {
        for dy in 0..7 {
            for dx in 0..7 {
                let on_outer_ring = dx == 0 || dx == 6 || dy == 0 || dy == 6;
                let in_core = (2..=4).contains(&dx) && (2..=4).contains(&dy);
                let expected = on_outer_ring || in_core;
                if matrix.get(x + dx, y + dy) != expected {
                    return false;
                }
            }
        }
        true
    }

    #[test]
    fn test_encode_is_square() {
        let matrix = encode("http://x/form/DEMO123").unwrap();
        assert!(matrix.side() > 0);
        assert_eq!(matrix.modules.len(), matrix.side() * matrix.side());
    }

    #[test]
    fn test_finder_patterns_at_three_corners() {
        let matrix = encode("http://x/form/DEMO123").unwrap();
        let far = matrix.side() - QUIET_ZONE - 7;

        assert!(has_finder_pattern(&matrix, QUIET_ZONE, QUIET_ZONE));
        assert!(has_finder_pattern(&matrix, far, QUIET_ZONE));
        assert!(has_finder_pattern(&matrix, QUIET_ZONE, far));
    }

    #[test]
    fn test_quiet_zone_is_light() {
        let matrix = encode("hello").unwrap();
        let side = matrix.side();

        for i in 0..side {
            for b in 0..QUIET_ZONE {
                assert!(!matrix.get(i, b), "top border module at ({}, {})", i, b);
                assert!(!matrix.get(b, i), "left border module at ({}, {})", b, i);
                assert!(!matrix.get(i, side - 1 - b), "bottom border");
                assert!(!matrix.get(side - 1 - b, i), "right border");
            }
        }
    }

    #[test]
    fn test_longer_payload_needs_larger_symbol() {
        let short = encode("http://x/f/A").unwrap();
        let long = encode(&format!("http://x/form/{}", "A".repeat(200))).unwrap();
        assert!(long.side() > short.side());
    }

    #[test]
    fn test_payload_over_capacity_is_rejected() {
        // Version 40 at level M holds ~2300 bytes; 8000 cannot fit.
        let result = encode(&"x".repeat(8000));
        assert!(matches!(result, Err(OpinarError::Encoding(_))));
    }

    #[test]
    fn test_utf8_payload() {
        let matrix = encode("http://x/form/ñandú?q=日本語").unwrap();
        assert!(matrix.side() > 2 * QUIET_ZONE);
    }
}
