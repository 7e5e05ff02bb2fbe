//! Rasterization of a module matrix into an RGBA bitmap.

use image::{Rgba, RgbaImage};

use super::encode::ModuleMatrix;

/// Default block size: pixels per module.
pub const MODULE_SCALE: u32 = 10;

const DARK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const LIGHT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Render each module as an axis-aligned `scale`x`scale` block of uniform
/// color. No anti-aliasing; identical input always yields an identical
/// raster.
pub fn rasterize(matrix: &ModuleMatrix, scale: u32) -> RgbaImage {
    let side = matrix.side() as u32;
    let mut img = RgbaImage::from_pixel(side * scale, side * scale, LIGHT);

    for my in 0..matrix.side() {
        for mx in 0..matrix.side() {
            if matrix.get(mx, my) {
                for dy in 0..scale {
                    for dx in 0..scale {
                        img.put_pixel(mx as u32 * scale + dx, my as u32 * scale + dy, DARK);
                    }
                }
            }
        }
    }

    img
}
