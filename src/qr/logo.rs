//! Logo decoding and centered overlay compositing.

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::{
    DynamicImage, RgbaImage,
    imageops::{self, FilterType},
};

/// Largest fraction of the raster a logo may cover per axis.
const LOGO_FRACTION: u32 = 4;

/// Paste a caller-supplied logo centered on the raster.
///
/// `logo_data` is a `data:<mime>;base64,<payload>` string. The decoded image
/// is resized to a square of `min(width, height) / 4` (aspect ratio not
/// preserved) and its pixels replace the underlying region wholesale.
///
/// Decode failure is non-fatal: the raster is left untouched so the request
/// still produces a plain, scannable code.
pub fn composite(raster: &mut RgbaImage, logo_data: &str) {
    let logo = match decode_data_uri(logo_data) {
        Ok(logo) => logo,
        Err(e) => {
            eprintln!("[qr] logo skipped: {}", e);
            return;
        }
    };

    let size = raster.width().min(raster.height()) / LOGO_FRACTION;
    if size == 0 {
        return;
    }

    let resized = logo.resize_exact(size, size, FilterType::Triangle).to_rgba8();
    let x = (raster.width() - size) / 2;
    let y = (raster.height() - size) / 2;
    imageops::replace(raster, &resized, i64::from(x), i64::from(y));
}

/// Strip the data-URI metadata prefix and decode the Base64 payload into an
/// image.
fn decode_data_uri(data: &str) -> Result<DynamicImage, String> {
    let payload = data
        .split_once(',')
        .map(|(_, payload)| payload)
        .ok_or("missing data URI prefix")?;

    let bytes = STANDARD
        .decode(payload)
        .map_err(|e| format!("Base64 decode failed: {}", e))?;

    image::load_from_memory(&bytes).map_err(|e| format!("image decode failed: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qr::{encode, render};
    use image::{ImageFormat, Rgba};
    use pretty_assertions::{assert_eq, assert_ne};
    use std::io::Cursor;

    /// Encode a solid-color square as a PNG data URI.
    fn logo_data_uri(width: u32, height: u32, color: Rgba<u8>) -> String {
        let img = RgbaImage::from_pixel(width, height, color);
        let mut png = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .unwrap();
        format!("data:image/png;base64,{}", STANDARD.encode(&png))
    }

    fn test_raster() -> RgbaImage {
        let matrix = encode::encode("http://x/form/DEMO123").unwrap();
        render::rasterize(&matrix, render::MODULE_SCALE)
    }

    #[test]
    fn test_logo_is_pasted_centered() {
        let red = Rgba([255, 0, 0, 255]);
        let mut raster = test_raster();
        composite(&mut raster, &logo_data_uri(50, 50, red));

        let cx = raster.width() / 2;
        let cy = raster.height() / 2;
        assert_eq!(*raster.get_pixel(cx, cy), red);

        // Corners stay untouched (quiet zone is white).
        assert_eq!(*raster.get_pixel(0, 0), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn test_oversized_logo_is_capped_to_quarter() {
        let red = Rgba([255, 0, 0, 255]);
        let mut raster = test_raster();
        let big = raster.width() * 2;
        composite(&mut raster, &logo_data_uri(big, big, red));

        let size = raster.width() / LOGO_FRACTION;
        let x0 = (raster.width() - size) / 2;
        let y0 = (raster.height() - size) / 2;

        // Inside the pasted square: logo pixels.
        assert_eq!(*raster.get_pixel(x0, y0), red);
        assert_eq!(*raster.get_pixel(x0 + size - 1, y0 + size - 1), red);

        // Just outside: no logo pixel.
        assert_ne!(*raster.get_pixel(x0 - 1, y0 - 1), red);
        assert_ne!(*raster.get_pixel(x0 + size, y0 + size), red);
    }

    #[test]
    fn test_malformed_payload_leaves_raster_unchanged() {
        let mut raster = test_raster();
        let before = raster.clone();

        composite(&mut raster, "not-base64");
        assert_eq!(before.as_raw(), raster.as_raw());

        composite(&mut raster, "data:image/png;base64,%%%%");
        assert_eq!(before.as_raw(), raster.as_raw());
    }

    #[test]
    fn test_valid_base64_but_not_an_image() {
        let mut raster = test_raster();
        let before = raster.clone();

        let not_image = format!("data:image/png;base64,{}", STANDARD.encode(b"hello"));
        composite(&mut raster, &not_image);
        assert_eq!(before.as_raw(), raster.as_raw());
    }

    #[test]
    fn test_logo_pixels_replace_region_wholesale() {
        // A fully transparent logo still replaces the region; the logo's own
        // alpha channel is carried verbatim.
        let clear = Rgba([0, 0, 0, 0]);
        let mut raster = test_raster();
        composite(&mut raster, &logo_data_uri(40, 40, clear));

        let cx = raster.width() / 2;
        let cy = raster.height() / 2;
        assert_eq!(*raster.get_pixel(cx, cy), clear);
    }
}
