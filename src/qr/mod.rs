//! # QR Code Pipeline
//!
//! Turns a form URL into an embeddable PNG data URI in four stages:
//!
//! 1. **Encode** - URL string to a square matrix of dark/light modules
//!    ([`encode`])
//! 2. **Rasterize** - module matrix to an RGBA bitmap ([`render`])
//! 3. **Composite** - optional caller-supplied logo pasted over the center
//!    ([`logo`])
//! 4. **Serialize** - PNG bytes wrapped in a Base64 data URI
//!
//! The pipeline is stateless and single-pass: nothing is cached or persisted
//! between invocations. A logo that fails to decode is skipped so the caller
//! always gets a scannable code back.

pub mod encode;
pub mod logo;
pub mod render;

use base64::{Engine as _, engine::general_purpose::STANDARD};
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};

use crate::error::OpinarError;

pub use encode::{ModuleMatrix, QUIET_ZONE};
pub use render::MODULE_SCALE;

/// MIME marker prefixed to the Base64 PNG payload.
pub const DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Generate a QR code for `url` as a PNG data URI.
///
/// `logo_data`, if present, is itself a data URI whose decoded image is
/// resized and pasted over the center of the code.
pub fn generate(url: &str, logo_data: Option<&str>) -> Result<String, OpinarError> {
    let matrix = encode::encode(url)?;
    let mut raster = render::rasterize(&matrix, render::MODULE_SCALE);

    if let Some(data) = logo_data {
        logo::composite(&mut raster, data);
    }

    to_data_uri(&raster)
}

/// Serialize a raster to PNG and wrap it in a Base64 data URI.
pub fn to_data_uri(raster: &RgbaImage) -> Result<String, OpinarError> {
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(
            raster.as_raw(),
            raster.width(),
            raster.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| OpinarError::Image(format!("PNG serialization failed: {}", e)))?;

    Ok(format!("{}{}", DATA_URI_PREFIX, STANDARD.encode(&png)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_generate_returns_data_uri() {
        let uri = generate("http://x/form/DEMO123", None).unwrap();
        assert!(uri.starts_with(DATA_URI_PREFIX));
    }

    #[test]
    fn test_output_round_trips_to_png() {
        let uri = generate("http://x/form/DEMO123", None).unwrap();
        let payload = uri.strip_prefix(DATA_URI_PREFIX).unwrap();
        let png = STANDARD.decode(payload).unwrap();
        let img = image::load_from_memory(&png).unwrap();

        let matrix = encode::encode("http://x/form/DEMO123").unwrap();
        let expected = matrix.side() as u32 * MODULE_SCALE;
        assert_eq!(img.width(), expected);
        assert_eq!(img.height(), expected);
    }

    #[test]
    fn test_no_logo_is_identical_to_skipping_composition() {
        let with_none = generate("http://x/form/DEMO123", None).unwrap();

        let matrix = encode::encode("http://x/form/DEMO123").unwrap();
        let raster = render::rasterize(&matrix, MODULE_SCALE);
        let skipped = to_data_uri(&raster).unwrap();

        assert_eq!(with_none, skipped);
    }

    #[test]
    fn test_malformed_logo_still_succeeds() {
        let plain = generate("http://x/form/DEMO123", None).unwrap();
        let with_bad_logo = generate("http://x/form/DEMO123", Some("not-base64")).unwrap();
        assert_eq!(plain, with_bad_logo);
    }

    #[test]
    fn test_oversized_payload_fails() {
        let url = "x".repeat(8000);
        let result = generate(&url, None);
        assert!(matches!(result, Err(OpinarError::Encoding(_))));
    }
}
