//! Background image fitting and decoding.

use crate::constants;
use crate::error::Result;

/// Placement of a background image on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundFit {
    /// Left edge of the drawn image
    pub offset_x: f64,
    /// Top edge of the drawn image
    pub offset_y: f64,
    /// Drawn width
    pub width: f64,
    /// Drawn height
    pub height: f64,
}

impl BackgroundFit {
    /// Letterbox-fits an image of intrinsic size `image_w` x `image_h` onto the canvas.
    ///
    /// Images wider than tall take the full canvas width and are centered
    /// vertically; all others take the full canvas height and are centered
    /// horizontally.
    pub fn compute(image_w: f64, image_h: f64, canvas_w: f64, canvas_h: f64) -> Self {
        let aspect = image_w / image_h;
        if image_w > image_h {
            let height = canvas_w / aspect;
            Self {
                offset_x: 0.0,
                offset_y: (canvas_h - height) / 2.0,
                width: canvas_w,
                height,
            }
        } else {
            let width = canvas_h * aspect;
            Self {
                offset_x: (canvas_w - width) / 2.0,
                offset_y: 0.0,
                width,
                height: canvas_h,
            }
        }
    }

    /// Fit against the standard canvas size.
    pub fn for_canvas(image_w: u32, image_h: u32) -> Self {
        Self::compute(
            f64::from(image_w),
            f64::from(image_h),
            constants::CANVAS_WIDTH,
            constants::CANVAS_HEIGHT,
        )
    }
}

/// A loaded background image and its fixed placement.
///
/// The fit is computed once when the image loads; toggling visibility keeps it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BackgroundLayer {
    /// Intrinsic pixel width
    pub image_width: u32,
    /// Intrinsic pixel height
    pub image_height: u32,
    /// Where the image is drawn
    pub fit: BackgroundFit,
    /// Whether the image is drawn
    pub visible: bool,
}

impl BackgroundLayer {
    /// Creates a visible layer for an image of the given intrinsic size.
    pub fn new(image_width: u32, image_height: u32) -> Self {
        Self {
            image_width,
            image_height,
            fit: BackgroundFit::for_canvas(image_width, image_height),
            visible: true,
        }
    }
}

/// Decoded RGBA pixels of a background image.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Pixel width
    pub width: u32,
    /// Pixel height
    pub height: u32,
    /// Unpremultiplied RGBA8 pixels, row-major
    pub rgba: Vec<u8>,
}

/// Decodes any raster format the `image` crate recognizes.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage> {
    let img = image::load_from_memory(bytes)?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("Decoded background image {width}x{height}");
    Ok(DecodedImage {
        width,
        height,
        rgba: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_image_fits_width_and_centers_vertically() {
        let fit = BackgroundFit::compute(1600.0, 800.0, 800.0, 600.0);
        assert_eq!(
            fit,
            BackgroundFit {
                offset_x: 0.0,
                offset_y: 100.0,
                width: 800.0,
                height: 400.0,
            }
        );
    }

    #[test]
    fn tall_image_fits_height_and_centers_horizontally() {
        let fit = BackgroundFit::compute(300.0, 600.0, 800.0, 600.0);
        assert_eq!(fit.height, 600.0);
        assert_eq!(fit.width, 300.0);
        assert_eq!(fit.offset_x, 250.0);
        assert_eq!(fit.offset_y, 0.0);
    }

    #[test]
    fn square_image_takes_height_branch() {
        let fit = BackgroundFit::for_canvas(1000, 1000);
        assert_eq!(fit.width, 600.0);
        assert_eq!(fit.height, 600.0);
        assert_eq!(fit.offset_x, 100.0);
    }

    #[test]
    fn decode_png_reports_size() {
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([10, 20, 30, 255]));
        let mut bytes = Vec::new();
        img.write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        let decoded = decode_image(&bytes).unwrap();
        assert_eq!((decoded.width, decoded.height), (4, 2));
        assert_eq!(decoded.rgba.len(), 4 * 2 * 4);
        assert_eq!(&decoded.rgba[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn decode_garbage_fails() {
        assert!(decode_image(b"not an image").is_err());
    }
}
