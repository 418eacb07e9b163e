//! Importing outside content onto the board: dropped images and text
//! documents become elements placed near the current view.

use crate::camera::Camera;
use crate::elements::{
    ContentBoxElement, ContentKind, DEFAULT_CONTENT_BOX_HEIGHT, DEFAULT_CONTENT_BOX_WIDTH,
    ImageElement,
};
use kurbo::{Point, Rect, Size};

/// Screen offset from the viewport's top-left where imports land.
pub const IMPORT_OFFSET: f64 = 50.0;
/// Largest dimension an imported image is displayed at (virtual units).
pub const MAX_IMPORT_IMAGE_SIZE: f64 = 400.0;

/// Virtual position where a newly imported element is placed.
pub fn import_position(camera: &Camera) -> Point {
    camera.to_virtual(Point::new(IMPORT_OFFSET, IMPORT_OFFSET))
}

/// Build an image element for a dropped/pasted image, scaled down to fit
/// [`MAX_IMPORT_IMAGE_SIZE`] while keeping its aspect ratio. Degenerate
/// intrinsic dimensions fall back to a unit square at maximum size.
pub fn imported_image(
    camera: &Camera,
    source: impl Into<String>,
    natural_width: f64,
    natural_height: f64,
) -> ImageElement {
    let (width, height) = if natural_width <= 0.0 || natural_height <= 0.0 {
        (MAX_IMPORT_IMAGE_SIZE, MAX_IMPORT_IMAGE_SIZE)
    } else {
        let scale = (MAX_IMPORT_IMAGE_SIZE / natural_width)
            .min(MAX_IMPORT_IMAGE_SIZE / natural_height)
            .min(1.0);
        (natural_width * scale, natural_height * scale)
    };
    let rect = Rect::from_origin_size(import_position(camera), Size::new(width, height));
    ImageElement::new(rect, source, natural_width, natural_height)
}

/// Build a content box for a dropped text document. The kind is derived
/// from the filename extension, defaulting to plaintext.
pub fn imported_document(
    camera: &Camera,
    filename: impl Into<String>,
    body: impl Into<String>,
) -> ContentBoxElement {
    let filename = filename.into();
    let kind = filename
        .rfind('.')
        .and_then(|dot| ContentKind::from_extension(&filename[dot..]))
        .unwrap_or_default();
    let rect = Rect::from_origin_size(
        import_position(camera),
        Size::new(DEFAULT_CONTENT_BOX_WIDTH, DEFAULT_CONTENT_BOX_HEIGHT),
    );
    let mut element = ContentBoxElement::document(rect, kind, body);
    element.filename = Some(filename);
    element
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_position_tracks_camera() {
        let mut camera = Camera::new();
        assert_eq!(import_position(&camera), Point::new(50.0, 50.0));

        camera.origin = Point::new(1000.0, 2000.0);
        camera.zoom = 2.0;
        assert_eq!(import_position(&camera), Point::new(1025.0, 2025.0));
    }

    #[test]
    fn test_large_image_scaled_to_fit() {
        let image = imported_image(&Camera::new(), "asset:photo", 1600.0, 800.0);
        assert!((image.rect.width() - 400.0).abs() < 1e-9);
        assert!((image.rect.height() - 200.0).abs() < 1e-9);
        // Intrinsic dimensions are kept for later aspect-preserving resizes
        assert_eq!(image.natural_width, 1600.0);
        assert!((image.aspect_ratio() - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_small_image_not_upscaled() {
        let image = imported_image(&Camera::new(), "asset:icon", 64.0, 64.0);
        assert!((image.rect.width() - 64.0).abs() < 1e-9);
    }

    #[test]
    fn test_document_kind_from_filename() {
        let doc = imported_document(&Camera::new(), "notes.md", "# Title");
        assert_eq!(doc.kind, ContentKind::Markdown);
        assert_eq!(doc.filename.as_deref(), Some("notes.md"));
        assert_eq!(doc.body, "# Title");

        let plain = imported_document(&Camera::new(), "README", "hello");
        assert_eq!(plain.kind, ContentKind::Plaintext);
    }
}
