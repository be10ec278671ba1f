use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use ink_core::frame::FrameBuffer;
use ink_core::traits::Source;

/// Source d'image statique. Retourne toujours la même frame intacte.
///
/// # Example
/// ```no_run
/// use ink_source::image::ImageSource;
/// use std::path::Path;
/// let source = ImageSource::new(Path::new("photo.png")).unwrap();
/// ```
pub struct ImageSource {
    frame: Arc<FrameBuffer>,
}

impl ImageSource {
    /// Load an image from disk and create a source.
    ///
    /// # Errors
    /// Returns an error if the image cannot be loaded.
    pub fn new(path: &Path) -> Result<Self> {
        Ok(Self {
            frame: Arc::new(load_image(path)?),
        })
    }

    /// Wrap an already decoded frame.
    #[must_use]
    pub fn from_frame(frame: FrameBuffer) -> Self {
        Self {
            frame: Arc::new(frame),
        }
    }
}

impl Source for ImageSource {
    fn frame(&self) -> Arc<FrameBuffer> {
        Arc::clone(&self.frame)
    }
}

/// Décode un fichier image (PNG, JPEG, BMP, GIF) en RGBA.
///
/// # Errors
/// Returns an error if the file cannot be read or decoded.
pub fn load_image(path: &Path) -> Result<FrameBuffer> {
    let img = image::open(path).with_context(|| format!("Impossible de charger {}", path.display()))?;
    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();
    log::info!("Image chargée : {} ({width}×{height})", path.display());
    FrameBuffer::from_raw(width, height, rgba.into_raw())
        .with_context(|| format!("Buffer invalide pour {}", path.display()))
}

/// Encode un buffer traité en PNG RGBA (le fond reste transparent).
///
/// # Errors
/// Returns an error if the buffer is inconsistent or the file cannot be written.
pub fn save_png(frame: &FrameBuffer, path: &Path) -> Result<()> {
    let img = image::RgbaImage::from_raw(frame.width, frame.height, frame.data.clone())
        .with_context(|| {
            format!(
                "Dimensions incohérentes {}×{} pour {} octets",
                frame.width,
                frame.height,
                frame.data.len()
            )
        })?;
    img.save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Impossible d'écrire {}", path.display()))?;
    log::info!("PNG écrit : {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_preserves_ink_and_transparency() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.png");

        let mut frame = FrameBuffer::new(3, 2);
        frame.set_pixel(0, 0, [0, 0, 0, 255]);
        frame.set_pixel(2, 1, [0, 0, 0, 255]);
        save_png(&frame, &path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, frame);
        assert_eq!(loaded.ink_count(), 2);
    }

    #[test]
    fn source_hands_out_the_same_frame() {
        let source = ImageSource::from_frame(FrameBuffer::filled(2, 2, [1, 2, 3, 255]));
        assert!(Arc::ptr_eq(&source.frame(), &source.frame()));
        assert_eq!((source.frame().width, source.frame().height), (2, 2));
    }

    #[test]
    fn missing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_image(&dir.path().join("absent.png")).is_err());
    }
}
