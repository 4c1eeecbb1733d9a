use std::path::{Path, PathBuf};

use eframe::egui;
use image::{DynamicImage, ImageFormat, RgbaImage};

use crate::error::{EditorError, EditorResult};

/// Extensions offered in the open/save dialogs.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Encode `image` to `path`, picking the format from the extension. A path
/// without an extension is saved as PNG. Returns the path actually written.
pub fn save_image(image: &RgbaImage, path: &Path) -> EditorResult<PathBuf> {
    let path = if path.extension().is_none() {
        path.with_extension("png")
    } else {
        path.to_path_buf()
    };

    let encode_failure = |source| EditorError::EncodeFailure {
        path: path.clone(),
        source,
    };
    let format = ImageFormat::from_path(&path).map_err(encode_failure)?;
    let result = match format {
        // JPEG has no alpha channel
        ImageFormat::Jpeg => DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .save_with_format(&path, format),
        _ => image.save_with_format(&path, format),
    };
    result.map_err(encode_failure)?;

    log::info!("Saved {}x{} image to {}", image.width(), image.height(), path.display());
    Ok(path)
}

/// Decode an image file into RGBA pixels.
pub fn load_image(path: &Path) -> EditorResult<RgbaImage> {
    let image = image::open(path).map_err(|source| EditorError::DecodeFailure {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Opened {} ({}x{})", path.display(), image.width(), image.height());
    Ok(image.to_rgba8())
}

/// Decode an in-memory image, e.g. a file dropped on a web build.
pub fn decode_image_bytes(name: &str, bytes: &[u8]) -> EditorResult<RgbaImage> {
    let image = image::load_from_memory(bytes).map_err(|source| EditorError::DecodeFailure {
        path: PathBuf::from(name),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Check if a path looks like an image we can open, by extension
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

/// An image file dropped onto the window.
#[derive(Debug, Clone)]
pub enum DroppedImage {
    Path(PathBuf),
    Bytes { name: String, bytes: std::sync::Arc<[u8]> },
}

/// Picks up image files dropped onto the window.
#[derive(Debug, Default)]
pub struct FileHandler;

impl FileHandler {
    pub fn new() -> Self {
        Self
    }

    /// The first supported image among files dropped this frame. Other
    /// dropped files are skipped with a warning.
    pub fn take_dropped_image(&mut self, ctx: &egui::Context) -> Option<DroppedImage> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let mut found = None;
        for file in dropped {
            if found.is_some() {
                log::warn!("Only one dropped image can be opened at a time; skipping {}", file.name);
                continue;
            }
            found = Self::as_image(file);
        }
        found
    }

    fn as_image(file: egui::DroppedFile) -> Option<DroppedImage> {
        if let Some(path) = file.path {
            if is_supported_image(&path) {
                return Some(DroppedImage::Path(path));
            }
            log::warn!("Dropped file is not a supported type: {}", path.display());
            return None;
        }
        match file.bytes {
            Some(bytes) if file.mime.starts_with("image/") => Some(DroppedImage::Bytes { name: file.name, bytes }),
            _ => {
                log::warn!("Dropped file is not a supported type: {}", file.name);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("whiteboard-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_extension_defaults_to_png() {
        let image = RgbaImage::from_pixel(4, 3, Rgba([10, 20, 30, 255]));
        let written = save_image(&image, &temp_path("no-extension")).unwrap();
        assert_eq!(written.extension().unwrap(), "png");

        let loaded = load_image(&written).unwrap();
        let _ = std::fs::remove_file(&written);
        assert_eq!(loaded, image);
    }

    #[test]
    fn test_jpeg_is_written_without_alpha() {
        let image = RgbaImage::from_pixel(8, 8, Rgba([200, 0, 0, 255]));
        let path = temp_path("flat.jpg");
        save_image(&image, &path).unwrap();
        let loaded = load_image(&path).unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.dimensions(), (8, 8));
    }

    #[test]
    fn test_garbage_file_is_decode_failure() {
        let path = temp_path("garbage.png");
        std::fs::write(&path, b"definitely not a png").unwrap();
        let result = load_image(&path);
        let _ = std::fs::remove_file(&path);
        assert!(matches!(result, Err(EditorError::DecodeFailure { .. })));
    }

    #[test]
    fn test_unknown_extension_is_encode_failure() {
        let image = RgbaImage::new(2, 2);
        let result = save_image(&image, &temp_path("picture.notaformat"));
        assert!(matches!(result, Err(EditorError::EncodeFailure { .. })));
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_image(Path::new("a/b.PNG")));
        assert!(is_supported_image(Path::new("photo.jpeg")));
        assert!(!is_supported_image(Path::new("notes.txt")));
        assert!(!is_supported_image(Path::new("README")));
    }
}
