//! Image file I/O on top of the `image` crate.

use std::path::Path;

use anyhow::{bail, Context, Result};
use spoofscan_core::{GrayImage, ImageView};

/// Decode `path` and convert it to 8-bit grayscale.
pub fn load_gray(path: &Path) -> Result<GrayImage> {
    if !path.exists() {
        bail!("image file doesn't exist: {}", path.display());
    }
    let decoded = image::open(path)
        .with_context(|| format!("failed to read image {}", path.display()))?
        .to_luma8();
    let (width, height) = decoded.dimensions();
    tracing::debug!(path = %path.display(), width, height, "image loaded");

    let image = GrayImage::from_raw(height as usize, width as usize, decoded.into_raw())?;
    Ok(image)
}

/// Encode `image` to `path`; the format follows the file extension.
pub fn save_gray(path: &Path, image: &GrayImage) -> Result<()> {
    let buffer = image::GrayImage::from_raw(
        image.cols() as u32,
        image.rows() as u32,
        image.as_slice().to_vec(),
    )
    .context("image buffer does not match its dimensions")?;
    buffer
        .save(path)
        .with_context(|| format!("failed to write image {}", path.display()))?;
    tracing::debug!(path = %path.display(), "image written");
    Ok(())
}

/// Fresh scratch directory under the system temp dir.
#[cfg(test)]
pub(crate) fn temp_dir(tag: &str) -> std::path::PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "spoofscan-{tag}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_rejects_missing_file() {
        let dir = temp_dir("io-missing");
        let err = load_gray(&dir.join("nope.png")).unwrap_err();
        assert!(err.to_string().contains("doesn't exist"));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn png_keeps_pixels() {
        let dir = temp_dir("io-png");
        let path = dir.join("ramp.png");
        let image = GrayImage::from_fn(5, 7, |r, c| (r * 40 + c) as u8);

        save_gray(&path, &image).unwrap();
        let loaded = load_gray(&path).unwrap();
        assert_eq!(loaded, image);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn color_input_is_converted_to_gray() {
        let dir = temp_dir("io-rgb");
        let path = dir.join("white.png");
        image::RgbImage::from_pixel(4, 3, image::Rgb([255, 255, 255]))
            .save(&path)
            .unwrap();

        let loaded = load_gray(&path).unwrap();
        assert_eq!((loaded.rows(), loaded.cols()), (3, 4));
        assert!(loaded.as_slice().iter().all(|&v| v == 255));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn undecodable_file_is_an_error() {
        let dir = temp_dir("io-garbage");
        let path = dir.join("garbage.png");
        std::fs::write(&path, b"not a png").unwrap();
        assert!(load_gray(&path).is_err());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
