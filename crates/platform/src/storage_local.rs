//! Local filesystem screenshot storage for desktop builds.
//!
//! `LocalScreenshotStorage` implements `platform::ScreenshotStorage` using
//! `std::fs` and encodes PNG files with the `image` crate.
//! All names are resolved relative to the directory provided at construction.

use std::fs;
use std::io::BufWriter;
use std::path::PathBuf;

use embedded_graphics::{pixelcolor::Rgb888, prelude::*};
use image::{codecs::png::PngEncoder, ExtendedColorType, ImageEncoder, RgbImage};

use crate::storage::{candidate_names, FileName, ImageWriter, ScreenshotStorage, StorageStatus};

/// Error type for local filesystem operations.
#[derive(Debug)]
pub enum LocalStorageError {
    /// File could not be created or written.
    Io(std::io::Error),
    /// PNG encoding failed.
    Encode(image::ImageError),
    /// More scanlines were written than the image has rows.
    RowOverflow,
}

impl core::fmt::Display for LocalStorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "local storage error: {e}"),
            Self::Encode(e) => write!(f, "png encoding error: {e}"),
            Self::RowOverflow => write!(f, "scanline written past the last image row"),
        }
    }
}

impl std::error::Error for LocalStorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Encode(e) => Some(e),
            Self::RowOverflow => None,
        }
    }
}

/// A `platform::ScreenshotStorage` implementation backed by `std::fs`.
///
/// # Example
/// ```no_run
/// use platform::storage_local::LocalScreenshotStorage;
/// use platform::ScreenshotStorage;
/// let mut storage = LocalScreenshotStorage::new("/tmp/screens");
/// let name = storage.next_free_name("SCR_????", "PNG");
/// ```
pub struct LocalScreenshotStorage {
    root: PathBuf,
}

impl LocalScreenshotStorage {
    /// Create a new storage rooted at `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}

impl ScreenshotStorage for LocalScreenshotStorage {
    type Error = LocalStorageError;
    type Writer = PngFileWriter;

    fn status(&self) -> StorageStatus {
        if self.root.is_dir() {
            StorageStatus::Present
        } else {
            StorageStatus::Absent
        }
    }

    fn next_free_name(&mut self, pattern: &str, extension: &str) -> Option<FileName> {
        candidate_names(pattern, extension).find(|name| !self.resolve(name).exists())
    }

    fn create_image(&mut self, name: &str, size: Size) -> Result<Self::Writer, Self::Error> {
        let file = fs::File::create(self.resolve(name)).map_err(LocalStorageError::Io)?;
        Ok(PngFileWriter {
            file,
            image: RgbImage::new(size.width, size.height),
            next_row: 0,
        })
    }
}

/// Collects scanlines in memory and encodes them as PNG on [`ImageWriter::finish`].
pub struct PngFileWriter {
    file: fs::File,
    image: RgbImage,
    next_row: u32,
}

impl ImageWriter for PngFileWriter {
    type Error = LocalStorageError;

    fn write_scanline(&mut self, row: &[Rgb888]) -> Result<(), Self::Error> {
        if self.next_row >= self.image.height() {
            return Err(LocalStorageError::RowOverflow);
        }
        for (x, color) in (0..self.image.width()).zip(row) {
            self.image.put_pixel(
                x,
                self.next_row,
                image::Rgb([color.r(), color.g(), color.b()]),
            );
        }
        self.next_row = self.next_row.saturating_add(1);
        Ok(())
    }

    fn finish(self) -> Result<(), Self::Error> {
        let (width, height) = self.image.dimensions();
        PngEncoder::new(BufWriter::new(self.file))
            .write_image(self.image.as_raw(), width, height, ExtendedColorType::Rgb8)
            .map_err(LocalStorageError::Encode)
    }
}
