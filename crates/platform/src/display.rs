//! Display abstraction layer

use embedded_graphics::{pixelcolor::Rgb888, prelude::*, primitives::Rectangle};

/// Pixel read-back from the LCD framebuffer.
///
/// The LCD controller keeps its own GRAM; read-back is used by the status bar
/// camera trigger to capture the screen one row at a time.
pub trait FrameReadback: OriginDimensions {
    /// Error type for read-back operations
    type Error: core::fmt::Debug;

    /// Read the pixels covered by `area` into `out` in row-major order.
    ///
    /// `out` must hold at least `area.size.width * area.size.height` pixels.
    fn read_pixels(&mut self, area: Rectangle, out: &mut [Rgb888]) -> Result<(), Self::Error>;
}

/// Display errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error
    Communication,
    /// Requested area lies outside the framebuffer
    OutOfBounds,
    /// Destination buffer is smaller than the requested area
    BufferTooSmall,
}

#[cfg(feature = "std")]
impl std::error::Error for DisplayError {}

impl core::fmt::Display for DisplayError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "Display communication error"),
            Self::OutOfBounds => write!(f, "Read-back area outside framebuffer"),
            Self::BufferTooSmall => write!(f, "Read-back buffer too small"),
        }
    }
}

/// Check that `area` lies inside a framebuffer of `size` and that `len`
/// pixels are enough to hold it.
pub fn check_readback(size: Size, area: Rectangle, len: usize) -> Result<(), DisplayError> {
    let screen = Rectangle::new(Point::zero(), size);
    let inside = area.size.width > 0
        && area.size.height > 0
        && screen.contains(area.top_left)
        && area
            .bottom_right()
            .is_some_and(|corner| screen.contains(corner));
    if !inside {
        return Err(DisplayError::OutOfBounds);
    }
    let needed = u64::from(area.size.width).saturating_mul(u64::from(area.size.height));
    if (len as u64) < needed {
        return Err(DisplayError::BufferTooSmall);
    }
    Ok(())
}
