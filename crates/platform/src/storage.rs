//! Screenshot storage abstraction
//!
//! Two collaborators back the status bar camera trigger: a storage that hands
//! out the next unused file name for a pattern and creates image files, and
//! the image writer it returns, which accepts one scanline at a time.

use embedded_graphics::{pixelcolor::Rgb888, prelude::Size};

/// Bounded file name (`SCR_0042.PNG` and similar 8.3 names)
pub type FileName = heapless::String<32>;

/// Whether the screenshot medium is available
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageStatus {
    /// Card inserted and mounted
    Present,
    /// No card, or it could not be mounted
    Absent,
}

impl StorageStatus {
    /// `true` for [`StorageStatus::Present`]
    pub fn is_present(self) -> bool {
        self == Self::Present
    }

    /// Short label for logs
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Present => "present",
            Self::Absent => "absent",
        }
    }
}

/// Storage able to allocate screenshot names and create image files
pub trait ScreenshotStorage {
    /// Error type
    type Error: core::fmt::Debug;
    /// Writer returned by [`ScreenshotStorage::create_image`]
    type Writer: ImageWriter;

    /// Current state of the medium. Polled by the status bar indicator.
    fn status(&self) -> StorageStatus;

    /// Return the first name matching `pattern` (every `?` is a decimal digit)
    /// with `extension` appended that does not exist yet.
    ///
    /// Returns `None` when every candidate is taken.
    fn next_free_name(&mut self, pattern: &str, extension: &str) -> Option<FileName>;

    /// Create a new image file of `size` pixels.
    fn create_image(&mut self, name: &str, size: Size) -> Result<Self::Writer, Self::Error>;
}

/// Streaming image encoder fed from the top row down
pub trait ImageWriter {
    /// Error type
    type Error: core::fmt::Debug;

    /// Append one row of pixels.
    fn write_scanline(&mut self, row: &[Rgb888]) -> Result<(), Self::Error>;

    /// Flush and close the file.
    fn finish(self) -> Result<(), Self::Error>;
}

/// Build the `index`-th candidate name for `pattern`.
///
/// Wildcards are filled with the zero-padded decimal digits of `index`, most
/// significant first. Returns `None` once `index` no longer fits in the
/// available wildcards or the name exceeds [`FileName`] capacity.
pub fn candidate_name(pattern: &str, extension: &str, index: u32) -> Option<FileName> {
    let wildcards = u32::try_from(pattern.chars().filter(|&c| c == '?').count()).ok()?;
    let limit = 10u32.checked_pow(wildcards)?;
    if index >= limit {
        return None;
    }

    let mut name = FileName::new();
    let mut divisor = limit.checked_div(10)?;
    for c in pattern.chars() {
        if c == '?' {
            let digit = index.checked_div(divisor)?.checked_rem(10)?;
            name.push(char::from_digit(digit, 10)?).ok()?;
            divisor = divisor.checked_div(10)?;
        } else {
            name.push(c).ok()?;
        }
    }
    if !extension.is_empty() {
        name.push('.').ok()?;
        name.push_str(extension).ok()?;
    }
    Some(name)
}

/// Every candidate name for `pattern`, in allocation order.
pub fn candidate_names<'a>(
    pattern: &'a str,
    extension: &'a str,
) -> impl Iterator<Item = FileName> + 'a {
    (0u32..).map_while(move |index| candidate_name(pattern, extension, index))
}
