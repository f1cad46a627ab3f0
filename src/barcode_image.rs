//! Fixed-size binary canvas that every barcode is drawn on.
//!
//! The canvas is always [`MAX_HEIGHT`] rows by [`MAX_WIDTH`] columns. Shorter
//! payloads occupy the bottom-left corner and the rest stays blank.
use log::warn;

use crate::error::BarcodeError;
use crate::helper;

/// Number of rows in every canvas.
pub const MAX_HEIGHT: usize = 30;

/// Number of columns in every canvas.
pub const MAX_WIDTH: usize = 65;

const BUFFER_LEN: usize = (MAX_HEIGHT * MAX_WIDTH + 7) / 8;

/// A `MAX_HEIGHT` x `MAX_WIDTH` grid of filled and blank pixels.
///
/// Pixel access is total: coordinates outside the canvas read as blank and
/// writes to them are refused. Cloning (or [`duplicate`](Self::duplicate))
/// produces fully independent storage.
///
/// # Example
///
/// ```rust
/// use dmcodec::barcode_image::{BarcodeImage, MAX_HEIGHT};
///
/// let image = BarcodeImage::from_rows(&["* ", "**"]);
/// assert!(image.get_pixel(MAX_HEIGHT as i32 - 1, 1));
/// assert!(!image.get_pixel(MAX_HEIGHT as i32 - 2, 1));
/// assert!(!image.get_pixel(-1, 0));
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BarcodeImage {
    /// The pixels of this canvas (0 = blank, 1 = filled), packed bitwise into
    /// bytes in row-major order. Accessed through get_pixel() and set_pixel().
    modules: Vec<u8>,
}

impl Default for BarcodeImage {
    fn default() -> Self {
        Self::new()
    }
}

impl BarcodeImage {
    /// Creates a blank canvas.
    pub fn new() -> Self {
        Self {
            modules: vec![0u8; BUFFER_LEN],
        }
    }

    /// Builds a canvas from a block of strings, one string per row.
    ///
    /// Any character other than a space marks a filled pixel. The block is
    /// anchored to the bottom-left corner. A block with more rows than
    /// [`MAX_HEIGHT`], or whose first row is wider than [`MAX_WIDTH`], is
    /// rejected and the canvas is left blank. Only the first row is measured:
    /// columns past [`MAX_WIDTH`] in later rows are dropped.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        match Self::try_from_rows(rows) {
            Ok(image) => image,
            Err(err) => {
                warn!("{}, leaving canvas blank", err);
                Self::new()
            }
        }
    }

    /// Like [`from_rows`](Self::from_rows), but reports an oversize block.
    ///
    /// # Errors
    ///
    /// Returns [`BarcodeError::ImageTooLarge`] if the block has more rows than
    /// [`MAX_HEIGHT`] or its first row is wider than [`MAX_WIDTH`]. Later rows
    /// are not measured and lose any columns past [`MAX_WIDTH`].
    pub fn try_from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self, BarcodeError> {
        // The block is rectangular, so only the first row is measured.
        let cols = rows.first().map_or(0, |line| line.as_ref().chars().count());
        if rows.len() > MAX_HEIGHT || cols > MAX_WIDTH {
            return Err(BarcodeError::ImageTooLarge {
                rows: rows.len(),
                cols,
            });
        }

        let mut image = Self::new();
        let top = MAX_HEIGHT - rows.len();
        for (offset, line) in rows.iter().enumerate() {
            let row = (top + offset) as i32;
            for (col, c) in line.as_ref().chars().take(MAX_WIDTH).enumerate() {
                if c != ' ' {
                    image.set_pixel(row, col as i32, true);
                }
            }
        }
        Ok(image)
    }

    /// Returns whether the pixel at the given coordinates is filled.
    ///
    /// Coordinates outside the canvas return `false`.
    ///
    /// # Arguments
    ///
    /// * `row` - Row index (0 is top).
    /// * `col` - Column index (0 is left).
    pub fn get_pixel(&self, row: i32, col: i32) -> bool {
        in_bounds(row, col) && self.get_pixel_bounded(row as usize, col as usize)
    }

    /// Sets the pixel at the given coordinates.
    ///
    /// Returns `false` and leaves the canvas untouched if the coordinates are
    /// outside the canvas.
    pub fn set_pixel(&mut self, row: i32, col: i32, value: bool) -> bool {
        if !in_bounds(row, col) {
            return false;
        }
        self.set_pixel_bounded(row as usize, col as usize, value);
        true
    }

    /// Returns a copy of this canvas that shares no storage with it.
    pub fn duplicate(&self) -> Self {
        self.clone()
    }

    /// Prints the full canvas, blank padding included, inside a frame.
    pub fn display_to_console(&self) {
        helper::print_raw(self);
    }

    fn get_pixel_bounded(&self, row: usize, col: usize) -> bool {
        let index = row * MAX_WIDTH + col;
        get_bit(self.modules[index >> 3], (index & 7) as u8)
    }

    fn set_pixel_bounded(&mut self, row: usize, col: usize, value: bool) {
        let index = row * MAX_WIDTH + col;
        let byteindex: usize = index >> 3;
        let bitindex: usize = index & 7;
        if value {
            self.modules[byteindex] |= 1u8 << bitindex;
        } else {
            self.modules[byteindex] &= !(1u8 << bitindex);
        }
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..MAX_HEIGHT as i32).contains(&row) && (0..MAX_WIDTH as i32).contains(&col)
}

fn get_bit(x: u8, i: u8) -> bool {
    ((x >> i) & 1) != 0
}
