//! # Error Types
//!
//! This module defines the error type returned by the fallible operations of the
//! barcode codec. Pixel access is total and never produces one of these.

use thiserror::Error;

/// Main error type for barcode encoding and decoding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BarcodeError {
    /// Text does not fit between the left and right borders of the canvas.
    #[error("Text too long: {len} characters, max {max}")]
    TextTooLong { len: usize, max: usize },

    /// A character column was requested outside the drawable range.
    #[error("Invalid column: {0}")]
    InvalidColumn(i32),

    /// A character code is not 7-bit ASCII.
    #[error("Invalid character code: {0}")]
    InvalidCode(u32),

    /// Input block has more rows or columns than the canvas.
    #[error("Image too large: {rows} rows x {cols} columns")]
    ImageTooLarge { rows: usize, cols: usize },

    /// Rendered raster size does not fit in `u32`.
    #[error("Raster too large: border {border}, scale {scale}")]
    RasterTooLarge { border: u32, scale: u32 },
}
