//! # dmcodec
//!
//! A Rust library for packing short ASCII strings into a fixed-size black and
//! white barcode image and reading them back.
//!
//! Every image is a 30 x 65 canvas. Each character of the text becomes one
//! column of the canvas, its 7-bit code stored top to bottom in an 8-row band.
//! A dashed frame around the columns marks the signal region, so a scanned
//! canvas carries its own size: no length or dimensions are stored alongside it.
//!
//! ## Features
//!
//! - Encode up to 63 ASCII characters into a framed canvas.
//! - Decode any bottom-left anchored canvas back into text.
//! - Build canvases from string blocks or grayscale images.
//! - Render the signal region as ASCII art, SVG, or an in-memory image buffer.
//! - Safe Rust implementation with no unsafe code.
//!
//! ## Example
//!
//! Decode a scanned block of text:
//!
//! ```rust
//! use dmcodec::{BarcodeImage, BarcodeIo, DataMatrix};
//!
//! let scan = BarcodeImage::from_rows(&[
//!     "* *     ",
//!     "*   *   ",
//!     "***     ",
//!     "* ***   ",
//!     "*       ",
//!     "*** *   ",
//!     "*       ",
//!     "*   *   ",
//!     "* **    ",
//!     "*****   ",
//! ]);
//! let mut dm = DataMatrix::from_image(&scan);
//! dm.translate_image_to_text().unwrap();
//! assert_eq!(dm.text(), "Hi!");
//! ```
//!
//! Encode text and render it:
//!
//! ```rust
//! use dmcodec::{helper::to_image_buffer, BarcodeIo, DataMatrix};
//!
//! let mut dm = DataMatrix::from_text("Hello, World!").unwrap();
//! dm.generate_image_from_text().unwrap();
//! dm.display_image_to_console();
//! let img = to_image_buffer(&dm, 4, 6).unwrap();
//! assert_eq!(img.dimensions(), ((15 + 8) * 6, (10 + 8) * 6));
//! ```
//!
//! ## Modules
//!
//! - [`barcode_image`]: The fixed-size canvas.
//! - [`datamatrix`]: Text to image encoding and image to text decoding.
//! - [`helper`]: Utilities for rendering and importing canvases.
//! - [`error`]: The error type.

#![forbid(unsafe_code)]

pub mod barcode_image;
pub mod datamatrix;
pub mod error;
pub mod helper;

pub use barcode_image::BarcodeImage;
pub use datamatrix::{BarcodeIo, DataMatrix};
pub use error::BarcodeError;
