//! Text to image codec.
//!
//! A [`DataMatrix`] holds one canvas and one text string and translates
//! between them. Each character becomes one column of the canvas: its 7-bit
//! code is packed top to bottom into an 8-row band, most significant bit
//! first. The columns are framed by a dashed border:
//!
//! - left: solid, the bottom [`SIGNAL_ROWS`] rows of column 0
//! - bottom: solid, the last row
//! - right: odd rows only, one column past the last character
//! - top: even columns only, the first row of the frame
//!
//! The size of the payload is never stored. It is measured back from the
//! solid bottom and left borders, so any canvas whose signal is anchored to
//! the bottom-left corner can be decoded.
use log::{debug, warn};

use crate::barcode_image::{BarcodeImage, MAX_HEIGHT, MAX_WIDTH};
use crate::error::BarcodeError;
use crate::helper;

/// Longest text that fits between the left and right borders.
pub const MAX_TEXT_LEN: usize = MAX_WIDTH - 2;

/// Height of the framed signal region, borders included.
pub const SIGNAL_ROWS: usize = 10;

const BOTTOM_ROW: i32 = MAX_HEIGHT as i32 - 1;
const TOP_ROW: i32 = MAX_HEIGHT as i32 - SIGNAL_ROWS as i32;
const BAND_TOP: i32 = MAX_HEIGHT as i32 - 9;
const BAND_ROWS: i32 = 8;

/// Operations of a device that reads and writes barcodes.
///
/// After [`generate_image_from_text`](Self::generate_image_from_text) or
/// [`translate_image_to_text`](Self::translate_image_to_text) succeeds, the
/// stored text and stored image describe the same payload.
pub trait BarcodeIo {
    /// Stores an independent copy of `image` and measures its signal region.
    /// Does no decoding.
    fn scan(&mut self, image: &BarcodeImage);

    /// Stores a copy of `text`. Does no encoding.
    fn read_text(&mut self, text: &str) -> Result<(), BarcodeError>;

    /// Replaces the stored image with the encoding of the stored text.
    fn generate_image_from_text(&mut self) -> Result<(), BarcodeError>;

    /// Replaces the stored text with the decoding of the stored image.
    fn translate_image_to_text(&mut self) -> Result<(), BarcodeError>;

    /// Prints the stored text.
    fn display_text_to_console(&self);

    /// Prints the signal region of the stored image.
    fn display_image_to_console(&self);
}

/// The barcode codec.
///
/// # Example
///
/// ```rust
/// use dmcodec::{BarcodeIo, DataMatrix};
///
/// let mut dm = DataMatrix::from_text("AB").unwrap();
/// dm.generate_image_from_text().unwrap();
/// assert_eq!((dm.signal_width(), dm.signal_height()), (4, 10));
///
/// let mut reader = DataMatrix::from_image(dm.image());
/// reader.translate_image_to_text().unwrap();
/// assert_eq!(reader.text(), "AB");
/// ```
#[derive(Clone, Debug, Default)]
pub struct DataMatrix {
    image: BarcodeImage,
    text: String,
    signal_width: usize,
    signal_height: usize,
}

impl DataMatrix {
    /// Creates a codec with empty text and a blank canvas.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a codec holding a copy of `image` and empty text.
    pub fn from_image(image: &BarcodeImage) -> Self {
        let mut dm = Self::new();
        dm.scan(image);
        dm
    }

    /// Creates a codec holding `text` and a blank canvas.
    ///
    /// # Errors
    ///
    /// Returns [`BarcodeError::TextTooLong`] if `text` has more than
    /// [`MAX_TEXT_LEN`] characters.
    pub fn from_text(text: &str) -> Result<Self, BarcodeError> {
        let mut dm = Self::new();
        dm.read_text(text)?;
        Ok(dm)
    }

    /// Returns the stored text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns the stored image.
    pub fn image(&self) -> &BarcodeImage {
        &self.image
    }

    /// Returns the width of the signal region, in columns.
    pub fn signal_width(&self) -> usize {
        self.signal_width
    }

    /// Returns the height of the signal region, in rows.
    pub fn signal_height(&self) -> usize {
        self.signal_height
    }

    /// Prints the whole canvas, including blank padding. For debugging.
    pub fn display_raw_image(&self) {
        self.image.display_to_console();
    }

    fn clear_image(&mut self) {
        self.image = BarcodeImage::new();
        self.measure_signal();
    }

    fn measure_signal(&mut self) {
        self.signal_width = compute_signal_width(&self.image);
        self.signal_height = compute_signal_height(&self.image);
    }
}

impl BarcodeIo for DataMatrix {
    fn scan(&mut self, image: &BarcodeImage) {
        self.image = image.duplicate();
        self.measure_signal();
        debug!(
            "scanned image with {}x{} signal",
            self.signal_width, self.signal_height
        );
    }

    fn read_text(&mut self, text: &str) -> Result<(), BarcodeError> {
        let len = text.chars().count();
        if len > MAX_TEXT_LEN {
            warn!("rejected text of {} characters", len);
            return Err(BarcodeError::TextTooLong {
                len,
                max: MAX_TEXT_LEN,
            });
        }
        self.text = text.to_owned();
        Ok(())
    }

    fn generate_image_from_text(&mut self) -> Result<(), BarcodeError> {
        let len = self.text.chars().count();
        if len > MAX_TEXT_LEN {
            return Err(BarcodeError::TextTooLong {
                len,
                max: MAX_TEXT_LEN,
            });
        }

        self.clear_image();

        // Left and right borders
        let right = len as i32 + 1;
        for row in (TOP_ROW..=BOTTOM_ROW).rev() {
            self.image.set_pixel(row, 0, true);
            if row % 2 == 1 {
                self.image.set_pixel(row, right, true);
            }
        }

        // Bottom and top borders, then the character columns
        for (col, c) in (1i32..).zip(self.text.chars()) {
            self.image.set_pixel(BOTTOM_ROW, col, true);
            if col % 2 == 0 {
                self.image.set_pixel(TOP_ROW, col, true);
            }
            write_char_to_col(&mut self.image, col, u32::from(c))?;
        }

        self.measure_signal();
        debug!(
            "encoded {} characters into {}x{} signal",
            len, self.signal_width, self.signal_height
        );
        Ok(())
    }

    fn translate_image_to_text(&mut self) -> Result<(), BarcodeError> {
        let last = self.signal_width.saturating_sub(1) as i32;
        let text: String = (1..last)
            .map(|col| read_char_from_col(&self.image, col))
            .collect();
        debug!("decoded {} characters", text.chars().count());
        self.read_text(&text)
    }

    fn display_text_to_console(&self) {
        println!("{}", self.text);
    }

    fn display_image_to_console(&self) {
        helper::print_signal(self);
    }
}

/// Counts filled pixels along the bottom row, from the left edge.
fn compute_signal_width(image: &BarcodeImage) -> usize {
    (0..MAX_WIDTH as i32)
        .take_while(|&col| image.get_pixel(BOTTOM_ROW, col))
        .count()
}

/// Counts filled pixels up the left column, from the bottom edge.
fn compute_signal_height(image: &BarcodeImage) -> usize {
    (0..MAX_HEIGHT as i32)
        .take_while(|&height| image.get_pixel(BOTTOM_ROW - height, 0))
        .count()
}

fn write_char_to_col(image: &mut BarcodeImage, col: i32, code: u32) -> Result<(), BarcodeError> {
    if !(1..MAX_WIDTH as i32).contains(&col) {
        warn!("column {} is outside the drawable range", col);
        return Err(BarcodeError::InvalidColumn(col));
    }
    if code > 127 {
        warn!("character code {} is not 7-bit ASCII", code);
        return Err(BarcodeError::InvalidCode(code));
    }

    for i in 0..BAND_ROWS {
        if (code >> (7 - i)) & 1 != 0 {
            image.set_pixel(BAND_TOP + i, col, true);
        }
    }
    Ok(())
}

fn read_char_from_col(image: &BarcodeImage, col: i32) -> char {
    // Top row of the band is the most significant bit.
    let code = (0..BAND_ROWS).fold(0u8, |acc, i| {
        (acc << 1) | u8::from(image.get_pixel(BAND_TOP + i, col))
    });
    char::from(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn encoded(text: &str) -> DataMatrix {
        let mut dm = DataMatrix::from_text(text).unwrap();
        dm.generate_image_from_text().unwrap();
        dm
    }

    fn decoded(image: &BarcodeImage) -> String {
        let mut dm = DataMatrix::from_image(image);
        dm.translate_image_to_text().unwrap();
        dm.text().to_string()
    }

    #[test]
    fn test_new_is_empty() {
        let dm = DataMatrix::new();
        assert_eq!(dm.text(), "");
        assert_eq!(dm.image(), &BarcodeImage::new());
        assert_eq!((dm.signal_width(), dm.signal_height()), (0, 0));
    }

    #[test]
    fn test_encode_ab_frame() {
        let dm = encoded("AB");
        let image = dm.image();

        // Bottom border, columns 1-2
        assert!(image.get_pixel(BOTTOM_ROW, 1));
        assert!(image.get_pixel(BOTTOM_ROW, 2));

        // Left border, all ten rows
        for row in TOP_ROW..=BOTTOM_ROW {
            assert!(image.get_pixel(row, 0), "left border row {}", row);
        }
        assert!(!image.get_pixel(TOP_ROW - 1, 0));

        // Right border, odd rows only
        for row in TOP_ROW..=BOTTOM_ROW {
            assert_eq!(image.get_pixel(row, 3), row % 2 == 1, "right border row {}", row);
        }

        // Top border, even columns only
        assert!(!image.get_pixel(TOP_ROW, 1));
        assert!(image.get_pixel(TOP_ROW, 2));

        assert_eq!(dm.signal_width(), 4);
        assert_eq!(dm.signal_height(), SIGNAL_ROWS);
        assert_eq!(decoded(image), "AB");
    }

    #[test]
    fn test_column_bit_order() {
        // 'A' = 0b0100_0001
        let dm = encoded("A");
        let column: Vec<bool> = (0..BAND_ROWS)
            .map(|i| dm.image().get_pixel(BAND_TOP + i, 1))
            .collect();
        assert_eq!(
            column,
            vec![false, true, false, false, false, false, false, true]
        );
    }

    #[test]
    fn test_round_trip_printable_ascii() {
        let printable: String = (0x20u8..0x7f).map(char::from).collect();
        for chunk in printable.as_bytes().chunks(MAX_TEXT_LEN) {
            let text = std::str::from_utf8(chunk).unwrap();
            let dm = encoded(text);
            assert_eq!(dm.signal_width(), text.len() + 2);
            assert_eq!(decoded(dm.image()), text);
        }
    }

    #[test]
    fn test_round_trip_max_length() {
        let text = "z".repeat(MAX_TEXT_LEN);
        let dm = encoded(&text);
        assert_eq!(dm.signal_width(), MAX_WIDTH);
        assert_eq!(decoded(dm.image()), text);
    }

    #[test]
    fn test_encode_empty_text() {
        let dm = encoded("");
        // Left border plus the right border sharing column 1
        assert_eq!(dm.signal_width(), 2);
        assert_eq!(dm.signal_height(), SIGNAL_ROWS);
        assert_eq!(decoded(dm.image()), "");
    }

    #[test]
    fn test_oversize_text_rejected() {
        let mut dm = encoded("keep");
        let before = dm.image().clone();

        let long = "x".repeat(MAX_WIDTH - 1);
        assert_eq!(
            dm.read_text(&long),
            Err(BarcodeError::TextTooLong {
                len: MAX_WIDTH - 1,
                max: MAX_TEXT_LEN,
            })
        );
        assert_eq!(dm.text(), "keep");
        assert_eq!(dm.image(), &before);
        assert_eq!(dm.signal_width(), 6);

        assert!(DataMatrix::from_text(&long).is_err());
    }

    #[test]
    fn test_non_ascii_aborts_encoding() {
        let mut dm = encoded("ok");
        dm.read_text("é").unwrap();
        assert_eq!(
            dm.generate_image_from_text(),
            Err(BarcodeError::InvalidCode(u32::from('é')))
        );
        // Canvas holds the partial frame, signal stays cleared
        assert!(dm.image().get_pixel(BOTTOM_ROW, 0));
        assert_eq!((dm.signal_width(), dm.signal_height()), (0, 0));
    }

    #[test]
    fn test_write_char_to_col_bounds() {
        let mut image = BarcodeImage::new();
        assert_eq!(
            write_char_to_col(&mut image, 0, 65),
            Err(BarcodeError::InvalidColumn(0))
        );
        assert_eq!(
            write_char_to_col(&mut image, MAX_WIDTH as i32, 65),
            Err(BarcodeError::InvalidColumn(MAX_WIDTH as i32))
        );
        assert_eq!(
            write_char_to_col(&mut image, 1, 128),
            Err(BarcodeError::InvalidCode(128))
        );
        assert_eq!(image, BarcodeImage::new());
        assert!(write_char_to_col(&mut image, MAX_WIDTH as i32 - 1, 127).is_ok());
    }

    #[test]
    fn test_scan_copies_image() {
        let mut source = encoded("copy").image().clone();
        let mut dm = DataMatrix::new();
        dm.scan(&source);

        source.set_pixel(BOTTOM_ROW, 0, false);
        assert!(dm.image().get_pixel(BOTTOM_ROW, 0));
        assert_eq!(dm.signal_width(), 6);

        dm.read_text("other").unwrap();
        dm.generate_image_from_text().unwrap();
        assert!(!source.get_pixel(BOTTOM_ROW, 0));
        assert_eq!(compute_signal_width(&source), 0);
    }

    #[test]
    fn test_decode_is_idempotent() {
        let mut dm = DataMatrix::from_image(encoded("twice").image());
        dm.translate_image_to_text().unwrap();
        let first = dm.text().to_string();
        dm.translate_image_to_text().unwrap();
        assert_eq!(dm.text(), first);
        assert_eq!(first, "twice");
    }

    #[test]
    fn test_blank_canvas() {
        let mut dm = DataMatrix::from_image(&BarcodeImage::new());
        assert_eq!((dm.signal_width(), dm.signal_height()), (0, 0));
        dm.read_text("stale").unwrap();
        dm.translate_image_to_text().unwrap();
        assert_eq!(dm.text(), "");
    }

    #[test]
    fn test_signal_stops_at_first_gap() {
        let image = BarcodeImage::from_rows(&["*", "*", " ", "*", "*** **"]);
        let dm = DataMatrix::from_image(&image);
        assert_eq!(dm.signal_width(), 3);
        assert_eq!(dm.signal_height(), 2);
    }

    #[test]
    fn test_encode_replaces_previous_image() {
        let mut dm = encoded("a much longer message");
        dm.read_text("hi").unwrap();
        dm.generate_image_from_text().unwrap();
        assert_eq!(dm.image(), encoded("hi").image());
        assert_eq!(dm.signal_width(), 4);
    }
}
