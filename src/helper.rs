use crate::barcode_image::{BarcodeImage, MAX_HEIGHT, MAX_WIDTH};
use crate::datamatrix::DataMatrix;
use crate::error::BarcodeError;

use image::{GrayImage, ImageBuffer, Luma};
use std::ops::Range;

/// Console glyph for a filled pixel.
pub const BLACK_CHAR: char = '*';

/// Console glyph for a blank pixel.
pub const WHITE_CHAR: char = ' ';

/*---- Utilities ----*/

// Renders the given rows of the canvas, columns [0, width), inside a frame of
// dashes and pipes. The string always uses Unix newlines (\n).
fn frame_rows(image: &BarcodeImage, rows: Range<usize>, width: usize) -> String {
	let mut result = String::new();
	result += &"-".repeat(width + 2);
	result += "\n";
	for row in rows {
		result.push('|');
		for col in 0 .. width {
			result.push(if image.get_pixel(row as i32, col as i32) { BLACK_CHAR } else { WHITE_CHAR });
		}
		result += "|\n";
	}
	result += &"-".repeat(width + 2);
	result += "\n";
	result
}

/// Renders only the signal region of the codec's image, inside a frame.
///
/// # Example
///
/// ```
/// use dmcodec::{helper::signal_to_string, BarcodeIo, DataMatrix};
///
/// let mut dm = DataMatrix::from_text("").unwrap();
/// dm.generate_image_from_text().unwrap();
/// let rendered = signal_to_string(&dm);
/// assert!(rendered.starts_with("----\n|* |\n|**|\n"));
/// ```
pub fn signal_to_string(dm: &DataMatrix) -> String {
	let top = MAX_HEIGHT - dm.signal_height();
	frame_rows(dm.image(), top .. MAX_HEIGHT, dm.signal_width())
}

/// Renders the full canvas, blank padding included, inside a frame.
pub fn raw_to_string(image: &BarcodeImage) -> String {
	frame_rows(image, 0 .. MAX_HEIGHT, MAX_WIDTH)
}

/// Prints the signal region of the codec's image to the console.
pub fn print_signal(dm: &DataMatrix) {
	println!("{}", signal_to_string(dm));
}

/// Prints the full canvas to the console.
pub fn print_raw(image: &BarcodeImage) {
	println!();
	print!("{}", raw_to_string(image));
}

// Maps a point of an output raster, measured in pixels from the top-left of
// the border, to the canvas pixel it shows. Returns false in the border.
fn signal_pixel(dm: &DataMatrix, x: i64, y: i64) -> bool {
	let width = dm.signal_width() as i64;
	let height = dm.signal_height() as i64;
	if !(0 .. width).contains(&x) || !(0 .. height).contains(&y) {
		return false;
	}
	let row = MAX_HEIGHT as i64 - height + y;
	dm.image().get_pixel(row as i32, x as i32)
}

/// Returns a string of SVG code depicting the signal region of the codec's
/// image, with the given number of blank border modules around it.
///
/// The string always uses Unix newlines (\n), regardless of the platform.
///
/// # Example
///
/// ```
/// use dmcodec::{helper::to_svg_string, BarcodeIo, DataMatrix};
///
/// let mut dm = DataMatrix::from_text("AB").unwrap();
/// dm.generate_image_from_text().unwrap();
/// let svg = to_svg_string(&dm, 1);
/// assert!(svg.contains("viewBox=\"0 0 6 12\""));
/// ```
pub fn to_svg_string(dm: &DataMatrix, border: u32) -> String {
	let border = i64::from(border);
	let width = dm.signal_width() as i64 + border * 2;
	let height = dm.signal_height() as i64 + border * 2;
	let mut result = String::new();
	result += "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n";
	result += "<!DOCTYPE svg PUBLIC \"-//W3C//DTD SVG 1.1//EN\" \"http://www.w3.org/Graphics/SVG/1.1/DTD/svg11.dtd\">\n";
	result += &format!(
		"<svg xmlns=\"http://www.w3.org/2000/svg\" version=\"1.1\" viewBox=\"0 0 {} {}\" stroke=\"none\">\n", width, height);
	result += "\t<rect width=\"100%\" height=\"100%\" fill=\"#FFFFFF\"/>\n";
	result += "\t<path d=\"";
	let mut first = true;
	for y in 0 .. dm.signal_height() as i64 {
		for x in 0 .. dm.signal_width() as i64 {
			if signal_pixel(dm, x, y) {
				if !first {
					result += " ";
				}
				first = false;
				result += &format!("M{},{}h1v1h-1z", x + border, y + border);
			}
		}
	}
	result += "\" fill=\"#000000\"/>\n";
	result += "</svg>\n";
	result
}

/// Renders the signal region of the codec's image into a grayscale buffer.
///
/// Each canvas pixel becomes a `scale` x `scale` block; filled pixels are
/// black and everything else, including the `border` modules, is white.
/// A `scale` of 0 is treated as 1.
///
/// # Errors
///
/// Returns [`BarcodeError::RasterTooLarge`] if the raster width or height
/// would overflow `u32`.
///
/// # Example
///
/// ```
/// use dmcodec::{helper::to_image_buffer, BarcodeIo, DataMatrix};
///
/// let mut dm = DataMatrix::from_text("Hello").unwrap();
/// dm.generate_image_from_text().unwrap();
/// let img = to_image_buffer(&dm, 2, 3).unwrap();
/// assert_eq!(img.dimensions(), ((7 + 4) * 3, (10 + 4) * 3));
/// ```
pub fn to_image_buffer(
	dm: &DataMatrix,
	border: u32,
	scale: u32,
) -> Result<ImageBuffer<Luma<u8>, Vec<u8>>, BarcodeError> {
	let scale = scale.max(1);
	let raster_side = |modules: usize| {
		border.checked_mul(2)
			.and_then(|b| b.checked_add(modules as u32))
			.and_then(|n| n.checked_mul(scale))
			.ok_or(BarcodeError::RasterTooLarge { border, scale })
	};
	let width = raster_side(dm.signal_width())?;
	let height = raster_side(dm.signal_height())?;
	let mut img = ImageBuffer::new(width, height);

	for (x, y, pixel) in img.enumerate_pixels_mut() {
		let dm_x = i64::from(x / scale) - i64::from(border);
		let dm_y = i64::from(y / scale) - i64::from(border);
		*pixel = if signal_pixel(dm, dm_x, dm_y) {
			Luma([0u8]) // Black
		} else {
			Luma([255u8]) // White
		};
	}

	Ok(img)
}

/// Reads a grayscale raster into a canvas, one raster pixel per canvas pixel.
///
/// Pixels darker than mid-gray are filled. The raster is anchored to the
/// bottom-left corner of the canvas, the same way
/// [`BarcodeImage::from_rows`] anchors a string block.
///
/// # Errors
///
/// Returns [`BarcodeError::ImageTooLarge`] if the raster is taller than
/// [`MAX_HEIGHT`] or wider than [`MAX_WIDTH`].
pub fn from_luma_image(img: &GrayImage) -> Result<BarcodeImage, BarcodeError> {
	let (width, height) = img.dimensions();
	let (rows, cols) = (height as usize, width as usize);
	if rows > MAX_HEIGHT || cols > MAX_WIDTH {
		return Err(BarcodeError::ImageTooLarge { rows, cols });
	}

	let top = (MAX_HEIGHT - rows) as i32;
	let mut image = BarcodeImage::new();
	for (x, y, pixel) in img.enumerate_pixels() {
		if pixel.0[0] < 128 {
			image.set_pixel(top + y as i32, x as i32, true);
		}
	}
	Ok(image)
}
