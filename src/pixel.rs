use crate::error::{Error, Result};

/// Sample layout of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    Rgb,
    Rgba,
}

impl ColorMode {
    pub fn channels(self) -> usize {
        match self {
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }

    /// IHDR color type field.
    pub fn png_color_type(self) -> u8 {
        match self {
            ColorMode::Rgb => 2,
            ColorMode::Rgba => 6,
        }
    }
}

/// Row-major 8-bit image held entirely in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    mode: ColorMode,
    rows: Vec<Vec<u8>>,
}

impl PixelBuffer {
    /// Zero-filled buffer (black, or fully transparent for RGBA).
    pub fn new(width: u32, height: u32, mode: ColorMode) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        let row_len = width as usize * mode.channels();
        Ok(Self {
            width,
            height,
            mode,
            rows: vec![vec![0u8; row_len]; height as usize],
        })
    }

    pub fn from_rows(width: u32, height: u32, mode: ColorMode, rows: Vec<Vec<u8>>) -> Result<Self> {
        validate(width, height, mode, &rows)?;
        Ok(Self { width, height, mode, rows })
    }

    pub fn width(&self) -> u32 { self.width }
    pub fn height(&self) -> u32 { self.height }
    pub fn mode(&self) -> ColorMode { self.mode }
    pub fn rows(&self) -> &[Vec<u8>] { &self.rows }

    /// Write one pixel.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is out of bounds or `px` does not hold exactly
    /// `mode.channels()` samples.
    pub fn put_pixel(&mut self, x: u32, y: u32, px: &[u8]) {
        let ch = self.mode.channels();
        assert_eq!(px.len(), ch, "pixel sample count does not match color mode");
        let start = x as usize * ch;
        self.rows[y as usize][start..start + ch].copy_from_slice(px);
    }

    /// Samples of one pixel.
    ///
    /// # Panics
    ///
    /// If `(x, y)` is out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> &[u8] {
        let ch = self.mode.channels();
        let start = x as usize * ch;
        &self.rows[y as usize][start..start + ch]
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        crate::png::encode(self.width, self.height, self.mode, &self.rows)
    }
}

/// Check the row-shape invariant for `width` x `height` in `mode`.
pub fn validate<R: AsRef<[u8]>>(width: u32, height: u32, mode: ColorMode, rows: &[R]) -> Result<()> {
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    if rows.len() != height as usize {
        return Err(Error::RowCount { expected: height as usize, actual: rows.len() });
    }
    let expected = width as usize * mode.channels();
    for (row, samples) in rows.iter().enumerate() {
        let actual = samples.as_ref().len();
        if actual != expected {
            return Err(Error::RowLength { row, expected, actual });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_buffer_is_zeroed() {
        let buf = PixelBuffer::new(3, 2, ColorMode::Rgba).unwrap();
        assert_eq!(buf.rows().len(), 2);
        assert!(buf.rows().iter().all(|r| r.len() == 12 && r.iter().all(|&s| s == 0)));
    }

    #[test]
    fn put_and_read_pixel() {
        let mut buf = PixelBuffer::new(2, 2, ColorMode::Rgb).unwrap();
        buf.put_pixel(1, 1, &[1, 2, 3]);
        assert_eq!(buf.pixel(1, 1), &[1, 2, 3]);
        assert_eq!(buf.pixel(0, 1), &[0, 0, 0]);
    }

    #[test]
    #[should_panic]
    fn put_pixel_out_of_bounds_panics() {
        let mut buf = PixelBuffer::new(2, 2, ColorMode::Rgb).unwrap();
        buf.put_pixel(2, 0, &[0, 0, 0]);
    }

    #[test]
    #[should_panic(expected = "pixel sample count")]
    fn put_pixel_wrong_sample_count_panics() {
        let mut buf = PixelBuffer::new(2, 2, ColorMode::Rgba).unwrap();
        buf.put_pixel(0, 0, &[0, 0, 0]);
    }

    #[test]
    fn rejects_zero_dimensions() {
        assert!(matches!(
            PixelBuffer::new(0, 4, ColorMode::Rgb),
            Err(Error::InvalidDimensions { width: 0, height: 4 })
        ));
    }

    #[test]
    fn rejects_short_row() {
        let rows = vec![vec![0u8; 6], vec![0u8; 5]];
        match PixelBuffer::from_rows(2, 2, ColorMode::Rgb, rows) {
            Err(Error::RowLength { row, expected, actual }) => {
                assert_eq!((row, expected, actual), (1, 6, 5));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn rejects_wrong_row_count() {
        let rows = vec![vec![0u8; 8]];
        assert!(matches!(
            PixelBuffer::from_rows(2, 2, ColorMode::Rgba, rows),
            Err(Error::RowCount { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn color_type_fields() {
        assert_eq!(ColorMode::Rgb.png_color_type(), 2);
        assert_eq!(ColorMode::Rgba.png_color_type(), 6);
    }
}
