//! Grayscale image containers.
//!
//! [`GrayImage`] owns a row-major `u8` buffer. [`CellView`] borrows a
//! rectangular window of it through explicit index ranges, so tiles never
//! alias a mutable buffer.

use std::ops::Range;

use crate::error::LbpError;

/// Read-only access to an 8-bit 2D grid.
pub trait ImageView {
    fn rows(&self) -> usize;
    fn cols(&self) -> usize;

    /// Pixels of row `r`, exactly `cols()` long.
    fn row(&self, r: usize) -> &[u8];

    #[inline]
    fn get(&self, r: usize, c: usize) -> u8 {
        self.row(r)[c]
    }

    fn is_empty(&self) -> bool {
        self.rows() == 0 || self.cols() == 0
    }

    /// Iterate over all pixels in row-major order.
    fn pixels(&self) -> Pixels<'_, Self>
    where
        Self: Sized,
    {
        Pixels {
            image: self,
            r: 0,
            c: 0,
        }
    }
}

/// Row-major pixel iterator returned by [`ImageView::pixels`].
pub struct Pixels<'a, I: ?Sized + ImageView> {
    image: &'a I,
    r: usize,
    c: usize,
}

impl<'a, I: ImageView> Iterator for Pixels<'a, I> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.c >= self.image.cols() {
            self.c = 0;
            self.r += 1;
        }
        if self.r >= self.image.rows() || self.image.cols() == 0 {
            return None;
        }
        let v = self.image.get(self.r, self.c);
        self.c += 1;
        Some(v)
    }
}

/// Owned single-channel 8-bit image, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GrayImage {
    rows: usize,
    cols: usize,
    data: Vec<u8>,
}

impl GrayImage {
    /// Wrap a raw buffer. `data.len()` must equal `rows * cols`.
    pub fn from_raw(rows: usize, cols: usize, data: Vec<u8>) -> Result<Self, LbpError> {
        if data.len() != rows * cols {
            return Err(LbpError::InvalidParameters(format!(
                "buffer of {} bytes does not match {rows}x{cols} image",
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Image with every pixel set to `value`.
    pub fn filled(rows: usize, cols: usize, value: u8) -> Self {
        Self {
            rows,
            cols,
            data: vec![value; rows * cols],
        }
    }

    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> u8) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self { rows, cols, data }
    }

    #[inline]
    pub fn set(&mut self, r: usize, c: usize, value: u8) {
        self.data[r * self.cols + c] = value;
    }

    #[inline]
    pub fn row_mut(&mut self, r: usize) -> &mut [u8] {
        let start = r * self.cols;
        &mut self.data[start..start + self.cols]
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// View of the whole image.
    pub fn view(&self) -> CellView<'_> {
        CellView {
            data: &self.data,
            stride: self.cols,
            row_start: 0,
            col_start: 0,
            rows: self.rows,
            cols: self.cols,
        }
    }

    /// Borrow the window `rows × cols` of this image.
    ///
    /// Fails with [`LbpError::InvalidParameters`] when a range is reversed or
    /// runs past the image.
    pub fn region(&self, rows: Range<usize>, cols: Range<usize>) -> Result<CellView<'_>, LbpError> {
        if rows.start > rows.end || rows.end > self.rows || cols.start > cols.end || cols.end > self.cols
        {
            return Err(LbpError::InvalidParameters(format!(
                "region rows {rows:?} cols {cols:?} outside {}x{} image",
                self.rows, self.cols
            )));
        }
        Ok(CellView {
            data: &self.data,
            stride: self.cols,
            row_start: rows.start,
            col_start: cols.start,
            rows: rows.end - rows.start,
            cols: cols.end - cols.start,
        })
    }

    /// Copy `src` into this image with its top-left corner at `(row, col)`.
    pub fn paste(&mut self, row: usize, col: usize, src: &impl ImageView) -> Result<(), LbpError> {
        if row + src.rows() > self.rows || col + src.cols() > self.cols {
            return Err(LbpError::InvalidParameters(format!(
                "{}x{} patch at ({row}, {col}) overflows {}x{} image",
                src.rows(),
                src.cols(),
                self.rows,
                self.cols
            )));
        }
        for r in 0..src.rows() {
            self.row_mut(row + r)[col..col + src.cols()].copy_from_slice(src.row(r));
        }
        Ok(())
    }
}

impl ImageView for GrayImage {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    fn row(&self, r: usize) -> &[u8] {
        let start = r * self.cols;
        &self.data[start..start + self.cols]
    }
}

/// Borrowed rectangular window into a [`GrayImage`].
#[derive(Clone, Copy, Debug)]
pub struct CellView<'a> {
    data: &'a [u8],
    stride: usize,
    row_start: usize,
    col_start: usize,
    rows: usize,
    cols: usize,
}

impl<'a> CellView<'a> {
    /// Top-left corner of the window in the parent image.
    pub fn origin(&self) -> (usize, usize) {
        (self.row_start, self.col_start)
    }
}

impl<'a> ImageView for CellView<'a> {
    #[inline]
    fn rows(&self) -> usize {
        self.rows
    }
    #[inline]
    fn cols(&self) -> usize {
        self.cols
    }
    #[inline]
    fn row(&self, r: usize) -> &[u8] {
        let start = (self.row_start + r) * self.stride + self.col_start;
        &self.data[start..start + self.cols]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ramp(rows: usize, cols: usize) -> GrayImage {
        GrayImage::from_fn(rows, cols, |r, c| (r * cols + c) as u8)
    }

    #[test]
    fn from_raw_rejects_wrong_length() {
        let err = GrayImage::from_raw(2, 3, vec![0; 5]).unwrap_err();
        assert!(matches!(err, LbpError::InvalidParameters(_)));
    }

    #[test]
    fn region_reads_parent_pixels() {
        let img = ramp(5, 6);
        let cell = img.region(1..4, 2..5).unwrap();
        assert_eq!((cell.rows(), cell.cols()), (3, 3));
        assert_eq!(cell.origin(), (1, 2));
        assert_eq!(cell.get(0, 0), img.get(1, 2));
        assert_eq!(cell.row(2), &[20, 21, 22]);
    }

    #[test]
    fn region_out_of_range_fails() {
        let img = ramp(4, 4);
        assert!(img.region(0..5, 0..4).is_err());
        assert!(img.region(0..4, 3..2).is_err());
    }

    #[test]
    fn paste_copies_patch() {
        let mut dst = GrayImage::filled(4, 4, 0);
        let src = GrayImage::filled(2, 2, 9);
        dst.paste(1, 2, &src).unwrap();
        assert_eq!(dst.row(0), &[0, 0, 0, 0]);
        assert_eq!(dst.row(1), &[0, 0, 9, 9]);
        assert_eq!(dst.row(2), &[0, 0, 9, 9]);
        assert!(dst.paste(3, 3, &src).is_err());
    }

    #[test]
    fn pixels_iterates_row_major() {
        let img = ramp(2, 3);
        let all: Vec<u8> = img.pixels().collect();
        assert_eq!(all, vec![0, 1, 2, 3, 4, 5]);

        let empty = GrayImage::filled(3, 0, 0);
        assert_eq!(empty.pixels().count(), 0);
    }
}
