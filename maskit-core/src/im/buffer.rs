// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use crate::error::MaskError;

/// A row-major container storing single-channel mask pixels
///
/// The length of the container must be equal to the product of `w` * `h`.
/// Pixels are stored as u8 where 0 is background and any other value is
/// treated as an intensity until the mask is binarized.
///
/// # Examples
///
/// ```
/// use maskit_core::im::MaskBuffer;
///
/// let width = 10;
/// let height = 10;
/// let buffer = vec![0u8; (width * height) as usize];
/// let buffer = MaskBuffer::new(width, height, buffer);
///
/// assert_eq!(buffer.unwrap().len(), (width * height) as usize);
/// ```
///
/// ```
/// use maskit_core::im::MaskBuffer;
///
/// let buffer = MaskBuffer::new(10, 10, vec![0u8; 10]);
///
/// assert!(buffer.is_err()); // Buffer size does not match dimensions
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MaskBuffer {
    pub(crate) w: u32,   // Width
    pub(crate) h: u32,   // Height
    pub buffer: Vec<u8>, // Pixels
}

impl MaskBuffer {
    /// Initializes a mask from a row-major pixel vector
    ///
    /// # Arguments
    ///
    /// * `width` - Mask width
    /// * `height` - Mask height
    /// * `buffer` - Row-major pixels of length `width * height`
    pub fn new(width: u32, height: u32, buffer: Vec<u8>) -> Result<MaskBuffer, MaskError> {
        if (width as usize) * (height as usize) == buffer.len() {
            Ok(MaskBuffer {
                w: width,
                h: height,
                buffer,
            })
        } else {
            Err(MaskError::BufferSizeError)
        }
    }

    /// Initializes an all-background mask
    pub fn zeros(width: u32, height: u32) -> MaskBuffer {
        MaskBuffer {
            w: width,
            h: height,
            buffer: vec![0u8; (width as usize) * (height as usize)],
        }
    }
}

// >>> PROPERTY METHODS

impl MaskBuffer {
    /// Width of the mask
    pub fn width(&self) -> u32 {
        self.w
    }

    /// Height of the mask
    pub fn height(&self) -> u32 {
        self.h
    }

    /// Shape/dimensions of the mask as (height, width)
    pub fn shape(&self) -> (u32, u32) {
        (self.h, self.w)
    }

    /// Number of pixels in the mask
    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    /// Check if mask has no pixels
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Number of non-zero pixels
    pub fn count_foreground(&self) -> usize {
        self.buffer.iter().filter(|&&p| p != 0).count()
    }
}

// <<< PROPERTY METHODS

// >>> ACCESS METHODS

impl MaskBuffer {
    /// Returns the raw pixels
    pub fn into_raw(self) -> Vec<u8> {
        self.buffer
    }

    /// Returns a reference to the raw pixels
    pub fn as_raw(&self) -> &Vec<u8> {
        &self.buffer
    }

    // An iterator over the raw pixels
    pub fn iter(&self) -> impl Iterator<Item = &u8> {
        self.buffer.iter()
    }

    /// Pixel at (x, y) or None when out of bounds
    pub fn get(&self, x: u32, y: u32) -> Option<u8> {
        if x < self.w && y < self.h {
            Some(self.buffer[(y as usize) * (self.w as usize) + x as usize])
        } else {
            None
        }
    }

    /// Set pixel at signed (x, y), silently clipping coordinates off the mask
    pub fn put(&mut self, x: i64, y: i64, value: u8) {
        if x >= 0 && y >= 0 && x < self.w as i64 && y < self.h as i64 {
            self.buffer[(y as usize) * (self.w as usize) + x as usize] = value;
        }
    }

    /// Set every pixel in row `y` between `x0` and `x1` inclusive, clipped to the mask
    pub fn put_span(&mut self, y: i64, x0: i64, x1: i64, value: u8) {
        if y < 0 || y >= self.h as i64 || self.w == 0 {
            return;
        }

        let start = x0.max(0);
        let end = x1.min(self.w as i64 - 1);

        if start > end {
            return;
        }

        let row = (y as usize) * (self.w as usize);
        self.buffer[row + start as usize..=row + end as usize].fill(value);
    }
}

// <<< ACCESS METHODS

// >>> TRANSFORM METHODS

impl MaskBuffer {
    /// Binarize pixels so values above `threshold` become 255 and all others 0
    ///
    /// # Examples
    ///
    /// ```
    /// use maskit_core::im::MaskBuffer;
    ///
    /// let mask = MaskBuffer::new(4, 1, vec![0, 127, 128, 255]).unwrap();
    /// assert_eq!(mask.threshold(127).as_raw(), &[0, 0, 255, 255]);
    /// ```
    pub fn threshold(&self, threshold: u8) -> MaskBuffer {
        MaskBuffer {
            w: self.w,
            h: self.h,
            buffer: self
                .buffer
                .iter()
                .map(|&p| if p > threshold { 255 } else { 0 })
                .collect(),
        }
    }
}

// <<< TRANSFORM METHODS

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_buffer_new_success() {
        let buffer = MaskBuffer::new(2, 3, vec![1, 2, 3, 4, 5, 6]);
        assert!(buffer.is_ok());
    }

    #[test]
    fn test_buffer_new_error() {
        let buffer = MaskBuffer::new(3, 3, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(buffer, Err(MaskError::BufferSizeError));
    }

    #[test]
    fn test_buffer_zeros() {
        let buffer = MaskBuffer::zeros(4, 3);
        assert_eq!(buffer.shape(), (3, 4));
        assert_eq!(buffer.len(), 12);
        assert_eq!(buffer.count_foreground(), 0);
    }

    #[test]
    fn test_buffer_get_row_major() {
        let buffer = MaskBuffer::new(2, 3, vec![1, 2, 3, 4, 5, 6]).unwrap();
        assert_eq!(buffer.get(1, 0), Some(2));
        assert_eq!(buffer.get(0, 2), Some(5));
        assert_eq!(buffer.get(2, 0), None);
        assert_eq!(buffer.get(0, 3), None);
    }

    #[test]
    fn test_buffer_put_clips() {
        let mut buffer = MaskBuffer::zeros(3, 3);
        buffer.put(-1, 0, 255);
        buffer.put(0, -1, 255);
        buffer.put(3, 0, 255);
        buffer.put(0, 3, 255);
        assert_eq!(buffer.count_foreground(), 0);

        buffer.put(2, 1, 255);
        assert_eq!(buffer.get(2, 1), Some(255));
        assert_eq!(buffer.count_foreground(), 1);
    }

    #[test]
    fn test_buffer_put_span() {
        let mut buffer = MaskBuffer::zeros(5, 2);
        buffer.put_span(1, -3, 2, 255);
        assert_eq!(buffer.as_raw(), &[0, 0, 0, 0, 0, 255, 255, 255, 0, 0]);

        buffer.put_span(0, 3, 10, 7);
        assert_eq!(&buffer.as_raw()[..5], &[0, 0, 0, 7, 7]);

        buffer.put_span(0, 4, 3, 9);
        buffer.put_span(5, 0, 4, 9);
        assert!(!buffer.iter().any(|&p| p == 9));
    }

    #[test]
    fn test_buffer_threshold() {
        let buffer = MaskBuffer::new(3, 2, vec![0, 1, 127, 128, 200, 255]).unwrap();
        let binary = buffer.threshold(127);
        assert_eq!(binary.as_raw(), &[0, 0, 0, 255, 255, 255]);
        assert_eq!(binary.count_foreground(), 3);
    }
}
