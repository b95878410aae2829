// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::path::Path;

use fast_image_resize::PixelType;
use image::{DynamicImage, GrayImage, open as open_dynamic};
use npyz::{DType, NpyFile, TypeChar, WriterBuilder};

use crate::constant;
use crate::cv::transform::resize_bilinear_fast;
use crate::error::MaskError;
use crate::im::MaskBuffer;

fn lowercase_extension<P: AsRef<Path>>(path: P) -> Option<String> {
    path.as_ref()
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
}

// >>> I/O METHODS

impl MaskBuffer {
    /// Open a mask as a single-channel intensity grid
    ///
    /// Colour images are converted to 8-bit luma and 16-bit images are
    /// scaled down to 8 bits.
    ///
    /// # Arguments
    ///
    /// * `path` - A path to an image or numpy array with a valid extension
    ///
    /// ```no_run
    /// use maskit_core::im::MaskBuffer;
    /// let mask = MaskBuffer::open("mask.png");
    /// ```
    pub fn open<P: AsRef<Path>>(path: P) -> Result<MaskBuffer, MaskError> {
        let display = path.as_ref().display().to_string();

        if let Some(ext) = lowercase_extension(&path) {
            if ext == "npy" {
                let bytes = std::fs::read(&path)
                    .map_err(|err| MaskError::ImageReadError(format!("{} ({})", display, err)))?;
                let npy = NpyFile::new(&bytes[..])
                    .map_err(|err| MaskError::ImageReadError(format!("{} ({})", display, err)))?;

                return Self::new_from_numpy(npy);
            }

            if constant::IMAGE_DYNAMIC_FORMATS.iter().any(|e| e == &ext) {
                let image = open_dynamic(&path)
                    .map_err(|err| MaskError::ImageReadError(format!("{} ({})", display, err)))?;

                return Ok(Self::new_from_dynamic(image));
            }
        }

        Err(MaskError::ImageExtensionError)
    }

    /// Initialize a new mask from a DynamicImage
    ///
    /// # Examples
    ///
    /// ```
    /// use image::{GrayImage, DynamicImage};
    /// use maskit_core::im::MaskBuffer;
    ///
    /// let gray = GrayImage::new(10, 4);
    /// let mask = MaskBuffer::new_from_dynamic(DynamicImage::ImageLuma8(gray));
    /// assert_eq!(mask.shape(), (4, 10));
    /// ```
    pub fn new_from_dynamic(image: DynamicImage) -> MaskBuffer {
        let width = image.width();
        let height = image.height();

        let buffer: Vec<u8> = match image {
            DynamicImage::ImageLuma8(buffer) => buffer.into_raw(),
            DynamicImage::ImageLumaA8(buffer) => buffer
                .into_raw()
                .chunks_exact(2)
                .map(|pixel| pixel[0])
                .collect(),
            DynamicImage::ImageLuma16(buffer) => buffer
                .into_raw()
                .into_iter()
                .map(|pixel| (pixel >> 8) as u8)
                .collect(),
            other => other.to_luma8().into_raw(),
        };

        MaskBuffer {
            w: width,
            h: height,
            buffer,
        }
    }

    /// Initialize a new mask from a numpy array buffer
    ///
    /// Unsigned integer arrays of shape (H, W) or (H, W, 1) are accepted.
    /// Values wider than u8 saturate at 255.
    ///
    /// # Arguments
    ///
    /// * `npy` - A (height, width) shaped numpy array buffer
    pub fn new_from_numpy(npy: NpyFile<&[u8]>) -> Result<MaskBuffer, MaskError> {
        let shape = npy.shape().to_vec();

        let (h, w) = match shape.as_slice() {
            [h, w] => (*h as u32, *w as u32),
            [h, w, 1] => (*h as u32, *w as u32),
            _ => {
                return Err(MaskError::MaskFormatError(
                    "Numpy array masks must have an (H, W) or (H, W, 1) shape.",
                ));
            }
        };

        let read_error = |err: std::io::Error| MaskError::ImageReadError(err.to_string());

        let buffer: Vec<u8> = match npy.dtype() {
            DType::Plain(x) => match (x.type_char(), x.size_field()) {
                (TypeChar::Uint, 1) => npy.into_vec::<u8>().map_err(read_error)?,
                (TypeChar::Uint, 2) => npy
                    .into_vec::<u16>()
                    .map_err(read_error)?
                    .into_iter()
                    .map(|pixel| pixel.min(255) as u8)
                    .collect(),
                (TypeChar::Uint, 4) => npy
                    .into_vec::<u32>()
                    .map_err(read_error)?
                    .into_iter()
                    .map(|pixel| pixel.min(255) as u8)
                    .collect(),
                _ => {
                    return Err(MaskError::MaskFormatError(
                        "Numpy masks must hold u8, u16 or u32 values.",
                    ));
                }
            },
            _ => {
                return Err(MaskError::MaskFormatError(
                    "Only plain numpy mask arrays are supported.",
                ));
            }
        };

        MaskBuffer::new(w, h, buffer)
    }

    /// Save the mask as a single-channel image or numpy array
    ///
    /// # Arguments
    ///
    /// * `path` - Output path with a valid extension (e.g. .png or .npy)
    ///
    /// ```no_run
    /// use maskit_core::im::MaskBuffer;
    /// let mask = MaskBuffer::zeros(4, 4);
    /// mask.save("mask.png").unwrap();
    /// ```
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), MaskError> {
        let display = path.as_ref().display().to_string();
        let write_error = |err: String| MaskError::ImageWriteError(format!("{} ({})", display, err));

        if let Some(ext) = lowercase_extension(&path) {
            if ext == "npy" {
                let mut bytes = vec![];
                let mut writer = npyz::WriteOptions::<u8>::new()
                    .default_dtype()
                    .shape(&[self.height() as u64, self.width() as u64])
                    .writer(&mut bytes)
                    .begin_nd()
                    .map_err(|err| write_error(err.to_string()))?;

                for pixel in self.iter() {
                    writer
                        .push(pixel)
                        .map_err(|err| write_error(err.to_string()))?;
                }

                writer.finish().map_err(|err| write_error(err.to_string()))?;

                return std::fs::write(&path, bytes).map_err(|err| write_error(err.to_string()));
            }

            if constant::IMAGE_DYNAMIC_FORMATS.iter().any(|e| e == &ext) {
                return GrayImage::from_raw(self.width(), self.height(), self.buffer.clone())
                    .ok_or(MaskError::BufferSizeError)?
                    .save(&path)
                    .map_err(|err| write_error(err.to_string()));
            }
        }

        Err(MaskError::ImageExtensionError)
    }
}

// <<< I/O METHODS

// >>> TRANSFORM METHODS

impl MaskBuffer {
    /// Resize the mask with bilinear interpolation
    ///
    /// # Arguments
    ///
    /// * `width` - New width following resizing
    /// * `height` - New height following resizing
    pub fn resize(&self, width: u32, height: u32) -> Result<MaskBuffer, MaskError> {
        if width == self.width() && height == self.height() {
            return Ok(self.clone());
        }

        if width == 0 || height == 0 || self.is_empty() {
            return Ok(MaskBuffer::zeros(width, height));
        }

        let source = GrayImage::from_raw(self.width(), self.height(), self.buffer.clone())
            .ok_or(MaskError::BufferSizeError)?;

        let buffer = resize_bilinear_fast(
            &DynamicImage::ImageLuma8(source),
            width,
            height,
            PixelType::U8,
        )?;

        MaskBuffer::new(width, height, buffer)
    }
}

// <<< TRANSFORM METHODS

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_mask_save_open_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.png");

        let mask = MaskBuffer::new(3, 2, vec![0, 255, 0, 0, 0, 255]).unwrap();
        mask.save(&path).unwrap();

        let opened = MaskBuffer::open(&path).unwrap();
        assert_eq!(opened, mask);
    }

    #[test]
    fn test_mask_save_open_numpy() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mask.npy");

        let mask = MaskBuffer::new(2, 3, vec![0, 255, 0, 0, 255, 255]).unwrap();
        mask.save(&path).unwrap();

        let opened = MaskBuffer::open(&path).unwrap();
        assert_eq!(opened.shape(), (3, 2));
        assert_eq!(opened.as_raw(), mask.as_raw());
    }

    #[test]
    fn test_mask_open_rgb_as_luma() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rgb.png");

        let mut rgb = image::RgbImage::new(2, 1);
        rgb.put_pixel(1, 0, image::Rgb([255, 255, 255]));
        rgb.save(&path).unwrap();

        let opened = MaskBuffer::open(&path).unwrap();
        assert_eq!(opened.as_raw(), &[0, 255]);
    }

    #[test]
    fn test_mask_open_missing() {
        let opened = MaskBuffer::open("does_not_exist/mask.png");
        assert!(matches!(opened, Err(MaskError::ImageReadError(_))));
    }

    #[test]
    fn test_mask_open_bad_extension() {
        let opened = MaskBuffer::open("mask.unknown");
        assert_eq!(opened, Err(MaskError::ImageExtensionError));

        let opened = MaskBuffer::open("mask");
        assert_eq!(opened, Err(MaskError::ImageExtensionError));
    }

    #[test]
    fn test_mask_resize_same_size() {
        let mask = MaskBuffer::new(2, 2, vec![0, 255, 255, 0]).unwrap();
        assert_eq!(mask.resize(2, 2).unwrap(), mask);
    }

    #[test]
    fn test_mask_resize_uniform() {
        let mask = MaskBuffer::new(4, 4, vec![255; 16]).unwrap();
        let resized = mask.resize(8, 2).unwrap();
        assert_eq!(resized.shape(), (2, 8));
        assert!(resized.iter().all(|&p| p == 255));
    }
}
