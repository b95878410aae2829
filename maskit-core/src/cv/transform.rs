// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use fast_image_resize;
use fast_image_resize::{FilterType, PixelType, images::Image};
use image::DynamicImage;

use crate::error::MaskError;

/// Resize a 2D u8 image using the SIMD-accelerated fast-image-resize crate
///
/// Plain bilinear interpolation blends only the nearest source pixels, so
/// downscaling does not smear thin structures before thresholding.
///
/// # Arguments
///
/// * `source` - A DynamicImage with u8 subpixel type
/// * `new_width` - New width following resizing
/// * `new_height` - New height following resizing
/// * `pixel_type` - Luma or RGB pixel type
pub fn resize_bilinear_fast(
    source: &DynamicImage,
    new_width: u32,
    new_height: u32,
    pixel_type: PixelType,
) -> Result<Vec<u8>, MaskError> {
    let mut destination = Image::new(new_width, new_height, pixel_type);

    let mut resizer = fast_image_resize::Resizer::new();
    let option = fast_image_resize::ResizeOptions {
        algorithm: fast_image_resize::ResizeAlg::Interpolation(FilterType::Bilinear),
        cropping: fast_image_resize::SrcCropping::None,
        mul_div_alpha: false,
    };

    resizer
        .resize(source, &mut destination, &option)
        .map_err(|_| MaskError::ResizeError)?;

    Ok(destination.into_vec())
}
