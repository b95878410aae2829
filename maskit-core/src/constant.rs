// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

// Formats decoded and encoded through image-rs
pub const IMAGE_DYNAMIC_FORMATS: [&str; 17] = [
    "avif", "bmp", "dds", "hdr", "ico", "jpeg", "jpg", "exr", "png", "pbm", "pgm", "ppm", "qoi",
    "tga", "tif", "tiff", "webp",
];

// Table formats accepted for comparison results
pub const SUPPORTED_TABLE_FORMATS: [&str; 5] = ["csv", "tsv", "txt", "parquet", "pq"];

// Pixel value written for every rasterized shape
pub const FOREGROUND: u8 = 255;

// Intensities strictly above this value are foreground after binarization
pub const BINARY_THRESHOLD: u8 = 127;

// Stroke width of open polylines
pub const POLYLINE_THICKNESS: u32 = 2;

// Default canvas size (width, height) for rasterized frames
pub const DEFAULT_CANVAS_SIZE: (u32, u32) = (1500, 1500);

// Reference masks are files named `mask_frame*.png`
pub const REFERENCE_PREFIX: &str = "mask_frame";
pub const REFERENCE_SUFFIX: &str = ".png";

// Default candidate naming `<prefix><frame + offset><suffix>`
pub const CANDIDATE_PREFIX: &str = "mejorada_recortada_0301-";
pub const CANDIDATE_SUFFIX: &str = "_mascara.png";
pub const CANDIDATE_FRAME_OFFSET: i64 = 1;

// Reserved key holding the mean of all compared pairs
pub const OVERALL_KEY: &str = "Overall";
