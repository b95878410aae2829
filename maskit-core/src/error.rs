// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum MaskError {
    AnnotationReadError(String),
    BufferSizeError,
    DirError(String),
    ImageReadError(String),
    ImageWriteError(String),
    ImageExtensionError,
    MaskFormatError(&'static str),
    NoFileError(String),
    ResizeError,
    TableError(String),
}

impl fmt::Display for MaskError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MaskError::AnnotationReadError(message) => {
                write!(
                    f,
                    "[maskit::AnnotationReadError] Annotations could not be parsed. {}.",
                    message
                )
            }
            MaskError::BufferSizeError => {
                write!(
                    f,
                    "[maskit::BufferSizeError] The buffer does not match provided size."
                )
            }
            MaskError::DirError(message) => {
                write!(
                    f,
                    "[maskit::DirError] Directory could not be read or created. {}.",
                    message
                )
            }
            MaskError::ImageReadError(message) => {
                write!(
                    f,
                    "[maskit::ImageReadError] Failed to read mask {}.",
                    message
                )
            }
            MaskError::ImageWriteError(message) => {
                write!(
                    f,
                    "[maskit::ImageWriteError] Failed to write mask {}.",
                    message
                )
            }
            MaskError::ImageExtensionError => {
                write!(
                    f,
                    "[maskit::ImageExtensionError] Could not detect a valid image extension for input."
                )
            }
            MaskError::MaskFormatError(message) => {
                write!(
                    f,
                    "[maskit::MaskFormatError] Unsupported mask layout. {}",
                    message
                )
            }
            MaskError::NoFileError(message) => {
                write!(
                    f,
                    "[maskit::NoFileError] File could not be found. {}.",
                    message
                )
            }
            MaskError::ResizeError => {
                write!(
                    f,
                    "[maskit::ResizeError] Failed to resize candidate mask to reference dimensions."
                )
            }
            MaskError::TableError(message) => {
                write!(f, "[maskit::TableError] {}.", message)
            }
        }
    }
}

impl std::error::Error for MaskError {}
