// Copyright (c) 2025-2026, Tom Ouellette
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// A copy of the License has been included in the root of the repository.

use std::path::{Path, PathBuf};

use crate::error::MaskError;

/// Ensures a directory (and its parents) exists, reusing it if already present
///
/// # Arguments
///
/// * `directory` - Path to the output directory
///
/// # Examples
///
/// ```
/// use std::path::Path;
/// use maskit_core::ut::path::ensure_directory;
///
/// let base = Path::new("TEST_ENSURE_DIRECTORY/nested");
///
/// ensure_directory(base).unwrap();
/// ensure_directory(base).unwrap();
/// assert!(base.is_dir());
///
/// std::fs::remove_dir_all("TEST_ENSURE_DIRECTORY").unwrap();
/// ```
pub fn ensure_directory<P: AsRef<Path>>(directory: P) -> Result<PathBuf, MaskError> {
    let directory = directory.as_ref();

    if directory.is_dir() {
        return Ok(directory.to_path_buf());
    }

    std::fs::create_dir_all(directory).map_err(|err| {
        MaskError::DirError(format!("{} ({})", directory.display(), err))
    })?;

    Ok(directory.to_path_buf())
}

/// Collect sorted file names in a directory matching a prefix and suffix
///
/// # Arguments
///
/// * `directory` - Path to directory containing files
/// * `prefix` - Only include files whose name starts with this prefix
/// * `suffix` - Only include files whose name ends with this suffix
///
/// # Examples
///
/// ```no_run
/// use maskit_core::ut::path::collect_file_names;
/// let files = collect_file_names("directory/", "mask_frame", ".png");
/// ```
pub fn collect_file_names<P: AsRef<Path>>(
    directory: P,
    prefix: &str,
    suffix: &str,
) -> Result<Vec<String>, MaskError> {
    let directory = directory.as_ref();

    let mut files: Vec<String> = std::fs::read_dir(directory)
        .map_err(|err| MaskError::DirError(format!("{} ({})", directory.display(), err)))?
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|name| name.starts_with(prefix) && name.ends_with(suffix))
        .collect();

    files.sort();

    Ok(files)
}

#[cfg(test)]
mod test {

    use super::*;

    #[test]
    fn test_collect_file_names_sorted_and_filtered() {
        let dir = tempfile::tempdir().unwrap();

        for name in [
            "mask_frame_2_10x10.png",
            "mask_frame_10_10x10.png",
            "mask_frame_1_10x10.png",
            "mask_frame_3_10x10.jpg",
            "other_frame_1.png",
        ] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }

        std::fs::create_dir(dir.path().join("mask_frame_dir.png")).unwrap();

        let files = collect_file_names(dir.path(), "mask_frame", ".png").unwrap();

        assert_eq!(
            files,
            vec![
                "mask_frame_10_10x10.png",
                "mask_frame_1_10x10.png",
                "mask_frame_2_10x10.png",
            ]
        );
    }

    #[test]
    fn test_collect_file_names_missing_directory() {
        let files = collect_file_names("does_not_exist/", "mask_frame", ".png");
        assert!(matches!(files, Err(MaskError::DirError(_))));
    }

    #[test]
    fn test_ensure_directory_nested() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("a").join("b");

        let created = ensure_directory(&nested).unwrap();
        assert_eq!(created, nested);
        assert!(nested.is_dir());

        assert!(ensure_directory(&nested).is_ok());
    }
}
