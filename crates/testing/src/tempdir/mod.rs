// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Scratch directories for tests that write capture artifacts.

use std::{
	env, fs,
	path::{Path, PathBuf},
};

use uuid::Uuid;

/// Artifact location used by the output tests, nested so that writing it
/// has to create the missing parent directories.
pub const ARTIFACT_PATH: &str = "out/dir/stack.json";

/// Runs `f` with a fresh, empty directory that is removed afterwards, and
/// returns what `f` returned.
pub fn temp_dir<F, T>(f: F) -> std::io::Result<T>
where
	F: FnOnce(&Path) -> std::io::Result<T>,
{
	let path = env::temp_dir().join(format!("framewatch-{}", Uuid::new_v4()));

	fs::create_dir(&path)?;
	let result = f(&path);

	let _ = fs::remove_dir_all(&path);
	result
}

/// [`ARTIFACT_PATH`] below `root`.
pub fn artifact_path(root: &Path) -> PathBuf {
	root.join(ARTIFACT_PATH)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_temp_dir_is_removed() {
		let seen = temp_dir(|path| {
			assert!(path.is_dir());
			assert_eq!(fs::read_dir(path)?.count(), 0);
			fs::write(path.join("file"), b"data")?;
			Ok(path.to_path_buf())
		})
		.unwrap();

		assert!(!seen.exists());
	}

	#[test]
	fn test_artifact_path_is_nested() {
		temp_dir(|root| {
			let path = artifact_path(root);
			assert!(path.starts_with(root));
			assert!(!path.parent().unwrap().exists());
			Ok(())
		})
		.unwrap();
	}
}
