use std::fs;
use std::path::{Path, PathBuf};

use crate::errors::{ColloqError, Result};

/// Reads a UTF-8 text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Drops a leading byte order mark
/// - Splits on `\n` / `\r\n`
pub(crate) fn read_lines<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let contents = fs::read_to_string(path).map_err(|e| ColloqError::io(path, e))?;
	let contents = contents.strip_prefix('\u{feff}').unwrap_or(contents.as_str());
	Ok(contents.lines().map(str::to_owned).collect())
}

/// Builds an output path based on an input path and a new extension.
///
/// Example:
/// `files/morpho.dict` + `"bin"` → `files/morpho.bin`
pub(crate) fn build_output_path<P: AsRef<Path>>(input_path: P, output_extension: &str) -> Result<PathBuf> {
	let input_path = input_path.as_ref();

	let parent = input_path.parent().unwrap_or_else(|| Path::new("."));
	let file_stem = input_path.file_stem().ok_or_else(|| {
		ColloqError::io(
			input_path,
			std::io::Error::new(std::io::ErrorKind::InvalidInput, "Input path has no filename"),
		)
	})?;

	let mut output = PathBuf::from(parent);
	output.push(file_stem);
	output.set_extension(output_extension);

	Ok(output)
}

/// Returns `true` when `derived` exists and was modified no earlier than `source`.
///
/// Any metadata failure counts as stale.
pub(crate) fn is_up_to_date<S: AsRef<Path>, D: AsRef<Path>>(source: S, derived: D) -> bool {
	let modified = |p: &Path| fs::metadata(p).and_then(|m| m.modified()).ok();
	match (modified(source.as_ref()), modified(derived.as_ref())) {
		(Some(source_time), Some(derived_time)) => derived_time >= source_time,
		_ => false,
	}
}
