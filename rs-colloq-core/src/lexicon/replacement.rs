use std::collections::HashMap;
use std::path::Path;

use crate::errors::Result;
use crate::io::read_lines;

/// Maps a surface form or a lemma to the lemma of an informal replacement.
///
/// # File format
/// - One entry per line: `key<TAB>replacement`
/// - Lines starting with `#` are comments, blank lines are ignored
/// - Lines with another number of fields are logged and skipped
///
/// # Invariants
/// - Keys are unique; when the file repeats a key, the last line wins
#[derive(Debug, Clone, Default)]
pub struct ReplacementDictionary {
	entries: HashMap<String, String>,
}

impl ReplacementDictionary {
	/// Loads the dictionary from a file.
	///
	/// # Errors
	/// Returns an error if the file cannot be read.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let dictionary = Self::from_lines(read_lines(&filepath)?);
		log::info!(
			"Loaded {} replacement words from {}",
			dictionary.len(),
			filepath.as_ref().display()
		);
		Ok(dictionary)
	}

	/// Builds the dictionary from already read lines.
	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut entries = HashMap::new();
		for (number, line) in lines.into_iter().enumerate() {
			let line = line.as_ref();
			if line.starts_with('#') || line.trim().is_empty() {
				continue;
			}
			let fields: Vec<&str> = line.split('\t').collect();
			match fields.as_slice() {
				[key, value] => {
					log::debug!("[{key}] = {value}");
					entries.insert((*key).to_owned(), (*value).to_owned());
				}
				_ => log::warn!(
					"Replacement words, line {}: expected 2 tab separated fields, got {}",
					number + 1,
					fields.len()
				),
			}
		}
		Self { entries }
	}

	/// Returns the replacement for a word, checking the surface form before the lemma.
	pub fn lookup(&self, surface: &str, lemma: &str) -> Option<&str> {
		self.entries
			.get(surface)
			.or_else(|| self.entries.get(lemma))
			.map(String::as_str)
	}

	pub fn contains(&self, key: &str) -> bool {
		self.entries.contains_key(key)
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}
