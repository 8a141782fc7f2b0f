//! Word lists consulted during conversion.
//!
//! Both lists are loaded once at startup and only read afterwards.

use std::path::Path;

use crate::errors::Result;

mod filler;
mod replacement;

pub use filler::FillerWords;
pub use replacement::ReplacementDictionary;

/// Position class of a filler word inside a sentence.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Position {
	Beginning,
	Middle,
	/// Loaded and insertable, but never drawn by the engine, which only picks
	/// between `Beginning` and `Middle`.
	End,
}

/// Read-only store holding the replacement dictionary and the filler words.
#[derive(Debug, Clone)]
pub struct Lexicon {
	replacements: ReplacementDictionary,
	fillers: FillerWords,
}

impl Lexicon {
	pub fn new(replacements: ReplacementDictionary, fillers: FillerWords) -> Self {
		Self { replacements, fillers }
	}

	/// Loads both word files.
	///
	/// # Errors
	/// Fails if either file cannot be read or the filler file is malformed.
	/// No partially loaded store is ever returned.
	pub fn load<R: AsRef<Path>, F: AsRef<Path>>(replacement_words: R, filler_words: F) -> Result<Self> {
		let replacements = ReplacementDictionary::load(replacement_words)?;
		let fillers = FillerWords::load(filler_words)?;
		Ok(Self::new(replacements, fillers))
	}

	pub fn replacements(&self) -> &ReplacementDictionary {
		&self.replacements
	}

	pub fn fillers(&self) -> &FillerWords {
		&self.fillers
	}
}
