//! Error definitions.
//!
//! Every failure that aborts initialization is a [`ColloqError`]. Per-sentence
//! problems (a line the tagger cannot segment, a generation miss) are not errors:
//! they are logged and the pipeline goes on.

use std::path::PathBuf;

use crate::lexicon::Position;

/// Result type defaulting to [`ColloqError`].
pub type Result<T, E = ColloqError> = std::result::Result<T, E>;

/// Errors raised while loading resources.
#[derive(Debug, thiserror::Error)]
pub enum ColloqError {
	/// A resource file could not be opened or read.
	#[error("failed to read '{}': {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// A block tag of the filler word file appeared out of order.
	#[error("filler words, line {line}: expected tag \"{expected}\" but got \"{found}\"")]
	UnexpectedFillerTag {
		line: usize,
		expected: String,
		found: String,
	},

	/// A filler word appeared outside of any `<beginning>`, `<middle>` or `<end>` block.
	#[error("filler words, line {line}: word \"{word}\" is not inside a block (expected tag \"{expected}\")")]
	FillerWordOutsideBlock {
		line: usize,
		word: String,
		expected: String,
	},

	/// The filler word file ended before every block was closed.
	#[error("filler words: unexpected end of file, expected tag \"{expected}\"")]
	UnclosedFillerBlock { expected: String },

	/// A filler block was present but contained no word.
	#[error("filler words: the {0:?} list is empty")]
	EmptyFillerList(Position),

	/// A string does not satisfy the positional tag contract.
	#[error("invalid tag \"{tag}\": {reason}")]
	InvalidTag { tag: String, reason: &'static str },

	/// The binary dictionary cache could not be encoded or decoded.
	#[error(transparent)]
	Cache(#[from] postcard::Error),

	/// A worker thread died while building a dictionary.
	#[error("dictionary worker failed: {0}")]
	Worker(String),
}

impl ColloqError {
	/// Wraps an I/O error with the path it concerns.
	pub(crate) fn io<P: Into<PathBuf>>(path: P, source: std::io::Error) -> Self {
		Self::Io { path: path.into(), source }
	}
}
