//! Positional morphological tags.
//!
//! A tag is a fixed-length character code where each position carries one
//! grammatical category (Prague positional tagset). Only the positions the
//! converter needs are decoded:
//!
//! | offset | category           |
//! |--------|--------------------|
//! | 0      | part of speech     |
//! | 1      | detailed POS       |
//! | 2      | gender             |
//! | 3      | number             |
//! | 4      | case               |
//! | 14     | variant            |

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::{ColloqError, Result};

/// Minimum length of a positional tag.
pub const TAG_LENGTH: usize = 15;

/// Detailed part of speech of possessive pronouns.
pub const SUBPOS_POSSESSIVE: char = 'S';

/// A validated positional tag.
///
/// ## Invariants
/// - ASCII only, so character offsets and byte offsets coincide
/// - At least [`TAG_LENGTH`] characters long
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tag(String);

impl Tag {
	/// Validates and wraps a raw tag string.
	///
	/// # Errors
	/// Returns [`ColloqError::InvalidTag`] if the string is not ASCII or is too short.
	pub fn new<S: Into<String>>(raw: S) -> Result<Self> {
		let raw = raw.into();
		if !raw.is_ascii() {
			return Err(ColloqError::InvalidTag { tag: raw, reason: "tags must be ASCII" });
		}
		if raw.len() < TAG_LENGTH {
			return Err(ColloqError::InvalidTag { tag: raw, reason: "tag is shorter than 15 positions" });
		}
		Ok(Self(raw))
	}

	/// Wraps a constant known to satisfy the invariants.
	pub(crate) fn from_static(raw: &'static str) -> Self {
		debug_assert!(raw.is_ascii() && raw.len() >= TAG_LENGTH);
		Self(raw.to_owned())
	}

	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Character at a fixed offset.
	///
	/// Offsets below [`TAG_LENGTH`] always exist; anything further reads as `'-'`.
	pub fn at(&self, offset: usize) -> char {
		self.0.as_bytes().get(offset).map_or('-', |b| *b as char)
	}

	/// Returns a copy with a single position replaced, every other position untouched.
	///
	/// Non-ASCII replacements would break the invariant and are ignored.
	pub fn with_char(&self, offset: usize, value: char) -> Self {
		if !value.is_ascii() || offset >= self.0.len() {
			return self.clone();
		}
		let mut bytes = self.0.clone().into_bytes();
		bytes[offset] = value as u8;
		// Only an ASCII byte was swapped for another ASCII byte.
		Self(String::from_utf8(bytes).unwrap_or_else(|_| self.0.clone()))
	}

	/// Matches a tag pattern where `?` stands for any character.
	pub fn matches(&self, pattern: &Tag) -> bool {
		self.0.len() == pattern.0.len()
			&& self.0.bytes().zip(pattern.0.bytes()).all(|(t, p)| p == b'?' || t == p)
	}
}

impl TryFrom<String> for Tag {
	type Error = ColloqError;

	fn try_from(value: String) -> Result<Self> {
		Tag::new(value)
	}
}

impl From<Tag> for String {
	fn from(tag: Tag) -> Self {
		tag.0
	}
}

impl fmt::Display for Tag {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

/// Part of speech (offset 0).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PartOfSpeech {
	Adjective,
	Noun,
	Pronoun,
	Verb,
	Punctuation,
	Other(char),
}

impl PartOfSpeech {
	pub fn from_char(c: char) -> Self {
		match c {
			'A' => Self::Adjective,
			'N' => Self::Noun,
			'P' => Self::Pronoun,
			'V' => Self::Verb,
			'Z' => Self::Punctuation,
			other => Self::Other(other),
		}
	}
}

/// Gender (offset 2).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gender {
	MasculineAnimate,
	MasculineInanimate,
	Neuter,
	Feminine,
	Other(char),
}

impl Gender {
	pub fn from_char(c: char) -> Self {
		match c {
			'M' => Self::MasculineAnimate,
			'I' => Self::MasculineInanimate,
			'N' => Self::Neuter,
			'F' => Self::Feminine,
			other => Self::Other(other),
		}
	}
}

/// Grammatical number (offset 3).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Number {
	Singular,
	Plural,
	Other(char),
}

impl Number {
	pub fn from_char(c: char) -> Self {
		match c {
			'S' => Self::Singular,
			'P' => Self::Plural,
			other => Self::Other(other),
		}
	}
}

/// Style variant (offset 14).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Variant {
	Basic,
	Colloquial,
	Other(char),
}

impl Variant {
	pub fn from_char(c: char) -> Self {
		match c {
			'-' => Self::Basic,
			'6' => Self::Colloquial,
			other => Self::Other(other),
		}
	}

	pub fn as_char(self) -> char {
		match self {
			Self::Basic => '-',
			Self::Colloquial => '6',
			Self::Other(c) => c,
		}
	}
}

/// Decoded attributes of a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TagFeatures {
	pub pos: PartOfSpeech,
	pub subpos: char,
	pub gender: Gender,
	pub number: Number,
	/// Case digit, `'1'`..`'7'`, or `'-'` when not applicable.
	pub case: char,
	pub variant: Variant,
}

impl TagFeatures {
	/// Plural in the seventh (instrumental) case.
	pub fn is_plural_instrumental(&self) -> bool {
		self.number == Number::Plural && self.case == '7'
	}
}

/// Decoding and re-encoding of tags. The engine reads tags only through this trait.
pub trait Tagset {
	fn decode(&self, tag: &Tag) -> TagFeatures;

	/// Same tag with only the variant replaced.
	fn with_variant(&self, tag: &Tag, variant: Variant) -> Tag;
}

/// Offsets of the Prague positional tagset.
#[derive(Clone, Copy, Debug)]
pub struct PositionalTagset {
	pub pos: usize,
	pub subpos: usize,
	pub gender: usize,
	pub number: usize,
	pub case: usize,
	pub variant: usize,
}

impl Default for PositionalTagset {
	fn default() -> Self {
		Self { pos: 0, subpos: 1, gender: 2, number: 3, case: 4, variant: 14 }
	}
}

impl Tagset for PositionalTagset {
	fn decode(&self, tag: &Tag) -> TagFeatures {
		TagFeatures {
			pos: PartOfSpeech::from_char(tag.at(self.pos)),
			subpos: tag.at(self.subpos),
			gender: Gender::from_char(tag.at(self.gender)),
			number: Number::from_char(tag.at(self.number)),
			case: tag.at(self.case),
			variant: Variant::from_char(tag.at(self.variant)),
		}
	}

	fn with_variant(&self, tag: &Tag, variant: Variant) -> Tag {
		tag.with_char(self.variant, variant.as_char())
	}
}
