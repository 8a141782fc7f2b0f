use std::sync::Arc;

use crate::morphology::MorphoDictionary;
use crate::tag::Tag;

/// A token as produced by the tagger.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TaggedWord {
	pub form: String,
	pub lemma: String,
	pub tag: Tag,
}

impl TaggedWord {
	pub fn new<F: Into<String>, L: Into<String>>(form: F, lemma: L, tag: Tag) -> Self {
		Self { form: form.into(), lemma: lemma.into(), tag }
	}
}

/// Tokenization and tagging of one input line.
///
/// The converter never tokenizes or tags on its own; it only consumes what a
/// `Tagger` returns.
pub trait Tagger {
	/// Splits a line into the tokens of one sentence.
	///
	/// Returns `None` when no sentence can be segmented; the line is then skipped.
	fn tokenize_and_segment(&self, line: &str) -> Option<Vec<String>>;

	/// Assigns a lemma and a tag to every token, one output word per token.
	fn tag(&self, forms: &[String]) -> Vec<TaggedWord>;
}

impl<T: Tagger + ?Sized> Tagger for Arc<T> {
	fn tokenize_and_segment(&self, line: &str) -> Option<Vec<String>> {
		(**self).tokenize_and_segment(line)
	}

	fn tag(&self, forms: &[String]) -> Vec<TaggedWord> {
		(**self).tag(forms)
	}
}

const PUNCTUATION_TAG: &str = "Z:-------------";
const NUMBER_TAG: &str = "C=-------------";
const UNKNOWN_TAG: &str = "X@-------------";

/// Tagger backed by a full-form dictionary.
///
/// - Tokens are whitespace separated; non-alphanumeric characters at the start
///   or the end of a chunk become one-character tokens of their own
/// - Each token gets the first reading of its exact form, then of its lowercased
///   form (sentence initial capitals); there is no contextual disambiguation
/// - Unknown tokens are tagged as punctuation, number or unknown word, with the
///   form itself as lemma
#[derive(Clone, Debug)]
pub struct DictionaryTagger {
	dictionary: Arc<MorphoDictionary>,
}

impl DictionaryTagger {
	pub fn new(dictionary: Arc<MorphoDictionary>) -> Self {
		Self { dictionary }
	}

	fn split_chunk(chunk: &str, tokens: &mut Vec<String>) {
		let is_word_char = |c: char| c.is_alphanumeric();
		let core_start = chunk.find(is_word_char);
		let Some(start) = core_start else {
			tokens.extend(chunk.chars().map(String::from));
			return;
		};
		// A word character exists, so rfind succeeds too.
		let end = chunk
			.rfind(is_word_char)
			.map_or(chunk.len(), |i| i + chunk[i..].chars().next().map_or(1, char::len_utf8));

		tokens.extend(chunk[..start].chars().map(String::from));
		tokens.push(chunk[start..end].to_owned());
		tokens.extend(chunk[end..].chars().map(String::from));
	}

	fn guess(form: &str) -> TaggedWord {
		let raw = if form.chars().all(|c| !c.is_alphanumeric()) {
			PUNCTUATION_TAG
		} else if form.chars().all(|c| c.is_ascii_digit()) {
			NUMBER_TAG
		} else {
			UNKNOWN_TAG
		};
		TaggedWord::new(form, form, Tag::from_static(raw))
	}
}

impl Tagger for DictionaryTagger {
	fn tokenize_and_segment(&self, line: &str) -> Option<Vec<String>> {
		let mut tokens = Vec::new();
		for chunk in line.split_whitespace() {
			Self::split_chunk(chunk, &mut tokens);
		}
		if tokens.is_empty() { None } else { Some(tokens) }
	}

	fn tag(&self, forms: &[String]) -> Vec<TaggedWord> {
		forms
			.iter()
			.map(|form| {
				let readings = match self.dictionary.analyze(form) {
					[] => self.dictionary.analyze(&form.to_lowercase()),
					readings => readings,
				};
				match readings.first() {
					Some(reading) => TaggedWord::new(form.as_str(), reading.lemma.as_str(), reading.tag.clone()),
					None => Self::guess(form),
				}
			})
			.collect()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::tag::{PartOfSpeech, PositionalTagset, Tagset};

	fn tagger() -> DictionaryTagger {
		let dictionary = MorphoDictionary::from_lines([
			"vidět\tVB-S---1P-AA---\tvidím",
			"bílý\tAAMS4----1A----\tbílého",
			"pes\tNNMS4-----A----\tpsa",
		]);
		DictionaryTagger::new(Arc::new(dictionary))
	}

	#[test]
	fn splits_punctuation_off_words() {
		let tokens = tagger().tokenize_and_segment("Vidím bílého psa.").unwrap();
		assert_eq!(tokens, ["Vidím", "bílého", "psa", "."]);
		let tokens = tagger().tokenize_and_segment("„Ahoj!“ ...").unwrap();
		assert_eq!(tokens, ["„", "Ahoj", "!", "“", ".", ".", "."]);
	}

	#[test]
	fn blank_line_is_not_a_sentence() {
		assert_eq!(tagger().tokenize_and_segment("   "), None);
	}

	#[test]
	fn tags_known_and_unknown_tokens() {
		let tagger = tagger();
		let tokens = tagger.tokenize_and_segment("Vidím bílého psa 3x 12 .").unwrap();
		let words = tagger.tag(&tokens);
		assert_eq!(words.len(), tokens.len());
		assert_eq!(words[0].lemma, "vidět");
		assert_eq!(words[0].form, "Vidím");
		assert_eq!(words[1].tag.as_str(), "AAMS4----1A----");
		assert_eq!(words[3].tag.as_str(), UNKNOWN_TAG);
		assert_eq!(words[3].lemma, "3x");
		assert_eq!(words[4].tag.as_str(), NUMBER_TAG);
		let tagset = PositionalTagset::default();
		assert_eq!(tagset.decode(&words[5].tag).pos, PartOfSpeech::Punctuation);
	}

	#[test]
	fn fallback_tags_are_valid() {
		for raw in [PUNCTUATION_TAG, NUMBER_TAG, UNKNOWN_TAG] {
			assert!(Tag::new(raw).is_ok());
		}
	}
}
