use crate::converter::config::ConverterConfig;
use crate::lexicon::{Lexicon, Position};
use crate::morphology::Morphology;
use crate::random::RandomSource;
use crate::tag::{PartOfSpeech, SUBPOS_POSSESSIVE, Tag, TagFeatures, Tagset, Variant};
use crate::tagger::TaggedWord;

/// A dictionary hit is replaced when a roll in `0..10` is below this value.
const REPLACEMENT_CHANCE_IN_TEN: usize = 6;

/// A filler word chosen for a sentence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Filler {
	pub word: String,
	pub position: Position,
	/// The filler is emitted right before the output word at this index.
	pub index: usize,
}

/// Sentence level decisions, taken before the words are transformed.
///
/// # Invariants
/// - `filler.index` is in `0..len`
/// - After [`SentencePlan::settle`], `repeat_index` is in `0..len` or `None`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SentencePlan {
	pub filler: Option<Filler>,
	pub repeat_index: Option<usize>,
}

impl SentencePlan {
	/// Moves a pending repetition off a punctuation token onto the next token.
	///
	/// Called for every punctuation token in sentence order, so a run of
	/// punctuation keeps pushing the index forward.
	pub fn skip_punctuation(&mut self, index: usize) {
		if self.repeat_index == Some(index) {
			log::debug!("Repeat index {index} is punctuation, trying the next word");
			self.repeat_index = Some(index + 1);
		}
	}

	/// Drops a repetition that was pushed past the last word.
	pub fn settle(&mut self, len: usize) {
		if let Some(index) = self.repeat_index {
			if index >= len {
				log::debug!("Repeat index {index} is past the end of the sentence, no repetition");
				self.repeat_index = None;
			}
		}
	}

	/// Interleaves the filler word and the repeated word with the output words.
	pub fn assemble(&self, words: Vec<String>) -> Vec<String> {
		let extra = usize::from(self.filler.is_some()) + usize::from(self.repeat_index.is_some());
		let mut sentence = Vec::with_capacity(words.len() + extra);
		for (index, word) in words.into_iter().enumerate() {
			if let Some(filler) = self.filler.as_ref().filter(|f| f.index == index) {
				sentence.push(filler.word.clone());
			}
			if self.repeat_index == Some(index) {
				sentence.push(word.clone());
			}
			sentence.push(word);
		}
		sentence
	}
}

/// Result of converting one sentence.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConvertedSentence {
	/// Output tokens, filler and repetition included.
	pub words: Vec<String>,
	pub filler: Option<Filler>,
	/// Effective repeat index, after moving off punctuation.
	pub repeat_index: Option<usize>,
	pub replacements: usize,
	pub regenerations: usize,
}

impl ConvertedSentence {
	/// Tokens joined by single spaces.
	pub fn to_line(&self) -> String {
		self.words.join(" ")
	}
}

/// The colloquialization engine.
///
/// Holds only shared, read-only collaborators. Every call to
/// [`Colloquializer::convert_sentence`] starts from scratch; nothing carries
/// over between sentences except the random source owned by the caller.
pub struct Colloquializer<'a, M: Morphology + ?Sized> {
	lexicon: &'a Lexicon,
	morphology: &'a M,
	tagset: &'a dyn Tagset,
	config: ConverterConfig,
}

impl<'a, M: Morphology + ?Sized> Colloquializer<'a, M> {
	pub fn new(lexicon: &'a Lexicon, morphology: &'a M, tagset: &'a dyn Tagset, config: ConverterConfig) -> Self {
		Self { lexicon, morphology, tagset, config }
	}

	/// Converts one tagged sentence.
	///
	/// Random draws happen in a fixed order: the sentence plan first (see
	/// [`Colloquializer::plan`]), then one replacement roll per dictionary hit.
	pub fn convert_sentence<R: RandomSource + ?Sized>(&self, sentence: &[TaggedWord], rng: &mut R) -> ConvertedSentence {
		let mut plan = self.plan(sentence.len(), rng);
		let mut replacements = 0;
		let mut regenerations = 0;

		let mut words = Vec::with_capacity(sentence.len());
		for (index, word) in sentence.iter().enumerate() {
			log::debug!("originalWord: {}, lemma: {}, tag: {}", word.form, word.lemma, word.tag);
			let features = self.tagset.decode(&word.tag);

			let replacement = self.replace(word, &features, rng);
			let replaced = replacement.is_some();
			if replaced {
				replacements += 1;
			}
			let current = replacement.unwrap_or_else(|| word.form.clone());

			let output = match features.pos {
				// "bílého psa" -> "bílýho psa"
				PartOfSpeech::Adjective => {
					// Replacements are stored as lemmas, so a replaced word is its own lemma.
					if replaced {
						self.regenerate(&current, &current, &word.tag)
					} else {
						self.regenerate(&word.form, &word.lemma, &word.tag)
					}
				}
				// "ženami" -> "ženama"
				PartOfSpeech::Noun if features.is_plural_instrumental() => {
					if replaced {
						self.regenerate(&current, &current, &word.tag)
					} else {
						self.regenerate(&word.form, &word.lemma, &word.tag)
					}
				}
				// "mého psa" -> "mýho psa"; keeps the original lemma even after a replacement.
				PartOfSpeech::Pronoun if features.subpos == SUBPOS_POSSESSIVE => {
					self.regenerate(&current, &word.lemma, &word.tag)
				}
				PartOfSpeech::Punctuation => {
					plan.skip_punctuation(index);
					Regenerated::Kept(current)
				}
				_ => Regenerated::Kept(current),
			};

			if let Regenerated::Generated(_) = output {
				regenerations += 1;
			}
			words.push(output.into_form());
		}

		plan.settle(words.len());
		ConvertedSentence {
			words: plan.assemble(words),
			filler: plan.filler,
			repeat_index: plan.repeat_index,
			replacements,
			regenerations,
		}
	}

	/// Takes the filler and repetition decisions for a sentence of `len` tokens.
	///
	/// Draws: filler roll `[1,100]`; when a filler is used, its position, its
	/// word and (middle only) its index; then the repetition roll `[1,100]` and,
	/// when repeating, the repeat index.
	pub fn plan<R: RandomSource + ?Sized>(&self, len: usize, rng: &mut R) -> SentencePlan {
		let filler = self.decide_filler(len, rng);
		let repeat_index = self.decide_repetition(len, rng);
		SentencePlan { filler, repeat_index }
	}

	fn decide_filler<R: RandomSource + ?Sized>(&self, len: usize, rng: &mut R) -> Option<Filler> {
		let roll = rng.next_in(1, 101);
		if len == 0 || roll > self.config.filler_chance() as usize {
			return None;
		}

		// The end of a sentence is never drawn here, see `Position::End`.
		let position = match rng.next_in(0, 2) {
			0 => Position::Beginning,
			_ => Position::Middle,
		};
		let word = self.lexicon.fillers().pick(position, rng).to_owned();
		let index = insertion_index(position, len, rng);
		log::debug!("Filler word \"{word}\" at {position:?}, index {index}");
		Some(Filler { word, position, index })
	}

	fn decide_repetition<R: RandomSource + ?Sized>(&self, len: usize, rng: &mut R) -> Option<usize> {
		let roll = rng.next_in(1, 101);
		if len == 0 || roll >= self.config.repetition_chance() as usize {
			return None;
		}
		// The last token is assumed to be the closing punctuation.
		let index = rng.next_in(0, len - 1);
		log::debug!("Repeat word index: {index}");
		Some(index)
	}

	/// Looks the word up in the replacement dictionary and, on a successful roll,
	/// returns the surface form of its replacement.
	///
	/// - Nouns: the replacement inflected like the original, or the bare
	///   replacement lemma when it cannot be (typically a gender mismatch)
	/// - Verbs: the replacement inflected like the original, or the original form,
	///   since a wrongly conjugated verb reads worse than no replacement
	/// - Anything else: the replacement lemma as is
	fn replace<R: RandomSource + ?Sized>(&self, word: &TaggedWord, features: &TagFeatures, rng: &mut R) -> Option<String> {
		let replacement = self.lexicon.replacements().lookup(&word.form, &word.lemma)?;
		log::debug!("Found the word \"{}\" in the dictionary.", word.form);
		if rng.next_in(0, 10) >= REPLACEMENT_CHANCE_IN_TEN {
			log::debug!("Replacement for \"{}\" won't take place.", word.form);
			return None;
		}

		let form = match features.pos {
			PartOfSpeech::Noun => self
				.first_form(replacement, &word.tag)
				.unwrap_or_else(|| replacement.to_owned()),
			PartOfSpeech::Verb => self
				.first_form(replacement, &word.tag)
				.unwrap_or_else(|| word.form.clone()),
			_ => replacement.to_owned(),
		};
		log::debug!("Replacing \"{}\" with \"{form}\".", word.form);
		Some(form)
	}

	/// Generates the colloquial variant of `lemma` with the attributes of `tag`,
	/// keeping `fallback` when the generator has nothing.
	fn regenerate(&self, fallback: &str, lemma: &str, tag: &Tag) -> Regenerated {
		let colloquial = self.tagset.with_variant(tag, Variant::Colloquial);
		match self.first_form(lemma, &colloquial) {
			Some(form) => Regenerated::Generated(form),
			None => Regenerated::Kept(fallback.to_owned()),
		}
	}

	/// First candidate of the generator; further candidates are ignored.
	fn first_form(&self, lemma: &str, tag: &Tag) -> Option<String> {
		self.morphology.generate(lemma, tag).into_iter().next()
	}
}

/// Outcome of a regeneration attempt.
enum Regenerated {
	Generated(String),
	Kept(String),
}

impl Regenerated {
	fn into_form(self) -> String {
		match self {
			Regenerated::Generated(form) | Regenerated::Kept(form) => form,
		}
	}
}

/// Index of the output word a filler is inserted before.
///
/// - Beginning: 0
/// - Middle: uniform in `1..len-1`, i.e. never first and never before the
///   closing punctuation; short sentences fall back to 1 (clamped to the last word)
/// - End: right before the closing punctuation
///
/// `len` must be positive.
pub(crate) fn insertion_index<R: RandomSource + ?Sized>(position: Position, len: usize, rng: &mut R) -> usize {
	let last = len.saturating_sub(1);
	match position {
		Position::Beginning => 0,
		Position::Middle if len >= 3 => rng.next_in(1, len - 1),
		Position::Middle => 1.min(last),
		Position::End => last,
	}
}
