use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::converter::config::{ConverterConfig, ResourcePaths};
use crate::converter::engine::{Colloquializer, ConvertedSentence};
use crate::errors::Result;
use crate::lexicon::Lexicon;
use crate::morphology::{MorphoDictionary, Morphology};
use crate::random::{RandomSource, RngSource};
use crate::tag::PositionalTagset;
use crate::tagger::{DictionaryTagger, Tagger};

/// Counters collected over one conversion run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ConversionStats {
	/// Sentences converted and written.
	pub sentences: usize,
	/// Lines the tagger could not segment.
	pub skipped: usize,
	pub fillers: usize,
	pub repetitions: usize,
	pub replacements: usize,
	pub regenerations: usize,
}

impl ConversionStats {
	fn record(&mut self, sentence: &ConvertedSentence) {
		self.sentences += 1;
		self.fillers += usize::from(sentence.filler.is_some());
		self.repetitions += usize::from(sentence.repeat_index.is_some());
		self.replacements += sentence.replacements;
		self.regenerations += sentence.regenerations;
	}
}

/// Line-oriented converter: one truecased sentence per input line, one
/// converted sentence per output line.
///
/// # Responsibilities
/// - Own the tagger, the generator, the lexicon and the configuration for the
///   whole process lifetime
/// - Feed each line through the tagger and the [`Colloquializer`]
/// - Skip lines the tagger cannot segment without affecting the others
#[derive(Debug)]
pub struct TextConverter<T: Tagger, M: Morphology> {
	tagger: T,
	morphology: M,
	lexicon: Lexicon,
	tagset: PositionalTagset,
	config: ConverterConfig,
}

impl TextConverter<DictionaryTagger, Arc<MorphoDictionary>> {
	/// Loads every resource and builds a converter with the default configuration.
	///
	/// The tagger reuses the generation dictionary unless a separate tagger
	/// dictionary is given.
	///
	/// # Errors
	/// Returns the first load failure; nothing partially loaded is kept.
	pub fn initialize(paths: &ResourcePaths) -> Result<Self> {
		let morphology = Arc::new(MorphoDictionary::load(&paths.morpho_dictionary)?);
		let tagger_dictionary = match &paths.tagger_dictionary {
			Some(path) if *path != paths.morpho_dictionary => Arc::new(MorphoDictionary::load(path)?),
			_ => Arc::clone(&morphology),
		};
		let lexicon = Lexicon::load(&paths.replacement_words, &paths.filler_words)?;
		Ok(Self::new(DictionaryTagger::new(tagger_dictionary), morphology, lexicon))
	}
}

impl<T: Tagger, M: Morphology> TextConverter<T, M> {
	pub fn new(tagger: T, morphology: M, lexicon: Lexicon) -> Self {
		Self {
			tagger,
			morphology,
			lexicon,
			tagset: PositionalTagset::default(),
			config: ConverterConfig::default(),
		}
	}

	pub fn with_config(mut self, config: ConverterConfig) -> Self {
		self.config = config;
		self
	}

	pub fn config(&self) -> &ConverterConfig {
		&self.config
	}

	pub fn set_config(&mut self, config: ConverterConfig) {
		self.config = config;
	}

	/// See [`ConverterConfig::set_filler_chance`].
	pub fn set_filler_chance(&mut self, filler_chance: i32) -> Result<(), String> {
		self.config.set_filler_chance(filler_chance)
	}

	/// See [`ConverterConfig::set_repetition_chance`].
	pub fn set_repetition_chance(&mut self, repetition_chance: i32) -> Result<(), String> {
		self.config.set_repetition_chance(repetition_chance)
	}

	pub fn lexicon(&self) -> &Lexicon {
		&self.lexicon
	}

	/// Engine bound to this converter's resources and current configuration.
	pub fn engine(&self) -> Colloquializer<'_, M> {
		Colloquializer::new(&self.lexicon, &self.morphology, &self.tagset, self.config)
	}

	/// Converts a whole stream with a fresh thread-local generator.
	///
	/// # Errors
	/// Only I/O errors of `input` or `output` are returned.
	pub fn convert<I: BufRead, W: Write>(&self, input: I, output: W) -> io::Result<ConversionStats> {
		let mut rng = RngSource(rand::rng());
		self.convert_with(input, output, &mut rng)
	}

	/// Converts a whole stream, drawing every decision from `rng`.
	///
	/// The same generator is used for all sentences of the stream. A blank line
	/// is written after the last sentence. Bytes that are not valid UTF-8 are
	/// replaced with U+FFFD, so they only affect their own line.
	///
	/// # Errors
	/// Only I/O errors of `input` or `output` are returned.
	pub fn convert_with<I, W, R>(&self, mut input: I, mut output: W, rng: &mut R) -> io::Result<ConversionStats>
	where
		I: BufRead,
		W: Write,
		R: RandomSource + ?Sized,
	{
		log::debug!(
			"Converting with filler chance {}, repetition chance {}",
			self.config.filler_chance(),
			self.config.repetition_chance()
		);
		let mut stats = ConversionStats::default();
		let mut buffer = Vec::new();
		loop {
			buffer.clear();
			if input.read_until(b'\n', &mut buffer)? == 0 {
				break;
			}
			// Invalid bytes become U+FFFD instead of ending the stream.
			let decoded = String::from_utf8_lossy(&buffer);
			let line = decoded.trim_end_matches(['\n', '\r']);
			match self.convert_line(line, rng) {
				Some(sentence) => {
					stats.record(&sentence);
					writeln!(output, "{}", sentence.to_line())?;
				}
				None => {
					log::warn!("Could not segment a sentence from \"{line}\", skipping it");
					stats.skipped += 1;
				}
			}
		}
		writeln!(output)?;
		output.flush()?;

		log::info!(
			"Converted {} sentences ({} skipped, {} fillers, {} repetitions, {} replacements, {} colloquial forms)",
			stats.sentences,
			stats.skipped,
			stats.fillers,
			stats.repetitions,
			stats.replacements,
			stats.regenerations
		);
		Ok(stats)
	}

	/// Tags and converts one line.
	///
	/// Returns `None` when the tagger finds no sentence in it.
	pub fn convert_line<R: RandomSource + ?Sized>(&self, line: &str, rng: &mut R) -> Option<ConvertedSentence> {
		let tokens = self.tagger.tokenize_and_segment(line)?;
		let words = self.tagger.tag(&tokens);
		log::debug!("Sentence tagged ({} tokens).", words.len());
		Some(self.engine().convert_sentence(&words, rng))
	}

	/// Converts a text held in memory.
	pub fn convert_text(&self, text: &str) -> io::Result<String> {
		let mut output = Vec::new();
		self.convert(text.as_bytes(), &mut output)?;
		String::from_utf8(output).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
	}
}
