use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, mpsc};
use std::thread;

use serde::{Deserialize, Serialize};

use crate::errors::{ColloqError, Result};
use crate::io::{build_output_path, is_up_to_date, read_lines};
use crate::tag::Tag;

/// Morphological generation: lemma + target tag → surface forms.
///
/// An empty result is a normal outcome, meaning the generator knows no form
/// for that combination. Candidates come in the generator's own order.
pub trait Morphology {
	fn generate(&self, lemma: &str, tag: &Tag) -> Vec<String>;
}

impl<M: Morphology + ?Sized> Morphology for Arc<M> {
	fn generate(&self, lemma: &str, tag: &Tag) -> Vec<String> {
		(**self).generate(lemma, tag)
	}
}

impl<M: Morphology + ?Sized> Morphology for &M {
	fn generate(&self, lemma: &str, tag: &Tag) -> Vec<String> {
		(**self).generate(lemma, tag)
	}
}

/// One reading of a surface form.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Analysis {
	pub lemma: String,
	pub tag: Tag,
}

/// Inflected form of a lemma.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
struct InflectedForm {
	tag: Tag,
	form: String,
}

/// Full-form morphological dictionary.
///
/// Built from a text file with one `lemma<TAB>tag<TAB>form` entry per line
/// (`#` comments, blank lines ignored), it serves both directions:
/// - Generation: lemma + tag pattern → forms (see [`Morphology`])
/// - Analysis: form → (lemma, tag) readings, used by the dictionary tagger
///
/// ## Invariants
/// - Entries keep the order of the source file in both indexes
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct MorphoDictionary {
	/// Lemma → all its inflected forms.
	forms: HashMap<String, Vec<InflectedForm>>,
	/// Surface form → all its readings.
	analyses: HashMap<String, Vec<Analysis>>,
	entries: usize,
}

impl MorphoDictionary {
	/// Loads the dictionary, preferring a fresh binary cache.
	///
	/// - A `.bin` file next to the source that is newer than the source is
	///   decoded with `postcard` instead of parsing the text
	/// - Otherwise the text is parsed in parallel and the cache is rewritten
	/// - A source that already has the `.bin` extension is parsed without any cache
	///
	/// # Errors
	/// Fails if the source cannot be read or the cache cannot be decoded.
	/// Failing to write the cache is only logged.
	pub fn load<P: AsRef<Path>>(filepath: P) -> Result<Self> {
		let source = filepath.as_ref();
		let binary_data_path = build_output_path(source, "bin")?;
		if binary_data_path == source {
			log::warn!("{} would be its own cache, loading it without one", source.display());
			let dictionary = Self::read_dictionary_file(source)?;
			log::info!("Morphological dictionary loaded from {} ({} entries)", source.display(), dictionary.entries);
			return Ok(dictionary);
		}

		if is_up_to_date(source, &binary_data_path) {
			let bytes = std::fs::read(&binary_data_path).map_err(|e| ColloqError::io(&binary_data_path, e))?;
			let dictionary: Self = postcard::from_bytes(&bytes)?;
			log::info!(
				"Morphological dictionary loaded from cache {} ({} entries)",
				binary_data_path.display(),
				dictionary.entries
			);
			return Ok(dictionary);
		}

		let dictionary = Self::read_dictionary_file(source)?;
		match postcard::to_stdvec(&dictionary) {
			Ok(bytes) => {
				if let Err(e) = std::fs::write(&binary_data_path, bytes) {
					log::warn!("Could not write dictionary cache {}: {e}", binary_data_path.display());
				}
			}
			Err(e) => log::warn!("Could not encode dictionary cache: {e}"),
		}
		log::info!("Morphological dictionary loaded from {} ({} entries)", source.display(), dictionary.entries);
		Ok(dictionary)
	}

	/// Reads the text dictionary, splits its lines into chunks, parses the chunks
	/// in parallel and merges the partial dictionaries back in chunk order.
	fn read_dictionary_file(filename: &Path) -> Result<Self> {
		let lines = read_lines(filename)?;
		let cpus = num_cpus::get();
		let factor = 8;
		let chunks = cpus * factor;
		let chunk_size = lines.len().div_ceil(chunks).max(1);

		let (tx, rx) = mpsc::channel();
		let mut handles = Vec::new();
		for (index, chunk) in lines.chunks(chunk_size).enumerate() {
			let tx = tx.clone();
			let chunk: Vec<String> = chunk.to_vec();
			let first_line = index * chunk_size + 1;

			handles.push(thread::spawn(move || {
				let partial = Self::from_lines_numbered(chunk, first_line);
				if tx.send((index, partial)).is_err() {
					log::error!("Dictionary chunk {index} could not be delivered");
				}
			}));
		}
		drop(tx);

		let mut partials: Vec<(usize, Self)> = rx.iter().collect();
		for handle in handles {
			if handle.join().is_err() {
				return Err(ColloqError::Worker("a parsing thread panicked".to_owned()));
			}
		}
		partials.sort_by_key(|(index, _)| *index);

		let mut dictionary = Self::default();
		for (_, partial) in partials {
			dictionary.merge(partial);
		}
		Ok(dictionary)
	}

	/// Builds a dictionary from already read lines.
	pub fn from_lines<I, S>(lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		Self::from_lines_numbered(lines, 1)
	}

	fn from_lines_numbered<I, S>(lines: I, first_line: usize) -> Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let mut dictionary = Self::default();
		for (offset, line) in lines.into_iter().enumerate() {
			let line = line.as_ref();
			if line.starts_with('#') || line.trim().is_empty() {
				continue;
			}
			let fields: Vec<&str> = line.split('\t').collect();
			let [lemma, tag, form] = fields.as_slice() else {
				log::warn!(
					"Morphological dictionary, line {}: expected 3 tab separated fields, got {}",
					first_line + offset,
					fields.len()
				);
				continue;
			};
			match Tag::new(*tag) {
				Ok(tag) => dictionary.insert(lemma, tag, form),
				Err(e) => log::warn!("Morphological dictionary, line {}: {e}", first_line + offset),
			}
		}
		dictionary
	}

	/// Adds one entry at the end of both indexes.
	pub fn insert(&mut self, lemma: &str, tag: Tag, form: &str) {
		self.forms
			.entry(lemma.to_owned())
			.or_default()
			.push(InflectedForm { tag: tag.clone(), form: form.to_owned() });
		self.analyses
			.entry(form.to_owned())
			.or_default()
			.push(Analysis { lemma: lemma.to_owned(), tag });
		self.entries += 1;
	}

	/// Appends every entry of `other` after the entries of `self`.
	pub fn merge(&mut self, other: Self) {
		for (lemma, forms) in other.forms {
			self.forms.entry(lemma).or_default().extend(forms);
		}
		for (form, analyses) in other.analyses {
			self.analyses.entry(form).or_default().extend(analyses);
		}
		self.entries += other.entries;
	}

	/// Readings of a surface form, in dictionary order.
	pub fn analyze(&self, form: &str) -> &[Analysis] {
		self.analyses.get(form).map(Vec::as_slice).unwrap_or(&[])
	}

	/// Number of `lemma, tag, form` entries.
	pub fn len(&self) -> usize {
		self.entries
	}

	pub fn is_empty(&self) -> bool {
		self.entries == 0
	}
}

impl Morphology for MorphoDictionary {
	/// Forms of `lemma` whose tag matches `tag`, where `?` in `tag` matches anything.
	fn generate(&self, lemma: &str, tag: &Tag) -> Vec<String> {
		let forms: Vec<String> = self
			.forms
			.get(lemma)
			.map(|forms| {
				forms
					.iter()
					.filter(|candidate| candidate.tag.matches(tag))
					.map(|candidate| candidate.form.clone())
					.collect()
			})
			.unwrap_or_default();
		log::debug!("generate({lemma}, {tag}) -> {} form(s)", forms.len());
		forms
	}
}
