use std::path::PathBuf;

/// Default chance (in percent) of inserting a filler word into a sentence.
pub const FILLER_CHANCE: u32 = 30;

/// Default chance (in percent) of repeating one word of a sentence.
pub const REPETITION_CHANCE: u32 = 10;

/// Tunable probabilities of the conversion.
///
/// # Invariants
/// - Both chances are percentages in `0..=100`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConverterConfig {
	filler_chance: u32,
	repetition_chance: u32,
}

impl Default for ConverterConfig {
	fn default() -> Self {
		Self { filler_chance: FILLER_CHANCE, repetition_chance: REPETITION_CHANCE }
	}
}

impl ConverterConfig {
	/// Builds a configuration, validating both chances.
	///
	/// # Errors
	/// Returns an error if either value is outside `0..=100`.
	pub fn new(filler_chance: i32, repetition_chance: i32) -> Result<Self, String> {
		let mut config = Self::default();
		config.set_filler_chance(filler_chance)?;
		config.set_repetition_chance(repetition_chance)?;
		Ok(config)
	}

	pub fn filler_chance(&self) -> u32 {
		self.filler_chance
	}

	pub fn repetition_chance(&self) -> u32 {
		self.repetition_chance
	}

	/// Sets the chance of inserting a filler word.
	///
	/// # Errors
	/// Returns an error, and keeps the previous value, if the chance is outside `0..=100`.
	pub fn set_filler_chance(&mut self, filler_chance: i32) -> Result<(), String> {
		self.filler_chance = Self::validate("Filler chance", filler_chance)?;
		Ok(())
	}

	/// Sets the chance of repeating a word.
	///
	/// # Errors
	/// Returns an error, and keeps the previous value, if the chance is outside `0..=100`.
	pub fn set_repetition_chance(&mut self, repetition_chance: i32) -> Result<(), String> {
		self.repetition_chance = Self::validate("Repetition chance", repetition_chance)?;
		Ok(())
	}

	fn validate(name: &str, chance: i32) -> Result<u32, String> {
		if !(0..=100).contains(&chance) {
			return Err(format!("{name} must be between 0 and 100, got {chance}"));
		}
		Ok(chance.unsigned_abs())
	}
}

/// Location of every resource loaded at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourcePaths {
	/// Full-form dictionary used for generation.
	pub morpho_dictionary: PathBuf,
	/// Dictionary used for tagging; the generation dictionary when `None`.
	pub tagger_dictionary: Option<PathBuf>,
	pub replacement_words: PathBuf,
	pub filler_words: PathBuf,
}

impl Default for ResourcePaths {
	fn default() -> Self {
		Self {
			morpho_dictionary: PathBuf::from("./files-to-load/morpho.dict"),
			tagger_dictionary: None,
			replacement_words: PathBuf::from("./files-to-load/replacement-words.dict"),
			filler_words: PathBuf::from("./files-to-load/filler-words.xml"),
		}
	}
}
