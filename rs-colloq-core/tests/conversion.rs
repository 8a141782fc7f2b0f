use std::collections::HashMap;
use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_colloq_core::lexicon::{FillerWords, Lexicon, Position, ReplacementDictionary};
use rs_colloq_core::morphology::Morphology;
use rs_colloq_core::random::{RngSource, ScriptedRandom};
use rs_colloq_core::tag::Tag;
use rs_colloq_core::tagger::{TaggedWord, Tagger};
use rs_colloq_core::{ColloqError, ConverterConfig, ResourcePaths, TextConverter};

/// Tagger reading pre-tagged input: `form|lemma|tag` tokens separated by spaces.
struct PretaggedTagger;

impl Tagger for PretaggedTagger {
	fn tokenize_and_segment(&self, line: &str) -> Option<Vec<String>> {
		let tokens: Vec<String> = line.split_whitespace().map(str::to_owned).collect();
		if tokens.is_empty() || tokens.iter().any(|t| t.split('|').count() != 3) {
			return None;
		}
		Some(tokens)
	}

	fn tag(&self, forms: &[String]) -> Vec<TaggedWord> {
		forms
			.iter()
			.filter_map(|token| {
				let mut parts = token.split('|');
				let (form, lemma, tag) = (parts.next()?, parts.next()?, parts.next()?);
				Some(TaggedWord::new(form, lemma, Tag::new(tag).ok()?))
			})
			.collect()
	}
}

#[derive(Default)]
struct StubMorphology {
	table: HashMap<(String, String), Vec<String>>,
}

impl StubMorphology {
	fn with(mut self, lemma: &str, tag: &str, form: &str) -> Self {
		self.table.insert((lemma.to_owned(), tag.to_owned()), vec![form.to_owned()]);
		self
	}
}

impl Morphology for StubMorphology {
	fn generate(&self, lemma: &str, tag: &Tag) -> Vec<String> {
		self.table.get(&(lemma.to_owned(), tag.to_string())).cloned().unwrap_or_default()
	}
}

const FILLERS: &str = "<beginning>\nno\n</beginning>\n<middle>\nprostě\n</middle>\n<end>\njo\n</end>\n";

const SEE_WHITE_DOG: &str = "Vidím|vidět|VB-S---1P-AA--- bílého|bílý|AAMS4----1A---- psa|pes|NNMS4-----A---- .|.|Z:-------------";

fn lexicon() -> Lexicon {
	Lexicon::new(ReplacementDictionary::default(), FillerWords::from_lines(FILLERS.lines()).unwrap())
}

fn converter(config: ConverterConfig) -> TextConverter<PretaggedTagger, StubMorphology> {
	let morphology = StubMorphology::default().with("bílý", "AAMS4----1A---6", "bílýho");
	TextConverter::new(PretaggedTagger, morphology, lexicon()).with_config(config)
}

#[test]
fn adjective_turns_colloquial_without_fillers_or_repetition() {
	let converter = converter(ConverterConfig::new(0, 0).unwrap());
	let output = converter.convert_text(SEE_WHITE_DOG).unwrap();
	assert_eq!(output, "Vidím bílýho psa .\n\n");
}

#[test]
fn middle_filler_in_four_token_sentence() {
	let converter = converter(ConverterConfig::new(100, 0).unwrap());
	// filler roll, middle, filler word, index 1, repetition roll
	let mut rng = ScriptedRandom::new([57, 1, 0, 1, 100]);
	let sentence = converter.convert_line(SEE_WHITE_DOG, &mut rng).unwrap();
	assert_eq!(sentence.words.len(), 5);
	assert_eq!(sentence.to_line(), "Vidím prostě bílýho psa .");
	let filler = sentence.filler.unwrap();
	assert_eq!(filler.position, Position::Middle);
	assert!((1..=2).contains(&filler.index));
}

#[test]
fn repetition_skips_punctuation_or_is_dropped() {
	let converter = converter(ConverterConfig::new(0, 100).unwrap());
	let line = "Ahoj|ahoj|II------------- !|!|Z:-------------";
	// filler roll, repetition roll, repeat index 0 lands on "Ahoj"
	let sentence = converter.convert_line(line, &mut ScriptedRandom::new([100, 1, 0])).unwrap();
	assert_eq!(sentence.to_line(), "Ahoj Ahoj !");

	let line = "„|„|Z:------------- !|!|Z:-------------";
	let sentence = converter.convert_line(line, &mut ScriptedRandom::new([100, 1, 0])).unwrap();
	assert_eq!(sentence.repeat_index, None);
	assert_eq!(sentence.to_line(), "„ !");
}

#[test]
fn one_generator_spans_the_whole_stream() {
	let converter = converter(ConverterConfig::new(100, 0).unwrap());
	let input = format!("{SEE_WHITE_DOG}\n{SEE_WHITE_DOG}\n");
	// First sentence: beginning filler. Second sentence: middle filler at 2.
	let mut rng = ScriptedRandom::new([1, 0, 0, 100, 1, 1, 0, 2, 100]);
	let mut output = Vec::new();
	let stats = converter.convert_with(input.as_bytes(), &mut output, &mut rng).unwrap();
	assert_eq!(
		String::from_utf8(output).unwrap(),
		"no Vidím bílýho psa .\nVidím bílýho prostě psa .\n\n"
	);
	assert_eq!(rng.remaining(), 0);
	assert_eq!(stats.sentences, 2);
	assert_eq!(stats.fillers, 2);
}

#[test]
fn seeded_runs_are_reproducible_and_vary_between_sentences() {
	let converter = converter(ConverterConfig::new(50, 50).unwrap());
	let input = vec![SEE_WHITE_DOG; 200].join("\n");

	let run = |seed: u64| {
		let mut output = Vec::new();
		converter
			.convert_with(input.as_bytes(), &mut output, &mut RngSource(StdRng::seed_from_u64(seed)))
			.unwrap();
		String::from_utf8(output).unwrap()
	};

	let first = run(11);
	assert_eq!(first, run(11));
	let distinct: std::collections::HashSet<&str> = first.lines().filter(|l| !l.is_empty()).collect();
	assert!(distinct.len() > 1, "every sentence got the same decisions");
}

#[test]
fn malformed_lines_do_not_disturb_neighbours() {
	let converter = converter(ConverterConfig::new(0, 0).unwrap());
	let input = format!("{SEE_WHITE_DOG}\nnot tagged at all\n{SEE_WHITE_DOG}\n");
	let mut output = Vec::new();
	let stats = converter.convert(input.as_bytes(), &mut output).unwrap();
	assert_eq!(
		String::from_utf8(output).unwrap(),
		"Vidím bílýho psa .\nVidím bílýho psa .\n\n"
	);
	assert_eq!(stats.skipped, 1);
}

#[test]
fn noun_tags_outside_plural_instrumental_are_untouched() {
	let converter = converter(ConverterConfig::new(0, 0).unwrap());
	let tags = ["NNFS7-----A----", "NNFP1-----A----", "NNFP6-----A----", "NNFD7-----A----"];
	for tag in tags {
		let line = format!("ženou|žena|{tag}");
		let sentence = converter.convert_line(&line, &mut ScriptedRandom::new([])).unwrap();
		assert_eq!(sentence.words, ["ženou"]);
	}
}

#[test]
fn initialize_loads_every_resource() {
	let dir = tempfile::tempdir().unwrap();
	let morpho = dir.path().join("morpho.dict");
	let replacements = dir.path().join("replacement-words.dict");
	let fillers = dir.path().join("filler-words.xml");
	fs::write(
		&morpho,
		"vidět\tVB-S---1P-AA---\tvidím\nbílý\tAAMS4----1A----\tbílého\nbílý\tAAMS4----1A---6\tbílýho\npes\tNNMS4-----A----\tpsa\n",
	)
	.unwrap();
	fs::write(&replacements, "# nothing to replace\n").unwrap();
	fs::write(&fillers, FILLERS).unwrap();

	let paths = ResourcePaths {
		morpho_dictionary: morpho,
		tagger_dictionary: None,
		replacement_words: replacements,
		filler_words: fillers,
	};
	let mut converter = TextConverter::initialize(&paths).unwrap();
	converter.set_filler_chance(0).unwrap();
	converter.set_repetition_chance(0).unwrap();
	assert_eq!(converter.convert_text("Vidím bílého psa.\n").unwrap(), "Vidím bílýho psa .\n\n");
}

#[test]
fn initialize_rejects_unclosed_filler_file() {
	let dir = tempfile::tempdir().unwrap();
	let morpho = dir.path().join("morpho.dict");
	let replacements = dir.path().join("replacement-words.dict");
	let fillers = dir.path().join("filler-words.xml");
	fs::write(&morpho, "").unwrap();
	fs::write(&replacements, "").unwrap();
	fs::write(&fillers, "<beginning>\nno\n</beginning>\n<middle>\nprostě\n").unwrap();

	let paths = ResourcePaths {
		morpho_dictionary: morpho,
		tagger_dictionary: None,
		replacement_words: replacements,
		filler_words: fillers,
	};
	let err = TextConverter::initialize(&paths).unwrap_err();
	assert!(matches!(err, ColloqError::UnclosedFillerBlock { .. }));
}

#[test]
fn initialize_reports_missing_files() {
	let paths = ResourcePaths {
		morpho_dictionary: "/nonexistent/morpho.dict".into(),
		..ResourcePaths::default()
	};
	assert!(matches!(TextConverter::initialize(&paths), Err(ColloqError::Io { .. })));
}
