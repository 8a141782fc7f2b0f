use std::io::{BufWriter, stdin, stdout};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_colloq_core::random::RngSource;
use rs_colloq_core::{ConverterConfig, ResourcePaths, TextConverter};

/// Convert text from standard input into colloquial text similar to an unprepared speech.
///
/// One truecased, tokenized sentence is expected per input line.
#[derive(Parser, Debug)]
#[command(name = "rs-colloq", version)]
struct Args {
    /// Full-form dictionary used for morphological generation.
    #[arg(long, default_value = "./files-to-load/morpho.dict")]
    morpho_dictionary: PathBuf,

    /// Dictionary used for tagging (defaults to the morphological dictionary).
    #[arg(long)]
    tagger_dictionary: Option<PathBuf>,

    /// File containing words to be replaced and their colloquial equivalents.
    #[arg(long, default_value = "./files-to-load/replacement-words.dict")]
    replacement_words: PathBuf,

    /// File containing filler words to be added to the sentences.
    #[arg(long, default_value = "./files-to-load/filler-words.xml")]
    filler_words: PathBuf,

    /// Chance (0 - 100) of adding a filler word to each sentence.
    #[arg(long, default_value_t = 30, allow_negative_numbers = true)]
    filler_chance: i32,

    /// Chance (0 - 100) of repeating one random word in each sentence.
    #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
    repetition_chance: i32,

    /// Seed for reproducible output.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let paths = ResourcePaths {
        morpho_dictionary: args.morpho_dictionary,
        tagger_dictionary: args.tagger_dictionary,
        replacement_words: args.replacement_words,
        filler_words: args.filler_words,
    };

    // Invalid chances are usage errors, reported before anything is loaded.
    let config = match ConverterConfig::new(args.filler_chance, args.repetition_chance) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let converter = match TextConverter::initialize(&paths) {
        Ok(converter) => converter.with_config(config),
        Err(e) => {
            eprintln!("Could not initialize the converter: {e}");
            return ExitCode::from(1);
        }
    };
    log::info!(
        "FillerChance: {}, RepetitionChance: {}",
        converter.config().filler_chance(),
        converter.config().repetition_chance()
    );

    let input = stdin().lock();
    let output = BufWriter::new(stdout().lock());
    let result = match args.seed {
        Some(seed) => converter.convert_with(input, output, &mut RngSource(StdRng::seed_from_u64(seed))),
        None => converter.convert(input, output),
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Conversion failed: {e}");
            ExitCode::from(1)
        }
    }
}
