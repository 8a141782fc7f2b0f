//! Colloquial speech converter library.
//!
//! This crate rewrites truecased, tokenized sentences into an approximation
//! of unprepared spoken language:
//! - Word forms are switched to their colloquial variant where a morphological
//!   generator can produce one
//! - Words listed in a replacement dictionary are swapped for informal equivalents
//! - Filler words are inserted and single words are repeated at random
//!
//! Tokenization, tagging and morphological generation are collaborators behind
//! the [`tagger::Tagger`] and [`morphology::Morphology`] traits. Dictionary-backed
//! implementations of both are provided.

/// Error type and `Result` alias shared by the whole crate.
pub mod errors;

/// Positional tag model (decoding attributes, switching the variant).
pub mod tag;

/// Replacement dictionary and filler word lists.
pub mod lexicon;

/// Morphological generation boundary and the dictionary-backed generator.
pub mod morphology;

/// Tokenization and tagging boundary and the dictionary-backed tagger.
pub mod tagger;

/// Injectable source of uniform random integers.
pub mod random;

/// Colloquialization engine, its configuration and the line pipeline.
pub mod converter;

/// I/O utilities (file loading, path helpers).
///
/// Not exposed
pub(crate) mod io;

pub use converter::config::{ConverterConfig, ResourcePaths};
pub use converter::engine::{Colloquializer, ConvertedSentence, Filler, SentencePlan};
pub use converter::text_converter::{ConversionStats, TextConverter};
pub use errors::{ColloqError, Result};
