//! Conversion of tagged sentences into colloquial speech.
//!
//! - `config`: chances and resource locations
//! - `engine`: per-sentence decisions (replacement, colloquial variants,
//!   filler words, repetition) and output assembly
//! - `text_converter`: line pipeline tying the tagger, the engine and the
//!   loaded resources together

/// Chances and resource locations.
pub mod config;

/// The colloquialization engine.
pub mod engine;

/// Line-at-a-time pipeline driver.
pub mod text_converter;
