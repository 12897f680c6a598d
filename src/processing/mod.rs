//! Processing module for turning raw cell text into keywords.
//!
//! This module provides:
//! - Tokenization on whitespace and sentence punctuation
//! - Normalization (lowercase, trim)
//! - Stop-word and short-word filtering

pub mod filter;
pub mod tokenizer;

pub use filter::{normalize, StopWordSet};
pub use tokenizer::{is_accepted, split_words, tokenize};
