//! Word frequency counting and ranking.

mod aggregator;
mod word_count;

pub use aggregator::{Aggregation, Aggregator};
pub use word_count::WordCount;
