pub mod matching;
pub mod normalizer;
pub mod types;

pub use types::*;
