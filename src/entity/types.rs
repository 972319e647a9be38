use clap::ValueEnum;
use std::fmt;

use super::normalizer::{block_key, normalize};

/// A name cell as read from the source dataset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawName {
    /// Text value; the only kind that takes part in matching
    Text(String),
    /// Non-text value (number, date, boolean) kept only for display
    Other(String),
    Missing,
}

impl RawName {
    /// Text used for normalization; `None` for anything that is not text.
    pub fn text(&self) -> Option<&str> {
        match self {
            RawName::Text(text) => Some(text.as_str()),
            RawName::Other(_) | RawName::Missing => None,
        }
    }

    /// Value as written back to the output.
    pub fn display(&self) -> &str {
        match self {
            RawName::Text(value) | RawName::Other(value) => value.as_str(),
            RawName::Missing => "",
        }
    }
}

impl From<Option<String>> for RawName {
    fn from(value: Option<String>) -> Self {
        value.map_or(RawName::Missing, RawName::Text)
    }
}

/// A single input name together with its derived comparison keys.
///
/// Records are identified by their position in the input sequence; the
/// clusterer and output assembler refer to them only by that index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    pub raw_name: RawName,
    pub normalized_name: String,
    pub block_key: String,
}

impl Record {
    pub fn new(original_name: Option<String>) -> Self {
        Self::from_raw(original_name.into())
    }

    pub fn from_raw(raw_name: RawName) -> Self {
        let normalized_name = normalize(raw_name.text());
        let block_key = block_key(&normalized_name);
        Self {
            raw_name,
            normalized_name,
            block_key,
        }
    }

    /// Original text name, if the source held one.
    pub fn original_name(&self) -> Option<&str> {
        self.raw_name.text()
    }

    /// Original value as written to the output; missing names render empty.
    pub fn display_name(&self) -> &str {
        self.raw_name.display()
    }

    /// Length used for parent selection, counted in characters.
    pub fn name_len(&self) -> usize {
        self.display_name().chars().count()
    }
}

/// Derive records for every raw name, preserving input order.
pub fn build_records<I, N>(names: I) -> Vec<Record>
where
    I: IntoIterator<Item = N>,
    N: Into<RawName>,
{
    names
        .into_iter()
        .map(|name| Record::from_raw(name.into()))
        .collect()
}

/// Similarity metric selectable from configuration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, ValueEnum)]
pub enum Metric {
    #[default]
    TokenSort,
    JaroWinkler,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::TokenSort => write!(f, "token-sort"),
            Metric::JaroWinkler => write!(f, "jaro-winkler"),
        }
    }
}
