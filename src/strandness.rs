use std::fmt;

use serde::{Serialize, Serializer};

use crate::error::JobError;

/// Sequencing layout, paired-end unless `--single-end` is set
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Layout {
    Paired,
    Single,
}

impl Layout {
    pub fn from_single_end(single_end: bool) -> Layout {
        match single_end {
            true => Layout::Single,
            false => Layout::Paired,
        }
    }

    pub fn is_paired(&self) -> bool {
        *self == Layout::Paired
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Layout::Paired => write!(f, "paired-end"),
            Layout::Single => write!(f, "single-end"),
        }
    }
}

/// HISAT2 `--rna-strandness` values
///
/// Paired-end libraries take a two letter code (RF, FR), single-end libraries a single letter
/// (R, F). Unstranded libraries don't set the flag at all.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RnaStrandness {
    Rf,
    Fr,
    R,
    F,
    Unstranded,
}

impl RnaStrandness {
    /// Parse a user supplied code (case-insensitive) against the codes allowed for `layout`
    pub fn parse(value: &str, layout: Layout) -> Result<RnaStrandness, JobError> {
        let code = value.to_uppercase();
        let strandness = match (layout, code.as_str()) {
            (_, "NONE" | "UNSTRANDED") => Some(RnaStrandness::Unstranded),
            (Layout::Paired, "RF") => Some(RnaStrandness::Rf),
            (Layout::Paired, "FR") => Some(RnaStrandness::Fr),
            (Layout::Single, "R") => Some(RnaStrandness::R),
            (Layout::Single, "F") => Some(RnaStrandness::F),
            _ => None,
        };

        strandness.ok_or_else(|| JobError::InvalidStrandness {
            value: value.to_string(),
            layout,
            allowed: match layout {
                Layout::Paired => "RF, FR or Unstranded",
                Layout::Single => "R, F or Unstranded",
            },
        })
    }

    /// Value passed to `--rna-strandness`, `None` drops the flag
    pub fn flag(&self) -> Option<&'static str> {
        match self {
            RnaStrandness::Rf => Some("RF"),
            RnaStrandness::Fr => Some("FR"),
            RnaStrandness::R => Some("R"),
            RnaStrandness::F => Some("F"),
            RnaStrandness::Unstranded => None,
        }
    }
}

/// featureCounts `-s` values
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CountStrandness {
    Unstranded,
    Stranded,
    Reversed,
}

impl CountStrandness {
    pub fn parse(value: &str) -> Result<CountStrandness, JobError> {
        match value.trim() {
            "0" => Ok(CountStrandness::Unstranded),
            "1" => Ok(CountStrandness::Stranded),
            "2" => Ok(CountStrandness::Reversed),
            _ => Err(JobError::InvalidCountStrandness(value.to_string())),
        }
    }
}

impl fmt::Display for CountStrandness {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            CountStrandness::Unstranded => write!(f, "0"),
            CountStrandness::Stranded => write!(f, "1"),
            CountStrandness::Reversed => write!(f, "2"),
        }
    }
}

// templates see the numeric code
impl Serialize for CountStrandness {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
