//! Accepted medications.
//!
//! The medication selected on the form drives every medication-aware rule.
//! Matching is case-insensitive and ignores surrounding whitespace, so
//! `" Aspirin "` selects [`Medication::Aspirin`]. Anything else is an
//! unknown medication and the generic rule branch applies.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// A medication accepted by the prescription form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Medication {
    Placebo,
    Aspirin,
    Ibuprofen,
    Paracetamol,
    Naproxen,
}

impl Medication {
    /// All medications in display precedence order.
    pub const ALL: [Medication; 5] = [
        Medication::Placebo,
        Medication::Aspirin,
        Medication::Ibuprofen,
        Medication::Paracetamol,
        Medication::Naproxen,
    ];

    /// Lower-case name, also used as the tag prefix of medication-scoped tags.
    pub fn as_str(&self) -> &'static str {
        match self {
            Medication::Placebo => "placebo",
            Medication::Aspirin => "aspirin",
            Medication::Ibuprofen => "ibuprofen",
            Medication::Paracetamol => "paracetamol",
            Medication::Naproxen => "naproxen",
        }
    }

    /// Capitalised name used in messages and badge descriptions.
    pub fn label(&self) -> &'static str {
        match self {
            Medication::Placebo => "Placebo",
            Medication::Aspirin => "Aspirin",
            Medication::Ibuprofen => "Ibuprofen",
            Medication::Paracetamol => "Paracetamol",
            Medication::Naproxen => "Naproxen",
        }
    }

    /// Position in the badge display order (placebo first).
    pub fn sort_order(&self) -> u8 {
        match self {
            Medication::Placebo => 0,
            Medication::Aspirin => 1,
            Medication::Ibuprofen => 2,
            Medication::Paracetamol => 3,
            Medication::Naproxen => 4,
        }
    }

    /// Recognise a raw form value. Returns `None` for unknown or empty input.
    pub fn recognize(raw: &str) -> Option<Medication> {
        raw.parse().ok()
    }

    /// Comma separated list of accepted names, in display order.
    pub fn accepted_list() -> String {
        Medication::ALL
            .iter()
            .map(Medication::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Medication {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Medication {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Medication::ALL
            .into_iter()
            .find(|medication| medication.as_str() == normalized)
            .ok_or_else(|| ModelError::UnknownMedication(s.to_string()))
    }
}
