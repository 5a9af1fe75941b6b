//! Form fields and the form snapshot passed to every rule.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;
use crate::medication::Medication;

/// One of the five prescription form fields.
///
/// Variant order is the order fields are rendered and reported in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FieldName {
    Medication,
    DateOfBirth,
    Weight,
    Dosage,
    Frequency,
}

impl FieldName {
    pub const ALL: [FieldName; 5] = [
        FieldName::Medication,
        FieldName::DateOfBirth,
        FieldName::Weight,
        FieldName::Dosage,
        FieldName::Frequency,
    ];

    /// Form key of the field (`dateOfBirth`, `weight`, ...).
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldName::Medication => "medication",
            FieldName::DateOfBirth => "dateOfBirth",
            FieldName::Weight => "weight",
            FieldName::Dosage => "dosage",
            FieldName::Frequency => "frequency",
        }
    }

    /// Human-readable label used at the start of validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            FieldName::Medication => "Medication",
            FieldName::DateOfBirth => "Date of Birth",
            FieldName::Weight => "Weight",
            FieldName::Dosage => "Dosage",
            FieldName::Frequency => "Frequency",
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FieldName {
    type Err = ModelError;

    /// Accepts the form key (`dateOfBirth`) as well as snake/kebab case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "medication" => Ok(FieldName::Medication),
            "dateofbirth" | "dob" => Ok(FieldName::DateOfBirth),
            "weight" => Ok(FieldName::Weight),
            "dosage" => Ok(FieldName::Dosage),
            "frequency" => Ok(FieldName::Frequency),
            _ => Err(ModelError::UnknownField(s.to_string())),
        }
    }
}

/// Raw, un-trimmed values of the whole form as typed by the user.
///
/// The rules only ever borrow a snapshot; they never modify it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct FormValues {
    pub medication: String,
    pub date_of_birth: String,
    pub weight: String,
    pub dosage: String,
    pub frequency: String,
}

impl FormValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter.
    #[must_use]
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    pub fn get(&self, field: FieldName) -> &str {
        match field {
            FieldName::Medication => &self.medication,
            FieldName::DateOfBirth => &self.date_of_birth,
            FieldName::Weight => &self.weight,
            FieldName::Dosage => &self.dosage,
            FieldName::Frequency => &self.frequency,
        }
    }

    pub fn set(&mut self, field: FieldName, value: impl Into<String>) {
        let slot = match field {
            FieldName::Medication => &mut self.medication,
            FieldName::DateOfBirth => &mut self.date_of_birth,
            FieldName::Weight => &mut self.weight,
            FieldName::Dosage => &mut self.dosage,
            FieldName::Frequency => &mut self.frequency,
        };
        *slot = value.into();
    }

    /// The selected medication, if the medication field names an accepted one.
    pub fn medication(&self) -> Option<Medication> {
        Medication::recognize(&self.medication)
    }

    /// Iterate `(field, raw value)` pairs in form order.
    pub fn iter(&self) -> impl Iterator<Item = (FieldName, &str)> {
        FieldName::ALL.into_iter().map(|field| (field, self.get(field)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_parse_from_form_keys() {
        assert_eq!("dateOfBirth".parse::<FieldName>(), Ok(FieldName::DateOfBirth));
        assert_eq!("date_of_birth".parse::<FieldName>(), Ok(FieldName::DateOfBirth));
        assert_eq!("Weight".parse::<FieldName>(), Ok(FieldName::Weight));
        assert!("height".parse::<FieldName>().is_err());
    }

    #[test]
    fn form_values_round_trip_through_camel_case_json() {
        let values = FormValues::new()
            .with(FieldName::Medication, "aspirin")
            .with(FieldName::DateOfBirth, "2000-01-01");
        let json = serde_json::to_string(&values).expect("serialize");
        assert!(json.contains("\"dateOfBirth\":\"2000-01-01\""));
        let back: FormValues = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, values);
        assert_eq!(back.medication(), Some(Medication::Aspirin));
    }

    #[test]
    fn values_are_kept_untrimmed() {
        let values = FormValues::new().with(FieldName::Weight, " 40 ");
        assert_eq!(values.get(FieldName::Weight), " 40 ");
    }
}
