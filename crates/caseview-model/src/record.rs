//! Validated evaluation records.

use std::collections::BTreeMap;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::cell::{CellValue, format_numeric};

/// Multiple-choice option labels, in display order.
pub const OPTION_LABELS: [&str; 9] = ["A", "B", "C", "D", "E", "F", "G", "H", "I"];

/// Judge outcome for one record.
///
/// Exports carry either booleans or 0/1-style numbers; both are kept as-is so
/// a categorical filter can select on exactly the values present.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum HitValue {
    Missing,
    Bool(bool),
    Int(i64),
    Text(String),
}

impl HitValue {
    pub fn from_cell(cell: Option<&CellValue>) -> Self {
        match cell {
            None | Some(CellValue::Missing) => HitValue::Missing,
            Some(CellValue::Bool(value)) => HitValue::Bool(*value),
            Some(CellValue::Int(value)) => HitValue::Int(*value),
            Some(CellValue::Float(value)) => {
                if value.fract() == 0.0 && value.abs() < i64::MAX as f64 {
                    HitValue::Int(*value as i64)
                } else {
                    HitValue::Text(format_numeric(*value))
                }
            }
            Some(CellValue::Text(text)) => Self::from_text(text),
            Some(CellValue::List(items)) => HitValue::Text(items.join(", ")),
        }
    }

    fn from_text(text: &str) -> Self {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return HitValue::Missing;
        }
        if trimmed.eq_ignore_ascii_case("true") {
            return HitValue::Bool(true);
        }
        if trimmed.eq_ignore_ascii_case("false") {
            return HitValue::Bool(false);
        }
        if let Ok(value) = trimmed.parse::<i64>() {
            return HitValue::Int(value);
        }
        if let Ok(value) = trimmed.parse::<f64>()
            && value.is_finite()
            && value.fract() == 0.0
        {
            return HitValue::Int(value as i64);
        }
        HitValue::Text(trimmed.to_string())
    }

    /// Whether the record counts as a hit.
    pub fn is_truthy(&self) -> bool {
        match self {
            HitValue::Missing => false,
            HitValue::Bool(value) => *value,
            HitValue::Int(value) => *value != 0,
            HitValue::Text(text) => !text.is_empty(),
        }
    }

    pub fn is_bool(&self) -> bool {
        matches!(self, HitValue::Bool(_))
    }
}

impl fmt::Display for HitValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HitValue::Missing => Ok(()),
            HitValue::Bool(true) => f.write_str("True"),
            HitValue::Bool(false) => f.write_str("False"),
            HitValue::Int(value) => write!(f, "{value}"),
            HitValue::Text(text) => f.write_str(text),
        }
    }
}

impl FromStr for HitValue {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from_text(s))
    }
}

/// One validated, renderable evaluation case.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Trimmed string form of the `index` column; compared by exact match.
    pub index: String,
    pub question: String,
    /// Sparse option map keyed by label (`A`..`I`); blank options are omitted.
    pub options: BTreeMap<String, String>,
    pub answer: String,
    pub prediction: String,
    /// Extracted short answer (`res` column) when the export carries one.
    pub extracted: Option<String>,
    pub hit: HitValue,
    pub image_paths: Vec<String>,
}

impl Record {
    /// Options in label order.
    pub fn ordered_options(&self) -> impl Iterator<Item = (&str, &str)> {
        OPTION_LABELS.iter().filter_map(|label| {
            self.options
                .get(*label)
                .map(|text| (*label, text.as_str()))
        })
    }

    pub fn is_hit(&self) -> bool {
        self.hit.is_truthy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_value_from_cells() {
        assert_eq!(
            HitValue::from_cell(Some(&CellValue::Bool(true))),
            HitValue::Bool(true)
        );
        assert_eq!(
            HitValue::from_cell(Some(&CellValue::Float(1.0))),
            HitValue::Int(1)
        );
        assert_eq!(
            HitValue::from_cell(Some(&CellValue::Float(0.5))),
            HitValue::Text("0.5".to_string())
        );
        assert_eq!(
            HitValue::from_cell(Some(&CellValue::Text(" false ".to_string()))),
            HitValue::Bool(false)
        );
        assert_eq!(HitValue::from_cell(None), HitValue::Missing);
    }

    #[test]
    fn hit_truthiness() {
        assert!(HitValue::Int(1).is_truthy());
        assert!(!HitValue::Int(0).is_truthy());
        assert!(!HitValue::Missing.is_truthy());
        assert!(HitValue::Bool(true).is_truthy());
    }

    #[test]
    fn hit_value_parses_cli_text() {
        assert_eq!("True".parse::<HitValue>(), Ok(HitValue::Bool(true)));
        assert_eq!("0".parse::<HitValue>(), Ok(HitValue::Int(0)));
        assert_eq!(HitValue::Bool(false).to_string(), "False");
    }
}
