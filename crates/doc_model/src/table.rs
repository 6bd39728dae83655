//! Table columns for `table` and `repeaterTable` blocks
//!
//! Column widths are fractional weights, not absolute sizes: each column
//! takes `width_fr / sum(width_fr)` of the block width.

use serde::{Deserialize, Serialize};

/// Kind of value a column collects
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    Checkbox,
}

/// One column of a table block
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableColumn {
    pub id: String,
    #[serde(default)]
    pub header: String,
    /// Fractional width weight
    #[serde(default = "default_width_fr")]
    pub width_fr: f64,
    #[serde(rename = "type", default)]
    pub column_type: ColumnType,
    #[serde(default)]
    pub required: bool,
}

fn default_width_fr() -> f64 {
    1.0
}

impl TableColumn {
    pub fn new(id: impl Into<String>, header: impl Into<String>, width_fr: f64) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width_fr,
            column_type: ColumnType::Text,
            required: false,
        }
    }

    pub fn with_type(mut self, column_type: ColumnType) -> Self {
        self.column_type = column_type;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Fraction of the block width taken by each column.
///
/// Negative or non-finite weights count as zero. When no column carries a
/// positive weight the width is split evenly.
pub fn column_fractions(columns: &[TableColumn]) -> Vec<f64> {
    if columns.is_empty() {
        return Vec::new();
    }

    let weights: Vec<f64> = columns
        .iter()
        .map(|c| if c.width_fr.is_finite() && c.width_fr > 0.0 { c.width_fr } else { 0.0 })
        .collect();
    let total: f64 = weights.iter().sum();

    if total <= 0.0 {
        let even = 1.0 / columns.len() as f64;
        return vec![even; columns.len()];
    }

    weights.into_iter().map(|w| w / total).collect()
}
