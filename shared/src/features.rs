//! Feature normalization for the yield estimator
//!
//! The estimator was trained on a fixed column order with categorical columns
//! integer-encoded. Both the order and the encoding are part of the model's
//! contract, so they are held here as read-only configuration built once at
//! startup and shared by every request.

use std::collections::HashMap;
use std::str::FromStr;

use thiserror::Error;

use crate::models::{AgronomicInput, ModelFeatureVector};

/// Code assigned to a categorical value missing from its column vocabulary
pub const UNKNOWN_CODE: i32 = -1;

/// Code assigned to every value of a column that has no vocabulary.
///
/// Matches the legacy pipeline, which category-encoded a single-row frame and
/// therefore always produced 0.
pub const SINGLE_ROW_CODE: i32 = 0;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FeatureSchemaError {
    #[error("unknown feature column '{0}'")]
    UnknownColumn(String),

    #[error("feature column '{0}' appears more than once")]
    DuplicateColumn(String),

    #[error("feature schema is empty")]
    Empty,

    #[error("column '{0}' is numeric and cannot have a vocabulary")]
    NotCategorical(String),
}

/// One input column of the yield model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureColumn {
    Crop,
    State,
    Year,
    Nitrogen,
    Phosphorus,
    Potassium,
    Ph,
    SoilType,
    Rainfall,
    Temperature,
    Humidity,
    FertilizerType,
    FertilizerAmount,
    PesticideAmount,
    Area,
}

impl FeatureColumn {
    /// Training-time column order of the bundled model
    pub const DEFAULT_ORDER: [FeatureColumn; 15] = [
        FeatureColumn::Crop,
        FeatureColumn::State,
        FeatureColumn::Year,
        FeatureColumn::Nitrogen,
        FeatureColumn::Phosphorus,
        FeatureColumn::Potassium,
        FeatureColumn::Ph,
        FeatureColumn::SoilType,
        FeatureColumn::Rainfall,
        FeatureColumn::Temperature,
        FeatureColumn::Humidity,
        FeatureColumn::FertilizerType,
        FeatureColumn::FertilizerAmount,
        FeatureColumn::PesticideAmount,
        FeatureColumn::Area,
    ];

    /// Column name as it appears in the training data
    pub fn name(&self) -> &'static str {
        match self {
            FeatureColumn::Crop => "Crop",
            FeatureColumn::State => "State",
            FeatureColumn::Year => "Year",
            FeatureColumn::Nitrogen => "N",
            FeatureColumn::Phosphorus => "P",
            FeatureColumn::Potassium => "K",
            FeatureColumn::Ph => "pH",
            FeatureColumn::SoilType => "soil_type",
            FeatureColumn::Rainfall => "Rainfall",
            FeatureColumn::Temperature => "Temp",
            FeatureColumn::Humidity => "Humidity",
            FeatureColumn::FertilizerType => "Fertilizer_Type",
            FeatureColumn::FertilizerAmount => "Fertilizer_Amount",
            FeatureColumn::PesticideAmount => "Pesticide_Amount",
            FeatureColumn::Area => "area",
        }
    }

    pub fn is_categorical(&self) -> bool {
        matches!(
            self,
            FeatureColumn::Crop
                | FeatureColumn::State
                | FeatureColumn::SoilType
                | FeatureColumn::FertilizerType
        )
    }
}

impl FromStr for FeatureColumn {
    type Err = FeatureSchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FeatureColumn::DEFAULT_ORDER
            .iter()
            .copied()
            .find(|c| c.name() == s.trim())
            .ok_or_else(|| FeatureSchemaError::UnknownColumn(s.to_string()))
    }
}

impl std::fmt::Display for FeatureColumn {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered list of columns the estimator expects
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureSchema {
    columns: Vec<FeatureColumn>,
}

impl FeatureSchema {
    pub fn new(columns: Vec<FeatureColumn>) -> Result<Self, FeatureSchemaError> {
        if columns.is_empty() {
            return Err(FeatureSchemaError::Empty);
        }
        for (i, column) in columns.iter().enumerate() {
            if columns[..i].contains(column) {
                return Err(FeatureSchemaError::DuplicateColumn(column.name().to_string()));
            }
        }
        Ok(Self { columns })
    }

    /// Build a schema from training column names, e.g. a model's `feature_names`
    pub fn from_names<I, S>(names: I) -> Result<Self, FeatureSchemaError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let columns = names
            .into_iter()
            .map(|n| n.as_ref().parse())
            .collect::<Result<Vec<FeatureColumn>, _>>()?;
        Self::new(columns)
    }

    pub fn columns(&self) -> &[FeatureColumn] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self {
            columns: FeatureColumn::DEFAULT_ORDER.to_vec(),
        }
    }
}

/// Categorical value → integer code, per column.
///
/// A value's code is its position in the column vocabulary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Codebook {
    vocabularies: HashMap<FeatureColumn, Vec<String>>,
}

impl Codebook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the vocabulary of `column` and return its code.
    /// Re-adding a known value returns the existing code.
    pub fn push(&mut self, column: FeatureColumn, value: &str) -> Result<i32, FeatureSchemaError> {
        if !column.is_categorical() {
            return Err(FeatureSchemaError::NotCategorical(column.name().to_string()));
        }
        let vocabulary = self.vocabularies.entry(column).or_default();
        if let Some(pos) = vocabulary.iter().position(|v| v == value) {
            return Ok(pos as i32);
        }
        vocabulary.push(value.to_string());
        Ok((vocabulary.len() - 1) as i32)
    }

    pub fn has_vocabulary(&self, column: FeatureColumn) -> bool {
        self.vocabularies
            .get(&column)
            .map(|v| !v.is_empty())
            .unwrap_or(false)
    }

    /// Code for `value` in `column`. Never fails.
    pub fn code(&self, column: FeatureColumn, value: &str) -> i32 {
        match self.vocabularies.get(&column) {
            Some(vocabulary) if !vocabulary.is_empty() => vocabulary
                .iter()
                .position(|v| v == value)
                .map(|p| p as i32)
                .unwrap_or(UNKNOWN_CODE),
            _ => SINGLE_ROW_CODE,
        }
    }

    pub fn vocabulary_size(&self, column: FeatureColumn) -> usize {
        self.vocabularies.get(&column).map(Vec::len).unwrap_or(0)
    }
}

/// Turns agronomic inputs into estimator feature vectors
#[derive(Debug, Clone, Default)]
pub struct FeatureNormalizer {
    schema: FeatureSchema,
    codebook: Codebook,
}

impl FeatureNormalizer {
    pub fn new(schema: FeatureSchema, codebook: Codebook) -> Self {
        Self { schema, codebook }
    }

    pub fn schema(&self) -> &FeatureSchema {
        &self.schema
    }

    pub fn codebook(&self) -> &Codebook {
        &self.codebook
    }

    /// Build the feature vector for one request.
    ///
    /// The sowing date is never part of the vector. Missing climate values
    /// become NaN, which the estimator treats as "missing".
    pub fn normalize(&self, input: &AgronomicInput) -> ModelFeatureVector {
        let values = self
            .schema
            .columns()
            .iter()
            .map(|column| self.value_of(*column, input))
            .collect();
        ModelFeatureVector::new(values)
    }

    fn value_of(&self, column: FeatureColumn, input: &AgronomicInput) -> f64 {
        match column {
            FeatureColumn::Crop => self.codebook.code(column, &input.crop) as f64,
            FeatureColumn::State => self.codebook.code(column, &input.region) as f64,
            FeatureColumn::SoilType => self.codebook.code(column, &input.soil_type) as f64,
            FeatureColumn::FertilizerType => {
                self.codebook.code(column, &input.fertilizer_type) as f64
            }
            FeatureColumn::Year => input.year as f64,
            FeatureColumn::Nitrogen => input.nitrogen,
            FeatureColumn::Phosphorus => input.phosphorus,
            FeatureColumn::Potassium => input.potassium,
            FeatureColumn::Ph => input.ph,
            FeatureColumn::Rainfall => input.rainfall.unwrap_or(f64::NAN),
            FeatureColumn::Temperature => input.temperature.unwrap_or(f64::NAN),
            FeatureColumn::Humidity => input.humidity.unwrap_or(f64::NAN),
            FeatureColumn::FertilizerAmount => input.fertilizer_amount,
            FeatureColumn::PesticideAmount => input.pesticide_amount,
            FeatureColumn::Area => input.area,
        }
    }
}
