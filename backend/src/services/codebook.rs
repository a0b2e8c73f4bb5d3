//! Startup construction of the feature normalizer
//!
//! Column order comes from the model when it carries feature names, then
//! from configuration, then from the default training order. Categorical
//! codes come from an optional CSV codebook of `column,value` rows.

use std::path::Path;

use anyhow::{bail, Context};
use serde::Deserialize;
use shared::{Codebook, FeatureColumn, FeatureNormalizer, FeatureSchema};

use crate::config::ModelConfig;
use crate::external::YieldEstimator;

#[derive(Debug, Deserialize)]
struct CodebookRow {
    column: String,
    value: String,
}

/// Read a codebook CSV. Codes follow row order within each column.
pub fn load_codebook(path: impl AsRef<Path>) -> anyhow::Result<Codebook> {
    let path = path.as_ref();
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("failed to open codebook {}", path.display()))?;

    let mut codebook = Codebook::new();
    for (line, row) in reader.deserialize::<CodebookRow>().enumerate() {
        let row = row.with_context(|| format!("bad codebook row {}", line + 2))?;
        let column: FeatureColumn = row
            .column
            .parse()
            .with_context(|| format!("codebook row {}", line + 2))?;
        codebook
            .push(column, &row.value)
            .with_context(|| format!("codebook row {}", line + 2))?;
    }

    Ok(codebook)
}

/// Feature schema for `estimator`, checked against its input width
pub fn resolve_schema(
    config: &ModelConfig,
    estimator: &dyn YieldEstimator,
) -> anyhow::Result<FeatureSchema> {
    let schema = if let Some(names) = estimator.feature_names() {
        FeatureSchema::from_names(names).context("model feature names")?
    } else if let Some(names) = &config.feature_order {
        FeatureSchema::from_names(names).context("configured feature order")?
    } else {
        FeatureSchema::default()
    };

    if schema.len() != estimator.num_features() {
        bail!(
            "feature schema has {} columns but the model expects {}",
            schema.len(),
            estimator.num_features()
        );
    }

    Ok(schema)
}

pub fn build_normalizer(
    config: &ModelConfig,
    estimator: &dyn YieldEstimator,
) -> anyhow::Result<FeatureNormalizer> {
    let schema = resolve_schema(config, estimator)?;

    let codebook = match &config.codebook_path {
        Some(path) => load_codebook(path)?,
        None => {
            tracing::warn!("No codebook configured, categorical features encode as 0");
            Codebook::new()
        }
    };

    tracing::debug!(
        columns = ?schema.columns().iter().map(|c| c.name()).collect::<Vec<_>>(),
        "Feature schema resolved"
    );
    Ok(FeatureNormalizer::new(schema, codebook))
}
