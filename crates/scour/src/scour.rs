//! Main Scour struct and public API.

use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::info;

use crate::cleaning::{Cleaner, CleaningPlan, FillStrategy, Keep};
use crate::dataset::Dataset;
use crate::error::Result;
use crate::input::{Parser, ParserConfig, SourceMetadata};
use crate::prep::{MetadataTable, Preparer, RoleGuide};
use crate::report::{ReportInput, render_text};
use crate::validation::{IssueReport, Summary, ValidationConfig, Validator};

/// Configuration for a pipeline run.
#[derive(Debug, Clone)]
pub struct ScourConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Validator configuration.
    pub validation: ValidationConfig,
    /// Run the cleaner after validation.
    pub clean: bool,
    /// Run the preparer on the cleaned (or raw) data.
    pub prepare: bool,
    /// Duplicate policy for cleaning.
    pub keep: Keep,
    /// Z-score threshold for outlier removal.
    pub outlier_threshold: f64,
    /// Fill strategies that replace the derived ones.
    pub fill_overrides: IndexMap<String, FillStrategy>,
}

impl Default for ScourConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            validation: ValidationConfig::default(),
            clean: true,
            prepare: true,
            keep: Keep::First,
            outlier_threshold: 3.0,
            fill_overrides: IndexMap::new(),
        }
    }
}

/// Everything a pipeline run produced.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineResult {
    /// Source file metadata, when the input came from a file.
    pub source: Option<SourceMetadata>,
    pub issues: IssueReport,
    pub summary: Summary,
    #[serde(skip)]
    pub cleaned: Option<Dataset>,
    pub cleaning_log: Vec<String>,
    #[serde(skip)]
    pub prepared: Option<Dataset>,
    pub prep_log: Vec<String>,
    pub roles: Option<RoleGuide>,
    pub metadata: Option<MetadataTable>,
}

impl PipelineResult {
    /// The most processed dataset, if any stage after validation ran.
    pub fn final_dataset(&self) -> Option<&Dataset> {
        self.prepared.as_ref().or(self.cleaned.as_ref())
    }

    /// Render the text report for this run.
    pub fn render_report(&self) -> String {
        render_text(&ReportInput {
            issues: &self.issues,
            summary: &self.summary,
            cleaning_log: &self.cleaning_log,
            prep_log: &self.prep_log,
        })
    }
}

/// Validate, clean and prepare tabular data.
pub struct Scour {
    config: ScourConfig,
    parser: Parser,
}

impl Scour {
    /// Create a new Scour instance with default configuration.
    pub fn new() -> Self {
        Self::with_config(ScourConfig::default())
    }

    /// Create a Scour instance with custom configuration.
    pub fn with_config(config: ScourConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self { config, parser }
    }

    pub fn config(&self) -> &ScourConfig {
        &self.config
    }

    /// Parse a file and run the pipeline over it.
    pub fn run(&self, path: impl AsRef<Path>) -> Result<PipelineResult> {
        let (dataset, source) = self.parser.parse_file(path)?;
        let mut result = self.process(&dataset);
        result.source = Some(source);
        Ok(result)
    }

    /// The cleaning plan this configuration derives for a validated dataset.
    pub fn plan(&self, issues: &IssueReport, dataset: &Dataset) -> CleaningPlan {
        self.config.fill_overrides.iter().fold(
            CleaningPlan::from_issues(issues, dataset)
                .with_keep(Some(self.config.keep))
                .with_outlier_threshold(self.config.outlier_threshold),
            |plan, (column, strategy)| plan.with_fill(column.clone(), strategy.clone()),
        )
    }

    /// Run the pipeline over an in-memory dataset. The input is not modified.
    pub fn process(&self, dataset: &Dataset) -> PipelineResult {
        let mut validator = Validator::with_config(dataset, self.config.validation);
        let issues = validator.validate_all();
        let summary = validator.summary();

        let (cleaned, cleaning_log) = if self.config.clean {
            let mut cleaner = Cleaner::new(dataset);
            self.plan(&issues, dataset).apply(&mut cleaner);
            let (cleaned, log) = cleaner.into_parts();
            info!(
                before = dataset.row_count(),
                after = cleaned.row_count(),
                "cleaned dataset"
            );
            (Some(cleaned), log)
        } else {
            (None, Vec::new())
        };

        let (prepared, prep_log, roles, metadata) = if self.config.prepare {
            let mut preparer = Preparer::new(cleaned.as_ref().unwrap_or(dataset));
            preparer.normalize_column_names().enforce_data_types();
            let roles = preparer.classify_columns();
            let metadata = preparer.build_metadata();
            let (prepared, log) = preparer.into_parts();
            (Some(prepared), log, Some(roles), Some(metadata))
        } else {
            (None, Vec::new(), None, None)
        };

        PipelineResult {
            source: None,
            issues,
            summary,
            cleaned,
            cleaning_log,
            prepared,
            prep_log,
            roles,
            metadata,
        }
    }
}

impl Default for Scour {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::sales_data;

    #[test]
    fn test_process_sample() {
        let ds = sales_data();
        let result = Scour::new().process(&ds);

        assert_eq!(result.summary.total_rows, 12);
        assert_eq!(result.summary.duplicate_rows, 2);
        assert!(result.cleaning_log.iter().any(|l| l == "Removed 1 duplicate rows"));
        assert!(result.prepared.is_some());
        assert_eq!(ds.row_count(), 12);

        let final_names = result.final_dataset().unwrap().column_names();
        assert_eq!(final_names[0], "Order_Id");
    }

    #[test]
    fn test_stages_can_be_disabled() {
        let config = ScourConfig {
            clean: false,
            prepare: false,
            ..Default::default()
        };
        let result = Scour::with_config(config).process(&sales_data());
        assert!(result.final_dataset().is_none());
        assert!(result.cleaning_log.is_empty());
        assert!(result.metadata.is_none());
    }

    #[test]
    fn test_fill_override_wins() {
        let mut config = ScourConfig::default();
        config
            .fill_overrides
            .insert("customer name".to_string(), FillStrategy::Drop);
        let scour = Scour::with_config(config);

        let ds = sales_data();
        let issues = Validator::new(&ds).validate_all();
        let plan = scour.plan(&issues, &ds);
        assert_eq!(plan.fill["customer name"], FillStrategy::Drop);
        assert_eq!(plan.fill["order_amount"], FillStrategy::Median);
    }
}
