pub mod aggregate;
pub mod classify;
pub mod domain;
pub mod report;
pub mod scoring;
pub mod sheet;

pub use report::AccountReport;
pub use sheet::{BulkSheetImporter, SheetError};

use aggregate::aggregate_campaigns;
use classify::{Classifier, ClassifierConfig};
use domain::RawRow;
use scoring::{ConfigError, ScoringConfig, ScoringEngine};
use std::io::Read;
use std::path::Path;

/// The full pipeline: rows -> aggregates -> classified campaigns -> pillar
/// scores -> overall score. One synchronous run per call; a run is a pure
/// function of its input rows and the two configurations.
pub struct AccountAuditor {
    classifier: Classifier,
    scoring: ScoringEngine,
}

impl AccountAuditor {
    pub fn new(
        classifier_config: ClassifierConfig,
        scoring_config: ScoringConfig,
    ) -> Result<Self, ConfigError> {
        Ok(Self {
            classifier: Classifier::new(classifier_config),
            scoring: ScoringEngine::new(scoring_config)?,
        })
    }

    /// Auditor with the default thresholds and weights.
    pub fn standard() -> Self {
        Self {
            classifier: Classifier::new(ClassifierConfig::default()),
            scoring: ScoringEngine::default(),
        }
    }

    pub fn audit(&self, rows: &[RawRow]) -> AccountReport {
        let aggregates = aggregate_campaigns(rows);
        let campaigns = self.classifier.classify_all(aggregates);
        let pillars = self.scoring.score_pillars(&campaigns);
        let overall = self.scoring.score_account(&pillars);

        AccountReport {
            campaigns,
            pillars,
            overall,
        }
    }

    pub fn audit_reader<R: Read>(&self, reader: R) -> Result<AccountReport, SheetError> {
        let rows = BulkSheetImporter::from_reader(reader)?;
        Ok(self.audit(&rows))
    }

    pub fn audit_path<P: AsRef<Path>>(&self, path: P) -> Result<AccountReport, SheetError> {
        let rows = BulkSheetImporter::from_path(path)?;
        Ok(self.audit(&rows))
    }
}
