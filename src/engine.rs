//! Lint engine: drives every configured linter over one catalog.
//!
//! Each linter instance runs against its own scratch collector. Its lints
//! are merged into the run only if the instance completes, so a linter that
//! fails halfway never leaves partial results behind and never affects the
//! others.

use serde::Serialize;
use tracing::{debug, error, info_span, warn};

use crate::catalog::Catalog;
use crate::config::{Config, InclusionRule, LinterConfig};
use crate::connection::Connection;
use crate::rules::{
    LintCollector, LintContext, LintError, LinterId, LinterProvider, LinterRegistry, LinterRun,
    Severity,
};

/// What happened to one linter instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum LinterStatus {
    Completed,
    Skipped(String),
    ConfigurationFailed(String),
    Failed(String),
}

#[derive(Debug, Clone, Serialize)]
pub struct LinterOutcome {
    pub linter_id: LinterId,
    pub status: LinterStatus,
    pub lint_count: usize,
    pub exceeds_threshold: bool,
}

/// Result of one engine run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LintRun {
    pub lints: LintCollector,
    pub outcomes: Vec<LinterOutcome>,
}

impl LintRun {
    pub fn max_severity(&self) -> Option<Severity> {
        self.lints.iter().map(|l| l.severity).max()
    }

    pub fn any_threshold_exceeded(&self) -> bool {
        self.outcomes.iter().any(|o| o.exceeds_threshold)
    }

    /// True if a lint meets `fail_on` or any linter went over its threshold.
    pub fn should_fail(&self, fail_on: Option<Severity>) -> bool {
        let severity_hit = match (fail_on, self.max_severity()) {
            (Some(threshold), Some(max)) => max >= threshold,
            _ => false,
        };
        severity_hit || self.any_threshold_exceeded()
    }
}

pub struct LintEngine<'a> {
    registry: &'a LinterRegistry,
    config: &'a Config,
}

impl<'a> LintEngine<'a> {
    pub fn new(registry: &'a LinterRegistry, config: &'a Config) -> Self {
        Self { registry, config }
    }

    /// Linter instances in run order: explicit config entries first, in
    /// file order, then (with `run_all_linters`) every other registered
    /// linter with default settings.
    pub fn planned(&self) -> Vec<LinterConfig> {
        let mut planned = self.config.linters.clone();
        if self.config.lint.run_all_linters {
            for provider in self.registry.iter() {
                let id = provider.id();
                if !planned.iter().any(|c| c.id == id) {
                    planned.push(LinterConfig::new(id));
                }
            }
        }
        planned
    }

    pub fn run(&self, catalog: &Catalog, connection: Option<&dyn Connection>) -> LintRun {
        let mut run = LintRun::default();

        for linter_config in self.planned() {
            let id = linter_config.id;
            let _span = info_span!("linter", id = %id).entered();

            let (status, lints) = self.run_one(&linter_config, catalog, connection);
            let lint_count = lints.as_ref().map_or(0, LintCollector::len);
            let exceeds_threshold = linter_config.threshold.is_some_and(|t| lint_count > t);
            if exceeds_threshold {
                warn!(lint_count, threshold = ?linter_config.threshold, "linter exceeded threshold");
            }
            if let Some(lints) = lints {
                run.lints.extend(lints);
            }
            run.outcomes.push(LinterOutcome {
                linter_id: id,
                status,
                lint_count,
                exceeds_threshold,
            });
        }
        run
    }

    fn run_one(
        &self,
        linter_config: &LinterConfig,
        catalog: &Catalog,
        connection: Option<&dyn Connection>,
    ) -> (LinterStatus, Option<LintCollector>) {
        let id = linter_config.id;
        if !linter_config.run {
            debug!("disabled in configuration");
            return (LinterStatus::Skipped("disabled".to_string()), None);
        }
        let Some(provider) = self.registry.get(id) else {
            warn!("not registered");
            return (LinterStatus::Skipped("not registered".to_string()), None);
        };

        let mut linter = provider.new_linter();
        let configured = linter_config.table_rule().and_then(|tables| {
            let columns = linter_config.column_rule()?;
            linter.apply_config(linter_config)?;
            Ok((tables, columns))
        });
        let (tables, columns) = match configured {
            Ok(filters) => filters,
            Err(e) => {
                error!(error = %e, "configuration failed, linter excluded from run");
                return (LinterStatus::ConfigurationFailed(e.to_string()), None);
            }
        };

        if linter.needs_connection() && connection.is_none() {
            warn!("no database connection, skipping");
            return (
                LinterStatus::Skipped("no database connection".to_string()),
                None,
            );
        }

        let severity = linter_config
            .severity()
            .unwrap_or_else(|| provider.default_severity());
        match execute(
            linter.as_ref(),
            id,
            severity,
            &tables,
            &columns,
            catalog,
            connection,
        ) {
            Ok(lints) => {
                debug!(lint_count = lints.len(), "linter completed");
                (LinterStatus::Completed, Some(lints))
            }
            Err(e) => {
                error!(error = %e, "linter failed, its lints are discarded");
                (LinterStatus::Failed(e.to_string()), None)
            }
        }
    }
}

/// Run one configured linter instance into a fresh collector.
pub(crate) fn execute(
    linter: &dyn LinterRun,
    id: LinterId,
    severity: Severity,
    tables: &InclusionRule,
    columns: &InclusionRule,
    catalog: &Catalog,
    connection: Option<&dyn Connection>,
) -> Result<LintCollector, LintError> {
    let mut collector = LintCollector::new();
    let mut ctx = LintContext::new(
        catalog,
        connection,
        id,
        severity,
        tables,
        columns,
        &mut collector,
    );
    linter.execute(&mut ctx)?;
    Ok(collector)
}
