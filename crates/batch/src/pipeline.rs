//! Selection, tree build and parallel unit compilation.

use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Instant;

use handbook_core::{RenumberedUnit, SourceUnit, StructuralError, build_document, sort_units};
use handbook_markup::{AssetLookup, DirectiveRegistry, MarkupCompiler};
use log::{debug, error, info, warn};
use rayon::prelude::*;

use crate::batch::{BatchReport, BatchStats, UnitResult};
use crate::config::{BatchConfig, FailurePolicy};
use crate::error::BatchError;

/// Builds units from `(serial, paragraphs)` documents.
///
/// The first paragraph of each document is its title and the second is a
/// separator line.
pub fn ingest<I, P, S>(documents: I) -> Result<Vec<SourceUnit>, StructuralError>
where
    I: IntoIterator<Item = (String, P)>,
    P: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    documents
        .into_iter()
        .map(|(serial, paragraphs)| SourceUnit::from_paragraphs(&serial, paragraphs))
        .collect()
}

/// Runs a unit collection through the whole build.
pub struct Pipeline<'a> {
    config: &'a BatchConfig,
    registry: DirectiveRegistry,
    assets: &'a dyn AssetLookup,
}

impl<'a> Pipeline<'a> {
    /// Creates a pipeline for a configuration and asset lookup.
    pub fn new(config: &'a BatchConfig, assets: &'a dyn AssetLookup) -> Self {
        Self {
            config,
            registry: config.registry(),
            assets,
        }
    }

    /// Drops units outside the selected handbook and sorts the rest.
    pub fn select_units(&self, units: Vec<SourceUnit>) -> Vec<SourceUnit> {
        let before = units.len();
        let mut selected: Vec<SourceUnit> = units
            .into_iter()
            .filter(|unit| self.config.includes_chapter(unit.position.chapter))
            .collect();
        sort_units(&mut selected);
        if selected.len() != before {
            debug!("selected {} of {before} units", selected.len());
        }
        selected
    }

    /// Builds the tree and compiles every unit.
    ///
    /// Structural errors fail the run. Unit failures are recorded in the
    /// report; with [`FailurePolicy::Abort`] the first one also stops
    /// compilation of later units.
    pub fn run(&self, units: Vec<SourceUnit>) -> Result<BatchReport, BatchError> {
        let start = Instant::now();
        let handbook = self.config.handbook.as_ref().map(|h| h.name.clone());
        if let Some(name) = &handbook {
            info!("processing handbook {name}");
        }

        let selected = self.select_units(units);
        let (tree, canonical) = build_document(selected)?;
        let tree_stats = tree.statistics();
        info!(
            "document tree: {} chapters, {} sections, {} subsections",
            tree_stats.chapters, tree_stats.sections, tree_stats.subsections
        );

        let compiler = MarkupCompiler::new(&self.registry, self.assets);
        let succeeded = AtomicU32::new(0);
        let failed = AtomicU32::new(0);

        let process_unit = |unit: &RenumberedUnit| -> UnitResult {
            let label = unit.label();
            let outcome = compiler.compile_unit(&label, &unit.unit.paragraphs);
            for warning in outcome.diagnostics.warnings() {
                warn!("{warning}");
            }
            match &outcome.result {
                Ok(_) => {
                    succeeded.fetch_add(1, Ordering::Relaxed);
                }
                Err(err) => {
                    error!("{err}");
                    failed.fetch_add(1, Ordering::Relaxed);
                }
            }
            UnitResult::new(unit, outcome)
        };

        let results: Vec<UnitResult> = match self.config.failure_policy {
            FailurePolicy::Continue => match self.thread_pool() {
                Some(pool) => pool.install(|| canonical.par_iter().map(process_unit).collect()),
                None => canonical.par_iter().map(process_unit).collect(),
            },
            FailurePolicy::Abort => {
                let mut results = Vec::with_capacity(canonical.len());
                for unit in &canonical {
                    let result = process_unit(unit);
                    let stop = result.is_failure();
                    results.push(result);
                    if stop {
                        warn!("aborting after failure in {}", unit.label());
                        break;
                    }
                }
                results
            }
        };

        let total = canonical.len() as u32;
        let stats = BatchStats {
            total,
            succeeded: succeeded.load(Ordering::Relaxed),
            failed: failed.load(Ordering::Relaxed),
            skipped: total - results.len() as u32,
            warnings: results
                .iter()
                .map(|r| r.diagnostics.warnings().len() as u32)
                .sum(),
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        info!(
            "compiled {} units: {} succeeded, {} failed, {} skipped in {:.1}ms",
            stats.total, stats.succeeded, stats.failed, stats.skipped, stats.processing_time_ms
        );

        Ok(BatchReport {
            handbook,
            tree: tree_stats,
            outline: tree.outline(),
            results,
            stats,
        })
    }

    fn thread_pool(&self) -> Option<rayon::ThreadPool> {
        let threads = self.config.max_threads?;
        match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
            Ok(pool) => Some(pool),
            Err(err) => {
                warn!("falling back to the global thread pool: {err}");
                None
            }
        }
    }
}
