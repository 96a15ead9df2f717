use eliminator_swc_visitors::{
  sweep, CandidateCollector, ExportPruner, ReferenceAnalyzer, ScopeAnalyzer,
};
use swc_core::ecma::ast;
use tracing::{debug, instrument};

use crate::{EliminateOptions, EliminateResult, EliminationReport};

/// Strips targeted exports from resolved modules.
///
/// The module must have gone through `resolver` first: bindings are told apart by their
/// `SyntaxContext`.
pub struct Eliminator<A: ScopeAnalyzer = ReferenceAnalyzer> {
  options: EliminateOptions,
  analyzer: A,
}

impl Eliminator {
  pub fn new(options: EliminateOptions) -> Self {
    Self::with_analyzer(options, ReferenceAnalyzer)
  }
}

impl<A: ScopeAnalyzer> Eliminator<A> {
  pub fn with_analyzer(options: EliminateOptions, analyzer: A) -> Self {
    Self { options, analyzer }
  }

  pub fn options(&self) -> &EliminateOptions {
    &self.options
  }

  /// Removes the targeted exports, then every binding that only they kept alive.
  ///
  /// Nothing is crawled when no export matches. An unsupported declaration shape fails the
  /// call before the module is touched.
  #[instrument(skip_all)]
  pub fn eliminate(&self, module: &mut ast::Module) -> EliminateResult<EliminationReport> {
    let pruner = ExportPruner::new(&self.options.target_export_names);
    if !pruner.has_targets(module) {
      debug!(targets = ?self.options.target_export_names, "No export matched");
      return Ok(EliminationReport::default());
    }

    let graph = self.analyzer.crawl(module);
    let candidates = CandidateCollector::new(&graph).collect(module)?;

    let removed_exports = pruner.prune(module)?;
    let mut report = EliminationReport {
      removed_exports,
      candidates,
      ..Default::default()
    };
    if report.is_noop() {
      return Ok(report);
    }
    debug!(
      removed = ?report.removed_exports,
      candidates = report.candidates.len(),
      "Pruned exports"
    );

    if let Some(on_removed) = &self.options.on_removed {
      on_removed(&report);
    }

    let mut live = report.candidates.clone();
    let outcome = sweep(module, &self.analyzer, &mut live)?;
    report.passes = outcome.passes;
    report.removed_bindings = outcome.removed;
    Ok(report)
  }
}

/// [Eliminator::eliminate] with the default analyzer.
pub fn eliminate(
  module: &mut ast::Module,
  options: &EliminateOptions,
) -> EliminateResult<EliminationReport> {
  Eliminator::new(options.clone()).eliminate(module)
}
