use eliminator_common::{ExportName, Symbol};
use hashlink::LinkedHashSet;
use rustc_hash::FxHashSet;

#[derive(Debug, Default, Clone)]
pub struct EliminationReport {
  /// Export names replaced by a placeholder, in source order.
  pub removed_exports: LinkedHashSet<ExportName>,
  /// Bindings that were referenced before any export was removed.
  pub candidates: FxHashSet<Symbol>,
  pub passes: usize,
  /// Declarations, pattern leaves, import specifiers and assignments removed by the sweep.
  pub removed_bindings: usize,
}

impl EliminationReport {
  pub fn is_noop(&self) -> bool {
    self.removed_exports.is_empty()
  }
}
