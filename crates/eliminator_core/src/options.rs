use std::sync::Arc;

use derivative::Derivative;
use eliminator_common::impl_serde_default;
use serde::Deserialize;

use crate::EliminationReport;

/// Called once with the removed export names, before any supporting binding is swept.
pub type OnRemoved = Arc<dyn Fn(&EliminationReport) + Send + Sync>;

#[derive(Derivative, Default, Clone)]
#[derivative(Debug)]
pub struct EliminateOptions {
  /// Exported names to strip. Empty means the module is left untouched.
  pub target_export_names: Vec<String>,
  #[derivative(Debug = "ignore")]
  pub on_removed: Option<OnRemoved>,
}

impl EliminateOptions {
  pub fn with_targets<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
    Self {
      target_export_names: names.into_iter().map(Into::into).collect(),
      on_removed: None,
    }
  }
}

/// The serializable part of [EliminateOptions], e.g. read from a JSON config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct EliminateConfig {
  #[serde(default)]
  pub target_export_names: Vec<String>,
}

impl_serde_default!(EliminateConfig);

impl From<EliminateConfig> for EliminateOptions {
  fn from(config: EliminateConfig) -> Self {
    Self {
      target_export_names: config.target_export_names,
      on_removed: None,
    }
  }
}
