use std::{path::PathBuf, sync::Arc};

use eliminator_common::Loader;
use eliminator_compiler::Compiler;
use eliminator_swc_visitors::resolve;
use once_cell::sync::Lazy;
use swc_core::common::{
  comments::SingleThreadedComments, FilePathMapping, Globals, Mark, SourceMap, GLOBALS,
};
use tracing::instrument;

pub use eliminator_core::{
  eliminate, EliminateConfig, EliminateError, EliminateOptions, EliminateResult,
  EliminationReport, Eliminator, OnRemoved, ReferenceAnalyzer, ReferenceGraph, ScopeAnalyzer,
};

static SOURCE_MAP: Lazy<Arc<SourceMap>> =
  Lazy::new(|| Arc::new(SourceMap::new(FilePathMapping::empty())));

static COMPILER: Lazy<Compiler> = Lazy::new(|| Compiler::with_cm(SOURCE_MAP.clone()));

static SWC_GLOBALS: Lazy<Arc<Globals>> = Lazy::new(|| Arc::new(Globals::new()));

#[derive(Debug)]
pub struct TransformOutput {
  pub code: String,
  pub report: EliminationReport,
}

/// Parses `code`, strips the targeted exports and prints the result.
///
/// The syntax is picked from the extension of `filename`. Comments attached to code that
/// survives are kept.
#[instrument(skip_all)]
pub fn transform(
  filename: impl Into<PathBuf>,
  code: String,
  options: &EliminateOptions,
) -> EliminateResult<TransformOutput> {
  eliminator_tracing::enable_tracing_on_demand();
  let filename = filename.into();
  let loader = Loader::from_path(&filename)?;
  tracing::debug!("Transforming {} as {loader:?}", filename.display());

  let comments = SingleThreadedComments::default();
  let source_file = COMPILER.create_source_file(filename.clone(), code);
  let mut module = COMPILER.parse_with_comments(source_file, loader, Some(&comments))?;

  GLOBALS.set(&SWC_GLOBALS, || -> EliminateResult<TransformOutput> {
    let unresolved_mark = Mark::new();
    let top_level_mark = Mark::new();
    resolve(
      &mut module,
      unresolved_mark,
      top_level_mark,
      loader.is_typescript(),
    );

    let report = eliminate(&mut module, options)?;
    let code = COMPILER.print(&module, Some(&comments)).map_err(|err| {
      EliminateError::from(err).context(format!("Printing {}", filename.display()))
    })?;
    Ok(TransformOutput { code, report })
  })
}
