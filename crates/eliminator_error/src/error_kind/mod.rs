use std::{fmt::Display, sync::Arc};

use swc_core::common::SourceFile;

use crate::StaticStr;

pub mod error_code;

#[derive(Debug)]
pub enum ErrorKind {
  // --- Engine
  /// A declaration target that is neither an identifier, an object/array pattern,
  /// a rest element nor a default-valued element.
  UnsupportedBindingShape {
    shape: StaticStr,
  },

  // --- Facade
  ParseJsFailed {
    source_file: Arc<SourceFile>,
    source: swc_core::ecma::parser::error::Error,
  },
  UnknownLoader(StaticStr),

  /// This error means that the eliminator panics because an unrecoverable error happens.
  ///
  /// Foreign errors without a dedicated kind (codegen failures, mostly) are wrapped here.
  Panic {
    source: anyhow::Error,
  },
}

impl Display for ErrorKind {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ErrorKind::UnsupportedBindingShape { shape } => write!(
        f,
        "Unsupported binding shape: {shape} cannot appear as a declaration target."
      ),
      ErrorKind::ParseJsFailed { source_file, source } => {
        write!(f, "Parse failed: {} ({:?})", source_file.name, source.kind())
      }
      ErrorKind::UnknownLoader(value) => write!(f, r#"Unknown loader value "{value}""#),
      ErrorKind::Panic { source } => source.fmt(f),
    }
  }
}

impl ErrorKind {
  pub fn code(&self) -> &'static str {
    match self {
      ErrorKind::UnsupportedBindingShape { .. } => error_code::UNSUPPORTED_BINDING_SHAPE,
      ErrorKind::ParseJsFailed { .. } => error_code::PARSE_ERROR,
      ErrorKind::UnknownLoader(_) => error_code::UNKNOWN_LOADER,
      ErrorKind::Panic { .. } => error_code::PANIC,
    }
  }
}
