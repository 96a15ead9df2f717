use std::{fmt::Display, sync::Arc};

use swc_core::common::SourceFile;

use crate::{ErrorKind, StaticStr};

#[derive(Debug)]
pub struct Error {
  contexts: Vec<String>,
  pub kind: ErrorKind,
}

impl Error {
  fn with_kind(kind: ErrorKind) -> Self {
    Self {
      contexts: vec![],
      kind,
    }
  }

  pub fn context(mut self, context: String) -> Self {
    self.contexts.push(context);
    self
  }

  pub fn code(&self) -> &'static str {
    self.kind.code()
  }

  // --- Engine

  pub fn unsupported_binding_shape(shape: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::UnsupportedBindingShape {
      shape: shape.into(),
    })
  }

  // --- Facade

  pub fn parse_js_failed(
    fm: Arc<SourceFile>,
    source: swc_core::ecma::parser::error::Error,
  ) -> Self {
    Self::with_kind(ErrorKind::ParseJsFailed {
      source_file: fm,
      source,
    })
  }

  pub fn unknown_loader(value: impl Into<StaticStr>) -> Self {
    Self::with_kind(ErrorKind::UnknownLoader(value.into()))
  }

  pub fn panic(msg: String) -> Self {
    anyhow::format_err!(msg).into()
  }
}

impl std::convert::From<anyhow::Error> for Error {
  fn from(value: anyhow::Error) -> Self {
    Self::with_kind(ErrorKind::Panic { source: value })
  }
}

impl std::error::Error for Error {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match &self.kind {
      ErrorKind::Panic { source, .. } => Some(source.as_ref()),
      _ => None,
    }
  }
}

impl Display for Error {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    for ctx in self.contexts.iter().rev() {
      writeln!(f, "{}: {}", ansi_term::Color::Yellow.paint("context"), ctx)?;
    }

    self.kind.fmt(f)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn unsupported_shape_has_stable_code() {
    let err = Error::unsupported_binding_shape("expression pattern");
    assert_eq!(err.code(), "UNSUPPORTED_BINDING_SHAPE");
    assert_eq!(
      err.to_string(),
      "Unsupported binding shape: expression pattern cannot appear as a declaration target."
    );
  }

  #[test]
  fn contexts_are_printed_before_the_message() {
    let err = Error::panic("codegen failed".to_string()).context("printing index.js".to_string());
    let rendered = err.to_string();
    assert!(rendered.contains("printing index.js"));
    assert!(rendered.ends_with("codegen failed"));
    assert_eq!(err.code(), "PANIC");
  }
}
