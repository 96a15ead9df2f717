use std::{path::PathBuf, sync::Arc};

use ast::EsVersion;
use eliminator_common::Loader;
use swc_common::{comments::Comments, FileName, SourceMap};
use swc_core::{
  common::{self as swc_common, SourceFile},
  ecma::{
    ast, codegen as swc_ecma_codegen,
    parser::{self as swc_ecma_parser, EsConfig, Syntax, TsConfig},
  },
};
use swc_ecma_codegen::text_writer::JsWriter;
use swc_ecma_parser::{lexer::Lexer, Parser, StringInput};

#[derive(Default)]
pub struct Compiler {
  pub cm: Arc<SourceMap>,
}

impl Compiler {
  pub fn with_cm(cm: Arc<SourceMap>) -> Self {
    Self { cm }
  }

  pub fn create_source_file(&self, filename: PathBuf, code: String) -> Arc<SourceFile> {
    self.cm.new_source_file(FileName::Real(filename), code)
  }

  pub fn print(
    &self,
    ast: &ast::Module,
    comments: Option<&dyn Comments>,
  ) -> anyhow::Result<String> {
    let mut output = Vec::new();

    let mut emitter = swc_ecma_codegen::Emitter {
      cfg: swc_ecma_codegen::Config {
        ..Default::default()
      },
      cm: self.cm.clone(),
      comments: Some(&comments),
      wr: Box::new(JsWriter::new(self.cm.clone(), "\n", &mut output, None)),
    };

    emitter.emit_module(ast)?;
    String::from_utf8(output).map_err(Into::into)
  }

  pub fn parse(
    &self,
    source_file: Arc<SourceFile>,
    loader: Loader,
  ) -> eliminator_error::Result<ast::Module> {
    self.parse_with_comments(source_file, loader, None)
  }

  /// Recoverable syntax errors are treated like fatal ones: a half-understood module must not
  /// be pruned.
  pub fn parse_with_comments(
    &self,
    source_file: Arc<SourceFile>,
    loader: Loader,
    comments: Option<&dyn Comments>,
  ) -> eliminator_error::Result<ast::Module> {
    let lexer = Lexer::new(
      syntax_by_loader(loader),
      EsVersion::latest(),
      StringInput::from(source_file.as_ref()),
      comments,
    );
    let mut parser = Parser::new_from(lexer);
    // The input is always a module: the transform only makes sense for ESM exports.
    let module = parser
      .parse_module()
      .map_err(|e| eliminator_error::Error::parse_js_failed(source_file.clone(), e))?;
    if let Some(e) = parser.take_errors().into_iter().next() {
      return Err(eliminator_error::Error::parse_js_failed(source_file, e));
    }
    Ok(module)
  }
}

pub fn syntax_by_loader(loader: Loader) -> Syntax {
  match loader {
    // Page modules routinely keep JSX in `.js` files.
    Loader::Js | Loader::Jsx => Syntax::Es(EsConfig {
      jsx: true,
      ..Default::default()
    }),
    Loader::Ts | Loader::Tsx => Syntax::Typescript(TsConfig {
      tsx: matches!(loader, Loader::Tsx),
      ..Default::default()
    }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn roundtrip(filename: &str, code: &str) -> eliminator_error::Result<String> {
    let compiler = Compiler::default();
    let fm = compiler.create_source_file(filename.into(), code.to_string());
    let loader = Loader::from_path(filename.as_ref())?;
    let module = compiler.parse(fm, loader)?;
    Ok(compiler.print(&module, None)?)
  }

  #[test]
  fn prints_what_it_parses() {
    let output = roundtrip("index.js", "export var foo = 1;").unwrap();
    assert_eq!(output.trim(), "export var foo = 1;");
  }

  #[test]
  fn accepts_jsx_in_js_files() {
    let output = roundtrip("page.js", "export default function Page() { return <div />; }");
    assert!(output.is_ok());
  }

  #[test]
  fn reports_syntax_errors() {
    let err = roundtrip("broken.js", "export const = ;").unwrap_err();
    assert_eq!(err.code(), "PARSE_ERROR");
  }
}
