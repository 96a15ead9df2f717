use std::path::PathBuf;

use eliminator_common::Loader;
use eliminator_compiler::Compiler;
use once_cell::sync::Lazy;
use swc_core::{
  common::{Mark, GLOBALS},
  ecma::{
    ast::{self, Id},
    transforms::base::resolver,
    visit::{noop_visit_type, Visit, VisitMutWith, VisitWith},
  },
};

static COMPILER: Lazy<Compiler> = Lazy::new(Default::default);

pub fn parse(code: &str) -> ast::Module {
  let fm = COMPILER.create_source_file(PathBuf::from("input.js"), code.to_string());
  COMPILER
    .parse(fm, Loader::Js)
    .unwrap_or_else(|err| panic!("failed to parse test input:\n{err}\n{code}"))
}

/// Parses `code` and runs `resolver` over it, the way the facade prepares a module.
pub fn parse_resolved(code: &str) -> ast::Module {
  let mut module = parse(code);
  GLOBALS.set(&Default::default(), || {
    let unresolved_mark = Mark::new();
    let top_level_mark = Mark::new();
    module.visit_mut_with(&mut resolver(unresolved_mark, top_level_mark, false));
  });
  module
}

pub fn print(module: &ast::Module) -> String {
  COMPILER.print(module, None).unwrap()
}

/// Reprints `code`, so expectations don't depend on the printer's whitespace.
pub fn normalize(code: &str) -> String {
  print(&parse(code))
}

/// The resolved id of the first identifier named `name`.
pub fn find_id(module: &ast::Module, name: &str) -> Id {
  struct Finder<'a> {
    name: &'a str,
    found: Option<Id>,
  }

  impl Visit for Finder<'_> {
    noop_visit_type!();

    fn visit_ident(&mut self, n: &ast::Ident) {
      if self.found.is_none() && &*n.sym == self.name {
        self.found = Some(n.to_id());
      }
    }
  }

  let mut finder = Finder { name, found: None };
  module.visit_with(&mut finder);
  finder
    .found
    .unwrap_or_else(|| panic!("no identifier named `{name}`"))
}
