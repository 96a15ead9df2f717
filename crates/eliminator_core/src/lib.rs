mod options;
pub use options::*;
mod report;
pub use report::*;
mod eliminator;
pub use eliminator::*;

pub use eliminator_swc_visitors::{ReferenceAnalyzer, ReferenceGraph, ScopeAnalyzer};

pub type EliminateResult<T> = eliminator_error::Result<T>;
pub type EliminateError = eliminator_error::Error;
