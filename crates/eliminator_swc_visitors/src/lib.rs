mod scope;
pub use scope::*;
mod liveness;
pub use liveness::*;
pub mod pattern;
mod export_pruner;
pub use export_pruner::*;
mod mark;
pub use mark::*;
mod sweep;
pub use sweep::*;
mod resolve;
pub use resolve::*;
