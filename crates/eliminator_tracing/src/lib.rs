use std::sync::atomic::AtomicBool;

use tracing::Level;

/// Set this variable to an `EnvFilter` directive (e.g. `ELIMINATOR_LOG=debug`) to see engine logs.
pub const LOG_ENV: &str = "ELIMINATOR_LOG";

static IS_INIT: AtomicBool = AtomicBool::new(false);

pub fn init() {
  use tracing_subscriber::{fmt, prelude::*, EnvFilter};
  if !IS_INIT.swap(true, std::sync::atomic::Ordering::SeqCst) {
    tracing_subscriber::registry()
      .with(fmt::layer())
      .with(EnvFilter::from_env(LOG_ENV))
      .with(
        tracing_subscriber::filter::Targets::new()
          .with_targets(vec![("eliminator", Level::TRACE)]),
      )
      .try_init()
      .ok();
  }
}

/// Installs the subscriber only when `ELIMINATOR_LOG` is present, so embedding hosts keep
/// their own subscriber by default.
pub fn enable_tracing_on_demand() {
  if std::env::var_os(LOG_ENV).is_some() {
    init();
  }
}
