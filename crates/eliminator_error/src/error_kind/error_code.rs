// --- Engine
pub const UNSUPPORTED_BINDING_SHAPE: &str = "UNSUPPORTED_BINDING_SHAPE";

// --- Facade
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNKNOWN_LOADER: &str = "UNKNOWN_LOADER";

pub const PANIC: &str = "PANIC";
