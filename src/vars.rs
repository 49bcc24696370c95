//! File containing constants

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub const APP_NAME: &str = env!("CARGO_PKG_NAME");

/// First line of every generated document, marks it as cloud-config user-data
pub const DOC_MARKER: &str = "#cloud-config";

/// Printed instead of an empty document so the output is never just the marker
pub const DOC_PLACEHOLDER: &str = "# --- Add modules to generate config ---";
