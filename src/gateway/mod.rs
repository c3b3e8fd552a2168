//! Gateway layer: the desktop API transport and its wire format.

pub mod http;
pub mod wire;

/// Returns the gateway module name for smoke checks.
pub fn module_name() -> &'static str {
    "gateway"
}
