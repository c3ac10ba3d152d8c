//! Base plugin trait.

use crate::Result;

/// Metadata and lifecycle shared by every pluggable capability.
///
/// Registries call [`initialize`](Plugin::initialize) on registration and
/// [`shutdown`](Plugin::shutdown) on removal. Both default to no-ops.
pub trait Plugin: Send + Sync {
    /// Unique name, used as the registry key. No whitespace.
    fn name(&self) -> &str;

    fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }

    fn initialize(&self) -> Result<()> {
        Ok(())
    }

    fn shutdown(&self) -> Result<()> {
        Ok(())
    }

    fn description(&self) -> &str {
        ""
    }
}
