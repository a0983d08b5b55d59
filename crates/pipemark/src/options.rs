//! Rewrite options.

/// Settings applied uniformly to every block of one document.
///
/// There are no environment-derived defaults: a caller that wants debug
/// records in development builds sets `debug_logging` itself.
///
/// Configuration files describe these settings through
/// [`Config`](crate::Config), which builds them with
/// [`Config::rewrite_options`](crate::Config::rewrite_options).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteOptions {
    /// Prepended to every generated call name, e.g. `utils.`.
    pub name_prefix: String,

    /// Record a before/after pair for every rewritten block.
    pub debug_logging: bool,
}

impl RewriteOptions {
    /// Creates options with no prefix and debug recording off.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the call-name prefix.
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Enables or disables debug recording.
    pub fn debug(mut self, enabled: bool) -> Self {
        self.debug_logging = enabled;
        self
    }
}
