/// Default maximum list nesting accepted by the escaper.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// Configuration shared by the escaper, the builders and the composer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FragmentConfig {
    /// Maximum nesting of lists inside lists (the outermost list is depth 1).
    pub max_depth: usize,
    /// Truncate SQL in log events (in bytes). `None` means no truncation.
    pub max_log_sql_length: Option<usize>,
}

impl Default for FragmentConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_log_sql_length: Some(200),
        }
    }
}

impl FragmentConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum list nesting depth.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_log_sql_length(mut self, len: usize) -> Self {
        self.max_log_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation in log events.
    pub fn no_truncate(mut self) -> Self {
        self.max_log_sql_length = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = FragmentConfig::new();
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.max_log_sql_length, Some(200));
    }

    #[test]
    fn builder_methods_chain() {
        let config = FragmentConfig::new().max_depth(4).no_truncate();
        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_log_sql_length, None);

        let config = config.max_log_sql_length(10);
        assert_eq!(config.max_log_sql_length, Some(10));
    }
}
