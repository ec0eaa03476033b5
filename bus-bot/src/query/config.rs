//! Query engine configuration.

/// Tunable limits for schedule queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    /// Number of trips shown for "now" questions when the user asked for
    /// neither a count nor a full listing.
    pub now_window: usize,
}

impl QueryConfig {
    pub fn new(now_window: usize) -> Self {
        Self { now_window }
    }

    /// Set the default "now" window.
    pub fn with_now_window(mut self, n: usize) -> Self {
        self.now_window = n;
        self
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self { now_window: 3 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        assert_eq!(QueryConfig::default().now_window, 3);
    }

    #[test]
    fn custom_config() {
        assert_eq!(QueryConfig::new(5).now_window, 5);
        assert_eq!(QueryConfig::default().with_now_window(1).now_window, 1);
    }
}
