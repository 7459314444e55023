//! Application configuration
//!
//! Process-level settings that come from the command line rather than the
//! pipeline file.

/// Application configuration structure
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    /// Verbosity level for logging
    pub verbose: u8,
}

impl AppConfig {
    pub fn new(verbose: u8) -> Self {
        Self { verbose }
    }

    /// Get the log level string based on verbosity
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_by_verbosity() {
        let levels: Vec<&str> = (0..4).map(|v| AppConfig::new(v).log_level()).collect();
        assert_eq!(
            levels,
            vec!["info", "debug", "trace", "trace"]
        );
        assert_eq!(AppConfig::new(9).log_level(), "trace");
    }
}
