use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Suppress routine per-query output; problems are still reported.
    #[serde(default)]
    pub silent: bool,
}

impl LoggingConfig {
    pub fn effective_level(&self) -> &str {
        if self.silent {
            "warn"
        } else {
            &self.level
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            silent: false,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
