//! Output formatter for human-readable and JSON output
//!
//! Each message kind is rendered by a pure `*_text` function and printed by
//! a thin wrapper; `None` means the message is suppressed.

use console::style;
use serde::Serialize;

use super::OutputConfig;

/// Formatter for CLI output
///
/// Handles both human-readable and JSON output formats based on configuration.
/// When JSON mode is enabled, all output is strict JSON without colors or progress.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: OutputConfig,
}

impl Formatter {
    /// Create a new formatter with the given configuration
    pub fn new(config: OutputConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &OutputConfig {
        &self.config
    }

    /// Check if JSON output mode is enabled
    pub fn is_json(&self) -> bool {
        self.config.json
    }

    /// Check if colors are enabled
    pub fn colors_enabled(&self) -> bool {
        !self.config.no_color && !self.config.json
    }

    /// Output a success message (human mode only)
    pub fn success(&self, message: &str) {
        if let Some(text) = self.success_text(message) {
            println!("{text}");
        }
    }

    fn success_text(&self, message: &str) -> Option<String> {
        if self.config.quiet || self.config.json {
            return None;
        }
        let mark = if self.colors_enabled() {
            style("✓").green().to_string()
        } else {
            "✓".to_string()
        };
        Some(format!("{mark} {message}"))
    }

    /// Output an error message to stderr
    ///
    /// Errors are always printed, even in quiet mode.
    pub fn error(&self, message: &str) {
        eprintln!("{}", self.error_text(message));
    }

    fn error_text(&self, message: &str) -> String {
        if self.config.json {
            let error = serde_json::json!({ "error": message });
            serde_json::to_string_pretty(&error).unwrap_or_else(|_| message.to_string())
        } else if self.colors_enabled() {
            format!("{} {message}", style("✗").red())
        } else {
            format!("✗ {message}")
        }
    }

    /// Output JSON directly
    pub fn json<T: Serialize + ?Sized>(&self, value: &T) {
        match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Error serializing output: {e}"),
        }
    }

    /// Print a line of text (respects quiet mode)
    pub fn println(&self, message: &str) {
        if !self.config.quiet {
            println!("{message}");
        }
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(OutputConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn formatter(config: OutputConfig) -> Formatter {
        Formatter::new(config)
    }

    #[test]
    fn test_json_mode_disables_colors() {
        let json = formatter(OutputConfig {
            json: true,
            ..Default::default()
        });
        assert!(json.is_json());
        assert!(!json.colors_enabled());

        let plain = formatter(OutputConfig {
            no_color: true,
            ..Default::default()
        });
        assert!(!plain.colors_enabled());
    }

    #[test]
    fn test_json_error_shape() {
        let json = formatter(OutputConfig {
            json: true,
            quiet: true,
            ..Default::default()
        });
        let text = json.error_text("Space 'x' doesn't exist. Available spaces: [media]");
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"error": "Space 'x' doesn't exist. Available spaces: [media]"})
        );
    }

    #[test]
    fn test_plain_error_prefix() {
        let plain = formatter(OutputConfig {
            no_color: true,
            quiet: true,
            ..Default::default()
        });
        assert_eq!(plain.error_text("No space selected"), "✗ No space selected");
    }

    #[test]
    fn test_success_suppressed_in_json_and_quiet() {
        let json = formatter(OutputConfig {
            json: true,
            ..Default::default()
        });
        assert!(json.success_text("Using space 'media'").is_none());

        let quiet = formatter(OutputConfig {
            quiet: true,
            ..Default::default()
        });
        assert!(quiet.success_text("Using space 'media'").is_none());

        let plain = formatter(OutputConfig {
            no_color: true,
            ..Default::default()
        });
        assert_eq!(
            plain.success_text("Using space 'media'").as_deref(),
            Some("✓ Using space 'media'")
        );
    }
}
