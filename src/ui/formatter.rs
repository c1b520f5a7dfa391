use crate::shape::ValidationResult;
use colored::Colorize;
use std::sync::atomic::{AtomicBool, Ordering};

/// Pretty printing utilities for command output
pub struct Formatter;

impl Formatter {
    /// Format a validation report, one mismatch per line.
    pub fn format_validation(type_name: &str, result: &ValidationResult) -> String {
        if result.is_valid {
            return Self::success(format!("{} matches the API shape", type_name));
        }

        let mut lines = vec![Self::error(format!(
            "{} drifted from the API shape ({} mismatch{})",
            type_name,
            result.mismatches.len(),
            if result.mismatches.len() == 1 { "" } else { "es" }
        ))];
        lines.extend(
            result
                .mismatches
                .iter()
                .map(|mismatch| format!("  - {}", mismatch)),
        );
        lines.join("\n")
    }

    /// Format a `key = value` line.
    pub fn format_setting(key: &str, value: impl std::fmt::Display) -> String {
        format!("{} = {}", Self::info(key), value)
    }

    /// Format an informational message in blue.
    pub fn info(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Info)
    }

    /// Format a success message in green.
    pub fn success(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Success)
    }

    /// Format a warning message in yellow.
    pub fn warning(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Warning)
    }

    /// Format an error message in red.
    pub fn error(message: impl AsRef<str>) -> String {
        Self::apply_color(message.as_ref(), ColorKind::Error)
    }

    /// Configure whether ANSI colors are enabled.
    pub fn configure_colors(enable: bool) {
        COLOR_ENABLED.store(enable, Ordering::Relaxed);
    }

    /// Auto-configure color output based on environment.
    pub fn configure_colors_from_env() {
        let no_color = std::env::var_os("NO_COLOR").is_some();
        Self::configure_colors(!no_color);
    }

    fn apply_color(message: &str, kind: ColorKind) -> String {
        if !COLOR_ENABLED.load(Ordering::Relaxed) {
            return message.to_string();
        }

        match kind {
            ColorKind::Info => format!("{}", message.blue()),
            ColorKind::Success => format!("{}", message.green()),
            ColorKind::Warning => format!("{}", message.yellow()),
            ColorKind::Error => format!("{}", message.red()),
        }
    }
}

#[derive(Copy, Clone)]
enum ColorKind {
    Info,
    Success,
    Warning,
    Error,
}

static COLOR_ENABLED: AtomicBool = AtomicBool::new(true);
