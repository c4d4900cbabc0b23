use serde::Serialize;

use crate::config::Settings;
use crate::format::FormatOptions;

use super::commands::FormatFlags;

/// Format a result as minified JSON.
pub fn format_json<T: Serialize>(result: &T) -> String {
    serde_json::to_string(result).unwrap_or_else(|e| format!("{{\"error\":\"{e}\"}}"))
}

/// Format an error as JSON.
pub fn format_error(err: &dyn std::fmt::Display) -> String {
    format!("{{\"error\":\"{}\"}}", err.to_string().replace('"', "\\\""))
}

/// Settings file options with command-line flags layered on top.
#[must_use]
pub fn resolve_options(settings: &Settings, flags: &FormatFlags) -> FormatOptions {
    let base = settings.format;
    FormatOptions {
        on_malformed: flags.on_malformed.unwrap_or(base.on_malformed),
        sentinel: flags.sentinel.unwrap_or(base.sentinel),
        quote: flags.quote.unwrap_or(base.quote),
        detect_formatted: base.detect_formatted && !flags.no_detect_formatted,
    }
}
