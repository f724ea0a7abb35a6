// src/exec/output.rs

//! Parsing and classification of captured script output.
//!
//! Scripts advertise their HTTP result by printing a marker line:
//!
//! ```text
//! HTTP Status: 404
//! ```
//!
//! [`classify`] implements the runner's verdict: the first marker in
//! stdout decides the status, and anything `>= 400` is an API error.
//! There is deliberately no upper bound, so a script printing
//! `HTTP Status: 700` is still treated as an error.
//!
//! [`extract_http_status`] is the wider net for output that lacks the
//! plain marker: raw `HTTP/1.1 404` response lines and
//! `-w "HTTPSTATUS:%{http_code}"` write-outs.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

static STATUS_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"HTTP Status: (\d+)").expect("status marker pattern"));

static FALLBACK_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"HTTP Status: (\d+)",
        r"HTTP/\d\.\d (\d+)",
        r"HTTPSTATUS:(\d+)",
        r"Status: (\d+)",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("status extraction pattern"))
    .collect()
});

/// Structured verdict over one script's captured output.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OutputVerdict {
    /// Status parsed from the first marker in stdout, if any.
    pub http_status: Option<u16>,
    /// True when a status was found and it is `>= 400`.
    pub is_api_error: bool,
    /// stderr when non-empty, else a synthesized `HTTP <status> error`
    /// for API errors, else absent.
    pub error_message: Option<String>,
}

/// Decide success or API error from captured stdout/stderr.
///
/// Only stdout is scanned for the marker; the first match wins.
/// Non-numeric markers do not match the pattern, and digit runs too
/// large for a status code are treated as absent.
pub fn classify(stdout: &str, stderr: &str) -> OutputVerdict {
    let http_status = STATUS_MARKER
        .captures(stdout)
        .and_then(|caps| caps[1].parse::<u16>().ok());

    let api_status = http_status.filter(|status| *status >= 400);

    let error_message = if !stderr.is_empty() {
        Some(stderr.to_string())
    } else {
        api_status.map(|status| format!("HTTP {} error", status))
    };

    OutputVerdict {
        http_status,
        is_api_error: api_status.is_some(),
        error_message,
    }
}

/// Extract an HTTP status from assorted curl output formats.
///
/// Patterns are tried in order and the first matching one decides;
/// used by the runner to attach a status to process-level failures
/// whose output never printed the plain marker.
pub fn extract_http_status(output: &str) -> Option<u16> {
    FALLBACK_PATTERNS
        .iter()
        .find_map(|re| re.captures(output))
        .and_then(|caps| caps[1].parse::<u16>().ok())
}

/// Coarse bucket for a status code, used in the API error log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    ServerError,
    ClientError,
    Redirection,
    Success,
    Unknown,
}

impl ErrorCategory {
    pub fn from_status(status: u16) -> Self {
        match status {
            500.. => Self::ServerError,
            400..=499 => Self::ClientError,
            300..=399 => Self::Redirection,
            200..=299 => Self::Success,
            _ => Self::Unknown,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::ServerError => "server_error",
            Self::ClientError => "client_error",
            Self::Redirection => "redirection",
            Self::Success => "success",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
