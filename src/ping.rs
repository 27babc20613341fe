use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Raw result of running a command, left uninterpreted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PingResult {
    pub host: String,
    pub reachable: bool,
    pub packet_loss_pct: Option<f64>,
    pub avg_latency_ms: Option<f64>,
    pub error: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl PingResult {
    pub fn reachable(host: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            reachable: true,
            packet_loss_pct: None,
            avg_latency_ms: None,
            error: None,
            checked_at: Utc::now(),
        }
    }

    pub fn unreachable(host: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            reachable: false,
            packet_loss_pct: None,
            avg_latency_ms: None,
            error: Some(error.into()),
            checked_at: Utc::now(),
        }
    }

    /// Classifies a finished ping run by its exit code alone.
    pub fn from_output(host: &str, output: &RawOutput) -> Self {
        if output.exit_code == 0 {
            return Self::reachable(host);
        }

        let stderr = output.stderr.trim();
        let error = if stderr.is_empty() {
            format!("ping exited with status {}", output.exit_code)
        } else {
            stderr.to_string()
        };
        Self::unreachable(host, error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(stdout: &str, stderr: &str, exit_code: i32) -> RawOutput {
        RawOutput {
            stdout: stdout.to_string(),
            stderr: stderr.to_string(),
            exit_code,
        }
    }

    #[test]
    fn test_zero_exit_is_reachable() {
        let result = PingResult::from_output("example.com", &raw("64 bytes from ...", "", 0));
        assert_eq!(result.host, "example.com");
        assert!(result.reachable);
        assert!(result.error.is_none());
        assert!(result.packet_loss_pct.is_none());
        assert!(result.avg_latency_ms.is_none());
    }

    #[test]
    fn test_non_zero_exit_keeps_stderr() {
        let result = PingResult::from_output("nope.invalid", &raw("", "ping: unknown host\n", 2));
        assert!(!result.reachable);
        assert_eq!(result.error.as_deref(), Some("ping: unknown host"));
    }

    #[test]
    fn test_non_zero_exit_without_stderr() {
        let result = PingResult::from_output("10.255.255.1", &raw("100% packet loss", "  ", 1));
        assert!(!result.reachable);
        assert_eq!(result.error.as_deref(), Some("ping exited with status 1"));
    }

    #[test]
    fn test_serializes_to_json() {
        let result = PingResult::unreachable("example.com", "Ping command timed out");
        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["host"], "example.com");
        assert_eq!(json["reachable"], false);
        assert!(json["packet_loss_pct"].is_null());
        assert_eq!(json["error"], "Ping command timed out");
    }
}
