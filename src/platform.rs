use crate::error::{DiagError, Result};

const PING_PROGRAM: &str = "ping";

/// Largest per-packet timeout that still fits in milliseconds.
pub const MAX_TIMEOUT_SECS: u64 = u64::MAX / 1000;

/// Operating system families the ping command builder knows about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsFamily {
    Darwin,
    Linux,
    Unsupported(String),
}

impl OsFamily {
    /// Detects the family of the running system.
    pub fn detect() -> Self {
        Self::from_identifier(&system_identifier())
    }

    /// Maps a `uname`-style system name ("Darwin", "Linux", ...) to a family.
    pub fn from_identifier(identifier: &str) -> Self {
        match identifier {
            "Darwin" => OsFamily::Darwin,
            "Linux" => OsFamily::Linux,
            other => OsFamily::Unsupported(other.to_string()),
        }
    }

    /// Builds the native ping invocation for this family.
    ///
    /// `timeout_secs` is the per-packet wait; macOS ping takes it in
    /// milliseconds, Linux ping in seconds.
    pub fn ping_command(&self, host: &str, count: u32, timeout_secs: u64) -> Result<Vec<String>> {
        match self {
            OsFamily::Darwin => darwin_command(host, count, timeout_secs),
            OsFamily::Linux => Ok(linux_command(host, count, timeout_secs)),
            OsFamily::Unsupported(name) => Err(DiagError::NotImplemented(name.clone())),
        }
    }
}

fn darwin_command(host: &str, count: u32, timeout_secs: u64) -> Result<Vec<String>> {
    let timeout_ms = timeout_secs.checked_mul(1000).ok_or_else(|| {
        DiagError::InvalidConfig(format!("timeout of {}s is too large", timeout_secs))
    })?;
    Ok(vec![
        PING_PROGRAM.to_string(),
        "-c".to_string(),
        count.to_string(),
        "-W".to_string(),
        timeout_ms.to_string(),
        host.to_string(),
    ])
}

fn linux_command(host: &str, count: u32, timeout_secs: u64) -> Vec<String> {
    vec![
        PING_PROGRAM.to_string(),
        "-c".to_string(),
        count.to_string(),
        "-W".to_string(),
        timeout_secs.to_string(),
        host.to_string(),
    ]
}

fn system_identifier() -> String {
    match std::env::consts::OS {
        "macos" => "Darwin".to_string(),
        "linux" => "Linux".to_string(),
        "windows" => "Windows".to_string(),
        "freebsd" => "FreeBSD".to_string(),
        other => other.to_string(),
    }
}
