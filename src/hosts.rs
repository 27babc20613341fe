use std::fs;
use std::path::Path;
use log::debug;
use crate::error::{DiagError, Result};

const COMMENT_PREFIX: char = '#';

/// Reads a hosts file and returns the hosts it lists, in file order.
///
/// Blank lines and lines starting with `#` are skipped. Host strings are not
/// validated beyond being non-empty, and duplicates are kept.
pub fn read_hosts_file(path: &Path) -> Result<Vec<String>> {
    if !path.is_file() {
        return Err(DiagError::FileNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    let hosts = parse_hosts(&content);
    debug!("Read {} host(s) from {}", hosts.len(), path.display());

    if hosts.is_empty() {
        return Err(DiagError::NoValidHosts);
    }
    Ok(hosts)
}

pub fn parse_hosts(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with(COMMENT_PREFIX))
        .map(str::to_string)
        .collect()
}
