pub mod config;
pub mod error;
pub mod hosts;
pub mod ping;
pub mod ping_executor;
pub mod platform;

pub use config::ProbeConfig;
pub use error::{DiagError, Result};
pub use hosts::read_hosts_file;
pub use ping::{PingResult, RawOutput};
pub use ping_executor::{PingExecutor, TIMEOUT_MESSAGE};
pub use platform::OsFamily;
