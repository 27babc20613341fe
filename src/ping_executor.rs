use std::process::{ExitStatus, Stdio};
use std::time::Duration;
use log::{debug, warn};
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Command;
use crate::config::ProbeConfig;
use crate::error::{DiagError, Result};
use crate::ping::{PingResult, RawOutput};
use crate::platform::OsFamily;

pub const TIMEOUT_MESSAGE: &str = "Ping command timed out";

/// Exit code reported when the runner had to kill the child.
const TIMEOUT_EXIT_CODE: i32 = 1;

pub struct PingExecutor;

impl PingExecutor {
    /// Builds the ping invocation for the system we are running on
    pub fn build_command(host: &str, count: u32, timeout_secs: u64) -> Result<Vec<String>> {
        OsFamily::detect().ping_command(host, count, timeout_secs)
    }

    /// Runs `cmd` and returns its raw output.
    ///
    /// A non-zero exit status is returned as-is. If the command is still
    /// running after `timeout_secs`, it is killed and the result carries the
    /// stdout captured so far, [`TIMEOUT_MESSAGE`] as stderr and exit code 1.
    pub async fn run(cmd: &[String], timeout_secs: u64) -> Result<RawOutput> {
        let (program, args) = cmd.split_first().ok_or(DiagError::EmptyCommand)?;
        debug!("Running {:?} with a {}s budget", cmd, timeout_secs);

        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| DiagError::Spawn {
                program: program.clone(),
                source,
            })?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();
        let mut stdout_buf = Vec::new();
        let mut stderr_buf = Vec::new();

        let completion = async {
            tokio::try_join!(
                drain(stdout, &mut stdout_buf),
                drain(stderr, &mut stderr_buf)
            )?;
            child.wait().await
        };
        let outcome = tokio::time::timeout(Duration::from_secs(timeout_secs), completion).await;

        match outcome {
            Ok(status) => Ok(RawOutput {
                stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
                stderr: String::from_utf8_lossy(&stderr_buf).into_owned(),
                exit_code: exit_code(status?),
            }),
            Err(_) => {
                warn!("{} did not finish within {}s, killing it", program, timeout_secs);
                // kill() also waits on the child so it is reaped
                if let Err(e) = child.kill().await {
                    warn!("Failed to kill {}: {}", program, e);
                }
                Ok(RawOutput {
                    stdout: String::from_utf8_lossy(&stdout_buf).into_owned(),
                    stderr: TIMEOUT_MESSAGE.to_string(),
                    exit_code: TIMEOUT_EXIT_CODE,
                })
            }
        }
    }

    /// Pings one host with the given settings and classifies the outcome
    pub async fn probe(host: &str, config: &ProbeConfig) -> Result<(PingResult, RawOutput)> {
        let cmd = Self::build_command(host, config.count, config.timeout_secs)?;
        let output = Self::run(&cmd, config.run_timeout_secs).await?;
        Ok((PingResult::from_output(host, &output), output))
    }
}

/// Copies `reader` into `buf` chunk by chunk so a cancelled read keeps
/// everything received before it.
async fn drain<R: AsyncRead + Unpin>(reader: Option<R>, buf: &mut Vec<u8>) -> std::io::Result<()> {
    let Some(mut reader) = reader else {
        return Ok(());
    };
    let mut chunk = [0u8; 4096];
    loop {
        let n = reader.read(&mut chunk).await?;
        if n == 0 {
            return Ok(());
        }
        buf.extend_from_slice(&chunk[..n]);
    }
}

#[cfg(unix)]
fn exit_code(status: ExitStatus) -> i32 {
    use std::os::unix::process::ExitStatusExt;
    status
        .code()
        .or_else(|| status.signal().map(|signal| -signal))
        .unwrap_or(-1)
}

#[cfg(not(unix))]
fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}
