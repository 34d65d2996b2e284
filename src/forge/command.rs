//! Subprocess execution with a hard wall-clock timeout
//!
//! Every external command the service runs goes through [`run_command`]:
//! spawn with piped output, wait at most `timeout`, kill the process if the
//! timeout elapses. Non-zero exits surface the captured stderr in the error.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use thiserror::Error;
use tokio::io::AsyncReadExt;
use tokio::process::Command;
use tokio::time::timeout;

/// Subprocess errors
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("command `{command}` timed out after {timeout_secs} seconds")]
    TimedOut { command: String, timeout_secs: u64 },
    #[error("command `{command}` failed (exit code {exit_code}): {stderr}")]
    Failed {
        command: String,
        exit_code: i32,
        stderr: String,
    },
    #[error("command `{command}` error: {message}")]
    Io { command: String, message: String },
}

/// Captured output of a completed command.
#[derive(Debug)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

fn display_command(program: &str, args: &[&str]) -> String {
    let mut parts = vec![program.to_string()];
    parts.extend(args.iter().map(|a| a.to_string()));
    parts.join(" ")
}

/// Run a command to completion, enforcing the timeout.
///
/// On timeout the child is forcibly killed and a `TimedOut` error is
/// returned; the process is never left running.
pub async fn run_command(
    program: &str,
    args: &[&str],
    cwd: &Path,
    limit: Duration,
) -> Result<CommandOutput, CommandError> {
    let command = display_command(program, args);
    log::debug!("running `{}` in {}", command, cwd.display());

    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| CommandError::Spawn {
            command: command.clone(),
            source,
        })?;

    let mut stdout_pipe = child.stdout.take();
    let mut stderr_pipe = child.stderr.take();

    let stdout_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(pipe) = stdout_pipe.as_mut() {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    });
    let stderr_task = tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(pipe) = stderr_pipe.as_mut() {
            let _ = pipe.read_to_end(&mut buf).await;
        }
        buf
    });

    let status = match timeout(limit, child.wait()).await {
        Ok(Ok(status)) => status,
        Ok(Err(e)) => {
            return Err(CommandError::Io {
                command,
                message: e.to_string(),
            });
        }
        Err(_) => {
            child.kill().await.ok();
            return Err(CommandError::TimedOut {
                command,
                timeout_secs: limit.as_secs(),
            });
        }
    };

    let stdout = String::from_utf8_lossy(&stdout_task.await.unwrap_or_default()).into_owned();
    let stderr = String::from_utf8_lossy(&stderr_task.await.unwrap_or_default()).into_owned();

    if !status.success() {
        return Err(CommandError::Failed {
            command,
            exit_code: status.code().unwrap_or(-1),
            stderr,
        });
    }

    Ok(CommandOutput { stdout, stderr })
}
