use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio::time::{timeout_at, Duration, Instant};
use tracing::debug;

use crate::error::ToolError;

/// Timeout applied when a caller does not pick one.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Runs an external command given as a discrete argument vector.
///
/// `args[0]` is the program. Arguments are never joined into a shell string.
#[async_trait]
pub trait ProcessRunner: Send + Sync {
    /// Returns captured stdout when the command exits with status 0.
    async fn execute(&self, args: &[String], timeout_s: u64) -> Result<String, ToolError>;
}

/// [`ProcessRunner`] backed by `tokio::process`.
///
/// The child runs in its own session so that a timeout kills the whole
/// process group, and it is reaped before the timeout error is returned.
#[derive(Debug, Clone, Default)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProcessRunner for CommandRunner {
    async fn execute(&self, args: &[String], timeout_s: u64) -> Result<String, ToolError> {
        let command_line = args.join(" ");
        debug!("Executing command: {}", command_line);

        let result = run(args, timeout_s, &command_line).await;
        match &result {
            Ok(stdout) => debug!(
                command = %command_line,
                bytes = stdout.len(),
                "Command executed successfully"
            ),
            Err(e) => debug!(command = %command_line, error = %e, "Command execution failed"),
        }
        result
    }
}

async fn run(args: &[String], timeout_s: u64, command_line: &str) -> Result<String, ToolError> {
    let failed = |exit_code: Option<i32>, detail: String| ToolError::ExecutionFailed {
        command: command_line.to_string(),
        exit_code,
        detail,
    };

    let (program, rest) = args
        .split_first()
        .ok_or_else(|| failed(None, "Empty command".into()))?;

    let mut cmd = Command::new(program);
    cmd.args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    #[cfg(unix)]
    {
        unsafe {
            cmd.pre_exec(|| {
                // New session, so the child leads its own process group
                libc::setsid();
                Ok(())
            });
        }
    }

    let mut child = cmd.spawn().map_err(|e| failed(None, e.to_string()))?;
    let process_group = child.id();
    let mut stdout_task = spawn_reader(child.stdout.take());
    let mut stderr_task = spawn_reader(child.stderr.take());

    // Exit and pipe draining share one deadline
    let deadline = Instant::now() + Duration::from_secs(timeout_s);
    let finished = timeout_at(deadline, async {
        let status = child.wait().await;
        let stdout = collect(&mut stdout_task).await;
        let stderr = collect(&mut stderr_task).await;
        (status, stdout, stderr)
    })
    .await;

    let (status, stdout, stderr) = match finished {
        Ok(outcome) => outcome,
        Err(_) => {
            terminate(&mut child, process_group).await;
            stdout_task.abort();
            stderr_task.abort();
            return Err(ToolError::ExecutionTimeout {
                command: command_line.to_string(),
                timeout_s,
            });
        }
    };

    let status = status.map_err(|e| failed(None, e.to_string()))?;
    let stdout = stdout.map_err(|e| failed(status.code(), e))?;
    let stderr = stderr.map_err(|e| failed(status.code(), e))?;

    if !status.success() {
        let stderr = stderr.trim();
        let detail = if stderr.is_empty() {
            format!("process exited with {status}")
        } else {
            stderr.to_string()
        };
        return Err(failed(status.code(), detail));
    }

    Ok(stdout)
}

fn spawn_reader<R>(pipe: Option<R>) -> JoinHandle<std::io::Result<Vec<u8>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            pipe.read_to_end(&mut buf).await?;
        }
        Ok(buf)
    })
}

async fn collect(task: &mut JoinHandle<std::io::Result<Vec<u8>>>) -> Result<String, String> {
    let bytes = task
        .await
        .map_err(|e| e.to_string())?
        .map_err(|e| e.to_string())?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// `process_group` is the pid recorded at spawn. The leader may already be
/// reaped while other members of its group are still running.
async fn terminate(child: &mut Child, process_group: Option<u32>) {
    #[cfg(unix)]
    if let Some(pgid) = process_group {
        unsafe {
            libc::killpg(pgid as libc::pid_t, libc::SIGKILL);
        }
    }
    #[cfg(not(unix))]
    let _ = process_group;

    if let Err(e) = child.start_kill() {
        debug!(error = %e, "Kill signal not delivered");
    }
    if let Err(e) = child.wait().await {
        debug!(error = %e, "Failed to reap timed out command");
    }
}
