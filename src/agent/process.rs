use std::io;
use std::process::{ExitStatus, Stdio};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::{info, warn};
use tokio::io::AsyncReadExt;
use tokio::process::{Child, Command};
use tokio::time::timeout;

use super::{Agent, AgentCommand, ExecutionOutcome};

/// Runs the agent as a local child process.
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessAgent;

#[async_trait]
impl Agent for ProcessAgent {
    async fn invoke(&self, command: AgentCommand, budget: Duration) -> Result<ExecutionOutcome> {
        let started = Instant::now();

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        // Own process group, so a timeout can take down anything the agent forks.
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                warn!("Could not start {}: {}", command.program, e);
                return Ok(ExecutionOutcome::BinaryNotFound);
            }
        };

        let collected = timeout(budget, collect(&mut child)).await;
        match collected {
            Ok(Ok((status, stdout, stderr))) => {
                info!("{} exited with {} after {:?}", command.program, status, started.elapsed());
                Ok(classify(status, &stdout, &stderr))
            }
            Ok(Err(e)) => {
                reap(&mut child).await;
                Err(e).with_context(|| format!("failed to collect output from {}", command.program))
            }
            Err(_) => {
                let elapsed = started.elapsed();
                warn!("{} exceeded {:?}, killing it", command.program, budget);
                reap(&mut child).await;
                Ok(ExecutionOutcome::TimedOut(elapsed))
            }
        }
    }
}

async fn collect(child: &mut Child) -> io::Result<(ExitStatus, Vec<u8>, Vec<u8>)> {
    let mut stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "stdout was not captured"))?;
    let mut stderr = child
        .stderr
        .take()
        .ok_or_else(|| io::Error::new(io::ErrorKind::BrokenPipe, "stderr was not captured"))?;

    let mut out = Vec::new();
    let mut err = Vec::new();
    let (status, _, _) = tokio::try_join!(
        child.wait(),
        stdout.read_to_end(&mut out),
        stderr.read_to_end(&mut err)
    )?;

    Ok((status, out, err))
}

/// Kill the agent's process group, then kill and wait on the agent itself so
/// no zombie outlives the request.
async fn reap(child: &mut Child) {
    #[cfg(unix)]
    {
        if let Some(pid) = child.id() {
            // SAFETY: kill(2) only signals; the group was created by `process_group(0)`.
            let rc = unsafe { libc::kill(-(pid as libc::pid_t), libc::SIGKILL) };
            if rc != 0 {
                warn!("Failed to kill agent process group {}: {}", pid, io::Error::last_os_error());
            }
        }
    }
    if let Err(e) = child.kill().await {
        warn!("Failed to kill agent process: {}", e);
    }
}

/// Non-zero exits report stderr if anything was written to it, else stdout,
/// trimmed. Only when the chosen stream trims to nothing does the exit status
/// itself become the message.
pub fn classify(status: ExitStatus, stdout: &[u8], stderr: &[u8]) -> ExecutionOutcome {
    let stdout = String::from_utf8_lossy(stdout);

    if status.success() {
        return ExecutionOutcome::Completed(stdout.trim().to_string());
    }

    let stderr = String::from_utf8_lossy(stderr);
    let chosen = if !stderr.is_empty() { stderr.trim() } else { stdout.trim() };

    let message = if !chosen.is_empty() {
        chosen.to_string()
    } else {
        match status.code() {
            Some(code) => format!("agent exec failed (exit {})", code),
            None => format!("agent exec failed ({})", status),
        }
    };

    ExecutionOutcome::NonZeroExit(message)
}
