use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use super::error::ProcessError;

#[derive(Debug, Clone)]
pub struct ProcessCommand {
    pub program: String,
    pub args: Vec<String>,
    pub env: HashMap<String, String>,
    pub working_dir: Option<PathBuf>,
    pub timeout: Option<Duration>,
    pub stdin: Option<String>,
    pub suppress_stderr: bool,
}

impl ProcessCommand {
    /// Program and arguments joined for log and error messages
    pub fn display(&self) -> String {
        if self.args.is_empty() {
            self.program.clone()
        } else {
            format!("{} {}", self.program, self.args.join(" "))
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    pub duration: Duration,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Error(i32),
    Signal(i32),
}

impl ExitStatus {
    pub fn success(&self) -> bool {
        matches!(self, ExitStatus::Success)
    }

    pub fn code(&self) -> Option<i32> {
        match self {
            ExitStatus::Success => Some(0),
            ExitStatus::Error(code) => Some(*code),
            _ => None,
        }
    }
}

#[async_trait]
pub trait ProcessRunner: Send + Sync {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError>;
}

pub struct TokioProcessRunner;

impl TokioProcessRunner {
    /// Log command execution details
    fn log_command_start(command: &ProcessCommand) {
        tracing::debug!("Executing subprocess: {}", command.display());

        if !command.env.is_empty() {
            tracing::trace!("Extra environment variables: {:?}", command.env);
        }

        if let Some(ref dir) = command.working_dir {
            tracing::trace!("Working directory: {:?}", dir);
        }

        if let Some(ref stdin) = command.stdin {
            tracing::trace!("Stdin provided: {} bytes", stdin.len());
        }
    }

    /// Configure the command with environment and working directory
    ///
    /// The parent environment is inherited so that virtualenv and conda
    /// activation reaches the executor; explicit variables take precedence.
    fn configure_command(command: &ProcessCommand) -> tokio::process::Command {
        let mut cmd = tokio::process::Command::new(&command.program);

        // Own process group: the kernel is a grandchild and must die with it
        #[cfg(unix)]
        {
            cmd.process_group(0);
        }

        cmd.args(&command.args);

        if std::env::var_os("PATH").is_none() {
            tracing::warn!(
                "PATH is not set; '{}' must be an absolute path to be found",
                command.program
            );
        }

        for (key, value) in &command.env {
            cmd.env(key, value);
        }

        if let Some(dir) = &command.working_dir {
            cmd.current_dir(dir);
        }

        cmd.kill_on_drop(true);
        Self::configure_stdio(&mut cmd, command);
        cmd
    }

    /// Configure stdio pipes for the process
    fn configure_stdio(cmd: &mut tokio::process::Command, command: &ProcessCommand) {
        if command.stdin.is_some() {
            cmd.stdin(std::process::Stdio::piped());
        } else {
            cmd.stdin(std::process::Stdio::null());
        }

        cmd.stdout(std::process::Stdio::piped());

        if command.suppress_stderr {
            cmd.stderr(std::process::Stdio::null());
        } else {
            cmd.stderr(std::process::Stdio::piped());
        }
    }

    /// Write stdin data to the child process
    async fn write_stdin(
        child: &mut tokio::process::Child,
        stdin_data: &str,
    ) -> Result<(), ProcessError> {
        if let Some(mut stdin) = child.stdin.take() {
            use tokio::io::AsyncWriteExt;
            stdin
                .write_all(stdin_data.as_bytes())
                .await
                .map_err(ProcessError::Io)?;
            stdin.shutdown().await.map_err(ProcessError::Io)?;
        }
        Ok(())
    }

    /// Wait for the process, killing its whole group on timeout or Ctrl-C
    ///
    /// The child runs in its own process group, so it does not see the
    /// terminal's SIGINT; an interrupt is handled here instead.
    async fn wait_for_exit(
        child: tokio::process::Child,
        command: &ProcessCommand,
    ) -> Result<std::process::Output, ProcessError> {
        let pid = child.id();
        let deadline = async {
            match command.timeout {
                Some(duration) => {
                    tokio::time::sleep(duration).await;
                    duration
                }
                None => std::future::pending().await,
            }
        };

        tokio::select! {
            result = child.wait_with_output() => result.map_err(ProcessError::Io),
            duration = deadline => {
                tracing::warn!(
                    "Subprocess timed out after {:?}: {}",
                    duration,
                    command.display()
                );
                Self::kill_process_group(pid);
                Err(ProcessError::Timeout {
                    command: command.display(),
                    duration,
                })
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::warn!("Interrupted, stopping: {}", command.display());
                Self::kill_process_group(pid);
                Err(ProcessError::Interrupted(command.display()))
            }
        }
    }

    #[cfg(unix)]
    fn kill_process_group(pid: Option<u32>) {
        use nix::sys::signal::{killpg, Signal};
        use nix::unistd::Pid;

        let Some(pid) = pid else { return };
        // The group id equals the leader's pid (process_group(0))
        if let Err(e) = killpg(Pid::from_raw(pid as i32), Signal::SIGKILL) {
            tracing::debug!("Process group {} not signalled: {}", pid, e);
        }
    }

    // kill_on_drop covers the direct child
    #[cfg(not(unix))]
    fn kill_process_group(_pid: Option<u32>) {}

    /// Convert process exit status to our ExitStatus enum
    fn parse_exit_status(status: std::process::ExitStatus) -> ExitStatus {
        if status.success() {
            ExitStatus::Success
        } else if let Some(code) = status.code() {
            ExitStatus::Error(code)
        } else {
            Self::parse_signal_status(status)
        }
    }

    /// Parse signal status on Unix systems
    #[cfg(unix)]
    fn parse_signal_status(status: std::process::ExitStatus) -> ExitStatus {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            ExitStatus::Signal(signal)
        } else {
            ExitStatus::Error(1)
        }
    }

    #[cfg(not(unix))]
    fn parse_signal_status(_status: std::process::ExitStatus) -> ExitStatus {
        ExitStatus::Error(1)
    }

    /// Build ProcessOutput from command output
    fn build_output(
        output: std::process::Output,
        command: &ProcessCommand,
        status: ExitStatus,
        duration: Duration,
    ) -> ProcessOutput {
        ProcessOutput {
            status,
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: if command.suppress_stderr {
                String::new()
            } else {
                String::from_utf8_lossy(&output.stderr).to_string()
            },
            duration,
        }
    }

    /// Log the process execution result
    fn log_result(result: &ProcessOutput, command: &ProcessCommand) {
        let command_str = command.display();

        match &result.status {
            ExitStatus::Success => {
                tracing::debug!(
                    "Subprocess completed successfully in {:?}: {}",
                    result.duration,
                    command_str
                );
                tracing::trace!("Stdout length: {} bytes", result.stdout.len());
                tracing::trace!("Stderr length: {} bytes", result.stderr.len());
            }
            ExitStatus::Error(code) => {
                tracing::debug!(
                    "Subprocess failed with exit code {} in {:?}: {}",
                    code,
                    result.duration,
                    command_str
                );
                if !result.stderr.is_empty() {
                    tracing::trace!("Stderr: {}", result.stderr);
                }
            }
            ExitStatus::Signal(signal) => {
                tracing::warn!(
                    "Subprocess terminated by signal {} in {:?}: {}",
                    signal,
                    result.duration,
                    command_str
                );
            }
        }
    }

    /// Map spawn error to ProcessError
    fn map_spawn_error(error: std::io::Error, command: &ProcessCommand) -> ProcessError {
        if error.kind() == std::io::ErrorKind::NotFound {
            ProcessError::CommandNotFound(command.program.clone())
        } else {
            tracing::error!(
                "Failed to spawn '{}': {:?} (kind: {:?})",
                command.program,
                error,
                error.kind()
            );
            ProcessError::SpawnFailed {
                command: command.display(),
                source: error,
            }
        }
    }
}

#[async_trait]
impl ProcessRunner for TokioProcessRunner {
    async fn run(&self, command: ProcessCommand) -> Result<ProcessOutput, ProcessError> {
        let start = std::time::Instant::now();

        Self::log_command_start(&command);

        let mut cmd = Self::configure_command(&command);
        let mut child = cmd
            .spawn()
            .map_err(|e| Self::map_spawn_error(e, &command))?;

        if let Some(stdin_data) = &command.stdin {
            Self::write_stdin(&mut child, stdin_data).await?;
        }

        let output = Self::wait_for_exit(child, &command).await?;

        let duration = start.elapsed();
        let status = Self::parse_exit_status(output.status);
        let result = Self::build_output(output, &command, status, duration);

        Self::log_result(&result, &command);

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_command() -> ProcessCommand {
        ProcessCommand {
            program: "echo".to_string(),
            args: vec!["test".to_string()],
            env: HashMap::new(),
            working_dir: None,
            timeout: None,
            stdin: None,
            suppress_stderr: false,
        }
    }

    #[test]
    fn test_display_joins_args() {
        let mut command = test_command();
        assert_eq!(command.display(), "echo test");
        command.args.clear();
        assert_eq!(command.display(), "echo");
    }

    #[test]
    fn test_exit_status_code() {
        assert_eq!(ExitStatus::Success.code(), Some(0));
        assert_eq!(ExitStatus::Error(3).code(), Some(3));
        assert_eq!(ExitStatus::Signal(9).code(), None);
        assert!(!ExitStatus::Signal(9).success());
    }

    #[cfg(unix)]
    #[test]
    fn test_parse_exit_status() {
        use std::os::unix::process::ExitStatusExt;

        let status = std::process::ExitStatus::from_raw(0);
        assert_eq!(
            TokioProcessRunner::parse_exit_status(status),
            ExitStatus::Success
        );

        // Exit code 1 is encoded in the high byte
        let status = std::process::ExitStatus::from_raw(256);
        assert_eq!(
            TokioProcessRunner::parse_exit_status(status),
            ExitStatus::Error(1)
        );

        // SIGKILL
        let status = std::process::ExitStatus::from_raw(9);
        assert_eq!(
            TokioProcessRunner::parse_exit_status(status),
            ExitStatus::Signal(9)
        );
    }

    #[test]
    fn test_map_spawn_error_not_found() {
        let command = test_command();
        let err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        assert!(matches!(
            TokioProcessRunner::map_spawn_error(err, &command),
            ProcessError::CommandNotFound(program) if program == "echo"
        ));
    }

    #[test]
    fn test_map_spawn_error_other() {
        let command = test_command();
        let err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        match TokioProcessRunner::map_spawn_error(err, &command) {
            ProcessError::SpawnFailed { command, .. } => assert_eq!(command, "echo test"),
            other => panic!("Expected SpawnFailed, got {other:?}"),
        }
    }
}
