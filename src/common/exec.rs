//! External command execution
//!
//! Everything that talks to hyprctl, the animated wallpaper player or
//! notify-send goes through [`CommandExecutor`], so the wallpaper logic can be
//! exercised against a fake in tests.

use std::io;
use std::os::unix::process::CommandExt;
use std::process::{Command, Stdio};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("{program} not found in PATH")]
    NotFound { program: String },

    #[error("failed to run {program}: {source}")]
    Io {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program} exited with {}: {stderr}", describe_exit(.code))]
    Failed {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(c) => format!("status {c}"),
        None => "a signal".to_string(),
    }
}

impl ExecError {
    fn from_io(program: &str, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            ExecError::NotFound {
                program: program.to_string(),
            }
        } else {
            ExecError::Io {
                program: program.to_string(),
                source: err,
            }
        }
    }
}

/// Captured result of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    #[cfg(test)]
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            code: Some(0),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    #[cfg(test)]
    pub fn failed(code: i32, stderr: impl Into<String>) -> Self {
        Self {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

pub trait CommandExecutor {
    /// Run a command to completion and capture its output.
    ///
    /// A non-zero exit is not an error here; use [`CommandExecutor::run_checked`]
    /// when it should be.
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ExecError>;

    /// Start a command in its own process group and forget about it.
    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<(), ExecError>;

    fn run_checked(&self, program: &str, args: &[String]) -> Result<CommandOutput, ExecError> {
        let output = self.run(program, args)?;
        if !output.success() {
            return Err(ExecError::Failed {
                program: program.to_string(),
                code: output.code,
                stderr: output.stderr.trim().to_string(),
            });
        }
        Ok(output)
    }
}

/// Runs real processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl CommandExecutor for SystemExecutor {
    fn run(&self, program: &str, args: &[String]) -> Result<CommandOutput, ExecError> {
        let output = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ExecError::from_io(program, e))?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }

    fn spawn_detached(&self, program: &str, args: &[String]) -> Result<(), ExecError> {
        Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .process_group(0)
            .spawn()
            .map(|_child| ())
            .map_err(|e| ExecError::from_io(program, e))
    }
}

pub fn args<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_program_maps_to_not_found() {
        let err = SystemExecutor
            .run("hyprwall-definitely-not-installed", &[])
            .unwrap_err();
        assert!(matches!(err, ExecError::NotFound { .. }));
    }

    #[test]
    fn test_run_checked_reports_exit_code() {
        let exec = fake::FakeExecutor::new(|_| Ok(CommandOutput::failed(3, "boom\n")));
        let err = exec.run_checked("hyprctl", &args(["monitors"])).unwrap_err();
        match err {
            ExecError::Failed { code, stderr, .. } => {
                assert_eq!(code, Some(3));
                assert_eq!(stderr, "boom");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_system_executor_captures_stdout() {
        let out = SystemExecutor.run("sh", &args(["-c", "echo hi"])).unwrap();
        assert!(out.success());
        assert_eq!(out.stdout.trim(), "hi");
    }
}
