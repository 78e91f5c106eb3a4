//! Helpers for running a child process to completion and capturing its output.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, error, instrument};

/// Exit code used when the child ended without one and no signal is known.
pub const UNKNOWN_EXIT_CODE: i32 = 1;

/// Captured child process output.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn exit_code(&self) -> i32 {
        exit_code(self.status)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Map an exit status to the code this process should exit with.
///
/// On Unix a child killed by a signal maps to `128 + signal`, matching shell
/// conventions.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    UNKNOWN_EXIT_CODE
}

/// Run a command to completion and capture stdout/stderr without risking pipe deadlocks.
///
/// Both streams are drained on helper threads while this thread blocks on the
/// child. stdin is inherited so the tool can still read from the terminal.
/// There is no timeout: the call returns only when the child exits.
#[instrument(skip_all, fields(program = ?cmd.get_program()))]
pub fn run_command(mut cmd: Command) -> Result<CommandOutput> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("spawning child process");
    let mut child = match cmd.spawn() {
        Ok(c) => c,
        Err(e) => {
            error!(err = %e, "failed to spawn command");
            return Err(e).with_context(|| format!("spawn {:?}", cmd.get_program()));
        }
    };

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;

    let stdout_handle = thread::spawn(move || read_stream(stdout));
    let stderr_handle = thread::spawn(move || read_stream(stderr));

    let status = child.wait().context("wait for command")?;

    let stdout = join_output(stdout_handle).context("join stdout")?;
    let stderr = join_output(stderr_handle).context("join stderr")?;

    debug!(exit_code = ?status.code(), "command finished");
    Ok(CommandOutput {
        status,
        stdout,
        stderr,
    })
}

fn join_output(handle: thread::JoinHandle<Result<Vec<u8>>>) -> Result<Vec<u8>> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

fn read_stream<R: Read>(mut reader: R) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).context("read output")?;
    Ok(buf)
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn captures_stdout_and_stderr_separately() {
        let output = run_command(sh("echo out; echo err >&2")).expect("run");
        assert!(output.status.success());
        assert_eq!(output.stdout_lossy(), "out\n");
        assert_eq!(output.stderr_lossy(), "err\n");
    }

    #[test]
    fn reports_non_zero_exit_code() {
        let output = run_command(sh("exit 7")).expect("run");
        assert_eq!(output.exit_code(), 7);
    }

    #[test]
    fn signal_maps_to_shell_convention() {
        let output = run_command(sh("kill -TERM $$")).expect("run");
        assert_eq!(output.exit_code(), 128 + 15);
    }

    #[test]
    fn large_output_does_not_deadlock() {
        // Well past a typical 64 KiB pipe buffer on both streams.
        let script = "i=0; while [ $i -lt 20000 ]; do echo 0123456789; echo 0123456789 >&2; i=$((i+1)); done";
        let output = run_command(sh(script)).expect("run");
        assert_eq!(output.stdout.len(), 20000 * 11);
        assert_eq!(output.stderr.len(), 20000 * 11);
    }

    #[test]
    fn missing_program_is_a_spawn_error() {
        let err = run_command(Command::new("tfmaint-definitely-not-installed")).unwrap_err();
        assert!(format!("{err:#}").contains("spawn"));
    }
}
