// ============================================================================
// vidstrip-core/src/external/process.rs
// ============================================================================
//
// PROCESS EXECUTOR: Tool Process Management and Abstraction
//
// This module provides abstractions for spawning pipeline steps and reading
// their output. It defines traits for spawning a step and for interacting
// with the running process, plus the concrete implementation on top of
// std::process.
//
// KEY COMPONENTS:
// - StepProcess: Trait representing a running pipeline step
// - ProcessSpawner: Trait for starting a step from an Invocation
// - SystemSpawner: Concrete implementation using std::process::Command
//
// The running process merges stdout and stderr into one ordered sequence of
// lines. Two reader threads feed a single channel, so neither pipe can fill
// up while the consumer is busy with the other.
//
// A step is over when its process exits, not when its pipes close: a
// background helper the tool leaves behind may hold stdout/stderr open long
// after. The child is polled while waiting for output, and once it has exited
// only lines arriving within a short grace period are still delivered.

use std::io::{BufRead, BufReader, Read};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::{CoreResult, command_start_error};
use crate::external::Invocation;

/// Which stream a line of tool output came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStream {
    Stdout,
    Stderr,
}

/// Trait representing a running pipeline step.
pub trait StepProcess {
    /// Blocks for the next line of combined stdout/stderr output. Returns
    /// `None` once the step is done producing output (or output is not
    /// captured).
    fn next_line(&mut self) -> Option<(OutputStream, String)>;

    /// Waits for the step to exit and returns its exit code. Termination by
    /// a signal is reported as -1.
    fn wait(&mut self) -> CoreResult<i32>;
}

/// Trait representing something that can start a pipeline step.
pub trait ProcessSpawner {
    type Process: StepProcess;

    /// Starts `invocation`. When `capture_output` is false both output
    /// streams are discarded.
    fn spawn(&self, invocation: &Invocation, capture_output: bool) -> CoreResult<Self::Process>;
}

/// Maps an exit status to the code reported by the pipeline.
#[must_use]
pub fn exit_code(status: ExitStatus) -> i32 {
    status.code().unwrap_or(-1)
}

// --- Concrete Implementation using std::process ---

/// How often a running child is checked for exit while no output arrives.
const EXIT_POLL_INTERVAL: Duration = Duration::from_millis(50);

/// How long output is still collected after the child has exited.
const EXIT_DRAIN_GRACE: Duration = Duration::from_millis(200);

/// A spawned child plus the readers multiplexing its output.
pub struct SystemProcess {
    child: Child,
    lines: Option<Receiver<(OutputStream, String)>>,
    readers: Vec<JoinHandle<()>>,
    status: Option<ExitStatus>,
    drain_deadline: Option<Instant>,
}

impl SystemProcess {
    fn poll_exit(&mut self) -> CoreResult<Option<ExitStatus>> {
        if self.status.is_none() {
            self.status = self.child.try_wait()?;
        }
        Ok(self.status)
    }
}

impl StepProcess for SystemProcess {
    fn next_line(&mut self) -> Option<(OutputStream, String)> {
        loop {
            let rx = self.lines.as_ref()?;
            let timeout = match self.drain_deadline {
                Some(deadline) => deadline.saturating_duration_since(Instant::now()),
                None => EXIT_POLL_INTERVAL,
            };
            match rx.recv_timeout(timeout) {
                Ok(line) => return Some(line),
                Err(RecvTimeoutError::Disconnected) => {
                    self.lines = None;
                    return None;
                }
                Err(RecvTimeoutError::Timeout) if self.drain_deadline.is_some() => {
                    log::debug!("Step exited with its output still open; no longer reading it");
                    self.lines = None;
                    return None;
                }
                Err(RecvTimeoutError::Timeout) => match self.poll_exit() {
                    Ok(Some(_)) => self.drain_deadline = Some(Instant::now() + EXIT_DRAIN_GRACE),
                    Ok(None) => {}
                    Err(e) => {
                        log::warn!("Could not poll step status: {e}");
                        self.drain_deadline = Some(Instant::now() + EXIT_DRAIN_GRACE);
                    }
                },
            }
        }
    }

    fn wait(&mut self) -> CoreResult<i32> {
        let status = match self.status {
            Some(status) => status,
            None => self.child.wait()?,
        };
        self.status = Some(status);

        // Readers still blocked on a pipe held by a leftover helper are left
        // to finish on their own.
        for reader in self.readers.drain(..) {
            if reader.is_finished() && reader.join().is_err() {
                log::warn!("Output reader thread panicked");
            }
        }
        Ok(exit_code(status))
    }
}

impl Drop for SystemProcess {
    fn drop(&mut self) {
        if self.status.is_none() {
            // Abandoned mid-run: make sure the child does not outlive us.
            let _ = self.child.kill();
            let _ = self.child.wait();
        }
    }
}

/// Concrete implementation of `ProcessSpawner` using `std::process`.
#[derive(Debug, Clone, Default)]
pub struct SystemSpawner;

impl ProcessSpawner for SystemSpawner {
    type Process = SystemProcess;

    fn spawn(&self, invocation: &Invocation, capture_output: bool) -> CoreResult<Self::Process> {
        let output = || {
            if capture_output {
                Stdio::piped()
            } else {
                Stdio::null()
            }
        };

        let mut child = Command::new(&invocation.program)
            .args(&invocation.args)
            .stdin(Stdio::null())
            .stdout(output())
            .stderr(output())
            .spawn()
            .map_err(|e| command_start_error(invocation.program.as_str(), e))?;

        let mut readers = Vec::new();
        let lines = if capture_output {
            let (tx, rx) = mpsc::channel();
            if let Some(stdout) = child.stdout.take() {
                readers.push(spawn_reader(stdout, OutputStream::Stdout, tx.clone()));
            }
            if let Some(stderr) = child.stderr.take() {
                readers.push(spawn_reader(stderr, OutputStream::Stderr, tx));
            }
            Some(rx)
        } else {
            None
        };

        Ok(SystemProcess {
            child,
            lines,
            readers,
            status: None,
            drain_deadline: None,
        })
    }
}

fn spawn_reader<R>(
    source: R,
    stream: OutputStream,
    tx: Sender<(OutputStream, String)>,
) -> JoinHandle<()>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut reader = BufReader::new(source);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {
                    let line = String::from_utf8_lossy(&buf);
                    let line = line.trim_end_matches(['\n', '\r']).to_string();
                    // A gone consumer is ignored; draining continues so the
                    // child never blocks on a full pipe.
                    let _ = tx.send((stream, line));
                }
                Err(e) => {
                    log::debug!("Stopped reading {stream:?}: {e}");
                    break;
                }
            }
        }
    })
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::external::StepKind;

    fn sh(script: &str) -> Invocation {
        Invocation::new(StepKind::Extract, "sh").args(["-c", script])
    }

    #[test]
    fn test_captures_both_streams_in_order() {
        let mut process = SystemSpawner
            .spawn(&sh("echo one; echo two 1>&2; echo three"), true)
            .unwrap();

        let mut lines = Vec::new();
        while let Some(line) = process.next_line() {
            lines.push(line);
        }
        assert_eq!(process.wait().unwrap(), 0);

        let stdout: Vec<&str> = lines
            .iter()
            .filter(|(s, _)| *s == OutputStream::Stdout)
            .map(|(_, l)| l.as_str())
            .collect();
        assert_eq!(stdout, ["one", "three"]);
        assert!(lines.contains(&(OutputStream::Stderr, "two".to_string())));
    }

    #[test]
    fn test_silent_process_has_no_lines() {
        let mut process = SystemSpawner.spawn(&sh("echo hidden; exit 4"), false).unwrap();
        assert_eq!(process.next_line(), None);
        assert_eq!(process.wait().unwrap(), 4);
    }

    #[test]
    fn test_missing_program_is_start_error() {
        let inv = Invocation::new(StepKind::Compose, "vidstrip-no-such-tool-xyz");
        match SystemSpawner.spawn(&inv, true) {
            Err(CoreError::CommandStart(name, _)) => assert_eq!(name, "vidstrip-no-such-tool-xyz"),
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("spawn should fail"),
        }
    }

    #[test]
    fn test_exit_is_seen_while_helper_holds_output() {
        let started = std::time::Instant::now();
        let mut process = SystemSpawner
            .spawn(&sh("echo started; sleep 5 & exit 0"), true)
            .unwrap();

        let mut lines = Vec::new();
        while let Some((_, line)) = process.next_line() {
            lines.push(line);
        }
        assert_eq!(process.wait().unwrap(), 0);
        assert_eq!(lines, ["started"]);
        assert!(started.elapsed() < std::time::Duration::from_secs(3));
    }

    #[test]
    fn test_dropping_unfinished_process_kills_it() {
        let process = SystemSpawner.spawn(&sh("sleep 30"), true).unwrap();
        let started = std::time::Instant::now();
        drop(process);
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
