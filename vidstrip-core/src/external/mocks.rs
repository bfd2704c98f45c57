// vidstrip-core/src/external/mocks.rs

// --- Mocking Infrastructure (for testing) ---

// Compiled for unit tests and when the "test-mocks" feature is enabled.
#![cfg(any(test, feature = "test-mocks"))]

use super::*;
use crate::error::{CoreError, CoreResult};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Mock implementation of StepProcess.
#[derive(Debug, Clone, Default)]
pub struct MockProcess {
    /// Lines to emit from next_line, in order.
    pub lines: VecDeque<(OutputStream, String)>,
    /// Exit code to return when wait is called.
    pub exit_code: i32,
}

impl MockProcess {
    pub fn new(exit_code: i32) -> Self {
        Self {
            lines: VecDeque::new(),
            exit_code,
        }
    }

    pub fn with_line(mut self, stream: OutputStream, text: &str) -> Self {
        self.lines.push_back((stream, text.to_string()));
        self
    }
}

impl StepProcess for MockProcess {
    fn next_line(&mut self) -> Option<(OutputStream, String)> {
        self.lines.pop_front()
    }

    fn wait(&mut self) -> CoreResult<i32> {
        Ok(self.exit_code)
    }
}

/// Represents an expected step and its mock result.
pub struct MockExpectation {
    pub pattern: String,
    pub result: CoreResult<MockProcess>,
}

/// Mock implementation of ProcessSpawner supporting multiple expectations.
///
/// An invocation matches an expectation when its program or any argument
/// contains the pattern. Unmatched invocations succeed silently.
#[derive(Clone, Default)]
pub struct MockSpawner {
    expectations: Rc<RefCell<Vec<MockExpectation>>>,
    received_calls: Rc<RefCell<Vec<Invocation>>>,
    captured: Rc<RefCell<Vec<bool>>>,
}

impl MockSpawner {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn add_expectation(&self, pattern: &str, result: CoreResult<MockProcess>) {
        self.expectations.borrow_mut().push(MockExpectation {
            pattern: pattern.to_string(),
            result,
        });
    }

    pub fn add_success_expectation(&self, pattern: &str, lines: &[(OutputStream, &str)]) {
        let process = lines
            .iter()
            .fold(MockProcess::new(0), |p, (stream, text)| p.with_line(*stream, text));
        self.add_expectation(pattern, Ok(process));
    }

    pub fn add_exit_error_expectation(&self, pattern: &str, exit_code: i32) {
        self.add_expectation(pattern, Ok(MockProcess::new(exit_code)));
    }

    pub fn add_spawn_error_expectation(&self, pattern: &str, error: CoreError) {
        self.add_expectation(pattern, Err(error));
    }

    pub fn get_received_calls(&self) -> Vec<Invocation> {
        self.received_calls.borrow().clone()
    }

    /// `capture_output` flag passed with each received call.
    pub fn get_capture_flags(&self) -> Vec<bool> {
        self.captured.borrow().clone()
    }
}

impl ProcessSpawner for MockSpawner {
    type Process = MockProcess;

    fn spawn(&self, invocation: &Invocation, capture_output: bool) -> CoreResult<Self::Process> {
        self.received_calls.borrow_mut().push(invocation.clone());
        self.captured.borrow_mut().push(capture_output);

        let mut expectations = self.expectations.borrow_mut();
        let found = expectations.iter().position(|exp| {
            invocation.program.contains(&exp.pattern)
                || invocation
                    .args
                    .iter()
                    .any(|arg| arg.to_string_lossy().contains(exp.pattern.as_str()))
        });

        match found {
            Some(index) => {
                let expectation = expectations.remove(index);
                log::debug!("MockSpawner: matched pattern '{}'", expectation.pattern);
                expectation.result
            }
            None => Ok(MockProcess::new(0)),
        }
    }
}

/// Mock implementation of DurationProbe.
#[derive(Clone, Default)]
pub struct MockDurationProbe {
    durations: Rc<RefCell<HashMap<PathBuf, f64>>>,
    calls: Rc<RefCell<usize>>,
}

impl MockDurationProbe {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn expect_duration(&self, input: &Path, duration_ms: f64) {
        self.durations.borrow_mut().insert(input.to_path_buf(), duration_ms);
    }

    pub fn call_count(&self) -> usize {
        *self.calls.borrow()
    }
}

impl DurationProbe for MockDurationProbe {
    fn duration_ms(&self, input: &Path, _tool: &str) -> CoreResult<f64> {
        *self.calls.borrow_mut() += 1;
        self.durations.borrow().get(input).copied().ok_or_else(|| {
            CoreError::ProbeFailed(format!(
                "MockDurationProbe: no expectation set for {}",
                input.display()
            ))
        })
    }
}
