// ============================================================================
// vidstrip-core/src/processing/orchestrator.rs
// ============================================================================
//
// PROCESS ORCHESTRATOR: Sequential Execution of a Pipeline
//
// Runs the steps of a `Pipeline` one after another. A step only starts after
// the previous one exited with code 0; the first nonzero exit of a critical
// step ends the run with `ProcessFailed`. Best-effort steps (cleanup) can
// fail without failing the run.
//
// Tool output is exposed as a lazy iterator of `DiagnosticLine`s. Pulling
// the iterator drives execution: the next step is spawned only when the
// current one has no more output and has been reaped.

use crate::error::{CoreResult, command_failed_error};
use crate::external::{OutputStream, ProcessSpawner, StepKind, StepProcess};
use crate::logging::{TOOL_OUTPUT_TARGET, log_invocation};
use crate::processing::PreviewResult;
use crate::processing::pipeline::Pipeline;

/// One line of output from a pipeline step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticLine {
    /// 0-based index of the step in the pipeline
    pub step: usize,
    pub kind: StepKind,
    pub stream: OutputStream,
    pub text: String,
}

/// Executes pipelines through a `ProcessSpawner`.
pub struct PipelineRunner<'a, S: ProcessSpawner> {
    spawner: &'a S,
    capture_output: bool,
}

impl<'a, S: ProcessSpawner> PipelineRunner<'a, S> {
    /// When `silent` is set, step output is discarded at spawn time.
    pub fn new(spawner: &'a S, silent: bool) -> Self {
        Self {
            spawner,
            capture_output: !silent,
        }
    }

    /// Starts a lazy run of `pipeline`. Nothing is spawned until the
    /// returned iterator is first advanced.
    pub fn run<'p>(&self, pipeline: &'p Pipeline) -> PipelineRun<'a, 'p, S> {
        PipelineRun {
            spawner: self.spawner,
            capture_output: self.capture_output,
            pipeline,
            next_step: 0,
            current: None,
            outcome: None,
        }
    }

    /// Runs `pipeline` to completion, forwarding tool output to the log.
    pub fn execute(&self, pipeline: &Pipeline) -> CoreResult<PreviewResult> {
        let mut run = self.run(pipeline);
        for line in run.by_ref() {
            log::info!(
                target: TOOL_OUTPUT_TARGET,
                "[{} {}] {}",
                line.step + 1,
                line.kind,
                line.text
            );
        }
        run.finish()
    }
}

/// An in-progress pipeline run. Yields output lines until the pipeline
/// finishes or a step fails; it cannot be restarted.
pub struct PipelineRun<'a, 'p, S: ProcessSpawner> {
    spawner: &'a S,
    capture_output: bool,
    pipeline: &'p Pipeline,
    next_step: usize,
    current: Option<(usize, S::Process)>,
    outcome: Option<CoreResult<()>>,
}

impl<S: ProcessSpawner> PipelineRun<'_, '_, S> {
    /// Drains any remaining output and returns the run's result.
    pub fn finish(mut self) -> CoreResult<PreviewResult> {
        for _ in self.by_ref() {}
        match self.outcome.take() {
            Some(Err(e)) => Err(e),
            _ => Ok(PreviewResult {
                file: self.pipeline.output.clone(),
            }),
        }
    }

    fn start_next_step(&mut self) {
        let pipeline = self.pipeline;
        let steps = &pipeline.steps;
        let Some(invocation) = steps.get(self.next_step) else {
            log::debug!("All {} steps completed", steps.len());
            self.outcome = Some(Ok(()));
            return;
        };
        let index = self.next_step;
        self.next_step += 1;

        log_invocation(index, steps.len(), invocation);
        match self.spawner.spawn(invocation, self.capture_output) {
            Ok(process) => self.current = Some((index, process)),
            Err(e) if invocation.is_best_effort() => {
                log::warn!("Skipping {} step: {e}", invocation.kind);
            }
            Err(e) => {
                log::error!("Step {}/{} ({}) could not start: {e}", index + 1, steps.len(), invocation.kind);
                self.outcome = Some(Err(e));
            }
        }
    }

    fn finish_step(&self, index: usize, process: &mut S::Process) -> CoreResult<()> {
        let invocation = &self.pipeline.steps[index];
        let code = process.wait()?;
        if code == 0 {
            return Ok(());
        }
        if invocation.is_best_effort() {
            log::warn!("{} step exited with code {code}; continuing", invocation.kind);
            return Ok(());
        }
        log::error!(
            "Step {}/{} ({}) failed with exit code {code}: {invocation}",
            index + 1,
            self.pipeline.steps.len(),
            invocation.kind
        );
        Err(command_failed_error(code))
    }
}

impl<S: ProcessSpawner> Iterator for PipelineRun<'_, '_, S> {
    type Item = DiagnosticLine;

    fn next(&mut self) -> Option<DiagnosticLine> {
        while self.outcome.is_none() {
            match self.current.take() {
                Some((index, mut process)) => {
                    if let Some((stream, text)) = process.next_line() {
                        let kind = self.pipeline.steps[index].kind;
                        self.current = Some((index, process));
                        return Some(DiagnosticLine {
                            step: index,
                            kind,
                            stream,
                            text,
                        });
                    }
                    if let Err(e) = self.finish_step(index, &mut process) {
                        self.outcome = Some(Err(e));
                    }
                }
                None => self.start_next_step(),
            }
        }
        None
    }
}
