use std::io;
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use super::control::{RunState, RunStateCell};
use super::jobs::JobTable;
use super::parser::ParsedCommand;
use super::resolver::ProgramResolver;
use super::ProcessError;
use crate::flags::Flags;

/// Launches parsed commands and owns the background-job bookkeeping.
///
/// The job table is only ever touched from the main loop; the quit flag is
/// the one thing signal context writes.
pub struct ProcessExecutor {
    pub(crate) jobs: JobTable,
    pub(crate) resolver: ProgramResolver,
    pub(crate) state: RunStateCell,
    pub(crate) quit_flag: Arc<AtomicBool>,
    pub(crate) quiet_mode: bool,
}

impl ProcessExecutor {
    pub fn new(flags: &Flags) -> Self {
        Self {
            jobs: JobTable::new(),
            resolver: ProgramResolver::from_env(),
            state: RunStateCell::new(),
            quit_flag: Arc::new(AtomicBool::new(false)),
            quiet_mode: flags.is_set("quiet"),
        }
    }

    /// Spawns the parsed command. Foreground launches block until the
    /// child exits; background launches file the child in the job table
    /// and return immediately.
    pub fn launch(&mut self, command: &ParsedCommand) -> Result<(), ProcessError> {
        // Reclaim slots from children that exited on their own before
        // making any spawn decision.
        self.jobs.reap();

        if self.jobs.is_full() {
            return Err(ProcessError::TableFull(self.jobs.capacity()));
        }

        let program = self
            .resolver
            .resolve(&command.program)
            .unwrap_or_else(|| PathBuf::from(&command.program));

        let mut cmd = Command::new(&program);
        if let Some(arg) = &command.argument {
            cmd.arg(arg);
        }
        cmd.stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let mut child = cmd.spawn().map_err(|e| {
            if e.kind() == io::ErrorKind::NotFound {
                ProcessError::NotFound(command.program.clone())
            } else {
                ProcessError::Spawn {
                    command: command.program.clone(),
                    source: e,
                }
            }
        })?;

        if command.background {
            let pid = child.id();
            let slot = self.jobs.insert(child)?;
            if !self.quiet_mode {
                println!("[{}] {}", slot, pid);
            }
            return Ok(());
        }

        let pid = child.id() as i32;
        match child.wait() {
            Ok(status) => {
                if !status.success() && !self.quiet_mode {
                    println!("Process exited with status: {}", status);
                }
                Ok(())
            }
            Err(e) => Err(ProcessError::Wait { pid, source: e }),
        }
    }

    pub fn job_count(&self) -> usize {
        self.jobs.count()
    }

    pub fn tracked_pids(&self) -> Vec<i32> {
        self.jobs.pids()
    }

    pub fn run_state(&self) -> RunState {
        self.state.get()
    }

    /// Handle for the SIGQUIT handler registration.
    pub fn quit_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.quit_flag)
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_flag.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::signal;
    use std::thread;
    use std::time::Duration;

    fn test_executor(capacity: usize) -> ProcessExecutor {
        ProcessExecutor {
            jobs: JobTable::with_capacity(capacity),
            resolver: ProgramResolver::from_env(),
            state: RunStateCell::new(),
            quit_flag: Arc::new(AtomicBool::new(false)),
            quiet_mode: true,
        }
    }

    fn parsed(line: &str) -> ParsedCommand {
        ParsedCommand::parse(line).unwrap()
    }

    fn tear_down(executor: &mut ProcessExecutor) {
        for mut job in executor.jobs.drain() {
            let _ = signal::terminate(job.pid());
            let _ = job.wait();
        }
    }

    #[test]
    fn test_foreground_blocks_and_leaves_table_unchanged() {
        let mut executor = test_executor(2);
        assert_eq!(executor.job_count(), 0);
        executor.launch(&parsed("true")).unwrap();
        assert_eq!(executor.job_count(), 0);
    }

    #[test]
    fn test_foreground_failure_status_is_not_an_error() {
        let mut executor = test_executor(2);
        // A child that runs and exits non-zero launched fine.
        executor.launch(&parsed("false")).unwrap();
        assert_eq!(executor.job_count(), 0);
    }

    #[test]
    fn test_background_increments_job_count() {
        let mut executor = test_executor(2);
        executor.launch(&parsed("sleep 5 &")).unwrap();
        assert_eq!(executor.job_count(), 1);
        tear_down(&mut executor);
    }

    #[test]
    fn test_spawn_refused_when_table_full() {
        let mut executor = test_executor(1);
        executor.launch(&parsed("sleep 5 &")).unwrap();

        let result = executor.launch(&parsed("sleep 5 &"));
        assert!(matches!(result, Err(ProcessError::TableFull(1))));
        assert_eq!(executor.job_count(), 1);

        // The refusal applies to foreground spawns as well.
        let result = executor.launch(&parsed("true"));
        assert!(matches!(result, Err(ProcessError::TableFull(1))));
        tear_down(&mut executor);
    }

    #[test]
    fn test_reap_runs_before_the_spawn_decision() {
        let mut executor = test_executor(1);
        executor.launch(&parsed("true &")).unwrap();
        assert_eq!(executor.job_count(), 1);

        // Give the child time to exit; the next launch must reclaim its
        // slot instead of refusing.
        thread::sleep(Duration::from_millis(200));
        executor.launch(&parsed("sleep 5 &")).unwrap();
        assert_eq!(executor.job_count(), 1);
        tear_down(&mut executor);
    }

    #[test]
    fn test_unknown_command_reports_not_found() {
        let mut executor = test_executor(2);
        let result = executor.launch(&parsed("no-such-marrow-program"));
        assert!(matches!(result, Err(ProcessError::NotFound(_))));
        assert_eq!(executor.job_count(), 0);
    }

    #[test]
    fn test_missing_literal_path_reports_not_found() {
        let mut executor = test_executor(2);
        let result = executor.launch(&parsed("./no/such/tool"));
        assert!(matches!(result, Err(ProcessError::NotFound(_))));
    }

    #[test]
    fn test_quit_flag_roundtrip() {
        let executor = test_executor(1);
        assert!(!executor.quit_requested());
        executor.quit_flag().store(true, Ordering::SeqCst);
        assert!(executor.quit_requested());
    }
}
