use std::io::{self, Write};
use std::os::unix::io::RawFd;
use std::process;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;

use super::executor::ProcessExecutor;
use super::signal;
use super::ProcessError;

/// What the main loop is currently doing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Running,
    Paused,
    Terminating,
}

/// Process-wide run state, shared between the main loop and the pause
/// controller's read loop.
#[derive(Debug, Clone)]
pub struct RunStateCell(Arc<AtomicU8>);

impl Default for RunStateCell {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStateCell {
    pub fn new() -> Self {
        Self(Arc::new(AtomicU8::new(RunState::Running as u8)))
    }

    pub fn set(&self, state: RunState) {
        self.0.store(state as u8, Ordering::SeqCst);
    }

    pub fn get(&self) -> RunState {
        match self.0.load(Ordering::SeqCst) {
            x if x == RunState::Paused as u8 => RunState::Paused,
            x if x == RunState::Terminating as u8 => RunState::Terminating,
            _ => RunState::Running,
        }
    }
}

/// Pause/resume and shutdown sequencing over the tracked children.
pub trait JobControl {
    /// Suspends every tracked child, blocks until enter is pressed or the
    /// pause is cancelled from outside, then resumes every tracked child.
    fn pause(&mut self) -> Result<(), ProcessError>;

    /// Terminates and reaps every tracked child, then exits the process
    /// with `code`. This is the only path that waits blockingly on all
    /// children.
    fn shutdown(&mut self, code: i32) -> !;
}

impl JobControl for ProcessExecutor {
    fn pause(&mut self) -> Result<(), ProcessError> {
        self.state.set(RunState::Paused);

        let mut paused = 0;
        self.jobs.for_each(|job| {
            if signal::stop(job.pid()).is_ok() {
                paused += 1;
            }
        });

        println!("--PAUSED {} PROCESSES--", paused);
        print!("Press enter to continue.");
        io::stdout().flush()?;

        wait_for_newline_on(libc::STDIN_FILENO, &self.state, &self.quit_flag);

        // Resume everything no matter how the pause ended; a quit observed
        // here is handled by the main loop right after we return.
        self.state.set(RunState::Running);
        self.jobs.for_each(|job| {
            let _ = signal::resume(job.pid());
        });
        Ok(())
    }

    fn shutdown(&mut self, code: i32) -> ! {
        self.state.set(RunState::Terminating);

        let mut jobs = self.jobs.drain();
        if !self.quiet_mode {
            println!("\nQuitting");
            let pids: Vec<String> = jobs.iter().map(|job| job.pid().to_string()).collect();
            println!("Children currently executing: {}", pids.join(" "));
        }

        for job in &jobs {
            // A stopped child never sees SIGTERM; resume it first.
            let _ = signal::resume(job.pid());
            let _ = signal::terminate(job.pid());
        }

        let mut reaped = 0;
        for job in &mut jobs {
            match job.wait() {
                Ok(_) => reaped += 1,
                Err(e) => eprintln!("marrow: wait on pid {} failed: {}", job.pid(), e),
            }
        }
        if !self.quiet_mode {
            println!("Reaped {} children.", reaped);
        }

        process::exit(code)
    }
}

const POLL_TICK_MS: libc::c_int = 200;

/// Blocks until a newline arrives on `fd`, the run state leaves `Paused`,
/// or the quit flag is raised. Polls with a short timeout so an
/// asynchronous cancellation is noticed without a keypress.
fn wait_for_newline_on(fd: RawFd, state: &RunStateCell, quit_flag: &AtomicBool) {
    loop {
        if state.get() != RunState::Paused || quit_flag.load(Ordering::SeqCst) {
            return;
        }

        let mut pfd = libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        };
        let ready = unsafe { libc::poll(&mut pfd, 1, POLL_TICK_MS) };
        if ready < 0 {
            if io::Error::last_os_error().kind() == io::ErrorKind::Interrupted {
                continue;
            }
            return;
        }
        if ready == 0 {
            // Tick: re-check the cancellation conditions.
            continue;
        }

        let mut byte = 0u8;
        let n = unsafe { libc::read(fd, (&mut byte as *mut u8).cast(), 1) };
        if n <= 0 {
            // End of input also ends the pause.
            return;
        }
        if byte == b'\n' {
            return;
        }
    }
}
