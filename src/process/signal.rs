use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use super::ProcessError;

/// Suspends a tracked child.
pub fn stop(pid: i32) -> Result<(), ProcessError> {
    send(pid, libc::SIGSTOP)
}

/// Resumes a tracked child.
pub fn resume(pid: i32) -> Result<(), ProcessError> {
    send(pid, libc::SIGCONT)
}

/// Asks a tracked child to terminate.
pub fn terminate(pid: i32) -> Result<(), ProcessError> {
    send(pid, libc::SIGTERM)
}

// Positive pid: signals exactly one process, never a group and never
// the shell itself.
fn send(pid: i32, sig: libc::c_int) -> Result<(), ProcessError> {
    let ret = unsafe { libc::kill(pid, sig) };
    if ret == 0 {
        Ok(())
    } else {
        Err(ProcessError::Signal(format!(
            "kill({}, {}) failed: {}",
            pid,
            sig,
            std::io::Error::last_os_error()
        )))
    }
}

/// Installs the two process-wide handlers.
///
/// SIGINT prints a notice and nothing else. SIGQUIT only raises
/// `quit_flag`; the main loop observes the flag at its next safe point and
/// runs the shutdown sequence itself, so no job bookkeeping ever happens
/// in signal context.
pub fn install_handlers(quit_flag: Arc<AtomicBool>) -> Result<(), ProcessError> {
    signal_hook::flag::register(signal_hook::consts::SIGQUIT, quit_flag)
        .map_err(|e| ProcessError::Signal(format!("SIGQUIT handler: {}", e)))?;

    ctrlc::set_handler(|| {
        println!("\nType 'quit' or press ctrl-d to exit.");
    })
    .map_err(|e| ProcessError::Signal(format!("SIGINT handler: {}", e)))?;

    Ok(())
}
