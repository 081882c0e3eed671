use std::fmt;

pub mod control;
pub mod executor;
pub mod jobs;
pub mod parser;
pub mod resolver;
pub mod signal;

pub use control::{JobControl, RunState, RunStateCell};
pub use executor::ProcessExecutor;
pub use jobs::{Job, JobTable, MAX_CHILDREN};
pub use parser::ParsedCommand;
pub use resolver::ProgramResolver;

#[derive(Debug)]
pub enum ProcessError {
    EmptyCommand,
    NotFound(String),
    TableFull(usize),
    Spawn {
        command: String,
        source: std::io::Error,
    },
    Wait {
        pid: i32,
        source: std::io::Error,
    },
    Signal(String),
    Io(std::io::Error),
}

impl From<std::io::Error> for ProcessError {
    fn from(e: std::io::Error) -> Self {
        ProcessError::Io(e)
    }
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::EmptyCommand => write!(f, "no command given"),
            ProcessError::NotFound(cmd) => write!(f, "command not found: {}", cmd),
            ProcessError::TableFull(limit) => {
                write!(f, "too many children were spawned (limit {})", limit)
            }
            ProcessError::Spawn { command, source } => write!(f, "{}: {}", command, source),
            ProcessError::Wait { pid, source } => {
                write!(f, "wait on pid {} failed: {}", pid, source)
            }
            ProcessError::Signal(msg) => write!(f, "signal error: {}", msg),
            ProcessError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProcessError {}
