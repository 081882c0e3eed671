use std::process::{Child, ExitStatus};

use super::ProcessError;

/// Upper bound on simultaneously tracked background children.
pub const MAX_CHILDREN: usize = 10;

/// A tracked background child occupying one table slot.
#[derive(Debug)]
pub struct Job {
    pid: i32,
    child: Child,
}

impl Job {
    fn new(child: Child) -> Self {
        let pid = child.id() as i32;
        Self { pid, child }
    }

    pub fn pid(&self) -> i32 {
        self.pid
    }

    /// Blocking wait, used only during shutdown.
    pub fn wait(&mut self) -> std::io::Result<ExitStatus> {
        self.child.wait()
    }
}

/// Fixed-capacity registry of background children. The slot index is the
/// job's identity; an empty slot is `None`, never a sentinel pid.
///
/// Only the main loop ever touches the table. Signal handlers raise flags
/// and nothing more, so no lock or signal masking is needed here.
#[derive(Debug)]
pub struct JobTable {
    slots: Vec<Option<Job>>,
}

impl Default for JobTable {
    fn default() -> Self {
        Self::new()
    }
}

impl JobTable {
    pub fn new() -> Self {
        Self::with_capacity(MAX_CHILDREN)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let mut slots = Vec::with_capacity(capacity);
        slots.resize_with(capacity, || None);
        Self { slots }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    pub fn count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.count() == self.capacity()
    }

    /// Files the child under the first empty slot.
    pub fn insert(&mut self, child: Child) -> Result<usize, ProcessError> {
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .ok_or(ProcessError::TableFull(self.capacity()))?;
        self.slots[slot] = Some(Job::new(child));
        Ok(slot)
    }

    /// Non-blocking sweep: frees the slot of every child that has already
    /// exited. Returns how many slots were reclaimed.
    pub fn reap(&mut self) -> usize {
        let mut reaped = 0;
        for slot in &mut self.slots {
            let gone = match slot {
                // A wait error means the child is already gone.
                Some(job) => matches!(job.child.try_wait(), Ok(Some(_)) | Err(_)),
                None => false,
            };
            if gone {
                *slot = None;
                reaped += 1;
            }
        }
        reaped
    }

    pub fn pids(&self) -> Vec<i32> {
        self.slots.iter().flatten().map(Job::pid).collect()
    }

    /// Applies `f` to every occupied slot, skipping empty ones.
    pub fn for_each(&self, mut f: impl FnMut(&Job)) {
        for job in self.slots.iter().flatten() {
            f(job);
        }
    }

    /// Empties the table, handing every job over for the final blocking
    /// waits. Slot order is preserved.
    pub fn drain(&mut self) -> Vec<Job> {
        self.slots.iter_mut().filter_map(Option::take).collect()
    }
}
