use alloc::collections::VecDeque;

/// Work postponed until the current event handler has returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Deferred {
    EnsureProvisional,
    Redraw,
    EndEdit,
    BeginDrag,
}

/// A single-threaded "next tick" queue.
///
/// An action that is already pending is not queued a second time.
#[derive(Clone, Debug, Default)]
pub struct TaskQueue {
    pending: VecDeque<Deferred>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` if `task` was already pending.
    pub fn defer(&mut self, task: Deferred) -> bool {
        if self.pending.contains(&task) {
            return false;
        }
        gtrace!(?task, "TaskQueue::defer");
        self.pending.push_back(task);
        true
    }

    pub fn pop(&mut self) -> Option<Deferred> {
        self.pending.pop_front()
    }

    pub fn is_pending(&self, task: Deferred) -> bool {
        self.pending.contains(&task)
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
