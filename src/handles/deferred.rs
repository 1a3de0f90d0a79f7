//=========================================================================
// Deferred Queue
//=========================================================================
//
// Work scheduled for the start of the next manager tick.
//
// Newly created outline sessions queue their outline attachment here so
// callers can keep adding members during the current frame. The manager
// drains the queue once at the top of every tick.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::types::HandleId;

//=== DeferredTask ========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeferredTask {
    /// Outline the members of a session still in outline mode.
    AttachOutline(HandleId),
}

impl DeferredTask {
    pub fn handle(&self) -> HandleId {
        match *self {
            DeferredTask::AttachOutline(id) => id,
        }
    }
}

//=== DeferredQueue =======================================================

/// Queue of tasks run at the next tick boundary.
#[derive(Debug, Default)]
pub struct DeferredQueue {
    queue: Vec<DeferredTask>,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a task; an identical pending task is not queued twice.
    pub fn push(&mut self, task: DeferredTask) {
        if !self.queue.contains(&task) {
            self.queue.push(task);
        }
    }

    /// Drops every pending task of a handle.
    pub fn cancel(&mut self, handle: HandleId) {
        self.queue.retain(|t| t.handle() != handle);
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all tasks, leaving the queue empty.
    pub fn take(&mut self) -> Vec<DeferredTask> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
