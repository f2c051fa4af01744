//! Engine command queue
//!
//! Input callbacks and game code cannot borrow the engine while it is driving
//! them, so requests that change engine state are expressed as typed commands
//! pushed onto a shared queue. The facade drains the queue once per frame,
//! after the current scene has updated.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

/// A deferred request to the engine facade
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EngineCommand {
    /// Switch the scene manager to the scene with this id
    ChangeScene(String),
    /// Stop requesting frames and shut down
    Quit,
}

/// Cheaply clonable handle to the engine's command queue.
///
/// Clones share the same underlying queue, so a handle can be captured by any
/// number of input callbacks. Single-threaded by design, like the rest of the
/// per-frame state.
#[derive(Debug, Clone, Default)]
pub struct CommandQueue {
    inner: Rc<RefCell<VecDeque<EngineCommand>>>,
}

impl CommandQueue {
    /// Create an empty queue
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a command to be applied at the end of the current frame
    pub fn push(&self, command: EngineCommand) {
        self.inner.borrow_mut().push_back(command);
    }

    /// Convenience for pushing a scene change
    pub fn change_scene(&self, id: impl Into<String>) {
        self.push(EngineCommand::ChangeScene(id.into()));
    }

    /// Convenience for pushing a quit request
    pub fn quit(&self) {
        self.push(EngineCommand::Quit);
    }

    /// Take all queued commands, oldest first
    pub fn drain(&self) -> Vec<EngineCommand> {
        self.inner.borrow_mut().drain(..).collect()
    }

    /// Number of queued commands
    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drains_in_push_order() {
        let queue = CommandQueue::new();
        queue.change_scene("wall");
        queue.quit();

        let drained = queue.drain();
        assert_eq!(
            drained,
            vec![
                EngineCommand::ChangeScene("wall".to_string()),
                EngineCommand::Quit
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn clones_share_the_queue() {
        let queue = CommandQueue::new();
        let handle = queue.clone();
        handle.change_scene("jenga");

        assert_eq!(queue.len(), 1);
        assert_eq!(
            queue.drain(),
            vec![EngineCommand::ChangeScene("jenga".to_string())]
        );
        assert!(handle.is_empty());
    }
}
