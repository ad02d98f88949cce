/// Command submission objects and the command list recording state
///
/// ```text
/// create ──> Recording ──close──> Closed ──submit──> Closed
///                ^                  │
///                └──────reset───────┘
/// ```

use crate::device::{Backend, CommandAllocator, CommandList, CommandListType, CommandQueue};
use crate::error::{Error, Result};

/// Recording state of a command list
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandListState {
    /// Accepting commands; cannot be submitted
    Recording,
    /// Ready for submission or reset
    Closed,
}

/// One queue, one allocator and one list bound together
///
/// Fields drop in declaration order: list, then allocator, then queue.
pub struct CommandObjects<B: Backend> {
    list: B::CommandList,
    allocator: B::CommandAllocator,
    queue: B::CommandQueue,
    state: CommandListState,
}

impl<B: Backend> CommandObjects<B> {
    /// Take ownership of freshly created objects (the list starts recording)
    pub fn new(queue: B::CommandQueue, allocator: B::CommandAllocator, list: B::CommandList) -> Self {
        Self {
            list,
            allocator,
            queue,
            state: CommandListState::Recording,
        }
    }

    pub fn state(&self) -> CommandListState {
        self.state
    }

    pub fn is_closed(&self) -> bool {
        self.state == CommandListState::Closed
    }

    pub fn list_type(&self) -> CommandListType {
        self.queue.list_type()
    }

    pub fn queue(&self) -> &B::CommandQueue {
        &self.queue
    }

    pub fn allocator(&self) -> &B::CommandAllocator {
        &self.allocator
    }

    pub fn list(&self) -> &B::CommandList {
        &self.list
    }

    /// Recording -> Closed
    pub fn close(&mut self) -> Result<()> {
        if self.state == CommandListState::Closed {
            return Err(Error::InvalidState(
                "command list is already closed".to_string(),
            ));
        }
        self.list.close()?;
        self.state = CommandListState::Closed;
        Ok(())
    }

    /// Closed -> Recording (allocator reset, then list reset)
    pub fn reset(&mut self) -> Result<()> {
        if self.state == CommandListState::Recording {
            return Err(Error::InvalidState(
                "command list must be closed before it is reset".to_string(),
            ));
        }
        self.allocator.reset()?;
        self.list.reset(&self.allocator)?;
        self.state = CommandListState::Recording;
        Ok(())
    }

    /// Execute the list on the queue
    ///
    /// # Errors
    ///
    /// `Error::InvalidState` when the list is still recording.
    pub fn submit(&self) -> Result<()> {
        if self.state != CommandListState::Closed {
            return Err(Error::InvalidState(
                "cannot submit a command list that is still recording".to_string(),
            ));
        }
        self.queue.execute(&self.list)
    }
}

#[cfg(test)]
#[path = "command_list_tests.rs"]
mod tests;
