//! Pending input for the next tick.

use std::collections::VecDeque;

use av_core::InputEvent;

use crate::{FrameError, FrameResult};

/// FIFO of raw input events, bounded so a stalled tick cannot grow it
/// without limit.
#[derive(Clone, Debug)]
pub struct InputQueue {
    events:   VecDeque<InputEvent>,
    capacity: usize,
}

impl InputQueue {
    pub fn with_capacity(capacity: usize) -> Self {
        Self { events: VecDeque::with_capacity(capacity.min(64)), capacity }
    }

    /// Queue `event` behind everything already pending.
    pub fn push(&mut self, event: InputEvent) -> FrameResult<()> {
        if self.events.len() >= self.capacity {
            return Err(FrameError::InputQueueFull { capacity: self.capacity });
        }
        self.events.push_back(event);
        Ok(())
    }

    /// Remove every pending event, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = InputEvent> + '_ {
        self.events.drain(..)
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
