use crate::display_state::DisplayState;
use crate::image_classifier::interface::Classification;
use std::sync::mpsc::{channel, Receiver, Sender, TryRecvError};

/// Creates the two ends of the handoff to the UI context.
pub fn ui_context(min_confidence: f32) -> (UiDispatcher, UiContext) {
    let (sender, receiver) = channel();
    (
        UiDispatcher { sender },
        UiContext {
            receiver,
            state: DisplayState::default(),
            min_confidence,
        },
    )
}

/// Background side. Sends never block and are never merged.
#[derive(Clone)]
pub struct UiDispatcher {
    sender: Sender<Classification>,
}

impl UiDispatcher {
    pub fn dispatch_async(&self, top: Classification) {
        // a closed UI has nothing left to update
        let _ = self.sender.send(top);
    }
}

/// UI side. Owns the display state; only the thread holding this mutates it.
pub struct UiContext {
    receiver: Receiver<Classification>,
    state: DisplayState,
    min_confidence: f32,
}

impl UiContext {
    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    /// Applies everything queued so far, in arrival order.
    pub fn drain(&mut self) -> bool {
        let mut changed = false;
        loop {
            match self.receiver.try_recv() {
                Ok(top) => changed |= self.state.apply(&top, self.min_confidence),
                Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => return changed,
            }
        }
    }

    /// Blocks for the next update. `None` once every dispatcher is gone and
    /// the queue is empty.
    pub fn wait_for_update(&mut self) -> Option<bool> {
        let top = self.receiver.recv().ok()?;
        Some(self.state.apply(&top, self.min_confidence))
    }
}
