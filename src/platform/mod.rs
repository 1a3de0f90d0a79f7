//=========================================================================
// Platform Bridge
//
// Feeds winit window events to the thread that ticks the handle manager.
//
// Architecture:
// ```text
//  Window Thread:                     Tick Thread:
//  ┌──────────────────────────┐      ┌──────────────────────┐
//  │  host ApplicationHandler │      │  InputCollector      │
//  │   ↓ window_event()       │      │   ↓ collect_frame()  │
//  │  WinitBridge             │      │  InputSystem         │
//  │   ├─ InputProcessor      │      │   ↓ (InputAdapter)   │
//  │   └─ InputBuffer         │      │  HandleManager::tick │
//  │   ↓ RedrawRequested      │      └──────────────────────┘
//  │  crossbeam channel ──────┼──────────────┘
//  └──────────────────────────┘     Vec<InputEvent>
// ```
//
// RedrawRequested is the frame boundary: every event buffered since the
// previous redraw goes out as one batch, and empty frames send nothing.
// A disconnected receiver is logged and reported, never a panic, so the
// host can still close its window.
//
// The bridge does not own an event loop. Hosts keep their own
// `ApplicationHandler` and forward window events to it.
//
//=========================================================================

//=== Submodules ==========================================================

mod input_buffer;
mod input_processor;

//=== External Dependencies ===============================================

use log::{trace, warn};
use winit::event::WindowEvent;

//=== Internal Dependencies ===============================================

use crate::core::input::collector::{FeedStatus, InputSender};

pub use input_buffer::InputBuffer;
pub use input_processor::InputProcessor;

//=== WinitBridge =========================================================

/// Translates and batches winit window events onto an input channel.
///
/// # Examples
///
/// ```
/// use aetheric_handles::core::input::{input_channel, FeedStatus};
/// use aetheric_handles::platform::WinitBridge;
///
/// let (sender, mut collector) = input_channel();
/// let mut bridge = WinitBridge::new(sender);
///
/// // Inside the host's `ApplicationHandler::window_event`:
/// // bridge.process_window_event(&event);
///
/// assert_eq!(bridge.flush(), FeedStatus::Open);
/// assert_eq!(collector.collect_frame(), FeedStatus::Open);
/// assert!(collector.events().is_empty());
/// ```
pub struct WinitBridge {
    processor: InputProcessor,
    buffer: InputBuffer,
    sender: InputSender,
}

impl WinitBridge {
    pub fn new(sender: InputSender) -> Self {
        Self {
            processor: InputProcessor::new(),
            buffer: InputBuffer::new(),
            sender,
        }
    }

    /// Buffers the input carried by `event`; flushes on RedrawRequested.
    pub fn process_window_event(&mut self, event: &WindowEvent) -> FeedStatus {
        if matches!(event, WindowEvent::RedrawRequested) {
            return self.flush();
        }
        if let Some(input) = self.processor.process_window_event(event) {
            self.buffer.push(input);
        }
        FeedStatus::Open
    }

    /// Sends everything buffered so far as one batch.
    pub fn flush(&mut self) -> FeedStatus {
        let Some(batch) = self.buffer.drain() else {
            return FeedStatus::Open;
        };
        let count = batch.len();
        trace!(target: "platform::input", "Flushing {} input events", count);

        if self.sender.send(batch).is_err() {
            warn!(target: "platform::input", "Input channel disconnected, dropping {} events", count);
            return FeedStatus::Disconnected;
        }
        FeedStatus::Open
    }

    pub fn processor(&self) -> &InputProcessor {
        &self.processor
    }

    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
