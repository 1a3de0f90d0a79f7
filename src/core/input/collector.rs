//=========================================================================
// Input Collector
//=========================================================================
//
// Cross-thread input feed with bounded draining.
//
// Architecture:
//   Sender<Vec<InputEvent>> → collect_frame() → events → InputSystem
//
// The platform thread sends one batch per window-event flush; the thread
// that ticks the handle manager drains whatever arrived since the last
// tick. Draining is bounded so a flood of pointer motion never starves
// the tick.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use log::warn;

//=== Internal Dependencies ===============================================

use super::event::InputEvent;

//=== FeedStatus ==========================================================

/// State of the input feed after a drain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedStatus {
    Open,
    /// Every sender was dropped. Already-drained events are still valid.
    Disconnected,
}

/// Sending half handed to the platform layer.
pub type InputSender = Sender<Vec<InputEvent>>;

/// Creates a connected sender/collector pair.
pub fn input_channel() -> (InputSender, InputCollector) {
    let (sender, receiver) = unbounded();
    (sender, InputCollector::new(receiver))
}

//=== InputCollector ======================================================

/// Drains input batches sent from the platform thread.
pub struct InputCollector {
    receiver: Receiver<Vec<InputEvent>>,
    events: Vec<InputEvent>,
}

impl InputCollector {
    const MAX_BATCHES_PER_FRAME: usize = 100;

    pub fn new(receiver: Receiver<Vec<InputEvent>>) -> Self {
        Self {
            receiver,
            events: Vec::with_capacity(16),
        }
    }

    /// Drains pending batches (bounded) into the frame buffer.
    pub fn collect_frame(&mut self) -> FeedStatus {
        self.events.clear();
        let mut drained = 0;

        while drained < Self::MAX_BATCHES_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(batch) => {
                    self.events.extend(batch);
                    drained += 1;
                }
                Err(TryRecvError::Disconnected) => return FeedStatus::Disconnected,
                Err(TryRecvError::Empty) => break,
            }
        }

        if drained >= Self::MAX_BATCHES_PER_FRAME {
            warn!("Input backlog: drained {} batches this frame", drained);
        }

        FeedStatus::Open
    }

    /// Events collected by the last `collect_frame`.
    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }

    /// Takes the collected events, leaving an empty buffer.
    pub fn take_events(&mut self) -> Vec<InputEvent> {
        std::mem::take(&mut self.events)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::input::event::{KeyCode, MouseButton};

    #[test]
    fn collects_batches_in_send_order() {
        let (sender, mut collector) = input_channel();
        sender.send(vec![InputEvent::moved(1.0, 1.0)]).unwrap();
        sender
            .send(vec![
                InputEvent::button_down(MouseButton::Left),
                InputEvent::key_down(KeyCode::KeyW),
            ])
            .unwrap();

        assert_eq!(collector.collect_frame(), FeedStatus::Open);
        assert_eq!(
            collector.events(),
            &[
                InputEvent::moved(1.0, 1.0),
                InputEvent::button_down(MouseButton::Left),
                InputEvent::key_down(KeyCode::KeyW),
            ]
        );
    }

    #[test]
    fn empty_frame_clears_previous_events() {
        let (sender, mut collector) = input_channel();
        sender.send(vec![InputEvent::moved(1.0, 1.0)]).unwrap();
        collector.collect_frame();

        collector.collect_frame();
        assert!(collector.events().is_empty());
    }

    #[test]
    fn dropped_sender_reports_disconnect() {
        let (sender, mut collector) = input_channel();
        drop(sender);
        assert_eq!(collector.collect_frame(), FeedStatus::Disconnected);
    }

    #[test]
    fn drain_is_bounded() {
        let (sender, mut collector) = input_channel();
        for _ in 0..150 {
            sender.send(vec![InputEvent::moved(0.0, 0.0)]).unwrap();
        }

        collector.collect_frame();
        assert_eq!(collector.take_events().len(), 100);
        collector.collect_frame();
        assert_eq!(collector.events().len(), 50);
    }
}
