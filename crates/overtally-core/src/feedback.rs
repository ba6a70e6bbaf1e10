use crate::events::Event;

/// Every feedback collaborator implements this trait.
/// The tracker emits discrete notifications; the collaborator independently
/// decides the sound/vibration response. The core knows nothing about audio
/// or haptics.
pub trait Feedback {
    /// Called when a legal delivery goes into the tally.
    fn on_legal_delivery(&mut self, _balls_bowled: u8) {} // default no-op

    /// Called when a wide or no-ball is logged.
    fn on_extra(&mut self) {} // default no-op

    /// Called when the completion confirmation fires.
    fn on_over_complete(&mut self, _maiden: bool) {} // default no-op

    /// Called when a mutation is reverted.
    fn on_undo(&mut self) {} // default no-op

    /// Called when the tally returns to a fresh over.
    fn on_reset(&mut self) {} // default no-op
}

/// Headless feedback sink.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullFeedback;

impl Feedback for NullFeedback {}

/// Route an event to the matching feedback hook.
pub fn notify<F: Feedback + ?Sized>(feedback: &mut F, event: &Event) {
    match event {
        Event::DeliveryRecorded { balls_bowled, .. } => {
            feedback.on_legal_delivery(*balls_bowled)
        }
        Event::ExtraRecorded { .. } => feedback.on_extra(),
        Event::OverCompleted { maiden, .. } => feedback.on_over_complete(*maiden),
        Event::UndoApplied { .. } => feedback.on_undo(),
        Event::OverReset { .. } => feedback.on_reset(),
        Event::StateSnapshot { .. } => {}
    }
}
