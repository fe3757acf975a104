use crate::domain::event::EventEnvelope;
use crate::infrastructure::message_publisher::EnvelopeHandler;

/// Outcome of handing one raw message to a handler. Every outcome counts as consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Consumed {
    Handled,
    HandlerFailed,
    Malformed,
}

pub fn handle_payload(stream: &str, payload: &[u8], handler: &dyn EnvelopeHandler) -> Consumed {
    let envelope = match serde_json::from_slice::<EventEnvelope>(payload) {
        Ok(envelope) => envelope,
        Err(e) => {
            tracing::warn!(
                stream = stream,
                "Skipping malformed envelope ({} bytes): {}",
                payload.len(),
                e
            );

            return Consumed::Malformed;
        }
    };

    match handler.handle(&envelope) {
        Ok(()) => Consumed::Handled,
        Err(e) => {
            tracing::error!(
                stream = stream,
                event_type = envelope.event_type.as_str(),
                "Event handler failed: {}",
                e
            );

            Consumed::HandlerFailed
        }
    }
}
