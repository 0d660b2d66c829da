//! Error types for the protocol layer.

/// Errors that can occur while encoding or decoding wire events.
///
/// Decode failures are common in normal operation — any client can send
/// garbage — and are handled by dropping the frame, never by tearing the
/// connection down.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning an event into bytes).
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed: malformed JSON, an unknown event name, or
    /// a payload that doesn't match the event's shape.
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// A room id that is empty, overlong, or not alphanumeric.
    #[error("invalid room id: {0:?}")]
    InvalidRoomId(String),
}
