//! # Codec Errors
//!
//! The failure taxonomy of the wire layer:
//!
//! - Bounds violations ([`WireError::OutOfRange`], [`WireError::InvalidSeek`])
//!   are fatal to the current encode/decode operation and leave the cursor at
//!   the point of failure.
//! - [`WireError::MalformedVarInt`] guards against unbounded loops on
//!   corrupt or hostile input.
//! - [`WireError::CapacityExceeded`] and [`WireError::Precondition`] signal
//!   programming errors upstream, not data errors.
//! - A dangling entity reference is *not* an error: it decodes to absence.
//!
//! Nothing here is retried or recovered internally. The connection handler
//! or load routine decides whether to drop a packet/record or tear down.

use thiserror::Error;

/// Number of 7-bit groups a variable-length integer may occupy.
///
/// The format itself has no bound; the decoder imposes one so hostile input
/// cannot spin it. Five groups cover every 32-bit value the codec persists.
pub const MAX_ENCODED_INT_BYTES: usize = 5;

/// Errors raised by the primitive codec and buffer cursors.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum WireError {
    /// A read would consume bytes past the end of the buffer.
    #[error("read of {requested} byte(s) at offset {position} exceeds buffer of {length} byte(s)")]
    OutOfRange {
        /// Cursor position when the read was attempted.
        position: usize,
        /// Bytes the read required.
        requested: usize,
        /// Total buffer length.
        length: usize,
    },

    /// A seek targeted a position outside the buffer.
    #[error("seek to offset {offset} is outside a buffer of {length} byte(s)")]
    InvalidSeek {
        /// The resolved absolute target offset.
        offset: i64,
        /// Total buffer length.
        length: usize,
    },

    /// A variable-length integer ran past the decoder's group bound.
    #[error("variable-length integer exceeds {MAX_ENCODED_INT_BYTES} byte groups")]
    MalformedVarInt,

    /// A write would exceed a fixed-capacity sink.
    #[error("write of {requested} byte(s) exceeds fixed capacity of {capacity} byte(s)")]
    CapacityExceeded {
        /// Bytes the write required beyond the current position.
        requested: usize,
        /// The sink's fixed capacity.
        capacity: usize,
    },

    /// The caller violated an API contract (negative count, oversized
    /// length, zero band). Always a bug upstream, never a data error.
    #[error("precondition violated: {0}")]
    Precondition(&'static str),
}

/// Result alias for codec operations.
pub type WireResult<T> = Result<T, WireError>;

/// Errors raised by the outbound pipe.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum PipeError {
    /// The pipe is at capacity and the send was a non-blocking one.
    #[error("outbound pipe is full")]
    Full,

    /// The other half of the pipe has been dropped.
    #[error("outbound pipe is disconnected")]
    Disconnected,
}

/// Errors raised by the session send helpers, which compile and enqueue in
/// one step.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum SendError {
    /// Compilation failed.
    #[error(transparent)]
    Wire(#[from] WireError),

    /// The pipe rejected the finished packet.
    #[error(transparent)]
    Pipe(#[from] PipeError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errors_render_context() {
        let err = WireError::OutOfRange {
            position: 10,
            requested: 4,
            length: 12,
        };
        let text = err.to_string();
        assert!(text.contains("10"));
        assert!(text.contains('4'));
        assert!(text.contains("12"));
    }

    #[test]
    fn test_send_error_from_parts() {
        let wire: SendError = WireError::MalformedVarInt.into();
        let pipe: SendError = PipeError::Full.into();

        assert_eq!(wire, SendError::Wire(WireError::MalformedVarInt));
        assert_eq!(pipe, SendError::Pipe(PipeError::Full));
    }
}
