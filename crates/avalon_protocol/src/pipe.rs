//! # Outbound Pipe
//!
//! The one shared-resource boundary of the codec: a bounded,
//! single-producer/single-consumer queue decoupling packet compilation from
//! the network-write path.
//!
//! The unit of transfer is a whole, finished, immutable packet — a packet
//! becomes visible to the consumer only after its length field is patched
//! and the buffer committed, so a half-written packet can never leak onto
//! the socket. When the consumer falls behind, the pipe applies
//! backpressure (block on [`PacketSender::send`], reject on
//! [`PacketSender::try_send`]) instead of growing without bound.

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};

use crate::error::PipeError;

/// Creates connected pipe halves.
pub struct OutboundPipe;

impl OutboundPipe {
    /// Creates a bounded pipe holding at most `capacity` finished packets.
    ///
    /// A zero capacity turns every send into a rendezvous with the
    /// consumer; connection pipes always use a positive capacity.
    #[must_use]
    pub fn bounded(capacity: usize) -> (PacketSender, PacketReceiver) {
        let (tx, rx) = bounded(capacity);
        (PacketSender { tx }, PacketReceiver { rx })
    }
}

/// The producer half: owned by the packet-compilation path.
#[derive(Clone, Debug)]
pub struct PacketSender {
    tx: Sender<Box<[u8]>>,
}

impl PacketSender {
    /// Commits a finished packet, blocking while the pipe is full.
    ///
    /// # Errors
    ///
    /// [`PipeError::Disconnected`] when the consumer is gone.
    pub fn send(&self, packet: Vec<u8>) -> Result<(), PipeError> {
        self.tx
            .send(packet.into_boxed_slice())
            .map_err(|_| PipeError::Disconnected)
    }

    /// Commits a finished packet without blocking.
    ///
    /// # Errors
    ///
    /// [`PipeError::Full`] under backpressure, [`PipeError::Disconnected`]
    /// when the consumer is gone.
    pub fn try_send(&self, packet: Vec<u8>) -> Result<(), PipeError> {
        match self.tx.try_send(packet.into_boxed_slice()) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::debug!("outbound pipe full, packet rejected");
                Err(PipeError::Full)
            }
            Err(TrySendError::Disconnected(_)) => Err(PipeError::Disconnected),
        }
    }

    /// Packets currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tx.is_empty()
    }
}

/// The consumer half: owned by the network writer.
#[derive(Clone, Debug)]
pub struct PacketReceiver {
    rx: Receiver<Box<[u8]>>,
}

impl PacketReceiver {
    /// Takes the next packet, blocking until one is committed.
    ///
    /// # Errors
    ///
    /// [`PipeError::Disconnected`] when the producer is gone and the pipe
    /// has drained.
    pub fn recv(&self) -> Result<Box<[u8]>, PipeError> {
        self.rx.recv().map_err(|_| PipeError::Disconnected)
    }

    /// Takes the next packet without blocking, or `None` when the pipe is
    /// currently empty (or fully drained after the producer left).
    pub fn try_recv(&self) -> Option<Box<[u8]>> {
        match self.rx.try_recv() {
            Ok(packet) => Some(packet),
            Err(TryRecvError::Empty | TryRecvError::Disconnected) => None,
        }
    }

    /// Packets currently queued.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rx.len()
    }

    /// Returns true if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rx.is_empty()
    }
}
