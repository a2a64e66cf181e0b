//! In-process realtime delivery: per-user rooms and the connection handshake

pub mod events;
pub mod hub;
pub mod verify;

pub use events::Envelope;
pub use hub::{Hub, RealtimePublisher};
