//! sidecar — correlation-keyed demultiplexer for Jupyter kernel output.
//!
//! Parses IOPub traffic off the Jupyter wire protocol and routes each
//! message to the render area owning its originating request, creating
//! areas lazily and dropping chatter (`status`, `execute_input`).
//! Rendering itself and socket transport are left to the host.

pub mod connection;
pub mod message;
pub mod render;
pub mod sidecar;
pub mod wire;

pub use connection::ConnectionInfo;
pub use message::{Message, MessageHeader, MimeBundle};
pub use render::{MountHandle, MountOf, OutputBackend, OutputHost, OutputModel, OutputView};
pub use sidecar::{OutputArea, Sidecar, OUTPUT_AREA_CLASS};
pub use wire::{parse_message, WireError, DELIMITER};
