//! The sidecar core: route kernel output to per-request render areas.
//!
//! Every IOPub message a kernel broadcasts carries its originating request
//! id in `parent_header.msg_id`. The [`Sidecar`] keys on that id, lazily
//! materializes one [`OutputArea`] per id, and feeds each message to the
//! area that owns it. Messages that can't be correlated, and chatter like
//! `status` heartbeats, are silently dropped.
//!
//! Everything here is synchronous and single-threaded: one message in, one
//! routing decision out. Callers must not invoke [`Sidecar::consume`]
//! reentrantly or from multiple message pumps for the same instance.

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::message::Message;
use crate::render::{MountHandle, MountOf, OutputBackend, OutputHost, OutputModel, OutputView};

/// Style class applied to every area's mount point.
pub const OUTPUT_AREA_CLASS: &str = "output-area";

/// Message classes that never carry renderable output.
const IGNORED_MSG_TYPES: [&str; 2] = ["status", "execute_input"];

/// One correlation key's rendering state: a model/view pair and the view's
/// mount point.
///
/// Areas are never torn down. Once the router inserts a mount into the
/// host container it stays there, in place, for the life of the container.
pub struct OutputArea<B: OutputBackend> {
    model: B::Model,
    view: B::View,
}

impl<B: OutputBackend> OutputArea<B> {
    fn new(backend: &mut B) -> Self {
        let (model, view) = backend.build();
        let mut area = Self { model, view };
        area.view.mount_mut().set_class(OUTPUT_AREA_CLASS);
        area
    }

    /// Feed one message to the renderer. Returns whether it produced a
    /// rendering update, exactly as the model reports it.
    pub fn consume(&mut self, message: &Message) -> bool {
        self.model.consume_message(message)
    }

    /// The area's mount point in the host tree.
    pub fn mount(&self) -> &MountOf<B> {
        self.view.mount()
    }
}

/// Demultiplexes a kernel's output stream into [`OutputArea`]s.
///
/// The key → area map is owned here and only grows; there is no eviction.
/// Hosts that attach to long-lived kernels can watch [`Sidecar::len`].
pub struct Sidecar<B, H>
where
    B: OutputBackend,
    H: OutputHost<Mount = MountOf<B>>,
{
    backend: B,
    host: H,
    areas: HashMap<String, OutputArea<B>>,
}

impl<B, H> Sidecar<B, H>
where
    B: OutputBackend,
    H: OutputHost<Mount = MountOf<B>>,
{
    pub fn new(backend: B, host: H) -> Self {
        Self {
            backend,
            host,
            areas: HashMap::new(),
        }
    }

    /// Route one message.
    ///
    /// Unroutable input (no correlation key) and non-content classes
    /// (`status`, `execute_input`) return `false` with no side effects.
    /// Anything else reaches the area owning its key, created on first
    /// sight and appended to the host container in first-seen order.
    /// Returns what the area's renderer returned; `true` additionally asks
    /// the host to scroll the area's mount into view.
    pub fn consume(&mut self, message: &Message) -> bool {
        let Some(key) = message.correlation_key() else {
            trace!("dropping uncorrelated message");
            return false;
        };
        if let Some(msg_type) = message.msg_type() {
            if IGNORED_MSG_TYPES.contains(&msg_type) {
                trace!(key, msg_type, "dropping non-content message");
                return false;
            }
        }

        let area = match self.areas.entry(key.to_owned()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(key = %entry.key(), "materializing output area");
                let mut area = OutputArea::new(&mut self.backend);
                area.view.mount_mut().set_tag(entry.key());
                self.host.append_child(area.mount());
                entry.insert(area)
            }
        };

        let consumed = area.consume(message);
        if consumed {
            self.host.scroll_into_view(area.mount());
        }
        consumed
    }

    /// Number of output areas materialized so far.
    pub fn len(&self) -> usize {
        self.areas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }
}
