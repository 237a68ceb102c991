//! Renderer and host capability traits.
//!
//! Rendering is not this crate's business. The router only needs four
//! seams: a model that consumes messages, a view that owns a mount point,
//! a backend that builds model/view pairs, and a host tree that mount
//! points get inserted into. Any conforming implementation plugs in, which
//! is also how tests substitute scripted stubs.

use crate::message::Message;

/// The stateful half of a renderer. One model accumulates all output for
/// one correlation key.
pub trait OutputModel {
    /// Feed one message to the model. Returns whether the message produced
    /// a rendering update (e.g. `status` heartbeats inside a model would
    /// not, a `stream` chunk would).
    fn consume_message(&mut self, message: &Message) -> bool;
}

/// A handle into the host's visual tree.
pub trait MountHandle {
    /// Tag the mount with an identifier, for bookkeeping and debugging.
    fn set_tag(&mut self, tag: &str);

    /// Mark the mount with a style class. The host may use it for styling;
    /// nothing in this crate reads it back.
    fn set_class(&mut self, class: &str);
}

/// The display half of a renderer: owns the mount point its model's output
/// appears under.
pub trait OutputView {
    type Mount: MountHandle;

    fn mount(&self) -> &Self::Mount;
    fn mount_mut(&mut self) -> &mut Self::Mount;
}

/// Builds model/view pairs. The pair is created together and lives
/// together; the backend decides how the view observes its model.
pub trait OutputBackend {
    type Model: OutputModel;
    type View: OutputView;

    fn build(&mut self) -> (Self::Model, Self::View);
}

/// The visual container mounts get inserted into, plus the host's
/// scroll-into-view hint.
pub trait OutputHost {
    type Mount;

    /// Insert a mount as the container's last child. Called once per mount.
    fn append_child(&mut self, mount: &Self::Mount);

    /// Ask the host to bring a mount into view. Idempotent; may be called
    /// on every message that produces output.
    fn scroll_into_view(&mut self, mount: &Self::Mount);
}

/// The mount type a backend's views expose.
pub type MountOf<B> = <<B as OutputBackend>::View as OutputView>::Mount;
