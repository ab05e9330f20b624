//! The window the site runs in: viewport signal, animation-frame scheduling, resize listeners
//! and drawable-surface acquisition.

pub mod stage;

use crate::foundation::core::Viewport;
use crate::render::Painter;

/// Identifier of one scheduled animation frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(pub u64);

/// Identifier of one registered resize listener.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(pub u64);

pub trait Host {
    fn viewport(&self) -> Viewport;

    /// A drawable surface sized to `viewport`, or `None` when the environment has none.
    fn acquire_surface(&mut self, viewport: Viewport) -> Option<Box<dyn Painter>>;

    /// Schedule one frame callback.
    fn request_frame(&mut self) -> FrameHandle;

    /// Cancel a scheduled frame. Unknown or already-fired handles are ignored.
    fn cancel_frame(&mut self, handle: FrameHandle);

    fn add_resize_listener(&mut self) -> ListenerId;

    /// Detach a resize listener. Unknown ids are ignored.
    fn remove_resize_listener(&mut self, id: ListenerId);
}

/// A registration that knows how to undo itself.
pub struct Subscription {
    label: &'static str,
    dispose: Box<dyn FnOnce(&mut dyn Host)>,
}

impl Subscription {
    pub fn new(label: &'static str, dispose: impl FnOnce(&mut dyn Host) + 'static) -> Self {
        Self {
            label,
            dispose: Box::new(dispose),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    pub fn dispose(self, host: &mut dyn Host) {
        tracing::trace!(subscription = self.label, "dispose");
        (self.dispose)(host);
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Subscription").field(&self.label).finish()
    }
}

/// Register a resize listener and return its id with the matching subscription.
pub fn subscribe_resize(host: &mut dyn Host) -> (ListenerId, Subscription) {
    let id = host.add_resize_listener();
    let sub = Subscription::new("resize", move |host: &mut dyn Host| {
        host.remove_resize_listener(id)
    });
    (id, sub)
}

/// Subscriptions disposed together, in registration order.
#[derive(Debug, Default)]
pub struct TeardownList {
    subs: Vec<Subscription>,
}

impl TeardownList {
    pub fn push(&mut self, sub: Subscription) {
        self.subs.push(sub);
    }

    pub fn len(&self) -> usize {
        self.subs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subs.is_empty()
    }

    /// Dispose everything. Running an empty list is a no-op, so this is safe to repeat.
    pub fn run(&mut self, host: &mut dyn Host) {
        for sub in self.subs.drain(..) {
            sub.dispose(host);
        }
    }
}
