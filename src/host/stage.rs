use std::collections::{BTreeSet, VecDeque};

use crate::{
    foundation::core::Viewport,
    host::{FrameHandle, Host, ListenerId},
    render::{Painter, cpu::CpuPainter},
};

pub type PainterFactory = Box<dyn FnMut(Viewport) -> Option<Box<dyn Painter>>>;

/// Something the stage wants a consumer to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StageEvent {
    Resize {
        listener: ListenerId,
        viewport: Viewport,
    },
    Frame(FrameHandle),
}

/// Headless [`Host`]: a single-threaded window stand-in driven by explicit [`Stage::poll`] calls.
///
/// Frames requested while a batch is being dispatched land in the next batch, so frame
/// callbacks never overlap.
pub struct Stage {
    viewport: Viewport,
    next_id: u64,
    pending_frames: BTreeSet<FrameHandle>,
    listeners: Vec<ListenerId>,
    resize_queue: VecDeque<(ListenerId, Viewport)>,
    factory: PainterFactory,
}

impl Stage {
    /// Stage whose surfaces are [`CpuPainter`]s.
    pub fn new(viewport: Viewport) -> Self {
        Self::with_painter_factory(
            viewport,
            Box::new(|vp| match CpuPainter::new(vp) {
                Ok(p) => Some(Box::new(p) as Box<dyn Painter>),
                Err(e) => {
                    tracing::warn!("cpu surface unavailable: {e}");
                    None
                }
            }),
        )
    }

    /// Stage that never hands out a drawable surface.
    pub fn without_canvas(viewport: Viewport) -> Self {
        Self::with_painter_factory(viewport, Box::new(|_| None))
    }

    pub fn with_painter_factory(viewport: Viewport, factory: PainterFactory) -> Self {
        Self {
            viewport,
            next_id: 1,
            pending_frames: BTreeSet::new(),
            listeners: Vec::new(),
            resize_queue: VecDeque::new(),
            factory,
        }
    }

    /// Change the viewport and queue a notification for every attached listener.
    pub fn resize(&mut self, viewport: Viewport) {
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            listeners = self.listeners.len(),
            "stage resize"
        );
        self.viewport = viewport;
        for &id in &self.listeners {
            self.resize_queue.push_back((id, viewport));
        }
    }

    /// Drain pending resize notifications, then every frame scheduled so far.
    pub fn poll(&mut self) -> Vec<StageEvent> {
        let mut events: Vec<StageEvent> = self
            .resize_queue
            .drain(..)
            .filter(|(id, _)| self.listeners.contains(id))
            .map(|(listener, viewport)| StageEvent::Resize { listener, viewport })
            .collect();
        events.extend(
            std::mem::take(&mut self.pending_frames)
                .into_iter()
                .map(StageEvent::Frame),
        );
        events
    }

    pub fn pending_frame_count(&self) -> usize {
        self.pending_frames.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    fn next_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

impl Host for Stage {
    fn viewport(&self) -> Viewport {
        self.viewport
    }

    fn acquire_surface(&mut self, viewport: Viewport) -> Option<Box<dyn Painter>> {
        (self.factory)(viewport)
    }

    fn request_frame(&mut self) -> FrameHandle {
        let handle = FrameHandle(self.next_id());
        self.pending_frames.insert(handle);
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        self.pending_frames.remove(&handle);
    }

    fn add_resize_listener(&mut self) -> ListenerId {
        let id = ListenerId(self.next_id());
        self.listeners.push(id);
        id
    }

    fn remove_resize_listener(&mut self, id: ListenerId) {
        self.listeners.retain(|l| *l != id);
        self.resize_queue.retain(|(l, _)| *l != id);
    }
}

impl std::fmt::Debug for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Stage")
            .field("viewport", &self.viewport)
            .field("pending_frames", &self.pending_frames.len())
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
