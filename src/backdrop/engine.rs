use rand::{SeedableRng, rngs::StdRng};

use crate::{
    backdrop::{BackdropSettings, field::Surface, shape::Shape},
    foundation::core::{FrameRGBA, Viewport},
    foundation::error::FolioResult,
    host::{FrameHandle, Host, ListenerId, TeardownList, stage::StageEvent, subscribe_resize},
    render::Painter,
    theme::store::ThemeStore,
};

/// Animation loop state. `Running` holds the one live frame handle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoopState {
    Stopped,
    Running(FrameHandle),
}

/// Owns the backdrop surface, its shapes and the self-rescheduling frame loop.
///
/// All methods take the host explicitly; the engine never reaches for ambient state. When the
/// settings fail [`BackdropSettings::validate`] or no drawable surface could be acquired at
/// mount, the engine is inert: it never schedules a frame and never attaches listeners.
pub struct BackdropEngine {
    settings: BackdropSettings,
    rng: StdRng,
    next_shape_id: u64,
    surface: Option<Surface>,
    painter: Option<Box<dyn Painter>>,
    loop_state: LoopState,
    resize_listener: Option<ListenerId>,
    teardown: TeardownList,
    time: f64,
    frames_drawn: u64,
}

impl BackdropEngine {
    #[tracing::instrument(skip_all)]
    pub fn mount(host: &mut dyn Host, settings: BackdropSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut engine = Self {
            settings,
            rng,
            next_shape_id: 0,
            surface: None,
            painter: None,
            loop_state: LoopState::Stopped,
            resize_listener: None,
            teardown: TeardownList::default(),
            time: 0.0,
            frames_drawn: 0,
        };

        if let Err(e) = engine.settings.validate() {
            tracing::warn!("invalid backdrop settings; backdrop disabled: {e}");
            return engine;
        }

        let viewport = host.viewport();
        let Some(painter) = host.acquire_surface(viewport) else {
            tracing::debug!("no drawable surface; backdrop disabled");
            return engine;
        };

        engine.surface = Some(Surface::populate(
            viewport,
            &mut engine.rng,
            &mut engine.next_shape_id,
        ));
        engine.painter = Some(painter);

        let (listener, sub) = subscribe_resize(host);
        engine.resize_listener = Some(listener);
        engine.teardown.push(sub);

        engine.start(host);
        tracing::debug!(
            width = viewport.width,
            height = viewport.height,
            shapes = engine.shapes().len(),
            "backdrop mounted"
        );
        engine
    }

    /// Whether a drawable surface was acquired and not yet released.
    pub fn has_surface(&self) -> bool {
        self.painter.is_some()
    }

    pub fn loop_state(&self) -> LoopState {
        self.loop_state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.loop_state, LoopState::Running(_))
    }

    pub fn surface(&self) -> Option<&Surface> {
        self.surface.as_ref()
    }

    pub fn shapes(&self) -> &[Shape] {
        self.surface.as_ref().map(Surface::shapes).unwrap_or(&[])
    }

    pub fn frames_drawn(&self) -> u64 {
        self.frames_drawn
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn settings(&self) -> &BackdropSettings {
        &self.settings
    }

    /// Schedule the first frame. No-op when running or inert.
    pub fn start(&mut self, host: &mut dyn Host) {
        if self.painter.is_none() || self.is_running() {
            return;
        }
        self.loop_state = LoopState::Running(host.request_frame());
    }

    /// Cancel the pending frame, if any. Safe from every state.
    pub fn stop(&mut self, host: &mut dyn Host) {
        if let LoopState::Running(handle) = std::mem::replace(&mut self.loop_state, LoopState::Stopped)
        {
            host.cancel_frame(handle);
        }
    }

    /// Frame callback. Handles other than the live one are ignored.
    pub fn on_frame(&mut self, host: &mut dyn Host, handle: FrameHandle, themes: &ThemeStore) {
        if self.loop_state != LoopState::Running(handle) {
            tracing::trace!(?handle, "ignoring stale frame");
            return;
        }
        self.loop_state = LoopState::Stopped;

        match self.render_frame(themes) {
            Ok(()) => self.loop_state = LoopState::Running(host.request_frame()),
            Err(e) => tracing::warn!("backdrop frame failed, stopping animation: {e}"),
        }
    }

    fn render_frame(&mut self, themes: &ThemeStore) -> FolioResult<()> {
        let (Some(surface), Some(painter)) = (self.surface.as_mut(), self.painter.as_mut()) else {
            return Ok(());
        };
        let theme = themes.theme();

        painter.clear();
        self.time += self.settings.time_step;
        surface.step(self.time, self.settings.drift_amplitude);

        painter.set_blur(self.settings.blur);
        for shape in surface.shapes() {
            painter.stroke_path(
                &shape.outline(),
                shape.render_color(theme),
                self.settings.stroke_width,
            )?;
        }
        painter.present()?;
        self.frames_drawn += 1;
        Ok(())
    }

    /// Resize callback: resize the surface and regenerate the whole shape set.
    #[tracing::instrument(skip(self, host))]
    pub fn on_resize(&mut self, host: &mut dyn Host, listener: ListenerId, viewport: Viewport) {
        if self.resize_listener != Some(listener) {
            return;
        }
        let Some(painter) = self.painter.as_mut() else {
            return;
        };
        if let Err(e) = painter.resize(viewport) {
            tracing::warn!("backdrop surface lost on resize: {e}");
            self.release(host);
            return;
        }
        self.surface = Some(Surface::populate(
            viewport,
            &mut self.rng,
            &mut self.next_shape_id,
        ));
    }

    /// Route a stage event to the matching callback.
    pub fn dispatch(&mut self, host: &mut dyn Host, event: StageEvent, themes: &ThemeStore) {
        match event {
            StageEvent::Frame(handle) => self.on_frame(host, handle, themes),
            StageEvent::Resize { listener, viewport } => self.on_resize(host, listener, viewport),
        }
    }

    /// Cancel the pending frame, then detach every listener. Idempotent.
    pub fn unmount(&mut self, host: &mut dyn Host) {
        self.stop(host);
        self.teardown.run(host);
        self.resize_listener = None;
    }

    fn release(&mut self, host: &mut dyn Host) {
        self.unmount(host);
        self.painter = None;
        self.surface = None;
    }

    /// Pixels of the last presented frame.
    pub fn snapshot(&self) -> Option<FrameRGBA> {
        self.painter.as_ref().and_then(|p| p.snapshot())
    }
}

impl Drop for BackdropEngine {
    fn drop(&mut self) {
        if self.is_running() || !self.teardown.is_empty() {
            tracing::warn!("backdrop dropped without unmount; host still holds its frame/listeners");
        }
    }
}

impl std::fmt::Debug for BackdropEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackdropEngine")
            .field("loop_state", &self.loop_state)
            .field("surface", &self.surface.as_ref().map(Surface::viewport))
            .field("shapes", &self.shapes().len())
            .field("frames_drawn", &self.frames_drawn)
            .finish()
    }
}
