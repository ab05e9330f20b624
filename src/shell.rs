//! Page shell: preloader, section layout with reveals, navigation state, the page chrome
//! (cursor, headline, floating contact panel) and the mounted backdrop.

use std::time::Duration;

use crate::{
    backdrop::{BackdropSettings, engine::BackdropEngine},
    catalog::{Category, Gallery, Project},
    config::SiteConfig,
    contact::floating::{ActionTarget, FloatingAction, FloatingContact},
    cursor::{Cursor, CursorSprite},
    foundation::core::{Point, Rect},
    foundation::error::{FolioError, FolioResult},
    hero::HeadlineRotator,
    host::{Host, ListenerId, TeardownList, stage::Stage, stage::StageEvent, subscribe_resize},
    reveal::{DEFAULT_STAGGER, ITEM_STAGGER, RevealPlan, RevealTracker},
    theme::{Theme, store::ThemeStore},
};

pub const PRELOADER_TICK: Duration = Duration::from_millis(30);
pub const PRELOADER_STEP: u32 = 2;
pub const PRELOADER_HOLD: Duration = Duration::from_millis(500);

/// Scroll offset past which the navigation bar switches to its compact style.
pub const SCROLLED_OFFSET: f64 = 50.0;
/// Height of the fixed header; section jumps land this far above the section top.
pub const HEADER_HEIGHT: f64 = 80.0;

/// Loading counter shown before the main content.
///
/// Progress climbs by [`PRELOADER_STEP`] every [`PRELOADER_TICK`] up to 100, then holds for
/// [`PRELOADER_HOLD`] before reporting completion.
#[derive(Clone, Debug, Default)]
pub struct Preloader {
    progress: u32,
    carry: Duration,
    held: Duration,
}

impl Preloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn is_complete(&self) -> bool {
        self.progress >= 100 && self.held >= PRELOADER_HOLD
    }

    /// Let `dt` of wall time pass. Returns whether the preloader is complete.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.carry += dt;
        while self.progress < 100 && self.carry >= PRELOADER_TICK {
            self.carry -= PRELOADER_TICK;
            self.progress = (self.progress + PRELOADER_STEP).min(100);
        }
        if self.progress >= 100 {
            self.held += std::mem::take(&mut self.carry);
        }
        self.is_complete()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionId {
    Home,
    About,
    Projects,
    Contact,
}

impl SectionId {
    pub const ALL: [SectionId; 4] = [
        SectionId::Home,
        SectionId::About,
        SectionId::Projects,
        SectionId::Contact,
    ];

    pub fn anchor(self) -> &'static str {
        match self {
            SectionId::Home => "home",
            SectionId::About => "about",
            SectionId::Projects => "projects",
            SectionId::Contact => "contact",
        }
    }

    /// Accepts `about` or `#about`.
    pub fn parse(href: &str) -> FolioResult<Self> {
        let id = href.trim().trim_start_matches('#');
        Self::ALL
            .into_iter()
            .find(|s| s.anchor() == id)
            .ok_or_else(|| FolioError::validation(format!("unknown section '{href}'")))
    }

    fn default_children(self) -> usize {
        match self {
            SectionId::Home => 4,
            SectionId::About => 4,
            SectionId::Projects => 6,
            SectionId::Contact => 4,
        }
    }
}

/// Project cards stagger in one after another; each card's tech chips stagger in after it.
fn project_reveal(visible: &[&Project]) -> RevealTracker {
    RevealTracker::new(visible.len())
        .with_stagger(DEFAULT_STAGGER)
        .with_items(
            visible.iter().map(|p| p.tech_stack.len()).collect(),
            ITEM_STAGGER,
        )
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Loading,
    Ready,
}

#[derive(Clone, Debug, Default)]
pub struct Navigation {
    scroll_offset: f64,
    menu_open: bool,
}

impl Navigation {
    pub fn on_scroll(&mut self, offset: f64) {
        self.scroll_offset = offset;
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_offset
    }

    pub fn is_scrolled(&self) -> bool {
        self.scroll_offset > SCROLLED_OFFSET
    }

    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.menu_open = !self.menu_open;
        self.menu_open
    }

    pub fn close_menu(&mut self) {
        self.menu_open = false;
    }

    /// Scroll offset that puts a section starting at `section_top` just under the header.
    pub fn scroll_target(section_top: f64) -> f64 {
        (section_top - HEADER_HEIGHT).max(0.0)
    }
}

#[derive(Clone, Debug)]
struct Section {
    id: SectionId,
    bounds: Rect,
    reveal: RevealTracker,
}

/// Top-level page: owns the theme store, the preloader, per-section reveal state, the project
/// gallery, the page chrome and, once loading finishes, the backdrop engine.
pub struct ViewShell {
    themes: ThemeStore,
    settings: BackdropSettings,
    phase: Phase,
    preloader: Preloader,
    backdrop: Option<BackdropEngine>,
    nav: Navigation,
    sections: Vec<Section>,
    gallery: Gallery,
    headline: HeadlineRotator,
    cursor: Option<Cursor>,
    cursor_listener: Option<ListenerId>,
    floating: FloatingContact,
    teardown: TeardownList,
    closed: bool,
}

impl ViewShell {
    pub fn new(
        themes: ThemeStore,
        settings: BackdropSettings,
        site: &SiteConfig,
        gallery: Gallery,
    ) -> Self {
        let sections = SectionId::ALL
            .into_iter()
            .map(|id| Section {
                id,
                bounds: Rect::ZERO,
                reveal: match id {
                    SectionId::Projects => project_reveal(&gallery.visible()),
                    _ => RevealTracker::new(id.default_children()),
                },
            })
            .collect();
        Self {
            themes,
            settings,
            phase: Phase::Loading,
            preloader: Preloader::new(),
            backdrop: None,
            nav: Navigation::default(),
            sections,
            gallery,
            headline: HeadlineRotator::for_owner(&site.portfolio_name),
            cursor: None,
            cursor_listener: None,
            floating: FloatingContact::new(site),
            teardown: TeardownList::default(),
            closed: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn preloader(&self) -> &Preloader {
        &self.preloader
    }

    pub fn themes(&self) -> &ThemeStore {
        &self.themes
    }

    pub fn backdrop(&self) -> Option<&BackdropEngine> {
        self.backdrop.as_ref()
    }

    pub fn navigation(&self) -> &Navigation {
        &self.nav
    }

    pub fn toggle_menu(&mut self) -> bool {
        self.nav.toggle_menu()
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.themes.toggle()
    }

    pub fn headline(&self) -> &str {
        self.headline.current()
    }

    pub fn gallery(&self) -> &Gallery {
        &self.gallery
    }

    /// Change the project filter. Before the projects section reveals, its card and chip
    /// schedule follows the new selection.
    pub fn set_filter(&mut self, category: Category) {
        self.gallery.set_filter(category);
        let visible = self.gallery.visible();
        if let Some(s) = self
            .sections
            .iter_mut()
            .find(|s| s.id == SectionId::Projects && !s.reveal.is_revealed())
        {
            s.reveal = project_reveal(&visible).with_threshold(s.reveal.threshold());
        }
    }

    pub fn select_project(&mut self, id: &str) -> FolioResult<&Project> {
        self.gallery.select(id)
    }

    pub fn close_project(&mut self) {
        self.gallery.close_details();
    }

    pub fn floating(&self) -> &FloatingContact {
        &self.floating
    }

    pub fn toggle_floating(&mut self) -> bool {
        self.floating.toggle()
    }

    /// Press a floating-panel button. The contact-form shortcut also closes the mobile menu.
    pub fn floating_action(&mut self, action: FloatingAction) -> FolioResult<ActionTarget> {
        let target = self.floating.activate(action)?;
        if matches!(target, ActionTarget::ScrollTo(_)) {
            self.nav.close_menu();
        }
        Ok(target)
    }

    /// The custom cursor, present once the page is ready.
    pub fn cursor(&self) -> Option<&Cursor> {
        self.cursor.as_ref()
    }

    pub fn pointer_move(&mut self, to: Point) {
        if let Some(c) = self.cursor.as_mut() {
            c.pointer_move(to);
        }
    }

    pub fn set_hovering(&mut self, hovering: bool) {
        if let Some(c) = self.cursor.as_mut() {
            c.set_hovering(hovering);
        }
    }

    /// Cursor layers in the current theme's ink, back to front.
    pub fn cursor_sprites(&self) -> Vec<CursorSprite> {
        self.cursor
            .as_ref()
            .map(|c| c.sprites(self.themes.theme()))
            .unwrap_or_default()
    }

    /// Advance the preloader; on completion swap to the main content, mount the backdrop and
    /// show the cursor. Once ready, drive the headline and the cursor springs.
    pub fn advance(&mut self, host: &mut dyn Host, dt: Duration) {
        if self.closed {
            return;
        }
        if self.phase == Phase::Ready {
            self.headline.advance(dt);
            if let Some(c) = self.cursor.as_mut() {
                c.step(dt);
            }
            return;
        }
        if self.preloader.advance(dt) {
            self.phase = Phase::Ready;
            tracing::debug!("preloader complete");
            self.cursor = Some(Cursor::new(host.viewport()));
            let (listener, sub) = subscribe_resize(host);
            self.cursor_listener = Some(listener);
            self.teardown.push(sub);
            self.backdrop = Some(BackdropEngine::mount(host, self.settings.clone()));
        }
    }

    pub fn dispatch(&mut self, host: &mut dyn Host, event: StageEvent) {
        if let StageEvent::Resize { listener, viewport } = event
            && Some(listener) == self.cursor_listener
            && let Some(c) = self.cursor.as_mut()
        {
            c.on_resize(viewport);
        }
        if let Some(engine) = self.backdrop.as_mut() {
            engine.dispatch(host, event, &self.themes);
        }
    }

    /// Deliver everything the stage has queued. Returns the number of events handled.
    pub fn pump(&mut self, stage: &mut Stage) -> usize {
        let events = stage.poll();
        let n = events.len();
        for event in events {
            self.dispatch(stage, event);
        }
        n
    }

    /// Record where a section sits on the page (document coordinates).
    pub fn set_layout(&mut self, id: SectionId, top: f64, height: f64) {
        if let Some(s) = self.sections.iter_mut().find(|s| s.id == id) {
            s.bounds = Rect::new(0.0, top, 1.0, top + height.max(0.0));
        }
    }

    pub fn is_revealed(&self, id: SectionId) -> bool {
        self.sections
            .iter()
            .any(|s| s.id == id && s.reveal.is_revealed())
    }

    /// Scroll to `offset` with a window `viewport_height` tall. Returns the reveals fired.
    pub fn on_scroll(&mut self, offset: f64, viewport_height: f64) -> Vec<(SectionId, RevealPlan)> {
        self.nav.on_scroll(offset);
        if self.phase != Phase::Ready {
            return Vec::new();
        }
        let window = Rect::new(0.0, offset, 1.0, offset + viewport_height.max(0.0));
        self.sections
            .iter_mut()
            .filter_map(|s| s.reveal.observe_rects(s.bounds, window).map(|p| (s.id, p)))
            .collect()
    }

    /// Close the mobile menu and return the scroll offset for `id`.
    pub fn scroll_to(&mut self, id: SectionId) -> f64 {
        self.nav.close_menu();
        let top = self
            .sections
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.bounds.y0)
            .unwrap_or(0.0);
        Navigation::scroll_target(top)
    }

    /// Unmount the backdrop, detach the cursor and close the theme store. Idempotent.
    pub fn close(&mut self, host: &mut dyn Host) {
        if let Some(engine) = self.backdrop.as_mut() {
            engine.unmount(host);
        }
        self.teardown.run(host);
        self.cursor_listener = None;
        self.floating.close();
        if !self.closed {
            self.themes.close();
            self.closed = true;
        }
    }
}

impl std::fmt::Debug for ViewShell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ViewShell")
            .field("phase", &self.phase)
            .field("theme", &self.themes.theme())
            .field("backdrop", &self.backdrop)
            .field("closed", &self.closed)
            .finish()
    }
}
