//! folio is a headless runtime for a personal portfolio site.
//!
//! The centrepiece is the animated canvas [`backdrop`]: a field of faint outlined shapes that
//! drift, bounce off the surface edges and recolour with the active theme. Around it sit the
//! collaborators a page needs:
//!
//! - [`theme`]: the dark/light flag, its persistence and CSS palette
//! - [`reveal`]: one-shot section reveals driven by scroll visibility
//! - [`shell`]: preloader, navigation and the mounted page
//! - [`cursor`], [`hero`]: the pointer trail and the landing headline
//! - [`contact`]: contact card, floating contact panel, form state and mail relays
//! - [`catalog`]: the bundled project catalog
//!
//! A [`host::Host`] stands in for the browser window; [`host::stage::Stage`] is a headless
//! implementation that renders through [`render::cpu::CpuPainter`].
#![forbid(unsafe_code)]

mod foundation;

pub mod backdrop;
pub mod catalog;
pub mod config;
pub mod contact;
pub mod cursor;
pub mod hero;
pub mod host;
pub mod render;
pub mod reveal;
pub mod shell;
pub mod theme;

pub use crate::foundation::core::{BezPath, FrameRGBA, Point, Rect, Rgba8, Vec2, Viewport};
pub use crate::foundation::error::{FolioError, FolioResult};

pub use crate::backdrop::BackdropSettings;
pub use crate::backdrop::engine::{BackdropEngine, LoopState};
pub use crate::catalog::{Category, Gallery, Project, ProjectCatalog};
pub use crate::config::SiteConfig;
pub use crate::contact::floating::{ActionTarget, FloatingAction, FloatingContact};
pub use crate::contact::form::{ContactForm, Field, SubmitStatus};
pub use crate::contact::relay::{LogRelay, MailRelay, OutboundMail};
pub use crate::cursor::{Cursor, CursorLayer, CursorSprite};
pub use crate::hero::{CvDownload, HeadlineRotator};
pub use crate::host::stage::{Stage, StageEvent};
pub use crate::host::{FrameHandle, Host, ListenerId, Subscription, TeardownList};
pub use crate::render::{BlurFilter, Painter};
pub use crate::shell::{Phase, SectionId, ViewShell};
pub use crate::theme::Theme;
pub use crate::theme::prefs::{FilePreferences, MemoryPreferences, PreferenceStore};
pub use crate::theme::store::ThemeStore;
