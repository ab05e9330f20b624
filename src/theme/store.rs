use crate::theme::{Palette, Theme, prefs::PreferenceStore};

/// Preference key holding the persisted theme.
pub const THEME_KEY: &str = "theme";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriberId(u64);

type Subscriber = Box<dyn FnMut(Theme)>;

/// Process-wide theme flag with synchronous subscribers.
///
/// Created once by the view shell and handed to consumers by reference. Readers call
/// [`ThemeStore::theme`]; reactive consumers register through [`ThemeStore::subscribe`] and keep
/// the returned id to unsubscribe.
pub struct ThemeStore {
    theme: Theme,
    prefs: Box<dyn PreferenceStore>,
    subscribers: Vec<(SubscriberId, Subscriber)>,
    next_id: u64,
}

impl ThemeStore {
    /// Initialize from the persisted preference, falling back to [`Theme::default`] when the
    /// value is missing, unreadable or unknown.
    pub fn init(prefs: Box<dyn PreferenceStore>) -> Self {
        let theme = match prefs.get(THEME_KEY) {
            Ok(Some(raw)) => Theme::parse(&raw).unwrap_or_else(|e| {
                tracing::warn!("ignoring stored theme: {e}");
                Theme::default()
            }),
            Ok(None) => Theme::default(),
            Err(e) => {
                tracing::warn!("theme preference unavailable: {e}");
                Theme::default()
            }
        };
        tracing::debug!(theme = theme.as_str(), "theme store initialized");

        Self {
            theme,
            prefs,
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn is_dark(&self) -> bool {
        self.theme.is_dark()
    }

    pub fn palette(&self) -> Palette {
        self.theme.palette()
    }

    /// Flip the flag, persist it and notify subscribers before returning the new value.
    pub fn toggle(&mut self) -> Theme {
        let next = self.theme.toggled();
        self.set(next);
        next
    }

    /// Store `theme`; a no-op when it is already current.
    pub fn set(&mut self, theme: Theme) {
        if self.theme == theme {
            return;
        }
        tracing::debug!(from = self.theme.as_str(), to = theme.as_str(), "theme change");
        self.theme = theme;

        // The in-memory flag stays flipped even when the write fails.
        if let Err(e) = self.prefs.set(THEME_KEY, theme.as_str()) {
            tracing::warn!("failed to persist theme: {e}");
        }

        for (_, subscriber) in &mut self.subscribers {
            subscriber(theme);
        }
    }

    pub fn subscribe(&mut self, subscriber: impl FnMut(Theme) + 'static) -> SubscriberId {
        let id = SubscriberId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns `false` when `id` was not (or no longer) subscribed.
    pub fn unsubscribe(&mut self, id: SubscriberId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscriber. The flag stays readable.
    pub fn close(&mut self) {
        self.subscribers.clear();
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &self.theme)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
