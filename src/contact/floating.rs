use std::time::Duration;

use crate::config::SiteConfig;
use crate::contact::tel_href;
use crate::foundation::error::{FolioError, FolioResult};
use crate::shell::SectionId;

/// Delay between consecutive buttons as the panel opens.
pub const ACTION_STAGGER: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub enum FloatingAction {
    Email,
    Call,
    GitHub,
    Twitter,
    ContactForm,
}

impl FloatingAction {
    pub fn label(self) -> &'static str {
        match self {
            FloatingAction::Email => "Email",
            FloatingAction::Call => "Call",
            FloatingAction::GitHub => "GitHub",
            FloatingAction::Twitter => "Twitter",
            FloatingAction::ContactForm => "Contact Form",
        }
    }
}

/// What activating a button does.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum ActionTarget {
    /// Follow a `mailto:` or `tel:` link in place.
    Navigate(String),
    /// Open a URL in a new tab.
    OpenTab(String),
    /// Scroll the page to a section.
    ScrollTo(SectionId),
}

/// Corner button that expands into quick contact actions.
///
/// Actions whose target is not configured are left out; the contact-form shortcut is always
/// present.
#[derive(Clone, Debug)]
pub struct FloatingContact {
    open: bool,
    actions: Vec<(FloatingAction, ActionTarget)>,
}

impl FloatingContact {
    pub fn new(config: &SiteConfig) -> Self {
        let mut actions = Vec::new();
        if let Some(email) = &config.portfolio_email {
            actions.push((
                FloatingAction::Email,
                ActionTarget::Navigate(format!("mailto:{email}")),
            ));
        }
        if let Some(phone) = &config.portfolio_phone {
            actions.push((FloatingAction::Call, ActionTarget::Navigate(tel_href(phone))));
        }
        if let Some(url) = &config.social.github {
            actions.push((FloatingAction::GitHub, ActionTarget::OpenTab(url.clone())));
        }
        if let Some(url) = &config.social.twitter {
            actions.push((FloatingAction::Twitter, ActionTarget::OpenTab(url.clone())));
        }
        actions.push((
            FloatingAction::ContactForm,
            ActionTarget::ScrollTo(SectionId::Contact),
        ));
        Self {
            open: false,
            actions,
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Buttons currently shown with their entrance delays; empty while closed.
    pub fn visible(&self) -> Vec<(FloatingAction, Duration)> {
        if !self.open {
            return Vec::new();
        }
        self.actions
            .iter()
            .enumerate()
            .map(|(i, (action, _))| (*action, ACTION_STAGGER * i as u32))
            .collect()
    }

    /// Press a button. Jumping to the contact form also closes the panel.
    pub fn activate(&mut self, action: FloatingAction) -> FolioResult<ActionTarget> {
        if !self.open {
            return Err(FolioError::validation("floating contact panel is closed"));
        }
        let target = self
            .actions
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, t)| t.clone())
            .ok_or_else(|| {
                FolioError::validation(format!("'{}' is not configured", action.label()))
            })?;
        if matches!(target, ActionTarget::ScrollTo(_)) {
            self.open = false;
        }
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SocialLinks;

    fn configured() -> SiteConfig {
        SiteConfig {
            portfolio_email: Some("me@example.com".into()),
            portfolio_phone: Some("+91 98765 43210".into()),
            social: SocialLinks {
                github: Some("https://github.com/me".into()),
                twitter: Some("https://x.com/me".into()),
                ..SocialLinks::default()
            },
            ..SiteConfig::default()
        }
    }

    #[test]
    fn closed_panel_shows_nothing_and_rejects_presses() {
        let mut panel = FloatingContact::new(&configured());
        assert!(panel.visible().is_empty());
        assert!(panel.activate(FloatingAction::Email).is_err());
    }

    #[test]
    fn open_panel_lists_actions_in_order_with_stagger() {
        let mut panel = FloatingContact::new(&configured());
        assert!(panel.toggle());
        let shown = panel.visible();
        let order: Vec<_> = shown.iter().map(|(a, _)| *a).collect();
        assert_eq!(
            order,
            [
                FloatingAction::Email,
                FloatingAction::Call,
                FloatingAction::GitHub,
                FloatingAction::Twitter,
                FloatingAction::ContactForm,
            ]
        );
        assert_eq!(shown[4].1, Duration::from_millis(400));
    }

    #[test]
    fn link_actions_keep_panel_open() {
        let mut panel = FloatingContact::new(&configured());
        panel.toggle();
        assert_eq!(
            panel.activate(FloatingAction::Call).unwrap(),
            ActionTarget::Navigate("tel:+919876543210".into())
        );
        assert_eq!(
            panel.activate(FloatingAction::Twitter).unwrap(),
            ActionTarget::OpenTab("https://x.com/me".into())
        );
        assert!(panel.is_open());
    }

    #[test]
    fn contact_form_shortcut_scrolls_and_closes() {
        let mut panel = FloatingContact::new(&SiteConfig::default());
        panel.toggle();
        assert_eq!(panel.visible().len(), 1);
        assert!(panel.activate(FloatingAction::Email).is_err());
        assert_eq!(
            panel.activate(FloatingAction::ContactForm).unwrap(),
            ActionTarget::ScrollTo(SectionId::Contact)
        );
        assert!(!panel.is_open());
    }
}
