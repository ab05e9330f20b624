//! Contact form state and the mail relays it submits through.

pub mod floating;
pub mod form;
pub mod relay;

use crate::config::{DEFAULT_LOCATION, SiteConfig};
use relay::{LogRelay, MailRelay};

/// One row of the contact card.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct ContactMethod {
    pub title: &'static str,
    pub value: String,
    pub href: String,
}

/// `tel:` link for a display-formatted phone number.
pub(crate) fn tel_href(phone: &str) -> String {
    let dial: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    format!("tel:{dial}")
}

/// Email, phone, location and social rows for the configured owner. Unset values are skipped.
pub fn contact_methods(config: &SiteConfig) -> Vec<ContactMethod> {
    let mut out = Vec::new();
    if let Some(email) = &config.portfolio_email {
        out.push(ContactMethod {
            title: "Email",
            value: email.clone(),
            href: format!("mailto:{email}"),
        });
    }
    if let Some(phone) = &config.portfolio_phone {
        out.push(ContactMethod {
            title: "Phone",
            value: phone.clone(),
            href: tel_href(phone),
        });
    }
    out.push(ContactMethod {
        title: "Location",
        value: DEFAULT_LOCATION.to_string(),
        href: "#".to_string(),
    });
    out.extend(config.social.entries().into_iter().map(|(title, url)| ContactMethod {
        title,
        value: url.to_string(),
        href: url.to_string(),
    }));
    out
}

/// The relay `config` asks for: EmailJS when credentials are set and the `emailjs` feature is
/// on, else a logging dry run.
pub fn relay_from_config(config: &SiteConfig) -> Box<dyn MailRelay> {
    configured_relay(config).unwrap_or_else(|| Box::new(LogRelay::new()))
}

#[cfg(feature = "emailjs")]
fn configured_relay(config: &SiteConfig) -> Option<Box<dyn MailRelay>> {
    let creds = config.emailjs.as_ref()?;
    match relay::EmailJsRelay::new(creds.clone()) {
        Ok(r) => Some(Box::new(r)),
        Err(e) => {
            tracing::warn!("EmailJS relay unavailable, falling back to dry run: {e}");
            None
        }
    }
}

#[cfg(not(feature = "emailjs"))]
fn configured_relay(config: &SiteConfig) -> Option<Box<dyn MailRelay>> {
    if config.emailjs.is_some() {
        tracing::warn!("EmailJS credentials set but the `emailjs` feature is off; dry run only");
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SocialLinks;

    #[test]
    fn phone_href_strips_whitespace() {
        let cfg = SiteConfig {
            portfolio_email: Some("me@example.com".into()),
            portfolio_phone: Some("+91 98765 43210".into()),
            ..SiteConfig::default()
        };
        let rows = contact_methods(&cfg);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].href, "mailto:me@example.com");
        assert_eq!(rows[1].href, "tel:+919876543210");
        assert_eq!(rows[2].value, "India");
    }

    #[test]
    fn unset_values_are_skipped() {
        let rows = contact_methods(&SiteConfig::default());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].title, "Location");
    }

    #[test]
    fn configured_social_links_follow_location() {
        let cfg = SiteConfig {
            social: SocialLinks {
                github: Some("https://github.com/me".into()),
                instagram: Some("https://instagram.com/me".into()),
                ..SocialLinks::default()
            },
            ..SiteConfig::default()
        };
        let rows = contact_methods(&cfg);
        let titles: Vec<_> = rows.iter().map(|r| r.title).collect();
        assert_eq!(titles, ["Location", "GitHub", "Instagram"]);
        assert_eq!(rows[1].href, "https://github.com/me");
        assert_eq!(rows[2].value, "https://instagram.com/me");
    }
}
