use std::path::PathBuf;

use crate::theme::prefs::FilePreferences;

pub const DEFAULT_GITHUB_USERNAME: &str = "ethical0101";
pub const DEFAULT_LOCATION: &str = "India";
pub const DEFAULT_PORTFOLIO_NAME: &str = "Kommi Druthendra";
pub const DEFAULT_CV_FILENAME: &str = "kommi-druthendra-cv.pdf";

pub const ENV_EMAILJS_SERVICE_ID: &str = "FOLIO_EMAILJS_SERVICE_ID";
pub const ENV_EMAILJS_TEMPLATE_ID: &str = "FOLIO_EMAILJS_TEMPLATE_ID";
pub const ENV_EMAILJS_PUBLIC_KEY: &str = "FOLIO_EMAILJS_PUBLIC_KEY";
pub const ENV_PORTFOLIO_EMAIL: &str = "FOLIO_PORTFOLIO_EMAIL";
pub const ENV_PORTFOLIO_PHONE: &str = "FOLIO_PORTFOLIO_PHONE";
pub const ENV_GITHUB_USERNAME: &str = "FOLIO_GITHUB_USERNAME";
pub const ENV_GITHUB_URL: &str = "FOLIO_GITHUB_URL";
pub const ENV_LINKEDIN_URL: &str = "FOLIO_LINKEDIN_URL";
pub const ENV_TWITTER_URL: &str = "FOLIO_TWITTER_URL";
pub const ENV_INSTAGRAM_URL: &str = "FOLIO_INSTAGRAM_URL";
pub const ENV_PREFS_PATH: &str = "FOLIO_PREFS_PATH";
pub const ENV_PORTFOLIO_NAME: &str = "FOLIO_PORTFOLIO_NAME";
pub const ENV_CV_FILENAME: &str = "FOLIO_CV_FILENAME";

/// Account identifiers for the EmailJS relay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmailJsCredentials {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub instagram: Option<String>,
}

impl SocialLinks {
    /// `(label, url)` for every configured link, in display order.
    pub fn entries(&self) -> Vec<(&'static str, &str)> {
        [
            ("GitHub", &self.github),
            ("LinkedIn", &self.linkedin),
            ("Twitter", &self.twitter),
            ("Instagram", &self.instagram),
        ]
        .into_iter()
        .filter_map(|(label, url)| url.as_deref().map(|u| (label, u)))
        .collect()
    }
}

/// Site-wide settings sourced from the environment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SiteConfig {
    pub emailjs: Option<EmailJsCredentials>,
    pub portfolio_email: Option<String>,
    pub portfolio_phone: Option<String>,
    pub github_username: String,
    pub social: SocialLinks,
    pub prefs_path: Option<PathBuf>,
    /// Owner's display name; also names the downloaded CV.
    pub portfolio_name: String,
    /// File served under `/cv/`.
    pub cv_filename: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            emailjs: None,
            portfolio_email: None,
            portfolio_phone: None,
            github_username: DEFAULT_GITHUB_USERNAME.to_string(),
            social: SocialLinks::default(),
            prefs_path: None,
            portfolio_name: DEFAULT_PORTFOLIO_NAME.to_string(),
            cv_filename: DEFAULT_CV_FILENAME.to_string(),
        }
    }
}

impl SiteConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let emailjs = match (
            get(ENV_EMAILJS_SERVICE_ID),
            get(ENV_EMAILJS_TEMPLATE_ID),
            get(ENV_EMAILJS_PUBLIC_KEY),
        ) {
            (Some(service_id), Some(template_id), Some(public_key)) => Some(EmailJsCredentials {
                service_id,
                template_id,
                public_key,
            }),
            (None, None, None) => None,
            _ => {
                tracing::warn!("incomplete EmailJS credentials; mail relay disabled");
                None
            }
        };

        Self {
            emailjs,
            portfolio_email: get(ENV_PORTFOLIO_EMAIL),
            portfolio_phone: get(ENV_PORTFOLIO_PHONE),
            github_username: get(ENV_GITHUB_USERNAME)
                .unwrap_or_else(|| DEFAULT_GITHUB_USERNAME.to_string()),
            social: SocialLinks {
                github: get(ENV_GITHUB_URL),
                linkedin: get(ENV_LINKEDIN_URL),
                twitter: get(ENV_TWITTER_URL),
                instagram: get(ENV_INSTAGRAM_URL),
            },
            prefs_path: get(ENV_PREFS_PATH).map(PathBuf::from),
            portfolio_name: get(ENV_PORTFOLIO_NAME)
                .unwrap_or_else(|| DEFAULT_PORTFOLIO_NAME.to_string()),
            cv_filename: get(ENV_CV_FILENAME).unwrap_or_else(|| DEFAULT_CV_FILENAME.to_string()),
        }
    }

    /// Where the theme preference lives: the configured path, else the platform config dir.
    pub fn preferences(&self) -> FilePreferences {
        match &self.prefs_path {
            Some(path) => FilePreferences::new(path.clone()),
            None => FilePreferences::default_location(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_environment_uses_defaults() {
        let cfg = SiteConfig::from_lookup(|_| None);
        assert_eq!(cfg, SiteConfig::default());
        assert_eq!(cfg.github_username, "ethical0101");
    }

    #[test]
    fn reads_every_key() {
        let cfg = SiteConfig::from_lookup(lookup(&[
            (ENV_EMAILJS_SERVICE_ID, "svc"),
            (ENV_EMAILJS_TEMPLATE_ID, "tpl"),
            (ENV_EMAILJS_PUBLIC_KEY, "pk"),
            (ENV_PORTFOLIO_EMAIL, "me@example.com"),
            (ENV_PORTFOLIO_PHONE, "+91 98765 43210"),
            (ENV_GITHUB_USERNAME, "octocat"),
            (ENV_LINKEDIN_URL, "https://linkedin.com/in/me"),
            (ENV_PREFS_PATH, "/tmp/prefs.json"),
            (ENV_PORTFOLIO_NAME, "Ada Lovelace"),
            (ENV_CV_FILENAME, "ada.pdf"),
        ]));
        assert_eq!(
            cfg.emailjs,
            Some(EmailJsCredentials {
                service_id: "svc".into(),
                template_id: "tpl".into(),
                public_key: "pk".into(),
            })
        );
        assert_eq!(cfg.portfolio_email.as_deref(), Some("me@example.com"));
        assert_eq!(cfg.github_username, "octocat");
        assert_eq!(cfg.portfolio_name, "Ada Lovelace");
        assert_eq!(cfg.cv_filename, "ada.pdf");
        assert_eq!(
            cfg.social.entries(),
            vec![("LinkedIn", "https://linkedin.com/in/me")]
        );
        assert_eq!(
            cfg.preferences().path(),
            std::path::Path::new("/tmp/prefs.json")
        );
    }

    #[test]
    fn partial_or_blank_credentials_are_ignored() {
        let cfg = SiteConfig::from_lookup(lookup(&[
            (ENV_EMAILJS_SERVICE_ID, "svc"),
            (ENV_EMAILJS_TEMPLATE_ID, "  "),
            (ENV_EMAILJS_PUBLIC_KEY, "pk"),
            (ENV_GITHUB_USERNAME, ""),
        ]));
        assert_eq!(cfg.emailjs, None);
        assert_eq!(cfg.github_username, DEFAULT_GITHUB_USERNAME);
    }
}
