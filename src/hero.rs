//! Landing section: the rotating headline and the CV download link.

use std::time::Duration;

use crate::config::SiteConfig;
use crate::foundation::error::{FolioError, FolioResult};

/// How long each headline stays up.
pub const HEADLINE_INTERVAL: Duration = Duration::from_secs(4);

/// Cycles through a fixed list of headlines, one every [`HEADLINE_INTERVAL`].
#[derive(Clone, Debug)]
pub struct HeadlineRotator {
    lines: Vec<String>,
    index: usize,
    elapsed: Duration,
}

impl HeadlineRotator {
    pub fn new(lines: Vec<String>) -> FolioResult<Self> {
        if lines.is_empty() {
            return Err(FolioError::validation("headline rotator needs at least one line"));
        }
        Ok(Self {
            lines,
            index: 0,
            elapsed: Duration::ZERO,
        })
    }

    /// Greeting, role and tagline for `name`.
    pub fn for_owner(name: &str) -> Self {
        Self {
            lines: vec![
                format!("Hi, I'm {name}"),
                "Frontend & Full Stack Developer".to_string(),
                "Building Digital Experiences".to_string(),
            ],
            index: 0,
            elapsed: Duration::ZERO,
        }
    }

    pub fn current(&self) -> &str {
        &self.lines[self.index]
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Let `dt` pass. Returns whether the headline changed.
    pub fn advance(&mut self, dt: Duration) -> bool {
        self.elapsed += dt;
        let before = self.index;
        while self.elapsed >= HEADLINE_INTERVAL {
            self.elapsed -= HEADLINE_INTERVAL;
            self.index = (self.index + 1) % self.lines.len();
        }
        self.index != before
    }
}

/// Link that downloads the owner's CV.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct CvDownload {
    pub href: String,
    /// Name the browser saves the file under.
    pub file_name: String,
}

impl CvDownload {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            href: format!("/cv/{}", config.cv_filename),
            file_name: format!("{}-CV.pdf", hyphenate(&config.portfolio_name)),
        }
    }
}

/// Each run of whitespace becomes a single `-`.
fn hyphenate(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut in_space = false;
    for c in name.chars() {
        if c.is_whitespace() {
            if !in_space {
                out.push('-');
            }
            in_space = true;
        } else {
            out.push(c);
            in_space = false;
        }
    }
    out
}
