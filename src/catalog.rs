//! The bundled project catalog and the gallery's filter/selection state.

use crate::foundation::error::{FolioError, FolioResult};

const BUNDLED: &str = include_str!("../data/projects.json");
const GITHUB_PLACEHOLDER: &str = "{github}";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Category {
    #[default]
    All,
    #[serde(rename = "Full Stack")]
    FullStack,
    Frontend,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::All, Category::FullStack, Category::Frontend];

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All",
            Category::FullStack => "Full Stack",
            Category::Frontend => "Frontend",
        }
    }

    /// Accepts the display label or a lowercase slug (`all`, `full-stack`, `frontend`).
    pub fn parse(s: &str) -> FolioResult<Self> {
        let key = s.trim().to_ascii_lowercase().replace([' ', '_'], "-");
        match key.as_str() {
            "all" => Ok(Category::All),
            "full-stack" | "fullstack" => Ok(Category::FullStack),
            "frontend" => Ok(Category::Frontend),
            _ => Err(FolioError::validation(format!("unknown project category '{s}'"))),
        }
    }

    fn admits(self, other: Category) -> bool {
        self == Category::All || self == other
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: String,
    pub full_description: String,
    pub tech_stack: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub live_demo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub github: Option<String>,
    pub image: String,
    pub features: Vec<String>,
    pub category: Category,
}

/// Ordered, read-only project records.
#[derive(Clone, Debug)]
pub struct ProjectCatalog {
    projects: Vec<Project>,
}

impl ProjectCatalog {
    /// The catalog compiled into the crate, with code links pointing at `github_username`.
    pub fn bundled(github_username: &str) -> FolioResult<Self> {
        Self::from_json(BUNDLED, github_username)
    }

    pub fn from_json(json: &str, github_username: &str) -> FolioResult<Self> {
        let mut projects: Vec<Project> = serde_json::from_str(json)?;
        for p in &mut projects {
            if p.category == Category::All {
                return Err(FolioError::validation(format!(
                    "project '{}' cannot use the 'All' category",
                    p.id
                )));
            }
            if let Some(link) = &mut p.github {
                *link = link.replace(GITHUB_PLACEHOLDER, github_username);
            }
        }
        Ok(Self { projects })
    }

    pub fn all(&self) -> &[Project] {
        &self.projects
    }

    pub fn len(&self) -> usize {
        self.projects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projects.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    /// Projects in `category`, in catalog order.
    pub fn filter(&self, category: Category) -> Vec<&Project> {
        self.projects
            .iter()
            .filter(|p| category.admits(p.category))
            .collect()
    }
}

/// Project grid state: active category and the project whose details are open.
#[derive(Debug)]
pub struct Gallery {
    catalog: ProjectCatalog,
    filter: Category,
    selected: Option<usize>,
}

impl Gallery {
    pub fn new(catalog: ProjectCatalog) -> Self {
        Self {
            catalog,
            filter: Category::All,
            selected: None,
        }
    }

    pub fn catalog(&self) -> &ProjectCatalog {
        &self.catalog
    }

    pub fn filter(&self) -> Category {
        self.filter
    }

    pub fn set_filter(&mut self, category: Category) {
        self.filter = category;
    }

    pub fn visible(&self) -> Vec<&Project> {
        self.catalog.filter(self.filter)
    }

    pub fn select(&mut self, id: &str) -> FolioResult<&Project> {
        let idx = self
            .catalog
            .projects
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| FolioError::validation(format!("no project with id '{id}'")))?;
        self.selected = Some(idx);
        Ok(&self.catalog.projects[idx])
    }

    pub fn selected(&self) -> Option<&Project> {
        self.selected.map(|i| &self.catalog.projects[i])
    }

    pub fn close_details(&mut self) {
        self.selected = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_catalog_substitutes_username() {
        let catalog = ProjectCatalog::bundled("octocat").unwrap();
        assert_eq!(catalog.len(), 6);
        let portfolio = catalog.get("portfolio-website").unwrap();
        assert_eq!(
            portfolio.github.as_deref(),
            Some("https://github.com/octocat/portfolio")
        );
        assert!(catalog.all().iter().all(|p| p.features.len() == 8));
    }

    #[test]
    fn filter_preserves_order() {
        let catalog = ProjectCatalog::bundled("x").unwrap();
        let ids = |c| {
            catalog
                .filter(c)
                .into_iter()
                .map(|p| p.id.as_str())
                .collect::<Vec<_>>()
        };
        assert_eq!(
            ids(Category::FullStack),
            ["ai-trip-planner", "document-planner", "storyforge", "netflix-clone"]
        );
        assert_eq!(ids(Category::Frontend), ["movieland", "portfolio-website"]);
        assert_eq!(ids(Category::All).len(), 6);
    }

    #[test]
    fn parse_category_labels_and_slugs() {
        assert_eq!(Category::parse("Full Stack").unwrap(), Category::FullStack);
        assert_eq!(Category::parse("full-stack").unwrap(), Category::FullStack);
        assert_eq!(Category::parse("ALL").unwrap(), Category::All);
        assert!(Category::parse("backend").is_err());
    }

    #[test]
    fn all_is_not_a_project_category() {
        let json = r#"[{"id":"a","name":"A","description":"","fullDescription":"",
            "techStack":[],"image":"","features":[],"category":"All"}]"#;
        assert!(ProjectCatalog::from_json(json, "x").is_err());
    }

    #[test]
    fn gallery_selection() {
        let mut g = Gallery::new(ProjectCatalog::bundled("x").unwrap());
        assert!(g.select("nope").is_err());
        assert!(g.selected().is_none());

        assert_eq!(g.select("storyforge").unwrap().name, "StoryForge");
        assert_eq!(g.selected().unwrap().id, "storyforge");
        g.close_details();
        g.close_details();
        assert!(g.selected().is_none());

        g.set_filter(Category::Frontend);
        assert_eq!(g.visible().len(), 2);
    }
}
