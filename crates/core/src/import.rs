//! Mapping linked-account data into portfolio content.
//!
//! An import produces a [`ContentPatch`]; applying it replaces only the
//! content fields it carries with a non-empty value.

use serde::{Deserialize, Serialize};

use crate::connection::{GithubRepo, LinkedinExperience, ProviderProfile, ServiceName};
use crate::content::{PortfolioContent, Proficiency, Project, SkillEntry};
use crate::error::CoreError;

/// One kind of data that can be imported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImportKind {
    GithubProjects,
    LinkedinExperience,
    LinkedinSkills,
}

impl ImportKind {
    pub const ALL: [ImportKind; 3] = [
        ImportKind::GithubProjects,
        ImportKind::LinkedinExperience,
        ImportKind::LinkedinSkills,
    ];

    pub fn id(self) -> &'static str {
        match self {
            ImportKind::GithubProjects => "github-projects",
            ImportKind::LinkedinExperience => "linkedin-experience",
            ImportKind::LinkedinSkills => "linkedin-skills",
        }
    }

    pub fn source(self) -> ServiceName {
        match self {
            ImportKind::GithubProjects => ServiceName::Github,
            ImportKind::LinkedinExperience | ImportKind::LinkedinSkills => ServiceName::Linkedin,
        }
    }

    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        Self::ALL
            .into_iter()
            .find(|k| k.id() == raw)
            .ok_or_else(|| CoreError::Validation(format!("Unknown import option '{raw}'")))
    }
}

/// An import choice offered to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportOption {
    pub id: ImportKind,
    pub name: &'static str,
    pub description: &'static str,
    pub source: ServiceName,
}

fn option_for(kind: ImportKind) -> ImportOption {
    let (name, description) = match kind {
        ImportKind::GithubProjects => (
            "GitHub Projects",
            "Import project details from your GitHub repositories",
        ),
        ImportKind::LinkedinExperience => (
            "LinkedIn Work Experience",
            "Import your work experience from LinkedIn",
        ),
        ImportKind::LinkedinSkills => (
            "LinkedIn Skills",
            "Import your professional skills from LinkedIn",
        ),
    };
    ImportOption {
        id: kind,
        name,
        description,
        source: kind.source(),
    }
}

/// Options available given the services the user has linked.
pub fn available_options(linked: &[ServiceName]) -> Vec<ImportOption> {
    ImportKind::ALL
        .into_iter()
        .filter(|k| linked.contains(&k.source()))
        .map(option_for)
        .collect()
}

// ---------------------------------------------------------------------------
// Patch
// ---------------------------------------------------------------------------

/// Content fields produced by an import.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects: Option<Vec<Project>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub work_experience: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub computer_skills: Option<Vec<SkillEntry>>,
}

impl ContentPatch {
    /// Overwrite fields of `content` for which the patch has a non-empty value.
    pub fn apply_to(&self, content: &mut PortfolioContent) {
        if let Some(projects) = self.projects.as_ref().filter(|p| !p.is_empty()) {
            content.projects = projects.clone();
        }
        if let Some(text) = self.work_experience.as_ref().filter(|t| !t.is_empty()) {
            content.work_experience = text.clone();
        }
        if let Some(skills) = self.computer_skills.as_ref().filter(|s| !s.is_empty()) {
            content.computer_skills = skills.clone();
        }
    }
}

pub fn repo_to_project(repo: &GithubRepo) -> Project {
    Project {
        name: repo.name.clone(),
        description: repo.description.clone().unwrap_or_default(),
        technologies: repo.language.iter().cloned().collect(),
        url: None,
        repo_url: repo.html_url.clone(),
        start_date: repo.created_at.clone(),
        end_date: repo.updated_at.clone(),
    }
}

/// `"{title} at {company} ({start} - {end|Present})\n{description}"`.
pub fn format_experience(exp: &LinkedinExperience) -> String {
    format!(
        "{} at {} ({} - {})\n{}",
        exp.title,
        exp.company,
        exp.start_date,
        exp.end_date.as_deref().filter(|e| !e.is_empty()).unwrap_or("Present"),
        exp.description.as_deref().unwrap_or(""),
    )
}

/// Build the patch for `selected` kinds from the user's linked profiles.
/// Kinds whose provider is not linked contribute nothing.
pub fn build_patch(selected: &[ImportKind], profiles: &[ProviderProfile]) -> ContentPatch {
    let github = profiles.iter().find_map(|p| match p {
        ProviderProfile::Github(g) => Some(g),
        _ => None,
    });
    let linkedin = profiles.iter().find_map(|p| match p {
        ProviderProfile::Linkedin(l) => Some(l),
        _ => None,
    });

    let mut patch = ContentPatch::default();
    for kind in selected {
        match kind {
            ImportKind::GithubProjects => {
                if let Some(gh) = github {
                    patch.projects = Some(gh.repos.iter().map(repo_to_project).collect());
                }
            }
            ImportKind::LinkedinExperience => {
                if let Some(li) = linkedin {
                    let text = li
                        .experiences
                        .iter()
                        .map(format_experience)
                        .collect::<Vec<_>>()
                        .join("\n\n");
                    patch.work_experience = Some(text);
                }
            }
            ImportKind::LinkedinSkills => {
                if let Some(li) = linkedin {
                    patch.computer_skills = Some(
                        li.skills
                            .iter()
                            .map(|name| SkillEntry {
                                name: name.clone(),
                                proficiency: Proficiency::Intermediate,
                            })
                            .collect(),
                    );
                }
            }
        }
    }
    patch
}
