//! Typed shape of the current content schema and its lenient decoder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use ts_rs::TS;

use super::migrate::{CURRENT_SCHEMA_VERSION, SCHEMA_VERSION_KEY};

/// Skill or language proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "lowercase")]
#[ts(export)]
pub enum Proficiency {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Professional,
    Native,
}

impl Proficiency {
    /// Parse a stored proficiency; unknown values become `Intermediate`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw {
            "beginner" => Proficiency::Beginner,
            "advanced" => Proficiency::Advanced,
            "professional" => Proficiency::Professional,
            "native" => Proficiency::Native,
            _ => Proficiency::Intermediate,
        }
    }
}

/// Identity block. Sub-fields are optional because a stored `personalInfo`
/// replaces the default wholesale and may omit any of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PersonalInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub profile_picture: Option<String>,
}

impl Default for PersonalInfo {
    fn default() -> Self {
        Self {
            full_name: Some(String::new()),
            email: Some(String::new()),
            bio: None,
            profile_picture: None,
        }
    }
}

/// A language or computer skill with its level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SkillEntry {
    pub name: String,
    pub proficiency: Proficiency,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub end_date: Option<String>,
}

/// The complete, normalized content document.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PortfolioContent {
    pub personal_info: PersonalInfo,
    pub education: String,
    pub work_experience: String,
    pub awards: String,
    pub volunteering: String,
    pub languages: Vec<SkillEntry>,
    pub computer_skills: Vec<SkillEntry>,
    pub projects: Vec<Project>,
    /// Top-level keys outside the schema, kept as written.
    #[serde(flatten)]
    #[ts(skip)]
    pub extra: Map<String, Value>,
}

/// Top-level keys decoded into typed fields.
const SCHEMA_FIELDS: [&str; 8] = [
    "personalInfo",
    "education",
    "workExperience",
    "awards",
    "volunteering",
    "languages",
    "computerSkills",
    "projects",
];

impl PortfolioContent {
    /// JSON form written to storage, stamped with the schema version.
    pub fn to_stored_value(&self) -> Value {
        let mut map = self.extra.clone();
        map.insert(SCHEMA_VERSION_KEY.into(), Value::from(CURRENT_SCHEMA_VERSION));
        map.insert("personalInfo".into(), personal_info_value(&self.personal_info));
        map.insert("education".into(), Value::String(self.education.clone()));
        map.insert("workExperience".into(), Value::String(self.work_experience.clone()));
        map.insert("awards".into(), Value::String(self.awards.clone()));
        map.insert("volunteering".into(), Value::String(self.volunteering.clone()));
        map.insert("languages".into(), skills_value(&self.languages));
        map.insert("computerSkills".into(), skills_value(&self.computer_skills));
        map.insert(
            "projects".into(),
            Value::Array(self.projects.iter().map(project_value).collect()),
        );
        Value::Object(map)
    }
}

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

fn opt_insert(map: &mut Map<String, Value>, key: &str, value: &Option<String>) {
    if let Some(v) = value {
        map.insert(key.into(), Value::String(v.clone()));
    }
}

fn personal_info_value(info: &PersonalInfo) -> Value {
    let mut map = Map::new();
    opt_insert(&mut map, "fullName", &info.full_name);
    opt_insert(&mut map, "email", &info.email);
    opt_insert(&mut map, "bio", &info.bio);
    opt_insert(&mut map, "profilePicture", &info.profile_picture);
    Value::Object(map)
}

fn skills_value(skills: &[SkillEntry]) -> Value {
    Value::Array(
        skills
            .iter()
            .map(|s| {
                let mut map = Map::new();
                map.insert("name".into(), Value::String(s.name.clone()));
                map.insert(
                    "proficiency".into(),
                    serde_json::to_value(s.proficiency).unwrap_or(Value::Null),
                );
                Value::Object(map)
            })
            .collect(),
    )
}

fn project_value(p: &Project) -> Value {
    let mut map = Map::new();
    map.insert("name".into(), Value::String(p.name.clone()));
    map.insert("description".into(), Value::String(p.description.clone()));
    map.insert(
        "technologies".into(),
        Value::Array(p.technologies.iter().cloned().map(Value::String).collect()),
    );
    opt_insert(&mut map, "url", &p.url);
    opt_insert(&mut map, "repoUrl", &p.repo_url);
    opt_insert(&mut map, "startDate", &p.start_date);
    opt_insert(&mut map, "endDate", &p.end_date);
    Value::Object(map)
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

fn string_field(map: &Map<String, Value>, key: &str) -> String {
    map.get(key)
        .and_then(Value::as_str)
        .map(str::to_owned)
        .unwrap_or_default()
}

fn opt_string_field(map: &Map<String, Value>, key: &str) -> Option<String> {
    map.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn decode_personal_info(value: Option<&Value>) -> PersonalInfo {
    match value {
        Some(Value::Object(map)) => PersonalInfo {
            full_name: opt_string_field(map, "fullName"),
            email: opt_string_field(map, "email"),
            bio: opt_string_field(map, "bio"),
            profile_picture: opt_string_field(map, "profilePicture"),
        },
        _ => PersonalInfo::default(),
    }
}

fn decode_skills(value: Option<&Value>) -> Vec<SkillEntry> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| SkillEntry {
            name: string_field(entry, "name"),
            proficiency: entry
                .get("proficiency")
                .and_then(Value::as_str)
                .map(Proficiency::parse_lenient)
                .unwrap_or_default(),
        })
        .collect()
}

fn decode_projects(value: Option<&Value>) -> Vec<Project> {
    let Some(Value::Array(items)) = value else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(Value::as_object)
        .map(|entry| Project {
            name: string_field(entry, "name"),
            description: string_field(entry, "description"),
            technologies: match entry.get("technologies") {
                Some(Value::Array(techs)) => techs
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_owned)
                    .collect(),
                _ => Vec::new(),
            },
            url: opt_string_field(entry, "url"),
            repo_url: opt_string_field(entry, "repoUrl"),
            start_date: opt_string_field(entry, "startDate"),
            end_date: opt_string_field(entry, "endDate"),
        })
        .collect()
}

/// Decode a current-version object. Each field is read independently and
/// falls back to its default when absent or of the wrong type.
pub(super) fn decode_current(map: &Map<String, Value>) -> PortfolioContent {
    PortfolioContent {
        personal_info: decode_personal_info(map.get("personalInfo")),
        education: string_field(map, "education"),
        work_experience: string_field(map, "workExperience"),
        awards: string_field(map, "awards"),
        volunteering: string_field(map, "volunteering"),
        languages: decode_skills(map.get("languages")),
        computer_skills: decode_skills(map.get("computerSkills")),
        projects: decode_projects(map.get("projects")),
        extra: map
            .iter()
            .filter(|(key, _)| {
                key.as_str() != SCHEMA_VERSION_KEY && !SCHEMA_FIELDS.contains(&key.as_str())
            })
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect(),
    }
}
