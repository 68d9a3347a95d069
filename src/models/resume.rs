use serde::Serialize;

use crate::error::Result;
use crate::models::skills::SkillSet;

/// The four logical resume sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionKind {
    Education,
    Experience,
    Projects,
    Skills,
}

impl SectionKind {
    /// All sections in output order.
    pub const ALL: [Self; 4] = [
        Self::Education,
        Self::Experience,
        Self::Projects,
        Self::Skills,
    ];

    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Education => "education",
            Self::Experience => "experience",
            Self::Projects => "projects",
            Self::Skills => "skills",
        }
    }
}

/// One degree or school.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EducationEntry {
    pub institution: String,
    pub location: String,
    pub qualification: String,
    pub duration: String,
    pub details: Vec<String>,
}

/// One position held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExperienceEntry {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: Vec<String>,
}

/// One project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectEntry {
    pub name: String,
    pub date: String,
    pub stack: Vec<String>,
    pub description: Vec<String>,
}

/// The JSON document consumed by the portfolio front end.
///
/// All four keys are always serialized, empty when the section was absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ResumeDocument {
    pub education: Vec<EducationEntry>,
    pub experience: Vec<ExperienceEntry>,
    pub projects: Vec<ProjectEntry>,
    pub skills: SkillSet,
}

impl ResumeDocument {
    /// Pretty-printed JSON (2-space indent) with a trailing newline.
    pub fn to_json_pretty(&self) -> Result<String> {
        let mut json = serde_json::to_string_pretty(self)?;
        json.push('\n');
        Ok(json)
    }

    /// Number of records or categories in a section.
    #[must_use]
    pub fn count(&self, section: SectionKind) -> usize {
        match section {
            SectionKind::Education => self.education.len(),
            SectionKind::Experience => self.experience.len(),
            SectionKind::Projects => self.projects.len(),
            SectionKind::Skills => self.skills.len(),
        }
    }
}
