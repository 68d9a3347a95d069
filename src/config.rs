use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{CvError, Result};
use crate::models::skills::{CategorySpec, SchemaKind};

/// Config filename, looked up in the project root.
const CONFIG_FILE: &str = "cvparse.toml";
/// Default LaTeX source, relative to the project root.
const DEFAULT_INPUT: &str = "data/cv.tex";
/// Default JSON output, relative to the project root.
const DEFAULT_OUTPUT: &str = "data/portfolio-data.json";

/// Project-level configuration resolved from the working directory.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory that relative paths are resolved against.
    pub project_root: PathBuf,
    /// Path to the config file.
    pub config_path: PathBuf,
    /// User settings loaded from cvparse.toml.
    pub settings: UserSettings,
}

/// User-configurable settings from cvparse.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserSettings {
    /// Input and output locations.
    pub paths: PathSettings,
    /// Section delimiter names.
    pub sections: SectionSettings,
    /// Record and item marker command names.
    pub markers: MarkerSettings,
    /// Education-specific post-processing.
    pub education: EducationSettings,
    /// Skill schema selection.
    pub skills: SkillSettings,
}

/// Input/output path settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    /// LaTeX source path (relative to the project root unless absolute).
    pub input: String,
    /// JSON output path (relative to the project root unless absolute).
    pub output: String,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            input: DEFAULT_INPUT.into(),
            output: DEFAULT_OUTPUT.into(),
        }
    }
}

/// Names used inside `%-----NAME-----` delimiter comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSettings {
    pub education: String,
    pub experience: String,
    pub projects: String,
    pub skills: String,
}

impl Default for SectionSettings {
    fn default() -> Self {
        Self {
            education: "EDUCATION".into(),
            experience: "EXPERIENCE".into(),
            projects: "PROJECTS".into(),
            skills: "SKILLS".into(),
        }
    }
}

/// Command names (without the leading backslash) that introduce records and items.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerSettings {
    pub education: String,
    pub experience: String,
    pub project: String,
    pub item: String,
}

impl Default for MarkerSettings {
    fn default() -> Self {
        Self {
            education: "resumeSubheading".into(),
            experience: "resumeSubheading".into(),
            project: "resumeProjectHeading".into(),
            item: "resumeItem".into(),
        }
    }
}

/// Education settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EducationSettings {
    /// Drop detail lines that only report grades ("Year 1: 2:1", "89%").
    pub filter_grades: bool,
}

/// Skill schema settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillSettings {
    /// Which fixed schema to apply.
    pub schema: SchemaKind,
    /// Categories for the `custom` schema.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<CategorySpec>,
}

impl Config {
    /// Create config for a given project root.
    pub fn new(project_root: impl Into<PathBuf>) -> Self {
        let project_root = project_root.into();
        let config_path = project_root.join(CONFIG_FILE);

        // Try to load settings from cvparse.toml
        let settings = Self::load_settings(&config_path).unwrap_or_default();

        Self {
            project_root,
            config_path,
            settings,
        }
    }

    /// Create config from the current working directory.
    pub fn from_cwd() -> Result<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| CvError::Config(format!("cannot get cwd: {e}")))?;
        Ok(Self::new(cwd))
    }

    /// Load settings from cvparse.toml if it exists.
    fn load_settings(config_path: &Path) -> Option<UserSettings> {
        if !config_path.exists() {
            return None;
        }
        let content = std::fs::read_to_string(config_path).ok()?;
        match toml::from_str(&content) {
            Ok(settings) => Some(settings),
            Err(e) => {
                tracing::warn!(path = %config_path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Write the current settings to cvparse.toml. Never overwrites.
    pub fn save_settings(&self) -> Result<()> {
        if self.config_path.exists() {
            return Err(CvError::OutputExists {
                path: self.config_path.to_string_lossy().into_owned(),
            });
        }
        let content = toml::to_string_pretty(&self.settings)
            .map_err(|e| CvError::Config(format!("failed to serialize settings: {e}")))?;
        std::fs::write(&self.config_path, content)?;
        Ok(())
    }

    /// Resolved input path.
    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.resolve(&self.settings.paths.input)
    }

    /// Resolved output path.
    #[must_use]
    pub fn output_path(&self) -> PathBuf {
        self.resolve(&self.settings.paths.output)
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let p = Path::new(path);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            self.project_root.join(p)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn config_new_sets_paths() {
        let cfg = Config::new("/tmp/site");
        assert_eq!(cfg.project_root, PathBuf::from("/tmp/site"));
        assert_eq!(cfg.config_path, PathBuf::from("/tmp/site/cvparse.toml"));
        assert_eq!(cfg.input_path(), PathBuf::from("/tmp/site/data/cv.tex"));
        assert_eq!(
            cfg.output_path(),
            PathBuf::from("/tmp/site/data/portfolio-data.json")
        );
    }

    #[test]
    fn absolute_paths_are_kept() {
        let mut cfg = Config::new("/tmp/site");
        cfg.settings.paths.input = "/srv/cv/main.tex".into();
        assert_eq!(cfg.input_path(), PathBuf::from("/srv/cv/main.tex"));
    }

    #[test]
    fn default_settings() {
        let settings = UserSettings::default();

        assert_eq!(settings.sections.education, "EDUCATION");
        assert_eq!(settings.sections.skills, "SKILLS");
        assert_eq!(settings.markers.education, "resumeSubheading");
        assert_eq!(settings.markers.project, "resumeProjectHeading");
        assert_eq!(settings.markers.item, "resumeItem");
        assert!(!settings.education.filter_grades);
        assert_eq!(settings.skills.schema, SchemaKind::Grouped);
        assert!(settings.skills.categories.is_empty());
    }

    #[test]
    fn save_and_load_settings() {
        let tmp = TempDir::new().unwrap();
        let mut cfg = Config::new(tmp.path());

        cfg.settings.paths.input = "cv/main.tex".into();
        cfg.settings.education.filter_grades = true;
        cfg.settings.skills.schema = SchemaKind::Technical;

        cfg.save_settings().unwrap();
        assert!(cfg.config_path.exists());

        let cfg2 = Config::new(tmp.path());
        assert_eq!(cfg2.settings.paths.input, "cv/main.tex");
        assert!(cfg2.settings.education.filter_grades);
        assert_eq!(cfg2.settings.skills.schema, SchemaKind::Technical);
    }

    #[test]
    fn save_refuses_to_overwrite() {
        let tmp = TempDir::new().unwrap();
        let cfg = Config::new(tmp.path());
        cfg.save_settings().unwrap();

        let err = cfg.save_settings().unwrap_err();
        assert!(matches!(err, CvError::OutputExists { .. }));
    }

    #[test]
    fn partial_config_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(
            tmp.path().join("cvparse.toml"),
            "[sections]\nskills = \"TECHNICAL SKILLS\"\n\n[skills]\nschema = \"custom\"\ncategories = [{ label = \"Cloud Platforms\" }]\n",
        )
        .unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings.sections.skills, "TECHNICAL SKILLS");
        assert_eq!(cfg.settings.sections.education, "EDUCATION");
        assert_eq!(cfg.settings.skills.schema, SchemaKind::Custom);
        assert_eq!(cfg.settings.skills.categories.len(), 1);
        assert_eq!(cfg.settings.skills.categories[0].label, "Cloud Platforms");
        assert!(cfg.settings.skills.categories[0].key.is_none());
    }

    #[test]
    fn load_invalid_config_uses_defaults() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("cvparse.toml"), "invalid toml {{{{").unwrap();

        let cfg = Config::new(tmp.path());
        assert_eq!(cfg.settings.paths.input, "data/cv.tex");
        assert!(!cfg.settings.education.filter_grades);
    }
}
