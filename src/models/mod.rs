pub mod resume;
pub mod skills;

pub use resume::{EducationEntry, ExperienceEntry, ProjectEntry, ResumeDocument, SectionKind};
pub use skills::{CategorySpec, SchemaKind, SkillCategory, SkillSchema, SkillSet};
