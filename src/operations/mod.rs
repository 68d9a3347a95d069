//! Operations behind the CLI commands.

pub mod extract;
pub mod sections;

pub use extract::ExtractOutput;
pub use sections::{list_sections, SectionInfo, SectionsResult};
