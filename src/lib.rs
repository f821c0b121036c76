pub mod config;
pub mod document;
pub mod error;
pub mod output;
pub mod pipeline;
pub mod records;
pub mod render;
pub mod style;

// Re-export commonly used types for convenience.
pub use config::GeneratorConfig;
pub use error::{ResumeError, ResumeResult};
pub use pipeline::{generate, GenerateOptions, GeneratedResume};
pub use records::ResumeRecords;
pub use render::{ResumeBuilder, SectionKind};
pub use style::{RenderVariant, StyleConfig};
