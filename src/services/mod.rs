pub mod exam_writer;
pub mod prompt_builder;
pub mod suggestion_service;
pub mod templates;

pub use exam_writer::ExamWriter;
pub use prompt_builder::{build_prompt, PromptPair};
pub use suggestion_service::{fallback_plan, SuggestionService};
