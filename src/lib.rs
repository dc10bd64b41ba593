// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app;
pub mod app_dirs;
pub mod catalog;
pub mod config;
pub mod error;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod view;

pub use catalog::{Catalog, ReferenceText};
pub use error::{DictationError, InputProblem};
pub use scoring::{compare, grade, normalize, score, word_count, Grade};
pub use session::{Phase, SessionState};
