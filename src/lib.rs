pub mod balance;
pub mod completions;
pub mod diagnostics;
pub mod lookup;
pub mod paths;
pub mod settings;

// Re-export commonly used types
pub use completions::{Completion, CompletionIndex, QueryContext};
pub use settings::Settings;
