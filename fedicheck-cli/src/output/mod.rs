//! Output formatting for CLI.

mod json;
mod text;

pub use json::{AuthOutput, JsonFormatter, SmokeOutput, StepOutput};
pub use text::TextFormatter;
#[cfg(test)]
mod tests;
