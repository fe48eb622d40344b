//! Summarization: prompt building and the model invoker

mod invoker;
mod prompt;

pub use invoker::SummarizationInvoker;
pub use prompt::PromptBuilder;
