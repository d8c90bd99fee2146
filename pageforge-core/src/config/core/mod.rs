pub mod client;
pub mod model;
pub mod prompt;

pub use client::HttpClientConfig;
pub use model::ModelConfig;
pub use prompt::PromptConfig;
