//! Configuration: `pageforge.toml` loading, defaults, and API key lookup.

pub mod api_keys;
pub mod constants;
pub mod core;
pub mod loader;

pub use api_keys::{ApiKeySources, get_api_key, load_dotenv};
pub use self::core::{HttpClientConfig, ModelConfig, PromptConfig};
pub use loader::{ConfigManager, PageforgeConfig};
