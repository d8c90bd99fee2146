//! # pageforge-core - Runtime for Pageforge
//!
//! `pageforge-core` turns a short description of a real-estate community into
//! a streamed, SEO-oriented Markdown page generated by Gemini, and renders that
//! page into structured blocks as the text arrives.
//!
//! ## Highlights
//!
//! - **Streaming renderer**: a pure, total, line-oriented Markdown renderer
//!   that is re-run on the whole buffer after every chunk.
//! - **Request lifecycle**: a content accumulator that owns the buffer, the
//!   rendered blocks and the request state, with change notification for the
//!   presentation layer.
//! - **Gemini streaming client**: server-sent-events processing over
//!   `reqwest`, with web-search grounding and read timeouts.
//! - **Configuration-first**: model, client and prompt settings come from
//!   `pageforge.toml`, with the API key taken from the environment.
//!
//! ## Architecture Overview
//!
//! - `markdown/`: block renderer and inline span tokenizer.
//! - `session/`: request state, content accumulator and the submit flow.
//! - `gateway`: the [`ContentSource`] seam and prompt-to-stream forwarding.
//! - `gemini/`: API models, HTTP client and the SSE streaming processor.
//! - `prompts/`: the system instruction and per-input user context.
//! - `config/`: configuration loader, defaults and API key lookup.
//!
//! ## Quickstart
//!
//! ```rust,ignore
//! use pageforge_core::{
//!     Client, ContentAccumulator, ContentGateway, InputRecord, PromptBuilder, run_generation,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), anyhow::Error> {
//!     let api_key = std::env::var("GEMINI_API_KEY")?;
//!     let client = Client::new(api_key, "gemini-2.5-flash".into())?;
//!     let gateway = ContentGateway::new(client, PromptBuilder::new("https://example.com", true));
//!
//!     let mut accumulator = ContentAccumulator::with_observer(|view| {
//!         eprintln!("{} blocks so far", view.blocks.len());
//!     });
//!     let input = InputRecord::details("Willow Creek Estates", "Pleasantville", "CA");
//!     let state = run_generation(&gateway, &input, &mut accumulator).await;
//!
//!     println!("{state:?}\n{}", accumulator.buffer());
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod gateway;
pub mod gemini;
pub mod input;
pub mod markdown;
pub mod prompts;
pub mod session;

// Re-exports for convenience
pub use config::{ConfigManager, PageforgeConfig};
pub use gateway::{ContentGateway, ContentSource, GatewayError};
pub use gemini::{Client, StreamSummary, StreamingError};
pub use input::{InputError, InputRecord};
pub use markdown::{ContentBlock, InlineSpan, parse_inline, render, settled_block_count};
pub use prompts::{PromptBuilder, PromptRequest};
pub use session::{ContentAccumulator, ContentView, RequestState, run_generation};
