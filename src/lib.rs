// Library root
// -----------
// A small client for the KTH cover generator. The binary (`main.rs`)
// parses flags with `cli` and drives one request through these modules.
//
// Module responsibilities:
// - `config`: the cover fields and request settings, with their defaults.
// - `api`: the blocking HTTP client that posts the multipart form.
// - `error`: failure classes reported by the client and the writer.
// - `output`: binary-safe saving of the response body.
// - `ui`: stdout report, spinner and interactive field prompts.
// - `cli`: command-line flags and the run sequence.
// - `logging`: tracing subscriber setup.
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod output;
pub mod ui;

pub use api::{CoverClient, CoverResponse};
pub use config::{CoverParams, Language, RequestConfig};
pub use error::CoverError;
