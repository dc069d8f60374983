//! Phase-ordered script and stylesheet injector for a hosted document.
//!
//! Loads a fixed main bootstrap script, then two manifest-declared batches
//! ("vendor" and "internal"), guaranteeing that main completion gates vendor
//! loading and vendor completion gates internal loading. The hosting
//! document and the network transport are reached through the
//! [`HostDocument`] and [`ManifestFetcher`] traits; everything else — queue
//! bookkeeping, the one-shot completion signal, and the sequencing state
//! machine — lives here.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pageboot::{bootstrap, BootstrapConfig, HttpManifestFetcher};
//! # use pageboot::HostDocument;
//!
//! # async fn run(host: Arc<dyn HostDocument>) -> anyhow::Result<()> {
//! let config = BootstrapConfig::new("https://extension.invalid/assets");
//! let fetcher = Arc::new(HttpManifestFetcher::new());
//! bootstrap(host, fetcher, config).await?;
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod fetch;
pub mod host;
pub mod inject;
pub mod manifest;
pub mod phase;
pub mod sequencer;
pub mod stylesheet;

// Re-exports for convenience
pub use config::BootstrapConfig;
pub use error::{InjectError, Result};
pub use fetch::{HttpManifestFetcher, ManifestFetcher};
pub use host::{HostDocument, ScriptOutcome};
pub use inject::{Injector, MainAttrs, ScriptElement, ScriptKind, INJECTOR_MARKER};
pub use manifest::{Manifest, ManifestEntry};
pub use phase::{Phase, PhaseRegistry, SENTINEL};
pub use sequencer::{bootstrap, Sequencer, SequencerState};
pub use stylesheet::inject_stylesheets;
