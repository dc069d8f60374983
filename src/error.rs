use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, InjectError>;

/// Errors raised while bootstrapping the hosted page.
#[derive(Error, Debug)]
pub enum InjectError {
    // Script injection errors
    #[error("script failed to load: {url}")]
    Load { url: String },

    #[error("document root never became available (gave up after {polls} polls)")]
    DocumentUnavailable { polls: u32 },

    // Manifest errors
    #[error("manifest fetch failed: {url}")]
    Fetch {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("manifest fetch returned status {status}: {url}")]
    FetchStatus { url: String, status: u16 },

    #[error("manifest body failed to parse: {url}")]
    Parse {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    // Sequencer errors
    #[error("main completion signal dropped before firing")]
    SignalLost,

    #[error("background fetch task failed")]
    Join(#[from] tokio::task::JoinError),

    // Configuration errors
    #[error("configuration invalid: {0}")]
    Configuration(String),
}

impl InjectError {
    /// Create a load error for the given script URL.
    pub fn load(url: impl Into<String>) -> Self {
        Self::Load { url: url.into() }
    }

    /// Create a status error for a manifest URL.
    pub fn fetch_status(url: impl Into<String>, status: u16) -> Self {
        Self::FetchStatus {
            url: url.into(),
            status,
        }
    }
}
