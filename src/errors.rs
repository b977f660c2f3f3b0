use thiserror::Error;

/// Failures that abort a whole run.
///
/// Everything below the run boundary (missing fields, unmatched selectors,
/// pagination stalls) resolves to defaults or clean termination instead of
/// surfacing here.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// The embedded inventory widget could not be located on the page.
    /// This is the sole hard precondition: without the frame there is no
    /// data source to read.
    #[error("no embedded inventory frame matching host `{host}` found")]
    FrameNotFound { host: String },

    /// No WebDriver endpoint accepted a session
    #[error("failed to start a WebDriver session: {0}")]
    Connect(#[from] fantoccini::error::NewSessionError),

    /// The browser session failed underneath us
    #[error("browser session failed: {0}")]
    Session(#[from] fantoccini::error::CmdError),

    /// Writing or reading a result file failed
    #[error("result file error: {0}")]
    Io(#[from] std::io::Error),

    /// A result file could not be serialized or deserialized
    #[error("result serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}
