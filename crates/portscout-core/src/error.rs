use thiserror::Error;

/// All the ways things can go wrong in PortScout
///
/// Note that most failures never surface through this type: feed and session
/// errors are downgraded to "feature unavailable" at the operation that owns
/// them, and only show up in the logs.
#[derive(Error, Debug)]
pub enum Error {
    #[error("feed error: {0}")]
    Feed(String),

    #[error("session state error: {0}")]
    Session(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
