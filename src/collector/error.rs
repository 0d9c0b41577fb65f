/// Error type for `top` collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CollectError {
    /// Server unreachable or the session could not be established.
    Connection(String),
    /// The `top` command failed in transit or was rejected by the driver.
    Command(String),
    /// The reply did not have the expected shape.
    Decode(String),
    /// The server answered with `ok` other than 1.
    NotOk(String),
}

impl std::fmt::Display for CollectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CollectError::Connection(msg) => write!(f, "MongoDB connection failed: {}", msg),
            CollectError::Command(msg) => write!(f, "MongoDB top command failed: {}", msg),
            CollectError::Decode(msg) => write!(f, "cannot decode top reply: {}", msg),
            CollectError::NotOk(reply) => write!(f, "server refused top: {}", reply),
        }
    }
}

impl std::error::Error for CollectError {}
