use thiserror::Error;

/// Failure of a single remote call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No response was obtained (connect failure, timeout, broken body stream).
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
    /// The remote answered and refused the request.
    #[error("request rejected ({code}): {message}")]
    Domain { message: String, code: i64 },
    /// The remote answered with something we could not read.
    #[error("unexpected response shape: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn domain(message: impl Into<String>, code: i64) -> Self {
        ApiError::Domain {
            message: message.into(),
            code,
        }
    }
}

#[derive(Debug, Error)]
pub enum FleetError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("no waypoint in {system} matches {criterion}")]
    NoCandidates { system: String, criterion: String },
    #[error("waypoint {0} is missing from its system listing")]
    UnknownWaypoint(String),
    #[error("no shipyards found in system {system}")]
    NoShipyards { system: String },
    #[error("configuration error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
