use std::error::Error as StdError;

#[derive(Debug)]
pub enum Error {
    CVError(opencv::Error),
    ModelError(ort::Error),
    ConfigError(config::ConfigError),
    /// Camera could not be opened or stopped delivering frames.
    DeviceUnavailable(String),
    /// Landmarks were requested from a frame without a hand.
    NoHandDetected,
    AudioEndpointUnavailable(String),
    AudioError(String),
    InvalidModelIOError(String),
    UnknownError(Box<dyn StdError + Send + Sync>),
}

impl Error {
    pub fn as_unknown_error<E>(err: E) -> Self
    where
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        Self::UnknownError(err.into())
    }
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::CVError(err) => write!(f, "opencv error: {}", err),
            Error::ModelError(err) => write!(f, "model error: {}", err),
            Error::ConfigError(err) => write!(f, "configuration error: {}", err),
            Error::DeviceUnavailable(msg) => write!(f, "camera device unavailable: {}", msg),
            Error::NoHandDetected => write!(f, "no hand detected"),
            Error::AudioEndpointUnavailable(msg) => {
                write!(f, "audio endpoint unavailable: {}", msg)
            }
            Error::AudioError(msg) => write!(f, "audio error: {}", msg),
            Error::InvalidModelIOError(msg) => write!(f, "invalid model io: {}", msg),
            Error::UnknownError(err) => write!(f, "unknown error: {}", err),
        }
    }
}

impl StdError for Error {}

impl From<opencv::Error> for Error {
    fn from(value: opencv::Error) -> Self {
        Self::CVError(value)
    }
}

impl From<ort::Error> for Error {
    fn from(value: ort::Error) -> Self {
        Self::ModelError(value)
    }
}

impl From<config::ConfigError> for Error {
    fn from(value: config::ConfigError) -> Self {
        Self::ConfigError(value)
    }
}
