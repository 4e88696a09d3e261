// SPDX-License-Identifier: MPL-2.0
use std::fmt;

use crate::domain::{ChannelKey, Kind};

#[derive(Debug, Clone)]
pub enum Error {
    /// No visual resource is registered for a kind and the standard fallback
    /// is missing too. The affected request is dropped.
    ResourceUnavailable(Kind),

    /// A request targeted a channel the dispatcher was not configured with.
    InvalidChannel(ChannelKey),

    /// Configuration file could not be read or written.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ResourceUnavailable(kind) => {
                write!(f, "No visual resource registered for kind: {}", kind)
            }
            Error::InvalidChannel(channel) => {
                write!(f, "Unconfigured channel: {}", channel)
            }
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
