use thiserror::Error;

use crate::marker::MarkerId;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CompassError {
    #[error("invalid compass configuration: {field} is out of range, got {value}")]
    ConfigurationInvalid { field: &'static str, value: f32 },

    #[error("marker `{0}` has no target")]
    TargetMissing(String),

    #[error("a marker with key `{0}` is already registered")]
    DuplicateKey(String),

    #[error("no marker registered for {0:?}")]
    UnknownMarker(MarkerId),
}

pub type Result<T> = std::result::Result<T, CompassError>;
