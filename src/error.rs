use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OptionsError {
    #[error("Password length {length} is out of range ({min}..={max})")]
    LengthOutOfRange { length: usize, min: usize, max: usize },
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown command: {0}")]
    Unknown(String),

    #[error("Missing value for {0}")]
    MissingValue(&'static str),

    #[error("Invalid length: {0}")]
    InvalidLength(String),

    #[error("No clipboard available")]
    NoClipboard,

    #[error(transparent)]
    Options(#[from] OptionsError),
}
