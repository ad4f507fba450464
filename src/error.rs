use thiserror::Error;

/// Why a submitted guess was refused. The session is left untouched and the
/// caller keeps the input for correction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("all digits must be unique")]
    DuplicateDigits,
    #[error("expected {expected} digits, got {actual}")]
    WrongLength { expected: usize, actual: usize },
    #[error("'{0}' is not a digit")]
    NonDigit(char),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("code length {length} exceeds the ten available digits")]
    LengthExceedsDigitSpace { length: usize },
    #[error("secret has {actual} digits, difficulty requires {expected}")]
    SecretLengthMismatch { expected: usize, actual: usize },
    #[error("unknown difficulty '{0}'")]
    UnknownDifficulty(String),
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not encode stored value: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("session is not accepting moves")]
    NotActive,
}

#[derive(Debug, Error)]
pub enum GameError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
