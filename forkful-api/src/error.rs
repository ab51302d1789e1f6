#[derive(Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("Text must not be empty")]
    EmptyText,

    #[error("Null byte in string is not allowed {0:?}")]
    NullByteInString(String),
}
