use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Document is not encrypted")]
    NotEncrypted,

    #[error("Malformed encryption dictionary: missing or invalid /{field}")]
    MalformedEncryption { field: &'static str },

    #[error("Parse error: {0}")]
    SourceParse(String),
}

impl ExtractError {
    /// Whether a batch caller should skip the document and keep going
    /// without treating it as a read failure
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ExtractError::NotEncrypted)
    }
}

impl From<lopdf::Error> for ExtractError {
    fn from(err: lopdf::Error) -> Self {
        ExtractError::SourceParse(err.to_string())
    }
}

pub type ExtractResult<T> = std::result::Result<T, ExtractError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Error as IoError, ErrorKind};

    #[test]
    fn test_extract_error_display() {
        let error = ExtractError::MalformedEncryption { field: "P" };
        assert_eq!(
            error.to_string(),
            "Malformed encryption dictionary: missing or invalid /P"
        );
        assert_eq!(
            ExtractError::NotEncrypted.to_string(),
            "Document is not encrypted"
        );
    }

    #[test]
    fn test_extract_error_from_io_error() {
        let io_error = IoError::new(ErrorKind::NotFound, "file not found");
        let error = ExtractError::from(io_error);

        match error {
            ExtractError::Io(ref err) => assert_eq!(err.kind(), ErrorKind::NotFound),
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_only_not_encrypted_is_recoverable() {
        assert!(ExtractError::NotEncrypted.is_recoverable());
        assert!(!ExtractError::MalformedEncryption { field: "R" }.is_recoverable());
        assert!(!ExtractError::SourceParse("bad xref".to_string()).is_recoverable());
        assert!(!ExtractError::from(IoError::new(ErrorKind::Other, "boom")).is_recoverable());
    }

    #[test]
    fn test_error_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ExtractError>();
    }
}
