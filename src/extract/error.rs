use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("Failed to parse ZIP archive: {0}")]
    ZipParseFailed(String),

    #[error("Invalid path in archive: {0}")]
    InvalidPath(String),

    #[error("Entry too large: {size} bytes (max: {max})")]
    EntryTooLarge { size: u64, max: u64 },

    #[error("Archive too large: {size} bytes (max: {max})")]
    ArchiveTooLarge { size: u64, max: u64 },

    #[error("Missing archive entry: {0}")]
    MissingEntry(String),

    #[error("Malformed XML in {entry}: {message}")]
    MalformedXml { entry: String, message: String },

    #[error("Failed to extract PDF text: {0}")]
    PdfFailed(String),
}
