//! # pdf2john
//!
//! Extracts password verification material from encrypted PDF documents and
//! encodes it as a hash line for John the Ripper's `PDF` format.
//!
//! ## Features
//!
//! - **Standard security handler**: revisions 2 through 6 (RC4, AES-128, AES-256)
//! - **Deterministic output**: fixed `/U`, `/O`, `/UE`, `/OE` field order
//! - **Batch friendly**: unencrypted or broken files never stop a batch
//! - **Pluggable input**: any [`DocumentHandle`]; [`PdfSource`] reads files with `lopdf`
//!
//! No decryption or key derivation happens here; the output is meant to be
//! attacked offline.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use pdf2john::{ExtractError, PdfHashExtractor};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = PdfHashExtractor::new();
//!
//! match extractor.extract_file("document.pdf") {
//!     Ok(extraction) => println!("{}", extraction.descriptor()),
//!     Err(ExtractError::NotEncrypted) => eprintln!("document.pdf is not encrypted"),
//!     Err(err) => return Err(err.into()),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Encoding without a file
//!
//! ```rust
//! use pdf2john::diagnostics::CollectingSink;
//! use pdf2john::encryption::{
//!     DocumentIdentifier, EncryptionParameters, VerificationEntry, VerificationRole,
//! };
//! use pdf2john::hash;
//!
//! let params = EncryptionParameters {
//!     algorithm: 1,
//!     key_length: 40,
//!     permissions: -4,
//!     revision: 2,
//!     encrypt_metadata: true,
//! };
//! let id = DocumentIdentifier::new(vec![0x01, 0x02]);
//! let entries = [VerificationEntry::new(VerificationRole::User, vec![0xff; 2])];
//!
//! let descriptor = hash::encode(&params, &id, &entries, &CollectingSink::new());
//! assert_eq!(descriptor.as_str(), "$pdf$1*2*40*-4*1*2*0102*2*ffff");
//! ```

pub mod batch;
pub mod diagnostics;
pub mod encryption;
pub mod error;
pub mod extractor;
pub mod hash;
pub mod source;

pub use batch::{BatchReport, FileOutcome};
pub use diagnostics::{CollectingSink, Diagnostic, DiagnosticSink, TracingSink};
pub use encryption::{
    DocumentIdentifier, EncryptionParameters, SecurityRevision, VerificationEntry,
    VerificationRole,
};
pub use error::{ExtractError, ExtractResult};
pub use extractor::{ExtractOptions, Extraction, PdfHashExtractor};
pub use hash::HashDescriptor;
pub use source::{DictValue, DocumentHandle, EncryptionDictionary, PdfSource};

/// Current version of pdf2john
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_string() {
        assert!(!VERSION.is_empty());
    }
}
