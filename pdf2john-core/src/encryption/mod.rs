//! Standard security handler metadata
//!
//! Reads the fields of an `/Encrypt` dictionary that a password cracker needs
//! (ISO 32000-1 section 7.6.3, ISO 32000-2 section 7.6.4).

mod params;
mod revision;

pub use params::{
    DocumentIdentifier, EncryptionParameters, SecurityHandler, VerificationEntry,
    VerificationRole, DEFAULT_ALGORITHM, DEFAULT_KEY_LENGTH,
};
pub use revision::{SecurityRevision, FALLBACK_ENTRY_LENGTH};
