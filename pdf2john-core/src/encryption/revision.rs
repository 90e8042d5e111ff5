//! Standard security handler revisions

use crate::diagnostics::{Diagnostic, DiagnosticSink};

/// Entry length assumed for revisions newer than the ones listed here
pub const FALLBACK_ENTRY_LENGTH: usize = 48;

/// Revisions of the standard security handler
///
/// Revision 5 extended `/O` and `/U` to 48 bytes: a 32 byte verification
/// hash, an 8 byte validation salt and an 8 byte key salt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SecurityRevision {
    /// RC4, 40-bit keys
    Rc4Basic,
    /// RC4, keys up to 128 bits
    Rc4Extended,
    /// RC4 or AES-128 through crypt filters
    Rc4OrAes128,
    /// AES-256, deprecated Adobe extension level 3
    AesR5,
    /// AES-256, ISO 32000-2
    Aes256,
}

impl SecurityRevision {
    pub fn from_number(revision: i64) -> Option<Self> {
        match revision {
            2 => Some(SecurityRevision::Rc4Basic),
            3 => Some(SecurityRevision::Rc4Extended),
            4 => Some(SecurityRevision::Rc4OrAes128),
            5 => Some(SecurityRevision::AesR5),
            6 => Some(SecurityRevision::Aes256),
            _ => None,
        }
    }

    pub fn number(self) -> i64 {
        match self {
            SecurityRevision::Rc4Basic => 2,
            SecurityRevision::Rc4Extended => 3,
            SecurityRevision::Rc4OrAes128 => 4,
            SecurityRevision::AesR5 => 5,
            SecurityRevision::Aes256 => 6,
        }
    }

    /// Byte length of the `/O` and `/U` entries for this revision
    pub fn entry_length(self) -> usize {
        match self {
            SecurityRevision::Rc4Basic
            | SecurityRevision::Rc4Extended
            | SecurityRevision::Rc4OrAes128 => 32,
            SecurityRevision::AesR5 | SecurityRevision::Aes256 => 48,
        }
    }

    /// Maximum verification entry length for a raw `/R` value
    ///
    /// Unrecognized revisions are assumed to use the long format; a
    /// [`Diagnostic::UnknownRevision`] is emitted to `sink`.
    pub fn max_entry_length(revision: i64, sink: &dyn DiagnosticSink) -> usize {
        match Self::from_number(revision) {
            Some(known) => known.entry_length(),
            None => {
                sink.emit(Diagnostic::UnknownRevision {
                    revision,
                    fallback: FALLBACK_ENTRY_LENGTH,
                });
                FALLBACK_ENTRY_LENGTH
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::CollectingSink;

    #[test]
    fn test_known_revisions() {
        let sink = CollectingSink::new();
        for (revision, expected) in [(2, 32), (3, 32), (4, 32), (5, 48), (6, 48)] {
            assert_eq!(
                SecurityRevision::max_entry_length(revision, &sink),
                expected,
                "revision {revision}"
            );
        }
        assert!(sink.is_empty());
    }

    #[test]
    fn test_unknown_revision_falls_back_with_warning() {
        for revision in [-1, 0, 1, 7, 99] {
            let sink = CollectingSink::new();
            assert_eq!(SecurityRevision::max_entry_length(revision, &sink), 48);
            assert_eq!(
                sink.diagnostics(),
                vec![Diagnostic::UnknownRevision {
                    revision,
                    fallback: 48
                }]
            );
        }
    }

    #[test]
    fn test_number_round_trip() {
        for number in 2..=6 {
            let revision = SecurityRevision::from_number(number).unwrap();
            assert_eq!(revision.number(), number);
        }
    }
}
