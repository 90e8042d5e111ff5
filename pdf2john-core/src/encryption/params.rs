//! Typed view of a standard security handler encryption dictionary

use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::{ExtractError, ExtractResult};
use crate::source::EncryptionDictionary;
use std::fmt;

/// `/V` when the dictionary omits it
pub const DEFAULT_ALGORITHM: i64 = 0;
/// `/Length` in bits when the dictionary omits it
pub const DEFAULT_KEY_LENGTH: i64 = 40;

/// Role of a byte string used to verify a candidate password
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VerificationRole {
    /// `/U`
    User,
    /// `/O`
    Owner,
    /// `/UE`, revision 5 and later
    UserKeySeed,
    /// `/OE`, revision 5 and later
    OwnerKeySeed,
}

impl VerificationRole {
    /// Order in which entries are written to a hash descriptor
    pub const CANONICAL_ORDER: [VerificationRole; 4] = [
        VerificationRole::User,
        VerificationRole::Owner,
        VerificationRole::UserKeySeed,
        VerificationRole::OwnerKeySeed,
    ];

    /// Dictionary key holding this entry
    pub fn key(self) -> &'static str {
        match self {
            VerificationRole::User => "U",
            VerificationRole::Owner => "O",
            VerificationRole::UserKeySeed => "UE",
            VerificationRole::OwnerKeySeed => "OE",
        }
    }
}

impl fmt::Display for VerificationRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationEntry {
    role: VerificationRole,
    bytes: Vec<u8>,
}

impl VerificationEntry {
    pub fn new(role: VerificationRole, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            role,
            bytes: bytes.into(),
        }
    }

    pub fn role(&self) -> VerificationRole {
        self.role
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Permanent document identifier, the first `/ID` string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentIdentifier(Vec<u8>);

impl DocumentIdentifier {
    pub fn new(bytes: impl Into<Vec<u8>>) -> Self {
        Self(bytes.into())
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl From<Vec<u8>> for DocumentIdentifier {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// Scalar fields of the encryption dictionary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncryptionParameters {
    /// `/V`, the algorithm version
    pub algorithm: i64,
    /// `/Length`, key length in bits
    pub key_length: i64,
    /// `/P`, user access permission flags
    pub permissions: i32,
    /// `/R`, security handler revision
    pub revision: i64,
    /// `/EncryptMetadata`
    pub encrypt_metadata: bool,
}

impl EncryptionParameters {
    /// Read the parameters, failing when `/P` or `/R` is missing or invalid
    ///
    /// A `/V` or `/Length` of the wrong type is reported to `sink` and
    /// replaced by its default.
    pub fn from_dictionary(
        dict: &EncryptionDictionary,
        sink: &dyn DiagnosticSink,
    ) -> ExtractResult<Self> {
        let handler = SecurityHandler::new(dict);

        let algorithm = optional_integer(dict, "V", DEFAULT_ALGORITHM, sink);
        let key_length = optional_integer(dict, "Length", DEFAULT_KEY_LENGTH, sink);

        let permissions = dict
            .get("P")
            .and_then(|v| v.as_integer())
            .and_then(normalize_permissions)
            .ok_or(ExtractError::MalformedEncryption { field: "P" })?;

        let revision = dict
            .get("R")
            .and_then(|v| v.as_integer())
            .ok_or(ExtractError::MalformedEncryption { field: "R" })?;

        Ok(Self {
            algorithm,
            key_length,
            permissions,
            revision,
            encrypt_metadata: handler.encrypt_metadata(),
        })
    }
}

fn optional_integer(
    dict: &EncryptionDictionary,
    key: &'static str,
    default: i64,
    sink: &dyn DiagnosticSink,
) -> i64 {
    let Some(value) = dict.get(key) else {
        return default;
    };
    value.as_integer().unwrap_or_else(|| {
        sink.emit(Diagnostic::IgnoredField {
            field: key,
            value: value.to_string(),
            default,
        });
        default
    })
}

/// `/P` is a 32-bit field; some writers store it unsigned (`4294967292` for `-4`)
fn normalize_permissions(raw: i64) -> Option<i32> {
    i32::try_from(raw)
        .ok()
        .or_else(|| u32::try_from(raw).ok().map(|unsigned| unsigned as i32))
}

/// Standard security handler entries of an encryption dictionary
#[derive(Debug, Clone, Copy)]
pub struct SecurityHandler<'a> {
    dict: &'a EncryptionDictionary,
}

impl<'a> SecurityHandler<'a> {
    pub fn new(dict: &'a EncryptionDictionary) -> Self {
        Self { dict }
    }

    /// `/Filter`, normally `Standard`
    pub fn filter(&self) -> Option<&'a str> {
        self.dict.get("Filter").and_then(|v| v.as_name())
    }

    /// `/EncryptMetadata`, true when absent
    pub fn encrypt_metadata(&self) -> bool {
        self.dict
            .get("EncryptMetadata")
            .and_then(|v| v.as_bool())
            .unwrap_or(true)
    }

    /// The byte string stored for `role`, if present as a string
    pub fn entry(&self, role: VerificationRole) -> Option<VerificationEntry> {
        self.dict
            .get(role.key())
            .and_then(|v| v.as_bytes())
            .map(|bytes| VerificationEntry::new(role, bytes))
    }

    /// Present, non-empty entries in canonical order
    pub fn entries(&self) -> Vec<VerificationEntry> {
        VerificationRole::CANONICAL_ORDER
            .iter()
            .filter_map(|role| self.entry(*role))
            .filter(|entry| !entry.is_empty())
            .collect()
    }
}
