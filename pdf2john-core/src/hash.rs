//! Hash descriptor encoding
//!
//! Produces the line John the Ripper's PDF format reads:
//!
//! ```text
//! $pdf$<V>*<R>*<Length>*<P>*<EncryptMetadata>*<idLen>*<idHex>[*<len>*<hex>]...
//! ```
//!
//! Verification entries follow in the order `/U`, `/O`, `/UE`, `/OE`. Absent
//! or empty entries contribute no fields, so the field count depends on the
//! handler revision.

use crate::diagnostics::DiagnosticSink;
use crate::encryption::{
    DocumentIdentifier, EncryptionParameters, SecurityRevision, VerificationEntry,
    VerificationRole,
};
use std::fmt;

/// Tag opening every descriptor
pub const HASH_PREFIX: &str = "$pdf$";

/// Separator between descriptor fields
pub const FIELD_SEPARATOR: char = '*';

/// Fields before the first verification entry
pub const HEADER_FIELD_COUNT: usize = 7;

/// A finished hash line, without trailing separator or newline
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HashDescriptor {
    value: String,
    entry_count: usize,
}

impl HashDescriptor {
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Number of length/hex pairs after the header fields
    pub fn entry_count(&self) -> usize {
        self.entry_count
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.value.split(FIELD_SEPARATOR)
    }

    pub fn field_count(&self) -> usize {
        HEADER_FIELD_COUNT + 2 * self.entry_count
    }
}

impl fmt::Display for HashDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Encode extracted material into a hash descriptor
///
/// Entries longer than the revision's bound are cut to the bound. When
/// `entries` holds several non-empty entries for one role, the first wins.
pub fn encode(
    params: &EncryptionParameters,
    id: &DocumentIdentifier,
    entries: &[VerificationEntry],
    sink: &dyn DiagnosticSink,
) -> HashDescriptor {
    let max_entry_length = SecurityRevision::max_entry_length(params.revision, sink);

    let mut fields = vec![
        format!("{HASH_PREFIX}{}", params.algorithm),
        params.revision.to_string(),
        params.key_length.to_string(),
        params.permissions.to_string(),
        u8::from(params.encrypt_metadata).to_string(),
        id.len().to_string(),
        id.to_hex(),
    ];

    let mut entry_count = 0;
    for role in VerificationRole::CANONICAL_ORDER {
        let Some(entry) = entries
            .iter()
            .find(|entry| entry.role() == role && !entry.is_empty())
        else {
            continue;
        };

        let bytes = &entry.bytes()[..entry.len().min(max_entry_length)];
        fields.push(bytes.len().to_string());
        fields.push(hex::encode(bytes));
        entry_count += 1;
    }

    HashDescriptor {
        value: fields.join("*"),
        entry_count,
    }
}
