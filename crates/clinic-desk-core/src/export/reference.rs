//! Short content digests printed on exported documents.

use sha2::{Digest, Sha256};

use super::ExportResult;
use crate::registry::Record;

/// Length of a document reference, in hex digits.
pub const REFERENCE_LEN: usize = 12;

/// Reference for a record as currently stored.
///
/// First [`REFERENCE_LEN`] uppercase hex digits of the SHA-256 of the
/// record's JSON. Any change to the record changes its reference.
pub fn document_reference<R: Record>(record: &R) -> ExportResult<String> {
    let payload = serde_json::to_string(record)?;
    Ok(hash_reference(payload.as_bytes()))
}

fn hash_reference(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let mut digest = hex::encode_upper(hasher.finalize());
    digest.truncate(REFERENCE_LEN);
    digest
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Patient;

    #[test]
    fn test_known_digest() {
        // SHA-256("abc") = BA7816BF8F01CFEA...
        assert_eq!(hash_reference(b"abc"), "BA7816BF8F01");
    }

    #[test]
    fn test_reference_tracks_content() {
        let mut patient = Patient::new("Traoré".into(), "Awa".into(), "0701".into());
        patient.id = "1".into();
        let first = document_reference(&patient).unwrap();
        assert_eq!(first.len(), REFERENCE_LEN);
        assert_eq!(document_reference(&patient.clone()).unwrap(), first);

        patient.phone = "0702".into();
        assert_ne!(document_reference(&patient).unwrap(), first);
    }
}
