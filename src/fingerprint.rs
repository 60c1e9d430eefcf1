//! Content fingerprint of an interlink index.
//!
//! The fingerprint is the SHA-256 of the canonical export
//! ([`crate::load::export_json`]), so it depends only on the index contents
//! and order, never on how the data was split across files or formatted.
//! Generated pages carry it as `<meta name="interlinks-version">`, which makes
//! it easy to tell whether a deployed site matches the data it was built from.

use crate::index::InterlinkIndex;
use crate::load;
use sha2::{Digest, Sha256};

/// SHA-256 of the canonical export, as lowercase hex.
pub fn index_digest(index: &InterlinkIndex) -> Result<String, serde_json::Error> {
    let json = load::export_json(index)?;
    Ok(format!("{:x}", Sha256::digest(json.as_bytes())))
}

/// First 12 hex characters of [`index_digest`], for display.
pub fn short_digest(digest: &str) -> &str {
    digest.get(..12).unwrap_or(digest)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::InterlinkIndex;
    use crate::load::load_site;
    use crate::test_helpers::*;

    #[test]
    fn digest_is_hex_sha256() {
        let digest = index_digest(&fixture_index()).unwrap();
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn digest_is_stable_across_reloads() {
        let tmp = setup_fixtures();
        let (_, first) = load_site(tmp.path()).unwrap();
        let (_, second) = load_site(tmp.path()).unwrap();
        assert_eq!(
            index_digest(&first.index).unwrap(),
            index_digest(&second.index).unwrap()
        );
    }

    #[test]
    fn digest_changes_with_content() {
        let index = fixture_index();
        let mut entries: Vec<_> = index.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries[0].1.themes.push("mercy".to_string());
        let changed = InterlinkIndex::from_entries(entries).unwrap();
        assert_ne!(
            index_digest(&index).unwrap(),
            index_digest(&changed).unwrap()
        );
    }

    #[test]
    fn digest_depends_on_order() {
        let index = fixture_index();
        let mut entries: Vec<_> = index.iter().map(|(k, v)| (k.clone(), v.clone())).collect();
        entries.reverse();
        let reversed = InterlinkIndex::from_entries(entries).unwrap();
        assert_ne!(
            index_digest(&index).unwrap(),
            index_digest(&reversed).unwrap()
        );
    }

    #[test]
    fn short_digest_truncates() {
        assert_eq!(short_digest("0123456789abcdef"), "0123456789ab");
        assert_eq!(short_digest("abc"), "abc");
    }
}
