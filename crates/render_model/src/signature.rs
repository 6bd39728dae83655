//! Signature overlays for instance rendering

use crate::Result;
use doc_model::BlockId;
use expr_engine::parse_timestamp;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

const SIGNED_AT_PATTERN: &str = "%d/%m/%Y %H:%M";

/// A captured signature, matched to a signature block by id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureArtifact {
    pub block_id: BlockId,
    pub signature_png_url: String,
    pub signature_hash: String,
    /// Wall-clock signing time, ISO-8601
    pub signed_at_local: String,
    /// Zone name the wall-clock time was recorded in
    #[serde(default)]
    pub tz: String,
}

impl SignatureArtifact {
    /// Parse a JSON array of artifacts
    pub fn list_from_json(json: &str) -> Result<Vec<SignatureArtifact>> {
        Ok(serde_json::from_str(json)?)
    }

    /// Signing time as `DD/MM/YYYY HH:MM (tz)`.
    ///
    /// An unparseable time is shown as given.
    pub fn signed_at_display(&self) -> String {
        let when = match parse_timestamp(&self.signed_at_local) {
            Ok(dt) => dt.format(SIGNED_AT_PATTERN).to_string(),
            Err(_) => self.signed_at_local.trim().to_string(),
        };
        let tz = self.tz.trim();
        if tz.is_empty() {
            when
        } else {
            format!("{when} ({tz})")
        }
    }

    /// First `len` characters of the hash, with an ellipsis if cut
    pub fn short_hash(&self, len: usize) -> String {
        let hash = self.signature_hash.trim();
        if hash.chars().count() <= len {
            return hash.to_string();
        }
        let mut out: String = hash.chars().take(len).collect();
        out.push('…');
        out
    }
}

/// Artifacts indexed by block id. The first artifact for a block wins.
#[derive(Debug, Default)]
pub struct SignatureOverlay<'a> {
    by_block: HashMap<&'a BlockId, &'a SignatureArtifact>,
}

impl<'a> SignatureOverlay<'a> {
    pub fn new(artifacts: &'a [SignatureArtifact]) -> Self {
        let mut by_block = HashMap::with_capacity(artifacts.len());
        for artifact in artifacts {
            by_block.entry(&artifact.block_id).or_insert(artifact);
        }
        Self { by_block }
    }

    pub fn get(&self, block_id: &BlockId) -> Option<&'a SignatureArtifact> {
        self.by_block.get(block_id).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.by_block.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn artifact(id: &str, hash: &str) -> SignatureArtifact {
        SignatureArtifact {
            block_id: BlockId::from(id),
            signature_png_url: format!("https://files.example.com/{id}.png"),
            signature_hash: hash.into(),
            signed_at_local: "2024-03-05T14:07:00".into(),
            tz: "Europe/Madrid".into(),
        }
    }

    #[test]
    fn test_parse_camel_case_json() {
        let json = r#"[{
            "blockId": "sig1",
            "signaturePngUrl": "data:image/png;base64,AAAA",
            "signatureHash": "abc",
            "signedAtLocal": "2024-03-05T14:07:00",
            "tz": "UTC"
        }]"#;
        let list = SignatureArtifact::list_from_json(json).unwrap();
        assert_eq!(list[0].block_id.as_str(), "sig1");
        assert_eq!(list[0].tz, "UTC");
    }

    #[test]
    fn test_signed_at_display() {
        assert_eq!(artifact("a", "h").signed_at_display(), "05/03/2024 14:07 (Europe/Madrid)");

        let mut raw = artifact("a", "h");
        raw.signed_at_local = "yesterday".into();
        raw.tz.clear();
        assert_eq!(raw.signed_at_display(), "yesterday");
    }

    #[test]
    fn test_short_hash() {
        let a = artifact("a", "0123456789abcdef0123");
        assert_eq!(a.short_hash(12), "0123456789ab…");
        assert_eq!(artifact("a", "short").short_hash(12), "short");
    }

    #[test]
    fn test_first_artifact_wins() {
        let list = vec![artifact("a", "first"), artifact("a", "second"), artifact("b", "other")];
        let overlay = SignatureOverlay::new(&list);
        assert_eq!(overlay.get(&BlockId::from("a")).map(|s| s.signature_hash.as_str()), Some("first"));
        assert!(overlay.get(&BlockId::from("c")).is_none());
    }
}
