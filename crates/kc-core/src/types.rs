use serde::{Deserialize, Serialize};

/// Block type that marks a gesture event. A block of this type carries the
/// spell name in its `field` -> `#content` payload.
pub const GESTURE_EVENT_TYPE: &str = "events_onGesture";

/// Selects which categories one processing call collects. All flags default
/// to off; enabling one never changes what the others produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractFlags {
    pub blocks: bool,
    pub spells: bool,
    pub parts: bool,
    pub scene: bool,
}

impl ExtractFlags {
    pub fn all() -> Self {
        Self {
            blocks: true,
            spells: true,
            parts: true,
            scene: true,
        }
    }

    pub fn blocks_only() -> Self {
        Self {
            blocks: true,
            ..Self::default()
        }
    }

    pub fn spells_only() -> Self {
        Self {
            spells: true,
            ..Self::default()
        }
    }
}

/// The decoded creation envelope: program XML text, attached parts and the
/// scene identifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Creation {
    pub source: String,
    pub parts: Vec<CreationPart>,
    pub scene: String,
}

impl Creation {
    /// Part identifiers in declaration order.
    pub fn part_ids(&self) -> Vec<String> {
        self.parts.iter().map(|part| part.id.clone()).collect()
    }
}

/// One attached part. Only `id` is required; the remaining fields are
/// tolerated when present and ignored otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreationPart {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "type", default)]
    pub part_type: Option<String>,
    #[serde(rename = "tagName", default)]
    pub tag_name: Option<String>,
    #[serde(rename = "partType", default)]
    pub part_kind: Option<String>,
}

/// Blocks and spells in pre-order traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractOutput {
    pub blocks: Vec<String>,
    pub spells: Vec<String>,
}

/// Everything one processing call produced, per the requested flags.
/// Categories that were not requested stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CreationSummary {
    pub blocks: Vec<String>,
    pub spells: Vec<String>,
    pub parts: Vec<String>,
    pub scene: String,
}

/// An expected count from lexical scanning paired with the count the
/// structural walk actually found.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountPair {
    pub expected: usize,
    pub found: usize,
}

impl CountPair {
    pub fn matches(&self) -> bool {
        self.expected == self.found
    }
}

/// Validation verdict. The scene pair is informational only: `valid`
/// compares blocks, spells and parts, never scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationRecord {
    pub blocks: CountPair,
    pub spells: CountPair,
    pub parts: CountPair,
    pub scene: CountPair,
    pub valid: bool,
}

#[cfg(test)]
mod types_tests {
    use super::*;

    #[test]
    fn extract_flags_default_to_all_off() {
        let flags = ExtractFlags::default();
        assert!(!flags.blocks && !flags.spells && !flags.parts && !flags.scene);
        assert!(ExtractFlags::all().blocks);
        assert!(ExtractFlags::blocks_only().blocks);
        assert!(!ExtractFlags::blocks_only().spells);
        assert!(ExtractFlags::spells_only().spells);
        assert!(!ExtractFlags::spells_only().blocks);
    }

    #[test]
    fn extract_flags_deserialize_with_missing_fields() {
        let flags: ExtractFlags =
            serde_json::from_str(r#"{"blocks":true}"#).expect("flags should decode");
        assert!(flags.blocks);
        assert!(!flags.spells);
    }

    #[test]
    fn creation_decodes_with_optional_part_fields() {
        let creation: Creation = serde_json::from_str(
            r#"{"source":"<xml></xml>","parts":[{"id":"speaker"}],"scene":"owlery"}"#,
        )
        .expect("creation should decode");
        assert_eq!(creation.part_ids(), vec!["speaker".to_string()]);
        assert_eq!(creation.scene, "owlery");
    }

    #[test]
    fn creation_rejects_missing_source() {
        let result: Result<Creation, _> =
            serde_json::from_str(r#"{"parts":[],"scene":"owlery"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn count_pair_matches_compares_expected_and_found() {
        assert!(CountPair { expected: 2, found: 2 }.matches());
        assert!(!CountPair { expected: 2, found: 1 }.matches());
    }
}
