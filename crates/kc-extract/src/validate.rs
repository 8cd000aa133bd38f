use kc_core::{CountPair, ExtractFlags, KcodeError, ValidationRecord};
use kc_parser::normalize_xml;

use crate::counter::{block_count, part_count, scene_count, spell_count};
use crate::envelope::decode_creation;
use crate::walker::extract;

/// Cross-checks the structural walk against the lexical ground truth over
/// the same input. The scene pair is reported but excluded from the
/// validity predicate: scene is a single scalar, not a countable
/// collection, so its `found` side is the scene string length. Extractor
/// errors propagate; a malformed creation fails outright instead of
/// reporting "invalid".
pub fn validate_creation(data: &[u8]) -> Result<ValidationRecord, KcodeError> {
    let creation = decode_creation(data)?;
    let raw = String::from_utf8_lossy(data);

    let tree = normalize_xml(&creation.source)?;
    let output = extract(&tree, ExtractFlags::all())?;

    let blocks = CountPair {
        expected: block_count(&creation.source),
        found: output.blocks.len(),
    };
    let spells = CountPair {
        expected: spell_count(&creation.source),
        found: output.spells.len(),
    };
    let parts = CountPair {
        expected: part_count(&raw),
        found: creation.parts.len(),
    };
    let scene = CountPair {
        expected: scene_count(&raw),
        found: creation.scene.len(),
    };

    Ok(ValidationRecord {
        blocks,
        spells,
        parts,
        scene,
        valid: blocks.matches() && spells.matches() && parts.matches(),
    })
}
