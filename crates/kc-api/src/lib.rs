use kc_core::{CreationSummary, ExtractFlags, KcodeError};
use kc_extract::{decode_creation, extract};
use kc_parser::normalize_xml;

pub use kc_extract::validate_creation;

/// Processes one creation envelope: decodes it, normalizes the program XML
/// and runs the tree walk, filling exactly the categories the flags
/// request. The program tree is only normalized and walked when blocks or
/// spells are asked for.
pub fn process_creation(
    data: &[u8],
    flags: ExtractFlags,
) -> Result<CreationSummary, KcodeError> {
    let creation = decode_creation(data)?;
    let mut summary = CreationSummary::default();

    if flags.blocks || flags.spells {
        let tree = normalize_xml(&creation.source)?;
        let output = extract(&tree, flags)?;
        summary.blocks = output.blocks;
        summary.spells = output.spells;
    }
    if flags.parts {
        summary.parts = creation.part_ids();
    }
    if flags.scene {
        summary.scene = creation.scene;
    }
    Ok(summary)
}

#[cfg(test)]
mod api_tests {
    use super::*;

    const CREATION: &[u8] = br#"{"source":"<xml><block type=\"events_onGesture\" id=\"b1\"><field name=\"gesture\">reducio</field></block></xml>","parts":[{"id":"speaker","partType":"hardware"},{"id":"button","partType":"hardware"}],"scene":"owlery"}"#;

    #[test]
    fn process_creation_fills_all_requested_categories() {
        let summary =
            process_creation(CREATION, ExtractFlags::all()).expect("processing should pass");
        assert_eq!(summary.blocks, vec!["events_onGesture".to_string()]);
        assert_eq!(summary.spells, vec!["reducio".to_string()]);
        assert_eq!(
            summary.parts,
            vec!["speaker".to_string(), "button".to_string()]
        );
        assert_eq!(summary.scene, "owlery");
    }

    #[test]
    fn process_creation_leaves_unrequested_categories_empty() {
        let summary = process_creation(CREATION, ExtractFlags::spells_only())
            .expect("processing should pass");
        assert!(summary.blocks.is_empty());
        assert_eq!(summary.spells, vec!["reducio".to_string()]);
        assert!(summary.parts.is_empty());
        assert!(summary.scene.is_empty());
    }

    #[test]
    fn process_creation_skips_the_program_walk_for_parts_and_scene() {
        // The program XML here is malformed, but without blocks/spells
        // requested it is never normalized.
        let data = br#"{"source":"<xml><block","parts":[{"id":"speaker"}],"scene":"owlery"}"#;
        let flags = ExtractFlags {
            parts: true,
            scene: true,
            ..ExtractFlags::default()
        };
        let summary = process_creation(data, flags).expect("processing should pass");
        assert_eq!(summary.parts, vec!["speaker".to_string()]);
        assert_eq!(summary.scene, "owlery");
    }

    #[test]
    fn process_creation_with_all_flags_off_yields_an_empty_summary() {
        let summary = process_creation(CREATION, ExtractFlags::default())
            .expect("processing should pass");
        assert_eq!(summary, CreationSummary::default());
    }

    #[test]
    fn process_creation_propagates_decode_errors() {
        let error = process_creation(b"{", ExtractFlags::all())
            .expect_err("truncated envelope should fail");
        assert_eq!(error.code, "ENVELOPE_DECODE");
    }

    #[test]
    fn validate_creation_is_reachable_through_the_facade() {
        let record = validate_creation(CREATION).expect("validation should pass");
        assert!(record.valid);
        assert_eq!(record.blocks.expected, 1);
        assert_eq!(record.spells.found, 1);
    }
}
