use std::sync::OnceLock;

use regex::Regex;

use kc_core::GESTURE_EVENT_TYPE;

/// Lexical ground truth, decoupled from the structural walker on purpose:
/// these counts catch walker bugs (missed edges, wrong fall-through) that
/// the walker alone could never see, because it would be consistent with
/// itself. No structure is parsed; a missing marker yields 0, never an
/// error.

/// Counts block openings (`<block`) in the program XML text.
pub fn block_count(xml: &str) -> usize {
    block_regex().find_iter(xml).count()
}

/// Counts gesture-event markers in the program XML text.
pub fn spell_count(xml: &str) -> usize {
    spell_regex().find_iter(xml).count()
}

/// Counts part-type markers in the raw envelope text.
pub fn part_count(raw: &str) -> usize {
    part_regex().find_iter(raw).count()
}

/// Counts scene markers in the raw envelope text.
pub fn scene_count(raw: &str) -> usize {
    scene_regex().find_iter(raw).count()
}

fn block_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new("<block").expect("block regex must compile"))
}

fn spell_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(GESTURE_EVENT_TYPE).expect("spell regex must compile"))
}

fn part_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new("partType").expect("part regex must compile"))
}

fn scene_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r#""scene":"#).expect("scene regex must compile"))
}
