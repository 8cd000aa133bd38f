pub mod counter;
pub mod envelope;
pub mod validate;
pub mod walker;

pub use counter::{block_count, part_count, scene_count, spell_count};
pub use envelope::decode_creation;
pub use validate::validate_creation;
pub use walker::{extract, extract_with_observer, ExtractObserver, VisitEvent};
