pub mod xml;

pub use xml::normalize_xml;
