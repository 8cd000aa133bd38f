use roxmltree::{Document, Node, NodeType};
use serde_json::map::Entry;
use serde_json::{Map, Value};

use kc_core::KcodeError;

/// Converts program XML text into a generic JSON value tree.
///
/// The conversion is schema-agnostic and mirrors the usual XML-to-JSON
/// shape the extractor expects: attributes become `-`-prefixed keys,
/// repeated sibling elements collapse into arrays in document order,
/// text-only elements collapse to plain strings, and mixed elements keep
/// their text under `#content`. The whole document becomes one object
/// keyed by the root tag name.
pub fn normalize_xml(source: &str) -> Result<Value, KcodeError> {
    let document = Document::parse(source)
        .map_err(|error| KcodeError::new("XML_PARSE_ERROR", error.to_string()))?;

    let Some(root) = document.root().children().find(|node| node.is_element()) else {
        return Err(KcodeError::new(
            "XML_PARSE_ERROR",
            "XML document must contain a root element.",
        ));
    };

    let mut tree = Map::new();
    tree.insert(root.tag_name().name().to_string(), element_to_value(root));
    Ok(Value::Object(tree))
}

fn element_to_value(node: Node<'_, '_>) -> Value {
    let mut object = Map::new();
    for attribute in node.attributes() {
        object.insert(
            format!("-{}", attribute.name()),
            Value::String(attribute.value().to_string()),
        );
    }

    let mut text = String::new();
    for child in node.children() {
        match child.node_type() {
            NodeType::Element => {
                let name = child.tag_name().name().to_string();
                let value = element_to_value(child);
                insert_child(&mut object, name, value);
            }
            NodeType::Text => {
                let value = child.text().unwrap_or_default().trim();
                if !value.is_empty() {
                    text.push_str(value);
                }
            }
            _ => {}
        }
    }

    if object.is_empty() {
        return Value::String(text);
    }
    if !text.is_empty() {
        object.insert("#content".to_string(), Value::String(text));
    }
    Value::Object(object)
}

// A second sibling with the same tag promotes the existing entry to an
// array; later siblings append in document order.
fn insert_child(object: &mut Map<String, Value>, name: String, value: Value) {
    match object.entry(name) {
        Entry::Vacant(slot) => {
            slot.insert(value);
        }
        Entry::Occupied(mut slot) => match slot.get_mut() {
            Value::Array(items) => items.push(value),
            existing => {
                let first = existing.take();
                *existing = Value::Array(vec![first, value]);
            }
        },
    }
}

#[cfg(test)]
mod xml_tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn normalize_xml_prefixes_attributes_and_keeps_text_content() {
        let tree = normalize_xml(
            r#"<xml><block type="events_onGesture" id="b1"><field name="gesture">accio</field></block></xml>"#,
        )
        .expect("xml should normalize");

        assert_eq!(
            tree,
            json!({
                "xml": {
                    "block": {
                        "-type": "events_onGesture",
                        "-id": "b1",
                        "field": {
                            "-name": "gesture",
                            "#content": "accio"
                        }
                    }
                }
            })
        );
    }

    #[test]
    fn normalize_xml_collapses_text_only_elements_to_strings() {
        let tree = normalize_xml("<xml><note>hello</note></xml>").expect("xml should normalize");
        assert_eq!(tree, json!({"xml": {"note": "hello"}}));
    }

    #[test]
    fn normalize_xml_collects_repeated_siblings_into_arrays() {
        let tree = normalize_xml(
            r#"<xml><block type="a" id="1"/><block type="b" id="2"/><block type="c" id="3"/></xml>"#,
        )
        .expect("xml should normalize");

        assert_eq!(
            tree,
            json!({
                "xml": {
                    "block": [
                        {"-type": "a", "-id": "1"},
                        {"-type": "b", "-id": "2"},
                        {"-type": "c", "-id": "3"}
                    ]
                }
            })
        );
    }

    #[test]
    fn normalize_xml_keeps_nested_edges_as_objects() {
        let tree = normalize_xml(
            r#"<xml><block type="events_onFlick" id="1"><statement name="DO"><block type="objects_setColor" id="2"/></statement></block></xml>"#,
        )
        .expect("xml should normalize");

        let statement = &tree["xml"]["block"]["statement"];
        assert_eq!(statement["-name"], "DO");
        assert_eq!(statement["block"]["-type"], "objects_setColor");
    }

    #[test]
    fn normalize_xml_turns_empty_elements_into_empty_strings() {
        let tree = normalize_xml("<xml></xml>").expect("xml should normalize");
        assert_eq!(tree, json!({"xml": ""}));
    }

    #[test]
    fn normalize_xml_rejects_invalid_xml() {
        let error = normalize_xml("<xml>").expect_err("invalid xml should fail");
        assert_eq!(error.code, "XML_PARSE_ERROR");
    }

    #[test]
    fn normalize_xml_rejects_element_less_documents() {
        let error = normalize_xml("<?xml version=\"1.0\"?><!---->")
            .expect_err("missing root element should fail");
        assert_eq!(error.code, "XML_PARSE_ERROR");
    }
}
