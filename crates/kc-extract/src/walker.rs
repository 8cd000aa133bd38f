use serde_json::{Map, Value};
use tracing::debug;

use kc_core::{ExtractFlags, ExtractOutput, KcodeError, GESTURE_EVENT_TYPE};

/// One node visit, reported to an [`ExtractObserver`]. Coordinates carried
/// by block nodes (`-x`/`-y`) are passed through here and nowhere else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisitEvent<'a> {
    Block {
        block_type: &'a str,
        id: &'a str,
        x: Option<&'a str>,
        y: Option<&'a str>,
    },
    Value {
        name: Option<&'a str>,
        value_type: Option<&'a str>,
        id: Option<&'a str>,
    },
}

/// Optional per-visit callback owned by the caller. The walker itself never
/// writes to any shared output stream.
pub trait ExtractObserver {
    fn visit(&mut self, event: VisitEvent<'_>);
}

impl<F: FnMut(VisitEvent<'_>)> ExtractObserver for F {
    fn visit(&mut self, event: VisitEvent<'_>) {
        self(event)
    }
}

/// Walks the normalized program tree and collects block types and spell
/// payloads in pre-order. The program container is expected at
/// `xml` -> `block` and may be a single block object or an array of them.
pub fn extract(tree: &Value, flags: ExtractFlags) -> Result<ExtractOutput, KcodeError> {
    let mut walker = Walker {
        flags,
        output: ExtractOutput::default(),
        observer: None,
    };
    walker.walk_program(tree)?;
    Ok(walker.output)
}

/// Same traversal as [`extract`], invoking `observer` once per visited
/// block and value-wrapper node.
pub fn extract_with_observer(
    tree: &Value,
    flags: ExtractFlags,
    observer: &mut dyn ExtractObserver,
) -> Result<ExtractOutput, KcodeError> {
    let mut walker = Walker {
        flags,
        output: ExtractOutput::default(),
        observer: Some(observer),
    };
    walker.walk_program(tree)?;
    Ok(walker.output)
}

struct Walker<'a> {
    flags: ExtractFlags,
    output: ExtractOutput,
    observer: Option<&'a mut dyn ExtractObserver>,
}

impl Walker<'_> {
    fn walk_program(&mut self, tree: &Value) -> Result<(), KcodeError> {
        let Some(container) = tree.get("xml").and_then(|xml| xml.get("block")) else {
            return Err(KcodeError::new(
                "TREE_ROOT_INVALID",
                "Program tree has no xml.block container.",
            ));
        };
        self.walk_block_edge(container)
    }

    // A block edge holds one block object or an array of them; anything
    // else is malformed input.
    fn walk_block_edge(&mut self, value: &Value) -> Result<(), KcodeError> {
        match value {
            Value::Object(block) => self.walk_block(block),
            Value::Array(items) => {
                for item in items {
                    let Value::Object(block) = item else {
                        return Err(shape_error("block", item));
                    };
                    self.walk_block(block)?;
                }
                Ok(())
            }
            other => Err(shape_error("block", other)),
        }
    }

    fn walk_block(&mut self, block: &Map<String, Value>) -> Result<(), KcodeError> {
        let Some(block_type) = str_field(block, "-type") else {
            return Err(KcodeError::new(
                "BLOCK_TYPE_MISSING",
                "Block node has no -type attribute.",
            ));
        };
        let Some(id) = str_field(block, "-id") else {
            return Err(KcodeError::new(
                "BLOCK_ID_MISSING",
                format!("Block \"{}\" has no -id attribute.", block_type),
            ));
        };

        // A gesture block is a spell source and a normal block at the same
        // time: capturing the payload never suppresses block handling or
        // recursion into the child edges.
        if block_type == GESTURE_EVENT_TYPE && self.flags.spells {
            let spell = gesture_payload(block)?;
            debug!(spell = %spell, id, "found spell");
            self.output.spells.push(spell);
        }
        if self.flags.blocks {
            self.output.blocks.push(block_type.to_string());
        }

        debug!(block_type, id, "visiting block");
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.visit(VisitEvent::Block {
                block_type,
                id,
                x: str_field(block, "-x"),
                y: str_field(block, "-y"),
            });
        }

        for edge in ["statement", "next", "value"] {
            if let Some(child) = block.get(edge) {
                self.walk_value(child)?;
            }
        }
        Ok(())
    }

    fn walk_value(&mut self, value: &Value) -> Result<(), KcodeError> {
        match value {
            Value::Object(wrapper) => self.walk_value_object(wrapper),
            Value::Array(items) => {
                for item in items {
                    let Value::Object(wrapper) = item else {
                        return Err(shape_error("value", item));
                    };
                    self.walk_value_object(wrapper)?;
                }
                Ok(())
            }
            other => Err(shape_error("value", other)),
        }
    }

    // All present edges are visited; none are mutually exclusive. Shadows
    // are default-value placeholders and are walked identically to real
    // values.
    fn walk_value_object(&mut self, wrapper: &Map<String, Value>) -> Result<(), KcodeError> {
        debug!(
            name = str_field(wrapper, "-name"),
            value_type = str_field(wrapper, "-type"),
            "visiting value"
        );
        if let Some(observer) = self.observer.as_deref_mut() {
            observer.visit(VisitEvent::Value {
                name: str_field(wrapper, "-name"),
                value_type: str_field(wrapper, "-type"),
                id: str_field(wrapper, "-id"),
            });
        }

        if let Some(block) = wrapper.get("block") {
            self.walk_block_edge(block)?;
        }
        if let Some(shadow) = wrapper.get("shadow") {
            self.walk_value(shadow)?;
        }
        if let Some(value) = wrapper.get("value") {
            self.walk_value(value)?;
        }
        if let Some(statement) = wrapper.get("statement") {
            self.walk_value(statement)?;
        }
        if let Some(next) = wrapper.get("next") {
            self.walk_value(next)?;
        }
        Ok(())
    }
}

// A gesture block always carries its payload at field -> #content;
// anything else aborts the whole extraction.
fn gesture_payload(block: &Map<String, Value>) -> Result<String, KcodeError> {
    block
        .get("field")
        .and_then(|field| field.get("#content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            KcodeError::new(
                "GESTURE_PAYLOAD_MISSING",
                "Gesture block has no field.#content payload.",
            )
        })
}

fn str_field<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    object.get(key).and_then(Value::as_str)
}

fn shape_error(edge: &str, value: &Value) -> KcodeError {
    KcodeError::new(
        "NODE_SHAPE_INVALID",
        format!(
            "Expected {} content to be an object or array, got {}.",
            edge,
            kind_name(value)
        ),
    )
}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
