//! The i3bar streaming protocol, as far as we need to relay it.
//!
//! A status-line program writes one header line (`{"version":1}`), one line
//! opening an endless JSON array (`[`), and then one status frame per line.
//! Each frame is a JSON array of status element objects; every frame after the
//! first is prefixed with `,` because the frames are elements of the outer array.

use serde_json::{Map, Value};

/// Header line announcing protocol version 1.
pub const HEADER: &str = r#"{"version":1}"#;
/// Line opening the endless frame array.
pub const ARRAY_OPEN: &str = "[";
/// Separator between frames of the endless array.
pub const SEPARATOR: char = ',';

/// One status element (`name`, `full_text`, `color`, ...).
pub type StatusElement = Map<String, Value>;

/// A classified line of status-line output.
#[derive(Debug, Clone, PartialEq)]
pub enum StatusLine<'a> {
    /// Empty or whitespace-only line.
    Blank,
    /// The `{"version":...}` header.
    Preamble,
    /// The `[` opening the frame array.
    ArrayOpen,
    /// A frame that parsed as an array of element objects.
    Frame {
        elements: Vec<StatusElement>,
        separated: bool,
    },
    /// A content line that is not a valid frame. `raw` excludes the separator.
    Malformed { raw: &'a str, separated: bool },
}

impl<'a> StatusLine<'a> {
    /// Classify one line of output.
    #[must_use]
    pub fn classify(line: &'a str) -> Self {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            return Self::Blank;
        }
        if trimmed == ARRAY_OPEN {
            return Self::ArrayOpen;
        }

        let (body, separated) = match trimmed.strip_prefix(SEPARATOR) {
            Some(rest) => (rest, true),
            None => (trimmed, false),
        };
        if body.trim().is_empty() {
            return Self::Blank;
        }
        if !separated && is_header(body) {
            return Self::Preamble;
        }

        match serde_json::from_str::<Vec<StatusElement>>(body) {
            Ok(elements) => Self::Frame {
                elements,
                separated,
            },
            Err(_) => Self::Malformed {
                raw: body,
                separated,
            },
        }
    }

    /// Whether the line carries status content that must be relayed.
    #[must_use]
    pub const fn is_content(&self) -> bool {
        matches!(self, Self::Frame { .. } | Self::Malformed { .. })
    }
}

fn is_header(body: &str) -> bool {
    body.starts_with('{')
        && serde_json::from_str::<Map<String, Value>>(body)
            .is_ok_and(|object| object.contains_key("version"))
}

/// Serialize a frame body, prepending `element`.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn prepend_element(
    element: &StatusElement,
    elements: Vec<StatusElement>,
) -> serde_json::Result<String> {
    let mut frame = Vec::with_capacity(elements.len() + 1);
    frame.push(Value::Object(element.clone()));
    frame.extend(elements.into_iter().map(Value::Object));
    serde_json::to_string(&frame)
}

/// Attach the separator to a frame body when required.
#[must_use]
pub fn frame_line(body: &str, separated: bool) -> String {
    if separated {
        format!("{SEPARATOR}{body}")
    } else {
        body.to_string()
    }
}

/// Byte form of [`frame_line`] for bodies that are not valid UTF-8.
#[must_use]
pub fn frame_bytes(body: &[u8], separated: bool) -> Vec<u8> {
    let mut line = Vec::with_capacity(body.len() + 1);
    if separated {
        line.push(b',');
    }
    line.extend_from_slice(body);
    line
}
