//! Global id encoding for relay-style node refetch
//!
//! An id encodes `(type_name, part...)` as base64 over length-prefixed
//! segments (`{len}:{bytes}` concatenated). Length prefixes make the
//! encoding unambiguous regardless of what the parts contain; a bare
//! delimiter join cannot distinguish `a:b` + `c` from `a` + `b:c`.
//!
//! Decoding inverts the encoding exactly and reports a typed error when the
//! payload is corrupt, names a different type, or carries the wrong number
//! of parts for the requested type.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD as BASE64};
use thiserror::Error;

pub const COURSE_TYPE: &str = "Course";
pub const UNIT_TYPE: &str = "Unit";
pub const LESSON_TYPE: &str = "Lesson";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdError {
    #[error("id is not valid base64")]
    InvalidEncoding,
    #[error("id payload is malformed")]
    Malformed,
    #[error("id names type '{found}', expected '{expected}'")]
    WrongType { expected: &'static str, found: String },
    #[error("id for '{type_name}' has {found} parts, expected {expected}")]
    WrongArity {
        type_name: &'static str,
        expected: usize,
        found: usize,
    },
    #[error("id names unknown type '{0}'")]
    UnknownType(String),
}

/// A decoded global id, carrying exactly the parts its type requires
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    Course {
        slug: String,
    },
    Unit {
        slug: String,
        unit_id: String,
    },
    Lesson {
        slug: String,
        unit_id: String,
        lesson_id: String,
    },
}

fn encode(type_name: &str, parts: &[&str]) -> String {
    let mut payload = String::new();
    payload.push_str(&format!("{}:{}", type_name.len(), type_name));
    for part in parts {
        payload.push_str(&format!("{}:{}", part.len(), part));
    }
    BASE64.encode(payload)
}

/// Split a payload into its length-prefixed segments
fn split_segments(payload: &str) -> Result<Vec<String>, IdError> {
    let mut segments = Vec::new();
    let mut rest = payload;
    while !rest.is_empty() {
        let colon = rest.find(':').ok_or(IdError::Malformed)?;
        let len: usize = rest[..colon].parse().map_err(|_| IdError::Malformed)?;
        let body = &rest[colon + 1..];
        let segment = body.get(..len).ok_or(IdError::Malformed)?;
        segments.push(segment.to_string());
        rest = &body[len..];
    }
    if segments.is_empty() {
        return Err(IdError::Malformed);
    }
    Ok(segments)
}

fn decode_segments(id: &str) -> Result<Vec<String>, IdError> {
    let bytes = BASE64.decode(id).map_err(|_| IdError::InvalidEncoding)?;
    let payload = String::from_utf8(bytes).map_err(|_| IdError::InvalidEncoding)?;
    split_segments(&payload)
}

/// Decode an id expected to name `type_name` with exactly `arity` parts
fn decode_expected(type_name: &'static str, arity: usize, id: &str) -> Result<Vec<String>, IdError> {
    let mut segments = decode_segments(id)?;
    let found = segments.remove(0);
    if found != type_name {
        return Err(IdError::WrongType {
            expected: type_name,
            found,
        });
    }
    if segments.len() != arity {
        return Err(IdError::WrongArity {
            type_name,
            expected: arity,
            found: segments.len(),
        });
    }
    Ok(segments)
}

pub fn encode_course_id(slug: &str) -> String {
    encode(COURSE_TYPE, &[slug])
}

pub fn encode_unit_id(slug: &str, unit_id: &str) -> String {
    encode(UNIT_TYPE, &[slug, unit_id])
}

pub fn encode_lesson_id(slug: &str, unit_id: &str, lesson_id: &str) -> String {
    encode(LESSON_TYPE, &[slug, unit_id, lesson_id])
}

pub fn decode_course_id(id: &str) -> Result<String, IdError> {
    let mut parts = decode_expected(COURSE_TYPE, 1, id)?;
    Ok(parts.remove(0))
}

pub fn decode_unit_id(id: &str) -> Result<(String, String), IdError> {
    let mut parts = decode_expected(UNIT_TYPE, 2, id)?;
    let unit_id = parts.remove(1);
    Ok((parts.remove(0), unit_id))
}

pub fn decode_lesson_id(id: &str) -> Result<(String, String, String), IdError> {
    let mut parts = decode_expected(LESSON_TYPE, 3, id)?;
    let lesson_id = parts.remove(2);
    let unit_id = parts.remove(1);
    Ok((parts.remove(0), unit_id, lesson_id))
}

/// Decode any global id into a typed reference (relay node refetch)
pub fn decode_node(id: &str) -> Result<NodeRef, IdError> {
    let mut segments = decode_segments(id)?;
    let type_name = segments.remove(0);
    let arity_err = |type_name: &'static str, expected: usize, found: usize| IdError::WrongArity {
        type_name,
        expected,
        found,
    };
    match type_name.as_str() {
        COURSE_TYPE => {
            if segments.len() != 1 {
                return Err(arity_err(COURSE_TYPE, 1, segments.len()));
            }
            Ok(NodeRef::Course {
                slug: segments.remove(0),
            })
        }
        UNIT_TYPE => {
            if segments.len() != 2 {
                return Err(arity_err(UNIT_TYPE, 2, segments.len()));
            }
            let unit_id = segments.remove(1);
            Ok(NodeRef::Unit {
                slug: segments.remove(0),
                unit_id,
            })
        }
        LESSON_TYPE => {
            if segments.len() != 3 {
                return Err(arity_err(LESSON_TYPE, 3, segments.len()));
            }
            let lesson_id = segments.remove(2);
            let unit_id = segments.remove(1);
            Ok(NodeRef::Lesson {
                slug: segments.remove(0),
                unit_id,
                lesson_id,
            })
        }
        other => Err(IdError::UnknownType(other.to_string())),
    }
}
