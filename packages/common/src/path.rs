//! # Config Path Accessor
//!
//! Generic read/write access to nested widget configuration.
//!
//! Editing panels address fields with short paths such as `headline`,
//! `reviews.0.image` or `tiers.1.gifts`. A path has one to three segments
//! and always starts with a field name, because a widget config is a map.
//!
//! ## Semantics
//!
//! - [`get`] returns the caller's default when any level is missing,
//!   `null`, or of the wrong kind.
//! - [`set`] never mutates its input. Missing levels are synthesized
//!   (a map for a field segment, a list for an index segment), a scalar
//!   sitting where a container is needed is replaced, and an index past
//!   the end of a list appends.

use crate::error::PathError;
use crate::result::PathResult;
use crate::ConfigMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Maximum number of segments in a config path
pub const MAX_SEGMENTS: usize = 3;

/// One step in a [`ConfigPath`]
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Field(String),
    Index(usize),
}

impl From<&str> for PathSegment {
    fn from(name: &str) -> Self {
        PathSegment::Field(name.to_string())
    }
}

impl From<String> for PathSegment {
    fn from(name: String) -> Self {
        PathSegment::Field(name)
    }
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Field(name) => write!(f, "{}", name),
            PathSegment::Index(index) => write!(f, "{}", index),
        }
    }
}

/// Validated path into a widget config
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ConfigPath {
    segments: Vec<PathSegment>,
}

impl ConfigPath {
    /// Build a path from explicit segments
    pub fn new(segments: Vec<PathSegment>) -> PathResult<Self> {
        if segments.is_empty() || segments.len() > MAX_SEGMENTS {
            return Err(PathError::InvalidLength {
                got: segments.len(),
                max: MAX_SEGMENTS,
            });
        }

        match &segments[0] {
            PathSegment::Field(name) if name.is_empty() => return Err(PathError::EmptyField),
            PathSegment::Field(_) => {}
            PathSegment::Index(index) => return Err(PathError::LeadingIndex(*index)),
        }

        if segments
            .iter()
            .any(|s| matches!(s, PathSegment::Field(name) if name.is_empty()))
        {
            return Err(PathError::EmptyField);
        }

        Ok(Self { segments })
    }

    /// Parse a dotted path (`reviews.0.image`). All-digit segments are list indices.
    pub fn parse(source: &str) -> PathResult<Self> {
        let segments = source
            .split('.')
            .map(parse_segment)
            .collect::<PathResult<Vec<_>>>()?;
        Self::new(segments)
    }

    /// Build a path from JSON: either a dotted string or an array mixing
    /// field names and non-negative integer indices.
    pub fn from_json(value: &Value) -> PathResult<Self> {
        match value {
            Value::String(source) => Self::parse(source),
            Value::Array(items) => {
                let segments = items
                    .iter()
                    .map(|item| match item {
                        Value::String(name) => Ok(PathSegment::Field(name.clone())),
                        Value::Number(n) => n
                            .as_u64()
                            .and_then(|i| usize::try_from(i).ok())
                            .map(PathSegment::Index)
                            .ok_or_else(|| PathError::InvalidIndex(n.to_string())),
                        other => Err(PathError::UnsupportedSegment(other.to_string())),
                    })
                    .collect::<PathResult<Vec<_>>>()?;
                Self::new(segments)
            }
            other => Err(PathError::UnsupportedSegment(other.to_string())),
        }
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    /// Extend the path by one segment (fails past [`MAX_SEGMENTS`])
    pub fn join(&self, segment: impl Into<PathSegment>) -> PathResult<Self> {
        let mut segments = self.segments.clone();
        segments.push(segment.into());
        Self::new(segments)
    }
}

fn parse_segment(raw: &str) -> PathResult<PathSegment> {
    if raw.is_empty() {
        return Err(PathError::EmptyField);
    }

    if raw.bytes().all(|b| b.is_ascii_digit()) {
        return raw
            .parse::<usize>()
            .map(PathSegment::Index)
            .map_err(|_| PathError::InvalidIndex(raw.to_string()));
    }

    if let Some(rest) = raw.strip_prefix('-') {
        if !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PathError::InvalidIndex(raw.to_string()));
        }
    }

    Ok(PathSegment::Field(raw.to_string()))
}

impl fmt::Display for ConfigPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            write!(f, "{}", segment)?;
        }
        Ok(())
    }
}

impl FromStr for ConfigPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ConfigPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConfigPath> for String {
    fn from(path: ConfigPath) -> Self {
        path.to_string()
    }
}

/// Borrow the value at `path`, if every level exists
pub fn get_ref<'a>(config: &'a ConfigMap, path: &ConfigPath) -> Option<&'a Value> {
    let (first, rest) = path.segments.split_first()?;

    let mut current = match first {
        PathSegment::Field(name) => config.get(name)?,
        PathSegment::Index(_) => return None,
    };

    for segment in rest {
        current = match (segment, current) {
            (PathSegment::Field(name), Value::Object(map)) => map.get(name)?,
            (PathSegment::Index(index), Value::Array(items)) => items.get(*index)?,
            _ => return None,
        };
    }

    Some(current)
}

/// Read the value at `path`, or `default` when it is missing or `null`
pub fn get(config: &ConfigMap, path: &ConfigPath, default: Value) -> Value {
    get_ref(config, path)
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or(default)
}

/// Read a string field, falling back to `default` for any non-string value
pub fn get_str(config: &ConfigMap, path: &ConfigPath, default: &str) -> String {
    get_ref(config, path)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

/// Read a list field; anything that is not a list reads as empty
pub fn get_list(config: &ConfigMap, path: &ConfigPath) -> Vec<Value> {
    match get_ref(config, path) {
        Some(Value::Array(items)) => items.clone(),
        _ => Vec::new(),
    }
}

/// Return a copy of `config` with the value at `path` replaced
pub fn set(config: &ConfigMap, path: &ConfigPath, value: Value) -> ConfigMap {
    with_value(config.clone(), path, value)
}

/// Consuming variant of [`set`]: untouched branches are moved, not copied
pub fn with_value(mut config: ConfigMap, path: &ConfigPath, value: Value) -> ConfigMap {
    set_in(&mut config, path, value);
    config
}

/// Write `value` at `path` in place
pub fn set_in(config: &mut ConfigMap, path: &ConfigPath, value: Value) {
    let Some((first, rest)) = path.segments.split_first() else {
        return;
    };

    let key = match first {
        PathSegment::Field(name) => name.clone(),
        PathSegment::Index(index) => index.to_string(),
    };

    let slot = config.entry(key).or_insert(Value::Null);
    write_at(slot, rest, value);
}

fn write_at(slot: &mut Value, rest: &[PathSegment], value: Value) {
    match rest.split_first() {
        None => *slot = value,

        Some((PathSegment::Field(name), tail)) => {
            if !slot.is_object() {
                *slot = Value::Object(Map::new());
            }
            if let Value::Object(map) = slot {
                let child = map.entry(name.clone()).or_insert(Value::Null);
                write_at(child, tail, value);
            }
        }

        Some((PathSegment::Index(index), tail)) => {
            if !slot.is_array() {
                *slot = Value::Array(Vec::new());
            }
            if let Value::Array(items) = slot {
                if let Some(existing) = items.get_mut(*index) {
                    write_at(existing, tail, value);
                } else {
                    // Past the end: append
                    let mut fresh = Value::Null;
                    write_at(&mut fresh, tail, value);
                    items.push(fresh);
                }
            }
        }
    }
}
