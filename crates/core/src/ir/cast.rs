//! Type casting from BlueZ documentation descriptors to Go types.
//!
//! Two steps live here:
//! - `cast_type`: descriptor (`array{object}`, `boolean`, ...) -> Go type expression
//! - `raw_type` / `raw_type_initializer`: Go type expression -> base type and zero value
//!
//! Descriptors outside the known vocabulary are assumed to already be valid Go
//! and pass through untouched.

use thiserror::Error;

/// Type expressions containing this marker depend on the D-Bus types module.
pub const BUS_TYPES_MARKER: &str = "dbus.";

/// Go type used for D-Bus object paths.
pub const OBJECT_PATH_TYPE: &str = "dbus.ObjectPath";

const EMPTY_INTERFACE_MAP: &str = "map[string]interface{}";
const MANAGED_OBJECTS_TYPE: &str = "map[dbus.ObjectPath]map[string]map[string]dbus.Variant";

/// A resolved base type has no known zero-value initializer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported type '{ty}'")]
pub struct UnsupportedTypeError {
    /// The base type that could not be classified.
    pub ty: String,
}

/// Check whether a type expression references the D-Bus types module.
pub fn uses_bus_types(expr: &str) -> bool {
    expr.contains(BUS_TYPES_MARKER)
}

/// Cast a documentation type descriptor to a Go type expression.
///
/// - An inline backtick annotation is kept verbatim after the cast base type
/// - A top-level comma separated list is cast element by element
/// - Unknown descriptors are returned trimmed but otherwise unchanged
pub fn cast_type(descriptor: &str) -> String {
    let descriptor = descriptor.trim();

    if let Some(idx) = descriptor.find('`') {
        let base = cast_type(&descriptor[..idx]);
        let annotation = descriptor[idx..].trim();
        if base.is_empty() {
            return annotation.to_string();
        }
        return format!("{base} {annotation}");
    }

    let parts = split_top_level(descriptor);
    if parts.len() > 1 {
        return parts
            .into_iter()
            .map(cast_single)
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ");
    }

    cast_single(descriptor)
}

fn cast_single(descriptor: &str) -> String {
    match descriptor {
        "" | "void" | "unknown" | "<unknown>" => String::new(),
        "boolean" => "bool".to_string(),
        "double" => "float64".to_string(),
        "object" | "objects" => OBJECT_PATH_TYPE.to_string(),
        "fd" => "dbus.UnixFD".to_string(),
        "variant" => "dbus.Variant".to_string(),
        "dict" => EMPTY_INTERFACE_MAP.to_string(),
        "array{objects, properties}" => MANAGED_OBJECTS_TYPE.to_string(),
        _ => {
            if let Some(inner) = container_inner(descriptor, "array{") {
                let inner = cast_type(inner);
                if inner.is_empty() {
                    return "[]interface{}".to_string();
                }
                return format!("[]{inner}");
            }

            if let Some(inner) = container_inner(descriptor, "dict{") {
                return match split_top_level(inner).as_slice() {
                    [key, value] => format!("map[{}]{}", cast_single(key), cast_single(value)),
                    _ => EMPTY_INTERFACE_MAP.to_string(),
                };
            }

            // C style fixed width integers (uint16_t)
            if let Some(base) = descriptor.strip_suffix("_t")
                && is_fixed_int(base)
            {
                return base.to_string();
            }

            descriptor.to_string()
        }
    }
}

fn container_inner<'a>(descriptor: &'a str, prefix: &str) -> Option<&'a str> {
    descriptor.strip_prefix(prefix)?.strip_suffix('}')
}

fn is_fixed_int(name: &str) -> bool {
    matches!(
        name,
        "int8" | "int16" | "int32" | "int64" | "uint8" | "uint16" | "uint32" | "uint64"
    )
}

/// Split on commas that are not nested in braces or brackets.
///
/// Backtick annotations are opaque, so commas inside a struct tag never split.
pub fn split_top_level(s: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut in_annotation = false;
    let mut start = 0;

    for (i, c) in s.char_indices() {
        match c {
            '`' => in_annotation = !in_annotation,
            _ if in_annotation => {}
            '{' | '[' | '(' => depth += 1,
            '}' | ']' | ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(s[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(s[start..].trim());
    parts
}

/// Strip an inline backtick annotation from a type expression.
///
/// Everything from the first backtick onward is dropped and the remainder
/// trimmed. Expressions without an annotation are returned unchanged.
pub fn raw_type(expr: &str) -> &str {
    match expr.find('`') {
        Some(idx) => expr[..idx].trim(),
        None => expr,
    }
}

/// Zero-value initializer for the base type of a type expression.
pub fn raw_type_initializer(expr: &str) -> Result<String, UnsupportedTypeError> {
    let ty = raw_type(expr);

    if ty.starts_with("[]") || ty.starts_with("map") {
        return Ok(format!("{ty}{{}}"));
    }
    if ty.starts_with("int") || ty.starts_with("uint") {
        return Ok(format!("{ty}(0)"));
    }
    if ty.starts_with("float") {
        return Ok(format!("{ty}(0.0)"));
    }

    match ty {
        "bool" => Ok("false".to_string()),
        "string" => Ok("\"\"".to_string()),
        "byte" => Ok("[]uint8{}".to_string()),
        OBJECT_PATH_TYPE => Ok(format!("{OBJECT_PATH_TYPE}(\"\")")),
        _ => Err(UnsupportedTypeError { ty: ty.to_string() }),
    }
}
