//! Conversions between untyped Lua values and bridge types.
//!
//! Numbers follow Lua's own coercion rules closely: integers pass through,
//! floats are truncated toward zero, and numeric strings are parsed. `nil`
//! in a coordinate slot reads as `0`, the same as `lua_tonumber` would.

use mlua::Value;
use paxo_common::{Color, WidgetHandle};
use paxo_config::colors::parse_color;

use crate::error::BridgeError;

/// Short description of a value for diagnostics.
pub fn describe(value: &Value) -> String {
    match value {
        Value::Integer(i) => i.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(s) => format!("{:?}", s.to_string_lossy()),
        Value::Boolean(b) => b.to_string(),
        other => other.type_name().to_string(),
    }
}

fn integer_of(value: &Value) -> Option<i64> {
    match value {
        Value::Integer(i) => Some(*i),
        Value::Number(n) if n.is_finite() => Some(n.trunc() as i64),
        Value::String(s) => {
            let text = s.to_str().ok()?.trim();
            text.parse::<i64>().ok().or_else(|| {
                text.parse::<f64>()
                    .ok()
                    .filter(|n| n.is_finite())
                    .map(|n| n.trunc() as i64)
            })
        }
        _ => None,
    }
}

/// Read a widget handle. Anything that is not a non-negative integer fitting
/// in 32 bits is an invalid handle.
pub fn handle(value: &Value) -> Result<WidgetHandle, BridgeError> {
    let raw = integer_of(value).ok_or_else(|| BridgeError::InvalidHandle(describe(value)))?;
    u32::try_from(raw)
        .map(WidgetHandle)
        .map_err(|_| BridgeError::InvalidHandle(raw.to_string()))
}

/// Read an optional parent handle; a missing argument or `nil` means none.
pub fn optional_handle(value: Option<&Value>) -> Result<Option<WidgetHandle>, BridgeError> {
    match value {
        None | Some(Value::Nil) => Ok(None),
        Some(v) => handle(v).map(Some),
    }
}

/// Read an integer coordinate or dimension. Range clamping is left to the
/// widget layer.
pub fn integer(value: Option<&Value>, position: usize) -> Result<i64, BridgeError> {
    match value {
        None | Some(Value::Nil) => Ok(0),
        Some(v) => integer_of(v).ok_or_else(|| BridgeError::BadArgument {
            position,
            expected: "number",
            found: describe(v),
        }),
    }
}

/// Read a color: a packed `0xRRGGBB` integer (what the published
/// constants hold) or any string the config accepts (`#RGB`, `#RRGGBB`,
/// `#RRGGBBAA`, `rgb(..)`, `rgba(..)`).
pub fn color(value: &Value, position: usize) -> Result<Color, BridgeError> {
    let bad = || BridgeError::BadArgument {
        position,
        expected: "color",
        found: describe(value),
    };
    match value {
        Value::String(s) => {
            let text = s.to_str().map_err(|_| bad())?;
            parse_color(text).map_err(|_| bad())
        }
        other => {
            let raw = integer_of(other).ok_or_else(bad)?;
            u32::try_from(raw)
                .ok()
                .and_then(Color::from_packed)
                .ok_or_else(bad)
        }
    }
}

/// Read text for display. Numbers are accepted and formatted as Lua would.
pub fn text(value: &Value, position: usize) -> Result<String, BridgeError> {
    match value {
        Value::String(s) => Ok(s.to_string_lossy().into_owned()),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Number(n) => Ok(format_number(*n)),
        other => Err(BridgeError::BadArgument {
            position,
            expected: "string",
            found: describe(other),
        }),
    }
}

/// Read a non-empty name (widget kind tag or callback name). Numbers are
/// converted the way `lua_tostring` would, so `onClick(h, 5)` names `"5"`.
pub fn name(value: Option<&Value>, position: usize) -> Result<String, BridgeError> {
    let name = match value {
        Some(Value::String(s)) => s.to_string_lossy().into_owned(),
        Some(Value::Integer(i)) => i.to_string(),
        Some(Value::Number(n)) => format_number(*n),
        other => {
            return Err(BridgeError::BadArgument {
                position,
                expected: "string",
                found: other.map(describe).unwrap_or_else(|| "no value".into()),
            })
        }
    };
    if name.is_empty() {
        return Err(BridgeError::BadArgument {
            position,
            expected: "non-empty string",
            found: "\"\"".into(),
        });
    }
    Ok(name)
}

/// What `print` shows for one argument. Like `lua_tostring`, only strings
/// and numbers have a printable form; other values are skipped.
pub fn print_fragment(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.to_string_lossy().into_owned()),
        Value::Integer(i) => Some(i.to_string()),
        Value::Number(n) => Some(format_number(*n)),
        _ => None,
    }
}

fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{n:.1}")
    } else {
        n.to_string()
    }
}
