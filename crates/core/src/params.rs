//! Pure helper functions for extracting typed parameters from a `serde_json::Value` object.
//!
//! Each helper takes a JSON value, a key name, and a default. If the key is
//! missing or the value has the wrong shape, the default is returned. Ranges
//! are written as two-element arrays `[lo, hi]`; color ranges as an object
//! `{"r": [lo, hi], "g": [lo, hi], "b": [lo, hi]}`.

use serde_json::Value;

use crate::color::ColorRange;

/// Extracts a `u32` from `params[name]`, returning `default` if missing, negative,
/// fractional, or too large.
pub fn param_u32(params: &Value, name: &str, default: u32) -> u32 {
    params
        .get(name)
        .and_then(Value::as_u64)
        .and_then(|v| u32::try_from(v).ok())
        .unwrap_or(default)
}

/// Extracts a `bool` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_bool(params: &Value, name: &str, default: bool) -> bool {
    params.get(name).and_then(Value::as_bool).unwrap_or(default)
}

/// Extracts a `String` from `params[name]`, returning `default` if missing or wrong type.
pub fn param_string(params: &Value, name: &str, default: &str) -> String {
    params
        .get(name)
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| default.to_owned())
}

/// Extracts an integer range `[lo, hi]` from `params[name]`.
///
/// Order is preserved as written; validating `lo <= hi` is the caller's job.
pub fn param_int_range(params: &Value, name: &str, default: (i32, i32)) -> (i32, i32) {
    pair(params.get(name), |v| v.as_i64().and_then(|n| i32::try_from(n).ok())).unwrap_or(default)
}

/// Extracts a float range `[lo, hi]` from `params[name]`.
pub fn param_f64_range(params: &Value, name: &str, default: (f64, f64)) -> (f64, f64) {
    pair(params.get(name), Value::as_f64).unwrap_or(default)
}

/// Extracts a per-channel color range from `params[name]`.
///
/// Channels missing from the object keep their default bounds.
pub fn param_color_range(params: &Value, name: &str, default: ColorRange) -> ColorRange {
    let Some(obj) = params.get(name).filter(|v| v.is_object()) else {
        return default;
    };
    let channel = |key: &str, fallback: (u8, u8)| {
        pair(obj.get(key), |v| v.as_u64().and_then(|n| u8::try_from(n).ok())).unwrap_or(fallback)
    };
    ColorRange {
        r: channel("r", default.r),
        g: channel("g", default.g),
        b: channel("b", default.b),
    }
}

/// Human-readable JSON type name, for error messages.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn pair<T>(value: Option<&Value>, item: impl Fn(&Value) -> Option<T>) -> Option<(T, T)> {
    match value?.as_array()?.as_slice() {
        [lo, hi] => Some((item(lo)?, item(hi)?)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_u32_rejects_negative_fractional_and_huge_values() {
        assert_eq!(param_u32(&json!({"n": 42}), "n", 0), 42);
        assert_eq!(param_u32(&json!({"n": -1}), "n", 5), 5);
        assert_eq!(param_u32(&json!({"n": 2.5}), "n", 5), 5);
        assert_eq!(param_u32(&json!({"n": 1u64 << 40}), "n", 5), 5);
    }

    #[test]
    fn param_bool_returns_default_for_wrong_type() {
        assert!(param_bool(&json!({"clamp": true}), "clamp", false));
        assert!(!param_bool(&json!({"clamp": 1}), "clamp", false));
    }

    #[test]
    fn param_string_extracts_and_falls_back() {
        assert_eq!(param_string(&json!({"bg": "#000000"}), "bg", "#add8e6"), "#000000");
        assert_eq!(param_string(&json!({"bg": 3}), "bg", "#add8e6"), "#add8e6");
    }

    #[test]
    fn param_int_range_reads_pairs_only() {
        let params = json!({"ok": [3, 5], "short": [3], "mixed": [3, "x"], "inverted": [9, 2]});
        assert_eq!(param_int_range(&params, "ok", (0, 0)), (3, 5));
        assert_eq!(param_int_range(&params, "short", (1, 2)), (1, 2));
        assert_eq!(param_int_range(&params, "mixed", (1, 2)), (1, 2));
        assert_eq!(param_int_range(&params, "inverted", (1, 2)), (9, 2));
        assert_eq!(param_int_range(&params, "missing", (1, 2)), (1, 2));
    }

    #[test]
    fn param_f64_range_accepts_integers() {
        let params = json!({"fraction": [0, 0.25]});
        assert_eq!(param_f64_range(&params, "fraction", (0.5, 0.5)), (0.0, 0.25));
    }

    #[test]
    fn param_color_range_overrides_only_given_channels() {
        let params = json!({"coral_color": {"g": [0, 10], "b": [300, 400]}});
        let range = param_color_range(&params, "coral_color", ColorRange::CORAL);
        assert_eq!(range.r, ColorRange::CORAL.r);
        assert_eq!(range.g, (0, 10));
        assert_eq!(range.b, ColorRange::CORAL.b);
    }

    #[test]
    fn json_type_name_covers_all_variants() {
        assert_eq!(json_type_name(&json!(null)), "null");
        assert_eq!(json_type_name(&json!([1])), "array");
        assert_eq!(json_type_name(&json!({})), "object");
        assert_eq!(json_type_name(&json!("s")), "string");
    }
}
