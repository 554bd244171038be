//! Sampling ranges for scene generation.

use reefgen_core::color::{ColorRange, Rgb};
use reefgen_core::error::ReefError;
use reefgen_core::params::{
    json_type_name, param_bool, param_color_range, param_f64_range, param_int_range, param_string,
    param_u32,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

const DEFAULT_GROUND_FRACTION: (f64, f64) = (0.05, 0.5);
const DEFAULT_FISH_WIDTH: (i32, i32) = (10, 30);
const DEFAULT_FISH_HEIGHT: (i32, i32) = (5, 20);
const DEFAULT_SHARK_WIDTH: (i32, i32) = (30, 40);
const DEFAULT_SHARK_HEIGHT: (i32, i32) = (20, 30);
const DEFAULT_CORAL_SIZE: (i32, i32) = (20, 50);
const DEFAULT_CORAL_LEVELS: (i32, i32) = (2, 4);
const DEFAULT_MAX_BLUR_RADIUS: u32 = 2;

/// Deepest coral recursion accepted; node count grows as up to 5^levels.
pub const MAX_CORAL_LEVELS: i32 = 6;
/// Largest blur radius accepted.
pub const MAX_BLUR_RADIUS: u32 = 16;

/// Ranges every random draw of a scene is taken from.
///
/// Integer ranges are inclusive on both ends; the ground fraction is
/// half-open `[lo, hi)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneParams {
    pub background: Rgb,
    pub ground_fraction: (f64, f64),
    pub ground_color: ColorRange,
    pub fish_width: (i32, i32),
    pub fish_height: (i32, i32),
    pub fish_color: ColorRange,
    pub shark_width: (i32, i32),
    pub shark_height: (i32, i32),
    pub shark_color: ColorRange,
    pub coral_size: (i32, i32),
    pub coral_levels: (i32, i32),
    pub coral_color: ColorRange,
    /// Keep coral strokes at least one pixel wide at deep levels.
    pub clamp_stroke: bool,
    pub max_blur_radius: u32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            background: Rgb::WATER,
            ground_fraction: DEFAULT_GROUND_FRACTION,
            ground_color: ColorRange::FULL,
            fish_width: DEFAULT_FISH_WIDTH,
            fish_height: DEFAULT_FISH_HEIGHT,
            fish_color: ColorRange::FULL,
            shark_width: DEFAULT_SHARK_WIDTH,
            shark_height: DEFAULT_SHARK_HEIGHT,
            shark_color: ColorRange::FULL,
            coral_size: DEFAULT_CORAL_SIZE,
            coral_levels: DEFAULT_CORAL_LEVELS,
            coral_color: ColorRange::CORAL,
            clamp_stroke: true,
            max_blur_radius: DEFAULT_MAX_BLUR_RADIUS,
        }
    }
}

impl SceneParams {
    /// Reads overrides from a JSON object, falling back to defaults for
    /// missing or wrongly shaped keys, then validates the result.
    ///
    /// Returns `ReefError::ParamTypeMismatch` if `params` is not an object
    /// (or null), `ReefError::InvalidColor` for an unparsable background,
    /// and `ReefError::InvalidParam` for unusable ranges.
    pub fn from_json(params: &Value) -> Result<Self, ReefError> {
        if !(params.is_object() || params.is_null()) {
            return Err(ReefError::ParamTypeMismatch {
                name: "params".into(),
                expected: "object".into(),
                got: json_type_name(params).into(),
            });
        }
        let d = Self::default();
        let background = Rgb::from_hex(&param_string(params, "background", &d.background.to_hex()))?;
        let parsed = Self {
            background,
            ground_fraction: param_f64_range(params, "ground_fraction", d.ground_fraction),
            ground_color: param_color_range(params, "ground_color", d.ground_color),
            fish_width: param_int_range(params, "fish_width", d.fish_width),
            fish_height: param_int_range(params, "fish_height", d.fish_height),
            fish_color: param_color_range(params, "fish_color", d.fish_color),
            shark_width: param_int_range(params, "shark_width", d.shark_width),
            shark_height: param_int_range(params, "shark_height", d.shark_height),
            shark_color: param_color_range(params, "shark_color", d.shark_color),
            coral_size: param_int_range(params, "coral_size", d.coral_size),
            coral_levels: param_int_range(params, "coral_levels", d.coral_levels),
            coral_color: param_color_range(params, "coral_color", d.coral_color),
            clamp_stroke: param_bool(params, "clamp_stroke", d.clamp_stroke),
            max_blur_radius: param_u32(params, "max_blur_radius", d.max_blur_radius),
        };
        parsed.validate()?;
        Ok(parsed)
    }

    /// Rejects inverted or out-of-domain ranges before any drawing starts.
    pub fn validate(&self) -> Result<(), ReefError> {
        let (flo, fhi) = self.ground_fraction;
        if !(flo > 0.0 && flo <= fhi && fhi <= 1.0) {
            return Err(ReefError::invalid_param(
                "ground_fraction",
                format!("expected 0 < lo <= hi <= 1, got [{flo}, {fhi}]"),
            ));
        }
        let sizes = [
            ("fish_width", self.fish_width),
            ("fish_height", self.fish_height),
            ("shark_width", self.shark_width),
            ("shark_height", self.shark_height),
            ("coral_size", self.coral_size),
        ];
        for (name, range) in sizes {
            check_int_range(name, range, 0, i32::from(u16::MAX))?;
        }
        check_int_range("coral_levels", self.coral_levels, 0, MAX_CORAL_LEVELS)?;
        self.ground_color.validate("ground_color")?;
        self.fish_color.validate("fish_color")?;
        self.shark_color.validate("shark_color")?;
        self.coral_color.validate("coral_color")?;
        if self.max_blur_radius > MAX_BLUR_RADIUS {
            return Err(ReefError::invalid_param(
                "max_blur_radius",
                format!("{} exceeds {MAX_BLUR_RADIUS}", self.max_blur_radius),
            ));
        }
        Ok(())
    }

    /// Current values as a JSON object, in the same shape `from_json` reads.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }

    /// Schema describing every parameter, its type, and its default.
    pub fn schema() -> Value {
        let d = Self::default();
        let int_range = |default: (i32, i32), description: &str| {
            json!({"type": "int_range", "default": [default.0, default.1], "description": description})
        };
        let color_range = |default: ColorRange, description: &str| {
            json!({"type": "color_range", "default": default, "description": description})
        };
        json!({
            "background": {
                "type": "color",
                "default": d.background,
                "description": "Water color behind every organism"
            },
            "ground_fraction": {
                "type": "float_range",
                "default": [d.ground_fraction.0, d.ground_fraction.1],
                "min": 0.0,
                "max": 1.0,
                "description": "Share of the canvas height covered by seafloor, drawn once per scene"
            },
            "ground_color": color_range(d.ground_color, "Seafloor color"),
            "fish_width": int_range(d.fish_width, "Fish body bounding-box width"),
            "fish_height": int_range(d.fish_height, "Fish body bounding-box height"),
            "fish_color": color_range(d.fish_color, "Fish color"),
            "shark_width": int_range(d.shark_width, "Shark body bounding-box width"),
            "shark_height": int_range(d.shark_height, "Shark body bounding-box height"),
            "shark_color": color_range(d.shark_color, "Shark color"),
            "coral_size": int_range(d.coral_size, "Coral trunk length scale (trunk is half of it)"),
            "coral_levels": {
                "type": "int_range",
                "default": [d.coral_levels.0, d.coral_levels.1],
                "min": 0,
                "max": MAX_CORAL_LEVELS,
                "description": "Branching levels above the trunk"
            },
            "coral_color": color_range(d.coral_color, "Coral color"),
            "clamp_stroke": {
                "type": "bool",
                "default": d.clamp_stroke,
                "description": "Keep coral strokes at least one pixel wide"
            },
            "max_blur_radius": {
                "type": "integer",
                "default": d.max_blur_radius,
                "min": 0,
                "max": MAX_BLUR_RADIUS,
                "description": "Upper bound of the random image blur radius; the mask is never blurred"
            }
        })
    }
}

fn check_int_range(name: &str, (lo, hi): (i32, i32), min: i32, max: i32) -> Result<(), ReefError> {
    if lo > hi {
        return Err(ReefError::invalid_param(name, format!("min {lo} > max {hi}")));
    }
    if lo < min || hi > max {
        return Err(ReefError::invalid_param(
            name,
            format!("[{lo}, {hi}] outside [{min}, {max}]"),
        ));
    }
    Ok(())
}
