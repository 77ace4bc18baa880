//! Instance configuration: defaults, TOML parsing, and validation

use confetti_core::{ConfettiError, Position, Result};
use serde::Serialize;
use std::path::Path;

pub const DEFAULT_SIZES: [f64; 6] = [10.0, 15.0, 20.0, 25.0, 30.0, 35.0];
pub const DEFAULT_LIMIT: usize = 50;
pub const DEFAULT_Y_VELOCITY_MAX: f64 = 40.0;
pub const DEFAULT_X_VELOCITY_MAX: f64 = 15.0;
pub const DEFAULT_SPIN_VELOCITY_MAX: f64 = 35.0;

const SELECTOR_MSG: &str = "The 'selector' property is required and must be a string.";
const POSITION_MSG: &str =
    "The 'position' property is required and must be an object with 'x' and 'y' as finite numbers.";
const IMAGES_MSG: &str =
    "The 'images' property is required and must be a non-empty array of image sources.";

/// Normalized configuration of one confetti instance.
///
/// Only `selector`, `position` and `images` are checked. The launch point
/// must be finite: a NaN or infinite coordinate would keep a particle from
/// ever crossing the off-screen threshold. The remaining numeric options
/// are taken as given: a zero `limit` never spawns, an empty
/// `sizes` list makes every spawn a no-op, and non-positive velocity
/// maxima simply produce degenerate motion.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfettiConfig {
    pub selector: String,
    pub position: Position,
    pub images: Vec<String>,
    pub sizes: Vec<f64>,
    /// Maximum number of particles alive at once
    pub limit: usize,
    pub y_velocity_max: f64,
    pub x_velocity_max: f64,
    pub spin_velocity_max: f64,
    /// Fixed PRNG seed for reproducible bursts
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
}

impl ConfettiConfig {
    /// Config with the required fields set and every optional field at its default
    pub fn new(selector: impl Into<String>, position: Position, images: Vec<String>) -> Self {
        Self {
            selector: selector.into(),
            position,
            images,
            sizes: DEFAULT_SIZES.to_vec(),
            limit: DEFAULT_LIMIT,
            y_velocity_max: DEFAULT_Y_VELOCITY_MAX,
            x_velocity_max: DEFAULT_X_VELOCITY_MAX,
            spin_velocity_max: DEFAULT_SPIN_VELOCITY_MAX,
            seed: None,
        }
    }

    pub fn with_sizes(mut self, sizes: Vec<f64>) -> Self {
        self.sizes = sizes;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_seed(mut self, seed: u32) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the required fields
    pub fn validate(&self) -> Result<()> {
        if self.selector.is_empty() {
            return Err(ConfettiError::invalid(SELECTOR_MSG));
        }
        if !(self.position.x.is_finite() && self.position.y.is_finite()) {
            return Err(ConfettiError::invalid(POSITION_MSG));
        }
        if self.images.is_empty() {
            return Err(ConfettiError::invalid(IMAGES_MSG));
        }
        Ok(())
    }

    /// Parse and validate a config from an untyped TOML table
    pub fn from_toml(table: &toml::value::Table) -> Result<Self> {
        let selector = match table.get("selector") {
            Some(toml::Value::String(s)) if !s.is_empty() => s.clone(),
            _ => return Err(ConfettiError::invalid(SELECTOR_MSG)),
        };

        let position = table
            .get("position")
            .and_then(|v| v.as_table())
            .and_then(|pos| {
                let x = pos.get("x").and_then(toml_number)?;
                let y = pos.get("y").and_then(toml_number)?;
                (x.is_finite() && y.is_finite()).then(|| Position::new(x, y))
            })
            .ok_or_else(|| ConfettiError::invalid(POSITION_MSG))?;

        let images = match table.get("images") {
            Some(toml::Value::Array(arr)) if !arr.is_empty() => arr
                .iter()
                .map(|v| v.as_str().map(str::to_string))
                .collect::<Option<Vec<_>>>()
                .ok_or_else(|| ConfettiError::invalid(IMAGES_MSG))?,
            _ => return Err(ConfettiError::invalid(IMAGES_MSG)),
        };

        let mut config = Self::new(selector, position, images);

        if let Some(v) = lookup(table, "sizes", "sizes") {
            match v.as_array() {
                Some(arr) => config.sizes = arr.iter().filter_map(toml_number).collect(),
                None => log::warn!("ignoring non-array 'sizes', using defaults"),
            }
        }
        if let Some(v) = lookup(table, "limit", "limit") {
            config.limit = toml_number(v).map(limit_from).unwrap_or(DEFAULT_LIMIT);
        }
        if let Some(v) = lookup(table, "y_velocity_max", "yVelocityMax") {
            config.y_velocity_max = toml_f64(v, DEFAULT_Y_VELOCITY_MAX);
        }
        if let Some(v) = lookup(table, "x_velocity_max", "xVelocityMax") {
            config.x_velocity_max = toml_f64(v, DEFAULT_X_VELOCITY_MAX);
        }
        if let Some(v) = lookup(table, "spin_velocity_max", "spinVelocityMax") {
            config.spin_velocity_max = toml_f64(v, DEFAULT_SPIN_VELOCITY_MAX);
        }
        if let Some(v) = table.get("seed") {
            config.seed = v.as_integer().and_then(|i| u32::try_from(i).ok());
            if config.seed.is_none() {
                log::warn!("ignoring 'seed' that is not a 32-bit unsigned integer");
            }
        }

        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML document. Reads the `[confetti]` table if present,
    /// otherwise the top-level table.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let root: toml::value::Table = toml::from_str(source)?;
        match root.get("confetti").and_then(|v| v.as_table()) {
            Some(table) => Self::from_toml(table),
            None => Self::from_toml(&root),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

/// Effective particle cap for a numeric `limit`.
///
/// The spawner runs while `count < limit`, so a fractional limit admits
/// `ceil(limit)` particles and anything non-positive admits none.
fn limit_from(value: f64) -> usize {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        value.ceil() as usize
    }
}

// ── TOML helpers (handle integer/float coercion) ──

fn lookup<'a>(table: &'a toml::value::Table, snake: &str, camel: &str) -> Option<&'a toml::Value> {
    table.get(snake).or_else(|| table.get(camel))
}

fn toml_number(v: &toml::Value) -> Option<f64> {
    v.as_float().or_else(|| v.as_integer().map(|i| i as f64))
}

fn toml_f64(v: &toml::Value, default: f64) -> f64 {
    toml_number(v).unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(source: &str) -> Result<ConfettiConfig> {
        ConfettiConfig::from_toml_str(source)
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let config = parse(
            r##"
selector = "#stage"
position = { x = 10, y = 20.5 }
images = ["a.png"]
"##,
        )
        .unwrap();
        assert_eq!(config.selector, "#stage");
        assert_eq!(config.position, Position::new(10.0, 20.5));
        assert_eq!(config.sizes, DEFAULT_SIZES.to_vec());
        assert_eq!(config.limit, 50);
        assert_eq!(config.y_velocity_max, 40.0);
        assert_eq!(config.x_velocity_max, 15.0);
        assert_eq!(config.spin_velocity_max, 35.0);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn parse_optional_fields_in_both_spellings() {
        let config = parse(
            r##"
[confetti]
selector = "#a"
position = { x = 0, y = 0 }
images = ["x.png", "y.png"]
sizes = [10, 12.5]
limit = 3
yVelocityMax = 20
x_velocity_max = 5.5
spinVelocityMax = 0
seed = 42
"##,
        )
        .unwrap();
        assert_eq!(config.images.len(), 2);
        assert_eq!(config.sizes, vec![10.0, 12.5]);
        assert_eq!(config.limit, 3);
        assert_eq!(config.y_velocity_max, 20.0);
        assert_eq!(config.x_velocity_max, 5.5);
        assert_eq!(config.spin_velocity_max, 0.0);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn missing_images_is_invalid() {
        let err = parse(
            r##"
selector = "#a"
position = { x = 0, y = 0 }
"##,
        )
        .unwrap_err();
        assert!(err.is_invalid_configuration());
    }

    #[test]
    fn empty_or_non_array_images_is_invalid() {
        for images in ["[]", "\"x.png\"", "[1, 2]"] {
            let source = format!(
                "selector = \"#a\"\nposition = {{ x = 0, y = 0 }}\nimages = {}\n",
                images
            );
            assert!(parse(&source).unwrap_err().is_invalid_configuration());
        }
    }

    #[test]
    fn bad_selector_is_invalid() {
        for selector in ["", "selector = 5", "selector = \"\""] {
            let source = format!(
                "{}\nposition = {{ x = 0, y = 0 }}\nimages = [\"x.png\"]\n",
                selector
            );
            assert!(parse(&source).unwrap_err().is_invalid_configuration());
        }
    }

    #[test]
    fn bad_position_is_invalid() {
        for position in ["", "position = 3", "position = { x = 0 }", "position = { x = \"0\", y = 1 }"] {
            let source = format!(
                "selector = \"#a\"\n{}\nimages = [\"x.png\"]\n",
                position
            );
            assert!(parse(&source).unwrap_err().is_invalid_configuration());
        }
    }

    #[test]
    fn non_finite_position_is_invalid() {
        for position in ["{ x = 0, y = nan }", "{ x = inf, y = 0 }", "{ x = 0, y = -inf }"] {
            let source = format!(
                "selector = \"#a\"\nposition = {}\nimages = [\"x.png\"]\n",
                position
            );
            assert!(parse(&source).unwrap_err().is_invalid_configuration());
        }

        let typed = ConfettiConfig::new("#a", Position::new(0.0, f64::NAN), vec!["x.png".into()]);
        assert!(typed.validate().unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        let err = parse("selector = ").unwrap_err();
        assert!(matches!(err, ConfettiError::TomlParseError(_)));
    }

    #[test]
    fn degenerate_limits_are_normalized() {
        assert_eq!(limit_from(-5.0), 0);
        assert_eq!(limit_from(0.0), 0);
        assert_eq!(limit_from(f64::NAN), 0);
        assert_eq!(limit_from(2.5), 3);
        assert_eq!(limit_from(7.0), 7);

        let config = parse(
            r##"
selector = "#a"
position = { x = 0, y = 0 }
images = ["x.png"]
limit = -4
"##,
        )
        .unwrap();
        assert_eq!(config.limit, 0);
    }

    #[test]
    fn ill_typed_optionals_fall_back_to_defaults() {
        let config = parse(
            r##"
selector = "#a"
position = { x = 0, y = 0 }
images = ["x.png"]
sizes = "big"
limit = "many"
yVelocityMax = true
seed = -1
"##,
        )
        .unwrap();
        assert_eq!(config.sizes, DEFAULT_SIZES.to_vec());
        assert_eq!(config.limit, DEFAULT_LIMIT);
        assert_eq!(config.y_velocity_max, DEFAULT_Y_VELOCITY_MAX);
        assert_eq!(config.seed, None);
    }

    #[test]
    fn typed_config_validation() {
        let ok = ConfettiConfig::new("#a", Position::ORIGIN, vec!["x.png".into()]);
        assert!(ok.validate().is_ok());

        let no_images = ConfettiConfig::new("#a", Position::ORIGIN, Vec::new());
        assert!(no_images.validate().unwrap_err().is_invalid_configuration());

        let no_selector = ConfettiConfig::new("", Position::ORIGIN, vec!["x.png".into()]);
        assert!(no_selector.validate().unwrap_err().is_invalid_configuration());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let config = ConfettiConfig::new("#a", Position::ORIGIN, vec!["x.png".into()])
            .with_limit(5)
            .with_seed(9);
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["yVelocityMax"], 40.0);
        assert_eq!(json["limit"], 5);
        assert_eq!(json["seed"], 9);
    }
}
