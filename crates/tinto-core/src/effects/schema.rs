//! Parameter declarations and resolution.

use serde::Serialize;

/// How a parameter should be interpreted by input layers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ParamRole {
    /// Continuous strength/intensity value.
    Amount,
    /// Kernel or block size in pixels.
    Size,
    /// Quantization level count.
    Levels,
    /// Discrete variant selector.
    Mode,
    /// Pseudo-random variation seed.
    Seed,
}

/// Declaration of a single effect parameter.
///
/// Invariant: `min <= default <= max`. A step of 1 or more marks the
/// parameter integral — resolved values are rounded — while a
/// fractional step only affects formatting and rounding, never the
/// transform math itself.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub default: f32,
    pub min: f32,
    pub max: f32,
    pub step: f32,
    pub role: ParamRole,
}

impl ParamSpec {
    pub fn is_integral(&self) -> bool {
        self.step >= 1.0
    }
}

/// Ordered parameter declarations for one effect.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct ParamSchema(pub &'static [ParamSpec]);

impl ParamSchema {
    pub const EMPTY: ParamSchema = ParamSchema(&[]);

    pub fn specs(&self) -> &'static [ParamSpec] {
        self.0
    }

    pub fn get(&self, name: &str) -> Option<&ParamSpec> {
        self.0.iter().find(|s| s.name == name)
    }

    /// Resolve raw `(name, value)` pairs into a complete set: unknown
    /// names are dropped, missing parameters take their defaults, and
    /// every value is clamped to its declared bounds (integral ones
    /// rounded).
    pub fn resolve(&self, raw: &[(String, f32)]) -> ParamSet {
        let values = self
            .0
            .iter()
            .map(|spec| {
                let supplied = raw
                    .iter()
                    .find(|(name, _)| name == spec.name)
                    .map(|(_, v)| *v);
                let mut value = supplied.unwrap_or(spec.default).clamp(spec.min, spec.max);
                if spec.is_integral() {
                    value = value.round();
                }
                (spec.name, value)
            })
            .collect();
        ParamSet { values }
    }
}

/// Resolved parameter values for one invocation.
#[derive(Clone, Debug, Default)]
pub struct ParamSet {
    values: Vec<(&'static str, f32)>,
}

impl ParamSet {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Value by name, falling back to 0 for names outside the schema.
    pub fn get(&self, name: &str) -> f32 {
        self.values
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| *v)
            .unwrap_or(0.0)
    }

    pub fn get_u32(&self, name: &str) -> u32 {
        self.get(name).max(0.0) as u32
    }

    pub fn get_i32(&self, name: &str) -> i32 {
        self.get(name) as i32
    }
}
