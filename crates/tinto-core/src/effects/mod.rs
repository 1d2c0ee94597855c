//! Effect catalog — by-id lookup over tagged transform records.
//!
//! Effects are plain data: an id, a parameter schema, and a pure
//! transform function. Registering a new one is a data registration,
//! not a new type in an inheritance tree.

mod artistic;
mod basic;
mod invoker;
pub mod schema;
mod stylize;
mod tonal;

pub use invoker::invoke;
pub use schema::{ParamRole, ParamSchema, ParamSet, ParamSpec};

use tracing::info;

use crate::error::EffectError;
use crate::pixel_buf::PixelBuf;

/// Category used for UI grouping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EffectCategory {
    Basic,
    Color,
    Artistic,
    Stylistic,
    Advanced,
}

/// Result of one effect application.
///
/// `degraded` is set when an internal step failed and a documented
/// simpler fallback was substituted.
#[derive(Clone, Debug)]
pub struct EffectOutput {
    pub buffer: PixelBuf,
    pub degraded: bool,
}

impl EffectOutput {
    pub fn full(buffer: PixelBuf) -> Self {
        Self {
            buffer,
            degraded: false,
        }
    }

    pub fn degraded(buffer: PixelBuf) -> Self {
        Self {
            buffer,
            degraded: true,
        }
    }
}

/// Pure pixel transform. Never mutates its input; total over any
/// well-formed buffer and any parameter set resolved through the
/// effect's schema.
pub type Transform = fn(&PixelBuf, &ParamSet) -> Result<EffectOutput, EffectError>;

/// One catalog entry.
pub struct EffectDef {
    pub id: &'static str,
    pub label: &'static str,
    pub category: EffectCategory,
    pub schema: ParamSchema,
    pub transform: Transform,
}

/// Registry holding all available effects for lookup by id.
pub struct EffectCatalog {
    effects: Vec<EffectDef>,
}

impl EffectCatalog {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            effects: Vec::new(),
        }
    }

    /// Registry with all built-in effects, in catalog order.
    pub fn with_builtins() -> Self {
        let mut catalog = Self::new();

        catalog.register(basic::grayscale());
        catalog.register(basic::negative());
        catalog.register(basic::posterize());

        catalog.register(tonal::sepia());
        catalog.register(tonal::warm());
        catalog.register(tonal::cool());

        catalog.register(artistic::cartoon());
        catalog.register(artistic::watercolor());
        catalog.register(artistic::oilpaint());
        catalog.register(artistic::emboss());

        catalog.register(stylize::vignette());
        catalog.register(stylize::edge());
        catalog.register(stylize::pixelate());
        catalog.register(stylize::glitch());

        catalog.register(artistic::hdr());

        info!(count = catalog.effects.len(), "registered built-in effects");
        catalog
    }

    /// Register an effect. Replaces any previous entry with the same
    /// id, keeping its position.
    pub fn register(&mut self, def: EffectDef) {
        if let Some(existing) = self.effects.iter_mut().find(|e| e.id == def.id) {
            *existing = def;
        } else {
            self.effects.push(def);
        }
    }

    /// Look up an effect by id.
    pub fn get(&self, id: &str) -> Option<&EffectDef> {
        self.effects.iter().find(|e| e.id == id)
    }

    /// Effect ids in registration order.
    pub fn ids(&self) -> Vec<&'static str> {
        self.effects.iter().map(|e| e.id).collect()
    }

    /// Effects in one category, in registration order.
    pub fn list_by_category(&self, category: EffectCategory) -> Vec<&EffectDef> {
        self.effects
            .iter()
            .filter(|e| e.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.effects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.effects.is_empty()
    }
}

impl Default for EffectCatalog {
    fn default() -> Self {
        Self::new()
    }
}
