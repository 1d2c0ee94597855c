//! The edit session: pipeline, invoker, history, and debounce wiring.

use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::{debug, info};

use tinto_core::effects::{EffectCatalog, invoke};
use tinto_core::error::EffectError;
use tinto_core::io;
use tinto_core::pipeline::AdjustmentPipeline;
use tinto_core::pixel_buf::{Adjustments, PixelBuf};

use crate::debounce::Debounce;
use crate::history::{History, Snapshot};

/// Quiet period coalescing slider changes into one recompute.
pub const RECOMPUTE_WINDOW: Duration = Duration::from_millis(100);
/// Quiet period coalescing post-recompute activity into one commit.
pub const COMMIT_WINDOW: Duration = Duration::from_millis(500);

/// What a [`EditSession::tick`] call did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The current buffer was rebuilt from source.
    pub recomputed: bool,
    /// A snapshot was committed to history.
    pub committed: bool,
}

/// Single-threaded editing engine.
///
/// Owns the canonical source, the current derived buffer, and the live
/// adjustment vector. All pixel work is synchronous; time only
/// advances when the caller passes an [`Instant`] in, so the debounce
/// behavior is fully deterministic.
pub struct EditSession {
    catalog: EffectCatalog,
    pipeline: AdjustmentPipeline,
    source: PixelBuf,
    current: PixelBuf,
    adjustments: Adjustments,
    history: History,
    recompute: Debounce<Adjustments>,
    commit: Debounce<()>,
}

impl EditSession {
    /// Start a session over an in-memory buffer. The initial state is
    /// committed so the first undo target always exists.
    pub fn new(source: PixelBuf) -> Self {
        let mut session = Self {
            catalog: EffectCatalog::with_builtins(),
            pipeline: AdjustmentPipeline::new(),
            current: source.clone(),
            source,
            adjustments: Adjustments::default(),
            history: History::default(),
            recompute: Debounce::new(RECOMPUTE_WINDOW),
            commit: Debounce::new(COMMIT_WINDOW),
        };
        session.commit_snapshot();
        session
    }

    /// Start a session from an image file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let source = io::load_buffer(path)?;
        info!(?path, "opened image");
        Ok(Self::new(source))
    }

    /// Swap in a new source image, dropping all edit state.
    pub fn replace_source(&mut self, source: PixelBuf) {
        self.current = source.clone();
        self.source = source;
        self.adjustments = Adjustments::default();
        self.recompute.cancel();
        self.commit.cancel();
        self.history.reset();
        self.commit_snapshot();
    }

    /// Persist the current buffer.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        io::save_buffer(path, &self.current)
    }

    pub fn current(&self) -> &PixelBuf {
        &self.current
    }

    pub fn source(&self) -> &PixelBuf {
        &self.source
    }

    pub fn adjustments(&self) -> Adjustments {
        self.adjustments
    }

    pub fn catalog(&self) -> &EffectCatalog {
        &self.catalog
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    /// (width, height) of the current buffer, for fit-to-view math
    /// done by the display layer.
    pub fn dimensions(&self) -> (u32, u32) {
        self.current.dimensions()
    }

    /// Record a new slider vector and arm the recompute window. The
    /// actual work happens in [`tick`](Self::tick) once the burst goes
    /// quiet.
    pub fn set_adjustments(&mut self, adjustments: Adjustments, now: Instant) {
        debug!(?adjustments, "adjustments pending");
        self.recompute.arm(now, adjustments);
    }

    /// Fire any due debounce windows.
    ///
    /// A due recompute rebuilds the current buffer from the canonical
    /// source and arms the commit window; a due commit captures one
    /// history snapshot for the whole burst.
    pub fn tick(&mut self, now: Instant) -> Result<TickOutcome> {
        let mut outcome = TickOutcome::default();

        if let Some(adjustments) = self.recompute.take_due(now) {
            self.adjustments = adjustments;
            self.current = self.pipeline.recompute(&self.source, &self.adjustments)?;
            self.commit.arm(now, ());
            outcome.recomputed = true;
        }

        if self.commit.take_due(now).is_some() {
            self.commit_snapshot();
            outcome.committed = true;
        }

        Ok(outcome)
    }

    /// Apply a catalog effect to the current buffer.
    ///
    /// Effects are discrete actions: the result is committed
    /// immediately, without the long debounce, and any pending
    /// slider commit is superseded. Returns whether the effect had to
    /// fall back to a degraded rendition.
    pub fn apply_effect(
        &mut self,
        id: &str,
        raw_params: &[(String, f32)],
    ) -> Result<bool, EffectError> {
        let output = invoke(&self.catalog, id, &self.current, raw_params)?;
        self.current = output.buffer;
        self.commit.cancel();
        self.commit_snapshot();
        debug!(id, degraded = output.degraded, "applied effect");
        Ok(output.degraded)
    }

    /// Step back in history. Restores buffer and sliders silently —
    /// no recompute is triggered — and hands the restored vector back
    /// so input widgets can resynchronize.
    pub fn undo(&mut self) -> Option<Adjustments> {
        let snapshot = self.history.undo()?;
        self.current = snapshot.buffer.clone();
        self.adjustments = snapshot.adjustments;
        self.recompute.cancel();
        self.commit.cancel();
        Some(self.adjustments)
    }

    /// Step forward in history; same restore semantics as undo.
    pub fn redo(&mut self) -> Option<Adjustments> {
        let snapshot = self.history.redo()?;
        self.current = snapshot.buffer.clone();
        self.adjustments = snapshot.adjustments;
        self.recompute.cancel();
        self.commit.cancel();
        Some(self.adjustments)
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Back to the untouched source: zero sliders, immediate commit.
    pub fn reset_edits(&mut self) {
        self.current = self.source.clone();
        self.adjustments = Adjustments::default();
        self.recompute.cancel();
        self.commit.cancel();
        self.commit_snapshot();
    }

    fn commit_snapshot(&mut self) {
        self.history.commit(Snapshot {
            buffer: self.current.clone(),
            adjustments: self.adjustments,
        });
    }
}
