//! Deterministic reconstruction of editor state from the pristine source.

use std::sync::Arc;

use tracing::debug;

use crate::config::EditorConfig;
use crate::error::Result;
use crate::history::{Mode, ModeGuard};
use crate::operation::Operation;
use crate::raster::{RasterState, SharedImage};
use crate::transform::{self, Transition};

/// Re-execute `ops` in order against `pristine`.
///
/// Every operation is dispatched to the same transform used live, fed only
/// from its stored parameters. The result depends on nothing but
/// `(pristine, ops, config)`. The guard proves the caller is in
/// [`Mode::Replaying`], so nothing applied here is recorded.
pub fn replay(
    pristine: Option<&SharedImage>,
    ops: &[Operation],
    config: &EditorConfig,
    guard: &ModeGuard<'_>,
) -> Result<RasterState> {
    debug_assert_eq!(guard.mode(), Mode::Replaying);

    let mut state = match pristine {
        Some(p) => RasterState::from_pristine(Arc::clone(p)),
        None => RasterState::default(),
    };
    for op in ops {
        if let Transition::Changed(next) = transform::apply(&state, op, config)? {
            state = next;
        }
    }

    debug!(ops = ops.len(), "Replayed history");
    Ok(state)
}
