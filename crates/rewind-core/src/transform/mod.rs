//! Pure transform functions, shared by live recording and replay.
//!
//! Each function maps the current [`RasterState`] and an operation's stored
//! parameters to a new state. Nothing here prompts for input or touches history.

pub mod crop;
pub mod resize;
pub mod rotate;
pub mod zoom;

use std::sync::Arc;

use crate::config::EditorConfig;
use crate::error::{EditorError, Result};
use crate::geometry::{ImageRect, Size};
use crate::operation::{Operation, ResizeParams};
use crate::raster::{RasterState, SharedImage};
use crate::view::{AreaBounds, ViewState};

/// Outcome of applying one operation.
#[derive(Debug)]
pub enum Transition {
    Changed(RasterState),
    /// Silently rejected: no image loaded for a view-only operation, or a zoom
    /// step past the area bound.
    Ignored,
}

pub fn apply(state: &RasterState, op: &Operation, config: &EditorConfig) -> Result<Transition> {
    let bounds = AreaBounds::from_config(&config.bounds);
    match op {
        Operation::Rotate { degrees } => rotate(state, *degrees, config).map(Transition::Changed),
        Operation::Crop { rect } => crop(state, rect).map(Transition::Changed),
        Operation::Resize(params) => resize(state, params, config).map(Transition::Changed),
        Operation::ZoomIn => Ok(zoom_step(state, config.zoom.step, &bounds)),
        Operation::ZoomOut => Ok(zoom_step(state, 1.0 / config.zoom.step, &bounds)),
        Operation::ZoomToRegion { rect, viewport } => {
            zoom_to_region(state, rect, *viewport, &bounds)
        }
        Operation::FitToWindow { viewport } => {
            if state.is_loaded() {
                require_viewport(*viewport)?;
            }
            Ok(rescale(state, |size| zoom::fit_scale(size, *viewport, &bounds)))
        }
        Operation::NormalSize => Ok(rescale(state, |_| 1.0)),
        Operation::CloseFile => Ok(close(state)),
    }
}

fn rotate(state: &RasterState, degrees: f64, config: &EditorConfig) -> Result<RasterState> {
    let checkpoint = state
        .checkpoint
        .as_ref()
        .ok_or(EditorError::NoImageLoaded("no image to be rotated"))?;

    let view = state.view.rotated_by(degrees);
    let working = rotate::rotate_image(checkpoint, view.cumulative_rotation, &config.rotation);
    Ok(RasterState {
        working: Some(Arc::new(working)),
        view: ViewState { scroll: None, ..view },
        ..state.clone()
    })
}

fn crop(state: &RasterState, rect: &ImageRect) -> Result<RasterState> {
    let working = state
        .working
        .as_ref()
        .ok_or(EditorError::NoImageLoaded("no image to be cropped"))?;

    let cropped = Arc::new(crop::subregion(working, rect)?);
    Ok(new_checkpoint(state, cropped))
}

fn resize(state: &RasterState, params: &ResizeParams, config: &EditorConfig) -> Result<RasterState> {
    let working = state
        .working
        .as_ref()
        .ok_or(EditorError::NoImageLoaded("no image to be resized"))?;

    let current = Size::new(working.width(), working.height());
    let target = resize::resolve_target(params, current, config.bounds.resize_pixel_ceiling)?;
    let scaled = resize::scale_image(working, target, params.proportional, config.resize.filter);
    Ok(new_checkpoint(state, Arc::new(scaled)))
}

/// Crop and resize make their result the new rotation reference.
fn new_checkpoint(state: &RasterState, image: SharedImage) -> RasterState {
    RasterState {
        pristine: state.pristine.clone(),
        checkpoint: Some(Arc::clone(&image)),
        working: Some(image),
        view: ViewState {
            cumulative_rotation: 0.0,
            scroll: None,
            ..state.view
        },
    }
}

fn zoom_step(state: &RasterState, factor: f64, bounds: &AreaBounds) -> Transition {
    let Some(size) = state.working_size() else {
        return Transition::Ignored;
    };
    let scale = state.view.scale_factor;
    let allowed = if factor > 1.0 {
        bounds.allows_zoom_in(size, scale, factor)
    } else {
        bounds.allows_zoom_out(size, scale)
    };
    if !allowed {
        return Transition::Ignored;
    }
    Transition::Changed(with_view(state, state.view.with_scale(scale * factor)))
}

fn zoom_to_region(
    state: &RasterState,
    rect: &ImageRect,
    viewport: Size,
    bounds: &AreaBounds,
) -> Result<Transition> {
    let Some(size) = state.working_size() else {
        return Ok(Transition::Ignored);
    };
    if rect.is_degenerate() {
        return Err(EditorError::InvalidCrop(
            "zoom region must have a non-zero size".into(),
        ));
    }
    require_viewport(viewport)?;
    let scale = zoom::region_scale(rect, viewport, size, bounds);
    let view = ViewState {
        scroll: Some(zoom::region_scroll(rect, viewport, scale)),
        ..state.view.with_scale(scale)
    };
    Ok(Transition::Changed(with_view(state, view)))
}

fn rescale(state: &RasterState, scale_for: impl FnOnce(Size) -> f64) -> Transition {
    match state.working_size() {
        Some(size) => Transition::Changed(with_view(state, state.view.with_scale(scale_for(size)))),
        None => Transition::Ignored,
    }
}

fn close(state: &RasterState) -> Transition {
    if !state.is_loaded() {
        return Transition::Ignored;
    }
    Transition::Changed(RasterState {
        pristine: state.pristine.clone(),
        checkpoint: None,
        working: None,
        view: ViewState::default(),
    })
}

/// Scale computations divide by the viewport, so it must not be empty.
fn require_viewport(viewport: Size) -> Result<()> {
    if viewport.width == 0 || viewport.height == 0 {
        return Err(EditorError::InvalidDimensions {
            width: viewport.width,
            height: viewport.height,
        });
    }
    Ok(())
}

fn with_view(state: &RasterState, view: ViewState) -> RasterState {
    RasterState {
        view,
        ..state.clone()
    }
}
