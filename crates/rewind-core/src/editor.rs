//! The editing session: raster store, history and the record/undo/redo/reset
//! protocol behind one call surface.

use std::path::Path;

use image::RgbaImage;
use tracing::{debug, info, warn};

use crate::collab::{ImageSink, ParameterSource, Prompt, SaveChoice, SavePrompt};
use crate::config::EditorConfig;
use crate::consts::MAX_ROTATION_DEGREES;
use crate::error::{EditorError, Result};
use crate::geometry::{ImageRect, ScreenPoint, Size};
use crate::history::{History, Mode, ModeGuard};
use crate::io::image_io::load_image;
use crate::operation::Operation;
use crate::raster::RasterState;
use crate::replay::replay;
use crate::transform::{self, Transition};
use crate::view::ViewState;

/// What happened to a requested edit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    /// Applied and appended to history.
    Recorded,
    /// Silently skipped (zoom limit reached, or nothing loaded to view).
    Ignored,
    /// The parameter dialog was cancelled; nothing changed.
    Cancelled,
}

#[derive(Debug, Default)]
pub struct Editor {
    config: EditorConfig,
    raster: RasterState,
    history: History,
    mode: Mode,
}

impl Editor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Start a new session on `image`, dropping all history.
    /// Empty images are rejected and leave the current session in place.
    pub fn open_source(&mut self, image: RgbaImage) -> Result<()> {
        if image.width() == 0 || image.height() == 0 {
            return Err(EditorError::InvalidDimensions {
                width: image.width(),
                height: image.height(),
            });
        }
        info!(
            width = image.width(),
            height = image.height(),
            "Opened source image"
        );
        self.history.clear();
        self.raster = RasterState::from_source(image);
        Ok(())
    }

    pub fn open_file(&mut self, path: &Path) -> Result<()> {
        let image = load_image(path)?;
        self.open_source(image)
    }

    /// Apply `op` to the current state and record it.
    ///
    /// Rejected input leaves both the image and the history untouched.
    pub fn record_and_apply(&mut self, op: Operation) -> Result<Applied> {
        if let Operation::Rotate { degrees } = op {
            validate_angle(degrees)?;
        }

        let next = match transform::apply(&self.raster, &op, &self.config) {
            Ok(Transition::Changed(next)) => next,
            Ok(Transition::Ignored) => {
                debug!(%op, "Operation had no effect, not recorded");
                return Ok(Applied::Ignored);
            }
            Err(e) => {
                warn!(%op, error = %e, "Operation rejected");
                return Err(e);
            }
        };

        self.raster = next;
        if self.mode == Mode::Recording {
            debug!(%op, depth = self.history.applied().len() + 1, "Recorded");
            self.history.record(op);
        }
        Ok(Applied::Recorded)
    }

    /// Step back one operation by replaying everything before it.
    /// Returns `false` when there is nothing to undo.
    pub fn undo(&mut self) -> Result<bool> {
        let Some(remaining) = self.history.ops_after_undo() else {
            return Ok(false);
        };

        let guard = ModeGuard::replaying(&mut self.mode);
        let state = replay(self.raster.pristine(), remaining, &self.config, &guard)?;
        drop(guard);

        self.raster = state;
        if let Some(op) = self.history.commit_undo() {
            debug!(%op, "Undone");
        }
        Ok(true)
    }

    /// Re-apply the most recently undone operation.
    /// Returns `false` when there is nothing to redo.
    pub fn redo(&mut self) -> Result<bool> {
        let Some(next) = self.history.next_redo() else {
            return Ok(false);
        };
        let mut ops = self.history.applied().to_vec();
        ops.push(next.clone());

        let guard = ModeGuard::replaying(&mut self.mode);
        let state = replay(self.raster.pristine(), &ops, &self.config, &guard)?;
        drop(guard);

        self.raster = state;
        if let Some(op) = self.history.commit_redo() {
            debug!(%op, "Redone");
        }
        Ok(true)
    }

    /// Back to the pristine source; history is dropped and cannot be undone.
    pub fn reset(&mut self) {
        info!(discarded = self.history.applied().len(), "Reset to source image");
        self.history.clear();
        self.raster = self.raster.restored();
    }

    /// Record a close: the image is released but the close itself can be undone.
    pub fn close(&mut self) -> Result<Applied> {
        self.record_and_apply(Operation::CloseFile)
    }

    pub fn rotate(&mut self, params: &mut dyn ParameterSource) -> Result<Applied> {
        self.require_image("no image to be rotated")?;
        match params.angle() {
            Prompt::Confirmed(degrees) => self.record_and_apply(Operation::Rotate { degrees }),
            Prompt::Cancelled => Ok(Applied::Cancelled),
        }
    }

    pub fn crop(&mut self, params: &mut dyn ParameterSource) -> Result<Applied> {
        let size = self.require_image("no image to be cropped")?;
        match params.crop_rect(size) {
            Prompt::Confirmed(rect) => {
                let rect = rect.validated(size.width, size.height)?;
                self.record_and_apply(Operation::Crop { rect })
            }
            Prompt::Cancelled => Ok(Applied::Cancelled),
        }
    }

    pub fn resize(&mut self, params: &mut dyn ParameterSource) -> Result<Applied> {
        let size = self.require_image("no image to be resized")?;
        match params.resize(size) {
            Prompt::Confirmed(p) => self.record_and_apply(Operation::Resize(p)),
            Prompt::Cancelled => Ok(Applied::Cancelled),
        }
    }

    pub fn zoom_in(&mut self) -> Result<Applied> {
        self.record_and_apply(Operation::ZoomIn)
    }

    pub fn zoom_out(&mut self) -> Result<Applied> {
        self.record_and_apply(Operation::ZoomOut)
    }

    pub fn zoom_to_region(&mut self, rect: ImageRect, viewport: Size) -> Result<Applied> {
        self.record_and_apply(Operation::ZoomToRegion { rect, viewport })
    }

    pub fn fit_to_window(&mut self, viewport: Size) -> Result<Applied> {
        self.record_and_apply(Operation::FitToWindow { viewport })
    }

    pub fn normal_size(&mut self) -> Result<Applied> {
        self.record_and_apply(Operation::NormalSize)
    }

    /// Image-space rect under a selection dragged from `start` to `end`,
    /// with the displayed image's top-left at `image_origin`.
    pub fn selection_rect(
        &self,
        start: ScreenPoint,
        end: ScreenPoint,
        image_origin: ScreenPoint,
    ) -> ImageRect {
        ImageRect::from_selection(start, end, image_origin, self.current_scale())
    }

    /// Hand the current image to `sink`. Success clears the dirty flag;
    /// history is left alone either way.
    pub fn save(&mut self, sink: &mut dyn ImageSink) -> Result<()> {
        let image = self
            .raster
            .working()
            .ok_or(EditorError::NoImageLoaded("no image to be saved"))?;
        if let Err(e) = sink.save(image) {
            warn!(error = %e, "Save failed, changes remain unsaved");
            return Err(e);
        }
        self.history.mark_saved();
        Ok(())
    }

    /// Offer to save unsaved changes before they would be lost.
    /// Returns whether the caller may go ahead (open another file, exit).
    pub fn check_save(
        &mut self,
        prompt: &mut dyn SavePrompt,
        sink: &mut dyn ImageSink,
    ) -> Result<bool> {
        if !self.is_dirty() {
            return Ok(true);
        }
        match prompt.ask_save() {
            SaveChoice::Save => {
                self.save(sink)?;
                Ok(true)
            }
            SaveChoice::Discard => Ok(true),
            SaveChoice::Cancel => Ok(false),
        }
    }

    pub fn current_image(&self) -> Option<&RgbaImage> {
        self.raster.working().map(|img| &**img)
    }

    pub fn current_scale(&self) -> f64 {
        self.raster.view().scale_factor
    }

    pub fn is_dirty(&self) -> bool {
        self.history.is_dirty()
    }

    pub fn view(&self) -> &ViewState {
        self.raster.view()
    }

    pub fn raster(&self) -> &RasterState {
        &self.raster
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn require_image(&self, what: &'static str) -> Result<Size> {
        self.raster
            .working_size()
            .ok_or(EditorError::NoImageLoaded(what))
    }
}

fn validate_angle(degrees: f64) -> Result<()> {
    if !degrees.is_finite() || degrees.abs() > MAX_ROTATION_DEGREES {
        return Err(EditorError::InvalidAngle(degrees));
    }
    Ok(())
}
