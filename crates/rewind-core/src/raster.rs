//! The raster store: pristine source, rotation checkpoint and working image.

use std::sync::Arc;

use image::RgbaImage;

use crate::geometry::Size;
use crate::view::ViewState;

/// Images are shared and replaced wholesale, never mutated in place.
pub type SharedImage = Arc<RgbaImage>;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct RasterState {
    pub(crate) pristine: Option<SharedImage>,
    pub(crate) checkpoint: Option<SharedImage>,
    pub(crate) working: Option<SharedImage>,
    pub(crate) view: ViewState,
}

impl RasterState {
    /// State right after loading `image`: checkpoint and working alias the source.
    pub fn from_source(image: RgbaImage) -> Self {
        Self::from_pristine(Arc::new(image))
    }

    pub fn from_pristine(pristine: SharedImage) -> Self {
        Self {
            checkpoint: Some(Arc::clone(&pristine)),
            working: Some(Arc::clone(&pristine)),
            pristine: Some(pristine),
            view: ViewState::default(),
        }
    }

    /// Back to the freshly-loaded state: rotation 0, scale 1.
    pub fn restored(&self) -> Self {
        match &self.pristine {
            Some(p) => Self::from_pristine(Arc::clone(p)),
            None => Self::default(),
        }
    }

    pub fn pristine(&self) -> Option<&SharedImage> {
        self.pristine.as_ref()
    }

    pub fn checkpoint(&self) -> Option<&SharedImage> {
        self.checkpoint.as_ref()
    }

    pub fn working(&self) -> Option<&SharedImage> {
        self.working.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn is_loaded(&self) -> bool {
        self.working.is_some()
    }

    pub fn working_size(&self) -> Option<Size> {
        self.working
            .as_ref()
            .map(|img| Size::new(img.width(), img.height()))
    }
}
