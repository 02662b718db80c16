//! Call surfaces of the collaborators the editor talks to: parameter dialogs,
//! the save prompt and the persistence layer.

use image::RgbaImage;

use crate::error::Result;
use crate::geometry::{ImageRect, Size};
use crate::operation::ResizeParams;

/// Answer from a parameter dialog.
#[derive(Clone, Debug, PartialEq)]
pub enum Prompt<T> {
    Confirmed(T),
    Cancelled,
}

/// Supplies operation parameters interactively. Only consulted while
/// recording; replay reads parameters back from the stored operations.
pub trait ParameterSource {
    /// Rotation angle in degrees.
    fn angle(&mut self) -> Prompt<f64>;

    /// Crop rectangle within an image of size `image`.
    fn crop_rect(&mut self, image: Size) -> Prompt<ImageRect>;

    /// Resize target for an image currently of size `current`.
    fn resize(&mut self, current: Size) -> Prompt<ResizeParams>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// Asks whether unsaved changes should be saved before they are lost.
pub trait SavePrompt {
    fn ask_save(&mut self) -> SaveChoice;
}

/// Persists the current image.
pub trait ImageSink {
    fn save(&mut self, image: &RgbaImage) -> Result<()>;
}
