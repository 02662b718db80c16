#![allow(dead_code)]

use std::collections::VecDeque;

use image::{Rgba, RgbaImage};

use rewind_core::collab::{ImageSink, ParameterSource, Prompt, SaveChoice, SavePrompt};
use rewind_core::config::EditorConfig;
use rewind_core::editor::Editor;
use rewind_core::error::{EditorError, Result};
use rewind_core::geometry::{ImageRect, Size};
use rewind_core::operation::ResizeParams;

/// Image where every pixel is distinguishable by position.
pub fn patterned(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([
            (x % 256) as u8,
            (y % 256) as u8,
            ((x * 7 + y * 13) % 256) as u8,
            255,
        ])
    })
}

pub fn editor_with(width: u32, height: u32) -> Editor {
    editor_with_config(width, height, EditorConfig::default())
}

pub fn editor_with_config(width: u32, height: u32, config: EditorConfig) -> Editor {
    let mut editor = Editor::new(config);
    editor.open_source(patterned(width, height)).unwrap();
    editor
}

/// Parameter dialogs answering from queued replies; an empty queue cancels.
#[derive(Default)]
pub struct ScriptedParams {
    pub angles: VecDeque<Prompt<f64>>,
    pub rects: VecDeque<Prompt<ImageRect>>,
    pub resizes: VecDeque<Prompt<ResizeParams>>,
}

impl ScriptedParams {
    pub fn with_angle(degrees: f64) -> Self {
        Self {
            angles: VecDeque::from([Prompt::Confirmed(degrees)]),
            ..Self::default()
        }
    }

    pub fn with_rect(rect: ImageRect) -> Self {
        Self {
            rects: VecDeque::from([Prompt::Confirmed(rect)]),
            ..Self::default()
        }
    }

    pub fn with_resize(params: ResizeParams) -> Self {
        Self {
            resizes: VecDeque::from([Prompt::Confirmed(params)]),
            ..Self::default()
        }
    }
}

impl ParameterSource for ScriptedParams {
    fn angle(&mut self) -> Prompt<f64> {
        self.angles.pop_front().unwrap_or(Prompt::Cancelled)
    }

    fn crop_rect(&mut self, _image: Size) -> Prompt<ImageRect> {
        self.rects.pop_front().unwrap_or(Prompt::Cancelled)
    }

    fn resize(&mut self, _current: Size) -> Prompt<ResizeParams> {
        self.resizes.pop_front().unwrap_or(Prompt::Cancelled)
    }
}

/// Keeps every saved image in memory.
#[derive(Default)]
pub struct MemorySink {
    pub saved: Vec<RgbaImage>,
}

impl ImageSink for MemorySink {
    fn save(&mut self, image: &RgbaImage) -> Result<()> {
        self.saved.push(image.clone());
        Ok(())
    }
}

pub struct FailingSink;

impl ImageSink for FailingSink {
    fn save(&mut self, _image: &RgbaImage) -> Result<()> {
        Err(EditorError::SaveFailed("disk full".into()))
    }
}

pub struct FixedChoice(pub SaveChoice);

impl SavePrompt for FixedChoice {
    fn ask_save(&mut self) -> SaveChoice {
        self.0
    }
}
