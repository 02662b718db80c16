//! Line-oriented stand-in for the editor window: every line is one menu
//! action, parameters missing from the line are asked for on the next line.

use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use rewind_core::collab::{ParameterSource, Prompt, SaveChoice, SavePrompt};
use rewind_core::editor::{Applied, Editor};
use rewind_core::geometry::{ImageRect, ScreenPoint, Size};
use rewind_core::io::image_io::FileSink;
use rewind_core::operation::{ResizeParams, ResizeUnit};
use tracing::{info, warn};

use crate::summary;

const UNTITLED: &str = "untitled.png";

/// One parsed session line.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Open(PathBuf),
    Rotate(Vec<String>),
    Crop(Vec<String>),
    Select {
        start: ScreenPoint,
        end: ScreenPoint,
    },
    ZoomIn,
    ZoomOut,
    ZoomRegion(Vec<String>),
    Fit,
    Normal,
    Resize(Vec<String>),
    Close,
    Undo,
    Redo,
    Reset,
    Save(Option<PathBuf>),
    Status,
    Quit,
}

impl Command {
    /// Parse a non-empty line. Parameters of prompting commands are kept raw.
    pub fn parse(line: &str) -> Result<Self> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            bail!("empty command");
        };
        let rest: Vec<String> = words.map(str::to_owned).collect();

        let cmd = match name.to_ascii_lowercase().as_str() {
            "open" => match rest.as_slice() {
                [path] => Self::Open(PathBuf::from(path)),
                _ => bail!("usage: open PATH"),
            },
            "rotate" => Self::Rotate(rest),
            "crop" => Self::Crop(rest),
            "select" => {
                let n = parse_numbers::<i32>(&rest, 4)
                    .ok_or_else(|| anyhow::anyhow!("usage: select X0 Y0 X1 Y1"))?;
                Self::Select {
                    start: ScreenPoint::new(n[0], n[1]),
                    end: ScreenPoint::new(n[2], n[3]),
                }
            }
            "zoom-in" | "+" => Self::ZoomIn,
            "zoom-out" | "-" => Self::ZoomOut,
            "zoom-region" => Self::ZoomRegion(rest),
            "fit" => Self::Fit,
            "normal" => Self::Normal,
            "resize" => Self::Resize(rest),
            "close" => Self::Close,
            "undo" => Self::Undo,
            "redo" => Self::Redo,
            "reset" => Self::Reset,
            "save" => Self::Save(rest.first().map(PathBuf::from)),
            "status" => Self::Status,
            "quit" | "exit" => Self::Quit,
            other => bail!("unknown command '{other}'"),
        };
        Ok(cmd)
    }
}

fn parse_numbers<T: std::str::FromStr>(words: &[String], count: usize) -> Option<Vec<T>> {
    if words.len() != count {
        return None;
    }
    words.iter().map(|w| w.parse().ok()).collect()
}

fn parse_rect(words: &[String]) -> Option<ImageRect> {
    let n = parse_numbers::<u32>(words, 4)?;
    Some(ImageRect::new(n[0], n[1], n[2], n[3]))
}

fn parse_resize(words: &[String]) -> Option<ResizeParams> {
    let (dims, opts) = words.split_at(words.len().min(2));
    let n = parse_numbers::<u32>(dims, 2)?;
    let mut params = ResizeParams::pixels(n[0], n[1], false);
    for opt in opts {
        match opt.as_str() {
            "px" => params.unit = ResizeUnit::Pixels,
            "%" => params.unit = ResizeUnit::Percentage,
            "keep" => params.proportional = true,
            _ => return None,
        }
    }
    Some(params)
}

/// Answers parameter requests from the command's own words, then from the
/// pending selection, then by reading the next input line.
struct LineParams<'a> {
    input: &'a mut dyn BufRead,
    words: &'a [String],
    selection: Option<ImageRect>,
    styles: &'a summary::Styles,
}

impl LineParams<'_> {
    fn answer<T>(&mut self, question: &str, parse: impl Fn(&[String]) -> Option<T>) -> Prompt<T> {
        let words = if self.words.is_empty() {
            match ask(self.input, question) {
                Some(line) => line.split_whitespace().map(str::to_owned).collect(),
                None => return Prompt::Cancelled,
            }
        } else {
            self.words.to_vec()
        };
        match parse(&words) {
            Some(v) => Prompt::Confirmed(v),
            None => {
                println!("  {}", self.styles.error.apply_to("could not parse parameters"));
                Prompt::Cancelled
            }
        }
    }
}

impl ParameterSource for LineParams<'_> {
    fn angle(&mut self) -> Prompt<f64> {
        self.answer("Angle in degrees", |w| match w {
            [a] => a.parse().ok(),
            _ => None,
        })
    }

    fn crop_rect(&mut self, image: Size) -> Prompt<ImageRect> {
        if self.words.is_empty() {
            if let Some(rect) = self.selection {
                return Prompt::Confirmed(rect);
            }
        }
        let question = format!("Crop X Y W H within {}x{}", image.width, image.height);
        self.answer(&question, parse_rect)
    }

    fn resize(&mut self, current: Size) -> Prompt<ResizeParams> {
        let question = format!(
            "Resize W H [px|%] [keep], currently {}x{}",
            current.width, current.height
        );
        self.answer(&question, parse_resize)
    }
}

/// Save / discard / cancel question read from the session input.
struct LinePrompt<'a> {
    input: &'a mut dyn BufRead,
}

impl SavePrompt for LinePrompt<'_> {
    fn ask_save(&mut self) -> SaveChoice {
        match ask(self.input, "Unsaved changes: [s]ave, [d]iscard or [c]ancel") {
            Some(a) if a.starts_with(['s', 'S']) => SaveChoice::Save,
            Some(a) if a.starts_with(['d', 'D']) => SaveChoice::Discard,
            _ => SaveChoice::Cancel,
        }
    }
}

/// Print `question`, read one line. Empty answers and end of input cancel.
fn ask(input: &mut dyn BufRead, question: &str) -> Option<String> {
    print!("  {question}: ");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) | Err(_) => None,
        Ok(_) => {
            let answer = line.trim();
            (!answer.is_empty()).then(|| answer.to_owned())
        }
    }
}

pub struct Session {
    editor: Editor,
    input: Box<dyn BufRead>,
    path: Option<PathBuf>,
    selection: Option<ImageRect>,
    viewport: Size,
    interactive: bool,
    styles: summary::Styles,
}

impl Session {
    pub fn new(editor: Editor, input: Box<dyn BufRead>, interactive: bool) -> Self {
        let viewport = editor.config().viewport.size();
        Self {
            editor,
            input,
            path: None,
            selection: None,
            viewport,
            interactive,
            styles: summary::Styles::new(),
        }
    }

    pub fn open(&mut self, path: PathBuf) -> Result<()> {
        self.editor.open_file(&path)?;
        self.path = Some(path);
        self.selection = None;
        Ok(())
    }

    /// Read and execute commands until `quit` or end of input.
    pub fn run(&mut self) -> Result<()> {
        loop {
            if self.interactive {
                print!("{} ", self.styles.title.apply_to("rewind>"));
                std::io::stdout().flush()?;
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                self.finish_at_end_of_input();
                return Ok(());
            }
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let cmd = match Command::parse(line) {
                Ok(cmd) => cmd,
                Err(e) => {
                    println!("  {}", self.styles.error.apply_to(e));
                    continue;
                }
            };
            if cmd == Command::Quit {
                if self.confirm_discard()? {
                    return Ok(());
                }
                continue;
            }
            if let Err(e) = self.execute(cmd) {
                println!("  {}", self.styles.error.apply_to(format!("error: {e:#}")));
            }
        }
    }

    fn execute(&mut self, cmd: Command) -> Result<()> {
        let applied = match cmd {
            Command::Open(path) => {
                if self.confirm_discard()? {
                    self.open(path)?;
                    summary::print_status(&self.editor, self.path.as_deref(), &self.styles);
                }
                return Ok(());
            }
            Command::Rotate(words) => {
                let mut params = LineParams {
                    input: &mut *self.input,
                    words: &words,
                    selection: self.selection,
                    styles: &self.styles,
                };
                self.editor.rotate(&mut params)?
            }
            Command::Crop(words) => {
                // A selection is spent by the crop that reads it, accepted or not.
                let mut params = LineParams {
                    input: &mut *self.input,
                    words: &words,
                    selection: self.selection.take(),
                    styles: &self.styles,
                };
                self.editor.crop(&mut params)?
            }
            Command::Select { start, end } => {
                let rect = self
                    .editor
                    .selection_rect(start, end, ScreenPoint::default());
                println!(
                    "  selected {},{} {}x{}",
                    rect.x, rect.y, rect.width, rect.height
                );
                self.selection = Some(rect);
                return Ok(());
            }
            Command::ZoomIn => self.editor.zoom_in()?,
            Command::ZoomOut => self.editor.zoom_out()?,
            Command::ZoomRegion(words) => {
                let rect = match (parse_rect(&words), self.selection.take()) {
                    (Some(rect), _) => rect,
                    (None, Some(rect)) if words.is_empty() => rect,
                    _ => bail!("usage: zoom-region X Y W H (or select first)"),
                };
                self.editor.zoom_to_region(rect, self.viewport)?
            }
            Command::Fit => self.editor.fit_to_window(self.viewport)?,
            Command::Normal => self.editor.normal_size()?,
            Command::Resize(words) => {
                let mut params = LineParams {
                    input: &mut *self.input,
                    words: &words,
                    selection: self.selection,
                    styles: &self.styles,
                };
                self.editor.resize(&mut params)?
            }
            Command::Close => self.editor.close()?,
            Command::Undo => {
                if !self.editor.undo()? {
                    println!("  {}", self.styles.disabled.apply_to("nothing to undo"));
                }
                return Ok(());
            }
            Command::Redo => {
                if !self.editor.redo()? {
                    println!("  {}", self.styles.disabled.apply_to("nothing to redo"));
                }
                return Ok(());
            }
            Command::Reset => {
                self.editor.reset();
                self.selection = None;
                return Ok(());
            }
            Command::Save(path) => {
                if let Some(p) = path {
                    self.path = Some(p);
                }
                let mut sink = FileSink::new(self.save_path());
                self.editor.save(&mut sink)?;
                println!(
                    "  saved to {}",
                    self.styles.path.apply_to(sink.path().display())
                );
                return Ok(());
            }
            Command::Status => {
                summary::print_status(&self.editor, self.path.as_deref(), &self.styles);
                return Ok(());
            }
            Command::Quit => return Ok(()),
        };
        self.report(applied);
        Ok(())
    }

    fn report(&self, applied: Applied) {
        let last = self.editor.history().applied().last();
        match (applied, last) {
            (Applied::Recorded, Some(op)) => {
                println!("  {}", self.styles.method.apply_to(op));
            }
            (Applied::Recorded, None) => {}
            (Applied::Ignored, _) => {
                println!("  {}", self.styles.disabled.apply_to("ignored"));
            }
            (Applied::Cancelled, _) => {
                println!("  {}", self.styles.disabled.apply_to("cancelled"));
            }
        }
    }

    fn save_path(&self) -> PathBuf {
        self.path.clone().unwrap_or_else(|| PathBuf::from(UNTITLED))
    }

    /// Whether unsaved work may be left behind; offers to save it first.
    fn confirm_discard(&mut self) -> Result<bool> {
        let mut sink = FileSink::new(self.save_path());
        let mut prompt = LinePrompt {
            input: &mut *self.input,
        };
        Ok(self.editor.check_save(&mut prompt, &mut sink)?)
    }

    fn finish_at_end_of_input(&mut self) {
        if self.editor.is_dirty() {
            warn!(
                ops = self.editor.history().applied().len(),
                "Input ended with unsaved changes"
            );
        } else {
            info!("Session ended");
        }
    }
}
