use std::path::Path;

use console::Style;
use rewind_core::editor::Editor;

pub struct Styles {
    pub title: Style,
    pub header: Style,
    pub label: Style,
    pub value: Style,
    pub method: Style,
    pub disabled: Style,
    pub path: Style,
    pub error: Style,
}

impl Styles {
    pub fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            error: Style::new().red(),
        }
    }
}

pub fn print_status(editor: &Editor, path: Option<&Path>, s: &Styles) {
    println!();
    println!("  {}", s.title.apply_to("Rewind Session"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    match path {
        Some(p) => println!("  {:<14}{}", s.label.apply_to("File"), s.path.apply_to(p.display())),
        None => println!("  {:<14}{}", s.label.apply_to("File"), s.disabled.apply_to("untitled")),
    }

    match editor.current_image() {
        Some(img) => println!(
            "  {:<14}{}",
            s.label.apply_to("Image"),
            s.value.apply_to(format!("{}x{}", img.width(), img.height()))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Image"),
            s.disabled.apply_to("none")
        ),
    }

    let view = editor.view();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Scale"),
        s.value.apply_to(format!("{:.3}", view.scale_factor))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Rotation"),
        s.value.apply_to(format!("{}\u{b0}", view.cumulative_rotation))
    );
    if let Some(scroll) = view.scroll {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Scroll"),
            s.value.apply_to(format!("{:.0}, {:.0}", scroll.x, scroll.y))
        );
    }
    let unsaved = if editor.is_dirty() { "yes" } else { "no" };
    println!("  {:<14}{}", s.label.apply_to("Unsaved"), s.value.apply_to(unsaved));
    println!();

    let history = editor.history();
    if !history.can_undo() {
        println!(
            "  {:<14}{}",
            s.header.apply_to("History"),
            s.disabled.apply_to("empty")
        );
    } else {
        println!("  {}", s.header.apply_to("History"));
        for (i, op) in history.applied().iter().enumerate() {
            let kind = if op.edits_pixels() { "edit" } else { "view" };
            println!(
                "    {}. {} {}",
                s.label.apply_to(i + 1),
                s.method.apply_to(op),
                s.label.apply_to(format!("({kind})"))
            );
        }
    }
    if history.can_redo() {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Redo"),
            s.value.apply_to(history.undone().len())
        );
    }
    println!();
}
