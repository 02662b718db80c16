mod common;

use proptest::prelude::*;

use common::{editor_with, patterned};
use rewind_core::config::EditorConfig;
use rewind_core::editor::{Applied, Editor};
use rewind_core::geometry::{ImageRect, Size};
use rewind_core::history::{Mode, ModeGuard};
use rewind_core::operation::{Operation, ResizeParams};
use rewind_core::raster::RasterState;
use rewind_core::replay::replay;

#[derive(Debug, Clone)]
enum Action {
    Rotate(i16),
    Crop { x: u8, y: u8, w: u8, h: u8 },
    ZoomIn,
    ZoomOut,
    ZoomRegion { x: u8, y: u8, w: u8, h: u8 },
    Fit(u16, u16),
    Normal,
    ResizePercent(u8, u8, bool),
    Close,
}

fn action_strategy() -> impl Strategy<Value = Action> {
    prop_oneof![
        (-360i16..=360).prop_map(Action::Rotate),
        (0u8..100, 0u8..100, 1u8..=100, 1u8..=100)
            .prop_map(|(x, y, w, h)| Action::Crop { x, y, w, h }),
        Just(Action::ZoomIn),
        Just(Action::ZoomOut),
        (0u8..100, 0u8..100, 1u8..=100, 1u8..=100)
            .prop_map(|(x, y, w, h)| Action::ZoomRegion { x, y, w, h }),
        (50u16..1000, 50u16..1000).prop_map(|(w, h)| Action::Fit(w, h)),
        Just(Action::Normal),
        (20u8..=100, 20u8..=100, any::<bool>())
            .prop_map(|(w, h, keep)| Action::ResizePercent(w, h, keep)),
        Just(Action::Close),
    ]
}

/// Rect given in percent of `size`, clamped inside it.
fn rect_in(size: Size, x: u8, y: u8, w: u8, h: u8) -> ImageRect {
    let px = |len: u32, pct: u8| (len as u64 * pct as u64 / 100) as u32;
    let rx = px(size.width, x).min(size.width - 1);
    let ry = px(size.height, y).min(size.height - 1);
    let rw = px(size.width, w).clamp(1, size.width - rx);
    let rh = px(size.height, h).clamp(1, size.height - ry);
    ImageRect::new(rx, ry, rw, rh)
}

fn to_operation(editor: &Editor, action: &Action) -> Option<Operation> {
    let size = editor.raster().working_size();
    let op = match *action {
        Action::Rotate(deg) => Operation::Rotate {
            degrees: f64::from(deg),
        },
        Action::Crop { x, y, w, h } => Operation::Crop {
            rect: rect_in(size?, x, y, w, h),
        },
        Action::ZoomIn => Operation::ZoomIn,
        Action::ZoomOut => Operation::ZoomOut,
        Action::ZoomRegion { x, y, w, h } => Operation::ZoomToRegion {
            rect: rect_in(size?, x, y, w, h),
            viewport: Size::new(640, 480),
        },
        Action::Fit(w, h) => Operation::FitToWindow {
            viewport: Size::new(u32::from(w), u32::from(h)),
        },
        Action::Normal => Operation::NormalSize,
        Action::ResizePercent(w, h, keep) => {
            Operation::Resize(ResizeParams::percent(u32::from(w), u32::from(h), keep))
        }
        Action::Close => Operation::CloseFile,
    };
    Some(op)
}

/// Apply every action, keeping a snapshot after each recorded one.
fn run(actions: &[Action]) -> (Editor, Vec<RasterState>) {
    let mut editor = editor_with(24, 16);
    let mut snapshots = vec![editor.raster().clone()];
    for action in actions {
        let Some(op) = to_operation(&editor, action) else {
            continue;
        };
        if let Ok(Applied::Recorded) = editor.record_and_apply(op) {
            snapshots.push(editor.raster().clone());
        }
    }
    (editor, snapshots)
}

// ---------------------------------------------------------------------------
// Direct replay
// ---------------------------------------------------------------------------

#[test]
fn test_replay_is_deterministic() {
    let config = EditorConfig::default();
    let pristine = std::sync::Arc::new(patterned(40, 30));
    let ops = vec![
        Operation::Rotate { degrees: 33.0 },
        Operation::Crop {
            rect: ImageRect::new(5, 5, 20, 20),
        },
        Operation::Resize(ResizeParams::pixels(15, 10, true)),
        Operation::ZoomIn,
    ];

    let mut mode = Mode::Recording;
    let first = {
        let guard = ModeGuard::replaying(&mut mode);
        replay(Some(&pristine), &ops, &config, &guard).unwrap()
    };
    let second = {
        let guard = ModeGuard::replaying(&mut mode);
        replay(Some(&pristine), &ops, &config, &guard).unwrap()
    };

    assert_eq!(first, second);
    assert_eq!(mode, Mode::Recording);
}

#[test]
fn test_replay_of_nothing_is_fresh_load() {
    let config = EditorConfig::default();
    let pristine = std::sync::Arc::new(patterned(8, 8));
    let mut mode = Mode::Recording;
    let guard = ModeGuard::replaying(&mut mode);

    let state = replay(Some(&pristine), &[], &config, &guard).unwrap();
    assert_eq!(state, RasterState::from_source(patterned(8, 8)));
}

#[test]
fn test_replay_without_source_is_empty() {
    let config = EditorConfig::default();
    let mut mode = Mode::Recording;
    let guard = ModeGuard::replaying(&mut mode);

    let state = replay(None, &[Operation::ZoomIn], &config, &guard).unwrap();
    assert!(!state.is_loaded());
}

#[test]
fn test_mode_guard_restores_on_error_path() {
    fn failing(mode: &mut Mode) -> Result<(), String> {
        let guard = ModeGuard::replaying(mode);
        assert_eq!(guard.mode(), Mode::Replaying);
        Err("replay failed".into())
    }

    let mut mode = Mode::Recording;
    assert!(failing(&mut mode).is_err());
    assert_eq!(mode, Mode::Recording);
}

// ---------------------------------------------------------------------------
// Random sequences
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_sequences_undo_to_every_prefix(actions in prop::collection::vec(action_strategy(), 1..12)) {
        let (mut editor, snapshots) = run(&actions);
        let recorded = snapshots.len() - 1;
        prop_assert_eq!(editor.history().applied().len(), recorded);

        for expected in snapshots.iter().rev().skip(1) {
            prop_assert!(editor.undo().unwrap());
            prop_assert_eq!(editor.raster(), expected);
            prop_assert_eq!(editor.mode(), Mode::Recording);
        }
        prop_assert!(!editor.undo().unwrap());

        for expected in snapshots.iter().skip(1) {
            prop_assert!(editor.redo().unwrap());
            prop_assert_eq!(editor.raster(), expected);
        }
        prop_assert!(!editor.redo().unwrap());
        prop_assert_eq!(editor.history().applied().len(), recorded);
    }
}
