use std::path::PathBuf;

use eframe_whiteboard::{Editor, EditorConfig, EditorError, InputEvent, PromptAnswer, ScriptedPrompter, Tool};
use egui::pos2;

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("whiteboard-test-{}-{}", std::process::id(), name))
}

fn drawn_editor() -> Editor {
    let mut editor = Editor::new(EditorConfig {
        canvas_width: 90,
        canvas_height: 60,
        ..EditorConfig::default()
    });
    let mut prompter = ScriptedPrompter::new();
    editor.select_tool(Tool::Rectangle);
    editor.handle_event(InputEvent::primary_down(pos2(10.0, 10.0)), &mut prompter).unwrap();
    editor.handle_event(InputEvent::primary_up(pos2(50.0, 40.0)), &mut prompter).unwrap();
    editor.add_layer();
    editor.set_brush_color(egui::Color32::from_rgba_unmultiplied(0, 128, 255, 255));
    editor.select_tool(Tool::Line);
    editor.handle_event(InputEvent::primary_down(pos2(0.0, 55.0)), &mut prompter).unwrap();
    editor.handle_event(InputEvent::primary_up(pos2(89.0, 5.0)), &mut prompter).unwrap();
    editor
}

#[test]
fn test_png_round_trip_is_pixel_exact() {
    let editor = drawn_editor();
    let path = temp_path("round-trip.png");
    let written = editor.save(&path).unwrap();
    assert_eq!(written, path);

    let mut reopened = Editor::default();
    reopened.open(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(reopened.layers().len(), 1);
    assert_eq!(reopened.layers().active().name, "Background");
    assert_eq!((reopened.layers().width(), reopened.layers().height()), (90, 60));
    assert_eq!(reopened.composite(), editor.composite());
}

#[test]
fn test_open_resets_history_to_loaded_image() {
    let editor = drawn_editor();
    let path = temp_path("baseline.png");
    editor.save(&path).unwrap();

    let mut other = drawn_editor();
    other.open(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(other.history().past_len(), 1);
    assert!(!other.can_undo());
    assert!(!other.can_redo());

    // Edits after opening undo back to the opened image
    let opened = other.composite();
    let mut prompter = ScriptedPrompter::new();
    other.select_tool(Tool::Brush);
    other.handle_event(InputEvent::primary_drag(pos2(70.0, 50.0)), &mut prompter).unwrap();
    other.handle_event(InputEvent::primary_up(pos2(70.0, 50.0)), &mut prompter).unwrap();
    assert!(other.undo());
    assert_eq!(other.composite(), opened);
}

#[test]
fn test_failed_open_leaves_canvas_alone() {
    let mut editor = drawn_editor();
    let before = editor.composite();
    let path = temp_path("broken.png");
    std::fs::write(&path, b"not an image at all").unwrap();

    let result = editor.open(&path);
    let _ = std::fs::remove_file(&path);

    assert!(matches!(result, Err(EditorError::DecodeFailure { .. })));
    assert_eq!(editor.composite(), before);
    assert_eq!(editor.layers().len(), 2);
}

#[test]
fn test_failed_save_is_encode_failure() {
    let editor = drawn_editor();
    let result = editor.save(&temp_path("missing-dir").join("out.png"));
    assert!(matches!(result, Err(EditorError::EncodeFailure { .. })));
}

#[test]
fn test_prompted_save_and_open() {
    let mut editor = drawn_editor();
    let path = temp_path("prompted");
    let mut prompter = ScriptedPrompter::with_answers([
        PromptAnswer::Path(path.clone()),
        PromptAnswer::Cancelled,
        PromptAnswer::Path(path.with_extension("png")),
    ]);

    let written = editor.save_as(&mut prompter).unwrap();
    assert_eq!(written, Some(path.with_extension("png")));

    assert!(!editor.open_from(&mut prompter).unwrap());
    assert!(editor.open_from(&mut prompter).unwrap());
    let _ = std::fs::remove_file(path.with_extension("png"));
    assert_eq!(editor.layers().len(), 1);
}
