use super::*;
use crate::model::Provider;
use crate::status::StatusKind;
use serde_json::{json, Value};
use std::fs;
use tempfile::TempDir;

fn record(name: &str) -> Value {
    json!({
        "model_display_name": name,
        "model": format!("{}-id", name.to_lowercase()),
        "base_url": "https://api.example.com/v1",
        "api_key": "sk-test",
        "provider": "openai",
        "max_tokens": 4096
    })
}

/// Writes `doc` to a fresh config file and opens an editor on it.
fn editor_with(doc: Value, policy: SavePolicy) -> (TempDir, Editor) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, serde_json::to_string_pretty(&doc).unwrap()).unwrap();
    let editor = Editor::load(ConfigStore::new(&path), policy);
    (dir, editor)
}

fn three() -> (TempDir, Editor) {
    editor_with(
        json!({"custom_models": [record("A"), record("B"), record("C")]}),
        SavePolicy::Auto,
    )
}

fn names(editor: &Editor) -> Vec<String> {
    editor
        .registry()
        .iter()
        .map(|(_, r)| r.model_display_name.clone())
        .collect()
}

fn on_disk(editor: &Editor) -> Value {
    serde_json::from_str(&fs::read_to_string(editor.path()).unwrap()).unwrap()
}

#[test]
fn test_load_nonexistent_path_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("config.json");
    let editor = Editor::load(ConfigStore::new(&path), SavePolicy::Auto);

    assert!(editor.registry().is_empty());
    assert_eq!(editor.state().selection, None);
    assert_eq!(editor.form, FormData::default());
    assert_eq!(editor.status.current(), None);
}

#[test]
fn test_load_malformed_reports_and_keeps_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(&path, "{\"custom_models\": [").unwrap();
    let editor = Editor::load(ConfigStore::new(&path), SavePolicy::Auto);

    assert!(editor.registry().is_empty());
    let (kind, text) = editor.status.current().unwrap();
    assert_eq!(kind, StatusKind::Error);
    assert!(text.starts_with("Failed to load config"));
    assert_eq!(fs::read_to_string(&path).unwrap(), "{\"custom_models\": [");
}

#[test]
fn test_load_loosely_typed_records_keeps_them_all() {
    let (_dir, mut editor) = editor_with(
        json!({
            "theme": "dark",
            "custom_models": [
                record("A"),
                {"model_display_name": "B", "max_tokens": -1},
                {"model_display_name": "C", "base_url": null, "api_key": null},
                {"model_display_name": "D", "max_tokens": 2048.0},
                {"model_display_name": "E", "max_tokens": 18446744073709551615u64}
            ]
        }),
        SavePolicy::Auto,
    );

    assert_eq!(names(&editor), ["A", "B", "C", "D", "E"]);
    assert_eq!(editor.status.current(), None);

    editor.begin_new();
    editor.form.display_name = "New".into();
    editor.apply_changes().unwrap();

    let saved = on_disk(&editor);
    assert_eq!(saved["theme"], json!("dark"));
    let models = saved["custom_models"].as_array().unwrap();
    assert_eq!(models.len(), 6);
    assert_eq!(models[1]["max_tokens"], json!(-1));
    assert_eq!(models[2]["base_url"], json!(""));
    assert_eq!(models[3]["max_tokens"], json!(2048));
    assert_eq!(models[4]["max_tokens"], json!(8192));
}

#[test]
fn test_bad_records_keep_foreign_keys_on_next_save() {
    let (_dir, mut editor) = editor_with(
        json!({"theme": "dark", "custom_models": {"not": "an array"}, "telemetry": false}),
        SavePolicy::Auto,
    );
    assert!(editor.registry().is_empty());
    assert_eq!(editor.status.current().unwrap().0, StatusKind::Error);

    editor.form.display_name = "New".into();
    editor.apply_changes().unwrap();

    let saved = on_disk(&editor);
    assert_eq!(saved["theme"], json!("dark"));
    assert_eq!(saved["telemetry"], json!(false));
    assert_eq!(saved["custom_models"].as_array().unwrap().len(), 1);
    let text = fs::read_to_string(editor.path()).unwrap();
    assert!(text.starts_with("{\n  \"theme\""));
}

#[test]
fn test_undecodable_record_keeps_foreign_keys_on_next_save() {
    let (_dir, mut editor) = editor_with(
        json!({"theme": "dark", "custom_models": [record("A"), {"model": {"nested": 1}}]}),
        SavePolicy::Auto,
    );
    assert!(editor.registry().is_empty());

    editor.form.display_name = "New".into();
    editor.apply_changes().unwrap();
    assert_eq!(on_disk(&editor)["theme"], json!("dark"));
}

#[test]
fn test_load_selects_first_record() {
    let (_dir, editor) = three();
    assert_eq!(editor.selected_index(), Some(0));
    assert_eq!(editor.form.display_name, "A");
    assert_eq!(editor.form.provider, Provider::OpenAI);
    assert_eq!(editor.form.max_tokens, "4096");
}

#[test]
fn test_select_at_out_of_bounds_is_ignored() {
    let (_dir, mut editor) = three();
    assert!(editor.select_at(2));
    assert!(!editor.select_at(3));
    assert_eq!(editor.selected_index(), Some(2));
    assert_eq!(editor.form.display_name, "C");
}

#[test]
fn test_select_fills_defaults_for_missing_keys() {
    let (_dir, mut editor) = editor_with(
        json!({"custom_models": [record("A"), {"model": "bare"}]}),
        SavePolicy::Auto,
    );
    editor.select_at(1);
    assert_eq!(editor.form.display_name, "");
    assert_eq!(editor.form.base_url, "");
    assert_eq!(editor.form.provider, Provider::Anthropic);
    assert_eq!(editor.form.max_tokens, "8192");
}

#[test]
fn test_begin_new_resets_form() {
    let (_dir, mut editor) = three();
    editor.begin_new();
    assert_eq!(editor.state().selection, None);
    assert_eq!(editor.form, FormData::default());
}

#[test]
fn test_apply_empty_display_name_rejected() {
    let (_dir, mut editor) = three();
    let before = on_disk(&editor);
    editor.form.display_name = "   ".into();

    assert_eq!(
        editor.apply_changes(),
        Err(ValidationError::EmptyDisplayName)
    );
    assert_eq!(names(&editor), ["A", "B", "C"]);
    assert_eq!(editor.form.display_name, "   ");
    assert_eq!(on_disk(&editor), before);
    assert!(!editor.is_dirty());
}

#[test]
fn test_apply_non_integer_max_tokens_rejected() {
    let (_dir, mut editor) = three();
    editor.begin_new();
    editor.form.display_name = "New".into();
    editor.form.max_tokens = "abc".into();

    let err = editor.apply_changes().unwrap_err();
    assert_eq!(err, ValidationError::InvalidMaxTokens("abc".into()));
    assert_eq!(editor.registry().len(), 3);
    assert_eq!(editor.state().selection, None);
    assert_eq!(editor.status.current().unwrap().0, StatusKind::Error);
}

#[test]
fn test_apply_without_selection_appends_and_selects() {
    let (_dir, mut editor) = three();
    editor.begin_new();
    editor.form.display_name = "D".into();
    editor.form.model = "d-id".into();

    editor.apply_changes().unwrap();
    assert_eq!(names(&editor), ["A", "B", "C", "D"]);
    assert_eq!(editor.selected_index(), Some(3));
    assert_eq!(on_disk(&editor)["custom_models"][3]["model"], "d-id");
    assert_eq!(editor.status.current().unwrap().0, StatusKind::Success);
}

#[test]
fn test_apply_with_selection_overwrites_in_place() {
    let (_dir, mut editor) = three();
    editor.select_at(1);
    editor.form.display_name = "Bee".into();
    editor.form.provider = Provider::GenericChatCompletion;

    editor.apply_changes().unwrap();
    assert_eq!(names(&editor), ["A", "Bee", "C"]);
    assert_eq!(editor.selected_index(), Some(1));
    let saved = on_disk(&editor);
    assert_eq!(
        saved["custom_models"][1]["provider"],
        "generic-chat-completion-api"
    );
}

#[test]
fn test_delete_at_shifts_and_clears_selection() {
    let (_dir, mut editor) = three();
    editor.select_at(0);
    assert!(editor.delete_at(0));

    assert_eq!(names(&editor), ["B", "C"]);
    assert_eq!(editor.state().selection, None);
    assert_eq!(on_disk(&editor)["custom_models"].as_array().unwrap().len(), 2);
}

#[test]
fn test_delete_without_target_is_noop() {
    let (_dir, mut editor) = three();
    editor.begin_new();
    assert_eq!(editor.request_delete(), None);
    assert!(!editor.delete_at(7));
    assert_eq!(editor.registry().len(), 3);
}

#[test]
fn test_request_delete_needs_confirmation() {
    let (_dir, mut editor) = three();
    editor.select_at(2);
    let pending = editor.request_delete().unwrap();
    assert_eq!(pending.prompt(), "Delete \"C\"?");
    // Nothing happens until the caller confirms.
    assert_eq!(editor.registry().len(), 3);

    assert_eq!(editor.confirm_delete(pending), 1);
    assert_eq!(names(&editor), ["A", "B"]);
}

#[test]
fn test_delete_many_keeps_only_unlisted() {
    let (_dir, mut editor) = three();
    assert_eq!(editor.delete_many(&[0, 2]), 2);
    assert_eq!(names(&editor), ["B"]);
    assert_eq!(editor.state(), &EditorState::default());
}

#[test]
fn test_delete_many_ignores_order_and_duplicates() {
    let (_dir, mut editor) = three();
    assert_eq!(editor.delete_many(&[2, 0, 2, 9]), 2);
    assert_eq!(names(&editor), ["B"]);
}

#[test]
fn test_marks_follow_records_through_moves() {
    let (_dir, mut editor) = three();
    editor.toggle_mark(0);
    editor.toggle_mark(2);
    editor.move_down(0);
    assert_eq!(names(&editor), ["B", "A", "C"]);

    let pending = editor.request_delete().unwrap();
    assert_eq!(pending.prompt(), "Delete 2 selected model(s)?");
    assert_eq!(editor.confirm_delete(pending), 2);
    assert_eq!(names(&editor), ["B"]);
    assert!(editor.state().marked.is_empty());
}

#[test]
fn test_toggle_mark_all() {
    let (_dir, mut editor) = three();
    editor.toggle_mark(1);
    editor.toggle_mark_all();
    assert!(editor.all_marked());
    editor.toggle_mark_all();
    assert!(editor.state().marked.is_empty());
}

#[test]
fn test_move_boundaries_are_noops() {
    let (_dir, mut editor) = three();
    editor.select_at(0);
    let state = editor.state().clone();

    assert!(!editor.move_up(0));
    assert!(!editor.move_down(2));
    assert_eq!(names(&editor), ["A", "B", "C"]);
    assert_eq!(editor.state(), &state);
    assert!(!editor.is_dirty());
}

#[test]
fn test_move_tracks_selection() {
    let (_dir, mut editor) = three();
    editor.select_at(1);
    assert!(editor.move_up(1));
    assert_eq!(names(&editor), ["B", "A", "C"]);
    assert_eq!(editor.selected_index(), Some(0));
    assert_eq!(editor.form.display_name, "B");
}

#[test]
fn test_move_down_then_up_round_trips() {
    let (_dir, mut editor) = three();
    assert!(editor.move_down(1));
    assert_eq!(names(&editor), ["A", "C", "B"]);
    assert!(editor.move_up(2));
    assert_eq!(names(&editor), ["A", "B", "C"]);
}

#[test]
fn test_save_then_load_round_trip() {
    let doc = json!({
        "theme": "dark",
        "custom_models": [record("A"), record("B")],
        "telemetry": {"enabled": false}
    });
    let (_dir, mut editor) = editor_with(doc, SavePolicy::Auto);
    editor.save().unwrap();

    let reloaded = Editor::load(ConfigStore::new(editor.path()), SavePolicy::Auto);
    assert_eq!(
        reloaded.registry().records(),
        editor.registry().records()
    );

    let text = fs::read_to_string(editor.path()).unwrap();
    let saved: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(saved["theme"], "dark");
    assert_eq!(saved["telemetry"], json!({"enabled": false}));
    assert_eq!(saved["custom_models"][0], record("A"));
    assert!(text.starts_with("{\n  \"theme\""));
}

#[test]
fn test_manual_policy_defers_writes() {
    let (_dir, mut editor) = editor_with(
        json!({"custom_models": [record("A"), record("B")]}),
        SavePolicy::Manual,
    );
    editor.delete_at(0);
    assert!(editor.is_dirty());
    assert_eq!(on_disk(&editor)["custom_models"].as_array().unwrap().len(), 2);

    editor.save().unwrap();
    assert!(!editor.is_dirty());
    assert_eq!(on_disk(&editor)["custom_models"].as_array().unwrap().len(), 1);
}

#[test]
fn test_save_failure_keeps_state() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be makes every write fail.
    let path = dir.path().join("config.json");
    fs::create_dir(&path).unwrap();
    let mut editor = Editor::load(ConfigStore::new(&path), SavePolicy::Auto);
    editor.form.display_name = "A".into();

    editor.apply_changes().unwrap();
    assert_eq!(names(&editor), ["A"]);
    assert!(editor.is_dirty());
    let (kind, text) = editor.status.current().unwrap();
    assert_eq!(kind, StatusKind::Error);
    assert!(text.starts_with("Failed to save"));
    assert!(editor.save().is_err());
    assert_eq!(names(&editor), ["A"]);
}
