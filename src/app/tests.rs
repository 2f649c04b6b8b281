use std::path::PathBuf;
use std::sync::Arc;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tempfile::tempdir;

use crate::config::Config;
use crate::document::Document;

use super::{App, LoadState, Message, Mode, Model, Task, update};

fn create_test_model() -> Model {
    Model::new(PathBuf::from("test.txt"), Config::default(), (80, 24))
        .with_document(Document::load("alpha\nbeta\ngamma"))
}

fn create_long_test_model() -> Model {
    let text = (1..=100)
        .map(|i| format!("Line {i} of content."))
        .collect::<Vec<_>>()
        .join("\n");
    Model::new(PathBuf::from("test.txt"), Config::default(), (80, 24))
        .with_document(Document::load(text))
}

/// Ten lines where only lines 2 and 7 contain "er".
fn create_er_model(height: u16) -> Model {
    let lines = [
        "alpha", "server", "beta", "gamma", "delta", "epsilon", "water", "zeta", "eta", "theta",
    ];
    Model::new(PathBuf::from("test.txt"), Config::default(), (80, height + 1))
        .with_document(Document::load(lines.join("\n")))
}

fn type_query(mut model: Model, query: &str) -> Model {
    model = update(model, Message::StartSearch);
    for c in query.chars() {
        model = update(model, Message::SearchInput(c));
    }
    model
}

/// Run queued tasks inline, feeding each completion back through `update`.
fn run_tasks(mut model: Model) -> Model {
    loop {
        let tasks = model.take_tasks();
        if tasks.is_empty() {
            return model;
        }
        for task in tasks {
            model = update(model, task.run());
        }
    }
}

fn search(model: Model, query: &str) -> Model {
    let model = update(type_query(model, query), Message::CommitSearch);
    run_tasks(model)
}

#[test]
fn test_scroll_down_updates_viewport() {
    let model = create_long_test_model();
    assert_eq!(model.viewport.offset(), 0);

    let model = update(model, Message::ScrollDown(5));
    assert_eq!(model.viewport.offset(), 5);
    assert_eq!(model.viewport.current_line(), 6);
}

#[test]
fn test_scroll_up_at_top_stays_at_zero() {
    let model = update(create_long_test_model(), Message::ScrollUp(10));
    assert_eq!(model.viewport.offset(), 0);
    assert_eq!(model.viewport.current_line(), 1);
}

#[test]
fn test_page_down_moves_by_viewport_height() {
    let model = create_long_test_model();
    let height = model.viewport.height() as usize;
    let model = update(model, Message::PageDown);
    assert_eq!(model.viewport.offset(), height);
    let model = update(model, Message::PageUp);
    assert_eq!(model.viewport.offset(), 0);
}

#[test]
fn test_go_to_bottom_and_top() {
    let model = update(create_long_test_model(), Message::GoToBottom);
    assert_eq!(model.viewport.offset(), 100 - 23);
    assert_eq!(model.viewport.current_line(), 100);
    let model = update(model, Message::GoToTop);
    assert_eq!(model.viewport.offset(), 0);
    assert_eq!(model.viewport.current_line(), 1);
}

#[test]
fn test_text_area_excludes_scrollbar_and_status() {
    let model = create_test_model();
    assert_eq!(model.viewport.width(), 79);
    assert_eq!(model.viewport.height(), 23);
}

#[test]
fn test_resize_reclamps_offset() {
    let model = update(create_long_test_model(), Message::GoToBottom);
    let model = update(model, Message::Resize(100, 51));
    assert_eq!(model.terminal_size, (100, 51));
    assert_eq!(model.viewport.width(), 99);
    assert_eq!(model.viewport.height(), 50);
    assert_eq!(model.viewport.offset(), 50);
}

#[test]
fn test_quit_sets_flag() {
    let model = update(create_test_model(), Message::Quit);
    assert!(model.should_quit);
}

#[test]
fn test_er_search_scenario() {
    let model = create_er_model(3);
    let model = type_query(model, "er");
    assert_eq!(model.mode, Mode::Search);
    assert_eq!(model.search.query(), "er");

    let model = search(model, "er");
    assert_eq!(model.mode, Mode::Normal);
    assert_eq!(model.search.hits(), [2, 7]);
    assert_eq!(model.search.hit_index(), 0);
    assert_eq!(model.viewport.current_line(), 2);
    assert_eq!(model.viewport.offset(), 0);
    assert!(model.viewport.visible_range().contains(&1));
}

#[test]
fn test_commit_centers_hit_in_tall_document() {
    let model = search(create_long_test_model(), "line 60 ");
    assert_eq!(model.search.hits(), [60]);
    assert_eq!(model.viewport.offset(), 59 - 23 / 2);
    assert_eq!(model.viewport.current_line(), 60);
}

#[test]
fn test_commit_queues_search_task() {
    let model = update(type_query(create_test_model(), "al"), Message::CommitSearch);
    let generation = model.search.generation();
    assert_eq!(model.pending_tasks().len(), 1);
    assert!(matches!(
        &model.pending_tasks()[0],
        Task::Search { generation: g, query, jump_to_first: true, .. }
            if *g == generation && query == "al"
    ));
    // Hits arrive only with the completion.
    assert!(model.search.hits().is_empty());
}

#[test]
fn test_commit_empty_query_resolves_immediately() {
    let model = update(type_query(create_test_model(), ""), Message::CommitSearch);
    assert!(model.pending_tasks().is_empty());
    assert!(model.search.hits().is_empty());
    assert!(model.search.highlight().is_empty());
    assert_eq!(model.mode, Mode::Normal);
}

#[test]
fn test_stale_search_result_is_discarded() {
    let model = update(type_query(create_test_model(), "alpha"), Message::CommitSearch);
    let stale = model.search.generation();
    let mut model = update(type_query(model, "gamma"), Message::CommitSearch);
    let tasks = model.take_tasks();

    let model = update(
        model,
        Message::SearchCompleted {
            generation: stale,
            hits: vec![1],
            jump_to_first: true,
        },
    );
    assert!(model.search.hits().is_empty());

    let model = tasks
        .into_iter()
        .fold(model, |model, task| update(model, task.run()));
    assert_eq!(model.search.hits(), [3]);
    assert_eq!(model.search.highlight(), "gamma");
}

#[test]
fn test_cancel_discards_in_flight_search() {
    let mut model = update(type_query(create_test_model(), "beta"), Message::CommitSearch);
    let tasks = model.take_tasks();
    let model = update(model, Message::StartSearch);
    let model = update(model, Message::CancelSearch);
    let model = tasks
        .into_iter()
        .fold(model, |model, task| update(model, task.run()));
    assert!(model.search.hits().is_empty());
    assert!(model.search.highlight().is_empty());
}

#[test]
fn test_escape_clears_query_and_hits() {
    let model = search(create_test_model(), "a");
    assert_eq!(model.search.hits(), [1, 2, 3]);
    let model = type_query(model, "be");
    let model = update(model, Message::CancelSearch);
    assert_eq!(model.mode, Mode::Normal);
    assert!(model.search.query().is_empty());
    assert!(model.search.hits().is_empty());
    assert!(model.search.highlight().is_empty());
}

#[test]
fn test_start_search_clears_previous_hits() {
    let model = search(create_test_model(), "a");
    let model = update(model, Message::StartSearch);
    assert!(model.search.query().is_empty());
    assert!(model.search.hits().is_empty());
}

#[test]
fn test_control_characters_are_not_added_to_query() {
    let model = type_query(create_test_model(), "a\u{7}\u{1b}b");
    assert_eq!(model.search.query(), "ab");
}

#[test]
fn test_backspace_on_empty_query_stays_in_search() {
    let model = update(create_test_model(), Message::StartSearch);
    let model = update(model, Message::SearchBackspace);
    assert_eq!(model.mode, Mode::Search);
    assert!(model.search.query().is_empty());
}

#[test]
fn test_next_and_prev_hit_wrap_and_jump() {
    let model = search(create_er_model(3), "er");
    let model = update(model, Message::NextHit);
    assert_eq!(model.search.current_hit(), Some(7));
    assert_eq!(model.viewport.current_line(), 7);
    let model = update(model, Message::NextHit);
    assert_eq!(model.search.current_hit(), Some(2));
    let model = update(model, Message::PrevHit);
    assert_eq!(model.search.current_hit(), Some(7));
}

#[test]
fn test_next_hit_without_hits_is_noop() {
    let model = update(create_long_test_model(), Message::ScrollDown(4));
    let model = update(model, Message::NextHit);
    assert_eq!(model.viewport.offset(), 4);
}

#[test]
fn test_messages_for_other_mode_are_ignored() {
    // Navigation while typing a query
    let model = search(create_er_model(3), "er");
    let model = type_query(model, "x");
    let before = model.viewport;
    let model = update(model, Message::NextHit);
    let model = update(model, Message::ScrollDown(3));
    assert_eq!(model.viewport, before);
    assert_eq!(model.mode, Mode::Search);

    // Query editing while in normal mode
    let model = update(create_test_model(), Message::SearchInput('z'));
    assert!(model.search.query().is_empty());
    assert_eq!(model.mode, Mode::Normal);
}

#[test]
fn test_toggle_display_options() {
    let model = update(create_test_model(), Message::ToggleLineNumbers);
    assert!(!model.config.editor.show_line_numbers);
    let model = update(model, Message::ToggleWordWrap);
    assert!(model.config.editor.word_wrap);
    let model = update(model, Message::ToggleLineNumbers);
    assert!(model.config.editor.show_line_numbers);
}

#[test]
fn test_file_changed_requests_reload() {
    let model = update(create_test_model(), Message::FileChanged);
    assert_eq!(
        model.pending_tasks(),
        [Task::Load(PathBuf::from("test.txt"))]
    );
    let mut model = update(model, Message::ForceReload);
    assert_eq!(model.take_tasks().len(), 2);
}

#[test]
fn test_reload_keeps_clamped_offset() {
    let model = update(create_long_test_model(), Message::ScrollDown(50));
    let shorter = Document::load("short\n".repeat(30));
    let model = update(model, Message::FileLoaded(Ok(Arc::new(shorter))));
    assert_eq!(model.load_state, LoadState::Ready);
    assert_eq!(model.document.line_count(), 31);
    assert_eq!(model.viewport.offset(), 31 - 23);
}

#[test]
fn test_reload_reruns_committed_search() {
    let model = search(create_test_model(), "gamma");
    assert_eq!(model.search.hits(), [3]);
    let updated = Document::load("gamma\nbeta\nalpha\ngamma");
    let model = update(model, Message::FileLoaded(Ok(Arc::new(updated))));
    assert!(matches!(
        model.pending_tasks(),
        [Task::Search { jump_to_first: false, .. }]
    ));
    let offset = model.viewport.offset();
    let model = run_tasks(model);
    assert_eq!(model.search.hits(), [1, 4]);
    assert_eq!(model.search.highlight(), "gamma");
    assert_eq!(model.viewport.offset(), offset);
}

#[test]
fn test_reload_during_search_rescans_new_document() {
    let mut model = update(type_query(create_test_model(), "alpha"), Message::CommitSearch);
    let in_flight = model.take_tasks();
    let updated = Document::load("zzz\nzzz\nzzz\nzzz\nalpha");
    let mut model = update(model, Message::FileLoaded(Ok(Arc::new(updated))));
    assert!(matches!(
        model.pending_tasks(),
        [Task::Search { jump_to_first: true, .. }]
    ));

    // The scan of the old document finishes late and must not land.
    for task in in_flight {
        model = update(model, task.run());
    }
    assert!(model.search.hits().is_empty());

    let model = run_tasks(model);
    assert_eq!(model.search.hits(), [5]);
    assert_eq!(model.viewport.current_line(), 5);
}

#[test]
fn test_failed_reload_keeps_existing_content() {
    let model = create_test_model();
    let model = update(model, Message::FileLoaded(Err("gone".to_string())));
    assert_eq!(model.load_state, LoadState::Ready);
    assert_eq!(model.document.line_count(), 3);
}

#[test]
fn test_initial_load_from_disk() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    std::fs::write(&path, "first\nsecond\r\nthird").unwrap();

    let mut model = Model::new(path.clone(), Config::default(), (80, 24));
    assert_eq!(model.load_state, LoadState::Loading);
    model.request_load();
    let model = run_tasks(model);
    assert_eq!(model.load_state, LoadState::Ready);
    assert_eq!(model.document.line_count(), 3);
    assert_eq!(model.document.line_at(2).unwrap(), "second");
}

#[test]
fn test_initial_load_failure_sets_failed_state() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("absent.txt");

    let mut model = Model::new(path, Config::default(), (80, 24));
    model.request_load();
    let model = run_tasks(model);
    let LoadState::Failed(message) = &model.load_state else {
        panic!("expected failed state, got {:?}", model.load_state);
    };
    assert!(message.contains("absent.txt"));
}

#[test]
fn test_view_renders_model() {
    let model = create_test_model();
    let mut terminal = Terminal::new(TestBackend::new(40, 6)).unwrap();
    terminal.draw(|frame| App::view(&model, frame)).unwrap();
    let buffer = terminal.backend().buffer();
    let first_row: String = (0..40).map(|x| buffer[(x, 0)].symbol()).collect();
    assert!(first_row.starts_with(" 1 alpha"));
}
