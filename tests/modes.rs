use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use pretty_assertions::assert_eq;

use samurai::model::{Config, Task};
use samurai::store::{MemoryStore, StoreCall};
use samurai::tui::app::{App, AppEvent, Mode, PrioritySession, TextKind, View};
use samurai::tui::blink::BlinkTarget;
use samurai::tui::detail::DetailFieldKind;
use samurai::tui::input::{handle_event, handle_key};
use samurai::tui::search::SearchScope;
use samurai::tui::table::DESCRIPTION_COLUMN;

fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::new(code, KeyModifiers::NONE)
}

fn ch(c: char) -> KeyEvent {
    let modifiers = if c.is_ascii_uppercase() {
        KeyModifiers::SHIFT
    } else {
        KeyModifiers::NONE
    };
    KeyEvent::new(KeyCode::Char(c), modifiers)
}

fn press(app: &mut App, c: char) -> bool {
    handle_key(app, ch(c))
}

fn type_text(app: &mut App, text: &str) {
    for c in text.chars() {
        assert!(handle_key(app, ch(c)), "'{}' should go to the session", c);
    }
}

fn enter(app: &mut App) -> bool {
    handle_key(app, key(KeyCode::Enter))
}

fn setup(tasks: Vec<Task>) -> (App, MemoryStore) {
    let store = MemoryStore::from_tasks(tasks);
    let app = App::new(Box::new(store.clone()), &Config::default());
    (app, store)
}

fn task(id: u32, description: &str) -> Task {
    Task::new(id, format!("uuid-{}", id), description)
}

fn three_tasks() -> Vec<Task> {
    vec![task(1, "Buy milk"), task(2, "Pay rent"), task(3, "Write report")]
}

fn status(app: &App) -> Option<String> {
    app.status.message().map(str::to_string)
}

#[test]
fn tag_edit_adds_then_removes() {
    let mut t = task(1, "Refactor");
    t.tags = vec!["old".into(), "work".into()];
    let (mut app, store) = setup(vec![t]);

    assert!(!press(&mut app, 't'));
    assert!(matches!(&app.mode, Mode::Text(s) if s.kind == (TextKind::Tags { id: 1 })));
    type_text(&mut app, "+urgent -old");
    assert!(enter(&mut app));

    let mut tags = store.task(1).unwrap().tags;
    tags.sort();
    assert_eq!(tags, vec!["urgent", "work"]);
    assert_eq!(
        store.calls(),
        vec![
            StoreCall::AddTags(1, vec!["urgent".into()]),
            StoreCall::RemoveTags(1, vec!["old".into()]),
        ]
    );
    assert_eq!(app.mode, Mode::Navigate);
    assert_eq!(app.blink.as_ref().map(|b| b.target), Some(BlinkTarget::Row(1)));
}

#[test]
fn invalid_tag_never_reaches_store() {
    let (mut app, store) = setup(three_tasks());
    press(&mut app, 't');
    type_text(&mut app, "bad:tag");
    enter(&mut app);
    assert!(status(&app).unwrap().starts_with("Error: add tag 'bad:tag'"));
    assert!(app.mode.is_editing());
    assert!(store.calls().is_empty());
}

#[test]
fn priority_selector_steps_right() {
    let mut t = task(1, "Triage");
    t.priority = "M".into();
    let (mut app, store) = setup(vec![t]);

    press(&mut app, 'P');
    assert_eq!(app.mode, Mode::Priority(PrioritySession { id: 1, index: 1 }));
    handle_key(&mut app, key(KeyCode::Right));
    enter(&mut app);

    assert_eq!(store.task(1).unwrap().priority, "L");
    assert_eq!(app.mode, Mode::Navigate);
}

#[test]
fn priority_selector_wraps_left() {
    let mut t = task(1, "Triage");
    t.priority = "H".into();
    let (mut app, store) = setup(vec![t]);

    press(&mut app, 'P');
    handle_key(&mut app, key(KeyCode::Left));
    enter(&mut app);
    assert_eq!(store.task(1).unwrap().priority, "");
}

#[test]
fn add_task_moves_cursor_to_new_row() {
    let (mut app, store) = setup(three_tasks());

    press(&mut app, '+');
    type_text(&mut app, "Buy milk");
    enter(&mut app);

    let added = store.task(4).expect("store assigns the next ID");
    assert_eq!(added.description, "Buy milk");
    assert_eq!(app.table.cursor(), 3);
    assert_eq!(app.table.column_cursor(), DESCRIPTION_COLUMN);
    assert_eq!(app.selected_task_id(), Some(4));
    assert_eq!(app.blink.as_ref().map(|b| b.target), Some(BlinkTarget::Row(4)));
}

#[test]
fn add_task_hidden_by_filter_is_a_no_op() {
    let mut tasks = three_tasks();
    tasks[0].tags = vec!["work".into()];
    let (mut app, store) = setup(tasks);
    app.filters = vec!["+work".into()];
    app.reload().unwrap();

    press(&mut app, '+');
    type_text(&mut app, "Call mom");
    enter(&mut app);

    assert!(store.task(4).is_some());
    assert_eq!(app.mode, Mode::Navigate);
    assert!(app.blink.is_none());
    assert_eq!(app.table.cursor(), 0);
}

#[test]
fn empty_annotation_is_rejected() {
    let (mut app, store) = setup(three_tasks());

    press(&mut app, 'a');
    enter(&mut app);

    assert_eq!(
        status(&app).as_deref(),
        Some("Error: annotation cannot be empty")
    );
    assert!(matches!(&app.mode, Mode::Text(s) if s.kind == (TextKind::Annotate { id: 1, replace: false })));
    assert!(store.calls().is_empty());
}

#[test]
fn replace_annotations_with_empty_clears() {
    let mut t = task(1, "Notes");
    t.annotations.push(samurai::model::Annotation {
        entry: String::new(),
        description: "stale".into(),
    });
    let (mut app, store) = setup(vec![t]);

    press(&mut app, 'A');
    enter(&mut app);

    assert!(store.task(1).unwrap().annotations.is_empty());
    assert_eq!(store.calls(), vec![StoreCall::ReplaceAnnotations(1, String::new())]);
    assert_eq!(app.mode, Mode::Navigate);
}

#[test]
fn annotation_is_stored() {
    let (mut app, store) = setup(three_tasks());
    handle_key(&mut app, key(KeyCode::Down));
    press(&mut app, 'a');
    type_text(&mut app, "called");
    enter(&mut app);
    assert_eq!(store.calls(), vec![StoreCall::Annotate(2, "called".into())]);
    assert_eq!(store.task(2).unwrap().annotations[0].description, "called");
}

#[test]
fn bad_pattern_keeps_previous_matches() {
    let (mut app, _store) = setup(three_tasks());

    press(&mut app, '/');
    type_text(&mut app, "milk");
    enter(&mut app);
    let before = app.search.matches.clone();
    assert_eq!(before, vec![(0, DESCRIPTION_COLUMN)]);

    press(&mut app, '/');
    type_text(&mut app, "(unterminated");
    enter(&mut app);

    assert!(status(&app).unwrap().starts_with("Error: invalid regex"));
    assert!(app.mode.is_editing());
    assert_eq!(app.search.matches, before);
    assert_eq!(app.search.pattern(), Some("milk"));
}

#[test]
fn search_jumps_and_cycles() {
    let (mut app, _store) = setup(three_tasks());

    press(&mut app, '/');
    type_text(&mut app, "r");
    enter(&mut app);
    // "Pay rent" and "Write report"
    assert_eq!(app.search.matches, vec![(1, DESCRIPTION_COLUMN), (2, DESCRIPTION_COLUMN)]);
    assert_eq!(app.table.cursor(), 1);

    press(&mut app, 'n');
    assert_eq!(app.table.cursor(), 2);
    press(&mut app, 'n');
    assert_eq!(app.table.cursor(), 1);
    press(&mut app, 'N');
    assert_eq!(app.table.cursor(), 2);

    handle_key(&mut app, key(KeyCode::Esc));
    assert!(!app.search.is_active());
}

#[test]
fn same_pattern_compiles_once() {
    let (mut app, _store) = setup(three_tasks());
    for _ in 0..2 {
        press(&mut app, '/');
        type_text(&mut app, "rent");
        enter(&mut app);
    }
    assert_eq!(app.regex_cache.compile_count(), 1);
    assert_eq!(app.regex_cache.len(), 1);
}

#[test]
fn due_stepper_round_trips() {
    let mut t = task(1, "File taxes");
    t.due = "20250401T000000Z".into();
    let (mut app, store) = setup(vec![t]);

    press(&mut app, 'd');
    let Mode::Due(session) = &app.mode else {
        panic!("expected due mode, got {:?}", app.mode);
    };
    let seeded = session.date;
    assert_eq!(seeded.to_string(), "2025-04-01");

    handle_key(&mut app, key(KeyCode::Right));
    handle_key(&mut app, key(KeyCode::Left));
    press(&mut app, 'j');
    press(&mut app, 'k');
    let Mode::Due(session) = &app.mode else {
        panic!("left due mode");
    };
    assert_eq!(session.date, seeded);

    enter(&mut app);
    assert_eq!(store.calls(), vec![StoreCall::SetDueDate(1, "2025-04-01".into())]);
    assert_eq!(store.task(1).unwrap().due, "2025-04-01");
}

#[test]
fn due_stepper_steps_a_week() {
    let mut t = task(1, "File taxes");
    t.due = "2025-04-01".into();
    let (mut app, store) = setup(vec![t]);

    press(&mut app, 'd');
    handle_key(&mut app, key(KeyCode::Down));
    handle_key(&mut app, key(KeyCode::Right));
    enter(&mut app);
    assert_eq!(store.task(1).unwrap().due, "2025-04-09");
}

#[test]
fn store_failure_keeps_session_open() {
    let (mut app, store) = setup(three_tasks());
    store.fail_next("disk full");

    press(&mut app, 'p');
    type_text(&mut app, "home");
    enter(&mut app);

    assert_eq!(status(&app).as_deref(), Some("Error: disk full"));
    assert!(matches!(&app.mode, Mode::Text(s) if s.kind == (TextKind::Project { id: 1 })));
    assert!(app.blink.is_none());

    // Retry succeeds
    enter(&mut app);
    assert_eq!(store.task(1).unwrap().project, "home");
    assert_eq!(app.tasks[0].project, "home");
    assert_eq!(app.mode, Mode::Navigate);
}

#[test]
fn stale_status_timer_keeps_newer_message() {
    let (mut app, _store) = setup(three_tasks());
    let t0 = Instant::now();

    app.flash_at("first", t0);
    app.flash_at("second", t0 + Duration::from_secs(1));

    app.fire_timers(t0 + Duration::from_millis(2500));
    assert_eq!(status(&app).as_deref(), Some("second"));

    app.fire_timers(t0 + Duration::from_secs(3));
    assert_eq!(status(&app), None);
}

#[test]
fn escape_cancels_without_store_call() {
    let (mut app, store) = setup(three_tasks());

    press(&mut app, 'e');
    assert!(matches!(&app.mode, Mode::Text(s) if s.input.value() == "Buy milk"));
    type_text(&mut app, " now");
    assert!(handle_key(&mut app, key(KeyCode::Esc)));

    assert_eq!(app.mode, Mode::Navigate);
    assert!(store.calls().is_empty());
    assert_eq!(store.task(1).unwrap().description, "Buy milk");
}

#[test]
fn one_session_at_a_time() {
    let (mut app, _store) = setup(three_tasks());

    press(&mut app, 'a');
    // Keys that would open other sessions are typed into the buffer
    type_text(&mut app, "tP");
    assert!(matches!(&app.mode, Mode::Text(s) if s.input.value() == "tP"));

    handle_key(&mut app, key(KeyCode::Esc));
    press(&mut app, 'P');
    assert!(matches!(app.mode, Mode::Priority(_)));
}

#[test]
fn edit_row_shrinks_table() {
    let (mut app, _store) = setup(three_tasks());
    app.set_viewport_height(30);
    assert_eq!(app.table.height(), 28);

    press(&mut app, 'r');
    assert_eq!(app.table.height(), 27);
    handle_key(&mut app, key(KeyCode::Esc));
    assert_eq!(app.table.height(), 28);
}

#[test]
fn filter_replaces_visible_set() {
    let mut tasks = three_tasks();
    tasks[2].tags = vec!["work".into()];
    let (mut app, store) = setup(tasks);

    press(&mut app, 'f');
    type_text(&mut app, "+work");
    enter(&mut app);

    assert_eq!(app.filters, vec!["+work"]);
    assert_eq!(app.tasks.len(), 1);
    assert_eq!(app.selected_task_id(), Some(3));
    assert!(app.blink.is_none());
    assert!(store.calls().is_empty());

    // Prefilled with the current filter; clearing shows everything again
    press(&mut app, 'f');
    assert!(matches!(&app.mode, Mode::Text(s) if s.input.value() == "+work"));
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    enter(&mut app);
    assert!(app.filters.is_empty());
    assert_eq!(app.tasks.len(), 3);
}

#[test]
fn blinking_row_only_accepts_movement() {
    let (mut app, store) = setup(three_tasks());
    press(&mut app, 'p');
    type_text(&mut app, "x");
    enter(&mut app);
    assert!(app.is_blinking_row());

    press(&mut app, 'a');
    assert_eq!(app.mode, Mode::Navigate);
    press(&mut app, 'j');
    assert_eq!(app.table.cursor(), 1);
    assert_eq!(store.calls().len(), 1);
}

#[test]
fn detail_view_tracks_recurrence_slot() {
    let mut t = task(1, "Pay rent");
    t.due = "2025-02-01".into();
    t.recur = "monthly".into();
    let (mut app, store) = setup(vec![t]);

    enter(&mut app);
    let count = app.detail().map(|d| d.field_count());
    assert_eq!(count, Some(11));

    // Walk to Recurrence and clear it
    let idx = app.detail().unwrap().index_of(DetailFieldKind::Recurrence).unwrap();
    for _ in 0..idx {
        press(&mut app, 'j');
    }
    press(&mut app, 'i');
    assert!(matches!(&app.mode, Mode::Text(s) if s.input.value() == "monthly"));
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    enter(&mut app);

    assert_eq!(store.task(1).unwrap().recur, "");
    let ds = app.detail().unwrap();
    assert_eq!(ds.field_count(), 10);
    assert!(ds.cursor < ds.field_count());
}

#[test]
fn detail_field_edit_blinks_the_field() {
    let mut t = task(1, "Ship it");
    t.tags = vec!["work".into()];
    let (mut app, store) = setup(vec![t]);

    enter(&mut app);
    let idx = app.detail().unwrap().index_of(DetailFieldKind::Tags).unwrap();
    for _ in 0..idx {
        handle_key(&mut app, key(KeyCode::Down));
    }
    press(&mut app, 'i');
    // Tag editor opens empty
    assert!(matches!(&app.mode, Mode::Text(s) if s.input.value().is_empty()));
    type_text(&mut app, "release");
    enter(&mut app);

    assert!(store.task(1).unwrap().has_tag("release"));
    assert_eq!(
        app.blink.as_ref().map(|b| b.target),
        Some(BlinkTarget::Field(DetailFieldKind::Tags))
    );
    assert_eq!(app.detail().unwrap().task.tags, vec!["work", "release"]);
}

#[test]
fn detail_read_only_fields_do_nothing() {
    let (mut app, _store) = setup(three_tasks());
    enter(&mut app);
    press(&mut app, 'i');
    assert_eq!(app.mode, Mode::Navigate);

    press(&mut app, 'q');
    assert_eq!(app.view, View::Table);
    assert!(!app.should_quit);
}

#[test]
fn detail_due_seeds_today_when_unset() {
    let (mut app, _store) = setup(three_tasks());
    enter(&mut app);
    let idx = app.detail().unwrap().index_of(DetailFieldKind::Due).unwrap();
    for _ in 0..idx {
        press(&mut app, 'j');
    }
    press(&mut app, 'i');
    let Mode::Due(session) = &app.mode else {
        panic!("expected due mode");
    };
    assert_eq!(session.date, samurai::ops::dates::today());
}

#[test]
fn description_goes_to_external_editor() {
    let (mut app, store) = setup(three_tasks());
    enter(&mut app);
    press(&mut app, 'G');
    press(&mut app, 'i');

    let pending = app.pending_editor.take().expect("editor requested");
    assert_eq!(pending.text, "Buy milk");
    assert_eq!(app.mode, Mode::Navigate);

    handle_event(
        &mut app,
        AppEvent::DescriptionEdited {
            id: pending.id,
            result: Ok("Buy oat milk".into()),
        },
    );
    assert_eq!(store.task(1).unwrap().description, "Buy oat milk");
    assert_eq!(
        app.blink.as_ref().map(|b| b.target),
        Some(BlinkTarget::Field(DetailFieldKind::Description))
    );

    handle_event(
        &mut app,
        AppEvent::DescriptionEdited {
            id: 1,
            result: Err("vi exited with 1".into()),
        },
    );
    assert_eq!(status(&app).as_deref(), Some("Error: editor: vi exited with 1"));
    assert_eq!(store.calls().len(), 1);
}

#[test]
fn empty_description_rejected() {
    let (mut app, store) = setup(three_tasks());
    press(&mut app, 'e');
    handle_key(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    enter(&mut app);
    assert!(status(&app).unwrap().starts_with("Error: "));
    assert!(app.mode.is_editing());
    assert!(store.calls().is_empty());
}

#[test]
fn recurrence_needs_valid_spec() {
    let mut t = task(1, "Water plants");
    t.due = "2025-05-01".into();
    let (mut app, store) = setup(vec![t]);

    press(&mut app, 'r');
    type_text(&mut app, "sometimes");
    enter(&mut app);
    assert!(app.mode.is_editing());
    assert!(store.calls().is_empty());

    handle_key(&mut app, KeyEvent::new(KeyCode::Char('u'), KeyModifiers::CONTROL));
    type_text(&mut app, "weekly");
    enter(&mut app);
    assert_eq!(store.task(1).unwrap().recur, "weekly");
}

#[test]
fn help_search_scrolls_to_match() {
    let (mut app, _store) = setup(three_tasks());
    press(&mut app, '?');
    assert!(app.show_help);

    press(&mut app, '/');
    type_text(&mut app, "annotation");
    enter(&mut app);
    let first = app.help_search.current().map(|(line, _)| line);
    assert!(first.is_some());
    assert_eq!(Some(app.help_scroll), first);
    assert!(app.help_lines[app.help_scroll].contains("annotation"));

    press(&mut app, 'n');
    assert_ne!(Some(app.help_scroll), first);

    press(&mut app, 'q');
    assert!(!app.show_help);
    assert!(!app.should_quit);
}

#[test]
fn quit_from_table() {
    let (mut app, _store) = setup(three_tasks());
    press(&mut app, 'q');
    assert!(app.should_quit);
}

#[test]
fn help_bad_pattern_keeps_previous_matches() {
    let (mut app, _store) = setup(three_tasks());
    press(&mut app, '?');
    press(&mut app, '/');
    type_text(&mut app, "annot");
    enter(&mut app);
    let before = app.help_search.matches.clone();
    assert_eq!(before.len(), 2);

    press(&mut app, '/');
    type_text(&mut app, "(bad");
    enter(&mut app);

    assert_eq!(
        status(&app).as_deref(),
        Some("Error: invalid regex: unclosed group")
    );
    assert!(matches!(&app.mode, Mode::Text(s) if s.kind == TextKind::Search(SearchScope::Help)));
    assert_eq!(app.help_search.matches, before);
    assert_eq!(app.help_search.pattern(), Some("annot"));
    assert!(app.show_help);
}

#[test]
fn detail_search_highlights_without_a_cursor() {
    let (mut app, _store) = setup(three_tasks());
    enter(&mut app);
    let description = app
        .detail()
        .unwrap()
        .index_of(DetailFieldKind::Description)
        .unwrap();

    press(&mut app, '/');
    type_text(&mut app, "milk");
    enter(&mut app);
    assert_eq!(app.mode, Mode::Navigate);
    assert_eq!(app.detail_search.matches, vec![(description, 0)]);

    // n/N leave both the hit index and the slot cursor alone
    press(&mut app, 'n');
    press(&mut app, 'N');
    assert_eq!(app.detail_search.index, 0);
    assert_eq!(app.detail().unwrap().cursor, 0);
    assert!(matches!(app.view, View::Detail(_)));
}

#[test]
fn detail_bad_pattern_keeps_previous_matches() {
    let (mut app, _store) = setup(three_tasks());
    enter(&mut app);
    press(&mut app, '/');
    type_text(&mut app, "milk");
    enter(&mut app);
    let before = app.detail_search.matches.clone();

    // `?` also starts a detail search
    press(&mut app, '?');
    assert!(!app.show_help);
    assert!(matches!(&app.mode, Mode::Text(s) if s.kind == TextKind::Search(SearchScope::Detail)));
    type_text(&mut app, "(bad");
    enter(&mut app);

    assert!(status(&app).unwrap().starts_with("Error: invalid regex"));
    assert!(app.mode.is_editing());
    assert_eq!(app.detail_search.matches, before);
    assert_eq!(app.detail_search.pattern(), Some("milk"));

    handle_key(&mut app, key(KeyCode::Esc));
    assert_eq!(app.mode, Mode::Navigate);
    assert!(matches!(app.view, View::Detail(_)));
}

#[test]
fn failed_reload_keeps_session_open() {
    let (mut app, store) = setup(three_tasks());
    press(&mut app, 'a');
    type_text(&mut app, "called");
    store.fail_next_export("task list busy");
    enter(&mut app);

    assert_eq!(status(&app).as_deref(), Some("Error: task list busy"));
    assert!(app.mode.is_editing());
    assert!(app.blink.is_none());
    assert!(app.tasks[0].annotations.is_empty());
}

#[test]
fn failed_filter_reload_restores_filters() {
    let (mut app, store) = setup(three_tasks());
    press(&mut app, 'f');
    type_text(&mut app, "+work");
    store.fail_next_export("task list busy");
    enter(&mut app);

    assert!(app.filters.is_empty());
    assert!(app.mode.is_editing());
    assert_eq!(app.table.len(), 3);
}
