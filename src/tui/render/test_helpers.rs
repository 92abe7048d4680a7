use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::layout::Rect;

use crate::model::{Annotation, Config, Task};
use crate::store::MemoryStore;
use crate::tui::app::App;

pub const TERM_W: u16 = 80;
pub const TERM_H: u16 = 24;

/// Render into an in-memory buffer and return plain text (no styles).
pub fn render_to_string<F>(w: u16, h: u16, f: F) -> String
where
    F: FnOnce(&mut ratatui::Frame, Rect),
{
    let backend = TestBackend::new(w, h);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal
        .draw(|frame| {
            let area = frame.area();
            f(frame, area);
        })
        .unwrap();

    let buf = terminal.backend().buffer().clone();
    let w = buf.area.width as usize;
    let lines: Vec<String> = buf
        .content
        .chunks(w)
        .map(|row| {
            let s: String = row.iter().map(|cell| cell.symbol()).collect();
            s.trim_end().to_string()
        })
        .collect();

    // Trim trailing blank lines
    let end = lines
        .iter()
        .rposition(|l| !l.is_empty())
        .map_or(0, |i| i + 1);
    lines[..end].join("\n")
}

/// Three pending tasks; task 2 recurs and has an annotation.
pub fn sample_tasks() -> Vec<Task> {
    let mut milk = Task::new(1, "uuid-1", "Buy milk");
    milk.priority = "M".into();
    milk.tags = vec!["home".into()];

    let mut rent = Task::new(2, "uuid-2", "Pay rent");
    rent.due = "2025-02-01".into();
    rent.recur = "monthly".into();
    rent.project = "home".into();
    rent.annotations.push(Annotation {
        entry: "2025-01-20".into(),
        description: "called landlord".into(),
    });

    let mut report = Task::new(3, "uuid-3", "Write report");
    report.priority = "H".into();
    report.tags = vec!["work".into()];
    report.project = "work.q1".into();

    vec![milk, rent, report]
}

/// An app over an in-memory store, plus a handle sharing that store.
pub fn app_with_tasks(tasks: Vec<Task>) -> (App, MemoryStore) {
    let store = MemoryStore::from_tasks(tasks);
    let app = App::new(Box::new(store.clone()), &Config::default());
    (app, store)
}
