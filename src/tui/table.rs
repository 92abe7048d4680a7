use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::model::Task;
use crate::ops::dates::{age_label, format_iso_date, parse_task_date};
use crate::util::unicode::strip_ansi;

/// Column headers, in display order
pub const COLUMNS: [&str; 9] = [
    "Pri",
    "ID",
    "Age",
    "Due",
    "Recur",
    "Tags",
    "Project",
    "Description",
    "Annotations",
];

pub const ID_COLUMN: usize = 1;
pub const DESCRIPTION_COLUMN: usize = 7;

/// Preferred widths; the description column takes the remainder
pub const COLUMN_WIDTHS: [u16; 9] = [3, 4, 4, 10, 8, 14, 12, 0, 20];

/// Cell text for one task row
pub fn task_cells(task: &Task, today: chrono::NaiveDate) -> Vec<String> {
    let due = parse_task_date(&task.due)
        .map(format_iso_date)
        .unwrap_or_else(|| task.due.clone());
    vec![
        task.priority.clone(),
        task.id.to_string(),
        age_label(&task.entry, today),
        due,
        task.recur.clone(),
        task.tags.join(" "),
        task.project.clone(),
        task.description.clone(),
        task.annotation_summary(),
    ]
}

/// A row/column cursor over rendered cell text.
///
/// Navigation keys the mode dispatcher does not intercept land here.
#[derive(Debug, Default)]
pub struct Table {
    rows: Vec<Vec<String>>,
    cursor: usize,
    column: usize,
    /// Visible body rows, set from the layout
    height: usize,
    /// First visible row
    offset: usize,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the rows, keeping the cursor in bounds
    pub fn set_rows(&mut self, rows: Vec<Vec<String>>) {
        self.rows = rows;
        self.set_cursor(self.cursor);
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn column_cursor(&self) -> usize {
        self.column
    }

    pub fn set_cursor(&mut self, row: usize) {
        self.cursor = row.min(self.rows.len().saturating_sub(1));
        self.scroll_to_cursor();
    }

    pub fn set_column_cursor(&mut self, col: usize) {
        self.column = col.min(COLUMNS.len() - 1);
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn set_height(&mut self, height: usize) {
        self.height = height.max(1);
        self.scroll_to_cursor();
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn selected_row(&self) -> Option<&[String]> {
        self.rows.get(self.cursor).map(Vec::as_slice)
    }

    /// Task ID of the selected row. The cell may carry styling escapes.
    pub fn selected_task_id(&self) -> Option<u32> {
        let cell = self.selected_row()?.get(ID_COLUMN)?;
        strip_ansi(cell).trim().parse().ok()
    }

    fn scroll_to_cursor(&mut self) {
        let height = self.height.max(1);
        if self.cursor < self.offset {
            self.offset = self.cursor;
        } else if self.cursor >= self.offset + height {
            self.offset = self.cursor + 1 - height;
        }
    }

    /// Apply a navigation key. Returns true if the key was a navigation key.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let last = self.rows.len().saturating_sub(1);
        let page = self.height.max(1);
        match (key.modifiers, key.code) {
            (_, KeyCode::Up) | (KeyModifiers::NONE, KeyCode::Char('k')) => {
                self.set_cursor(self.cursor.saturating_sub(1))
            }
            (_, KeyCode::Down) | (KeyModifiers::NONE, KeyCode::Char('j')) => {
                self.set_cursor(self.cursor + 1)
            }
            (_, KeyCode::Left) | (KeyModifiers::NONE, KeyCode::Char('h')) => {
                self.set_column_cursor(self.column.saturating_sub(1))
            }
            (_, KeyCode::Right) | (KeyModifiers::NONE, KeyCode::Char('l')) => {
                self.set_column_cursor(self.column + 1)
            }
            (_, KeyCode::Home) | (KeyModifiers::NONE, KeyCode::Char('g')) => self.set_cursor(0),
            (_, KeyCode::End) | (_, KeyCode::Char('G')) => self.set_cursor(last),
            (_, KeyCode::PageUp) | (KeyModifiers::CONTROL, KeyCode::Char('u')) => {
                self.set_cursor(self.cursor.saturating_sub(page))
            }
            (_, KeyCode::PageDown) | (KeyModifiers::CONTROL, KeyCode::Char('d')) => {
                self.set_cursor(self.cursor + page)
            }
            (_, KeyCode::Char('0')) => self.set_column_cursor(0),
            (_, KeyCode::Char('$')) => self.set_column_cursor(COLUMNS.len() - 1),
            _ => return false,
        }
        true
    }
}
