use std::rc::Rc;

use regex::Regex;

use crate::util::unicode::strip_ansi;

/// Which surface a search runs over
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchScope {
    /// Rendered table cells
    List,
    /// Help overlay lines
    Help,
    /// The detail pane
    Detail,
}

/// A confirmed search: the pattern, its hits as (row, column), and the
/// current hit.
#[derive(Debug, Clone, Default)]
pub struct SearchState {
    pub regex: Option<Rc<Regex>>,
    pub matches: Vec<(usize, usize)>,
    pub index: usize,
}

impl SearchState {
    pub fn clear(&mut self) {
        self.regex = None;
        self.matches.clear();
        self.index = 0;
    }

    pub fn is_active(&self) -> bool {
        self.regex.is_some()
    }

    pub fn pattern(&self) -> Option<&str> {
        self.regex.as_deref().map(Regex::as_str)
    }

    pub fn current(&self) -> Option<(usize, usize)> {
        self.matches.get(self.index).copied()
    }

    /// Step to the next hit, wrapping
    pub fn next(&mut self) -> Option<(usize, usize)> {
        if self.matches.is_empty() {
            return None;
        }
        self.index = (self.index + 1) % self.matches.len();
        self.current()
    }

    /// Step to the previous hit, wrapping
    pub fn prev(&mut self) -> Option<(usize, usize)> {
        if self.matches.is_empty() {
            return None;
        }
        self.index = (self.index + self.matches.len() - 1) % self.matches.len();
        self.current()
    }

    /// Recompute hits over table cells, keeping the index in range
    pub fn match_cells(&mut self, rows: &[Vec<String>]) {
        self.matches.clear();
        if let Some(re) = &self.regex {
            for (r, row) in rows.iter().enumerate() {
                for (c, cell) in row.iter().enumerate() {
                    if re.is_match(&strip_ansi(cell)) {
                        self.matches.push((r, c));
                    }
                }
            }
        }
        self.clamp_index();
    }

    /// Recompute hits over plain lines; the column is always 0
    pub fn match_lines(&mut self, lines: &[String]) {
        self.matches.clear();
        if let Some(re) = &self.regex {
            self.matches = lines
                .iter()
                .enumerate()
                .filter(|(_, line)| re.is_match(line))
                .map(|(i, _)| (i, 0))
                .collect();
        }
        self.clamp_index();
    }

    fn clamp_index(&mut self) {
        if self.index >= self.matches.len() {
            self.index = 0;
        }
    }
}
