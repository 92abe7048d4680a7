use std::collections::HashMap;
use std::rc::Rc;

use regex::Regex;

/// Compiled search patterns keyed by their literal source text.
///
/// Append-only for the life of the app; every search scope shares one cache
/// so re-running a pattern never recompiles it.
#[derive(Debug, Default)]
pub struct RegexCache {
    entries: HashMap<String, Rc<Regex>>,
    compiles: usize,
}

impl RegexCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pattern: &str) -> Option<Rc<Regex>> {
        self.entries.get(pattern).cloned()
    }

    /// Return the cached regex for `pattern`, compiling and inserting it on
    /// a miss. Failed compiles are not cached.
    pub fn get_or_compile(&mut self, pattern: &str) -> Result<Rc<Regex>, regex::Error> {
        if let Some(re) = self.entries.get(pattern) {
            return Ok(Rc::clone(re));
        }
        self.compiles += 1;
        let re = Rc::new(Regex::new(pattern)?);
        self.entries.insert(pattern.to_string(), Rc::clone(&re));
        tracing::debug!(pattern, cached = self.entries.len(), "search pattern compiled");
        Ok(re)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of times the regex compiler has been invoked
    pub fn compile_count(&self) -> usize {
        self.compiles
    }
}
