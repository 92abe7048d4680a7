use serde::{Deserialize, Serialize};

/// One annotation attached to a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Annotation {
    /// Timestamp the annotation was added (store format)
    #[serde(default)]
    pub entry: String,
    pub description: String,
}

/// A task as exported by the task store.
///
/// The TUI never mutates this directly; all changes go through the store and
/// the snapshot is replaced wholesale on reload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Working-set ID, reassigned by the store
    pub id: u32,
    pub uuid: String,
    #[serde(default = "default_status")]
    pub status: String,
    /// `H`, `M`, `L`, or empty
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Store-format date (`20250114T000000Z` or `2025-01-14`), empty if unset
    #[serde(default)]
    pub due: String,
    #[serde(default)]
    pub start: String,
    #[serde(default)]
    pub project: String,
    #[serde(default)]
    pub recur: String,
    pub description: String,
    #[serde(default)]
    pub entry: String,
    #[serde(default)]
    pub annotations: Vec<Annotation>,
}

fn default_status() -> String {
    "pending".into()
}

impl Task {
    /// Create a pending task with only the identifying fields set
    pub fn new(id: u32, uuid: impl Into<String>, description: impl Into<String>) -> Self {
        Task {
            id,
            uuid: uuid.into(),
            status: default_status(),
            priority: String::new(),
            tags: Vec::new(),
            due: String::new(),
            start: String::new(),
            project: String::new(),
            recur: String::new(),
            description: description.into(),
            entry: String::new(),
            annotations: Vec::new(),
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Annotation texts joined for single-cell display
    pub fn annotation_summary(&self) -> String {
        self.annotations
            .iter()
            .map(|a| a.description.as_str())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// The fixed priority option set, in selector order
pub const PRIORITY_OPTIONS: [&str; 4] = ["H", "M", "L", ""];

/// Selector index for a stored priority value. Unknown values map to "none".
pub fn priority_index(priority: &str) -> usize {
    PRIORITY_OPTIONS
        .iter()
        .position(|p| *p == priority)
        .unwrap_or(PRIORITY_OPTIONS.len() - 1)
}

/// Human label for a priority value
pub fn priority_label(priority: &str) -> &'static str {
    match priority {
        "H" => "High",
        "M" => "Medium",
        "L" => "Low",
        _ => "None",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn priority_index_maps_option_set() {
        assert_eq!(priority_index("H"), 0);
        assert_eq!(priority_index("M"), 1);
        assert_eq!(priority_index("L"), 2);
        assert_eq!(priority_index(""), 3);
        assert_eq!(priority_index("X"), 3);
    }

    #[test]
    fn deserializes_store_export() {
        let json = r#"{"id":3,"uuid":"abc","description":"Write docs","tags":["work"],
            "annotations":[{"entry":"20250101T000000Z","description":"first"}]}"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.status, "pending");
        assert_eq!(task.tags, vec!["work".to_string()]);
        assert_eq!(task.annotation_summary(), "first");
        assert!(task.recur.is_empty());
    }
}
