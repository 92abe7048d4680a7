/// Key, description pairs grouped under section headings
const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Table",
        &[
            ("j/k ↑/↓", "move row"),
            ("h/l ←/→", "move column"),
            ("g/G", "first/last row"),
            ("Enter", "open task detail"),
            ("/", "search cells (regex)"),
            ("n/N", "next/previous match"),
            ("Esc", "clear search"),
            ("?", "this help"),
            ("q", "quit"),
        ],
    ),
    (
        "Editing",
        &[
            ("a", "add annotation"),
            ("A", "replace annotations (empty clears)"),
            ("e", "edit description"),
            ("t", "edit tags (+add -remove)"),
            ("d", "step due date"),
            ("r", "edit recurrence"),
            ("p", "edit project"),
            ("P", "select priority"),
            ("f", "edit filter"),
            ("+", "add task"),
        ],
    ),
    (
        "Edit line",
        &[
            ("Enter", "commit"),
            ("Esc", "cancel"),
            ("←/→ h/l", "due: -/+ 1 day; priority: cycle"),
            ("↑/↓ k/j", "due: -/+ 1 week"),
        ],
    ),
    (
        "Detail",
        &[
            ("j/k", "move field"),
            ("g/G", "first/last field"),
            ("i/Enter", "edit field"),
            ("/ or ?", "search fields"),
            ("q/Esc", "back to table"),
        ],
    ),
    (
        "Help",
        &[("/", "search help"), ("n/N", "next/previous match"), ("q/Esc/?", "close")],
    ),
];

/// The help text, one entry per rendered line. Help search matches against
/// exactly these strings.
pub fn help_lines() -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (title, keys)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(String::new());
        }
        lines.push(title.to_string());
        for (key, desc) in keys.iter() {
            lines.push(format!("  {:<10} {}", key, desc));
        }
    }
    lines
}
