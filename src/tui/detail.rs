use crate::model::{Task, priority_label};
use crate::ops::dates::{format_iso_date, parse_task_date};

/// One slot of the detail view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailFieldKind {
    Id,
    Uuid,
    Status,
    Priority,
    Tags,
    Due,
    Start,
    Project,
    Entry,
    Recurrence,
    Description,
}

/// What entering edit on a slot does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldAction {
    ReadOnly,
    PrioritySelect,
    /// Tag editor with an empty buffer
    TagsEdit,
    /// Date stepper seeded from the stored due date
    DueStep,
    ProjectEdit,
    RecurrenceEdit,
    /// Hand the description to the external editor
    ExternalEditor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailField {
    pub kind: DetailFieldKind,
    pub action: FieldAction,
}

impl DetailFieldKind {
    pub fn label(self) -> &'static str {
        match self {
            DetailFieldKind::Id => "ID",
            DetailFieldKind::Uuid => "UUID",
            DetailFieldKind::Status => "Status",
            DetailFieldKind::Priority => "Priority",
            DetailFieldKind::Tags => "Tags",
            DetailFieldKind::Due => "Due",
            DetailFieldKind::Start => "Start",
            DetailFieldKind::Project => "Project",
            DetailFieldKind::Entry => "Entry",
            DetailFieldKind::Recurrence => "Recurrence",
            DetailFieldKind::Description => "Description",
        }
    }

    pub fn action(self) -> FieldAction {
        match self {
            DetailFieldKind::Priority => FieldAction::PrioritySelect,
            DetailFieldKind::Tags => FieldAction::TagsEdit,
            DetailFieldKind::Due => FieldAction::DueStep,
            DetailFieldKind::Project => FieldAction::ProjectEdit,
            DetailFieldKind::Recurrence => FieldAction::RecurrenceEdit,
            DetailFieldKind::Description => FieldAction::ExternalEditor,
            DetailFieldKind::Id
            | DetailFieldKind::Uuid
            | DetailFieldKind::Status
            | DetailFieldKind::Start
            | DetailFieldKind::Entry => FieldAction::ReadOnly,
        }
    }

    /// Display text for this slot of `task`
    pub fn value(self, task: &Task) -> String {
        let date = |s: &str| parse_task_date(s).map(format_iso_date).unwrap_or_default();
        match self {
            DetailFieldKind::Id => task.id.to_string(),
            DetailFieldKind::Uuid => task.uuid.clone(),
            DetailFieldKind::Status => task.status.clone(),
            DetailFieldKind::Priority => priority_label(&task.priority).to_string(),
            DetailFieldKind::Tags => task.tags.join(" "),
            DetailFieldKind::Due => date(&task.due),
            DetailFieldKind::Start => date(&task.start),
            DetailFieldKind::Project => task.project.clone(),
            DetailFieldKind::Entry => date(&task.entry),
            DetailFieldKind::Recurrence => task.recur.clone(),
            DetailFieldKind::Description => task.description.clone(),
        }
    }
}

/// The ordered slot list for `task`. Recurrence appears only when the task
/// recurs, between Entry and Description.
pub fn detail_fields(task: &Task) -> Vec<DetailField> {
    use DetailFieldKind::*;
    let mut kinds = vec![Id, Uuid, Status, Priority, Tags, Due, Start, Project, Entry];
    if !task.recur.is_empty() {
        kinds.push(Recurrence);
    }
    kinds.push(Description);
    kinds
        .into_iter()
        .map(|kind| DetailField {
            kind,
            action: kind.action(),
        })
        .collect()
}

/// The detail pane: a task snapshot, its slot list, and the slot cursor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailState {
    pub task: Task,
    pub fields: Vec<DetailField>,
    pub cursor: usize,
}

impl DetailState {
    pub fn new(task: Task) -> Self {
        let fields = detail_fields(&task);
        DetailState {
            task,
            fields,
            cursor: 0,
        }
    }

    /// Swap in a fresh snapshot of the displayed task, rebuilding the slot
    /// list and keeping the cursor on the same kind of slot when it exists.
    pub fn refresh(&mut self, task: Task) {
        let current = self.current().map(|f| f.kind);
        self.fields = detail_fields(&task);
        self.task = task;
        self.cursor = current
            .and_then(|kind| self.index_of(kind))
            .unwrap_or(self.cursor)
            .min(self.fields.len() - 1);
    }

    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    pub fn current(&self) -> Option<&DetailField> {
        self.fields.get(self.cursor)
    }

    pub fn index_of(&self, kind: DetailFieldKind) -> Option<usize> {
        self.fields.iter().position(|f| f.kind == kind)
    }

    pub fn move_up(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        if self.cursor + 1 < self.fields.len() {
            self.cursor += 1;
        }
    }

    pub fn move_first(&mut self) {
        self.cursor = 0;
    }

    pub fn move_last(&mut self) {
        self.cursor = self.fields.len() - 1;
    }
}
