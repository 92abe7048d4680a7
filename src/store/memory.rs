use std::cell::RefCell;
use std::rc::Rc;

use chrono::Utc;

use super::{StoreError, TaskStore};
use crate::model::{Annotation, Task};
use crate::ops::add_line::parse_add_line;
use crate::ops::dates::{format_iso_date, parse_task_date};
use crate::ops::filter::matches_filters;

/// A mutation as received by the store, recorded in call order
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreCall {
    Annotate(u32, String),
    ReplaceAnnotations(u32, String),
    SetDescription(u32, String),
    AddTags(u32, Vec<String>),
    RemoveTags(u32, Vec<String>),
    SetDueDate(u32, String),
    SetRecurrence(u32, String),
    SetProject(u32, String),
    SetPriority(u32, String),
    AddLine(String),
}

#[derive(Debug, Default)]
struct Inner {
    tasks: Vec<Task>,
    calls: Vec<StoreCall>,
    fail_next: Option<String>,
    fail_export: Option<String>,
}

/// In-process task store.
///
/// Clones share the same task list, so a caller can keep a handle for
/// inspection after boxing another clone into the app.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<Inner>>,
}

fn timestamp() -> String {
    Utc::now().format("%Y%m%dT%H%M%SZ").to_string()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tasks(tasks: Vec<Task>) -> Self {
        let store = Self::default();
        store.inner.borrow_mut().tasks = tasks;
        store
    }

    /// Every task, including non-pending ones
    pub fn snapshot(&self) -> Vec<Task> {
        self.inner.borrow().tasks.clone()
    }

    pub fn task(&self, id: u32) -> Option<Task> {
        self.inner.borrow().tasks.iter().find(|t| t.id == id).cloned()
    }

    pub fn calls(&self) -> Vec<StoreCall> {
        self.inner.borrow().calls.clone()
    }

    /// Put back a task list taken with [`MemoryStore::snapshot`]
    pub fn restore(&self, tasks: Vec<Task>) {
        self.inner.borrow_mut().tasks = tasks;
    }

    /// Make the next mutation fail with `message`
    pub fn fail_next(&self, message: impl Into<String>) {
        self.inner.borrow_mut().fail_next = Some(message.into());
    }

    /// Make the next export fail with `message`
    pub fn fail_next_export(&self, message: impl Into<String>) {
        self.inner.borrow_mut().fail_export = Some(message.into());
    }

    fn mutate(
        &self,
        call: StoreCall,
        id: u32,
        f: impl FnOnce(&mut Task) -> Result<(), StoreError>,
    ) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(call);
        if let Some(msg) = inner.fail_next.take() {
            return Err(StoreError::Rejected(msg));
        }
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(StoreError::NotFound(id))?;
        f(task)
    }
}

impl TaskStore for MemoryStore {
    fn export(&self, filters: &[String]) -> Result<Vec<Task>, StoreError> {
        if let Some(msg) = self.inner.borrow_mut().fail_export.take() {
            return Err(StoreError::Rejected(msg));
        }
        Ok(self
            .inner
            .borrow()
            .tasks
            .iter()
            .filter(|t| matches_filters(t, filters))
            .cloned()
            .collect())
    }

    fn annotate(&mut self, id: u32, text: &str) -> Result<(), StoreError> {
        self.mutate(StoreCall::Annotate(id, text.into()), id, |t| {
            t.annotations.push(Annotation {
                entry: timestamp(),
                description: text.to_string(),
            });
            Ok(())
        })
    }

    fn replace_annotations(&mut self, id: u32, text: &str) -> Result<(), StoreError> {
        self.mutate(StoreCall::ReplaceAnnotations(id, text.into()), id, |t| {
            t.annotations.clear();
            if !text.trim().is_empty() {
                t.annotations.push(Annotation {
                    entry: timestamp(),
                    description: text.to_string(),
                });
            }
            Ok(())
        })
    }

    fn set_description(&mut self, id: u32, text: &str) -> Result<(), StoreError> {
        self.mutate(StoreCall::SetDescription(id, text.into()), id, |t| {
            t.description = text.to_string();
            Ok(())
        })
    }

    fn add_tags(&mut self, id: u32, tags: &[String]) -> Result<(), StoreError> {
        self.mutate(StoreCall::AddTags(id, tags.to_vec()), id, |t| {
            for tag in tags {
                if !t.has_tag(tag) {
                    t.tags.push(tag.clone());
                }
            }
            Ok(())
        })
    }

    fn remove_tags(&mut self, id: u32, tags: &[String]) -> Result<(), StoreError> {
        self.mutate(StoreCall::RemoveTags(id, tags.to_vec()), id, |t| {
            t.tags.retain(|tag| !tags.contains(tag));
            Ok(())
        })
    }

    fn set_due_date(&mut self, id: u32, date: &str) -> Result<(), StoreError> {
        self.mutate(StoreCall::SetDueDate(id, date.into()), id, |t| {
            if date.is_empty() {
                t.due.clear();
                return Ok(());
            }
            let parsed = parse_task_date(date)
                .ok_or_else(|| StoreError::Rejected(format!("unrecognized date: {}", date)))?;
            t.due = format_iso_date(parsed);
            Ok(())
        })
    }

    fn set_recurrence(&mut self, id: u32, spec: &str) -> Result<(), StoreError> {
        self.mutate(StoreCall::SetRecurrence(id, spec.into()), id, |t| {
            if !spec.is_empty() && t.due.is_empty() {
                return Err(StoreError::Rejected(
                    "recurring task needs a due date".into(),
                ));
            }
            t.recur = spec.to_string();
            Ok(())
        })
    }

    fn set_project(&mut self, id: u32, project: &str) -> Result<(), StoreError> {
        self.mutate(StoreCall::SetProject(id, project.into()), id, |t| {
            t.project = project.to_string();
            Ok(())
        })
    }

    fn set_priority(&mut self, id: u32, priority: &str) -> Result<(), StoreError> {
        self.mutate(StoreCall::SetPriority(id, priority.into()), id, |t| {
            t.priority = priority.to_string();
            Ok(())
        })
    }

    fn add_line(&mut self, line: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.borrow_mut();
        inner.calls.push(StoreCall::AddLine(line.into()));
        if let Some(msg) = inner.fail_next.take() {
            return Err(StoreError::Rejected(msg));
        }
        let parsed = parse_add_line(line).map_err(|e| StoreError::Rejected(e.to_string()))?;
        let id = inner.tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        let mut task = Task::new(id, uuid::Uuid::new_v4().to_string(), parsed.description);
        task.project = parsed.project;
        task.priority = parsed.priority;
        task.tags = parsed.tags;
        task.due = parsed.due;
        task.recur = parsed.recur;
        task.entry = timestamp();
        tracing::debug!(id, uuid = %task.uuid, "task added");
        inner.tasks.push(task);
        Ok(())
    }
}
