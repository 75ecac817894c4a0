//! Tree of tasks and namespaces, registered in one walk.

use std::sync::Arc;

use crate::error::Result;
use crate::runner::{Scope, TaskRunner};
use crate::task::Task;

/// A namespace holding tasks and nested namespaces.
///
/// An unnamed group registers its tasks in the enclosing scope.
#[derive(Debug, Default)]
pub struct TaskGroup {
    name: Option<String>,
    tasks: Vec<Arc<dyn Task>>,
    groups: Vec<TaskGroup>,
}

impl TaskGroup {
    /// An unnamed group.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// A group named `name`; `None` or an empty name behaves like
    /// [`TaskGroup::root`].
    #[must_use]
    pub fn new(name: Option<&str>) -> Self {
        Self {
            name: name.filter(|n| !n.is_empty()).map(str::to_string),
            ..Self::default()
        }
    }

    /// A group with the given namespace name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Namespace name, if any.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Add a task.
    #[must_use]
    pub fn with_task(mut self, task: impl Task + 'static) -> Self {
        self.tasks.push(Arc::new(task));
        self
    }

    /// Add a nested group.
    #[must_use]
    pub fn with_group(mut self, group: Self) -> Self {
        self.groups.push(group);
        self
    }

    /// Add a nested group in place.
    pub fn add_group(&mut self, group: Self) {
        self.groups.push(group);
    }

    /// Register this group's tasks, then its children's, below `parent`.
    ///
    /// # Errors
    ///
    /// Returns the first registration error.
    pub fn register_on(&self, runner: &mut TaskRunner, parent: &Scope) -> Result<()> {
        let scope = match &self.name {
            Some(name) => parent.child(name),
            None => parent.clone(),
        };

        for task in &self.tasks {
            runner.register(&scope, task.clone())?;
        }
        for group in &self.groups {
            group.register_on(runner, &scope)?;
        }
        Ok(())
    }
}
