//! Task runner: registers namespaced tasks and invokes them by name.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use circleci_core::{Client, HttpTransport, ProjectReference, ReqwestTransport};
use tracing::{debug, info, instrument};

use crate::error::{Result, TaskError};
use crate::group::TaskGroup;
use crate::task::Task;

/// Separator between namespace segments in fully-qualified task names.
pub const SEPARATOR: char = ':';

/// A namespace path, outermost segment first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Scope {
    segments: Vec<String>,
}

impl Scope {
    /// The top-level scope.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Scope nested one (or more, for `a:b`) namespaces below this one.
    ///
    /// Empty names leave the scope unchanged.
    #[must_use]
    pub fn child(&self, namespace: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(
            namespace
                .split(SEPARATOR)
                .filter(|segment| !segment.is_empty())
                .map(str::to_string),
        );
        Self { segments }
    }

    /// Whether this is the top-level scope.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Fully-qualified name of `name` within this scope.
    #[must_use]
    pub fn qualify(&self, name: &str) -> String {
        if self.is_root() {
            return name.to_string();
        }
        format!("{self}{SEPARATOR}{name}")
    }

    /// Candidate qualified names for `name`, innermost scope first.
    fn candidates(&self, name: &str) -> Vec<String> {
        (0..=self.segments.len())
            .rev()
            .map(|depth| Self {
                segments: self.segments[..depth].to_vec(),
            })
            .map(|scope| scope.qualify(name))
            .collect()
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join(":"))
    }
}

/// A task together with the scope it was registered in.
#[derive(Debug, Clone)]
pub struct RegisteredTask {
    /// Fully-qualified name, e.g. `circle_ci:env_vars:provision`.
    pub full_name: String,
    /// Namespace the task lives in.
    pub scope: Scope,
    /// The task itself.
    pub task: Arc<dyn Task>,
}

/// Name and description of a registered task, for listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListing {
    /// Fully-qualified name.
    pub name: String,
    /// One-line description.
    pub description: String,
}

/// Registry of tasks plus the transport their API clients share.
///
/// # Examples
///
/// ```no_run
/// use circleci_tasks::TaskRunner;
/// use circleci_tasks::task_sets::EnvironmentVariables;
///
/// #[tokio::main]
/// async fn main() -> Result<(), circleci_tasks::TaskError> {
///     let mut runner = TaskRunner::new()?;
///     EnvironmentVariables::new("github/org/repo", "token")
///         .with_namespace("env_vars")
///         .with_environment_variable("THING_ONE", "value-one")
///         .define_on(&mut runner)?;
///
///     runner.invoke("env_vars:ensure", &[]).await
/// }
/// ```
#[derive(Debug)]
pub struct TaskRunner {
    transport: Arc<dyn HttpTransport>,
    tasks: Vec<RegisteredTask>,
    index: HashMap<String, usize>,
}

impl TaskRunner {
    /// Create a runner whose tasks talk to the API over `reqwest`.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be created.
    pub fn new() -> Result<Self> {
        Ok(Self::with_transport(Arc::new(ReqwestTransport::new()?)))
    }

    /// Create a runner over an existing transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            transport,
            tasks: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a single task in `scope`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::DuplicateTask`] if the qualified name is taken.
    pub fn register(&mut self, scope: &Scope, task: Arc<dyn Task>) -> Result<()> {
        let full_name = scope.qualify(task.name());
        if self.index.contains_key(&full_name) {
            return Err(TaskError::DuplicateTask(full_name));
        }

        debug!("Registered task: {}", full_name);
        self.index.insert(full_name.clone(), self.tasks.len());
        self.tasks.push(RegisteredTask {
            full_name,
            scope: scope.clone(),
            task,
        });
        Ok(())
    }

    /// Register every task in `group` and its descendants.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::DuplicateTask`] on the first name clash.
    pub fn define(&mut self, group: &TaskGroup) -> Result<()> {
        group.register_on(self, &Scope::root())
    }

    /// Find `name` as seen from `scope`, innermost namespace first.
    #[must_use]
    pub fn lookup(&self, name: &str, scope: &Scope) -> Option<&RegisteredTask> {
        scope
            .candidates(name)
            .iter()
            .find_map(|candidate| self.index.get(candidate))
            .map(|&position| &self.tasks[position])
    }

    /// Whether a task with this fully-qualified name exists.
    #[must_use]
    pub fn has_task(&self, full_name: &str) -> bool {
        self.index.contains_key(full_name)
    }

    /// Fully-qualified task names in registration order.
    #[must_use]
    pub fn task_names(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.full_name.clone()).collect()
    }

    /// Names and descriptions in registration order.
    #[must_use]
    pub fn list(&self) -> Vec<TaskListing> {
        self.tasks
            .iter()
            .map(|t| TaskListing {
                name: t.full_name.clone(),
                description: t.task.description(),
            })
            .collect()
    }

    /// Invoke a task by fully-qualified name.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] for unknown names, otherwise
    /// whatever the task fails with.
    pub async fn invoke(&self, name: &str, args: &[String]) -> Result<()> {
        self.invoke_in_scope(name, &Scope::root(), args).await
    }

    /// Invoke `name` as seen from `scope`, forwarding `args`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::TaskNotFound`] if no candidate name matches,
    /// otherwise whatever the task fails with.
    #[instrument(skip(self, scope, args), fields(scope = %scope))]
    pub async fn invoke_in_scope(&self, name: &str, scope: &Scope, args: &[String]) -> Result<()> {
        let entry = self
            .lookup(name, scope)
            .ok_or_else(|| TaskError::TaskNotFound(scope.qualify(name)))?;

        info!(task = %entry.full_name, "Invoking task");
        entry.task.execute(self, &entry.scope, args).await
    }

    /// API client for `project` over this runner's transport.
    #[must_use]
    pub fn client(&self, project: ProjectReference) -> Client {
        Client::with_transport(project, self.transport.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use circleci_core::testing::StubTransport;

    #[derive(Debug)]
    struct Noop(&'static str);

    #[async_trait]
    impl Task for Noop {
        fn name(&self) -> &str {
            self.0
        }

        fn description(&self) -> String {
            format!("Does nothing as {}", self.0)
        }

        async fn execute(&self, _: &TaskRunner, _: &Scope, _: &[String]) -> Result<()> {
            Ok(())
        }
    }

    fn runner() -> TaskRunner {
        TaskRunner::with_transport(Arc::new(StubTransport::new()))
    }

    #[test]
    fn test_scope_qualify() {
        assert_eq!(Scope::root().qualify("provision"), "provision");
        assert_eq!(
            Scope::root().child("circle_ci").child("env_vars").qualify("provision"),
            "circle_ci:env_vars:provision"
        );
        assert_eq!(Scope::root().child("a:b").qualify("c"), "a:b:c");
        assert_eq!(Scope::root().child("").qualify("c"), "c");
    }

    #[test]
    fn test_scope_candidates_innermost_first() {
        let scope = Scope::root().child("a").child("b");
        assert_eq!(scope.candidates("t"), vec!["a:b:t", "a:t", "t"]);
    }

    #[test]
    fn test_register_and_lookup() {
        let mut runner = runner();
        let scope = Scope::root().child("ns");
        runner.register(&scope, Arc::new(Noop("first"))).unwrap();

        assert!(runner.has_task("ns:first"));
        assert!(runner.lookup("first", &scope).is_some());
        assert!(runner.lookup("first", &Scope::root()).is_none());
        assert!(runner.lookup("ns:first", &Scope::root()).is_some());
    }

    #[test]
    fn test_lookup_falls_back_to_outer_scope() {
        let mut runner = runner();
        runner.register(&Scope::root(), Arc::new(Noop("outer"))).unwrap();

        let inner = Scope::root().child("a").child("b");
        let found = runner.lookup("outer", &inner).unwrap();
        assert_eq!(found.full_name, "outer");
    }

    #[test]
    fn test_duplicate_registration() {
        let mut runner = runner();
        runner.register(&Scope::root(), Arc::new(Noop("same"))).unwrap();
        let result = runner.register(&Scope::root(), Arc::new(Noop("same")));
        assert!(matches!(result, Err(TaskError::DuplicateTask(name)) if name == "same"));
    }

    #[test]
    fn test_list_in_registration_order() {
        let mut runner = runner();
        runner.register(&Scope::root(), Arc::new(Noop("b"))).unwrap();
        runner.register(&Scope::root(), Arc::new(Noop("a"))).unwrap();

        let listing = runner.list();
        assert_eq!(listing[0].name, "b");
        assert_eq!(listing[0].description, "Does nothing as b");
        assert_eq!(runner.task_names(), vec!["b", "a"]);
    }

    #[tokio::test]
    async fn test_invoke_unknown_task() {
        let result = runner().invoke("missing", &[]).await;
        assert!(matches!(result, Err(TaskError::TaskNotFound(name)) if name == "missing"));
    }
}
