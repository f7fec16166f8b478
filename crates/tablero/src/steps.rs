//! Workflow-step collaborator traits.
//!
//! Scenarios compose three step libraries, each a black box of async verbs
//! keyed by string identifiers: workspace lifecycle, project readiness, and
//! in-IDE task execution. Any verb may fail with a timeout or a
//! not-found error; failure semantics belong to the implementation.
//!
//! [`RecordingSteps`] implements all three with an ordered call log and
//! scriptable failures, for exercising scenarios without a workspace.

use crate::result::{TableroError, TableroResult};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

/// Workspace lifecycle verbs
#[async_trait]
pub trait WorkspaceHandler: Send + Sync {
    /// Create a workspace from the named stack template and open it
    async fn create_and_open_workspace(&self, stack: &str) -> TableroResult<()>;

    /// Stop the named workspace
    async fn stop_workspace(&self, workspace_name: &str) -> TableroResult<()>;

    /// Remove the named workspace
    async fn remove_workspace(&self, workspace_name: &str) -> TableroResult<()>;
}

/// Project readiness verbs
#[async_trait]
pub trait ProjectManager: Send + Sync {
    /// Wait until the sample project and its root folder appear in the IDE
    async fn wait_workspace_readiness(
        &self,
        sample_name: &str,
        root_folder: &str,
    ) -> TableroResult<()>;
}

/// In-IDE task execution verbs
#[async_trait]
pub trait CodeExecutionHelper: Send + Sync {
    /// Run the named task and wait for completion within `timeout`
    async fn run_task(&self, task: &str, timeout: Duration) -> TableroResult<()>;

    /// Close the terminal opened for the named task
    async fn close_terminal(&self, task: &str) -> TableroResult<()>;

    /// Run a task whose dev server presents an interactive shell dialog:
    /// wait for `dialog_text`, acknowledge the prompt, and continue via the
    /// caller-supplied `url_subpath`.
    ///
    /// Kept as a distinct verb rather than folded into [`Self::run_task`];
    /// whether the acknowledgement is framework-specific is undocumented
    /// upstream.
    async fn run_task_with_dialog_shell_workaround(
        &self,
        task: &str,
        dialog_text: &str,
        url_subpath: &str,
        timeout: Duration,
    ) -> TableroResult<()>;
}

#[derive(Debug, Default)]
struct StepsState {
    calls: Vec<String>,
    failing: HashSet<String>,
}

/// Step-library double recording every verb invocation in order.
///
/// Calls are logged as `verb:arg1:arg2` strings, timeouts in milliseconds.
/// A verb scripted via [`RecordingSteps::fail_on`] rejects with
/// [`TableroError::Timeout`] instead of succeeding.
#[derive(Debug, Clone, Default)]
pub struct RecordingSteps {
    state: Arc<Mutex<StepsState>>,
}

impl RecordingSteps {
    /// Create a double where every verb succeeds
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the verb with the given log label to fail
    pub async fn fail_on(&self, label: impl Into<String>) {
        let mut state = self.state.lock().await;
        let _ = state.failing.insert(label.into());
    }

    /// Snapshot of every recorded call, in order
    pub async fn calls(&self) -> Vec<String> {
        self.state.lock().await.calls.clone()
    }

    async fn record(&self, label: String) -> TableroResult<()> {
        let mut state = self.state.lock().await;
        state.calls.push(label.clone());
        if state.failing.contains(&label) {
            return Err(TableroError::Timeout { ms: 0 });
        }
        Ok(())
    }
}

#[async_trait]
impl WorkspaceHandler for RecordingSteps {
    async fn create_and_open_workspace(&self, stack: &str) -> TableroResult<()> {
        self.record(format!("create_and_open_workspace:{stack}")).await
    }

    async fn stop_workspace(&self, workspace_name: &str) -> TableroResult<()> {
        self.record(format!("stop_workspace:{workspace_name}")).await
    }

    async fn remove_workspace(&self, workspace_name: &str) -> TableroResult<()> {
        self.record(format!("remove_workspace:{workspace_name}")).await
    }
}

#[async_trait]
impl ProjectManager for RecordingSteps {
    async fn wait_workspace_readiness(
        &self,
        sample_name: &str,
        root_folder: &str,
    ) -> TableroResult<()> {
        self.record(format!("wait_workspace_readiness:{sample_name}:{root_folder}"))
            .await
    }
}

#[async_trait]
impl CodeExecutionHelper for RecordingSteps {
    async fn run_task(&self, task: &str, timeout: Duration) -> TableroResult<()> {
        self.record(format!("run_task:{task}:{}", timeout.as_millis()))
            .await
    }

    async fn close_terminal(&self, task: &str) -> TableroResult<()> {
        self.record(format!("close_terminal:{task}")).await
    }

    async fn run_task_with_dialog_shell_workaround(
        &self,
        task: &str,
        dialog_text: &str,
        url_subpath: &str,
        timeout: Duration,
    ) -> TableroResult<()> {
        self.record(format!(
            "run_task_with_dialog_shell_workaround:{task}:{dialog_text}:{url_subpath}:{}",
            timeout.as_millis()
        ))
        .await
    }
}
