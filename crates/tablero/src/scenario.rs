//! End-to-end workspace scenario: a strictly linear five-phase state
//! machine driven against the workflow-step libraries.
//!
//! Phases run in declared order. A failing phase aborts the remaining
//! phases (no retries, no branching at this layer), but teardown still
//! attempts to run. Teardown is two independent assertion points, stop
//! and remove, so a partial teardown failure stays attributable.

use crate::driver::DashboardDriver;
use crate::result::TableroResult;
use crate::steps::{CodeExecutionHelper, ProjectManager, WorkspaceHandler};
use crate::workspace_name;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{info, warn};

/// Budget for the dependency-install task (60 seconds)
pub const INSTALL_TASK_TIMEOUT_MS: u64 = 60_000;

/// Budget for the migration task (30 seconds)
pub const MIGRATE_TASK_TIMEOUT_MS: u64 = 30_000;

/// Budget for the serve task (30 seconds)
pub const SERVE_TASK_TIMEOUT_MS: u64 = 30_000;

/// A phase of the workspace scenario
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Create and open the workspace, wait for project readiness
    Provision,
    /// Run the dependency-install task and close its terminal
    InstallDependencies,
    /// Run the migration task and close its terminal
    Migrate,
    /// Run the dev-server task, acknowledging its shell dialog
    Serve,
}

impl Phase {
    /// Declared execution order
    pub const ALL: [Self; 4] = [
        Self::Provision,
        Self::InstallDependencies,
        Self::Migrate,
        Self::Serve,
    ];

    /// Phase name for logs and reports
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Provision => "provision",
            Self::InstallDependencies => "install-dependencies",
            Self::Migrate => "migrate",
            Self::Serve => "serve",
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Outcome of one phase or teardown step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepOutcome {
    /// The step completed
    Passed,
    /// The step failed with the given error message
    Failed(String),
    /// The step did not run because an earlier phase failed
    Skipped,
}

impl StepOutcome {
    /// Whether the step completed
    #[must_use]
    pub const fn is_passed(&self) -> bool {
        matches!(self, Self::Passed)
    }

    fn from_result(result: TableroResult<()>) -> Self {
        match result {
            Ok(()) => Self::Passed,
            Err(err) => Self::Failed(err.to_string()),
        }
    }
}

/// Outcome of a single phase
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PhaseOutcome {
    /// The phase
    pub phase: Phase,
    /// Its outcome
    pub outcome: StepOutcome,
}

/// Teardown outcomes: stop and remove are independent assertion points
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeardownReport {
    /// Workspace name resolved from the browser URL, if resolution worked
    pub workspace_name: Option<String>,
    /// Outcome of stopping the workspace
    pub stop: StepOutcome,
    /// Outcome of removing the workspace
    pub remove: StepOutcome,
}

/// Full scenario report, serializable for CI artifacts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioReport {
    /// Stack the scenario ran against
    pub stack: String,
    /// Per-phase outcomes, in declared order
    pub phases: Vec<PhaseOutcome>,
    /// Teardown outcomes
    pub teardown: TeardownReport,
}

impl ScenarioReport {
    /// Whether every phase and both teardown steps passed
    #[must_use]
    pub fn passed(&self) -> bool {
        self.phases.iter().all(|p| p.outcome.is_passed())
            && self.teardown.stop.is_passed()
            && self.teardown.remove.is_passed()
    }

    /// Outcome of the given phase, if it was scheduled
    #[must_use]
    pub fn phase(&self, phase: Phase) -> Option<&StepOutcome> {
        self.phases
            .iter()
            .find(|p| p.phase == phase)
            .map(|p| &p.outcome)
    }
}

/// Configuration of one stack scenario
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackScenario {
    /// Stack template the workspace is created from
    pub stack: String,
    /// Sample project expected after provisioning
    pub sample_name: String,
    /// Project root folder expected after provisioning
    pub root_folder: String,
    /// Name of the dependency-install task
    pub install_task: String,
    /// Name of the migration task
    pub migrate_task: String,
    /// Name of the dev-server task
    pub serve_task: String,
    /// Dialog text the dev server presents before it is considered up
    pub serve_dialog_text: String,
    /// URL subpath used by the dialog workaround
    pub serve_url_subpath: String,
    /// Budget for the install task, milliseconds
    pub install_timeout_ms: u64,
    /// Budget for the migration task, milliseconds
    pub migrate_timeout_ms: u64,
    /// Budget for the serve task, milliseconds
    pub serve_timeout_ms: u64,
}

impl StackScenario {
    /// The Python Django scenario as shipped on the dashboard
    #[must_use]
    pub fn python_django() -> Self {
        Self {
            stack: "Python Django".to_string(),
            sample_name: "django-realworld-example-app".to_string(),
            root_folder: "conduit".to_string(),
            install_task: "install dependencies".to_string(),
            migrate_task: "migrate".to_string(),
            serve_task: "run server".to_string(),
            serve_dialog_text: "A process is now listening on port 7000".to_string(),
            serve_url_subpath: "/api/".to_string(),
            install_timeout_ms: INSTALL_TASK_TIMEOUT_MS,
            migrate_timeout_ms: MIGRATE_TASK_TIMEOUT_MS,
            serve_timeout_ms: SERVE_TASK_TIMEOUT_MS,
        }
    }

    /// Run the scenario: phases strictly in order, teardown always
    /// attempted.
    pub async fn run<W, P, C, D>(
        &self,
        workspaces: &W,
        projects: &P,
        tasks: &C,
        driver: &D,
    ) -> ScenarioReport
    where
        W: WorkspaceHandler,
        P: ProjectManager,
        C: CodeExecutionHelper,
        D: DashboardDriver,
    {
        let mut phases = Vec::with_capacity(Phase::ALL.len());
        let mut aborted = false;

        for phase in Phase::ALL {
            if aborted {
                phases.push(PhaseOutcome {
                    phase,
                    outcome: StepOutcome::Skipped,
                });
                continue;
            }

            info!(stack = %self.stack, %phase, "scenario phase starting");
            let result = self.run_phase(phase, workspaces, projects, tasks).await;
            if result.is_err() {
                aborted = true;
            }
            phases.push(PhaseOutcome {
                phase,
                outcome: StepOutcome::from_result(result),
            });
        }

        let teardown = self.teardown(workspaces, driver).await;

        ScenarioReport {
            stack: self.stack.clone(),
            phases,
            teardown,
        }
    }

    async fn run_phase<W, P, C>(
        &self,
        phase: Phase,
        workspaces: &W,
        projects: &P,
        tasks: &C,
    ) -> TableroResult<()>
    where
        W: WorkspaceHandler,
        P: ProjectManager,
        C: CodeExecutionHelper,
    {
        match phase {
            Phase::Provision => {
                workspaces.create_and_open_workspace(&self.stack).await?;
                projects
                    .wait_workspace_readiness(&self.sample_name, &self.root_folder)
                    .await
            }
            Phase::InstallDependencies => {
                tasks
                    .run_task(
                        &self.install_task,
                        Duration::from_millis(self.install_timeout_ms),
                    )
                    .await?;
                tasks.close_terminal(&self.install_task).await
            }
            Phase::Migrate => {
                tasks
                    .run_task(
                        &self.migrate_task,
                        Duration::from_millis(self.migrate_timeout_ms),
                    )
                    .await?;
                tasks.close_terminal(&self.migrate_task).await
            }
            Phase::Serve => {
                tasks
                    .run_task_with_dialog_shell_workaround(
                        &self.serve_task,
                        &self.serve_dialog_text,
                        &self.serve_url_subpath,
                        Duration::from_millis(self.serve_timeout_ms),
                    )
                    .await
            }
        }
    }

    async fn teardown<W, D>(&self, workspaces: &W, driver: &D) -> TeardownReport
    where
        W: WorkspaceHandler,
        D: DashboardDriver,
    {
        let resolved = match driver.current_url().await {
            Ok(url) => workspace_name::from_url(&url),
            Err(err) => Err(err),
        };

        match resolved {
            Ok(name) => {
                info!(workspace = %name, "scenario teardown starting");

                let stop = StepOutcome::from_result(workspaces.stop_workspace(&name).await);
                if let StepOutcome::Failed(ref message) = stop {
                    warn!(workspace = %name, %message, "stop workspace failed");
                }

                // Remove is attempted even when stop failed.
                let remove = StepOutcome::from_result(workspaces.remove_workspace(&name).await);
                if let StepOutcome::Failed(ref message) = remove {
                    warn!(workspace = %name, %message, "remove workspace failed");
                }

                TeardownReport {
                    workspace_name: Some(name),
                    stop,
                    remove,
                }
            }
            Err(err) => {
                let message = err.to_string();
                warn!(%message, "workspace name resolution failed; teardown not attempted");
                TeardownReport {
                    workspace_name: None,
                    stop: StepOutcome::Failed(message.clone()),
                    remove: StepOutcome::Failed(message),
                }
            }
        }
    }
}
