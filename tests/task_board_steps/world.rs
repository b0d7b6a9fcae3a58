//! Shared world state for task board BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskmaster::fault::FaultKind;
use taskmaster::identity::{
    adapters::{
        memory::{InMemoryCredentialService, InMemoryOwnerRepository},
        notifier::TracingWelcomeNotifier,
    },
    domain::Principal,
    services::AccountService,
};
use taskmaster::workspace::{
    adapters::memory::InMemoryHierarchyRepository,
    domain::{BoardView, LaneId, Task},
    services::{BoardService, TaskService},
};

/// Account service type used by the BDD world.
pub type TestAccounts = AccountService<
    InMemoryOwnerRepository,
    InMemoryCredentialService<DefaultClock>,
    TracingWelcomeNotifier,
    DefaultClock,
>;

/// Scenario world for task board behaviour tests.
pub struct TaskBoardWorld {
    pub accounts: TestAccounts,
    pub boards: BoardService<InMemoryHierarchyRepository, DefaultClock>,
    pub tasks: TaskService<InMemoryHierarchyRepository, DefaultClock>,
    pub principals: HashMap<String, Principal>,
    pub board: Option<BoardView>,
    pub task: Option<Task>,
    pub last_failure: Option<FaultKind>,
}

impl TaskBoardWorld {
    /// Creates a world backed by fresh in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let clock = Arc::new(DefaultClock);
        let hierarchy = Arc::new(InMemoryHierarchyRepository::new());
        let accounts = AccountService::new(
            Arc::new(InMemoryOwnerRepository::new()),
            Arc::new(InMemoryCredentialService::new(Arc::clone(&clock))),
            Arc::new(TracingWelcomeNotifier::new(
                "TaskMaster",
                "noreply@taskmaster.com",
            )),
            Arc::clone(&clock),
        );

        Self {
            accounts,
            boards: BoardService::new(Arc::clone(&hierarchy), Arc::clone(&clock)),
            tasks: TaskService::new(hierarchy, clock),
            principals: HashMap::new(),
            board: None,
            task: None,
            last_failure: None,
        }
    }

    /// Returns the principal registered under `email`.
    ///
    /// # Errors
    ///
    /// Returns an error if no owner with that email was registered.
    pub fn principal(&self, email: &str) -> Result<Principal, eyre::Report> {
        self.principals
            .get(email)
            .cloned()
            .ok_or_else(|| eyre::eyre!("no registered owner {email} in scenario world"))
    }

    /// Returns the board created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no board has been created.
    pub fn board(&self) -> Result<&BoardView, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Returns the task created earlier in the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error if no task has been created.
    pub fn task(&self) -> Result<&Task, eyre::Report> {
        self.task
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing task in scenario world"))
    }

    /// Returns the id of the board's lane with the given title.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has no such lane.
    pub fn lane(&self, title: &str) -> Result<LaneId, eyre::Report> {
        self.board()?
            .lanes()
            .find(|lane| lane.title().as_str() == title)
            .map(|lane| lane.id())
            .ok_or_else(|| eyre::eyre!("board has no lane titled {title}"))
    }
}

impl Default for TaskBoardWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskBoardWorld {
    TaskBoardWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
