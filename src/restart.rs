//! Stop-then-start orchestration for the project's dev server.

use tracing::{error, info};

use crate::command::{CommandError, Invoker};
use crate::config::Config;

/// Phase of one restart call. State exists only for the duration of the call
/// (nothing is persisted across requests) and only moves forward: once
/// `Started` or `Failed` is reached the machine is done.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RestartState {
    Idle,
    Stopping,
    Started,
    Failed,
}

impl RestartState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Started | Self::Failed)
    }
}

/// Drives one restart: a synchronous stop goal, then a detached start goal,
/// both run by the build tool inside the project directory.
///
/// Every call deterministically ends in `Started` or `Failed`. `Started`
/// certifies only that the new server process was launched — it says nothing
/// about readiness. On failure only the most recent error text is surfaced;
/// which phase failed is visible in the logs, not in the reported message.
///
/// Concurrent restarts are not serialized — state lives in this value, not in
/// shared storage — so callers are responsible for not overlapping calls.
pub struct RestartOrchestrator<'a, I: Invoker + ?Sized> {
    invoker: &'a I,
    config: &'a Config,
    state: RestartState,
}

impl<'a, I: Invoker + ?Sized> RestartOrchestrator<'a, I> {
    pub fn new(invoker: &'a I, config: &'a Config) -> Self {
        Self {
            invoker,
            config,
            state: RestartState::Idle,
        }
    }

    pub fn state(&self) -> RestartState {
        self.state
    }

    fn advance(&mut self, next: RestartState) {
        debug_assert!(
            !self.state.is_terminal(),
            "restart state only moves forward"
        );
        self.state = next;
    }

    /// Run the state machine to a terminal state.
    pub async fn run(&mut self) -> Result<(), CommandError> {
        let dir = Some(self.config.project_path());

        self.advance(RestartState::Stopping);
        let stop_args = vec![self.config.stop_goal.clone()];
        if let Err(e) = self.invoker.run(&self.config.build_bin, &stop_args, dir).await {
            error!(error = %e, "stop command failed");
            self.advance(RestartState::Failed);
            return Err(e);
        }
        info!("stop succeeded, launching dev server");

        let mut start_args = vec![self.config.start_goal.clone()];
        if let Some(profile) = self.config.build_profile() {
            start_args.push(format!("-P{profile}"));
        }
        match self
            .invoker
            .spawn_detached(&self.config.build_bin, &start_args, dir)
            .await
        {
            Ok(()) => {
                info!("dev server launched");
                self.advance(RestartState::Started);
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "start launch failed");
                self.advance(RestartState::Failed);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandResult;
    use async_trait::async_trait;
    use serde_json::json;
    use std::path::Path;
    use std::sync::Mutex;

    /// Records every invocation; failures are configured per phase.
    struct FakeInvoker {
        fail_run: bool,
        fail_spawn: bool,
        calls: Mutex<Vec<String>>,
    }

    impl FakeInvoker {
        fn new(fail_run: bool, fail_spawn: bool) -> Self {
            Self {
                fail_run,
                fail_spawn,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Invoker for FakeInvoker {
        async fn run(&self, bin: &str, args: &[String], _dir: Option<&Path>) -> CommandResult {
            self.calls
                .lock()
                .unwrap()
                .push(format!("run {bin} {}", args.join(" ")));
            if self.fail_run {
                Err(CommandError::Failed("stop blew up".to_string()))
            } else {
                Ok(String::new())
            }
        }

        async fn spawn_detached(
            &self,
            bin: &str,
            args: &[String],
            _dir: Option<&Path>,
        ) -> Result<(), CommandError> {
            self.calls
                .lock()
                .unwrap()
                .push(format!("spawn {bin} {}", args.join(" ")));
            if self.fail_spawn {
                Err(CommandError::Failed("launch blew up".to_string()))
            } else {
                Ok(())
            }
        }
    }

    fn config(profile: Option<&str>) -> Config {
        serde_json::from_value(json!({
            "port": 8030,
            "project_dir": "/srv/acme",
            "profile": profile,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn stop_failure_ends_failed_without_starting() {
        let invoker = FakeInvoker::new(true, false);
        let cfg = config(None);
        let mut orch = RestartOrchestrator::new(&invoker, &cfg);

        let err = orch.run().await.unwrap_err();
        assert_eq!(orch.state(), RestartState::Failed);
        assert_eq!(err.to_string(), "stop blew up");
        assert_eq!(invoker.calls(), vec!["run mvn jetty:stop"]);
    }

    #[tokio::test]
    async fn stop_then_launch_ends_started() {
        let invoker = FakeInvoker::new(false, false);
        let cfg = config(None);
        let mut orch = RestartOrchestrator::new(&invoker, &cfg);

        orch.run().await.unwrap();
        assert_eq!(orch.state(), RestartState::Started);
        assert_eq!(
            invoker.calls(),
            vec!["run mvn jetty:stop", "spawn mvn jetty:run"]
        );
    }

    #[tokio::test]
    async fn configured_profile_qualifies_the_start_goal() {
        let invoker = FakeInvoker::new(false, false);
        let cfg = config(Some("dev"));
        let mut orch = RestartOrchestrator::new(&invoker, &cfg);

        orch.run().await.unwrap();
        assert_eq!(
            invoker.calls(),
            vec!["run mvn jetty:stop", "spawn mvn jetty:run -Pdev"]
        );
    }

    #[tokio::test]
    async fn launch_failure_after_clean_stop_ends_failed() {
        let invoker = FakeInvoker::new(false, true);
        let cfg = config(None);
        let mut orch = RestartOrchestrator::new(&invoker, &cfg);

        let err = orch.run().await.unwrap_err();
        assert_eq!(orch.state(), RestartState::Failed);
        // Only the most recent error is reported — the phase is not named.
        assert_eq!(err.to_string(), "launch blew up");
    }

    #[tokio::test]
    async fn fresh_orchestrator_starts_idle() {
        let invoker = FakeInvoker::new(false, false);
        let cfg = config(None);
        let orch = RestartOrchestrator::new(&invoker, &cfg);
        assert_eq!(orch.state(), RestartState::Idle);
        assert!(!orch.state().is_terminal());
    }

    // Overlapping restarts are a known race, not a bug to assert away: state
    // is per-call, nothing serializes two simultaneous Idle → Stopping
    // transitions. This test documents that both calls simply run to a
    // terminal state independently.
    #[tokio::test]
    async fn concurrent_restarts_race_documented() {
        let invoker = FakeInvoker::new(false, false);
        let cfg = config(None);
        let mut a = RestartOrchestrator::new(&invoker, &cfg);
        let mut b = RestartOrchestrator::new(&invoker, &cfg);

        let (ra, rb) = tokio::join!(a.run(), b.run());
        ra.unwrap();
        rb.unwrap();
        assert!(a.state().is_terminal());
        assert!(b.state().is_terminal());
        // Four invocations total — the stop/start pairs may interleave.
        assert_eq!(invoker.calls().len(), 4);
    }
}
