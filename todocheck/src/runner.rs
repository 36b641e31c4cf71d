use crate::config::RunnerConfiguration;
use crate::data::ObservedResponse;
use crate::error::Error;
use crate::executor::{RequestExecutor, RunContext};
use crate::http_client::{HttpClient, HyperHttpClient};
use crate::scenario::{CaptureSource, Scenario};
use crate::session::SessionManager;
use crate::validator::validate;
use serde_json::Value;
use std::collections::HashSet;
use std::fmt::Display;
use std::sync::Arc;

/// Orchestrator lifecycle. No rollback transitions: scenarios mutate shared
/// remote state, so the run only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    SessionReady,
    Running(usize),
    Done,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Passed,
    Failed { diffs: Vec<String> },
    Errored { error: String },
    Skipped { reason: String },
}

#[derive(Debug, Clone)]
pub struct ScenarioOutcome {
    pub name: String,
    pub outcome: Outcome,
    pub response: Option<ObservedResponse>,
}

/// Per-scenario results for a whole run. `aborted` is set when a transport
/// failure or a configuration defect cut the run short.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    pub outcomes: Vec<ScenarioOutcome>,
    pub aborted: bool,
}

impl RunReport {
    pub fn success(&self) -> bool {
        !self.aborted
            && self
                .outcomes
                .iter()
                .all(|o| matches!(o.outcome, Outcome::Passed))
    }

    pub fn failures(&self) -> impl Iterator<Item = &ScenarioOutcome> {
        self.outcomes
            .iter()
            .filter(|o| !matches!(o.outcome, Outcome::Passed))
    }
}

impl Display for RunReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for scenario in &self.outcomes {
            match &scenario.outcome {
                Outcome::Passed => writeln!(f, "PASS {}", scenario.name)?,
                Outcome::Failed { diffs } => {
                    writeln!(f, "FAIL {}", scenario.name)?;
                    for diff in diffs {
                        writeln!(f, "     {}", diff)?;
                    }
                }
                Outcome::Errored { error } => writeln!(f, "ERR  {}: {}", scenario.name, error)?,
                Outcome::Skipped { reason } => writeln!(f, "SKIP {}: {}", scenario.name, reason)?,
            }
        }
        Ok(())
    }
}

/// Sequences declared scenarios against the service: acquire a session,
/// execute in declaration order, validate each response, propagate captures,
/// and skip anything downstream of a failure. Strictly sequential, since the
/// remote todo collection is shared mutable state keyed by the session.
#[derive(Debug)]
pub struct ContractRunner {
    config: RunnerConfiguration,
    client: Arc<dyn HttpClient + Send + Sync>,
    scenarios: Vec<Scenario>,
    state: RunState,
}

impl ContractRunner {
    pub fn new(config: RunnerConfiguration) -> Self {
        let client = Arc::new(HyperHttpClient::new(config.timeout()));
        Self::with_client(config, client)
    }

    pub fn with_client(
        config: RunnerConfiguration,
        client: Arc<dyn HttpClient + Send + Sync>,
    ) -> Self {
        Self {
            config,
            client,
            scenarios: Vec::new(),
            state: RunState::Init,
        }
    }

    pub fn add_scenario(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }

    pub fn add_scenarios<I: IntoIterator<Item = Scenario>>(&mut self, scenarios: I) {
        self.scenarios.extend(scenarios);
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Every dependency must name a distinct, earlier scenario. Checked
    /// before any request goes out.
    fn check_declarations(&self) -> Result<(), Error> {
        let mut seen: HashSet<&str> = HashSet::new();
        for scenario in &self.scenarios {
            for dependency in scenario.dependencies() {
                if !seen.contains(dependency.as_str()) {
                    return Err(Error::UnknownDependency {
                        scenario: String::from(scenario.name()),
                        depends_on: dependency.clone(),
                    });
                }
            }
            if !seen.insert(scenario.name()) {
                return Err(Error::Config(format!(
                    "duplicate scenario name '{}'",
                    scenario.name()
                )));
            }
        }
        Ok(())
    }

    pub async fn run(mut self) -> Result<RunReport, Error> {
        self.check_declarations()?;

        let session_manager = SessionManager::new(self.client.clone(), self.config.base_url());
        let mut session = session_manager.acquire().await?;
        tracing::info!(token = session.token(), "session acquired");

        if let Some(credentials) = self.config.credentials() {
            let token = session_manager
                .acquire_secondary_token(&session, credentials)
                .await?;
            session.set_auth_token(token);
        }
        self.state = RunState::SessionReady;

        let executor = RequestExecutor::new(self.client.clone(), self.config.base_url());
        let mut context = RunContext::new(session);
        let mut report = RunReport::default();
        let mut unusable: HashSet<String> = HashSet::new();
        let scenarios = std::mem::take(&mut self.scenarios);

        for (index, scenario) in scenarios.iter().enumerate() {
            self.state = RunState::Running(index);

            if report.aborted {
                report.outcomes.push(ScenarioOutcome {
                    name: String::from(scenario.name()),
                    outcome: Outcome::Skipped {
                        reason: String::from("run aborted by an earlier transport failure"),
                    },
                    response: None,
                });
                continue;
            }

            if let Some(failed) = scenario
                .dependencies()
                .iter()
                .find(|d| unusable.contains(d.as_str()))
            {
                tracing::info!(scenario = scenario.name(), dependency = failed.as_str(), "skipped");
                unusable.insert(String::from(scenario.name()));
                report.outcomes.push(ScenarioOutcome {
                    name: String::from(scenario.name()),
                    outcome: Outcome::Skipped {
                        reason: format!("depends on '{}' which did not pass", failed),
                    },
                    response: None,
                });
                continue;
            }

            match executor.execute(scenario, &context).await {
                Ok(response) => {
                    let verdict = validate(scenario.expected(), &response);
                    if verdict.pass {
                        tracing::info!(scenario = scenario.name(), "passed");
                        if let Err(e) = apply_captures(scenario, &response, &mut context) {
                            // A capture that can't be satisfied is a suite
                            // defect; nothing later can be trusted.
                            report.aborted = true;
                            report.outcomes.push(ScenarioOutcome {
                                name: String::from(scenario.name()),
                                outcome: Outcome::Errored {
                                    error: e.to_string(),
                                },
                                response: Some(response),
                            });
                            continue;
                        }
                        report.outcomes.push(ScenarioOutcome {
                            name: String::from(scenario.name()),
                            outcome: Outcome::Passed,
                            response: Some(response),
                        });
                    } else {
                        tracing::warn!(
                            scenario = scenario.name(),
                            diffs = verdict.diffs.len(),
                            "contract mismatch"
                        );
                        unusable.insert(String::from(scenario.name()));
                        report.outcomes.push(ScenarioOutcome {
                            name: String::from(scenario.name()),
                            outcome: Outcome::Failed {
                                diffs: verdict.diffs,
                            },
                            response: Some(response),
                        });
                    }
                }
                Err(e) => {
                    // Transport-level failure: never an expected outcome,
                    // the rest of the run can't be trusted.
                    tracing::error!(scenario = scenario.name(), error = %e, "transport failure");
                    report.aborted = true;
                    report.outcomes.push(ScenarioOutcome {
                        name: String::from(scenario.name()),
                        outcome: Outcome::Errored {
                            error: e.to_string(),
                        },
                        response: None,
                    });
                }
            }
        }

        self.state = RunState::Done;
        Ok(report)
    }
}

fn apply_captures(
    scenario: &Scenario,
    response: &ObservedResponse,
    context: &mut RunContext,
) -> Result<(), Error> {
    for capture in scenario.captures() {
        let value = match &capture.source {
            CaptureSource::BodyPointer(pointer) => {
                let body = response.json()?;
                match body.pointer(pointer) {
                    Some(Value::String(text)) => text.clone(),
                    Some(Value::Number(number)) => number.to_string(),
                    Some(other) => other.to_string(),
                    None => return Err(Error::MissingCapture(capture.key.clone())),
                }
            }
            CaptureSource::Header(header) => match response.header(header) {
                Some(value) => String::from(value),
                None => return Err(Error::MissingCapture(capture.key.clone())),
            },
        };
        context.insert(capture.key.clone(), value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runner_with(scenarios: Vec<Scenario>) -> ContractRunner {
        let mut runner = ContractRunner::new(RunnerConfiguration::new("http://127.0.0.1:1"));
        runner.add_scenarios(scenarios);
        runner
    }

    #[test]
    fn dependencies_must_be_declared_earlier() {
        let runner = runner_with(vec![
            Scenario::get("b", "/todos").depends_on("a"),
            Scenario::get("a", "/todos"),
        ]);
        match runner.check_declarations() {
            Err(Error::UnknownDependency {
                scenario,
                depends_on,
            }) => {
                assert_eq!(scenario, "b");
                assert_eq!(depends_on, "a");
            }
            other => panic!("expected UnknownDependency, got {:?}", other),
        }
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let runner = runner_with(vec![
            Scenario::get("a", "/todos"),
            Scenario::get("a", "/todos"),
        ]);
        assert!(matches!(
            runner.check_declarations(),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn a_valid_graph_passes_the_check() {
        let runner = runner_with(vec![
            Scenario::get("a", "/todos"),
            Scenario::get("b", "/todos").depends_on("a"),
            Scenario::get("c", "/todos").depends_on("a").depends_on("b"),
        ]);
        assert!(runner.check_declarations().is_ok());
        assert_eq!(runner.state(), RunState::Init);
    }

    #[test]
    fn report_success_requires_every_scenario_to_pass() {
        let mut report = RunReport::default();
        report.outcomes.push(ScenarioOutcome {
            name: String::from("a"),
            outcome: Outcome::Passed,
            response: None,
        });
        assert!(report.success());

        report.outcomes.push(ScenarioOutcome {
            name: String::from("b"),
            outcome: Outcome::Skipped {
                reason: String::from("depends on 'a' which did not pass"),
            },
            response: None,
        });
        assert!(!report.success());
        assert_eq!(report.failures().count(), 1);
    }
}
