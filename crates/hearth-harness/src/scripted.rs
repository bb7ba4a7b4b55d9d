//! Scripted engine double.

use hearth_bridge::Engine;
use thiserror::Error;

use crate::trace::{CallTrace, EngineCall};

/// Failure injected by a [`Script`].
#[derive(Debug, Error)]
#[error("scripted failure: {reason}")]
pub struct ScriptError {
    /// What was injected.
    pub reason: String,
}

/// Behavior of a [`ScriptedEngine`], as plain overridable data.
#[derive(Debug, Clone)]
pub struct Script {
    /// Markup returned by the initial fetch.
    pub initial_markup: String,
    /// Response installed after a `SaveInstanceState` event.
    pub save_response: String,
    /// Response installed after any other event.
    pub event_response: String,
    /// Response installed after an invocation.
    pub invocation_response: String,
    /// Invocation body that makes the engine signal shutdown.
    pub shutdown_on: Option<String>,
    /// Fail the initial markup fetch.
    pub fail_initial_markup: bool,
}

impl Default for Script {
    fn default() -> Self {
        Self {
            initial_markup: "<html><body>ready</body></html>".to_string(),
            save_response: "{}".to_string(),
            event_response: "{}".to_string(),
            invocation_response: r#"{"status":"ok"}"#.to_string(),
            shutdown_on: None,
            fail_initial_markup: false,
        }
    }
}

/// Deterministic engine double.
///
/// Replies from its [`Script`] and records every call it receives — in the
/// order it observes them — into a shared [`CallTrace`]. Like the real
/// collaborator, it holds only the latest response; a consumer that misses
/// a cycle loses it.
pub struct ScriptedEngine {
    script: Script,
    trace: CallTrace,
    last_response: String,
    last_raw: String,
    shutdown: bool,
}

impl ScriptedEngine {
    /// Constructor closure for [`hearth_bridge::Dispatcher::spawn_with`]
    /// and `Screen::create_with`.
    pub fn factory(
        script: Script,
        trace: CallTrace,
    ) -> impl FnOnce(&str) -> Result<Self, ScriptError> + Send + 'static {
        move |config_json| {
            let guard = trace.enter(EngineCall::Create);
            let is_object = serde_json::from_str::<serde_json::Value>(config_json)
                .map(|v| v.is_object())
                .unwrap_or(false);
            drop(guard);
            if !is_object {
                return Err(ScriptError {
                    reason: format!("config is not a JSON object: {config_json}"),
                });
            }
            Ok(Self {
                script,
                trace,
                last_response: "{}".to_string(),
                last_raw: String::new(),
                shutdown: false,
            })
        }
    }

    /// Constructor closure that always fails, for exercising the fatal
    /// initialization path.
    pub fn failing_factory(
        reason: &str,
    ) -> impl FnOnce(&str) -> Result<Self, ScriptError> + Send + 'static {
        let reason = reason.to_string();
        move |_config_json| Err(ScriptError { reason })
    }
}

impl Engine for ScriptedEngine {
    type Error = ScriptError;

    fn create(config_json: &str) -> Result<Self, ScriptError> {
        Self::factory(Script::default(), CallTrace::new())(config_json)
    }

    fn initial_markup(&mut self) -> Result<String, ScriptError> {
        let _guard = self.trace.enter(EngineCall::InitialMarkup);
        if self.script.fail_initial_markup {
            return Err(ScriptError { reason: "initial markup failure injected".to_string() });
        }
        self.last_raw = self.script.initial_markup.clone();
        Ok(self.script.initial_markup.clone())
    }

    fn handle_event(&mut self, event_json: &str) -> Result<(), ScriptError> {
        let _guard = self.trace.enter(EngineCall::HandleEvent(event_json.to_string()));
        self.last_response = if event_json == r#""SaveInstanceState""# {
            self.script.save_response.clone()
        } else {
            self.script.event_response.clone()
        };
        Ok(())
    }

    fn execute(&mut self, body: &str) -> Result<(), ScriptError> {
        let _guard = self.trace.enter(EngineCall::Execute(body.to_string()));
        self.last_response = self.script.invocation_response.clone();
        self.shutdown = self.script.shutdown_on.as_deref() == Some(body);
        Ok(())
    }

    fn last_response_json(&mut self) -> Result<String, ScriptError> {
        let _guard = self.trace.enter(EngineCall::LastResponseJson);
        self.last_raw = self.last_response.clone();
        Ok(self.last_response.clone())
    }

    fn last_raw(&mut self) -> Result<String, ScriptError> {
        let _guard = self.trace.enter(EngineCall::LastRaw);
        Ok(self.last_raw.clone())
    }

    fn shutdown_required(&self) -> bool {
        let _guard = self.trace.enter(EngineCall::ShutdownCheck);
        self.shutdown
    }
}

impl Drop for ScriptedEngine {
    fn drop(&mut self) {
        let _guard = self.trace.enter(EngineCall::Released);
    }
}
