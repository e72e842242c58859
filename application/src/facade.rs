//! Orchestration facade
//!
//! The boundary consumed by the transport layer. Every method returns
//! immediately; mission progress is only ever observed by polling.

use crate::use_cases::mission_lifecycle::{LifecycleError, MissionLifecycleManager};
use infraflow_domain::{Mission, MissionId};
use serde::Serialize;

/// Whether the engine can accept missions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    Ready,
    NotReady,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        matches!(self, Readiness::Ready)
    }
}

/// Entry point for starting and inspecting missions
pub struct OrchestrationFacade {
    lifecycle: MissionLifecycleManager,
    engine_name: String,
}

impl OrchestrationFacade {
    pub fn new(lifecycle: MissionLifecycleManager, engine_name: impl Into<String>) -> Self {
        Self {
            lifecycle,
            engine_name: engine_name.into(),
        }
    }

    pub fn engine_name(&self) -> &str {
        &self.engine_name
    }

    /// Accept a mission; fails fast with `NotReady` without a gateway or a valid roster
    pub fn start_mission(&self, text: &str) -> Result<MissionId, LifecycleError> {
        self.lifecycle.submit(text)
    }

    pub fn get_mission(&self, id: &MissionId) -> Result<Mission, LifecycleError> {
        self.lifecycle.get(id)
    }

    /// Look up a mission by its textual id; malformed ids are simply unknown
    pub fn get_mission_by_str(&self, id: &str) -> Result<Mission, LifecycleError> {
        let id = id
            .parse::<MissionId>()
            .map_err(|_| LifecycleError::NotFound(id.to_string()))?;
        self.get_mission(&id)
    }

    pub fn list_missions(&self) -> Vec<Mission> {
        self.lifecycle.list()
    }

    pub fn cancel_mission(&self, id: &MissionId) -> Result<(), LifecycleError> {
        self.lifecycle.cancel(id)
    }

    pub fn cancel_mission_by_str(&self, id: &str) -> Result<(), LifecycleError> {
        let id = id
            .parse::<MissionId>()
            .map_err(|_| LifecycleError::NotFound(id.to_string()))?;
        self.cancel_mission(&id)
    }

    /// Reflects gateway and roster configuration only; never performs I/O
    pub fn readiness(&self) -> Readiness {
        if self.lifecycle.is_ready() {
            Readiness::Ready
        } else {
            Readiness::NotReady
        }
    }

    pub fn gateway_model(&self) -> Option<&str> {
        self.lifecycle.gateway_model()
    }

    /// Cancel every live mission
    pub fn shutdown(&self) -> usize {
        self.lifecycle.shutdown()
    }
}
