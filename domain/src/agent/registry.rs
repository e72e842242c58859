//! Agent registry
//!
//! The ordered, validated roster of agents. Built once at startup and
//! never mutated afterwards, so it can be read from every mission run
//! without synchronization.

use super::entities::AgentSpec;
use crate::core::error::DomainError;
use std::collections::HashSet;

/// Ordered set of agents with exactly one initiator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentRegistry {
    agents: Vec<AgentSpec>,
}

impl AgentRegistry {
    /// Build a registry, validating the roster.
    ///
    /// Fails with [`DomainError::Configuration`] when a role is blank or
    /// duplicated, when the number of initiators is not exactly one, or when
    /// no agent is left to respond to the initiator.
    pub fn new(agents: Vec<AgentSpec>) -> Result<Self, DomainError> {
        let mut seen = HashSet::new();
        for agent in &agents {
            if agent.role.trim().is_empty() {
                return Err(DomainError::Configuration(
                    "agent role cannot be empty".to_string(),
                ));
            }
            if !seen.insert(agent.role.as_str()) {
                return Err(DomainError::Configuration(format!(
                    "duplicate agent role '{}'",
                    agent.role
                )));
            }
        }

        let registry = Self { agents };
        registry.initiator()?;
        if registry.responders().next().is_none() {
            return Err(DomainError::Configuration(
                "at least one non-initiator agent is required".to_string(),
            ));
        }
        Ok(registry)
    }

    /// Built-in roster used when configuration declares no agents
    pub fn default_roster() -> Self {
        Self {
            agents: vec![
                AgentSpec::initiator(
                    "Commander",
                    "You relay the operator's mission to the team and keep it on track.",
                ),
                AgentSpec::new(
                    "Planner",
                    "You break the mission into concrete, ordered infrastructure steps. \
                     When the plan is complete and agreed, reply with TERMINATE.",
                ),
                AgentSpec::new(
                    "Strategist",
                    "You review the proposed steps for risk, cost and rollback paths, \
                     and refine them. When nothing is left to refine, reply with TERMINATE.",
                ),
            ],
        }
    }

    /// All agents in registration order
    pub fn list_agents(&self) -> &[AgentSpec] {
        &self.agents
    }

    /// The single initiator agent
    pub fn initiator(&self) -> Result<&AgentSpec, DomainError> {
        find_initiator(&self.agents)
    }

    /// Non-initiator agents in registration order
    pub fn responders(&self) -> impl Iterator<Item = &AgentSpec> {
        self.agents.iter().filter(|a| !a.is_initiator)
    }

    /// Look up an agent by role
    pub fn get(&self, role: &str) -> Option<&AgentSpec> {
        self.agents.iter().find(|a| a.role == role)
    }

    /// Mission-specific subset of this registry.
    ///
    /// Keeps the initiator plus the listed roles, preserving registration
    /// order. Unknown roles are a configuration error.
    pub fn filter(&self, roles: &[&str]) -> Result<Self, DomainError> {
        if let Some(unknown) = roles.iter().find(|r| self.get(r).is_none()) {
            return Err(DomainError::Configuration(format!(
                "unknown agent role '{}'",
                unknown
            )));
        }
        let agents = self
            .agents
            .iter()
            .filter(|a| a.is_initiator || roles.contains(&a.role.as_str()))
            .cloned()
            .collect();
        Self::new(agents)
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

/// The one agent marked as initiator in `agents`.
///
/// Fails with [`DomainError::Configuration`] when there is none or more
/// than one.
pub fn find_initiator(agents: &[AgentSpec]) -> Result<&AgentSpec, DomainError> {
    let mut initiators = agents.iter().filter(|a| a.is_initiator);
    match (initiators.next(), initiators.next()) {
        (Some(agent), None) => Ok(agent),
        (None, _) => Err(DomainError::Configuration(
            "no agent is marked as initiator".to_string(),
        )),
        (Some(_), Some(_)) => Err(DomainError::Configuration(
            "more than one agent is marked as initiator".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<AgentSpec> {
        vec![
            AgentSpec::initiator("Initiator", "seed"),
            AgentSpec::new("Planner", "plan"),
            AgentSpec::new("Strategist", "strategize"),
        ]
    }

    #[test]
    fn test_valid_registry() {
        let registry = AgentRegistry::new(roster()).unwrap();
        assert_eq!(registry.len(), 3);
        assert_eq!(registry.initiator().unwrap().role, "Initiator");
        let responders: Vec<_> = registry.responders().map(|a| a.role.as_str()).collect();
        assert_eq!(responders, vec!["Planner", "Strategist"]);
    }

    #[test]
    fn test_zero_initiators_rejected() {
        let agents = vec![AgentSpec::new("Planner", "plan"), AgentSpec::new("Strategist", "s")];
        let err = AgentRegistry::new(agents).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("no agent"));
    }

    #[test]
    fn test_multiple_initiators_rejected() {
        let mut agents = roster();
        agents.push(AgentSpec::initiator("Operator", "seed"));
        let err = AgentRegistry::new(agents).unwrap_err();
        assert!(err.to_string().contains("more than one"));
    }

    #[test]
    fn test_find_initiator_on_raw_slice() {
        let agents = roster();
        assert_eq!(find_initiator(&agents).unwrap().role, "Initiator");
        assert!(find_initiator(&agents[1..]).unwrap_err().is_configuration());
    }

    #[test]
    fn test_duplicate_roles_rejected() {
        let mut agents = roster();
        agents.push(AgentSpec::new("Planner", "again"));
        assert!(AgentRegistry::new(agents).is_err());
    }

    #[test]
    fn test_initiator_only_rejected() {
        let agents = vec![AgentSpec::initiator("Initiator", "seed")];
        assert!(AgentRegistry::new(agents).is_err());
    }

    #[test]
    fn test_default_roster_is_valid() {
        let registry = AgentRegistry::default_roster();
        assert!(AgentRegistry::new(registry.list_agents().to_vec()).is_ok());
        assert_eq!(registry.initiator().unwrap().role, "Commander");
    }

    #[test]
    fn test_filter_keeps_initiator_and_order() {
        let mut agents = roster();
        agents.push(AgentSpec::new("Auditor", "audit"));
        let registry = AgentRegistry::new(agents).unwrap();

        let subset = registry.filter(&["Auditor", "Planner"]).unwrap();
        let roles: Vec<_> = subset.list_agents().iter().map(|a| a.role.as_str()).collect();
        assert_eq!(roles, vec!["Initiator", "Planner", "Auditor"]);
    }

    #[test]
    fn test_filter_unknown_role() {
        let registry = AgentRegistry::new(roster()).unwrap();
        assert!(registry.filter(&["Ghost"]).is_err());
    }
}
