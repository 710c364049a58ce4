//! Topology Resolver
//!
//! Derives, from the configured containers alone, each container's tier, the
//! dependency edges between tiers and whether a shared network is needed.
//! Resolution never fails: an unknown kind simply has no tier.

use crate::catalog::{ContainerRegistry, TypeClass};
use crate::project::ContainerInstance;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TopologyNode {
    pub name: String,
    pub type_class: Option<TypeClass>,
    /// Containers this one depends on, in configuration order
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Topology {
    pub nodes: Vec<TopologyNode>,
    pub network_required: bool,
}

impl Topology {
    pub fn resolve(containers: &[ContainerInstance], registry: &ContainerRegistry) -> Self {
        let typed: Vec<(&str, Option<TypeClass>)> = containers
            .iter()
            .map(|c| (c.internal_name.as_str(), registry.type_class(&c.kind)))
            .collect();

        let nodes = typed
            .iter()
            .map(|(name, type_class)| {
                let depends_on = match type_class.and_then(TypeClass::next_tier_down) {
                    Some(tier) => typed
                        .iter()
                        .filter(|(_, t)| *t == Some(tier))
                        .map(|(n, _)| n.to_string())
                        .collect(),
                    None => Vec::new(),
                };

                TopologyNode {
                    name: name.to_string(),
                    type_class: *type_class,
                    depends_on,
                }
            })
            .collect();

        Self {
            nodes,
            network_required: containers.len() > 1,
        }
    }

    pub fn node(&self, name: &str) -> Option<&TopologyNode> {
        self.nodes.iter().find(|n| n.name == name)
    }

    pub fn type_of(&self, name: &str) -> Option<TypeClass> {
        self.node(name).and_then(|n| n.type_class)
    }

    pub fn dependencies_of(&self, name: &str) -> &[String] {
        self.node(name)
            .map(|n| n.depends_on.as_slice())
            .unwrap_or(&[])
    }

    pub fn of_type(&self, type_class: TypeClass) -> impl Iterator<Item = &TopologyNode> {
        self.nodes
            .iter()
            .filter(move |n| n.type_class == Some(type_class))
    }

    /// Backend that API-URL wiring points at: the first one in list order.
    pub fn api_backend(&self) -> Option<&str> {
        self.of_type(TypeClass::Backend)
            .next()
            .map(|n| n.name.as_str())
    }

    /// Internal address peers use to reach the API backend
    pub fn api_url(&self) -> Option<String> {
        self.api_backend().map(|name| format!("http://{}", name))
    }
}
