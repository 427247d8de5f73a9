//! Circuit discovery.
//!
//! A [`Circuit`] is the connected part of a [`Network`] reachable from a seed
//! node, with every ground-flagged node folded into a single reference.

use std::collections::HashSet;

use indexmap::IndexSet;
use tracing::debug;

use super::network::{Bipole, Network, Node};
use super::types::{BipoleId, NodeId};
use crate::error::{PhasorError, Result};
use crate::units::{Current, Voltage};

/// A discovered circuit ready for analysis.
#[derive(Debug, Clone)]
pub struct Circuit {
    network: Network,
    /// Non-ground nodes in discovery order
    nodes: IndexSet<NodeId>,
    /// Components in discovery order
    components: IndexSet<BipoleId>,
    ground: NodeId,
}

impl Circuit {
    /// Walk the network from `seed`, collecting every reachable node and
    /// component.
    ///
    /// Ground-flagged nodes are merged into the first ground found. Fails
    /// with [`PhasorError::MissingGround`] if no ground node is reachable.
    pub fn auto_discover(mut network: Network, seed: NodeId) -> Result<Self> {
        let mut nodes = IndexSet::new();
        let mut components = IndexSet::new();
        let mut ground: Option<NodeId> = None;
        let mut visited = HashSet::new();
        let mut stack = vec![network.resolve(seed)?];

        while let Some(node) = stack.pop() {
            let node = network.resolve(node)?;
            if !visited.insert(node) {
                continue;
            }

            // Read connections before a merge moves them.
            let current = network.node(node)?;
            let is_ground = current.is_ground;
            let connections = current.connections().to_vec();

            if is_ground {
                match ground {
                    None => ground = Some(node),
                    Some(reference) => {
                        network.merge_nodes(reference, node)?;
                    }
                }
            } else {
                nodes.insert(node);
            }

            for (bipole, pin) in connections {
                if components.insert(bipole) {
                    stack.push(network.bipole(bipole)?.node(pin.other()));
                }
            }
        }

        let ground = ground.ok_or(PhasorError::MissingGround)?;
        debug!(
            nodes = nodes.len(),
            components = components.len(),
            %ground,
            "discovered circuit"
        );

        Ok(Self {
            network,
            nodes,
            components,
            ground,
        })
    }

    /// The underlying network.
    pub fn network(&self) -> &Network {
        &self.network
    }

    pub(crate) fn network_mut(&mut self) -> &mut Network {
        &mut self.network
    }

    /// Give back the underlying network.
    pub fn into_network(self) -> Network {
        self.network
    }

    /// Non-ground nodes in discovery order.
    pub fn nodes(&self) -> &IndexSet<NodeId> {
        &self.nodes
    }

    /// Components in discovery order.
    pub fn components(&self) -> &IndexSet<BipoleId> {
        &self.components
    }

    /// The merged reference node.
    pub fn ground(&self) -> NodeId {
        self.ground
    }

    /// Check whether a handle refers to the reference node.
    pub fn is_ground(&self, node: NodeId) -> bool {
        self.network
            .resolve(node)
            .map(|n| n == self.ground)
            .unwrap_or(false)
    }

    /// Position of a node in the discovery order, or `None` for ground.
    pub fn node_index(&self, node: NodeId) -> Result<Option<usize>> {
        let node = self.network.resolve(node)?;
        if node == self.ground {
            return Ok(None);
        }
        self.nodes
            .get_index_of(&node)
            .map(Some)
            .ok_or(PhasorError::NodeNotFound { node })
    }

    /// Discovered components, in discovery order.
    pub fn bipoles(&self) -> impl Iterator<Item = &Bipole> + '_ {
        self.components
            .iter()
            .filter_map(|&id| self.network.bipole(id).ok())
    }

    /// Look up a node.
    pub fn node(&self, node: NodeId) -> Result<&Node> {
        self.network.node(node)
    }

    /// Look up a bipole.
    pub fn bipole(&self, bipole: BipoleId) -> Result<&Bipole> {
        self.network.bipole(bipole)
    }

    /// Solved voltage of a node.
    pub fn node_voltage(&self, node: NodeId) -> Result<Option<Voltage>> {
        self.network.node_voltage(node)
    }

    /// Solved voltage across a bipole (pin A minus pin B).
    pub fn bipole_voltage(&self, bipole: BipoleId) -> Result<Option<Voltage>> {
        self.network.bipole_voltage(bipole)
    }

    /// Solved current through a bipole.
    pub fn bipole_current(&self, bipole: BipoleId) -> Result<Option<Current>> {
        self.network.bipole_current(bipole)
    }
}
