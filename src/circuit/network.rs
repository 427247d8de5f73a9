//! Arena of nodes and bipoles.
//!
//! A [`Network`] owns every [`Node`] and [`Bipole`] the caller creates. Cross
//! references are handles ([`NodeId`], [`BipoleId`]) rather than pointers:
//! a bipole records the node on each of its pins, and a node records every
//! `(bipole, pin)` pair touching it. All operations that change a pin keep
//! both sides of that relation in step.

use tracing::debug;

use super::types::{BipoleId, NodeId, Pin};
use crate::components::Component;
use crate::error::{PhasorError, Result};
use crate::units::{Current, Voltage};

/// Name given to nodes created by [`Network::add_ground`].
pub const GROUND_NAME: &str = "GND";

/// A point of electrical contact.
#[derive(Debug, Clone)]
pub struct Node {
    pub id: NodeId,
    /// Optional display name
    pub name: Option<String>,
    /// Resolved voltage, set by a solve
    pub voltage: Option<Voltage>,
    /// Whether this node is the reference (zero potential)
    pub is_ground: bool,
    connections: Vec<(BipoleId, Pin)>,
}

impl Node {
    fn new(id: NodeId, name: Option<String>, is_ground: bool) -> Self {
        Self {
            id,
            name,
            voltage: None,
            is_ground,
            connections: Vec::new(),
        }
    }

    /// Every `(bipole, pin)` pair touching this node, in connection order.
    pub fn connections(&self) -> &[(BipoleId, Pin)] {
        &self.connections
    }

    /// Display label: the name if set, otherwise the handle.
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}

/// A two-terminal component bound to two nodes.
#[derive(Debug, Clone)]
pub struct Bipole {
    pub id: BipoleId,
    /// Optional display name
    pub name: Option<String>,
    pub component: Component,
    /// Resolved current, set by a solve
    pub current: Option<Current>,
    pins: [NodeId; 2],
}

impl Bipole {
    /// Node attached to `pin`.
    pub fn node(&self, pin: Pin) -> NodeId {
        self.pins[pin.index()]
    }

    /// Nodes attached to pin A and pin B.
    pub fn nodes(&self) -> [NodeId; 2] {
        self.pins
    }

    /// Display label: the name if set, otherwise the handle.
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| self.id.to_string())
    }
}

#[derive(Debug, Clone)]
enum NodeSlot {
    Live(Node),
    /// Merged away into another node
    Merged(NodeId),
}

/// Owning arena for nodes and bipoles.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: Vec<NodeSlot>,
    bipoles: Vec<Option<Bipole>>,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    fn push_node(&mut self, name: Option<String>, is_ground: bool) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(NodeSlot::Live(Node::new(id, name, is_ground)));
        id
    }

    /// Add a named node.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        self.push_node(Some(name.into()), false)
    }

    /// Add a node without a name.
    pub fn add_unnamed_node(&mut self) -> NodeId {
        self.push_node(None, false)
    }

    /// Add a ground reference node. Every ground created this way can later
    /// be merged with the others.
    pub fn add_ground(&mut self) -> NodeId {
        self.push_node(Some(GROUND_NAME.to_string()), true)
    }

    /// Mark an existing node as a ground reference.
    pub fn mark_ground(&mut self, node: NodeId) -> Result<()> {
        self.node_mut(node)?.is_ground = true;
        Ok(())
    }

    /// Add a component between `a` (pin A) and `b` (pin B).
    pub fn add(&mut self, component: Component, a: NodeId, b: NodeId) -> Result<BipoleId> {
        self.insert_bipole(None, component, a, b)
    }

    /// Add a named component between `a` (pin A) and `b` (pin B).
    pub fn add_named(
        &mut self,
        name: impl Into<String>,
        component: Component,
        a: NodeId,
        b: NodeId,
    ) -> Result<BipoleId> {
        self.insert_bipole(Some(name.into()), component, a, b)
    }

    fn insert_bipole(
        &mut self,
        name: Option<String>,
        component: Component,
        a: NodeId,
        b: NodeId,
    ) -> Result<BipoleId> {
        component.validate()?;
        let a = self.resolve(a)?;
        let b = self.resolve(b)?;

        let id = BipoleId(self.bipoles.len());
        self.bipoles.push(Some(Bipole {
            id,
            name,
            component,
            current: None,
            pins: [a, b],
        }));
        self.node_mut(a)?.connections.push((id, Pin::A));
        self.node_mut(b)?.connections.push((id, Pin::B));
        Ok(id)
    }

    /// Follow merges to the live node a handle now refers to.
    pub fn resolve(&self, node: NodeId) -> Result<NodeId> {
        let mut current = node;
        loop {
            match self.nodes.get(current.0) {
                Some(NodeSlot::Live(_)) => return Ok(current),
                Some(NodeSlot::Merged(target)) => current = *target,
                None => return Err(PhasorError::NodeNotFound { node }),
            }
        }
    }

    /// Look up a node, following merges.
    pub fn node(&self, node: NodeId) -> Result<&Node> {
        match self.nodes.get(self.resolve(node)?.0) {
            Some(NodeSlot::Live(n)) => Ok(n),
            _ => Err(PhasorError::NodeNotFound { node }),
        }
    }

    pub(crate) fn node_mut(&mut self, node: NodeId) -> Result<&mut Node> {
        let resolved = self.resolve(node)?;
        match self.nodes.get_mut(resolved.0) {
            Some(NodeSlot::Live(n)) => Ok(n),
            _ => Err(PhasorError::NodeNotFound { node }),
        }
    }

    /// Look up a bipole.
    pub fn bipole(&self, bipole: BipoleId) -> Result<&Bipole> {
        self.bipoles
            .get(bipole.0)
            .and_then(Option::as_ref)
            .ok_or(PhasorError::BipoleNotFound { bipole })
    }

    pub(crate) fn bipole_mut(&mut self, bipole: BipoleId) -> Result<&mut Bipole> {
        self.bipoles
            .get_mut(bipole.0)
            .and_then(Option::as_mut)
            .ok_or(PhasorError::BipoleNotFound { bipole })
    }

    /// Iterate over live nodes.
    pub fn nodes(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().filter_map(|slot| match slot {
            NodeSlot::Live(n) => Some(n),
            NodeSlot::Merged(_) => None,
        })
    }

    /// Iterate over live bipoles.
    pub fn bipoles(&self) -> impl Iterator<Item = &Bipole> + '_ {
        self.bipoles.iter().filter_map(Option::as_ref)
    }

    /// Move one pin of a bipole to another node.
    ///
    /// The bipole leaves the old node's connection list and joins the new
    /// node's in the same call.
    pub fn reassign_pin(&mut self, bipole: BipoleId, pin: Pin, node: NodeId) -> Result<()> {
        let new_node = self.resolve(node)?;
        let old_node = self.bipole(bipole)?.node(pin);
        if old_node == new_node {
            return Ok(());
        }

        self.node_mut(old_node)?
            .connections
            .retain(|&entry| entry != (bipole, pin));
        self.node_mut(new_node)?.connections.push((bipole, pin));
        self.bipole_mut(bipole)?.pins[pin.index()] = new_node;
        Ok(())
    }

    /// Remove a bipole, detaching it from both of its nodes.
    pub fn remove_bipole(&mut self, bipole: BipoleId) -> Result<Bipole> {
        let removed = self
            .bipoles
            .get_mut(bipole.0)
            .and_then(Option::take)
            .ok_or(PhasorError::BipoleNotFound { bipole })?;

        for node in removed.pins {
            self.node_mut(node)?
                .connections
                .retain(|&(b, _)| b != bipole);
        }
        Ok(removed)
    }

    /// Merge `other` into `keep`.
    ///
    /// Both nodes must agree on name, resolved voltage and ground flag. The
    /// connection lists are unioned, every bipole pin on `other` is moved to
    /// `keep`, and `other` becomes an alias of `keep`. Merging a node with
    /// itself leaves it unchanged.
    pub fn merge_nodes(&mut self, keep: NodeId, other: NodeId) -> Result<NodeId> {
        let keep = self.resolve(keep)?;
        let other = self.resolve(other)?;
        if keep == other {
            return Ok(keep);
        }

        let (k, o) = (self.node(keep)?, self.node(other)?);
        let conflict = if k.name != o.name {
            Some("name")
        } else if k.voltage != o.voltage {
            Some("voltage")
        } else if k.is_ground != o.is_ground {
            Some("ground flag")
        } else {
            None
        };
        if let Some(field) = conflict {
            return Err(PhasorError::GroundMergeConflict { keep, other, field });
        }

        let moved = std::mem::take(&mut self.node_mut(other)?.connections);
        for &(bipole, pin) in &moved {
            self.bipole_mut(bipole)?.pins[pin.index()] = keep;
        }
        let target = self.node_mut(keep)?;
        for entry in moved {
            if !target.connections.contains(&entry) {
                target.connections.push(entry);
            }
        }
        self.nodes[other.0] = NodeSlot::Merged(keep);

        debug!(%keep, %other, "merged nodes");
        Ok(keep)
    }

    /// Voltage across a bipole (pin A minus pin B), if both nodes are solved.
    pub fn bipole_voltage(&self, bipole: BipoleId) -> Result<Option<Voltage>> {
        let [a, b] = self.bipole(bipole)?.nodes();
        let va = self.node(a)?.voltage;
        let vb = self.node(b)?.voltage;
        Ok(match (va, vb) {
            (Some(va), Some(vb)) => Some(va - vb),
            _ => None,
        })
    }

    /// Current through a bipole, if solved.
    pub fn bipole_current(&self, bipole: BipoleId) -> Result<Option<Current>> {
        Ok(self.bipole(bipole)?.current)
    }

    /// Voltage of a node, if solved.
    pub fn node_voltage(&self, node: NodeId) -> Result<Option<Voltage>> {
        Ok(self.node(node)?.voltage)
    }
}
