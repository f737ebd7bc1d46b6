use std::collections::{HashMap, VecDeque};

use log::info;

use crate::{ClientId, NetworkId, NetworkedEntityData};

/// Holds full-state payloads of entities whose parent does not exist locally
/// yet, keyed by the id of the parent they wait on.
///
/// Entries have no expiry; they leave the buffer when the parent is created
/// (`take_children`) or when they are pruned.
pub struct PendingParents {
    waiting_children: HashMap<NetworkId, Vec<NetworkedEntityData>>,
    child_to_parent: HashMap<NetworkId, NetworkId>,
}

impl Default for PendingParents {
    fn default() -> Self {
        Self::new()
    }
}

impl PendingParents {
    pub fn new() -> Self {
        Self {
            waiting_children: HashMap::new(),
            child_to_parent: HashMap::new(),
        }
    }

    /// Buffers `data` until `parent` is created. A payload already buffered
    /// for the same child is replaced, so only the latest state is kept.
    /// Returns true if an older payload was replaced.
    pub fn queue(&mut self, parent: &NetworkId, data: NetworkedEntityData) -> bool {
        let replaced = self.remove_child(&data.network_id).is_some();

        self.child_to_parent
            .insert(data.network_id.clone(), parent.clone());
        self.waiting_children
            .entry(parent.clone())
            .or_default()
            .push(data);

        replaced
    }

    /// Removes and returns every payload waiting on `parent`, in arrival
    /// order.
    pub fn take_children(&mut self, parent: &NetworkId) -> Vec<NetworkedEntityData> {
        let children = self.waiting_children.remove(parent).unwrap_or_default();
        for child in &children {
            self.child_to_parent.remove(&child.network_id);
        }
        children
    }

    /// Drops the buffered payload of a single child.
    pub fn remove_child(&mut self, child: &NetworkId) -> Option<NetworkedEntityData> {
        let parent = self.child_to_parent.remove(child)?;

        let mut remove_parent = false;
        let mut removed = None;
        if let Some(children) = self.waiting_children.get_mut(&parent) {
            if let Some(index) = children.iter().position(|data| &data.network_id == child) {
                removed = Some(children.remove(index));
            }
            if children.is_empty() {
                remove_parent = true;
            }
        }
        if remove_parent {
            self.waiting_children.remove(&parent);
        }

        removed
    }

    /// Drops everything waiting on `parent`, and everything waiting on those
    /// children in turn. Returns the ids of the dropped payloads.
    pub fn prune_parent(&mut self, parent: &NetworkId) -> Vec<NetworkId> {
        let mut pruned = Vec::new();
        let mut parents = VecDeque::from([parent.clone()]);

        while let Some(parent) = parents.pop_front() {
            for child in self.take_children(&parent) {
                parents.push_back(child.network_id.clone());
                pruned.push(child.network_id);
            }
        }

        if !pruned.is_empty() {
            info!(
                "PendingParents: pruned {} payloads waiting on entity {}",
                pruned.len(),
                parent
            );
        }

        pruned
    }

    /// Drops every payload owned by `owner`, together with whatever was
    /// waiting on those payloads. Returns the ids of the dropped payloads.
    pub fn prune_owner(&mut self, owner: &ClientId) -> Vec<NetworkId> {
        let owned: Vec<NetworkId> = self
            .waiting_children
            .values()
            .flatten()
            .filter(|data| &data.owner == owner)
            .map(|data| data.network_id.clone())
            .collect();

        let mut pruned = Vec::new();
        for child in owned {
            // may already be gone as a descendant of an earlier one
            if self.remove_child(&child).is_some() {
                pruned.extend(self.prune_parent(&child));
                pruned.push(child);
            }
        }

        if !pruned.is_empty() {
            info!(
                "PendingParents: pruned {} payloads of client {}",
                pruned.len(),
                owner
            );
        }

        pruned
    }

    pub fn is_pending(&self, child: &NetworkId) -> bool {
        self.child_to_parent.contains_key(child)
    }

    pub fn parent_of(&self, child: &NetworkId) -> Option<&NetworkId> {
        self.child_to_parent.get(child)
    }

    /// Whether any payload is waiting on `parent`.
    pub fn is_awaited(&self, parent: &NetworkId) -> bool {
        self.waiting_children.contains_key(parent)
    }

    /// Number of buffered payloads.
    pub fn len(&self) -> usize {
        self.child_to_parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.child_to_parent.is_empty()
    }

    pub fn clear(&mut self) {
        self.waiting_children.clear();
        self.child_to_parent.clear();
    }
}
