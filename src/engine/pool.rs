// SPDX-License-Identifier: MPL-2.0
//! Reusable instance pool.
//!
//! Instances live in a slab owned by the pool; channels and the dispatcher
//! refer to them by [`InstanceId`]. Leasing pops a free instance of the
//! requested kind or constructs one from the registered visual resource,
//! falling back to the standard resource when the kind has none.

use std::collections::HashMap;

use crate::domain::Kind;
use crate::error::{Error, Result};

use super::instance::{Instance, InstanceId, VisualHandle};

/// Host-supplied descriptor of the visual resource backing a kind.
///
/// Opaque to the engine apart from the nominal card height, which drives
/// stack layout.
#[derive(Debug, Clone)]
pub struct VisualResource {
    asset_key: String,
    height: f32,
}

impl VisualResource {
    /// Creates a resource descriptor. Heights below 1.0 are clamped up so a
    /// degenerate resource cannot collapse the stack layout.
    pub fn new(asset_key: impl Into<String>, height: f32) -> Self {
        Self {
            asset_key: asset_key.into(),
            height: height.max(1.0),
        }
    }

    /// Returns the asset key.
    #[must_use]
    pub fn asset_key(&self) -> &str {
        &self.asset_key
    }

    /// Returns the nominal card height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height
    }
}

/// Pool of reusable notification instances, keyed by kind.
#[derive(Debug, Default)]
pub struct Pool {
    resources: HashMap<Kind, VisualResource>,
    instances: Vec<Instance>,
    free: HashMap<Kind, Vec<InstanceId>>,
}

impl Pool {
    /// Creates an empty pool with no registered resources.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the visual resource used to build instances of `kind`.
    /// Replaces any previous registration; existing instances keep the
    /// resource they were built with.
    pub fn register_visual(&mut self, kind: Kind, resource: VisualResource) {
        self.resources.insert(kind, resource);
    }

    /// Returns true when `kind` has a resource registered (not counting the
    /// standard fallback).
    #[must_use]
    pub fn has_visual(&self, kind: Kind) -> bool {
        self.resources.contains_key(&kind)
    }

    /// Leases an instance for `kind`.
    ///
    /// Prefers a free instance of the same kind; otherwise constructs a new
    /// one from the kind's resource, or from the standard resource when the
    /// kind has none. Fails with [`Error::ResourceUnavailable`] when even
    /// the fallback is missing. The returned instance is still unbound;
    /// configuring it is the caller's responsibility.
    pub fn lease(&mut self, kind: Kind) -> Result<InstanceId> {
        if let Some(id) = self.free.get_mut(&kind).and_then(Vec::pop) {
            return Ok(id);
        }

        let resource = self
            .resources
            .get(&kind)
            .or_else(|| self.resources.get(&Kind::Standard))
            .ok_or(Error::ResourceUnavailable(kind))?;

        let visual = VisualHandle::new(resource.asset_key().to_string(), resource.height());
        let id = InstanceId::from_index(self.instances.len());
        self.instances.push(Instance::new(kind, visual));
        Ok(id)
    }

    /// Returns an instance to the free list for its kind.
    ///
    /// Deactivates the visual and scrubs the bound request. Idempotent:
    /// reclaiming an already-free instance is a no-op, which tolerates an
    /// auto-dismiss timer and an explicit dismiss firing in the same tick.
    pub fn reclaim(&mut self, id: InstanceId) {
        let Some(instance) = self.instances.get_mut(id.index()) else {
            return;
        };
        if instance.is_free() {
            return;
        }
        instance.release();
        let kind = instance.kind();
        self.free.entry(kind).or_default().push(id);
    }

    /// Returns the instance for `id`.
    ///
    /// Ids are only handed out by [`Pool::lease`], so a lookup cannot miss.
    #[must_use]
    pub fn get(&self, id: InstanceId) -> &Instance {
        &self.instances[id.index()]
    }

    pub(crate) fn get_mut(&mut self, id: InstanceId) -> &mut Instance {
        &mut self.instances[id.index()]
    }

    /// Returns the number of free instances for `kind`.
    #[must_use]
    pub fn free_count(&self, kind: Kind) -> usize {
        self.free.get(&kind).map_or(0, Vec::len)
    }

    /// Returns the total number of instances ever constructed.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.instances.len()
    }

    /// Iterates all instance slots.
    pub fn iter(&self) -> impl Iterator<Item = (InstanceId, &Instance)> {
        self.instances
            .iter()
            .enumerate()
            .map(|(index, instance)| (InstanceId::from_index(index), instance))
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = (InstanceId, &mut Instance)> {
        self.instances
            .iter_mut()
            .enumerate()
            .map(|(index, instance)| (InstanceId::from_index(index), instance))
    }
}
