// SPDX-License-Identifier: MPL-2.0
//! Screen-region channels.
//!
//! A channel owns the ordered active list for one screen region. Stack
//! order is strictly insertion order; the channel never reorders by
//! priority. The active list length never exceeds the configured capacity;
//! `try_admit` refuses instead.

use crate::domain::ChannelKey;

use super::instance::InstanceId;

/// A named screen region with a capacity-capped stack of instances.
#[derive(Debug)]
pub struct Channel {
    key: ChannelKey,
    capacity: usize,
    active: Vec<InstanceId>,
}

impl Channel {
    /// Creates a channel. A capacity of zero is raised to one; a channel
    /// that can never show anything would turn every submission into a
    /// permanently queued request.
    #[must_use]
    pub fn new(key: ChannelKey, capacity: usize) -> Self {
        Self {
            key,
            capacity: capacity.max(1),
            active: Vec::with_capacity(capacity.max(1)),
        }
    }

    /// Returns the channel's key.
    #[must_use]
    pub fn key(&self) -> ChannelKey {
        self.key
    }

    /// Returns the maximum number of simultaneously visible instances.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the number of instances currently in the active list.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.active.len()
    }

    /// Returns true when the channel cannot admit another instance.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.active.len() >= self.capacity
    }

    /// Returns true when `id` is in the active list.
    #[must_use]
    pub fn contains(&self, id: InstanceId) -> bool {
        self.active.contains(&id)
    }

    /// Returns the active list in stack order (anchor-most first).
    #[must_use]
    pub fn active(&self) -> &[InstanceId] {
        &self.active
    }

    /// Appends `id` to the active list if capacity allows.
    ///
    /// Returns false when full or when the instance is already listed; the
    /// caller must enqueue the request instead.
    pub fn try_admit(&mut self, id: InstanceId) -> bool {
        if self.is_full() || self.contains(id) {
            return false;
        }
        self.active.push(id);
        true
    }

    /// Removes `id` from the active list. No-op (returning false) when it
    /// is absent. Offsets of the remaining instances are recomputed by the
    /// caller via [`Channel::position_of`] and closed with an animated
    /// tween, never an instant jump.
    pub fn remove(&mut self, id: InstanceId) -> bool {
        match self.active.iter().position(|candidate| *candidate == id) {
            Some(index) => {
                self.active.remove(index);
                true
            }
            None => false,
        }
    }

    /// Computes the stack offset of the slot at `index`: the cumulative
    /// height of all prior active instances plus `spacing` per gap.
    #[must_use]
    pub fn position_of<F>(&self, index: usize, spacing: f32, height_of: F) -> f32
    where
        F: Fn(InstanceId) -> f32,
    {
        let heights: f32 = self.active[..index.min(self.active.len())]
            .iter()
            .map(|id| height_of(*id))
            .sum();
        heights + spacing * index as f32
    }

    /// Computes the offset the next admitted instance would get.
    #[must_use]
    pub fn next_offset<F>(&self, spacing: f32, height_of: F) -> f32
    where
        F: Fn(InstanceId) -> f32,
    {
        self.position_of(self.active.len(), spacing, height_of)
    }
}
