// SPDX-License-Identifier: MPL-2.0
//! Pending request backlog.
//!
//! Requests that arrive while their channel is at capacity wait here in
//! FIFO order, one queue per channel. No instance is leased for a pending
//! request until it is promoted, so overflow never churns the pool.

use std::collections::{HashMap, VecDeque};
use std::time::Duration;

use crate::domain::{ChannelKey, Request};

/// A queued request plus the engine time it was enqueued at.
#[derive(Debug, Clone)]
pub struct PendingEntry {
    request: Request,
    enqueued_at: Duration,
}

impl PendingEntry {
    /// Returns the queued request.
    #[must_use]
    pub fn request(&self) -> &Request {
        &self.request
    }

    /// Returns the engine time at which the request was enqueued.
    #[must_use]
    pub fn enqueued_at(&self) -> Duration {
        self.enqueued_at
    }
}

/// Per-channel FIFO backlog of requests awaiting capacity.
///
/// A request only ever surfaces on the channel it targeted; keeping one
/// queue per channel makes that property structural rather than something
/// the dequeue path has to re-check and requeue around.
#[derive(Debug, Default)]
pub struct PendingQueue {
    queues: HashMap<ChannelKey, VecDeque<PendingEntry>>,
}

impl PendingQueue {
    /// Creates an empty backlog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a request to its channel's queue.
    pub fn enqueue(&mut self, channel: ChannelKey, request: Request, now: Duration) {
        self.queues
            .entry(channel)
            .or_default()
            .push_back(PendingEntry {
                request,
                enqueued_at: now,
            });
    }

    /// Pops the oldest request waiting for `channel`, if any.
    ///
    /// Called by the dispatcher only after the channel reports freed
    /// capacity; exactly one request is promoted per freed slot.
    pub fn try_dequeue_for(&mut self, channel: ChannelKey) -> Option<Request> {
        self.queues
            .get_mut(&channel)
            .and_then(VecDeque::pop_front)
            .map(|entry| entry.request)
    }

    /// Returns the number of requests waiting for `channel`.
    #[must_use]
    pub fn len_for(&self, channel: ChannelKey) -> usize {
        self.queues.get(&channel).map_or(0, VecDeque::len)
    }

    /// Returns the total number of waiting requests across all channels.
    #[must_use]
    pub fn total_len(&self) -> usize {
        self.queues.values().map(VecDeque::len).sum()
    }

    /// Returns true when nothing is waiting anywhere.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_len() == 0
    }

    /// Abandons all queued requests, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let abandoned = self.total_len();
        self.queues.clear();
        abandoned
    }

    /// Iterates waiting entries for `channel` in FIFO order.
    pub fn iter_for(&self, channel: ChannelKey) -> impl Iterator<Item = &PendingEntry> {
        self.queues.get(&channel).into_iter().flatten()
    }
}
