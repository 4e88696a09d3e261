// SPDX-License-Identifier: MPL-2.0
//! `notideck` is a deterministic notification delivery engine.
//!
//! It accepts fire-and-forget notification requests from arbitrary producers,
//! enforces a per-channel cap on simultaneously visible items, recycles
//! instances through an object pool, and animates entry, exit, and stack
//! repositioning as pure functions of engine time. Rendering, audio playback,
//! and persistence are left to the host; the engine only decides *when* and
//! *how many* notifications are visible, and in what order instances are
//! reused.

#![doc(html_root_url = "https://docs.rs/notideck/0.3.0")]

pub mod config;
pub mod diagnostics;
pub mod domain;
pub mod engine;
pub mod error;

#[cfg(test)]
mod test_utils;
