//! Deterministic ordering for tracking systems via `SystemSet` phases.
//!
//! # FixedUpdate phases (`TrackingSet`)
//!
//! ```text
//! PreTick  →  Tick  →  PostTick
//! ```
//!
//! * **PreTick** – Tick counter.
//! * **Tick** – The route engine: positions, ETA, arrivals, completion. The
//!   whole fleet is swapped in one batch here.
//! * **PostTick** – Read-only aggregation (fleet-settled detection).
//!
//! All three are gated on `PlaybackState::Playing`; while paused, no
//! `FixedUpdate` tracking system runs at all.
//!
//! # Update phases (`TrackingUpdateSet`)
//!
//! ```text
//! Viewport  →  Presentation
//! ```
//!
//! * **Viewport** – Camera command refresh.
//! * **Presentation** – Marker transforms for the map layer.
//!
//! Playback commands are applied in `PreUpdate` so the state transition
//! (and its `OnEnter` hooks) happens in the same frame.

use bevy::prelude::*;

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackingSet {
    PreTick,
    Tick,
    PostTick,
}

#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TrackingUpdateSet {
    Viewport,
    Presentation,
}
