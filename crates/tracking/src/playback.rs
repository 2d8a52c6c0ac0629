//! Playback state machine for the live tracking view.
//!
//! [`PlaybackState`] is a Bevy [`States`] enum with two values. The fixed
//! tick sets are gated behind `in_state(PlaybackState::Playing)`, so pausing
//! stops every position, ETA and pickup update on the very next tick, and
//! resuming carries on from the progress already stored on each van.
//!
//! Callers drive it with [`PlaybackCommand`] events rather than writing
//! `NextState` directly, so start/pause/toggle semantics live in one place.
//!
//! Side effects of transitions:
//! - entering `Playing` requests a camera fit on the selected van
//! - entering `Paused` asks the presentation layer to settle the marker of
//!   every en-route van

use bevy::prelude::*;

use crate::fleet::Fleet;
use crate::markers::SettleMarker;
use crate::viewport::ViewportRefresh;

#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    /// Nothing moves. The fleet keeps its last computed state.
    #[default]
    Paused,
    /// The fixed tick advances the fleet.
    Playing,
}

impl PlaybackState {
    /// The "is live" flag shown next to the map.
    pub fn is_live(self) -> bool {
        self == PlaybackState::Playing
    }

    /// The state a command leads to from `self`, or `None` if the command
    /// does not change anything.
    pub fn after(self, command: PlaybackCommand) -> Option<PlaybackState> {
        let target = match command {
            PlaybackCommand::Start => PlaybackState::Playing,
            PlaybackCommand::Pause => PlaybackState::Paused,
            PlaybackCommand::Toggle => match self {
                PlaybackState::Paused => PlaybackState::Playing,
                PlaybackState::Playing => PlaybackState::Paused,
            },
        };
        (target != self).then_some(target)
    }
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackCommand {
    Start,
    Pause,
    Toggle,
}

/// System: fold this frame's commands into the next state.
///
/// Several commands in one frame are applied in order, so `Toggle, Toggle`
/// is a no-op.
pub fn apply_playback_commands(
    mut commands: EventReader<PlaybackCommand>,
    state: Res<State<PlaybackState>>,
    mut next_state: ResMut<NextState<PlaybackState>>,
) {
    let current = *state.get();
    let mut target = current;
    for command in commands.read() {
        if let Some(next) = target.after(*command) {
            target = next;
        }
    }
    if target != current {
        info!("Playback: {current:?} -> {target:?}");
        next_state.set(target);
    }
}

/// On entering `Playing`: fit the camera on the selected van right away.
fn request_camera_fit(mut refresh: EventWriter<ViewportRefresh>) {
    refresh.send(ViewportRefresh);
}

/// On entering `Paused`: settle the marker of every van that was moving.
fn settle_moving_markers(fleet: Res<Fleet>, mut settle: EventWriter<SettleMarker>) {
    for van in fleet.en_route() {
        settle.send(SettleMarker { van: van.id });
    }
}

pub struct PlaybackPlugin;

impl Plugin for PlaybackPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<PlaybackState>()
            .add_event::<PlaybackCommand>()
            .add_systems(PreUpdate, apply_playback_commands)
            .add_systems(OnEnter(PlaybackState::Playing), request_camera_fit)
            .add_systems(OnEnter(PlaybackState::Paused), settle_moving_markers);
    }
}
