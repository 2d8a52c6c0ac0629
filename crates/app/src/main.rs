//! `vantrack`: headless live van tracker.
//!
//! Loads a fleet file (first CLI argument, or `VANTRACK_FLEET`, or the
//! bundled demo fleet), dispatches every idle van, starts playback and logs
//! progress until every van has finished its route.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use tracking::config_error::ConfigError;
use tracking::fleet::{Fleet, FleetSettled, StopCompleted, TripStats, VanId, VanStatus};
use tracking::fleet_file::FleetFile;
use tracking::playback::{PlaybackCommand, PlaybackState};
use tracking::viewport::MapViewport;
use tracking::{TickCounter, TrackingPlugin, TrackingSet};

const DEMO_FLEET: &str = include_str!("../assets/demo_fleet.json");

/// Log a fleet summary every this many ticks.
const STATUS_EVERY_TICKS: u64 = 50;

fn main() -> ExitCode {
    let mut app = App::new();

    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f64(
            1.0 / 60.0,
        ))),
    )
    .add_plugins((LogPlugin::default(), StatesPlugin))
    .add_plugins(TrackingPlugin);

    let file = match load_fleet() {
        Ok(file) => file,
        Err(e) => {
            error!("Could not load fleet: {e}");
            return ExitCode::FAILURE;
        }
    };
    file.into_resources().insert_into(app.world_mut());

    app.add_systems(Startup, start_tracking)
        .add_systems(
            FixedUpdate,
            log_fleet_status
                .after(TrackingSet::PostTick)
                .run_if(in_state(PlaybackState::Playing)),
        )
        .add_systems(Update, (log_stop_completions, log_camera, exit_when_settled));

    match app.run() {
        AppExit::Success => ExitCode::SUCCESS,
        AppExit::Error(code) => ExitCode::from(code.get()),
    }
}

fn load_fleet() -> Result<FleetFile, ConfigError> {
    let path = std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("VANTRACK_FLEET"))
        .map(PathBuf::from);
    match path {
        Some(path) => FleetFile::load(&path),
        None => {
            info!("No fleet file given, using the demo fleet");
            FleetFile::from_json(DEMO_FLEET)
        }
    }
}

/// Dispatch every idle van and start playback.
fn start_tracking(
    mut fleet: ResMut<Fleet>,
    mut stats: ResMut<TripStats>,
    mut playback: EventWriter<PlaybackCommand>,
    mut exit: EventWriter<AppExit>,
) {
    if fleet.vans.is_empty() {
        warn!("Fleet is empty, nothing to track");
        exit.send(AppExit::Success);
        return;
    }

    let idle: Vec<VanId> = fleet
        .vans
        .iter()
        .filter(|v| v.status == VanStatus::Idle)
        .map(|v| v.id)
        .collect();
    for id in idle {
        fleet.dispatch(id, &mut stats);
    }
    for van in fleet.vans.iter().filter(|v| !v.can_move()) {
        warn!(
            "{}: route has {} stop(s), it will stay parked",
            van.name,
            van.stops.len()
        );
    }
    info!(
        "Tracking {} vans ({} en route)",
        fleet.vans.len(),
        fleet.en_route_count()
    );
    playback.send(PlaybackCommand::Start);
}

fn log_fleet_status(tick: Res<TickCounter>, fleet: Res<Fleet>, stats: Res<TripStats>) {
    if tick.0 % STATUS_EVERY_TICKS != 0 {
        return;
    }
    for van in fleet.en_route() {
        info!(
            "{} -> {} | {:.1}% | ETA {} | {}/{} stops | {} waiting",
            van.name,
            van.current_stop,
            van.progress * 100.0,
            van.eta,
            van.completed_stops.len(),
            van.stops.len(),
            van.waiting_passengers()
        );
    }
    info!(
        "Trips: {} ongoing, {} completed",
        stats.ongoing_trips, stats.completed_trips
    );
}

fn log_stop_completions(mut events: EventReader<StopCompleted>, fleet: Res<Fleet>) {
    for event in events.read() {
        let name = fleet.van(event.van).map_or("?", |v| v.name.as_str());
        info!("{name} reached {}", event.stop);
    }
}

fn log_camera(viewport: Res<MapViewport>) {
    if !viewport.is_changed() {
        return;
    }
    if let Some(region) = viewport.last_command.as_ref().and_then(|c| c.region()) {
        info!(
            "Camera: center ({:.5}, {:.5}), span {:.4} x {:.4}",
            region.center.lat, region.center.lng, region.lat_delta, region.lng_delta
        );
    }
}

/// Exit once nothing can move any more. Vans parked on a route shorter than
/// two stops stay en route forever, so they do not hold the runner open.
fn exit_when_settled(
    mut settled: EventReader<FleetSettled>,
    fleet: Res<Fleet>,
    stats: Res<TripStats>,
    mut exit: EventWriter<AppExit>,
) {
    let announced = settled.read().count() > 0;
    if announced || fleet.moving_count() == 0 {
        info!("All routes finished ({} trips)", stats.completed_trips);
        exit.send(AppExit::Success);
    }
}
