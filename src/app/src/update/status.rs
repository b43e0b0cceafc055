use crux_core::{render::render, Command};

use crate::commands::timer::TimerOutput;
use crate::device_get;
use crate::events::{Event, StatusEvent};
use crate::model::{Model, StatusState};
use crate::types::SensorStatus;
use crate::{Effect, TimerCmd};

/// Period between two `/sensor_status` fetches while the status view is active
pub const POLL_INTERVAL_MS: u64 = 2500;

/// Handle status polling events
pub fn handle(event: StatusEvent, model: &mut Model) -> Command<Effect, Event> {
    match event {
        StatusEvent::StartPolling => {
            if model.status.is_active {
                return Command::done();
            }

            model.status = StatusState {
                generation: model.status.generation + 1,
                is_active: true,
                is_loading: true,
                ..Default::default()
            };
            log::debug!("start polling (generation {})", model.status.generation);

            // the repeating timer is armed once this first fetch has answered
            Command::all([render(), fetch_sensor_status(model)])
        }

        StatusEvent::StopPolling => {
            if !model.status.is_active {
                return Command::done();
            }

            let cancel = match model.status.poll_timer.take() {
                Some(id) => TimerCmd::cancel(id)
                    .build()
                    .then_send(|output| Event::Status(StatusEvent::PollTimer(output))),
                None => Command::done(),
            };

            model.status = StatusState {
                generation: model.status.generation + 1,
                ..Default::default()
            };
            log::debug!("stop polling");

            Command::all([cancel, render()])
        }

        StatusEvent::SensorStatusResponse {
            generation,
            seq,
            result,
        } => handle_sensor_status_response(generation, seq, result, model),

        StatusEvent::PollTimer(output) => handle_poll_timer(output, model),
    }
}

fn fetch_sensor_status(model: &mut Model) -> Command<Effect, Event> {
    let generation = model.status.generation;
    let seq = model.status.next_request();

    device_get!("/sensor_status", "Poll sensor status", expect_json: SensorStatus,
        |result| Event::Status(StatusEvent::SensorStatusResponse { generation, seq, result })
    )
}

fn arm_poll_timer(model: &mut Model) -> Command<Effect, Event> {
    let id = model.next_timer_id();
    model.status.poll_timer = Some(id);

    TimerCmd::start(id, POLL_INTERVAL_MS)
        .build()
        .then_send(|output| Event::Status(StatusEvent::PollTimer(output)))
}

fn handle_sensor_status_response(
    generation: u64,
    seq: u64,
    result: Result<SensorStatus, String>,
    model: &mut Model,
) -> Command<Effect, Event> {
    if !model.status.accepts(generation, seq) {
        log::debug!("discarding stale sensor status (generation {generation}, seq {seq})");
        return Command::done();
    }

    let arm = if model.status.poll_timer.is_none() {
        arm_poll_timer(model)
    } else {
        Command::done()
    };

    model.status.is_loading = false;
    model.status.applied_seq = seq;

    match result {
        Ok(status) => {
            model.status.sensor_status = status;
            model.status.last_error = None;
        }
        Err(e) => {
            // keep showing the last good telemetry
            log::warn!("sensor status poll failed: {e}");
            model.status.last_error = Some(e);
        }
    }

    Command::all([arm, render()])
}

fn handle_poll_timer(output: TimerOutput, model: &mut Model) -> Command<Effect, Event> {
    match output {
        TimerOutput::Fired { id } if model.status.is_active && model.status.poll_timer == Some(id) => {
            let fetch = fetch_sensor_status(model);
            let rearm = arm_poll_timer(model);
            Command::all([fetch, rearm])
        }
        TimerOutput::Fired { id } => {
            log::debug!("ignoring stale poll {id}");
            Command::done()
        }
        TimerOutput::Cancelled { .. } => Command::done(),
    }
}
