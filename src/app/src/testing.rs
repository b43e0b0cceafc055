//! Helpers for driving commands in unit tests

use crux_core::{Command, Request};
use crux_http::protocol::{HttpRequest, HttpResponse, HttpResult};

use crate::commands::timer::TimerOperation;
use crate::events::Event;
use crate::Effect;

/// Effects emitted by a command, split by kind
#[derive(Default)]
pub struct Effects {
    pub renders: usize,
    pub http: Vec<Request<HttpRequest>>,
    pub timers: Vec<Request<TimerOperation>>,
}

pub fn drain(cmd: &mut Command<Effect, Event>) -> Effects {
    let mut effects = Effects::default();
    for effect in cmd.effects() {
        match effect {
            Effect::Render(_) => effects.renders += 1,
            Effect::Http(request) => effects.http.push(request),
            Effect::Timer(request) => effects.timers.push(request),
        }
    }
    effects
}

/// Resolve an HTTP request and return the event the command sends back
pub fn respond(
    cmd: &mut Command<Effect, Event>,
    request: &mut Request<HttpRequest>,
    response: HttpResponse,
) -> Event {
    request
        .resolve(HttpResult::Ok(response))
        .expect("resolve http request");
    cmd.events().next().expect("response event")
}

pub fn ok_response(body: &str) -> HttpResponse {
    HttpResponse::ok().body(body.as_bytes().to_vec()).build()
}

pub fn status_response(status: u16) -> HttpResponse {
    HttpResponse::status(status)
        .body(b"Internal Server Error".to_vec())
        .build()
}

pub fn error_response(message: &str) -> HttpResult {
    HttpResult::Err(crux_http::HttpError::Io(message.to_string()))
}
