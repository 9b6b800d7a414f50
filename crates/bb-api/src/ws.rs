//! WebSocket bridge from the Broadcaster to a connected client.
//!
//! One `WsSession` actor per connection: the route handler subscribes
//! before the actor starts, a forwarding task drains the subscription
//! channel into the actor mailbox, and the actor unsubscribes when it
//! stops. Heartbeat pings detect clients that went away without a
//! close frame; a dropped connection simply ends the stream.

use std::time::{Duration, Instant};

use actix::{Actor, ActorContext, AsyncContext, Handler, Message, StreamHandler};
use actix_web::{web, Error, HttpRequest, HttpResponse};
use actix_web_actors::ws;
use bb_core::{BoardEvent, SubscriberId};
use tokio::sync::mpsc::UnboundedReceiver;

use crate::handlers::AppState;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Serialized event pushed into the session mailbox by the forwarder.
#[derive(Message)]
#[rtype(result = "()")]
struct EventFrame(String);

pub struct WsSession {
    state: web::Data<AppState>,
    subscriber_id: SubscriberId,
    events: Option<UnboundedReceiver<BoardEvent>>,
    hb: Instant,
}

impl WsSession {
    fn heartbeat(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                log::debug!("ws client timed out, closing session");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }
}

impl Actor for WsSession {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        self.heartbeat(ctx);

        // Forward subscription events into the mailbox. The task ends
        // when the broadcaster drops our sender on unsubscribe.
        let addr = ctx.address();
        if let Some(mut events) = self.events.take() {
            actix::spawn(async move {
                while let Some(event) = events.recv().await {
                    match serde_json::to_string(&event) {
                        Ok(frame) => addr.do_send(EventFrame(frame)),
                        Err(e) => log::error!("failed to serialize board event: {e}"),
                    }
                }
            });
        }
    }

    fn stopped(&mut self, _ctx: &mut Self::Context) {
        let state = self.state.clone();
        let id = self.subscriber_id;
        actix::spawn(async move {
            state.service.broadcaster().unsubscribe(id).await;
        });
    }
}

impl Handler<EventFrame> for WsSession {
    type Result = ();

    fn handle(&mut self, msg: EventFrame, ctx: &mut Self::Context) {
        ctx.text(msg.0);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for WsSession {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(payload)) => {
                self.hb = Instant::now();
                ctx.pong(&payload);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            // Clients only listen on this socket; inbound frames are ignored.
            Ok(_) => {}
            Err(e) => {
                log::debug!("ws protocol error, closing session: {e}");
                ctx.stop();
            }
        }
    }
}

/// Upgrades the connection and attaches it to the broadcaster.
/// New subscribers receive no replay; clients fetch `/posts` for the
/// historical state.
pub async fn board_updates(
    req: HttpRequest,
    stream: web::Payload,
    data: web::Data<AppState>,
) -> Result<HttpResponse, Error> {
    let (subscriber_id, events) = data.service.broadcaster().subscribe().await;
    ws::start(
        WsSession {
            state: data.clone(),
            subscriber_id,
            events: Some(events),
            hb: Instant::now(),
        },
        &req,
        stream,
    )
}
