//! In-process change feed: WebSocket subscribers grouped by topic.

pub mod scheduler;

use actix_web::{web, HttpRequest, HttpResponse};
use actix_ws::Message;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use tokio::sync::mpsc;

use crate::models::meeting::MeetingStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topic {
    /// Status changes across the whole schedule.
    Schedule,
    /// Attendance changes for one meeting.
    Meeting(i64),
}

pub type ConnectionMap = Arc<RwLock<HashMap<Topic, Vec<mpsc::UnboundedSender<String>>>>>;

#[derive(Clone, Default)]
pub struct Hub {
    connections: ConnectionMap,
}

impl Hub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber; the receiver yields every message published to `topic`.
    pub fn subscribe(&self, topic: Topic) -> mpsc::UnboundedReceiver<String> {
        let (tx, rx) = mpsc::unbounded_channel::<String>();
        let mut map = self.connections.write().unwrap_or_else(|e| e.into_inner());
        map.entry(topic).or_default().push(tx);
        rx
    }

    /// Send to every live subscriber of `topic`. Returns how many received it.
    pub fn publish(&self, topic: Topic, message: &str) -> usize {
        let map = match self.connections.read() {
            Ok(m) => m,
            Err(_) => return 0,
        };
        map.get(&topic)
            .map(|senders| {
                senders
                    .iter()
                    .filter(|s| s.send(message.to_string()).is_ok())
                    .count()
            })
            .unwrap_or(0)
    }

    /// Drop closed senders for `topic`.
    pub fn prune(&self, topic: Topic) {
        if let Ok(mut map) = self.connections.write() {
            if let Some(senders) = map.get_mut(&topic) {
                senders.retain(|s| !s.is_closed());
                if senders.is_empty() {
                    map.remove(&topic);
                }
            }
        }
    }

    pub fn subscriber_count(&self, topic: Topic) -> usize {
        self.connections
            .read()
            .map(|m| m.get(&topic).map_or(0, |s| s.len()))
            .unwrap_or(0)
    }
}

/// Tell detail pages of `meeting_id` to re-fetch their attendee list.
pub fn notify_attendees_changed(hub: &Hub, meeting_id: i64, attendee_count: i64) {
    let msg = serde_json::json!({
        "type": "attendees_changed",
        "meeting_id": meeting_id,
        "attendee_count": attendee_count,
    });
    hub.publish(Topic::Meeting(meeting_id), &msg.to_string());
}

/// Tell schedule pages that a meeting's status moved.
pub fn notify_status_changed(hub: &Hub, meeting_id: i64, status: MeetingStatus) {
    let msg = serde_json::json!({
        "type": "status_changed",
        "meeting_id": meeting_id,
        "status": status.as_str(),
        "label": status.label(),
    });
    hub.publish(Topic::Schedule, &msg.to_string());
}

/// Any create, edit or delete: schedule pages should reload their list.
pub fn notify_schedule_changed(hub: &Hub, meeting_id: i64) {
    let msg = serde_json::json!({
        "type": "schedule_changed",
        "meeting_id": meeting_id,
    });
    hub.publish(Topic::Schedule, &msg.to_string());
}

/// Upgrade the request and forward `topic` messages to the socket until it closes.
pub fn serve(req: &HttpRequest, body: web::Payload, hub: &Hub, topic: Topic) -> Result<HttpResponse, actix_web::Error> {
    let (response, mut ws_session, mut msg_stream) = actix_ws::handle(req, body)?;
    let mut rx = hub.subscribe(topic);
    let hub = hub.clone();

    actix_web::rt::spawn(async move {
        loop {
            tokio::select! {
                Some(msg) = rx.recv() => {
                    if ws_session.text(msg).await.is_err() {
                        break;
                    }
                }
                Some(Ok(msg)) = msg_stream.recv() => {
                    match msg {
                        Message::Ping(bytes) => {
                            if ws_session.pong(&bytes).await.is_err() {
                                break;
                            }
                        }
                        Message::Close(_) => break,
                        // clients only listen
                        _ => {}
                    }
                }
                else => break,
            }
        }

        drop(rx);
        hub.prune(topic);
    });

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn publish_reaches_only_the_topic() {
        let hub = Hub::new();
        let mut a = hub.subscribe(Topic::Meeting(1));
        let mut b = hub.subscribe(Topic::Meeting(2));

        notify_attendees_changed(&hub, 1, 3);

        let msg: serde_json::Value = serde_json::from_str(&a.recv().await.unwrap()).unwrap();
        assert_eq!(msg["type"], "attendees_changed");
        assert_eq!(msg["attendee_count"], 3);
        assert!(b.try_recv().is_err());
    }

    #[tokio::test]
    async fn status_changes_go_to_the_schedule() {
        let hub = Hub::new();
        let mut rx = hub.subscribe(Topic::Schedule);
        notify_status_changed(&hub, 9, MeetingStatus::Ongoing);
        let msg: serde_json::Value = serde_json::from_str(&rx.recv().await.unwrap()).unwrap();
        assert_eq!(msg["meeting_id"], 9);
        assert_eq!(msg["status"], "ongoing");
    }

    #[test]
    fn closed_subscribers_are_pruned() {
        let hub = Hub::new();
        let rx = hub.subscribe(Topic::Schedule);
        let _keep = hub.subscribe(Topic::Schedule);
        assert_eq!(hub.subscriber_count(Topic::Schedule), 2);

        drop(rx);
        assert_eq!(hub.publish(Topic::Schedule, "x"), 1);
        hub.prune(Topic::Schedule);
        assert_eq!(hub.subscriber_count(Topic::Schedule), 1);
    }

    #[test]
    fn publish_without_subscribers_is_a_no_op() {
        assert_eq!(Hub::new().publish(Topic::Meeting(5), "x"), 0);
    }
}
