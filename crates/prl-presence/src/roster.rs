use super::*;
use prl_auth::Claims;
use prl_core::ID;
use prl_core::Unique;
use tokio::sync::RwLock;
use tokio::sync::mpsc::UnboundedSender;

/// One entry of the broadcast online list.
/// Null fields mark a seat whose token was absent or failed verification.
#[derive(Debug, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnlineEntry {
    pub user_id: Option<uuid::Uuid>,
    pub username: Option<String>,
}

impl From<Option<&Claims>> for OnlineEntry {
    fn from(user: Option<&Claims>) -> Self {
        Self {
            user_id: user.map(|c| c.user().inner()),
            username: user.map(|c| c.username().to_string()),
        }
    }
}

#[derive(serde::Serialize)]
struct Snapshot {
    online: Vec<OnlineEntry>,
}

/// Registry of currently-open WebSocket connections.
///
/// Membership mirrors open sockets exactly: every join and leave goes
/// through here, and each pushes a fresh full snapshot of the online list
/// to every seat. Snapshots are full, never deltas, and are computed under
/// the write lock so each one reflects a membership that actually existed.
pub struct Roster {
    seats: RwLock<Vec<Seat>>,
}

impl Default for Roster {
    fn default() -> Self {
        Self::new()
    }
}

impl Roster {
    pub fn new() -> Self {
        Self {
            seats: RwLock::new(Vec::new()),
        }
    }
    /// Adds a connection and announces the new membership to everyone,
    /// the newcomer included.
    pub async fn join(&self, user: Option<Claims>, tx: UnboundedSender<String>) -> ID<Seat> {
        let id = ID::default();
        let mut seats = self.seats.write().await;
        match &user {
            Some(c) => log::info!("[roster] {} seated as {}", id, c.username()),
            None => log::info!("[roster] {} seated anonymously", id),
        }
        seats.push(Seat::new(id, user, tx));
        Self::announce(&seats);
        id
    }
    /// Drops a connection and announces the shrunk membership.
    pub async fn leave(&self, id: ID<Seat>) {
        let mut seats = self.seats.write().await;
        seats.retain(|seat| seat.id() != id);
        log::info!("[roster] {} left", id);
        Self::announce(&seats);
    }
    pub async fn len(&self) -> usize {
        self.seats.read().await.len()
    }
    /// Serializes the online list in seating order, duplicates and null
    /// entries included, and pushes the identical payload to every seat.
    fn announce(seats: &[Seat]) {
        let online: Vec<OnlineEntry> = seats.iter().map(|seat| seat.user().into()).collect();
        let payload =
            serde_json::to_string(&Snapshot { online }).expect("serialize online list");
        log::debug!("[roster] announcing to {} seats", seats.len());
        for seat in seats {
            seat.send(payload.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::UnboundedReceiver;
    use tokio::sync::mpsc::unbounded_channel;

    fn alice() -> Claims {
        Claims::new(ID::default(), "alice".to_string())
    }

    /// Drains everything queued on a seat's channel and parses the last
    /// payload, which is the snapshot that seat currently sees.
    fn last(rx: &mut UnboundedReceiver<String>) -> serde_json::Value {
        let mut latest = None;
        while let Ok(json) = rx.try_recv() {
            latest = Some(json);
        }
        serde_json::from_str(&latest.expect("no broadcast received")).unwrap()
    }

    fn online(snapshot: &serde_json::Value) -> &Vec<serde_json::Value> {
        snapshot["online"].as_array().unwrap()
    }

    #[tokio::test]
    async fn anonymous_seat_receives_broadcasts() {
        let roster = Roster::new();
        let (tx, mut rx) = unbounded_channel();
        roster.join(None, tx).await;
        let snapshot = last(&mut rx);
        assert_eq!(online(&snapshot).len(), 1);
        assert!(snapshot["online"][0]["userId"].is_null());
        assert!(snapshot["online"][0]["username"].is_null());
    }

    #[tokio::test]
    async fn snapshot_orders_by_seating() {
        let roster = Roster::new();
        let claims = alice();
        let (tx1, mut rx1) = unbounded_channel();
        let (tx2, mut rx2) = unbounded_channel();
        roster.join(Some(claims.clone()), tx1).await;
        roster.join(None, tx2).await;
        for rx in [&mut rx1, &mut rx2] {
            let snapshot = last(rx);
            let list = online(&snapshot);
            assert_eq!(list.len(), 2);
            assert_eq!(list[0]["username"], "alice");
            assert_eq!(list[0]["userId"], claims.sub.to_string());
            assert!(list[1]["username"].is_null());
        }
    }

    #[tokio::test]
    async fn leave_announces_to_remainder() {
        let roster = Roster::new();
        let (tx1, mut rx1) = unbounded_channel();
        let (tx2, _rx2) = unbounded_channel();
        roster.join(Some(alice()), tx1).await;
        let second = roster.join(None, tx2).await;
        roster.leave(second).await;
        let snapshot = last(&mut rx1);
        assert_eq!(online(&snapshot).len(), 1);
        assert_eq!(roster.len().await, 1);
    }

    #[tokio::test]
    async fn duplicate_identities_are_not_deduplicated() {
        let roster = Roster::new();
        let claims = alice();
        let (tx1, _rx1) = unbounded_channel();
        let (tx2, mut rx2) = unbounded_channel();
        roster.join(Some(claims.clone()), tx1).await;
        roster.join(Some(claims), tx2).await;
        let snapshot = last(&mut rx2);
        let list = online(&snapshot);
        assert_eq!(list.len(), 2);
        assert_eq!(list[0]["username"], "alice");
        assert_eq!(list[1]["username"], "alice");
    }

    #[tokio::test]
    async fn closed_channel_does_not_poison_broadcast() {
        let roster = Roster::new();
        let (tx1, rx1) = unbounded_channel();
        let (tx2, mut rx2) = unbounded_channel();
        roster.join(None, tx1).await;
        drop(rx1);
        roster.join(None, tx2).await;
        assert_eq!(online(&last(&mut rx2)).len(), 2);
    }
}
