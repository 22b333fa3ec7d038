use prl_auth::Claims;
use prl_core::ID;
use prl_core::Unique;
use tokio::sync::mpsc::UnboundedSender;

/// Registry record pairing one open WebSocket with an optional identity.
///
/// Identity is fixed at seating time and never reassigned: there is no
/// re-auth over an existing channel. A seat with no identity is an
/// anonymous observer.
pub struct Seat {
    id: ID<Self>,
    user: Option<Claims>,
    tx: UnboundedSender<String>,
}

impl Seat {
    pub fn new(id: ID<Self>, user: Option<Claims>, tx: UnboundedSender<String>) -> Self {
        Self { id, user, tx }
    }
    pub fn user(&self) -> Option<&Claims> {
        self.user.as_ref()
    }
    /// Queues a payload for this seat's socket. A closed channel means the
    /// bridge task is tearing the seat down; dropping the send is fine.
    pub fn send(&self, json: String) {
        let _ = self.tx.send(json);
    }
}

impl Unique for Seat {
    fn id(&self) -> ID<Self> {
        self.id
    }
}
