//! Parlor server binary.
//!
//! Runs the HTTP server for accounts and real-time presence.

#[tokio::main]
async fn main() {
    prl_core::log();
    prl_server::run().await.unwrap();
}
