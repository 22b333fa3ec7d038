use super::*;
use prl_core::ID;
use prl_core::Unique;
use prl_pg::*;
use std::sync::Arc;
use tokio_postgres::Client;

/// Repository trait for credential storage.
/// Abstracts SQL from domain modules; records are create-and-lookup only.
#[allow(async_fn_in_trait)]
pub trait AuthRepository {
    async fn exists(&self, username: &str) -> Result<bool, PgErr>;
    async fn create(&self, member: &Member, hashword: &str) -> Result<(), PgErr>;
    async fn lookup(&self, username: &str) -> Result<Option<(Member, String)>, PgErr>;
}

impl AuthRepository for Arc<Client> {
    async fn exists(&self, username: &str) -> Result<bool, PgErr> {
        self.query_opt(
            const_format::concatcp!("SELECT 1 FROM ", USERS, " WHERE username = $1"),
            &[&username],
        )
        .await
        .map(|opt| opt.is_some())
    }

    async fn create(&self, member: &Member, hashword: &str) -> Result<(), PgErr> {
        self.execute(
            const_format::concatcp!(
                "INSERT INTO ",
                USERS,
                " (id, username, hashword) VALUES ($1, $2, $3)"
            ),
            &[&member.id().inner(), &member.username(), &hashword],
        )
        .await
        .map(|_| ())
    }

    async fn lookup(&self, username: &str) -> Result<Option<(Member, String)>, PgErr> {
        self.query_opt(
            const_format::concatcp!(
                "SELECT id, username, hashword FROM ",
                USERS,
                " WHERE username = $1"
            ),
            &[&username],
        )
        .await
        .map(|opt| {
            opt.map(|row| {
                (
                    Member::new(
                        ID::from(row.get::<_, uuid::Uuid>(0)),
                        row.get::<_, String>(1),
                    ),
                    row.get::<_, String>(2),
                )
            })
        })
    }
}
