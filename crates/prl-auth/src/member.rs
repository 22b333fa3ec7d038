use prl_core::ID;
use prl_core::Unique;

/// Registered user with verified identity.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Member {
    id: ID<Self>,
    username: String,
}

impl Member {
    pub fn new(id: ID<Self>, username: String) -> Self {
        Self { id, username }
    }
    pub fn username(&self) -> &str {
        &self.username
    }
}

impl Unique for Member {
    fn id(&self) -> ID<Self> {
        self.id
    }
}

mod schema {
    use super::*;
    use prl_pg::*;

    /// Schema implementation for Member (users table).
    /// Note: hashword is a database-only column, not part of the Member
    /// domain type. Records are immutable after creation.
    impl Schema for Member {
        fn name() -> &'static str {
            USERS
        }
        fn creates() -> &'static str {
            const_format::concatcp!(
                "CREATE TABLE IF NOT EXISTS ",
                USERS,
                " (
                    id          UUID PRIMARY KEY,
                    username    VARCHAR(32) UNIQUE NOT NULL,
                    hashword    TEXT NOT NULL
                );"
            )
        }
        fn indices() -> &'static str {
            const_format::concatcp!(
                "CREATE INDEX IF NOT EXISTS idx_users_username ON ",
                USERS,
                " (username);"
            )
        }
    }
}
