use super::*;
use prl_core::ID;

/// JWT payload asserting a member identity.
///
/// Deliberately carries no `exp` claim: tokens stay valid until the signing
/// secret rotates. Revocation is traded away for a fully stateless server.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Claims {
    pub sub: uuid::Uuid,
    pub usr: String,
    pub iat: i64,
}

impl Claims {
    pub fn new(user: ID<Member>, username: String) -> Self {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .expect("time")
            .as_secs() as i64;
        Self {
            sub: user.inner(),
            usr: username,
            iat: now,
        }
    }
    pub fn user(&self) -> ID<Member> {
        ID::from(self.sub)
    }
    pub fn username(&self) -> &str {
        &self.usr
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claims_carry_identity() {
        let id: ID<Member> = ID::default();
        let claims = Claims::new(id, "alice".to_string());
        assert_eq!(claims.user(), id);
        assert_eq!(claims.username(), "alice");
    }
}
