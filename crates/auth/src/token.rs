use zeroize::{Zeroize, ZeroizeOnDrop};

/// Login name + submitted password, as handed over by the transport layer.
///
/// The password is wiped from memory when the token is dropped and never
/// appears in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct UsernamePasswordToken {
    username: String,
    password: Vec<u8>,
}

impl UsernamePasswordToken {
    pub fn new(username: impl Into<String>, password: impl Into<Vec<u8>>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &[u8] {
        &self.password
    }
}

impl core::fmt::Debug for UsernamePasswordToken {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("UsernamePasswordToken")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn debug_redacts_password() {
        let token = UsernamePasswordToken::new("alice", "hunter2");
        let rendered = format!("{token:?}");
        assert!(rendered.contains("alice"));
        assert!(!rendered.contains("hunter2"));
    }

    #[test]
    fn zeroize_clears_both_fields() {
        let mut token = UsernamePasswordToken::new("alice", "hunter2");
        token.zeroize();
        assert!(token.username().is_empty());
        assert!(token.password().is_empty());
    }
}
