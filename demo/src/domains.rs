use anyhow::Result;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

impl User {
    pub fn validate(&self) -> Result<()> {
        anyhow::ensure!(!self.name.trim().is_empty(), "name must not be empty");
        anyhow::ensure!(self.name.len() <= 100, "name must be at max 100 chars wide");

        let (local, domain) = self.email.split_once('@').unwrap_or_default();
        anyhow::ensure!(
            !local.is_empty() && domain.contains('.'),
            "email must look like user@example.com"
        );

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(name: &str, email: &str) -> User {
        User {
            id: Uuid::now_v7(),
            name: name.into(),
            email: email.into(),
        }
    }

    #[test]
    fn validation() {
        assert!(user("Billy", "billy@example.com").validate().is_ok());
        assert!(user(" ", "billy@example.com").validate().is_err());
        assert!(user(&"a".repeat(101), "billy@example.com").validate().is_err());
        assert!(user("Billy", "billy").validate().is_err());
        assert!(user("Billy", "@example.com").validate().is_err());
    }
}
