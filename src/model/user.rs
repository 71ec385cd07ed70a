//! Chat users.

/// A user of the bot, keyed by chat platform id.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct User {
    pub id: i64,
    pub chat_id: i64,
    pub username: String,
    pub full_name: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// Profile of a user seen for the first time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub chat_id: i64,
    pub username: String,
    pub full_name: String,
}

impl NewUser {
    /// Build from the chat profile; the full name is "first last", trimmed.
    pub fn new(chat_id: i64, username: &str, first_name: &str, last_name: &str) -> Self {
        Self {
            chat_id,
            username: username.to_string(),
            full_name: format!("{} {}", first_name, last_name).trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_name_is_trimmed() {
        assert_eq!(NewUser::new(1, "ada", "Ada", "Lovelace").full_name, "Ada Lovelace");
        assert_eq!(NewUser::new(1, "ada", "Ada", "").full_name, "Ada");
        assert_eq!(NewUser::new(1, "", "", "").full_name, "");
    }
}
