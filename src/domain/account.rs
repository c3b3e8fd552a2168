use serde::Serialize;

/// A messaging account connected to the desktop app.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Account {
    pub id: String,
    pub display_name: String,
    pub network: String,
}

impl Account {
    /// Builds an account, naming it after the user's full name, else username.
    pub fn new(id: String, network: String, full_name: &str, username: &str) -> Self {
        let display_name = if full_name.is_empty() {
            username.to_owned()
        } else {
            full_name.to_owned()
        };
        Self {
            id,
            display_name,
            network,
        }
    }
}
