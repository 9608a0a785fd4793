//! User preferences and the stored embedding credential.

pub mod handlers;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub theme: String,
    pub notifications: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            notifications: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_preferences_fill_defaults() {
        let prefs: Preferences = serde_json::from_str(r#"{"theme": "dark"}"#).unwrap();
        assert_eq!(prefs.theme, "dark");
        assert!(prefs.notifications);
    }
}
