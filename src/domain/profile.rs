//! User profile editing and settings toggles.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::DeckError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskTolerance {
    Conservative,
    Moderate,
    Aggressive,
}

impl fmt::Display for RiskTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RiskTolerance::Conservative => "Conservative",
            RiskTolerance::Moderate => "Moderate",
            RiskTolerance::Aggressive => "Aggressive",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
    pub joined: NaiveDate,
    pub total_invested: String,
    pub total_returns: String,
    pub risk_tolerance: RiskTolerance,
}

impl UserProfile {
    /// "Member since" label, e.g. "March 2024".
    pub fn member_since(&self) -> String {
        self.joined.format("%B %Y").to_string()
    }

    /// Up to two initials from the name, for the avatar.
    pub fn initials(&self) -> String {
        let initials: String = self
            .name
            .split(|c: char| c.is_whitespace() || c == ',')
            .filter_map(|part| part.chars().find(|c| c.is_alphanumeric()))
            .take(2)
            .flat_map(|c| c.to_uppercase())
            .collect();
        if initials.is_empty() {
            "?".to_string()
        } else {
            initials
        }
    }
}

/// Saved profile plus an optional in-progress draft.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileEditor {
    saved: UserProfile,
    draft: Option<UserProfile>,
}

impl ProfileEditor {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            saved: profile,
            draft: None,
        }
    }

    pub fn saved(&self) -> &UserProfile {
        &self.saved
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// The draft while editing, otherwise the saved profile.
    pub fn current(&self) -> &UserProfile {
        self.draft.as_ref().unwrap_or(&self.saved)
    }

    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    pub fn set_name(&mut self, name: &str) {
        self.begin_edit();
        if let Some(draft) = self.draft.as_mut() {
            draft.name = name.to_string();
        }
    }

    pub fn set_email(&mut self, email: &str) {
        self.begin_edit();
        if let Some(draft) = self.draft.as_mut() {
            draft.email = email.to_string();
        }
    }

    /// Validates and commits the draft. A failed save keeps the draft.
    pub fn save(&mut self) -> Result<(), DeckError> {
        let Some(draft) = self.draft.as_ref() else {
            return Ok(());
        };
        let name = draft.name.trim();
        if name.is_empty() {
            return Err(DeckError::invalid_input("name", "must not be empty"));
        }
        let email = draft.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(DeckError::invalid_input("email", "must contain '@'"));
        }

        let mut committed = draft.clone();
        committed.name = name.to_string();
        committed.email = email.to_string();
        self.saved = committed;
        self.draft = None;
        Ok(())
    }

    /// Discards the draft.
    pub fn cancel(&mut self) {
        self.draft = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Setting {
    pub id: String,
    pub label: String,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSection {
    pub title: String,
    pub settings: Vec<Setting>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    sections: Vec<SettingsSection>,
}

impl Settings {
    pub fn new(sections: Vec<SettingsSection>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[SettingsSection] {
        &self.sections
    }

    pub fn get(&self, id: &str) -> Option<bool> {
        self.sections
            .iter()
            .flat_map(|s| s.settings.iter())
            .find(|s| s.id == id)
            .map(|s| s.enabled)
    }

    /// Flips a setting and returns its new value.
    pub fn toggle(&mut self, id: &str) -> Result<bool, DeckError> {
        let setting = self
            .sections
            .iter_mut()
            .flat_map(|s| s.settings.iter_mut())
            .find(|s| s.id == id)
            .ok_or_else(|| DeckError::UnknownSetting { id: id.to_string() })?;
        setting.enabled = !setting.enabled;
        Ok(setting.enabled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile() -> UserProfile {
        UserProfile {
            name: "James Doe".into(),
            email: "james@email.com".into(),
            joined: NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            total_invested: "$90,000.00".into(),
            total_returns: "+$8,081.75".into(),
            risk_tolerance: RiskTolerance::Moderate,
        }
    }

    fn settings() -> Settings {
        Settings::new(vec![SettingsSection {
            title: "Notifications".into(),
            settings: vec![
                Setting {
                    id: "pushNotifications".into(),
                    label: "Push Notifications".into(),
                    enabled: true,
                },
                Setting {
                    id: "performanceAlerts".into(),
                    label: "Performance Alerts".into(),
                    enabled: false,
                },
            ],
        }])
    }

    #[test]
    fn member_since_and_initials() {
        let p = profile();
        assert_eq!(p.member_since(), "March 2024");
        assert_eq!(p.initials(), "JD");

        let mut masked = profile();
        masked.name = "----, ----".into();
        assert_eq!(masked.initials(), "?");
    }

    #[test]
    fn save_commits_draft() {
        let mut editor = ProfileEditor::new(profile());
        editor.begin_edit();
        editor.set_name("  Jane Roe ");
        editor.set_email("jane@example.com");
        assert!(editor.is_editing());
        assert_eq!(editor.saved().name, "James Doe");

        editor.save().unwrap();
        assert!(!editor.is_editing());
        assert_eq!(editor.saved().name, "Jane Roe");
        assert_eq!(editor.current().email, "jane@example.com");
    }

    #[test]
    fn cancel_discards_draft() {
        let mut editor = ProfileEditor::new(profile());
        editor.set_name("Someone Else");
        editor.cancel();
        assert_eq!(editor.current(), &profile());
    }

    #[test]
    fn invalid_email_keeps_draft() {
        let mut editor = ProfileEditor::new(profile());
        editor.set_email("not-an-email");
        let err = editor.save().unwrap_err();
        assert!(matches!(err, DeckError::InvalidInput { ref field, .. } if field == "email"));
        assert!(editor.is_editing());
        assert_eq!(editor.saved().email, "james@email.com");
    }

    #[test]
    fn empty_name_rejected() {
        let mut editor = ProfileEditor::new(profile());
        editor.set_name("   ");
        assert!(editor.save().is_err());
    }

    #[test]
    fn save_without_edit_is_noop() {
        let mut editor = ProfileEditor::new(profile());
        editor.save().unwrap();
        assert_eq!(editor.saved(), &profile());
    }

    #[test]
    fn toggle_flips_setting() {
        let mut s = settings();
        assert_eq!(s.toggle("performanceAlerts").unwrap(), true);
        assert_eq!(s.get("performanceAlerts"), Some(true));
        assert_eq!(s.toggle("performanceAlerts").unwrap(), false);
    }

    #[test]
    fn toggle_unknown_setting_errors() {
        let mut s = settings();
        let err = s.toggle("darkMode").unwrap_err();
        assert!(matches!(err, DeckError::UnknownSetting { id } if id == "darkMode"));
    }
}
