// Copyright (c) 2025 picomc-core contributors
// Licensed under the MIT License

//! The minimal account contract `LaunchComposer` substitutes into argument
//! placeholders. Persistent storage of accounts is an external collaborator
//! per the scope of this crate — `Account` is a value type only.

use serde::{Deserialize, Serialize};

use crate::UserProfile;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    Offline,
    Mojang,
    Microsoft,
}

impl AccountType {
    /// Value substituted into the `user_type` placeholder.
    pub fn user_type_value(&self) -> &'static str {
        match self {
            AccountType::Offline => "offline",
            AccountType::Mojang | AccountType::Microsoft => "mojang",
        }
    }

    /// Value substituted into the `version_type` placeholder.
    pub fn version_type_value(&self) -> &'static str {
        match self {
            AccountType::Offline => "picomc/offline",
            AccountType::Mojang | AccountType::Microsoft => "picomc",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub display_name: String,
    /// Hex, no dashes.
    pub uuid: String,
    pub access_token: Option<String>,
    pub account_type: AccountType,
}

impl Account {
    pub fn offline(display_name: impl Into<String>) -> Self {
        let display_name = display_name.into();
        let uuid = crate::generate_offline_uuid(&display_name);
        Self {
            display_name,
            uuid,
            access_token: None,
            account_type: AccountType::Offline,
        }
    }

    pub fn from_profile(profile: UserProfile, account_type: AccountType) -> Self {
        Self {
            display_name: profile.username,
            uuid: profile.uuid.replace('-', ""),
            access_token: profile.access_token,
            account_type,
        }
    }

    /// Access token placeholder value: the real token, or `-` offline.
    pub fn access_token_value(&self) -> &str {
        self.access_token.as_deref().unwrap_or("-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offline_account_has_offline_placeholders() {
        let account = Account::offline("Notch");
        assert_eq!(account.uuid, "069a79f444e94726a5befca90e38aaf5");
        assert_eq!(account.account_type.user_type_value(), "offline");
        assert_eq!(account.account_type.version_type_value(), "picomc/offline");
        assert_eq!(account.access_token_value(), "-");
    }
}
