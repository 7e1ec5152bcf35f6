//! Cookie consent decisions and persistence.
//!
//! The user's choice is a single string in browser storage. Absence means the
//! user has not decided yet and the banner is shown; any stored value counts
//! as a decision and keeps the banner hidden for good.

#[cfg(test)]
#[path = "consent_test.rs"]
mod consent_test;

use serde::Serialize;

/// A persisted consent decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsentValue {
    Granted,
    Refused,
}

impl ConsentValue {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Refused => "refused",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "granted" => Some(Self::Granted),
            "refused" => Some(Self::Refused),
            _ => None,
        }
    }
}

/// Key/value persistence for the consent record.
pub trait ConsentStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

/// State of one consent category in an analytics consent update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentState {
    Granted,
    Denied,
}

/// Flags passed to the analytics `consent` / `update` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ConsentFlags {
    pub ad_user_data: ConsentState,
    pub ad_personalization: ConsentState,
    pub ad_storage: ConsentState,
    pub analytics_storage: ConsentState,
}

impl ConsentFlags {
    /// Every category set to `state`.
    #[must_use]
    pub fn all(state: ConsentState) -> Self {
        Self { ad_user_data: state, ad_personalization: state, ad_storage: state, analytics_storage: state }
    }
}

/// Banner logic bound to a storage key.
#[derive(Debug, Clone)]
pub struct ConsentBanner {
    storage_key: String,
}

impl ConsentBanner {
    pub fn new(storage_key: impl Into<String>) -> Self {
        Self { storage_key: storage_key.into() }
    }

    /// The banner is shown only while no decision is stored.
    #[must_use]
    pub fn should_show(&self, store: &impl ConsentStore) -> bool {
        store.get(&self.storage_key).is_none()
    }

    /// The stored decision, if it is one this site wrote.
    #[must_use]
    pub fn stored(&self, store: &impl ConsentStore) -> Option<ConsentValue> {
        store.get(&self.storage_key).as_deref().and_then(ConsentValue::parse)
    }

    /// Persist acceptance and return the analytics update to send.
    pub fn accept(&self, store: &mut impl ConsentStore) -> ConsentFlags {
        store.set(&self.storage_key, ConsentValue::Granted.as_str());
        ConsentFlags::all(ConsentState::Granted)
    }

    /// Persist refusal. No analytics update is sent.
    pub fn reject(&self, store: &mut impl ConsentStore) {
        store.set(&self.storage_key, ConsentValue::Refused.as_str());
    }
}
