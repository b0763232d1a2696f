use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// Enums
// =============================================================================

/// Who authored a timeline message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Bot,
}

/// Symbolic action identifiers carried by buttons and raw presentation events.
///
/// The wire form is the snake_case identifier (`ai_query`, `faq_hours`, ...).
/// Strings outside this vocabulary fail to parse, which the controller treats
/// as a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Menu,
    Appointments,
    Book,
    Contacts,
    AiQuery,
    Faq,
    FaqHours,
    FaqServices,
    FaqInsurance,
    CallWellness,
    #[serde(rename = "call_911")]
    Call911,
}

impl Action {
    /// The wire identifier for this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Menu => "menu",
            Action::Appointments => "appointments",
            Action::Book => "book",
            Action::Contacts => "contacts",
            Action::AiQuery => "ai_query",
            Action::Faq => "faq",
            Action::FaqHours => "faq_hours",
            Action::FaqServices => "faq_services",
            Action::FaqInsurance => "faq_insurance",
            Action::CallWellness => "call_wellness",
            Action::Call911 => "call_911",
        }
    }
}

/// Error returned when an action identifier is not in the vocabulary.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unknown action: {0}")]
pub struct UnknownAction(pub String);

impl FromStr for Action {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "menu" => Ok(Action::Menu),
            "appointments" => Ok(Action::Appointments),
            "book" => Ok(Action::Book),
            "contacts" => Ok(Action::Contacts),
            "ai_query" => Ok(Action::AiQuery),
            "faq" => Ok(Action::Faq),
            "faq_hours" => Ok(Action::FaqHours),
            "faq_services" => Ok(Action::FaqServices),
            "faq_insurance" => Ok(Action::FaqInsurance),
            "call_wellness" => Ok(Action::CallWellness),
            "call_911" => Ok(Action::Call911),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

/// The dialog controller's interpretation context for free-text input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// Root menu; free text falls back to FAQ matching.
    #[default]
    Menu,
    /// Free text is forwarded to the AI text service.
    AiQuery,
    /// Free text is matched against the FAQ catalog.
    Faq,
}

// =============================================================================
// Messages
// =============================================================================

/// A clickable option attached to a bot message. Immutable once created.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ButtonOption {
    /// Display label shown to the user.
    pub label: String,
    /// Symbolic action fired when pressed.
    pub action: Action,
    /// Optional opaque payload for the presentation layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ButtonOption {
    pub fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
            data: None,
        }
    }
}

/// One entry in the conversation timeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique, creation-ordered identifier.
    pub id: u64,
    pub sender: Sender,
    /// Message body; empty only for the typing placeholder.
    pub text: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub buttons: Vec<ButtonOption>,
    /// Transient placeholder for a pending asynchronous response.
    #[serde(default)]
    pub is_typing: bool,
}

/// An inbound presentation-layer event. The controller's entire input surface.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A button was pressed.
    Button(Action),
    /// Free text was submitted.
    Submit(String),
}

// =============================================================================
// Slot data
// =============================================================================

/// A raw per-date slot document from the slot store.
///
/// Occupant fields use the key form `<slot>_user` (e.g. `9am_user`) with the
/// occupant's identifier as the value.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotRecord {
    /// Date key in `YYYY-MM-DD` form.
    pub date: String,
    /// Field map; keys ending in `_user` mark occupied slots.
    pub fields: BTreeMap<String, String>,
}

/// Supplementary status/doctor data for one occupied slot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotDetail {
    pub status: String,
    pub doctor: String,
}

impl Default for SlotDetail {
    fn default() -> Self {
        Self {
            status: "booked".to_string(),
            doctor: "Not assigned".to_string(),
        }
    }
}

/// A derived upcoming appointment. Request-scoped; never persisted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub date: String,
    /// Slot name, e.g. `9am` or `2:30pm`.
    pub time: String,
    pub status: String,
    pub doctor: String,
}
