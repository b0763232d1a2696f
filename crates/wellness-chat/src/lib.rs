//! Dialog engine for the wellness assistant.
//!
//! Provides the conversation timeline, FAQ keyword matching, appointment
//! aggregation, the AI query adapter, and the dialog controller that ties
//! them together behind a two-event input surface.

pub mod ai;
pub mod appointments;
pub mod controller;
pub mod error;
pub mod faq;
pub mod timeline;

pub use ai::{AiQueryAdapter, AiServiceError, AiTextService};
pub use appointments::{AppointmentAggregator, Clock, SlotStore};
pub use controller::{DialogController, Identity, Telephony};
pub use error::DialogError;
pub use faq::{FaqCatalog, FaqEntry};
pub use timeline::Timeline;
