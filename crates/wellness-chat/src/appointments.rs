//! Appointment aggregation.
//!
//! Reconciles sparse per-date slot records into the current user's filtered,
//! chronologically relevant appointment list. Detail records are fetched with
//! a fan-out/fan-in barrier; a single failed fetch degrades that candidate to
//! default values instead of aborting the batch.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use futures::future::join_all;

use wellness_core::{Appointment, SlotDetail, SlotRecord, WellnessError};

use crate::error::DialogError;

/// Occupant field suffix in slot records (`9am_user` -> slot `9am`).
const OCCUPANT_SUFFIX: &str = "_user";

// =============================================================================
// Collaborator traits
// =============================================================================

/// Read access to the slot store. Implementations are external.
#[async_trait]
pub trait SlotStore: Send + Sync {
    /// All per-date slot records.
    async fn list_slot_records(&self) -> Result<Vec<SlotRecord>, WellnessError>;

    /// Detail record for one `(slot_name, date)` pair, if present.
    async fn slot_detail(
        &self,
        slot_name: &str,
        date: &str,
    ) -> Result<Option<SlotDetail>, WellnessError>;
}

/// Source of the current time.
pub trait Clock: Send + Sync {
    fn now(&self) -> NaiveDateTime;
}

// =============================================================================
// Aggregator
// =============================================================================

/// Builds a user's upcoming-appointment list from raw slot records.
pub struct AppointmentAggregator {
    store: Arc<dyn SlotStore>,
    clock: Arc<dyn Clock>,
}

impl AppointmentAggregator {
    pub fn new(store: Arc<dyn SlotStore>, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// All of the user's appointments at or after the current time.
    ///
    /// Candidates keep their enumeration order from the store; entries whose
    /// date/slot combination fails to parse are dropped. Only a failure of
    /// the record listing itself is an error.
    pub async fn upcoming(&self, user_id: &str) -> Result<Vec<Appointment>, DialogError> {
        let records = self.store.list_slot_records().await?;

        let candidates = scan_candidates(&records, user_id);
        tracing::debug!(count = candidates.len(), "Appointment candidates found");

        // Fan-out: one detail fetch per candidate, joined all-or-proceed.
        // A failed or absent detail degrades to defaults locally.
        let fetches = candidates.iter().map(|(date, slot)| {
            let store = Arc::clone(&self.store);
            async move {
                match store.slot_detail(slot, date).await {
                    Ok(Some(detail)) => detail,
                    Ok(None) => SlotDetail::default(),
                    Err(e) => {
                        tracing::warn!(
                            date = %date,
                            slot = %slot,
                            error = %e,
                            "Slot detail fetch failed — using defaults"
                        );
                        SlotDetail::default()
                    }
                }
            }
        });
        let details = join_all(fetches).await;

        let now = self.clock.now();
        let upcoming = candidates
            .into_iter()
            .zip(details)
            .filter_map(|((date, slot), detail)| {
                let when = parse_slot_datetime(&date, &slot)?;
                (when >= now).then(|| Appointment {
                    date,
                    time: slot,
                    status: detail.status,
                    doctor: detail.doctor,
                })
            })
            .collect();

        Ok(upcoming)
    }
}

/// Scan slot records for `(date, slot_name)` pairs occupied by this user.
fn scan_candidates(records: &[SlotRecord], user_id: &str) -> Vec<(String, String)> {
    let mut candidates = Vec::new();
    for record in records {
        for (key, value) in &record.fields {
            if let Some(slot) = key.strip_suffix(OCCUPANT_SUFFIX) {
                if value == user_id {
                    candidates.push((record.date.clone(), slot.to_string()));
                }
            }
        }
    }
    candidates
}

/// Combine a `YYYY-MM-DD` date key and a 12-hour slot name (`9am`, `12:30pm`)
/// into a point in time. Returns `None` for anything unparseable.
pub fn parse_slot_datetime(date: &str, slot: &str) -> Option<NaiveDateTime> {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()?;

    let slot = slot.trim().to_lowercase();
    let (clock, pm) = if let Some(rest) = slot.strip_suffix("am") {
        (rest, false)
    } else if let Some(rest) = slot.strip_suffix("pm") {
        (rest, true)
    } else {
        return None;
    };

    let (hour_str, minute_str) = match clock.trim().split_once(':') {
        Some((h, m)) => (h, m),
        None => (clock.trim(), "0"),
    };
    let hour: u32 = hour_str.parse().ok()?;
    let minute: u32 = minute_str.parse().ok()?;
    if !(1..=12).contains(&hour) {
        return None;
    }

    // 12-hour to 24-hour: 12am -> 00, 12pm -> 12.
    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    };

    let time = NaiveTime::from_hms_opt(hour, minute, 0)?;
    Some(date.and_time(time))
}

/// Render the numbered upcoming-appointment list.
pub fn format_upcoming(appointments: &[Appointment]) -> String {
    let mut text = String::from("📅 **Your Upcoming Appointments:**\n\n");
    for (idx, app) in appointments.iter().enumerate() {
        text.push_str(&format!("{}. **{}** at **{}**\n", idx + 1, app.date, app.time));
        text.push_str(&format!("   Doctor: {}\n", app.doctor));
        text.push_str(&format!("   Status: {}\n\n", app.status));
    }
    text
}
