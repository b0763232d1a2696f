//! Deterministic FAQ keyword matcher.
//!
//! The catalog is an ordered list; lookup lowercases the query and returns
//! the first entry any of whose keywords occurs as a substring. Catalog
//! order is part of the contract — reordering changes which answer wins on
//! queries that match several entries.

/// One FAQ catalog entry: lowercase keyword substrings plus a canned answer.
#[derive(Debug, Clone)]
pub struct FaqEntry {
    pub keywords: Vec<String>,
    pub answer: String,
}

impl FaqEntry {
    pub fn new(keywords: &[&str], answer: &str) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_lowercase()).collect(),
            answer: answer.to_string(),
        }
    }

    /// Whether any keyword occurs in the (already lowercased) query.
    fn matches(&self, query: &str) -> bool {
        self.keywords.iter().any(|k| query.contains(k.as_str()))
    }
}

/// Ordered, read-only FAQ catalog.
#[derive(Debug, Clone)]
pub struct FaqCatalog {
    entries: Vec<FaqEntry>,
}

/// Canonical query phrase for the `faq_hours` shortcut.
pub const HOURS_QUERY: &str = "what are your hours";
/// Canonical query phrase for the `faq_services` shortcut.
pub const SERVICES_QUERY: &str = "what services do you offer";
/// Canonical query phrase for the `faq_insurance` shortcut.
pub const INSURANCE_QUERY: &str = "insurance and billing";

impl FaqCatalog {
    pub fn new(entries: Vec<FaqEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[FaqEntry] {
        &self.entries
    }

    /// Return the first entry matching the query, or `None`.
    ///
    /// Pure and deterministic: the same catalog and query always produce the
    /// same result.
    pub fn lookup(&self, query: &str) -> Option<&FaqEntry> {
        let normalized = query.to_lowercase();
        self.entries.iter().find(|e| e.matches(&normalized))
    }
}

impl Default for FaqCatalog {
    fn default() -> Self {
        Self::new(vec![
            FaqEntry::new(
                &["hours", "open", "timing", "schedule", "when open"],
                "🕐 **Wellness Services Hours:**\n\nMonday-Friday: 8:00 AM - 5:00 PM\nWeekends: Closed\n\nFor after-hours emergencies, please call 911 or visit Mosaic Medical Center Emergency Department.",
            ),
            FaqEntry::new(
                &["location", "address", "where", "find you", "directions"],
                "📍 **Location:**\n\nUniversity Wellness Services\n800 University Drive\nMaryville, MO 64468\n\nPhone: 660.562.1348",
            ),
            FaqEntry::new(
                &["services", "offer", "provide", "available", "what do you"],
                "🏥 **Our Services:**\n\n• Mental Health Counseling\n• Medical Consultations\n• Wellness Education\n• Health Screenings\n• Emergency Support\n\nWould you like to book an appointment?",
            ),
            FaqEntry::new(
                &["insurance", "cost", "payment", "billing", "price", "fee"],
                "💳 **Billing & Insurance:**\n\nWe accept most insurance plans. For specific questions about billing, please contact our Billing Coordinator, Linda Guess at:\n\n📞 660.562.1348\n✉️ lguess@nwmissouri.edu",
            ),
            FaqEntry::new(
                &["cancel", "reschedule", "change appointment"],
                "📅 **To Cancel or Reschedule:**\n\nPlease call us at 660.562.1348 or visit your Appointment History in the app to manage your bookings.",
            ),
            FaqEntry::new(
                &["confidential", "privacy", "private", "hipaa"],
                "🔒 **Privacy & Confidentiality:**\n\nAll services are strictly confidential and HIPAA-compliant. Your health information is protected and will not be shared without your consent, except as required by law.",
            ),
        ])
    }
}
