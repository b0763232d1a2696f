//! Wellness assistant binary - composition root.
//!
//! Ties the dialog engine to in-process collaborator implementations and
//! drives it from a stdin REPL:
//! 1. Parse CLI args and load configuration from TOML
//! 2. Wire the slot store, clock, identity, telephony, and AI collaborators
//! 3. Run the conversation loop, rendering timeline entries as they appear
//!
//! Input starting with `/` is treated as a raw action identifier
//! (e.g. `/appointments`, `/faq`); anything else is a text submit.
//! `/quit` exits.

mod cli;

use std::collections::BTreeMap;
use std::io::{BufRead, Write};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{Duration as ChronoDuration, Local, NaiveDateTime};
use clap::Parser;

use wellness_chat::{
    AiQueryAdapter, AiServiceError, AiTextService, AppointmentAggregator, Clock, DialogController,
    Identity, SlotStore, Telephony,
};
use wellness_core::{AssistantConfig, Sender, SlotDetail, SlotRecord, WellnessError};

// =============================================================================
// In-process collaborators
// =============================================================================

/// Slot store seeded with demo records so the appointments flow has data.
struct InMemorySlotStore {
    records: Vec<SlotRecord>,
    details: Vec<((String, String), SlotDetail)>,
}

impl InMemorySlotStore {
    /// Seed one appointment tomorrow and one three days out for `user`.
    fn seeded(user: &str) -> Self {
        let tomorrow = (Local::now() + ChronoDuration::days(1))
            .format("%Y-%m-%d")
            .to_string();
        let later = (Local::now() + ChronoDuration::days(3))
            .format("%Y-%m-%d")
            .to_string();

        let mut fields = BTreeMap::new();
        fields.insert("9am_user".to_string(), user.to_string());
        let first = SlotRecord {
            date: tomorrow.clone(),
            fields,
        };

        let mut fields = BTreeMap::new();
        fields.insert("2:30pm_user".to_string(), user.to_string());
        let second = SlotRecord {
            date: later,
            fields,
        };

        Self {
            records: vec![first, second],
            details: vec![(
                ("9am".to_string(), tomorrow),
                SlotDetail {
                    status: "confirmed".to_string(),
                    doctor: "Dr. Reyes".to_string(),
                },
            )],
        }
    }
}

#[async_trait]
impl SlotStore for InMemorySlotStore {
    async fn list_slot_records(&self) -> Result<Vec<SlotRecord>, WellnessError> {
        Ok(self.records.clone())
    }

    async fn slot_detail(
        &self,
        slot_name: &str,
        date: &str,
    ) -> Result<Option<SlotDetail>, WellnessError> {
        Ok(self
            .details
            .iter()
            .find(|((s, d), _)| s == slot_name && d == date)
            .map(|(_, detail)| detail.clone()))
    }
}

struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

struct StaticIdentity(Option<String>);

impl Identity for StaticIdentity {
    fn current_user_id(&self) -> Option<String> {
        self.0.clone()
    }
}

/// Telephony that logs instead of dialing. The core treats dialing as
/// fire-and-forget, so this is a complete implementation of the seam.
struct LoggingTelephony;

impl Telephony for LoggingTelephony {
    fn dial(&self, number: &str) {
        tracing::info!(number = %number, "Dialing");
        println!("  [dialing {number}...]");
    }
}

/// Stand-in AI text service returning a fixed supportive reply.
struct CannedAiService;

#[async_trait]
impl AiTextService for CannedAiService {
    async fn complete(&self, _prompt: &str) -> Result<String, AiServiceError> {
        Ok("Thank you for sharing that. Taking a short walk, writing down what's \
            on your mind, and keeping a regular sleep schedule can all help. If \
            things feel overwhelming, please reach out to campus counseling at \
            660.562.1348 — you don't have to handle this alone."
            .to_string())
    }
}

// =============================================================================
// Rendering
// =============================================================================

/// Print timeline entries appended since the last render.
fn render_new_messages(controller: &DialogController, printed: &mut usize) {
    // The typing placeholder never survives an event, so the timeline only
    // ever grows between renders.
    let start = (*printed).min(controller.messages().len());
    for msg in &controller.messages()[start..] {
        match msg.sender {
            Sender::User => println!("\nYou: {}", msg.text),
            Sender::Bot => {
                println!("\nBot: {}", msg.text);
                for btn in &msg.buttons {
                    println!("  [/{}] {}", btn.action.as_str(), btn.label);
                }
            }
        }
    }
    *printed = controller.messages().len();
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = cli::CliArgs::parse();

    // Config first, so the log level can come from it.
    let config_file = args.resolve_config_path();
    let config = AssistantConfig::load_or_default(&config_file);
    let log_level = args.resolve_log_level(&config.general.log_level);

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .init();

    tracing::info!("Starting wellness assistant v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Collaborators.
    let user = args.user.clone();
    let store = Arc::new(InMemorySlotStore::seeded(
        user.as_deref().unwrap_or("demo@nwmissouri.edu"),
    ));
    let clock = Arc::new(SystemClock);
    let aggregator = AppointmentAggregator::new(store, clock);

    let ai = AiQueryAdapter::new(
        Arc::new(CannedAiService),
        config.ai.model.clone(),
        Duration::from_secs(config.ai.request_timeout_secs),
        config.contact.wellness_phone.clone(),
    );
    tracing::info!(model = %ai.model(), "AI adapter ready");

    let mut controller = DialogController::new(
        aggregator,
        ai,
        Arc::new(StaticIdentity(user)),
        Arc::new(LoggingTelephony),
        config.contact.clone(),
        config.chat.clone(),
    );

    // Conversation loop.
    let mut printed = 0;
    render_new_messages(&controller, &mut printed);

    let stdin = std::io::stdin();
    loop {
        print!("\n({}) > ", controller.input_hint());
        std::io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let line = line.trim();

        if line == "/quit" {
            break;
        }
        if let Some(action_id) = line.strip_prefix('/') {
            controller.handle_raw_action(action_id).await;
        } else {
            controller
                .handle_event(wellness_core::Event::Submit(line.to_string()))
                .await;
        }

        render_new_messages(&controller, &mut printed);
    }

    tracing::info!("Session ended");
    Ok(())
}
