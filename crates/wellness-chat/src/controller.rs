//! Dialog controller: the state machine at the root of the dialog engine.
//!
//! Owns the conversation mode, the busy flag, and the timeline; interprets
//! button actions and free-text input; and routes work to the FAQ matcher,
//! the appointment aggregator, or the AI query adapter.

use std::sync::Arc;

use wellness_core::config::{ChatConfig, ContactConfig};
use wellness_core::{Action, Appointment, ButtonOption, Event, Message, Mode};

use crate::ai::AiQueryAdapter;
use crate::appointments::{format_upcoming, AppointmentAggregator};
use crate::error::DialogError;
use crate::faq::{FaqCatalog, HOURS_QUERY, INSURANCE_QUERY, SERVICES_QUERY};
use crate::timeline::Timeline;

// =============================================================================
// Collaborator traits
// =============================================================================

/// Source of the authenticated user's identifier.
pub trait Identity: Send + Sync {
    fn current_user_id(&self) -> Option<String>;
}

/// Phone dialing collaborator. Fire-and-forget; the core consumes no result.
pub trait Telephony: Send + Sync {
    fn dial(&self, number: &str);
}

// =============================================================================
// Message text
// =============================================================================

const GREETING: &str = "👋 Hello! I'm your Wellness Assistant. How can I help you today?";

const MENU_PROMPT: &str = "How can I help you?";

const BOOKING_INSTRUCTIONS: &str = "📅 To book an appointment, please use the **Calendar Schedule** feature in the app.\n\nYou can:\n1. Select your preferred date\n2. Choose an available time slot\n3. Fill in your health information\n\nWould you like me to help with anything else?";

const AI_INTRO: &str = "💬 **AI Mental Health Assistant**\n\nI'm here to provide support and advice. Feel free to ask me about:\n\n• Stress management\n• Anxiety or depression\n• Coping strategies\n• Self-care tips\n• Study-life balance\n\n**Type your question below:**";

const FAQ_INTRO: &str = "❓ **Frequently Asked Questions**\n\nType your question, such as:\n\n• What are your hours?\n• Where are you located?\n• What services do you offer?\n• Do you accept insurance?\n• How do I cancel an appointment?\n\n**Or choose an option:**";

const LOGIN_PROMPT: &str = "Please log in to view your appointments.";

const NO_APPOINTMENTS: &str =
    "You don't have any upcoming appointments. Would you like to book one?";

const APPOINTMENTS_APOLOGY: &str =
    "Sorry, I had trouble fetching your appointments. Please try again.";

fn menu_button() -> ButtonOption {
    ButtonOption::new("🏠 Main Menu", Action::Menu)
}

fn root_menu_buttons() -> Vec<ButtonOption> {
    vec![
        ButtonOption::new("📅 My Appointments", Action::Appointments),
        ButtonOption::new("🗓️ Book Appointment", Action::Book),
        ButtonOption::new("📞 Contact Info", Action::Contacts),
        ButtonOption::new("💬 Mental Health Advice (AI)", Action::AiQuery),
        ButtonOption::new("❓ FAQs", Action::Faq),
    ]
}

// =============================================================================
// DialogController
// =============================================================================

/// Root of the dialog engine: one instance per conversation session.
///
/// Constructing the controller emits the greeting with the five root actions
/// and enters menu mode. All further interaction flows through
/// [`handle_event`](Self::handle_event) or
/// [`handle_raw_action`](Self::handle_raw_action).
pub struct DialogController {
    timeline: Timeline,
    mode: Mode,
    busy: bool,
    faq: FaqCatalog,
    aggregator: AppointmentAggregator,
    ai: AiQueryAdapter,
    identity: Arc<dyn Identity>,
    telephony: Arc<dyn Telephony>,
    contact: ContactConfig,
    max_message_length: usize,
}

impl DialogController {
    pub fn new(
        aggregator: AppointmentAggregator,
        ai: AiQueryAdapter,
        identity: Arc<dyn Identity>,
        telephony: Arc<dyn Telephony>,
        contact: ContactConfig,
        chat: ChatConfig,
    ) -> Self {
        let mut controller = Self {
            timeline: Timeline::new(),
            mode: Mode::Menu,
            busy: false,
            faq: FaqCatalog::default(),
            aggregator,
            ai,
            identity,
            telephony,
            contact,
            max_message_length: chat.max_message_length,
        };
        controller.timeline.append_bot(GREETING, root_menu_buttons());
        controller
    }

    /// The timeline as a read-only ordered sequence, for rendering.
    pub fn messages(&self) -> &[Message] {
        self.timeline.messages()
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Input placeholder hint for the presentation layer, per mode.
    pub fn input_hint(&self) -> &'static str {
        match self.mode {
            Mode::AiQuery => "Ask about mental health...",
            Mode::Faq => "Type your question...",
            Mode::Menu => "Type a message...",
        }
    }

    /// Dispatch one inbound event.
    pub async fn handle_event(&mut self, event: Event) {
        match event {
            Event::Button(action) => self.on_action(action).await,
            Event::Submit(text) => self.submit_text(&text).await,
        }
    }

    /// Dispatch a raw action identifier from the presentation layer.
    ///
    /// Identifiers outside the action vocabulary mutate nothing.
    pub async fn handle_raw_action(&mut self, id: &str) {
        match id.parse::<Action>() {
            Ok(action) => self.on_action(action).await,
            Err(e) => tracing::debug!(error = %e, "Ignoring unknown action"),
        }
    }

    async fn on_action(&mut self, action: Action) {
        tracing::debug!(action = action.as_str(), "Handling action");
        match action {
            Action::Menu => {
                self.mode = Mode::Menu;
                self.timeline.append_bot(MENU_PROMPT, root_menu_buttons());
            }
            Action::Appointments => {
                self.timeline.append_user("Show my appointments");
                self.fetch_appointments().await;
            }
            Action::Book => {
                self.timeline.append_user("Book an appointment");
                self.timeline
                    .append_bot(BOOKING_INSTRUCTIONS, vec![menu_button()]);
            }
            Action::Contacts => {
                self.timeline.append_user("Show contact information");
                self.show_contacts();
            }
            Action::AiQuery => {
                self.mode = Mode::AiQuery;
                self.timeline.append_user("Talk to AI Assistant");
                self.timeline.append_bot(AI_INTRO, vec![menu_button()]);
            }
            Action::Faq => {
                self.mode = Mode::Faq;
                self.timeline.append_user("View FAQs");
                self.timeline.append_bot(
                    FAQ_INTRO,
                    vec![
                        ButtonOption::new("🕐 Hours & Location", Action::FaqHours),
                        ButtonOption::new("🏥 Services Offered", Action::FaqServices),
                        ButtonOption::new("💳 Insurance & Billing", Action::FaqInsurance),
                        menu_button(),
                    ],
                );
            }
            Action::FaqHours => {
                self.timeline.append_user("Hours and location");
                self.answer_faq(HOURS_QUERY);
            }
            Action::FaqServices => {
                self.timeline.append_user("Services offered");
                self.answer_faq(SERVICES_QUERY);
            }
            Action::FaqInsurance => {
                self.timeline.append_user("Insurance and billing");
                self.answer_faq(INSURANCE_QUERY);
            }
            Action::CallWellness => {
                let number = self.contact.wellness_dial.clone();
                self.telephony.dial(&number);
            }
            Action::Call911 => {
                self.telephony.dial("911");
            }
        }
    }

    /// Handle submitted free text.
    ///
    /// Rejected as a no-op when the trimmed input is empty, exceeds the
    /// length limit, or an async operation is in flight. Menu mode falls
    /// back to FAQ matching rather than rejecting unrecognized text.
    async fn submit_text(&mut self, text: &str) {
        let trimmed = text.trim();
        if trimmed.is_empty() || self.busy {
            return;
        }
        if trimmed.chars().count() > self.max_message_length {
            tracing::debug!(len = trimmed.chars().count(), "Rejecting over-length input");
            return;
        }

        let input = trimmed.to_string();
        self.timeline.append_user(&input);

        match self.mode {
            Mode::AiQuery => self.ask_ai(&input).await,
            Mode::Faq | Mode::Menu => self.answer_faq(&input),
        }
    }

    async fn ask_ai(&mut self, question: &str) {
        self.busy = true;
        self.timeline.show_typing();

        // The adapter absorbs every failure into displayable text.
        let answer = self.ai.ask(question).await;

        self.busy = false;
        self.timeline.append_bot(
            answer,
            vec![
                ButtonOption::new("💬 Ask Another Question", Action::AiQuery),
                menu_button(),
            ],
        );
    }

    async fn fetch_appointments(&mut self) {
        match self.try_fetch_appointments().await {
            Ok(list) if list.is_empty() => {
                self.timeline.append_bot(
                    NO_APPOINTMENTS,
                    vec![
                        ButtonOption::new("🗓️ Book Appointment", Action::Book),
                        menu_button(),
                    ],
                );
            }
            Ok(list) => {
                self.timeline.append_bot(
                    format_upcoming(&list),
                    vec![
                        ButtonOption::new("🗓️ Book Another", Action::Book),
                        menu_button(),
                    ],
                );
            }
            Err(DialogError::NotAuthenticated) => {
                self.timeline.append_bot(LOGIN_PROMPT, vec![menu_button()]);
            }
            Err(e) => {
                tracing::warn!(error = %e, "Appointment aggregation failed");
                self.timeline
                    .append_bot(APPOINTMENTS_APOLOGY, vec![menu_button()]);
            }
        }
    }

    /// Fetch the user's upcoming appointments behind the busy flag.
    ///
    /// The flag is set and the typing placeholder shown only once an
    /// authenticated user is known, and both are cleared on every exit path.
    async fn try_fetch_appointments(&mut self) -> Result<Vec<Appointment>, DialogError> {
        let user = self
            .identity
            .current_user_id()
            .ok_or(DialogError::NotAuthenticated)?;

        self.busy = true;
        self.timeline.show_typing();

        let result = self.aggregator.upcoming(&user).await;

        self.busy = false;
        self.timeline.hide_typing();
        result
    }

    fn answer_faq(&mut self, query: &str) {
        match self.faq.lookup(query) {
            Some(entry) => {
                let answer = entry.answer.clone();
                self.timeline.append_bot(
                    answer,
                    vec![
                        ButtonOption::new("❓ Ask Another FAQ", Action::Faq),
                        menu_button(),
                    ],
                );
            }
            None => {
                let fallback = format!(
                    "I don't have a specific answer for that. Would you like to:\n\n\
                     1. Try asking our AI assistant\n\
                     2. Contact us directly at {}\n\
                     3. Visit {}",
                    self.contact.wellness_phone, self.contact.website
                );
                self.timeline.append_bot(
                    fallback,
                    vec![
                        ButtonOption::new("💬 Ask AI Assistant", Action::AiQuery),
                        ButtonOption::new("📞 Contact Info", Action::Contacts),
                        menu_button(),
                    ],
                );
            }
        }
    }

    fn show_contacts(&mut self) {
        let mut text = String::from("📞 **Emergency Contacts:**\n\n");
        for contact in &self.contact.emergency_contacts {
            text.push_str(&format!("• {}: {}\n", contact.label, contact.phone));
        }
        text.push_str(&format!(
            "\n🏥 **Wellness Services:**\nPhone: {}\nLocation: {}\n\n\
             For full staff directory, visit the Contact section in the app.",
            self.contact.wellness_phone, self.contact.location
        ));

        self.timeline.append_bot(
            text,
            vec![
                ButtonOption::new("📞 Call Wellness Services", Action::CallWellness),
                ButtonOption::new("🚨 Call 911", Action::Call911),
                menu_button(),
            ],
        );
    }
}
