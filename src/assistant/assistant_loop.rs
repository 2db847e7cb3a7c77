//! Assistant — routes user input between the persona selector and the
//! persona flows, and runs the message loop against a channel.

use std::time::Duration;

use futures::StreamExt;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, error, info};

use crate::channels::{Channel, IncomingMessage, OutgoingResponse, StatusUpdate};
use crate::error::{Error, FlowError};
use crate::flow::{FlowResult, FlowSession, GuidedConversationController, SubmitOutcome};
use crate::personas::tables::is_custom_option;
use crate::personas::{replies, Persona, PersonaCatalog};

use super::submission::{resolve_option, Submission, SubmissionParser};

const HELP_TEXT: &str = "\
Answer each question by typing an option's number or text.
Commands:
  /menu           back to the assistant menu
  /switch <name>  talk to another assistant (travel, shopping, research, chat)
  /reset          start the current flow over
  /transcript     show the conversation so far
  /quit           exit";

const CUSTOM_ANSWER_PROMPT: &str = "Sure! Type your own answer.";

/// One user's conversation: the active persona (if any) and its session.
pub struct Assistant {
    controller: GuidedConversationController,
    catalog: PersonaCatalog,
    persona: Option<Persona>,
    session: FlowSession,
    rng: StdRng,
    typing_delay: Duration,
}

impl Assistant {
    /// Start on `initial`'s flow, or on the selector menu if `None`.
    pub fn new(
        controller: GuidedConversationController,
        catalog: PersonaCatalog,
        initial: Option<Persona>,
    ) -> Self {
        let table = match initial {
            Some(persona) => catalog.table(persona),
            None => catalog.selector(),
        };
        let session = controller.start_table(table);
        Self {
            controller,
            catalog,
            persona: initial,
            session,
            rng: StdRng::from_entropy(),
            typing_delay: Duration::ZERO,
        }
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    /// Cosmetic pause before each response. Applied only in [`run`](Self::run).
    pub fn with_typing_delay(mut self, delay: Duration) -> Self {
        self.typing_delay = delay;
        self
    }

    pub fn persona(&self) -> Option<Persona> {
        self.persona
    }

    pub fn session(&self) -> &FlowSession {
        &self.session
    }

    /// The opening prompt of the current session.
    pub fn greeting(&self) -> Vec<OutgoingResponse> {
        self.current_prompt().into_iter().collect()
    }

    /// Handle one line of user input. Returns `None` when the user quits.
    pub fn handle(&mut self, content: &str) -> Result<Option<Vec<OutgoingResponse>>, Error> {
        let responses = match SubmissionParser::parse(content) {
            Submission::Quit => return Ok(None),
            Submission::Help => vec![OutgoingResponse::text(HELP_TEXT)],
            Submission::Transcript => vec![OutgoingResponse::text(
                self.session.transcript().to_plain_text(),
            )],
            Submission::Reset => {
                self.controller.reset(&mut self.session);
                self.greeting()
            }
            Submission::Menu => self.back_to_menu(),
            Submission::Switch { target } => self.switch_command(&target),
            Submission::UserInput { content } => self.handle_input(&content)?,
        };
        Ok(Some(responses))
    }

    /// Run the message loop until the user quits, input ends, or Ctrl+C.
    pub async fn run(mut self, channel: &dyn Channel) -> Result<(), Error> {
        let mut stream = channel.start().await?;
        self.send(channel, None, self.greeting()).await?;
        info!(channel = channel.name(), persona = ?self.persona, "Assistant ready and listening");

        loop {
            let message = tokio::select! {
                biased;
                _ = tokio::signal::ctrl_c() => {
                    info!("Ctrl+C received, shutting down...");
                    break;
                }
                msg = stream.next() => {
                    match msg {
                        Some(m) => m,
                        None => {
                            info!("Input stream ended, shutting down...");
                            break;
                        }
                    }
                }
            };

            match self.handle(&message.content) {
                Ok(Some(responses)) => self.send(channel, Some(&message), responses).await?,
                Ok(None) => {
                    info!("Quit command received, exiting...");
                    break;
                }
                Err(e) => {
                    error!("Error handling message: {}", e);
                    channel
                        .respond(Some(&message), OutgoingResponse::text(format!("Error: {e}")))
                        .await?;
                }
            }
        }

        channel.shutdown().await?;
        Ok(())
    }

    async fn send(
        &self,
        channel: &dyn Channel,
        msg: Option<&IncomingMessage>,
        responses: Vec<OutgoingResponse>,
    ) -> Result<(), Error> {
        for response in responses {
            if !self.typing_delay.is_zero() {
                channel.send_status(StatusUpdate::Typing).await?;
                tokio::time::sleep(self.typing_delay).await;
            }
            channel.respond(msg, response).await?;
        }
        Ok(())
    }

    fn handle_input(&mut self, input: &str) -> Result<Vec<OutgoingResponse>, Error> {
        if self.session.is_complete() {
            return Ok(self.follow_up(input));
        }
        let Some(step) = self.session.current_step() else {
            return Ok(Vec::new());
        };

        let chosen = resolve_option(input, &step.options).to_string();
        let picked = chosen.trim();
        if step.allows_free_text && step.has_option(picked) && is_custom_option(picked) {
            return Ok(vec![OutgoingResponse::text(CUSTOM_ANSWER_PROMPT)]);
        }

        let answer = match self.persona {
            None if !chosen.trim().is_empty() => match Persona::from_selection(&chosen) {
                Ok(persona) => persona.menu_label().to_string(),
                Err(e) => {
                    debug!(error = %e, "Selector input matched no persona");
                    let options = step.options.clone();
                    return Ok(vec![
                        OutgoingResponse::text(replies::UNMATCHED_REQUEST).with_options(options),
                    ]);
                }
            },
            _ => chosen,
        };

        match self.controller.submit_answer(&mut self.session, &answer) {
            Ok(SubmitOutcome::Advanced { .. }) => Ok(self.greeting()),
            Ok(SubmitOutcome::Completed(result)) => self.on_completed(result),
            Err(e) if e.is_recoverable() => Ok(vec![self.rejection_hint(&e)]),
            Err(e) => Err(e.into()),
        }
    }

    fn on_completed(&mut self, result: FlowResult) -> Result<Vec<OutgoingResponse>, Error> {
        let Some(persona) = self.persona else {
            let first = self.session.table().first().id;
            let persona = Persona::from_selection(result.answer(first).unwrap_or_default())?;
            return Ok(self.switch_to(persona, persona.switch_notice().to_string()));
        };

        let (Some(message), Some(title)) = (persona.completion_message(), persona.summary_title())
        else {
            return Ok(self.canned_reply(persona));
        };

        let summary = result.to_markdown(title, |id| self.session.table().label(id));
        self.controller.acknowledge(&mut self.session, message);
        self.controller.acknowledge(&mut self.session, summary.clone());
        Ok(vec![OutgoingResponse::text(message), OutgoingResponse::text(summary)])
    }

    fn switch_to(&mut self, persona: Persona, notice: String) -> Vec<OutgoingResponse> {
        info!(persona = %persona, "Switching persona");
        self.persona = Some(persona);
        self.controller
            .restart_with(&mut self.session, self.catalog.table(persona));

        let mut responses = vec![OutgoingResponse::text(notice)];
        responses.extend(self.current_prompt());
        responses
    }

    fn switch_command(&mut self, target: &str) -> Vec<OutgoingResponse> {
        let names = Persona::ALL.map(|p| p.id()).join(", ");
        if target.is_empty() {
            return vec![OutgoingResponse::text(format!("Usage: /switch <{names}>"))];
        }
        let persona = match target
            .parse::<Persona>()
            .or_else(|_| Persona::from_selection(target))
        {
            Ok(persona) => persona,
            Err(e) => {
                debug!(error = %e, "Switch target matched no persona");
                return vec![OutgoingResponse::text(format!("{e}. Try one of: {names}"))];
            }
        };
        if self.persona == Some(persona) {
            return vec![OutgoingResponse::text(format!(
                "You're already talking to the {}.",
                persona.display_name()
            ))];
        }
        self.switch_to(persona, persona.switching_notice())
    }

    fn back_to_menu(&mut self) -> Vec<OutgoingResponse> {
        self.persona = None;
        self.controller
            .restart_with(&mut self.session, self.catalog.selector());
        let options = self
            .session
            .current_step()
            .map(|s| s.options.clone())
            .unwrap_or_default();
        vec![OutgoingResponse::text(replies::BACK_TO_MENU).with_options(options)]
    }

    fn follow_up(&mut self, input: &str) -> Vec<OutgoingResponse> {
        let Some(persona) = self.persona else {
            return self.greeting();
        };
        if input.trim().is_empty() {
            return Vec::new();
        }
        self.canned_reply(persona)
    }

    fn canned_reply(&mut self, persona: Persona) -> Vec<OutgoingResponse> {
        let reply = replies::follow_up(persona, &mut self.rng);
        self.controller.acknowledge(&mut self.session, reply);
        vec![OutgoingResponse::text(reply)]
    }

    fn rejection_hint(&self, err: &FlowError) -> OutgoingResponse {
        match err {
            FlowError::EmptyAnswer { .. } => {
                let options = self
                    .session
                    .current_step()
                    .map(|s| s.options.clone())
                    .unwrap_or_default();
                OutgoingResponse::text("Please enter an answer.").with_options(options)
            }
            FlowError::UnrecognizedOption { options, .. } => {
                OutgoingResponse::text("Please choose one of these options:").with_options(options.clone())
            }
            other => OutgoingResponse::text(other.to_string()),
        }
    }

    fn current_prompt(&self) -> Option<OutgoingResponse> {
        let step = self.session.current_step()?;
        Some(OutgoingResponse::text(step.prompt.clone()).with_options(step.options.clone()))
    }
}
