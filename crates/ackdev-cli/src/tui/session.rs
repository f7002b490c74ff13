//! Session loop
//!
//! One message per tick: a pending deferred intent if there is one,
//! otherwise the next input from the event source. The loop owns the
//! document and hands it back in the [`SessionReport`].

use std::collections::VecDeque;

use ackdev_types::GeneratorConfig;
use anyhow::Result;
use ratatui::{Terminal, backend::Backend};
use tracing::{debug, info};

use super::error::NavigationError;
use super::events::EventSource;
use super::intent::{Deferred, Flow, Message, SessionOutcome};
use super::navigation::Navigator;

#[derive(Debug)]
pub struct SessionReport {
    pub outcome: SessionOutcome,
    pub document: GeneratorConfig,
}

pub struct Session {
    navigator: Navigator,
    document: GeneratorConfig,
    pending: VecDeque<Deferred>,
    capacity: usize,
}

impl Session {
    pub fn new(navigator: Navigator, document: GeneratorConfig, capacity: usize) -> Self {
        Self {
            navigator,
            document,
            pending: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    pub fn run<B: Backend>(
        mut self,
        terminal: &mut Terminal<B>,
        source: &mut dyn EventSource,
    ) -> Result<SessionReport> {
        info!("Session started for {}", self.navigator.service());

        let size = terminal.size()?;
        let mut next = Some(Message::Resize {
            width: size.width,
            height: size.height,
        });

        let outcome = loop {
            let message = match next.take() {
                Some(message) => message,
                None => match self.pending.pop_front() {
                    Some(deferred) => deferred(),
                    None => match source.next_message()? {
                        Some(message) => message,
                        None => {
                            info!("Input exhausted before the session finished");
                            break SessionOutcome::Aborted;
                        }
                    },
                },
            };

            if let Some(outcome) = self.step(message)? {
                break outcome;
            }
            terminal.draw(|f| self.navigator.render(f))?;
        };

        info!(
            "Session for {} ended: {:?}",
            self.navigator.service(),
            outcome
        );
        Ok(SessionReport {
            outcome,
            document: self.document,
        })
    }

    /// Dispatch one message and queue the deferred intents it yields.
    pub fn step(&mut self, message: Message) -> Result<Option<SessionOutcome>, NavigationError> {
        match self.navigator.update(message, &mut self.document)? {
            Flow::Exit(outcome) => Ok(Some(outcome)),
            Flow::Continue(deferred) => {
                for item in deferred {
                    if self.pending.len() >= self.capacity {
                        return Err(NavigationError::QueueOverflow {
                            capacity: self.capacity,
                        });
                    }
                    self.pending.push_back(item);
                }
                debug!("{} deferred intent(s) pending", self.pending.len());
                Ok(None)
            }
        }
    }
}
