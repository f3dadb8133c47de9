//! Interactive auth key acquisition.
//!
//! Signs in with the account email and password, lists the auth keys the
//! account can use and stores the chosen secret in the configuration file.
//! The flow is a small state machine: [`Flow::run`] advances one state at a
//! time until the flow is done or aborted.

use std::{
    io::{self, BufReader},
    ops::ControlFlow,
    path::PathBuf,
    time::Duration,
};

use tabled::Table;
use thiserror::Error;
use tracing::debug;

use crate::{
    Res,
    api::{ApiError, AuthKeysGetter, Client},
    config::{Config, ConfigError},
    management::{ConfigManager, ConfigWriter},
    terminal::{StdinPasswordReader, Terminal},
    types::{AuthKey, AuthKeySelectionRow, Credential},
};

pub const EXCHANGE_TIMEOUT: Duration = Duration::from_secs(30);

const EMAIL_PROMPT: &str = "Email: ";
const PASSWORD_PROMPT: &str = "Password: ";
const SELECT_PROMPT: &str = "Select auth key (enter row number): ";

/// Copy printed around the prompts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlowMessages {
    pub banner: String,
    pub no_keys_hint: String,
}

impl Default for FlowMessages {
    fn default() -> Self {
        FlowMessages {
            banner: "Sign in to NewReleases with your credentials\n\
                     to get available API keys and store them in local configuration file."
                .to_string(),
            no_keys_hint: "Go to https://newreleases.io and create an auth key.".to_string(),
        }
    }
}

#[derive(Debug, Error)]
pub enum FlowError {
    #[error(transparent)]
    Read(#[from] io::Error),

    #[error(transparent)]
    Exchange(#[from] ApiError),

    #[error(transparent)]
    Write(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// A key was stored.
    Done { name: String, path: PathBuf },
    /// Nothing was stored and nothing went wrong.
    Aborted,
}

#[derive(Debug)]
enum State {
    PromptEmail,
    PromptPassword { email: String },
    Exchange(Credential),
    Evaluate(Vec<AuthKey>),
    List(Vec<AuthKey>),
    Select(Vec<AuthKey>),
    Persist(AuthKey),
}

/// What the operator typed at the selection prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionInput {
    Empty,
    Invalid,
    /// Zero based index into the key list.
    Row(usize),
}

/// Interprets a selection line against a list of `count` keys.
///
/// Rows are numbered from 1. Anything that is not a number in `1..=count`
/// is invalid.
pub fn parse_selection(line: &str, count: usize) -> SelectionInput {
    let line = line.trim();
    if line.is_empty() {
        return SelectionInput::Empty;
    }

    match line.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => SelectionInput::Row(n - 1),
        _ => SelectionInput::Invalid,
    }
}

pub struct Flow<'a> {
    getter: &'a dyn AuthKeysGetter,
    writer: &'a dyn ConfigWriter,
    messages: FlowMessages,
    exchange_timeout: Duration,
}

impl<'a> Flow<'a> {
    pub fn new(getter: &'a dyn AuthKeysGetter, writer: &'a dyn ConfigWriter) -> Self {
        Flow {
            getter,
            writer,
            messages: FlowMessages::default(),
            exchange_timeout: EXCHANGE_TIMEOUT,
        }
    }

    pub fn with_messages(mut self, messages: FlowMessages) -> Self {
        self.messages = messages;
        self
    }

    pub fn with_exchange_timeout(mut self, timeout: Duration) -> Self {
        self.exchange_timeout = timeout;
        self
    }

    pub async fn run(&self, term: &mut Terminal<'_>) -> Result<Outcome, FlowError> {
        let mut state = State::PromptEmail;
        loop {
            match self.step(state, term).await? {
                ControlFlow::Continue(next) => state = next,
                ControlFlow::Break(outcome) => return Ok(outcome),
            }
        }
    }

    /// Advances one state. `Break` carries the final outcome.
    async fn step(
        &self,
        state: State,
        term: &mut Terminal<'_>,
    ) -> Result<ControlFlow<Outcome, State>, FlowError> {
        match state {
            State::PromptEmail => {
                term.println(&self.messages.banner)?;
                term.prompt(EMAIL_PROMPT)?;
                let email = term
                    .read_line()?
                    .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))?;
                Ok(ControlFlow::Continue(State::PromptPassword { email }))
            }

            State::PromptPassword { email } => {
                let password = term.read_password(PASSWORD_PROMPT)?;
                Ok(ControlFlow::Continue(State::Exchange(Credential {
                    email,
                    password,
                })))
            }

            State::Exchange(credential) => {
                debug!(timeout = ?self.exchange_timeout, "requesting auth keys");
                let keys = tokio::time::timeout(
                    self.exchange_timeout,
                    self.getter
                        .get_auth_keys(&credential.email, &credential.password),
                )
                .await
                .map_err(|_| ApiError::Timeout)??;
                debug!(count = keys.len(), "auth keys received");
                Ok(ControlFlow::Continue(State::Evaluate(keys)))
            }

            State::Evaluate(keys) => match keys.len() {
                0 => {
                    term.eprintln("No auth keys found.")?;
                    term.println(&self.messages.no_keys_hint)?;
                    Ok(ControlFlow::Break(Outcome::Aborted))
                }
                1 => Ok(ControlFlow::Continue(State::Persist(keys[0].clone()))),
                _ => Ok(ControlFlow::Continue(State::List(keys))),
            },

            State::List(keys) => {
                let rows = keys
                    .iter()
                    .enumerate()
                    .map(|(i, key)| AuthKeySelectionRow {
                        row: i + 1,
                        name: key.name.clone(),
                    });
                term.println("")?;
                term.println(&Table::new(rows).to_string())?;
                term.println("")?;
                Ok(ControlFlow::Continue(State::Select(keys)))
            }

            State::Select(keys) => {
                term.prompt(SELECT_PROMPT)?;
                let line = term.read_line()?.unwrap_or_default();
                match parse_selection(&line, keys.len()) {
                    SelectionInput::Empty => {
                        term.eprintln("No key selected.")?;
                        term.println("Configuration is not saved.")?;
                        Ok(ControlFlow::Break(Outcome::Aborted))
                    }
                    SelectionInput::Invalid => {
                        term.eprintln("Invalid row number.")?;
                        Ok(ControlFlow::Continue(State::Select(keys)))
                    }
                    SelectionInput::Row(index) => {
                        Ok(ControlFlow::Continue(State::Persist(keys[index].clone())))
                    }
                }
            }

            State::Persist(key) => {
                let path = self.writer.persist_secret(&key.secret).await?;
                term.println(&format!("Using auth key: {}.", key.name))?;
                term.println(&format!("Configuration saved to: {}.", path.display()))?;
                Ok(ControlFlow::Break(Outcome::Done {
                    name: key.name,
                    path,
                }))
            }
        }
    }
}

/// Runs the flow with the default copy and exchange timeout.
pub async fn acquire_and_store_key(
    term: &mut Terminal<'_>,
    getter: &dyn AuthKeysGetter,
    writer: &dyn ConfigWriter,
) -> Result<Outcome, FlowError> {
    Flow::new(getter, writer).run(term).await
}

pub async fn get_auth_key(config: &Config) -> Res<()> {
    let client = Client::anonymous(config)?;
    let manager = ConfigManager::new(config.path.clone());

    let mut input = BufReader::new(io::stdin());
    let mut out = io::stdout();
    let mut err = io::stderr();
    let password = StdinPasswordReader;
    let mut term = Terminal::new(&mut input, &mut out, &mut err, &password);

    let outcome = acquire_and_store_key(&mut term, &client, &manager).await?;
    debug!(?outcome, "get-auth-key finished");
    Ok(())
}
