//! The end-to-end login flow.

use std::io::{self, Write};

use tracing::{info, warn};

use super::browser::{open_browser, Opener, OsOpener};
use super::client::Client;
use super::credentials::{self, LoginState};
use super::error::LoginError;
use super::flags::{Flags, ResolvedFlags};
use super::prompt::{Prompter, TerminalPrompt};
use super::provider::{ClientMethod, Credentials, Provider};
use super::selector::select_provider;
use super::service_token::issue_service_token;
use super::transport::Transport;

/// Total login attempts allowed for an interactive flow.
pub const MAX_LOGIN_ATTEMPTS: u32 = 3;

/// Optional collaborators for a [`Flow`]. Unset ones fall back to the
/// terminal, the OS browser opener and stderr.
#[derive(Default)]
pub struct FlowOpts<'a> {
    pub errout: Option<Box<dyn Write + 'a>>,
    pub prompt: Option<Box<dyn Prompter + 'a>>,
    pub opener: Option<Box<dyn Opener + 'a>>,
}

/// A login flow. Holds collaborators only; every [`Flow::start`] call
/// runs with its own state.
pub struct Flow<'a> {
    errout: Box<dyn Write + 'a>,
    prompt: Box<dyn Prompter + 'a>,
    opener: Box<dyn Opener + 'a>,
}

impl<'a> Flow<'a> {
    pub fn new(opts: FlowOpts<'a>) -> Self {
        Self {
            errout: opts.errout.unwrap_or_else(|| Box::new(io::stderr())),
            prompt: opts.prompt.unwrap_or_else(|| Box::new(TerminalPrompt)),
            opener: opts.opener.unwrap_or_else(|| Box::new(OsOpener)),
        }
    }

    /// Runs the login flow against a cluster and returns its access token.
    pub fn start(&mut self, flags: Flags, transport: &dyn Transport) -> Result<String, LoginError> {
        let flags = flags.resolve()?;
        let client = Client::new(transport);
        let providers = client.providers()?;

        let mut state = LoginState::default();
        let provider = select_provider(&flags, &providers, self.prompt.as_ref(), &mut state)?;
        info!("Using login provider '{}'.", provider.kind);

        self.trigger_method(&client, &flags, &provider, state)
    }

    fn trigger_method(
        &mut self,
        client: &Client<'_>,
        flags: &ResolvedFlags,
        provider: &Provider,
        mut state: LoginState,
    ) -> Result<String, LoginError> {
        let mut credentials = Credentials::default();
        loop {
            let endpoint = self.acquire(client, flags, provider, &mut state, &mut credentials)?;

            match client.login(endpoint, &credentials) {
                Ok(token) => return Ok(token),
                Err(e) if state.interactive && state.attempt < MAX_LOGIN_ATTEMPTS => {
                    warn!("{e}");
                    state.attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Fills `credentials` for the provider's method and returns the login
    /// endpoint override, if any.
    fn acquire<'p>(
        &mut self,
        client: &Client<'_>,
        flags: &ResolvedFlags,
        provider: &'p Provider,
        state: &mut LoginState,
        credentials: &mut Credentials,
    ) -> Result<Option<&'p str>, LoginError> {
        let prompt = self.prompt.as_ref();
        match provider.client_method {
            ClientMethod::Credential | ClientMethod::UserCredential => {
                credentials.uid = Some(credentials::uid(flags, prompt, state)?);
                credentials.password = Some(credentials::password(flags, prompt, state)?);
                Ok(Some(provider.config.start_flow_url.as_str()))
            }
            ClientMethod::ServiceCredential => {
                let uid = credentials::uid(flags, prompt, state)?;
                let key = flags.private_key().ok_or_else(|| {
                    LoginError::Resolution(format!(
                        "login provider '{}' requires --private-key",
                        provider.id
                    ))
                })?;
                credentials.token = Some(issue_service_token(&uid, key)?);
                credentials.uid = Some(uid);
                Ok(None)
            }
            ClientMethod::BrowserToken => {
                if state.attempt == 1 {
                    open_browser(
                        client.transport(),
                        self.opener.as_ref(),
                        &mut *self.errout,
                        &provider.config.start_flow_url,
                    )?;
                }
                state.interactive = true;
                credentials.token = Some(self.prompt.input("Enter token from the browser")?);
                Ok(None)
            }
        }
    }
}
