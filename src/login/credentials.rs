//! Reads UID and password from flags, or asks for them.

use super::error::LoginError;
use super::flags::ResolvedFlags;
use super::prompt::Prompter;

/// Per-run state of a login flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoginState {
    /// 1-based number of the current login attempt.
    pub attempt: u32,
    /// Set once any value has been typed in by the user rather than taken
    /// from a flag. Only interactive flows are retried.
    pub interactive: bool,
}

impl Default for LoginState {
    fn default() -> Self {
        Self {
            attempt: 1,
            interactive: false,
        }
    }
}

/// Returns the UID from `--username` or prompts for it.
pub fn uid(
    flags: &ResolvedFlags,
    prompt: &dyn Prompter,
    state: &mut LoginState,
) -> Result<String, LoginError> {
    if let Some(username) = flags.username() {
        return Ok(username.to_string());
    }
    state.interactive = true;
    Ok(prompt.input("Username")?)
}

/// Returns the resolved password flag or prompts for it without echo.
pub fn password(
    flags: &ResolvedFlags,
    prompt: &dyn Prompter,
    state: &mut LoginState,
) -> Result<String, LoginError> {
    if let Some(password) = flags.password() {
        return Ok(password.to_string());
    }
    state.interactive = true;
    Ok(prompt.password("Password")?)
}
