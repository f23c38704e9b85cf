//! Picks the login provider explicitly, implicitly or by asking the user.

use tracing::info;

use super::credentials::LoginState;
use super::error::LoginError;
use super::flags::ResolvedFlags;
use super::prompt::Prompter;
use super::provider::{Provider, Providers};

pub fn select_provider(
    flags: &ResolvedFlags,
    providers: &Providers,
    prompt: &dyn Prompter,
    state: &mut LoginState,
) -> Result<Provider, LoginError> {
    // Explicit selection ignores flag compatibility.
    if let Some(id) = flags.provider_id() {
        return providers
            .get(id)
            .cloned()
            .ok_or_else(|| LoginError::UnknownProvider(id.to_string()));
    }

    let mut candidates: Vec<&Provider> = Vec::new();
    for provider in providers.iter() {
        if flags.supports(provider) {
            candidates.push(provider);
        } else {
            info!("Excluding provider '{}' based on command-line flags.", provider.id);
        }
    }

    match candidates.as_slice() {
        [] => Err(LoginError::NoProvider),
        [only] => Ok((*only).clone()),
        _ => {
            let labels: Vec<String> = candidates.iter().map(ToString::to_string).collect();
            state.interactive = true;
            let index = prompt.select("Please select a login method:", &labels)?;
            candidates.get(index).map(|p| (*p).clone()).ok_or_else(|| {
                LoginError::Io(std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    format!("selection {index} is out of range"),
                ))
            })
        }
    }
}
