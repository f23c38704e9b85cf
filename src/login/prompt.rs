//! Interactive prompts.

use std::io;

use dialoguer::{Input, Password, Select};

/// The three prompt primitives the login flow consumes.
pub trait Prompter {
    /// Asks for a line of text.
    fn input(&self, prompt: &str) -> io::Result<String>;

    /// Asks for a secret without echoing it.
    fn password(&self, prompt: &str) -> io::Result<String>;

    /// Asks the user to pick one of `items`, returning its index.
    fn select(&self, prompt: &str, items: &[String]) -> io::Result<usize>;
}

impl<T: Prompter + ?Sized> Prompter for &T {
    fn input(&self, prompt: &str) -> io::Result<String> {
        (**self).input(prompt)
    }

    fn password(&self, prompt: &str) -> io::Result<String> {
        (**self).password(prompt)
    }

    fn select(&self, prompt: &str, items: &[String]) -> io::Result<usize> {
        (**self).select(prompt, items)
    }
}

/// Terminal prompts backed by `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalPrompt;

impl Prompter for TerminalPrompt {
    fn input(&self, prompt: &str) -> io::Result<String> {
        let value: String = Input::new()
            .with_prompt(prompt)
            .interact_text()
            .map_err(io::Error::other)?;
        Ok(value.trim().to_string())
    }

    fn password(&self, prompt: &str) -> io::Result<String> {
        Password::new()
            .with_prompt(prompt)
            .allow_empty_password(true)
            .interact()
            .map_err(io::Error::other)
    }

    fn select(&self, prompt: &str, items: &[String]) -> io::Result<usize> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .interact()
            .map_err(io::Error::other)
    }
}
