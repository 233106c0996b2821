pub mod calendar;
pub mod config;
pub mod name;
pub mod qr;
pub mod utm;

use anyhow::Result;
use campaignkit_core::slot::ResultSlot;
use campaignkit_core::surface::Notifier;
use campaignkit_core::ValidationError;
use dialoguer::{Confirm, Input, Select};
use owo_colors::OwoColorize;

use crate::surface::Surface;

/// A tool's input fields as collected by the CLI.
pub trait Form {
    type Output;

    /// Ask for every field, offering the current values as defaults.
    fn prompt(&mut self) -> Result<()>;

    fn generate(&self) -> Result<Self::Output, ValidationError>;

    fn deliver(&self, output: &Self::Output, surface: &Surface);
}

/// Generate once from flags, or run an interactive session that re-prompts
/// until the user is done. Returns the last successful result.
pub fn run_form<F: Form>(mut form: F, surface: &Surface) -> Result<Option<F::Output>> {
    let mut slot = ResultSlot::new();

    if !surface.interactive {
        match slot.generate(|| form.generate()) {
            Ok(output) => form.deliver(output, surface),
            Err(e) => surface.notifier.validation_failed(&e),
        }
        return Ok(slot.into_current());
    }

    loop {
        form.prompt()?;

        match slot.generate(|| form.generate()) {
            Ok(output) => form.deliver(output, surface),
            Err(e) => {
                surface.notifier.validation_failed(&e);
                if slot.current().is_some() {
                    eprintln!("{}", "  Previous result is unchanged.".dimmed());
                }
            }
        }

        let again = Confirm::new()
            .with_prompt("  Generate another?")
            .default(false)
            .interact()?;
        if !again {
            break;
        }
    }

    Ok(slot.into_current())
}

/// Free-text prompt; empty input is allowed and keeps `current` as default.
pub(crate) fn prompt_text(prompt: &str, current: &str) -> Result<String> {
    let value = Input::<String>::new()
        .with_prompt(format!("  {prompt}"))
        .default(current.to_string())
        .show_default(!current.is_empty())
        .allow_empty(true)
        .interact_text()?;
    Ok(value)
}

/// Optional free-text prompt: empty input maps to `None`.
pub(crate) fn prompt_optional(prompt: &str, current: Option<&str>) -> Result<Option<String>> {
    let value = prompt_text(prompt, current.unwrap_or_default())?;
    Ok(if value.is_empty() { None } else { Some(value) })
}

/// Pick one of `items`, starting on `current`.
pub(crate) fn prompt_select(prompt: &str, items: &[&str], current: Option<usize>) -> Result<usize> {
    let selection = Select::new()
        .with_prompt(format!("  {prompt}"))
        .items(items)
        .default(current.unwrap_or(0))
        .interact()?;
    Ok(selection)
}

/// Prompt the user with retry on parse errors.
pub(crate) fn prompt_with_retry<T, F>(prompt: &str, current: Option<String>, parse: F) -> Result<T>
where
    F: Fn(&str) -> Result<T>,
{
    loop {
        let mut input = Input::<String>::new().with_prompt(format!("  {prompt}"));
        if let Some(ref current) = current {
            input = input.default(current.clone());
        }
        let raw = input.interact_text()?;
        match parse(&raw) {
            Ok(result) => return Ok(result),
            Err(e) => {
                eprintln!("  {}", e.to_string().red());
            }
        }
    }
}
