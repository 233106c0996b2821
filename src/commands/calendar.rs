use anyhow::{Context, Result};
use campaignkit_core::surface::{Clipboard, NoticeKind, Notifier};
use campaignkit_core::{
    build_calendar_links, CalendarContext, CalendarLinks, CalendarProvider, EventSpec,
    ValidationError,
};
use chrono::{NaiveDate, NaiveTime};
use chrono_tz::Tz;
use owo_colors::OwoColorize;

use super::name::parse_date;
use super::{prompt_optional, prompt_text, prompt_with_retry, Form};
use crate::surface::{Surface, TerminalClipboard};

pub struct CalendarForm {
    event: EventSpec,
    context: CalendarContext<Tz>,
    /// Print (and copy) only this provider's link.
    provider: Option<CalendarProvider>,
}

impl CalendarForm {
    pub fn new(event: EventSpec, context: CalendarContext<Tz>, provider: Option<CalendarProvider>) -> Self {
        Self {
            event,
            context,
            provider,
        }
    }
}

impl Form for CalendarForm {
    type Output = CalendarLinks;

    fn prompt(&mut self) -> Result<()> {
        let event = &mut self.event;

        event.title = prompt_text("Event title", &event.title)?;
        event.description = prompt_optional("Description", event.description.as_deref())?;
        event.location = prompt_optional("Location", event.location.as_deref())?;

        event.start_date = Some(prompt_with_retry(
            "Start date (YYYY-MM-DD)",
            event.start_date.map(|d| d.format("%Y-%m-%d").to_string()),
            parse_date,
        )?);
        event.start_time = Some(prompt_with_retry(
            "Start time (HH:MM)",
            event.start_time.map(|t| t.format("%H:%M").to_string()),
            parse_time,
        )?);

        // End date defaults to the start date, which is what most events want.
        let end_default = event.end_date.or(event.start_date);
        event.end_date = Some(prompt_with_retry(
            "End date (YYYY-MM-DD)",
            end_default.map(|d| d.format("%Y-%m-%d").to_string()),
            parse_date,
        )?);
        event.end_time = Some(prompt_with_retry(
            "End time (HH:MM)",
            event.end_time.map(|t| t.format("%H:%M").to_string()),
            parse_time,
        )?);

        Ok(())
    }

    fn generate(&self) -> Result<CalendarLinks, ValidationError> {
        build_calendar_links(&self.event, &self.context)
    }

    fn deliver(&self, links: &CalendarLinks, surface: &Surface) {
        if let Some(provider) = self.provider {
            surface.deliver(links.get(provider), &format!("{} link", provider_label(provider)));
            return;
        }

        for (provider, link) in links.iter() {
            println!("{}", provider_label(provider).bold());
            println!("{}", link);
        }

        if let Some(clipboard) = &surface.clipboard {
            copy_default(links, clipboard, surface);
        }
    }
}

/// Without `--provider`, `--copy` takes the Google link.
fn copy_default(links: &CalendarLinks, clipboard: &TerminalClipboard, surface: &Surface) {
    clipboard.write_text(links.get(CalendarProvider::Google));
    surface.notifier.notify(
        NoticeKind::Success,
        "Copied to clipboard",
        "Google Calendar link has been copied to your clipboard",
    );
}

fn provider_label(provider: CalendarProvider) -> &'static str {
    match provider {
        CalendarProvider::Google => "Google Calendar",
        CalendarProvider::Outlook => "Outlook",
        CalendarProvider::Yahoo => "Yahoo Calendar",
        CalendarProvider::Ical => "iCal",
    }
}

pub fn run(form: CalendarForm, surface: &Surface) -> Result<bool> {
    Ok(super::run_form(form, surface)?.is_some())
}

pub(crate) fn parse_time(input: &str) -> Result<NaiveTime> {
    let input = input.trim();
    NaiveTime::parse_from_str(input, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(input, "%H:%M:%S"))
        .with_context(|| format!("Invalid time format '{}'. Expected HH:MM", input))
}

/// Parse the optional date/time flags into an event.
pub fn event_from_args(
    title: Option<String>,
    description: Option<String>,
    location: Option<String>,
    start_date: Option<&str>,
    start_time: Option<&str>,
    end_date: Option<&str>,
    end_time: Option<&str>,
) -> Result<EventSpec> {
    Ok(EventSpec {
        title: title.unwrap_or_default(),
        description,
        location,
        start_date: start_date.map(parse_date).transpose()?,
        start_time: start_time.map(parse_time).transpose()?,
        end_date: end_date.map(parse_date).transpose()?,
        end_time: end_time.map(parse_time).transpose()?,
    })
}
