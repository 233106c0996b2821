use anyhow::Result;
use campaignkit_core::utm::{SUGGESTED_MEDIUMS, SUGGESTED_SOURCES};
use campaignkit_core::{build_utm_url, UtmParams, ValidationError};

use super::{prompt_optional, prompt_select, prompt_text, Form};
use crate::surface::Surface;

pub struct UtmForm {
    base_url: String,
    params: UtmParams,
}

impl UtmForm {
    pub fn new(base_url: Option<String>, params: UtmParams) -> Self {
        Self {
            base_url: base_url.unwrap_or_default(),
            params,
        }
    }
}

impl Form for UtmForm {
    type Output = String;

    fn prompt(&mut self) -> Result<()> {
        self.base_url = prompt_text("Website URL", &self.base_url)?;

        let params = &mut self.params;
        params.source = prompt_suggested("Campaign source", SUGGESTED_SOURCES, params.source.as_deref())?;
        params.medium = prompt_suggested("Campaign medium", SUGGESTED_MEDIUMS, params.medium.as_deref())?;
        params.campaign = prompt_optional("Campaign name", params.campaign.as_deref())?;
        params.term = prompt_optional("Campaign term", params.term.as_deref())?;
        params.content = prompt_optional("Campaign content", params.content.as_deref())?;

        Ok(())
    }

    fn generate(&self) -> Result<String, ValidationError> {
        build_utm_url(&self.base_url, &self.params)
    }

    fn deliver(&self, url: &String, surface: &Surface) {
        surface.deliver(url, "UTM URL");
    }
}

pub fn run(form: UtmForm, surface: &Surface) -> Result<bool> {
    Ok(super::run_form(form, surface)?.is_some())
}

const SKIP: &str = "(none)";
const CUSTOM: &str = "Other...";

/// Pick from `suggestions`, skip, or type a custom value.
fn prompt_suggested(prompt: &str, suggestions: &[&str], current: Option<&str>) -> Result<Option<String>> {
    let items = suggestion_items(suggestions);
    let start = match current {
        None | Some("") => 0,
        Some(value) => items
            .iter()
            .position(|item| *item == value)
            .unwrap_or(items.len() - 1),
    };

    match items[prompt_select(prompt, &items, Some(start))?] {
        SKIP => Ok(None),
        CUSTOM => {
            let custom = current.filter(|v| !suggestions.contains(v));
            prompt_optional(prompt, custom)
        }
        value => Ok(Some(value.to_string())),
    }
}

fn suggestion_items<'a>(suggestions: &[&'a str]) -> Vec<&'a str> {
    let mut items = Vec::with_capacity(suggestions.len() + 2);
    items.push(SKIP);
    items.extend_from_slice(suggestions);
    items.push(CUSTOM);
    items
}
