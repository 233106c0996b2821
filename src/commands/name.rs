use anyhow::{Context, Result};
use campaignkit_core::{format_campaign_name, CampaignNameInput, CampaignType, Region, ValidationError};
use chrono::NaiveDate;

use super::{prompt_select, prompt_text, prompt_with_retry, Form};
use crate::surface::Surface;

pub struct NameForm {
    input: CampaignNameInput,
}

impl NameForm {
    pub fn new(
        region: Option<Region>,
        campaign_type: Option<CampaignType>,
        description: Option<String>,
        date: Option<NaiveDate>,
    ) -> Self {
        Self {
            input: CampaignNameInput {
                region,
                campaign_type,
                description: description.unwrap_or_default(),
                date: date.unwrap_or_else(|| chrono::Local::now().date_naive()),
            },
        }
    }
}

impl Form for NameForm {
    type Output = String;

    fn prompt(&mut self) -> Result<()> {
        let labels: Vec<&str> = Region::ALL.iter().map(|r| r.label()).collect();
        let current = self
            .input
            .region
            .and_then(|r| Region::ALL.iter().position(|x| *x == r));
        self.input.region = Some(Region::ALL[prompt_select("Region", &labels, current)?]);

        let labels: Vec<&str> = CampaignType::ALL.iter().map(|t| t.label()).collect();
        let current = self
            .input
            .campaign_type
            .and_then(|t| CampaignType::ALL.iter().position(|x| *x == t));
        self.input.campaign_type =
            Some(CampaignType::ALL[prompt_select("Campaign type", &labels, current)?]);

        self.input.description = prompt_text("Brief description", &self.input.description)?;

        self.input.date = prompt_with_retry(
            "Date (YYYY-MM-DD)",
            Some(self.input.date.format("%Y-%m-%d").to_string()),
            parse_date,
        )?;

        Ok(())
    }

    fn generate(&self) -> Result<String, ValidationError> {
        format_campaign_name(&self.input)
    }

    fn deliver(&self, name: &String, surface: &Surface) {
        surface.deliver(name, "Campaign name");
    }
}

pub fn run(form: NameForm, surface: &Surface) -> Result<bool> {
    Ok(super::run_form(form, surface)?.is_some())
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .with_context(|| format!("Invalid date format '{}'. Expected YYYY-MM-DD", input))
}
