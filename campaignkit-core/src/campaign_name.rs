//! Standardized campaign names: `region_type_brief-description_YYYYMMDD`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::ValidationError;

/// Sales region a campaign targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Namer,
    Emea,
    Apac,
    Latam,
    Mea,
    Global,
}

impl Region {
    pub const ALL: [Region; 6] = [
        Region::Namer,
        Region::Emea,
        Region::Apac,
        Region::Latam,
        Region::Mea,
        Region::Global,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            Region::Namer => "namer",
            Region::Emea => "emea",
            Region::Apac => "apac",
            Region::Latam => "latam",
            Region::Mea => "mea",
            Region::Global => "global",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Region::Namer => "North America",
            Region::Emea => "Europe",
            Region::Apac => "Asia Pacific",
            Region::Latam => "Latin America",
            Region::Mea => "Middle East & Africa",
            Region::Global => "Global",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Region {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.key() == s)
            .ok_or_else(|| format!("Unknown region '{}'", s))
    }
}

/// Marketing channel of a campaign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CampaignType {
    Email,
    Social,
    Display,
    Search,
    Event,
    Webinar,
    Content,
    Pr,
}

impl CampaignType {
    pub const ALL: [CampaignType; 8] = [
        CampaignType::Email,
        CampaignType::Social,
        CampaignType::Display,
        CampaignType::Search,
        CampaignType::Event,
        CampaignType::Webinar,
        CampaignType::Content,
        CampaignType::Pr,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CampaignType::Email => "email",
            CampaignType::Social => "social",
            CampaignType::Display => "display",
            CampaignType::Search => "search",
            CampaignType::Event => "event",
            CampaignType::Webinar => "webinar",
            CampaignType::Content => "content",
            CampaignType::Pr => "pr",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CampaignType::Email => "Email",
            CampaignType::Social => "Social Media",
            CampaignType::Display => "Display",
            CampaignType::Search => "Search",
            CampaignType::Event => "Event",
            CampaignType::Webinar => "Webinar",
            CampaignType::Content => "Content",
            CampaignType::Pr => "PR",
        }
    }
}

impl fmt::Display for CampaignType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CampaignType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CampaignType::ALL
            .into_iter()
            .find(|t| t.key() == s)
            .ok_or_else(|| format!("Unknown campaign type '{}'", s))
    }
}

/// Fields of the campaign-name form. `None` means "not selected yet".
#[derive(Debug, Clone)]
pub struct CampaignNameInput {
    pub region: Option<Region>,
    pub campaign_type: Option<CampaignType>,
    pub description: String,
    pub date: NaiveDate,
}

/// Build `region_type_slug_YYYYMMDD` from the form fields.
pub fn format_campaign_name(input: &CampaignNameInput) -> Result<String, ValidationError> {
    let (Some(region), Some(campaign_type)) = (input.region, input.campaign_type) else {
        return Err(ValidationError::MissingRequiredField);
    };
    if input.description.is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }

    let name = format!(
        "{}_{}_{}_{}",
        region.key(),
        campaign_type.key(),
        slugify(&input.description),
        input.date.format("%Y%m%d")
    );
    tracing::debug!(%name, "formatted campaign name");

    Ok(name)
}

/// Lower-case and collapse each whitespace run into one `-`.
///
/// Punctuation is kept; leading and trailing whitespace also become `-`.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut in_whitespace = false;

    for c in text.chars() {
        if c.is_whitespace() {
            if !in_whitespace {
                slug.push('-');
            }
            in_whitespace = true;
        } else {
            slug.extend(c.to_lowercase());
            in_whitespace = false;
        }
    }

    slug
}
