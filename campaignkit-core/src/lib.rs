//! Core formatters for campaignkit.
//!
//! Each tool is a pure function over a fully populated input struct:
//! - `campaign_name`: `region_type_slug_YYYYMMDD` campaign names
//! - `calendar_links`: Google/Outlook/Yahoo links and an inline iCal file
//! - `utm`: UTM parameters merged into a landing-page URL
//! - `qr`: QR image-service requests and PNG export of the result
//!
//! `surface` holds the notification/clipboard/download seams results are
//! handed to; `slot` keeps the latest result of a form.

pub mod calendar_links;
pub mod campaign_name;
pub mod config;
pub mod encode;
pub mod error;
pub mod qr;
pub mod slot;
pub mod surface;
pub mod timestamp;
pub mod utm;

pub use calendar_links::{
    build_calendar_links, CalendarContext, CalendarLinks, CalendarProvider, EventSpec,
};
pub use campaign_name::{format_campaign_name, CampaignNameInput, CampaignType, Region};
pub use error::{ExportError, ToolkitError, ToolkitResult, ValidationError};
pub use qr::{
    build_qr_request, export_png, ChartApiService, LoadedImage, QrContent, QrImageService,
    QrMode, QrSize, QrSpec,
};
pub use utm::{build_utm_url, UtmParams};
