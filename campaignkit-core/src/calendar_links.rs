//! "Add to calendar" links for Google, Outlook.com, Yahoo and iCal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveTime, TimeZone, Utc};
use icalendar::{Calendar, Component, EventLike};

use crate::encode::encode_component;
use crate::error::ValidationError;
use crate::timestamp::{compact_utc, iso_utc, local_to_utc};

const GOOGLE_URL: &str = "https://calendar.google.com/calendar/render";
const OUTLOOK_URL: &str = "https://outlook.live.com/calendar/0/deeplink/compose";
const YAHOO_URL: &str = "https://calendar.yahoo.com/";
const ICAL_DATA_PREFIX: &str = "data:text/calendar;charset=utf8,";
const ICS_PRODID: &str = "PRODID:-//campaignkit//calendar-links//EN";

/// Fields of the calendar-link form.
///
/// Dates and times are wall-clock values; they are interpreted in the
/// time zone of the [`CalendarContext`] passed to [`build_calendar_links`].
#[derive(Debug, Clone, Default)]
pub struct EventSpec {
    pub title: String,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub start_time: Option<NaiveTime>,
    pub end_date: Option<NaiveDate>,
    pub end_time: Option<NaiveTime>,
}

/// Environment the event fields are read in: the user's time zone and the
/// address of the page the links are generated from (iCal `URL`).
#[derive(Debug, Clone)]
pub struct CalendarContext<Tz: TimeZone> {
    pub tz: Tz,
    pub page_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarProvider {
    Google,
    Outlook,
    Yahoo,
    Ical,
}

impl CalendarProvider {
    pub const ALL: [CalendarProvider; 4] = [
        CalendarProvider::Google,
        CalendarProvider::Outlook,
        CalendarProvider::Yahoo,
        CalendarProvider::Ical,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            CalendarProvider::Google => "google",
            CalendarProvider::Outlook => "outlook",
            CalendarProvider::Yahoo => "yahoo",
            CalendarProvider::Ical => "ical",
        }
    }
}

impl fmt::Display for CalendarProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for CalendarProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CalendarProvider::ALL
            .into_iter()
            .find(|p| p.key() == s)
            .ok_or_else(|| format!("Unknown calendar provider '{}'", s))
    }
}

/// One link per provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarLinks {
    pub google: String,
    pub outlook: String,
    pub yahoo: String,
    pub ical: String,
}

impl CalendarLinks {
    pub fn get(&self, provider: CalendarProvider) -> &str {
        match provider {
            CalendarProvider::Google => &self.google,
            CalendarProvider::Outlook => &self.outlook,
            CalendarProvider::Yahoo => &self.yahoo,
            CalendarProvider::Ical => &self.ical,
        }
    }

    /// Links in google, outlook, yahoo, ical order.
    pub fn iter(&self) -> impl Iterator<Item = (CalendarProvider, &str)> {
        CalendarProvider::ALL
            .into_iter()
            .map(move |provider| (provider, self.get(provider)))
    }
}

/// Start and end resolved to UTC instants.
struct EventWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

/// Build all four calendar links for an event.
///
/// End before start is accepted as-is.
pub fn build_calendar_links<Tz: TimeZone>(
    spec: &EventSpec,
    ctx: &CalendarContext<Tz>,
) -> Result<CalendarLinks, ValidationError> {
    let window = resolve_window(spec, &ctx.tz)?;

    let links = CalendarLinks {
        google: google_url(spec, &window),
        outlook: outlook_url(spec, &window),
        yahoo: yahoo_url(spec, &window),
        ical: ical_data_uri(spec, &window, &ctx.page_url),
    };
    tracing::debug!(title = %spec.title, start = %window.start, end = %window.end, "built calendar links");

    Ok(links)
}

fn resolve_window<Tz: TimeZone>(spec: &EventSpec, tz: &Tz) -> Result<EventWindow, ValidationError> {
    let (Some(start_date), Some(start_time), Some(end_date), Some(end_time)) =
        (spec.start_date, spec.start_time, spec.end_date, spec.end_time)
    else {
        return Err(ValidationError::MissingRequiredField);
    };
    if spec.title.is_empty() {
        return Err(ValidationError::MissingRequiredField);
    }

    Ok(EventWindow {
        start: local_to_utc(&start_date.and_time(start_time), tz),
        end: local_to_utc(&end_date.and_time(end_time), tz),
    })
}

fn description(spec: &EventSpec) -> &str {
    spec.description.as_deref().unwrap_or_default()
}

fn location(spec: &EventSpec) -> &str {
    spec.location.as_deref().unwrap_or_default()
}

fn google_url(spec: &EventSpec, window: &EventWindow) -> String {
    format!(
        "{}?action=TEMPLATE&text={}&dates={}/{}&details={}&location={}",
        GOOGLE_URL,
        encode_component(&spec.title),
        compact_utc(&window.start),
        compact_utc(&window.end),
        encode_component(description(spec)),
        encode_component(location(spec)),
    )
}

fn outlook_url(spec: &EventSpec, window: &EventWindow) -> String {
    format!(
        "{}?subject={}&startdt={}&enddt={}&body={}&location={}",
        OUTLOOK_URL,
        encode_component(&spec.title),
        iso_utc(&window.start),
        iso_utc(&window.end),
        encode_component(description(spec)),
        encode_component(location(spec)),
    )
}

fn yahoo_url(spec: &EventSpec, window: &EventWindow) -> String {
    format!(
        "{}?v=60&title={}&st={}&et={}&desc={}&in_loc={}",
        YAHOO_URL,
        encode_component(&spec.title),
        compact_utc(&window.start),
        compact_utc(&window.end),
        encode_component(description(spec)),
        encode_component(location(spec)),
    )
}

/// Inline iCalendar file as a single-line `data:` URI.
fn ical_data_uri(spec: &EventSpec, window: &EventWindow, page_url: &str) -> String {
    let ics = generate_ics(spec, window, page_url);
    let lines: Vec<&str> = ics.lines().collect();
    format!("{}{}", ICAL_DATA_PREFIX, lines.join("%0A"))
}

fn generate_ics(spec: &EventSpec, window: &EventWindow, page_url: &str) -> String {
    let mut event = icalendar::Event::new();
    event.add_property("URL", page_url);
    event.add_property("DTSTART", compact_utc(&window.start));
    event.add_property("DTEND", compact_utc(&window.end));
    event.summary(&spec.title);
    event.description(description(spec));
    event.location(location(spec));

    let mut cal = Calendar::new();
    cal.push(event.done());

    strip_ics_bloat(&cal.done().to_string())
}

/// Normalize the icalendar crate's output for inline use.
/// - Pin PRODID
/// - Drop CALSCALE:GREGORIAN (it's the default)
/// - Drop generated DTSTAMP and UID so output only depends on the input
/// - Unfold folded lines
fn strip_ics_bloat(ics: &str) -> String {
    let mut lines: Vec<String> = Vec::new();

    for line in ics.lines() {
        if let Some(continuation) = line.strip_prefix([' ', '\t']) {
            if let Some(last) = lines.last_mut() {
                last.push_str(continuation);
                continue;
            }
        }
        lines.push(line.to_string());
    }

    lines
        .into_iter()
        .filter(|line| {
            line != "CALSCALE:GREGORIAN"
                && !line.starts_with("DTSTAMP:")
                && !line.starts_with("UID:")
        })
        .map(|line| {
            if line.starts_with("PRODID:") {
                ICS_PRODID.to_string()
            } else {
                line
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Berlin;

    fn launch() -> EventSpec {
        EventSpec {
            title: "Launch".to_string(),
            description: Some("Product reveal".to_string()),
            location: Some("Main Hall".to_string()),
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            start_time: NaiveTime::from_hms_opt(10, 0, 0),
            end_date: NaiveDate::from_ymd_opt(2024, 1, 1),
            end_time: NaiveTime::from_hms_opt(11, 0, 0),
        }
    }

    fn utc_ctx() -> CalendarContext<Utc> {
        CalendarContext {
            tz: Utc,
            page_url: "https://toolkit.example.com/".to_string(),
        }
    }

    fn is_compact(s: &str) -> bool {
        let b = s.as_bytes();
        b.len() == 16
            && b[..8].iter().all(u8::is_ascii_digit)
            && b[8] == b'T'
            && b[9..15].iter().all(u8::is_ascii_digit)
            && b[15] == b'Z'
    }

    fn query_value<'a>(url: &'a str, key: &str) -> &'a str {
        let query = url.split_once('?').unwrap().1;
        query
            .split('&')
            .find_map(|pair| pair.strip_prefix(key).and_then(|r| r.strip_prefix('=')))
            .unwrap_or_else(|| panic!("no {} in {}", key, url))
    }

    #[test]
    fn google_dates_are_compact_pair() {
        let links = build_calendar_links(&launch(), &utc_ctx()).unwrap();
        let dates = query_value(&links.google, "dates");
        let (start, end) = dates.split_once('/').unwrap();
        assert!(is_compact(start) && is_compact(end), "bad dates: {}", dates);
        assert_eq!(dates, "20240101T100000Z/20240101T110000Z");
    }

    #[test]
    fn google_link_shape() {
        let links = build_calendar_links(&launch(), &utc_ctx()).unwrap();
        assert_eq!(
            links.google,
            "https://calendar.google.com/calendar/render?action=TEMPLATE&text=Launch\
             &dates=20240101T100000Z/20240101T110000Z&details=Product%20reveal&location=Main%20Hall"
        );
    }

    #[test]
    fn outlook_uses_iso_timestamps() {
        let links = build_calendar_links(&launch(), &utc_ctx()).unwrap();
        assert_eq!(
            links.outlook,
            "https://outlook.live.com/calendar/0/deeplink/compose?subject=Launch\
             &startdt=2024-01-01T10:00:00.000Z&enddt=2024-01-01T11:00:00.000Z\
             &body=Product%20reveal&location=Main%20Hall"
        );
    }

    #[test]
    fn yahoo_uses_short_parameter_names() {
        let links = build_calendar_links(&launch(), &utc_ctx()).unwrap();
        assert_eq!(query_value(&links.yahoo, "v"), "60");
        assert_eq!(query_value(&links.yahoo, "st"), "20240101T100000Z");
        assert_eq!(query_value(&links.yahoo, "et"), "20240101T110000Z");
        assert_eq!(query_value(&links.yahoo, "desc"), "Product%20reveal");
        assert_eq!(query_value(&links.yahoo, "in_loc"), "Main%20Hall");
        assert!(links.yahoo.starts_with("https://calendar.yahoo.com/?v=60&title=Launch&"));
    }

    #[test]
    fn ical_payload_is_single_line_calendar() {
        let links = build_calendar_links(&launch(), &utc_ctx()).unwrap();
        let ical = &links.ical;

        assert!(ical.starts_with("data:text/calendar;charset=utf8,BEGIN:VCALENDAR%0A"));
        assert!(ical.ends_with("%0AEND:VCALENDAR"));
        assert!(!ical.contains('\n') && !ical.contains('\r'));

        for expected in [
            "%0AVERSION:2.0%0A",
            "%0ABEGIN:VEVENT%0A",
            "%0AURL:https://toolkit.example.com/%0A",
            "%0ADTSTART:20240101T100000Z%0A",
            "%0ADTEND:20240101T110000Z%0A",
            "%0ASUMMARY:Launch%0A",
            "%0ADESCRIPTION:Product reveal%0A",
            "%0ALOCATION:Main Hall%0A",
            "%0AEND:VEVENT%0A",
        ] {
            assert!(ical.contains(expected), "missing {} in {}", expected, ical);
        }
    }

    #[test]
    fn ical_payload_has_no_generated_properties() {
        let links = build_calendar_links(&launch(), &utc_ctx()).unwrap();
        assert!(!links.ical.contains("DTSTAMP"));
        assert!(!links.ical.contains("UID:"));
        assert!(!links.ical.contains("CALSCALE"));
        assert!(links.ical.contains("%0APRODID:-//campaignkit//calendar-links//EN%0A"));
    }

    #[test]
    fn ical_text_values_are_escaped() {
        let mut spec = launch();
        spec.title = "Launch, Q&A; part\\1".to_string();
        spec.description = Some("Line one\nLine two, with; semis".to_string());
        let links = build_calendar_links(&spec, &utc_ctx()).unwrap();

        assert!(
            links.ical.contains(r"%0ASUMMARY:Launch\, Q&A\; part\\1%0A"),
            "{}",
            links.ical
        );
        assert!(
            links
                .ical
                .contains(r"%0ADESCRIPTION:Line one\nLine two\, with\; semis%0A"),
            "{}",
            links.ical
        );
        assert!(!links.ical.contains('\n'));
    }

    #[test]
    fn optional_fields_default_to_empty() {
        let mut spec = launch();
        spec.description = None;
        spec.location = None;
        let links = build_calendar_links(&spec, &utc_ctx()).unwrap();
        assert!(links.google.ends_with("&details=&location="));
        assert!(links.yahoo.ends_with("&desc=&in_loc="));
    }

    #[test]
    fn fields_are_encoded_independently() {
        let mut spec = launch();
        spec.title = "Q&A: Launch?".to_string();
        spec.location = Some("Room #4".to_string());
        let links = build_calendar_links(&spec, &utc_ctx()).unwrap();
        assert_eq!(query_value(&links.google, "text"), "Q%26A%3A%20Launch%3F");
        assert_eq!(query_value(&links.google, "location"), "Room%20%234");
        // Template characters are not re-encoded.
        assert!(links.google.contains("&dates=20240101T100000Z/20240101T110000Z&"));
    }

    #[test]
    fn local_fields_are_converted_to_utc() {
        let ctx = CalendarContext {
            tz: Berlin,
            page_url: "https://toolkit.example.com/".to_string(),
        };
        let links = build_calendar_links(&launch(), &ctx).unwrap();
        assert_eq!(
            query_value(&links.google, "dates"),
            "20240101T090000Z/20240101T100000Z"
        );
        assert!(links.ical.contains("%0ADTSTART:20240101T090000Z%0A"));
        assert_eq!(query_value(&links.outlook, "startdt"), "2024-01-01T09:00:00.000Z");
    }

    #[test]
    fn end_before_start_is_permitted() {
        let mut spec = launch();
        spec.end_date = NaiveDate::from_ymd_opt(2023, 12, 31);
        let links = build_calendar_links(&spec, &utc_ctx()).unwrap();
        assert_eq!(
            query_value(&links.google, "dates"),
            "20240101T100000Z/20231231T110000Z"
        );
    }

    #[test]
    fn missing_required_fields_are_rejected() {
        let cases: [fn(&mut EventSpec); 5] = [
            |s| s.title.clear(),
            |s| s.start_date = None,
            |s| s.start_time = None,
            |s| s.end_date = None,
            |s| s.end_time = None,
        ];
        for clear in cases {
            let mut spec = launch();
            clear(&mut spec);
            assert_eq!(
                build_calendar_links(&spec, &utc_ctx()),
                Err(ValidationError::MissingRequiredField)
            );
        }
    }

    #[test]
    fn building_twice_is_byte_identical() {
        let first = build_calendar_links(&launch(), &utc_ctx()).unwrap();
        let second = build_calendar_links(&launch(), &utc_ctx()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn iter_yields_providers_in_fixed_order() {
        let links = build_calendar_links(&launch(), &utc_ctx()).unwrap();
        let keys: Vec<&str> = links.iter().map(|(p, _)| p.key()).collect();
        assert_eq!(keys, ["google", "outlook", "yahoo", "ical"]);
        assert_eq!(links.get(CalendarProvider::Yahoo), links.yahoo);
    }

    #[test]
    fn strip_unfolds_and_filters() {
        let raw = "BEGIN:VCALENDAR\r\nPRODID:ICALENDAR-RS\r\nCALSCALE:GREGORIAN\r\n\
                   BEGIN:VEVENT\r\nDTSTAMP:20250101T000000Z\r\nSUMMARY:A long\r\n  title\r\n\
                   UID:abc\r\nEND:VEVENT\r\nEND:VCALENDAR\r\n";
        assert_eq!(
            strip_ics_bloat(raw),
            "BEGIN:VCALENDAR\nPRODID:-//campaignkit//calendar-links//EN\nBEGIN:VEVENT\n\
             SUMMARY:A long title\nEND:VEVENT\nEND:VCALENDAR"
        );
    }
}
