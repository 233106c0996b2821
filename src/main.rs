mod commands;
mod fetch;
mod surface;
mod utils;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use campaignkit_core::config::{parse_time_zone, ToolkitConfig};
use campaignkit_core::{
    CalendarContext, CalendarProvider, CampaignType, ChartApiService, QrSize, QrSpec, Region,
    UtmParams,
};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use commands::calendar::CalendarForm;
use commands::name::NameForm;
use commands::qr::{DownloadTarget, QrForm};
use commands::utm::UtmForm;
use surface::Surface;

#[derive(Parser)]
#[command(name = "campaignkit")]
#[command(about = "Campaign names, add-to-calendar links, UTM URLs and QR codes")]
struct Cli {
    /// Copy the result to the clipboard
    #[arg(long, global = true)]
    copy: bool,

    /// Prompt for each field, starting from the values given as flags
    #[arg(short, long, global = true)]
    interactive: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a campaign name (region_type_description_YYYYMMDD)
    Name {
        /// namer, emea, apac, latam, mea or global
        #[arg(short, long)]
        region: Option<Region>,

        /// email, social, display, search, event, webinar, content or pr
        #[arg(short = 't', long = "type")]
        campaign_type: Option<CampaignType>,

        #[arg(short, long)]
        description: Option<String>,

        /// Campaign date (YYYY-MM-DD, defaults to today)
        #[arg(long, value_parser = commands::name::parse_date)]
        date: Option<NaiveDate>,
    },
    /// Build add-to-calendar links for an event
    Calendar {
        #[arg(long)]
        title: Option<String>,

        #[arg(long)]
        description: Option<String>,

        #[arg(short, long)]
        location: Option<String>,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<String>,

        /// Start time (HH:MM)
        #[arg(long)]
        start_time: Option<String>,

        /// End date (YYYY-MM-DD)
        #[arg(long)]
        end_date: Option<String>,

        /// End time (HH:MM)
        #[arg(long)]
        end_time: Option<String>,

        /// Time zone the dates and times are in (defaults to config, then system)
        #[arg(long)]
        tz: Option<String>,

        /// Only print this link: google, outlook, yahoo or ical
        #[arg(short, long)]
        provider: Option<CalendarProvider>,
    },
    /// Add UTM tracking parameters to a URL
    Utm {
        base_url: Option<String>,

        #[arg(long)]
        source: Option<String>,

        #[arg(long)]
        medium: Option<String>,

        #[arg(long)]
        campaign: Option<String>,

        #[arg(long)]
        term: Option<String>,

        #[arg(long)]
        content: Option<String>,
    },
    /// Build a QR code image URL, optionally downloading it as PNG
    Qr {
        #[arg(long, conflicts_with = "text")]
        url: Option<String>,

        #[arg(long)]
        text: Option<String>,

        /// Image size in pixels: 100, 200, 300 or 500
        #[arg(short, long, default_value_t = QrSize::Medium)]
        size: QrSize,

        /// Hex color, e.g. "#ff0000"
        #[arg(short, long, default_value = campaignkit_core::qr::DEFAULT_COLOR, value_parser = commands::qr::parse_color)]
        color: String,

        /// Fetch the image and save it as qrcode.png
        #[arg(long)]
        download: bool,

        /// Directory to save into (defaults to download_dir from config)
        #[arg(short, long, requires = "download")]
        out: Option<PathBuf>,
    },
    /// Show config path and effective settings
    Config,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ToolkitConfig::load()?;
    let surface = Surface::new(cli.copy, cli.interactive);

    let succeeded = match cli.command {
        Commands::Name {
            region,
            campaign_type,
            description,
            date,
        } => commands::name::run(NameForm::new(region, campaign_type, description, date), &surface)?,
        Commands::Calendar {
            title,
            description,
            location,
            start_date,
            start_time,
            end_date,
            end_time,
            tz,
            provider,
        } => {
            let event = commands::calendar::event_from_args(
                title,
                description,
                location,
                start_date.as_deref(),
                start_time.as_deref(),
                end_date.as_deref(),
                end_time.as_deref(),
            )?;
            let tz = match tz {
                Some(name) => parse_time_zone(&name)?,
                None => config.time_zone()?,
            };
            let context = CalendarContext {
                tz,
                page_url: config.page_url.clone(),
            };
            commands::calendar::run(CalendarForm::new(event, context, provider), &surface)?
        }
        Commands::Utm {
            base_url,
            source,
            medium,
            campaign,
            term,
            content,
        } => {
            let params = UtmParams {
                source,
                medium,
                campaign,
                term,
                content,
            };
            commands::utm::run(UtmForm::new(base_url, params), &surface)?
        }
        Commands::Qr {
            url,
            text,
            size,
            color,
            download,
            out,
        } => {
            let spec = QrSpec {
                content: commands::qr::content_from_args(url, text),
                size,
                color,
            };
            let form = QrForm::new(spec, ChartApiService::new(config.qr_endpoint.clone()));
            let target = download.then(|| DownloadTarget {
                dir: out.unwrap_or_else(|| config.download_path()),
            });
            commands::qr::run(form, target, &surface).await?
        }
        Commands::Config => {
            commands::config::run(&config)?;
            true
        }
    };

    Ok(if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn copy_and_interactive_are_global() {
        let cli = Cli::try_parse_from(["campaignkit", "utm", "https://example.com", "--copy", "-i"])
            .unwrap();
        assert!(cli.copy);
        assert!(cli.interactive);
    }

    #[test]
    fn qr_out_requires_download() {
        let result = Cli::try_parse_from(["campaignkit", "qr", "--url", "https://x.test", "--out", "/tmp"]);
        assert!(result.is_err());
    }

    #[test]
    fn qr_size_parses_pixels() {
        let cli = Cli::try_parse_from(["campaignkit", "qr", "--text", "hi", "--size", "500"]).unwrap();
        match cli.command {
            Commands::Qr { size, .. } => assert_eq!(size, QrSize::ExtraLarge),
            _ => panic!("expected qr command"),
        }
    }

    #[test]
    fn name_parses_region_and_type() {
        let cli = Cli::try_parse_from([
            "campaignkit",
            "name",
            "--region",
            "emea",
            "--type",
            "webinar",
            "--description",
            "Partner Summit",
            "--date",
            "2025-10-09",
        ])
        .unwrap();
        match cli.command {
            Commands::Name {
                region,
                campaign_type,
                date,
                ..
            } => {
                assert_eq!(region, Some(Region::Emea));
                assert_eq!(campaign_type, Some(CampaignType::Webinar));
                assert_eq!(date, NaiveDate::from_ymd_opt(2025, 10, 9));
            }
            _ => panic!("expected name command"),
        }
    }
}
