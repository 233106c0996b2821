use std::path::PathBuf;

use anyhow::Result;
use campaignkit_core::qr::DEFAULT_COLOR;
use campaignkit_core::surface::{DirectorySink, FileSink, NoticeKind, Notifier};
use campaignkit_core::{
    build_qr_request, export_png, ChartApiService, LoadedImage, QrContent, QrMode, QrSize, QrSpec,
    ValidationError,
};
use owo_colors::OwoColorize;

use super::{prompt_select, prompt_text, prompt_with_retry, Form};
use crate::fetch::ImageFetcher;
use crate::surface::Surface;
use crate::utils::tui::create_spinner;

pub struct QrForm {
    spec: QrSpec,
    service: ChartApiService,
}

impl QrForm {
    pub fn new(spec: QrSpec, service: ChartApiService) -> Self {
        Self { spec, service }
    }
}

impl Form for QrForm {
    type Output = String;

    fn prompt(&mut self) -> Result<()> {
        let spec = &mut self.spec;

        let modes = ["URL", "Text"];
        let current = match spec.content.mode() {
            QrMode::Url => 0,
            QrMode::Text => 1,
        };
        let value = spec.content.value().to_string();
        spec.content = match prompt_select("Content type", &modes, Some(current))? {
            0 => QrContent::Url(prompt_text("Website URL", &value)?),
            _ => QrContent::Text(prompt_text("Text content", &value)?),
        };

        let labels: Vec<&str> = QrSize::ALL.iter().map(|s| s.label()).collect();
        let current = QrSize::ALL.iter().position(|s| *s == spec.size);
        spec.size = QrSize::ALL[prompt_select("Size", &labels, current)?];

        spec.color = prompt_with_retry("QR code color", Some(spec.color.clone()), parse_color)?;

        Ok(())
    }

    fn generate(&self) -> Result<String, ValidationError> {
        build_qr_request(&self.spec, &self.service)
    }

    fn deliver(&self, url: &String, surface: &Surface) {
        surface.deliver(url, "QR code URL");
    }
}

/// Where `--download` puts the PNG.
pub struct DownloadTarget {
    pub dir: PathBuf,
}

pub async fn run(form: QrForm, download: Option<DownloadTarget>, surface: &Surface) -> Result<bool> {
    let Some(url) = super::run_form(form, surface)? else {
        return Ok(false);
    };

    let Some(target) = download else {
        return Ok(true);
    };

    let spinner = create_spinner("Downloading QR code".dimmed().to_string());
    let loaded = match ImageFetcher::new()?.fetch(&url).await {
        Ok(image) => Some(image),
        Err(e) => {
            tracing::warn!(error = %e, "QR image fetch failed");
            None
        }
    };
    spinner.finish_and_clear();

    let saved = save_png(loaded.as_ref(), &DirectorySink::new(target.dir), &surface.notifier)?;
    if let Some(path) = &saved {
        println!("{}", path.display().dimmed());
    }

    Ok(saved.is_some())
}

/// Export the loaded image and hand it to `sink`. Export failures are
/// reported through `notifier`; only file-system errors bubble up.
pub(crate) fn save_png(
    loaded: Option<&LoadedImage>,
    sink: &impl FileSink,
    notifier: &impl Notifier,
) -> Result<Option<PathBuf>> {
    let blob = match export_png(loaded) {
        Ok(blob) => blob,
        Err(e) => {
            notifier.export_failed(&e);
            return Ok(None);
        }
    };

    let path = sink.save(&blob)?;
    notifier.notify(
        NoticeKind::Success,
        "QR Code downloaded",
        "Your QR code has been downloaded as a PNG file",
    );

    Ok(Some(path))
}

/// Accept `#rrggbb` or `rrggbb`; normalize to lower-case with a `#`.
pub fn parse_color(input: &str) -> Result<String> {
    let hex = input.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        anyhow::bail!("Invalid color '{}'. Expected a hex value like {}", input, DEFAULT_COLOR);
    }
    Ok(format!("#{}", hex.to_ascii_lowercase()))
}

pub fn content_from_args(url: Option<String>, text: Option<String>) -> QrContent {
    match (url, text) {
        (_, Some(text)) => QrContent::Text(text),
        (url, None) => QrContent::Url(url.unwrap_or_default()),
    }
}
