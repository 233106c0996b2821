//! QR code requests against an external image service, and PNG export of
//! the image it returns.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use image::{ImageFormat, RgbaImage};

use crate::encode::encode_component;
use crate::error::{ExportError, ValidationError};
use crate::surface::FileBlob;

/// Foreground color that needs no color parameter.
pub const DEFAULT_COLOR: &str = "#000000";

/// Google Chart API endpoint. Deprecated upstream, so it is only the default.
pub const DEFAULT_QR_ENDPOINT: &str = "https://chart.googleapis.com/chart";

pub const QR_FILENAME: &str = "qrcode.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QrMode {
    Url,
    Text,
}

impl QrMode {
    pub fn label(&self) -> &'static str {
        match self {
            QrMode::Url => "URL",
            QrMode::Text => "text",
        }
    }
}

/// What gets encoded. The variant is the form's url/text mode switch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QrContent {
    Url(String),
    Text(String),
}

impl QrContent {
    pub fn mode(&self) -> QrMode {
        match self {
            QrContent::Url(_) => QrMode::Url,
            QrContent::Text(_) => QrMode::Text,
        }
    }

    pub fn value(&self) -> &str {
        match self {
            QrContent::Url(v) | QrContent::Text(v) => v,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QrSize {
    Small,
    #[default]
    Medium,
    Large,
    ExtraLarge,
}

impl QrSize {
    pub const ALL: [QrSize; 4] = [QrSize::Small, QrSize::Medium, QrSize::Large, QrSize::ExtraLarge];

    pub fn pixels(&self) -> u32 {
        match self {
            QrSize::Small => 100,
            QrSize::Medium => 200,
            QrSize::Large => 300,
            QrSize::ExtraLarge => 500,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            QrSize::Small => "Small (100x100)",
            QrSize::Medium => "Medium (200x200)",
            QrSize::Large => "Large (300x300)",
            QrSize::ExtraLarge => "Extra Large (500x500)",
        }
    }
}

impl fmt::Display for QrSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.pixels())
    }
}

impl FromStr for QrSize {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        QrSize::ALL
            .into_iter()
            .find(|size| size.pixels().to_string() == s)
            .ok_or_else(|| format!("Unsupported QR size '{}' (expected 100, 200, 300 or 500)", s))
    }
}

/// Fields of the QR form.
#[derive(Debug, Clone)]
pub struct QrSpec {
    pub content: QrContent,
    pub size: QrSize,
    /// Hex RGB with a leading `#`, e.g. `#ff0000`.
    pub color: String,
}

/// Renders QR images over HTTP. Implementations only shape the request URL;
/// fetching is left to the caller.
pub trait QrImageService {
    /// `color` is a hex value without `#`, present only for non-default colors.
    fn request_url(&self, encoded_content: &str, size: QrSize, color: Option<&str>) -> String;
}

/// Chart-API style service: `?cht=qr&chs=WxH&chl=...[&chco=...]`.
#[derive(Debug, Clone)]
pub struct ChartApiService {
    endpoint: String,
}

impl ChartApiService {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl Default for ChartApiService {
    fn default() -> Self {
        Self::new(DEFAULT_QR_ENDPOINT)
    }
}

impl QrImageService for ChartApiService {
    fn request_url(&self, encoded_content: &str, size: QrSize, color: Option<&str>) -> String {
        let px = size.pixels();
        let mut url = format!(
            "{}?cht=qr&chs={}x{}&chl={}",
            self.endpoint, px, px, encoded_content
        );
        if let Some(hex) = color {
            url.push_str("&chco=");
            url.push_str(hex);
        }
        url
    }
}

/// Build the image request URL for `spec`.
pub fn build_qr_request(
    spec: &QrSpec,
    service: &impl QrImageService,
) -> Result<String, ValidationError> {
    let content = spec.content.value();
    if content.is_empty() {
        return Err(ValidationError::MissingContent {
            mode: spec.content.mode(),
        });
    }

    let color = (spec.color != DEFAULT_COLOR)
        .then(|| spec.color.strip_prefix('#').unwrap_or(&spec.color));

    let url = service.request_url(&encode_component(content), spec.size, color);
    tracing::debug!(%url, "built QR request");

    Ok(url)
}

/// Raw bytes of the image the service returned.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub bytes: Vec<u8>,
}

/// Redraw the loaded image onto a same-sized RGBA surface and encode it as PNG.
pub fn export_png(loaded: Option<&LoadedImage>) -> Result<FileBlob, ExportError> {
    let loaded = loaded.ok_or(ExportError::NotLoaded)?;

    let decoded =
        image::load_from_memory(&loaded.bytes).map_err(|e| ExportError::Decode(e.to_string()))?;

    let mut surface = RgbaImage::new(decoded.width(), decoded.height());
    image::imageops::overlay(&mut surface, &decoded.to_rgba8(), 0, 0);

    let mut png = Cursor::new(Vec::new());
    surface
        .write_to(&mut png, ImageFormat::Png)
        .map_err(|e| ExportError::Encode(e.to_string()))?;

    tracing::debug!(
        width = surface.width(),
        height = surface.height(),
        "exported QR image"
    );

    Ok(FileBlob {
        filename: QR_FILENAME.to_string(),
        mime: "image/png".to_string(),
        bytes: png.into_inner(),
    })
}
