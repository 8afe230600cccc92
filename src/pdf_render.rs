//! PDF page rasterization through the poppler command-line tools.
//!
//! `pdfinfo` answers the page count and `pdftoppm` renders a single page to a
//! PNG on stdout. Rotation is applied to the decoded raster so the tools only
//! ever see a page number and a resolution.

use anyhow::{Context, Result, anyhow, bail};
use image::{DynamicImage, ImageFormat};
use once_cell::sync::Lazy;
use regex::Regex;
use std::path::Path;
use std::process::Command;
use tracing::{debug, info};

pub const MIN_ZOOM: f32 = 0.5;
pub const MAX_ZOOM: f32 = 3.0;
pub const ZOOM_STEP: f32 = 0.2;
pub const ROTATION_STEP: u16 = 90;

const POINTS_PER_INCH: f32 = 72.0;

static PAGES_LINE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^Pages:\s+(\d+)\s*$").expect("valid pdfinfo pages regex"));

/// Decoded page raster, RGBA8, row-major.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct PdfRenderer {
    pdfinfo_bin: String,
    pdftoppm_bin: String,
}

impl PdfRenderer {
    pub fn new(pdfinfo_bin: impl Into<String>, pdftoppm_bin: impl Into<String>) -> Self {
        Self {
            pdfinfo_bin: pdfinfo_bin.into(),
            pdftoppm_bin: pdftoppm_bin.into(),
        }
    }

    pub fn page_count(&self, path: &Path) -> Result<u32> {
        let output = Command::new(&self.pdfinfo_bin)
            .arg(path)
            .output()
            .with_context(|| {
                format!(
                    "Failed to start {} for {}",
                    self.pdfinfo_bin,
                    path.display()
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} failed for {}: {}",
                self.pdfinfo_bin,
                path.display(),
                stderr.trim()
            );
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let pages = parse_page_count(&stdout)
            .with_context(|| format!("Unexpected pdfinfo output for {}", path.display()))?;
        info!(path = %path.display(), pages, "Read PDF page count");
        Ok(pages)
    }

    pub fn render_page(
        &self,
        path: &Path,
        page: u32,
        zoom: f32,
        rotation: u16,
    ) -> Result<RenderedPage> {
        let dpi = render_dpi(zoom);
        debug!(path = %path.display(), page, zoom, rotation, dpi, "Rendering PDF page");

        let output = Command::new(&self.pdftoppm_bin)
            .arg("-f")
            .arg(page.to_string())
            .arg("-l")
            .arg(page.to_string())
            .arg("-r")
            .arg(dpi.to_string())
            .arg("-png")
            .arg("-singlefile")
            .arg(path)
            .output()
            .with_context(|| {
                format!(
                    "Failed to start {} for {}",
                    self.pdftoppm_bin,
                    path.display()
                )
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            bail!(
                "{} could not render page {page} of {}: {}",
                self.pdftoppm_bin,
                path.display(),
                stderr.trim()
            );
        }
        if output.stdout.is_empty() {
            return Err(anyhow!(
                "{} produced no image for page {page}",
                self.pdftoppm_bin
            ));
        }

        let decoded = image::load_from_memory_with_format(&output.stdout, ImageFormat::Png)
            .context("Failed to decode rendered page PNG")?;
        let rgba = rotate(decoded, rotation).to_rgba8();
        let (width, height) = rgba.dimensions();
        info!(page, width, height, "Rendered PDF page");
        Ok(RenderedPage {
            width,
            height,
            rgba: rgba.into_raw(),
        })
    }
}

pub fn parse_page_count(pdfinfo_output: &str) -> Result<u32> {
    let captures = PAGES_LINE
        .captures(pdfinfo_output)
        .ok_or_else(|| anyhow!("no Pages: line"))?;
    let pages: u32 = captures[1].parse().context("page count out of range")?;
    if pages == 0 {
        bail!("document reports zero pages");
    }
    Ok(pages)
}

pub fn render_dpi(zoom: f32) -> u32 {
    (POINTS_PER_INCH * clamp_zoom(zoom)).round() as u32
}

pub fn clamp_zoom(zoom: f32) -> f32 {
    if !zoom.is_finite() {
        return crate::config::AppConfig::default().default_zoom;
    }
    zoom.clamp(MIN_ZOOM, MAX_ZOOM)
}

/// Step zoom by `ZOOM_STEP`, rounded to one decimal so repeated steps stay on
/// the grid.
pub fn step_zoom(zoom: f32, steps: i32) -> f32 {
    let next = zoom + ZOOM_STEP * steps as f32;
    clamp_zoom((next * 10.0).round() / 10.0)
}

pub fn next_rotation(rotation: u16) -> u16 {
    (rotation + ROTATION_STEP) % 360
}

fn rotate(image: DynamicImage, rotation: u16) -> DynamicImage {
    match rotation % 360 {
        90 => image.rotate90(),
        180 => image.rotate180(),
        270 => image.rotate270(),
        _ => image,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::RgbaImage;

    #[test]
    fn parses_pages_line() {
        let output = "Title:          Tables\nProducer:       LaTeX\nPages:          12\nEncrypted:      no\n";
        assert_eq!(parse_page_count(output).expect("pages present"), 12);
    }

    #[test]
    fn missing_or_zero_pages_is_an_error() {
        assert!(parse_page_count("Title: x\n").is_err());
        assert!(parse_page_count("Pages:          0\n").is_err());
    }

    #[test]
    fn zoom_steps_stay_within_bounds() {
        assert_eq!(step_zoom(1.2, 1), 1.4);
        assert_eq!(step_zoom(1.2, -1), 1.0);
        assert_eq!(step_zoom(3.0, 1), MAX_ZOOM);
        assert_eq!(step_zoom(0.5, -1), MIN_ZOOM);
        assert_eq!(clamp_zoom(f32::NAN), 1.2);
    }

    #[test]
    fn dpi_follows_zoom() {
        assert_eq!(render_dpi(1.0), 72);
        assert_eq!(render_dpi(1.2), 86);
        assert_eq!(render_dpi(10.0), 216);
    }

    #[test]
    fn rotation_wraps_at_full_turn() {
        assert_eq!(next_rotation(0), 90);
        assert_eq!(next_rotation(180), 270);
        assert_eq!(next_rotation(270), 0);
    }

    #[test]
    fn quarter_turns_swap_dimensions() {
        let source = DynamicImage::ImageRgba8(RgbaImage::new(4, 2));
        let turned = rotate(source.clone(), 90);
        assert_eq!((turned.width(), turned.height()), (2, 4));
        let flipped = rotate(source, 180);
        assert_eq!((flipped.width(), flipped.height()), (4, 2));
    }

    #[test]
    fn missing_binary_reports_error() {
        let renderer = PdfRenderer::new("pdfinfo-does-not-exist", "pdftoppm-does-not-exist");
        assert!(renderer.page_count(Path::new("missing.pdf")).is_err());
        assert!(
            renderer
                .render_page(Path::new("missing.pdf"), 1, 1.2, 0)
                .is_err()
        );
    }
}
