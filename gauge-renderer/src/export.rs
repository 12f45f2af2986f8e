//! Gauge export to image/document formats.
//!
//! Renders a [`GaugeSpec`] to PNG, JPEG, SVG, or PDF using an SVG
//! intermediate representation and the resvg/tiny-skia rasterization
//! pipeline.

use std::str::FromStr;

use gauge_core::GaugeSpec;
use image::ImageEncoder;

use crate::error::{RenderError, RenderResult};
use crate::svg::render_document;
use crate::theme::GaugeTheme;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG vector graphics (returns the SVG XML string as UTF-8 bytes).
    Svg,
    /// PDF document with an embedded raster image.
    Pdf,
}

impl ExportFormat {
    /// MIME type for HTTP responses.
    #[must_use]
    pub const fn content_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Svg => "image/svg+xml",
            Self::Pdf => "application/pdf",
        }
    }

    /// Conventional file extension without the dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpg",
            Self::Svg => "svg",
            Self::Pdf => "pdf",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(Self::Png),
            "jpeg" | "jpg" => Ok(Self::Jpeg),
            "svg" => Ok(Self::Svg),
            "pdf" => Ok(Self::Pdf),
            other => Err(RenderError::Export(format!("Unsupported format: {other}"))),
        }
    }
}

/// Configuration for gauge export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Output width in pixels (default: the gauge's configured width).
    pub width: Option<u32>,
    /// Output height in pixels (default: the gauge's configured height).
    pub height: Option<u32>,
    /// DPI for print export (default: 96.0).
    pub dpi: f64,
    /// Background color as RGBA bytes, used when flattening to JPEG.
    pub background: [u8; 4],
    /// JPEG quality 1-100 (default: 85).
    pub jpeg_quality: u8,
    /// Scale factor (e.g. 2.0 for retina).
    pub scale: f64,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            dpi: 96.0,
            background: [255, 255, 255, 255],
            jpeg_quality: 85,
            scale: 1.0,
        }
    }
}

/// Exports a [`GaugeSpec`] to various image and document formats.
pub struct GaugeExporter {
    config: ExportConfig,
    theme: GaugeTheme,
}

impl GaugeExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self {
            config,
            theme: GaugeTheme::default(),
        }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Replace the drawing theme.
    #[must_use]
    pub fn with_theme(mut self, theme: GaugeTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Export a gauge to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge cannot be rendered or encoded.
    pub fn export(&self, spec: &GaugeSpec, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Png => self.render_to_png(spec),
            ExportFormat::Jpeg => self.render_to_jpeg(spec),
            ExportFormat::Svg => {
                let svg = self.render_to_svg(spec)?;
                Ok(svg.into_bytes())
            }
            ExportFormat::Pdf => self.render_to_pdf(spec),
        }
    }

    /// Export a gauge as a base64 data URI, e.g. for embedding in HTML.
    ///
    /// # Errors
    ///
    /// Returns an error if the gauge cannot be rendered or encoded.
    pub fn to_data_uri(&self, spec: &GaugeSpec, format: ExportFormat) -> RenderResult<String> {
        use base64::Engine;
        let bytes = self.export(spec, format)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(&bytes);
        Ok(format!("data:{};base64,{encoded}", format.content_type()))
    }

    /// Export the gauge to an SVG string.
    ///
    /// # Errors
    ///
    /// Returns an error if the output dimensions leave no room to draw.
    pub fn render_to_svg(&self, spec: &GaugeSpec) -> RenderResult<String> {
        let (out_w, out_h) = self.output_dimensions(spec);
        render_document(spec, &self.theme, out_w, out_h, self.config.scale)
    }

    /// Export the gauge to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    pub fn render_to_png(&self, spec: &GaugeSpec) -> RenderResult<Vec<u8>> {
        let svg_string = self.render_to_svg(spec)?;
        let pixmap = self.rasterize_svg(&svg_string)?;

        pixmap
            .encode_png()
            .map_err(|e| RenderError::Export(format!("PNG encoding failed: {e}")))
    }

    /// Export the gauge to JPEG bytes.
    ///
    /// JPEG has no alpha channel, so the pixmap is flattened onto the
    /// configured background color.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or encoding fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_to_jpeg(&self, spec: &GaugeSpec) -> RenderResult<Vec<u8>> {
        let svg_string = self.render_to_svg(spec)?;
        let pixmap = self.rasterize_svg(&svg_string)?;

        let (width, height) = (pixmap.width(), pixmap.height());
        let bg = &self.config.background;
        let mut rgb_data = Vec::with_capacity((width * height * 3) as usize);
        for pixel in pixmap.data().chunks_exact(4) {
            let alpha = f32::from(pixel[3]) / 255.0;
            let inv = 1.0 - alpha;
            rgb_data.push((f32::from(pixel[0]).mul_add(alpha, f32::from(bg[0]) * inv)) as u8);
            rgb_data.push((f32::from(pixel[1]).mul_add(alpha, f32::from(bg[1]) * inv)) as u8);
            rgb_data.push((f32::from(pixel[2]).mul_add(alpha, f32::from(bg[2]) * inv)) as u8);
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        let encoder =
            image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality);
        encoder
            .write_image(&rgb_data, width, height, image::ColorType::Rgb8.into())
            .map_err(|e| RenderError::Export(format!("JPEG encoding failed: {e}")))?;

        Ok(buf.into_inner())
    }

    /// Export the gauge to PDF bytes.
    ///
    /// Renders the gauge as a raster image and embeds it full-bleed in a
    /// single PDF page sized from the configured DPI.
    ///
    /// # Errors
    ///
    /// Returns an error if rendering or PDF generation fails.
    pub fn render_to_pdf(&self, spec: &GaugeSpec) -> RenderResult<Vec<u8>> {
        let png_data = self.render_to_png(spec)?;
        let (out_w, out_h) = self.output_dimensions(spec);

        // Convert pixel dimensions to mm: pixels / dpi * 25.4
        let page_width_mm = f64::from(out_w) / self.config.dpi * 25.4;
        let page_height_mm = f64::from(out_h) / self.config.dpi * 25.4;

        let (doc, page1, layer1) = printpdf::PdfDocument::new(
            "Gauge Export",
            printpdf::Mm(page_width_mm),
            printpdf::Mm(page_height_mm),
            "Layer 1",
        );

        let current_layer = doc.get_page(page1).get_layer(layer1);

        // Decode PNG using printpdf's bundled image crate for compatibility
        let dynamic_image = printpdf::image_crate::load_from_memory(&png_data)
            .map_err(|e| RenderError::Export(format!("Failed to decode PNG for PDF: {e}")))?;

        let pdf_image = printpdf::Image::from_dynamic_image(&dynamic_image);

        // At this DPI the image's natural size matches the page exactly.
        let transform = printpdf::ImageTransform {
            translate_x: Some(printpdf::Mm(0.0)),
            translate_y: Some(printpdf::Mm(0.0)),
            dpi: Some(self.config.dpi),
            ..Default::default()
        };

        pdf_image.add_to_layer(current_layer, transform);

        doc.save_to_bytes()
            .map_err(|e| RenderError::Export(format!("PDF save failed: {e}")))
    }

    /// Get output dimensions (width, height) in pixels after scaling.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn output_dimensions(&self, spec: &GaugeSpec) -> (u32, u32) {
        let (spec_w, spec_h) = spec.pixel_size();
        let base_w = self.config.width.unwrap_or(spec_w);
        let base_h = self.config.height.unwrap_or(spec_h);

        let out_w = (f64::from(base_w) * self.config.scale) as u32;
        let out_h = (f64::from(base_h) * self.config.scale) as u32;
        (out_w.max(1), out_h.max(1))
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize_svg(&self, svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
        let mut opt = usvg::Options::default();
        opt.font_family = self.theme.font_family.clone();
        opt.fontdb_mut().load_system_fonts();

        let tree = usvg::Tree::from_str(svg_string, &opt)
            .map_err(|e| RenderError::Svg(format!("SVG parsing failed: {e}")))?;

        let px_w = tree.size().width() as u32;
        let px_h = tree.size().height() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Export("Failed to create pixmap".to_string()))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::GaugeSize;

    #[test]
    fn test_format_parsing() {
        assert_eq!("png".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("PNG".parse::<ExportFormat>().unwrap(), ExportFormat::Png);
        assert_eq!("jpeg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert_eq!("jpg".parse::<ExportFormat>().unwrap(), ExportFormat::Jpeg);
        assert_eq!("svg".parse::<ExportFormat>().unwrap(), ExportFormat::Svg);
        assert_eq!("pdf".parse::<ExportFormat>().unwrap(), ExportFormat::Pdf);

        let err = "bmp".parse::<ExportFormat>().unwrap_err();
        assert!(err.to_string().contains("Unsupported format"));
    }

    #[test]
    fn test_content_types() {
        assert_eq!(ExportFormat::Png.content_type(), "image/png");
        assert_eq!(ExportFormat::Jpeg.content_type(), "image/jpeg");
        assert_eq!(ExportFormat::Svg.content_type(), "image/svg+xml");
        assert_eq!(ExportFormat::Pdf.content_type(), "application/pdf");
    }

    #[test]
    fn test_svg_export_uses_configured_size() {
        let exporter = GaugeExporter::with_defaults();
        let svg = exporter
            .render_to_svg(&GaugeSpec::default())
            .expect("svg export");
        assert!(svg.contains("width=\"500\""));
        assert!(svg.contains("height=\"250\""));
    }

    #[test]
    fn test_png_export_produces_valid_bytes() {
        let exporter = GaugeExporter::with_defaults();
        let png = exporter
            .render_to_png(&GaugeSpec::default())
            .expect("png export");

        // PNG magic bytes: \x89PNG
        assert!(png.len() > 8);
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_jpeg_export_produces_valid_bytes() {
        let exporter = GaugeExporter::with_defaults();
        let jpeg = exporter
            .render_to_jpeg(&GaugeSpec::default())
            .expect("jpeg export");

        // JPEG magic bytes: FFD8
        assert!(jpeg.len() > 2);
        assert_eq!(jpeg[0], 0xFF);
        assert_eq!(jpeg[1], 0xD8);
    }

    #[test]
    fn test_pdf_export_produces_valid_bytes() {
        let exporter = GaugeExporter::with_defaults();
        let pdf = exporter
            .render_to_pdf(&GaugeSpec::default())
            .expect("pdf export");

        // PDF header: %PDF-
        assert!(pdf.len() > 5);
        assert_eq!(&pdf[0..5], b"%PDF-");
    }

    #[test]
    fn test_export_dispatch() {
        let exporter = GaugeExporter::with_defaults();
        let spec = GaugeSpec::default();

        let png = exporter.export(&spec, ExportFormat::Png).expect("png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);

        let jpeg = exporter.export(&spec, ExportFormat::Jpeg).expect("jpeg");
        assert_eq!(jpeg[0], 0xFF);

        let svg = exporter.export(&spec, ExportFormat::Svg).expect("svg");
        let svg_str = String::from_utf8(svg).expect("utf8");
        assert!(svg_str.starts_with("<svg"));

        let pdf = exporter.export(&spec, ExportFormat::Pdf).expect("pdf");
        assert_eq!(&pdf[0..5], b"%PDF-");
    }

    #[test]
    fn test_custom_dimensions() {
        let exporter = GaugeExporter::new(ExportConfig {
            width: Some(400),
            height: Some(300),
            ..Default::default()
        });

        let svg = exporter.render_to_svg(&GaugeSpec::default()).expect("svg");
        assert!(svg.contains("width=\"400\""));
        assert!(svg.contains("height=\"300\""));
    }

    #[test]
    fn test_scale_factor() {
        let exporter = GaugeExporter::new(ExportConfig {
            scale: 2.0,
            ..Default::default()
        });

        let svg = exporter.render_to_svg(&GaugeSpec::default()).expect("svg");
        // At 2x scale, output doubles but the drawing space does not
        assert!(svg.contains("width=\"1000\""));
        assert!(svg.contains("height=\"500\""));
        assert!(svg.contains("viewBox=\"0 0 500 250\""));
    }

    #[test]
    fn test_small_gauge_png() {
        let spec = GaugeSpec::default().with_size(GaugeSize {
            width: None,
            height: 120,
        });
        let exporter = GaugeExporter::with_defaults();
        let png = exporter.render_to_png(&spec).expect("small png");
        assert_eq!(&png[0..4], &[137, 80, 78, 71]);
    }

    #[test]
    fn test_data_uri_has_mime_prefix() {
        let exporter = GaugeExporter::with_defaults();
        let uri = exporter
            .to_data_uri(&GaugeSpec::default(), ExportFormat::Png)
            .expect("data uri");
        assert!(uri.starts_with("data:image/png;base64,"));
        assert!(uri.len() > 100);
    }
}
