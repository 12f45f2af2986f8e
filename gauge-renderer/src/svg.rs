//! Gauge SVG composition.
//!
//! Draws the full-sweep track, the band-colored value arc, the centered
//! value text, the domain captions at the arc ends, and the label. The
//! value arc's fill comes from [`GaugeSpec::color`], so the threshold band
//! selection is directly visible in the markup.

use std::f64::consts::PI;
use std::fmt::Write;

use gauge_core::arc::{arc_point, value_angle, END_ANGLE, START_ANGLE};
use gauge_core::GaugeSpec;

use crate::error::{RenderError, RenderResult};
use crate::theme::GaugeTheme;

/// Font sizes as fractions of the outer radius.
const VALUE_FONT: f64 = 0.28;
const CAPTION_FONT: f64 = 0.11;
const LABEL_FONT: f64 = 0.13;

/// Fraction of the height reserved under the arc baseline for captions
/// and the label.
const CAPTION_BAND: f64 = 0.20;

/// Render a gauge as a standalone SVG document at its configured size.
///
/// # Errors
///
/// Returns [`RenderError::InvalidDimensions`] if the size leaves no room
/// for the arc.
pub fn render_svg(spec: &GaugeSpec, theme: &GaugeTheme) -> RenderResult<String> {
    let (width, height) = spec.pixel_size();
    render_document(spec, theme, width, height, 1.0)
}

/// Render a gauge as an SVG document with explicit output dimensions.
///
/// `out_w`/`out_h` are the document's pixel dimensions; the drawing happens
/// in a viewBox of `out / scale`, so a scale of 2.0 doubles the raster
/// resolution without changing the layout.
pub(crate) fn render_document(
    spec: &GaugeSpec,
    theme: &GaugeTheme,
    out_w: u32,
    out_h: u32,
    scale: f64,
) -> RenderResult<String> {
    if out_w == 0 || out_h == 0 {
        return Err(RenderError::InvalidDimensions(format!(
            "output size {out_w}x{out_h}"
        )));
    }
    if !scale.is_finite() || scale <= 0.0 {
        return Err(RenderError::InvalidDimensions(format!("scale {scale}")));
    }
    let view_w = f64::from(out_w) / scale;
    let view_h = f64::from(out_h) / scale;

    let mut svg = String::with_capacity(2048);
    let _ = write!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {view_w} {view_h}\">",
    );
    let _ = write!(
        svg,
        "<rect width=\"100%\" height=\"100%\" fill=\"{}\"/>",
        theme.background,
    );
    write_gauge(&mut svg, spec, theme, view_w, view_h)?;
    svg.push_str("</svg>");
    Ok(svg)
}

/// Draw the gauge into an open SVG document.
fn write_gauge(
    svg: &mut String,
    spec: &GaugeSpec,
    theme: &GaugeTheme,
    view_w: f64,
    view_h: f64,
) -> RenderResult<()> {
    let pad = theme.padding;
    let caption_band = (view_h * CAPTION_BAND).max(24.0);
    let radius = (view_h - pad - caption_band).min((view_w - 2.0 * pad) / 2.0);
    if radius < 1.0 {
        return Err(RenderError::InvalidDimensions(format!(
            "view {view_w}x{view_h} leaves no room for the arc"
        )));
    }
    let cx = view_w / 2.0;
    let cy = pad + radius;
    let inner = radius * (1.0 - theme.thickness);

    // Track first so the value arc paints over it.
    let track = annular_sector_path(cx, cy, radius, inner, START_ANGLE, END_ANGLE);
    let _ = write!(svg, "<path d=\"{track}\" fill=\"{}\"/>", theme.track_color);

    let end = value_angle(spec.ratio());
    if end - START_ANGLE > 1e-6 {
        let path = annular_sector_path(cx, cy, radius, inner, START_ANGLE, end);
        let _ = write!(svg, "<path d=\"{path}\" fill=\"{}\"/>", spec.color());
    }

    // Centered value text, e.g. "86.25%"
    let value_text = escape_xml(&format!(
        "{}{}",
        format_number(spec.reading.value),
        spec.units
    ));
    let value_size = radius * VALUE_FONT;
    let value_y = cy - radius * 0.10;
    let _ = write!(
        svg,
        "<text x=\"{cx}\" y=\"{value_y}\" font-size=\"{value_size}\" font-family=\"{}\" font-weight=\"bold\" fill=\"{}\" text-anchor=\"middle\">{value_text}</text>",
        escape_xml(&theme.font_family),
        theme.value_color,
    );

    // Domain captions under the arc ends
    let caption_size = (radius * CAPTION_FONT).max(9.0);
    let caption_y = cy + caption_size + 2.0;
    let caption_x = (radius + inner) / 2.0;
    for (x, bound) in [
        (cx - caption_x, spec.scale.min()),
        (cx + caption_x, spec.scale.max()),
    ] {
        let _ = write!(
            svg,
            "<text x=\"{x}\" y=\"{caption_y}\" font-size=\"{caption_size}\" font-family=\"{}\" fill=\"{}\" text-anchor=\"middle\">{}</text>",
            escape_xml(&theme.font_family),
            theme.caption_color,
            format_number(bound),
        );
    }

    // Label along the bottom edge
    let label_size = (radius * LABEL_FONT).max(10.0);
    let label_y = view_h - 6.0;
    let _ = write!(
        svg,
        "<text x=\"{cx}\" y=\"{label_y}\" font-size=\"{label_size}\" font-family=\"{}\" fill=\"{}\" text-anchor=\"middle\">{}</text>",
        escape_xml(&theme.font_family),
        theme.label_color,
        escape_xml(&spec.reading.label),
    );

    Ok(())
}

/// SVG path for an annular sector between two angles.
fn annular_sector_path(cx: f64, cy: f64, outer: f64, inner: f64, a0: f64, a1: f64) -> String {
    let large = i32::from(a1 - a0 > PI);
    let (x0, y0) = arc_point(cx, cy, outer, a0);
    let (x1, y1) = arc_point(cx, cy, outer, a1);
    let (x2, y2) = arc_point(cx, cy, inner, a1);
    let (x3, y3) = arc_point(cx, cy, inner, a0);
    format!(
        "M{x0},{y0} A{outer},{outer} 0 {large},1 {x1},{y1} L{x2},{y2} A{inner},{inner} 0 {large},0 {x3},{y3} Z"
    )
}

/// Format a value with trailing zeros trimmed (`86.25` -> "86.25",
/// `70.0` -> "70").
fn format_number(value: f64) -> String {
    format!("{value}")
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use gauge_core::{BandScale, GaugeSize, Reading};

    fn render_default() -> String {
        render_svg(&GaugeSpec::default(), &GaugeTheme::default()).expect("render")
    }

    #[test]
    fn test_svg_structure() {
        let svg = render_default();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains("width=\"500\""));
        assert!(svg.contains("height=\"250\""));
    }

    #[test]
    fn test_default_value_arc_is_fourth_band_color() {
        let svg = render_default();
        assert!(svg.contains("#60B044"), "86.25 falls in the fourth band");
        assert!(svg.contains("#E0E0E0"), "track behind the value arc");
    }

    #[test]
    fn test_low_value_uses_first_band_color() {
        let spec = GaugeSpec::default().with_value(10.0);
        let svg = render_svg(&spec, &GaugeTheme::default()).expect("render");
        assert!(svg.contains("#FF0000"));
        assert!(!svg.contains("#60B044"));
    }

    #[test]
    fn test_value_text_with_units() {
        let svg = render_default();
        assert!(svg.contains("86.25%"));
    }

    #[test]
    fn test_whole_value_drops_decimals() {
        let spec = GaugeSpec::default().with_value(70.0);
        let svg = render_svg(&spec, &GaugeTheme::default()).expect("render");
        assert!(svg.contains(">70%<"));
    }

    #[test]
    fn test_label_and_captions() {
        let svg = render_default();
        assert!(svg.contains(">Accuracy<"));
        assert!(svg.contains(">0<"));
        assert!(svg.contains(">100<"));
    }

    #[test]
    fn test_captions_follow_custom_domain() {
        let scale = BandScale::from_parts(
            40.0,
            vec![gauge_core::Color::RED, gauge_core::Color::GREEN],
            vec![60.0, 80.0],
        )
        .expect("scale");
        let spec = GaugeSpec::new(Reading::new("Temp", 70.0), scale);
        let svg = render_svg(&spec, &GaugeTheme::default()).expect("render");
        assert!(svg.contains(">40<"));
        assert!(svg.contains(">80<"));
    }

    #[test]
    fn test_value_at_domain_minimum_draws_no_value_arc() {
        let spec = GaugeSpec::default().with_value(0.0);
        let svg = render_svg(&spec, &GaugeTheme::default()).expect("render");
        assert_eq!(svg.matches("<path").count(), 1, "track only");
    }

    #[test]
    fn test_label_is_xml_escaped() {
        let spec = GaugeSpec::new(Reading::new("A<B & C", 50.0), BandScale::default());
        let svg = render_svg(&spec, &GaugeTheme::default()).expect("render");
        assert!(svg.contains("A&lt;B &amp; C"));
        assert!(!svg.contains("A<B"));
    }

    #[test]
    fn test_too_small_to_draw_is_an_error() {
        let spec = GaugeSpec::default().with_size(GaugeSize {
            width: Some(20),
            height: 20,
        });
        assert!(matches!(
            render_svg(&spec, &GaugeTheme::default()),
            Err(RenderError::InvalidDimensions(_))
        ));
    }

    #[test]
    fn test_format_number_trims_trailing_zeros() {
        assert_eq!(format_number(70.0), "70");
        assert_eq!(format_number(86.25), "86.25");
        assert_eq!(format_number(0.5), "0.5");
    }

    #[test]
    fn test_annular_sector_path_shape() {
        // Outer arc forward, chord to the inner radius, inner arc back.
        let path = annular_sector_path(100.0, 100.0, 50.0, 35.0, START_ANGLE, END_ANGLE);
        assert!(path.starts_with('M'));
        assert!(path.ends_with(" Z"));
        assert_eq!(path.matches('A').count(), 2);
        assert!(path.contains("A50,50 0 0,1 "));
        assert!(path.contains("A35,35 0 0,0 "));
    }
}
