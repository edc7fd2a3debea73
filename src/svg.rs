use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::Color32;

use crate::scene::{Scene, AXIS_FONT_SIZE, LEGEND_FONT_SIZE};

// ---------------------------------------------------------------------------
// SVG export
// ---------------------------------------------------------------------------

/// Serialize a scene as a standalone SVG document.
///
/// `None` produces an empty canvas of the given size.
pub fn render_svg(scene: Option<&Scene>, width: f32, height: f32) -> String {
    let mut svg = String::new();
    svg.push_str(&format!(
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{width}\" height=\"{height}\" viewBox=\"0 0 {width} {height}\">"
    ));

    if let Some(scene) = scene {
        svg.push_str("<g class=\"markers\">");
        for m in &scene.markers {
            let stroke = m.stroke();
            let stroke_attr = if stroke.is_empty() {
                "stroke=\"none\"".to_string()
            } else {
                format!(
                    "stroke=\"{}\" stroke-width=\"{}\"",
                    hex(stroke.color),
                    stroke.width
                )
            };
            svg.push_str(&format!(
                "<circle cx=\"{:.2}\" cy=\"{:.2}\" r=\"{}\" fill=\"{}\" {stroke_attr}/>",
                m.center.x,
                m.center.y,
                m.radius,
                hex(m.fill)
            ));
        }
        svg.push_str("</g>");

        svg.push_str(&format!(
            "<g class=\"axis\" text-anchor=\"end\" font-weight=\"bold\" font-size=\"{AXIS_FONT_SIZE}\">"
        ));
        for label in &scene.axis {
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" dominant-baseline=\"middle\">{}</text>",
                label.anchor.x,
                label.anchor.y,
                escape_xml(&label.text)
            ));
        }
        svg.push_str("</g>");

        svg.push_str("<g class=\"legend\">");
        for (rect, color) in &scene.legend.swatches {
            svg.push_str(&format!(
                "<rect x=\"{:.2}\" y=\"{:.2}\" width=\"{:.2}\" height=\"{:.2}\" fill=\"{}\"/>",
                rect.min.x,
                rect.min.y,
                rect.width(),
                rect.height(),
                hex(*color)
            ));
        }
        for caption in [&scene.legend.top, &scene.legend.bottom] {
            svg.push_str(&format!(
                "<text x=\"{:.2}\" y=\"{:.2}\" font-size=\"{LEGEND_FONT_SIZE}\" text-anchor=\"start\">{}</text>",
                caption.position.x,
                caption.position.y,
                escape_xml(&caption.text)
            ));
        }
        svg.push_str("</g>");
    }

    svg.push_str("</svg>");
    svg
}

pub fn write_svg(svg: &str, path: &Path) -> Result<()> {
    std::fs::write(path, svg).with_context(|| format!("writing {}", path.display()))?;
    log::info!("Wrote SVG to {}", path.display());
    Ok(())
}

fn hex(c: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", c.r(), c.g(), c.b())
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
