use crate::utils::error::{ContentError, Result};

/// Converts `#rrggbb` (or `#rgb`) into a CSS `rgba(...)` string.
///
/// Opacities above 1 are read as percentages, so `50` and `0.5` are equivalent.
pub fn convert_hex_to_rgba(hex_code: &str, opacity: f32) -> Result<String> {
    let hex = hex_code.trim().trim_start_matches('#');

    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        _ => {
            return Err(ContentError::InvalidColor {
                value: hex_code.to_string(),
                reason: "expected 3 or 6 hexadecimal digits".to_string(),
            })
        }
    };

    let channel = |range: std::ops::Range<usize>| {
        expanded
            .get(range)
            .and_then(|pair| u8::from_str_radix(pair, 16).ok())
            .ok_or_else(|| ContentError::InvalidColor {
                value: hex_code.to_string(),
                reason: "not a hexadecimal colour".to_string(),
            })
    };

    let (r, g, b) = (channel(0..2)?, channel(2..4)?, channel(4..6)?);
    let opacity = if opacity > 1.0 { opacity / 100.0 } else { opacity };

    Ok(format!("rgba({}, {}, {}, {})", r, g, b, opacity))
}

/// Renders multi-line copy as HTML, one `<br />` between lines.
pub fn render_newlines(input: &str) -> String {
    input
        .split('\n')
        .map(html_escape)
        .collect::<Vec<_>>()
        .join("<br />")
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
