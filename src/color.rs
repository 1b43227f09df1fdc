//! Fill color resolution.
//!
//! Handles ARGB/RGB hex values and the legacy indexed palette.

/// Excel's 64 indexed colors (legacy palette)
pub const INDEXED_COLORS: [&str; 64] = [
    "#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF",
    "#000000", "#FFFFFF", "#FF0000", "#00FF00", "#0000FF", "#FFFF00", "#FF00FF", "#00FFFF",
    "#800000", "#008000", "#000080", "#808000", "#800080", "#008080", "#C0C0C0", "#808080",
    "#9999FF", "#993366", "#FFFFCC", "#CCFFFF", "#660066", "#FF8080", "#0066CC", "#CCCCFF",
    "#000080", "#FF00FF", "#FFFF00", "#00FFFF", "#800080", "#800000", "#008080", "#0000FF",
    "#00CCFF", "#CCFFFF", "#CCFFCC", "#FFFF99", "#99CCFF", "#FF99CC", "#CC99FF", "#FFCC99",
    "#3366FF", "#33CCCC", "#99CC00", "#FFCC00", "#FF9900", "#FF6600", "#666699", "#969696",
    "#003366", "#339966", "#003300", "#333300", "#993300", "#993366", "#333399", "#333333",
];

/// Normalize an `rgb` attribute value to an `#RRGGBB` string.
///
/// Excel writes ARGB (8 hex chars); the alpha byte is stripped.
pub fn rgb_to_css(rgb: &str) -> Option<String> {
    let rgb = rgb.trim_start_matches('#');
    if !rgb.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    match rgb.len() {
        8 => rgb.get(2..).map(|tail| format!("#{tail}")),
        6 => Some(format!("#{rgb}")),
        _ => None,
    }
}

/// Resolve a legacy `indexed` fill color to an `#RRGGBB` string.
///
/// Index 64 is "system foreground" and has no fixed palette entry.
pub fn indexed_to_css(indexed: u32) -> Option<String> {
    INDEXED_COLORS
        .get(indexed as usize)
        .map(|color| (*color).to_string())
}
