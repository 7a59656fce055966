//! Utility functions

use chrono::{DateTime, Utc};

// With perforation detail — for the header logo (large display)
pub const LOGO_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 240 150"><defs><style>.c1{fill:#818cf8}.c2{fill:#09090b}</style></defs><rect class="c1" x="8" y="30" width="224" height="90" rx="12"/><circle class="c2" cx="120" cy="30" r="11"/><circle class="c2" cx="120" cy="120" r="11"/><line x1="120" y1="48" x2="120" y2="102" stroke="#fff" stroke-width="3" stroke-dasharray="5 8" stroke-linecap="round"/><circle fill="#fff" cx="64" cy="75" r="14"/><rect fill="#fff" x="148" y="58" width="62" height="7" rx="3.5"/><rect fill="#fff" x="148" y="72" width="46" height="7" rx="3.5"/><rect fill="#fff" x="148" y="86" width="54" height="7" rx="3.5"/></svg>"##;

// Square viewBox — for window/taskbar icons
pub const ICON_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 240 240"><defs><style>.c1{fill:#818cf8}.c2{fill:#09090b}</style></defs><g transform="translate(0,45)"><rect class="c1" x="8" y="30" width="224" height="90" rx="12"/><circle class="c2" cx="120" cy="30" r="11"/><circle class="c2" cx="120" cy="120" r="11"/><line x1="120" y1="48" x2="120" y2="102" stroke="#fff" stroke-width="3" stroke-dasharray="5 8" stroke-linecap="round"/><circle fill="#fff" cx="64" cy="75" r="14"/><rect fill="#fff" x="148" y="58" width="62" height="7" rx="3.5"/><rect fill="#fff" x="148" y="72" width="46" height="7" rx="3.5"/><rect fill="#fff" x="148" y="86" width="54" height="7" rx="3.5"/></g></svg>"##;

/// Rasterize the logo SVG at the given width, preserving aspect ratio.
pub fn rasterize_logo(width: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(LOGO_SVG, &resvg::usvg::Options::default()).unwrap();
    let svg_size = tree.size();
    let scale = width as f32 / svg_size.width();
    let height = (svg_size.height() * scale).ceil() as u32;
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), width, height)
}

/// Rasterize the icon SVG to a square image (for window/taskbar icons).
pub fn rasterize_logo_square(size: u32) -> (Vec<u8>, u32, u32) {
    let tree = resvg::usvg::Tree::from_str(ICON_SVG, &resvg::usvg::Options::default()).unwrap();
    let scale = size as f32 / tree.size().width();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size, size).unwrap();
    resvg::render(
        &tree,
        resvg::usvg::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    (premul_to_straight(&pixmap), size, size)
}

fn premul_to_straight(pixmap: &resvg::tiny_skia::Pixmap) -> Vec<u8> {
    pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let a = p.alpha();
            if a == 0 {
                [0, 0, 0, 0]
            } else {
                let r = (p.red() as u16 * 255 / a as u16) as u8;
                let g = (p.green() as u16 * 255 / a as u16) as u8;
                let b = (p.blue() as u16 * 255 / a as u16) as u8;
                [r, g, b, a]
            }
        })
        .collect()
}

/// Format a token expiry for display
pub fn format_expiry(expires_at: &DateTime<Utc>) -> String {
    expires_at.format("%Y-%m-%d %H:%M UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_formats_as_utc() {
        let dt = DateTime::from_timestamp(1_700_000_000, 0).unwrap();
        assert_eq!(format_expiry(&dt), "2023-11-14 22:13 UTC");
    }
}
