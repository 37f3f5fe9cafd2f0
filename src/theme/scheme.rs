//! System color scheme detection

use super::Theme;
use crate::config::ThemeConfig;

/// The system's preferred theme, if it can be determined
///
/// A configured `prefers_color_scheme` wins; otherwise the terminal's
/// `COLORFGBG` variable is consulted.
pub fn system_theme(config: &ThemeConfig) -> Option<Theme> {
    if let Some(preference) = &config.prefers_color_scheme {
        match preference.parse::<Theme>() {
            Ok(theme) => return Some(theme),
            Err(e) => tracing::warn!("Ignoring prefers_color_scheme: {}", e),
        }
    }

    std::env::var("COLORFGBG")
        .ok()
        .and_then(|value| theme_from_colorfgbg(&value))
}

/// Read the background color from a `COLORFGBG` value ("15;0", "0;default;15")
///
/// The ANSI colors 0-6 and 8 are dark backgrounds.
fn theme_from_colorfgbg(value: &str) -> Option<Theme> {
    let background: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
    if background <= 6 || background == 8 {
        Some(Theme::Dark)
    } else {
        Some(Theme::Light)
    }
}
