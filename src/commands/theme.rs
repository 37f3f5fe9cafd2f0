//! Show or change the persisted theme

use anyhow::Result;

use crate::repository::ContentSource;
use crate::theme::Theme;
use crate::BlogReader;

/// Apply a theme change and print the resulting theme
///
/// `choice` is `light`, `dark`, `toggle`, or `None` to only print.
pub fn run<S: ContentSource>(reader: &BlogReader<S>, choice: Option<&str>) -> Result<()> {
    let theme = apply(reader, choice)?;
    println!("Theme: {} ({})", describe(theme), theme);
    Ok(())
}

fn apply<S: ContentSource>(reader: &BlogReader<S>, choice: Option<&str>) -> Result<Theme> {
    match choice {
        None => Ok(reader.theme.theme()),
        Some("toggle") => Ok(reader.theme.toggle()),
        Some(value) => {
            let theme: Theme = value.parse()?;
            reader.theme.set_theme(theme);
            Ok(theme)
        }
    }
}

fn describe(theme: Theme) -> &'static str {
    match theme {
        Theme::Light => "light",
        Theme::Dark => "dark",
    }
}
