//! Text rendering of the sign-in screen. Terminal columns are mapped to a
//! viewport width so the same breakpoint applies as in a browser.

use crate::features::auth::screen::{AuthMode, AuthScreen, FieldKind, Panel};
use std::fmt::Write;

/// Width of one terminal cell in viewport pixels.
const CELL_WIDTH: u32 = 8;

const DEFAULT_COLUMNS: u32 = 80;

/// Viewport width for a terminal `columns` wide.
#[must_use]
pub fn viewport_width(columns: Option<u32>) -> u32 {
    columns.unwrap_or(DEFAULT_COLUMNS).saturating_mul(CELL_WIDTH)
}

#[must_use]
pub fn render(screen: &AuthScreen) -> String {
    let config = screen.config();
    let mut out = String::new();

    for (index, panel) in screen.visible_panels().into_iter().enumerate() {
        if index > 0 {
            out.push('\n');
        }
        match panel {
            Panel::Info => {
                let _ = writeln!(out, "== {} ==", config.headline);
                let _ = writeln!(out, "{}", config.copy);
                if screen.is_narrow() {
                    let _ = writeln!(out, "[Open Form]");
                }
            }
            Panel::Form => {
                let _ = writeln!(out, "== {} ==", config.title);
                for field in &config.fields {
                    let hint = match field.kind {
                        FieldKind::Text => field.placeholder.to_string(),
                        FieldKind::Password => format!("{} (hidden)", field.placeholder),
                    };
                    let _ = writeln!(out, "{}: <{hint}>", field.label);
                }
                let _ = writeln!(out, "[{}]", config.submit_label);
                let _ = writeln!(out, "{}", config.footer);
                if screen.is_narrow() {
                    let _ = writeln!(out, "[Show Overview]");
                }
            }
        }
    }

    out
}

pub fn execute(columns: Option<u32>, mode: AuthMode, overview: bool) {
    let mut screen = AuthScreen::new(viewport_width(columns));
    screen.select_mode(mode);
    if overview {
        screen.show_overview();
    }
    print!("{}", render(&screen));
}
