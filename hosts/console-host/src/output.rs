//! Messages delivered to players and their plain-text rendering.

use std::fmt;

use victim_stats_core::{Menu, MenuItem};

/// Something the plugin sent to a player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delivery {
    Chat { index: u32, message: String },
    Menu { index: u32, menu: Menu },
}

impl Delivery {
    pub fn index(&self) -> u32 {
        match self {
            Delivery::Chat { index, .. } | Delivery::Menu { index, .. } => *index,
        }
    }
}

impl fmt::Display for Delivery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Delivery::Chat { message, .. } => write!(f, "{}", strip_colors(message)),
            Delivery::Menu { menu, .. } => write!(f, "{}", render_menu(menu)),
        }
    }
}

/// Remove chat color codes: single control bytes and `\x07RRGGBB`.
pub fn strip_colors(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    let mut chars = message.chars();
    while let Some(c) = chars.next() {
        match c {
            '\x07' => {
                chars.by_ref().take(6).for_each(drop);
            }
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out
}

/// Render a menu as numbered lines.
pub fn render_menu(menu: &Menu) -> String {
    let mut lines = Vec::with_capacity(menu.items.len() + 1);
    if let Some(title) = &menu.title {
        lines.push(format!("== {title} =="));
    }
    for item in &menu.items {
        lines.push(match item {
            MenuItem::Option {
                choice,
                text,
                selectable: true,
            } => format!("->{choice}. {text}"),
            MenuItem::Option { choice, text, .. } => format!("  {choice}. {text}"),
            MenuItem::Text(text) => text.clone(),
        });
    }
    lines.join("\n")
}
