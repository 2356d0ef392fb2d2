//! Translation keys and token substitution.
//!
//! Hosts return raw translations containing `{token}` placeholders; this
//! module fills them in.

use crate::host::{Host, FALLBACK_LANGUAGE};

pub const BASE: &str = "Base";
pub const BASE_WEAPON: &str = "Base:Weapon";
pub const HEADSHOT: &str = "Headshot";
pub const KILLER: &str = "Killer";
pub const KILLER_DEAD: &str = "Killer:Dead";
pub const SUICIDE: &str = "Suicide";
pub const TEAM_KILLED: &str = "Team Killed";
pub const MENU_BACK: &str = "Menu:Back";
pub const MENU_TITLE: &str = "Menu:Title";
pub const SETTINGS_TITLE: &str = "Title";
pub const DISPLAY_TYPE_TEXT: &str = "Menu:default_display_type";
pub const DISTANCE_TYPE_TEXT: &str = "Menu:default_distance_type";
pub const DISPLAY_TYPE_DESCRIPTION: &str = "default_display_type";
pub const DISTANCE_TYPE_DESCRIPTION: &str = "default_distance_type";

/// Translation key for a hitgroup's display name.
pub fn hitgroup_key(hitgroup: u8) -> String {
    format!("Hitgroup:{hitgroup}")
}

/// Replace every `{name}` placeholder with its token value.
///
/// Placeholders without a matching token are left untouched.
pub fn format(template: &str, tokens: &[(&str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        let Some(end) = after.find('}') else {
            out.push_str(&rest[start..]);
            return out;
        };
        let name = &after[..end];
        match tokens.iter().find(|(token, _)| *token == name) {
            Some((_, value)) => out.push_str(value),
            None => {
                out.push('{');
                out.push_str(name);
                out.push('}');
            }
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}

/// Translate `key` for `language`, falling back to English and finally to
/// the key itself.
pub fn translate<H: Host + ?Sized>(
    host: &H,
    key: &str,
    language: &str,
    tokens: &[(&str, String)],
) -> String {
    let template = host
        .translate(key, language)
        .or_else(|| host.translate(key, FALLBACK_LANGUAGE))
        .unwrap_or_else(|| {
            tracing::debug!(target: "victim_stats::report", key, language, "Missing translation");
            key.to_string()
        });
    format(&template, tokens)
}
