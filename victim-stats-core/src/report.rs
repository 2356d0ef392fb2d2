//! Rendering of a player's round stats into chat lines and menus.

use crate::colors::{
    ChatColor, SectionColors, DEFAULT_COLOR, DISTANCE_COLOR, NAME_COLOR, WEAPON_COLOR,
};
use crate::host::{Host, PlayerInfo};
use crate::menu::Menu;
use crate::settings::PlayerPreferences;
use crate::stats::{PlayerDamage, PlayerKill, PlayerStats};
use crate::strings;

/// How the victim died, shown as the final line of a death report.
#[derive(Debug, Clone, PartialEq)]
pub enum KillType {
    Suicide,
    TeamKilled {
        attacker_name: String,
    },
    Killer {
        attacker_name: String,
        headshot: bool,
        weapon: Option<String>,
        distance: Option<f64>,
        /// Killer's remaining health; zero or less means they are dead too.
        health: i32,
    },
}

/// A group of lines in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKind {
    Attacker,
    Wounded,
    Killed,
    Killer,
}

impl SectionKind {
    /// Menu choice number of the section.
    pub fn choice(self) -> u8 {
        match self {
            SectionKind::Attacker => 1,
            SectionKind::Wounded => 2,
            SectionKind::Killed => 3,
            SectionKind::Killer => 4,
        }
    }

    pub fn from_choice(choice: u8) -> Option<Self> {
        [
            SectionKind::Attacker,
            SectionKind::Wounded,
            SectionKind::Killed,
            SectionKind::Killer,
        ]
        .into_iter()
        .find(|kind| kind.choice() == choice)
    }

    pub fn type_key(self) -> &'static str {
        match self {
            SectionKind::Attacker => "Type:Attacker",
            SectionKind::Wounded => "Type:Wounded",
            SectionKind::Killed => "Type:Killed",
            SectionKind::Killer => "Type:Killer",
        }
    }

    /// Chat line prefix naming the section.
    pub fn prefix_key(self) -> &'static str {
        match self {
            SectionKind::Attacker => "Prefix:Attacker",
            SectionKind::Wounded => "Prefix:Wounded",
            SectionKind::Killed => "Prefix:Killed",
            SectionKind::Killer => "Prefix:Killer",
        }
    }

    fn color(self, colors: &SectionColors) -> ChatColor {
        match self {
            SectionKind::Attacker => colors.attacker,
            SectionKind::Wounded => colors.wounded,
            SectionKind::Killed => colors.killed,
            SectionKind::Killer => colors.killer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub lines: Vec<String>,
}

/// Whether lines carry chat color codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Style {
    Chat,
    Menu,
}

/// Rendered stats for one player. Sections with no lines are omitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub language: String,
    pub sections: Vec<Section>,
    pub killer: Option<String>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.killer.is_none()
    }

    pub fn section(&self, kind: SectionKind) -> Option<&Section> {
        self.sections.iter().find(|section| section.kind == kind)
    }

    /// Every line in send order.
    pub fn chat_lines(&self) -> Vec<String> {
        self.sections
            .iter()
            .flat_map(|section| section.lines.iter().cloned())
            .chain(self.killer.clone())
            .collect()
    }

    /// All sections in a single menu.
    pub fn menu<H: Host + ?Sized>(&self, host: &H) -> Menu {
        let mut menu = Menu::with_title(self.translate(host, strings::MENU_TITLE));
        for section in &self.sections {
            menu.header(section.kind.choice(), self.translate(host, section.kind.type_key()));
            for line in &section.lines {
                menu.text(format!("  {line}"));
            }
        }
        if let Some(killer) = &self.killer {
            menu.header(
                SectionKind::Killer.choice(),
                self.translate(host, SectionKind::Killer.type_key()),
            );
            menu.text(format!("   {killer}"));
        }
        menu
    }

    /// Top level of the interactive menu: one option per section.
    pub fn interactive_menu<H: Host + ?Sized>(&self, host: &H) -> Menu {
        let mut menu = Menu::with_title(self.translate(host, strings::MENU_TITLE));
        for section in &self.sections {
            menu.option(section.kind.choice(), self.translate(host, section.kind.type_key()));
        }
        if self.killer.is_some() {
            menu.option(
                SectionKind::Killer.choice(),
                self.translate(host, SectionKind::Killer.type_key()),
            );
        }
        menu
    }

    /// Detail page of the interactive menu for `kind`.
    pub fn section_menu<H: Host + ?Sized>(&self, host: &H, kind: SectionKind) -> Option<Menu> {
        let lines: Vec<&String> = match kind {
            SectionKind::Killer => self.killer.iter().collect(),
            _ => self.section(kind)?.lines.iter().collect(),
        };
        if lines.is_empty() {
            return None;
        }

        let mut menu = Menu::with_title(self.translate(host, kind.type_key()));
        for line in lines {
            menu.text(line.clone());
        }
        menu.option(0, self.translate(host, strings::MENU_BACK));
        Some(menu)
    }

    fn translate<H: Host + ?Sized>(&self, host: &H, key: &str) -> String {
        strings::translate(host, key, &self.language, &[])
    }
}

/// Builds a [`Report`] for one player.
pub struct ReportBuilder<'a, H: Host + ?Sized> {
    host: &'a H,
    language: &'a str,
    prefs: PlayerPreferences,
    colors: SectionColors,
    style: Style,
}

impl<'a, H: Host + ?Sized> ReportBuilder<'a, H> {
    pub fn new(
        host: &'a H,
        player: &'a PlayerInfo,
        prefs: PlayerPreferences,
        colors: SectionColors,
        style: Style,
    ) -> Self {
        Self {
            host,
            language: &player.language,
            prefs,
            colors,
            style,
        }
    }

    pub fn build(&self, stats: Option<&PlayerStats>, kill_type: Option<&KillType>) -> Report {
        let mut sections = Vec::new();

        if let Some(stats) = stats {
            let groups: [(SectionKind, Vec<(&String, &PlayerDamage)>); 3] = [
                (SectionKind::Attacker, stats.taken.iter().collect()),
                (SectionKind::Wounded, stats.wounded().collect()),
                (SectionKind::Killed, stats.killed_with_damage().collect()),
            ];
            for (kind, group) in groups {
                let lines: Vec<String> = group
                    .into_iter()
                    .map(|(name, damage)| self.entry(kind, name, damage, stats.killed.get(name)))
                    .collect();
                if !lines.is_empty() {
                    sections.push(Section { kind, lines });
                }
            }
        }

        Report {
            language: self.language.to_string(),
            sections,
            killer: kill_type.map(|kill_type| self.killer_line(kill_type)),
        }
    }

    fn for_menu(&self) -> bool {
        self.style == Style::Menu
    }

    /// Inline color code, blank in menus.
    fn code(&self, code: &str) -> String {
        if self.for_menu() {
            String::new()
        } else {
            code.to_string()
        }
    }

    fn translate(&self, key: &str, tokens: &[(&str, String)]) -> String {
        strings::translate(self.host, key, self.language, tokens)
    }

    fn entry(
        &self,
        kind: SectionKind,
        name: &str,
        damage: &PlayerDamage,
        kill: Option<&PlayerKill>,
    ) -> String {
        let kill = kill.filter(|_| kind == SectionKind::Killed);
        let (type_color, message_type) = match self.style {
            Style::Chat => (
                kind.color(&self.colors).to_string(),
                self.translate(kind.prefix_key(), &[]),
            ),
            Style::Menu => (String::new(), String::new()),
        };
        let hitgroup_info = if self.prefs.display.uses_hitgroups() {
            self.hitgroup_info(damage)
        } else {
            String::new()
        };

        self.translate(
            strings::BASE,
            &[
                ("type_color", type_color),
                ("type", message_type),
                ("name_color", self.code(NAME_COLOR)),
                ("name", name.to_string()),
                ("damage_color", self.code(DEFAULT_COLOR)),
                ("damage", damage.damage.to_string()),
                (
                    "weapon_info",
                    kill.map(|kill| self.weapon_info(kill.weapon.as_deref(), kill.distance))
                        .unwrap_or_default(),
                ),
                ("headshot", self.headshot(kill.is_some_and(|kill| kill.headshot))),
                ("hitgroup_info", hitgroup_info),
            ],
        )
    }

    fn killer_line(&self, kill_type: &KillType) -> String {
        match kill_type {
            KillType::Suicide => self.translate(strings::SUICIDE, &[]),
            KillType::TeamKilled { attacker_name } => {
                self.translate(strings::TEAM_KILLED, &[("name", attacker_name.clone())])
            }
            KillType::Killer {
                attacker_name,
                headshot,
                weapon,
                distance,
                health,
            } => {
                let key = if *health > 0 {
                    strings::KILLER
                } else {
                    strings::KILLER_DEAD
                };
                let type_color = match self.style {
                    Style::Chat => self.colors.killer.to_string(),
                    Style::Menu => String::new(),
                };
                self.translate(
                    key,
                    &[
                        ("type_color", type_color),
                        ("headshot", self.headshot(*headshot)),
                        ("name_color", self.code(NAME_COLOR)),
                        ("name", attacker_name.clone()),
                        ("weapon_info", self.weapon_info(weapon.as_deref(), *distance)),
                        ("health", (*health).max(0).to_string()),
                    ],
                )
            }
        }
    }

    fn weapon_info(&self, weapon: Option<&str>, distance: Option<f64>) -> String {
        if weapon.is_none() && distance.is_none() {
            return String::new();
        }
        self.translate(
            strings::BASE_WEAPON,
            &[
                ("weapon_color", self.code(WEAPON_COLOR)),
                ("weapon", weapon.unwrap_or_default().to_string()),
                ("at_color", self.code(DEFAULT_COLOR)),
                ("distance_color", self.code(DISTANCE_COLOR)),
                (
                    "distance",
                    distance
                        .map(|units| self.prefs.distance.format(units))
                        .unwrap_or_default(),
                ),
            ],
        )
    }

    fn headshot(&self, headshot: bool) -> String {
        if headshot && !self.for_menu() {
            self.translate(strings::HEADSHOT, &[])
        } else {
            String::new()
        }
    }

    fn hitgroup_info(&self, damage: &PlayerDamage) -> String {
        let parts: Vec<String> = damage
            .hitgroups
            .iter()
            .map(|(hitgroup, count)| {
                format!("{}: {count}", self.translate(&strings::hitgroup_key(*hitgroup), &[]))
            })
            .collect();
        format!(" - {}", parts.join("; "))
    }
}
