//! User configuration: slider tuning, keybindings and persistence.
//!
//! Stored as TOML at `$XDG_CONFIG_HOME/slide-reel/config.toml` (default
//! `~/.config/slide-reel/config.toml`).  Every table and every key is
//! optional; anything missing keeps its built-in default.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};

use slide_reel::core::geometry::{Breakpoint, BreakpointTable};
use slide_reel::core::gesture::GestureConfig;
use slide_reel::{ConfigurationError, SliderConfig, StepSize, WrapMode};

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions on the slider screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Prev,
    Next,
    First,
    Last,
    NextCategory,
    SwitchFocus,
    OpenSettings,
    Quit,
}

impl Action {
    /// Ordered list of all actions (used for the controls menu).
    pub const ALL: &[Action] = &[
        Action::Prev,
        Action::Next,
        Action::First,
        Action::Last,
        Action::NextCategory,
        Action::SwitchFocus,
        Action::OpenSettings,
        Action::Quit,
    ];

    /// Human-readable label for the UI.
    pub fn label(self) -> &'static str {
        match self {
            Action::Prev => "Previous",
            Action::Next => "Next",
            Action::First => "First Slide",
            Action::Last => "Last Slide",
            Action::NextCategory => "Next Category",
            Action::SwitchFocus => "Switch Slider",
            Action::OpenSettings => "Open Settings",
            Action::Quit => "Quit",
        }
    }

    /// Key used in the `[keys]` table.
    fn config_key(self) -> &'static str {
        match self {
            Action::Prev => "prev",
            Action::Next => "next",
            Action::First => "first",
            Action::Last => "last",
            Action::NextCategory => "next_category",
            Action::SwitchFocus => "switch_focus",
            Action::OpenSettings => "open_settings",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code plus modifiers.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    const MASK: KeyModifiers = KeyModifiers::CONTROL
        .union(KeyModifiers::ALT)
        .union(KeyModifiers::SHIFT);

    /// Only CTRL/ALT/SHIFT are compared.
    pub fn matches(&self, event: KeyEvent) -> bool {
        self.code == event.code && (self.modifiers & Self::MASK) == (event.modifiers & Self::MASK)
    }

    /// Binding captured during rebinding.
    pub fn from_key_event(event: KeyEvent) -> Self {
        Self {
            code: event.code,
            modifiers: event.modifiers & Self::MASK,
        }
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// User-friendly display string (e.g. `"Alt+←"`, `"Ctrl+c"`, `"q"`).
    pub fn display(&self) -> String {
        let key = match self.code {
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::Left => "←".into(),
            KeyCode::Right => "→".into(),
            KeyCode::Backspace => "Bksp".into(),
            KeyCode::Delete => "Del".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            _ => self.key_name(),
        };
        format!("{}{}", self.modifier_prefix(), key)
    }

    /// Config-file form (e.g. `"Alt+Left"`, `"Ctrl+c"`, `"q"`).
    fn to_config_string(&self) -> String {
        format!("{}{}", self.modifier_prefix(), self.key_name())
    }

    fn key_name(&self) -> String {
        match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "Up".into(),
            KeyCode::Down => "Down".into(),
            KeyCode::Left => "Left".into(),
            KeyCode::Right => "Right".into(),
            KeyCode::Enter => "Enter".into(),
            KeyCode::Esc => "Esc".into(),
            KeyCode::Tab => "Tab".into(),
            KeyCode::BackTab => "BackTab".into(),
            KeyCode::Backspace => "Backspace".into(),
            KeyCode::Delete => "Delete".into(),
            KeyCode::Home => "Home".into(),
            KeyCode::End => "End".into(),
            KeyCode::PageUp => "PageUp".into(),
            KeyCode::PageDown => "PageDown".into(),
            KeyCode::F(n) => format!("F{n}"),
            other => format!("{other:?}"),
        }
    }

    /// Parse a key string like `"Ctrl+c"`, `"Alt+Left"`, `"q"`, `"Enter"`.
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let key_part = parts.last()?;

        for &part in &parts[..parts.len() - 1] {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backtab" => KeyCode::BackTab,
            "backspace" | "bksp" => KeyCode::Backspace,
            "delete" | "del" => KeyCode::Delete,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            s if s.starts_with('f') && s.len() > 1 => {
                let n: u8 = s[1..].parse().ok()?;
                KeyCode::F(n)
            }
            // Single characters keep their case.
            _ if key_part.chars().count() == 1 => KeyCode::Char(key_part.chars().next()?),
            _ => return None,
        };

        Some(KeyBind { code, modifiers })
    }
}

// ───────────────────────────────────────── slider tuning ─────

/// Step size as it appears on the command line and in the config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    Single,
    Page,
}

impl From<StepMode> for StepSize {
    fn from(mode: StepMode) -> Self {
        match mode {
            StepMode::Single => StepSize::Single,
            StepMode::Page => StepSize::Page,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BreakpointSetting {
    /// Minimum slider width in terminal cells.
    pub min_width: f32,
    pub items: usize,
}

/// Tuning for one slider.  Distances are in terminal cells.
#[derive(Debug, Clone, PartialEq)]
pub struct SliderSettings {
    pub looping: bool,
    pub step: StepMode,
    pub drag_damping: f32,
    pub swipe_distance: f32,
    pub swipe_time_ms: u64,
    pub dead_zone: f32,
    /// Slide animation; the testimonial text fade uses the same duration.
    pub transition_ms: u64,
    /// `0` disables the re-entrancy cooldown.
    pub cooldown_ms: u64,
    pub resize_debounce_ms: u64,
    pub fallback_items: usize,
    pub breakpoints: Vec<BreakpointSetting>,
}

impl SliderSettings {
    /// Course row: bounded, pages a full view, no cooldown.
    pub fn carousel() -> Self {
        Self {
            looping: false,
            step: StepMode::Page,
            drag_damping: 1.0,
            swipe_distance: 8.0,
            swipe_time_ms: 300,
            dead_zone: 2.0,
            transition_ms: 300,
            cooldown_ms: 0,
            resize_debounce_ms: 250,
            fallback_items: 1,
            breakpoints: vec![
                BreakpointSetting {
                    min_width: 120.0,
                    items: 5,
                },
                BreakpointSetting {
                    min_width: 72.0,
                    items: 3,
                },
            ],
        }
    }

    /// Testimonials: one quote at a time, wrapping, with a rubber-band drag.
    pub fn testimonials() -> Self {
        Self {
            looping: true,
            step: StepMode::Single,
            drag_damping: 0.5,
            cooldown_ms: 300,
            breakpoints: Vec::new(),
            ..Self::carousel()
        }
    }

    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn transition(&self) -> Duration {
        Duration::from_millis(self.transition_ms)
    }

    /// Build the controller configuration, validating every knob.
    pub fn slider_config(&self) -> Result<SliderConfig, ConfigurationError> {
        let breakpoints = BreakpointTable::new(
            self.fallback_items,
            self.breakpoints
                .iter()
                .map(|b| Breakpoint {
                    min_width: b.min_width,
                    items_per_view: b.items,
                })
                .collect(),
        )?;
        let config = SliderConfig {
            wrap: if self.looping {
                WrapMode::Looping
            } else {
                WrapMode::Bounded
            },
            step: self.step.into(),
            gesture: GestureConfig {
                dead_zone: self.dead_zone,
                distance_threshold: self.swipe_distance,
                time_threshold: Duration::from_millis(self.swipe_time_ms),
                damping: self.drag_damping,
            },
            breakpoints,
            transition: self.transition(),
            reentrancy_cooldown: (self.cooldown_ms > 0)
                .then(|| Duration::from_millis(self.cooldown_ms)),
        };
        config.validate()?;
        Ok(config)
    }

    fn overlay(mut self, table: SliderTable) -> Self {
        macro_rules! take {
            ($($field:ident),*) => {
                $(if let Some(v) = table.$field { self.$field = v; })*
            };
        }
        take!(
            step,
            drag_damping,
            swipe_distance,
            swipe_time_ms,
            dead_zone,
            transition_ms,
            cooldown_ms,
            resize_debounce_ms,
            fallback_items,
            breakpoints
        );
        if let Some(v) = table.looping {
            self.looping = v;
        }
        self
    }

    fn to_table(&self) -> SliderTable {
        SliderTable {
            looping: Some(self.looping),
            step: Some(self.step),
            drag_damping: Some(self.drag_damping),
            swipe_distance: Some(self.swipe_distance),
            swipe_time_ms: Some(self.swipe_time_ms),
            dead_zone: Some(self.dead_zone),
            transition_ms: Some(self.transition_ms),
            cooldown_ms: Some(self.cooldown_ms),
            resize_debounce_ms: Some(self.resize_debounce_ms),
            fallback_items: Some(self.fallback_items),
            breakpoints: Some(self.breakpoints.clone()),
        }
    }
}

// ───────────────────────────────────────── file format ───────

/// One `[carousel]` / `[testimonials]` table.  Fields are optional so a
/// partial table only overrides what it names.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
struct SliderTable {
    #[serde(rename = "loop", skip_serializing_if = "Option::is_none")]
    looping: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    step: Option<StepMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    drag_damping: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    swipe_distance: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    swipe_time_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    dead_zone: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    transition_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cooldown_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    resize_debounce_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fallback_items: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    breakpoints: Option<Vec<BreakpointSetting>>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
struct ConfigFile {
    carousel: SliderTable,
    testimonials: SliderTable,
    /// Action name → key strings.
    keys: BTreeMap<String, Vec<String>>,
}

/// Problems reading or writing the config file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigFileError {
    #[error("cannot access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid TOML in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("cannot serialise config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid [{table}] settings: {source}")]
    Invalid {
        table: &'static str,
        #[source]
        source: ConfigurationError,
    },
}

// ───────────────────────────────────────── config ────────────

/// Application configuration: keybindings and both sliders' tuning.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    pub carousel: SliderSettings,
    pub testimonials: SliderSettings,
    /// Where [`save`](Self::save) writes.
    path: PathBuf,
}

impl AppConfig {
    /// Built-in defaults, persisted to `path` on save.
    pub fn with_defaults(path: PathBuf) -> Self {
        Self {
            bindings: Self::default_bindings(),
            carousel: SliderSettings::carousel(),
            testimonials: SliderSettings::testimonials(),
            path,
        }
    }

    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(Prev, vec![KeyBind::new(Left, n), KeyBind::new(Char('h'), n)]);
        m.insert(Next, vec![KeyBind::new(Right, n), KeyBind::new(Char('l'), n)]);
        m.insert(First, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Last, vec![KeyBind::new(End, n)]);
        m.insert(NextCategory, vec![KeyBind::new(Char('c'), n)]);
        m.insert(SwitchFocus, vec![KeyBind::new(Tab, n)]);
        m.insert(OpenSettings, vec![KeyBind::new(Char('?'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n)]);

        m
    }

    /// Find the action for a key event.  When several bindings match, the
    /// one with the most modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<Action> = None;
        let mut best_mod_count = 0;

        for (&action, binds) in &self.bindings {
            for bind in binds {
                if bind.matches(event) {
                    let mc = bind.modifiers.bits().count_ones();
                    if best.is_none() || mc > best_mod_count {
                        best = Some(action);
                        best_mod_count = mc;
                    }
                }
            }
        }
        best
    }

    /// Bind `bind` to `action`, removing it from every other action first.
    pub fn add_binding(&mut self, action: Action, bind: KeyBind) {
        for binds in self.bindings.values_mut() {
            binds.retain(|b| b != &bind);
        }
        self.bindings.entry(action).or_default().push(bind);
    }

    pub fn reset_defaults(&mut self) {
        self.bindings = Self::default_bindings();
    }

    /// Format the binding list for a given action (e.g. `"← / h"`).
    pub fn display_bindings(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => {
                binds.iter().map(|b| b.display()).collect::<Vec<_>>().join("/")
            }
            _ => "unbound".into(),
        }
    }

    fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action) {
            Some(binds) if !binds.is_empty() => binds[0].display(),
            _ => "?".into(),
        }
    }

    /// Status-bar hint built from the current bindings.
    pub fn status_bar_hint(&self) -> String {
        format!(
            "{}/{}: slide | drag: swipe | {}: category | {}: switch | {}: settings",
            self.short_binding(Action::Prev),
            self.short_binding(Action::Next),
            self.short_binding(Action::NextCategory),
            self.short_binding(Action::SwitchFocus),
            self.short_binding(Action::OpenSettings),
        )
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load from the default location, falling back to defaults on error.
    pub fn load() -> Self {
        Self::load_or_default(config_path())
    }

    /// Load `path`, logging and falling back to defaults on error.
    pub fn load_or_default(path: PathBuf) -> Self {
        match Self::load_from(&path) {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("{err}; using default settings");
                Self::with_defaults(path)
            }
        }
    }

    /// Load `path`.  A missing file yields the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigFileError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(c) => c,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!("no config at {}, using defaults", path.display());
                return Ok(Self::with_defaults(path.to_path_buf()));
            }
            Err(source) => {
                return Err(ConfigFileError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let file: ConfigFile = toml::from_str(&contents).map_err(|source| ConfigFileError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let mut config = Self::with_defaults(path.to_path_buf());
        config.carousel = config.carousel.overlay(file.carousel);
        config.testimonials = config.testimonials.overlay(file.testimonials);
        config.validate()?;

        for (key, values) in file.keys {
            let Some(action) = Action::from_config_key(&key) else {
                tracing::warn!("unknown action `{key}` in [keys]");
                continue;
            };
            let parsed: Vec<KeyBind> = values
                .iter()
                .filter_map(|v| {
                    let bind = KeyBind::parse(v.trim());
                    if bind.is_none() {
                        tracing::warn!("unrecognised key `{v}` for `{key}`");
                    }
                    bind
                })
                .collect();
            config.bindings.insert(action, parsed);
        }

        tracing::info!("loaded config from {}", path.display());
        Ok(config)
    }

    /// Check both sliders' tuning.
    pub fn validate(&self) -> Result<(), ConfigFileError> {
        self.carousel
            .slider_config()
            .map_err(|source| ConfigFileError::Invalid {
                table: "carousel",
                source,
            })?;
        self.testimonials
            .slider_config()
            .map_err(|source| ConfigFileError::Invalid {
                table: "testimonials",
                source,
            })?;
        Ok(())
    }

    /// Persist to the path this config was loaded from.
    pub fn save(&self) -> anyhow::Result<()> {
        self.save_to(&self.path)?;
        Ok(())
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigFileError> {
        let io_err = |source| ConfigFileError::Io {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        let keys = Action::ALL
            .iter()
            .filter_map(|&action| {
                let binds = self.bindings.get(&action)?;
                Some((
                    action.config_key().to_string(),
                    binds.iter().map(KeyBind::to_config_string).collect(),
                ))
            })
            .collect();
        let file = ConfigFile {
            carousel: self.carousel.to_table(),
            testimonials: self.testimonials.to_table(),
            keys,
        };
        let body = toml::to_string_pretty(&file)?;
        std::fs::write(path, format!("# slide-reel configuration\n\n{body}")).map_err(io_err)?;
        Ok(())
    }
}

/// `$XDG_CONFIG_HOME/slide-reel/config.toml`.
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("slide-reel").join("config.toml")
}
