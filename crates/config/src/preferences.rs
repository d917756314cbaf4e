// Preference schema
// Every persisted key, its type and its default value live here.

use crate::error::PrefsError;
use crate::formats::{ColorFormat, CopyColorFormat, MenuBarItemClickAction};
use crate::Color;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// How many recently picked colors are remembered
pub const MAX_RECENT_COLORS: usize = 6;

/// Every declared preference key, in settings-window order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PreferenceKey {
    ShowInMenuBar,
    HideMenuBarIcon,
    ShowColorSamplerOnOpen,
    MenuBarItemClickAction,
    PreferredColorFormat,
    StayOnTop,
    UppercaseHexColor,
    HashPrefixInHexColor,
    LegacyColorSyntax,
    ShownColorFormats,
    LargerText,
    CopyColorAfterPicking,
    /// Deprecated, superseded by `CopyColorAfterPicking`
    ColorFormatToCopyAfterPicking,
    RecentlyPickedColors,
    PickColor,
    ToggleWindow,
}

impl PreferenceKey {
    pub const ALL: [PreferenceKey; 16] = [
        PreferenceKey::ShowInMenuBar,
        PreferenceKey::HideMenuBarIcon,
        PreferenceKey::ShowColorSamplerOnOpen,
        PreferenceKey::MenuBarItemClickAction,
        PreferenceKey::PreferredColorFormat,
        PreferenceKey::StayOnTop,
        PreferenceKey::UppercaseHexColor,
        PreferenceKey::HashPrefixInHexColor,
        PreferenceKey::LegacyColorSyntax,
        PreferenceKey::ShownColorFormats,
        PreferenceKey::LargerText,
        PreferenceKey::CopyColorAfterPicking,
        PreferenceKey::ColorFormatToCopyAfterPicking,
        PreferenceKey::RecentlyPickedColors,
        PreferenceKey::PickColor,
        PreferenceKey::ToggleWindow,
    ];

    /// Name the value is persisted under
    pub fn as_str(&self) -> &'static str {
        match self {
            PreferenceKey::ShowInMenuBar => "showInMenuBar",
            PreferenceKey::HideMenuBarIcon => "hideMenuBarIcon",
            PreferenceKey::ShowColorSamplerOnOpen => "showColorSamplerOnOpen",
            PreferenceKey::MenuBarItemClickAction => "menuBarItemClickAction",
            PreferenceKey::PreferredColorFormat => "preferredColorFormat",
            PreferenceKey::StayOnTop => "stayOnTop",
            PreferenceKey::UppercaseHexColor => "uppercaseHexColor",
            PreferenceKey::HashPrefixInHexColor => "hashPrefixInHexColor",
            PreferenceKey::LegacyColorSyntax => "legacyColorSyntax",
            PreferenceKey::ShownColorFormats => "shownColorFormats",
            PreferenceKey::LargerText => "largerText",
            PreferenceKey::CopyColorAfterPicking => "copyColorAfterPicking",
            PreferenceKey::ColorFormatToCopyAfterPicking => "colorFormatToCopyAfterPicking",
            PreferenceKey::RecentlyPickedColors => "recentlyPickedColors",
            PreferenceKey::PickColor => "pickColor",
            PreferenceKey::ToggleWindow => "toggleWindow",
        }
    }

    /// Label used in the settings window
    pub fn title(&self) -> &'static str {
        match self {
            PreferenceKey::ShowInMenuBar => "Show in menu bar",
            PreferenceKey::HideMenuBarIcon => "Hide menu bar icon",
            PreferenceKey::ShowColorSamplerOnOpen => "Show color sampler when opening window",
            PreferenceKey::MenuBarItemClickAction => "Menu bar item click action",
            PreferenceKey::PreferredColorFormat => "Preferred color format",
            PreferenceKey::StayOnTop => "Stay on top",
            PreferenceKey::UppercaseHexColor => "Uppercase hex color",
            PreferenceKey::HashPrefixInHexColor => "Prefix hex color with #",
            PreferenceKey::LegacyColorSyntax => "Use legacy color syntax",
            PreferenceKey::ShownColorFormats => "Shown color formats",
            PreferenceKey::LargerText => "Larger text",
            PreferenceKey::CopyColorAfterPicking => "Copy color in preferred format after picking",
            PreferenceKey::ColorFormatToCopyAfterPicking => "Copy color after picking (deprecated)",
            PreferenceKey::RecentlyPickedColors => "Recently picked colors",
            PreferenceKey::PickColor => "Pick color shortcut",
            PreferenceKey::ToggleWindow => "Toggle window shortcut",
        }
    }

    /// True for keys only kept so older stores still load
    pub fn is_deprecated(&self) -> bool {
        matches!(self, PreferenceKey::ColorFormatToCopyAfterPicking)
    }

    /// Short description of the accepted values, for usage messages
    pub fn value_hint(&self) -> String {
        fn join(raw: impl Iterator<Item = &'static str>) -> String {
            raw.collect::<Vec<_>>().join(" | ")
        }
        match self {
            PreferenceKey::MenuBarItemClickAction => {
                join(MenuBarItemClickAction::ALL.iter().map(|a| a.as_str()))
            }
            PreferenceKey::PreferredColorFormat => join(ColorFormat::ALL.iter().map(|f| f.as_str())),
            PreferenceKey::ColorFormatToCopyAfterPicking => {
                join(CopyColorFormat::ALL.iter().map(|f| f.as_str()))
            }
            PreferenceKey::ShownColorFormats => format!(
                "JSON array of {}",
                join(ColorFormat::ALL.iter().map(|f| f.as_str()))
            ),
            PreferenceKey::RecentlyPickedColors => "JSON array of hex colors".to_string(),
            PreferenceKey::PickColor | PreferenceKey::ToggleWindow => {
                "shortcut string, or null".to_string()
            }
            _ => "true | false".to_string(),
        }
    }
}

impl FromStr for PreferenceKey {
    type Err = PrefsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PreferenceKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| PrefsError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for PreferenceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Typed view of the store. Loading always goes through `from_value_lenient`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Preferences {
    // Menu bar
    #[serde(rename = "showInMenuBar")]
    pub show_in_menu_bar: bool,

    #[serde(rename = "hideMenuBarIcon")]
    pub hide_menu_bar_icon: bool,

    #[serde(rename = "showColorSamplerOnOpen")]
    pub show_color_sampler_on_open: bool,

    #[serde(rename = "menuBarItemClickAction")]
    pub menu_bar_item_click_action: MenuBarItemClickAction,

    // Formats
    #[serde(rename = "preferredColorFormat")]
    pub preferred_color_format: ColorFormat,

    // Window
    #[serde(rename = "stayOnTop")]
    pub stay_on_top: bool,

    #[serde(rename = "uppercaseHexColor")]
    pub uppercase_hex_color: bool,

    #[serde(rename = "hashPrefixInHexColor")]
    pub hash_prefix_in_hex_color: bool,

    #[serde(rename = "legacyColorSyntax")]
    pub legacy_color_syntax: bool,

    /// A set: kept deduplicated in `ColorFormat::ALL` order
    #[serde(rename = "shownColorFormats")]
    pub shown_color_formats: Vec<ColorFormat>,

    #[serde(rename = "largerText")]
    pub larger_text: bool,

    #[serde(rename = "copyColorAfterPicking")]
    pub copy_color_after_picking: bool,

    /// Deprecated: older stores chose a dedicated copy format here.
    /// Still read so `format_to_copy_after_picking` can honor it.
    #[serde(rename = "colorFormatToCopyAfterPicking")]
    pub color_format_to_copy_after_picking: CopyColorFormat,

    // History, oldest first
    #[serde(rename = "recentlyPickedColors")]
    pub recently_picked_colors: Vec<Color>,

    // Global shortcuts, None = not assigned
    #[serde(rename = "pickColor", skip_serializing_if = "Option::is_none")]
    pub pick_color_shortcut: Option<String>,

    #[serde(rename = "toggleWindow", skip_serializing_if = "Option::is_none")]
    pub toggle_window_shortcut: Option<String>,
}

fn default_shown_formats() -> Vec<ColorFormat> {
    ColorFormat::ALL.to_vec()
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            // Menu bar
            show_in_menu_bar: false,
            hide_menu_bar_icon: false,
            show_color_sampler_on_open: false,
            menu_bar_item_click_action: MenuBarItemClickAction::ShowMenu,
            // Formats
            preferred_color_format: ColorFormat::Hex,
            stay_on_top: true,
            uppercase_hex_color: false,
            hash_prefix_in_hex_color: false,
            legacy_color_syntax: false,
            shown_color_formats: default_shown_formats(),
            larger_text: false,
            copy_color_after_picking: false,
            color_format_to_copy_after_picking: CopyColorFormat::None,
            // History
            recently_picked_colors: Vec::new(),
            // Shortcuts
            pick_color_shortcut: None,
            toggle_window_shortcut: None,
        }
    }
}

/// Dedupe and order by `ColorFormat::ALL`
fn normalize_formats(formats: Vec<ColorFormat>) -> Vec<ColorFormat> {
    ColorFormat::ALL
        .into_iter()
        .filter(|f| formats.contains(f))
        .collect()
}

/// Keep only the newest `MAX_RECENT_COLORS`
fn cap_recent(mut colors: Vec<Color>) -> Vec<Color> {
    if colors.len() > MAX_RECENT_COLORS {
        colors.drain(..colors.len() - MAX_RECENT_COLORS);
    }
    colors
}

/// Empty or whitespace-only shortcuts count as unassigned
fn normalize_shortcut(shortcut: Option<String>) -> Option<String> {
    shortcut
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn parse_value<T: DeserializeOwned>(key: PreferenceKey, value: Value) -> Result<T, PrefsError> {
    serde_json::from_value(value).map_err(|e| PrefsError::InvalidValue {
        key: key.as_str().to_string(),
        message: e.to_string(),
    })
}

impl Preferences {
    /// Re-establish the collection and shortcut invariants after direct field edits
    pub(crate) fn normalize(&mut self) {
        let formats = std::mem::take(&mut self.shown_color_formats);
        self.shown_color_formats = normalize_formats(formats);
        let colors = std::mem::take(&mut self.recently_picked_colors);
        self.recently_picked_colors = cap_recent(colors);
        self.pick_color_shortcut = normalize_shortcut(self.pick_color_shortcut.take());
        self.toggle_window_shortcut = normalize_shortcut(self.toggle_window_shortcut.take());
    }

    /// Remember a freshly picked color.
    /// An existing entry for the same swatch moves to the end instead of duplicating.
    pub fn add_recent_color(&mut self, color: Color) {
        self.recently_picked_colors.retain(|c| !c.same_swatch(&color));
        self.recently_picked_colors.push(color);
        let colors = std::mem::take(&mut self.recently_picked_colors);
        self.recently_picked_colors = cap_recent(colors);
    }

    pub fn clear_recent_colors(&mut self) {
        self.recently_picked_colors.clear();
    }

    pub fn is_format_shown(&self, format: ColorFormat) -> bool {
        self.shown_color_formats.contains(&format)
    }

    pub fn set_format_shown(&mut self, format: ColorFormat, shown: bool) {
        let mut formats = std::mem::take(&mut self.shown_color_formats);
        if shown {
            formats.push(format);
        } else {
            formats.retain(|f| *f != format);
        }
        self.shown_color_formats = normalize_formats(formats);
    }

    /// Format to put on the clipboard after picking, if any.
    /// The current toggle wins; the deprecated per-format choice is the fallback.
    pub fn format_to_copy_after_picking(&self) -> Option<ColorFormat> {
        if self.copy_color_after_picking {
            Some(self.preferred_color_format)
        } else {
            self.color_format_to_copy_after_picking.color_format()
        }
    }

    /// Current value of a key as JSON (`null` for an unassigned shortcut)
    pub fn get(&self, key: PreferenceKey) -> Value {
        let string = |s: &str| Value::String(s.to_string());
        match key {
            PreferenceKey::ShowInMenuBar => Value::Bool(self.show_in_menu_bar),
            PreferenceKey::HideMenuBarIcon => Value::Bool(self.hide_menu_bar_icon),
            PreferenceKey::ShowColorSamplerOnOpen => Value::Bool(self.show_color_sampler_on_open),
            PreferenceKey::MenuBarItemClickAction => string(self.menu_bar_item_click_action.as_str()),
            PreferenceKey::PreferredColorFormat => string(self.preferred_color_format.as_str()),
            PreferenceKey::StayOnTop => Value::Bool(self.stay_on_top),
            PreferenceKey::UppercaseHexColor => Value::Bool(self.uppercase_hex_color),
            PreferenceKey::HashPrefixInHexColor => Value::Bool(self.hash_prefix_in_hex_color),
            PreferenceKey::LegacyColorSyntax => Value::Bool(self.legacy_color_syntax),
            PreferenceKey::ShownColorFormats => Value::Array(
                self.shown_color_formats.iter().map(|f| string(f.as_str())).collect(),
            ),
            PreferenceKey::LargerText => Value::Bool(self.larger_text),
            PreferenceKey::CopyColorAfterPicking => Value::Bool(self.copy_color_after_picking),
            PreferenceKey::ColorFormatToCopyAfterPicking => {
                string(self.color_format_to_copy_after_picking.as_str())
            }
            PreferenceKey::RecentlyPickedColors => Value::Array(
                self.recently_picked_colors.iter().map(|c| Value::String(c.to_hex())).collect(),
            ),
            PreferenceKey::PickColor => {
                self.pick_color_shortcut.as_deref().map(string).unwrap_or(Value::Null)
            }
            PreferenceKey::ToggleWindow => {
                self.toggle_window_shortcut.as_deref().map(string).unwrap_or(Value::Null)
            }
        }
    }

    /// Set a key from JSON. On a type mismatch nothing changes.
    pub fn set(&mut self, key: PreferenceKey, value: Value) -> Result<(), PrefsError> {
        match key {
            PreferenceKey::ShowInMenuBar => self.show_in_menu_bar = parse_value(key, value)?,
            PreferenceKey::HideMenuBarIcon => self.hide_menu_bar_icon = parse_value(key, value)?,
            PreferenceKey::ShowColorSamplerOnOpen => {
                self.show_color_sampler_on_open = parse_value(key, value)?
            }
            PreferenceKey::MenuBarItemClickAction => {
                self.menu_bar_item_click_action = parse_value(key, value)?
            }
            PreferenceKey::PreferredColorFormat => {
                self.preferred_color_format = parse_value(key, value)?
            }
            PreferenceKey::StayOnTop => self.stay_on_top = parse_value(key, value)?,
            PreferenceKey::UppercaseHexColor => self.uppercase_hex_color = parse_value(key, value)?,
            PreferenceKey::HashPrefixInHexColor => {
                self.hash_prefix_in_hex_color = parse_value(key, value)?
            }
            PreferenceKey::LegacyColorSyntax => self.legacy_color_syntax = parse_value(key, value)?,
            PreferenceKey::ShownColorFormats => {
                self.shown_color_formats = normalize_formats(parse_value(key, value)?)
            }
            PreferenceKey::LargerText => self.larger_text = parse_value(key, value)?,
            PreferenceKey::CopyColorAfterPicking => {
                self.copy_color_after_picking = parse_value(key, value)?
            }
            PreferenceKey::ColorFormatToCopyAfterPicking => {
                self.color_format_to_copy_after_picking = parse_value(key, value)?
            }
            PreferenceKey::RecentlyPickedColors => {
                self.recently_picked_colors = cap_recent(parse_value(key, value)?)
            }
            PreferenceKey::PickColor => {
                self.pick_color_shortcut = normalize_shortcut(parse_value(key, value)?)
            }
            PreferenceKey::ToggleWindow => {
                self.toggle_window_shortcut = normalize_shortcut(parse_value(key, value)?)
            }
        }
        Ok(())
    }

    /// Restore one key to its default
    pub fn reset(&mut self, key: PreferenceKey) {
        let d = Self::default();
        match key {
            PreferenceKey::ShowInMenuBar => self.show_in_menu_bar = d.show_in_menu_bar,
            PreferenceKey::HideMenuBarIcon => self.hide_menu_bar_icon = d.hide_menu_bar_icon,
            PreferenceKey::ShowColorSamplerOnOpen => {
                self.show_color_sampler_on_open = d.show_color_sampler_on_open
            }
            PreferenceKey::MenuBarItemClickAction => {
                self.menu_bar_item_click_action = d.menu_bar_item_click_action
            }
            PreferenceKey::PreferredColorFormat => {
                self.preferred_color_format = d.preferred_color_format
            }
            PreferenceKey::StayOnTop => self.stay_on_top = d.stay_on_top,
            PreferenceKey::UppercaseHexColor => self.uppercase_hex_color = d.uppercase_hex_color,
            PreferenceKey::HashPrefixInHexColor => {
                self.hash_prefix_in_hex_color = d.hash_prefix_in_hex_color
            }
            PreferenceKey::LegacyColorSyntax => self.legacy_color_syntax = d.legacy_color_syntax,
            PreferenceKey::ShownColorFormats => self.shown_color_formats = d.shown_color_formats,
            PreferenceKey::LargerText => self.larger_text = d.larger_text,
            PreferenceKey::CopyColorAfterPicking => {
                self.copy_color_after_picking = d.copy_color_after_picking
            }
            PreferenceKey::ColorFormatToCopyAfterPicking => {
                self.color_format_to_copy_after_picking = d.color_format_to_copy_after_picking
            }
            PreferenceKey::RecentlyPickedColors => {
                self.recently_picked_colors = d.recently_picked_colors
            }
            PreferenceKey::PickColor => self.pick_color_shortcut = d.pick_color_shortcut,
            PreferenceKey::ToggleWindow => self.toggle_window_shortcut = d.toggle_window_shortcut,
        }
    }

    pub fn reset_all(&mut self) {
        *self = Self::default();
    }

    pub fn is_default(&self, key: PreferenceKey) -> bool {
        self.get(key) == Self::default().get(key)
    }

    /// Keys whose values differ between `self` and `other`, in `PreferenceKey::ALL` order
    pub fn changed_keys(&self, other: &Preferences) -> Vec<PreferenceKey> {
        PreferenceKey::ALL
            .into_iter()
            .filter(|k| self.get(*k) != other.get(*k))
            .collect()
    }

    /// Build preferences from a stored JSON document.
    ///
    /// Unknown keys are ignored and a key holding a value of the wrong type
    /// keeps its default, so one bad entry never discards the rest.
    pub fn from_json_lenient(contents: &str) -> Result<Self, PrefsError> {
        let value: Value =
            serde_json::from_str(contents).map_err(|e| PrefsError::Parse(e.to_string()))?;
        Self::from_value_lenient(value)
    }

    /// Same as `from_json_lenient`, starting from an already-parsed value
    pub fn from_value_lenient(value: Value) -> Result<Self, PrefsError> {
        let Value::Object(mut map) = value else {
            return Err(PrefsError::Parse("preferences document must be an object".to_string()));
        };

        let mut prefs = Self::default();
        for key in PreferenceKey::ALL {
            let Some(raw) = map.remove(key.as_str()) else {
                continue;
            };
            if let Err(e) = prefs.set(key, raw) {
                log::warn!("{e}; using default");
            } else if key.is_deprecated() && !prefs.is_default(key) {
                log::debug!("Read deprecated preference {key}");
            }
        }
        for unknown in map.keys() {
            log::debug!("Ignoring unknown preference key {unknown:?}");
        }
        Ok(prefs)
    }

    /// All keys as a JSON object, in `PreferenceKey::ALL` order
    pub fn to_json_map(&self) -> Map<String, Value> {
        PreferenceKey::ALL
            .into_iter()
            .map(|k| (k.as_str().to_string(), self.get(k)))
            .collect()
    }

    pub fn to_json_pretty(&self) -> Result<String, PrefsError> {
        serde_json::to_string_pretty(self).map_err(|e| PrefsError::Serialize(e.to_string()))
    }

    /// TOML export. Unassigned shortcuts are omitted.
    pub fn to_toml(&self) -> Result<String, PrefsError> {
        toml::to_string_pretty(self).map_err(|e| PrefsError::Serialize(e.to_string()))
    }

    /// TOML import, with the same leniency as `from_json_lenient`
    pub fn from_toml_str(contents: &str) -> Result<Self, PrefsError> {
        let table: toml::Table =
            toml::from_str(contents).map_err(|e| PrefsError::Parse(e.to_string()))?;
        let value = serde_json::to_value(table).map_err(|e| PrefsError::Parse(e.to_string()))?;
        Self::from_value_lenient(value)
    }
}
