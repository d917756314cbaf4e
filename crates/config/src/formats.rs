// Color formats and menu bar behavior
// Raw values are what gets persisted; titles are what the UI shows.

use crate::error::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Raw value older stores wrote for the NSColor format
const LEGACY_NS_COLOR: &str = "nsc";

/// Representation a sampled color can be shown or copied in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ColorFormat {
    #[default]
    Hex,
    Hsl,
    Rgb,
    Lch,
    /// `NSColor(srgbRed:green:blue:alpha:)` source snippet
    #[serde(rename = "nsSRGB", alias = "nsc")]
    NsSrgb,
    /// `UIColor(red:green:blue:alpha:)` source snippet
    #[serde(rename = "uiSRGB")]
    UiSrgb,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 6] = [
        ColorFormat::Hex,
        ColorFormat::Hsl,
        ColorFormat::Rgb,
        ColorFormat::Lch,
        ColorFormat::NsSrgb,
        ColorFormat::UiSrgb,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ColorFormat::Hex => "hex",
            ColorFormat::Hsl => "hsl",
            ColorFormat::Rgb => "rgb",
            ColorFormat::Lch => "lch",
            ColorFormat::NsSrgb => "nsSRGB",
            ColorFormat::UiSrgb => "uiSRGB",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            ColorFormat::Hex => "Hex",
            ColorFormat::Hsl => "HSL",
            ColorFormat::Rgb => "RGB",
            ColorFormat::Lch => "LCH",
            ColorFormat::NsSrgb => "NSColor sRGB",
            ColorFormat::UiSrgb => "UIColor sRGB",
        }
    }
}

impl FromStr for ColorFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == LEGACY_NS_COLOR {
            return Ok(ColorFormat::NsSrgb);
        }
        ColorFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownVariant { kind: "color format", value: s.to_string() })
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What gets put on the clipboard right after a color is picked.
///
/// Deprecated together with `colorFormatToCopyAfterPicking`: newer stores
/// use the `copyColorAfterPicking` toggle plus the preferred format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CopyColorFormat {
    /// Nothing is copied (default)
    #[default]
    None,
    Hex,
    Hsl,
    Rgb,
    Lch,
}

impl CopyColorFormat {
    pub const ALL: [CopyColorFormat; 5] = [
        CopyColorFormat::None,
        CopyColorFormat::Hex,
        CopyColorFormat::Hsl,
        CopyColorFormat::Rgb,
        CopyColorFormat::Lch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self.color_format() {
            Some(format) => format.as_str(),
            None => "none",
        }
    }

    pub fn title(&self) -> &'static str {
        match self.color_format() {
            Some(format) => format.title(),
            None => "None",
        }
    }

    /// The format to copy in, if any
    pub fn color_format(&self) -> Option<ColorFormat> {
        match self {
            CopyColorFormat::None => None,
            CopyColorFormat::Hex => Some(ColorFormat::Hex),
            CopyColorFormat::Hsl => Some(ColorFormat::Hsl),
            CopyColorFormat::Rgb => Some(ColorFormat::Rgb),
            CopyColorFormat::Lch => Some(ColorFormat::Lch),
        }
    }
}

/// The source-snippet formats never had a copy-after-picking counterpart
impl TryFrom<ColorFormat> for CopyColorFormat {
    type Error = UnknownVariant;

    fn try_from(format: ColorFormat) -> Result<Self, Self::Error> {
        match format {
            ColorFormat::Hex => Ok(CopyColorFormat::Hex),
            ColorFormat::Hsl => Ok(CopyColorFormat::Hsl),
            ColorFormat::Rgb => Ok(CopyColorFormat::Rgb),
            ColorFormat::Lch => Ok(CopyColorFormat::Lch),
            ColorFormat::NsSrgb | ColorFormat::UiSrgb => Err(UnknownVariant {
                kind: "copy format",
                value: format.as_str().to_string(),
            }),
        }
    }
}

impl FromStr for CopyColorFormat {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CopyColorFormat::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| UnknownVariant { kind: "copy format", value: s.to_string() })
    }
}

impl fmt::Display for CopyColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What a left click on the menu bar item does.
/// A right click always does the other of "menu" / "sampler".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MenuBarItemClickAction {
    #[default]
    ShowMenu,
    ShowColorSampler,
    ToggleWindow,
}

impl MenuBarItemClickAction {
    pub const ALL: [MenuBarItemClickAction; 3] = [
        MenuBarItemClickAction::ShowMenu,
        MenuBarItemClickAction::ShowColorSampler,
        MenuBarItemClickAction::ToggleWindow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MenuBarItemClickAction::ShowMenu => "showMenu",
            MenuBarItemClickAction::ShowColorSampler => "showColorSampler",
            MenuBarItemClickAction::ToggleWindow => "toggleWindow",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            MenuBarItemClickAction::ShowMenu => "Show menu",
            MenuBarItemClickAction::ShowColorSampler => "Show color sampler",
            MenuBarItemClickAction::ToggleWindow => "Toggle window",
        }
    }

    /// Help text shown under the picker in settings
    pub fn tip(&self) -> &'static str {
        match self {
            MenuBarItemClickAction::ShowMenu => "Right-click to show the color sampler",
            MenuBarItemClickAction::ShowColorSampler | MenuBarItemClickAction::ToggleWindow => {
                "Right-click to show the menu"
            }
        }
    }
}

impl FromStr for MenuBarItemClickAction {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MenuBarItemClickAction::ALL
            .into_iter()
            .find(|a| a.as_str() == s)
            .ok_or_else(|| UnknownVariant { kind: "menu bar click action", value: s.to_string() })
    }
}

impl fmt::Display for MenuBarItemClickAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_format_titles() {
        let titles: Vec<_> = ColorFormat::ALL.iter().map(|f| f.title()).collect();
        assert_eq!(titles, ["Hex", "HSL", "RGB", "LCH", "NSColor sRGB", "UIColor sRGB"]);
    }

    #[test]
    fn test_raw_values_match_serde() {
        for format in ColorFormat::ALL {
            let json = serde_json::to_value(format).unwrap();
            assert_eq!(json, format.as_str());
            assert_eq!(format.as_str().parse::<ColorFormat>().unwrap(), format);
        }
        for format in CopyColorFormat::ALL {
            let json = serde_json::to_value(format).unwrap();
            assert_eq!(json, format.as_str());
            assert_eq!(format.as_str().parse::<CopyColorFormat>().unwrap(), format);
        }
        for action in MenuBarItemClickAction::ALL {
            let json = serde_json::to_value(action).unwrap();
            assert_eq!(json, action.as_str());
            assert_eq!(action.as_str().parse::<MenuBarItemClickAction>().unwrap(), action);
        }
    }

    #[test]
    fn test_snippet_formats_raw_values() {
        assert_eq!(ColorFormat::NsSrgb.as_str(), "nsSRGB");
        assert_eq!(ColorFormat::UiSrgb.as_str(), "uiSRGB");
        assert_eq!("nsSRGB".parse::<ColorFormat>().unwrap(), ColorFormat::NsSrgb);
        assert_eq!("uiSRGB".parse::<ColorFormat>().unwrap(), ColorFormat::UiSrgb);
    }

    #[test]
    fn test_legacy_nsc_reads_as_ns_srgb() {
        assert_eq!("nsc".parse::<ColorFormat>().unwrap(), ColorFormat::NsSrgb);
        let read: ColorFormat = serde_json::from_str("\"nsc\"").unwrap();
        assert_eq!(read, ColorFormat::NsSrgb);
        // Written back under the current raw value
        assert_eq!(serde_json::to_value(read).unwrap(), "nsSRGB");
    }

    #[test]
    fn test_copy_format_maps_to_color_format() {
        assert_eq!(CopyColorFormat::None.color_format(), None);
        assert_eq!(CopyColorFormat::None.title(), "None");
        let titles: Vec<_> = CopyColorFormat::ALL.iter().map(|f| f.title()).collect();
        assert_eq!(titles, ["None", "Hex", "HSL", "RGB", "LCH"]);

        for copy in CopyColorFormat::ALL.into_iter().skip(1) {
            let format = copy.color_format().unwrap();
            assert_eq!(CopyColorFormat::try_from(format).unwrap(), copy);
        }
        assert!(CopyColorFormat::try_from(ColorFormat::NsSrgb).is_err());
        assert!(CopyColorFormat::try_from(ColorFormat::UiSrgb).is_err());
        assert!("oklch".parse::<CopyColorFormat>().is_err());
    }

    #[test]
    fn test_click_action_titles_and_tips() {
        assert_eq!(MenuBarItemClickAction::default(), MenuBarItemClickAction::ShowMenu);
        assert_eq!(MenuBarItemClickAction::ShowColorSampler.title(), "Show color sampler");
        assert_eq!(MenuBarItemClickAction::ShowMenu.tip(), "Right-click to show the color sampler");
        assert_eq!(MenuBarItemClickAction::ToggleWindow.tip(), "Right-click to show the menu");
        for action in MenuBarItemClickAction::ALL {
            assert!(!action.title().is_empty());
            assert!(!action.tip().is_empty());
        }
    }

    #[test]
    fn test_unknown_variant() {
        let err = "cmyk".parse::<ColorFormat>().unwrap_err();
        assert_eq!(err.value, "cmyk");
        assert!(err.to_string().contains("color format"));
        assert!("oklch".parse::<ColorFormat>().is_err());
        assert!("showmenu".parse::<MenuBarItemClickAction>().is_err());
    }
}
