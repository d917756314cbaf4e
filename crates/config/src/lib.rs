// Preferences for the Pipette color sampler

pub mod error;
pub mod formats;
pub mod preferences;
pub mod store;

pub use error::{ColorParseError, PrefsError, UnknownVariant};
pub use formats::{ColorFormat, CopyColorFormat, MenuBarItemClickAction};
pub use preferences::{PreferenceKey, Preferences, MAX_RECENT_COLORS};
pub use store::{ObserverId, PreferenceStore};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Framework-agnostic RGBA color
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn from_rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Convert from hex u32 (0xRRGGBB)
    pub fn from_hex_u32(hex: u32) -> Self {
        let r = ((hex >> 16) & 0xFF) as f32 / 255.0;
        let g = ((hex >> 8) & 0xFF) as f32 / 255.0;
        let b = (hex & 0xFF) as f32 / 255.0;
        Self { r, g, b, a: 1.0 }
    }

    /// Parse `#RGB`, `#RRGGBB` or `#RRGGBBAA` (the `#` is optional)
    pub fn parse_hex(input: &str) -> Result<Self, ColorParseError> {
        let err = || ColorParseError(input.to_string());
        let hex = input.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }

        let channel = |s: &str| u8::from_str_radix(s, 16).map(|v| v as f32 / 255.0);
        match hex.len() {
            3 => {
                let mut out = [0.0f32; 3];
                for (i, c) in hex.chars().enumerate() {
                    let doubled = format!("{c}{c}");
                    out[i] = channel(&doubled).map_err(|_| err())?;
                }
                Ok(Self::from_rgb(out[0], out[1], out[2]))
            }
            6 | 8 => {
                let r = channel(&hex[0..2]).map_err(|_| err())?;
                let g = channel(&hex[2..4]).map_err(|_| err())?;
                let b = channel(&hex[4..6]).map_err(|_| err())?;
                let a = if hex.len() == 8 {
                    channel(&hex[6..8]).map_err(|_| err())?
                } else {
                    1.0
                };
                Ok(Self::from_rgba(r, g, b, a))
            }
            _ => Err(err()),
        }
    }

    /// 8-bit quantized components
    pub fn to_rgba8(&self) -> [u8; 4] {
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b), q(self.a)]
    }

    /// `#rrggbb`, or `#rrggbbaa` when not fully opaque
    pub fn to_hex(&self) -> String {
        let [r, g, b, a] = self.to_rgba8();
        if a == 0xFF {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// True when both colors land on the same 8-bit swatch
    pub fn same_swatch(&self, other: &Color) -> bool {
        self.to_rgba8() == other.to_rgba8()
    }
}

// Stored as a hex string. Older documents wrote the component object.
impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredColor {
    Hex(String),
    Components {
        r: f32,
        g: f32,
        b: f32,
        #[serde(default = "opaque")]
        a: f32,
    },
}

fn opaque() -> f32 { 1.0 }

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match StoredColor::deserialize(deserializer)? {
            StoredColor::Hex(s) => Color::parse_hex(&s).map_err(serde::de::Error::custom),
            StoredColor::Components { r, g, b, a } => {
                let in_range = |v: f32| (0.0..=1.0).contains(&v);
                if [r, g, b, a].into_iter().all(in_range) {
                    Ok(Color::from_rgba(r, g, b, a))
                } else {
                    Err(serde::de::Error::custom("color components must be within 0..=1"))
                }
            }
        }
    }
}
