//! Flower variants and their color palettes. Palettes are pure lookups;
//! unknown variant names fall back to the rose-red palette by contract
//! rather than failing.

use crate::core::Rgba8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Variant {
    RoseRed,
    RosePink,
    RoseWhite,
    LilyWhite,
    LilyPink,
    LilyOrange,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Family {
    Rose,
    Lily,
}

impl Variant {
    pub fn family(self) -> Family {
        match self {
            Self::RoseRed | Self::RosePink | Self::RoseWhite => Family::Rose,
            Self::LilyWhite | Self::LilyPink | Self::LilyOrange => Family::Lily,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::RoseRed => "rose-red",
            Self::RosePink => "rose-pink",
            Self::RoseWhite => "rose-white",
            Self::LilyWhite => "lily-white",
            Self::LilyPink => "lily-pink",
            Self::LilyOrange => "lily-orange",
        }
    }

    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "rose-red" => Some(Self::RoseRed),
            "rose-pink" => Some(Self::RosePink),
            "rose-white" => Some(Self::RoseWhite),
            "lily-white" => Some(Self::LilyWhite),
            "lily-pink" => Some(Self::LilyPink),
            "lily-orange" => Some(Self::LilyOrange),
            _ => None,
        }
    }
}

/// Primary/secondary/stroke colors plus the 4-entry rotation cycled
/// across layered petals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Palette {
    pub primary: Rgba8,
    pub secondary: Rgba8,
    pub stroke: Rgba8,
    pub variations: [Rgba8; 4],
}

impl Palette {
    pub fn of(variant: Variant) -> Self {
        match variant {
            Variant::RoseRed => Self {
                primary: Rgba8::rgb(0xe3, 0x18, 0x37),
                secondary: Rgba8::rgb(0xd8, 0x16, 0x36),
                stroke: Rgba8::rgb(0xa0, 0x11, 0x28),
                variations: [
                    Rgba8::rgb(0xe3, 0x18, 0x37),
                    Rgba8::rgb(0xd8, 0x16, 0x36),
                    Rgba8::rgb(0xc4, 0x14, 0x32),
                    Rgba8::rgb(0xb3, 0x12, 0x30),
                ],
            },
            Variant::RosePink => Self {
                primary: Rgba8::rgb(0xff, 0x69, 0xb4),
                secondary: Rgba8::rgb(0xff, 0x14, 0x93),
                stroke: Rgba8::rgb(0xc7, 0x15, 0x85),
                variations: [
                    Rgba8::rgb(0xff, 0x69, 0xb4),
                    Rgba8::rgb(0xff, 0x14, 0x93),
                    Rgba8::rgb(0xdb, 0x70, 0x93),
                    Rgba8::rgb(0xc7, 0x15, 0x85),
                ],
            },
            Variant::RoseWhite => Self {
                primary: Rgba8::rgb(0xff, 0xff, 0xff),
                secondary: Rgba8::rgb(0xff, 0xf0, 0xf5),
                stroke: Rgba8::rgb(0xff, 0xd9, 0xe6),
                variations: [
                    Rgba8::rgb(0xff, 0xff, 0xff),
                    Rgba8::rgb(0xff, 0xf0, 0xf5),
                    Rgba8::rgb(0xff, 0xe4, 0xe1),
                    Rgba8::rgb(0xff, 0xd9, 0xe6),
                ],
            },
            Variant::LilyWhite => Self {
                primary: Rgba8::rgb(0xff, 0xff, 0xff),
                secondary: Rgba8::rgb(0xff, 0xf5, 0xee),
                stroke: Rgba8::rgb(0xff, 0xef, 0xd5),
                variations: [
                    Rgba8::rgb(0xff, 0xff, 0xff),
                    Rgba8::rgb(0xff, 0xf5, 0xee),
                    Rgba8::rgb(0xff, 0xef, 0xd5),
                    Rgba8::rgb(0xfa, 0xf0, 0xe6),
                ],
            },
            Variant::LilyPink => Self {
                primary: Rgba8::rgb(0xff, 0xb7, 0xc5),
                secondary: Rgba8::rgb(0xff, 0xc0, 0xcb),
                stroke: Rgba8::rgb(0xff, 0x69, 0xb4),
                variations: [
                    Rgba8::rgb(0xff, 0xb7, 0xc5),
                    Rgba8::rgb(0xff, 0xc0, 0xcb),
                    Rgba8::rgb(0xff, 0xb6, 0xc1),
                    Rgba8::rgb(0xff, 0x82, 0xab),
                ],
            },
            Variant::LilyOrange => Self {
                primary: Rgba8::rgb(0xff, 0xa0, 0x7a),
                secondary: Rgba8::rgb(0xff, 0x8c, 0x69),
                stroke: Rgba8::rgb(0xff, 0x7f, 0x50),
                variations: [
                    Rgba8::rgb(0xff, 0xa0, 0x7a),
                    Rgba8::rgb(0xff, 0x8c, 0x69),
                    Rgba8::rgb(0xff, 0x7f, 0x50),
                    Rgba8::rgb(0xff, 0x63, 0x47),
                ],
            },
        }
    }

    /// Palette for a variant name; unknown names get the rose-red palette.
    pub fn of_name(name: &str) -> Self {
        Self::of(Variant::parse(name).unwrap_or(Variant::RoseRed))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_variant_falls_back_to_rose_red() {
        assert_eq!(Palette::of_name("unknown-variant"), Palette::of(Variant::RoseRed));
        assert_eq!(Palette::of_name(""), Palette::of(Variant::RoseRed));
    }

    #[test]
    fn known_names_round_trip() {
        for v in [
            Variant::RoseRed,
            Variant::RosePink,
            Variant::RoseWhite,
            Variant::LilyWhite,
            Variant::LilyPink,
            Variant::LilyOrange,
        ] {
            assert_eq!(Variant::parse(v.as_str()), Some(v));
            assert_eq!(Palette::of_name(v.as_str()), Palette::of(v));
        }
    }

    #[test]
    fn serde_names_are_kebab_case() {
        let s = serde_json::to_string(&Variant::LilyOrange).unwrap();
        assert_eq!(s, "\"lily-orange\"");
        let v: Variant = serde_json::from_str("\"rose-pink\"").unwrap();
        assert_eq!(v, Variant::RosePink);
    }

    #[test]
    fn families_split_three_three() {
        assert_eq!(Variant::RoseWhite.family(), Family::Rose);
        assert_eq!(Variant::LilyPink.family(), Family::Lily);
    }
}
