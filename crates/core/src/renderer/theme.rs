//! Color themes for rendered slides.

use serde::{Deserialize, Serialize};

use crate::generator::CarouselKind;

/// Named color theme passed to the render command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    Blue,
    Purple,
    LightCream,
    LogicLight,
}

/// RGB palette for a theme, serialized into the per-slide payload so the
/// render command paints with the exact colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub gradient_top: (u8, u8, u8),
    pub gradient_bottom: (u8, u8, u8),
    pub header: (u8, u8, u8),
    pub heading: (u8, u8, u8),
    pub body: (u8, u8, u8),
    pub code_bg: (u8, u8, u8),
    pub code_text: (u8, u8, u8),
    pub accent: (u8, u8, u8),
}

impl Theme {
    /// Stable string form used in config and on the render command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Blue => "blue",
            Theme::Purple => "purple",
            Theme::LightCream => "light_cream",
            Theme::LogicLight => "logic_light",
        }
    }

    /// Theme used for each carousel kind.
    pub fn for_kind(kind: CarouselKind) -> Self {
        match kind {
            CarouselKind::Topic => Theme::Blue,
            CarouselKind::Quiz => Theme::Purple,
            CarouselKind::GuessOutput => Theme::LightCream,
            CarouselKind::LogicPuzzle => Theme::LogicLight,
        }
    }

    pub fn palette(&self) -> Palette {
        match self {
            Theme::Blue => Palette {
                gradient_top: (240, 248, 255),
                gradient_bottom: (189, 224, 254),
                header: (37, 99, 235),
                heading: (15, 23, 42),
                body: (30, 41, 59),
                code_bg: (15, 23, 42),
                code_text: (224, 242, 254),
                accent: (59, 130, 246),
            },
            Theme::Purple => Palette {
                gradient_top: (250, 245, 255),
                gradient_bottom: (221, 214, 254),
                header: (109, 40, 217),
                heading: (17, 24, 39),
                body: (31, 41, 55),
                code_bg: (17, 24, 39),
                code_text: (233, 213, 255),
                accent: (147, 51, 234),
            },
            Theme::LightCream => Palette {
                gradient_top: (255, 252, 244),
                gradient_bottom: (250, 240, 215),
                header: (210, 180, 140),
                heading: (101, 67, 33),
                body: (80, 54, 22),
                code_bg: (220, 198, 156),
                code_text: (40, 30, 10),
                accent: (205, 133, 63),
            },
            Theme::LogicLight => Palette {
                gradient_top: (255, 255, 255),
                gradient_bottom: (230, 230, 230),
                header: (30, 30, 30),
                heading: (20, 20, 20),
                body: (50, 50, 50),
                code_bg: (240, 240, 240),
                code_text: (30, 30, 30),
                accent: (30, 30, 30),
            },
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
