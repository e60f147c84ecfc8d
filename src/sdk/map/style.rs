use serde::Serialize;

/// Line color picked from a route's position in the backend's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteColor {
    Green,
    Orange,
    Red,
}

impl RouteColor {
    /// First route green, second orange, everything after red.
    pub fn for_index(index: usize) -> Self {
        match index {
            0 => RouteColor::Green,
            1 => RouteColor::Orange,
            _ => RouteColor::Red,
        }
    }

    pub fn css_name(&self) -> &'static str {
        match self {
            RouteColor::Green => "green",
            RouteColor::Orange => "orange",
            RouteColor::Red => "red",
        }
    }

    /// sRGB components of the CSS named color.
    pub fn rgb(&self) -> (u8, u8, u8) {
        match self {
            RouteColor::Green => (0, 128, 0),
            RouteColor::Orange => (255, 165, 0),
            RouteColor::Red => (255, 0, 0),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub color: RouteColor,
    pub weight: f64,
    pub opacity: f64,
}

impl LineStyle {
    pub const DEFAULT_WEIGHT: f64 = 5.0;
    pub const DEFAULT_OPACITY: f64 = 0.8;

    pub fn new(color: RouteColor) -> Self {
        Self {
            color,
            weight: Self::DEFAULT_WEIGHT,
            opacity: Self::DEFAULT_OPACITY,
        }
    }

    /// Alpha channel derived from the opacity.
    pub fn alpha(&self) -> u8 {
        (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8
    }
}
