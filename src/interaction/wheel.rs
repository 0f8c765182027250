use serde::{Deserialize, Serialize};

use crate::core::Point;

const LINE_HEIGHT_PX: f64 = 40.0;
const PAGE_HEIGHT_PX: f64 = 800.0;

/// Unit of a raw wheel delta, mirroring DOM `deltaMode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum DeltaMode {
    #[default]
    Pixel,
    Line,
    Page,
}

impl DeltaMode {
    #[must_use]
    pub const fn pixels_per_unit(self) -> f64 {
        match self {
            Self::Pixel => 1.0,
            Self::Line => LINE_HEIGHT_PX,
            Self::Page => PAGE_HEIGHT_PX,
        }
    }
}

/// Raw wheel event as delivered by the host, position relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WheelInput {
    pub delta_x: f64,
    pub delta_y: f64,
    #[serde(default)]
    pub delta_mode: DeltaMode,
    pub x: f64,
    pub y: f64,
}

impl WheelInput {
    #[must_use]
    pub fn pixels(delta_y: f64, x: f64, y: f64) -> Self {
        Self {
            delta_x: 0.0,
            delta_y,
            delta_mode: DeltaMode::Pixel,
            x,
            y,
        }
    }

    #[must_use]
    pub fn position(self) -> Point {
        Point::new(self.x, self.y)
    }

    #[must_use]
    pub fn normalize(self) -> NormalizedWheel {
        let unit = self.delta_mode.pixels_per_unit();
        let pixel_x = self.delta_x * unit;
        let pixel_y = self.delta_y * unit;
        NormalizedWheel {
            spin_x: spin(pixel_x),
            spin_y: spin(pixel_y),
            pixel_x,
            pixel_y,
            position: self.position(),
        }
    }
}

/// Device-independent wheel step: a notch direction per axis plus pixel deltas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWheel {
    pub spin_x: f64,
    pub spin_y: f64,
    pub pixel_x: f64,
    pub pixel_y: f64,
    pub position: Point,
}

fn spin(pixels: f64) -> f64 {
    if !pixels.is_finite() || pixels == 0.0 {
        0.0
    } else {
        pixels.signum()
    }
}
