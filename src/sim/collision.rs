//! Heart-versus-basket catch test
//!
//! A heart is caught when its bottom edge is inside the basket's vertical band
//! and its horizontal center is over the basket. Both checks are widened by
//! fixed tolerances since positions are only sampled once per frame.

use serde::{Deserialize, Serialize};

use super::state::{Basket, PlayArea};
use crate::consts::{BASKET_BOTTOM_OFFSET, CATCH_TOLERANCE_BELOW, CATCH_TOLERANCE_SIDE};

/// Axis-aligned rectangle in play-area coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Square of side `size` centered on `(cx, cy)`
    pub fn centered(cx: f32, cy: f32, size: f32) -> Self {
        Self::new(cx - size / 2.0, cy - size / 2.0, size, size)
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.left + self.width / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// Result of a catch test
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionResult {
    Hit,
    NoHit,
}

impl CollisionResult {
    pub fn is_hit(self) -> bool {
        self == CollisionResult::Hit
    }
}

/// Region a heart must reach to count as caught, tolerances included
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CatchZone {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl CatchZone {
    pub fn new(basket: &Basket, area: &PlayArea) -> Self {
        let basket_left = basket.center_px(area.width) - basket.width / 2.0;
        let basket_right = basket_left + basket.width;
        let basket_top = area.height - basket.height - BASKET_BOTTOM_OFFSET;
        Self {
            left: basket_left - CATCH_TOLERANCE_SIDE,
            right: basket_right + CATCH_TOLERANCE_SIDE,
            top: basket_top,
            bottom: basket_top + basket.height + CATCH_TOLERANCE_BELOW,
        }
    }

    pub fn test(&self, bounds: &Rect) -> CollisionResult {
        let center_x = bounds.center_x();
        let bottom = bounds.bottom();
        let in_band = bottom >= self.top && bottom <= self.bottom;
        let over_basket = center_x >= self.left && center_x <= self.right;
        if in_band && over_basket {
            CollisionResult::Hit
        } else {
            CollisionResult::NoHit
        }
    }
}

/// Check a heart's on-screen bounds against the basket
pub fn evaluate(bounds: &Rect, basket: &Basket, area: &PlayArea) -> CollisionResult {
    CatchZone::new(basket, area).test(bounds)
}
