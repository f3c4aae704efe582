//! Zoom control for the active display surface.

use std::sync::RwLock;

use crate::error::{BridgeError, BridgeResult};

/// Smallest zoom factor the canvas view supports.
pub const MIN_ZOOM: f64 = 0.05;

/// Largest zoom factor the canvas view supports.
pub const MAX_ZOOM: f64 = 32.0;

/// Zoom factor of a freshly opened view.
pub const DEFAULT_ZOOM: f64 = 1.0;

/// A display surface with a multiplicative zoom factor.
///
/// The bridge passes factors through unchanged. What the surface accepts is
/// up to the surface.
pub trait ZoomSurface: Send + Sync {
    /// The current zoom factor.
    fn zoom_factor(&self) -> f64;

    /// Apply `factor` and return the factor now in effect.
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::InvalidZoom`] if the surface refuses `factor`.
    fn set_zoom_factor(&self, factor: f64) -> BridgeResult<f64>;
}

/// In-process view zoom.
///
/// Accepts any finite positive factor and saturates it into
/// `[MIN_ZOOM, MAX_ZOOM]`.
#[derive(Debug)]
pub struct ViewZoom {
    factor: RwLock<f64>,
}

impl ViewZoom {
    /// Create a view at `initial`, saturated into the supported range.
    #[must_use]
    pub fn new(initial: f64) -> Self {
        let factor = if initial.is_finite() && initial > 0.0 {
            initial.clamp(MIN_ZOOM, MAX_ZOOM)
        } else {
            DEFAULT_ZOOM
        };
        Self {
            factor: RwLock::new(factor),
        }
    }
}

impl Default for ViewZoom {
    fn default() -> Self {
        Self::new(DEFAULT_ZOOM)
    }
}

impl ZoomSurface for ViewZoom {
    fn zoom_factor(&self) -> f64 {
        *self
            .factor
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn set_zoom_factor(&self, factor: f64) -> BridgeResult<f64> {
        if !factor.is_finite() || factor <= 0.0 {
            return Err(BridgeError::InvalidZoom(factor));
        }
        let applied = factor.clamp(MIN_ZOOM, MAX_ZOOM);
        *self
            .factor
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = applied;
        tracing::debug!("Zoom factor set to {applied}");
        Ok(applied)
    }
}
