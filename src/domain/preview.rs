//! Non-owning handle to the on-screen preview surface

use serde::{Deserialize, Serialize};

use crate::domain::geometry::Rect;

/// Identifier of a preview surface owned by the UI layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PreviewId(pub u32);

/// The preview the camera feed is rendered into.
///
/// Only the id and geometry are held here; the surface itself stays with
/// whoever draws it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PreviewTarget {
    pub id: PreviewId,
    pub bounds: Rect,
    /// Front cameras render mirrored
    pub mirrored: bool,
}

impl PreviewTarget {
    pub fn new(id: u32, width: f64, height: f64) -> Self {
        Self {
            id: PreviewId(id),
            bounds: Rect::from_size(width, height),
            mirrored: true,
        }
    }

    pub fn with_mirrored(mut self, mirrored: bool) -> Self {
        self.mirrored = mirrored;
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }
}
