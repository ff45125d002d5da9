//! Detected-object metadata and the faces derived from it

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::InvalidFaceFilterError;
use crate::domain::geometry::Rect;

/// Kind of region a device reported.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataKind {
    Face,
    HumanBody,
    Barcode,
    Other(String),
}

/// One detected region, bounds in device (unit) coordinate space.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetadataObject {
    pub kind: MetadataKind,
    pub bounds: Rect,
}

impl MetadataObject {
    pub fn new(kind: MetadataKind, bounds: Rect) -> Self {
        Self { kind, bounds }
    }

    pub fn face(bounds: Rect) -> Self {
        Self::new(MetadataKind::Face, bounds)
    }

    pub fn is_face(&self) -> bool {
        self.kind == MetadataKind::Face
    }
}

/// A face rectangle in preview coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedFace {
    pub bounds: Rect,
}

impl DetectedFace {
    pub fn new(bounds: Rect) -> Self {
        Self { bounds }
    }
}

impl fmt::Display for DetectedFace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "face {}", self.bounds)
    }
}

/// Geometric test a transformed face must pass against the preview bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FaceFilter {
    /// Face must lie entirely inside the preview
    #[default]
    Contain,
    /// Face must overlap the preview
    Intersect,
}

impl FaceFilter {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Contain => "contain",
            Self::Intersect => "intersect",
        }
    }

    pub fn accepts(&self, preview: &Rect, face: &Rect) -> bool {
        match self {
            Self::Contain => preview.contains(face),
            Self::Intersect => preview.intersects(face),
        }
    }
}

impl fmt::Display for FaceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FaceFilter {
    type Err = InvalidFaceFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "contain" | "contains" => Ok(Self::Contain),
            "intersect" | "intersects" => Ok(Self::Intersect),
            _ => Err(InvalidFaceFilterError {
                input: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_constructor_sets_kind() {
        let object = MetadataObject::face(Rect::new(0.1, 0.1, 0.2, 0.2));
        assert!(object.is_face());
        assert!(!MetadataObject::new(MetadataKind::Barcode, Rect::ZERO).is_face());
    }

    #[test]
    fn contain_filter_rejects_partial_overlap() {
        let preview = Rect::from_size(100.0, 100.0);
        let edge = Rect::new(90.0, 0.0, 20.0, 20.0);
        assert!(!FaceFilter::Contain.accepts(&preview, &edge));
        assert!(FaceFilter::Intersect.accepts(&preview, &edge));
    }

    #[test]
    fn parse_filter() {
        assert_eq!("contain".parse::<FaceFilter>().unwrap(), FaceFilter::Contain);
        assert_eq!(
            "INTERSECT".parse::<FaceFilter>().unwrap(),
            FaceFilter::Intersect
        );
        assert!("overlap".parse::<FaceFilter>().is_err());
    }

    #[test]
    fn default_filter_is_contain() {
        assert_eq!(FaceFilter::default(), FaceFilter::Contain);
    }
}
