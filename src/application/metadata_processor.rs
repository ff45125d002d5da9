//! Face metadata filtering and coordinate mapping

use crate::domain::{DetectedFace, FaceFilter, MetadataObject, PreviewTarget, Rect};

/// Turns raw per-frame metadata into preview-space face rectangles.
#[derive(Debug, Clone, Copy, Default)]
pub struct MetadataProcessor {
    filter: FaceFilter,
}

impl MetadataProcessor {
    pub fn new(filter: FaceFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> FaceFilter {
        self.filter
    }

    /// Process one batch.
    ///
    /// Non-face records are dropped, the rest are mapped through `transform`,
    /// empty results are dropped, and the survivors must pass the face filter
    /// against the preview bounds. Input order is preserved.
    pub fn process<T>(
        &self,
        batch: &[MetadataObject],
        preview: &PreviewTarget,
        transform: T,
    ) -> Vec<DetectedFace>
    where
        T: Fn(Rect) -> Rect,
    {
        batch
            .iter()
            .filter(|object| object.is_face())
            .map(|object| transform(object.bounds))
            .filter(|bounds| !bounds.is_empty())
            .filter(|bounds| self.filter.accepts(&preview.bounds, bounds))
            .map(DetectedFace::new)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MetadataKind;

    fn preview() -> PreviewTarget {
        PreviewTarget::new(1, 100.0, 100.0).with_mirrored(false)
    }

    fn scale(raw: Rect) -> Rect {
        if raw.is_empty() {
            return Rect::ZERO;
        }
        raw.denormalize(&Rect::from_size(100.0, 100.0))
    }

    #[test]
    fn keeps_only_valid_faces() {
        let batch = vec![
            MetadataObject::new(MetadataKind::Barcode, Rect::new(0.1, 0.1, 0.2, 0.2)),
            MetadataObject::face(Rect::ZERO),
            MetadataObject::face(Rect::new(0.2, 0.2, 0.3, 0.3)),
        ];

        let faces = MetadataProcessor::default().process(&batch, &preview(), scale);

        assert_eq!(faces.len(), 1);
        assert_eq!(faces[0].bounds, Rect::new(20.0, 20.0, 30.0, 30.0));
    }

    #[test]
    fn contain_policy_drops_edge_faces() {
        let batch = vec![MetadataObject::face(Rect::new(0.9, 0.1, 0.2, 0.2))];
        let faces = MetadataProcessor::new(FaceFilter::Contain).process(&batch, &preview(), scale);
        assert!(faces.is_empty());
    }

    #[test]
    fn intersect_policy_keeps_edge_faces() {
        let batch = vec![MetadataObject::face(Rect::new(0.9, 0.1, 0.2, 0.2))];
        let faces =
            MetadataProcessor::new(FaceFilter::Intersect).process(&batch, &preview(), scale);
        assert_eq!(faces.len(), 1);
    }

    #[test]
    fn preserves_input_order() {
        let batch = vec![
            MetadataObject::face(Rect::new(0.6, 0.6, 0.1, 0.1)),
            MetadataObject::face(Rect::new(0.1, 0.1, 0.1, 0.1)),
        ];
        let faces = MetadataProcessor::default().process(&batch, &preview(), scale);
        assert_eq!(faces.len(), 2);
        assert!(faces[0].bounds.x > faces[1].bounds.x);
    }

    #[test]
    fn transform_returning_zero_discards_face() {
        let batch = vec![MetadataObject::face(Rect::new(0.1, 0.1, 0.2, 0.2))];
        let faces = MetadataProcessor::default().process(&batch, &preview(), |_| Rect::ZERO);
        assert!(faces.is_empty());
    }

    #[test]
    fn empty_batch_yields_nothing() {
        let faces = MetadataProcessor::default().process(&[], &preview(), scale);
        assert!(faces.is_empty());
    }
}
