//! Selection and composition of a detection result for display.

use crate::knowledge::{ItemRecord, item_details, normalize_label};
use crate::model::{DetectedObject, DetectionReport, RecyclingCenter};

/// Cap on how many matching centers a composed result shows.
pub const MAX_RESULT_CENTERS: usize = 3;

/// Pick the detection with the highest confidence.
///
/// Ties keep the earlier element: a later detection only wins when its
/// confidence is strictly greater. Returns `None` for an empty list, which
/// callers treat as the "nothing detected" state rather than an error.
#[must_use]
pub fn best_detection(objects: &[DetectedObject]) -> Option<&DetectedObject> {
    objects.iter().reduce(|best, candidate| {
        if candidate.confidence > best.confidence {
            candidate
        } else {
            best
        }
    })
}

/// Centers that accept the item, in the input order, capped at
/// [`MAX_RESULT_CENTERS`].
#[must_use]
pub fn nearby_centers(record: &ItemRecord, centers: &[RecyclingCenter]) -> Vec<RecyclingCenter> {
    centers
        .iter()
        .filter(|center| record.centers.contains(&center.id))
        .take(MAX_RESULT_CENTERS)
        .cloned()
        .collect()
}

#[derive(Debug, Clone)]
/// Display-ready composition of one analysis: the winning detection, its
/// guidance record, and the centers that accept the item.
pub struct AnalysisView {
    /// The detection the guidance is based on.
    pub detected: DetectedObject,
    /// Static guidance for the normalized item.
    pub item: &'static ItemRecord,
    /// Up to three centers accepting the item.
    pub centers: Vec<RecyclingCenter>,
}

impl AnalysisView {
    /// Compose the view from a detection report and the full center list.
    ///
    /// Runs the whole chain: best detection, label normalization, knowledge
    /// lookup, center join. Returns `None` when the report holds no objects.
    #[must_use]
    pub fn from_report(report: &DetectionReport, centers: &[RecyclingCenter]) -> Option<Self> {
        let detected = best_detection(&report.objects)?.clone();
        let key = normalize_label(&detected.name);
        tracing::debug!(
            label = %detected.name,
            confidence = detected.confidence,
            key = %key,
            "composing analysis view"
        );

        let item = item_details(key);
        let centers = nearby_centers(item, centers);

        Some(Self {
            detected,
            item,
            centers,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::ItemKey;
    use crate::model::{CenterId, CenterKind};

    fn object(name: &str, confidence: f64) -> DetectedObject {
        DetectedObject {
            name: name.to_owned(),
            confidence,
        }
    }

    fn center(id: u32) -> RecyclingCenter {
        RecyclingCenter {
            id: CenterId(id),
            name: format!("Center {id}"),
            kind: CenterKind::Recycling,
            address: String::from("somewhere"),
            phone: None,
            hours: None,
            services: vec![String::from("Plastic")],
            rating: None,
            lat: 13.0,
            lng: 76.1,
            website: None,
        }
    }

    fn report(objects: Vec<DetectedObject>) -> DetectionReport {
        DetectionReport {
            objects,
            recommendations: Vec::new(),
            eco_points: 0,
            objects_found: 0,
            carbon_saved_kg: 0.0,
            user_stats: None,
        }
    }

    #[test]
    fn best_detection_picks_the_highest_confidence() {
        let objects = vec![object("cup", 0.4), object("bottle", 0.9), object("tv", 0.2)];
        let best = best_detection(&objects);
        assert_eq!(
            best.map(|winner| winner.name.as_str()),
            Some("bottle"),
            "0.9 beats 0.4 and 0.2"
        );
    }

    #[test]
    fn best_detection_keeps_the_first_on_exact_ties() {
        let objects = vec![object("first", 0.5), object("second", 0.5)];
        let best = best_detection(&objects);
        assert_eq!(
            best.map(|winner| winner.name.as_str()),
            Some("first"),
            "ties resolve to the earlier detection"
        );
    }

    #[test]
    fn best_detection_of_nothing_is_none() {
        assert!(best_detection(&[]).is_none(), "empty list has no best");
    }

    #[test]
    fn nearby_centers_filters_caps_and_keeps_order() {
        let record = item_details(ItemKey::Bottle);
        let all = vec![
            center(5),
            center(3),
            center(1),
            center(2),
            center(7),
        ];

        let nearby = nearby_centers(record, &all);
        let ids: Vec<u32> = nearby.iter().map(|entry| entry.id.0).collect();

        assert_eq!(ids, vec![5, 1, 2], "input order kept, non-matching dropped");
        assert!(
            nearby.len() <= MAX_RESULT_CENTERS,
            "never more than the cap"
        );
    }

    #[test]
    fn composing_an_empty_report_yields_none() {
        let view = AnalysisView::from_report(&report(Vec::new()), &[]);
        assert!(view.is_none(), "no objects means no view");
    }

    #[test]
    fn composing_joins_guidance_and_centers() {
        let detections = vec![object("cup", 0.3), object("Bottle", 0.95)];
        let all = vec![center(1), center(4), center(2)];

        let view = AnalysisView::from_report(&report(detections), &all)
            .expect("a non-empty report composes");

        assert_eq!(view.item.name, "Plastic Bottle", "bottle guidance chosen");
        let ids: Vec<u32> = view.centers.iter().map(|entry| entry.id.0).collect();
        assert_eq!(ids, vec![1, 2], "only accepting centers joined");
    }
}
