//! Built-in fallback provider used when the EcoWise backend is unreachable.
//!
//! Detection degrades to filename-keyword heuristics and the center list to
//! a small built-in set, so the app keeps answering without a network.

use std::sync::Arc;

use async_trait::async_trait;

use ecowise_core::{
    model::{
        CenterId, CenterKind, DetectedObject, DetectionReport, ImageUpload, ProviderId,
        ProviderMeta, RecyclingCenter,
    },
    ports::{CentersPort, DetectionPort, PortError},
    provider::Fallback,
};

// Carbon estimate per eco-point, matching the backend's scoring.
const CARBON_PER_POINT_KG: f64 = 0.3;

#[derive(Debug, Clone, Copy)]
enum Advice {
    Recycle,
    Donate,
    Resell,
    CheckGuidelines,
}

impl Advice {
    fn line(self, label: &str) -> String {
        match self {
            Advice::Recycle => format!("♻️ Recycle the {label} at nearest center"),
            Advice::Donate => format!("🤝 Donate the {label} to local NGO"),
            Advice::Resell => format!("💰 Resell the {label} online"),
            Advice::CheckGuidelines => format!("ℹ️ Check disposal for {label}"),
        }
    }
}

/// One filename heuristic: any keyword hit yields the detection.
struct KeywordRule {
    keywords: &'static [&'static str],
    label: &'static str,
    confidence: f64,
    advice: Advice,
    points: u32,
}

// Camera captures are named capture_<timestamp>.jpg, so "capture" counts as
// a bottle sighting just like the backend heuristics do.
const RULES: [KeywordRule; 6] = [
    KeywordRule {
        keywords: &["bottle", "plastic", "capture"],
        label: "bottle",
        confidence: 0.9,
        advice: Advice::Recycle,
        points: 10,
    },
    KeywordRule {
        keywords: &["phone", "mobile"],
        label: "phone",
        confidence: 0.9,
        advice: Advice::Resell,
        points: 20,
    },
    KeywordRule {
        keywords: &["book"],
        label: "book",
        confidence: 0.9,
        advice: Advice::Donate,
        points: 15,
    },
    KeywordRule {
        keywords: &["shirt", "clothing", "jeans"],
        label: "clothing",
        confidence: 0.9,
        advice: Advice::Donate,
        points: 12,
    },
    KeywordRule {
        keywords: &["can"],
        label: "can",
        confidence: 0.9,
        advice: Advice::Recycle,
        points: 10,
    },
    KeywordRule {
        keywords: &["glass"],
        label: "glass",
        confidence: 0.9,
        advice: Advice::Recycle,
        points: 12,
    },
];

const DEFAULT_RULE: KeywordRule = KeywordRule {
    keywords: &[],
    label: "item",
    confidence: 0.5,
    advice: Advice::CheckGuidelines,
    points: 5,
};

/// Detection stand-in scoring uploads from their filename alone.
pub struct OfflineAnalyzer;

#[async_trait]
impl DetectionPort for OfflineAnalyzer {
    async fn detect(
        &self,
        upload: &ImageUpload,
        _username: &str,
    ) -> Result<DetectionReport, PortError> {
        let lowered = upload.filename.to_lowercase();

        let mut matched: Vec<&KeywordRule> = RULES
            .iter()
            .filter(|rule| rule.keywords.iter().any(|keyword| lowered.contains(keyword)))
            .collect();
        if matched.is_empty() {
            matched.push(&DEFAULT_RULE);
        }

        tracing::debug!(
            filename = %upload.filename,
            matches = matched.len(),
            "offline analysis from filename keywords"
        );

        let objects: Vec<DetectedObject> = matched
            .iter()
            .map(|rule| DetectedObject {
                name: rule.label.to_owned(),
                confidence: rule.confidence,
            })
            .collect();

        let mut recommendations: Vec<String> = matched
            .iter()
            .map(|rule| rule.advice.line(rule.label))
            .collect();
        recommendations.push(String::from("📍 Find nearby centers on the map"));

        let eco_points: u32 = matched.iter().map(|rule| rule.points).sum();
        let objects_found = u32::try_from(matched.len()).unwrap_or(u32::MAX);

        Ok(DetectionReport {
            objects,
            recommendations,
            eco_points,
            objects_found,
            carbon_saved_kg: f64::from(eco_points) * CARBON_PER_POINT_KG,
            user_stats: None,
        })
    }
}

/// Built-in center list standing in for the centers endpoint.
pub struct OfflineCenters;

#[async_trait]
impl CentersPort for OfflineCenters {
    async fn centers(&self) -> Result<Vec<RecyclingCenter>, PortError> {
        Ok(builtin_centers())
    }
}

/// Build the fallback bundle with the offline analyzer and center list.
#[must_use]
pub fn fallback() -> Fallback {
    Fallback {
        meta: ProviderMeta {
            id: ProviderId(String::from("offline")),
            name: String::from("Built-in fallback"),
        },
        detection: Arc::new(OfflineAnalyzer),
        centers: Arc::new(OfflineCenters),
    }
}

fn center(
    id: u32,
    name: &str,
    kind: CenterKind,
    address: &str,
    services: &[&str],
    rating: f64,
    lat: f64,
    lng: f64,
) -> RecyclingCenter {
    RecyclingCenter {
        id: CenterId(id),
        name: name.to_owned(),
        kind,
        address: address.to_owned(),
        phone: None,
        hours: None,
        services: services.iter().map(|&service| service.to_owned()).collect(),
        rating: Some(rating),
        lat,
        lng,
        website: None,
    }
}

fn builtin_centers() -> Vec<RecyclingCenter> {
    let mut municipal = center(
        1,
        "Hassan City Municipal Waste Center",
        CenterKind::Recycling,
        "Near New Bus Stand, B.M. Road, Hassan 573201",
        &["Plastic", "Paper", "Glass", "Metal", "E-waste"],
        4.3,
        13.0072,
        76.1028,
    );
    municipal.phone = Some(String::from("+91 8172 268 500"));
    municipal.hours = Some(String::from("8:00 AM - 6:00 PM (Mon-Sat)"));

    vec![
        municipal,
        center(
            2,
            "Hassan Plastic Recycling Unit",
            CenterKind::Recycling,
            "Industrial Area, Katihalli, Hassan 573201",
            &["Plastic Bottles", "Containers"],
            4.1,
            13.0156,
            76.1187,
        ),
        center(
            3,
            "GreenTech E-Waste Hassan",
            CenterKind::Recycling,
            "Near Railway Station, Hassan 573201",
            &["Mobile Phones", "Laptops", "Batteries"],
            4.6,
            13.0022,
            76.1088,
        ),
        center(
            7,
            "Hassan Clothes Donation Center",
            CenterKind::Donation,
            "Near Malnad College, Hassan 573201",
            &["Clothing", "Shoes", "Blankets"],
            4.7,
            13.0167,
            76.0998,
        ),
        center(
            10,
            "Hassan Medical Waste Facility",
            CenterKind::Special,
            "Near HIMS Hospital, Hassan 573201",
            &["Medical Waste", "Syringes", "Medicines"],
            4.9,
            13.0056,
            76.1034,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn upload(filename: &str) -> ImageUpload {
        ImageUpload::new(filename, vec![0; 8]).expect("valid upload")
    }

    async fn analyze(filename: &str) -> DetectionReport {
        OfflineAnalyzer
            .detect(&upload(filename), "EcoStudent")
            .await
            .expect("offline analysis cannot fail")
    }

    #[tokio::test]
    async fn keywords_in_the_filename_drive_detection() {
        let report = analyze("bottle_photo.jpg").await;
        assert_eq!(
            report.objects.first().map(|object| object.name.as_str()),
            Some("bottle"),
            "bottle keyword hits"
        );
        assert_eq!(report.eco_points, 10, "bottle awards 10 points");
    }

    #[tokio::test]
    async fn camera_captures_count_as_bottles() {
        let report = analyze("camera_capture_1704100000.jpg").await;
        assert_eq!(
            report.objects.first().map(|object| object.name.as_str()),
            Some("bottle"),
            "capture filenames score as bottles"
        );
    }

    #[tokio::test]
    async fn multiple_keywords_stack_points_and_carbon() {
        let report = analyze("bottle_and_book.png").await;
        assert_eq!(report.objects_found, 2, "two rules hit");
        assert_eq!(report.eco_points, 25, "10 + 15 points");
        assert!(
            (report.carbon_saved_kg - 7.5).abs() < 1e-9,
            "carbon is points times 0.3"
        );
        assert_eq!(
            report.recommendations.len(),
            3,
            "one line per object plus the map tip"
        );
    }

    #[tokio::test]
    async fn unmatched_filenames_yield_the_general_item() {
        let report = analyze("mystery.gif").await;
        assert_eq!(
            report.objects.first().map(|object| object.name.as_str()),
            Some("item"),
            "default rule applies"
        );
        let confidence = report
            .objects
            .first()
            .map_or(0.0, |object| object.confidence);
        assert!(
            (confidence - 0.5).abs() < 1e-9,
            "general item is a low-confidence guess"
        );
    }

    #[tokio::test]
    async fn builtin_centers_cover_every_kind() {
        let centers = OfflineCenters.centers().await.expect("static list");
        assert_eq!(centers.len(), 5, "five built-in centers");
        assert!(
            centers
                .iter()
                .any(|entry| entry.kind == CenterKind::Donation),
            "donation center included"
        );
        assert!(
            centers.iter().any(|entry| entry.kind == CenterKind::Special),
            "special-handling center included"
        );
    }
}
