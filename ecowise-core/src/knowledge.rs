//! Static recycling knowledge: the label dictionary and per-item guidance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::CenterId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
/// Canonical keys for the item categories the app has guidance for.
pub enum ItemKey {
    /// Plastic bottles.
    Bottle,
    /// Books and printed media.
    Book,
    /// Mobile phones.
    Phone,
    /// Glass bottles and jars.
    Glass,
    /// Cups and mugs.
    Cup,
    /// Laptops.
    Laptop,
    /// Keyboards.
    Keyboard,
    /// Computer mice.
    Mouse,
    /// Televisions.
    Tv,
    /// Chairs.
    Chair,
    /// Couches and sofas.
    Couch,
    /// Other large furniture.
    Furniture,
    /// Microwaves and comparable kitchen appliances.
    Microwave,
    /// Small electronics without a more specific key.
    Electronics,
    /// Catch-all for anything without dedicated guidance.
    Item,
}

impl ItemKey {
    /// Every key, catch-all last.
    pub const ALL: [Self; 15] = [
        ItemKey::Bottle,
        ItemKey::Book,
        ItemKey::Phone,
        ItemKey::Glass,
        ItemKey::Cup,
        ItemKey::Laptop,
        ItemKey::Keyboard,
        ItemKey::Mouse,
        ItemKey::Tv,
        ItemKey::Chair,
        ItemKey::Couch,
        ItemKey::Furniture,
        ItemKey::Microwave,
        ItemKey::Electronics,
        ItemKey::Item,
    ];
}

impl fmt::Display for ItemKey {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let slug = match self {
            ItemKey::Bottle => "bottle",
            ItemKey::Book => "book",
            ItemKey::Phone => "phone",
            ItemKey::Glass => "glass",
            ItemKey::Cup => "cup",
            ItemKey::Laptop => "laptop",
            ItemKey::Keyboard => "keyboard",
            ItemKey::Mouse => "mouse",
            ItemKey::Tv => "tv",
            ItemKey::Chair => "chair",
            ItemKey::Couch => "couch",
            ItemKey::Furniture => "furniture",
            ItemKey::Microwave => "microwave",
            ItemKey::Electronics => "electronics",
            ItemKey::Item => "item",
        };
        write!(formatter, "{slug}")
    }
}

/// Map a raw detector label to its canonical key.
///
/// Matching is case-insensitive and exact, no partial matching. Anything the
/// dictionary does not list becomes [`ItemKey::Item`], so the result always
/// has a knowledge-base record.
#[must_use]
pub fn normalize_label(raw: &str) -> ItemKey {
    match raw.to_lowercase().as_str() {
        "bottle" => ItemKey::Bottle,
        "book" => ItemKey::Book,
        "cell phone" => ItemKey::Phone,
        "wine glass" => ItemKey::Glass,
        "cup" => ItemKey::Cup,
        "laptop" => ItemKey::Laptop,
        "keyboard" => ItemKey::Keyboard,
        "mouse" => ItemKey::Mouse,
        "tv" => ItemKey::Tv,
        "chair" => ItemKey::Chair,
        "couch" => ItemKey::Couch,
        "dining table" | "teddy bear" | "bed" => ItemKey::Furniture,
        "microwave" | "oven" | "toaster" | "refrigerator" => ItemKey::Microwave,
        "hair drier" | "remote" => ItemKey::Electronics,
        // Everything else falls through to the catch-all, including detector
        // labels like "toothbrush", "suitcase" or "sports ball" that only
        // ever had the generic guidance.
        _ => ItemKey::Item,
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Static recycling guidance for one canonical item key.
pub struct ItemRecord {
    /// Display name.
    pub name: &'static str,
    /// Material or handling category.
    pub category: &'static str,
    /// Icon shown next to the name.
    pub icon: &'static str,
    /// Eco-points awarded.
    pub points: u32,
    /// Estimated carbon saved in kilograms.
    pub carbon_saved_kg: f64,
    /// Detection processing-time label.
    pub processing_time: &'static str,
    /// Recommended action verb.
    pub action: &'static str,
    /// One-line elaboration of the action.
    pub action_description: &'static str,
    /// Longer description of the item and how it is handled.
    pub description: &'static str,
    /// Practical preparation tips.
    pub tips: &'static [&'static str],
    /// Centers that accept this item.
    pub centers: &'static [CenterId],
}

static BOTTLE: ItemRecord = ItemRecord {
    name: "Plastic Bottle",
    category: "Recyclable Plastic",
    icon: "🥤",
    points: 10,
    carbon_saved_kg: 0.5,
    processing_time: "2.1s",
    action: "Recycle",
    action_description: "Place in plastic recycling bin",
    description: "Plastic bottles are widely recyclable and can be turned into new bottles, clothing, or other plastic products.",
    tips: &[
        "Rinse the bottle before recycling",
        "Remove the cap (recycle separately)",
        "Flatten to save space in recycling bin",
    ],
    centers: &[CenterId(1), CenterId(2), CenterId(5)],
};

static BOOK: ItemRecord = ItemRecord {
    name: "Books",
    category: "Donation/Reuse",
    icon: "📚",
    points: 15,
    carbon_saved_kg: 0.8,
    processing_time: "1.8s",
    action: "Donate",
    action_description: "Give to libraries or community centers",
    description: "Books can be donated to libraries, schools, or community centers for reuse and education.",
    tips: &[
        "Check if books are in good condition",
        "Consider local libraries or schools",
        "Remove any personal information",
    ],
    centers: &[CenterId(8)],
};

static PHONE: ItemRecord = ItemRecord {
    name: "Mobile Phone",
    category: "E-Waste",
    icon: "📱",
    points: 25,
    carbon_saved_kg: 2.0,
    processing_time: "2.5s",
    action: "Resell/Recycle",
    action_description: "Sell online or recycle properly",
    description: "Mobile phones contain valuable metals and should be properly recycled or resold.",
    tips: &[
        "Backup and wipe all personal data",
        "Remove SIM card and memory card",
        "Consider reselling if functional",
    ],
    centers: &[CenterId(3)],
};

static GLASS: ItemRecord = ItemRecord {
    name: "Glass Bottle",
    category: "Recyclable Glass",
    icon: "🍶",
    points: 12,
    carbon_saved_kg: 0.4,
    processing_time: "2.0s",
    action: "Recycle",
    action_description: "Place in glass recycling bin",
    description: "Glass is 100% recyclable and can be reused endlessly without loss of quality.",
    tips: &[
        "Rinse thoroughly before recycling",
        "Remove metal caps and lids",
        "Don't mix with other materials",
    ],
    centers: &[CenterId(1), CenterId(5)],
};

static CUP: ItemRecord = ItemRecord {
    name: "Cup/Mug",
    category: "Ceramic/Plastic",
    icon: "☕",
    points: 5,
    carbon_saved_kg: 0.3,
    processing_time: "1.2s",
    action: "Donate/Trash",
    action_description: "Donate if good, trash if broken",
    description: "Ceramic mugs are not recyclable in curbside bins. Plastic cups may be recyclable.",
    tips: &[
        "Donate usable mugs",
        "Wrap broken pieces safely",
        "Check plastic number",
    ],
    centers: &[CenterId(7), CenterId(1)],
};

static LAPTOP: ItemRecord = ItemRecord {
    name: "Laptop",
    category: "E-Waste",
    icon: "💻",
    points: 50,
    carbon_saved_kg: 15.0,
    processing_time: "4.5s",
    action: "Resell/Recycle",
    action_description: "Resell if working, otherwise recycle",
    description: "Laptops contain valuable metals and hazardous materials. Never dispose in trash.",
    tips: &["Wipe all data", "Remove battery", "Check trade-in value"],
    centers: &[CenterId(3), CenterId(10)],
};

static KEYBOARD: ItemRecord = ItemRecord {
    name: "Keyboard",
    category: "E-Waste",
    icon: "⌨️",
    points: 20,
    carbon_saved_kg: 1.2,
    processing_time: "2.0s",
    action: "E-Waste Recycling",
    action_description: "Take to e-waste recycling center",
    description: "Keyboards contain electronic components and plastics that should be recycled properly.",
    tips: &[
        "Remove batteries if wireless",
        "Clean before recycling",
        "Check for manufacturer take-back",
    ],
    centers: &[CenterId(3), CenterId(10)],
};

static MOUSE: ItemRecord = ItemRecord {
    name: "Computer Mouse",
    category: "E-Waste",
    icon: "🖱️",
    points: 15,
    carbon_saved_kg: 0.8,
    processing_time: "1.5s",
    action: "E-Waste Recycling",
    action_description: "Take to e-waste recycling center",
    description: "Computer mice contain electronic components and should not be thrown in regular trash.",
    tips: &[
        "Remove batteries if wireless",
        "Wipe clean",
        "Bundle cable if wired",
    ],
    centers: &[CenterId(3), CenterId(10)],
};

static TV: ItemRecord = ItemRecord {
    name: "Television",
    category: "E-Waste",
    icon: "📺",
    points: 45,
    carbon_saved_kg: 12.0,
    processing_time: "5.0s",
    action: "E-Waste Recycling",
    action_description: "Schedule pickup or take to center",
    description: "TVs contain heavy metals and glass that require special recycling processes.",
    tips: &["Do not break screen", "Get help lifting", "Keep cords attached"],
    centers: &[CenterId(3), CenterId(10)],
};

static CHAIR: ItemRecord = ItemRecord {
    name: "Chair",
    category: "Furniture",
    icon: "🪑",
    points: 30,
    carbon_saved_kg: 5.0,
    processing_time: "3.5s",
    action: "Donate/Bulk Pickup",
    action_description: "Donate if usable, otherwise bulk pickup",
    description: "Chairs can often be reused. Broken ones may need dismantling for recycling.",
    tips: &["Clean before donating", "Tighten screws", "Check for bed bugs"],
    centers: &[CenterId(7), CenterId(9)],
};

static COUCH: ItemRecord = ItemRecord {
    name: "Couch/Sofa",
    category: "Furniture",
    icon: "🛋️",
    points: 50,
    carbon_saved_kg: 20.0,
    processing_time: "5.0s",
    action: "Donate/Bulk Pickup",
    action_description: "Donate if usable, otherwise bulk pickup",
    description: "Couches are large items that require special handling. Donation is best for good condition items.",
    tips: &[
        "Vacuum before donating",
        "Schedule pickup in advance",
        "Cover during transport",
    ],
    centers: &[CenterId(7), CenterId(9)],
};

static FURNITURE: ItemRecord = ItemRecord {
    name: "Furniture",
    category: "Bulky Items",
    icon: "🛋️",
    points: 40,
    carbon_saved_kg: 5.0,
    processing_time: "4.0s",
    action: "Donate/Recycle",
    action_description: "Donate if usable, otherwise schedule bulk pickup",
    description: "Furniture in good condition can be donated, while broken items may be recycled or require special disposal.",
    tips: &[
        "Check with local charities for pickup",
        "Disassemble large items if possible",
        "Schedule municipal bulk pickup",
    ],
    centers: &[CenterId(7), CenterId(9)],
};

static MICROWAVE: ItemRecord = ItemRecord {
    name: "Microwave",
    category: "Appliance",
    icon: "♨️",
    points: 35,
    carbon_saved_kg: 8.0,
    processing_time: "3.0s",
    action: "E-Waste/Scrap",
    action_description: "Take to appliance recycler",
    description: "Microwaves contain electronic components and scrap metal.",
    tips: &["Clean inside", "Remove glass plate", "Tape door shut"],
    centers: &[CenterId(3), CenterId(6)],
};

static ELECTRONICS: ItemRecord = ItemRecord {
    name: "Small Electronics",
    category: "E-Waste",
    icon: "💻",
    points: 35,
    carbon_saved_kg: 4.2,
    processing_time: "3.5s",
    action: "E-Waste Recycling",
    action_description: "Take to e-waste recycling center",
    description: "Electronics contain valuable metals and hazardous materials that need proper disposal.",
    tips: &[
        "Backup and wipe all data",
        "Remove batteries if possible",
        "Check for manufacturer take-back programs",
    ],
    centers: &[CenterId(3), CenterId(10)],
};

static ITEM: ItemRecord = ItemRecord {
    name: "General Item",
    category: "Check Guidelines",
    icon: "📦",
    points: 5,
    carbon_saved_kg: 0.2,
    processing_time: "1.5s",
    action: "Check Guidelines",
    action_description: "Consult local recycling rules",
    description: "This item requires specific disposal guidelines. Check with local authorities for proper disposal methods.",
    tips: &[
        "Check local waste management guidelines",
        "Contact your municipal recycling center",
        "Consider if item can be donated or reused",
    ],
    centers: &[CenterId(1)],
};

/// Guidance record for the given key.
///
/// The key enum is closed, so the lookup is total; there is no fallback path
/// left to take.
#[must_use]
pub fn item_details(key: ItemKey) -> &'static ItemRecord {
    match key {
        ItemKey::Bottle => &BOTTLE,
        ItemKey::Book => &BOOK,
        ItemKey::Phone => &PHONE,
        ItemKey::Glass => &GLASS,
        ItemKey::Cup => &CUP,
        ItemKey::Laptop => &LAPTOP,
        ItemKey::Keyboard => &KEYBOARD,
        ItemKey::Mouse => &MOUSE,
        ItemKey::Tv => &TV,
        ItemKey::Chair => &CHAIR,
        ItemKey::Couch => &COUCH,
        ItemKey::Furniture => &FURNITURE,
        ItemKey::Microwave => &MICROWAVE,
        ItemKey::Electronics => &ELECTRONICS,
        ItemKey::Item => &ITEM,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_normalize_case_insensitively() {
        assert_eq!(
            normalize_label("Cell Phone"),
            ItemKey::Phone,
            "detector casing must not matter"
        );
        assert_eq!(normalize_label("WINE GLASS"), ItemKey::Glass, "wine glass");
        assert_eq!(normalize_label("bottle"), ItemKey::Bottle, "bottle");
        assert_eq!(normalize_label("bed"), ItemKey::Furniture, "bed");
        assert_eq!(normalize_label("oven"), ItemKey::Microwave, "oven");
        assert_eq!(normalize_label("remote"), ItemKey::Electronics, "remote");
    }

    #[test]
    fn unknown_labels_fall_back_to_the_generic_item() {
        assert_eq!(normalize_label("zebra"), ItemKey::Item, "unmapped label");
        assert_eq!(normalize_label(""), ItemKey::Item, "empty label");
        assert_eq!(
            normalize_label("potted plant"),
            ItemKey::Item,
            "labels without dedicated guidance get the generic record"
        );
    }

    #[test]
    fn bottle_guidance_matches_the_knowledge_base() {
        let record = item_details(ItemKey::Bottle);
        assert_eq!(record.points, 10, "bottle awards 10 points");
        assert_eq!(
            record.centers,
            &[CenterId(1), CenterId(2), CenterId(5)],
            "bottle is accepted by centers 1, 2 and 5"
        );
    }

    #[test]
    fn every_key_resolves_to_its_own_record() {
        let mut names: Vec<&str> = ItemKey::ALL
            .iter()
            .map(|key| item_details(*key).name)
            .collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(
            names.len(),
            ItemKey::ALL.len(),
            "no two keys may share a record"
        );
    }

    #[test]
    fn every_record_names_at_least_one_center() {
        for key in ItemKey::ALL {
            assert!(
                !item_details(key).centers.is_empty(),
                "{key} lists no centers"
            );
        }
    }
}
