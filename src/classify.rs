use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;

const BAR_TYPES: &[&str] = &["bar", "bar_and_grill", "pub", "wine_bar", "night_club"];

const CAFE_TYPES: &[&str] = &["cafe", "coffee_shop"];

const RESTAURANT_TYPES: &[&str] = &[
    "restaurant",
    "fast_food_restaurant",
    "fine_dining_restaurant",
    "hamburger_restaurant",
    "pizza_restaurant",
    "seafood_restaurant",
    "steak_house",
    "sushi_restaurant",
    "chinese_restaurant",
    "french_restaurant",
    "greek_restaurant",
    "indian_restaurant",
    "italian_restaurant",
    "japanese_restaurant",
    "mexican_restaurant",
    "thai_restaurant",
    "vietnamese_restaurant",
    "korean_restaurant",
    "ramen_restaurant",
    "barbecue_restaurant",
    "brazilian_restaurant",
    "mediterranean_restaurant",
    "middle_eastern_restaurant",
    "spanish_restaurant",
    "turkish_restaurant",
    "lebanese_restaurant",
    "indonesian_restaurant",
    "american_restaurant",
    "asian_restaurant",
    "vegan_restaurant",
    "vegetarian_restaurant",
    "deli",
    "diner",
    "breakfast_restaurant",
    "brunch_restaurant",
];

const HOTEL_TYPES: &[&str] = &[
    "hotel",
    "bed_and_breakfast",
    "hostel",
    "inn",
    "motel",
    "resort_hotel",
    "lodging",
];

/// Coarse bucket the UI sections places by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Bar,
    Cafe,
    Restaurant,
    Hotel,
    #[default]
    Other,
}

/// Known categories in tie-break order.
const TIERS: [(Category, &[&str]); 4] = [
    (Category::Bar, BAR_TYPES),
    (Category::Cafe, CAFE_TYPES),
    (Category::Restaurant, RESTAURANT_TYPES),
    (Category::Hotel, HOTEL_TYPES),
];

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Cafe => "cafe",
            Self::Restaurant => "restaurant",
            Self::Hotel => "hotel",
            Self::Other => "other",
        }
    }

    fn of_tag(tag: &str) -> Option<Self> {
        TIERS
            .iter()
            .find(|(_, tags)| tags.contains(&tag))
            .map(|(category, _)| *category)
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bar" => Ok(Self::Bar),
            "cafe" => Ok(Self::Cafe),
            "restaurant" => Ok(Self::Restaurant),
            "hotel" => Ok(Self::Hotel),
            "other" => Ok(Self::Other),
            _ => Err(format!("unknown category: {s}")),
        }
    }
}

/// Assign a place to a category.
///
/// A recognised `primary_type` decides on its own. Otherwise the secondary
/// `types` are searched one tier at a time (bar, cafe, restaurant, hotel), so
/// a bar tag anywhere in the list beats a restaurant tag listed before it.
pub fn classify_place(primary_type: Option<&str>, types: &[String]) -> Category {
    if let Some(category) = primary_type.and_then(Category::of_tag) {
        return category;
    }

    TIERS
        .iter()
        .find(|(_, tags)| types.iter().any(|t| tags.contains(&t.as_str())))
        .map_or(Category::Other, |(category, _)| *category)
}
