//! Vegetarian/vegan friendliness scoring from name and category signals.
//!
//! A pure function of its inputs: keyword hits in the lower-cased name and
//! membership checks over the category list, each contributing a fixed
//! weight, summed and clamped to 0–100. The weights and tables are
//! hand-tuned against real listings; change them deliberately, together
//! with the label thresholds.

use serde::Serialize;

/// Direct vegetarian/vegan terms in the name.
const PRIMARY_KEYWORDS: &[&str] = &[
    "vegan",
    "vegetarian",
    "plant-based",
    "plant based",
    "veggie",
    "vegetable",
];

/// Health/plant-adjacent terms in the name.
const SECONDARY_KEYWORDS: &[&str] = &[
    "organic",
    "natural",
    "healthy",
    "fresh",
    "green",
    "earth",
    "sprout",
    "leaf",
    "harvest",
    "garden",
    "superfood",
    "juice",
    "smoothie",
    "salad",
    "quinoa",
    "kale",
    "avocado",
    "buddha bowl",
    "bowl",
];

/// Meat-focused terms in the name.
const NEGATIVE_KEYWORDS: &[&str] = &[
    "bbq",
    "barbecue",
    "steakhouse",
    "burger",
    "fried chicken",
    "wings",
    "seafood",
    "sushi",
    "meat",
    "grill",
    "butcher",
    "smokehouse",
    "ribs",
    "brisket",
    "steak",
    "beef",
    "pork",
    "bacon",
];

/// Categories that signal a veg-friendly business.
const VEG_FRIENDLY_CATEGORIES: &[&str] = &[
    "meal_delivery",
    "meal_takeaway",
    "cafe",
    "health_food_store",
    "organic_store",
    "juice_bar",
    "salad_bar",
    "vegetarian_restaurant",
    "vegan_restaurant",
    "health_food_restaurant",
];

/// Categories that signal a meat-focused business.
const MEAT_FOCUSED_CATEGORIES: &[&str] = &[
    "barbecue_restaurant",
    "steakhouse",
    "seafood_restaurant",
    "butcher_shop",
];

/// Categories that earn the flat base score for being an eatery at all.
const BASE_CATEGORIES: &[&str] = &["restaurant", "meal_delivery", "cafe"];

const PRIMARY_KEYWORD_WEIGHT: i32 = 40;
const SECONDARY_KEYWORD_WEIGHT: i32 = 10;
const NEGATIVE_KEYWORD_PENALTY: i32 = 20;
const VEG_CATEGORY_WEIGHT: i32 = 30;
const MEAT_CATEGORY_PENALTY: i32 = 25;
const BASE_RESTAURANT_SCORE: i32 = 20;

/// Scorer output: the clamped score, its display label, and one reasoning
/// line per rule group that fired, in rule-evaluation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FriendlinessScore {
    pub score: u8,
    pub label: &'static str,
    pub reasons: Vec<String>,
}

/// Scores a place for vegetarian/vegan friendliness.
///
/// Deterministic and pure: the same name/categories always produce the same
/// score, label and reasoning. An absent name is scored as the empty string
/// (category signals still apply); an absent category list as the empty set.
#[must_use]
pub fn score(name: &str, categories: &[String]) -> FriendlinessScore {
    let name_lower = name.to_lowercase();
    let mut total = 0i32;
    let mut reasons = Vec::new();

    let found = matched_keywords(&name_lower, PRIMARY_KEYWORDS);
    if !found.is_empty() {
        total += count(&found) * PRIMARY_KEYWORD_WEIGHT;
        reasons.push(format!("PRIMARY veg keywords: {}", found.join(", ")));
    }

    let found = matched_keywords(&name_lower, SECONDARY_KEYWORDS);
    if !found.is_empty() {
        total += count(&found) * SECONDARY_KEYWORD_WEIGHT;
        reasons.push(format!("Health/veg-friendly keywords: {}", found.join(", ")));
    }

    let found = matched_keywords(&name_lower, NEGATIVE_KEYWORDS);
    if !found.is_empty() {
        total -= count(&found) * NEGATIVE_KEYWORD_PENALTY;
        reasons.push(format!("Meat-focused keywords: {}", found.join(", ")));
    }

    let found = matched_categories(categories, VEG_FRIENDLY_CATEGORIES);
    if !found.is_empty() {
        total += count(&found) * VEG_CATEGORY_WEIGHT;
        reasons.push(format!("Veg-friendly business type: {}", found.join(", ")));
    }

    let found = matched_categories(categories, MEAT_FOCUSED_CATEGORIES);
    if !found.is_empty() {
        total -= count(&found) * MEAT_CATEGORY_PENALTY;
        reasons.push(format!("Meat-focused business type: {}", found.join(", ")));
    }

    if categories
        .iter()
        .any(|c| BASE_CATEGORIES.contains(&c.as_str()))
    {
        total += BASE_RESTAURANT_SCORE;
        reasons.push("Base restaurant score".to_string());
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let clamped = total.clamp(0, 100) as u8;

    FriendlinessScore {
        score: clamped,
        label: label_for(clamped),
        reasons,
    }
}

/// Maps a clamped score to its display label; thresholds are evaluated in
/// descending order, first match wins.
#[must_use]
pub fn label_for(score: u8) -> &'static str {
    if score >= 60 {
        "Vegan/Veg Friendly"
    } else if score >= 40 {
        "Veg Options Available"
    } else if score >= 20 {
        "Limited Veg Options"
    } else {
        "Minimal Veg Options"
    }
}

fn matched_keywords<'a>(name_lower: &str, keywords: &[&'a str]) -> Vec<&'a str> {
    keywords
        .iter()
        .copied()
        .filter(|k| name_lower.contains(k))
        .collect()
}

fn matched_categories<'a>(categories: &'a [String], table: &[&str]) -> Vec<&'a str> {
    categories
        .iter()
        .map(String::as_str)
        .filter(|c| table.contains(c))
        .collect()
}

#[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
fn count(matches: &[&str]) -> i32 {
    matches.len() as i32
}
