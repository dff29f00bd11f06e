//! Suggested moods and ingredients for clients to offer as choices.
//!
//! These lists are advisory. Stored recipes may use labels that appear in
//! neither, and requests are free to send any text.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MoodInfo {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

pub const MOODS: &[MoodInfo] = &[
    MoodInfo {
        name: "happy",
        emoji: "😊",
        description: "Bright, colourful food to keep the good mood going",
    },
    MoodInfo {
        name: "sad",
        emoji: "😢",
        description: "Warm comfort food that feels like a hug",
    },
    MoodInfo {
        name: "stressed",
        emoji: "😰",
        description: "Simple, soothing dishes with few steps",
    },
    MoodInfo {
        name: "tired",
        emoji: "😴",
        description: "Low-effort meals that still fill you up",
    },
    MoodInfo {
        name: "anxious",
        emoji: "😟",
        description: "Gentle, calming food",
    },
    MoodInfo {
        name: "energetic",
        emoji: "⚡",
        description: "Fresh, light dishes to keep you moving",
    },
    MoodInfo {
        name: "romantic",
        emoji: "❤️",
        description: "Something special to cook for two",
    },
    MoodInfo {
        name: "adventurous",
        emoji: "🌶️",
        description: "Bold flavours worth trying",
    },
    MoodInfo {
        name: "nostalgic",
        emoji: "🏡",
        description: "Classics that taste like childhood",
    },
    MoodInfo {
        name: "lazy",
        emoji: "🛋️",
        description: "One pan, minimal washing up",
    },
];

pub const INGREDIENTS: &[&str] = &[
    "baking powder",
    "banana",
    "basil",
    "beef",
    "bell pepper",
    "berries",
    "broccoli",
    "butter",
    "carrot",
    "celery",
    "cheese",
    "chicken",
    "chicken broth",
    "chili",
    "cinnamon",
    "cocoa",
    "cream",
    "egg",
    "flour",
    "garlic",
    "ginger",
    "green onion",
    "honey",
    "lemon",
    "lime",
    "milk",
    "mushroom",
    "noodles",
    "oats",
    "olive oil",
    "onion",
    "parmesan",
    "pasta",
    "peas",
    "rice",
    "salmon",
    "soy sauce",
    "spinach",
    "sugar",
    "tomato",
    "tortilla",
    "white wine",
    "yogurt",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogs_are_normalized() {
        for mood in MOODS {
            assert_eq!(crate::util::normalize_label(mood.name).as_deref(), Some(mood.name));
        }
        for ingredient in INGREDIENTS {
            assert_eq!(crate::util::normalize_label(ingredient).as_deref(), Some(*ingredient));
        }
    }

    #[test]
    fn test_ingredients_sorted_and_unique() {
        for pair in INGREDIENTS.windows(2) {
            assert!(pair[0] < pair[1], "{} >= {}", pair[0], pair[1]);
        }
    }
}
