//! # Ingredient Profiles
//!
//! Name-keyed lookup table for per-item behaviour: whether an item may only
//! be sold as part of a composite meal, and the preparation line narrated
//! when a bundle containing it is assembled.

/// Behaviour attached to an item name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngredientProfile {
    pub name: &'static str,
    /// Cannot be checked out on its own, only alongside something else.
    pub ingredient_only: bool,
    pub preparation: &'static str,
}

static PROFILES: [IngredientProfile; 9] = [
    IngredientProfile {
        name: "Red Bean",
        ingredient_only: true,
        preparation: "Preparing the tender Red Beans with care...",
    },
    IngredientProfile {
        name: "Ube Ice Cream",
        ingredient_only: false,
        preparation: "Scooping out the velvety Ube Ice Cream...",
    },
    IngredientProfile {
        name: "Leche Flan",
        ingredient_only: false,
        preparation: "Whisking the Leche Flan to a silky perfection...",
    },
    IngredientProfile {
        name: "Banana",
        ingredient_only: false,
        preparation: "Peeling and slicing the ripe Banana...",
    },
    IngredientProfile {
        name: "Nata de Coco",
        ingredient_only: true,
        preparation: "Cutting the chewy Nata de Coco into delightful cubes...",
    },
    IngredientProfile {
        name: "Kaong",
        ingredient_only: true,
        preparation: "Rinsing and picking out the succulent Kaong...",
    },
    IngredientProfile {
        name: "Jackfruit",
        ingredient_only: true,
        preparation: "Carefully removing the sweet Jackfruit pods...",
    },
    IngredientProfile {
        name: "Pinipig",
        ingredient_only: true,
        preparation: "Toasting the crunchy Pinipig to a golden delight...",
    },
    IngredientProfile {
        name: "Milk",
        ingredient_only: false,
        preparation: "Pouring the creamy Milk into a jug...",
    },
];

/// First line of every bundle narration.
pub const OPENING_STEP: &str = "Shaving the refreshing Ice to perfection...";

/// Last lines of every bundle narration.
pub const CLOSING_STEPS: [&str; 2] = [
    "Putting it all together with love and care...",
    "Meal Done! Enjoy your customized creation!",
];

/// Looks up a profile by name, ignoring case and surrounding whitespace.
pub fn profile(name: &str) -> Option<&'static IngredientProfile> {
    let name = name.trim();
    PROFILES.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// True for the items that are only sold as part of a meal.
pub fn is_ingredient_only(name: &str) -> bool {
    profile(name).map(|p| p.ingredient_only).unwrap_or(false)
}

/// Narration for assembling `names`: the opening line, one step per distinct
/// name in first-seen order, then the closing lines.
pub fn preparation_steps<'a, I>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: Vec<&str> = Vec::new();
    let mut steps = vec![OPENING_STEP.to_string()];

    for name in names {
        if seen.iter().any(|s| s.eq_ignore_ascii_case(name)) {
            continue;
        }
        seen.push(name);
        steps.push(match profile(name) {
            Some(p) => p.preparation.to_string(),
            None => format!("Preparing {} with a pinch of magic...", name),
        });
    }

    steps.extend(CLOSING_STEPS.iter().map(|s| s.to_string()));
    steps
}
