use super::record::{Nutrient, NutritionRecord, NutritionSource};

struct FallbackFood {
    key: &'static str,
    name: &'static str,
    calories: f64,
    protein: f64,
    fat: f64,
    carbs: f64,
    micros: &'static [(Nutrient, f64)],
}

// Order matters: the first key that matches wins.
static FALLBACK_FOODS: &[FallbackFood] = &[
    FallbackFood {
        key: "apple",
        name: "Apple",
        calories: 52.0,
        protein: 0.3,
        fat: 0.2,
        carbs: 14.0,
        micros: &[
            (Nutrient::Fiber, 2.4),
            (Nutrient::Sugar, 10.4),
            (Nutrient::Potassium, 107.0),
            (Nutrient::VitaminC, 4.6),
        ],
    },
    FallbackFood {
        key: "banana",
        name: "Banana",
        calories: 89.0,
        protein: 1.1,
        fat: 0.3,
        carbs: 23.0,
        micros: &[
            (Nutrient::Fiber, 2.6),
            (Nutrient::Sugar, 12.2),
            (Nutrient::Potassium, 358.0),
            (Nutrient::VitaminC, 8.7),
        ],
    },
    FallbackFood {
        key: "chicken breast",
        name: "Chicken Breast",
        calories: 165.0,
        protein: 31.0,
        fat: 3.6,
        carbs: 0.0,
        micros: &[
            (Nutrient::Sodium, 74.0),
            (Nutrient::Potassium, 256.0),
            (Nutrient::Cholesterol, 85.0),
            (Nutrient::SaturatedFat, 1.0),
        ],
    },
    FallbackFood {
        key: "rice",
        name: "Rice",
        calories: 130.0,
        protein: 2.7,
        fat: 0.3,
        carbs: 28.0,
        micros: &[(Nutrient::Fiber, 0.4), (Nutrient::Potassium, 35.0)],
    },
    FallbackFood {
        key: "broccoli",
        name: "Broccoli",
        calories: 34.0,
        protein: 2.8,
        fat: 0.4,
        carbs: 7.0,
        micros: &[
            (Nutrient::Fiber, 2.6),
            (Nutrient::Sugar, 1.7),
            (Nutrient::Potassium, 316.0),
            (Nutrient::Calcium, 47.0),
            (Nutrient::VitaminC, 89.2),
        ],
    },
    FallbackFood {
        key: "salmon",
        name: "Salmon",
        calories: 208.0,
        protein: 20.0,
        fat: 12.0,
        carbs: 0.0,
        micros: &[
            (Nutrient::Sodium, 59.0),
            (Nutrient::Potassium, 363.0),
            (Nutrient::Cholesterol, 55.0),
            (Nutrient::SaturatedFat, 3.1),
        ],
    },
    FallbackFood {
        key: "egg",
        name: "Egg",
        calories: 155.0,
        protein: 13.0,
        fat: 11.0,
        carbs: 1.1,
        micros: &[
            (Nutrient::Sodium, 124.0),
            (Nutrient::Cholesterol, 373.0),
            (Nutrient::SaturatedFat, 3.3),
            (Nutrient::Iron, 1.2),
        ],
    },
    FallbackFood {
        key: "bread",
        name: "Bread",
        calories: 265.0,
        protein: 9.0,
        fat: 3.2,
        carbs: 49.0,
        micros: &[
            (Nutrient::Fiber, 2.7),
            (Nutrient::Sugar, 5.0),
            (Nutrient::Sodium, 491.0),
        ],
    },
    FallbackFood {
        key: "milk",
        name: "Milk",
        calories: 42.0,
        protein: 3.4,
        fat: 1.0,
        carbs: 5.0,
        micros: &[(Nutrient::Sugar, 5.0), (Nutrient::Calcium, 125.0)],
    },
    FallbackFood {
        key: "pasta",
        name: "Pasta",
        calories: 131.0,
        protein: 5.0,
        fat: 1.1,
        carbs: 25.0,
        micros: &[(Nutrient::Fiber, 1.8)],
    },
];

impl FallbackFood {
    fn matches(&self, lowered_query: &str) -> bool {
        lowered_query.contains(self.key) || self.key.contains(lowered_query)
    }

    fn to_record(&self) -> NutritionRecord {
        let mut record = NutritionRecord::empty(self.name, NutritionSource::Generic)
            .with(Nutrient::Calories, self.calories)
            .with(Nutrient::Protein, self.protein)
            .with(Nutrient::Fat, self.fat)
            .with(Nutrient::Carbs, self.carbs);
        for &(nutrient, value) in self.micros {
            record.set(nutrient, value);
        }
        record
    }
}

/// Looks `query` up in the built-in table of common foods.
///
/// A key matches when it occurs in the lowercased query or the lowercased query
/// occurs in the key.
pub fn lookup(query: &str) -> Option<NutritionRecord> {
    let lowered = query.to_lowercase();
    FALLBACK_FOODS
        .iter()
        .find(|food| food.matches(&lowered))
        .map(FallbackFood::to_record)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salmon_has_expected_macros() {
        let r = lookup("salmon").expect("salmon is in the table");
        assert_eq!(r.name, "Salmon");
        assert_eq!(r.calories, 208.0);
        assert_eq!(r.protein, 20.0);
        assert_eq!(r.fat, 12.0);
        assert_eq!(r.carbs, 0.0);
        assert_eq!(r.source, NutritionSource::Generic);
    }

    #[test]
    fn key_inside_query_matches_case_insensitively() {
        let r = lookup("Chicken Breast Sandwich").unwrap();
        assert_eq!(r.name, "Chicken Breast");
    }

    #[test]
    fn query_inside_key_matches() {
        assert_eq!(lookup("egg").unwrap().name, "Egg");
        assert_eq!(lookup("BROC").unwrap().name, "Broccoli");
    }

    #[test]
    fn first_entry_in_table_order_wins() {
        // "chicken breast" is listed before "rice"
        assert_eq!(lookup("chicken breast with rice").unwrap().name, "Chicken Breast");
        // "rice" is listed before "egg"
        assert_eq!(lookup("egg fried rice").unwrap().name, "Rice");
    }

    #[test]
    fn unpopulated_micros_default_to_zero() {
        let r = lookup("pasta").unwrap();
        assert_eq!(r.fiber, 1.8);
        assert_eq!(r.sodium, 0.0);
        assert_eq!(r.vitamin_a, 0.0);
    }

    #[test]
    fn unknown_food_is_not_found() {
        assert!(lookup("quinoa tabbouleh").is_none());
    }
}
