//! The built-in recipe catalog and the maintenance operation that loads it.

use tracing::info;

use crate::db::{DbResult, Recipe, RecipeRepo};
use crate::util::recipe_id;

struct SeedRecipe {
    name: &'static str,
    mood_tags: &'static [&'static str],
    ingredients: &'static [&'static str],
    description: &'static str,
    cooking_time: &'static str,
    instructions: &'static str,
    mood_description: &'static str,
}

impl SeedRecipe {
    fn to_recipe(&self) -> Recipe {
        Recipe {
            id: recipe_id(self.name),
            name: self.name.to_string(),
            mood_tags: self.mood_tags.iter().map(|s| s.to_string()).collect(),
            ingredients: self.ingredients.iter().map(|s| s.to_string()).collect(),
            description: self.description.to_string(),
            cooking_time: self.cooking_time.to_string(),
            instructions: self.instructions.to_string(),
            mood_description: self.mood_description.to_string(),
            created: None,
        }
    }
}

const SEED_RECIPES: &[SeedRecipe] = &[
    SeedRecipe {
        name: "Comfort Mac and Cheese",
        mood_tags: &["stressed", "sad"],
        ingredients: &["pasta", "cheese", "milk", "butter", "flour"],
        description: "Creamy stovetop macaroni with a sharp cheese sauce.",
        cooking_time: "25 minutes",
        instructions: "Boil the pasta until just tender. Melt the butter, whisk in the flour \
            and cook for a minute. Add the milk slowly, stirring until thick. Stir in the \
            cheese until smooth, then fold in the pasta.",
        mood_description: "Warm, cheesy and familiar. Stirring a pot is about as calming as \
            cooking gets.",
    },
    SeedRecipe {
        name: "Romantic Mushroom Risotto",
        mood_tags: &["romantic"],
        ingredients: &["rice", "mushroom", "onion", "garlic", "parmesan", "white wine", "butter"],
        description: "Slow-stirred arborio rice with browned mushrooms and parmesan.",
        cooking_time: "40 minutes",
        instructions: "Brown the mushrooms in butter and set aside. Soften the onion and \
            garlic, toast the rice, then add the wine. Add hot water a ladle at a time, \
            stirring, until creamy. Finish with the mushrooms, butter and parmesan.",
        mood_description: "A dish that asks you to slow down and share it.",
    },
    SeedRecipe {
        name: "Sunny Veggie Stir-Fry",
        mood_tags: &["happy", "energetic"],
        ingredients: &["bell pepper", "broccoli", "carrot", "soy sauce", "garlic", "ginger", "rice"],
        description: "Crisp vegetables tossed in a garlic ginger sauce over rice.",
        cooking_time: "20 minutes",
        instructions: "Cook the rice. Stir-fry the garlic and ginger for thirty seconds, add \
            the carrot and broccoli, then the pepper. Season with soy sauce and serve over \
            the rice.",
        mood_description: "All the colours of a good day on one plate.",
    },
    SeedRecipe {
        name: "Chicken Noodle Soup",
        mood_tags: &["sad", "tired"],
        ingredients: &["chicken", "noodles", "carrot", "celery", "onion", "chicken broth"],
        description: "Classic clear soup with tender chicken and egg noodles.",
        cooking_time: "45 minutes",
        instructions: "Simmer the chicken in the broth with the onion, carrot and celery \
            until cooked through. Shred the chicken, return it to the pot and cook the \
            noodles in the soup.",
        mood_description: "The bowl everyone reaches for when the day has been too long.",
    },
    SeedRecipe {
        name: "Energizing Smoothie Bowl",
        mood_tags: &["energetic", "happy"],
        ingredients: &["banana", "berries", "yogurt", "honey", "oats", "spinach"],
        description: "Thick berry and banana smoothie topped with oats.",
        cooking_time: "10 minutes",
        instructions: "Blend the banana, berries, spinach and yogurt until thick. Pour into a \
            bowl, drizzle with honey and scatter the oats on top.",
        mood_description: "Fast, fresh and full of fuel.",
    },
    SeedRecipe {
        name: "Calming Cinnamon Oatmeal",
        mood_tags: &["anxious", "stressed"],
        ingredients: &["oats", "milk", "honey", "banana", "cinnamon"],
        description: "Soft oats simmered in milk with banana and cinnamon.",
        cooking_time: "15 minutes",
        instructions: "Simmer the oats in the milk, stirring, until creamy. Stir in the \
            cinnamon, top with sliced banana and a spoon of honey.",
        mood_description: "Gentle and predictable, with nothing to go wrong.",
    },
    SeedRecipe {
        name: "Lazy Sunday Pancakes",
        mood_tags: &["lazy", "happy", "nostalgic"],
        ingredients: &["flour", "milk", "egg", "butter", "sugar", "baking powder"],
        description: "Fluffy buttermilk-style pancakes from the store cupboard.",
        cooking_time: "20 minutes",
        instructions: "Whisk the flour, sugar and baking powder. Beat in the egg, milk and \
            melted butter. Cook ladlefuls on a hot buttered pan until bubbles form, then flip.",
        mood_description: "Breakfast at any hour, no plans required.",
    },
    SeedRecipe {
        name: "Spicy Adventure Tacos",
        mood_tags: &["adventurous", "energetic"],
        ingredients: &["tortilla", "beef", "chili", "tomato", "onion", "cheese", "lime"],
        description: "Chili-spiced beef tacos with fresh tomato and lime.",
        cooking_time: "30 minutes",
        instructions: "Brown the beef with the onion and chili. Warm the tortillas, fill with \
            the beef, chopped tomato and cheese, and finish with a squeeze of lime.",
        mood_description: "Heat and crunch for when you want something new.",
    },
    SeedRecipe {
        name: "Grandma's Tomato Soup",
        mood_tags: &["nostalgic", "sad"],
        ingredients: &["tomato", "onion", "garlic", "cream", "butter", "basil"],
        description: "Velvety tomato soup finished with cream and basil.",
        cooking_time: "35 minutes",
        instructions: "Soften the onion and garlic in butter. Add the tomatoes and simmer for \
            twenty minutes. Blend until smooth, stir in the cream and tear in the basil.",
        mood_description: "Tastes like rainy afternoons at home.",
    },
    SeedRecipe {
        name: "Quick Egg Fried Rice",
        mood_tags: &["tired", "lazy"],
        ingredients: &["rice", "egg", "peas", "soy sauce", "green onion"],
        description: "Day-old rice fried with egg, peas and soy sauce.",
        cooking_time: "15 minutes",
        instructions: "Scramble the egg in a hot pan and set aside. Fry the rice and peas \
            until hot, add the soy sauce, then fold the egg back in with the green onion.",
        mood_description: "Dinner in one pan with whatever is left in the fridge.",
    },
    SeedRecipe {
        name: "Chocolate Mug Cake",
        mood_tags: &["sad", "stressed", "happy"],
        ingredients: &["flour", "sugar", "cocoa", "milk", "butter", "egg"],
        description: "A single-serving chocolate cake made in the microwave.",
        cooking_time: "5 minutes",
        instructions: "Mix the flour, sugar and cocoa in a large mug. Beat in the egg, milk \
            and melted butter. Microwave for about ninety seconds.",
        mood_description: "Instant chocolate, zero commitment.",
    },
    SeedRecipe {
        name: "Mediterranean Lemon Salmon",
        mood_tags: &["romantic", "energetic"],
        ingredients: &["salmon", "lemon", "olive oil", "garlic", "spinach", "tomato"],
        description: "Pan-roasted salmon on garlicky spinach with tomatoes.",
        cooking_time: "25 minutes",
        instructions: "Season the salmon and sear it skin side down in olive oil. Wilt the \
            spinach with garlic and tomatoes, then serve the salmon on top with lemon.",
        mood_description: "Light, bright and a little bit fancy.",
    },
];

/// The built-in recipe catalog, in the order it is stored.
pub fn seed_recipes() -> Vec<Recipe> {
    SEED_RECIPES.iter().map(SeedRecipe::to_recipe).collect()
}

/// Replace every stored recipe with the built-in catalog.
pub async fn reseed<R: RecipeRepo + ?Sized>(repo: &R) -> DbResult<usize> {
    let recipes = seed_recipes();
    let inserted = repo.replace_all(&recipes).await?;
    info!("Seeded {} recipes", inserted);
    Ok(inserted)
}

/// Load the built-in catalog only when the store holds no recipes yet.
/// Returns the number of recipes inserted.
pub async fn seed_if_empty<R: RecipeRepo + ?Sized>(repo: &R) -> DbResult<usize> {
    if repo.count_recipes().await? > 0 {
        return Ok(0);
    }
    reseed(repo).await
}
