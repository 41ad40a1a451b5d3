//! # Seed Data Generator
//!
//! Populates the database with sample diets for development.
//!
//! ## Usage
//! ```bash
//! # Generate 10 diets (default)
//! cargo run -p dieta-db --bin seed
//!
//! # Generate custom amount
//! cargo run -p dieta-db --bin seed -- --count 50
//!
//! # Specify database path
//! cargo run -p dieta-db --bin seed -- --db ./data/dieta.db
//! ```
//!
//! ## Generated Data
//! Each diet gets:
//! - A goal picked from `GOALS`
//! - One meal per meal type, with 1-3 foods
//! - Two exercises from `EXERCISES`
//!
//! Generated payloads go through the same validation as client payloads.

use dieta_core::validation::{validate_new_diet, validate_new_exercise, validate_new_meal};
use dieta_core::{DietInput, ExerciseInput, Field, Foods, MealInput, MealType};
use dieta_db::{Database, DbConfig, EntityStore};
use std::env;

/// Diet goals for sample data
const GOALS: &[&str] = &[
    "perder peso",
    "ganhar massa muscular",
    "manter peso",
    "melhorar condicionamento",
    "reduzir colesterol",
];

/// Foods to draw meal contents from
const FOODS: &[&str] = &[
    "arroz",
    "feijão",
    "frango grelhado",
    "salada",
    "ovos",
    "aveia",
    "banana",
    "iogurte",
    "batata doce",
    "peixe",
    "pão integral",
    "castanhas",
];

/// (exercise type, repetitions, cycles, rest seconds)
const EXERCISES: &[(&str, i64, i64, i64)] = &[
    ("agachamento", 12, 4, 60),
    ("flexão", 15, 3, 45),
    ("corrida", 1, 1, 0),
    ("prancha", 1, 5, 30),
    ("remada", 10, 4, 90),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut count: usize = 10;
    let mut db_path = String::from("./dieta_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--count" | "-c" => {
                if i + 1 < args.len() {
                    count = args[i + 1].parse().unwrap_or(10);
                    i += 1;
                }
            }
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Dieta Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -c, --count <N>    Number of diets to generate (default: 10)");
                println!("  -d, --db <PATH>    Database file path (default: ./dieta_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Dieta Seed Data Generator");
    println!("===========================");
    println!("Database: {}", db_path);
    println!("Diets:    {}", count);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.diets().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} diets", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Generating diets...");

    let start = std::time::Instant::now();
    let (mut meals, mut exercises) = (0usize, 0usize);

    for seed in 0..count {
        let diet = db.diets().create(&validate_new_diet(generate_diet(seed))?).await?;

        for (offset, meal_type) in MealType::ALL.iter().enumerate() {
            let meal = validate_new_meal(generate_meal(*meal_type, diet.id, seed + offset))?;
            db.meals().create(&meal).await?;
            meals += 1;
        }

        for offset in 0..2 {
            let exercise = validate_new_exercise(generate_exercise(diet.id, seed + offset))?;
            db.exercises().create(&exercise).await?;
            exercises += 1;
        }
    }

    let elapsed = start.elapsed();
    println!();
    println!(
        "✓ Generated {} diets, {} meals, {} exercises in {:?}",
        count, meals, exercises, elapsed
    );

    // Verify the counts the list view will show
    let summaries = db.diets().summaries().await?;
    if let Some(first) = summaries.first() {
        println!(
            "  Diet #{}: {} meals, {} exercises",
            first.id, first.meal_count, first.exercise_count
        );
    }

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

fn generate_diet(seed: usize) -> DietInput {
    let goal = GOALS[seed % GOALS.len()];
    let description = if seed % 2 == 0 {
        Field::Value(format!("Plano #{} para {}", seed + 1, goal))
    } else {
        Field::Absent
    };

    DietInput {
        goal: Field::Value(goal.to_string()),
        description,
    }
}

fn generate_meal(meal_type: MealType, diet_id: i64, seed: usize) -> MealInput {
    let food_count = 1 + seed % 3;
    let foods = (0..food_count)
        .map(|k| FOODS[(seed * 7 + k * 5) % FOODS.len()].to_string())
        .collect();

    MealInput {
        meal_type: Field::Value(meal_type.label().to_string()),
        quantity: Field::Value(100 + ((seed * 37) % 400) as i64),
        foods: Field::Value(Foods::Many(foods)),
        diet_id: Field::Value(diet_id),
    }
}

fn generate_exercise(diet_id: i64, seed: usize) -> ExerciseInput {
    let (exercise_type, repetition_count, cycle_count, rest_between_cycles) =
        EXERCISES[seed % EXERCISES.len()];

    ExerciseInput {
        exercise_type: Field::Value(exercise_type.to_string()),
        repetition_count: Field::Value(repetition_count),
        cycle_count: Field::Value(cycle_count),
        rest_between_cycles: Field::Value(rest_between_cycles),
        diet_id: Field::Value(diet_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_payloads_pass_validation() {
        for seed in 0..GOALS.len() * 2 {
            assert!(validate_new_diet(generate_diet(seed)).is_ok());
            for meal_type in MealType::ALL {
                assert!(validate_new_meal(generate_meal(meal_type, 1, seed)).is_ok());
            }
            assert!(validate_new_exercise(generate_exercise(1, seed)).is_ok());
        }
    }
}
