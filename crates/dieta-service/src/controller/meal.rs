//! # Meal Controller
//!
//! Meal lifecycle plus food list editing.
//!
//! ## Food List Operations
//! ```text
//! foods: ["arroz", "feijão"]
//!
//! add_food("salada")     → ["arroz", "feijão", "salada"]
//! add_food("arroz")      → unchanged (already present)
//! remove_food("feijão")  → ["arroz"]
//! remove_food("arroz")   → ValidationError (foods must not become empty)
//! ```

use dieta_core::validation::{not_empty, validate_meal_changes, validate_new_meal};
use dieta_core::{CoreResult, EntityKind, Meal, MealChanges, MealInput, ValidationError};
use dieta_db::{ChildStore, Database, EntityStore, MealRepository};
use tracing::{debug, info};

use crate::controller::{check_diet_reference, rejected};
use crate::lookup::require;

/// Controller for meals.
#[derive(Debug, Clone)]
pub struct MealController {
    db: Database,
}

impl MealController {
    pub fn new(db: Database) -> Self {
        MealController { db }
    }

    /// Validates and creates a meal, optionally attached to a diet.
    ///
    /// ## Errors
    /// - Field rules fail: `Validation` on that field
    /// - `diet_id` names no diet: `Validation` on `diet_id`
    pub async fn create(&self, input: MealInput) -> CoreResult<Meal> {
        let new = validate_new_meal(input).map_err(|e| rejected(EntityKind::Meal, e))?;
        check_diet_reference(&self.db, EntityKind::Meal, new.diet_id).await?;

        Ok(self.db.meals().create(&new).await?)
    }

    pub async fn get_all(&self) -> CoreResult<Vec<Meal>> {
        Ok(self.db.meals().get_all().await?)
    }

    pub async fn get_by_id(&self, id: i64) -> CoreResult<Meal> {
        require(&self.db.meals(), id).await
    }

    /// Meals attached to one diet. An unknown diet has no meals.
    pub async fn get_by_diet(&self, diet_id: i64) -> CoreResult<Vec<Meal>> {
        Ok(self.db.meals().get_by_parent(diet_id).await?)
    }

    /// Applies a partial update. `"diet_id": null` detaches the meal.
    pub async fn update(&self, id: i64, input: MealInput) -> CoreResult<Meal> {
        let repo = self.db.meals();
        require(&repo, id).await?;

        let changes = validate_meal_changes(input).map_err(|e| rejected(EntityKind::Meal, e))?;
        if let Some(diet_id) = changes.diet_id {
            check_diet_reference(&self.db, EntityKind::Meal, diet_id).await?;
        }

        Ok(repo.update(id, &changes).await?)
    }

    pub async fn delete(&self, id: i64) -> CoreResult<()> {
        let repo = self.db.meals();
        require(&repo, id).await?;

        Ok(repo.delete(id).await?)
    }

    /// Appends a food unless the meal already lists it.
    pub async fn add_food(&self, id: i64, food: &str) -> CoreResult<Meal> {
        let repo = self.db.meals();
        let meal = require(&repo, id).await?;

        not_empty(Some(food), "foods").map_err(|e| rejected(EntityKind::Meal, e))?;
        let food = food.trim();

        if meal.foods.iter().any(|f| f == food) {
            debug!(id, food, "Food already listed");
            return Ok(meal);
        }

        let updated = write_foods(&repo, id, meal.foods_with(food)).await?;
        info!(id, food, "Food added to meal");
        Ok(updated)
    }

    /// Removes every occurrence of a food.
    ///
    /// Removing the last remaining food is rejected; a meal always lists at
    /// least one.
    pub async fn remove_food(&self, id: i64, food: &str) -> CoreResult<Meal> {
        let repo = self.db.meals();
        let meal = require(&repo, id).await?;

        let food = food.trim();
        let foods = meal.foods_without(food);

        if foods.len() == meal.foods.len() {
            debug!(id, food, "Food not listed");
            return Ok(meal);
        }
        if foods.is_empty() {
            return Err(rejected(EntityKind::Meal, ValidationError::empty_list("foods")));
        }

        let updated = write_foods(&repo, id, foods).await?;
        info!(id, food, "Food removed from meal");
        Ok(updated)
    }
}

async fn write_foods(repo: &MealRepository, id: i64, foods: Vec<String>) -> CoreResult<Meal> {
    let changes = MealChanges {
        foods: Some(foods),
        ..Default::default()
    };
    Ok(repo.update(id, &changes).await?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dieta_core::{CoreError, NewDiet, Payload};
    use dieta_db::DbConfig;
    use serde_json::json;

    async fn setup() -> (Database, MealController) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        (db.clone(), MealController::new(db))
    }

    fn input(v: serde_json::Value) -> MealInput {
        MealInput::from_value(v).unwrap()
    }

    async fn lunch(meals: &MealController) -> Meal {
        meals
            .create(input(json!({
                "meal_type": "Almoço",
                "quantity": 300,
                "foods": ["arroz", "feijão"]
            })))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_create_accepts_single_food_string() {
        let (_, meals) = setup().await;

        let meal = meals
            .create(input(json!({
                "meal_type": "lanche",
                "quantity": 1,
                "foods": "banana"
            })))
            .await
            .unwrap();
        assert_eq!(meal.foods, vec!["banana"]);
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_diet() {
        let (db, meals) = setup().await;

        let err = meals
            .create(input(json!({
                "meal_type": "jantar",
                "quantity": 200,
                "foods": ["sopa"],
                "diet_id": 9999
            })))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.field() == "diet_id"));
        assert!(db.meals().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_meal_type() {
        let (_, meals) = setup().await;

        let err = meals
            .create(input(json!({
                "meal_type": "brunch",
                "quantity": 1,
                "foods": ["ovos"]
            })))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.field() == "meal_type"));
    }

    #[tokio::test]
    async fn test_get_by_diet() {
        let (db, meals) = setup().await;
        let diet = db
            .diets()
            .create(&NewDiet {
                goal: "perder peso".to_string(),
                description: None,
            })
            .await
            .unwrap();

        let meal = lunch(&meals).await;
        meals
            .update(meal.id, input(json!({ "diet_id": diet.id })))
            .await
            .unwrap();
        lunch(&meals).await;

        assert_eq!(meals.get_by_diet(diet.id).await.unwrap().len(), 1);
        assert!(meals.get_by_diet(diet.id + 1).await.unwrap().is_empty());
        assert_eq!(meals.get_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_update_null_diet_detaches() {
        let (db, meals) = setup().await;
        let diet = db
            .diets()
            .create(&NewDiet {
                goal: "perder peso".to_string(),
                description: None,
            })
            .await
            .unwrap();
        let meal = lunch(&meals).await;

        let attached = meals
            .update(meal.id, input(json!({ "diet_id": diet.id })))
            .await
            .unwrap();
        assert_eq!(attached.diet_id, Some(diet.id));

        let detached = meals
            .update(meal.id, input(json!({ "diet_id": null })))
            .await
            .unwrap();
        assert_eq!(detached.diet_id, None);
        assert_eq!(detached.foods, meal.foods);
    }

    #[tokio::test]
    async fn test_update_invalid_leaves_meal_unchanged() {
        let (_, meals) = setup().await;
        let meal = lunch(&meals).await;

        let err = meals
            .update(meal.id, input(json!({ "quantity": 10, "foods": [] })))
            .await
            .unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.field() == "foods"));
        assert_eq!(meals.get_by_id(meal.id).await.unwrap(), meal);
    }

    #[tokio::test]
    async fn test_add_food() {
        let (_, meals) = setup().await;
        let meal = lunch(&meals).await;

        let updated = meals.add_food(meal.id, " salada ").await.unwrap();
        assert_eq!(updated.foods, vec!["arroz", "feijão", "salada"]);

        let same = meals.add_food(meal.id, "arroz").await.unwrap();
        assert_eq!(same.foods, updated.foods);

        let err = meals.add_food(meal.id, "  ").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.field() == "foods"));

        let err = meals.add_food(meal.id + 10, "salada").await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: EntityKind::Meal, .. }));
    }

    #[tokio::test]
    async fn test_remove_food() {
        let (_, meals) = setup().await;
        let meal = lunch(&meals).await;

        let updated = meals.remove_food(meal.id, "feijão").await.unwrap();
        assert_eq!(updated.foods, vec!["arroz"]);

        let err = meals.remove_food(meal.id, "arroz").await.unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref e) if e.field() == "foods"));
        assert_eq!(meals.get_by_id(meal.id).await.unwrap().foods, vec!["arroz"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let (_, meals) = setup().await;
        let meal = lunch(&meals).await;

        meals.delete(meal.id).await.unwrap();
        let err = meals.get_by_id(meal.id).await.unwrap_err();
        assert!(matches!(err, CoreError::NotFound { kind: EntityKind::Meal, .. }));
    }
}
