//! # API Boundary
//!
//! `DietaApi` exposes every operation as `raw input → ApiResponse`, so a
//! transport (the `dieta` CLI, or an HTTP router) only forwards strings
//! and ids.
//!
//! ## Endpoint Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method   Path                          Call                     OK    │
//! │  ──────   ────                          ────                     ──    │
//! │  GET      /diets                        list_diets()             200   │
//! │  GET      /diets/{id}                   get_diet(id)             200   │
//! │  POST     /diets                        create_diet(json)        201   │
//! │  PUT      /diets/{id}                   update_diet(id, json)    200   │
//! │  DELETE   /diets/{id}                   delete_diet(id)          200   │
//! │  POST     /diets/{id}/meals/{m}         add_meal(id, m)          200   │
//! │  POST     /diets/{id}/exercises/{e}     add_exercise(id, e)      200   │
//! │                                                                         │
//! │  GET      /meals[?diet_id=]             list_meals(filter)       200   │
//! │  GET/POST/PUT/DELETE /meals[/{id}]      get/create/update/delete       │
//! │  POST     /meals/{id}/foods             add_food(id, food)       200   │
//! │  DELETE   /meals/{id}/foods/{food}      remove_food(id, food)    200   │
//! │                                                                         │
//! │  GET      /exercises[?diet_id=]         list_exercises(filter)   200   │
//! │  GET/POST/PUT/DELETE /exercises[/{id}]  get/create/update/delete       │
//! │                                                                         │
//! │  GET      /health                       health()                 200   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//! Failures use the status of their `ApiError` (400, 404 or 500).

use dieta_core::{CoreError, CoreResult, DietInput, EntityKind, ExerciseInput, MealInput, Payload};
use dieta_db::Database;
use serde::Serialize;
use serde_json::json;
use tracing::debug;

use crate::controller::{rejected, DietController, ExerciseController, MealController};
use crate::error::ApiError;
use crate::response::ApiResponse;

/// All controllers behind one handle.
///
/// ## Usage
/// ```rust,ignore
/// let api = DietaApi::new(db);
///
/// let response = api.create_diet(r#"{"goal": "perder peso"}"#).await;
/// assert_eq!(response.status, 201);
/// ```
#[derive(Debug, Clone)]
pub struct DietaApi {
    db: Database,
    diets: DietController,
    meals: MealController,
    exercises: ExerciseController,
}

impl DietaApi {
    pub fn new(db: Database) -> Self {
        DietaApi {
            diets: DietController::new(db.clone()),
            meals: MealController::new(db.clone()),
            exercises: ExerciseController::new(db.clone()),
            db,
        }
    }

    pub fn diets(&self) -> &DietController {
        &self.diets
    }

    pub fn meals(&self) -> &MealController {
        &self.meals
    }

    pub fn exercises(&self) -> &ExerciseController {
        &self.exercises
    }

    // =========================================================================
    // Diets
    // =========================================================================

    pub async fn list_diets(&self) -> ApiResponse {
        list(self.diets.get_all().await)
    }

    pub async fn get_diet(&self, id: i64) -> ApiResponse {
        single(self.diets.get_by_id(id).await)
    }

    pub async fn create_diet(&self, payload: &str) -> ApiResponse {
        let result = match parse::<DietInput>(EntityKind::Diet, payload) {
            Ok(input) => self.diets.create(input).await,
            Err(e) => Err(e),
        };
        created(result, "Diet created")
    }

    pub async fn update_diet(&self, id: i64, payload: &str) -> ApiResponse {
        let result = match parse::<DietInput>(EntityKind::Diet, payload) {
            Ok(input) => self.diets.update(id, input).await,
            Err(e) => Err(e),
        };
        updated(result, "Diet updated")
    }

    /// Responds with how many meals and exercises went with the diet.
    pub async fn delete_diet(&self, id: i64) -> ApiResponse {
        updated(self.diets.delete(id).await, "Diet deleted")
    }

    pub async fn add_meal(&self, diet_id: i64, meal_id: i64) -> ApiResponse {
        updated(self.diets.add_meal(diet_id, meal_id).await, "Meal added to diet")
    }

    pub async fn add_exercise(&self, diet_id: i64, exercise_id: i64) -> ApiResponse {
        updated(
            self.diets.add_exercise(diet_id, exercise_id).await,
            "Exercise added to diet",
        )
    }

    // =========================================================================
    // Meals
    // =========================================================================

    /// All meals, or only those of `diet_id`.
    pub async fn list_meals(&self, diet_id: Option<i64>) -> ApiResponse {
        match diet_id {
            Some(diet_id) => list(self.meals.get_by_diet(diet_id).await),
            None => list(self.meals.get_all().await),
        }
    }

    pub async fn get_meal(&self, id: i64) -> ApiResponse {
        single(self.meals.get_by_id(id).await)
    }

    pub async fn create_meal(&self, payload: &str) -> ApiResponse {
        let result = match parse::<MealInput>(EntityKind::Meal, payload) {
            Ok(input) => self.meals.create(input).await,
            Err(e) => Err(e),
        };
        created(result, "Meal created")
    }

    pub async fn update_meal(&self, id: i64, payload: &str) -> ApiResponse {
        let result = match parse::<MealInput>(EntityKind::Meal, payload) {
            Ok(input) => self.meals.update(id, input).await,
            Err(e) => Err(e),
        };
        updated(result, "Meal updated")
    }

    pub async fn delete_meal(&self, id: i64) -> ApiResponse {
        let result = self.meals.delete(id).await.map(|()| json!({ "id": id }));
        updated(result, "Meal deleted")
    }

    pub async fn add_food(&self, id: i64, food: &str) -> ApiResponse {
        updated(self.meals.add_food(id, food).await, "Food added")
    }

    pub async fn remove_food(&self, id: i64, food: &str) -> ApiResponse {
        updated(self.meals.remove_food(id, food).await, "Food removed")
    }

    // =========================================================================
    // Exercises
    // =========================================================================

    /// All exercises, or only those of `diet_id`.
    pub async fn list_exercises(&self, diet_id: Option<i64>) -> ApiResponse {
        match diet_id {
            Some(diet_id) => list(self.exercises.get_by_diet(diet_id).await),
            None => list(self.exercises.get_all().await),
        }
    }

    pub async fn get_exercise(&self, id: i64) -> ApiResponse {
        single(self.exercises.get_by_id(id).await)
    }

    pub async fn create_exercise(&self, payload: &str) -> ApiResponse {
        let result = match parse::<ExerciseInput>(EntityKind::Exercise, payload) {
            Ok(input) => self.exercises.create(input).await,
            Err(e) => Err(e),
        };
        created(result, "Exercise created")
    }

    pub async fn update_exercise(&self, id: i64, payload: &str) -> ApiResponse {
        let result = match parse::<ExerciseInput>(EntityKind::Exercise, payload) {
            Ok(input) => self.exercises.update(id, input).await,
            Err(e) => Err(e),
        };
        updated(result, "Exercise updated")
    }

    pub async fn delete_exercise(&self, id: i64) -> ApiResponse {
        let result = self.exercises.delete(id).await.map(|()| json!({ "id": id }));
        updated(result, "Exercise deleted")
    }

    // =========================================================================
    // Health
    // =========================================================================

    /// Database connectivity and migration state.
    pub async fn health(&self) -> ApiResponse {
        let result = self.db.status().await.map_err(CoreError::from);
        single(result)
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn parse<P: Payload>(kind: EntityKind, raw: &str) -> CoreResult<P> {
    debug!(kind = %kind, bytes = raw.len(), "Parsing payload");
    P::from_json(raw).map_err(|e| rejected(kind, e))
}

fn single<T: Serialize>(result: CoreResult<T>) -> ApiResponse {
    match result {
        Ok(data) => ApiResponse::ok(&data),
        Err(e) => ApiError::from(e).into(),
    }
}

fn list<T: Serialize>(result: CoreResult<Vec<T>>) -> ApiResponse {
    match result {
        Ok(items) => ApiResponse::list(&items),
        Err(e) => ApiError::from(e).into(),
    }
}

fn created<T: Serialize>(result: CoreResult<T>, message: &str) -> ApiResponse {
    match result {
        Ok(data) => ApiResponse::created(&data, message),
        Err(e) => ApiError::from(e).into(),
    }
}

fn updated<T: Serialize>(result: CoreResult<T>, message: &str) -> ApiResponse {
    match result {
        Ok(data) => ApiResponse::ok_with_message(&data, message),
        Err(e) => ApiError::from(e).into(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use dieta_db::DbConfig;

    async fn setup() -> DietaApi {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        DietaApi::new(db)
    }

    #[tokio::test]
    async fn test_malformed_payload_is_400() {
        let api = setup().await;

        let response = api.create_diet("{ not json").await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body["field"], "payload");

        let response = api.create_diet("[]").await;
        assert_eq!(response.status, 400);
    }

    #[tokio::test]
    async fn test_empty_payload_is_400() {
        let api = setup().await;

        let response = api.create_meal("{}").await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body["error"], "no data provided");
    }

    #[tokio::test]
    async fn test_delete_meal_envelope() {
        let api = setup().await;
        let created = api
            .create_meal(r#"{"meal_type": "ceia", "quantity": 1, "foods": "chá"}"#)
            .await;
        let id = created.body["data"]["id"].as_i64().unwrap();

        let response = api.delete_meal(id).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["data"]["id"], id);
        assert_eq!(response.body["message"], "Meal deleted");

        assert_eq!(api.get_meal(id).await.status, 404);
    }

    #[tokio::test]
    async fn test_health() {
        let api = setup().await;

        let response = api.health().await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["data"]["healthy"], true);
    }
}
