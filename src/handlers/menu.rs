use axum::{Json, extract::State};

use crate::AppState;
use crate::catalog::Dish;

pub async fn list_dishes(State(state): State<AppState>) -> Json<Vec<Dish>> {
    Json(state.catalog.dishes().to_vec())
}
