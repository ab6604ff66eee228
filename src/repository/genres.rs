//! Genre domain methods on Repository

use async_trait::async_trait;

use super::{GenreStore, Repository};
use crate::{
    error::AppResult,
    models::{Genre, NewGenre},
};

#[async_trait]
impl GenreStore for Repository {
    async fn list_genres(&self) -> AppResult<Vec<Genre>> {
        let rows = sqlx::query_as::<_, Genre>("SELECT * FROM genres ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn create_genre(&self, genre: &NewGenre) -> AppResult<Genre> {
        let row = sqlx::query_as::<_, Genre>("INSERT INTO genres (name) VALUES ($1) RETURNING *")
            .bind(&genre.name)
            .fetch_one(&self.pool)
            .await?;
        Ok(row)
    }
}
