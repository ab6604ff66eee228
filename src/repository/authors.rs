//! Author domain methods on Repository

use async_trait::async_trait;

use super::{AuthorStore, Repository};
use crate::{
    error::{AppError, AppResult},
    models::{Author, NewAuthor},
};

#[async_trait]
impl AuthorStore for Repository {
    async fn list_authors(&self) -> AppResult<Vec<Author>> {
        let rows = sqlx::query_as::<_, Author>("SELECT * FROM authors ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn get_author(&self, id: i32) -> AppResult<Author> {
        sqlx::query_as::<_, Author>("SELECT * FROM authors WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Author {} not found", id)))
    }

    async fn create_author(&self, author: &NewAuthor) -> AppResult<Author> {
        let row = sqlx::query_as::<_, Author>(
            "INSERT INTO authors (name, biography) VALUES ($1, $2) RETURNING *",
        )
        .bind(&author.name)
        .bind(&author.biography)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }
}
