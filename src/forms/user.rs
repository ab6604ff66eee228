//! Profile edit form

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{all_exist, parse_ids, present, FieldErrors, Validated, INVALID_CHOICE};
use crate::{
    error::AppResult,
    models::{Book, ProfileUpdate, User},
    repository::ReferenceLookup,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UserForm {
    #[validate(
        required(message = "This field is required."),
        length(min = 3, max = 80, message = "Your username needs to be between 3 and 80 chars")
    )]
    pub username: Option<String>,
    /// Favorite book ids (may be empty)
    #[serde(default)]
    pub books: Vec<String>,
}

impl UserForm {
    /// Form pre-populated with a user and their current favorites
    pub fn from_user(user: &User, favorites: &[Book]) -> Self {
        Self {
            username: Some(user.username.clone()),
            books: favorites.iter().map(|b| b.id.to_string()).collect(),
        }
    }

    pub async fn validate_against<L>(&self, lookup: &L) -> AppResult<Validated<ProfileUpdate>>
    where
        L: ReferenceLookup + ?Sized,
    {
        let normalized = Self {
            username: present(&self.username),
            ..self.clone()
        };
        let mut errors = match normalized.validate() {
            Ok(()) => FieldErrors::new(),
            Err(e) => FieldErrors::from(e),
        };

        let mut book_ids = parse_ids(&self.books);
        if let Some(ids) = book_ids.as_ref().filter(|ids| !ids.is_empty()) {
            let found = lookup.existing_book_ids(ids).await?;
            if !all_exist(ids, &found) {
                book_ids = None;
            }
        }
        if book_ids.is_none() {
            errors.add("books", INVALID_CHOICE);
        }

        match (normalized.username, book_ids) {
            (Some(username), Some(favorite_book_ids)) if errors.is_empty() => {
                Ok(Ok(ProfileUpdate {
                    username,
                    favorite_book_ids,
                }))
            }
            _ => Ok(Err(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockReferenceLookup;

    fn lookup_with(books: Vec<i32>) -> MockReferenceLookup {
        let mut lookup = MockReferenceLookup::new();
        lookup
            .expect_existing_book_ids()
            .returning(move |ids| Ok(ids.iter().copied().filter(|id| books.contains(id)).collect()));
        lookup
    }

    #[tokio::test]
    async fn test_valid_profile() {
        let form = UserForm {
            username: Some("reader".into()),
            books: vec!["4".into(), "2".into()],
        };
        let update = form.validate_against(&lookup_with(vec![2, 4])).await.unwrap().unwrap();
        assert_eq!(update.username, "reader");
        assert_eq!(update.favorite_book_ids, vec![2, 4]);
    }

    #[tokio::test]
    async fn test_short_username_and_missing_book() {
        let form = UserForm {
            username: Some("ab".into()),
            books: vec!["99".into()],
        };
        let errors = form.validate_against(&lookup_with(vec![1])).await.unwrap().unwrap_err();
        assert_eq!(
            errors.get("username"),
            Some("Your username needs to be between 3 and 80 chars")
        );
        assert_eq!(errors.get("books"), Some(INVALID_CHOICE));
    }

    #[tokio::test]
    async fn test_empty_favorites_skip_lookup() {
        let mut lookup = MockReferenceLookup::new();
        lookup.expect_existing_book_ids().never();
        let form = UserForm {
            username: Some("reader".into()),
            books: vec![],
        };
        let update = form.validate_against(&lookup).await.unwrap().unwrap();
        assert!(update.favorite_book_ids.is_empty());
    }
}
