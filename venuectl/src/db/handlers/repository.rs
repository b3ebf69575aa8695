//! CRUD contract for tables whose rows are created, read, changed and removed by id.

use crate::db::errors::Result;

/// A table accessor bound to one connection or transaction.
///
/// Implementors borrow a `&mut PgConnection`, so a caller that opened a transaction can run
/// several repository calls inside it and commit once.
#[async_trait::async_trait]
pub trait Repository {
    type CreateRequest;
    type UpdateRequest;
    type Response;
    type Id: Send + Sync;
    /// Narrows [`Repository::list`]; the default filter matches every row.
    type Filter: Send + Sync;

    async fn create(&mut self, request: &Self::CreateRequest) -> Result<Self::Response>;

    async fn get_by_id(&mut self, id: Self::Id) -> Result<Option<Self::Response>>;

    async fn list(&mut self, filter: &Self::Filter) -> Result<Vec<Self::Response>>;

    /// Returns whether a row was removed.
    async fn delete(&mut self, id: Self::Id) -> Result<bool>;

    /// Fails with [`DbError::NotFound`](crate::db::errors::DbError::NotFound) when the id is unknown.
    async fn update(&mut self, id: Self::Id, request: &Self::UpdateRequest) -> Result<Self::Response>;
}
