//! Persistence layer.
//!
//! ```text
//! ┌──────────────┐
//! │   booking    │  (reservation rules, slot locks)
//! └──────┬───────┘
//!        │ Arc<dyn Store>
//!        ↓
//! ┌──────────────┐
//! │    store     │  (InMemoryStore | PostgresStore)
//! └──────┬───────┘
//!        │ PostgresStore only
//!        ↓
//! ┌──────────────┐
//! │   handlers   │  (repositories over a PgConnection)
//! └──────┬───────┘
//!        ↓
//! ┌──────────────┐
//! │  PostgreSQL  │
//! └──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`store`]: The [`Store`](store::Store) trait and its two backends
//! - [`handlers`]: Repository implementations used by the Postgres backend
//! - [`models`]: Record structures shared by both backends
//! - [`errors`]: Database-specific error types
//!
//! # Transactions
//!
//! Repositories borrow a connection, so writes are wrapped in a transaction by the caller:
//!
//! ```ignore
//! let mut tx = pool.begin().await?;
//! let mut repo = Reservations::new(&mut tx);
//! let reservation = repo.create(&request).await?;
//! tx.commit().await?;
//! ```

pub mod errors;
pub mod handlers;
pub mod models;
pub mod store;
