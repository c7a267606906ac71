//! Typed helpers over the JSON-level [`RemoteDataService`] calls.

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::query::{Collection, Query};
use super::traits::RemoteDataService;
use crate::error::RemoteResult;

/// Select rows and decode them into `T`
pub async fn select_rows<T: DeserializeOwned>(
    remote: &dyn RemoteDataService,
    collection: Collection,
    query: &Query,
) -> RemoteResult<Vec<T>> {
    let rows = remote.select(collection, query).await?;
    rows.into_iter()
        .map(|row| serde_json::from_value(row).map_err(Into::into))
        .collect()
}

/// Encode and insert a single row
pub async fn insert_row<T: Serialize>(
    remote: &dyn RemoteDataService,
    collection: Collection,
    row: &T,
) -> RemoteResult<()> {
    let value = serde_json::to_value(row)?;
    remote.insert(collection, vec![value]).await
}
