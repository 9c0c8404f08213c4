use crate::{error::CatalogError, query::catalog::CatalogQuery};
use async_trait::async_trait;
use model::catalog::column::ColumnDescriptor;

/// Anything that can answer a catalog query with hydrated column descriptors.
///
/// On error no partial result is returned.
#[async_trait]
pub trait ColumnCatalog: Send + Sync {
    async fn read_columns(&self, query: &CatalogQuery)
    -> Result<Vec<ColumnDescriptor>, CatalogError>;
}
