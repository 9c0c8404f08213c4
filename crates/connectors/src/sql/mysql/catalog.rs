use crate::sql::{
    base::error::DbError,
    mysql::{
        adapter::MySqlAdapter,
        params::MySqlParamStore,
        row::{NamedValues, raw_column_row},
    },
};
use async_trait::async_trait;
use model::catalog::column::ColumnDescriptor;
use mysql_async::{Row as MySqlRow, prelude::*};
use planner::{error::CatalogError, plan::catalog::ColumnCatalog, query::catalog::CatalogQuery};
use tracing::{debug, error};

#[async_trait]
impl ColumnCatalog for MySqlAdapter {
    async fn read_columns(
        &self,
        query: &CatalogQuery,
    ) -> Result<Vec<ColumnDescriptor>, CatalogError> {
        let params = MySqlParamStore::from_values(&query.params);

        let rows = self
            .fetch_rows(&query.sql, params)
            .await
            .map_err(|err| {
                error!("Catalog query failed: {}", err);
                CatalogError::query(err)
            })?;
        debug!("Catalog query returned {} rows", rows.len());

        hydrate(&rows)
    }
}

/// All rows or nothing: one undecodable row fails the whole read.
pub fn hydrate<R: NamedValues>(rows: &[R]) -> Result<Vec<ColumnDescriptor>, CatalogError> {
    rows.iter()
        .map(|row| raw_column_row(row).map(ColumnDescriptor::from_raw))
        .collect::<Result<Vec<_>, DbError>>()
        .map_err(|err| {
            error!("Failed to hydrate catalog rows: {}", err);
            CatalogError::scan(err)
        })
}

impl MySqlAdapter {
    async fn fetch_rows(
        &self,
        sql: &str,
        params: MySqlParamStore,
    ) -> Result<Vec<MySqlRow>, DbError> {
        let mut conn = self.pool().get_conn().await?;
        let rows = conn.exec::<MySqlRow, _, _>(sql, params.params()).await?;
        Ok(rows)
    }
}
