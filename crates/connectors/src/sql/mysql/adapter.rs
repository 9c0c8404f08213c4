use crate::sql::base::{
    adapter::{ExecResult, SqlAdapter},
    error::{ConnectorError, DbError},
};
use async_trait::async_trait;
use mysql_async::{Opts, OptsBuilder, Pool, PoolConstraints, PoolOpts, prelude::*};
use tracing::{debug, info, warn};

pub const DEFAULT_MAX_CONNECTIONS: usize = 5;

#[derive(Clone)]
pub struct MySqlAdapter {
    pool: Pool,
    opts: Opts,
    max_connections: usize,
}

impl MySqlAdapter {
    pub fn pool(&self) -> &Pool {
        &self.pool
    }

    pub async fn disconnect(self) {
        if let Err(err) = self.pool.disconnect().await {
            warn!("Failed to disconnect MySQL pool cleanly: {}", err);
        }
    }

    fn build_pool(opts: &Opts, max: usize) -> Result<Pool, DbError> {
        if max == 0 {
            return Err(DbError::InvalidPoolSize(max));
        }
        let constraints = PoolConstraints::new(0, max).ok_or(DbError::InvalidPoolSize(max))?;
        let builder = OptsBuilder::from_opts(opts.clone())
            .pool_opts(PoolOpts::default().with_constraints(constraints));
        Ok(Pool::new(builder))
    }
}

#[async_trait]
impl SqlAdapter for MySqlAdapter {
    async fn connect(url: &str) -> Result<Self, ConnectorError> {
        let opts = Opts::from_url(url)?;
        let pool = Self::build_pool(&opts, DEFAULT_MAX_CONNECTIONS)?;

        // fail early if the server is unreachable
        let mut conn = pool.get_conn().await?;
        conn.ping().await?;
        drop(conn);

        info!(
            "Connected to MySQL at {}:{}",
            opts.ip_or_hostname(),
            opts.tcp_port()
        );

        Ok(MySqlAdapter {
            pool,
            opts,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        })
    }

    async fn ping(&self) -> Result<(), DbError> {
        let mut conn = self.pool.get_conn().await?;
        let val: Option<i32> = conn.query_first("SELECT 1").await?;
        match val {
            Some(1) => Ok(()),
            other => Err(DbError::Decode {
                column: "1".to_string(),
                message: format!("ping returned unexpected result: {other:?}"),
            }),
        }
    }

    async fn exec(&self, sql: &str) -> Result<ExecResult, DbError> {
        let mut conn = self.pool.get_conn().await?;
        conn.query_drop(sql).await?;
        let affected = conn.affected_rows();
        debug!("Statement affected {} rows", affected);
        Ok(ExecResult::new(affected))
    }

    async fn set_max_connections(&mut self, max: usize) -> Result<(), DbError> {
        if max == self.max_connections {
            return Ok(());
        }

        let pool = Self::build_pool(&self.opts, max)?;
        let old = std::mem::replace(&mut self.pool, pool);
        self.max_connections = max;
        info!("Resized MySQL pool to {} connections", max);

        if let Err(err) = old.disconnect().await {
            warn!("Failed to disconnect previous MySQL pool: {}", err);
        }
        Ok(())
    }

    fn max_connections(&self) -> usize {
        self.max_connections
    }
}
