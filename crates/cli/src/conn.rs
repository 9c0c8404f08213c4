use crate::error::CliError;
use async_trait::async_trait;
use connectors::sql::{base::adapter::SqlAdapter, mysql::adapter::MySqlAdapter};
use tracing::{error, info};

/// Trait for "pinging" a data source
#[async_trait]
pub trait ConnectionPinger {
    /// Attempts to ping; returns Err if unreachable
    async fn ping(&self) -> Result<(), CliError>;
}

/// MySQL/MariaDB pinger
pub struct MySqlConnectionPinger {
    pub conn_str: String,
}

#[async_trait]
impl ConnectionPinger for MySqlConnectionPinger {
    async fn ping(&self) -> Result<(), CliError> {
        info!("Pinging MySQL");

        let adapter = MySqlAdapter::connect(&self.conn_str).await.map_err(|e| {
            error!("MySQL connection failed: {}", e);
            e
        })?;

        let result = adapter.ping().await;
        adapter.disconnect().await;

        if let Err(e) = result {
            error!("MySQL ping failed: {}", e);
            return Err(e.into());
        }

        info!("MySQL ping succeeded");
        Ok(())
    }
}
