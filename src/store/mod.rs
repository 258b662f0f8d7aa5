pub mod disk;
pub mod memory;

use crate::core::config::AppConfig;
use crate::core::customer::CustomerStore;
use anyhow::Result;
use disk::DiskCustomerStore;
use std::sync::Arc;

/// Opens the on-disk customer store under the configured data directory.
pub fn open_customer_store(config: &AppConfig) -> Result<Arc<dyn CustomerStore>> {
    let path = config.default_data_path()?.join("customers");
    Ok(Arc::new(DiskCustomerStore::open(&path)?))
}
