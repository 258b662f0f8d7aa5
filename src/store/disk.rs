use crate::core::customer::CustomerStore;
use crate::core::model::CustomerRecord;
use anyhow::{Context, Result};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const CUSTOMERS_PARTITION: &str = "customers";

/// Customer store persisted in a fjall keyspace, one JSON value per customer id.
pub struct DiskCustomerStore {
    keyspace: Keyspace,
    customers: PartitionHandle,
}

impl DiskCustomerStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = Config::new(path)
            .open()
            .with_context(|| format!("Failed to open customer store at {}", path.display()))?;
        let customers = keyspace
            .open_partition(CUSTOMERS_PARTITION, PartitionCreateOptions::default())
            .context("Failed to open customers partition")?;

        debug!("Opened customer store at {}", path.display());
        Ok(Self {
            keyspace,
            customers,
        })
    }

    fn decode(bytes: &[u8]) -> Result<CustomerRecord> {
        serde_json::from_slice(bytes).context("Failed to decode stored customer")
    }

    fn scan(&self) -> Result<Vec<CustomerRecord>> {
        self.customers
            .iter()
            .map(|item| {
                let (_, value) = item?;
                Self::decode(&value)
            })
            .collect()
    }
}

#[async_trait]
impl CustomerStore for DiskCustomerStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<CustomerRecord>> {
        match self.customers.get(id)? {
            Some(value) => Ok(Some(Self::decode(&value)?)),
            None => Ok(None),
        }
    }

    async fn find_by_document_number(
        &self,
        document_number: &str,
    ) -> Result<Option<CustomerRecord>> {
        Ok(self
            .scan()?
            .into_iter()
            .find(|c| c.document_number == document_number))
    }

    async fn find_all(&self) -> Result<Vec<CustomerRecord>> {
        let mut all = self.scan()?;
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn save(&self, customer: &CustomerRecord) -> Result<()> {
        let value = serde_json::to_vec(customer)?;
        self.customers.insert(customer.id.as_str(), value)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(id = %customer.id, "Customer SAVE");
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        if !self.customers.contains_key(id)? {
            return Ok(false);
        }
        self.customers.remove(id)?;
        self.keyspace.persist(PersistMode::SyncAll)?;
        debug!(id, "Customer DELETE");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::CustomerType;
    use tempfile::tempdir;

    fn customer(id: &str, document_number: &str) -> CustomerRecord {
        CustomerRecord {
            id: id.to_string(),
            document_type: "CEX".to_string(),
            document_number: document_number.to_string(),
            first_name: "Luis".to_string(),
            last_name: Some("Quispe".to_string()),
            email: None,
            phone: None,
            customer_type: CustomerType::Business,
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_disk_store_round_trip() {
        let dir = tempdir().unwrap();
        let store = DiskCustomerStore::open(dir.path()).unwrap();

        assert!(store.find_by_id("c1").await.unwrap().is_none());

        store.save(&customer("c1", "1001")).await.unwrap();
        store.save(&customer("c2", "2002")).await.unwrap();

        let found = store.find_by_id("c1").await.unwrap().unwrap();
        assert_eq!(found, customer("c1", "1001"));
        let by_doc = store.find_by_document_number("2002").await.unwrap();
        assert_eq!(by_doc.map(|c| c.id), Some("c2".to_string()));
        assert_eq!(store.find_all().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_disk_store_delete() {
        let dir = tempdir().unwrap();
        let store = DiskCustomerStore::open(dir.path()).unwrap();

        store.save(&customer("c1", "1001")).await.unwrap();
        assert!(store.delete("c1").await.unwrap());
        assert!(!store.delete("c1").await.unwrap());
        assert!(store.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_disk_store_survives_reopen() {
        let dir = tempdir().unwrap();
        {
            let store = DiskCustomerStore::open(dir.path()).unwrap();
            store.save(&customer("c1", "1001")).await.unwrap();
        }

        let reopened = DiskCustomerStore::open(dir.path()).unwrap();
        let found = reopened.find_by_id("c1").await.unwrap();
        assert_eq!(found.map(|c| c.document_number), Some("1001".to_string()));
    }
}
