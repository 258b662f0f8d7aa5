use crate::core::customer::CustomerStore;
use crate::core::model::CustomerRecord;
use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory customer store using a HashMap behind a Mutex
#[derive(Clone)]
pub struct MemoryCustomerStore {
    inner: Arc<Mutex<HashMap<String, CustomerRecord>>>,
}

impl MemoryCustomerStore {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Creates a store pre-populated with `customers`.
    pub fn with_customers(customers: impl IntoIterator<Item = CustomerRecord>) -> Self {
        let records = customers.into_iter().map(|c| (c.id.clone(), c)).collect();
        Self {
            inner: Arc::new(Mutex::new(records)),
        }
    }
}

impl Default for MemoryCustomerStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CustomerStore for MemoryCustomerStore {
    async fn find_by_id(&self, id: &str) -> Result<Option<CustomerRecord>> {
        let customers = self.inner.lock().await;
        let found = customers.get(id).cloned();
        debug!(id, found = found.is_some(), "Customer lookup");
        Ok(found)
    }

    async fn find_by_document_number(
        &self,
        document_number: &str,
    ) -> Result<Option<CustomerRecord>> {
        let customers = self.inner.lock().await;
        Ok(customers
            .values()
            .find(|c| c.document_number == document_number)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<CustomerRecord>> {
        let customers = self.inner.lock().await;
        let mut all: Vec<CustomerRecord> = customers.values().cloned().collect();
        all.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn save(&self, customer: &CustomerRecord) -> Result<()> {
        let mut customers = self.inner.lock().await;
        debug!(id = %customer.id, "Customer SAVE");
        customers.insert(customer.id.clone(), customer.clone());
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<bool> {
        let mut customers = self.inner.lock().await;
        debug!(id, "Customer DELETE");
        Ok(customers.remove(id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::CustomerType;
    use chrono::{TimeZone, Utc};

    fn customer(id: &str, document_number: &str, day: u32) -> CustomerRecord {
        CustomerRecord {
            id: id.to_string(),
            document_type: "DNI".to_string(),
            document_number: document_number.to_string(),
            first_name: "Rosa".to_string(),
            last_name: None,
            email: None,
            phone: None,
            customer_type: CustomerType::Personal,
            created_at: Utc.with_ymd_and_hms(2025, 1, day, 0, 0, 0).single(),
        }
    }

    #[tokio::test]
    async fn test_save_and_find() {
        let store = MemoryCustomerStore::new();

        // Initially, store is empty
        assert!(store.find_by_id("c1").await.unwrap().is_none());

        store.save(&customer("c1", "1001", 1)).await.unwrap();

        let found = store.find_by_id("c1").await.unwrap().unwrap();
        assert_eq!(found.document_number, "1001");
        let by_doc = store.find_by_document_number("1001").await.unwrap();
        assert_eq!(by_doc.map(|c| c.id), Some("c1".to_string()));
        assert!(store.find_by_document_number("9999").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_find_all_is_ordered_by_creation() {
        let store = MemoryCustomerStore::with_customers(vec![
            customer("c3", "3003", 3),
            customer("c1", "1001", 1),
            customer("c2", "2002", 2),
        ]);

        let ids: Vec<String> = store
            .find_all()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec!["c1", "c2", "c3"]);
    }

    #[tokio::test]
    async fn test_delete() {
        let store = MemoryCustomerStore::with_customers(vec![customer("c1", "1001", 1)]);

        assert!(store.delete("c1").await.unwrap());
        assert!(!store.delete("c1").await.unwrap());
        assert!(store.find_all().await.unwrap().is_empty());
    }
}
