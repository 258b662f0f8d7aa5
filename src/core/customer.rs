//! Customer persistence abstraction and the CRUD rules applied on top of it.

use crate::core::error::{ServiceError, ServiceResult};
use crate::core::model::{CustomerDraft, CustomerRecord};
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::info;

#[async_trait]
pub trait CustomerStore: Send + Sync {
    async fn find_by_id(&self, id: &str) -> Result<Option<CustomerRecord>>;

    async fn find_by_document_number(&self, document_number: &str)
    -> Result<Option<CustomerRecord>>;

    async fn find_all(&self) -> Result<Vec<CustomerRecord>>;

    /// Inserts or replaces the record with the same id.
    async fn save(&self, customer: &CustomerRecord) -> Result<()>;

    /// Returns whether a record was removed.
    async fn delete(&self, id: &str) -> Result<bool>;
}

const DOCUMENT_TYPES: [&str; 3] = ["DNI", "CEX", "PASSPORT"];

fn check_length(errors: &mut Vec<String>, field: &str, value: &str, min: usize, max: usize) {
    let len = value.chars().count();
    if len < min || len > max {
        errors.push(format!("{field} must be between {min} and {max} characters"));
    }
}

fn is_valid_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    }
}

/// Checks a draft against the customer field constraints, collecting every violation.
pub fn validate(draft: &CustomerDraft) -> ServiceResult<()> {
    let mut errors = Vec::new();

    if !DOCUMENT_TYPES.contains(&draft.document_type.as_str()) {
        errors.push("documentType must be DNI, CEX or PASSPORT".to_string());
    }
    if draft.document_number.trim().is_empty() {
        errors.push("documentNumber is required".to_string());
    } else {
        check_length(&mut errors, "documentNumber", &draft.document_number, 3, 20);
    }
    if draft.first_name.trim().is_empty() {
        errors.push("firstName is required".to_string());
    } else {
        check_length(&mut errors, "firstName", &draft.first_name, 2, 50);
    }
    if let Some(last_name) = &draft.last_name {
        check_length(&mut errors, "lastName", last_name, 2, 50);
    }
    if let Some(email) = &draft.email {
        if !is_valid_email(email) {
            errors.push("email must be valid".to_string());
        }
        if email.chars().count() > 100 {
            errors.push("email must not exceed 100 characters".to_string());
        }
    }
    if let Some(phone) = &draft.phone {
        check_length(&mut errors, "phone", phone, 7, 15);
        if !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' ' | '(' | ')'))
        {
            errors.push(
                "phone must contain only numbers, spaces, and valid characters".to_string(),
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ServiceError::Validation(errors))
    }
}

/// CRUD operations over a [`CustomerStore`].
///
/// Writes go through `writes`, so the document-number check and the save of a
/// create or update cannot interleave with another write.
#[derive(Clone)]
pub struct CustomerService {
    store: Arc<dyn CustomerStore>,
    writes: Arc<Mutex<()>>,
}

impl CustomerService {
    pub fn new(store: Arc<dyn CustomerStore>) -> Self {
        Self {
            store,
            writes: Arc::new(Mutex::new(())),
        }
    }

    pub async fn find_all(&self) -> ServiceResult<Vec<CustomerRecord>> {
        let customers = self.store.find_all().await?;
        info!(count = customers.len(), "Retrieved all customers");
        Ok(customers)
    }

    pub async fn find_by_id(&self, id: &str) -> ServiceResult<CustomerRecord> {
        self.store
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::customer_not_found(id))
    }

    pub async fn find_by_document_number(
        &self,
        document_number: &str,
    ) -> ServiceResult<CustomerRecord> {
        self.store
            .find_by_document_number(document_number)
            .await?
            .ok_or_else(|| {
                ServiceError::NotFound(format!(
                    "Customer not found with document number: {document_number}"
                ))
            })
    }

    pub async fn create(
        &self,
        draft: CustomerDraft,
        now: DateTime<Utc>,
    ) -> ServiceResult<CustomerRecord> {
        validate(&draft)?;
        let _write = self.writes.lock().await;
        if self
            .store
            .find_by_document_number(&draft.document_number)
            .await?
            .is_some()
        {
            return Err(ServiceError::Conflict(format!(
                "Customer with document number {} already exists",
                draft.document_number
            )));
        }

        let customer = draft.into_record(uuid::Uuid::new_v4().to_string(), Some(now));
        self.store.save(&customer).await?;
        info!(id = %customer.id, "Customer created");
        Ok(customer)
    }

    pub async fn update(&self, id: &str, draft: CustomerDraft) -> ServiceResult<CustomerRecord> {
        validate(&draft)?;
        let _write = self.writes.lock().await;
        let existing = self.find_by_id(id).await?;

        if let Some(other) = self
            .store
            .find_by_document_number(&draft.document_number)
            .await?
        {
            if other.id != existing.id {
                return Err(ServiceError::Conflict(format!(
                    "Customer with document number {} already exists",
                    draft.document_number
                )));
            }
        }

        let customer = draft.into_record(existing.id, existing.created_at);
        self.store.save(&customer).await?;
        info!(id, "Customer updated");
        Ok(customer)
    }

    pub async fn delete(&self, id: &str) -> ServiceResult<()> {
        let _write = self.writes.lock().await;
        if !self.store.delete(id).await? {
            return Err(ServiceError::customer_not_found(id));
        }
        info!(id, "Customer deleted");
        Ok(())
    }
}
