//! Core business logic abstractions

pub mod balance;
pub mod config;
pub mod customer;
pub mod error;
pub mod fanout;
pub mod log;
pub mod metrics;
pub mod model;
pub mod period;
pub mod report;
pub mod source;

// Re-export main types for cleaner imports
pub use customer::{CustomerService, CustomerStore};
pub use error::{ServiceError, ServiceResult};
pub use fanout::{FanOut, SourceData, SourceHealth};
pub use report::{RecordSources, ReportService};
pub use source::{AccountSource, CreditSource, TransactionSource};
