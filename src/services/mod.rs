//! Contracts of the hosted identity and data service.
//!
//! Both are consumed through narrow traits; the service itself is external.

pub mod auth;
pub mod tenders;

pub use auth::{AuthClient, AuthError, GuardedAuth, ProfileFields, Session, validate_email_domain};
pub use tenders::{
	DataClient, FilterField, InMemoryTenders, QueryError, Tender, TenderFilters, TenderQuery,
};
