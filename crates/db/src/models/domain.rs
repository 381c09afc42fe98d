//! Practice domain model and DTOs.

use placement_core::pivot::DomainInfo;
use placement_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `domains` table. Domains are the pivot rows; core
/// domains and additional domains are charted separately.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Domain {
    pub id: DbId,
    pub name: String,
    pub is_core: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new domain.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDomain {
    pub name: String,
    /// Defaults to `false` if omitted.
    pub is_core: Option<bool>,
}

impl From<&Domain> for DomainInfo {
    fn from(domain: &Domain) -> Self {
        Self {
            id: domain.id,
            name: domain.name.clone(),
            is_core: domain.is_core,
        }
    }
}
