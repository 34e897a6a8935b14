//! Resource catalog loading.
//!
//! The catalog is read once at startup and never reloaded or mutated;
//! configuration changes require a service restart. A missing catalog file is
//! not an error (the embedded default catalog is used); a present-but-invalid
//! file fails startup.

use std::collections::HashSet;
use std::path::Path;

use crate::authz::errors::CatalogError;
use crate::authz::types::{Resource, Sensitivity};

/// The catalog served when no catalog file is configured on disk.
pub fn default_catalog() -> Vec<Resource> {
    vec![
        Resource {
            id: 1,
            name: "Q4 Report.pdf".to_string(),
            sensitivity: Sensitivity::Public,
        },
        Resource {
            id: 2,
            name: "Employee Handbook.pdf".to_string(),
            sensitivity: Sensitivity::Public,
        },
        Resource {
            id: 3,
            name: "Salary Data.xlsx".to_string(),
            sensitivity: Sensitivity::Confidential,
        },
        Resource {
            id: 4,
            name: "Strategic Plan.docx".to_string(),
            sensitivity: Sensitivity::Confidential,
        },
    ]
}

/// Load the resource catalog from `path`, falling back to the embedded
/// default when the file does not exist.
pub fn load(path: &Path) -> Result<Vec<Resource>, CatalogError> {
    let catalog = if path.exists() {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&contents).map_err(|source| CatalogError::Parse {
            path: path.display().to_string(),
            source,
        })?
    } else {
        tracing::info!(path = %path.display(), "No catalog file found, using embedded default catalog");
        default_catalog()
    };

    validate(&catalog)?;

    let public = catalog
        .iter()
        .filter(|r| r.sensitivity == Sensitivity::Public)
        .count();
    tracing::info!(
        resources = catalog.len(),
        public,
        confidential = catalog.len() - public,
        "Loaded resource catalog"
    );

    Ok(catalog)
}

fn validate(catalog: &[Resource]) -> Result<(), CatalogError> {
    let mut seen = HashSet::new();
    for resource in catalog {
        if !seen.insert(resource.id) {
            return Err(CatalogError::DuplicateId { id: resource.id });
        }
    }
    Ok(())
}
