//! Vehicle records and the repository seam.
//!
//! The hosted table service that stores the catalog is reached through a
//! [`VehicleRepository`] built by the host and handed to whatever fetches the
//! vehicle list. Nothing in this crate holds a global client handle.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Result, ShowroomError};

/// A vehicle row as exported by the catalog table.
///
/// Only `display_name` is inspected by the classifier; the rest is carried
/// through untouched for menu rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleRecord {
    pub id: String,
    #[serde(default, alias = "displayName", alias = "name")]
    pub display_name: Option<String>,
    #[serde(default, alias = "priceCents")]
    pub price_cents: Option<u64>,
    #[serde(default, alias = "thumbnailUrl")]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub slug: Option<String>,
}

impl VehicleRecord {
    pub fn new(id: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            display_name: Some(display_name.into()),
            price_cents: None,
            thumbnail_url: None,
            slug: None,
        }
    }

    /// Name used for keyword matching: trimmed and lowercased.
    /// `None` when the name is missing or blank.
    pub fn normalized_name(&self) -> Option<String> {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(str::to_lowercase)
    }

    /// Display label, falling back to the id for malformed rows.
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(&self.id)
    }
}

/// Optional narrowing of a catalog listing.
#[derive(Debug, Clone, Default)]
pub struct VehicleFilter {
    pub name_contains: Option<String>,
    pub max_price_cents: Option<u64>,
    pub limit: Option<usize>,
}

impl VehicleFilter {
    pub fn matches(&self, vehicle: &VehicleRecord) -> bool {
        if let Some(needle) = &self.name_contains {
            let needle = needle.trim().to_lowercase();
            match vehicle.normalized_name() {
                Some(name) if name.contains(&needle) => {}
                _ => return false,
            }
        }
        if let Some(max) = self.max_price_cents {
            // Rows without a price are kept; the table marks "consult" offers that way.
            if vehicle.price_cents.is_some_and(|price| price > max) {
                return false;
            }
        }
        true
    }

    /// Filters and truncates while keeping catalog order.
    pub fn apply(&self, vehicles: impl IntoIterator<Item = VehicleRecord>) -> Vec<VehicleRecord> {
        let matched = vehicles.into_iter().filter(|v| self.matches(v));
        match self.limit {
            Some(limit) => matched.take(limit).collect(),
            None => matched.collect(),
        }
    }
}

/// Read access to the current catalog.
pub trait VehicleRepository {
    /// Current catalog snapshot. Partial or empty results are valid.
    fn list_vehicles(&self, filter: &VehicleFilter) -> Result<Vec<VehicleRecord>>;
}

/// Repository over records already in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRepository {
    vehicles: Vec<VehicleRecord>,
}

impl InMemoryRepository {
    pub fn new(vehicles: Vec<VehicleRecord>) -> Self {
        Self { vehicles }
    }
}

impl VehicleRepository for InMemoryRepository {
    fn list_vehicles(&self, filter: &VehicleFilter) -> Result<Vec<VehicleRecord>> {
        Ok(filter.apply(self.vehicles.iter().cloned()))
    }
}

/// Repository reading a JSON array exported from the hosted table service.
#[derive(Debug, Clone)]
pub struct JsonCatalog {
    path: PathBuf,
}

impl JsonCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl VehicleRepository for JsonCatalog {
    fn list_vehicles(&self, filter: &VehicleFilter) -> Result<Vec<VehicleRecord>> {
        if !self.path.exists() {
            return Err(ShowroomError::CatalogNotFound {
                path: self.path.clone(),
            });
        }

        let content = fs::read_to_string(&self.path)?;
        let vehicles: Vec<VehicleRecord> =
            serde_json::from_str(&content).map_err(|e| ShowroomError::ConfigParse {
                path: self.path.clone(),
                message: e.to_string(),
            })?;

        tracing::debug!(
            path = %self.path.display(),
            count = vehicles.len(),
            "loaded vehicle catalog"
        );
        Ok(filter.apply(vehicles))
    }
}

/// Vehicle list plus the time it was fetched.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogSnapshot {
    pub vehicles: Vec<VehicleRecord>,
    pub fetched_at: DateTime<Utc>,
}

/// Fetches once from the injected repository.
pub fn fetch_snapshot<R: VehicleRepository + ?Sized>(
    repository: &R,
    filter: &VehicleFilter,
) -> Result<CatalogSnapshot> {
    let vehicles = repository.list_vehicles(filter)?;
    Ok(CatalogSnapshot {
        vehicles,
        fetched_at: Utc::now(),
    })
}
