//! Session configuration
//!
//! A browsing session is described by a YAML file naming the store endpoint,
//! the collection, its ordering and tag fields, the page size, and the export
//! projection:
//!
//! ```yaml
//! store:
//!   base_url: https://store.example.com
//!   headers:
//!     Authorization: Bearer ${TOKEN}
//! collection: members
//! id_field: docId
//! order_field: id
//! direction: asc
//! tags_field: keywords
//! page_size: 10
//! export:
//!   columns: [id, docId, name, age, address, createdAt]
//!   timestamp_field: createdAt
//! ```

use crate::error::{Error, Result};
use crate::export::ExportSpec;
use crate::pager::PagerConfig;
use crate::query::SortOrder;
use crate::types::{SortDirection, StringMap};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ============================================================================
// Store Config
// ============================================================================

/// Remote store endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the document store
    pub base_url: String,
    /// Headers added to every request (e.g. an Authorization header)
    #[serde(default)]
    pub headers: StringMap,
}

// ============================================================================
// Session Config
// ============================================================================

/// Everything one browsing session needs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    /// Remote store endpoint
    pub store: StoreConfig,

    /// Collection to browse
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Field holding the stable identifier
    #[serde(default = "default_id_field")]
    pub id_field: String,

    /// Ordering field; must be effectively unique for stable paging
    #[serde(default = "default_order_field")]
    pub order_field: String,

    /// Sort direction
    #[serde(default)]
    pub direction: SortDirection,

    /// Field holding the searchable tag array
    #[serde(default = "default_tags_field")]
    pub tags_field: String,

    /// Records per page
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Export projection
    #[serde(default = "default_export")]
    pub export: ExportSpec,
}

fn default_collection() -> String {
    "members".to_string()
}

fn default_id_field() -> String {
    "docId".to_string()
}

fn default_order_field() -> String {
    "id".to_string()
}

fn default_tags_field() -> String {
    "keywords".to_string()
}

fn default_page_size() -> u32 {
    10
}

fn default_export() -> ExportSpec {
    ExportSpec::new(vec![
        "id".to_string(),
        "docId".to_string(),
        "name".to_string(),
        "age".to_string(),
        "address".to_string(),
        "createdAt".to_string(),
    ])
    .with_timestamp_field("createdAt")
}

impl SessionConfig {
    /// Load and validate a session config from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|e| {
            Error::config(format!("failed to read {}: {e}", path.display()))
        })?;
        Self::from_str(&contents)
    }

    /// Parse and validate a session config from YAML text
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(contents: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate field values
    pub fn validate(&self) -> Result<()> {
        if self.store.base_url.is_empty() {
            return Err(Error::missing_field("store.base_url"));
        }
        url::Url::parse(&self.store.base_url)?;

        if self.collection.is_empty() {
            return Err(Error::missing_field("collection"));
        }
        if self.id_field.is_empty() {
            return Err(Error::missing_field("id_field"));
        }
        if self.order_field.is_empty() {
            return Err(Error::missing_field("order_field"));
        }
        if self.tags_field.is_empty() {
            return Err(Error::missing_field("tags_field"));
        }
        if self.page_size == 0 {
            return Err(Error::invalid_value("page_size", "must be positive"));
        }
        if self.export.columns().is_empty() {
            return Err(Error::invalid_value("export.columns", "must not be empty"));
        }
        Ok(())
    }

    /// Sort order of the session
    pub fn order(&self) -> SortOrder {
        SortOrder::new(&self.order_field, self.direction)
    }

    /// Pager configuration derived from this session
    pub fn pager_config(&self) -> Result<PagerConfig> {
        PagerConfig::new(&self.collection, self.order(), self.page_size)
    }

    /// Exporter configuration derived from this session
    pub fn exporter(&self) -> crate::export::Exporter {
        crate::export::Exporter::new(&self.collection, self.order(), self.export.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const MINIMAL: &str = "store:\n  base_url: https://store.example.com\n";

    #[test]
    fn test_minimal_config_gets_defaults() {
        let config = SessionConfig::from_str(MINIMAL).unwrap();
        assert_eq!(config.collection, "members");
        assert_eq!(config.id_field, "docId");
        assert_eq!(config.order_field, "id");
        assert_eq!(config.direction, SortDirection::Asc);
        assert_eq!(config.tags_field, "keywords");
        assert_eq!(config.page_size, 10);
        assert_eq!(config.export.columns().len(), 6);
        assert_eq!(config.export.timestamp_field.as_deref(), Some("createdAt"));
    }

    #[test]
    fn test_full_config_round_trip() {
        let yaml = r"
store:
  base_url: https://store.example.com
  headers:
    Authorization: Bearer token
collection: orders
id_field: orderId
order_field: placedAt
direction: desc
tags_field: labels
page_size: 25
export:
  columns: [orderId, placedAt]
  timestamp_field: placedAt
  timestamp_format: '%Y-%m-%d'
";
        let config = SessionConfig::from_str(yaml).unwrap();
        assert_eq!(config.collection, "orders");
        assert_eq!(config.direction, SortDirection::Desc);
        assert_eq!(config.page_size, 25);
        assert_eq!(
            config.store.headers.get("Authorization"),
            Some(&"Bearer token".to_string())
        );
        assert_eq!(config.order().field, "placedAt");
        assert_eq!(config.export.timestamp_format, "%Y-%m-%d");
    }

    #[test]
    fn test_missing_base_url_rejected() {
        let err = SessionConfig::from_str("store:\n  base_url: ''\n").unwrap_err();
        assert!(matches!(err, Error::MissingConfigField { .. }));
    }

    #[test]
    fn test_malformed_base_url_rejected() {
        let err = SessionConfig::from_str("store:\n  base_url: not-a-url\n").unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let yaml = format!("{MINIMAL}page_size: 0\n");
        let err = SessionConfig::from_str(&yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_empty_export_columns_rejected() {
        let yaml = format!("{MINIMAL}export:\n  columns: []\n");
        let err = SessionConfig::from_str(&yaml).unwrap_err();
        assert!(matches!(err, Error::InvalidConfigValue { .. }));
    }

    #[test]
    fn test_pager_config_derivation() {
        let config = SessionConfig::from_str(MINIMAL).unwrap();
        let pager_config = config.pager_config().unwrap();
        assert_eq!(pager_config.collection, "members");
        assert_eq!(pager_config.page_size(), 10);
        assert_eq!(pager_config.order.field, "id");
    }
}
