use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::KodokuError;
use crate::types::RouteId;

/// A maritime trade route: an ordered list of chokepoints a voyage must pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub id: RouteId,
    /// Display name shown on the dashboard. Free text, usually Japanese.
    pub name: String,
    /// In passage order. Order matters for critical-node tie-breaking.
    pub chokepoints: Vec<String>,
}

impl Route {
    pub fn new(id: &str, name: &str, chokepoints: &[&str]) -> Self {
        Route {
            id: RouteId::from(id),
            name: name.to_string(),
            chokepoints: chokepoints.iter().map(|c| c.to_string()).collect(),
        }
    }

    /// Chokepoints with repeats removed, first occurrence kept. A chokepoint
    /// listed twice is still one chokepoint with one risk.
    pub fn distinct_chokepoints(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.chokepoints
            .iter()
            .map(String::as_str)
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RouteCatalog {
    pub routes: Vec<Route>,
}

impl RouteCatalog {
    /// The six routes the dashboard is built around.
    pub fn canonical() -> Self {
        RouteCatalog {
            routes: vec![
                // ── Energy routes out of the Gulf ─────────────────────────────
                Route::new(
                    "middle_east_to_japan",
                    "エネルギー航路 (中東 - 日本)",
                    &["Strait of Hormuz", "Strait of Malacca", "Taiwan Strait"],
                ),
                Route::new(
                    "middle_east_to_europe",
                    "エネルギー航路 (中東 - 欧州)",
                    &["Strait of Hormuz", "Bab-el-Mandeb", "Suez Canal"],
                ),
                // ── Asia - Europe trade, primary and fallback ─────────────────
                Route::new(
                    "asia_to_europe_suez",
                    "主要貿易航路 (アジア - 欧州 / スエズ経由)",
                    &["Strait of Malacca", "Bab-el-Mandeb", "Suez Canal"],
                ),
                Route::new(
                    "asia_to_europe_cape",
                    "代替貿易航路 (アジア - 欧州 / 喜望峰回り)",
                    &["Strait of Malacca", "Cape of Good Hope"],
                ),
                // ── Other basins ──────────────────────────────────────────────
                Route::new(
                    "americas_to_asia",
                    "太平洋貿易航路 (米州 - アジア)",
                    &["Panama Canal", "Taiwan Strait"],
                ),
                Route::new(
                    "black_sea_to_mediterranean",
                    "黒海・地中海航路",
                    &["Turkish Straits", "Suez Canal"],
                ),
            ],
        }
    }

    /// Parse a catalog from a JSON array of routes and validate it.
    pub fn from_json_str(json: &str) -> Result<Self, KodokuError> {
        let catalog: RouteCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, KodokuError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| KodokuError::io(path, e))?;
        Self::from_json_str(&json)
    }

    /// Reject catalogs the report could not be built from: no routes, a
    /// repeated id, or a route without chokepoints.
    pub fn validate(&self) -> Result<(), KodokuError> {
        if self.routes.is_empty() {
            return Err(KodokuError::EmptyCatalog);
        }
        let mut seen = HashSet::new();
        for route in &self.routes {
            if !seen.insert(&route.id) {
                return Err(KodokuError::DuplicateRouteId { route_id: route.id.clone() });
            }
            if route.chokepoints.is_empty() {
                return Err(KodokuError::EmptyRoute { route_id: route.id.clone() });
            }
        }
        Ok(())
    }

    /// Distinct chokepoint names in first-seen order.
    pub fn chokepoints(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.routes
            .iter()
            .flat_map(|r| r.chokepoints.iter())
            .map(String::as_str)
            .filter(|c| seen.insert(*c))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonical_catalog_is_valid() {
        let catalog = RouteCatalog::canonical();
        assert_eq!(catalog.len(), 6);
        catalog.validate().expect("canonical catalog must validate");
    }

    #[test]
    fn canonical_route_order_is_fixed() {
        let catalog = RouteCatalog::canonical();
        let ids: Vec<&str> = catalog.routes.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "middle_east_to_japan",
                "middle_east_to_europe",
                "asia_to_europe_suez",
                "asia_to_europe_cape",
                "americas_to_asia",
                "black_sea_to_mediterranean",
            ]
        );
    }

    #[test]
    fn distinct_chokepoints_in_first_seen_order() {
        let catalog = RouteCatalog::canonical();
        assert_eq!(
            catalog.chokepoints(),
            vec![
                "Strait of Hormuz",
                "Strait of Malacca",
                "Taiwan Strait",
                "Bab-el-Mandeb",
                "Suez Canal",
                "Cape of Good Hope",
                "Panama Canal",
                "Turkish Straits",
            ]
        );
    }

    #[test]
    fn distinct_chokepoints_drop_repeats_in_route_order() {
        let route = Route::new("loop", "Loop", &["B", "A", "B", "C", "A"]);
        assert_eq!(route.distinct_chokepoints(), vec!["B", "A", "C"]);
    }

    #[test]
    fn json_catalog_parses() {
        let json = r#"[
            {"id": "a", "name": "Route A", "chokepoints": ["X", "Y"]},
            {"id": "b", "name": "Route B", "chokepoints": ["Y"]}
        ]"#;
        let catalog = RouteCatalog::from_json_str(json).unwrap();
        assert_eq!(catalog.routes[0], Route::new("a", "Route A", &["X", "Y"]));
        assert_eq!(catalog.routes[1].chokepoints, vec!["Y".to_string()]);
    }

    #[test]
    fn empty_route_is_rejected() {
        let json = r#"[{"id": "empty", "name": "Nowhere", "chokepoints": []}]"#;
        match RouteCatalog::from_json_str(json) {
            Err(KodokuError::EmptyRoute { route_id }) => assert_eq!(route_id.as_str(), "empty"),
            other => panic!("expected EmptyRoute, got {other:?}"),
        }
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let catalog = RouteCatalog {
            routes: vec![Route::new("a", "A", &["X"]), Route::new("a", "A again", &["Y"])],
        };
        assert!(matches!(
            catalog.validate(),
            Err(KodokuError::DuplicateRouteId { .. })
        ));
    }

    #[test]
    fn empty_catalog_is_rejected() {
        assert!(matches!(RouteCatalog::from_json_str("[]"), Err(KodokuError::EmptyCatalog)));
    }

    #[test]
    fn malformed_json_is_a_json_error() {
        assert!(matches!(
            RouteCatalog::from_json_str("{not json"),
            Err(KodokuError::Json(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = RouteCatalog::from_json_file("/nonexistent/catalog.json").unwrap_err();
        assert!(matches!(err, KodokuError::Io { .. }));
        assert!(err.to_string().contains("/nonexistent/catalog.json"));
    }
}
