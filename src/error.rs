use std::path::PathBuf;

use thiserror::Error;

use crate::types::RouteId;

#[derive(Debug, Error)]
pub enum KodokuError {
    /// A route with no chokepoints has no critical node and no survival rate.
    #[error("route {route_id} has no chokepoints")]
    EmptyRoute { route_id: RouteId },

    #[error("risks supplied for route {route_id} do not match its chokepoints")]
    RiskMismatch { route_id: RouteId },

    #[error("route id {route_id} appears more than once in the catalog")]
    DuplicateRouteId { route_id: RouteId },

    #[error("route catalog is empty")]
    EmptyCatalog,

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write report: {0}")]
    Sink(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl KodokuError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        KodokuError::Io { path: path.into(), source }
    }
}
