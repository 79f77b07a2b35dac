//! DTOs for the health endpoint.

use serde::Serialize;

/// `GET /health` body.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub store: StoreHealth,
}

/// Reachability of the short link store.
#[derive(Debug, Serialize)]
pub struct StoreHealth {
    pub reachable: bool,
    pub message: &'static str,
}

impl HealthResponse {
    pub fn from_store_check(reachable: bool) -> Self {
        let store = if reachable {
            StoreHealth {
                reachable,
                message: "Store reachable",
            }
        } else {
            StoreHealth {
                reachable,
                message: "Store unreachable",
            }
        };

        Self {
            status: if reachable { "healthy" } else { "degraded" },
            version: env!("CARGO_PKG_VERSION"),
            store,
        }
    }
}
