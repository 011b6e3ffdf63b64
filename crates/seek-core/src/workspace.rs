//! Workspace snapshots — the external data source a [`SearchIndex`] is built
//! from.
//!
//! A snapshot is a JSON document listing repository locations, the
//! repositories each location serves, and the pipelines, schedules, sensors
//! and partition sets defined in each repository. Ad-hoc entries that do not
//! fit that shape can be listed under `items`.
//!
//! ```json
//! {
//!   "locations": [{
//!     "name": "data-platform",
//!     "repositories": [{
//!       "name": "etl",
//!       "pipelines": ["ingest_events"],
//!       "schedules": ["ingest_events_hourly"],
//!       "sensors": ["s3_landing_sensor"],
//!       "partition_sets": ["ingest_events_partitions"]
//!     }]
//!   }],
//!   "items": [{ "label": "Runs", "path": "/runs", "category": "other" }]
//! }
//! ```
//!
//! Every entity gets a route of the form
//! `/workspace/<repository>@<location>/<kind>/<name>`; repositories
//! themselves route to `/workspace/<repository>@<location>`.

use crate::index::SearchIndex;
use crate::types::{ItemCategory, SearchableItem};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum WorkspaceError {
    #[error("failed to read workspace snapshot {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid workspace snapshot {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WorkspaceSnapshot {
    #[serde(default)]
    pub locations: Vec<LocationSnapshot>,
    #[serde(default)]
    pub items: Vec<SearchableItem>,
}

/// A repository location: a code server hosting one or more repositories.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LocationSnapshot {
    pub name: String,
    #[serde(default)]
    pub repositories: Vec<RepositorySnapshot>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RepositorySnapshot {
    pub name: String,
    #[serde(default)]
    pub pipelines: Vec<String>,
    #[serde(default)]
    pub schedules: Vec<String>,
    #[serde(default)]
    pub sensors: Vec<String>,
    #[serde(default)]
    pub partition_sets: Vec<String>,
}

impl WorkspaceSnapshot {
    pub fn load(path: &Path) -> Result<Self, WorkspaceError> {
        let raw = std::fs::read_to_string(path).map_err(|source| WorkspaceError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw).map_err(|source| WorkspaceError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Flatten the snapshot into searchable items, repositories first, then
    /// each repository's entities by kind.
    pub fn items(&self) -> Vec<SearchableItem> {
        let mut items = Vec::new();
        for location in &self.locations {
            for repo in &location.repositories {
                let context = format!("{}@{}", repo.name, location.name);
                let base = format!("/workspace/{context}");

                items.push(
                    SearchableItem::new(&repo.name, &base, ItemCategory::Repository)
                        .with_context(&location.name),
                );

                let kinds = [
                    (&repo.pipelines, "pipelines", ItemCategory::Pipeline),
                    (&repo.schedules, "schedules", ItemCategory::Schedule),
                    (&repo.sensors, "sensors", ItemCategory::Sensor),
                    (&repo.partition_sets, "partition-sets", ItemCategory::PartitionSet),
                ];
                for (names, segment, category) in kinds {
                    items.extend(names.iter().map(|name| {
                        SearchableItem::new(name, format!("{base}/{segment}/{name}"), category)
                            .with_context(&context)
                    }));
                }
            }
        }
        items.extend(self.items.iter().cloned());
        items
    }

    pub fn into_index(self) -> SearchIndex {
        SearchIndex::new(self.items())
    }

    /// Built-in sample workspace used when no snapshot file is configured.
    pub fn demo() -> Self {
        fn names(list: &[&str]) -> Vec<String> {
            list.iter().map(|s| s.to_string()).collect()
        }

        Self {
            locations: vec![
                LocationSnapshot {
                    name: "data-platform".to_string(),
                    repositories: vec![
                        RepositorySnapshot {
                            name: "etl".to_string(),
                            pipelines: names(&[
                                "ingest_events",
                                "ingest_users",
                                "compute_daily_rollups",
                                "export_to_warehouse",
                            ]),
                            schedules: names(&[
                                "ingest_events_hourly",
                                "daily_rollups_schedule",
                            ]),
                            sensors: names(&["s3_landing_sensor", "warehouse_freshness_sensor"]),
                            partition_sets: names(&["ingest_events_partitions"]),
                        },
                        RepositorySnapshot {
                            name: "ml".to_string(),
                            pipelines: names(&["train_ranking_model", "score_candidates"]),
                            schedules: names(&["weekly_retrain"]),
                            sensors: names(&["feature_drift_sensor"]),
                            partition_sets: vec![],
                        },
                    ],
                },
                LocationSnapshot {
                    name: "reporting".to_string(),
                    repositories: vec![RepositorySnapshot {
                        name: "dashboards".to_string(),
                        pipelines: names(&["refresh_finance_dashboard", "refresh_growth_dashboard"]),
                        schedules: names(&["finance_dashboard_morning"]),
                        sensors: vec![],
                        partition_sets: names(&["finance_dashboard_backfill"]),
                    }],
                },
            ],
            items: vec![
                SearchableItem::new("Runs", "/runs", ItemCategory::Other),
                SearchableItem::new("Queued runs", "/runs/queued", ItemCategory::Other),
                SearchableItem::new("Instance status", "/instance", ItemCategory::Other),
            ],
        }
    }
}
