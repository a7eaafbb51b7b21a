//! Snapshot export: the current frame's view models as JSON.
//!
//! Renderers consume the same view models live; the export writes them to
//! disk so a state of the dashboard can be archived or diffed.

use std::fs;
use std::path::{Path, PathBuf};

use accviz_core::dashboard::RenderFrame;
use accviz_core::filter::FilterState;
use anyhow::Context as _;
use serde::Serialize;
use tracing::info;

use crate::map::MapViewModel;
use crate::proportion::ProportionViewModel;
use crate::timeline::TimelineViewModel;
use crate::trend::TrendViewModel;

/// Every view model of one render cycle plus the filter that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot {
    /// Local time the snapshot was taken, RFC 3339.
    pub exported_at: String,

    pub filter: FilterState,
    pub map: MapViewModel,
    pub trend: TrendViewModel,
    pub proportion: ProportionViewModel,
    pub timeline: TimelineViewModel,
}

impl DashboardSnapshot {
    pub fn from_frame(frame: &RenderFrame<'_>) -> Self {
        Self {
            exported_at: chrono::Local::now().to_rfc3339(),
            filter: frame.filter.clone(),
            map: MapViewModel::from_frame(frame),
            trend: TrendViewModel::from_frame(frame),
            proportion: ProportionViewModel::from_frame(frame),
            timeline: TimelineViewModel::from_frame(frame),
        }
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("serializing snapshot")
    }

    /// Write the snapshot into `dir` under a timestamped name and return
    /// the full path.
    pub fn write_to(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let name = format!(
            "snapshot_{}.json",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = dir.join(name);
        fs::write(&path, self.to_json()?)
            .with_context(|| format!("writing snapshot to {}", path.display()))?;
        info!("exported snapshot to {}", path.display());
        Ok(path)
    }
}
