//! Console renderers: one subscriber per view, printing a compact summary
//! of its view model every cycle.

use std::io::{self, Write};

use accviz_core::dashboard::{RenderFrame, ViewSubscriber};
use accviz_views::{
    DashboardSnapshot, MapViewModel, ProportionViewModel, TimelineViewModel, TrendViewModel,
};
use anyhow::Result;
use parking_lot::RwLock;

/// Choropleth stand-in: the five busiest cantons with their rates.
pub struct ConsoleMapView;

impl ViewSubscriber for ConsoleMapView {
    fn label(&self) -> &str {
        "map"
    }

    fn on_frame(&self, frame: &RenderFrame<'_>) -> Result<()> {
        let model = MapViewModel::from_frame(frame);
        let mut out = io::stdout().lock();

        let mut busiest: Vec<_> = model.cantons.iter().filter(|c| c.total > 0).collect();
        busiest.sort_by(|a, b| b.total.cmp(&a.total));
        if busiest.is_empty() {
            writeln!(out, "[map] no data in selection")?;
            return Ok(());
        }

        let cells: Vec<String> = busiest
            .iter()
            .take(5)
            .map(|c| match c.rate {
                Some(rate) => format!("{} {} ({:.2}/1000)", c.canton, c.total, rate),
                None => format!("{} {}", c.canton, c.total),
            })
            .collect();
        let selection = match model.selected {
            Some(canton) => format!("  [selected: {}]", canton.name()),
            None => String::new(),
        };
        writeln!(out, "[map] {}{}", cells.join(" | "), selection)?;
        Ok(())
    }
}

/// Activity ranking as a horizontal bar list.
pub struct ConsoleTrendView;

impl ViewSubscriber for ConsoleTrendView {
    fn label(&self) -> &str {
        "activities"
    }

    fn on_frame(&self, frame: &RenderFrame<'_>) -> Result<()> {
        let model = TrendViewModel::from_frame(frame);
        let mut out = io::stdout().lock();

        if model.bars.is_empty() {
            writeln!(out, "[activities] no data in selection")?;
            return Ok(());
        }

        let max = model.bars[0].total.max(1);
        for (rank, bar) in model.bars.iter().enumerate() {
            let width = (bar.total * 30 / max) as usize;
            let marker = if bar.highlighted { '*' } else { ' ' };
            writeln!(
                out,
                "[activities] {:2}.{} {:<32} {:>8} {}",
                rank + 1,
                marker,
                bar.activity,
                bar.total,
                "#".repeat(width)
            )?;
        }
        Ok(())
    }
}

/// Gender shares on a single line.
pub struct ConsoleProportionView;

impl ViewSubscriber for ConsoleProportionView {
    fn label(&self) -> &str {
        "genders"
    }

    fn on_frame(&self, frame: &RenderFrame<'_>) -> Result<()> {
        let model = ProportionViewModel::from_frame(frame);
        let mut out = io::stdout().lock();

        if model.slices.is_empty() {
            writeln!(out, "[genders] no data in selection")?;
            return Ok(());
        }

        let cells: Vec<String> = model
            .slices
            .iter()
            .map(|s| {
                let marker = if s.highlighted { "*" } else { "" };
                format!("{}{} {:.1}% ({})", marker, s.gender, s.share * 100.0, s.total)
            })
            .collect();
        writeln!(out, "[genders] {}", cells.join(" | "))?;
        Ok(())
    }
}

/// Yearly totals with the brushed window in brackets.
pub struct ConsoleTimelineView;

impl ViewSubscriber for ConsoleTimelineView {
    fn label(&self) -> &str {
        "timeline"
    }

    fn on_frame(&self, frame: &RenderFrame<'_>) -> Result<()> {
        let model = TimelineViewModel::from_frame(frame);
        let mut out = io::stdout().lock();

        if model.points.is_empty() {
            writeln!(out, "[timeline] no data in selection")?;
            return Ok(());
        }

        let mut cells = Vec::with_capacity(model.points.len());
        for point in &model.points {
            let cell = format!("{}:{}", point.year, point.total);
            if point.in_window {
                cells.push(format!("[{cell}]"));
            } else {
                cells.push(cell);
            }
        }
        writeln!(out, "[timeline] {}", cells.join(" "))?;
        Ok(())
    }
}

/// Keeps the latest snapshot so the export command has something to write.
#[derive(Default)]
pub struct SnapshotView {
    latest: RwLock<Option<DashboardSnapshot>>,
}

impl SnapshotView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn latest(&self) -> Option<DashboardSnapshot> {
        self.latest.read().clone()
    }
}

impl ViewSubscriber for SnapshotView {
    fn label(&self) -> &str {
        "snapshot"
    }

    fn on_frame(&self, frame: &RenderFrame<'_>) -> Result<()> {
        *self.latest.write() = Some(DashboardSnapshot::from_frame(frame));
        Ok(())
    }
}
