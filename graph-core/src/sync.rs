use std::collections::BTreeMap;

use crate::geometry::PlotGeometry;
use crate::table::{DataTable, TableEvent, TableSubscriber};

/// Keeps a row-indexed point cache consistent with a [`DataTable`] and
/// rebuilds the plot geometry once per notification.
///
/// The cache is only touched from notifications, so between them its key
/// set always equals the table's row-index set.
#[derive(Default)]
pub struct PlotSync {
    cache: BTreeMap<usize, [f64; 2]>,
    geometry: Option<PlotGeometry>,
    rebuilds: u64,
}

impl PlotSync {
    pub fn new() -> Self {
        Self::default()
    }

    /// The scene produced by the last rebuild; `None` while the cache is
    /// empty.
    pub fn geometry(&self) -> Option<&PlotGeometry> {
        self.geometry.as_ref()
    }

    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    pub fn point_count(&self) -> usize {
        self.cache.len()
    }

    fn upsert_range(&mut self, table: &DataTable, first: usize, last: usize) {
        for row in first..=last {
            match (table.value(row, 0), table.value(row, 1)) {
                (Some(x), Some(y)) => {
                    self.cache.insert(row, [x, y]);
                }
                _ => log::error!("range change for row {} not backed by the table", row),
            }
        }
    }

    fn remove_range(&mut self, start: usize, end: usize) {
        for row in start..=end {
            self.cache.remove(&row);
        }
        // Close the index gap so the keys keep matching the table's rows.
        let removed = end - start + 1;
        let trailing = self.cache.split_off(&(end + 1));
        for (row, point) in trailing {
            self.cache.insert(row - removed, point);
        }
    }

    fn shift_for_insertion(&mut self, start: usize, end: usize) {
        // The new rows hold no points yet; a later RangeChanged fills
        // them in. Existing points below the insertion move down-table.
        let inserted = end - start + 1;
        let trailing = self.cache.split_off(&start);
        for (row, point) in trailing {
            self.cache.insert(row + inserted, point);
        }
    }

    fn rebuild(&mut self) {
        self.geometry = PlotGeometry::rebuild(&self.cache);
        self.rebuilds += 1;
        log::trace!(
            "geometry rebuild #{} from {} cached points",
            self.rebuilds,
            self.cache.len()
        );
    }
}

impl TableSubscriber for PlotSync {
    fn notify(&mut self, table: &DataTable, event: TableEvent) {
        match event {
            TableEvent::RangeChanged { first, last } => self.upsert_range(table, first, last),
            TableEvent::RowsAboutToBeRemoved { start, end } => self.remove_range(start, end),
            TableEvent::RowsInserted { start, end } => self.shift_for_insertion(start, end),
        }
        self.rebuild();
    }
}
