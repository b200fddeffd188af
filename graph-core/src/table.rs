use std::cell::RefCell;
use std::rc::Weak;

use derive_new::new;

/// A single data record. Rows carry no identity beyond their position in
/// the table; indices are reassigned when preceding rows come or go.
#[derive(new, Clone, Copy, Debug, Default, PartialEq)]
pub struct DataRow {
    pub x: f64,
    pub y: f64,
}

/// Change notifications fired by [`DataTable`] mutations.
///
/// All row ranges are inclusive. `RowsAboutToBeRemoved` is delivered while
/// the affected rows are still present; the other two are delivered after
/// the mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableEvent {
    RangeChanged { first: usize, last: usize },
    RowsAboutToBeRemoved { start: usize, end: usize },
    RowsInserted { start: usize, end: usize },
}

/// Capability implemented by anyone who wants to follow table changes.
/// Notifications arrive synchronously, on the mutating thread, in
/// mutation order.
pub trait TableSubscriber {
    fn notify(&mut self, table: &DataTable, event: TableEvent);
}

/// An ordered table of `(x, y)` records with two column labels.
///
/// Mutations go through the methods below so that subscribers are kept
/// informed; subscribers only ever read the table.
pub struct DataTable {
    rows: Vec<DataRow>,
    x_label: String,
    y_label: String,
    subscribers: Vec<Weak<RefCell<dyn TableSubscriber>>>,
}

impl DataTable {
    pub fn new(x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        Self {
            rows: Vec::new(),
            x_label: x_label.into(),
            y_label: y_label.into(),
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber. Held weakly, so dropping the subscriber
    /// unsubscribes it; dead entries are pruned on the next emission.
    pub fn subscribe(&mut self, subscriber: Weak<RefCell<dyn TableSubscriber>>) {
        self.subscribers.push(subscriber);
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn row(&self, row: usize) -> Option<DataRow> {
        self.rows.get(row).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &DataRow> {
        self.rows.iter()
    }

    /// Read a numeric field by `(row, column)`, column 0 being x and 1
    /// being y.
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        let row = self.rows.get(row)?;
        match column {
            0 => Some(row.x),
            1 => Some(row.y),
            _ => None,
        }
    }

    pub fn x_label(&self) -> &str {
        &self.x_label
    }

    pub fn y_label(&self) -> &str {
        &self.y_label
    }

    pub fn set_x_label(&mut self, label: impl Into<String>) {
        self.x_label = label.into();
    }

    pub fn set_y_label(&mut self, label: impl Into<String>) {
        self.y_label = label.into();
    }

    /// Set a single cell. Emits `RangeChanged` for the row, unless the
    /// value did not actually change (the grid widgets report a value
    /// every frame).
    pub fn set_value(&mut self, row: usize, column: usize, value: f64) {
        let Some(record) = self.rows.get_mut(row) else {
            log::error!("set_value: row {} out of bounds", row);
            return;
        };
        let cell = match column {
            0 => &mut record.x,
            1 => &mut record.y,
            _ => {
                log::error!("set_value: column {} out of bounds", column);
                return;
            }
        };
        if *cell == value {
            return;
        }
        *cell = value;
        self.emit(TableEvent::RangeChanged {
            first: row,
            last: row,
        });
    }

    /// Overwrite a whole row. Always emits `RangeChanged`, so a freshly
    /// inserted row gets populated downstream even if its values equal
    /// the defaults.
    pub fn set_row(&mut self, row: usize, x: f64, y: f64) {
        let Some(record) = self.rows.get_mut(row) else {
            log::error!("set_row: row {} out of bounds", row);
            return;
        };
        *record = DataRow::new(x, y);
        self.emit(TableEvent::RangeChanged {
            first: row,
            last: row,
        });
    }

    /// Overwrite a run of rows starting at `first` with one batched
    /// `RangeChanged` covering the whole run.
    pub fn set_range(&mut self, first: usize, values: &[DataRow]) {
        if values.is_empty() {
            return;
        }
        let last = first + values.len() - 1;
        if last >= self.rows.len() {
            log::error!("set_range: rows {}..={} out of bounds", first, last);
            return;
        }
        self.rows[first..=last].copy_from_slice(values);
        self.emit(TableEvent::RangeChanged { first, last });
    }

    /// Insert a default `(0, 0)` row at `index` (`index == row_count()`
    /// appends). Emits `RowsInserted`; the row enters downstream caches
    /// once a later `RangeChanged` populates it.
    pub fn insert_row(&mut self, index: usize) {
        if index > self.rows.len() {
            log::error!("insert_row: index {} out of bounds", index);
            return;
        }
        self.rows.insert(index, DataRow::default());
        self.emit(TableEvent::RowsInserted {
            start: index,
            end: index,
        });
    }

    /// Remove the rows `start..=end`. `RowsAboutToBeRemoved` fires while
    /// the rows are still present.
    pub fn remove_rows(&mut self, start: usize, end: usize) {
        if start > end || end >= self.rows.len() {
            log::error!("remove_rows: range {}..={} out of bounds", start, end);
            return;
        }
        self.emit(TableEvent::RowsAboutToBeRemoved { start, end });
        self.rows.drain(start..=end);
    }

    /// Replace the whole table, as happens on file load. Subscribers see
    /// the same event sequence a by-hand rebuild would produce.
    pub fn replace(
        &mut self,
        x_label: impl Into<String>,
        y_label: impl Into<String>,
        rows: Vec<DataRow>,
    ) {
        if !self.rows.is_empty() {
            let end = self.rows.len() - 1;
            self.emit(TableEvent::RowsAboutToBeRemoved { start: 0, end });
            self.rows.clear();
        }
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self.rows = rows;
        if !self.rows.is_empty() {
            let end = self.rows.len() - 1;
            self.emit(TableEvent::RowsInserted { start: 0, end });
            self.emit(TableEvent::RangeChanged {
                first: 0,
                last: end,
            });
        }
    }

    fn emit(&mut self, event: TableEvent) {
        self.subscribers.retain(|sub| sub.strong_count() > 0);
        let table = &*self;
        for subscriber in table.subscribers.iter() {
            if let Some(subscriber) = subscriber.upgrade() {
                subscriber.borrow_mut().notify(table, event);
            }
        }
    }
}
