#![warn(clippy::all, rust_2018_idioms)]

pub mod csv;
pub mod geometry;
pub mod sync;
pub mod table;

pub use csv::{CsvContents, CsvError};
pub use geometry::{Bounds, PlotGeometry, Segment};
pub use sync::PlotSync;
pub use table::{DataRow, DataTable, TableEvent, TableSubscriber};
