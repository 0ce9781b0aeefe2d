//! inframe-table: generic record table
//!
//! Renders an arbitrary list of records against a caller-supplied column
//! schema, filters them by free text and turns row activation into a detail
//! route. The table owns no selection state and no persistent store: it keeps
//! the records it was last given and a recomputed filtered view over them.
//!
//! # Example
//!
//! ```
//! use inframe_table::{CellValue, ColumnSpec, Record, RecordTable, RenderedCell};
//!
//! let columns = vec![
//!     ColumnSpec::new("name", "Name"),
//!     ColumnSpec::new("logo", "Logo"),
//! ];
//! let records = vec![
//!     Record::new("1")
//!         .with("name", CellValue::text("Acme Studios"))
//!         .with("logo", CellValue::image("https://cdn.example/acme.png")),
//!     Record::new("2").with("name", CellValue::text("Pixel Forge")),
//! ];
//!
//! let mut table = RecordTable::new(columns, "/dashboard/partners");
//! table.set_records(records);
//! table.set_search("acme");
//!
//! assert_eq!(table.visible_len(), 1);
//! let row = table.visible(0).unwrap();
//! assert_eq!(row.id(), "1");
//! assert!(matches!(
//!     table.render_cell(row, &table.columns()[1]),
//!     RenderedCell::Thumbnail(_)
//! ));
//! ```

pub mod cell;
pub mod column;
pub mod filter;
pub mod record;
pub mod table;

pub use cell::{CellValue, RenderedCell, Scalar, thumbnail_label};
pub use column::ColumnSpec;
pub use filter::{ELLIPSIS, filter_records, matches_search, truncate_words};
pub use record::Record;
pub use table::{DEFAULT_WORD_LIMIT, Navigator, PLACEHOLDER, RecordTable, detail_route};
