//! Vector layer catalog for Spatialite databases built on top of rusqlite.
//!
//! ## Overview
//!
//! - `SpatialiteDb` wraps a connection to a Spatialite database.
//! - `SpatialVectorTable` describes a single vector layer: identity, WGS84
//!   extent, zoom range, description and style.
//! - `SpatialiteGeometryType` is the geometry type code declared for a layer,
//!   classified into a `ShapeKind` (point, line, polygon, geometry collection).
//! - `Style` is how a layer is drawn, persisted in the `dataproperties` table.
//!
//! ## Short usage
//!
//! ```no_run
//! use spatialite_layers::SpatialiteDb;
//!
//! let db = SpatialiteDb::open_read_only("data/survey.sqlite")?;
//! for table in db.vector_tables()? {
//!     println!(
//!         "{} [{}] {} zoom {}",
//!         table.name(),
//!         table.shape_kind(),
//!         table.bounds_to_string(),
//!         table.zoom_levels()
//!     );
//! }
//! # Ok::<(), spatialite_layers::SpatialError>(())
//! ```
//!
//! Descriptors can also be built by hand from metadata read elsewhere:
//!
//! ```
//! use spatialite_layers::{SpatialVectorTable, VectorTableInfo};
//!
//! let info = VectorTableInfo::new("/maps/field.sqlite", "wells", "geom", 1, "4326")
//!     .with_extent([10.5, 45.2], [9.0, 44.0, 11.0, 46.0]);
//! let mut table = SpatialVectorTable::new(info)?;
//! assert!(table.is_point());
//! assert_eq!(table.center_to_string(), "10.5,45.2,17");
//! assert_eq!(
//!     table.description(),
//!     "wells bounds[9.0,44.0,11.0,46.0] center[10.5,45.2,17]"
//! );
//!
//! table.make_default_style().fill_color = "blue".to_string();
//! # Ok::<(), spatialite_layers::SpatialError>(())
//! ```
//!
//! Extents stored in another SRID are brought into WGS84 through a
//! `BoundsTransform`. The default, `Wgs84Only`, skips such layers.
mod conversions;
mod error;
mod geometry_type;
mod spatialite;
mod sql;
mod style;
mod types;
mod vector_table;

pub mod project_schema;

pub use error::{Result, SpatialError};
pub use geometry_type::{ShapeKind, SpatialiteGeometryType};
pub use spatialite::{BoundsTransform, MetadataLayout, SpatialiteDb, WGS84_SRID, Wgs84Only};
pub use style::{Style, StyleTable};
pub use types::{Bounds, ZoomLevels};
pub use vector_table::{DEFAULT_MAP_TYPE, SpatialVectorTable, VectorTableInfo};

// Re-export types used in public signatures to keep the public API stable.
pub use wkb::reader::{Dimension, GeometryType};
