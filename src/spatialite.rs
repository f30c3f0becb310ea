//! Reading vector layer descriptors out of a Spatialite database.

use crate::error::{Result, SpatialError};
use crate::conversions::ordinate_count;
use crate::geometry_type::SpatialiteGeometryType;
use crate::sql::{
    SQL_HAS_GEOMETRY_COLUMNS, SQL_HAS_GEOMETRY_COLUMNS_STATISTICS, SQL_HAS_V4_GEOMETRY_TYPE,
    SQL_SELECT_GEOMETRY_COLUMNS_V3, SQL_SELECT_GEOMETRY_COLUMNS_V4, SQL_SELECT_LAYER_STATISTICS,
};
use crate::style::StyleTable;
use crate::types::{Bounds, ZoomLevels};
use crate::vector_table::{DEFAULT_MAP_TYPE, SpatialVectorTable, VectorTableInfo};
use rusqlite::types::ValueRef;
use rusqlite::{OpenFlags, OptionalExtension};
use std::path::Path;

/// SRID of WGS84 geographic coordinates.
pub const WGS84_SRID: &str = "4326";

/// Which `geometry_columns` layout the database uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataLayout {
    /// Spatialite 4: integer `geometry_type` and `coord_dimension`.
    V4,
    /// Spatialite 3: textual `type` and `coord_dimension`.
    V3Legacy,
}

/// Brings a layer extent into WGS84.
///
/// Layer statistics are stored in the native SRID of the layer, while
/// descriptors carry WGS84 degrees. Implement this to plug in a projection
/// library.
pub trait BoundsTransform {
    fn to_wgs84(&self, srid: &str, bounds: Bounds) -> Result<Bounds>;
}

/// Accepts extents that are already WGS84 and rejects everything else.
#[derive(Clone, Copy, Debug, Default)]
pub struct Wgs84Only;

impl BoundsTransform for Wgs84Only {
    fn to_wgs84(&self, srid: &str, bounds: Bounds) -> Result<Bounds> {
        if srid == WGS84_SRID {
            Ok(bounds)
        } else {
            Err(SpatialError::UnsupportedSrid(srid.to_string()))
        }
    }
}

#[derive(Debug)]
struct GeometryColumnRow {
    table_name: String,
    column_name: String,
    geometry_type: SpatialiteGeometryType,
    coord_dimension: i32,
    srid: String,
    spatial_index_enabled: bool,
}

/// `spatial_index_enabled` value of a layer indexed by an R*Tree. 2 marks an
/// MBR cache, which is not a spatial index.
const SPATIAL_INDEX_RTREE: i64 = 1;

#[derive(Debug, Default)]
struct LayerStatistics {
    row_count: i64,
    last_verified: String,
    extent: Option<Bounds>,
}

#[derive(Debug)]
/// Spatialite database connection wrapper for listing vector layers.
pub struct SpatialiteDb {
    conn: rusqlite::Connection,
    path: String,
    zoom: ZoomLevels,
    read_only: bool,
}

impl SpatialiteDb {
    /// Open a Spatialite database in read-only mode.
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = rusqlite::Connection::open_with_flags(path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let mut db = Self::from_connection(conn, path.to_string_lossy());
        db.read_only = true;
        Ok(db)
    }

    /// Open an existing Spatialite database in read-write mode.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SpatialError::Message(format!(
                "Spatialite file does not exist: {}",
                path.display()
            )));
        }

        let conn = rusqlite::Connection::open(path)?;
        Ok(Self::from_connection(conn, path.to_string_lossy()))
    }

    /// Wrap an open connection. `path` is reported as the owning file of the
    /// layers.
    pub fn from_connection(conn: rusqlite::Connection, path: impl Into<String>) -> Self {
        Self {
            conn,
            path: path.into(),
            zoom: ZoomLevels::default(),
            read_only: false,
        }
    }

    /// Zoom levels given to every descriptor built from this database.
    pub fn with_zoom_levels(mut self, zoom: ZoomLevels) -> Self {
        self.zoom = zoom;
        self
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn connection(&self) -> &rusqlite::Connection {
        &self.conn
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The style table. On a read-only database its writes fail with
    /// [`SpatialError::ReadOnly`].
    pub fn styles(&self) -> StyleTable<'_> {
        if self.read_only {
            StyleTable::new_read_only(&self.conn)
        } else {
            StyleTable::new(&self.conn)
        }
    }

    /// Detect the `geometry_columns` layout.
    pub fn metadata_layout(&self) -> Result<MetadataLayout> {
        let has_geometry_columns: i64 =
            self.conn
                .query_row(SQL_HAS_GEOMETRY_COLUMNS, [], |row| row.get(0))?;
        if has_geometry_columns == 0 {
            return Err(SpatialError::NotSpatialite);
        }

        let is_v4: i64 = self
            .conn
            .query_row(SQL_HAS_V4_GEOMETRY_TYPE, [], |row| row.get(0))?;
        Ok(if is_v4 != 0 {
            MetadataLayout::V4
        } else {
            MetadataLayout::V3Legacy
        })
    }

    /// List the vector tables whose extent is stored in WGS84.
    pub fn vector_tables(&self) -> Result<Vec<SpatialVectorTable>> {
        self.vector_tables_with(&Wgs84Only)
    }

    /// List the vector tables, one per geometry column, ordered by table and
    /// column name.
    ///
    /// Layers whose extent `transform` cannot bring into WGS84 are skipped,
    /// and so are layers whose geometry type has no shape kind, such as the
    /// generic `GEOMETRY` (code 0). Both are logged at `warn`. A
    /// `geometry_type` that is not a number at all fails the listing.
    pub fn vector_tables_with(
        &self,
        transform: &dyn BoundsTransform,
    ) -> Result<Vec<SpatialVectorTable>> {
        let layout = self.metadata_layout()?;
        let rows = self.geometry_columns(layout)?;
        let has_statistics: i64 =
            self.conn
                .query_row(SQL_HAS_GEOMETRY_COLUMNS_STATISTICS, [], |row| row.get(0))?;
        let styles = self.styles();

        let mut tables = Vec::with_capacity(rows.len());
        for row in rows {
            let statistics = if has_statistics != 0 {
                self.layer_statistics(&row.table_name, &row.column_name)?
            } else {
                LayerStatistics::default()
            };

            let bounds = match statistics.extent {
                Some(extent) => match transform.to_wgs84(&row.srid, extent) {
                    Ok(bounds) => bounds,
                    Err(err) => {
                        tracing::warn!(
                            layer = %row.table_name,
                            srid = %row.srid,
                            "skipping layer: {err}"
                        );
                        continue;
                    }
                },
                None => {
                    tracing::debug!(layer = %row.table_name, "no extent, using world bounds");
                    Bounds::WORLD
                }
            };

            let info = VectorTableInfo {
                file_path: self.path.clone(),
                name: row.table_name,
                geometry_column: row.column_name,
                geometry_type: row.geometry_type.code(),
                srid: row.srid,
                center: bounds.center(),
                bounds: bounds.to_array(),
                map_type: DEFAULT_MAP_TYPE.to_string(),
                row_count: statistics.row_count,
                coord_dimension: row.coord_dimension,
                spatial_index_enabled: row.spatial_index_enabled,
                last_verified: statistics.last_verified,
                zoom: self.zoom,
            };
            let mut table = SpatialVectorTable::new(info)?;
            if let Some(style) = styles.load(table.name())? {
                table.set_style(style);
            }
            tables.push(table);
        }

        tracing::debug!(path = %self.path, count = tables.len(), "loaded vector tables");
        Ok(tables)
    }

    fn geometry_columns(&self, layout: MetadataLayout) -> Result<Vec<GeometryColumnRow>> {
        let sql = match layout {
            MetadataLayout::V4 => SQL_SELECT_GEOMETRY_COLUMNS_V4,
            MetadataLayout::V3Legacy => SQL_SELECT_GEOMETRY_COLUMNS_V3,
        };
        let mut stmt = self.conn.prepare(sql)?;
        let raw = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    value_to_string(row.get_ref(2)?),
                    value_to_string(row.get_ref(3)?),
                    value_to_string(row.get_ref(4)?),
                    row.get::<_, Option<i64>>(5)?.unwrap_or(0) == SPATIAL_INDEX_RTREE,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut rows = Vec::with_capacity(raw.len());
        for (table_name, column_name, geometry_type, coord_dimension, srid, spatial_index_enabled) in raw
        {
            let classified = match layout {
                MetadataLayout::V4 => {
                    let code = geometry_type.trim().parse::<i32>().map_err(|_| {
                        SpatialError::Message(format!(
                            "invalid geometry_type '{geometry_type}' for {table_name}.{column_name}"
                        ))
                    })?;
                    SpatialiteGeometryType::from_code(code)
                }
                MetadataLayout::V3Legacy => {
                    SpatialiteGeometryType::from_legacy(&geometry_type, &coord_dimension)
                }
            };
            let geometry_type = match classified {
                Ok(geometry_type) => geometry_type,
                Err(
                    err @ (SpatialError::InvalidGeometryType(_)
                    | SpatialError::InvalidLegacyGeometryType { .. }),
                ) => {
                    tracing::warn!(
                        layer = %table_name,
                        geometry_column = %column_name,
                        "skipping layer: {err}"
                    );
                    continue;
                }
                Err(err) => return Err(err),
            };
            rows.push(GeometryColumnRow {
                table_name,
                column_name,
                geometry_type,
                coord_dimension: ordinate_count(&coord_dimension),
                srid,
                spatial_index_enabled,
            });
        }
        Ok(rows)
    }

    fn layer_statistics(&self, table_name: &str, column_name: &str) -> Result<LayerStatistics> {
        let mut stmt = self.conn.prepare_cached(SQL_SELECT_LAYER_STATISTICS)?;
        let statistics = stmt
            .query_row([table_name, column_name], |row| {
                let extent = (
                    row.get::<_, Option<f64>>(2)?,
                    row.get::<_, Option<f64>>(3)?,
                    row.get::<_, Option<f64>>(4)?,
                    row.get::<_, Option<f64>>(5)?,
                );
                let extent = match extent {
                    (Some(west), Some(south), Some(east), Some(north)) => Some(Bounds {
                        west,
                        south,
                        east,
                        north,
                    }),
                    _ => None,
                };
                Ok(LayerStatistics {
                    row_count: row.get::<_, Option<i64>>(0)?.unwrap_or(0),
                    last_verified: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    extent,
                })
            })
            .optional()?;
        Ok(statistics.unwrap_or_default())
    }
}

fn value_to_string(value: ValueRef<'_>) -> String {
    match value {
        ValueRef::Null => String::new(),
        ValueRef::Integer(value) => value.to_string(),
        ValueRef::Real(value) => value.to_string(),
        ValueRef::Text(value) | ValueRef::Blob(value) => String::from_utf8_lossy(value).into_owned(),
    }
}
