// cf. https://www.gaia-gis.it/fossil/libspatialite/wiki?name=metadata-4.0

pub(crate) const SQL_HAS_GEOMETRY_COLUMNS: &str =
    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'geometry_columns')";

// Spatialite 4 replaced the textual `type` column with an integer `geometry_type`.
pub(crate) const SQL_HAS_V4_GEOMETRY_TYPE: &str =
    "SELECT EXISTS(SELECT 1 FROM pragma_table_info('geometry_columns') WHERE name = 'geometry_type')";

pub(crate) const SQL_HAS_GEOMETRY_COLUMNS_STATISTICS: &str = "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'geometry_columns_statistics')";

pub(crate) const SQL_SELECT_GEOMETRY_COLUMNS_V4: &str = "
SELECT f_table_name, f_geometry_column, geometry_type, coord_dimension, srid, spatial_index_enabled
FROM geometry_columns
ORDER BY f_table_name, f_geometry_column
";

pub(crate) const SQL_SELECT_GEOMETRY_COLUMNS_V3: &str = "
SELECT f_table_name, f_geometry_column, type, coord_dimension, srid, spatial_index_enabled
FROM geometry_columns
ORDER BY f_table_name, f_geometry_column
";

pub(crate) const SQL_SELECT_LAYER_STATISTICS: &str = "
SELECT row_count, last_verified, extent_min_x, extent_min_y, extent_max_x, extent_max_y
FROM geometry_columns_statistics
WHERE lower(f_table_name) = lower(?1) AND lower(f_geometry_column) = lower(?2)
";

pub(crate) const SQL_DATAPROPERTIES: &str = "
CREATE TABLE IF NOT EXISTS dataproperties (
  name TEXT NOT NULL PRIMARY KEY,
  size REAL,
  fillcolor TEXT,
  strokecolor TEXT,
  fillalpha REAL,
  strokealpha REAL,
  shape TEXT,
  width REAL,
  textsize REAL,
  textfield TEXT,
  enabled INTEGER,
  layerorder INTEGER,
  dashpattern TEXT,
  minzoom INTEGER,
  maxzoom INTEGER,
  decimationfactor REAL
);
";

pub(crate) const SQL_HAS_DATAPROPERTIES: &str =
    "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'dataproperties')";

pub(crate) const SQL_UPSERT_STYLE: &str = "
INSERT OR REPLACE INTO dataproperties
  (name, size, fillcolor, strokecolor, fillalpha, strokealpha, shape, width, textsize,
   textfield, enabled, layerorder, dashpattern, minzoom, maxzoom, decimationfactor)
VALUES
  (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16)
";

const STYLE_COLUMNS: &str = "name, size, fillcolor, strokecolor, fillalpha, strokealpha, shape, width, textsize, \
textfield, enabled, layerorder, dashpattern, minzoom, maxzoom, decimationfactor";

pub(crate) fn sql_select_style(by_name: bool) -> String {
    if by_name {
        format!("SELECT {STYLE_COLUMNS} FROM dataproperties WHERE name = ?1")
    } else {
        format!("SELECT {STYLE_COLUMNS} FROM dataproperties ORDER BY layerorder, name")
    }
}

pub(crate) fn sql_create_table(table_name: &str, column_defs: &str) -> String {
    format!(r#"CREATE TABLE IF NOT EXISTS "{}" ({})"#, table_name, column_defs)
}
