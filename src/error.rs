use thiserror::Error;

/// Crate error type for Spatialite layer operations.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Wraps errors returned by `rusqlite`.
    #[error(transparent)]
    Sql(#[from] rusqlite::Error),
    /// A geometry type code is outside the closed set of Spatialite codes.
    #[error("no geometry type for code: {0}")]
    InvalidGeometryType(i32),
    /// A Spatialite 3 `type` / `coord_dimension` pair could not be parsed.
    #[error("invalid legacy geometry type: {type_name} ({coord_dimension})")]
    InvalidLegacyGeometryType {
        type_name: String,
        coord_dimension: String,
    },
    /// A WKB geometry type has no Spatialite counterpart.
    #[error("unsupported geometry type: {0}")]
    UnsupportedGeometryType(String),
    /// The extent of a layer could not be expressed in WGS84.
    #[error("unsupported srid: {0}")]
    UnsupportedSrid(String),
    /// The database carries no `geometry_columns` table.
    #[error("not a spatialite database: geometry_columns is missing")]
    NotSpatialite,
    #[error("{0}")]
    Message(String),
    #[error("operation not allowed on read-only connection")]
    ReadOnly,
}

pub type Result<T> = std::result::Result<T, SpatialError>;
