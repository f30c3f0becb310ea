//! Spatialite geometry type codes and their classification into shape kinds.

use crate::conversions::{
    XYM_OFFSET, XYZ_OFFSET, base_code_from_geometry_type, base_code_from_str, dimension_offset,
    dimension_offset_from_str,
};
use crate::error::{Result, SpatialError};
use std::fmt;
use wkb::reader::{Dimension, GeometryType};

/// The geometry type declared for a geometry column, as stored in the
/// `geometry_type` column of Spatialite 4 `geometry_columns`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum SpatialiteGeometryType {
    PointXy = 1,
    LineStringXy = 2,
    PolygonXy = 3,
    MultiPointXy = 4,
    MultiLineStringXy = 5,
    MultiPolygonXy = 6,
    GeometryCollectionXy = 7,
    PointXyz = 1001,
    LineStringXyz = 1002,
    PolygonXyz = 1003,
    MultiPointXyz = 1004,
    MultiLineStringXyz = 1005,
    MultiPolygonXyz = 1006,
    GeometryCollectionXyz = 1007,
    PointXym = 2001,
    LineStringXym = 2002,
    PolygonXym = 2003,
    MultiPointXym = 2004,
    MultiLineStringXym = 2005,
    MultiPolygonXym = 2006,
    GeometryCollectionXym = 2007,
    PointXyzm = 3001,
    LineStringXyzm = 3002,
    PolygonXyzm = 3003,
    MultiPointXyzm = 3004,
    MultiLineStringXyzm = 3005,
    MultiPolygonXyzm = 3006,
    GeometryCollectionXyzm = 3007,
}

/// The four mutually exclusive kinds a layer is drawn as.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Point,
    Line,
    Polygon,
    GeometryCollection,
}

impl SpatialiteGeometryType {
    pub const ALL: [SpatialiteGeometryType; 28] = {
        use SpatialiteGeometryType::*;
        [
            PointXy,
            LineStringXy,
            PolygonXy,
            MultiPointXy,
            MultiLineStringXy,
            MultiPolygonXy,
            GeometryCollectionXy,
            PointXyz,
            LineStringXyz,
            PolygonXyz,
            MultiPointXyz,
            MultiLineStringXyz,
            MultiPolygonXyz,
            GeometryCollectionXyz,
            PointXym,
            LineStringXym,
            PolygonXym,
            MultiPointXym,
            MultiLineStringXym,
            MultiPolygonXym,
            GeometryCollectionXym,
            PointXyzm,
            LineStringXyzm,
            PolygonXyzm,
            MultiPointXyzm,
            MultiLineStringXyzm,
            MultiPolygonXyzm,
            GeometryCollectionXyzm,
        ]
    };

    /// Look up a Spatialite geometry type code.
    ///
    /// Codes outside the closed set fail with
    /// [`SpatialError::InvalidGeometryType`]. This includes `0`, the generic
    /// `GEOMETRY` type, which carries no shape to classify.
    pub fn from_code(code: i32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|ty| ty.code() == code)
            .ok_or(SpatialError::InvalidGeometryType(code))
    }

    /// Build from the pair used by the `wkb` crate.
    pub fn from_parts(geometry_type: GeometryType, dimension: Dimension) -> Result<Self> {
        let code = base_code_from_geometry_type(geometry_type)? + dimension_offset(dimension);
        Self::from_code(code)
    }

    /// Parse the Spatialite 3 layout, where `geometry_columns.type` holds the
    /// shape name and `coord_dimension` holds either `XY`/`XYZ`/`XYM`/`XYZM`
    /// or an ordinate count.
    pub fn from_legacy(type_name: &str, coord_dimension: &str) -> Result<Self> {
        let invalid = || SpatialError::InvalidLegacyGeometryType {
            type_name: type_name.to_string(),
            coord_dimension: coord_dimension.to_string(),
        };
        let base = base_code_from_str(type_name).ok_or_else(invalid)?;
        let offset = dimension_offset_from_str(coord_dimension).ok_or_else(invalid)?;
        Self::from_code(base + offset)
    }

    pub fn code(self) -> i32 {
        self as i32
    }

    /// Classify into a shape kind. Multi geometries fold into their base
    /// shape.
    pub fn shape_kind(self) -> ShapeKind {
        use SpatialiteGeometryType::*;
        match self {
            PolygonXy | PolygonXym | PolygonXyz | PolygonXyzm | MultiPolygonXy
            | MultiPolygonXym | MultiPolygonXyz | MultiPolygonXyzm => ShapeKind::Polygon,
            PointXy | PointXym | PointXyz | PointXyzm | MultiPointXy | MultiPointXym
            | MultiPointXyz | MultiPointXyzm => ShapeKind::Point,
            LineStringXy | LineStringXym | LineStringXyz | LineStringXyzm
            | MultiLineStringXy | MultiLineStringXym | MultiLineStringXyz
            | MultiLineStringXyzm => ShapeKind::Line,
            GeometryCollectionXy
            | GeometryCollectionXym
            | GeometryCollectionXyz
            | GeometryCollectionXyzm => ShapeKind::GeometryCollection,
        }
    }

    pub fn geometry_type(self) -> GeometryType {
        match self.code() % XYZ_OFFSET {
            1 => GeometryType::Point,
            2 => GeometryType::LineString,
            3 => GeometryType::Polygon,
            4 => GeometryType::MultiPoint,
            5 => GeometryType::MultiLineString,
            6 => GeometryType::MultiPolygon,
            _ => GeometryType::GeometryCollection,
        }
    }

    pub fn dimension(self) -> Dimension {
        match self.code() - self.code() % XYZ_OFFSET {
            0 => Dimension::Xy,
            XYZ_OFFSET => Dimension::Xyz,
            XYM_OFFSET => Dimension::Xym,
            _ => Dimension::Xyzm,
        }
    }

    pub fn dimensions(self) -> geo_traits::Dimensions {
        match self.dimension() {
            Dimension::Xy => geo_traits::Dimensions::Xy,
            Dimension::Xyz => geo_traits::Dimensions::Xyz,
            Dimension::Xym => geo_traits::Dimensions::Xym,
            Dimension::Xyzm => geo_traits::Dimensions::Xyzm,
        }
    }

    pub fn is_multi(self) -> bool {
        matches!(self.code() % XYZ_OFFSET, 4..=6)
    }

    fn type_name(self) -> &'static str {
        match self.geometry_type() {
            GeometryType::Point => "POINT",
            GeometryType::LineString => "LINESTRING",
            GeometryType::Polygon => "POLYGON",
            GeometryType::MultiPoint => "MULTIPOINT",
            GeometryType::MultiLineString => "MULTILINESTRING",
            GeometryType::MultiPolygon => "MULTIPOLYGON",
            _ => "GEOMETRYCOLLECTION",
        }
    }
}

impl TryFrom<i32> for SpatialiteGeometryType {
    type Error = SpatialError;

    fn try_from(code: i32) -> Result<Self> {
        Self::from_code(code)
    }
}

impl fmt::Display for SpatialiteGeometryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.dimension() {
            Dimension::Xy => "XY",
            Dimension::Xyz => "XYZ",
            Dimension::Xym => "XYM",
            Dimension::Xyzm => "XYZM",
        };
        write!(f, "{}_{}", self.type_name(), suffix)
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ShapeKind::Point => "point",
            ShapeKind::Line => "line",
            ShapeKind::Polygon => "polygon",
            ShapeKind::GeometryCollection => "geometry collection",
        };
        f.write_str(s)
    }
}
