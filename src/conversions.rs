use crate::error::SpatialError;
use wkb::reader::{Dimension, GeometryType};

// Spatialite numbers the XY variants 1..=7 and shifts them by a fixed offset
// for each extra ordinate.
// cf. https://www.gaia-gis.it/fossil/libspatialite/wiki?name=metadata-4.0
pub(crate) const XYZ_OFFSET: i32 = 1000;
pub(crate) const XYM_OFFSET: i32 = 2000;
pub(crate) const XYZM_OFFSET: i32 = 3000;

#[inline]
pub(crate) fn base_code_from_geometry_type(geometry_type: GeometryType) -> Result<i32, SpatialError> {
    match geometry_type {
        GeometryType::Point => Ok(1),
        GeometryType::LineString => Ok(2),
        GeometryType::Polygon => Ok(3),
        GeometryType::MultiPoint => Ok(4),
        GeometryType::MultiLineString => Ok(5),
        GeometryType::MultiPolygon => Ok(6),
        GeometryType::GeometryCollection => Ok(7),
        #[allow(unreachable_patterns)]
        other => Err(SpatialError::UnsupportedGeometryType(format!("{other:?}"))),
    }
}

#[inline]
pub(crate) fn dimension_offset(dimension: Dimension) -> i32 {
    match dimension {
        Dimension::Xy => 0,
        Dimension::Xyz => XYZ_OFFSET,
        Dimension::Xym => XYM_OFFSET,
        Dimension::Xyzm => XYZM_OFFSET,
    }
}

#[inline]
pub(crate) fn base_code_from_str(type_name: &str) -> Option<i32> {
    let s = type_name.trim();
    if s.eq_ignore_ascii_case("POINT") {
        Some(1)
    } else if s.eq_ignore_ascii_case("LINESTRING") {
        Some(2)
    } else if s.eq_ignore_ascii_case("POLYGON") {
        Some(3)
    } else if s.eq_ignore_ascii_case("MULTIPOINT") {
        Some(4)
    } else if s.eq_ignore_ascii_case("MULTILINESTRING") {
        Some(5)
    } else if s.eq_ignore_ascii_case("MULTIPOLYGON") {
        Some(6)
    } else if s.eq_ignore_ascii_case("GEOMETRYCOLLECTION") {
        Some(7)
    } else {
        None
    }
}

/// Spatialite 3 stores `coord_dimension` either as the ordinate names or as
/// the ordinate count. A count of 3 is ambiguous and is read as XYZ.
#[inline]
pub(crate) fn dimension_offset_from_str(coord_dimension: &str) -> Option<i32> {
    let s = coord_dimension.trim();
    if s.eq_ignore_ascii_case("XY") || s == "2" {
        Some(0)
    } else if s.eq_ignore_ascii_case("XYZ") || s == "3" {
        Some(XYZ_OFFSET)
    } else if s.eq_ignore_ascii_case("XYM") {
        Some(XYM_OFFSET)
    } else if s.eq_ignore_ascii_case("XYZM") || s == "4" {
        Some(XYZM_OFFSET)
    } else {
        None
    }
}

/// `coord_dimension` as a number of ordinates, 0 when unknown.
#[inline]
pub(crate) fn ordinate_count(coord_dimension: &str) -> i32 {
    let s = coord_dimension.trim();
    if let Ok(count) = s.parse::<i32>() {
        count
    } else if s.eq_ignore_ascii_case("XY") {
        2
    } else if s.eq_ignore_ascii_case("XYZ") || s.eq_ignore_ascii_case("XYM") {
        3
    } else if s.eq_ignore_ascii_case("XYZM") {
        4
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_coord_dimension_names_and_counts() {
        assert_eq!(dimension_offset_from_str("xy"), Some(0));
        assert_eq!(dimension_offset_from_str("3"), Some(XYZ_OFFSET));
        assert_eq!(dimension_offset_from_str("XYM"), Some(XYM_OFFSET));
        assert_eq!(dimension_offset_from_str(" 4 "), Some(XYZM_OFFSET));
        assert_eq!(dimension_offset_from_str("5"), None);
    }

    #[test]
    fn counts_ordinates() {
        assert_eq!(ordinate_count("XYZM"), 4);
        assert_eq!(ordinate_count("xym"), 3);
        assert_eq!(ordinate_count("2"), 2);
        assert_eq!(ordinate_count("?"), 0);
    }

    #[test]
    fn parses_type_names_case_insensitively() {
        assert_eq!(base_code_from_str("multipolygon"), Some(6));
        assert_eq!(base_code_from_str("GeometryCollection"), Some(7));
        assert_eq!(base_code_from_str("GEOMETRY"), None);
    }
}
