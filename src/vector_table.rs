use crate::error::Result;
use crate::geometry_type::{ShapeKind, SpatialiteGeometryType};
use crate::style::Style;
use crate::types::{Bounds, ZoomLevels, format_double};
use std::cell::OnceCell;
use std::path::Path;

/// Source kind of layers read from spatial tables.
pub const DEFAULT_MAP_TYPE: &str = "geometry";

/// Everything a [`SpatialVectorTable`] is built from, as read from the
/// database metadata.
#[derive(Clone, Debug, PartialEq)]
pub struct VectorTableInfo {
    /// Path of the database file owning the layer.
    pub file_path: String,
    pub name: String,
    pub geometry_column: String,
    /// Spatialite geometry type code.
    pub geometry_type: i32,
    pub srid: String,
    /// `[x, y]` in WGS84.
    pub center: [f64; 2],
    /// `[west, south, east, north]` in WGS84.
    pub bounds: [f64; 4],
    pub map_type: String,
    pub row_count: i64,
    pub coord_dimension: i32,
    pub spatial_index_enabled: bool,
    pub last_verified: String,
    pub zoom: ZoomLevels,
}

impl VectorTableInfo {
    /// Start from the identity of a layer. Extent defaults to the whole world
    /// and everything else to its empty value.
    pub fn new(
        file_path: impl Into<String>,
        name: impl Into<String>,
        geometry_column: impl Into<String>,
        geometry_type: i32,
        srid: impl Into<String>,
    ) -> Self {
        Self {
            file_path: file_path.into(),
            name: name.into(),
            geometry_column: geometry_column.into(),
            geometry_type,
            srid: srid.into(),
            center: Bounds::WORLD.center(),
            bounds: Bounds::WORLD.to_array(),
            map_type: DEFAULT_MAP_TYPE.to_string(),
            row_count: 0,
            coord_dimension: 0,
            spatial_index_enabled: false,
            last_verified: String::new(),
            zoom: ZoomLevels::default(),
        }
    }

    pub fn with_extent(mut self, center: [f64; 2], bounds: [f64; 4]) -> Self {
        self.center = center;
        self.bounds = bounds;
        self
    }
}

/// A vector table of a spatial database.
///
/// Identity and extent are fixed at construction. Only the description and
/// the style change afterwards. The descriptor memoizes its default
/// description in a `OnceCell`, so it is meant to be owned by a single
/// caller.
#[derive(Debug, Clone)]
pub struct SpatialVectorTable {
    file_path: String,
    file_name: String,
    name: String,
    geometry_column: String,
    geometry_type: SpatialiteGeometryType,
    shape_kind: ShapeKind,
    srid: String,
    center: [f64; 2],
    bounds: Bounds,
    zoom: ZoomLevels,
    map_type: String,
    row_count: i64,
    coord_dimension: i32,
    spatial_index_enabled: bool,
    last_verified: String,
    description: Option<String>,
    default_description: OnceCell<String>,
    style: Option<Style>,
}

impl SpatialVectorTable {
    /// Build the descriptor and classify its geometry type.
    ///
    /// Fails with [`SpatialError::InvalidGeometryType`](crate::SpatialError::InvalidGeometryType)
    /// when the code is not a known Spatialite geometry type.
    pub fn new(info: VectorTableInfo) -> Result<Self> {
        let geometry_type = SpatialiteGeometryType::from_code(info.geometry_type)?;
        let shape_kind = geometry_type.shape_kind();

        let bounds = Bounds::from_array(info.bounds);
        if !bounds.is_ordered() {
            tracing::warn!(
                layer = %info.name,
                bounds = ?info.bounds,
                "bounds are not ordered west <= east, south <= north"
            );
        }

        let file_name = Path::new(&info.file_path)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();

        tracing::debug!(
            layer = %info.name,
            geometry_column = %info.geometry_column,
            geometry_type = %geometry_type,
            shape = %shape_kind,
            "classified vector table"
        );

        Ok(Self {
            file_path: info.file_path,
            file_name,
            name: info.name,
            geometry_column: info.geometry_column,
            geometry_type,
            shape_kind,
            srid: info.srid,
            center: info.center,
            bounds,
            zoom: info.zoom,
            map_type: info.map_type,
            row_count: info.row_count,
            coord_dimension: info.coord_dimension,
            spatial_index_enabled: info.spatial_index_enabled,
            last_verified: info.last_verified,
            description: None,
            default_description: OnceCell::new(),
            style: None,
        })
    }

    /// Path of the owning database file, as given.
    pub fn file_name_path(&self) -> &str {
        &self.file_path
    }

    /// Last component of the database path.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn map_type(&self) -> &str {
        &self.map_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn geometry_column(&self) -> &str {
        &self.geometry_column
    }

    pub fn geometry_type_code(&self) -> i32 {
        self.geometry_type.code()
    }

    pub fn geometry_type(&self) -> SpatialiteGeometryType {
        self.geometry_type
    }

    pub fn srid(&self) -> &str {
        &self.srid
    }

    pub fn row_count(&self) -> i64 {
        self.row_count
    }

    pub fn coord_dimension(&self) -> i32 {
        self.coord_dimension
    }

    pub fn spatial_index_enabled(&self) -> bool {
        self.spatial_index_enabled
    }

    pub fn last_verified(&self) -> &str {
        &self.last_verified
    }

    pub fn center(&self) -> [f64; 2] {
        self.center
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn min_zoom(&self) -> i32 {
        self.zoom.min_zoom
    }

    pub fn max_zoom(&self) -> i32 {
        self.zoom.max_zoom
    }

    pub fn default_zoom(&self) -> i32 {
        self.zoom.default_zoom
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.shape_kind
    }

    pub fn is_point(&self) -> bool {
        self.shape_kind == ShapeKind::Point
    }

    pub fn is_line(&self) -> bool {
        self.shape_kind == ShapeKind::Line
    }

    pub fn is_polygon(&self) -> bool {
        self.shape_kind == ShapeKind::Polygon
    }

    pub fn is_geometry_collection(&self) -> bool {
        self.shape_kind == ShapeKind::GeometryCollection
    }

    /// Bounds in WMS order: `west,south,east,north`.
    pub fn bounds_to_string(&self) -> String {
        let b = &self.bounds;
        format!(
            "{},{},{},{}",
            format_double(b.west),
            format_double(b.south),
            format_double(b.east),
            format_double(b.north)
        )
    }

    /// Center in MBTiles order: `x,y,default_zoom`.
    pub fn center_to_string(&self) -> String {
        format!(
            "{},{},{}",
            format_double(self.center[0]),
            format_double(self.center[1]),
            self.zoom.default_zoom
        )
    }

    /// Zoom range as `min-max`.
    pub fn zoom_levels(&self) -> String {
        format!("{}-{}", self.zoom.min_zoom, self.zoom.max_zoom)
    }

    /// The description of the layer.
    ///
    /// Without an explicit description this is
    /// `"{name} bounds[{bounds}] center[{center}]"`, built on first read and
    /// cached for later reads.
    pub fn description(&self) -> &str {
        match &self.description {
            Some(description) => description,
            None => self.default_description.get_or_init(|| {
                format!(
                    "{} bounds[{}] center[{}]",
                    self.name,
                    self.bounds_to_string(),
                    self.center_to_string()
                )
            }),
        }
    }

    /// Set the description. An empty text, or one equal to the layer name,
    /// restores the default description.
    pub fn set_description(&mut self, description: impl Into<String>) {
        let description = description.into();
        if description.is_empty() || description == self.name {
            self.description = None;
        } else {
            self.description = Some(description);
        }
    }

    pub fn style(&self) -> Option<&Style> {
        self.style.as_ref()
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = Some(style);
    }

    /// Attach a default style named after the layer and return it.
    pub fn make_default_style(&mut self) -> &mut Style {
        self.style.insert(Style::new(self.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SpatialError;

    fn info(geometry_type: i32) -> VectorTableInfo {
        VectorTableInfo {
            file_path: "/sdcard/maps/field.sqlite".to_string(),
            name: "wells".to_string(),
            geometry_column: "geom".to_string(),
            geometry_type,
            srid: "4326".to_string(),
            center: [10.5, 45.2],
            bounds: [9.0, 44.0, 11.0, 46.0],
            map_type: DEFAULT_MAP_TYPE.to_string(),
            row_count: 12,
            coord_dimension: 2,
            spatial_index_enabled: true,
            last_verified: "2013-07-01T10:00:00Z".to_string(),
            zoom: ZoomLevels::default(),
        }
    }

    #[test]
    fn classifies_exactly_one_shape_kind() -> Result<()> {
        for ty in SpatialiteGeometryType::ALL {
            let table = SpatialVectorTable::new(info(ty.code()))?;
            let flags = [
                table.is_point(),
                table.is_line(),
                table.is_polygon(),
                table.is_geometry_collection(),
            ];
            assert_eq!(flags.iter().filter(|f| **f).count(), 1, "{ty}");
            assert_eq!(table.shape_kind(), ty.shape_kind());
        }

        let collection = SpatialVectorTable::new(info(7))?;
        assert!(collection.is_geometry_collection());
        assert!(!collection.is_point());
        Ok(())
    }

    #[test]
    fn rejects_unknown_geometry_type() {
        let err = SpatialVectorTable::new(info(42)).expect_err("unknown code");
        assert!(matches!(err, SpatialError::InvalidGeometryType(42)));
    }

    #[test]
    fn keeps_identity_fields() -> Result<()> {
        let table = SpatialVectorTable::new(info(1003))?;
        assert_eq!(table.file_name_path(), "/sdcard/maps/field.sqlite");
        assert_eq!(table.file_name(), "field.sqlite");
        assert_eq!(table.name(), "wells");
        assert_eq!(table.geometry_column(), "geom");
        assert_eq!(table.geometry_type_code(), 1003);
        assert_eq!(table.geometry_type(), SpatialiteGeometryType::PolygonXyz);
        assert_eq!(table.srid(), "4326");
        assert_eq!(table.map_type(), "geometry");
        assert_eq!(table.row_count(), 12);
        assert_eq!(table.coord_dimension(), 2);
        assert!(table.spatial_index_enabled());
        assert_eq!(table.last_verified(), "2013-07-01T10:00:00Z");
        Ok(())
    }

    #[test]
    fn formats_bounds_center_and_zoom() -> Result<()> {
        let table = SpatialVectorTable::new(info(1))?;
        assert_eq!(table.bounds_to_string(), "9.0,44.0,11.0,46.0");
        assert_eq!(table.center_to_string(), "10.5,45.2,17");
        assert_eq!(table.zoom_levels(), "0-22");

        let mut custom = info(1);
        custom.zoom = ZoomLevels {
            min_zoom: 5,
            max_zoom: 18,
            default_zoom: 12,
        };
        let table = SpatialVectorTable::new(custom)?;
        assert_eq!(table.zoom_levels(), "5-18");
        assert_eq!(table.center_to_string(), "10.5,45.2,12");
        Ok(())
    }

    #[test]
    fn default_description_is_memoized() -> Result<()> {
        let table = SpatialVectorTable::new(info(1))?;
        let expected = "wells bounds[9.0,44.0,11.0,46.0] center[10.5,45.2,17]";
        assert_eq!(table.description(), expected);
        assert_eq!(table.description(), expected);
        assert!(table.default_description.get().is_some());
        Ok(())
    }

    #[test]
    fn set_description_resets_or_stores() -> Result<()> {
        let mut table = SpatialVectorTable::new(info(2))?;
        let default = "wells bounds[9.0,44.0,11.0,46.0] center[10.5,45.2,17]";

        table.set_description("custom text");
        assert_eq!(table.description(), "custom text");

        table.set_description("");
        assert_eq!(table.description(), default);

        table.set_description("another");
        table.set_description("wells");
        assert_eq!(table.description(), default);
        Ok(())
    }

    #[test]
    fn style_is_absent_until_attached() -> Result<()> {
        let mut table = SpatialVectorTable::new(info(1))?;
        assert!(table.style().is_none());

        table.make_default_style().fill_color = "blue".to_string();
        let style = table.style().expect("default style");
        assert_eq!(style.name, "wells");
        assert_eq!(style.fill_color, "blue");

        table.set_style(Style::new("other"));
        assert_eq!(table.style().map(|s| s.name.as_str()), Some("other"));
        Ok(())
    }

    #[test]
    fn accepts_unordered_bounds() -> Result<()> {
        let mut flipped = info(1);
        flipped.bounds = [11.0, 46.0, 9.0, 44.0];
        let table = SpatialVectorTable::new(flipped)?;
        assert_eq!(table.bounds_to_string(), "11.0,46.0,9.0,44.0");
        Ok(())
    }

    #[test]
    fn builder_defaults_to_world_extent() -> Result<()> {
        let table = SpatialVectorTable::new(VectorTableInfo::new("db.sqlite", "roads", "geom", 2, "4326"))?;
        assert_eq!(table.bounds_to_string(), "-180.0,-90.0,180.0,90.0");
        assert_eq!(table.center_to_string(), "0.0,0.0,17");
        assert_eq!(table.file_name(), "db.sqlite");
        assert!(table.is_line());

        let table = SpatialVectorTable::new(
            VectorTableInfo::new("db.sqlite", "roads", "geom", 2, "4326")
                .with_extent([1.0, 2.0], [0.0, 1.0, 2.0, 3.0]),
        )?;
        assert_eq!(table.center(), [1.0, 2.0]);
        assert_eq!(table.bounds(), Bounds::from_array([0.0, 1.0, 2.0, 3.0]));
        Ok(())
    }
}
