/// Zoom bounds a layer is displayed at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ZoomLevels {
    pub min_zoom: i32,
    pub max_zoom: i32,
    pub default_zoom: i32,
}

impl Default for ZoomLevels {
    fn default() -> Self {
        Self {
            min_zoom: 0,
            max_zoom: 22,
            default_zoom: 17,
        }
    }
}

/// A bounding box in WGS84 degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub west: f64,
    pub south: f64,
    pub east: f64,
    pub north: f64,
}

impl Bounds {
    /// The whole WGS84 domain, used when a layer has no statistics.
    pub const WORLD: Bounds = Bounds {
        west: -180.0,
        south: -90.0,
        east: 180.0,
        north: 90.0,
    };

    /// Build from `[west, south, east, north]`.
    pub fn from_array(bounds: [f64; 4]) -> Self {
        Self {
            west: bounds[0],
            south: bounds[1],
            east: bounds[2],
            north: bounds[3],
        }
    }

    pub fn to_array(self) -> [f64; 4] {
        [self.west, self.south, self.east, self.north]
    }

    pub fn is_ordered(&self) -> bool {
        self.west <= self.east && self.south <= self.north
    }

    pub fn center(&self) -> [f64; 2] {
        [
            (self.west + self.east) / 2.0,
            (self.south + self.north) / 2.0,
        ]
    }
}

/// Render a double the way the mapping front-end does: always with a
/// fractional part, switching to `E` notation outside `[1e-3, 1e7)`.
pub(crate) fn format_double(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-3..1e7).contains(&magnitude) {
        // Debug keeps the trailing `.0` for integral values.
        return format!("{value:?}");
    }

    let scientific = format!("{value:e}");
    match scientific.split_once('e') {
        Some((mantissa, exponent)) if mantissa.contains('.') => format!("{mantissa}E{exponent}"),
        Some((mantissa, exponent)) => format!("{mantissa}.0E{exponent}"),
        None => scientific,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_doubles_with_fraction() {
        assert_eq!(format_double(9.0), "9.0");
        assert_eq!(format_double(10.5), "10.5");
        assert_eq!(format_double(-180.0), "-180.0");
        assert_eq!(format_double(0.0), "0.0");
        assert_eq!(format_double(45.123456), "45.123456");
    }

    #[test]
    fn formats_extreme_doubles_in_e_notation() {
        assert_eq!(format_double(12_345_678.0), "1.2345678E7");
        assert_eq!(format_double(1e7), "1.0E7");
        assert_eq!(format_double(0.0001), "1.0E-4");
        assert_eq!(format_double(f64::NAN), "NaN");
        assert_eq!(format_double(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn bounds_center_and_order() {
        let bounds = Bounds::from_array([9.0, 44.0, 11.0, 46.0]);
        assert_eq!(bounds.center(), [10.0, 45.0]);
        assert!(bounds.is_ordered());
        assert_eq!(bounds.to_array(), [9.0, 44.0, 11.0, 46.0]);

        let flipped = Bounds::from_array([11.0, 44.0, 9.0, 46.0]);
        assert!(!flipped.is_ordered());
    }
}
