//! Rendering styles for vector layers and their `dataproperties` table.

use crate::error::{Result, SpatialError};
use crate::sql::{SQL_DATAPROPERTIES, SQL_HAS_DATAPROPERTIES, SQL_UPSERT_STYLE, sql_select_style};
use rusqlite::{OptionalExtension, Row};

/// How a vector layer is drawn.
#[derive(Clone, Debug, PartialEq)]
pub struct Style {
    /// Name of the layer the style belongs to.
    pub name: String,
    pub size: f32,
    pub fill_color: String,
    pub stroke_color: String,
    pub fill_alpha: f32,
    pub stroke_alpha: f32,
    /// Marker shape for point layers, e.g. `square`, `circle`, `triangle`.
    pub shape: String,
    pub width: f32,
    pub text_size: f32,
    /// Attribute shown as label, empty for none.
    pub text_field: String,
    pub enabled: bool,
    /// Drawing order, lower first.
    pub order: i32,
    /// Comma separated dash lengths, empty for a solid line.
    pub dash_pattern: String,
    pub min_zoom: i32,
    pub max_zoom: i32,
    /// Geometry simplification factor, 0 disables it.
    pub decimation_factor: f32,
}

impl Style {
    /// A style with the default look, bound to a layer name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: 5.0,
            fill_color: "red".to_string(),
            stroke_color: "black".to_string(),
            fill_alpha: 0.3,
            stroke_alpha: 1.0,
            shape: "square".to_string(),
            width: 3.0,
            text_size: 5.0,
            text_field: String::new(),
            enabled: false,
            order: 0,
            dash_pattern: String::new(),
            min_zoom: 0,
            max_zoom: 22,
            decimation_factor: 0.0,
        }
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        let defaults = Style::new(row.get::<_, String>(0)?);
        Ok(Self {
            size: row.get::<_, Option<f32>>(1)?.unwrap_or(defaults.size),
            fill_color: row
                .get::<_, Option<String>>(2)?
                .unwrap_or_else(|| defaults.fill_color.clone()),
            stroke_color: row
                .get::<_, Option<String>>(3)?
                .unwrap_or_else(|| defaults.stroke_color.clone()),
            fill_alpha: row.get::<_, Option<f32>>(4)?.unwrap_or(defaults.fill_alpha),
            stroke_alpha: row.get::<_, Option<f32>>(5)?.unwrap_or(defaults.stroke_alpha),
            shape: row
                .get::<_, Option<String>>(6)?
                .unwrap_or_else(|| defaults.shape.clone()),
            width: row.get::<_, Option<f32>>(7)?.unwrap_or(defaults.width),
            text_size: row.get::<_, Option<f32>>(8)?.unwrap_or(defaults.text_size),
            text_field: row.get::<_, Option<String>>(9)?.unwrap_or_default(),
            enabled: row.get::<_, Option<i64>>(10)?.unwrap_or(0) != 0,
            order: row.get::<_, Option<i32>>(11)?.unwrap_or(defaults.order),
            dash_pattern: row.get::<_, Option<String>>(12)?.unwrap_or_default(),
            min_zoom: row.get::<_, Option<i32>>(13)?.unwrap_or(defaults.min_zoom),
            max_zoom: row.get::<_, Option<i32>>(14)?.unwrap_or(defaults.max_zoom),
            decimation_factor: row
                .get::<_, Option<f32>>(15)?
                .unwrap_or(defaults.decimation_factor),
            name: defaults.name,
        })
    }
}

/// Access to the `dataproperties` table holding one style per layer name.
#[derive(Debug, Clone, Copy)]
pub struct StyleTable<'a> {
    conn: &'a rusqlite::Connection,
    read_only: bool,
}

impl<'a> StyleTable<'a> {
    pub fn new(conn: &'a rusqlite::Connection) -> Self {
        Self {
            conn,
            read_only: false,
        }
    }

    /// A table that rejects writes with [`SpatialError::ReadOnly`].
    pub fn new_read_only(conn: &'a rusqlite::Connection) -> Self {
        Self {
            conn,
            read_only: true,
        }
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Create the table if it is missing.
    pub fn create_table(&self) -> Result<()> {
        self.ensure_writable()?;
        self.conn.execute_batch(SQL_DATAPROPERTIES)?;
        Ok(())
    }

    pub fn exists(&self) -> Result<bool> {
        let exists: i64 = self
            .conn
            .query_row(SQL_HAS_DATAPROPERTIES, [], |row| row.get(0))?;
        Ok(exists != 0)
    }

    /// Insert the style, replacing any style stored under the same name.
    pub fn save(&self, style: &Style) -> Result<()> {
        self.ensure_writable()?;
        self.conn.execute(
            SQL_UPSERT_STYLE,
            rusqlite::params![
                style.name,
                style.size,
                style.fill_color,
                style.stroke_color,
                style.fill_alpha,
                style.stroke_alpha,
                style.shape,
                style.width,
                style.text_size,
                style.text_field,
                style.enabled,
                style.order,
                style.dash_pattern,
                style.min_zoom,
                style.max_zoom,
                style.decimation_factor,
            ],
        )?;
        tracing::debug!(layer = %style.name, "saved style");
        Ok(())
    }

    /// Load the style of a layer. A database without a `dataproperties`
    /// table has no styles.
    pub fn load(&self, name: &str) -> Result<Option<Style>> {
        if !self.exists()? {
            return Ok(None);
        }
        let mut stmt = self.conn.prepare_cached(&sql_select_style(true))?;
        let style = stmt.query_row([name], Style::from_row).optional()?;
        Ok(style)
    }

    /// All styles ordered by drawing order.
    pub fn load_all(&self) -> Result<Vec<Style>> {
        if !self.exists()? {
            return Ok(Vec::new());
        }
        let mut stmt = self.conn.prepare(&sql_select_style(false))?;
        let styles = stmt
            .query_map([], Style::from_row)?
            .collect::<std::result::Result<Vec<Style>, _>>()?;
        Ok(styles)
    }

    fn ensure_writable(&self) -> Result<()> {
        if self.read_only {
            return Err(SpatialError::ReadOnly);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    #[test]
    fn default_style_values() {
        let style = Style::new("roads");
        assert_eq!(style.name, "roads");
        assert_eq!(style.size, 5.0);
        assert_eq!(style.fill_color, "red");
        assert_eq!(style.stroke_color, "black");
        assert_eq!(style.shape, "square");
        assert_eq!(style.max_zoom, 22);
        assert!(!style.enabled);
    }

    #[test]
    fn saves_and_loads_styles() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        let table = StyleTable::new(&conn);
        assert!(!table.exists()?);
        assert_eq!(table.load("roads")?, None);

        table.create_table()?;
        assert!(table.exists()?);

        let mut roads = Style::new("roads");
        roads.stroke_color = "#ff8800".to_string();
        roads.enabled = true;
        roads.order = 2;
        roads.dash_pattern = "10,5".to_string();
        table.save(&roads)?;

        let mut wells = Style::new("wells");
        wells.shape = "circle".to_string();
        wells.order = 1;
        table.save(&wells)?;

        assert_eq!(table.load("roads")?, Some(roads.clone()));
        assert_eq!(table.load("missing")?, None);

        let all = table.load_all()?;
        let names: Vec<&str> = all.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["wells", "roads"]);

        roads.width = 7.5;
        table.save(&roads)?;
        assert_eq!(table.load("roads")?.map(|s| s.width), Some(7.5));
        assert_eq!(table.load_all()?.len(), 2);

        Ok(())
    }

    #[test]
    fn read_only_table_rejects_writes() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        StyleTable::new(&conn).create_table()?;

        let table = StyleTable::new_read_only(&conn);
        assert!(table.is_read_only());
        assert!(matches!(table.create_table(), Err(SpatialError::ReadOnly)));
        assert!(matches!(
            table.save(&Style::new("roads")),
            Err(SpatialError::ReadOnly)
        ));
        assert_eq!(table.load_all()?, Vec::new());
        Ok(())
    }

    #[test]
    fn null_columns_fall_back_to_defaults() -> Result<()> {
        let conn = Connection::open_in_memory()?;
        let table = StyleTable::new(&conn);
        table.create_table()?;
        conn.execute("INSERT INTO dataproperties (name) VALUES ('bare')", [])?;

        let style = table.load("bare")?.expect("stored style");
        assert_eq!(style, Style::new("bare"));
        Ok(())
    }
}
