//! Table and column names of the field-data project database.
//!
//! A project database stores notes, images, and GPS logs next to a key/value
//! `metadata` table. Each table has an enum listing its fields with their
//! value type; [`TableSchema::create_table_sql`] turns an enum into the
//! matching `CREATE TABLE` statement.

use crate::error::Result;
use crate::sql::sql_create_table;

pub const TABLE_METADATA: &str = "metadata";
pub const TABLE_NOTES: &str = "notes";
pub const TABLE_IMAGES: &str = "images";
pub const TABLE_IMAGE_DATA: &str = "imagedata";
pub const TABLE_GPSLOGS: &str = "gpslogs";
pub const TABLE_GPSLOG_DATA: &str = "gpslogsdata";
pub const TABLE_GPSLOG_PROPERTIES: &str = "gpslogsproperties";

/// The value type stored in a field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldType {
    Text,
    Integer,
    Long,
    Double,
    Float,
    Blob,
}

impl FieldType {
    pub fn sql_type(self) -> &'static str {
        match self {
            FieldType::Text => "TEXT",
            FieldType::Integer | FieldType::Long => "INTEGER",
            FieldType::Double | FieldType::Float => "REAL",
            FieldType::Blob => "BLOB",
        }
    }
}

/// Name of the generated row id column shared by all data tables.
pub const ID_FIELD: &str = "_id";

/// A table of the project database.
pub trait TableSchema: Copy + 'static {
    const TABLE_NAME: &'static str;

    /// The fields stored as columns, in table order.
    fn columns() -> &'static [Self];

    fn field_name(self) -> &'static str;

    fn field_type(self) -> FieldType;

    fn create_table_sql() -> String {
        let column_defs = Self::columns()
            .iter()
            .map(|field| {
                let name = field.field_name();
                if name == ID_FIELD {
                    format!(r#""{name}" INTEGER PRIMARY KEY AUTOINCREMENT"#)
                } else {
                    format!(r#""{name}" {}"#, field.field_type().sql_type())
                }
            })
            .collect::<Vec<String>>()
            .join(", ");
        sql_create_table(Self::TABLE_NAME, &column_defs)
    }
}

macro_rules! project_table {
    (
        $(#[$meta:meta])*
        $name:ident => $table:expr,
        { $( $(#[$vmeta:meta])* $variant:ident => ($field:literal, $ty:ident) ),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        pub enum $name {
            $( $(#[$vmeta])* $variant, )+
        }

        impl TableSchema for $name {
            const TABLE_NAME: &'static str = $table;

            fn columns() -> &'static [Self] {
                &[$( $name::$variant, )+]
            }

            fn field_name(self) -> &'static str {
                match self {
                    $( $name::$variant => $field, )+
                }
            }

            fn field_type(self) -> FieldType {
                match self {
                    $( $name::$variant => FieldType::$ty, )+
                }
            }
        }
    };
}

/// Fields of the `metadata` table.
///
/// Only `ColumnKey` and `ColumnValue` are columns, the `Key*` variants are
/// the well-known values of the key column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MetadataTableFields {
    ColumnKey,
    ColumnValue,
    /// Project name or title.
    KeyName,
    KeyDescription,
    KeyNotes,
    /// Creation timestamp.
    KeyCreationTs,
    /// Last available timestamp.
    KeyLastTs,
    /// The user that created the project.
    KeyCreationUser,
    /// The last user working on the project.
    KeyLastUser,
}

impl MetadataTableFields {
    pub const KEYS: [MetadataTableFields; 7] = [
        MetadataTableFields::KeyName,
        MetadataTableFields::KeyDescription,
        MetadataTableFields::KeyNotes,
        MetadataTableFields::KeyCreationTs,
        MetadataTableFields::KeyLastTs,
        MetadataTableFields::KeyCreationUser,
        MetadataTableFields::KeyLastUser,
    ];
}

impl TableSchema for MetadataTableFields {
    const TABLE_NAME: &'static str = TABLE_METADATA;

    fn columns() -> &'static [Self] {
        &[MetadataTableFields::ColumnKey, MetadataTableFields::ColumnValue]
    }

    fn field_name(self) -> &'static str {
        match self {
            MetadataTableFields::ColumnKey => "key",
            MetadataTableFields::ColumnValue => "value",
            MetadataTableFields::KeyName => "name",
            MetadataTableFields::KeyDescription => "description",
            MetadataTableFields::KeyNotes => "notes",
            MetadataTableFields::KeyCreationTs => "creationts",
            MetadataTableFields::KeyLastTs => "lastts",
            MetadataTableFields::KeyCreationUser => "creationuser",
            MetadataTableFields::KeyLastUser => "lastuser",
        }
    }

    fn field_type(self) -> FieldType {
        match self {
            MetadataTableFields::KeyCreationTs | MetadataTableFields::KeyLastTs => FieldType::Long,
            _ => FieldType::Text,
        }
    }
}

project_table! {
    /// Fields of the `notes` table. Coordinates are WGS84.
    NotesTableFields => TABLE_NOTES,
    {
        ColumnId => ("_id", Long),
        ColumnLon => ("lon", Double),
        ColumnLat => ("lat", Double),
        ColumnAltim => ("altim", Double),
        ColumnTs => ("ts", Long),
        ColumnDescription => ("description", Text),
        ColumnText => ("text", Text),
        /// Form data of the note.
        ColumnForm => ("form", Text),
        /// 0 = clean, 1 = dirty.
        ColumnIsDirty => ("isdirty", Integer),
        ColumnStyle => ("style", Text),
    }
}

project_table! {
    /// Fields of the `images` table.
    ImageTableFields => TABLE_IMAGES,
    {
        ColumnId => ("_id", Long),
        ColumnLon => ("lon", Double),
        ColumnLat => ("lat", Double),
        ColumnAltim => ("altim", Double),
        ColumnTs => ("ts", Long),
        /// Azimuth of the picture.
        ColumnAzim => ("azim", Double),
        ColumnText => ("text", Text),
        ColumnIsDirty => ("isdirty", Integer),
        /// Optional note the image is bound to.
        ColumnNoteId => ("note_id", Long),
        ColumnImageDataId => ("imagedata_id", Long),
    }
}

project_table! {
    ImageDataTableFields => TABLE_IMAGE_DATA,
    {
        ColumnId => ("_id", Long),
        ColumnImage => ("imagedata", Blob),
    }
}

project_table! {
    /// Fields of the `gpslogs` table. Timestamps are UTC.
    GpsLogsTableFields => TABLE_GPSLOGS,
    {
        ColumnId => ("_id", Long),
        ColumnLogStartTs => ("startts", Long),
        ColumnLogEndTs => ("endts", Long),
        /// Track length in meters, as last updated.
        ColumnLogLengthM => ("lengthm", Double),
        ColumnLogIsDirty => ("isdirty", Integer),
        ColumnLogText => ("text", Text),
    }
}

project_table! {
    GpsLogsDataTableFields => TABLE_GPSLOG_DATA,
    {
        ColumnId => ("_id", Long),
        ColumnDataLon => ("lon", Double),
        ColumnDataLat => ("lat", Double),
        ColumnDataAltim => ("altim", Double),
        ColumnDataTs => ("ts", Long),
        ColumnLogId => ("logid", Long),
    }
}

project_table! {
    GpsLogsPropertiesTableFields => TABLE_GPSLOG_PROPERTIES,
    {
        ColumnId => ("_id", Long),
        ColumnPropertiesVisible => ("visible", Integer),
        ColumnPropertiesWidth => ("width", Float),
        ColumnPropertiesColor => ("color", Text),
        ColumnLogId => ("logid", Long),
    }
}

/// Create every project table that does not exist yet.
pub fn create_project_tables(conn: &rusqlite::Connection) -> Result<()> {
    let statements = [
        MetadataTableFields::create_table_sql(),
        NotesTableFields::create_table_sql(),
        ImageTableFields::create_table_sql(),
        ImageDataTableFields::create_table_sql(),
        GpsLogsTableFields::create_table_sql(),
        GpsLogsDataTableFields::create_table_sql(),
        GpsLogsPropertiesTableFields::create_table_sql(),
    ];
    for sql in &statements {
        conn.execute_batch(sql)?;
    }
    tracing::debug!(tables = statements.len(), "created project tables");
    Ok(())
}
