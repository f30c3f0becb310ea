use spatialite_layers::SpatialiteDb;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run() {
        eprintln!("list_layers failed: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: list_layers <path-to-sqlite>")?;
    let db = SpatialiteDb::open_read_only(path)?;

    for table in db.vector_tables()? {
        println!("layer: {}.{}", table.name(), table.geometry_column());
        println!(
            "  type: {} ({}), srid: {}, rows: {}",
            table.geometry_type(),
            table.shape_kind(),
            table.srid(),
            table.row_count()
        );
        println!("  bounds: {}", table.bounds_to_string());
        println!("  center: {}", table.center_to_string());
        println!("  zoom: {}", table.zoom_levels());
        println!("  description: {}", table.description());
        if let Some(style) = table.style() {
            println!(
                "  style: stroke={} fill={} width={}",
                style.stroke_color, style.fill_color, style.width
            );
        }
    }

    Ok(())
}
