use geoscore::{GeoScoreError, ScoreCell, cell_size, decode};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), GeoScoreError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let lon = -0.1278;
    let lat = 51.5074;

    let cell = ScoreCell::from_wgs84(&(lon, lat))?;
    tracing::info!(score = cell.score, "encoded london");

    println!("Score: {}", cell.score);
    println!("Grid: lat={}, lon={}", cell.grid.lat, cell.grid.lon);

    let (decoded_lat, decoded_lon) = decode(cell.score);
    println!("Center: ({:.15}, {:.15})", decoded_lat, decoded_lon);

    let (lat_size, lon_size) = cell_size();
    println!("Cell size: {:e} x {:e} degrees", lat_size, lon_size);
    println!("Polygon: {:?}", cell.to_polygon());

    Ok(())
}
