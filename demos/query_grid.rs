//! Runs a query against a daily precipitation grid stored as CSV.
//!
//! ```text
//! cargo run --example query_grid -- data/imerg_aug15.csv -0.4197 36.9489
//! ```
//!
//! The CSV needs `lat`, `lon`, `date` and `precipitation` columns.

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use weather_probability::{
    DayOfYear, FrameDataSource, GridFrame, LatLon, ThresholdSet, WeatherProbability,
    WeatherVariable, YearRange,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = env::args().skip(1);
    let path = PathBuf::from(args.next().ok_or("usage: query_grid <csv> [lat] [lon]")?);
    let lat: f64 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(-0.4197);
    let lon: f64 = args.next().map(|a| a.parse()).transpose()?.unwrap_or(36.9489);

    let grid = GridFrame::from_csv(WeatherVariable::Precipitation, &path)?;
    println!("Loaded {} grid points from {}", grid.grid_size(), path.display());

    let source = FrameDataSource::builder().grids(vec![grid]).build();
    let service = WeatherProbability::builder()
        .source(Arc::new(source))
        .max_concurrent_fetches(8)
        .build()
        .await?;

    let envelope = service
        .query()
        .location(LatLon(lat, lon))
        .day_of_year(DayOfYear::new(8, 15)?)
        .years(YearRange::new(2001, 2024)?)
        .variables(vec![WeatherVariable::Precipitation])
        .thresholds(
            [(
                WeatherVariable::Precipitation,
                ThresholdSet::from_named([("wet", 10.0), ("dry", 1.0)]),
            )]
            .into(),
        )
        .call()
        .await?;

    println!("{}", serde_json::to_string_pretty(&envelope)?);
    service.close().await?;
    Ok(())
}
