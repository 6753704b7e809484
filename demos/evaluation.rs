use chrono::{TimeZone, Utc};
use chrono_tz::Europe::London;
use log::info;

use rainbow_finder::{evaluate, EvaluationConfig, Forecast, GeoPoint};

const FORECAST: &str = r#"{
    "current": {"rain": 0.0, "clouds": 90, "visibility": 6000, "weather": [{"id": 804}]},
    "hourly": [
        {"rain": {"1h": 0.3}, "clouds": 75, "visibility": 9000, "weather": [{"id": 500}]},
        {"clouds": 55, "visibility": 10000, "weather": [{"id": 301}]},
        {"rain": {"1h": 1.8}, "clouds": 45, "visibility": 12000, "weather": [{"id": 501}]}
    ]
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_timed();

    let center = GeoPoint::new(51.5, -0.12)?;
    let forecast = Forecast::from_json(FORECAST)?;
    let now = London.with_ymd_and_hms(2026, 6, 21, 17, 0, 0).unwrap();

    println!("=== Rainbow Evaluation Example ===");
    println!("Location: London ({:.2}°N, {:.2}°W)", center.latitude, -center.longitude);
    println!();

    for hour_offset in 0..4 {
        let config = EvaluationConfig {
            hour_offset,
            ..Default::default()
        };
        let instant = rainbow_finder::instant_for_offset(now.with_timezone(&Utc), hour_offset)
            .ok_or("forecast hour out of range")?;
        let result = evaluate(&center, &instant, &config, &forecast)?;
        info!("hour +{} evaluated: {:?}", hour_offset, result.status);

        println!("--- {} ---", instant.with_timezone(&London));
        println!("Sun elevation: {:.2}°", result.sun.elevation);
        println!("Sun azimuth: {:.2}° (0°=N, 90°=E, 180°=S)", result.sun.azimuth);
        println!("Status: {:?}", result.status);
        if let Some(best) = result.best_cell() {
            println!(
                "Best direction: {:.1}° at ({:.4}, {:.4}), score {:.3}",
                best.bearing_from_center, best.point.latitude, best.point.longitude, best.score
            );
            println!("Scored cells: {}", result.cells.len());
        }
        println!();
    }
    Ok(())
}
