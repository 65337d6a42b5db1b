//! ==============================================================================
//! sensor_sim.rs - Simulated Sensor Node
//! ==============================================================================
//!
//! purpose:
//!     stands in for the ESP32 during development: pushes a plausible
//!     fill/distance reading to the hub every two seconds.
//!
//! usage:
//!     sensor-sim [hub-url]          (default http://127.0.0.1:3000)
//!
//! ==============================================================================

use std::time::Duration;

use anyhow::Result;

/// depth of the demo bin in centimeters; fill level is derived from how much
/// of it the ultrasonic echo says is empty
const BIN_DEPTH_CM: f64 = 100.0;

#[tokio::main]
async fn main() -> Result<()> {
    let base = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://127.0.0.1:3000".to_string());
    let endpoint = format!("{}/api/data", base.trim_end_matches('/'));

    println!("[SIM] pushing readings to {} every 2s", endpoint);

    let client = reqwest::Client::new();
    let mut fill: f64 = 5.0;

    loop {
        // ramp the bin up to full, then pretend someone emptied it
        fill += 7.0;
        if fill > 100.0 {
            fill = 2.0;
        }
        let distance = BIN_DEPTH_CM * (1.0 - fill / 100.0);

        let body = serde_json::json!({ "fillLevel": fill, "distance": distance });
        match client.post(&endpoint).json(&body).send().await {
            Ok(res) if res.status().is_success() => {
                println!("[SIM] sent fill={:.0}% distance={:.0}cm", fill, distance);
            }
            Ok(res) => {
                println!("[SIM] hub rejected reading: {}", res.status());
            }
            Err(e) => {
                println!("[SIM] push failed: {}", e);
            }
        }

        tokio::time::sleep(Duration::from_secs(2)).await;
    }
}
