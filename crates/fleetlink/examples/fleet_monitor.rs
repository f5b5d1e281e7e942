//! Fleetlink Fleet Monitor Example
//!
//! Console client exercising the event-bus socket against a running control
//! server: subscribes to fleet telemetry, prints it, and toggles a drone's
//! LED on startup.
//!
//! Run with: cargo run -p fleetlink --example fleet_monitor -- [host] [port]

use fleetlink::net::{EventBusSocket, SocketConfig};
use fleetlink::{DronePosition, DroneStatus, MissionState, SocketEvent};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let mut args = std::env::args().skip(1);
    let host = args.next().unwrap_or_else(|| "localhost".to_string());
    let port = args
        .next()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(5678);

    let socket = EventBusSocket::new(SocketConfig::new(host, port));

    socket.on_connection_change(|connected| {
        println!("connection is now {}", if connected { "up" } else { "down" });
    });

    socket.subscribe(SocketEvent::DroneIds, |data| {
        println!("fleet roster: {data}");
    });

    socket.subscribe(SocketEvent::MissionState, |data| {
        match serde_json::from_value::<MissionState>(data.clone()) {
            Ok(state) => println!("mission state: {state}"),
            Err(_) => println!("mission state (unparsed): {data}"),
        }
    });

    socket.subscribe(SocketEvent::DronePosition, |data| {
        if let Ok(position) = serde_json::from_value::<DronePosition>(data.clone()) {
            let [x, y, z] = position.position;
            println!("{} at ({x:.2}, {y:.2}, {z:.2})", position.drone_id);
        }
    });

    socket.subscribe_drone(SocketEvent::BatteryLevel, "drone-7", |data| {
        println!("drone-7 battery: {data}");
    });

    socket.subscribe_drone(SocketEvent::DroneStatus, "drone-7", |data| {
        if let Ok(status) = serde_json::from_value::<DroneStatus>(data.clone()) {
            println!("drone-7 status: {status}");
        }
    });

    socket.connect();

    // Publishing is fire-and-forget, so wait for the connection before the
    // one-shot LED command; everything above survives reconnects as-is.
    while !socket.is_connected() {
        tokio::time::sleep(std::time::Duration::from_millis(100)).await;
    }

    // Blink drone-7 so the operator can spot it on the pad.
    socket.publish_drone(SocketEvent::SetLed, "drone-7", serde_json::json!(true));

    tokio::signal::ctrl_c().await.expect("install Ctrl-C handler");
    socket.close();
}
