use std::io::{IsTerminal, Write};

use clap::ValueEnum;
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};
use navprims_packet::N0Packet;
use serde::Serialize;

#[derive(Clone, Debug, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Pretty,
    Raw,
}

impl OutputFormat {
    pub fn default_for_stdout() -> Self {
        if std::io::stdout().is_terminal() {
            Self::Table
        } else {
            Self::Json
        }
    }
}

#[derive(Serialize)]
struct PacketOutput {
    schema_id: &'static str,
    time_of_week: f64,
    latitude_deg: f64,
    longitude_deg: f64,
    height_m: f64,
    v_north: f64,
    v_east: f64,
    v_down: f64,
    heading_deg: f64,
    pitch_deg: f64,
    roll_deg: f64,
}

impl From<&N0Packet> for PacketOutput {
    fn from(packet: &N0Packet) -> Self {
        let [v_north, v_east, v_down] = packet.velocity_ned();
        Self {
            schema_id: "navprims/cli/v1/n0-packet",
            time_of_week: packet.time_of_week(),
            latitude_deg: packet.latitude_deg(),
            longitude_deg: packet.longitude_deg(),
            height_m: packet.height_m(),
            v_north,
            v_east,
            v_down,
            heading_deg: packet.heading_deg(),
            pitch_deg: packet.pitch_deg(),
            roll_deg: packet.roll_deg(),
        }
    }
}

/// Print one decoded packet. Table output is handled by [`print_packet_table`].
pub fn print_packet(packet: &N0Packet, format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Table => {
            let out = PacketOutput::from(packet);
            println!(
                "{}",
                serde_json::to_string(&out).unwrap_or_else(|_| "{}".to_string())
            );
        }
        OutputFormat::Pretty => {
            let [vn, ve, vd] = packet.velocity_ned();
            println!(
                "itow={} lat={} lng={} h={} v_ned=({vn}, {ve}, {vd}) yaw={} pitch={} roll={}",
                packet.time_of_week(),
                packet.latitude_deg(),
                packet.longitude_deg(),
                packet.height_m(),
                packet.heading_deg(),
                packet.pitch_deg(),
                packet.roll_deg(),
            );
        }
        OutputFormat::Raw => print_raw(&packet.to_bytes()),
    }
}

pub fn print_packet_table(packets: &[N0Packet]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            "ITOW", "LAT", "LNG", "HEIGHT", "V_N", "V_E", "V_D", "YAW", "PITCH", "ROLL",
        ]);
    for packet in packets {
        let [vn, ve, vd] = packet.velocity_ned();
        table.add_row(vec![
            packet.time_of_week().to_string(),
            packet.latitude_deg().to_string(),
            packet.longitude_deg().to_string(),
            packet.height_m().to_string(),
            vn.to_string(),
            ve.to_string(),
            vd.to_string(),
            packet.heading_deg().to_string(),
            packet.pitch_deg().to_string(),
            packet.roll_deg().to_string(),
        ]);
    }
    println!("{table}");
}

/// One row of `resolve` output.
#[derive(Debug, Serialize)]
pub struct ResolutionOutput {
    pub specifier: String,
    pub kind: &'static str,
    pub direction: String,
    pub pool_key: Option<String>,
    pub reused: bool,
    pub target: String,
}

pub fn print_resolutions(rows: &[ResolutionOutput], format: OutputFormat) {
    match format {
        OutputFormat::Json | OutputFormat::Raw => {
            for row in rows {
                println!(
                    "{}",
                    serde_json::to_string(row).unwrap_or_else(|_| "{}".to_string())
                );
            }
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .set_content_arrangement(ContentArrangement::Dynamic)
                .set_header(vec!["SPECIFIER", "KIND", "DIRECTION", "POOL KEY", "REUSED"]);
            for row in rows {
                table.add_row(vec![
                    row.specifier.clone(),
                    row.kind.to_string(),
                    row.direction.clone(),
                    row.pool_key.clone().unwrap_or_else(|| "-".to_string()),
                    row.reused.to_string(),
                ]);
            }
            println!("{table}");
        }
        OutputFormat::Pretty => {
            for row in rows {
                println!(
                    "{} kind={} direction={} key={} reused={}",
                    row.specifier,
                    row.kind,
                    row.direction,
                    row.pool_key.as_deref().unwrap_or("-"),
                    row.reused
                );
            }
        }
    }
}

pub fn print_raw(data: &[u8]) {
    let mut out = std::io::stdout();
    let _ = out.write_all(data);
    let _ = out.flush();
}
