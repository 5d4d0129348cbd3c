//! open-ds-hub CLI: command-line DualSense lightbar and status tool.

use anyhow::Result;
use clap::{Parser, Subcommand};
use open_ds_hub_core::device::{Color, ConnectionMode, DeviceInfo};
use open_ds_hub_core::transport::HidTransport;

const READ_TIMEOUT_MS: i32 = 1000;

struct CliHidTransport {
    device: hidapi::HidDevice,
    mode: ConnectionMode,
}

impl CliHidTransport {
    fn open_first_supported() -> Result<Self> {
        let devices = open_ds_hub_core::device::discover_devices()?;
        let first = devices
            .first()
            .ok_or_else(|| anyhow::anyhow!("No supported DualSense controller found"))?;

        let api = hidapi::HidApi::new().map_err(|e| anyhow::anyhow!("hidapi init: {e}"))?;
        let device = api.open(first.vid, first.pid).map_err(|e| {
            anyhow::anyhow!(
                "open HID device (VID=0x{:04X} PID=0x{:04X}): {e}",
                first.vid,
                first.pid
            )
        })?;

        Ok(Self {
            device,
            mode: first.mode,
        })
    }
}

impl HidTransport for CliHidTransport {
    fn write_report(&self, data: &[u8]) -> open_ds_hub_core::error::Result<usize> {
        self.device
            .write(data)
            .map_err(|e| open_ds_hub_core::error::Error::Hid(format!("write: {e}")))
    }

    fn read_input_report(
        &self,
        buf: &mut [u8],
        timeout_ms: i32,
    ) -> open_ds_hub_core::error::Result<usize> {
        let n = self
            .device
            .read_timeout(buf, timeout_ms)
            .map_err(|e| open_ds_hub_core::error::Error::Hid(format!("read_timeout: {e}")))?;

        if n == 0 {
            return Err(open_ds_hub_core::error::Error::Timeout(format!(
                "hid_read timed out after {timeout_ms}ms"
            )));
        }

        Ok(n)
    }
}

#[derive(Parser)]
#[command(
    name = "open-ds-hub",
    version,
    about = "Open-source DualSense lightbar control"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List connected DualSense controllers.
    ListDevices,
    /// Report whether a supported controller is present.
    Status,
    /// Set the lightbar color from channel values (0-255 each).
    SetColor {
        /// Red channel.
        red: u16,
        /// Green channel.
        green: u16,
        /// Blue channel.
        blue: u16,
        /// Build and print the report without sending it to the device.
        #[arg(long)]
        dry_run: bool,
    },
    /// Set the lightbar color from a hex string (RRGGBB, #RRGGBB, 0xRRGGBB).
    SetHex {
        /// Color, e.g. ff8000.
        color: String,
        /// Build and print the report without sending it to the device.
        #[arg(long)]
        dry_run: bool,
    },
    /// Read and decode input reports (stick, cross button, battery).
    Monitor {
        /// Number of reports to read.
        #[arg(long, default_value_t = 10)]
        count: u32,
        /// Print snapshots as JSON lines.
        #[arg(long)]
        json: bool,
    },
}

fn print_device(dev: &DeviceInfo) {
    println!(
        "{} via {} (VID: 0x{:04X}, PID: 0x{:04X}, path: {})",
        dev.model.name(),
        dev.mode,
        dev.vid,
        dev.pid,
        dev.path
    );
}

/// Print a report as a hex byte map, 16 bytes per row.
fn print_report(report: &[u8]) {
    for (row, chunk) in report.chunks(16).enumerate() {
        print!("{:3}:", row * 16);
        for byte in chunk {
            print!(" {byte:02X}");
        }
        println!();
    }
}

fn apply_color(red: u16, green: u16, blue: u16, dry_run: bool) -> Result<()> {
    let transport = CliHidTransport::open_first_supported()?;
    let mode = transport.mode;
    let report =
        open_ds_hub_core::lightbar::set_color(&transport, mode, red, green, blue, !dry_run)?;

    if dry_run {
        println!("Built {} report ({} bytes), not sent:", mode, report.len());
        print_report(&report);
    } else {
        println!("Lightbar set to #{red:02X}{green:02X}{blue:02X} via {mode}");
    }
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::ListDevices => {
            let devices = open_ds_hub_core::device::discover_devices()?;
            if devices.is_empty() {
                println!("No DualSense controllers found.");
                println!("Ensure the controller is connected and udev rules are set up.");
            } else {
                for dev in &devices {
                    print_device(dev);
                }
            }
        }
        Commands::Status => {
            use open_ds_hub_core::comm::DeviceStatus;
            match open_ds_hub_core::comm::device_status() {
                DeviceStatus::Connected => println!("Controller connected."),
                DeviceStatus::Disconnected => println!("No controller found."),
                DeviceStatus::PermissionError => {
                    println!("Permission denied. Check udev rules or run with elevated rights.")
                }
                DeviceStatus::Error => println!("Device enumeration failed."),
            }
        }
        Commands::SetColor {
            red,
            green,
            blue,
            dry_run,
        } => {
            apply_color(red, green, blue, dry_run)?;
        }
        Commands::SetHex { color, dry_run } => {
            let parsed = Color::from_hex(&color).ok_or_else(|| {
                anyhow::anyhow!("Invalid color '{color}'. Use hex like ff8000 or #FF8000.")
            })?;
            apply_color(parsed.r as u16, parsed.g as u16, parsed.b as u16, dry_run)?;
        }
        Commands::Monitor { count, json } => {
            let transport = CliHidTransport::open_first_supported()?;
            let mut read = 0;
            while read < count {
                match open_ds_hub_core::lightbar::read_status(&transport, READ_TIMEOUT_MS) {
                    Ok(snap) => {
                        read += 1;
                        if json {
                            println!("{}", serde_json::to_string(&snap)?);
                        } else {
                            let charging = match snap.charging {
                                Some(true) => " charging",
                                Some(false) => " on battery",
                                None => "",
                            };
                            println!(
                                "report 0x{:02X} | stick {:3}/{:3} | cross {} | battery {:3}%{}",
                                snap.report_id,
                                snap.stick_x,
                                snap.stick_y,
                                if snap.cross_pressed { "PRESS" } else { "---" },
                                snap.battery_percent,
                                charging
                            );
                        }
                    }
                    // The controller emits report types we don't decode;
                    // skip them without counting toward --count.
                    Err(open_ds_hub_core::error::Error::UnrecognizedReport { .. }) => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    Ok(())
}
