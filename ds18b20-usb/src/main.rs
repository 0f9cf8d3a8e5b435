use std::{io, thread, time::Duration};

use clap::Parser;
use ds18b20::Ds18b20;

mod labels;
mod poll;

use labels::{Labels, parse_label};
use poll::Tasks;

/// Reads DS18B20 sensors wired to USB serial adapters and prints CSV lines
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Serial port to read (repeatable); discovered by prefix when omitted
    #[arg(short, long)]
    port: Vec<String>,
    /// Prefix of the serial ports to discover
    #[arg(long, default_value = "/dev/ttyUSB")]
    port_prefix: String,
    /// Sensor name as SERIAL=NAME, serial number in hex (repeatable)
    #[arg(short, long, value_parser = parse_label)]
    label: Vec<([u8; 6], String)>,
    /// Seconds between polling cycles
    #[arg(short, long, default_value_t = 60)]
    interval: u64,
    /// Run a single cycle and exit
    #[arg(long)]
    once: bool,
    /// Program this resolution (9-12 bits) before reading
    #[arg(short, long, value_parser = clap::value_parser!(u8).range(9..=12))]
    resolution: Option<u8>,
    /// Log the power supply mode of each sensor
    #[arg(long)]
    power: bool,
    /// Log every ROM code found on each bus
    #[arg(long)]
    scan: bool,
    /// Verify ROM code CRCs
    #[arg(long)]
    crc: bool,
    /// Give up on a conversion after this many 500 ms polls
    #[arg(long, default_value_t = 20)]
    max_polls: u32,
}

fn main() -> anyhow::Result<()> {
    // Initialize the logger
    env_logger::init();
    // Parse command line arguments
    let args = Args::parse();
    let labels: Labels = args.label.iter().cloned().collect();
    let sensor = Ds18b20::default()
        .with_max_polls(args.max_polls)
        .with_crc_check(args.crc);
    let tasks = Tasks {
        scan: args.scan,
        power: args.power,
        resolution: args.resolution,
    };
    let mut delay = linux_embedded_hal::Delay;
    let mut out = csv::Writer::from_writer(io::stdout());
    out.write_record(["timestamp", "device", "temperature"])?;
    out.flush()?;
    loop {
        let ports = if args.port.is_empty() {
            onewire_uart::available_ports(&args.port_prefix).unwrap_or_else(|e| {
                log::warn!("{e}");
                Vec::new()
            })
        } else {
            args.port.clone()
        };
        if ports.is_empty() {
            log::warn!("no serial ports to read");
        }
        for path in ports.iter() {
            // one bad port must not stop the others
            match poll::read_port(path, &sensor, tasks, &labels, &mut delay) {
                Ok(reading) => {
                    out.write_record(reading.record())?;
                    out.flush()?;
                }
                Err(e) => log::warn!("{e:#}"),
            }
        }
        if args.once {
            break;
        }
        thread::sleep(Duration::from_secs(args.interval));
    }
    Ok(())
}
