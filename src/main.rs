//! # Papelito CLI
//!
//! Command-line interface for the thermal image print server.
//!
//! ## Usage
//!
//! ```bash
//! # Run the HTTP print server
//! papelito serve --listen 0.0.0.0:5500
//!
//! # Print local image files directly
//! papelito print photo1.jpg photo2.png --cut
//!
//! # Cut the paper
//! papelito cut
//! ```

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use std::time::Duration;

use papelito::{
    job::{self, JobImage},
    server::{self, ServerConfig},
    DeviceSession, PapelitoError, PrinterConfig, UsbTransport,
};

/// Papelito - print remote images on a thermal receipt printer
#[derive(Parser, Debug)]
#[command(name = "papelito")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Arguments identifying the attached printer.
#[derive(Args, Debug)]
struct PrinterArgs {
    /// Print width in dots
    #[arg(long, default_value_t = PrinterConfig::TM_T20III.width_dots)]
    width: u16,

    /// USB vendor id (hex)
    #[arg(long, value_parser = parse_hex_u16, default_value = "04b8")]
    vendor_id: u16,

    /// USB product id (hex)
    #[arg(long, value_parser = parse_hex_u16, default_value = "0e28")]
    product_id: u16,
}

impl PrinterArgs {
    fn config(&self) -> PrinterConfig {
        let default = PrinterConfig::TM_T20III;
        if self.width == default.width_dots
            && self.vendor_id == default.vendor_id
            && self.product_id == default.product_id
        {
            default
        } else {
            PrinterConfig::custom(self.width, self.vendor_id, self.product_id)
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run the HTTP print server
    Serve {
        /// Address to listen on
        #[arg(long, default_value = "0.0.0.0:5500")]
        listen: String,

        /// Settle delay between images, in milliseconds
        #[arg(long, default_value_t = 1000)]
        settle_ms: u64,

        /// Fail a job (HTTP 500) when any image fetch fails
        #[arg(long)]
        strict_fetch: bool,

        #[command(flatten)]
        printer: PrinterArgs,
    },

    /// Print local image files
    Print {
        /// Image files to print, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,

        /// Cut the paper after printing
        #[arg(long)]
        cut: bool,

        /// Settle delay between images, in milliseconds
        #[arg(long, default_value_t = 1000)]
        settle_ms: u64,

        #[command(flatten)]
        printer: PrinterArgs,
    },

    /// Cut the paper (emits only the cut command)
    Cut {
        #[command(flatten)]
        printer: PrinterArgs,
    },
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), PapelitoError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            listen,
            settle_ms,
            strict_fetch,
            printer,
        } => {
            let config = printer.config();
            let transport = UsbTransport::open(config.vendor_id, config.product_id)?;
            let mut session = DeviceSession::open(transport)?;
            session.set_settle_delay(Duration::from_millis(settle_ms));

            let server_config = ServerConfig {
                listen_addr: listen,
                printer: config,
                strict_fetch,
            };

            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(server::serve(server_config, session))
        }

        Commands::Print {
            files,
            cut,
            settle_ms,
            printer,
        } => {
            let config = printer.config();
            let transport = UsbTransport::open(config.vendor_id, config.product_id)?;
            let mut session = DeviceSession::open(transport)?;
            session.set_settle_delay(Duration::from_millis(settle_ms));

            let mut images = Vec::with_capacity(files.len());
            for file in files {
                let source = file.display().to_string();
                let payload = std::fs::read(&file).map_err(PapelitoError::from);
                images.push(JobImage { source, payload });
            }

            let report = job::run(&mut session, &config, images)?;
            println!("Printed {} image(s)", report.printed);

            if cut {
                session.cut()?;
            }
            Ok(())
        }

        Commands::Cut { printer } => {
            let config = printer.config();
            let transport = UsbTransport::open(config.vendor_id, config.product_id)?;
            // No reset here: cutting must emit the cut command and nothing else
            let mut session = DeviceSession::new(transport);
            session.cut()?;
            println!("Paper cut");
            Ok(())
        }
    }
}

/// Parse a USB id given as hex, with or without a "0x" prefix.
fn parse_hex_u16(s: &str) -> Result<u16, String> {
    let digits = s.trim_start_matches("0x").trim_start_matches("0X");
    u16::from_str_radix(digits, 16).map_err(|e| format!("invalid hex id '{}': {}", s, e))
}
