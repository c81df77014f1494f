use button_box_serial_setup::{
    available_ports, run, Config, ConfigError, Overrides, SetupError, SystemPortOpener,
    STANDARD_BAUD_RATES,
};
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;

/// Opens and closes the button box serial port so it is ready for use.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Serial device, e.g. /dev/ttyUSB0
    port: Option<String>,

    /// Baud rate the device is configured for
    #[arg(short, long)]
    baud_rate: Option<u32>,

    /// Configuration file instead of the one in the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Store the effective settings in the configuration file
    #[arg(long)]
    save: bool,

    /// List available serial ports and exit
    #[arg(short, long)]
    list: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            config_file: self.config.clone(),
            create_config_file: self.save,
            serial_port: self.port.clone(),
            baud_rate: self.baud_rate,
        }
    }
}

fn print_available_ports() {
    for port in available_ports() {
        println!("{port}");
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if cli.list {
        print_available_ports();
        return ExitCode::SUCCESS;
    }

    let (config, path) = match Config::resolve(&cli.overrides(), Config::default_file()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    if cli.save {
        let saved = path
            .ok_or(ConfigError::NoConfigDir)
            .and_then(|path| config.save(&path));
        if let Err(e) = saved {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    }

    if let Err(e) = run(&SystemPortOpener, &config, &mut std::io::stdout()) {
        match &e {
            SetupError::Open { path, source } => {
                eprintln!("Could not open serial port {path}: {source}");
                eprintln!("You can pass one of the following as argument:");
                for port in available_ports() {
                    eprintln!("{port}");
                }
            }
            SetupError::BaudRate(baud_rate) => {
                eprintln!("Unsupported baud rate {baud_rate}, use one of:");
                for rate in STANDARD_BAUD_RATES {
                    eprintln!("{rate}");
                }
            }
            SetupError::Output(_) => eprintln!("{e}"),
        }
        return ExitCode::FAILURE;
    }

    ExitCode::SUCCESS
}
