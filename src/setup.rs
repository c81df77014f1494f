use crate::config::Config;
use crate::port::{is_standard_baud_rate, PortOpener};
use log::{debug, info};
use std::io::Write;

pub static CONFIRMATION: &str = "\nButton Box Serial Setup Complete\n";

#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    #[error("unsupported baud rate {0}")]
    BaudRate(u32),
    #[error("could not open serial port {path}: {source}")]
    Open {
        path: String,
        source: serialport::Error,
    },
    #[error("failed to write confirmation: {0}")]
    Output(#[from] std::io::Error),
}

/// Opens the configured port, closes it again without any I/O and writes the
/// confirmation to `out`.
///
/// # Errors
///
/// Will return `Err` if the baud rate is not a standard speed or the port
/// cannot be opened, in which case nothing is written, or if writing the
/// confirmation fails.
pub fn run(
    opener: &impl PortOpener,
    config: &Config,
    out: &mut impl Write,
) -> Result<(), SetupError> {
    if !is_standard_baud_rate(config.baud_rate) {
        return Err(SetupError::BaudRate(config.baud_rate));
    }
    debug!(
        "Opening {} at {} baud",
        config.serial_port, config.baud_rate
    );
    let serial_port = opener
        .open(&config.serial_port, config.baud_rate)
        .map_err(|source| SetupError::Open {
            path: config.serial_port.clone(),
            source,
        })?;
    drop(serial_port);
    debug!("Closed {}", config.serial_port);

    writeln!(out, "{CONFIRMATION}")?;
    out.flush()?;
    info!("Serial setup of {} complete", config.serial_port);
    Ok(())
}
