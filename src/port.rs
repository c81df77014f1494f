use core::time::Duration;
use serialport::{DataBits, FlowControl, Parity, SerialPort, StopBits};

/// Speeds with a termios `B*` constant, 50 to 115200 baud.
pub const STANDARD_BAUD_RATES: [u32; 17] = [
    50, 75, 110, 134, 150, 200, 300, 600, 1_200, 1_800, 2_400, 4_800, 9_600, 19_200, 38_400,
    57_600, 115_200,
];

#[must_use]
pub fn is_standard_baud_rate(baud_rate: u32) -> bool {
    STANDARD_BAUD_RATES.contains(&baud_rate)
}

/// Acquires serial port handles. Dropping the returned handle closes the port.
pub trait PortOpener {
    /// # Errors
    ///
    /// Will return `Err` if the device is missing, not accessible or busy.
    fn open(&self, path: &str, baud_rate: u32) -> Result<Box<dyn SerialPort>, serialport::Error>;
}

/// Opens real devices through the `serialport` crate as raw 8N1 lines
/// without flow control.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemPortOpener;

impl PortOpener for SystemPortOpener {
    fn open(&self, path: &str, baud_rate: u32) -> Result<Box<dyn SerialPort>, serialport::Error> {
        serialport::new(path, baud_rate)
            .data_bits(DataBits::Eight)
            .parity(Parity::None)
            .stop_bits(StopBits::One)
            .flow_control(FlowControl::None)
            .timeout(Duration::from_millis(100))
            .open()
    }
}

/// Names of the serial ports the system reports, empty if enumeration fails.
#[must_use]
pub fn available_ports() -> Vec<String> {
    match serialport::available_ports() {
        Ok(ports) => ports.into_iter().map(|p| p.port_name).collect(),
        Err(e) => {
            log::warn!("Failed to get serial port list: {e}");
            Vec::new()
        }
    }
}
