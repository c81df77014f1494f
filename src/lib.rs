pub mod config;
pub mod port;
pub mod setup;

pub use config::{Config, ConfigError, Overrides};
pub use port::{
    available_ports, is_standard_baud_rate, PortOpener, SystemPortOpener, STANDARD_BAUD_RATES,
};
pub use setup::{run, SetupError, CONFIRMATION};
