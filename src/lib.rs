pub mod api;
pub mod cli;
pub mod config;
pub mod db;

pub use db::Simulator;

use config::Config;
use parking_lot::Mutex;

use crate::api::passthrough::Passthrough;

pub struct AppState {
    pub config: Config,
    pub simulator: Mutex<Simulator>,
    pub passthrough: Option<Passthrough>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let simulator = Mutex::new(Simulator::new(&config.simulator));
        let passthrough = config
            .simulator
            .passthrough_url
            .as_deref()
            .map(Passthrough::new)
            .transpose()?;

        Ok(Self {
            config,
            simulator,
            passthrough,
        })
    }

    /// Replace the simulator with a freshly seeded one
    pub fn reset(&self) {
        *self.simulator.lock() = Simulator::new(&self.config.simulator);
    }
}
