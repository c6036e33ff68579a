//! In-memory state behind the simulated API.
//!
//! Everything a handler may read or mutate lives in one [`Simulator`] value,
//! built fresh for each run and handed to handlers by `&mut`.

mod catalog;
mod models;
mod pagination;
mod seeders;
mod session;
mod users;

pub use catalog::FranchiseCatalog;
pub use models::*;
pub use pagination::{NameFilter, Page, PageRequest, DEFAULT_LIMIT, DEFAULT_PAGE, MATCH_ALL};
pub use seeders::{menu, order_history, seed_franchises, seed_users};
pub use session::Session;
pub use users::UserStore;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use crate::config::SimulatorConfig;

/// Franchise admin ids are drawn from `0..ADMIN_ID_RANGE`.
pub const ADMIN_ID_RANGE: u32 = 1000;

#[derive(Debug)]
pub struct Simulator {
    pub users: UserStore,
    pub session: Session,
    pub catalog: FranchiseCatalog,
    next_user_id: u64,
    rng: StdRng,
    settings: SimulatorConfig,
}

impl Simulator {
    /// A simulator loaded with the standard fixtures.
    pub fn new(settings: &SimulatorConfig) -> Self {
        let simulator = Self::with_state(
            settings,
            seed_users().into_iter().collect(),
            FranchiseCatalog::new(
                seed_franchises(),
                seeders::NEXT_FRANCHISE_ID,
                seeders::NEXT_STORE_ID,
            ),
            seeders::NEXT_USER_ID,
        );

        info!(
            users = simulator.users.len(),
            franchises = simulator.catalog.len(),
            "Simulator seeded"
        );
        simulator
    }

    /// A simulator over caller-provided state.
    pub fn with_state(
        settings: &SimulatorConfig,
        users: UserStore,
        catalog: FranchiseCatalog,
        next_user_id: u64,
    ) -> Self {
        let rng = match settings.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };

        let max_user_id = users
            .iter()
            .filter_map(|u| u.id.parse::<u64>().ok())
            .max()
            .unwrap_or(0);

        Self {
            users,
            session: Session::new(),
            catalog,
            next_user_id: next_user_id.max(max_user_id + 1),
            rng,
            settings: settings.clone(),
        }
    }

    pub fn settings(&self) -> &SimulatorConfig {
        &self.settings
    }

    pub fn token(&self) -> &str {
        &self.settings.token
    }

    /// Hand out the next user id. Never reuses an id within a run.
    pub fn allocate_user_id(&mut self) -> String {
        let id = self.next_user_id;
        self.next_user_id += 1;
        id.to_string()
    }

    pub fn random_admin_id(&mut self) -> u32 {
        self.rng.random_range(0..ADMIN_ID_RANGE)
    }

    /// The logged-in user, if the session points at a user still in the store.
    pub fn current_user(&self) -> Option<&User> {
        self.session
            .user_id()
            .and_then(|id| self.users.find_by_id(id))
    }
}
