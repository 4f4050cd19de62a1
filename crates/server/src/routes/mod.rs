pub mod analysis;
pub mod execute;
pub mod health;
pub mod native;

use gnubg::DEFAULT_PLIES;

fn plies_or_default(plies: Option<u32>) -> u32 {
    plies.unwrap_or(DEFAULT_PLIES)
}
