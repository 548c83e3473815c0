//! Passive upgrades; any number may be owned.
mod blood_capacitor;
mod carapace;
mod frost_aura;
mod stat_boost;

pub use blood_capacitor::BloodCapacitor;
pub use carapace::Carapace;
pub use frost_aura::FrostAura;
pub use stat_boost::StatBoost;
