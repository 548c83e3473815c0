//! Weapons occupy the hero's limited slots.
mod boomerang;
mod nerve_toxin;
mod pulse_field;
mod toxic_spitter;

pub use boomerang::Boomerang;
pub use nerve_toxin::NerveToxin;
pub use pulse_field::PulseField;
pub use toxic_spitter::ToxicSpitter;
