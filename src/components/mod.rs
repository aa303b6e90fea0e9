//! UI components.

pub mod particle_background;
pub mod tender_card;
