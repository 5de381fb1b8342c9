pub mod cozy;

pub use cozy::{is_uci_move, Position};
