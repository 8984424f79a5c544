//! Core domain types.
//!
//! Types here are produced by the Navitia decoder and consumed by the stop
//! directory and the web layer. They carry no knowledge of the wire format.

mod departure;
mod stop;
mod stop_id;

pub use departure::Departure;
pub use stop::Stop;
pub use stop_id::{InvalidStopId, StopId};
