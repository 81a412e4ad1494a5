//! Host surface for the schedule pipeline.
//!
//! The binary owns what the core deliberately does not: the periodic
//! refresh trigger, the single shared published state, and the HTTP
//! surface that hands that state to consumers.

pub mod server;
pub mod state;

pub use server::create_app;
pub use state::SharedState;
