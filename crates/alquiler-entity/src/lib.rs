//! # alquiler-entity
//!
//! Domain models for the AlquilerApp client. Wire structs mirror the JSON
//! the reservation backend speaks (Spanish field names, `YYYY-MM-DD`
//! dates); value objects such as [`reservation::DateRange`] carry the
//! client-side invariants.

pub mod reservation;
pub mod user;
