//! sgt-water: saturated-water and gas-space property provider.
//!
//! The heatup model only ever touches water between an ice-cold fill
//! and the critical point, and only on or near the saturation line, so
//! the provider is a set of local correlations rather than a full
//! equation-of-state backend. Every method is total: out-of-range
//! inputs clamp to the supported band instead of failing, so a
//! mid-transient property call can never abort a tick.
//!
//! Contains:
//! - tables (the `SteamTables` trait consumed by the transient model)
//! - region4 (IAPWS-IF97 region-4 saturation line, degF/psia wrappers)
//! - correlations (`CorrelationTables`, the default provider)
//! - gas (ideal-gas partial pressures for the steam/nitrogen space)

pub mod correlations;
pub mod gas;
pub mod region4;
pub mod tables;

pub use correlations::CorrelationTables;
pub use tables::SteamTables;
