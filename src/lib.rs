//! # Fleet Configuration Generator
//!
//! Generates textual configuration (protobuf-text-format and MOOS mission
//! files) for a simulated marine autonomy fleet: one topside station, one
//! unmanned surface vehicle (USV), and N autonomous underwater vehicles
//! (AUVs).
//!
//! ## Features
//!
//! - **Modem addressing**: maps vehicle identities onto disjoint satellite
//!   and acoustic subnet partitions
//! - **MAC slot allocation**: fixed-duration TDMA schedules for the shared
//!   acoustic channel, in two policies
//! - **Template rendering**: `$name` substitution into the shipped
//!   template files
//! - **Role dispatch**: one shared driver serving the topside, USV, and
//!   AUV variants
//!
//! ## Quick Start
//!
//! ```rust
//! use fleetcfg::comms::{acomms_modem_id, build_slot_schedule, SlotPolicy};
//!
//! // The USV (vehicle 1) owns the first acoustic slot...
//! assert_eq!(acomms_modem_id(1), 258);
//!
//! // ...and three AUVs follow it in one TDMA cycle.
//! let schedule = build_slot_schedule(3, SlotPolicy::FixedCount).expect("non-negative count");
//! assert_eq!(schedule.len(), 4);
//! ```
//!
//! ## Architecture
//!
//! - [`comms`] - modem addressing and acoustic slot allocation
//! - [`fleet`] - vehicle roles, identities, ports, and trail fan-out
//! - [`config`] - mission configuration gathered from the environment
//! - [`template`] - the `$name` substitution renderer
//! - [`launch`] - per-role application dispatch and block assembly

#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod comms;
pub mod config;
pub mod fleet;
pub mod launch;
pub mod template;

// Re-export main public types for convenience
pub use comms::{SlotAssignment, SlotPolicy};
pub use config::MissionConfig;
pub use fleet::Role;
pub use launch::LaunchError;
