use serde::{Deserialize, Serialize};
use std::fmt;

/// The topside station is vehicle 0, the fixed base of the fleet.
pub const TOPSIDE_VEHICLE_ID: u16 = 0;

/// The single USV is always vehicle 1; AUVs are numbered after it.
pub const USV_VEHICLE_ID: u16 = 1;

const MOOS_PORT_BASE: u16 = 9000;
const SIMULATOR_PORT_BASE: u16 = 61000;
const HTTP_PORT_BASE: u16 = 50000;

/// Stern arc across which the AUVs fan out behind the USV, in degrees.
const FAN_ARC_DEGREES: f64 = 120.0;

/// Deployable role in the simulated fleet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Topside,
    Usv,
    Auv,
}

impl Role {
    /// Uppercase type name used for MOOS communities and the
    /// `vehicle_type` template value.
    pub fn type_name(self) -> &'static str {
        match self {
            Role::Topside => "TOPSIDE",
            Role::Usv => "USV",
            Role::Auv => "AUV",
        }
    }

    /// Lowercase name used for interprocess platform names and log
    /// directories.
    pub fn dir_name(self) -> &'static str {
        match self {
            Role::Topside => "topside",
            Role::Usv => "usv",
            Role::Auv => "auv",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.type_name())
    }
}

/// Vehicle id of the AUV with the given deployment index (0-based).
pub fn auv_vehicle_id(auv_index: u16) -> u16 {
    auv_index + USV_VEHICLE_ID + 1
}

/// MOOSDB port for a vehicle's helm community.
pub fn moos_port(vehicle_id: u16) -> u16 {
    MOOS_PORT_BASE + vehicle_id
}

/// TCP port of the basic frontseat simulator serving a vehicle.
pub fn simulator_port(vehicle_id: u16) -> u16 {
    SIMULATOR_PORT_BASE + vehicle_id
}

/// HTTP port of a vehicle's liaison web interface.
pub fn http_port(vehicle_id: u16) -> u16 {
    HTTP_PORT_BASE + vehicle_id
}

/// Trail angle for one AUV, in degrees relative to the USV's bow.
///
/// The fleet spreads evenly across a fixed arc centered dead astern
/// (180 degrees); a single AUV trails directly behind the USV.
pub fn trail_angle(auv_index: u16, auv_count: u16) -> f64 {
    let step = FAN_ARC_DEGREES / f64::from(auv_count + 1);
    180.0 - FAN_ARC_DEGREES / 2.0 + f64::from(auv_index + 1) * step
}
