pub mod auv;
pub mod topside;
pub mod usv;

use crate::comms::{self, SlotAssignment};
use crate::config::{ConfigError, MissionConfig, ENV_AUV_INDEX};
use crate::fleet::{self, Role};
use crate::template::{render_file, TemplateContext, TemplateError};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

const TTY_VERBOSITY: &str = "QUIET";

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("app '{app}' is not defined for the {role} role")]
    UnknownApp { role: Role, app: String },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Comms(#[from] comms::CommsError),
    #[error("failed to create log directory {path}: {source}")]
    LogDir {
        path: String,
        #[source]
        source: io::Error,
    },
}

/// Renders the configuration text for one role/application pair.
pub fn generate(role: Role, app: &str, cfg: &MissionConfig) -> Result<String, LaunchError> {
    match role {
        Role::Topside => topside::generate(app, cfg),
        Role::Usv => usv::generate(app, cfg),
        Role::Auv => auv::generate(app, cfg),
    }
}

/// Computed parameters for one role, for machine-readable output.
#[derive(Debug, Serialize)]
pub struct RoleSummary {
    pub role: Role,
    pub vehicle_id: u16,
    pub warp: u32,
    pub lat_origin: f64,
    pub lon_origin: f64,
    pub satellite_modem_id: Option<u16>,
    pub acomms_modem_id: Option<u16>,
    pub http_port: u16,
    pub moos_port: Option<u16>,
    pub simulator_port: Option<u16>,
    pub trail_angle_deg: Option<f64>,
    pub slot_schedule: Vec<SlotAssignment>,
}

pub fn summarize(role: Role, cfg: &MissionConfig) -> Result<RoleSummary, LaunchError> {
    let vehicle_id = vehicle_id_for(role, cfg)?;
    let on_acomms = role != Role::Topside;
    let slot_schedule = if on_acomms {
        comms::build_slot_schedule(i64::from(cfg.auv_count), cfg.slot_policy)?
    } else {
        Vec::new()
    };

    Ok(RoleSummary {
        role,
        vehicle_id,
        warp: cfg.warp,
        lat_origin: cfg.lat_origin,
        lon_origin: cfg.lon_origin,
        satellite_modem_id: (role != Role::Auv).then(|| comms::satellite_modem_id(vehicle_id)),
        acomms_modem_id: on_acomms.then(|| comms::acomms_modem_id(vehicle_id)),
        http_port: fleet::http_port(vehicle_id),
        moos_port: on_acomms.then(|| fleet::moos_port(vehicle_id)),
        simulator_port: on_acomms.then(|| fleet::simulator_port(vehicle_id)),
        trail_angle_deg: (role == Role::Auv)
            .then(|| fleet::trail_angle(vehicle_id - fleet::USV_VEHICLE_ID - 1, cfg.auv_count)),
        slot_schedule,
    })
}

/// Vehicle identity for a role. AUVs need their deployment index, from
/// the environment or the CLI override.
pub fn vehicle_id_for(role: Role, cfg: &MissionConfig) -> Result<u16, LaunchError> {
    match role {
        Role::Topside => Ok(fleet::TOPSIDE_VEHICLE_ID),
        Role::Usv => Ok(fleet::USV_VEHICLE_ID),
        Role::Auv => {
            let index = cfg.auv_index.ok_or(ConfigError::MissingEnv {
                name: ENV_AUV_INDEX,
                hint: "e.g. FLEETCFG_AUV_INDEX=0 fleetcfg auv gobyd",
            })?;
            if index >= cfg.auv_count {
                return Err(ConfigError::InvalidEnv {
                    name: ENV_AUV_INDEX,
                    value: index.to_string(),
                    expected: "an index less than FLEETCFG_N_AUVS",
                }
                .into());
            }
            Ok(fleet::auv_vehicle_id(index))
        }
    }
}

fn template(cfg: &MissionConfig, name: &str) -> PathBuf {
    cfg.templates_dir.join(name)
}

fn ensure_log_dir(cfg: &MissionConfig, role: Role) -> Result<PathBuf, LaunchError> {
    let dir = cfg.log_root.join(role.dir_name());
    fs::create_dir_all(&dir).map_err(|source| LaunchError::LogDir {
        path: dir.display().to_string(),
        source,
    })?;
    Ok(dir)
}

/// Shared `app {}` preamble: glog verbosities, log directory, warp and
/// geodetic origin.
fn app_block(
    cfg: &MissionConfig,
    role: Role,
    app: &str,
    log_file_verbosity: &str,
) -> Result<String, LaunchError> {
    let log_dir = ensure_log_dir(cfg, role)?;
    let mut values = TemplateContext::new();
    values
        .set("app", app)
        .set("tty_verbosity", TTY_VERBOSITY)
        .set("log_file_dir", log_dir.display())
        .set("log_file_verbosity", log_file_verbosity)
        .set("warp", cfg.warp)
        .set("lat_origin", cfg.lat_origin)
        .set("lon_origin", cfg.lon_origin);
    Ok(render_file(template(cfg, "_app.pb.cfg.in"), &values)?)
}

fn interprocess_block(cfg: &MissionConfig, role: Role) -> Result<String, LaunchError> {
    let mut values = TemplateContext::new();
    values.set("platform", role.dir_name());
    Ok(render_file(template(cfg, "_interprocess.pb.cfg.in"), &values)?)
}

fn satellite_link_block(cfg: &MissionConfig, vehicle_id: u16) -> Result<String, LaunchError> {
    let mut values = TemplateContext::new();
    values
        .set("subnet_mask", comms::SUBNET_MASK)
        .set("modem_id", comms::satellite_modem_id(vehicle_id));
    Ok(render_file(template(cfg, "_link_satellite.pb.cfg.in"), &values)?)
}

fn acomms_link_block(cfg: &MissionConfig, vehicle_id: u16) -> Result<String, LaunchError> {
    let schedule = comms::build_slot_schedule(i64::from(cfg.auv_count), cfg.slot_policy)?;
    let mut values = TemplateContext::new();
    values
        .set("subnet_mask", comms::SUBNET_MASK)
        .set("modem_id", comms::acomms_modem_id(vehicle_id))
        .set("mac_slots", comms::render_mac_slots(&schedule));
    Ok(render_file(template(cfg, "_link_acomms.pb.cfg.in"), &values)?)
}

fn liaison(cfg: &MissionConfig, role: Role, app: &str, vehicle_id: u16) -> Result<String, LaunchError> {
    let mut values = TemplateContext::new();
    values
        .set("app_block", app_block(cfg, role, app, role_file_verbosity(role))?)
        .set("interprocess_block", interprocess_block(cfg, role)?)
        .set("http_port", fleet::http_port(vehicle_id));
    Ok(render_file(template(cfg, "liaison.pb.cfg.in"), &values)?)
}

fn gobyd(
    cfg: &MissionConfig,
    role: Role,
    app: &str,
    link_block: String,
) -> Result<String, LaunchError> {
    let mut values = TemplateContext::new();
    values
        .set("app_block", app_block(cfg, role, app, role_file_verbosity(role))?)
        .set("interprocess_block", interprocess_block(cfg, role)?)
        .set("link_block", link_block);
    Ok(render_file(template(cfg, "gobyd.pb.cfg.in"), &values)?)
}

/// Full MOOS mission file for a vehicle's helm community.
fn moos_mission(
    cfg: &MissionConfig,
    role: Role,
    vehicle_id: u16,
) -> Result<String, LaunchError> {
    let mut values = TemplateContext::new();
    values
        .set("moos_port", fleet::moos_port(vehicle_id))
        .set("moos_community", role.type_name())
        .set("warp", cfg.warp)
        .set("lat_origin", cfg.lat_origin)
        .set("lon_origin", cfg.lon_origin)
        .set("bhv_file", format!("/tmp/{}.bhv", role.dir_name()));
    let name = format!("{}.moos.in", role.dir_name());
    Ok(render_file(template(cfg, &name), &values)?)
}

/// Frontseat interface for the basic vehicle simulator. The USV carries
/// a MOOS gateway block; the AUV's is empty.
fn frontseat(
    cfg: &MissionConfig,
    role: Role,
    app: &str,
    vehicle_id: u16,
    moos_block: String,
) -> Result<String, LaunchError> {
    let mut values = TemplateContext::new();
    values
        .set("app_block", app_block(cfg, role, app, role_file_verbosity(role))?)
        .set("interprocess_block", interprocess_block(cfg, role)?)
        .set("vehicle_type", role.type_name())
        .set("sim_start_lat", cfg.lat_origin)
        .set("sim_start_lon", cfg.lon_origin)
        .set("sim_port", fleet::simulator_port(vehicle_id))
        .set("moos_block", moos_block);
    Ok(render_file(template(cfg, "frontseat.pb.cfg.in"), &values)?)
}

fn moos_gateway_block(cfg: &MissionConfig, vehicle_id: u16) -> Result<String, LaunchError> {
    let mut values = TemplateContext::new();
    values.set("moos_port", fleet::moos_port(vehicle_id));
    Ok(render_file(template(cfg, "_moos_gateway.pb.cfg.in"), &values)?)
}

fn nav_manager(
    cfg: &MissionConfig,
    role: Role,
    app: &str,
    vehicle_id: u16,
    subscribe_to_vehicle_ids: String,
) -> Result<String, LaunchError> {
    let mut values = TemplateContext::new();
    values
        .set("app_block", app_block(cfg, role, app, role_file_verbosity(role))?)
        .set("interprocess_block", interprocess_block(cfg, role)?)
        .set("vehicle_type", role.type_name())
        .set("vehicle_id", vehicle_id)
        .set("subscribe_to_vehicle_ids", subscribe_to_vehicle_ids);
    Ok(render_file(template(cfg, "nav_manager.pb.cfg.in"), &values)?)
}

/// The USV relays the whole acoustic subnet, so it keeps verbose file
/// logs; the other roles stay quiet.
fn role_file_verbosity(role: Role) -> &'static str {
    match role {
        Role::Usv => "DEBUG2",
        Role::Topside | Role::Auv => "QUIET",
    }
}

fn unknown_app(role: Role, app: &str) -> LaunchError {
    LaunchError::UnknownApp {
        role,
        app: app.to_string(),
    }
}
