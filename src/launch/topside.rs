use super::LaunchError;
use crate::comms;
use crate::config::MissionConfig;
use crate::fleet::{self, Role};
use crate::template::{render_file, TemplateContext};
use tracing::debug;

const ROLE: Role = Role::Topside;

pub fn generate(app: &str, cfg: &MissionConfig) -> Result<String, LaunchError> {
    let vehicle_id = fleet::TOPSIDE_VEHICLE_ID;
    let satellite_modem_id = comms::satellite_modem_id(vehicle_id);
    debug!(vehicle_id, satellite_modem_id, "computed topside addressing");

    match app {
        "gobyd" => super::gobyd(
            cfg,
            ROLE,
            app,
            super::satellite_link_block(cfg, vehicle_id)?,
        ),
        "liaison" => super::liaison(cfg, ROLE, app, vehicle_id),
        "geov" => passthrough(cfg, app, "geov.pb.cfg.in"),
        "opencpn" => passthrough(cfg, app, "opencpn.pb.cfg.in"),
        "nav_manager" => {
            super::nav_manager(cfg, ROLE, app, vehicle_id, subscribe_to_all_auvs(cfg))
        }
        _ => Err(super::unknown_app(ROLE, app)),
    }
}

/// Display-only apps that take nothing beyond the shared blocks.
fn passthrough(cfg: &MissionConfig, app: &str, name: &str) -> Result<String, LaunchError> {
    let mut values = TemplateContext::new();
    values
        .set(
            "app_block",
            super::app_block(cfg, ROLE, app, super::role_file_verbosity(ROLE))?,
        )
        .set("interprocess_block", super::interprocess_block(cfg, ROLE)?);
    Ok(render_file(super::template(cfg, name), &values)?)
}

/// The topside tracks every AUV in the fleet.
fn subscribe_to_all_auvs(cfg: &MissionConfig) -> String {
    if cfg.auv_count == 0 {
        return String::new();
    }
    let ids: Vec<String> = (0..cfg.auv_count)
        .map(|index| fleet::auv_vehicle_id(index).to_string())
        .collect();
    format!("subscribe_to_vehicle_id: [{}]", ids.join(","))
}
