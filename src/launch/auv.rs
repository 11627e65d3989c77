use super::LaunchError;
use crate::comms;
use crate::config::MissionConfig;
use crate::fleet::{self, Role};
use crate::template::{render_file, TemplateContext};
use tracing::debug;

const ROLE: Role = Role::Auv;

pub fn generate(app: &str, cfg: &MissionConfig) -> Result<String, LaunchError> {
    let vehicle_id = super::vehicle_id_for(ROLE, cfg)?;
    let acomms_modem_id = comms::acomms_modem_id(vehicle_id);
    debug!(vehicle_id, acomms_modem_id, "computed AUV addressing");

    match app {
        "gobyd" => super::gobyd(cfg, ROLE, app, super::acomms_link_block(cfg, vehicle_id)?),
        // AUVs drive the simulator directly; no MOOS gateway block.
        "frontseat" => super::frontseat(cfg, ROLE, app, vehicle_id, String::new()),
        "liaison" => super::liaison(cfg, ROLE, app, vehicle_id),
        "nav_manager" => super::nav_manager(cfg, ROLE, app, vehicle_id, String::new()),
        "moos" => super::moos_mission(cfg, ROLE, vehicle_id),
        "bhv" => bhv(cfg, vehicle_id),
        "frontseat_sim" => Ok(fleet::simulator_port(vehicle_id).to_string()),
        _ => Err(super::unknown_app(ROLE, app)),
    }
}

/// Behavior file with this AUV's slice of the trail fan.
fn bhv(cfg: &MissionConfig, vehicle_id: u16) -> Result<String, LaunchError> {
    let auv_index = vehicle_id - fleet::USV_VEHICLE_ID - 1;
    let mut values = TemplateContext::new();
    values.set("trail_angle", fleet::trail_angle(auv_index, cfg.auv_count));
    Ok(render_file(super::template(cfg, "auv.bhv.in"), &values)?)
}
