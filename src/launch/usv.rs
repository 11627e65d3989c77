use super::LaunchError;
use crate::comms;
use crate::config::MissionConfig;
use crate::fleet::{self, Role};
use crate::template::{render_file, TemplateContext};
use tracing::debug;

const ROLE: Role = Role::Usv;

pub fn generate(app: &str, cfg: &MissionConfig) -> Result<String, LaunchError> {
    let vehicle_id = fleet::USV_VEHICLE_ID;
    let satellite_modem_id = comms::satellite_modem_id(vehicle_id);
    let acomms_modem_id = comms::acomms_modem_id(vehicle_id);
    debug!(
        vehicle_id,
        satellite_modem_id, acomms_modem_id, "computed USV addressing"
    );

    match app {
        "gobyd" => {
            // The USV bridges both subnets: satellite up to the topside,
            // acoustics down to the AUVs.
            let link_block = format!(
                "{}\n{}",
                super::satellite_link_block(cfg, vehicle_id)?,
                super::acomms_link_block(cfg, vehicle_id)?
            );
            super::gobyd(cfg, ROLE, app, link_block)
        }
        "frontseat" => super::frontseat(
            cfg,
            ROLE,
            app,
            vehicle_id,
            super::moos_gateway_block(cfg, vehicle_id)?,
        ),
        "liaison" => super::liaison(cfg, ROLE, app, vehicle_id),
        "usv_manager" => usv_manager(cfg, app, vehicle_id),
        "moos" => super::moos_mission(cfg, ROLE, vehicle_id),
        "bhv" => Ok(render_file(
            super::template(cfg, "usv.bhv.in"),
            &TemplateContext::new(),
        )?),
        "frontseat_sim" => Ok(fleet::simulator_port(vehicle_id).to_string()),
        _ => Err(super::unknown_app(ROLE, app)),
    }
}

/// The USV manager subscribes to the acoustic modem of every AUV.
fn usv_manager(cfg: &MissionConfig, app: &str, vehicle_id: u16) -> Result<String, LaunchError> {
    let ids: Vec<String> = comms::auv_acomms_modem_ids(cfg.auv_count)
        .into_iter()
        .map(|id| id.to_string())
        .collect();
    let mut values = TemplateContext::new();
    values
        .set(
            "app_block",
            super::app_block(cfg, ROLE, app, super::role_file_verbosity(ROLE))?,
        )
        .set("interprocess_block", super::interprocess_block(cfg, ROLE)?)
        .set("vehicle_id", vehicle_id)
        .set(
            "subscribe_to_ids",
            format!("auv_modem_id: [{}]", ids.join(",")),
        );
    Ok(render_file(super::template(cfg, "usv_manager.pb.cfg.in"), &values)?)
}
