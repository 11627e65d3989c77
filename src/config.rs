use crate::comms::SlotPolicy;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

pub const ENV_N_AUVS: &str = "FLEETCFG_N_AUVS";
pub const ENV_AUV_INDEX: &str = "FLEETCFG_AUV_INDEX";
pub const ENV_WARP: &str = "FLEETCFG_WARP";
pub const ENV_LAT_ORIGIN: &str = "FLEETCFG_LAT_ORIGIN";
pub const ENV_LON_ORIGIN: &str = "FLEETCFG_LON_ORIGIN";
pub const ENV_TEMPLATES_DIR: &str = "FLEETCFG_TEMPLATES_DIR";
pub const ENV_LOG_DIR: &str = "FLEETCFG_LOG_DIR";
pub const ENV_MAC_POLICY: &str = "FLEETCFG_MAC_POLICY";

const DEFAULT_WARP: u32 = 1;
const DEFAULT_LAT_ORIGIN: f64 = 41.661725;
const DEFAULT_LON_ORIGIN: f64 = -70.334832;
const DEFAULT_LOG_ROOT: &str = "/tmp/fleetcfg";
const DEFAULT_TEMPLATES_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/templates");

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable {name} ({hint})")]
    MissingEnv {
        name: &'static str,
        hint: &'static str,
    },
    #[error("invalid value {value:?} for {name}: {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Fleet-wide values gathered once at process start and passed into the
/// launch driver, instead of environment lookups scattered through the
/// rendering logic.
#[derive(Debug, Clone, Serialize)]
pub struct MissionConfig {
    /// Number of AUVs participating in the acoustic network.
    pub auv_count: u16,
    /// Deployment index of this AUV; only meaningful for the AUV role.
    pub auv_index: Option<u16>,
    /// Simulation time-warp factor.
    pub warp: u32,
    pub lat_origin: f64,
    pub lon_origin: f64,
    pub templates_dir: PathBuf,
    pub log_root: PathBuf,
    pub slot_policy: SlotPolicy,
}

impl MissionConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Builds the configuration from an arbitrary variable lookup, so
    /// tests never have to mutate the process environment.
    pub fn from_vars<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let auv_count = match lookup(ENV_N_AUVS) {
            Some(raw) => parse_var(ENV_N_AUVS, raw, "a non-negative integer")?,
            None => {
                return Err(ConfigError::MissingEnv {
                    name: ENV_N_AUVS,
                    hint: "e.g. FLEETCFG_N_AUVS=3 fleetcfg usv gobyd",
                })
            }
        };

        Ok(Self {
            auv_count,
            auv_index: optional_var(&lookup, ENV_AUV_INDEX, "a non-negative integer")?,
            warp: optional_var(&lookup, ENV_WARP, "a positive integer")?
                .unwrap_or(DEFAULT_WARP),
            lat_origin: optional_var(&lookup, ENV_LAT_ORIGIN, "decimal degrees")?
                .unwrap_or(DEFAULT_LAT_ORIGIN),
            lon_origin: optional_var(&lookup, ENV_LON_ORIGIN, "decimal degrees")?
                .unwrap_or(DEFAULT_LON_ORIGIN),
            templates_dir: lookup(ENV_TEMPLATES_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_TEMPLATES_DIR)),
            log_root: lookup(ENV_LOG_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_ROOT)),
            slot_policy: optional_var(&lookup, ENV_MAC_POLICY, "'fixed' or 'paired'")?
                .unwrap_or(SlotPolicy::FixedCount),
        })
    }
}

fn optional_var<T, F>(
    lookup: &F,
    name: &'static str,
    expected: &'static str,
) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        Some(raw) => parse_var(name, raw, expected).map(Some),
        None => Ok(None),
    }
}

fn parse_var<T: FromStr>(
    name: &'static str,
    raw: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    raw.trim()
        .parse()
        .map_err(|_| ConfigError::InvalidEnv {
            name,
            value: raw,
            expected,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        move |name| {
            pairs
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, value)| (*value).to_string())
        }
    }

    #[test]
    fn test_defaults_apply_when_only_count_is_set() {
        let cfg = MissionConfig::from_vars(vars(&[(ENV_N_AUVS, "3")])).unwrap();
        assert_eq!(cfg.auv_count, 3);
        assert_eq!(cfg.auv_index, None);
        assert_eq!(cfg.warp, 1);
        assert_eq!(cfg.slot_policy, SlotPolicy::FixedCount);
        assert!(cfg.templates_dir.ends_with("templates"));
    }

    #[test]
    fn test_missing_auv_count_is_fatal() {
        let err = MissionConfig::from_vars(|_| None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingEnv { name, .. } if name == ENV_N_AUVS));
    }

    #[test]
    fn test_unparseable_auv_count() {
        let err = MissionConfig::from_vars(vars(&[(ENV_N_AUVS, "many")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name, .. } if name == ENV_N_AUVS));
    }

    #[test]
    fn test_negative_auv_count_rejected_at_parse() {
        let err = MissionConfig::from_vars(vars(&[(ENV_N_AUVS, "-2")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name, .. } if name == ENV_N_AUVS));
    }

    #[test]
    fn test_overrides() {
        let cfg = MissionConfig::from_vars(vars(&[
            (ENV_N_AUVS, "5"),
            (ENV_AUV_INDEX, "2"),
            (ENV_WARP, "10"),
            (ENV_LAT_ORIGIN, "42.35"),
            (ENV_LON_ORIGIN, "-71.05"),
            (ENV_MAC_POLICY, "paired"),
            (ENV_LOG_DIR, "/tmp/elsewhere"),
        ]))
        .unwrap();
        assert_eq!(cfg.auv_index, Some(2));
        assert_eq!(cfg.warp, 10);
        assert!((cfg.lat_origin - 42.35).abs() < 1e-9);
        assert_eq!(cfg.slot_policy, SlotPolicy::Paired);
        assert_eq!(cfg.log_root, PathBuf::from("/tmp/elsewhere"));
    }

    #[test]
    fn test_bad_mac_policy() {
        let err =
            MissionConfig::from_vars(vars(&[(ENV_N_AUVS, "1"), (ENV_MAC_POLICY, "tdma")]))
                .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnv { name, .. } if name == ENV_MAC_POLICY));
    }
}
