use crate::fleet;
use serde::{Deserialize, Serialize};
use static_assertions::const_assert;
use std::fmt;
use std::fmt::Write;
use std::str::FromStr;
use thiserror::Error;

/// 16-bit subnet mask shared by every link in the fleet network.
pub const SUBNET_MASK: u16 = 0xFF00;

/// Number of modem addresses in each subnet partition: the complement of
/// the mask within 16 bits, plus one.
pub const PARTITION_SIZE: u16 = (0xFFFF ^ SUBNET_MASK) + 1;

/// Transmission window length for every MAC slot, in seconds.
pub const SLOT_SECONDS: u16 = 10;

/// Largest frame a source may send within its slot, in bytes.
pub const MAX_FRAME_BYTES: u16 = 128;

const_assert!(PARTITION_SIZE > 0);
// Every in-subnet vehicle id maps inside its own partition block, so the
// satellite and acoustic partitions can never hand out the same address.
const_assert!((0xFFFF ^ SUBNET_MASK) as u32 + 1 <= PARTITION_SIZE as u32);

/// Disjoint block of the modem address space reserved for one
/// communication medium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubnetPartition {
    Satellite,
    Acomms,
}

impl SubnetPartition {
    pub fn index(self) -> u16 {
        match self {
            SubnetPartition::Satellite => 0,
            SubnetPartition::Acomms => 1,
        }
    }
}

/// Modem id 0 is broadcast, so the base modem id is the vehicle id plus one.
pub fn base_modem_id(vehicle_id: u16) -> u16 {
    vehicle_id + 1
}

/// Modem address of a vehicle on the given partition. Pure arithmetic: the
/// caller keeps vehicle ids small enough for the 16-bit address space.
pub fn modem_id(vehicle_id: u16, partition: SubnetPartition) -> u16 {
    base_modem_id(vehicle_id) + partition.index() * PARTITION_SIZE
}

pub fn satellite_modem_id(vehicle_id: u16) -> u16 {
    modem_id(vehicle_id, SubnetPartition::Satellite)
}

pub fn acomms_modem_id(vehicle_id: u16) -> u16 {
    modem_id(vehicle_id, SubnetPartition::Acomms)
}

/// Acoustic modem ids of every AUV in deployment order. Contiguous after
/// the USV's acoustic id because AUV vehicle ids follow the USV's.
pub fn auv_acomms_modem_ids(auv_count: u16) -> Vec<u16> {
    (0..auv_count)
        .map(|index| acomms_modem_id(fleet::auv_vehicle_id(index)))
        .collect()
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CommsError {
    #[error("invalid AUV count {0}: must be zero or a positive integer")]
    InvalidAuvCount(i64),
}

/// One transmission window in the repeating acoustic MAC cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotAssignment {
    pub src: u16,
    pub slot_seconds: u16,
    pub max_frame_bytes: u16,
}

impl SlotAssignment {
    pub fn new(src: u16) -> Self {
        Self {
            src,
            slot_seconds: SLOT_SECONDS,
            max_frame_bytes: MAX_FRAME_BYTES,
        }
    }
}

impl fmt::Display for SlotAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slot {{ src: {} slot_seconds: {} max_frame_bytes: {} }}",
            self.src, self.slot_seconds, self.max_frame_bytes
        )
    }
}

/// How the acoustic TDMA cycle is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotPolicy {
    /// One slot per acoustic modem: the USV followed by each AUV.
    FixedCount,
    /// A USV slot before every AUV slot, so the USV can relay between
    /// each AUV transmission.
    Paired,
}

impl FromStr for SlotPolicy {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "fixed" => Ok(SlotPolicy::FixedCount),
            "paired" => Ok(SlotPolicy::Paired),
            _ => Err("expected 'fixed' or 'paired'"),
        }
    }
}

/// Builds one full TDMA cycle for the acoustic subnet.
///
/// An AUV count of zero is a degenerate but valid fleet: the fixed-count
/// policy yields the lone USV slot, the paired policy yields no slots.
/// Negative counts are rejected.
pub fn build_slot_schedule(
    auv_count: i64,
    policy: SlotPolicy,
) -> Result<Vec<SlotAssignment>, CommsError> {
    if auv_count < 0 {
        return Err(CommsError::InvalidAuvCount(auv_count));
    }
    let auv_count = auv_count as u16;
    let usv_id = acomms_modem_id(fleet::USV_VEHICLE_ID);

    let slots = match policy {
        SlotPolicy::FixedCount => (0..=auv_count)
            .map(|offset| SlotAssignment::new(usv_id + offset))
            .collect(),
        SlotPolicy::Paired => {
            let mut slots = Vec::with_capacity(2 * usize::from(auv_count));
            for index in 0..auv_count {
                slots.push(SlotAssignment::new(usv_id));
                slots.push(SlotAssignment::new(acomms_modem_id(fleet::auv_vehicle_id(
                    index,
                ))));
            }
            slots
        }
    };

    Ok(slots)
}

/// Renders a schedule as the protobuf-text `slot { ... }` lines consumed
/// by the acoustic link's MAC block, one newline-terminated line per slot.
pub fn render_mac_slots(slots: &[SlotAssignment]) -> String {
    let mut out = String::new();
    for slot in slots {
        // Infallible on String.
        let _ = writeln!(out, "{slot}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partition_size_uses_mask_complement() {
        assert_eq!(PARTITION_SIZE, 256);
        assert_eq!(u32::from(SUBNET_MASK), 65280);
    }

    #[test]
    fn test_base_modem_id_skips_broadcast() {
        assert_eq!(base_modem_id(0), 1);
        assert_eq!(base_modem_id(1), 2);
    }

    #[test]
    fn test_partitions_never_collide() {
        for vehicle_id in 0..200 {
            assert_ne!(
                satellite_modem_id(vehicle_id),
                acomms_modem_id(vehicle_id),
                "partitions overlap for vehicle {vehicle_id}"
            );
        }
    }

    #[test]
    fn test_usv_addressing_scenario() {
        assert_eq!(satellite_modem_id(fleet::USV_VEHICLE_ID), 2);
        assert_eq!(acomms_modem_id(fleet::USV_VEHICLE_ID), 258);
    }

    #[test]
    fn test_auv_acomms_ids_contiguous_after_usv() {
        assert_eq!(auv_acomms_modem_ids(3), vec![259, 260, 261]);
        assert!(auv_acomms_modem_ids(0).is_empty());
    }

    #[test]
    fn test_fixed_count_schedule() {
        let slots = build_slot_schedule(3, SlotPolicy::FixedCount).unwrap();
        let sources: Vec<u16> = slots.iter().map(|s| s.src).collect();
        assert_eq!(sources, vec![258, 259, 260, 261]);
        for slot in &slots {
            assert_eq!(slot.slot_seconds, 10);
            assert_eq!(slot.max_frame_bytes, 128);
        }
    }

    #[test]
    fn test_paired_schedule_interleaves_usv() {
        let slots = build_slot_schedule(2, SlotPolicy::Paired).unwrap();
        let sources: Vec<u16> = slots.iter().map(|s| s.src).collect();
        assert_eq!(sources, vec![258, 259, 258, 260]);
    }

    #[test]
    fn test_zero_auvs_is_degenerate_not_an_error() {
        let fixed = build_slot_schedule(0, SlotPolicy::FixedCount).unwrap();
        assert_eq!(fixed.len(), 1);
        assert_eq!(fixed[0].src, 258);

        let paired = build_slot_schedule(0, SlotPolicy::Paired).unwrap();
        assert!(paired.is_empty());
    }

    #[test]
    fn test_negative_auv_count_rejected() {
        let err = build_slot_schedule(-1, SlotPolicy::FixedCount).unwrap_err();
        assert_eq!(err, CommsError::InvalidAuvCount(-1));
    }

    #[test]
    fn test_render_mac_slots_line_format() {
        let slots = build_slot_schedule(1, SlotPolicy::FixedCount).unwrap();
        assert_eq!(
            render_mac_slots(&slots),
            "slot { src: 258 slot_seconds: 10 max_frame_bytes: 128 }\n\
             slot { src: 259 slot_seconds: 10 max_frame_bytes: 128 }\n"
        );
    }

    #[test]
    fn test_slot_policy_parse() {
        assert_eq!("fixed".parse::<SlotPolicy>(), Ok(SlotPolicy::FixedCount));
        assert_eq!("PAIRED".parse::<SlotPolicy>(), Ok(SlotPolicy::Paired));
        assert!("round_robin".parse::<SlotPolicy>().is_err());
    }
}
