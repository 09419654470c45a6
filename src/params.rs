//! Cost parameters, derived matrix geometry, and the Argon2 variant table.

use crate::error::{Error, Result};

/// Number of synchronization points (slices) per lane per pass.
pub const SYNC_POINTS: u32 = 4;

/// Version byte encoded into the pre-hash.
pub const VERSION: u32 = 0x10;

pub const MIN_OUTLEN: u32 = 4;
pub const MAX_OUTLEN: u32 = u32::MAX;
pub const MAX_PWDLEN: u32 = u32::MAX;
pub const MIN_SALTLEN: u32 = 8;
pub const MAX_SALTLEN: u32 = u32::MAX;
pub const MAX_SECRETLEN: u32 = u32::MAX;
pub const MAX_ADLEN: u32 = u32::MAX;
pub const MIN_TCOST: u32 = 1;
pub const MAX_TCOST: u32 = u32::MAX;
pub const MAX_MCOST: u32 = u32::MAX;
pub const MIN_LANES: u32 = 1;
/// Matches the long-standing libargon2 convention of `2^24 - 1` lanes.
pub const MAX_LANES: u32 = 0x00FF_FFFF;

/// Defaults for the `argon2*_simple` convenience wrappers.
pub mod defaults {
    pub const T_COST: u32 = 3;
    pub const M_COST: u32 = 4096;
    pub const LANES: u32 = 1;
    pub const OUTLEN: usize = 64;
}

/// One of the five variants sharing this core.
///
/// Numeric values are the `variant_tag` encoded into the pre-hash.
#[derive(Eq, PartialEq, Copy, Clone, Debug, Hash)]
pub enum Variant {
    Argon2d = 0,
    Argon2i = 1,
    Argon2di = 2,
    Argon2id = 3,
    Argon2ds = 4,
}

impl Variant {
    pub fn tag(self) -> u32 { self as u32 }

    /// Whether the compressor mixes in the S-box.
    pub fn uses_sbox(self) -> bool { self == Variant::Argon2ds }

    /// Whether slot addressing at `(pass, slice)` is data-independent.
    ///
    /// `d` and `ds` are always data-dependent; `i` is always independent;
    /// the two hybrids switch halfway through the first pass, in opposite
    /// directions.
    pub fn independent_at(self, pass: u32, slice: u32) -> bool {
        let first_half = pass == 0 && slice < SYNC_POINTS / 2;
        match self {
            Variant::Argon2d | Variant::Argon2ds => false,
            Variant::Argon2i => true,
            Variant::Argon2id => first_half,
            Variant::Argon2di => !first_half,
        }
    }
}

/// Decode a raw variant tag (as stored in a config file or on the wire)
/// back into a [`Variant`]. The inverse of [`Variant::tag`].
impl TryFrom<u32> for Variant {
    type Error = Error;

    fn try_from(tag: u32) -> Result<Variant> {
        match tag {
            0 => Ok(Variant::Argon2d),
            1 => Ok(Variant::Argon2i),
            2 => Ok(Variant::Argon2di),
            3 => Ok(Variant::Argon2id),
            4 => Ok(Variant::Argon2ds),
            other => Err(Error::UnknownVariant(other)),
        }
    }
}

/// Validated, immutable cost parameters plus the matrix geometry derived
/// from them once.
#[derive(Clone, Copy, Debug)]
pub struct Params {
    t_cost: u32,
    m_cost: u32,
    lanes: u32,
    variant: Variant,
    memory_blocks: u32,
    lane_length: u32,
    segment_length: u32,
}

impl Params {
    pub fn t_cost(&self) -> u32 { self.t_cost }
    pub fn m_cost(&self) -> u32 { self.m_cost }
    pub fn lanes(&self) -> u32 { self.lanes }
    pub fn variant(&self) -> Variant { self.variant }
    pub fn memory_blocks(&self) -> u32 { self.memory_blocks }
    pub fn lane_length(&self) -> u32 { self.lane_length }
    pub fn segment_length(&self) -> u32 { self.segment_length }

    /// Validate `(t_cost, m_cost, lanes, variant)` and derive the matrix
    /// geometry.
    pub fn new(t_cost: u32, m_cost: u32, lanes: u32, variant: Variant) -> Result<Params> {
        if lanes < MIN_LANES {
            return Err(Error::TooFewLanes(lanes));
        }
        if lanes > MAX_LANES {
            return Err(Error::TooManyLanes(lanes));
        }
        if t_cost < MIN_TCOST {
            return Err(Error::TimeTooSmall(t_cost));
        }
        if t_cost > MAX_TCOST {
            return Err(Error::TimeTooLarge(t_cost));
        }
        let min_m_cost = 8 * lanes;
        if m_cost < min_m_cost {
            return Err(Error::MemoryTooLittle { given: m_cost, min: min_m_cost, lanes });
        }
        if m_cost > MAX_MCOST {
            return Err(Error::MemoryTooLarge(m_cost));
        }

        // memory_blocks = max(m_cost, 2*SYNC_POINTS*lanes), rounded down to a
        // multiple of SYNC_POINTS*lanes.
        let quantum = SYNC_POINTS * lanes;
        let floor = 2 * quantum;
        let memory_blocks = m_cost.max(floor) / quantum * quantum;
        let lane_length = memory_blocks / lanes;
        let segment_length = lane_length / SYNC_POINTS;

        Ok(Params {
            t_cost,
            m_cost,
            lanes,
            variant,
            memory_blocks,
            lane_length,
            segment_length,
        })
    }
}

/// Collects `t_cost`/`m_cost`/`lanes`/`variant` field-by-field, then
/// validates them all at once in [`ParamsBuilder::build`].
#[derive(Clone, Copy, Debug)]
pub struct ParamsBuilder {
    t_cost: u32,
    m_cost: u32,
    lanes: u32,
    variant: Variant,
}

impl Default for ParamsBuilder {
    fn default() -> Self {
        ParamsBuilder { t_cost: 3, m_cost: 4096, lanes: 1, variant: Variant::Argon2i }
    }
}

impl ParamsBuilder {
    pub fn new() -> Self { Self::default() }

    pub fn t_cost(mut self, t_cost: u32) -> Self { self.t_cost = t_cost; self }
    pub fn m_cost(mut self, m_cost: u32) -> Self { self.m_cost = m_cost; self }
    pub fn lanes(mut self, lanes: u32) -> Self { self.lanes = lanes; self }
    pub fn variant(mut self, variant: Variant) -> Self { self.variant = variant; self }

    pub fn build(self) -> Result<Params> {
        Params::new(self.t_cost, self.m_cost, self.lanes, self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_costs() {
        assert_eq!(Params::new(0, 32, 4, Variant::Argon2d), Err(Error::TimeTooSmall(0)));
        assert_eq!(Params::new(3, 32, 0, Variant::Argon2d), Err(Error::TooFewLanes(0)));
        assert_eq!(
            Params::new(3, 4, 4, Variant::Argon2d),
            Err(Error::MemoryTooLittle { given: 4, min: 32, lanes: 4 })
        );
    }

    #[test]
    fn derives_geometry_from_cost_parameters() {
        let p = Params::new(3, 32, 4, Variant::Argon2d).unwrap();
        // quantum = 16, floor = 32, memory_blocks = max(32,32)/16*16 = 32
        assert_eq!(p.memory_blocks(), 32);
        assert_eq!(p.lane_length(), 8);
        assert_eq!(p.segment_length(), 2);
    }

    #[test]
    fn rounds_memory_blocks_down_to_quantum() {
        // m_cost not a multiple of SYNC_POINTS*lanes gets rounded down.
        let p = Params::new(1, 37, 4, Variant::Argon2d).unwrap();
        assert_eq!(p.memory_blocks(), 32);
    }

    #[test]
    fn hybrid_schedules_are_mirror_images() {
        for slice in 0..SYNC_POINTS {
            assert_eq!(
                Variant::Argon2id.independent_at(0, slice),
                !Variant::Argon2di.independent_at(0, slice)
            );
        }
        // Past pass 0 both hybrids settle into their steady-state mode.
        assert!(!Variant::Argon2id.independent_at(1, 0));
        assert!(Variant::Argon2di.independent_at(1, 0));
    }

    #[test]
    fn d_and_ds_are_always_dependent_i_always_independent() {
        for pass in 0..3 {
            for slice in 0..SYNC_POINTS {
                assert!(!Variant::Argon2d.independent_at(pass, slice));
                assert!(!Variant::Argon2ds.independent_at(pass, slice));
                assert!(Variant::Argon2i.independent_at(pass, slice));
            }
        }
    }

    #[test]
    fn variant_tag_round_trips() {
        for v in [
            Variant::Argon2d,
            Variant::Argon2i,
            Variant::Argon2di,
            Variant::Argon2id,
            Variant::Argon2ds,
        ] {
            assert_eq!(Variant::try_from(v.tag()), Ok(v));
        }
    }

    #[test]
    fn unknown_variant_tag_is_rejected() {
        assert_eq!(Variant::try_from(99), Err(Error::UnknownVariant(99)));
    }
}
