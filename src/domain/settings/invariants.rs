pub const MIN_VOLUME: u8 = 0;
pub const MAX_VOLUME: u8 = 100;

/// Force a volume into the accepted range
pub fn clamp_volume(volume: i64) -> u8 {
    volume.clamp(i64::from(MIN_VOLUME), i64::from(MAX_VOLUME)) as u8
}

/// Invariants that must hold true for Settings:
///
/// 1. Every leaf has a default
/// 2. A persisted record may be partial and is merged onto defaults, never replacing them
/// 3. After a merge all three branches are present
/// 4. Volume stays within 0..=100
