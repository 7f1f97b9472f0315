/// Map units in one meter.
pub const MAP_UNITS_PER_METER: f32 = 64.0;

#[must_use]
pub fn units(meters: f32) -> f32 {
    meters * MAP_UNITS_PER_METER
}

#[must_use]
pub fn meters(units: f32) -> f32 {
    units / MAP_UNITS_PER_METER
}
