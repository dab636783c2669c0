/// Monotonic poll counter supplied by the host clock.
///
/// Only differences between two ticks are meaningful. The counter is allowed
/// to wrap around `u32::MAX`.
pub type Tick = u32;

/// Milliseconds elapsed between `start` and `now`.
///
/// The tick difference uses modular subtraction, so a counter that wrapped
/// after `start` still yields the true (small) distance instead of a huge
/// value. The conversion to milliseconds saturates rather than wrapping a
/// second time.
#[inline]
pub const fn elapsed_ms(now: Tick, start: Tick, ms_per_tick: u32) -> u32 {
    now.wrapping_sub(start).saturating_mul(ms_per_tick)
}

/// `true` once at least `threshold_ms` have passed since `start`.
#[inline]
pub const fn has_elapsed(now: Tick, start: Tick, threshold_ms: u32, ms_per_tick: u32) -> bool {
    elapsed_ms(now, start, ms_per_tick) >= threshold_ms
}

/// Number of whole ticks needed to cover `ms`, rounded up.
#[inline]
pub const fn ticks_for_ms(ms: u32, ms_per_tick: u32) -> u32 {
    ms.div_ceil(ms_per_tick)
}
