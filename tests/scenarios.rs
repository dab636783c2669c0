use long_press_blink::{BlinkConfig, ButtonState, Step, Tick, TimedButtonBlinkController, Transition};

/// Poll interval used by every scenario below.
const TICK_MS: u32 = 10;

fn controller() -> TimedButtonBlinkController {
    TimedButtonBlinkController::new(BlinkConfig::new().with_ms_per_tick(TICK_MS)).unwrap()
}

/// Tick for a time in milliseconds relative to `base`.
fn at(base: Tick, ms: u32) -> Tick {
    base.wrapping_add(ms / TICK_MS)
}

#[test]
fn long_press_then_natural_expiry() {
    let mut c = controller();

    // Button held 0..600 ms.
    for ms in (0..500).step_by(TICK_MS as usize) {
        let step = c.poll(true, at(0, ms));
        assert!(!step.output, "output on before long press at {ms} ms");
    }
    let step = c.poll(true, at(0, 500));
    assert_eq!(step.transition, Some(Transition::LongPressDetected));
    assert!(step.output);
    assert_eq!(c.current_state(), ButtonState::BlinkActiveInitialHold);

    for ms in (510..600).step_by(TICK_MS as usize) {
        c.poll(true, at(0, ms));
    }

    // Released at 600 ms: a toggle was due, but the release is handled first.
    let step = c.poll(false, at(0, 600));
    assert_eq!(step.transition, Some(Transition::InitialHoldReleased));
    assert!(step.output);
    assert!(!step.toggled);

    for ms in (610..10_500).step_by(TICK_MS as usize) {
        c.poll(false, at(0, ms));
        assert_eq!(c.current_state(), ButtonState::Blinking);
    }

    let step = c.poll(false, at(0, 10_500));
    assert_eq!(step.transition, Some(Transition::BlinkExpired));
    assert!(!step.output);
    assert_eq!(c.current_state(), ButtonState::Idle);
}

#[test]
fn second_long_press_cancels_session() {
    // Session starts at tick 0, so the initial press begins before the
    // counter wraps.
    let base: Tick = 0;
    let mut c = controller();
    let press = base.wrapping_sub(500 / TICK_MS);
    for t in 0..50u32 {
        c.poll(true, press.wrapping_add(t));
    }
    assert_eq!(
        c.poll(true, base).transition,
        Some(Transition::LongPressDetected)
    );
    c.poll(false, at(base, 10));

    for ms in (20..3000).step_by(TICK_MS as usize) {
        c.poll(false, at(base, ms));
    }
    assert_eq!(
        c.poll(true, at(base, 3000)).transition,
        Some(Transition::CancelPressStarted)
    );
    for ms in (3010..3500).step_by(TICK_MS as usize) {
        c.poll(true, at(base, ms));
        assert_eq!(c.current_state(), ButtonState::BlinkActiveCancelHold);
    }

    let step = c.poll(true, at(base, 3500));
    assert_eq!(step.transition, Some(Transition::BlinkCancelled));
    assert!(!step.output);
    assert_eq!(c.current_state(), ButtonState::BlinkEndedAwaitingRelease);

    for ms in (3510..3700).step_by(TICK_MS as usize) {
        assert!(!c.step(true, at(base, ms)));
    }
    let step = c.poll(false, at(base, 3700));
    assert_eq!(step.transition, Some(Transition::ReleasedAfterBlink));
    assert_eq!(c.current_state(), ButtonState::Idle);
}

#[test]
fn held_button_triggers_only_once() {
    let mut c = controller();
    let mut detections = 0;
    // 30 s continuous hold: one session, then waiting for release.
    for ms in (0..30_000).step_by(TICK_MS as usize) {
        if c.poll(true, at(0, ms)).transition == Some(Transition::LongPressDetected) {
            detections += 1;
        }
    }
    assert_eq!(detections, 1);
    assert_eq!(c.current_state(), ButtonState::BlinkEndedAwaitingRelease);
    assert!(!c.output());
}

#[test]
fn toggles_form_a_square_wave() {
    let mut c = controller();
    for ms in (0..=500).step_by(TICK_MS as usize) {
        c.poll(true, at(0, ms));
    }
    c.poll(false, at(0, 510));

    let mut toggles = Vec::new();
    for ms in (520..10_500).step_by(TICK_MS as usize) {
        let step = c.poll(false, at(0, ms));
        if step.toggled {
            toggles.push((ms, step.output));
        }
    }

    assert_eq!(toggles.first(), Some(&(600, false)));
    for pair in toggles.windows(2) {
        assert_eq!(pair[1].0 - pair[0].0, 100);
        assert_ne!(pair[1].1, pair[0].1);
    }
    let on = toggles.iter().filter(|(_, level)| *level).count();
    let off = toggles.len() - on;
    assert!(on.abs_diff(off) <= 1);
}

#[test]
fn short_presses_during_blink_do_not_shorten_session() {
    let mut c = controller();
    for ms in (0..=500).step_by(TICK_MS as usize) {
        c.poll(true, at(0, ms));
    }
    c.poll(false, at(0, 510));

    // 300 ms taps every second.
    let mut ended_at = None;
    for ms in (520..12_000).step_by(TICK_MS as usize) {
        let level = ms % 1000 < 300;
        let step = c.poll(level, at(0, ms));
        if matches!(
            step.transition,
            Some(
                Transition::BlinkExpired
                    | Transition::CancelHoldExpired
                    | Transition::CancelReleasedAfterExpiry
            )
        ) {
            ended_at = Some(ms);
            break;
        }
        assert_ne!(step.transition, Some(Transition::BlinkCancelled));
    }
    // Session started at 500 ms; at 10 500 ms the button is up (500 % 1000 >= 300).
    assert_eq!(ended_at, Some(10_500));
}

/// Small deterministic generator so the property runs are repeatable.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u32 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) as u32
    }

    fn below(&mut self, n: u32) -> u32 {
        self.next() % n
    }
}

/// Random press/release pattern, one level per tick.
fn random_levels(seed: u64, ticks: usize) -> Vec<bool> {
    let mut rng = Lcg(seed);
    let mut levels = Vec::with_capacity(ticks);
    let mut level = false;
    while levels.len() < ticks {
        // Runs of 1..150 ticks (10 ms .. 1.5 s), some long idle gaps.
        let run = if level { 1 + rng.below(150) } else { 1 + rng.below(400) };
        for _ in 0..run {
            levels.push(level);
        }
        level = !level;
    }
    levels.truncate(ticks);
    levels
}

fn run(levels: &[bool], start: Tick) -> Vec<(Tick, Step)> {
    let mut c = controller();
    levels
        .iter()
        .enumerate()
        .map(|(i, &level)| {
            let now = start.wrapping_add(i as u32);
            (now, c.poll(level, now))
        })
        .collect()
}

#[test]
fn output_is_dark_outside_blink_states() {
    for seed in 0..40 {
        for (now, step) in run(&random_levels(seed, 5_000), seed as u32 * 1_000) {
            if !step.state().is_blinking() {
                assert!(!step.output, "seed {seed}: lit in {:?} at {now}", step.state());
            }
        }
    }
}

#[test]
fn sessions_never_outlast_blink_duration() {
    let duration = BlinkConfig::new().blink_duration_ms;
    for seed in 0..40 {
        // Start near the top of the counter so every run crosses the wrap.
        let start = u32::MAX - 2_000 + seed as u32;
        let mut session_start = None;
        for (now, step) in run(&random_levels(seed, 6_000), start) {
            match (step.previous_state.is_blinking(), step.state().is_blinking()) {
                (false, true) => session_start = Some(now),
                (true, false) => {
                    let began = session_start.take().unwrap();
                    let lasted = now.wrapping_sub(began) * TICK_MS;
                    // Expiry is seen at most one poll late when a press edge
                    // lands on the expiry tick.
                    assert!(
                        lasted <= duration + TICK_MS,
                        "seed {seed}: session lasted {lasted} ms"
                    );
                }
                _ => {}
            }
        }
    }
}

#[test]
fn toggles_never_come_early() {
    let half = BlinkConfig::new().blink_half_period_ms;
    for seed in 0..40 {
        let mut last_edge: Option<Tick> = None;
        for (now, step) in run(&random_levels(seed, 5_000), 0) {
            if step.transition == Some(Transition::LongPressDetected) {
                last_edge = Some(now);
            } else if step.toggled {
                let prev = last_edge.unwrap();
                assert!(now.wrapping_sub(prev) * TICK_MS >= half, "seed {seed}");
                last_edge = Some(now);
            }
            if !step.state().is_blinking() {
                last_edge = None;
            }
        }
    }
}

#[test]
fn each_press_triggers_at_most_one_session() {
    for seed in 0..40 {
        let levels = random_levels(seed, 5_000);
        let mut detections_this_press = 0;
        for (i, (_, step)) in run(&levels, 0).into_iter().enumerate() {
            if !levels[i] {
                detections_this_press = 0;
            }
            if step.transition == Some(Transition::LongPressDetected) {
                detections_this_press += 1;
                assert_eq!(detections_this_press, 1, "seed {seed}");
            }
        }
    }
}

#[test]
fn transitions_leave_the_state_they_name() {
    for seed in 0..40 {
        for (now, step) in run(&random_levels(seed, 6_000), u32::MAX - 3_000) {
            if let Some(t) = step.transition {
                assert_eq!(step.previous_state, t.from(), "seed {seed}: {t:?} at {now}");
                assert_eq!(step.state(), t.to());
            }
        }
    }
}
