//! End-to-end tests for the feeder: a real `StepperDriver` over recording
//! pins, a memory-backed store and virtual time.

mod common;

use common::{SimClock, SimDelay, SimPin, SimPwm, SimTime, MS};
use filament_feeder::{
    DigitalSense, Direction, Feeder, FeederConfig, IndicatorController, MemoryStore,
    MotionController, RunOutcome, SpeedLevel, StepperDriver, StopReason, Tuning,
};

type Driver = StepperDriver<SimPin, SimPin, SimPin, SimDelay>;

struct Rig<S, B>
where
    S: DigitalSense,
    B: DigitalSense,
{
    feeder: Feeder<MemoryStore, Driver, S, B, SimClock, SimPwm, SimPwm>,
    enable: SimPin,
    step: SimPin,
    dir: SimPin,
    left: SimPwm,
    right: SimPwm,
}

fn rig<S, B>(time: &SimTime, store: MemoryStore, sensor: S, button: B) -> Rig<S, B>
where
    S: DigitalSense,
    B: DigitalSense,
{
    let enable = SimPin::default();
    let step = SimPin::default();
    let dir = SimPin::default();
    let left = SimPwm::default();
    let right = SimPwm::default();

    let tuning = Tuning::default();
    let driver = StepperDriver::new(enable.clone(), step.clone(), dir.clone(), time.delay());
    let motion = MotionController::new(driver, sensor, button, time.clock(), tuning.clone());
    let indicator = IndicatorController::new(left.clone(), right.clone(), &tuning);

    Rig {
        feeder: Feeder::new(store, motion, indicator),
        enable,
        step,
        dir,
        left,
        right,
    }
}

// =============================================================================
// Startup
// =============================================================================

#[test]
fn startup_loads_stored_config() {
    let time = SimTime::new();
    let store = MemoryStore::with_config(FeederConfig::new(SpeedLevel::Slow, Direction::Reverse));
    let mut rig = rig(&time, store, || true, || false);

    let report = rig.feeder.startup(&mut time.delay()).unwrap();

    assert_eq!(report.saves(), 0);
    assert_eq!(rig.feeder.config(), &FeederConfig::new(SpeedLevel::Slow, Direction::Reverse));
    assert_eq!(rig.feeder.store().save_count(), 0);
    // Six 500 ms cycles.
    assert_eq!(time.now_us(), 3000 * MS);
    // Motor parked, DIR low for reverse, reverse LED lit.
    assert!(rig.enable.high.get());
    assert!(!rig.dir.high.get());
    assert!(!rig.feeder.motion().motor().is_enabled());
    assert!(rig.feeder.indicator().right_lit());
    assert!(!rig.feeder.indicator().left_lit());
}

#[test]
fn startup_long_press_with_empty_sensor_reverses_direction() {
    let time = SimTime::new();
    let mut rig = rig(&time, MemoryStore::new(), || false, || true);

    let report = rig.feeder.startup(&mut time.delay()).unwrap();

    assert_eq!(report.direction_changes, 1);
    assert_eq!(report.speed_changes, 0);
    assert_eq!(rig.feeder.config().direction, Direction::Reverse);
    assert_eq!(rig.feeder.config().speed_level, SpeedLevel::Normal);
    assert_eq!(rig.feeder.store().stored(), Some(rig.feeder.config()));
    assert_eq!(rig.feeder.store().save_count(), 1);
    assert_eq!(rig.feeder.motion().motor().direction(), Some(Direction::Reverse));
    assert!(!rig.dir.high.get());
    assert!(rig.feeder.indicator().right_lit());
}

#[test]
fn startup_long_press_with_loaded_sensor_changes_nothing() {
    let time = SimTime::new();
    let mut rig = rig(&time, MemoryStore::new(), || true, || true);

    let report = rig.feeder.startup(&mut time.delay()).unwrap();

    assert_eq!(report.saves(), 0);
    assert_eq!(rig.feeder.config(), &FeederConfig::default());
    assert_eq!(rig.feeder.store().stored(), None);
    assert!(rig.dir.high.get());
}

#[test]
fn startup_short_press_advances_speed() {
    let time = SimTime::new();
    // Held for the first sample only, released by the second.
    let button = time.input(|t| t < 700 * MS);
    let mut rig = rig(&time, MemoryStore::new(), || true, button);

    let report = rig.feeder.startup(&mut time.delay()).unwrap();

    assert_eq!(report.speed_changes, 1);
    assert_eq!(rig.feeder.config().speed_level, SpeedLevel::Fast);
    assert_eq!(rig.feeder.config().direction, Direction::Forward);
    assert_eq!(
        rig.feeder.store().stored().map(|c| c.speed_level),
        Some(SpeedLevel::Fast)
    );
}

#[test]
fn startup_flashes_speed_level_each_cycle() {
    let time = SimTime::new();
    let store = MemoryStore::with_config(FeederConfig::new(SpeedLevel::Fast, Direction::Forward));
    let mut rig = rig(&time, store, || true, || false);

    rig.feeder.startup(&mut time.delay()).unwrap();

    // Fast lights only the right LED while flashing; the final
    // direction display lights the left one once.
    let right_on = rig.right.writes.borrow().iter().filter(|d| **d > 0).count();
    let left_on = rig.left.writes.borrow().iter().filter(|d| **d > 0).count();
    assert_eq!(right_on, 6);
    assert_eq!(left_on, 1);
    assert!(rig.feeder.indicator().left_lit());
}

// =============================================================================
// Idle loop
// =============================================================================

#[test]
fn poll_without_filament_blanks_leds() {
    let time = SimTime::new();
    let mut rig = rig(&time, MemoryStore::new(), || false, || true);
    rig.feeder.startup(&mut time.delay()).unwrap();

    assert_eq!(rig.feeder.poll().unwrap(), None);

    assert!(!rig.feeder.indicator().left_lit());
    assert!(!rig.feeder.indicator().right_lit());
    assert!(rig.enable.high.get());
    assert_eq!(rig.step.rises.get(), 0);
}

#[test]
fn poll_with_filament_and_no_press_shows_direction() {
    let time = SimTime::new();
    let mut rig = rig(&time, MemoryStore::new(), || true, || false);
    rig.feeder.startup(&mut time.delay()).unwrap();

    assert_eq!(rig.feeder.poll().unwrap(), None);

    assert!(rig.feeder.indicator().left_lit());
    assert!(!rig.feeder.indicator().right_lit());
    assert_eq!(rig.step.rises.get(), 0);
}

#[test]
fn poll_with_press_runs_then_releases_motor() {
    let time = SimTime::new();
    // Pressed once setup is over, and kept pressed.
    let button = time.input(|t| t >= 3000 * MS);
    let mut rig = rig(&time, MemoryStore::new(), || true, button);
    rig.feeder.startup(&mut time.delay()).unwrap();
    let run_start = time.now_us();

    let outcome = rig.feeder.poll().unwrap();

    assert_eq!(outcome, Some(RunOutcome::Stopped(StopReason::UserStop)));
    let run_time = time.now_us() - run_start;
    assert!((3001 * MS..3003 * MS).contains(&run_time));

    let steps = rig.feeder.motion().motor().steps_taken();
    assert!(steps > 0);
    assert_eq!(u64::from(rig.step.rises.get()), steps);
    assert!(!rig.step.high.get());
    assert!(rig.enable.high.get(), "coils must be released after a run");
    assert!(rig.dir.high.get());
    // Direction shown again once the run is over.
    assert!(rig.feeder.indicator().left_lit());
    assert!(!rig.feeder.indicator().right_lit());
}

#[test]
fn poll_run_aborts_on_runout() {
    let time = SimTime::new();
    let sensor = time.input(|t| t < 3200 * MS);
    let mut rig = rig(&time, MemoryStore::new(), sensor, || false);
    rig.feeder.startup(&mut time.delay()).unwrap();

    // Button pressed only now that setup is over.
    let (store, motion, indicator) = rig.feeder.release();
    let (driver, sensor, _button, clock) = motion.release();
    let tuning = Tuning::default();
    let motion = MotionController::new(driver, sensor, || true, clock, tuning);
    let mut feeder = Feeder::new(store, motion, indicator);

    let outcome = feeder.poll().unwrap();

    assert_eq!(outcome, Some(RunOutcome::RampAborted));
    assert!(rig.enable.high.get());
    // Confirmed 150 ms after the sensor went empty.
    assert!(time.now_us() >= 3350 * MS);
    assert!(time.now_us() < 3353 * MS);
}
