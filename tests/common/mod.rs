//! Virtual-time test doubles shared by the integration tests.
//!
//! Time only advances when something waits: a simulated step pulse or a
//! simulated delay. Inputs are closures over the same virtual time.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use filament_feeder::{Clock, Direction, IndicatorController, Micros, Motor, StepPulse, Tuning};

/// Shared virtual time in microseconds.
#[derive(Clone, Default)]
pub struct SimTime(Rc<Cell<u64>>);

impl SimTime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at_ms(ms: u32) -> Self {
        let t = Self::new();
        t.0.set(u64::from(ms) * 1000);
        t
    }

    pub fn now_us(&self) -> u64 {
        self.0.get()
    }

    pub fn advance_us(&self, us: u64) {
        self.0.set(self.0.get() + us);
    }

    pub fn clock(&self) -> SimClock {
        SimClock { time: self.clone() }
    }

    pub fn delay(&self) -> SimDelay {
        SimDelay { time: self.clone() }
    }

    /// Input asserted while `pred(now_us)` holds.
    pub fn input(&self, pred: impl Fn(u64) -> bool) -> impl FnMut() -> bool {
        let time = self.clone();
        move || pred(time.now_us())
    }
}

/// Millisecond clock over virtual time, wrapping like a tick register.
pub struct SimClock {
    time: SimTime,
}

impl Clock for SimClock {
    fn now_ms(&mut self) -> u32 {
        (self.time.now_us() / 1000) as u32
    }
}

/// Delay provider that advances virtual time.
pub struct SimDelay {
    time: SimTime,
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.time.advance_us(u64::from(ns) / 1000);
    }

    fn delay_us(&mut self, us: u32) {
        self.time.advance_us(u64::from(us));
    }

    fn delay_ms(&mut self, ms: u32) {
        self.time.advance_us(u64::from(ms) * 1000);
    }
}

/// What a [`SimMotor`] saw.
#[derive(Default)]
pub struct MotorLog {
    pub delays: Vec<Micros>,
    pub step_times_us: Vec<u64>,
    pub enabled: bool,
    pub enable_calls: u32,
    pub disable_calls: u32,
    pub direction: Option<Direction>,
}

/// Motor double: each step takes two half-periods of virtual time.
pub struct SimMotor {
    time: SimTime,
    pub log: Rc<RefCell<MotorLog>>,
}

impl SimMotor {
    pub fn new(time: &SimTime) -> (Self, Rc<RefCell<MotorLog>>) {
        let log = Rc::new(RefCell::new(MotorLog::default()));
        (
            Self {
                time: time.clone(),
                log: log.clone(),
            },
            log,
        )
    }
}

impl StepPulse for SimMotor {
    fn step(&mut self, half_period: Micros) -> filament_feeder::Result<()> {
        self.time.advance_us(2 * u64::from(half_period.0));
        let mut log = self.log.borrow_mut();
        log.delays.push(half_period);
        log.step_times_us.push(self.time.now_us());
        Ok(())
    }
}

impl Motor for SimMotor {
    fn enable(&mut self) -> filament_feeder::Result<()> {
        let mut log = self.log.borrow_mut();
        log.enabled = true;
        log.enable_calls += 1;
        Ok(())
    }

    fn disable(&mut self) -> filament_feeder::Result<()> {
        let mut log = self.log.borrow_mut();
        log.enabled = false;
        log.disable_calls += 1;
        Ok(())
    }

    fn set_direction(&mut self, direction: Direction) -> filament_feeder::Result<()> {
        self.log.borrow_mut().direction = Some(direction);
        Ok(())
    }
}

/// PWM double recording every duty written.
#[derive(Clone, Default)]
pub struct SimPwm {
    pub writes: Rc<RefCell<Vec<u16>>>,
}

impl SimPwm {
    pub fn duty(&self) -> u16 {
        self.writes.borrow().last().copied().unwrap_or(0)
    }

    pub fn write_count(&self) -> usize {
        self.writes.borrow().len()
    }
}

impl embedded_hal::pwm::ErrorType for SimPwm {
    type Error = core::convert::Infallible;
}

impl SetDutyCycle for SimPwm {
    fn max_duty_cycle(&self) -> u16 {
        1023
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.writes.borrow_mut().push(duty);
        Ok(())
    }
}

/// Indicator over two recording PWMs, plus handles to inspect them.
pub fn sim_indicator() -> (IndicatorController<SimPwm, SimPwm>, SimPwm, SimPwm) {
    let left = SimPwm::default();
    let right = SimPwm::default();
    let indicator = IndicatorController::new(left.clone(), right.clone(), &Tuning::default());
    (indicator, left, right)
}

/// Output pin double that counts rising edges and remembers its level.
#[derive(Clone, Default)]
pub struct SimPin {
    pub high: Rc<Cell<bool>>,
    pub rises: Rc<Cell<u32>>,
}

impl embedded_hal::digital::ErrorType for SimPin {
    type Error = core::convert::Infallible;
}

impl OutputPin for SimPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high.get() {
            self.rises.set(self.rises.get() + 1);
        }
        self.high.set(true);
        Ok(())
    }
}

pub const MS: u64 = 1000;
