//! Simulation loop
//!
//! Drives the active world at a fixed tick rate. Each step reads one
//! openness sample, collects control events, ticks the world and hands a
//! snapshot to the renderer. A bad sample never stalls the loop.

use std::io::BufRead;
use std::path::Path;
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{SignalError, SimError};
use crate::gesture::{GestureBridge, JumpEvent};
use crate::settings::Settings;
use crate::sim::{Clock, Tick, TickInput, WorldEvent, WorldManager, tick};
use crate::snapshot::RenderSnapshot;

/// External control events
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlEvent {
    /// Jump requested (keyboard, test harness, ...); same effect as a gesture
    Jump,
    /// Horizontal move direction
    Move(f32),
    /// Stop the loop immediately
    Quit,
}

/// Per-tick openness samples (`Ok(None)` when no face was detected)
pub trait OpennessSource {
    fn sample(&mut self) -> Result<Option<f32>, SignalError>;
}

impl<S: OpennessSource + ?Sized> OpennessSource for Box<S> {
    fn sample(&mut self) -> Result<Option<f32>, SignalError> {
        (**self).sample()
    }
}

/// Control events raised since the last tick
pub trait ControlSource {
    fn poll(&mut self, out: &mut Vec<ControlEvent>);
}

/// Receives a snapshot after every tick
pub trait FrameSink {
    fn present(&mut self, snapshot: &RenderSnapshot);
}

/// No controls at all (gesture-only play)
#[derive(Debug, Default)]
pub struct NoControls;

impl ControlSource for NoControls {
    fn poll(&mut self, _out: &mut Vec<ControlEvent>) {}
}

/// Source with no face in view
#[derive(Debug, Default)]
pub struct NoSignal;

impl OpennessSource for NoSignal {
    fn sample(&mut self) -> Result<Option<f32>, SignalError> {
        Ok(None)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum ScriptedSample {
    Value(f32),
    Missing,
    Malformed(usize),
}

/// Replays a recorded openness signal, one sample per line.
///
/// Blank lines and `-` mean no detection. Unparseable lines surface as a
/// read error on their tick. Once exhausted the source reports no detection.
#[derive(Debug, Clone)]
pub struct ScriptedSignal {
    samples: Vec<ScriptedSample>,
    lines: Vec<String>,
    cursor: usize,
}

impl ScriptedSignal {
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, SignalError> {
        let mut samples = Vec::new();
        let mut lines = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            let text = line.trim();
            let sample = match text {
                "" | "-" => ScriptedSample::Missing,
                _ => match text.parse::<f32>() {
                    Ok(v) => ScriptedSample::Value(v),
                    Err(_) => ScriptedSample::Malformed(index + 1),
                },
            };
            samples.push(sample);
            lines.push(text.to_string());
        }
        Ok(Self {
            samples,
            lines,
            cursor: 0,
        })
    }

    pub fn from_path(path: &Path) -> Result<Self, SignalError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(std::io::BufReader::new(file))
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

impl OpennessSource for ScriptedSignal {
    fn sample(&mut self) -> Result<Option<f32>, SignalError> {
        let Some(&sample) = self.samples.get(self.cursor) else {
            return Ok(None);
        };
        let index = self.cursor;
        self.cursor += 1;
        match sample {
            ScriptedSample::Value(v) => Ok(Some(v)),
            ScriptedSample::Missing => Ok(None),
            ScriptedSample::Malformed(line) => Err(SignalError::Malformed {
                line,
                text: self.lines[index].clone(),
            }),
        }
    }
}

/// Result of one loop step
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Ticked { tick: Tick, events: Vec<WorldEvent> },
    Quit,
}

/// Options for [`SimulationLoop::run`]
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Stop after this many ticks
    pub max_ticks: Option<u64>,
    /// Sleep to hold the configured tick rate (off for headless replays)
    pub realtime: bool,
    /// Stop once the active world is lost
    pub stop_when_lost: bool,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub score: i64,
    pub lost: bool,
    pub jumps: u64,
    pub read_failures: u64,
}

/// Fixed-rate driver for the active world
#[derive(Debug)]
pub struct SimulationLoop {
    manager: WorldManager,
    gesture: GestureBridge,
    clock: Clock,
    tick_period: Duration,
    jumps: u64,
    read_failures: u64,
    controls: Vec<ControlEvent>,
}

impl SimulationLoop {
    pub fn new(settings: &Settings, manager: WorldManager) -> Self {
        Self {
            manager,
            gesture: GestureBridge::new(settings.gesture_threshold),
            clock: Clock::new(settings.tick_rate),
            tick_period: settings.tick_period(),
            jumps: 0,
            read_failures: 0,
            controls: Vec::new(),
        }
    }

    pub fn manager(&self) -> &WorldManager {
        &self.manager
    }

    pub fn manager_mut(&mut self) -> &mut WorldManager {
        &mut self.manager
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn gesture(&self) -> &GestureBridge {
        &self.gesture
    }

    /// Run one simulation step.
    ///
    /// A `Quit` among `controls` ends the loop before anything else happens.
    /// A jump is requested when the gesture fires or a `Jump` control arrives.
    pub fn step(
        &mut self,
        openness: Option<f32>,
        controls: &[ControlEvent],
    ) -> Result<StepOutcome, SimError> {
        if controls.contains(&ControlEvent::Quit) {
            return Ok(StepOutcome::Quit);
        }

        // Checked before the latch so a failed step keeps the rising edge
        let world = self
            .manager
            .active_world_mut()
            .ok_or(SimError::NoActiveWorld)?;

        let gesture_jump = self.gesture.observe(openness);
        let control_jump = controls
            .contains(&ControlEvent::Jump)
            .then_some(JumpEvent);
        let jump = gesture_jump.or(control_jump);

        let horizontal: f32 = controls
            .iter()
            .map(|c| match c {
                ControlEvent::Move(dir) => *dir,
                _ => 0.0,
            })
            .sum();

        let now = self.clock.advance();
        let events = tick(world, &TickInput { jump, horizontal }, now);
        // Only jumps the player actually took
        self.jumps += events.iter().filter(|e| **e == WorldEvent::Jumped).count() as u64;

        Ok(StepOutcome::Ticked { tick: now, events })
    }

    /// Snapshot of the active world at the current tick
    pub fn snapshot(&self) -> Option<RenderSnapshot> {
        self.manager
            .active_world()
            .map(|w| RenderSnapshot::capture(w, self.clock.now()))
    }

    /// Drive the loop until quit, `max_ticks`, or (optionally) a loss
    pub fn run<S, C, F>(
        &mut self,
        source: &mut S,
        controls: &mut C,
        sink: &mut F,
        options: &RunOptions,
    ) -> Result<RunSummary, SimError>
    where
        S: OpennessSource,
        C: ControlSource,
        F: FrameSink,
    {
        let start_tick = self.clock.now();
        let mut next_deadline = Instant::now();
        log::info!(
            "Simulation loop starting at {} Hz",
            self.clock.rate_hz()
        );

        loop {
            let elapsed = self.clock.now() - start_tick;
            if options.max_ticks.is_some_and(|max| elapsed >= max) {
                break;
            }

            let openness = match source.sample() {
                Ok(sample) => sample,
                Err(e) => {
                    // Keep ticking; the debounce latch is untouched
                    self.read_failures += 1;
                    log::warn!("Signal read failed, skipping sample: {e}");
                    None
                }
            };

            let mut pending = std::mem::take(&mut self.controls);
            pending.clear();
            controls.poll(&mut pending);
            let outcome = self.step(openness, &pending);
            self.controls = pending;

            match outcome? {
                StepOutcome::Quit => {
                    log::info!("Quit requested");
                    break;
                }
                StepOutcome::Ticked { events, .. } => {
                    for event in &events {
                        log::trace!("{:?}", event);
                    }
                }
            }

            if let Some(snapshot) = self.snapshot() {
                sink.present(&snapshot);
                if options.stop_when_lost && snapshot.lost {
                    break;
                }
            }

            if options.realtime {
                next_deadline += self.tick_period;
                let now = Instant::now();
                if next_deadline > now {
                    thread::sleep(next_deadline - now);
                } else {
                    // Running behind: don't try to catch up
                    next_deadline = now;
                }
            }
        }

        let summary = self.summary(start_tick);
        log::info!(
            "Simulation loop stopped after {} ticks (score {}, lost: {})",
            summary.ticks,
            summary.score,
            summary.lost
        );
        Ok(summary)
    }

    fn summary(&self, start_tick: Tick) -> RunSummary {
        let world = self.manager.active_world();
        RunSummary {
            ticks: self.clock.now() - start_tick,
            score: world.map_or(0, |w| w.score()),
            lost: world.is_some_and(|w| w.is_paused()),
            jumps: self.jumps,
            read_failures: self.read_failures,
        }
    }
}
