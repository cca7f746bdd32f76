// --- File: simulation.rs ---
use crate::android::Android;
use crate::constants::*;
use crate::controller::{DecisionController, FitnessAccumulator, Sensors};
use crate::ground::Ground;
use crate::pipe::Pipe;
use glam::Vec2;
use rand::rngs::StdRng;

pub type SimRng = StdRng;

// --- Core Data Structures ---

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Elimination {
    Collision,
    Ceiling,
    Ground,
}

/// One android together with the controller that flies it and the accumulator that
/// scores it. Keeping the three in one record means removal can never misalign them.
#[derive(Debug, Clone)]
pub struct Contestant<D, F> {
    pub android: Android,
    pub controller: D,
    pub fitness: F,
    eliminated: Option<Elimination>,
}

impl<D, F> Contestant<D, F> {
    pub fn new(android: Android, controller: D, fitness: F) -> Self {
        Self {
            android,
            controller,
            fitness,
            eliminated: None,
        }
    }

    pub fn into_parts(self) -> (D, F) {
        (self.controller, self.fitness)
    }
}

#[derive(Debug, Clone)]
pub struct Fallen<D, F> {
    pub contestant: Contestant<D, F>,
    pub cause: Elimination,
    pub tick: u64,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    Running { score: u32, alive: usize },
    /// Nobody left; no further ticks run.
    Extinct { score: u32 },
}

// --- Presenter View ---

#[derive(Debug, Clone, PartialEq)]
pub struct AndroidView {
    pub position: Vec2,
    pub frame: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipeView {
    pub x: f32,
    pub top: i32,
    pub bottom: i32,
    pub passed: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub androids: Vec<AndroidView>,
    pub pipes: Vec<PipeView>,
    pub ground: Ground,
    pub score: u32,
    pub generation: u32,
    pub tick: u64,
}

/// Sensor tuple for `android` against `pipe`.
pub fn sense(android: &Android, pipe: Option<&Pipe>) -> Sensors {
    let y = android.y();
    match pipe {
        Some(pipe) => Sensors::new(
            y,
            (y - pipe.gap_y() as f32).abs(),
            (y - pipe.bottom() as f32).abs(),
        ),
        None => Sensors::new(y, 0.0, 0.0),
    }
}

/// Population plus course for a single generation.
pub struct SimulationState<D, F> {
    contestants: Vec<Contestant<D, F>>,
    fallen: Vec<Fallen<D, F>>,
    pipes: Vec<Pipe>,
    ground: Ground,
    score: u32,
    tick: u64,
    population: usize,
    rng: SimRng,
    retired_pipes_buffer: Vec<usize>,
    survivors_buffer: Vec<Contestant<D, F>>,
}

impl<D, F> SimulationState<D, F>
where
    D: DecisionController,
    F: FitnessAccumulator,
{
    /// Every pair starts at the shared start position with one pipe ahead.
    pub fn new(population: impl IntoIterator<Item = (D, F)>, mut rng: SimRng) -> Self {
        let contestants = population
            .into_iter()
            .map(|(controller, fitness)| Contestant::new(Android::default(), controller, fitness))
            .collect();
        let pipes = vec![Pipe::new(FIRST_PIPE_X, &mut rng)];
        Self::from_contestants(contestants, pipes, rng)
    }

    /// Builds a state from an explicit layout.
    pub fn from_contestants(
        contestants: Vec<Contestant<D, F>>,
        pipes: Vec<Pipe>,
        rng: SimRng,
    ) -> Self {
        if pipes.is_empty() {
            log::warn!("Simulation started without pipes; sensors will read zero distances");
        }
        let population = contestants.len();
        Self {
            contestants,
            fallen: Vec::with_capacity(population),
            pipes,
            ground: Ground::default(),
            score: 0,
            tick: 0,
            population,
            rng,
            retired_pipes_buffer: Vec::new(),
            survivors_buffer: Vec::with_capacity(population),
        }
    }

    /// Pipe the androids react to: the next one once the lead android is past the first.
    pub fn lead_pipe_index(&self) -> usize {
        match (self.contestants.first(), self.pipes.first()) {
            (Some(lead), Some(first))
                if self.pipes.len() > 1 && lead.android.x() > first.trailing_edge() =>
            {
                1
            }
            _ => 0,
        }
    }

    pub fn tick(&mut self) -> TickOutcome {
        if self.contestants.is_empty() {
            return TickOutcome::Extinct { score: self.score };
        }
        self.tick += 1;

        // --- Decisions & Physics ---
        let pipe_index = self.lead_pipe_index();
        let watched = self.pipes.get(pipe_index);
        for contestant in &mut self.contestants {
            let sensors = sense(&contestant.android, watched);
            let activation = contestant.controller.decide(sensors);
            contestant.fitness.add(SURVIVAL_BONUS);
            if activation > JUMP_THRESHOLD {
                contestant.android.jump();
            }
            contestant.android.integrate();
        }

        // --- Collisions & Passes ---
        let mut add_pipe = false;
        self.retired_pipes_buffer.clear();
        for (index, pipe) in self.pipes.iter_mut().enumerate() {
            for contestant in self
                .contestants
                .iter_mut()
                .filter(|c| c.eliminated.is_none())
            {
                if pipe.collides_with(&contestant.android) {
                    contestant.fitness.add(-COLLISION_PENALTY);
                    contestant.eliminated = Some(Elimination::Collision);
                }
                if !pipe.passed && pipe.x < contestant.android.x() {
                    pipe.passed = true;
                    add_pipe = true;
                }
            }
            if pipe.is_off_screen() {
                self.retired_pipes_buffer.push(index);
            }
            pipe.integrate();
        }
        self.remove_eliminated();

        // --- Scoring & Spawning ---
        if add_pipe {
            self.score += 1;
            for contestant in &mut self.contestants {
                contestant.fitness.add(PASS_BONUS);
            }
            self.pipes.push(Pipe::new(SPAWN_PIPE_X, &mut self.rng));
            log::debug!(
                "Tick {}: score {} with {} alive, spawned pipe (gap at {})",
                self.tick,
                self.score,
                self.contestants.len(),
                self.pipes.last().map_or(0, Pipe::gap_y)
            );
        }

        // Indices were pushed ascending; remove from the back so earlier ones stay valid.
        for &index in self.retired_pipes_buffer.iter().rev() {
            let pipe = self.pipes.remove(index);
            log::debug!("Tick {}: retired pipe at x {}", self.tick, pipe.x);
        }

        // --- Bounds ---
        let ground_y = self.ground.y_position();
        for contestant in &mut self.contestants {
            let android = &contestant.android;
            if android.y() + android.height() >= ground_y {
                contestant.eliminated = Some(Elimination::Ground);
            } else if android.y() < 0.0 {
                contestant.eliminated = Some(Elimination::Ceiling);
            }
        }
        self.remove_eliminated();

        self.ground.integrate();
        for contestant in &mut self.contestants {
            contestant.android.animate();
        }

        TickOutcome::Running {
            score: self.score,
            alive: self.contestants.len(),
        }
    }

    /// Moves every marked contestant to the graveyard, keeping survivor order.
    fn remove_eliminated(&mut self) {
        if self.contestants.iter().all(|c| c.eliminated.is_none()) {
            return;
        }
        let mut survivors = std::mem::take(&mut self.survivors_buffer);
        survivors.clear();
        for contestant in self.contestants.drain(..) {
            match contestant.eliminated {
                Some(cause) => {
                    log::trace!(
                        "Tick {}: android at y {:.1} eliminated ({:?})",
                        self.tick,
                        contestant.android.y(),
                        cause
                    );
                    self.fallen.push(Fallen {
                        contestant,
                        cause,
                        tick: self.tick,
                    });
                }
                None => survivors.push(contestant),
            }
        }
        // The drained vector keeps its capacity for the next compaction.
        self.survivors_buffer = std::mem::replace(&mut self.contestants, survivors);
        debug_assert_eq!(
            self.contestants.len() + self.fallen.len(),
            self.population,
            "contestants lost or duplicated during removal"
        );
    }

    pub fn snapshot(&self, generation: u32) -> Snapshot {
        Snapshot {
            androids: self
                .contestants
                .iter()
                .map(|c| AndroidView {
                    position: c.android.position(),
                    frame: c.android.frame(),
                })
                .collect(),
            pipes: self
                .pipes
                .iter()
                .map(|p| PipeView {
                    x: p.x,
                    top: p.top(),
                    bottom: p.bottom(),
                    passed: p.passed,
                })
                .collect(),
            ground: self.ground.clone(),
            score: self.score,
            generation,
            tick: self.tick,
        }
    }

    /// Every controller/accumulator pair: eliminated ones in elimination order, then
    /// survivors.
    pub fn into_results(self) -> Vec<(D, F)> {
        self.fallen
            .into_iter()
            .map(|f| f.contestant)
            .chain(self.contestants)
            .map(Contestant::into_parts)
            .collect()
    }
}

impl<D, F> SimulationState<D, F> {
    pub fn contestants(&self) -> &[Contestant<D, F>] {
        &self.contestants
    }

    pub fn fallen(&self) -> &[Fallen<D, F>] {
        &self.fallen
    }

    pub fn pipes(&self) -> &[Pipe] {
        &self.pipes
    }

    pub fn ground(&self) -> &Ground {
        &self.ground
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    pub fn alive(&self) -> usize {
        self.contestants.len()
    }

    pub fn is_extinct(&self) -> bool {
        self.contestants.is_empty()
    }

    /// Per-cause elimination counts: (collision, ceiling, ground).
    pub fn elimination_counts(&self) -> (usize, usize, usize) {
        let mut collision = 0;
        let mut ceiling = 0;
        let mut ground = 0;
        for fallen in &self.fallen {
            match fallen.cause {
                Elimination::Collision => collision += 1,
                Elimination::Ceiling => ceiling += 1,
                Elimination::Ground => ground += 1,
            }
        }
        (collision, ceiling, ground)
    }
}
