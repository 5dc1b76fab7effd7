//! One game run: from a fresh snake to game over.
//!
//! [`Run`] is the synchronous state machine (steer / tick / frame) and can be
//! driven directly in tests. [`RunHandle::spawn`] puts a run on its own task
//! with a logical-tick clock and a frame clock, and hands the newest scene
//! back through a cache owned by that run alone.

use std::time::Duration;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio::time::{self, Instant, MissedTickBehavior};
use tracing::{debug, info};

use crate::cache::{latest_cache, CacheReader, CacheWriter};
use crate::core::{generate_apples, generate_snake, is_game_over, Apples, Scene, SimpleRng, Snake};
use crate::direction::DirectionResolver;
use crate::feeder::{AppleFeeder, ScoreAccumulator};
use crate::growth::{growth_channel, SnakeMover};
use crate::types::{Direction, GameConfig, PlayField, INITIAL_DIRECTION};

/// What a run reports to whoever presents it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunEvent {
    /// Latest scene, sampled at a frame.
    Update(Scene),
    /// The run could not continue.
    Failure(String),
    /// The run reached a terminal state; carries the last scene delivered
    /// as `Update`.
    Finished(Scene),
}

/// Game state of a single run.
#[derive(Debug)]
pub struct Run {
    id: u64,
    field: PlayField,
    direction: DirectionResolver,
    mover: SnakeMover,
    feeder: AppleFeeder,
    score: ScoreAccumulator,
    scenes: CacheWriter<Scene>,
    frames: CacheReader<Scene>,
    last_presented: Scene,
    /// Set once a tick produced a terminal scene; no further movement.
    frozen: bool,
    finished: bool,
}

impl Run {
    /// Start a run with freshly generated entities.
    pub fn new(id: u64, config: &GameConfig, mut rng: SimpleRng) -> Self {
        let field = config.field();
        let snake = generate_snake(config.snake_length, field);
        let apples = generate_apples(config.apple_count, &snake, field, &mut rng);
        Self::with_entities(id, config, snake, apples, rng)
    }

    /// Start a run from explicit entities.
    pub fn with_entities(
        id: u64,
        config: &GameConfig,
        snake: Snake,
        apples: Apples,
        rng: SimpleRng,
    ) -> Self {
        let field = config.field();
        let (growth_tx, growth_rx) = growth_channel();
        let initial = Scene::new(snake.clone(), apples.clone(), 0);
        let (scenes, frames) = latest_cache(initial.clone());

        Self {
            id,
            field,
            direction: DirectionResolver::new(INITIAL_DIRECTION),
            mover: SnakeMover::new(snake, growth_rx),
            feeder: AppleFeeder::new(apples, field, rng, growth_tx, config.growth_per_apple),
            score: ScoreAccumulator::new(config.points_per_apple),
            scenes,
            frames,
            last_presented: initial,
            frozen: false,
            finished: false,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// Feed one recognized direction key.
    pub fn steer(&mut self, candidate: Direction) {
        if let Some(direction) = self.direction.offer(candidate) {
            debug!(run_id = self.id, direction = direction.as_str(), "steer");
        }
    }

    /// One logical step: move, eat, score, publish the new scene.
    pub fn tick(&mut self) {
        if self.frozen {
            return;
        }

        let direction = self.direction.commit();
        let snake = self.mover.step(direction).clone();
        let score = match self.feeder.feed(&snake) {
            Some(event) => self.score.observe(&event),
            None => self.score.total(),
        };

        let scene = Scene::new(snake, self.feeder.apples().clone(), score);
        if is_game_over(&scene, self.field) {
            self.frozen = true;
        }
        self.scenes.publish(scene);
    }

    /// Sample the newest scene for presentation.
    ///
    /// Returns `Update` while the run is alive; the returned scene counts as
    /// presented. The first terminal scene ends the run: `Finished` carries
    /// the last scene returned as `Update`, and every later call keeps
    /// returning it.
    pub fn frame(&mut self) -> RunEvent {
        if self.finished {
            return RunEvent::Finished(self.last_presented.clone());
        }

        let scene = self.frames.latest();
        if is_game_over(&scene, self.field) {
            self.finished = true;
            info!(run_id = self.id, score = scene.score, length = scene.snake.len(), "game over");
            return RunEvent::Finished(self.last_presented.clone());
        }

        self.last_presented = scene.clone();
        RunEvent::Update(scene)
    }

    /// Newest published scene, without consuming it.
    pub fn latest_scene(&self) -> Scene {
        self.frames.peek()
    }

    pub fn target_length(&self) -> usize {
        self.mover.target_length()
    }

    pub fn committed_direction(&self) -> Direction {
        self.direction.committed()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// Periods of the two clocks a run is driven by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunClocks {
    pub tick: Duration,
    pub frame: Duration,
}

impl RunClocks {
    pub fn from_config(config: &GameConfig) -> Self {
        Self {
            tick: Duration::from_millis(config.tick_ms.max(1)),
            frame: Duration::from_millis(config.frame_ms()),
        }
    }
}

/// A run living on its own task.
///
/// Scenes reach the presenter through a latest-value cache: a presenter that
/// falls behind is handed the newest scene, never a backlog. The end of the
/// run travels on a separate one-shot signal.
///
/// Dropping the handle aborts the task, which stops both clocks: nothing
/// from this run can be observed afterwards.
#[derive(Debug)]
pub struct RunHandle {
    id: u64,
    steer_tx: mpsc::UnboundedSender<Direction>,
    scenes: CacheReader<Scene>,
    done: oneshot::Receiver<()>,
    /// Last scene handed out as `Update`; the payload of `Finished`.
    last_delivered: Scene,
    ended: Option<RunEvent>,
    task: JoinHandle<()>,
}

impl RunHandle {
    pub fn spawn(run: Run, clocks: RunClocks) -> Self {
        let id = run.id();
        let initial = run.latest_scene();
        let (steer_tx, steer_rx) = mpsc::unbounded_channel();
        let (writer, scenes) = latest_cache(initial.clone());
        let (done_tx, done) = oneshot::channel();
        let task = tokio::spawn(drive(run, clocks, steer_rx, writer, done_tx));
        Self {
            id,
            steer_tx,
            scenes,
            done,
            last_delivered: initial,
            ended: None,
            task,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn steer(&self, direction: Direction) {
        let _ = self.steer_tx.send(direction);
    }

    /// Next event from the run.
    ///
    /// A scene published before the run ended is still delivered ahead of
    /// `Finished`. A run that stops without finishing (e.g. its task
    /// panicked) surfaces as `Failure`. Once the run has ended, every call
    /// returns the same terminal event.
    ///
    /// Cancel safe: nothing is consumed unless the call completes.
    pub async fn next_event(&mut self) -> RunEvent {
        if let Some(event) = &self.ended {
            return event.clone();
        }
        if self.scenes.has_update() {
            return self.deliver();
        }

        let ended = tokio::select! {
            biased;

            // `changed` already marked the scene seen; hand it out below.
            true = self.scenes.changed() => None,
            result = &mut self.done => Some(match result {
                Ok(()) => RunEvent::Finished(self.last_delivered.clone()),
                Err(_) => RunEvent::Failure(format!("run {} stopped without finishing", self.id)),
            }),
        };

        match ended {
            None => self.deliver(),
            Some(event) => {
                self.ended = Some(event.clone());
                event
            }
        }
    }

    fn deliver(&mut self) -> RunEvent {
        let scene = self.scenes.latest();
        self.last_delivered = scene.clone();
        RunEvent::Update(scene)
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

impl Drop for RunHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn drive(
    mut run: Run,
    clocks: RunClocks,
    mut steer_rx: mpsc::UnboundedReceiver<Direction>,
    scenes: CacheWriter<Scene>,
    done: oneshot::Sender<()>,
) {
    let mut ticks = time::interval_at(Instant::now() + clocks.tick, clocks.tick);
    ticks.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut frames = time::interval(clocks.frame);
    frames.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;

            steer = steer_rx.recv() => match steer {
                Some(direction) => run.steer(direction),
                None => return,
            },
            _ = ticks.tick() => run.tick(),
            _ = frames.tick() => match run.frame() {
                RunEvent::Update(scene) => scenes.publish(scene),
                _ => break,
            },
        }
    }

    let _ = done.send(());
    // Keep the scene slot open until the handle goes away, so a scene the
    // presenter has not read yet is still there.
    while steer_rx.recv().await.is_some() {}
}
