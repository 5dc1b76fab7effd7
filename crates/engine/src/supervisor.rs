//! Run lifecycle: the outer loop that starts runs, presents them, and waits
//! for a restart after each game over.
//!
//! ```text
//! RUNNING --(Finished / Failure)--> GAME_OVER --(Restart)--> RUNNING (new run)
//! ```
//!
//! The supervisor owns the renderer and the input channel for the whole
//! process. Each run is disposable: it gets its own entities, accumulators,
//! clocks and RNG, and is dropped (cancelled) as soon as it ends.

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::core::{Scene, SimpleRng};
use crate::run::{Run, RunClocks, RunEvent, RunHandle};
use crate::types::{GameConfig, GameInput};

/// Drawing surface the game presents to.
///
/// The surface is created once by the bootstrap and shared across runs.
pub trait SceneRenderer {
    fn draw_scene(&mut self, scene: &Scene) -> Result<()>;
    fn draw_game_over(&mut self, last: &Scene) -> Result<()>;
}

/// Where the lifecycle state machine currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// No run started yet.
    Idle,
    Running { run_id: u64 },
    /// Waiting for a restart trigger. `failed` is set when the run ended
    /// through a failure rather than a normal game over.
    GameOver { run_id: u64, failed: bool },
}

enum Step {
    Event(RunEvent),
    Input(Option<GameInput>),
}

pub struct Supervisor<R> {
    config: GameConfig,
    clocks: RunClocks,
    rng: SimpleRng,
    renderer: R,
    state: Lifecycle,
    runs_started: u64,
    last_scene: Option<Scene>,
}

impl<R: SceneRenderer> Supervisor<R> {
    pub fn new(config: GameConfig, seed: u32, renderer: R) -> Self {
        let clocks = RunClocks::from_config(&config);
        Self {
            config,
            clocks,
            rng: SimpleRng::new(seed),
            renderer,
            state: Lifecycle::Idle,
            runs_started: 0,
            last_scene: None,
        }
    }

    pub fn state(&self) -> Lifecycle {
        self.state
    }

    pub fn runs_started(&self) -> u64 {
        self.runs_started
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn into_renderer(self) -> R {
        self.renderer
    }

    /// Play until `Quit` arrives or the input channel closes.
    pub async fn run(&mut self, inputs: &mut mpsc::Receiver<GameInput>) -> Result<()> {
        let mut current = Some(self.start_run());

        loop {
            let Some(handle) = current.as_mut() else {
                // GAME_OVER: the next restart trigger starts a new run.
                match inputs.recv().await {
                    Some(GameInput::Restart) => {
                        info!(previous = ?self.state, "restart");
                        current = Some(self.start_run());
                    }
                    Some(GameInput::Steer(_)) => {}
                    Some(GameInput::Quit) | None => return Ok(()),
                }
                continue;
            };

            let step = tokio::select! {
                biased;

                event = handle.next_event() => Step::Event(event),
                input = inputs.recv() => Step::Input(input),
            };

            match step {
                Step::Event(event) => {
                    let run_id = handle.id();
                    if self.dispatch(run_id, event) {
                        current = None;
                        if self.drain_stale_inputs(inputs) {
                            return Ok(());
                        }
                    }
                }
                Step::Input(Some(GameInput::Steer(direction))) => handle.steer(direction),
                Step::Input(Some(GameInput::Restart)) => {
                    debug!(run_id = handle.id(), "restart ignored while running");
                }
                Step::Input(Some(GameInput::Quit)) | Step::Input(None) => return Ok(()),
            }
        }
    }

    fn start_run(&mut self) -> RunHandle {
        self.runs_started += 1;
        let run_id = self.runs_started;
        let rng = self.rng.fork();
        info!(run_id, seed = rng.state(), "run started");

        self.state = Lifecycle::Running { run_id };
        self.last_scene = None;
        RunHandle::spawn(Run::new(run_id, &self.config, rng), self.clocks)
    }

    /// Apply one run event. Returns true when the run is over.
    fn dispatch(&mut self, run_id: u64, event: RunEvent) -> bool {
        match event {
            RunEvent::Update(scene) => match self.renderer.draw_scene(&scene) {
                Ok(()) => {
                    self.last_scene = Some(scene);
                    false
                }
                Err(err) => self.dispatch(run_id, RunEvent::Failure(format!("render failed: {err:#}"))),
            },
            RunEvent::Finished(last) => {
                if let Err(err) = self.renderer.draw_game_over(&last) {
                    error!(run_id, error = %format!("{err:#}"), "game over screen failed");
                }
                self.last_scene = Some(last);
                self.state = Lifecycle::GameOver {
                    run_id,
                    failed: false,
                };
                true
            }
            RunEvent::Failure(reason) => {
                error!(run_id, %reason, "run abandoned");
                if let Some(last) = self.last_scene.as_ref() {
                    if let Err(err) = self.renderer.draw_game_over(last) {
                        error!(run_id, error = %format!("{err:#}"), "game over screen failed");
                    }
                }
                self.state = Lifecycle::GameOver {
                    run_id,
                    failed: true,
                };
                true
            }
        }
    }

    /// Discard inputs queued before the game over was observed, so an old
    /// click cannot count as the restart. Returns true if one of them was a
    /// quit request.
    fn drain_stale_inputs(&mut self, inputs: &mut mpsc::Receiver<GameInput>) -> bool {
        let mut quit = false;
        while let Ok(input) = inputs.try_recv() {
            match input {
                GameInput::Quit => quit = true,
                GameInput::Restart => debug!("stale restart dropped"),
                GameInput::Steer(_) => {}
            }
        }
        quit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use anyhow::anyhow;

    #[derive(Debug, Default)]
    struct Log {
        scenes: Vec<Scene>,
        game_overs: Vec<Scene>,
    }

    #[derive(Clone, Default)]
    struct Recorder {
        log: Arc<Mutex<Log>>,
        fail_draws: bool,
    }

    impl SceneRenderer for Recorder {
        fn draw_scene(&mut self, scene: &Scene) -> Result<()> {
            if self.fail_draws {
                return Err(anyhow!("surface lost"));
            }
            self.log.lock().unwrap().scenes.push(scene.clone());
            Ok(())
        }

        fn draw_game_over(&mut self, last: &Scene) -> Result<()> {
            self.log.lock().unwrap().game_overs.push(last.clone());
            Ok(())
        }
    }

    fn tiny_config() -> GameConfig {
        GameConfig {
            cols: 6,
            rows: 3,
            snake_length: 3,
            apple_count: 1,
            ..GameConfig::default()
        }
    }

    #[tokio::test(start_paused = true)]
    async fn run_ends_in_game_over_and_waits() {
        let recorder = Recorder::default();
        let log = recorder.log.clone();
        let (tx, mut rx) = mpsc::channel(16);

        let task = tokio::spawn(async move {
            let mut sup = Supervisor::new(tiny_config(), 1, recorder);
            sup.run(&mut rx).await.unwrap();
            sup
        });

        tokio::time::sleep(Duration::from_secs(5)).await;
        tx.send(GameInput::Quit).await.unwrap();
        let sup = task.await.unwrap();

        assert_eq!(sup.runs_started(), 1);
        assert_eq!(
            sup.state(),
            Lifecycle::GameOver {
                run_id: 1,
                failed: false
            }
        );
        let log = log.lock().unwrap();
        assert!(!log.scenes.is_empty());
        assert_eq!(log.game_overs.len(), 1);
        // The game-over screen repeats the last scene that was actually drawn.
        assert_eq!(log.scenes.last(), Some(&log.game_overs[0]));
    }

    #[tokio::test(start_paused = true)]
    async fn render_failure_offers_restart() {
        let recorder = Recorder {
            fail_draws: true,
            ..Recorder::default()
        };
        let (tx, mut rx) = mpsc::channel(16);

        let task = tokio::spawn(async move {
            let mut sup = Supervisor::new(tiny_config(), 1, recorder);
            sup.run(&mut rx).await.unwrap();
            sup
        });

        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(GameInput::Restart).await.unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;
        tx.send(GameInput::Quit).await.unwrap();
        let sup = task.await.unwrap();

        assert_eq!(sup.runs_started(), 2);
        assert_eq!(
            sup.state(),
            Lifecycle::GameOver {
                run_id: 2,
                failed: true
            }
        );
    }

    #[tokio::test(start_paused = true)]
    async fn closing_inputs_ends_supervisor() {
        let (tx, mut rx) = mpsc::channel::<GameInput>(1);
        drop(tx);
        let mut sup = Supervisor::new(tiny_config(), 1, Recorder::default());
        sup.run(&mut rx).await.unwrap();
        assert_eq!(sup.runs_started(), 1);
    }
}
