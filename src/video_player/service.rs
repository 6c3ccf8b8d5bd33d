// SPDX-License-Identifier: MPL-2.0
//! Async driver for [`PlaybackController`].
//!
//! [`PlayerService`] owns the controller inside a Tokio task. The task waits
//! on two things at once: the next command from a [`PlayerHandle`], and the
//! controller's next deadline. Whatever comes first is applied, then a fresh
//! [`PlayerView`] is published on a `watch` channel.
//!
//! Everything runs on the one task, so controller state is never shared.
//!
//! # Example
//!
//! ```no_run
//! use seekwise::infrastructure::{SeekUnit, SimulatedEngine};
//! use seekwise::video_player::{spawn_player, MediaItem, PlaybackController, Tuning};
//!
//! # async fn demo() {
//! let engine = SimulatedEngine::new(SeekUnit::Seconds, 120.0);
//! let controller = PlaybackController::new(engine, Tuning::default());
//! let (handle, task) = spawn_player(controller);
//!
//! handle.load(MediaItem::new("/videos/clip.mp4"));
//! handle.seek(42.0);
//! handle.shutdown();
//! let _controller = task.await;
//! # }
//! ```

use super::control::{PointerEvent, SliderGeometry};
use super::controller::PlaybackController;
use super::session::MediaItem;
use super::view::PlayerView;
use crate::application::port::MediaEngine;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::debug;

/// Commands accepted by the player task.
#[derive(Debug, Clone, PartialEq)]
pub enum PlayerCommand {
    Load(MediaItem),
    Unload,
    TogglePlay,
    Stop,
    Rewind,
    Forward,
    SetVolume(f32),
    /// Verified seek to an absolute position.
    Seek { target_secs: f64 },
    Press(PointerEvent),
    Drag(f64),
    Release(PointerEvent),
    SetSliderGeometry(SliderGeometry),
    DismissNotice,
    /// Ends the task and hands the controller back.
    Shutdown,
}

/// Cloneable handle to a running [`PlayerService`].
///
/// Sends never block. Commands sent after the task ended are dropped.
#[derive(Debug, Clone)]
pub struct PlayerHandle {
    command_tx: mpsc::UnboundedSender<PlayerCommand>,
    view_rx: watch::Receiver<PlayerView>,
}

impl PlayerHandle {
    pub fn send(&self, command: PlayerCommand) {
        let _ = self.command_tx.send(command);
    }

    pub fn load(&self, item: MediaItem) {
        self.send(PlayerCommand::Load(item));
    }

    pub fn unload(&self) {
        self.send(PlayerCommand::Unload);
    }

    pub fn toggle_play(&self) {
        self.send(PlayerCommand::TogglePlay);
    }

    pub fn stop(&self) {
        self.send(PlayerCommand::Stop);
    }

    pub fn rewind(&self) {
        self.send(PlayerCommand::Rewind);
    }

    pub fn forward(&self) {
        self.send(PlayerCommand::Forward);
    }

    pub fn set_volume(&self, volume: f32) {
        self.send(PlayerCommand::SetVolume(volume));
    }

    pub fn seek(&self, target_secs: f64) {
        self.send(PlayerCommand::Seek { target_secs });
    }

    pub fn press(&self, pointer: PointerEvent) {
        self.send(PlayerCommand::Press(pointer));
    }

    pub fn drag(&self, value: f64) {
        self.send(PlayerCommand::Drag(value));
    }

    pub fn release(&self, pointer: PointerEvent) {
        self.send(PlayerCommand::Release(pointer));
    }

    pub fn set_slider_geometry(&self, geometry: SliderGeometry) {
        self.send(PlayerCommand::SetSliderGeometry(geometry));
    }

    pub fn dismiss_notice(&self) {
        self.send(PlayerCommand::DismissNotice);
    }

    pub fn shutdown(&self) {
        self.send(PlayerCommand::Shutdown);
    }

    /// The latest published view.
    pub fn view(&self) -> PlayerView {
        self.view_rx.borrow().clone()
    }

    /// A receiver that wakes on every published change.
    pub fn subscribe(&self) -> watch::Receiver<PlayerView> {
        self.view_rx.clone()
    }
}

/// Runs a [`PlaybackController`] on a Tokio task.
#[derive(Debug)]
pub struct PlayerService<E: MediaEngine> {
    controller: PlaybackController<E>,
    command_rx: mpsc::UnboundedReceiver<PlayerCommand>,
    view_tx: watch::Sender<PlayerView>,
}

impl<E: MediaEngine> PlayerService<E> {
    pub fn new(controller: PlaybackController<E>) -> (Self, PlayerHandle) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (view_tx, view_rx) = watch::channel(controller.view());
        let service = Self {
            controller,
            command_rx,
            view_tx,
        };
        (
            service,
            PlayerHandle {
                command_tx,
                view_rx,
            },
        )
    }

    /// Processes commands and deadlines until shutdown, or until every
    /// handle is dropped. Returns the controller.
    pub async fn run(mut self) -> PlaybackController<E> {
        loop {
            let deadline = self.controller.next_deadline();
            let command = tokio::select! {
                command = self.command_rx.recv() => match command {
                    Some(command) => Some(command),
                    None => break,
                },
                () = wait_for(deadline) => None,
            };

            let now = Instant::now();
            match command {
                Some(PlayerCommand::Shutdown) => break,
                Some(command) => self.apply(command, now),
                None => self.controller.on_deadline(now),
            }
            self.publish();
        }
        debug!("player task finished");
        self.controller
    }

    fn apply(&mut self, command: PlayerCommand, now: Instant) {
        debug!(?command, "player command");
        let controller = &mut self.controller;
        match command {
            PlayerCommand::Load(item) => {
                // The failure is already in the view as a notice.
                let _ = controller.load(item, now);
            }
            PlayerCommand::Unload => controller.unload(),
            PlayerCommand::TogglePlay => {
                controller.toggle_play();
            }
            PlayerCommand::Stop => controller.stop(),
            PlayerCommand::Rewind => {
                controller.rewind(now);
            }
            PlayerCommand::Forward => {
                controller.forward(now);
            }
            PlayerCommand::SetVolume(volume) => {
                controller.set_volume(volume);
            }
            PlayerCommand::Seek { target_secs } => {
                controller.request_seek(target_secs, now);
            }
            PlayerCommand::Press(pointer) => {
                controller.on_press(pointer, now);
            }
            PlayerCommand::Drag(value) => controller.on_drag(value),
            PlayerCommand::Release(pointer) => {
                controller.on_release(pointer, now);
            }
            PlayerCommand::SetSliderGeometry(geometry) => controller.set_slider_geometry(geometry),
            PlayerCommand::DismissNotice => controller.dismiss_notice(),
            PlayerCommand::Shutdown => {}
        }
    }

    fn publish(&self) {
        let view = self.controller.view();
        self.view_tx.send_if_modified(|current| {
            if *current == view {
                return false;
            }
            *current = view;
            true
        });
    }
}

/// Sleeps until `deadline`, or forever if there is none.
async fn wait_for(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}

/// Spawns a [`PlayerService`] on the current runtime.
pub fn spawn_player<E>(
    controller: PlaybackController<E>,
) -> (PlayerHandle, JoinHandle<PlaybackController<E>>)
where
    E: MediaEngine + Send + 'static,
{
    let (service, handle) = PlayerService::new(controller);
    (handle, tokio::spawn(service.run()))
}
