//! Audio system implementation backed by a dedicated thread and Raylib.
//!
//! This module hosts the background audio thread and the systems that
//! bridge it with the ECS world:
//! - [`audio_thread`] runs on its own OS thread, owns the Raylib audio
//!   device, and processes [`AudioCmd`](crate::events::audio::AudioCmd)
//!   messages, emitting [`AudioMessage`](crate::events::audio::AudioMessage)
//!   responses.
//! - [`poll_audio_messages`] non-blockingly drains the audio thread's event
//!   receiver into the ECS message queue each frame.
//! - [`forward_audio_cmds`] pushes queued commands to the audio thread.
//!
//! The design keeps Raylib audio API calls isolated to a single thread,
//! while the main game thread communicates via lock-free channels. Playback
//! is fire-and-forget: the simulation never waits on a sound.

use crate::events::audio::{AudioCmd, AudioMessage};
use crate::resources::audio::AudioBridge;
use bevy_ecs::prelude::Messages;
use bevy_ecs::prelude::{MessageReader, MessageWriter, Res};
use bevy_ecs::system::ResMut;
use crossbeam_channel::{Receiver, Sender};
use log::{info, warn};
use raylib::core::audio::{Music, RaylibAudio, Sound};
use rustc_hash::{FxHashMap, FxHashSet};
use std::time::Duration;

/// Drain pending events from the audio thread into the ECS
/// [`Messages<AudioMessage>`] mailbox. Non-blocking; runs each frame.
pub fn poll_audio_messages(bridge: Res<AudioBridge>, mut writer: MessageWriter<AudioMessage>) {
    writer.write_batch(bridge.rx_msg.try_iter());
}

/// Advance the ECS message queue for [`AudioMessage`].
pub fn update_bevy_audio_messages(mut messages: ResMut<Messages<AudioMessage>>) {
    messages.update();
}

/// Forward ECS AudioCmd messages to the audio thread via the bridge sender.
pub fn forward_audio_cmds(bridge: Res<AudioBridge>, mut reader: MessageReader<AudioCmd>) {
    for cmd in reader.read() {
        // Ignore send errors on shutdown.
        let _ = bridge.tx_cmd.send(cmd.clone());
    }
}

/// Advance the ECS message queue for [`AudioCmd`] so same-frame readers can
/// observe writes.
pub fn update_bevy_audio_cmds(mut messages: ResMut<Messages<AudioCmd>>) {
    messages.update();
}

/// Entry point of the dedicated audio thread.
///
/// Responsibilities:
/// - Initialize the Raylib audio device once for the life of the thread.
/// - Own all `Music` and `Sound` handles, preventing use from other threads.
/// - React to [`AudioCmd`] inputs to load and control playback.
/// - Emit [`AudioMessage`] outputs for state changes.
/// - Periodically pump music streams and detect finished tracks.
///
/// Blocks until it receives [`AudioCmd::Shutdown`], then unloads resources
/// and exits cleanly.
pub fn audio_thread(rx_cmd: Receiver<AudioCmd>, tx_msg: Sender<AudioMessage>) {
    let audio = match RaylibAudio::init_audio_device() {
        Ok(device) => device,
        Err(e) => {
            panic!("Failed to initialize audio device: {}", e);
        }
    };

    info!("audio thread starting (id={:?})", std::thread::current().id());

    let mut musics: FxHashMap<String, Music> = FxHashMap::default();
    let mut playing: FxHashSet<String> = FxHashSet::default();
    let mut looped: FxHashSet<String> = FxHashSet::default();
    let mut sounds: FxHashMap<String, Sound> = FxHashMap::default();

    'run: loop {
        // 1) Drain commands.
        for cmd in rx_cmd.try_iter() {
            match cmd {
                AudioCmd::LoadMusic { id, path } => match audio.new_music(&path) {
                    Ok(music) => {
                        info!("audio: music loaded id='{}' path='{}'", id, path);
                        musics.insert(id.clone(), music);
                        let _ = tx_msg.send(AudioMessage::MusicLoaded { id });
                    }
                    Err(e) => {
                        warn!("audio: music load failed id='{}': {}", id, e);
                        let _ = tx_msg.send(AudioMessage::MusicLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayMusic {
                    id,
                    looped: want_loop,
                } => {
                    if let Some(music) = musics.get(&id) {
                        music.seek_stream(0.0);
                        music.play_stream();
                        playing.insert(id.clone());
                        if want_loop {
                            looped.insert(id.clone());
                        } else {
                            looped.remove(&id);
                        }
                        let _ = tx_msg.send(AudioMessage::MusicPlayStarted { id });
                    }
                }
                AudioCmd::StopMusic { id } => {
                    if let Some(music) = musics.get(&id) {
                        music.stop_stream();
                        playing.remove(&id);
                        looped.remove(&id);
                        let _ = tx_msg.send(AudioMessage::MusicStopped { id });
                    }
                }
                AudioCmd::VolumeMusic { id, vol } => {
                    if let Some(music) = musics.get(&id) {
                        music.set_volume(vol);
                    }
                }
                AudioCmd::LoadFx { id, path } => match audio.new_sound(&path) {
                    Ok(sound) => {
                        info!("audio: fx loaded id='{}' path='{}'", id, path);
                        sounds.insert(id.clone(), sound);
                        let _ = tx_msg.send(AudioMessage::FxLoaded { id });
                    }
                    Err(e) => {
                        warn!("audio: fx load failed id='{}': {}", id, e);
                        let _ = tx_msg.send(AudioMessage::FxLoadFailed {
                            id,
                            error: e.to_string(),
                        });
                    }
                },
                AudioCmd::PlayFx { id } => {
                    if let Some(sound) = sounds.get(&id) {
                        sound.play();
                    } else {
                        warn!("audio: unknown fx id='{}'", id);
                    }
                }
                AudioCmd::UnloadAll => {
                    musics.clear();
                    playing.clear();
                    looped.clear();
                    sounds.clear();
                    let _ = tx_msg.send(AudioMessage::UnloadedAll);
                }
                AudioCmd::Shutdown => {
                    info!("audio thread shutting down");
                    break 'run;
                }
            }
        }

        // 2) Pump playing music streams; restart or report finished tracks.
        let mut finished: Vec<String> = Vec::new();
        for id in playing.iter() {
            if let Some(music) = musics.get(id) {
                music.update_stream();
                if !music.is_stream_playing() {
                    if looped.contains(id) {
                        music.seek_stream(0.0);
                        music.play_stream();
                    } else {
                        finished.push(id.clone());
                    }
                }
            }
        }
        for id in finished {
            playing.remove(&id);
            let _ = tx_msg.send(AudioMessage::MusicFinished { id });
        }

        // 3) Sleep briefly to avoid busy-waiting.
        std::thread::sleep(Duration::from_millis(4));
    }

    playing.clear();
    looped.clear();
    sounds.clear();
    musics.clear();
}
