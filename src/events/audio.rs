//! Commands and messages for the background audio thread.
//!
//! Game systems and phase callbacks write [`AudioCmd`] messages; the bridge
//! forwards them to the audio thread, which answers with [`AudioMessage`]s.
//! Playback is fire-and-forget: nothing in the simulation waits on audio.

use bevy_ecs::message::Message;

/// Commands sent *to* the audio thread.
#[derive(Message, Debug, Clone)]
pub enum AudioCmd {
    LoadMusic { id: String, path: String },
    PlayMusic { id: String, looped: bool },
    StopMusic { id: String },
    VolumeMusic { id: String, vol: f32 },
    LoadFx { id: String, path: String },
    PlayFx { id: String },
    UnloadAll,
    Shutdown,
}

/// Events sent *back* from the audio thread.
#[derive(Message, Debug, Clone)]
pub enum AudioMessage {
    MusicLoaded { id: String },
    MusicLoadFailed { id: String, error: String },
    MusicPlayStarted { id: String },
    MusicStopped { id: String },
    /// A non-looping track reached its end.
    MusicFinished { id: String },
    FxLoaded { id: String },
    FxLoadFailed { id: String, error: String },
    UnloadedAll,
}
