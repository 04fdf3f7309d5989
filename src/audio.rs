//! Sound effects and background music.
//!
//! Gameplay and UI systems write [`SoundEffect`] messages; this module turns
//! them into one-shot audio entities at the player's sound volume. Music loops
//! while gameplay is active and follows the music volume live.

use bevy::audio::Volume;
use bevy::prelude::*;

use crate::screens::GameState;
use crate::settings::VolumeSettings;

/// One-shot sounds requested by gameplay and UI.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// A shooter in the bay was clicked.
    CubeTouch,
    /// A projectile destroyed a matching cube.
    Collision,
    /// Every cube was cleared.
    Win,
    /// A UI button was clicked.
    UiClick,
}

/// Preloaded audio handles.
#[derive(Resource, Debug, Clone, Default)]
pub struct SoundAssets {
    pub cube_touch: Handle<AudioSource>,
    pub collision: Handle<AudioSource>,
    pub win: Handle<AudioSource>,
    pub ui_click: Handle<AudioSource>,
    pub music: Handle<AudioSource>,
}

impl SoundAssets {
    fn handle(&self, effect: SoundEffect) -> Handle<AudioSource> {
        match effect {
            SoundEffect::CubeTouch => self.cube_touch.clone(),
            SoundEffect::Collision => self.collision.clone(),
            SoundEffect::Win => self.win.clone(),
            SoundEffect::UiClick => self.ui_click.clone(),
        }
    }
}

/// Marker for the looping music entity.
#[derive(Component, Debug)]
pub struct BackgroundMusic;

fn load_sound_assets(mut commands: Commands, asset_server: Option<Res<AssetServer>>) {
    let Some(asset_server) = asset_server else {
        return;
    };
    commands.insert_resource(SoundAssets {
        cube_touch: asset_server.load("audio/cube_touch.ogg"),
        collision: asset_server.load("audio/collision.ogg"),
        win: asset_server.load("audio/win.ogg"),
        ui_click: asset_server.load("audio/ui_click.ogg"),
        music: asset_server.load("audio/music.ogg"),
    });
}

fn play_sound_effects(
    mut commands: Commands,
    mut effects: MessageReader<SoundEffect>,
    sounds: Option<Res<SoundAssets>>,
    settings: Res<VolumeSettings>,
) {
    let Some(sounds) = sounds else {
        effects.clear();
        return;
    };

    for &effect in effects.read() {
        commands.spawn((
            Name::new(format!("Sound {effect:?}")),
            AudioPlayer::new(sounds.handle(effect)),
            PlaybackSettings::DESPAWN.with_volume(Volume::Linear(settings.sound)),
        ));
    }
}

fn start_background_music(
    mut commands: Commands,
    sounds: Option<Res<SoundAssets>>,
    settings: Res<VolumeSettings>,
) {
    let Some(sounds) = sounds else {
        return;
    };
    commands.spawn((
        Name::new("Background Music"),
        BackgroundMusic,
        AudioPlayer::new(sounds.music.clone()),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(settings.music)),
        DespawnOnExit(GameState::InGame),
    ));
}

fn apply_music_volume(
    settings: Res<VolumeSettings>,
    mut sinks: Query<&mut AudioSink, With<BackgroundMusic>>,
) {
    for mut sink in &mut sinks {
        sink.set_volume(Volume::Linear(settings.music));
    }
}

pub fn plugin(app: &mut App) {
    app.add_message::<SoundEffect>();
    app.add_systems(Startup, load_sound_assets);
    app.add_systems(OnEnter(GameState::InGame), start_background_music);
    app.add_systems(
        Update,
        (
            play_sound_effects.in_set(crate::GameSet::Feedback),
            apply_music_volume.run_if(resource_changed::<VolumeSettings>),
        ),
    );
}
