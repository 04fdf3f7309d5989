//! Cube Volley entry point.

use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "Cube Volley".to_string(),
                    resolution: (720, 1280).into(),
                    resizable: true,
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    )
    .add_plugins(cube_volley::plugin);

    #[cfg(feature = "dev")]
    app.add_plugins(cube_volley::dev_tools::plugin);

    app.run();
}
