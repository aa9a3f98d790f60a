use bevy::asset::AssetMetaCheck;
use bevy::prelude::*;
use bevy::render::RenderPlugin;
use bevy::render::settings::{WgpuSettings, WgpuSettingsPriority};
use bevy::window::{WindowMode, WindowResolution};
use bevy_framepace::{FramepacePlugin, FramepaceSettings, Limiter};

use crate::surface::{Surface, spawn_surface_camera};

/// Canvas element the app renders into when built for the web.
pub const CANVAS_SELECTOR: &str = "#board";

// Creates a Bevy app that draws into a fixed-size surface at a fixed cadence.
// Every board shares the same window, render and pacing setup from here.
pub fn get_default_app(title: &str, surface: Surface, frame_rate: f64, background: Color) -> App {
    let mut app = App::new();

    let asset_plugin = bevy::asset::AssetPlugin {
        mode: bevy::asset::AssetMode::Unprocessed,
        file_path: "assets".to_string(),
        processed_file_path: "imported_assets/Default".to_string(),
        watch_for_changes_override: None,
        meta_check: AssetMetaCheck::Never,
    };

    let resolution = WindowResolution::new(surface.size.x, surface.size.y);

    let window_plugin = WindowPlugin {
        primary_window: Some(Window {
            title: title.to_string(),
            present_mode: bevy::window::PresentMode::Fifo,
            resolution,
            resizable: false,
            canvas: Some(CANVAS_SELECTOR.into()),
            fit_canvas_to_parent: false,
            mode: WindowMode::Windowed,
            // Tells wasm not to override default event handling, like F5, Ctrl+R etc.
            prevent_default_event_handling: false,
            ..default()
        }),
        ..default()
    };

    let render_plugin = RenderPlugin {
        render_creation: bevy::render::settings::RenderCreation::Automatic(WgpuSettings {
            backends: Some(
                bevy::render::settings::Backends::BROWSER_WEBGPU
                    | bevy::render::settings::Backends::GL,
            ),
            power_preference: bevy::render::settings::PowerPreference::HighPerformance,
            priority: WgpuSettingsPriority::Functionality,
            ..Default::default()
        }),
        ..Default::default()
    };

    app.add_plugins(
        DefaultPlugins
            .set(asset_plugin)
            .set(window_plugin)
            .set(render_plugin),
    );

    // The redraw cycle runs at a fixed rate instead of as fast as possible.
    app.add_plugins(FramepacePlugin);
    app.insert_resource(FramepaceSettings {
        limiter: Limiter::from_framerate(frame_rate),
    });

    app.insert_resource(ClearColor(background));
    app.insert_resource(surface);
    app.add_systems(Startup, spawn_surface_camera);

    app
}
