//! Track Manager - GPUI Application
//!
//! Lists recorded GPS tracks, toggles their map visibility, deletes
//! selections and records new tracks.

use gpui::{
    App, Application, Bounds, KeyBinding, Menu, MenuItem, WindowBounds, WindowHandle,
    WindowOptions, prelude::*, px, size,
};
use track_manager::actions::{
    DeleteSelected, Quit, Refresh, SelectAll, StartRecording, StopRecording,
    ToggleCurrentLocation, ToggleStatusPanel,
};
use track_manager::core::AppSettings;
use track_manager::logging;
use track_manager::store::StoreAddress;
use track_manager::ui::components::TrackListView;

/// Build the application menus with current settings state
fn build_menus(settings: &AppSettings) -> Vec<Menu> {
    let status_panel_label = if settings.show_status_panel {
        "✓ Show Status Panel"
    } else {
        "Show Status Panel"
    };

    let current_location_label = if settings.show_current_location {
        "✓ Show Current Location"
    } else {
        "Show Current Location"
    };

    vec![
        Menu {
            name: "Track Manager".into(),
            items: vec![MenuItem::action("Quit", Quit)],
        },
        Menu {
            name: "Tracks".into(),
            items: vec![
                MenuItem::action("Select All", SelectAll),
                MenuItem::action("Delete Selected", DeleteSelected),
                MenuItem::separator(),
                MenuItem::action("Refresh", Refresh),
            ],
        },
        Menu {
            name: "Recording".into(),
            items: vec![
                MenuItem::action("Start Recording", StartRecording),
                MenuItem::action("Stop Recording", StopRecording),
            ],
        },
        Menu {
            name: "View".into(),
            items: vec![
                MenuItem::action(status_panel_label, ToggleStatusPanel),
                MenuItem::action(current_location_label, ToggleCurrentLocation),
            ],
        },
    ]
}

/// Apply a settings change, persist it and refresh menus and windows
fn update_settings(cx: &mut App, change: impl FnOnce(&mut AppSettings)) {
    let settings = cx.global_mut::<AppSettings>();
    change(settings);
    if let Err(e) = settings.save() {
        log::warn!("Failed to save settings: {}", e);
    }

    let menus = build_menus(settings);
    cx.set_menus(menus);
    cx.refresh_windows();
}

fn main() {
    let verbose = std::env::args().any(|arg| arg == "--verbose" || arg == "-v");
    logging::init_logging(verbose);

    let data_dir = match AppSettings::app_data_dir() {
        Ok(dir) => dir,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let settings = AppSettings::load();
    let address = StoreAddress::from_settings(&settings);
    let db_path = address.database_path(&data_dir);
    log::info!("Track store {} at {}", address, db_path.display());

    let store = match TrackListView::open_store(&db_path) {
        Ok(store) => store,
        Err(e) => {
            log::error!("Could not open track database {}: {}", db_path.display(), e);
            std::process::exit(1);
        }
    };

    Application::new().run(move |cx: &mut App| {
        cx.set_global(settings.clone());

        cx.on_action(|_: &Quit, cx| cx.quit());
        cx.on_action(|_: &ToggleStatusPanel, cx| {
            update_settings(cx, |s| s.show_status_panel = !s.show_status_panel);
        });
        cx.on_action(|_: &ToggleCurrentLocation, cx| {
            update_settings(cx, |s| s.show_current_location = !s.show_current_location);
        });

        // List and recording actions are handled by the focused TrackListView

        cx.bind_keys([
            KeyBinding::new("cmd-q", Quit, None),
            KeyBinding::new("cmd-a", SelectAll, None),
            KeyBinding::new("cmd-backspace", DeleteSelected, None),
            KeyBinding::new("cmd-r", Refresh, None),
        ]);

        cx.set_menus(build_menus(&settings));

        let bounds = Bounds::centered(None, size(px(480.), px(600.)), cx);

        let window: Result<WindowHandle<TrackListView>, _> = cx.open_window(
            WindowOptions {
                window_bounds: Some(WindowBounds::Windowed(bounds)),
                window_min_size: Some(size(px(360.), px(300.))),
                titlebar: Some(gpui::TitlebarOptions {
                    title: Some("Track Manager".into()),
                    appears_transparent: false,
                    traffic_light_position: None,
                }),
                ..Default::default()
            },
            move |_window, cx| cx.new(move |cx| TrackListView::new(store, db_path, settings, cx)),
        );

        if let Err(e) = window {
            log::error!("Failed to open main window: {}", e);
            cx.quit();
            return;
        }

        // Quit the app when the main window is closed
        cx.on_window_closed(|cx| {
            cx.quit();
        })
        .detach();

        cx.activate(true);
    });
}
