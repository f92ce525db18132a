//! Application-wide actions
//!
//! Actions that can be triggered from menus or keyboard shortcuts.

use gpui::actions;

actions!(
    app,
    [
        Quit,
        Refresh,
        SelectAll,
        DeleteSelected,
        StartRecording,
        StopRecording,
        ToggleStatusPanel,
        ToggleCurrentLocation,
    ]
);
