//! TrackRow component - a single track entry in the list

use gpui::{Context, IntoElement, SharedString, div, prelude::*};

use crate::core::{TrackId, TrackRow};
use crate::ui::Theme;

/// Properties for rendering a track row
pub struct TrackRowProps {
    pub index: usize,
    pub row: TrackRow,
    pub theme: Theme,
}

/// Checkbox glyph for a selection state
pub fn checkbox_icon(selected: bool) -> &'static str {
    if selected { "☑" } else { "☐" }
}

/// Eye glyph for a visibility state
pub fn visibility_icon(visible: bool) -> &'static str {
    if visible { "👁" } else { "◌" }
}

/// Renders a single track row
///
/// Stateless: every flag comes from the controller's row state. Clicking the
/// row toggles selection, clicking the eye toggles visibility.
pub fn render_track_row<V: 'static>(
    props: TrackRowProps,
    cx: &mut Context<V>,
    on_toggle_selected: impl Fn(&mut V, TrackId, &mut Context<V>) + 'static,
    on_toggle_visibility: impl Fn(&mut V, TrackId, &mut Context<V>) + 'static,
) -> impl IntoElement {
    let TrackRowProps { index, row, theme } = props;

    let row_id = row.id.clone();
    let eye_id = row.id.clone();

    div()
        .id(SharedString::from(format!("track-{}", index)))
        .w_full()
        .h_10()
        .flex_shrink_0()
        .flex()
        .items_center()
        .gap_3()
        .px_3()
        .bg(if row.selected { theme.bg_selected } else { theme.bg_card })
        .border_1()
        .border_color(if row.selected { theme.accent } else { theme.border })
        .rounded_md()
        .cursor_pointer()
        .hover(move |s| s.bg(theme.bg_card_hover))
        .on_click(cx.listener(move |view, _event, _window, cx| {
            on_toggle_selected(view, row_id.clone(), cx);
        }))
        // Selection checkbox
        .child(
            div()
                .text_xl()
                .text_color(if row.selected { theme.accent } else { theme.text_muted })
                .child(checkbox_icon(row.selected)),
        )
        // Track name
        .child(
            div()
                .flex_1()
                .overflow_hidden()
                .text_ellipsis()
                .text_sm()
                .text_color(if row.visible { theme.text } else { theme.text_muted })
                .child(row.name.clone()),
        )
        // Visibility toggle
        .child(
            div()
                .id(SharedString::from(format!("visibility-{}", index)))
                .px_2()
                .py_1()
                .text_color(if row.visible { theme.accent } else { theme.text_muted })
                .cursor_pointer()
                .hover(move |s| s.text_color(theme.text))
                .on_click(cx.listener(move |view, _event, _window, cx| {
                    // Keep the row click from toggling selection as well
                    cx.stop_propagation();
                    on_toggle_visibility(view, eye_id.clone(), cx);
                }))
                .child(visibility_icon(row.visible)),
        )
}
