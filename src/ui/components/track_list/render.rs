//! Rendering implementation for TrackListView

use gpui::{Context, IntoElement, PromptLevel, Render, SharedString, Window, div, prelude::*};

use crate::actions::{DeleteSelected, Refresh, SelectAll, StartRecording, StopRecording};
use crate::core::{AppSettings, Fix};
use crate::recording::RecordingService;
use crate::tracks::TrackListEvent;
use crate::ui::Theme;
use crate::ui::components::track_row::{TrackRowProps, render_track_row};

use super::TrackListView;

impl TrackListView {
    /// Render the empty state
    pub(super) fn render_empty_state(&self, theme: &Theme) -> impl IntoElement {
        div()
            .size_full()
            .flex()
            .flex_col()
            .items_center()
            .justify_center()
            .gap_2()
            .text_color(theme.text_muted)
            .child(div().text_2xl().child("🗺"))
            .child(div().text_lg().child("No tracks recorded"))
            .child(div().text_sm().child("Start recording from the Recording menu"))
    }

    /// Render the populated track list
    pub(super) fn render_track_rows(
        &mut self,
        theme: &Theme,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let mut list = div().w_full().flex().flex_col().gap_1();

        for (index, row) in self.controller.rows().iter().enumerate() {
            let props = TrackRowProps {
                index,
                row: row.clone(),
                theme: *theme,
            };

            let item = render_track_row(
                props,
                cx,
                |view: &mut Self, id, cx| {
                    view.handle_event(TrackListEvent::ToggleSelected(id), cx);
                },
                |view: &mut Self, id, cx| {
                    view.handle_event(TrackListEvent::ToggleVisibility(id), cx);
                },
            );

            list = list.child(item);
        }

        list
    }

    /// Title, selection count and bulk action buttons
    pub(super) fn render_toolbar(&self, theme: &Theme, cx: &mut Context<Self>) -> impl IntoElement + use<> {
        let selected = self.controller.selection_count();
        let has_rows = !self.controller.rows().is_empty();

        let summary = if selected == 0 {
            "Tracks".to_string()
        } else {
            format!("{} selected", selected)
        };

        div()
            .w_full()
            .py_3()
            .px_6()
            .flex()
            .items_center()
            .justify_between()
            .border_b_1()
            .border_color(theme.border)
            .child(
                div()
                    .text_lg()
                    .font_weight(gpui::FontWeight::SEMIBOLD)
                    .text_color(theme.text)
                    .child(summary),
            )
            .child(
                div()
                    .flex()
                    .gap_2()
                    .child(toolbar_button(
                        "select-all-button",
                        "Select All",
                        has_rows,
                        theme.bg_card,
                        theme.bg_card_hover,
                        theme,
                    )
                    .on_click(cx.listener(|this, _event, _window, cx| {
                        this.handle_event(TrackListEvent::SelectAll, cx);
                    })))
                    .child(toolbar_button(
                        "delete-button",
                        "Delete",
                        has_rows,
                        theme.danger,
                        theme.danger,
                        theme,
                    )
                    .on_click(cx.listener(|this, _event, _window, cx| {
                        this.handle_event(TrackListEvent::DeleteSelected, cx);
                    }))),
            )
    }

    /// Track totals and recorder progress
    pub(super) fn render_status_bar(
        &self,
        theme: &Theme,
        cx: &mut Context<Self>,
    ) -> impl IntoElement {
        let total = self.controller.rows().len();
        let visible = self.controller.rows().iter().filter(|r| r.visible).count();
        let recorder = self.controller.recorder();
        let is_recording = recorder.is_running();
        let success_hover = theme.success_hover;

        let stats = div()
            .flex()
            .gap_4()
            .text_color(theme.text_muted)
            .child(format!("{} tracks", total))
            .child(format!("{} visible", visible))
            .child(format!("{} selected", self.controller.selection_count()));

        let recording_panel = match recorder {
            Some(handle) if is_recording => {
                let mut panel = div()
                    .flex()
                    .gap_2()
                    .items_center()
                    .child(div().text_color(theme.recording).child("●"))
                    .child(
                        div()
                            .text_color(theme.text)
                            .child(format!("Recording ({} points)", handle.point_count())),
                    );
                if self.settings.show_current_location
                    && let Some(fix) = handle.last_fix()
                {
                    panel = panel.child(
                        div()
                            .text_color(theme.text_muted)
                            .child(self.format_fix(&fix)),
                    );
                }
                panel
                    .child(
                        div()
                            .id(SharedString::from("stop-recording-button"))
                            .px_3()
                            .py_1()
                            .rounded_md()
                            .bg(theme.danger)
                            .text_color(gpui::white())
                            .cursor_pointer()
                            .child("Stop")
                            .on_click(cx.listener(|this, _event, _window, cx| {
                                this.stop_recording();
                                cx.notify();
                            })),
                    )
                    .into_any_element()
            }
            _ => div()
                .id(SharedString::from("start-recording-button"))
                .px_3()
                .py_1()
                .rounded_md()
                .bg(theme.success)
                .hover(move |s| s.bg(success_hover))
                .text_color(gpui::white())
                .cursor_pointer()
                .child("Record")
                .on_click(cx.listener(|this, _event, _window, cx| {
                    this.start_recording();
                    cx.notify();
                }))
                .into_any_element(),
        };

        div()
            .py_3()
            .px_6()
            .flex()
            .items_center()
            .justify_between()
            .bg(theme.bg)
            .border_t_1()
            .border_color(theme.border)
            .text_sm()
            .child(stats)
            .child(recording_panel)
    }

    /// `lat, lon` in the configured coordinate format
    pub(super) fn format_fix(&self, fix: &Fix) -> String {
        let format = self.settings.coordinates_format;
        format!("{}, {}", format.format(fix.lat), format.format(fix.lon))
    }

    pub(super) fn show_pending_dialogs(&mut self, window: &mut Window, cx: &mut Context<Self>) {
        if let Some(message) = self.pending_error.take() {
            let _future = window.prompt(
                PromptLevel::Warning,
                "Track Manager",
                Some(&message),
                &["OK"],
                cx,
            );
        }
        if let Some(notice) = self.pending_notice.take() {
            let _future = window.prompt(
                PromptLevel::Info,
                notice.message(),
                None,
                &["OK"],
                cx,
            );
        }
    }
}

fn toolbar_button(
    id: &'static str,
    label: &'static str,
    enabled: bool,
    bg: gpui::Hsla,
    hover_bg: gpui::Hsla,
    theme: &Theme,
) -> gpui::Stateful<gpui::Div> {
    let text_color = if enabled { theme.text } else { theme.text_muted };
    div()
        .id(SharedString::from(id))
        .px_3()
        .py_1()
        .rounded_md()
        .text_sm()
        .bg(bg)
        .text_color(text_color)
        .when(enabled, |el| el.cursor_pointer().hover(move |s| s.bg(hover_bg)))
        .child(label)
}

impl Render for TrackListView {
    fn render(&mut self, window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        if !self.appearance_subscription_set {
            self.appearance_subscription_set = true;
            cx.observe_window_appearance(window, |_this, _window, cx| {
                cx.notify();
            })
            .detach();
        }

        // Menu toggles update the global copy
        if let Some(settings) = cx.try_global::<AppSettings>()
            && *settings != self.settings
        {
            self.settings = settings.clone();
        }

        // Grab initial focus so menu items work immediately
        if self.needs_initial_focus {
            self.needs_initial_focus = false;
            if let Some(ref focus_handle) = self.focus_handle {
                focus_handle.focus(window);
            }
        }

        self.show_pending_dialogs(window, cx);

        window.set_window_title(&format!("Track Manager - {}", self.controller.address()));

        let theme = Theme::from_appearance(window.appearance());

        let list_content = if self.controller.is_empty_state() {
            self.render_empty_state(&theme).into_any_element()
        } else {
            self.render_track_rows(&theme, cx).into_any_element()
        };

        let on_select_all = cx.listener(|this, _: &SelectAll, _window, cx| {
            this.handle_event(TrackListEvent::SelectAll, cx);
        });
        let on_delete_selected = cx.listener(|this, _: &DeleteSelected, _window, cx| {
            this.handle_event(TrackListEvent::DeleteSelected, cx);
        });
        let on_refresh = cx.listener(|this, _: &Refresh, _window, cx| {
            this.handle_event(TrackListEvent::Reload, cx);
        });
        let on_start_recording = cx.listener(|this, _: &StartRecording, _window, cx| {
            this.start_recording();
            cx.notify();
        });
        let on_stop_recording = cx.listener(|this, _: &StopRecording, _window, cx| {
            this.stop_recording();
            cx.notify();
        });

        let toolbar = self.render_toolbar(&theme, cx);
        let status_bar = self
            .settings
            .show_status_panel
            .then(|| self.render_status_bar(&theme, cx));

        let mut container = div().size_full().flex().flex_col().bg(theme.bg);

        // Track focus if we have a focus handle (not in tests)
        if let Some(ref focus_handle) = self.focus_handle {
            container = container.track_focus(focus_handle);
        }

        container
            .on_action(on_select_all)
            .on_action(on_delete_selected)
            .on_action(on_refresh)
            .on_action(on_start_recording)
            .on_action(on_stop_recording)
            .child(toolbar)
            .child(
                div()
                    .id("track-list-scroll")
                    .flex_1()
                    .w_full()
                    .overflow_scroll()
                    .track_scroll(&self.scroll_handle)
                    .px_6()
                    .py_2()
                    .child(list_content),
            )
            .children(status_bar)
    }
}
