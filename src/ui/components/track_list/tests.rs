//! Tests for TrackListView component

use super::*;
use crate::core::TrackId;
use crate::store::TrackStore;
use crate::test_fixtures::TrackFixture;
use std::time::Duration;

/// Poll until the latest load has been applied
fn settle(view: &mut TrackListView) {
    for _ in 0..500 {
        if view.poll_loader() {
            return;
        }
        std::thread::sleep(Duration::from_millis(10));
    }
    panic!("track load never completed");
}

fn loaded_view(fixture: &TrackFixture) -> TrackListView {
    let mut view = TrackListView::new_for_test(fixture.db_path().to_path_buf()).unwrap();
    view.request_load();
    settle(&mut view);
    view
}

fn names(view: &TrackListView) -> Vec<String> {
    view.controller.rows().iter().map(|r| r.name.clone()).collect()
}

#[test]
fn test_new_view_starts_empty_until_loaded() {
    let fixture = TrackFixture::with_tracks(&[("Morning run", true)]);
    let view = TrackListView::new_for_test(fixture.db_path().to_path_buf()).unwrap();

    assert!(view.controller.rows().is_empty());
    assert!(view.pending_error.is_none());
    assert!(view.pending_notice.is_none());
}

#[test]
fn test_load_populates_rows() {
    let fixture = TrackFixture::with_tracks(&[("Morning run", true), ("Evening walk", false)]);
    let view = loaded_view(&fixture);

    assert_eq!(names(&view), vec!["Morning run", "Evening walk"]);
    assert!(view.controller.rows()[0].visible);
    assert!(!view.controller.rows()[1].visible);
    assert!(!view.controller.is_empty_state());
}

#[test]
fn test_empty_database_shows_empty_state() {
    let fixture = TrackFixture::empty();
    let view = loaded_view(&fixture);

    assert!(view.controller.is_empty_state());
}

#[test]
fn test_toggle_visibility_writes_through() {
    let fixture = TrackFixture::with_tracks(&[("A", true)]);
    let mut view = loaded_view(&fixture);
    let id = fixture.ids[0].clone();

    view.apply_event(TrackListEvent::ToggleVisibility(id));

    assert!(!view.controller.rows()[0].visible);
    let stored = fixture.store().query_tracks().unwrap();
    assert!(!stored[0].visible);
}

#[test]
fn test_visibility_survives_load_in_flight() {
    let fixture = TrackFixture::with_tracks(&[("A", true)]);
    let mut view = loaded_view(&fixture);
    let id = fixture.ids[0].clone();

    // This snapshot may be taken before the write below
    view.request_load();
    view.apply_event(TrackListEvent::ToggleVisibility(id));
    assert!(!view.controller.rows()[0].visible);

    settle(&mut view);
    assert!(!view.controller.rows()[0].visible);
    assert!(!view.controller.has_pending_load());
}

#[test]
fn test_delete_without_selection_sets_notice() {
    let fixture = TrackFixture::with_tracks(&[("A", true)]);
    let mut view = loaded_view(&fixture);

    view.apply_event(TrackListEvent::DeleteSelected);

    assert_eq!(view.pending_notice, Some(Notice::NothingSelected));
    assert_eq!(fixture.store().query_tracks().unwrap().len(), 1);
}

#[test]
fn test_delete_selected_removes_tracks_and_reloads() {
    let fixture = TrackFixture::with_tracks(&[("A", true), ("B", true), ("C", true)]);
    let mut view = loaded_view(&fixture);

    view.apply_event(TrackListEvent::SetSelected(fixture.ids[0].clone(), true));
    view.apply_event(TrackListEvent::SetSelected(fixture.ids[2].clone(), true));
    view.apply_event(TrackListEvent::DeleteSelected);

    assert_eq!(names(&view), vec!["B"]);
    assert_eq!(view.controller.selection_count(), 0);
    assert!(view.pending_notice.is_none());

    settle(&mut view);
    assert_eq!(names(&view), vec!["B"]);
    assert_eq!(fixture.store().query_tracks().unwrap().len(), 1);
}

#[test]
fn test_select_all_then_delete_empties_list() {
    let fixture = TrackFixture::with_tracks(&[("A", true), ("B", false)]);
    let mut view = loaded_view(&fixture);

    view.apply_event(TrackListEvent::SelectAll);
    assert_eq!(view.controller.selection_count(), 2);

    view.apply_event(TrackListEvent::DeleteSelected);
    settle(&mut view);

    assert!(view.controller.is_empty_state());
}

#[test]
fn test_reload_picks_up_external_changes() {
    let fixture = TrackFixture::with_tracks(&[("A", true)]);
    let mut view = loaded_view(&fixture);

    fixture.store().create_track("Imported").unwrap();
    view.apply_event(TrackListEvent::Reload);
    settle(&mut view);

    assert_eq!(view.controller.rows().len(), 2);
}

#[test]
fn test_load_after_shutdown_is_ignored() {
    let fixture = TrackFixture::with_tracks(&[("A", true)]);
    let mut view = TrackListView::new_for_test(fixture.db_path().to_path_buf()).unwrap();

    view.request_load();
    view.shutdown();

    let delivered = view.loader.wait().expect("load result");
    let applied = view
        .controller
        .finish_load(delivered.ticket, delivered.result)
        .unwrap();
    assert!(!applied);
    assert!(view.controller.rows().is_empty());
}

#[test]
fn test_recording_creates_track() {
    let fixture = TrackFixture::empty();
    let mut view = TrackListView::new_for_test(fixture.db_path().to_path_buf()).unwrap();

    view.start_recording();
    assert!(view.is_recording());
    settle(&mut view);
    assert_eq!(view.controller.rows().len(), 1);

    view.stop_recording();
    assert!(!view.is_recording());
}

#[test]
fn test_deleting_recorded_track_stops_recorder() {
    let fixture = TrackFixture::empty();
    let mut view = TrackListView::new_for_test(fixture.db_path().to_path_buf()).unwrap();

    view.start_recording();
    settle(&mut view);
    let id: TrackId = view.controller.rows()[0].id.clone();

    view.apply_event(TrackListEvent::SetSelected(id.clone(), true));
    view.apply_event(TrackListEvent::DeleteSelected);

    assert!(!view.is_recording());
    assert_eq!(view.pending_notice, Some(Notice::UnclosedTrackDeleted));
    assert_eq!(fixture.store().is_closed(&id).unwrap(), None);
}

#[test]
fn test_stale_tracks_closed_on_open() {
    let fixture = TrackFixture::empty();
    let id = fixture.store().create_track("Interrupted").unwrap();

    let _view = TrackListView::new_for_test(fixture.db_path().to_path_buf()).unwrap();

    assert_eq!(fixture.store().is_closed(&id).unwrap(), Some(true));
}

#[test]
fn test_format_fix_uses_coordinate_setting() {
    let fixture = TrackFixture::empty();
    let mut view = TrackListView::new_for_test(fixture.db_path().to_path_buf()).unwrap();
    view.settings.coordinates_format = crate::core::CoordinateFormat::DegreesMinutes;

    let fix = crate::core::Fix {
        lat: 55.5,
        lon: -3.25,
        elevation: None,
        timestamp: 0,
    };

    assert_eq!(view.format_fix(&fix), "55° 30.0000', -3° 15.0000'");
}
