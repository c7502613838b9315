//! End-to-end editor flows: designer choice, object creation from the
//! ground plane, drag commits and properties edits, observed through the
//! calls that reach the API.

mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::test_app;
use scenedesk_app::editor::{GestureOutcome, DEFAULT_OBJECT_COLOR, NO_DESIGNER_NOTICE};
use scenedesk_app::{Gesture, InteractionState};
use scenedesk_core::model::Axis;
use scenedesk_core::validation::DesignerForm;
use scenedesk_core::{ObjectSize, SceneObjectPatch, Vector3};

// ---------------------------------------------------------------------------
// Test: create, drag and release
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_ground_double_click_then_drag_commits_once() {
    let (app, api) = test_app();
    let editor = app.editor();
    editor.mount().await;

    let input = DesignerForm::new("Dana Scully", "07:00-15:00")
        .parse()
        .unwrap();
    app.designers.create(input).await;
    let designer = app.designers.designers().last().unwrap().clone();
    editor.choose_designer(Some(designer.id.clone()));

    let outcome = editor
        .handle(Gesture::GroundDoubleClick(Vector3::new(1.0, 0.0, 2.0)))
        .await;
    assert_eq!(outcome, GestureOutcome::Applied);

    let object = app.objects.objects()[0].clone();
    assert_eq!(object.designer_id, designer.id);
    assert_eq!(object.position, Vector3::new(1.0, 0.0, 2.0));
    assert_eq!(object.size, ObjectSize::Normal);
    assert_eq!(object.color, DEFAULT_OBJECT_COLOR);
    assert_eq!(object.name, "Object 1");

    editor.handle(Gesture::Click(object.id.clone())).await;
    for (x, z) in [(1.5, 2.5), (2.0, 3.5), (2.75, 4.5), (3.0, 5.0)] {
        let outcome = editor
            .handle(Gesture::DragMove {
                id: object.id.clone(),
                position: Vector3::new(x, 0.0, z),
            })
            .await;
        assert_eq!(outcome, GestureOutcome::Applied);
    }
    assert!(api.update_calls().is_empty());
    assert_eq!(editor.state_of(&object.id), InteractionState::Dragging);

    editor
        .handle(Gesture::DragRelease {
            id: object.id.clone(),
        })
        .await;

    assert_eq!(
        api.update_calls(),
        vec![(
            object.id.clone(),
            SceneObjectPatch::position(Vector3::new(3.0, 0.0, 5.0))
        )]
    );
    assert_eq!(
        app.objects.get(&object.id).unwrap().position,
        Vector3::new(3.0, 0.0, 5.0)
    );
    assert_eq!(editor.state_of(&object.id), InteractionState::Selected);

    // The designers table counts the attached object.
    let row = app
        .designer_rows()
        .into_iter()
        .find(|row| row.id == designer.id)
        .unwrap();
    assert_eq!(row.attached_objects_count, 1);
}

// ---------------------------------------------------------------------------
// Test: failed drag commit
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_failed_drag_commit_keeps_stored_position() {
    let (app, api) = test_app();
    let editor = app.editor();
    editor.mount().await;
    editor.choose_designer(Some("d1".into()));
    editor
        .handle(Gesture::GroundDoubleClick(Vector3::new(1.0, 0.0, 2.0)))
        .await;
    let id = app.objects.objects()[0].id.clone();

    editor.handle(Gesture::Click(id.clone())).await;
    editor
        .handle(Gesture::DragMove {
            id: id.clone(),
            position: Vector3::new(6.0, 0.0, 6.0),
        })
        .await;

    api.fail_updates.store(true, Ordering::SeqCst);
    let outcome = editor.handle(Gesture::DragRelease { id: id.clone() }).await;
    assert_eq!(outcome, GestureOutcome::Applied);

    assert_eq!(api.update_calls().len(), 1);
    assert_eq!(
        app.objects.error().as_deref(),
        Some("Internal error: backend unavailable")
    );
    assert_eq!(
        app.objects.get(&id).unwrap().position,
        Vector3::new(1.0, 0.0, 2.0)
    );
    // Preview dropped: the renderer shows the stored position again.
    assert_eq!(editor.state_of(&id), InteractionState::Selected);
    assert_eq!(editor.scene()[0].position, Vector3::new(1.0, 0.0, 2.0));
}

#[tokio::test(start_paused = true)]
async fn test_drag_to_non_finite_point_writes_nothing() {
    let (app, api) = test_app();
    let editor = app.editor();
    editor.mount().await;
    editor.choose_designer(Some("d1".into()));
    editor
        .handle(Gesture::GroundDoubleClick(Vector3::new(1.0, 0.0, 2.0)))
        .await;
    let id = app.objects.objects()[0].id.clone();

    editor.handle(Gesture::Click(id.clone())).await;
    let outcome = editor
        .handle(Gesture::DragMove {
            id: id.clone(),
            position: Vector3::new(f64::NAN, 0.0, 2.0),
        })
        .await;
    assert_eq!(outcome, GestureOutcome::Ignored);

    let outcome = editor.handle(Gesture::DragRelease { id: id.clone() }).await;
    assert_eq!(outcome, GestureOutcome::Ignored);
    assert!(api.update_calls().is_empty());

    app.objects.fetch().await;
    assert_eq!(
        app.objects.get(&id).unwrap().position,
        Vector3::new(1.0, 0.0, 2.0)
    );
}

// ---------------------------------------------------------------------------
// Test: no designer chosen
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_double_click_without_designer_is_rejected() {
    let (app, api) = test_app();
    let editor = app.editor();
    editor.mount().await;

    let outcome = editor
        .handle(Gesture::GroundDoubleClick(Vector3::new(0.0, 0.0, 0.0)))
        .await;

    assert_eq!(outcome, GestureOutcome::Rejected(NO_DESIGNER_NOTICE.into()));
    assert_eq!(editor.notice().as_deref(), Some(NO_DESIGNER_NOTICE));
    assert_eq!(
        api.create_object_calls.load(Ordering::SeqCst),
        0
    );
    assert!(app.objects.is_empty());

    tokio::time::sleep(Duration::from_millis(3300)).await;
    assert!(editor.notice().is_none());
}

// ---------------------------------------------------------------------------
// Test: properties panel edits
// ---------------------------------------------------------------------------

#[tokio::test(start_paused = true)]
async fn test_each_property_edit_issues_one_update() {
    let (app, api) = test_app();
    let editor = app.editor();
    editor.mount().await;
    editor.choose_designer(Some("d1".into()));
    editor
        .handle(Gesture::GroundDoubleClick(Vector3::new(0.5, 0.0, -1.0)))
        .await;
    let id = app.objects.objects()[0].id.clone();

    let panel = editor.properties();
    assert!(panel.view().is_none());
    editor.handle(Gesture::Click(id.clone())).await;

    let view = panel.view().unwrap();
    assert_eq!(view.short_id, &id[..6]);
    assert_eq!(view.position_fields[0].1, "0.50");
    assert_eq!(view.position_fields[2].1, "-1.00");

    panel.set_name("Crate").await;
    panel.set_size(ObjectSize::Small).await;
    panel.set_position_axis(Axis::Y, "1.25").await;

    let calls = api.update_calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0].1, SceneObjectPatch::name("Crate"));
    assert_eq!(calls[1].1, SceneObjectPatch::size(ObjectSize::Small));
    assert_eq!(
        calls[2].1,
        SceneObjectPatch::position(Vector3::new(0.5, 1.25, -1.0))
    );

    let rendered = editor.scene();
    assert_eq!(rendered[0].scale, 0.5);
    assert_eq!(rendered[0].position, Vector3::new(0.5, 1.25, -1.0));

    // Reloading reads back every edit.
    app.objects.fetch().await;
    let view = panel.view().unwrap();
    assert_eq!(view.name, "Crate");
    assert_eq!(view.size, ObjectSize::Small);
}
