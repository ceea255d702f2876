//! End-to-end reveal scenario: button, click, garden, caption, hearts.

use bloomgarden::{HEART_BURST, Scene, Viewport};

fn scene() -> Scene {
    Scene::new(Viewport::new(1280.0, 720.0).unwrap(), 7)
}

#[test]
fn fresh_scene_shows_only_the_button() {
    let s = scene();
    assert!(!s.revealed());
    assert!(s.hearts().is_empty());

    let frame = s.frame(0.0).unwrap();
    assert!(frame.elements.iter().any(|e| e.id == "button-face"));
    assert!(!frame.elements.iter().any(|e| e.id == "caption"));
    assert!(!frame.elements.iter().any(|e| e.id.starts_with("stem-")));
}

#[test]
fn click_reveals_garden_caption_and_hearts() {
    let mut s = scene();
    s.activate(0.0);
    s.tick(3.0);

    assert!(s.revealed());
    // The last emission timer fires at 14 * 200ms = 2.8s, so all 15 hearts
    // exist by t = 3s.
    assert_eq!(s.hearts().len(), HEART_BURST);

    let frame = s.frame(3.0).unwrap();

    // Button has finished its 0.3s exit.
    assert!(!frame.elements.iter().any(|e| e.id.starts_with("button")));

    // Caption is fully in by 1.5s.
    let caption = frame
        .elements
        .iter()
        .find(|e| e.id == "caption")
        .expect("caption visible");
    assert!(caption.opacity > 0.99);

    // All 11 flowers are mounted (one stem each).
    let stems = frame
        .elements
        .iter()
        .filter(|e| e.id.starts_with("stem-"))
        .count();
    assert_eq!(stems, 11);

    // Every emitted heart is somewhere in flight.
    let hearts = frame
        .elements
        .iter()
        .filter(|e| e.id.starts_with("heart-"))
        .count();
    assert_eq!(hearts, HEART_BURST);
}

#[test]
fn button_fades_out_rather_than_vanishing() {
    let mut s = scene();
    s.activate(0.0);

    let frame = s.frame(0.15).unwrap();
    let face = frame
        .elements
        .iter()
        .find(|e| e.id == "button-face")
        .expect("button mid-exit");
    assert!(face.opacity > 0.0);
    assert!(face.opacity < 1.0);
}

#[test]
fn emission_count_tracks_elapsed_time() {
    let mut s = scene();
    s.activate(0.0);

    s.tick(2.7);
    // Timers at 0.0, 0.2, ..., 2.6 have fired.
    assert_eq!(s.hearts().len(), 14);

    s.tick(2.8);
    assert_eq!(s.hearts().len(), HEART_BURST);
}

#[test]
fn second_click_changes_nothing() {
    let mut a = scene();
    let mut b = scene();
    a.activate(0.0);
    b.activate(0.0);
    b.activate(1.0); // ignored
    a.tick(3.0);
    b.tick(3.0);
    assert_eq!(a.hearts(), b.hearts());
}
