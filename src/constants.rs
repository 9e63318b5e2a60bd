// Page contract: element ids, selectors and per-scene layer tuning.
//
// The markup ships every part of the page up front; the director decides
// which of them are shown. Layer tables are keyed by class selector inside
// their scene root.
use advaita_core::{LayerSpec, Part};

// Audio gate
pub const GATE_ID: &str = "start-overlay";
pub const GATE_ENTER_ID: &str = "overlay-ok";
pub const GATE_SKIP_ID: &str = "overlay-close";

// Interactive elements inside the scenes
pub const PORTAL_ID: &str = "portal";

// Mountable parts, in document order.
pub const PART_IDS: [(Part, &str); 8] = [
    (Part::SceneOne, "scene-one"),
    (Part::SeamOneTwo, "seam-one-two"),
    (Part::SceneTwo, "scene-two"),
    (Part::SeamTwoThree, "seam-two-three"),
    (Part::SceneThree, "scene-three"),
    (Part::MainContent, "main-content"),
    (Part::Navbar, "navbar"),
    (Part::MusicPlayer, "music-player"),
];

pub const HIDDEN_CLASS: &str = "hidden";
pub const PORTAL_VISIBLE_CLASS: &str = "visible";

// Oscillation targets
pub const SHAKE_SELECTOR: &str = "[data-shake=\"true\"]";
pub const SHAKE_STRENGTH_ATTR: &str = "data-shake-strength";

// Scene two layers: (scroll level, scroll max, direction, pointer level,
// pointer max, inertia seconds)
pub const SCENE_TWO_LAYERS: [(&str, LayerSpec); 11] = [
    (".bg", LayerSpec::new(1.0, 30.0, 1.0, 2.0, 30.0, 6.0)),
    (".l0", LayerSpec::new(2.0, 100.0, 1.0, 2.0, 50.0, 5.5)),
    (".l1", LayerSpec::new(5.0, 120.0, 1.0, 4.0, 100.0, 4.8)),
    (".l3", LayerSpec::new(4.0, 90.0, 1.0, 3.0, 80.0, 5.0)),
    (".l4", LayerSpec::new(5.0, 80.0, 1.0, 4.0, 120.0, 4.8)),
    (".l5", LayerSpec::new(6.0, 10.0, 1.0, 8.0, 200.0, 6.0)),
    (".l6", LayerSpec::new(9.0, 80.0, -1.0, 15.0, 320.0, 3.8)),
    (".smoke", LayerSpec::new(1.0, 0.0, 1.0, 1.0, 0.0, 6.5).with_drift(20.0)),
    (
        ".smokeBack",
        LayerSpec::new(3.0, 40.0, -1.0, 2.0, 40.0, 7.0)
            .with_breathe(0.5)
            .with_drift(25.0),
    ),
    (
        ".smokeMid",
        LayerSpec::new(5.0, 60.0, -1.0, 4.0, 60.0, 6.5)
            .with_breathe(1.0)
            .with_drift(30.0),
    ),
    (
        ".smokeFront",
        LayerSpec::new(7.0, 100.0, -1.0, 6.0, 100.0, 6.0)
            .with_breathe(1.5)
            .with_drift(35.0),
    ),
];

// Floating player
pub const PLAYER_PREV_ID: &str = "player-prev";
pub const PLAYER_NEXT_ID: &str = "player-next";
pub const PLAYER_TOGGLE_ID: &str = "player-toggle";
pub const PLAYER_PROGRESS_ID: &str = "player-progress";
pub const PLAYER_BAR_ID: &str = "player-bar";
pub const PLAYER_LABEL_ID: &str = "player-label";
pub const PLAYER_TITLE_ID: &str = "player-title";
pub const PLAYER_ARTIST_ID: &str = "player-artist";
pub const PLAYER_TIME_ID: &str = "player-time";
pub const PLAYER_SYNC_SEC: f64 = 0.15;
