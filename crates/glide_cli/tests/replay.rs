use glide_cli::{Runner, Scenario};

const MENU: &str = r#"
[host]
viewport_width = 200
item_widths = [80, 140, 60, 120]

[carousel]
variant = "menu"
scroll_delay_ms = 0
scroll_interval_ms = 0

[[step]]
at_ms = 0
action = "mount"

[[step]]
at_ms = 10
action = "navigate"
direction = "right"

[[step]]
at_ms = 20
action = "scroll"
offset = 50

[[step]]
at_ms = 30
action = "unmount"

[[step]]
at_ms = 40
action = "navigate"
direction = "left"
"#;

#[test]
fn menu_scenario_replays_deterministically() {
    let scenario = Scenario::from_toml_str(MENU).unwrap();
    let first = Runner::new(scenario.clone()).run();
    let second = Runner::new(scenario).run();
    assert_eq!(first, second);

    let events: Vec<&str> = first.iter().map(|s| s.event.as_str()).collect();
    assert_eq!(
        events,
        [
            "mount",
            "navigate right -> 200.00",
            "scroll 50",
            "unmount",
            "navigate left (ignored)",
            "end",
        ]
    );

    // Instant scroll: target reached in the same step
    assert_eq!(first[1].offset, 200.0);
    assert!(!first[1].right);

    assert_eq!(first[2].offset, 50.0);
    assert!(first[2].left && first[2].right);

    assert_eq!(first[4].offset, 50.0);
}

#[test]
fn snapshots_serialize_to_json() {
    let scenario = Scenario::from_toml_str(MENU).unwrap();
    let snapshots = Runner::new(scenario).run();

    let json = serde_json::to_value(&snapshots).unwrap();
    assert_eq!(json[0]["event"], "mount");
    assert_eq!(json[0]["state"], "ready");
    assert_eq!(json[1]["offset"], 200.0);
}
