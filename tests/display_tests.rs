use openfahrplan::display::{location_type_label, route_type_label, sort_route_names};

#[test]
fn sort_route_names_numeric_and_prefixed() {
    let sorted = sort_route_names(&[
        "U3",
        "RB 30",
        "RB 2",
        "RB 29",
        "819 (VRN 980)",
        "1",
        "100",
        "30",
    ]);
    assert_eq!(
        sorted,
        vec!["1", "30", "100", "819 (VRN 980)", "RB 2", "RB 29", "RB 30", "U3"]
    );
}

#[test]
fn sort_route_names_without_digits_last() {
    let sorted = sort_route_names(&["S2", "S", "S1"]);
    assert_eq!(sorted, vec!["S1", "S2", "S"]);
}

#[test]
fn sort_route_names_case_insensitive_prefix() {
    let sorted = sort_route_names(&["u2", "U1", "u3"]);
    assert_eq!(sorted, vec!["U1", "u2", "u3"]);
}

#[test]
fn sort_route_names_empty() {
    let names: [&str; 0] = [];
    assert!(sort_route_names(&names).is_empty());
}

#[test]
fn route_type_labels() {
    assert_eq!(route_type_label(0), "Tram");
    assert_eq!(route_type_label(1), "U-Bahn");
    assert_eq!(route_type_label(2), "Zug");
    assert_eq!(route_type_label(3), "Bus");
    assert_eq!(route_type_label(4), "Fähre");
    assert_eq!(route_type_label(7), "Funicular");
    assert_eq!(route_type_label(12), "Other(12)");
}

#[test]
fn location_type_labels() {
    assert_eq!(location_type_label(None, None), "Stop");
    assert_eq!(location_type_label(Some(0), Some("")), "Stop");
    assert_eq!(location_type_label(None, Some("parent")), "Platform");
    assert_eq!(location_type_label(Some(1), None), "Station");
    assert_eq!(location_type_label(Some(1), Some("parent")), "-1");
}
