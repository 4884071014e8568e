//! Presentation helpers shared by anything that renders stops and
//! routes: natural route-name ordering and human labels.

/// Splits a route name into its non-digit prefix, its first digit run
/// and the remainder, so "RB 29" sorts between "RB 2" and "RB 30".
fn split_route_name(name: &str) -> (&str, Option<i64>, &str) {
    let start = name
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(name.len());
    let rest = &name[start..];
    let run = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..run];
    (&name[..start], digits.parse().ok(), &rest[run..])
}

/// Sorts route names by `(prefix, numeric run, suffix)` with the text
/// parts compared case-insensitively and names without any digits
/// ordered last within their prefix.
pub fn sort_route_names<S: AsRef<str>>(names: &[S]) -> Vec<String> {
    let mut parts: Vec<(String, bool, i64, String, String)> = names
        .iter()
        .map(|name| {
            let name = name.as_ref();
            let (prefix, number, suffix) = split_route_name(name);
            let rebuilt = match number {
                Some(number) => format!("{prefix}{number}{suffix}"),
                None => name.to_string(),
            };
            (
                prefix.to_lowercase(),
                number.is_none(),
                number.unwrap_or(0),
                suffix.to_lowercase(),
                rebuilt,
            )
        })
        .collect();
    parts.sort_by(|a, b| (&a.0, a.1, a.2, &a.3).cmp(&(&b.0, b.1, b.2, &b.3)));
    parts.into_iter().map(|(_, _, _, _, rebuilt)| rebuilt).collect()
}

pub fn route_type_label(route_type: i64) -> String {
    match route_type {
        0 => "Tram".into(),
        1 => "U-Bahn".into(),
        2 => "Zug".into(),
        3 => "Bus".into(),
        4 => "Fähre".into(),
        5 => "Cable Car".into(),
        6 => "Gondel".into(),
        7 => "Funicular".into(),
        other => format!("Other({other})"),
    }
}

/// Labels a stops-table row the way riders read it: a plain stop, a
/// platform under a station, or the station itself.
pub fn location_type_label(location_type: Option<i64>, parent_station: Option<&str>) -> &'static str {
    let has_parent = parent_station
        .map(str::trim)
        .is_some_and(|parent| !parent.is_empty());
    let has_type = location_type.is_some_and(|location_type| location_type > 0);
    match (has_type, has_parent) {
        (false, false) => "Stop",
        (false, true) => "Platform",
        (true, false) => "Station",
        (true, true) => "-1",
    }
}
