use crate::s1::angle::Deg;
use crate::s2::latlng::LatLng;
use crate::s2::point::Point;
use crate::s2::r#loop::Loop;

// make_point parses a point written as "lat:lng" in degrees.
pub fn make_point(s: &str) -> Point {
    let mut parts = s.trim().split(':');
    let lat: f64 = parts
        .next()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_else(|| panic!("bad latitude in {:?}", s));
    let lng: f64 = parts
        .next()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or_else(|| panic!("bad longitude in {:?}", s));
    Point::from(LatLng::from_degrees(lat, lng))
}

// parse_points parses a comma separated list of "lat:lng" points.
pub fn parse_points(s: &str) -> Vec<Point> {
    s.split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(make_point)
        .collect()
}

// make_loop builds a loop from "lat:lng, lat:lng, ..." text. The strings
// "empty" and "full" give the special loops.
pub fn make_loop(s: &str) -> Loop {
    match s.trim() {
        "empty" => Loop::empty(),
        "full" => Loop::full(),
        text => Loop::from_points(parse_points(text)),
    }
}

// nested_loops returns a preordered shell with num_holes small holes spaced
// along the equator. Every even hole holds an island, so depths run 0, 1, 2.
// Hole sizes vary so chains have different lengths.
pub fn nested_loops(num_holes: usize) -> Vec<(Loop, i32)> {
    let mut loops = vec![(
        make_loop("-10:-10, -10:60, 10:60, 10:-10"),
        0,
    )];
    for i in 0..num_holes {
        let center = Point::from(LatLng::from_degrees(0., -8. + 2.5 * i as f64));
        loops.push((Loop::regular_loop(center, Deg(0.8).into(), 3 + i % 4), 1));
        if i % 2 == 0 {
            loops.push((Loop::regular_loop(center, Deg(0.3).into(), 3 + i % 3), 2));
        }
    }
    loops
}
