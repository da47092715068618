//! Fit circles three ways and stroke an ellipse; prints one line per result.
//!
//! Usage:
//!   cargo run -p geokern --example circles

use geokern::construct::{construct_circle, CircleMethod, Ellipse, StrokeParam, TangentPick};
use geokern::{measure, GeomCfg, Geometry, Vec2};

fn show(label: &str, circles: &[Ellipse]) {
    for e in circles {
        println!(
            "{label}: center=({:.4}, {:.4}) r={:.4} azimuth={:.2}",
            e.center.x, e.center.y, e.major, e.azimuth
        );
    }
    if circles.is_empty() {
        println!("{label}: none");
    }
}

fn main() -> geokern::GeomResult<()> {
    let cfg = GeomCfg::global();
    let pts = [Vec2::new(0.0, 0.0), Vec2::new(4.0, 0.0), Vec2::new(0.0, 3.0)];

    show("2p", &construct_circle(&pts[..2], CircleMethod::TwoPoints, &cfg)?);
    show("3p", &construct_circle(&pts, CircleMethod::ThreePoints, &cfg)?);
    // sides of the triangle as tangents
    let sides = [pts[0], pts[1], pts[0], pts[2], pts[1], pts[2]];
    show(
        "tangents",
        &construct_circle(&sides, CircleMethod::Tangents(TangentPick::All), &cfg)?,
    );
    // two parallels and a transversal
    let strip = [
        Vec2::new(0.0, 0.0),
        Vec2::new(1.0, 0.0),
        Vec2::new(0.0, 2.0),
        Vec2::new(1.0, 2.0),
        Vec2::new(0.0, 0.0),
        Vec2::new(0.0, 1.0),
    ];
    show(
        "strip",
        &construct_circle(&strip, CircleMethod::Tangents(TangentPick::All), &cfg)?,
    );

    let e = Ellipse::new(Vec2::new(0.0, 0.0), 2.0, 1.0, 45.0);
    if let Some(ring) = Geometry::from_ellipse(&e, StrokeParam::parse(248)?)? {
        println!(
            "ellipse: {} points, stroked area {:.4} (exact {:.4})",
            ring.point_n(),
            measure::area(&ring, &cfg)?,
            e.area()
        );
    }
    Ok(())
}
