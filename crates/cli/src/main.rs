use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use geokern::construct::{construct_circle, CircleMethod, Ellipse, StrokeParam, TangentPick};
use geokern::mode::Mode;
use geokern::prelude::*;
use geokern::{ops, set_tolerance};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fs;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Run 2D geometry algorithms on flat-array JSON geometries")]
struct Cmd {
    /// Global coordinate tolerance
    #[arg(long, global = true)]
    tol: Option<f64>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Method {
    #[value(name = "2p")]
    TwoPoints,
    #[value(name = "3p")]
    ThreePoints,
    Tangents,
}

#[derive(Subcommand)]
enum Action {
    /// Scalar property (modes 0-3)
    Value {
        #[arg(long)]
        mode: i32,
        #[arg(long)]
        input: String,
    },
    /// Derived geometry (modes 10-23) or vertex edit (40-42)
    Geo {
        #[arg(long)]
        mode: i32,
        #[arg(long)]
        input: String,
        #[arg(long)]
        out: String,
        /// Distance threshold for modes 40-42
        #[arg(long)]
        para: Option<f64>,
    },
    /// Spatial predicate (modes 60-67): prints -1, 0 or 1
    Relate {
        #[arg(long)]
        mode: i32,
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
    },
    /// Overlay of two geometries (modes 50-53)
    Combine {
        #[arg(long)]
        mode: i32,
        #[arg(long)]
        a: String,
        #[arg(long)]
        b: String,
        #[arg(long)]
        out: String,
    },
    /// Validity check (modes 80-85) or defect bitmask
    Check {
        #[arg(long, required_unless_present = "mode2")]
        mode: Option<i32>,
        #[arg(long)]
        mode2: Option<u32>,
        #[arg(long)]
        input: String,
    },
    /// Fit circles to a flat x,y list
    Circle {
        #[arg(long, value_enum)]
        method: Method,
        #[arg(long)]
        points: String,
        /// Keep only the first circle of an ambiguous tangent construction
        #[arg(long)]
        first: bool,
    },
    /// Stroke an ellipse into a ring or closed path
    Stroke {
        #[arg(long)]
        cx: f64,
        #[arg(long)]
        cy: f64,
        #[arg(long)]
        major: f64,
        #[arg(long)]
        minor: f64,
        #[arg(long, default_value_t = 0.0)]
        azimuth: f64,
        #[arg(long, default_value_t = 236)]
        param: u32,
        #[arg(long)]
        out: String,
    },
    /// Stream `{geometry, props}` JSON lines through a geometry mode
    Batch {
        #[arg(long)]
        input: String,
        #[arg(long)]
        mode: i32,
        #[arg(long)]
        out: String,
        #[arg(long)]
        para: Option<f64>,
        /// Records held before a flush
        #[arg(long, default_value_t = 256)]
        chunk: usize,
    },
    /// Print a small provenance JSON block
    Report,
}

/// One line of a batch file.
#[derive(Debug, Serialize, Deserialize)]
struct Line {
    geometry: OraArrays,
    #[serde(default)]
    props: Vec<i32>,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    if let Some(tol) = cmd.tol {
        let previous = set_tolerance(tol).context("setting --tol")?;
        tracing::info!(tol, previous, "tolerance");
    }
    let cfg = GeomCfg::global();
    match cmd.action {
        Action::Value { mode, input } => {
            let g = read_geometry(&input, &cfg)?;
            println!("{}", ops::prop_value(&g, mode, &cfg)?);
            Ok(())
        }
        Action::Geo {
            mode,
            input,
            out,
            para,
        } => {
            let g = read_geometry(&input, &cfg)?;
            let derived = apply(&g, mode, para, &cfg)?;
            write_geometry(&out, &derived, &cfg)?;
            let payload = Payload::new("geo", json!({"mode": mode, "input": input, "para": para}));
            write_sidecar(&out, payload)?;
            Ok(())
        }
        Action::Relate { mode, a, b } => {
            let (a, b) = (read_geometry(&a, &cfg)?, read_geometry(&b, &cfg)?);
            println!("{}", ops::relation(&a, &b, mode, &cfg)?.code());
            Ok(())
        }
        Action::Combine { mode, a, b, out } => {
            let ga = read_geometry(&a, &cfg)?;
            let gb = read_geometry(&b, &cfg)?;
            let result = ops::combine(&ga, &gb, mode, &cfg)?;
            write_geometry(&out, &result, &cfg)?;
            write_sidecar(&out, Payload::new("combine", json!({"mode": mode, "a": a, "b": b})))?;
            Ok(())
        }
        Action::Check { mode, mode2, input } => {
            let g = read_geometry(&input, &cfg)?;
            match (mode, mode2) {
                (_, Some(mask)) => println!("{}", ops::check2(&g, mask, &cfg)?.bits()),
                (Some(mode), None) => println!("{}", u8::from(ops::check(&g, mode, &cfg)?)),
                (None, None) => bail!("check needs --mode or --mode2"),
            }
            Ok(())
        }
        Action::Circle {
            method,
            points,
            first,
        } => circle(method, &points, first, &cfg),
        Action::Stroke {
            cx,
            cy,
            major,
            minor,
            azimuth,
            param,
            out,
        } => {
            let e = Ellipse::new(Vec2::new(cx, cy), major, minor, azimuth);
            let Some(g) = Geometry::from_ellipse(&e, StrokeParam::parse(param)?)? else {
                bail!("ellipse with major={major} minor={minor} has nothing to stroke");
            };
            write_geometry(&out, &g, &cfg)?;
            Ok(())
        }
        Action::Batch {
            input,
            mode,
            out,
            para,
            chunk,
        } => {
            let n = batch(&input, mode, para, &out, chunk, &cfg)?;
            tracing::info!(records = n, input, out, "batch");
            Ok(())
        }
        Action::Report => {
            let obj = provenance::block("report", json!({}), &[]);
            println!("{}", serde_json::to_string_pretty(&obj)?);
            Ok(())
        }
    }
}

/// Geometry-valued modes: 10-23 through `prop_geo`, 40-42 through `modify`.
fn apply(g: &Geometry, mode: i32, para: Option<f64>, cfg: &GeomCfg) -> Result<Geometry> {
    Ok(match Mode::try_from(mode)? {
        Mode::Geo(_) => ops::prop_geo(g, mode, cfg)?,
        Mode::Modify(_) => ops::modify(g, mode, para.unwrap_or(cfg.tol), cfg)?,
        other => bail!("mode {} does not produce a geometry", other.code()),
    })
}

fn read_geometry(path: &str, cfg: &GeomCfg) -> Result<Geometry> {
    let bytes = fs::read(path).with_context(|| format!("reading {path}"))?;
    let ora: OraArrays =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {path}"))?;
    Geometry::from_ora(&ora, cfg).with_context(|| format!("decoding {path}"))
}

fn create_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn write_geometry(path: &str, g: &Geometry, cfg: &GeomCfg) -> Result<()> {
    create_parent(Path::new(path))?;
    let ora = g.to_ora(cfg)?;
    fs::write(path, serde_json::to_vec_pretty(&ora)?).with_context(|| format!("writing {path}"))
}

fn parse_points(text: &str) -> Result<Vec<Vec2<f64>>> {
    let vals = text
        .split(',')
        .map(|s| s.trim().parse::<f64>().with_context(|| format!("bad coordinate {s:?}")))
        .collect::<Result<Vec<_>>>()?;
    if vals.len() % 2 != 0 {
        bail!("odd number of coordinates ({})", vals.len());
    }
    Ok(vals.chunks_exact(2).map(|c| Vec2::new(c[0], c[1])).collect())
}

fn circle(method: Method, points: &str, first: bool, cfg: &GeomCfg) -> Result<()> {
    let pts = parse_points(points)?;
    let pick = if first { TangentPick::First } else { TangentPick::All };
    let method = match method {
        Method::TwoPoints => CircleMethod::TwoPoints,
        Method::ThreePoints => CircleMethod::ThreePoints,
        Method::Tangents => CircleMethod::Tangents(pick),
    };
    let circles: Vec<_> = construct_circle(&pts, method, cfg)?
        .iter()
        .map(|e| {
            json!({
                "center": [e.center.x, e.center.y],
                "major": e.major,
                "minor": e.minor,
                "azimuth": e.azimuth,
            })
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&circles)?);
    Ok(())
}

/// Stream records through `apply`, holding at most `chunk` records at a time.
/// Returns the number of records written.
fn batch(
    input: &str,
    mode: i32,
    para: Option<f64>,
    out: &str,
    chunk: usize,
    cfg: &GeomCfg,
) -> Result<usize> {
    let reader =
        BufReader::new(fs::File::open(input).with_context(|| format!("opening {input}"))?);
    create_parent(Path::new(out))?;
    let file = fs::File::create(out).with_context(|| format!("creating {out}"))?;
    let mut sink = BufWriter::new(file);
    let mut pending = RecordBuffer::reader(chunk)?;
    let mut written = 0;

    let mut flush = |pending: &mut RecordBuffer, sink: &mut BufWriter<fs::File>| -> Result<()> {
        let mut results = RecordBuffer::writer();
        for record in pending.drain() {
            let (g, props) = record.into_parts();
            results.push(apply(&g, mode, para, cfg)?, props)?;
        }
        while let Some(record) = results.pop() {
            let (g, props) = record.into_parts();
            let line = Line {
                geometry: g.to_ora(cfg)?,
                props,
            };
            serde_json::to_writer(&mut *sink, &line)?;
            sink.write_all(b"\n")?;
            written += 1;
        }
        Ok(())
    };

    for (lineno, text) in reader.lines().enumerate() {
        let text = text?;
        if text.trim().is_empty() {
            continue;
        }
        let line: Line = serde_json::from_str(&text)
            .with_context(|| format!("{input}:{}: bad record", lineno + 1))?;
        let g = Geometry::from_ora(&line.geometry, cfg)
            .with_context(|| format!("{input}:{}: bad geometry", lineno + 1))?;
        pending.push(g, line.props)?;
        if pending.is_full() {
            flush(&mut pending, &mut sink)?;
        }
    }
    flush(&mut pending, &mut sink)?;
    sink.flush()?;
    Ok(written)
}
