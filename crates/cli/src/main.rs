mod config;
mod provenance;
mod table;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use calibgeom::api::{
    angular_kinematics, AngleHelper, AngleSample, AngleStyle, Calibration, Pt2, Rect2, ViewZoom,
};
use calibgeom::pt;
use clap::{Args, Parser, Subcommand};
use polars::prelude::*;
use serde_json::{json, Value};
use tracing_subscriber::fmt::SubscriberBuilder;

use crate::config::Config;
use crate::provenance::{document, write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "cli")]
#[command(about = "Calibrated measurements on image coordinates")]
struct Cmd {
    /// Measurement config (JSON); defaults to uncalibrated pixels in degrees
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Map `x,y` columns image → world (or world → image with --inverse)
    Map {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        inverse: bool,
    },
    /// Measure one angle and print value plus drawing geometry as JSON
    Angle(AngleArgs),
    /// Print the image ellipse of a world circle as JSON
    Ellipse {
        #[arg(long, default_value_t = 0.0)]
        cx: f64,
        #[arg(long, default_value_t = 0.0)]
        cy: f64,
        #[arg(long, default_value_t = 1.0)]
        radius: f64,
    },
    /// Angular kinematics of `ox,oy,ax,ay,bx,by` rows, one per frame
    Kinematics {
        #[arg(long)]
        input: PathBuf,
        #[arg(long)]
        out: PathBuf,
        #[arg(long)]
        fps: f64,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Args, Clone, Debug)]
struct AngleArgs {
    /// Vertex as `x,y`
    #[arg(long, value_parser = parse_point)]
    o: Pt2,
    #[arg(long, value_parser = parse_point)]
    a: Pt2,
    #[arg(long, value_parser = parse_point)]
    b: Pt2,
    #[arg(long)]
    signed: bool,
    #[arg(long, conflicts_with = "cw")]
    ccw: bool,
    #[arg(long)]
    cw: bool,
    #[arg(long)]
    supplementary: bool,
    /// Arc radius; `<= 0` is relative to the shortest leg
    #[arg(long)]
    radius: Option<f64>,
    /// Viewport zoom used for the label distance
    #[arg(long, default_value_t = 1.0)]
    zoom: f64,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let cfg = Config::load(cmd.config.as_deref())?;
    match cmd.action {
        Action::Map {
            input,
            out,
            inverse,
        } => map_points(&cfg, &input, &out, inverse).map(|_| ()),
        Action::Angle(args) => print_json(&angle(&cfg, &args)?),
        Action::Ellipse { cx, cy, radius } => print_json(&ellipse(&cfg, pt(cx, cy), radius)),
        Action::Kinematics { input, out, fps } => kinematics(&cfg, &input, &out, fps).map(|_| ()),
        Action::Report => print_json(&report(&cfg, cmd.config.as_deref())),
    }
}

fn print_json(v: &Value) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(v)?);
    Ok(())
}

fn parse_point(s: &str) -> std::result::Result<Pt2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y but got {s:?}"))?;
    let x: f64 = x.trim().parse().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y: f64 = y.trim().parse().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(pt(x, y))
}

fn xy(p: Pt2) -> [f64; 2] {
    [p.x, p.y]
}

fn rect_json(r: Rect2) -> Value {
    json!({ "left": r.left(), "top": r.top(), "right": r.right(), "bottom": r.bottom() })
}

fn map_points(cfg: &Config, input: &Path, out: &Path, inverse: bool) -> Result<usize> {
    let cal = cfg.calibration();
    tracing::info!(input = %input.display(), out = %out.display(), inverse, calibration = cal.kind(), "map");
    let cols = table::read_f64_columns(input, &["x", "y"])?;
    let (xs, ys): (Vec<f64>, Vec<f64>) = cols[0]
        .iter()
        .zip(&cols[1])
        .map(|(&x, &y)| {
            let p = if inverse {
                cal.to_image(pt(x, y))
            } else {
                cal.to_world(pt(x, y))
            };
            (p.x, p.y)
        })
        .unzip();
    let rows = xs.len();
    let mut df = df!("x" => xs, "y" => ys)?;
    table::write_frame(&mut df, out)?;
    let payload = Payload::new(
        "map",
        json!({ "inverse": inverse, "calibration": cfg.calibration }),
    )
    .with_input(input);
    write_sidecar(out, &payload)?;
    Ok(rows)
}

fn angle(cfg: &Config, args: &AngleArgs) -> Result<Value> {
    let cal = cfg.calibration();
    let unit = cfg.unit();
    let mut options = cfg.options();
    options.signed |= args.signed;
    options.supplementary |= args.supplementary;
    if args.ccw {
        options.ccw = true;
    }
    if args.cw {
        options.ccw = false;
    }
    let mut style = AngleStyle::default();
    if let Some(r) = args.radius {
        style.radius = r;
    }

    let mut helper = AngleHelper::new(style);
    let view = ViewZoom { zoom: args.zoom };
    if !helper.update(args.o, args.a, args.b, options, &cal, &view) {
        bail!("angle vertex coincides with a leg, or a point lies on the calibration horizon");
    }
    let s = helper.sweep();
    tracing::info!(value = helper.value(unit), sweep = s.sweep(), calibration = cal.kind(), "angle");
    Ok(json!({
        "value": helper.value(unit),
        "unit": cfg.angle_unit,
        "label": helper.label(unit, 1),
        "calibration": { "kind": cal.kind(), "valid": cal.is_valid() },
        "options": {
            "signed": options.signed,
            "ccw": options.ccw,
            "supplementary": options.supplementary,
        },
        "sweep": {
            "origin": xy(s.origin()),
            "radius": s.radius(),
            "start": s.start(),
            "sweep": s.sweep(),
            "arrow_start": xy(s.arrow_start()),
            "arrow_end": xy(s.arrow_end()),
            "bounding_box": rect_json(s.bounding_box()),
        },
        "text_position": xy(helper.text_position()),
    }))
}

fn ellipse(cfg: &Config, center: Pt2, radius: f64) -> Value {
    let cal = cfg.calibration();
    match cal.ellipse_from_circle(center, radius) {
        Some(e) => json!({
            "center": xy(e.center),
            "semi_major": e.semi_major,
            "semi_minor": e.semi_minor,
            "rotation": e.rotation,
        }),
        None => {
            tracing::warn!(center = ?xy(center), radius, "circle has no elliptic image");
            Value::Null
        }
    }
}

fn kinematics(cfg: &Config, input: &Path, out: &Path, fps: f64) -> Result<usize> {
    if !(fps > 0.0 && fps.is_finite()) {
        bail!("fps must be positive, got {fps}");
    }
    let cal = cfg.calibration();
    tracing::info!(input = %input.display(), out = %out.display(), fps, calibration = cal.kind(), "kinematics");
    let c = table::read_f64_columns(input, &["ox", "oy", "ax", "ay", "bx", "by"])?;
    let samples: Vec<AngleSample> = (0..c[0].len())
        .map(|i| {
            AngleSample::new(
                pt(c[0][i], c[1][i]),
                pt(c[2][i], c[3][i]),
                pt(c[4][i], c[5][i]),
            )
        })
        .collect();
    let series = angular_kinematics(&samples, 1.0 / fps, cfg.options(), &cal)
        .context("computing angular kinematics")?
        .in_unit(cfg.unit());

    let mut df = df!(
        "time" => &series.time,
        "radius" => &series.radius,
        "angular_position" => &series.angular_position,
        "angular_displacement" => &series.angular_displacement,
        "total_angular_displacement" => &series.total_angular_displacement,
        "angular_velocity" => &series.angular_velocity,
        "tangential_velocity" => &series.tangential_velocity,
        "angular_acceleration" => &series.angular_acceleration,
        "tangential_acceleration" => &series.tangential_acceleration,
        "centripetal_acceleration" => &series.centripetal_acceleration,
        "resultant_acceleration" => &series.resultant_acceleration
    )?;
    table::write_frame(&mut df, out)?;
    let payload = Payload::new(
        "kinematics",
        json!({ "fps": fps, "angle_unit": cfg.angle_unit, "angle": cfg.angle, "calibration": cfg.calibration }),
    )
    .with_input(input);
    write_sidecar(out, &payload)?;
    Ok(series.len())
}

fn report(cfg: &Config, config_path: Option<&Path>) -> Value {
    let params = json!({
        "config_path": config_path.map(|p| p.display().to_string()),
        "config": cfg,
    });
    document(&Payload::new("report", params), &[])
}
