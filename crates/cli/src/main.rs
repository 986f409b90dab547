mod provenance;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use polars::prelude::*;
use serde::Serialize;
use serde_json::json;
use shapejam::api::{
    area, entropy_seed, generate_from_points, generate_replay, is_simple, Generation, GeomCfg,
    JamDirection, Pt2, ReplayToken, SceneCfg, Session,
};
use shapejam::Vec2;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::Payload;

#[derive(Parser)]
#[command(name = "shapejam")]
#[command(about = "Boundary polygons from random point sets, eroded and dilated")]
struct Cmd {
    #[command(flatten)]
    scene: SceneArgs,

    #[command(subcommand)]
    action: Action,
}

#[derive(Args, Clone, Debug)]
struct SceneArgs {
    /// Seed for reproducible draws; drawn from OS entropy and logged when absent
    #[arg(long, global = true)]
    seed: Option<u64>,
    /// Number of points per draw
    #[arg(long, global = true, default_value_t = 24)]
    count: usize,
    #[arg(long, global = true, default_value_t = 1024.0)]
    width: f64,
    #[arg(long, global = true, default_value_t = 1024.0)]
    height: f64,
    /// Classification tolerance
    #[arg(long, global = true, default_value_t = 1e-12)]
    epsilon: f64,
    /// CSV with `x`, `y` columns; replaces the random draw
    #[arg(long, global = true)]
    points: Option<PathBuf>,
}

impl SceneArgs {
    fn cfg(&self, tempo: f64) -> SceneCfg {
        SceneCfg {
            num_points: self.count,
            resolution: Vec2::new(self.width, self.height),
            tempo,
            geom: GeomCfg::default().with_eps(self.epsilon),
        }
    }

    fn params(&self, seed: u64) -> serde_json::Value {
        json!({
            "seed": seed,
            "count": self.count,
            "width": self.width,
            "height": self.height,
            "epsilon": self.epsilon,
            "points": self.points.as_ref().map(|p| p.to_string_lossy().into_owned()),
        })
    }
}

#[derive(Subcommand)]
enum Action {
    /// Draw points and write the boundary polygon as JSON
    Generate {
        #[arg(long)]
        out: PathBuf,
        /// Fresh draws to try before giving up
        #[arg(long, default_value_t = 16)]
        attempts: u32,
    },
    /// Classify a point against the generated polygon
    Classify {
        #[arg(long, allow_hyphen_values = true)]
        x: f64,
        #[arg(long, allow_hyphen_values = true)]
        y: f64,
        #[arg(long, default_value_t = 16)]
        attempts: u32,
    },
    /// Erode or dilate the generated polygon for a number of ticks
    Jam {
        #[arg(long, value_enum, default_value_t = Direction::In)]
        direction: Direction,
        #[arg(long, default_value_t = 100)]
        ticks: u32,
        #[arg(long, default_value_t = 1.0)]
        tempo: f64,
        /// `.csv` / `.parquet` write a frame table, anything else JSON
        #[arg(long)]
        out: PathBuf,
        #[arg(long, default_value_t = 16)]
        attempts: u32,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Direction {
    In,
    Out,
}

impl From<Direction> for JamDirection {
    fn from(d: Direction) -> Self {
        match d {
            Direction::In => JamDirection::In,
            Direction::Out => JamDirection::Out,
        }
    }
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Generate { out, attempts } => generate(&cmd.scene, &out, attempts),
        Action::Classify { x, y, attempts } => classify(&cmd.scene, Vec2::new(x, y), attempts),
        Action::Jam {
            direction,
            ticks,
            tempo,
            out,
            attempts,
        } => jam(&cmd.scene, direction, ticks, tempo, &out, attempts),
        Action::Report => report(),
    }
}

/// Build a session from the CSV points, or from up to `attempts` seeded draws.
fn session(scene: &SceneArgs, tempo: f64, attempts: u32) -> Result<(u64, Session)> {
    let cfg = scene.cfg(tempo);
    let seed = scene.seed.unwrap_or_else(entropy_seed);
    if let Some(path) = &scene.points {
        let points = load_points(path)?;
        tracing::info!(path = %path.display(), points = points.len(), "loaded points");
        let generation = generate_from_points(points, cfg.geom)
            .with_context(|| format!("building polygon for {}", path.display()))?;
        return Ok((
            seed,
            Session::from_generation(cfg, ReplayToken::new(seed), generation),
        ));
    }
    let (token, generation) = draw_with_retries(&cfg, seed, attempts)?;
    Ok((seed, Session::from_generation(cfg, token, generation)))
}

fn draw_with_retries(
    cfg: &SceneCfg,
    seed: u64,
    attempts: u32,
) -> Result<(ReplayToken, Generation)> {
    let mut token = ReplayToken::new(seed);
    for _ in 0..attempts.max(1) {
        match generate_replay(cfg, token) {
            Ok(generation) => {
                tracing::info!(seed, index = token.index, "generated");
                return Ok((token, generation));
            }
            Err(e) => {
                tracing::warn!(seed, index = token.index, error = %e, "draw rejected, redrawing");
                token = token.next();
            }
        }
    }
    Err(anyhow!(
        "no sequenceable polygon in {} draws (seed {seed})",
        attempts.max(1)
    ))
}

fn load_points(path: &Path) -> Result<Vec<Pt2>> {
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {}", path.display()))?
        .select([
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading x, y from {}", path.display()))?;
    let xs = df.column("x")?.f64()?;
    let ys = df.column("y")?.f64()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, xy)| match xy {
            (Some(x), Some(y)) => Ok(Vec2::new(x, y)),
            _ => Err(anyhow!("{}: row {row} has no x or y", path.display())),
        })
        .collect()
}

fn xy(points: &[Pt2]) -> Vec<[f64; 2]> {
    points.iter().map(|p| [p.x, p.y]).collect()
}

fn ensure_parent(out: &Path) -> Result<()> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

fn write_json<T: Serialize>(out: &Path, value: &T) -> Result<()> {
    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(value)?)
        .with_context(|| format!("writing {}", out.display()))
}

#[derive(Serialize)]
struct GenerationDoc {
    seed: u64,
    index: u64,
    points: Vec<[f64; 2]>,
    hull: Vec<(usize, usize)>,
    triangles: Vec<[usize; 3]>,
    edges: Vec<(usize, usize)>,
    walk: Vec<(usize, usize)>,
    polygon: Vec<[f64; 2]>,
    area: f64,
    simple: bool,
}

impl GenerationDoc {
    fn new(token: ReplayToken, g: &Generation, eps: f64) -> Self {
        Self {
            seed: token.seed,
            index: token.index,
            points: xy(&g.points),
            hull: g.delaunay.hull.iter().map(|e| e.as_pair()).collect(),
            triangles: g.delaunay.simplices.clone(),
            edges: g.edges.pairs(),
            walk: g.walk.clone(),
            polygon: xy(&g.polygon),
            area: area(&g.polygon),
            simple: is_simple(&g.polygon, eps),
        }
    }
}

fn generate(scene: &SceneArgs, out: &Path, attempts: u32) -> Result<()> {
    tracing::info!(out = %out.display(), attempts, "generate");
    let (seed, session) = session(scene, 1.0, attempts)?;
    let doc = GenerationDoc::new(
        session.token(),
        session.generation(),
        session.cfg().geom.eps,
    );
    write_json(out, &doc)?;
    let mut params = scene.params(seed);
    params["index"] = json!(session.token().index);
    params["attempts"] = json!(attempts);
    provenance::write_sidecar(out, Payload::new("generate", params))?;
    tracing::info!(
        vertices = doc.polygon.len(),
        area = doc.area,
        simple = doc.simple,
        "wrote polygon"
    );
    Ok(())
}

fn classify(scene: &SceneArgs, p: Pt2, attempts: u32) -> Result<()> {
    let (seed, session) = session(scene, 1.0, attempts)?;
    let position = session.probe(p);
    tracing::info!(x = p.x, y = p.y, %position, "classify");
    let obj = json!({
        "seed": seed,
        "index": session.token().index,
        "x": p.x,
        "y": p.y,
        "position": position.as_str(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[derive(Serialize)]
struct Frame {
    tick: u32,
    area: f64,
    polygon: Vec<[f64; 2]>,
}

#[derive(Serialize)]
struct JamDoc<'a> {
    seed: u64,
    index: u64,
    direction: &'static str,
    tempo: f64,
    frames: &'a [Frame],
}

fn jam(
    scene: &SceneArgs,
    direction: Direction,
    ticks: u32,
    tempo: f64,
    out: &Path,
    attempts: u32,
) -> Result<()> {
    tracing::info!(?direction, ticks, tempo, out = %out.display(), "jam");
    let (seed, mut session) = session(scene, tempo, attempts)?;
    match JamDirection::from(direction) {
        JamDirection::In => session.toggle_erode(),
        JamDirection::Out => session.toggle_dilate(),
    };
    let mut frames = Vec::with_capacity(ticks as usize + 1);
    frames.push(frame(0, session.polygon()));
    for tick in 1..=ticks {
        session.tick()?;
        frames.push(frame(tick, session.polygon()));
    }
    let direction_name = match direction {
        Direction::In => "in",
        Direction::Out => "out",
    };
    write_frames(
        out,
        &JamDoc {
            seed,
            index: session.token().index,
            direction: direction_name,
            tempo,
            frames: &frames,
        },
    )?;
    let mut params = scene.params(seed);
    params["index"] = json!(session.token().index);
    params["direction"] = json!(direction_name);
    params["ticks"] = json!(ticks);
    params["tempo"] = json!(tempo);
    provenance::write_sidecar(out, Payload::new("jam", params))?;
    if let (Some(first), Some(last)) = (frames.first(), frames.last()) {
        tracing::info!(from = first.area, to = last.area, "area");
    }
    Ok(())
}

fn frame(tick: u32, polygon: &[Pt2]) -> Frame {
    Frame {
        tick,
        area: area(polygon),
        polygon: xy(polygon),
    }
}

/// Long format: one row per (tick, vertex).
fn frames_table(frames: &[Frame]) -> PolarsResult<DataFrame> {
    let rows: usize = frames.iter().map(|f| f.polygon.len()).sum();
    let mut tick = Vec::with_capacity(rows);
    let mut vertex = Vec::with_capacity(rows);
    let mut x = Vec::with_capacity(rows);
    let mut y = Vec::with_capacity(rows);
    let mut frame_area = Vec::with_capacity(rows);
    for f in frames {
        for (i, p) in f.polygon.iter().enumerate() {
            tick.push(f.tick);
            vertex.push(i as u32);
            x.push(p[0]);
            y.push(p[1]);
            frame_area.push(f.area);
        }
    }
    df!(
        "tick" => tick,
        "vertex" => vertex,
        "x" => x,
        "y" => y,
        "area" => frame_area
    )
}

fn write_frames(out: &Path, doc: &JamDoc<'_>) -> Result<()> {
    match out.extension().and_then(|e| e.to_str()) {
        Some("csv") => {
            ensure_parent(out)?;
            let mut df = frames_table(doc.frames)?;
            let mut file =
                File::create(out).with_context(|| format!("creating {}", out.display()))?;
            CsvWriter::new(&mut file)
                .include_header(true)
                .finish(&mut df)?;
        }
        Some("parquet") => {
            ensure_parent(out)?;
            let mut df = frames_table(doc.frames)?;
            let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
            ParquetWriter::new(file).finish(&mut df)?;
        }
        _ => write_json(out, doc)?,
    }
    Ok(())
}

fn report() -> Result<()> {
    let mut obj = provenance::header();
    obj["params"] = json!({
        "defaults": {
            "count": SceneCfg::default().num_points,
            "tempo": SceneCfg::default().tempo,
            "epsilon": GeomCfg::default().eps,
        }
    });
    obj["outputs"] = json!([]);
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn square_csv(dir: &Path) -> PathBuf {
        let path = dir.join("square.csv");
        std::fs::write(&path, "x,y\n0,0\n10,0\n10,10\n0,10\n5,4\n").unwrap();
        path
    }

    fn scene_args(points: Option<PathBuf>) -> SceneArgs {
        SceneArgs {
            seed: Some(3),
            count: 24,
            width: 1024.0,
            height: 1024.0,
            epsilon: 1e-12,
            points,
        }
    }

    #[test]
    fn load_points_casts_integer_columns() {
        let dir = tempdir().unwrap();
        let pts = load_points(&square_csv(dir.path())).unwrap();
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[4], Vec2::new(5.0, 4.0));
    }

    #[test]
    fn csv_points_drive_generate() {
        let dir = tempdir().unwrap();
        let scene = scene_args(Some(square_csv(dir.path())));
        let out = dir.path().join("out").join("poly.json");
        generate(&scene, &out, 1).unwrap();
        let doc: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&out).unwrap()).unwrap();
        assert_eq!(doc["polygon"].as_array().unwrap().len(), 5);
        assert_eq!(doc["simple"], true);
        assert!(dir.path().join("out").join("poly.provenance.json").exists());
    }

    #[test]
    fn jam_writes_one_row_per_vertex_and_tick() {
        let dir = tempdir().unwrap();
        let scene = scene_args(Some(square_csv(dir.path())));
        let out = dir.path().join("frames.csv");
        jam(&scene, Direction::In, 3, 1.0, &out, 1).unwrap();
        let df = LazyCsvReader::new(&out)
            .with_has_header(true)
            .finish()
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(df.height(), 4 * 5);
        let areas = df.column("area").unwrap().f64().unwrap();
        let first = areas.get(0).unwrap();
        let last = areas.get(df.height() - 1).unwrap();
        assert!(last < first);
    }

    #[test]
    fn retries_give_up_after_attempts() {
        // Two points never triangulate, so every draw is rejected.
        let cfg = SceneCfg {
            num_points: 2,
            ..SceneCfg::default()
        };
        assert!(draw_with_retries(&cfg, 5, 3).is_err());
    }
}
