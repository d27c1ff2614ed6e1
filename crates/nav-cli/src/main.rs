//! `nav` - bake navigation meshes from JSON scenes and run path queries.
//!
//! - `nav bake <scene>` - bake the scene, print mesh statistics
//! - `nav path <scene> --from x,y --to x,y` - query a smoothed path
//! - `nav example` - print a starter scene

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing_subscriber::{fmt, EnvFilter};

use nav_mesh::{BakeConfig, NavMesh, Obstacle, Vec2};

#[derive(Parser)]
#[command(name = "nav")]
#[command(about = "Navigation-mesh baking and path queries", version)]
struct Cli {
    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Bake a scene and print mesh statistics
    Bake {
        /// Scene file (JSON)
        scene: PathBuf,
    },

    /// Find a path between two positions in a scene
    Path {
        /// Scene file (JSON)
        scene: PathBuf,

        /// Start position as "x,y"
        #[arg(long)]
        from: String,

        /// Goal position as "x,y"
        #[arg(long)]
        to: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,

        /// Print the unsmoothed node path instead of the funneled one
        #[arg(long)]
        raw: bool,
    },

    /// Print an example scene to stdout
    Example,
}

#[derive(Debug, Serialize, Deserialize)]
struct Scene {
    contour: Vec<Vec2>,
    #[serde(default)]
    obstacles: Vec<ObstacleSpec>,
    #[serde(default)]
    config: BakeConfig,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum ObstacleSpec {
    Rect { center: Vec2, half_extents: Vec2 },
    Convex { points: Vec<Vec2> },
}

impl ObstacleSpec {
    fn to_obstacle(&self) -> Obstacle {
        match self {
            Self::Rect {
                center,
                half_extents,
            } => Obstacle::rect(*center, *half_extents),
            Self::Convex { points } => Obstacle::convex(points.clone()),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };
    fmt().with_env_filter(filter).with_target(false).init();

    match cli.command {
        Commands::Bake { scene } => bake_scene(&scene),
        Commands::Path {
            scene,
            from,
            to,
            json,
            raw,
        } => query_path(&scene, &from, &to, json, raw),
        Commands::Example => print_example(),
    }
}

fn load_scene(path: &Path) -> Result<(Scene, NavMesh)> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading scene {}", path.display()))?;
    let scene: Scene = serde_json::from_str(&text)
        .with_context(|| format!("parsing scene {}", path.display()))?;

    let obstacles: Vec<Obstacle> = scene.obstacles.iter().map(ObstacleSpec::to_obstacle).collect();
    let mesh = NavMesh::bake(&scene.contour, &obstacles, &scene.config)
        .context("baking navigation mesh")?;
    Ok((scene, mesh))
}

fn bake_scene(path: &Path) -> Result<()> {
    let (scene, mesh) = load_scene(path)?;

    println!("scene: {}", path.display());
    println!("  obstacles:    {}", scene.obstacles.len());
    println!("  agent radius: {}", scene.config.agent_radius);
    println!("  triangles:    {}", mesh.polygon().triangles().len());
    println!("  lines:        {}", mesh.polygon().lines().len());
    println!("  nodes:        {}", mesh.graph().live_node_count());
    println!("  connections:  {}", mesh.graph().connection_count());
    match mesh.goal_bounds() {
        Some(bounds) => println!("  goal boxes:   {}", bounds.box_count()),
        None => println!("  goal boxes:   (not baked)"),
    }
    Ok(())
}

fn query_path(path: &Path, from: &str, to: &str, json: bool, raw: bool) -> Result<()> {
    let (_, mesh) = load_scene(path)?;
    let start = parse_position(from)?;
    let goal = parse_position(to)?;
    tracing::debug!(?start, ?goal, raw, "running path query");

    let result = if raw {
        mesh.find_node_path(start, goal)
    } else {
        mesh.find_path(start, goal)
    };

    if json {
        println!("{}", serde_json::to_string(&result)?);
        return Ok(());
    }

    if result.is_empty() {
        println!("no path from {from} to {to}");
        return Ok(());
    }
    for point in &result.points {
        println!("{:.3}, {:.3}", point.x, point.y);
    }
    Ok(())
}

fn parse_position(text: &str) -> Result<Vec2> {
    let Some((x, y)) = text.split_once(',') else {
        bail!("expected \"x,y\", got {text:?}");
    };
    let x: f32 = x.trim().parse().with_context(|| format!("bad x in {text:?}"))?;
    let y: f32 = y.trim().parse().with_context(|| format!("bad y in {text:?}"))?;
    Ok(Vec2::new(x, y))
}

fn print_example() -> Result<()> {
    // A walled arena with a few long obstacles to route around.
    let scene = Scene {
        contour: vec![
            Vec2::new(-60.0, -30.0),
            Vec2::new(60.0, -30.0),
            Vec2::new(60.0, 30.0),
            Vec2::new(-60.0, 30.0),
        ],
        obstacles: vec![
            ObstacleSpec::Rect {
                center: Vec2::new(15.0, 10.0),
                half_extents: Vec2::new(7.0, 0.5),
            },
            ObstacleSpec::Rect {
                center: Vec2::new(-25.0, 10.0),
                half_extents: Vec2::new(7.0, 0.5),
            },
            ObstacleSpec::Rect {
                center: Vec2::new(-13.0, -8.0),
                half_extents: Vec2::new(15.0, 1.0),
            },
            ObstacleSpec::Rect {
                center: Vec2::new(15.0, -21.0),
                half_extents: Vec2::new(7.0, 0.5),
            },
        ],
        config: BakeConfig {
            agent_radius: 1.0,
            goal_bounds: true,
        },
    };

    println!("{}", serde_json::to_string_pretty(&scene)?);
    Ok(())
}
