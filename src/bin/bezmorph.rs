use std::{
    fmt::Write as _,
    fs::File,
    io::{BufReader, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;
use bezmorph::{
    ArcPath, Ease, FrameIndex, HasGeometry, Linear, Morph, Node, PathFn, PathSettings, Point,
    ResolvedPath, shapes,
};
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bezmorph", version)]
struct Cli {
    /// Log alignment and cache activity to stderr.
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Morph one built-in shape into another and dump every frame.
    Morph(MorphArgs),
    /// Print structure and measurements of a built-in shape.
    Inspect(InspectArgs),
}

#[derive(Parser, Debug)]
struct MorphArgs {
    /// Start shape.
    #[arg(long, value_enum)]
    from: ShapeChoice,

    /// Target shape.
    #[arg(long, value_enum)]
    to: ShapeChoice,

    /// Number of frames, first and last included.
    #[arg(long, default_value_t = 30)]
    frames: u64,

    /// Rate function.
    #[arg(long, value_enum, default_value_t = EaseChoice::Linear)]
    ease: EaseChoice,

    /// How control points travel.
    #[arg(long, value_enum, default_value_t = PathChoice::Straight)]
    path: PathChoice,

    /// Output format.
    #[arg(long, value_enum, default_value_t = FormatChoice::Json)]
    format: FormatChoice,

    /// Output file; stdout when omitted.
    #[arg(long)]
    out: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct InspectArgs {
    /// Shape to inspect.
    #[arg(long, value_enum)]
    shape: ShapeChoice,

    /// Path sampling settings JSON; defaults when omitted.
    #[arg(long)]
    settings: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ShapeChoice {
    Square,
    Circle,
    Triangle,
    Hexagon,
    Line,
    Dot,
    Pair,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum EaseChoice {
    Linear,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    Smoothstep,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PathChoice {
    Straight,
    Clockwise,
    Counterclockwise,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FormatChoice {
    Json,
    Svg,
}

#[derive(serde::Serialize)]
struct FrameDump {
    frame: u64,
    alpha: f64,
    paths: Vec<ResolvedPath>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .init();

    match cli.cmd {
        Command::Morph(args) => cmd_morph(args),
        Command::Inspect(args) => cmd_inspect(args),
    }
}

fn build_shape(choice: ShapeChoice) -> anyhow::Result<Node> {
    let node = match choice {
        ShapeChoice::Square => shapes::square(2.0)?,
        ShapeChoice::Circle => shapes::circle(1.0)?,
        ShapeChoice::Triangle => shapes::regular_polygon(3, 1.0)?,
        ShapeChoice::Hexagon => shapes::regular_polygon(6, 1.0)?,
        ShapeChoice::Line => shapes::line(Point::xy(-1.0, 0.0), Point::xy(1.0, 0.0))?,
        ShapeChoice::Dot => shapes::dot(Point::ORIGIN),
        ShapeChoice::Pair => shapes::group([
            shapes::square(1.0)?.shifted(Point::xy(-1.0, 0.0)),
            shapes::square(1.0)?.shifted(Point::xy(1.0, 0.0)),
        ])?,
    };
    Ok(node)
}

fn ease_of(choice: EaseChoice) -> Ease {
    match choice {
        EaseChoice::Linear => Ease::Linear,
        EaseChoice::InQuad => Ease::InQuad,
        EaseChoice::OutQuad => Ease::OutQuad,
        EaseChoice::InOutQuad => Ease::InOutQuad,
        EaseChoice::InCubic => Ease::InCubic,
        EaseChoice::OutCubic => Ease::OutCubic,
        EaseChoice::InOutCubic => Ease::InOutCubic,
        EaseChoice::Smoothstep => Ease::Smoothstep,
    }
}

fn cmd_morph(args: MorphArgs) -> anyhow::Result<()> {
    let start = build_shape(args.from)?;
    let target = build_shape(args.to)?;
    let morph = Morph::new(start, target, args.frames)
        .context("configure morph")?
        .with_ease(ease_of(args.ease));

    let dumps = match args.path {
        PathChoice::Straight => run_frames(morph.with_path_fn(Linear))?,
        PathChoice::Clockwise => run_frames(morph.with_path_fn(ArcPath::clockwise()))?,
        PathChoice::Counterclockwise => {
            run_frames(morph.with_path_fn(ArcPath::counterclockwise()))?
        }
    };

    let text = match args.format {
        FormatChoice::Json => serde_json::to_string_pretty(&dumps).context("encode frames")?,
        FormatChoice::Svg => render_svg(&dumps)?,
    };
    write_output(args.out.as_deref(), &text)
}

fn run_frames<P: PathFn>(mut morph: Morph<P>) -> anyhow::Result<Vec<FrameDump>> {
    (0..morph.frames())
        .map(|f| -> anyhow::Result<FrameDump> {
            let frame = FrameIndex(f);
            let alpha = morph.alpha_at(frame)?;
            let node = morph
                .frame(alpha)
                .with_context(|| format!("interpolate frame {f}"))?;
            Ok(FrameDump {
                frame: f,
                alpha,
                paths: node.resolve().paths,
            })
        })
        .collect()
}

fn render_svg(dumps: &[FrameDump]) -> anyhow::Result<String> {
    let mut out = String::new();
    writeln!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-4 -4 8 8">"#
    )?;
    for dump in dumps {
        writeln!(
            out,
            r#"  <g id="frame-{}" data-alpha="{}" transform="scale(1,-1)">"#,
            dump.frame, dump.alpha
        )?;
        for p in &dump.paths {
            let [sr, sg, sb, sa] = p.style.stroke.to_rgba8(p.style.stroke_opacity);
            let [fr, fg, fb, fa] = p.style.fill.to_rgba8(p.style.fill_opacity);
            writeln!(
                out,
                r#"    <path d="{}" fill="rgb({fr},{fg},{fb})" fill-opacity="{:.3}" stroke="rgb({sr},{sg},{sb})" stroke-opacity="{:.3}" stroke-width="{}"/>"#,
                p.to_svg(),
                f64::from(fa) / 255.0,
                f64::from(sa) / 255.0,
                p.style.stroke_width / 100.0,
            )?;
        }
        writeln!(out, "  </g>")?;
    }
    writeln!(out, "</svg>")?;
    Ok(out)
}

fn write_output(path: Option<&Path>, text: &str) -> anyhow::Result<()> {
    let Some(path) = path else {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(text.as_bytes()).context("write stdout")?;
        return Ok(());
    };
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))?;
    eprintln!("wrote {}", path.display());
    Ok(())
}

fn read_settings(path: &Path) -> anyhow::Result<PathSettings> {
    let f = File::open(path).with_context(|| format!("open settings '{}'", path.display()))?;
    let settings: PathSettings =
        serde_json::from_reader(BufReader::new(f)).with_context(|| "parse settings JSON")?;
    settings.validate()?;
    Ok(settings)
}

fn cmd_inspect(args: InspectArgs) -> anyhow::Result<()> {
    let settings = match &args.settings {
        Some(path) => read_settings(path)?,
        None => PathSettings::default(),
    };
    let node = build_shape(args.shape)?;

    let mut report = Vec::new();
    for (i, n) in node.family().enumerate() {
        let Some(g) = n.geometry() else {
            continue;
        };
        let orientations: Vec<String> = (0..g.subpath_count())
            .map(|s| match g.orientation(s) {
                Ok(o) => format!("{o:?}"),
                Err(_) => "undefined".to_string(),
            })
            .collect();
        report.push(serde_json::json!({
            "node": i,
            "structure": g.structure(),
            "arc_length": g.arc_length_with(&settings)?,
            "orientation": orientations,
            "bounds": g.bounds(),
        }));
    }
    println!(
        "{}",
        serde_json::to_string_pretty(&report).context("encode report")?
    );
    Ok(())
}
