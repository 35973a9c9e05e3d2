//! seismo CLI - cross sections and shape selection for seismic catalogs
//!
//! Every command reads a JSON catalog and writes JSON to stdout or to the
//! file given with `--output`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;

use seismo::section::SectionFrame;
use seismo::{
    cross_sections, exclude_close_timed_events, select_on_map, select_on_section, Catalog, Event,
    MapSelection, ProjectionSettings, SectionRecord, SectionSelection, SectionSettings, ShapeKind,
    ShapeSize,
};

#[derive(Parser)]
#[command(name = "seismo")]
#[command(about = "Seismic cross sections and event selection", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Project event locations to UTM coordinates
    Project {
        /// Input JSON catalog
        catalog: PathBuf,
        #[command(flatten)]
        projection: ProjectionArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Cut the catalog into parallel cross sections
    Sections {
        /// Input JSON catalog
        catalog: PathBuf,
        #[command(flatten)]
        sections: SectionArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Select events inside a shape on the map
    SelectMap {
        /// Input JSON catalog
        catalog: PathBuf,
        /// TOML file with center, shape, size, rotation and projection
        #[arg(short, long)]
        config: Option<PathBuf>,
        #[command(flatten)]
        shape: ShapeArgs,
        #[command(flatten)]
        projection: ProjectionArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Select events inside a shape drawn on one cross section
    SelectSection {
        /// Input JSON catalog
        catalog: PathBuf,
        #[command(flatten)]
        sections: SectionArgs,
        /// Index of the section, 0 = leftmost
        #[arg(long)]
        index: usize,
        /// TOML file with center [on_section, depth], shape, size and rotation
        #[arg(long)]
        selection: Option<PathBuf>,
        #[command(flatten)]
        shape: ShapeArgs,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Remove events that follow each other too closely in time
    Decluster {
        /// Input JSON catalog
        catalog: PathBuf,
        /// Seconds of quiet required after each kept event
        #[arg(long)]
        window_length: f64,
        /// Pairs closer than this many seconds are both dropped
        #[arg(long, default_value_t = 0.0)]
        min_interval: f64,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Projection overrides.
#[derive(Args)]
struct ProjectionArgs {
    /// UTM zone (1-60)
    #[arg(long)]
    zone: Option<u8>,
    /// Planar unit: m or km
    #[arg(long)]
    units: Option<String>,
    /// Ellipsoid (WGS84, GRS80, intl, clrk66, bessel)
    #[arg(long)]
    ellipsoid: Option<String>,
    /// Datum (WGS84, NAD83, ETRS89, NAD27, potsdam)
    #[arg(long)]
    datum: Option<String>,
}

impl ProjectionArgs {
    fn apply(&self, settings: &mut ProjectionSettings) {
        if let Some(zone) = self.zone {
            settings.zone = i64::from(zone);
        }
        if let Some(units) = &self.units {
            settings.units = units.clone();
        }
        if let Some(ellipsoid) = &self.ellipsoid {
            settings.ellipsoid = ellipsoid.clone();
        }
        if let Some(datum) = &self.datum {
            settings.datum = datum.clone();
        }
    }
}

/// Section family settings: a TOML file, overridden by flags.
#[derive(Args)]
struct SectionArgs {
    /// TOML file with section settings
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Family center as lon,lat
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    center: Option<Vec<f64>>,
    /// Strike in degrees clockwise from north
    #[arg(long, allow_negative_numbers = true)]
    strike: Option<f64>,
    /// Sections left and right of the central one, as left,right
    #[arg(long, value_delimiter = ',')]
    num_sections: Option<Vec<usize>>,
    /// Distance between sections
    #[arg(long)]
    spacing: Option<f64>,
    /// Maximum event distance from a section plane
    #[arg(long)]
    max_distance: Option<f64>,
    /// Half length of each section
    #[arg(long)]
    half_length: Option<f64>,
    /// Depth window as min,max (positive down)
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    depth_range: Option<Vec<f64>>,
    #[command(flatten)]
    projection: ProjectionArgs,
}

impl SectionArgs {
    fn settings(&self) -> Result<SectionSettings> {
        let mut settings = match &self.config {
            Some(path) => SectionSettings::load(path)
                .with_context(|| format!("reading section settings from {}", path.display()))?,
            None => SectionSettings::default(),
        };
        if let Some(center) = &self.center {
            settings.center = pair(center)?;
        }
        if let Some(strike) = self.strike {
            settings.strike = strike;
        }
        if let Some(num) = &self.num_sections {
            settings.num_sections = pair(num)?;
        }
        if let Some(spacing) = self.spacing {
            settings.spacing = spacing;
        }
        if let Some(max_distance) = self.max_distance {
            settings.max_distance = max_distance;
        }
        if let Some(half_length) = self.half_length {
            settings.half_length = half_length;
        }
        if let Some(range) = &self.depth_range {
            settings.depth_range = pair(range)?;
        }
        self.projection.apply(&mut settings.projection);
        settings.validate()?;
        Ok(settings)
    }
}

/// Shape overrides.
#[derive(Args)]
struct ShapeArgs {
    /// Shape center: lon,lat on the map, on_section,depth on a section
    #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
    shape_center: Option<Vec<f64>>,
    /// Shape kind: circle, oval or rectangle
    #[arg(long)]
    shape: Option<ShapeKind>,
    /// Radius, or two extents as a,b (semi-axes, or width,height)
    #[arg(long, value_delimiter = ',')]
    size: Option<Vec<f64>>,
    /// Counter-clockwise rotation in degrees
    #[arg(long, allow_negative_numbers = true)]
    rotation: Option<f64>,
}

impl ShapeArgs {
    fn size(&self) -> Result<Option<ShapeSize>> {
        Ok(match self.size.as_deref() {
            None => None,
            Some([r]) => Some(ShapeSize::Radius(*r)),
            Some([a, b]) => Some(ShapeSize::SemiAxes(*a, *b)),
            Some(other) => bail!("--size takes one or two values, got {}", other.len()),
        })
    }

    fn map_selection(&self, config: Option<&Path>, projection: &ProjectionArgs) -> Result<MapSelection> {
        let mut selection = match config {
            Some(path) => MapSelection::load(path)
                .with_context(|| format!("reading map selection from {}", path.display()))?,
            None => MapSelection {
                center: pair(self.shape_center.as_deref().context("--shape-center is required")?)?,
                shape: self.shape.context("--shape is required")?.to_string(),
                size: self.size()?.context("--size is required")?,
                rotation: 0.0,
                projection: ProjectionSettings::default(),
            },
        };
        if let Some(center) = &self.shape_center {
            selection.center = pair(center)?;
        }
        if let Some(shape) = self.shape {
            selection.shape = shape.to_string();
        }
        if let Some(size) = self.size()? {
            selection.size = size;
        }
        if let Some(rotation) = self.rotation {
            selection.rotation = rotation;
        }
        projection.apply(&mut selection.projection);
        selection.validate()?;
        Ok(selection)
    }

    fn section_selection(&self, config: Option<&Path>) -> Result<SectionSelection> {
        let mut selection = match config {
            Some(path) => SectionSelection::load(path)
                .with_context(|| format!("reading section selection from {}", path.display()))?,
            None => SectionSelection {
                center: pair(self.shape_center.as_deref().context("--shape-center is required")?)?,
                shape: self.shape.context("--shape is required")?.to_string(),
                size: self.size()?.context("--size is required")?,
                rotation: 0.0,
            },
        };
        if let Some(center) = &self.shape_center {
            selection.center = pair(center)?;
        }
        if let Some(shape) = self.shape {
            selection.shape = shape.to_string();
        }
        if let Some(size) = self.size()? {
            selection.size = size;
        }
        if let Some(rotation) = self.rotation {
            selection.rotation = rotation;
        }
        selection.validate()?;
        Ok(selection)
    }
}

fn pair<T: Copy>(values: &[T]) -> Result<[T; 2]> {
    match values {
        [a, b] => Ok([*a, *b]),
        _ => bail!("expected two comma-separated values, got {}", values.len()),
    }
}

#[derive(Serialize)]
struct ProjectedEvent<'a> {
    #[serde(flatten)]
    event: &'a Event,
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct SectionOutput<'a> {
    index: usize,
    offset: f64,
    frame: &'a SectionFrame,
    events: Vec<SectionRecord<'a>>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Project {
            catalog,
            projection,
            output,
        } => {
            project_catalog(&catalog, &projection, output.as_deref())?;
        }
        Commands::Sections {
            catalog,
            sections,
            output,
        } => {
            write_sections(&catalog, &sections, output.as_deref())?;
        }
        Commands::SelectMap {
            catalog,
            config,
            shape,
            projection,
            output,
        } => {
            let events = Catalog::load(&catalog)?;
            let selection = shape.map_selection(config.as_deref(), &projection)?;
            let picked = select_on_map(&events, &selection)?;
            write_json(&picked.catalog, output.as_deref())?;
        }
        Commands::SelectSection {
            catalog,
            sections,
            index,
            selection,
            shape,
            output,
        } => {
            let events = Catalog::load(&catalog)?;
            let settings = sections.settings()?;
            let cut = cross_sections(&events, &settings)?;
            let Some(section) = cut.get(index) else {
                bail!("section {index} does not exist, {} sections were cut", cut.len());
            };
            let selection = shape.section_selection(selection.as_deref())?;
            let picked = select_on_section(section, &selection)?;
            write_json(&picked.catalog, output.as_deref())?;
        }
        Commands::Decluster {
            catalog,
            window_length,
            min_interval,
            output,
        } => {
            let events = Catalog::load(&catalog)?;
            let kept = exclude_close_timed_events(&events, window_length, min_interval)?;
            write_json(&kept, output.as_deref())?;
        }
    }

    Ok(())
}

fn project_catalog(input: &Path, args: &ProjectionArgs, output: Option<&Path>) -> Result<()> {
    if args.zone.is_none() {
        bail!("--zone is required");
    }
    let catalog = Catalog::load(input)?;
    let mut settings = ProjectionSettings::default();
    args.apply(&mut settings);

    let projector = settings.projector()?;
    let planar = projector.project(&catalog.lons(), &catalog.lats())?;
    let projected: Vec<ProjectedEvent<'_>> = catalog
        .iter()
        .zip(planar.x.iter().zip(&planar.y))
        .map(|(event, (&x, &y))| ProjectedEvent { event, x, y })
        .collect();

    log::info!("projected {} events into {}", projected.len(), planar.crs);
    write_json(&projected, output)
}

fn write_sections(input: &Path, args: &SectionArgs, output: Option<&Path>) -> Result<()> {
    let catalog = Catalog::load(input)?;
    let settings = args.settings()?;
    let sections = cross_sections(&catalog, &settings)?;

    let out: Vec<SectionOutput<'_>> = sections
        .iter()
        .map(|section| SectionOutput {
            index: section.frame.index,
            offset: section.frame.offset,
            frame: &section.frame,
            events: section.records(),
        })
        .collect();
    write_json(&out, output)
}

fn write_json<T: Serialize + ?Sized>(value: &T, output: Option<&Path>) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match output {
        Some(path) => {
            fs::write(path, json)
                .with_context(|| format!("writing {}", path.display()))?;
            log::info!("wrote {}", path.display());
        }
        None => println!("{json}"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_section_flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "seismo",
            "sections",
            "events.json",
            "--center=-70.5,-33.4",
            "--strike",
            "-20",
            "--num-sections",
            "2,3",
            "--depth-range",
            "0,15",
            "--zone",
            "19",
        ])
        .unwrap();
        let Commands::Sections { sections, .. } = cli.command else {
            panic!("expected the sections command");
        };
        let settings = sections.settings().unwrap();
        assert_eq!(settings.center, [-70.5, -33.4]);
        assert_eq!(settings.strike, -20.0);
        assert_eq!(settings.num_sections, [2, 3]);
        assert_eq!(settings.depth_range, [0.0, 15.0]);
        assert_eq!(settings.projection.zone, 19);
        assert_eq!(settings.spacing, 1.0);
    }

    #[test]
    fn test_shape_flags() {
        let cli = Cli::try_parse_from([
            "seismo",
            "select-map",
            "events.json",
            "--shape-center",
            "13.1,42.8",
            "--shape",
            "rectangle",
            "--size",
            "4,2",
            "--rotation",
            "30",
            "--zone",
            "33",
        ])
        .unwrap();
        let Commands::SelectMap {
            config,
            shape,
            projection,
            ..
        } = cli.command
        else {
            panic!("expected the select-map command");
        };
        let selection = shape.map_selection(config.as_deref(), &projection).unwrap();
        assert_eq!(selection.shape, "rectangle");
        assert_eq!(selection.size, ShapeSize::SemiAxes(4.0, 2.0));
        assert_eq!(selection.rotation, 30.0);
        assert_eq!(selection.projection.zone, 33);
    }

    #[test]
    fn test_shape_flags_are_required_without_config() {
        let cli = Cli::try_parse_from(["seismo", "select-map", "events.json", "--shape", "circle"])
            .unwrap();
        let Commands::SelectMap {
            config,
            shape,
            projection,
            ..
        } = cli.command
        else {
            panic!("expected the select-map command");
        };
        assert!(shape.map_selection(config.as_deref(), &projection).is_err());
    }

    #[test]
    fn test_pair() {
        assert_eq!(pair(&[1, 2]).unwrap(), [1, 2]);
        assert!(pair(&[1.0]).is_err());
        assert!(pair::<f64>(&[]).is_err());
    }
}
