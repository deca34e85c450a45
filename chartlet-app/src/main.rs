use anyhow::Context;
use chartlet::prelude::*;
use clap::Parser;
use std::path::PathBuf;

/// Builds chart layers from a coordinate file or georeferenced image and
/// prints what ends up on the map
#[derive(Parser, Debug)]
#[command(name = "chartlet-app", version, about)]
struct Args {
    /// Coordinate file, or image named `{swLat}_{swLng}_{neLat}_{neLng}.{ext}`
    file: PathBuf,

    /// Build an image overlay from the filename bounds
    #[arg(long)]
    overlay: bool,

    /// Build a marker per coordinate
    #[arg(long)]
    markers: bool,

    /// Build a polygon through the coordinates
    #[arg(long)]
    polygon: bool,

    /// Build a distance-labelled polyline through the coordinates
    #[arg(long)]
    polyline: bool,

    /// Map options as JSON
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave the built layers hidden
    #[arg(long)]
    hidden: bool,
}

impl Args {
    fn request(&self) -> UploadRequest {
        let request = UploadRequest {
            overlay: self.overlay,
            markers: self.markers,
            polygon: self.polygon,
            polyline: self.polyline,
        };
        if request == UploadRequest::default() {
            UploadRequest::all()
        } else {
            request
        }
    }
}

fn load_options(path: Option<&PathBuf>) -> anyhow::Result<MapOptions> {
    match path {
        Some(path) => {
            let json = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            MapOptions::from_json(&json).with_context(|| format!("parsing {}", path.display()))
        }
        None => Ok(MapOptions::default()),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    chartlet::init_logging();
    let args = Args::parse();

    let options = load_options(args.config.as_ref())?;
    let mut controller: MapController<HeadlessEngine> = MapController::new(options);
    let engine = controller.initialize().context("mounting headless map")?;
    log::info!(
        "mounted in '{}' at ({:.4}, {:.4}) z{}",
        engine.container(),
        engine.center().lat,
        engine.center().lng,
        engine.zoom()
    );

    let file = CoordinateFile::load(&args.file).await;
    log::info!(
        "{}: {} points, bounds {}",
        file.name(),
        file.points().len(),
        if file.bounds().is_some() { "yes" } else { "no" }
    );

    let created = controller.apply_upload(&file, &args.request());
    if created.is_empty() {
        log::warn!("nothing could be built from {}", args.file.display());
    }
    if !args.hidden {
        for id in &created {
            controller.toggle_from_map(*id);
        }
    }

    println!("{}", serde_json::to_string_pretty(&controller.layer_summaries())?);
    if let Some(fit) = controller.engine().and_then(|engine| engine.last_fit()) {
        let center = fit.center();
        println!("view centered on ({:.5}, {:.5})", center.lat, center.lng);
    }

    controller.teardown();
    Ok(())
}
