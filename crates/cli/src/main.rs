use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;

use clap::Parser;

use average_face_core::detection::domain::face_locator::{FaceLocator, LocatorFactory};
use average_face_core::detection::infrastructure::manifest_locator::ManifestLocator;
use average_face_core::detection::infrastructure::whole_image_locator::WholeImageLocator;
use average_face_core::imaging::infrastructure::image_discovery::discover_images;
use average_face_core::imaging::infrastructure::image_file_reader::ImageFileReader;
use average_face_core::imaging::infrastructure::image_file_writer::ImageFileWriter;
use average_face_core::pipeline::analyze_faces_use_case::{AnalysisOutcome, AnalyzeFacesUseCase};
use average_face_core::pipeline::face_collector::FaceCollector;
use average_face_core::pipeline::face_processor::FaceProcessor;
use average_face_core::pipeline::infrastructure::sequential_face_collector::SequentialFaceCollector;
use average_face_core::pipeline::infrastructure::threaded_face_collector::ThreadedFaceCollector;
use average_face_core::pipeline::pipeline_logger::BatchReportLogger;
use average_face_core::reporting::domain::report_writer::ReportWriter;
use average_face_core::reporting::infrastructure::directory_report_writer::DirectoryReportWriter;
use average_face_core::shared::config::{AnalysisConfig, ColorMode, Interpolation};
use average_face_core::shared::constants::IMAGE_EXTENSIONS;

/// Build the average face of a batch of images and rank every face by how
/// typical it is.
#[derive(Parser)]
#[command(name = "average-face")]
struct Cli {
    /// Directory of input images.
    input_dir: PathBuf,

    /// Directory for the average face, ranked faces and reports.
    output_dir: PathBuf,

    /// JSON config file (default: platform config dir, if present).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Canonical face size in pixels (square).
    #[arg(long)]
    size: Option<u32>,

    /// Intensity histogram bins (1-256).
    #[arg(long)]
    histogram_bins: Option<usize>,

    /// Gradient cell size in pixels; must divide the canonical size.
    #[arg(long)]
    cell_size: Option<usize>,

    /// Gradient orientation bins over 0-180 degrees.
    #[arg(long)]
    orientation_bins: Option<usize>,

    /// Resampling filter: nearest, triangle, catmull_rom, gaussian, lanczos3.
    #[arg(long)]
    interpolation: Option<Interpolation>,

    /// Keep face samples and the average face in grayscale.
    #[arg(long)]
    grayscale: bool,

    /// JSON file mapping image file names to face regions. Without it,
    /// every image is treated as a single pre-cropped face.
    #[arg(long)]
    manifest: Option<PathBuf>,

    /// Minimum face side in pixels.
    #[arg(long)]
    min_size: Option<u32>,

    /// Worker threads (1 = process on the main thread).
    #[arg(long)]
    workers: Option<usize>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let config = build_config(&cli)?;
    let paths = discover_images(&cli.input_dir)?;
    if paths.is_empty() {
        return Err(format!(
            "No images found in {} (supported: {})",
            cli.input_dir.display(),
            IMAGE_EXTENSIONS.join(", ")
        )
        .into());
    }
    log::info!("Found {} image(s) in {}", paths.len(), cli.input_dir.display());

    let processor = FaceProcessor::from_config(&config, Arc::new(ImageFileReader::new()))?;
    let locators = build_locators(cli.manifest.as_deref())?;
    let collector: Box<dyn FaceCollector> = if config.workers > 1 {
        Box::new(ThreadedFaceCollector::new(config.workers))
    } else {
        Box::new(SequentialFaceCollector::new())
    };

    let mut use_case = AnalyzeFacesUseCase::new(
        processor,
        locators,
        collector,
        Box::new(BatchReportLogger::default()),
    );
    let outcome = use_case.execute(&paths)?;

    let writer = DirectoryReportWriter::new(Box::new(ImageFileWriter::new()));
    writer.write(&outcome, &cli.output_dir)?;

    print_summary(&outcome, &cli.output_dir);
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input_dir.is_dir() {
        return Err(format!("Input directory not found: {}", cli.input_dir.display()).into());
    }
    if let Some(manifest) = &cli.manifest {
        if !manifest.is_file() {
            return Err(format!("Manifest not found: {}", manifest.display()).into());
        }
    }
    if cli.workers == Some(0) {
        return Err("--workers must be at least 1".into());
    }
    Ok(())
}

/// Config file first, then command-line overrides.
fn build_config(cli: &Cli) -> Result<AnalysisConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => AnalysisConfig::load(path)?,
        None => AnalysisConfig::load_default()?,
    };

    if let Some(size) = cli.size {
        config.canonical_width = size;
        config.canonical_height = size;
    }
    if let Some(bins) = cli.histogram_bins {
        config.features.histogram_bins = bins;
    }
    if let Some(cell) = cli.cell_size {
        config.features.cell_size = cell;
    }
    if let Some(bins) = cli.orientation_bins {
        config.features.orientation_bins = bins;
    }
    if let Some(interpolation) = cli.interpolation {
        config.interpolation = interpolation;
    }
    if cli.grayscale {
        config.color_mode = ColorMode::Grayscale;
    }
    if let Some(min_size) = cli.min_size {
        config.detection.min_size = min_size;
    }
    if let Some(workers) = cli.workers {
        config.workers = workers;
    }

    config.validate()?;
    Ok(config)
}

fn build_locators(manifest: Option<&Path>) -> Result<LocatorFactory, Box<dyn std::error::Error>> {
    match manifest {
        Some(path) => {
            let locator = ManifestLocator::load(path)?;
            log::info!("Loaded regions for {} image(s) from {}", locator.len(), path.display());
            Ok(Arc::new(move || Box::new(locator.clone()) as Box<dyn FaceLocator>))
        }
        None => Ok(Arc::new(|| Box::new(WholeImageLocator::new()) as Box<dyn FaceLocator>)),
    }
}

fn print_summary(outcome: &AnalysisOutcome, output_dir: &Path) {
    let stats = outcome.result_set.statistics();
    println!("{}", outcome.summary);
    println!("Mean similarity:  {:.4}", stats.mean);
    println!("Max similarity:   {:.4}", stats.max);
    println!("Min similarity:   {:.4}", stats.min);
    println!("Std deviation:    {:.4}", stats.std_dev);

    if let Some(best) = outcome.result_set.best() {
        println!(
            "Most typical face:  {} (face {}) - {:.4}",
            best.provenance.image_id, best.provenance.detection_index, best.score
        );
    }
    if let Some(worst) = outcome.result_set.worst() {
        println!(
            "Least typical face: {} (face {}) - {:.4}",
            worst.provenance.image_id, worst.provenance.detection_index, worst.score
        );
    }
    println!("Results saved to {}", output_dir.display());
}
