use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use faceaudit_core::{resolve_key_face, review_tiles, FaceQuality, PersonRecord, ReviewTile};
use faceaudit_library::{
    render_face_preview, LibraryProvider, MarkerStyle, SnapshotLibrary, ViewerLauncher,
};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod config;

use config::Config;

#[derive(Parser)]
#[command(name = "faceaudit", version, about = "Audit unidentified people in a photo library")]
struct Cli {
    /// Library snapshot to read (overrides config)
    #[arg(long, global = true)]
    library: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the unidentified people most worth reviewing
    Candidates {
        /// Number of people to list
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Render each candidate's key face with its marker
    Preview {
        /// Output directory for the rendered PNGs
        #[arg(short, long)]
        out: PathBuf,
        /// Number of people to render
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Render the faces of one person
    Person {
        /// Person ID
        id: String,
        /// Output directory for the rendered PNGs
        #[arg(short, long)]
        out: PathBuf,
        /// Number of faces to render
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Open a person's key photo in the external viewer
    Open {
        /// Person ID
        id: String,
    },
}

#[derive(Serialize)]
struct CandidateRow<'a> {
    id: &'a str,
    face_count: u32,
    key_face: Option<&'a str>,
    key_photo: Option<&'a Path>,
    quality: FaceQuality,
    error: Option<String>,
}

impl<'a> From<&ReviewTile<'a>> for CandidateRow<'a> {
    fn from(tile: &ReviewTile<'a>) -> Self {
        Self {
            id: tile.person.id.as_str(),
            face_count: tile.person.face_count,
            key_face: tile.key_face.as_ref().ok().copied().map(|f| f.id.as_str()),
            key_photo: tile.person.key_photo.as_ref().map(|p| p.path.as_path()),
            quality: tile.quality,
            error: tile.key_face.as_ref().err().map(ToString::to_string),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let mut cfg = Config::load()?;
    if let Some(library) = cli.library {
        cfg.library_path = library;
    }

    // Reloaded on every run: the library may re-tag faces after a correction.
    let library = SnapshotLibrary::open(&cfg.library_path);
    let persons = library
        .persons()
        .with_context(|| format!("loading library {}", cfg.library_path.display()))?;

    match cli.command {
        Commands::Candidates { limit, json } => {
            candidates(&persons, limit.unwrap_or(cfg.review_limit), json)
        }
        Commands::Preview { out, limit } => {
            preview(&cfg, &persons, &out, limit.unwrap_or(cfg.review_limit))
        }
        Commands::Person { id, out, limit } => {
            person_sheet(&cfg, &persons, &id, &out, limit.unwrap_or(cfg.face_sheet_limit))
        }
        Commands::Open { id } => open_key_photo(&cfg, &persons, &id),
    }
}

fn candidates(persons: &[PersonRecord], limit: usize, json: bool) -> Result<()> {
    let tiles = review_tiles(persons, limit);
    let rows: Vec<CandidateRow> = tiles.iter().map(CandidateRow::from).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    if rows.is_empty() {
        println!("No unidentified people to review");
        return Ok(());
    }

    println!("{:<24} {:>6}  {:<16} {}", "PERSON", "FACES", "KEY FACE", "NOTE");
    for row in &rows {
        let note = match (&row.error, row.quality) {
            (Some(err), _) => err.clone(),
            (None, FaceQuality::Unscored) => "unscored faces".to_string(),
            (None, FaceQuality::Scored) => String::new(),
        };
        println!(
            "{:<24} {:>6}  {:<16} {}",
            row.id,
            row.face_count,
            row.key_face.unwrap_or("-"),
            note
        );
    }
    Ok(())
}

fn marker_style(cfg: &Config) -> MarkerStyle {
    MarkerStyle {
        stroke_width: cfg.marker_width,
        ..MarkerStyle::default()
    }
}

fn preview(cfg: &Config, persons: &[PersonRecord], out: &Path, limit: usize) -> Result<()> {
    std::fs::create_dir_all(out)
        .with_context(|| format!("creating output directory {}", out.display()))?;
    let style = marker_style(cfg);

    let mut rendered = 0usize;
    for tile in review_tiles(persons, limit) {
        let person = tile.person.id.as_str();
        let face = match &tile.key_face {
            Ok(face) => *face,
            Err(e) => {
                tracing::warn!(person, error = %e, "skipping person with broken key face");
                continue;
            }
        };
        if tile.quality == FaceQuality::Unscored {
            tracing::warn!(person, "skipping person with only unscored faces");
            continue;
        }
        // Eligible persons always carry a key photo.
        let Some(photo) = tile.person.key_photo.as_ref() else {
            continue;
        };

        match render_face_preview(photo, face, &style, cfg.thumbnail_size) {
            Ok(img) => {
                let path = out.join(format!("{}.png", file_stem(person)));
                img.save(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                tracing::info!(person, path = %path.display(), "rendered key face");
                rendered += 1;
            }
            Err(e) => tracing::warn!(person, error = %e, "failed to render key face"),
        }
    }

    println!("Rendered {rendered} preview(s) to {}", out.display());
    Ok(())
}

/// Library id made safe to use as a file name inside the output directory.
fn file_stem(id: &str) -> String {
    let stem: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
        .collect();
    if stem.is_empty() {
        "_".to_string()
    } else {
        stem
    }
}

fn find_person<'a>(persons: &'a [PersonRecord], id: &str) -> Result<&'a PersonRecord> {
    persons
        .iter()
        .find(|p| p.id.as_str() == id)
        .with_context(|| format!("no person with id {id}"))
}

fn person_sheet(
    cfg: &Config,
    persons: &[PersonRecord],
    id: &str,
    out: &Path,
    limit: usize,
) -> Result<()> {
    let person = find_person(persons, id)?;
    std::fs::create_dir_all(out)
        .with_context(|| format!("creating output directory {}", out.display()))?;
    let style = marker_style(cfg);

    tracing::info!(person = id, name = %person.name, faces = person.faces.len(), "rendering face sheet");

    let mut rendered = 0usize;
    for (idx, face) in person.preview_faces(limit).enumerate() {
        if face.is_unscored() {
            tracing::warn!(person = id, face = %face.id, "skipping unscored face");
            continue;
        }
        match render_face_preview(&face.photo, face, &style, cfg.thumbnail_size) {
            Ok(img) => {
                // Index prefix keeps library order in directory listings.
                let path = out.join(format!("{idx:02}-{}.png", file_stem(face.id.as_str())));
                img.save(&path)
                    .with_context(|| format!("writing {}", path.display()))?;
                rendered += 1;
            }
            Err(e) => tracing::warn!(person = id, face = %face.id, error = %e, "failed to render face"),
        }
    }

    println!("Rendered {rendered} face(s) of {id} to {}", out.display());
    Ok(())
}

fn open_key_photo(cfg: &Config, persons: &[PersonRecord], id: &str) -> Result<()> {
    let person = find_person(persons, id)?;
    let photo = person
        .key_photo
        .as_ref()
        .with_context(|| format!("person {id} has no key photo"))?;

    if let Err(e) = resolve_key_face(person) {
        tracing::warn!(person = id, error = %e, "key face missing, opening key photo anyway");
    }

    let launcher = ViewerLauncher::new(cfg.viewer.clone(), cfg.viewer_args.clone());
    match launcher.open(&photo.path) {
        Ok(_) => println!("Opened {} with {}", photo.path.display(), launcher.program()),
        Err(e) => {
            tracing::error!(person = id, error = %e, "failed to launch viewer");
            eprintln!("Could not open {}: {e}", photo.path.display());
        }
    }
    Ok(())
}
