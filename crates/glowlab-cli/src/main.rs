use clap::{Parser, Subcommand};
use glowlab_cli::{build_parameters, parse_format, parse_resolution};
use glowlab_core::models::{ExportFormat, ExportResolution, GlowParameters, ALL_STYLES};
use glowlab_core::{GlowPreset, GlowRenderer};
use rayon::prelude::*;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Parser)]
#[command(name = "glowlab")]
#[command(version, about = "Glow photo effect renderer", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply the glow effect to a photo and export the result
    Apply {
        /// Input image (PNG or JPEG)
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Glow style (e.g. soft-bloom, golden-hour-glow)
        #[arg(short, long, value_name = "STYLE")]
        style: Option<String>,

        /// Preset file to load parameters from
        #[arg(short, long, value_name = "FILE")]
        preset: Option<PathBuf>,

        /// Parameter overrides (key=value, repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Export format (jpeg or png)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// Export resolution cap (original, 2048, or 1080)
        #[arg(long, value_name = "RES")]
        resolution: Option<String>,

        /// JPEG quality (0.0-1.0)
        #[arg(long, value_name = "FLOAT")]
        quality: Option<f32>,

        /// Render a preview capped at this size instead of full resolution
        #[arg(long, value_name = "PX")]
        preview: Option<u32>,

        /// Directory with LightLeak1.png .. LightLeak8.png overlay textures
        #[arg(long, value_name = "DIR")]
        leak_dir: Option<PathBuf>,

        /// Enable debug output showing per-stage statistics
        #[arg(long)]
        debug: bool,
    },

    /// Batch process multiple photos with shared settings
    Batch {
        /// Input files
        #[arg(value_name = "INPUTS")]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Glow style
        #[arg(short, long, value_name = "STYLE")]
        style: Option<String>,

        /// Preset file to load parameters from
        #[arg(short, long, value_name = "FILE")]
        preset: Option<PathBuf>,

        /// Parameter overrides (key=value, repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,

        /// Export format (jpeg or png)
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// Export resolution cap (original, 2048, or 1080)
        #[arg(long, value_name = "RES")]
        resolution: Option<String>,

        /// Number of parallel threads
        #[arg(short = 'j', long, value_name = "N")]
        threads: Option<usize>,
    },

    /// Manage named presets
    Preset {
        #[command(subcommand)]
        action: PresetAction,
    },

    /// List the available glow styles and their defaults
    Styles,

    /// Show recent exports
    History {
        /// Number of entries to show
        #[arg(short, long, value_name = "N", default_value = "10")]
        limit: usize,
    },
}

#[derive(Subcommand)]
enum PresetAction {
    /// List available presets (built-in and saved)
    List {
        /// Directory to list presets from
        #[arg(short, long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Show details of a preset
    Show {
        /// Preset name or file path
        preset: String,
    },

    /// Save a new preset
    Save {
        /// Preset name
        name: String,

        /// Glow style the preset starts from
        #[arg(short, long, value_name = "STYLE")]
        style: Option<String>,

        /// Parameter overrides (key=value, repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },

    /// Delete a saved preset
    Delete {
        /// Preset name
        name: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Apply {
            input,
            out,
            style,
            preset,
            set,
            format,
            resolution,
            quality,
            preview,
            leak_dir,
            debug,
        } => cmd_apply(
            input, out, style, preset, set, format, resolution, quality, preview, leak_dir, debug,
        ),

        Commands::Batch {
            inputs,
            out,
            style,
            preset,
            set,
            format,
            resolution,
            threads,
        } => cmd_batch(inputs, out, style, preset, set, format, resolution, threads),

        Commands::Preset { action } => match action {
            PresetAction::List { dir } => cmd_preset_list(dir),
            PresetAction::Show { preset } => cmd_preset_show(preset),
            PresetAction::Save { name, style, set } => cmd_preset_save(name, style, set),
            PresetAction::Delete { name } => cmd_preset_delete(name),
        },

        Commands::Styles => cmd_styles(),

        Commands::History { limit } => cmd_history(limit),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Resolve export settings, falling back to the loaded config defaults.
fn resolve_export_settings(
    format: Option<&str>,
    resolution: Option<&str>,
    quality: Option<f32>,
) -> Result<(ExportFormat, ExportResolution, f32), String> {
    let settings = &glowlab_core::config::settings_handle().settings;

    let format = match format {
        Some(f) => parse_format(f)?,
        None => settings.default_format,
    };
    let resolution = match resolution {
        Some(r) => parse_resolution(r)?,
        None => settings.default_resolution,
    };
    let quality = quality.unwrap_or(settings.jpeg_quality).clamp(0.05, 1.0);

    Ok((format, resolution, quality))
}

fn build_renderer(leak_dir: Option<&PathBuf>) -> Result<GlowRenderer, String> {
    match leak_dir {
        Some(dir) => GlowRenderer::with_leak_dir(dir),
        None => Ok(GlowRenderer::new()),
    }
}

fn history_path() -> Result<PathBuf, String> {
    let home_dir =
        dirs::home_dir().ok_or_else(|| "Could not determine home directory".to_string())?;
    Ok(home_dir.join("glowlab").join("history.json"))
}

fn cmd_apply(
    input: PathBuf,
    out: Option<PathBuf>,
    style: Option<String>,
    preset: Option<PathBuf>,
    set: Vec<String>,
    format: Option<String>,
    resolution: Option<String>,
    quality: Option<f32>,
    preview: Option<u32>,
    leak_dir: Option<PathBuf>,
    debug: bool,
) -> Result<(), String> {
    glowlab_core::config::set_verbose(debug);
    glowlab_core::config::log_config_usage();

    println!("Applying glow to {}...", input.display());

    println!("Decoding image...");
    let source = glowlab_core::decoders::decode_image(&input)?;
    println!("  Image: {}x{}", source.width, source.height);

    let params = build_parameters(style.as_deref(), preset.as_deref(), &set)?;
    println!("  Style: {}", params.style.name());

    let renderer = build_renderer(leak_dir.as_ref())?;

    println!("Rendering...");
    let rendered = match preview {
        Some(max_size) => renderer.render_preview(&source, &params, max_size)?,
        None => renderer.render_full(&source, &params)?,
    };

    let (format, resolution, quality) =
        resolve_export_settings(format.as_deref(), resolution.as_deref(), quality)?;
    let output_dir = out.unwrap_or_else(|| PathBuf::from("."));

    println!("Exporting...");
    let result = glowlab_core::exporters::export_image(
        &rendered,
        &output_dir,
        format,
        resolution,
        quality,
        |p| println!("  {:3.0}%", p * 100.0),
    )?;

    // History bookkeeping is best-effort; the export already succeeded.
    let record = glowlab_core::exporters::ExportRecord::from_result(&result);
    if let Ok(path) = history_path() {
        if let Err(e) = glowlab_core::exporters::append_history(&record, &path) {
            eprintln!("Warning: failed to record export history: {}", e);
        }
    }

    println!(
        "Done! {} ({} px) saved to: {}",
        result.format,
        result.size_px,
        result.file_path.display()
    );
    Ok(())
}

fn cmd_batch(
    inputs: Vec<PathBuf>,
    out: Option<PathBuf>,
    style: Option<String>,
    preset: Option<PathBuf>,
    set: Vec<String>,
    format: Option<String>,
    resolution: Option<String>,
    threads: Option<usize>,
) -> Result<(), String> {
    glowlab_core::config::log_config_usage();

    if inputs.is_empty() {
        return Err("No input files specified".to_string());
    }

    if let Some(num_threads) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        println!("Using {} threads for parallel processing", num_threads);
    }

    let params = build_parameters(style.as_deref(), preset.as_deref(), &set)?;
    let (format, resolution, quality) =
        resolve_export_settings(format.as_deref(), resolution.as_deref(), None)?;

    let output_dir = out.unwrap_or_else(|| PathBuf::from("."));
    if !output_dir.exists() {
        std::fs::create_dir_all(&output_dir)
            .map_err(|e| format!("Failed to create output directory: {}", e))?;
    }

    let renderer = GlowRenderer::new();

    println!("\nProcessing {} files in parallel...\n", inputs.len());

    let processed_count = AtomicUsize::new(0);
    let total_files = inputs.len();

    let results: Vec<Result<PathBuf, String>> = inputs
        .par_iter()
        .map(|input| {
            let source = glowlab_core::decoders::decode_image(input)?;
            let rendered = renderer.render_full(&source, &params)?;

            let result = glowlab_core::exporters::export_image(
                &rendered,
                &output_dir,
                format,
                resolution,
                quality,
                |_| {},
            )?;

            let count = processed_count.fetch_add(1, Ordering::SeqCst) + 1;
            println!(
                "[{}/{}] Processed: {} -> {}",
                count,
                total_files,
                input.display(),
                result.file_path.display()
            );

            Ok(result.file_path)
        })
        .collect();

    let mut success_count = 0;
    let mut errors: Vec<(PathBuf, String)> = Vec::new();

    for (input, result) in inputs.iter().zip(results.iter()) {
        match result {
            Ok(_) => success_count += 1,
            Err(e) => errors.push((input.clone(), e.clone())),
        }
    }

    println!("\n========================================");
    println!("BATCH PROCESSING COMPLETE");
    println!("========================================");
    println!("  Successful: {}", success_count);
    println!("  Failed:     {}", errors.len());
    println!("  Output dir: {}", output_dir.display());

    if !errors.is_empty() {
        println!("\nErrors:");
        for (path, error) in &errors {
            println!("  {}: {}", path.display(), error);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(format!("{} files failed to process", errors.len()))
    }
}

fn cmd_preset_list(dir: Option<PathBuf>) -> Result<(), String> {
    println!("Built-in presets:");
    for preset in glowlab_core::built_in_presets() {
        println!("  {} ({})", preset.name, preset.style().name());
    }

    let dir = match dir {
        Some(dir) => dir,
        None => glowlab_core::presets::get_presets_dir()?,
    };

    println!("\nSaved presets in {}:", dir.display());
    match glowlab_core::presets::list_presets(&dir) {
        Ok(presets) if presets.is_empty() => println!("  (none)"),
        Ok(presets) => {
            for preset in presets {
                println!("  {}", preset);
            }
        }
        Err(e) => return Err(format!("Failed to list presets: {}", e)),
    }

    Ok(())
}

fn cmd_preset_show(preset: String) -> Result<(), String> {
    // Try a file path first, then built-ins, then the presets directory.
    let preset_path = PathBuf::from(&preset);
    let preset_obj = if preset_path.exists() {
        glowlab_core::presets::load_preset(&preset_path)?
    } else if let Some(builtin) = glowlab_core::built_in_presets()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(&preset))
    {
        builtin
    } else {
        let dir = glowlab_core::presets::get_presets_dir()?;
        let full_path = dir.join(format!("{}.yml", preset));
        glowlab_core::presets::load_preset(&full_path)?
    };

    print_parameters(&preset_obj.name, &preset_obj.parameters);
    if let Some(notes) = &preset_obj.notes {
        println!("\nNotes: {}", notes);
    }
    println!();
    Ok(())
}

fn cmd_preset_save(
    name: String,
    style: Option<String>,
    set: Vec<String>,
) -> Result<(), String> {
    glowlab_core::presets::validate_preset_name(&name)?;

    let params = build_parameters(style.as_deref(), None, &set)?;
    let preset = GlowPreset::new(name.clone(), params);

    let dir = glowlab_core::presets::get_presets_dir()?;
    let path = dir.join(format!("{}.yml", name));
    glowlab_core::presets::save_preset(&preset, &path)?;

    println!("Preset saved: {}", path.display());
    Ok(())
}

fn cmd_preset_delete(name: String) -> Result<(), String> {
    glowlab_core::presets::validate_preset_name(&name)?;

    let dir = glowlab_core::presets::get_presets_dir()?;
    let path = dir.join(format!("{}.yml", name));
    if !path.exists() {
        return Err(format!("No saved preset named: {}", name));
    }

    std::fs::remove_file(&path).map_err(|e| format!("Failed to delete preset: {}", e))?;
    println!("Preset deleted: {}", name);
    Ok(())
}

fn cmd_styles() -> Result<(), String> {
    println!("Available styles:\n");
    for style in ALL_STYLES {
        let defaults = GlowParameters::default_for(style);
        print_parameters(style.name(), &defaults);
        println!();
    }
    Ok(())
}

fn cmd_history(limit: usize) -> Result<(), String> {
    let path = history_path()?;
    let records = glowlab_core::exporters::load_history(&path)?;

    if records.is_empty() {
        println!("No exports recorded yet.");
        return Ok(());
    }

    println!("Recent exports (newest last):");
    let start = records.len().saturating_sub(limit);
    for record in &records[start..] {
        println!(
            "  {} ({} px, {}) -> {}",
            record.format,
            record.size_px,
            record.created_at,
            record.file_path.display()
        );
    }
    Ok(())
}

fn print_parameters(title: &str, params: &GlowParameters) {
    println!("{}:", title);
    println!("  style:        {}", params.style.name());
    println!("  intensity:    {}", params.intensity);
    println!("  bloom:        {}", params.bloom);
    println!("  warmth:       {}", params.warmth);
    println!("  contrast:     {}", params.contrast);
    println!("  highlights:   {}", params.highlights);
    println!("  shadows:      {}", params.shadows);
    println!("  vignette:     {}", params.vignette);
    println!("  grain:        {}", params.grain);
    println!(
        "  position:     ({}, {})",
        params.light_position_x, params.light_position_y
    );
    println!("  mirror:       {}", params.mirror_reflection);
}
