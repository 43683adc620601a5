//! One function per subcommand.

use std::path::Path;

use anyhow::{Context as _, Result, bail};
use spm_cli::logging::redact_value;
use spm_cli::overrides;
use spm_client::{ApiClient, ClientConfig};
use spm_compliance::HeatmapView;
use spm_map::MappingStep;
use spm_model::UploadedDataset;
use spm_workflow::{ExportStep, PolicyPanel, UploadStep, Wizard, read_preview, save_to};
use tracing::{debug, info, trace};

use crate::cli::{HeatmapArgs, MapArgs, PreviewArgs, SimulateArgs};
use crate::progress::with_spinner;
use crate::summary::{
    print_countries, print_fields, print_health, print_heatmap, print_mapping, print_notes,
    print_rows, print_simulation,
};

/// Rows shown after an upload.
const PREVIEW_ROWS: usize = 5;

/// Shared state for commands that talk to the backend.
pub struct Context {
    pub config: ClientConfig,
    pub client: ApiClient,
    /// Whether spinners may be drawn.
    pub spinner: bool,
}

impl Context {
    pub fn new(config: ClientConfig, spinner: bool) -> Result<Self> {
        let client = ApiClient::from_config(&config).context("failed to build HTTP client")?;
        debug!(base_url = %config.base_url, environment = %config.environment, "client ready");
        Ok(Self {
            config,
            client,
            spinner,
        })
    }
}

pub fn run_preview(args: &PreviewArgs) -> Result<()> {
    let preview = read_preview(&args.file, args.rows)
        .with_context(|| format!("failed to preview {}", args.file.display()))?;
    let title = if preview.truncated {
        format!("{} (first {} rows)", args.file.display(), preview.rows.len())
    } else {
        args.file.display().to_string()
    };
    print_rows(&title, &preview.headers, &preview.rows, None);
    Ok(())
}

pub async fn run_upload(ctx: &Context, file: &Path) -> Result<()> {
    let dataset = upload(ctx, file).await?;
    print_uploaded(file, &dataset);
    Ok(())
}

/// Upload, analyze, apply overrides, submit and optionally export.
pub async fn run_map(ctx: &Context, args: &MapArgs) -> Result<()> {
    let mut wizard = Wizard::new();

    let dataset = upload(ctx, &args.file).await?;
    print_uploaded(&args.file, &dataset);
    let mut step = MappingStep::from_dataset(&dataset);
    wizard.complete_upload(dataset)?;
    wizard.confirm_preview()?;

    with_spinner("Analyzing columns...", ctx.spinner, step.analyze(&ctx.client))
        .await
        .context("failed to analyze columns")?;
    overrides::apply(&mut step, &args.set, &args.reset).context("failed to apply overrides")?;

    println!();
    if let Some(state) = step.state() {
        print_mapping(state);
    }
    print_notes(step.notes());

    if !step.can_submit() {
        let unmapped = step
            .state()
            .map(|state| state.unmapped_headers().join(", "))
            .unwrap_or_default();
        bail!("every column must be mapped before submitting; use --set HEADER=FIELD for: {unmapped}");
    }

    let mappings = with_spinner("Saving mappings...", ctx.spinner, step.submit(&ctx.client))
        .await
        .context("failed to save mappings")?;
    wizard.complete_mapping(mappings)?;
    println!();
    println!("Mappings saved successfully.");

    if args.export {
        let mut export = ExportStep::new();
        let file = with_spinner(
            "Exporting...",
            ctx.spinner,
            export.export(&ctx.client, wizard.dataset(), wizard.mappings()),
        )
        .await
        .context("failed to export standardized data")?;
        let dir = args.output_dir.as_deref().unwrap_or_else(|| Path::new("."));
        let path = save_to(file, dir)
            .with_context(|| format!("failed to write export into {}", dir.display()))?;
        info!(path = %path.display(), "export saved");
        println!("Exported: {}", path.display());
    }
    Ok(())
}

pub async fn run_heatmap(ctx: &Context, args: &HeatmapArgs) -> Result<()> {
    let mut view = HeatmapView::new();
    view.set_filter(args.filter.into());
    with_spinner("Loading compliance heatmap...", ctx.spinner, view.fetch(&ctx.client))
        .await
        .context("failed to load compliance heatmap")?;
    let stats = view.stats().unwrap_or_default();
    print_heatmap(&view.visible(), stats, view.filter());
    Ok(())
}

pub async fn run_simulate(ctx: &Context, args: &SimulateArgs) -> Result<()> {
    let dataset = upload(ctx, &args.file).await?;

    let mut panel = PolicyPanel::new();
    if let Some(currency) = &args.currency {
        panel.form.currency.clone_from(currency);
    }
    panel.form.select_country(&args.country);
    panel.form.salary = args.salary.clone().unwrap_or_default();
    panel.form.notes = args.notes.clone().unwrap_or_default();

    let result = with_spinner(
        "Running simulation...",
        ctx.spinner,
        panel.simulate(&ctx.client, &dataset),
    )
    .await
    .context("policy simulation failed")?;
    print_simulation(result);
    Ok(())
}

pub fn run_fields() {
    print_fields();
}

pub fn run_countries() {
    print_countries();
}

pub async fn run_health(ctx: &Context) -> Result<()> {
    let status = with_spinner("Checking backend...", ctx.spinner, ctx.client.health())
        .await
        .with_context(|| format!("backend at {} is not reachable", ctx.config.base_url))?;
    print_health(&ctx.config, &status);
    if !status.is_healthy() {
        bail!("backend reported status '{}'", status.status);
    }
    Ok(())
}

async fn upload(ctx: &Context, file: &Path) -> Result<UploadedDataset> {
    let mut step = UploadStep::new();
    step.select(file);
    with_spinner("Uploading...", ctx.spinner, step.upload(&ctx.client))
        .await
        .with_context(|| format!("failed to upload {}", file.display()))?;
    let dataset = step
        .take_dataset()
        .context("upload finished without a dataset")?;
    if let Some(first) = dataset.rows.first() {
        let cells: Vec<&str> = first.iter().map(|cell| redact_value(cell)).collect();
        trace!(?cells, "first uploaded row");
    }
    Ok(dataset)
}

fn print_uploaded(file: &Path, dataset: &UploadedDataset) {
    print_rows(
        &format!("Uploaded {}", file.display()),
        &dataset.headers,
        dataset.sample(PREVIEW_ROWS),
        Some(dataset.row_count()),
    );
}
