use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use folio::{
    BackdropEngine, BackdropSettings, Category, ContactForm, CvDownload, Field, FilePreferences,
    FloatingContact, HeadlineRotator, MemoryPreferences, PreferenceStore, ProjectCatalog,
    SiteConfig, Stage, SubmitStatus, Theme, ThemeStore, Viewport,
};

#[derive(Parser, Debug)]
#[command(name = "folio", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render backdrop animation frames as PNGs.
    Frames(FramesArgs),
    /// Print the project catalog as JSON.
    Projects(ProjectsArgs),
    /// Show or toggle the persisted theme.
    Theme(ThemeArgs),
    /// Submit a contact message through the configured relay.
    Contact(ContactArgs),
    /// Print the landing headlines, CV link and contact shortcuts as JSON.
    Card,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ThemeArg {
    Dark,
    Light,
}

impl From<ThemeArg> for Theme {
    fn from(t: ThemeArg) -> Self {
        match t {
            ThemeArg::Dark => Theme::Dark,
            ThemeArg::Light => Theme::Light,
        }
    }
}

#[derive(Parser, Debug)]
struct FramesArgs {
    #[arg(long, default_value_t = 1280)]
    width: u32,

    #[arg(long, default_value_t = 720)]
    height: u32,

    /// Number of frames to render.
    #[arg(long, default_value_t = 60)]
    frames: u32,

    #[arg(long, value_enum, default_value_t = ThemeArg::Dark)]
    theme: ThemeArg,

    /// Seed for a reproducible shape field.
    #[arg(long)]
    seed: Option<u64>,

    /// Backdrop settings JSON; flags above take precedence.
    #[arg(long)]
    settings: Option<PathBuf>,

    /// Output directory for `frame_NNNN.png` files.
    #[arg(long)]
    out: PathBuf,
}

#[derive(Parser, Debug)]
struct ProjectsArgs {
    /// `all`, `full-stack` or `frontend`.
    #[arg(long, default_value = "all")]
    category: String,
}

#[derive(Parser, Debug)]
struct ThemeArgs {
    #[command(subcommand)]
    action: Option<ThemeAction>,

    /// Preference file (defaults to FOLIO_PREFS_PATH, then the user config dir).
    #[arg(long, global = true)]
    prefs: Option<PathBuf>,
}

#[derive(Subcommand, Debug, Clone, Copy)]
enum ThemeAction {
    Show,
    Toggle,
}

#[derive(Parser, Debug)]
struct ContactArgs {
    #[arg(long)]
    name: String,

    #[arg(long)]
    email: String,

    #[arg(long)]
    message: String,

    /// Recipient (defaults to FOLIO_PORTFOLIO_EMAIL).
    #[arg(long)]
    to: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = SiteConfig::from_env();
    match cli.cmd {
        Command::Frames(args) => cmd_frames(args),
        Command::Projects(args) => cmd_projects(args, &config),
        Command::Theme(args) => cmd_theme(args, &config),
        Command::Contact(args) => cmd_contact(args, &config),
        Command::Card => cmd_card(&config),
    }
}

fn cmd_frames(args: FramesArgs) -> anyhow::Result<()> {
    let mut settings = match &args.settings {
        Some(path) => {
            let raw = std::fs::read_to_string(path)
                .with_context(|| format!("read settings '{}'", path.display()))?;
            serde_json::from_str::<BackdropSettings>(&raw)
                .with_context(|| format!("parse settings '{}'", path.display()))?
        }
        None => BackdropSettings::default(),
    };
    if args.seed.is_some() {
        settings.seed = args.seed;
    }
    settings.validate().context("backdrop settings")?;

    let theme = Theme::from(args.theme);
    let themes = ThemeStore::init(Box::new(MemoryPreferences::with(
        folio::theme::store::THEME_KEY,
        theme.as_str(),
    )));
    let viewport = Viewport::new(args.width, args.height)?;
    let mut stage = Stage::new(viewport);
    let mut engine = BackdropEngine::mount(&mut stage, settings);
    if !engine.has_surface() {
        anyhow::bail!(
            "no drawable surface for {}x{}",
            viewport.width,
            viewport.height
        );
    }

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let bg = themes.palette().bg_primary;
    let mut written = 0u32;
    while written < args.frames {
        for event in stage.poll() {
            engine.dispatch(&mut stage, event, &themes);
        }
        if !engine.is_running() {
            break;
        }
        let Some(frame) = engine.snapshot() else {
            break;
        };
        let path = args.out.join(format!("frame_{written:04}.png"));
        image::save_buffer_with_format(
            &path,
            &frame.flatten_over(bg),
            frame.width,
            frame.height,
            image::ColorType::Rgba8,
            image::ImageFormat::Png,
        )
        .with_context(|| format!("write png '{}'", path.display()))?;
        written += 1;
    }
    engine.unmount(&mut stage);

    if written < args.frames {
        anyhow::bail!("animation stopped after {written} of {} frames", args.frames);
    }
    eprintln!("wrote {written} frames to {}", args.out.display());
    Ok(())
}

fn cmd_projects(args: ProjectsArgs, config: &SiteConfig) -> anyhow::Result<()> {
    let category = Category::parse(&args.category)?;
    let catalog = ProjectCatalog::bundled(&config.github_username)?;
    let json = serde_json::to_string_pretty(&catalog.filter(category))?;
    println!("{json}");
    Ok(())
}

fn cmd_theme(args: ThemeArgs, config: &SiteConfig) -> anyhow::Result<()> {
    let prefs = match args.prefs {
        Some(path) => FilePreferences::new(path),
        None => config.preferences(),
    };
    let path = prefs.path().to_path_buf();

    let theme = match args.action.unwrap_or(ThemeAction::Show) {
        ThemeAction::Show => ThemeStore::init(Box::new(prefs)).theme(),
        ThemeAction::Toggle => {
            let mut store = ThemeStore::init(Box::new(prefs.clone()));
            let next = store.toggle();
            // The store only logs write failures; confirm the value landed.
            if read_theme(&prefs)? != next {
                anyhow::bail!("could not save theme to '{}'", path.display());
            }
            next
        }
    };
    println!("{}", theme.as_str());
    Ok(())
}

fn read_theme(prefs: &FilePreferences) -> anyhow::Result<Theme> {
    let raw = prefs.get(folio::theme::store::THEME_KEY)?;
    Ok(match raw {
        Some(raw) => Theme::parse(&raw)?,
        None => Theme::default(),
    })
}

fn cmd_contact(args: ContactArgs, config: &SiteConfig) -> anyhow::Result<()> {
    let recipient = args
        .to
        .or_else(|| config.portfolio_email.clone())
        .context("no recipient: pass --to or set FOLIO_PORTFOLIO_EMAIL")?;

    let mut form = ContactForm::new(recipient);
    form.set_field(Field::Name, args.name);
    form.set_field(Field::Email, args.email);
    form.set_field(Field::Message, args.message);

    let mut relay = folio::contact::relay_from_config(config);
    match form.submit(relay.as_mut())? {
        SubmitStatus::Success => {
            eprintln!("message sent");
            Ok(())
        }
        status => anyhow::bail!("submission ended with status {status:?}"),
    }
}

fn cmd_card(config: &SiteConfig) -> anyhow::Result<()> {
    let mut floating = FloatingContact::new(config);
    floating.toggle();
    let shortcuts: Vec<_> = floating
        .visible()
        .into_iter()
        .map(|(action, _)| action.label())
        .collect();
    let card = serde_json::json!({
        "headlines": HeadlineRotator::for_owner(&config.portfolio_name).lines(),
        "cv": CvDownload::from_config(config),
        "contact": folio::contact::contact_methods(config),
        "shortcuts": shortcuts,
    });
    println!("{}", serde_json::to_string_pretty(&card)?);
    Ok(())
}
