//! Unfinished Cards
//!
//! Command-line front end for rendering and sharing quote cards.

use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use unfinished_cards::app::{CliArgs, Command, Config, QuoteArgs};
use unfinished_cards::share::{
    download_filename, parse_shared_link, DesktopSurface, MemorySurface, NativeShare,
    ShareDispatcher, ShareSurface, SurfaceEvent,
};
use unfinished_cards::themes::{self, DailyTheme};
use unfinished_cards::{suggest_mood, Mood, Platform, Quote, QuoteRenderer};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let args = CliArgs::parse();

    // CLI > env > file > defaults
    let config = match Config::load_with_args(&args) {
        Ok(config) => config,
        Err(e) => {
            log::error!("Configuration error: {}", e);
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };
    log::debug!("Origin: {}", config.share.origin);
    log::debug!("Card format: {:?}", config.card.format);

    if let Err(e) = run(&args, &config) {
        log::error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: &CliArgs, config: &Config) -> Result<(), Box<dyn Error>> {
    match &args.command {
        Command::Suggest { text } => {
            println!("{}", suggest_mood(text));
        }
        Command::Theme { date, json } => {
            let theme = match date {
                Some(date) => themes::todays_theme(*date),
                None => themes::current_theme(),
            };
            if *json {
                println!("{}", serde_json::to_string_pretty(theme)?);
            } else {
                print_theme(theme);
            }
        }
        Command::Parse { link } => {
            let quote = parse_shared_link(link)?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Command::Render {
            quote,
            output,
            layout,
        } => {
            let quote = to_quote(quote)?;
            let renderer = QuoteRenderer::from_config(config);
            if *layout {
                let layout = renderer.layout(&quote).ok_or("no fonts available for layout")?;
                println!("{}", serde_json::to_string_pretty(&layout)?);
                return Ok(());
            }

            let image = renderer.render(&quote);
            if image.is_placeholder() {
                return Err("rendering unavailable, no image written".into());
            }
            let path = output.clone().unwrap_or_else(|| {
                PathBuf::from(download_filename(chrono::Utc::now().timestamp_millis()))
            });
            std::fs::write(&path, &image.png)?;
            println!("{}", path.display());
        }
        Command::Link { quote } => {
            let quote = to_quote(quote)?;
            let dispatcher = ShareDispatcher::new(
                MemorySurface::default(),
                QuoteRenderer::unavailable(config.card.format),
                &config.share,
            );
            println!("{}", dispatcher.build_shareable_link(&quote));
            println!("{}", dispatcher.og_image_url(&quote));
        }
        Command::Share { quote, platform } => {
            let quote = to_quote(quote)?;
            let platform = Platform::from_str(platform)
                .ok_or_else(|| format!("unknown platform '{}'", platform))?;
            with_dispatcher(args, config, |d| {
                println!("{}", d.share_to_platform(&quote, platform));
            });
        }
        Command::Native { quote } => {
            let quote = to_quote(quote)?;
            with_dispatcher(args, config, |d| {
                println!("{:?}", d.share_native(&quote));
            });
        }
        Command::Download { quote } => {
            let quote = to_quote(quote)?;
            with_dispatcher(args, config, |d| {
                let outcome = d.download_image(&quote);
                match outcome.saved_to {
                    Some(path) => println!("{}", path.display()),
                    None => eprintln!("{} was not saved", outcome.filename),
                }
            });
        }
    }
    Ok(())
}

fn to_quote(args: &QuoteArgs) -> Result<Quote, Box<dyn Error>> {
    let mood: Mood = args.mood.parse()?;
    let quote = Quote::new(args.start.clone(), args.completion.clone(), mood);
    Ok(match &args.theme {
        Some(title) => {
            // Known themes are normalised to their canonical title
            let title = themes::find_theme(title).map_or(title.as_str(), |t| t.title);
            quote.with_theme(title)
        }
        None => quote,
    })
}

fn print_theme(theme: &DailyTheme) {
    println!("{}", theme.title);
    println!("{}", theme.description);
    println!();
    println!("{}", theme.prompt);
    for example in theme.examples {
        println!("  {}", example);
    }
}

/// Run a share action on the desktop, or on a recording surface for `--dry-run`
fn with_dispatcher<F>(args: &CliArgs, config: &Config, action: F)
where
    F: FnOnce(&mut dyn DispatchAction),
{
    let renderer = QuoteRenderer::from_config(config);
    if args.dry_run {
        let mut d = ShareDispatcher::new(
            MemorySurface::new(NativeShare::Unsupported),
            renderer,
            &config.share,
        );
        action(&mut d);
        for event in &d.surface().events {
            print_event(event);
        }
    } else {
        let surface = DesktopSurface::new(config.share.resolved_download_dir());
        let mut d = ShareDispatcher::new(surface, renderer, &config.share);
        action(&mut d);
    }
}

fn print_event(event: &SurfaceEvent) {
    match event {
        SurfaceEvent::NativeShare(payload) => println!("[dry-run] share sheet: {}", payload.title),
        SurfaceEvent::Clipboard(text) => println!("[dry-run] clipboard:\n{}", text),
        SurfaceEvent::Notify(message) => println!("[dry-run] notify: {}", message),
        SurfaceEvent::OpenUrl { url, window } => {
            println!("[dry-run] open {}x{}: {}", window.width, window.height, url)
        }
        SurfaceEvent::SaveFile { filename, len } => {
            println!("[dry-run] save {} ({} bytes)", filename, len)
        }
    }
}

/// Share actions callable on any dispatcher
trait DispatchAction {
    fn share_to_platform(&mut self, quote: &Quote, platform: Platform) -> String;
    fn share_native(&mut self, quote: &Quote) -> unfinished_cards::ShareOutcome;
    fn download_image(&mut self, quote: &Quote) -> unfinished_cards::DownloadOutcome;
}

impl<S: ShareSurface> DispatchAction for ShareDispatcher<S> {
    fn share_to_platform(&mut self, quote: &Quote, platform: Platform) -> String {
        ShareDispatcher::share_to_platform(self, quote, platform)
    }

    fn share_native(&mut self, quote: &Quote) -> unfinished_cards::ShareOutcome {
        ShareDispatcher::share_native(self, quote)
    }

    fn download_image(&mut self, quote: &Quote) -> unfinished_cards::DownloadOutcome {
        ShareDispatcher::download_image(self, quote)
    }
}
