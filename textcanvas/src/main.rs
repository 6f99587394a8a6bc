mod commands;

use anyhow::Context;
use clap::Parser;
use commands::Command;
use std::path::PathBuf;
use textcanvas_rs::{DirectorySink, Editor, EditorConfig, Field};
use tokio::io::{AsyncBufReadExt, BufReader};

/// textcanvas: Type text parameters, draw them onto a canvas, and save it as image.png
#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Path to a JSON configuration file
    #[clap(short, long)]
    pub config: Option<String>,

    /// Directory where image.png is written. Overrides the configuration file
    #[clap(short, long)]
    pub output_dir: Option<String>,

    /// Canvas width in pixels
    #[clap(long)]
    pub width: Option<u32>,

    /// Canvas height in pixels
    #[clap(long)]
    pub height: Option<u32>,

    /// Additional directory to scan for font files. May be repeated
    #[clap(long = "font-dir")]
    pub font_dirs: Vec<String>,

    /// Do not load system fonts
    #[clap(long)]
    pub no_system_fonts: bool,

    /// Log diagnostics at debug level
    #[clap(short, long)]
    pub verbose: bool,
}

fn expand_path(path: &str) -> anyhow::Result<PathBuf> {
    let expanded = shellexpand::full(path)
        .with_context(|| format!("Failed to expand path: {}", path))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

fn load_config(args: &Args) -> anyhow::Result<EditorConfig> {
    let mut config = match &args.config {
        Some(path) => EditorConfig::from_path(&expand_path(path)?)?,
        None => EditorConfig::default(),
    };

    if let Some(output_dir) = &args.output_dir {
        config.output_dir = expand_path(output_dir)?;
    }
    if let Some(width) = args.width {
        config.canvas.width = width;
    }
    if let Some(height) = args.height {
        config.canvas.height = height;
    }
    for dir in &args.font_dirs {
        config.font_dirs.push(expand_path(dir)?);
    }
    if args.no_system_fonts {
        config.load_system_fonts = false;
    }

    config.validate()?;
    Ok(config)
}

fn print_state(editor: &Editor<DirectorySink>) {
    let form = editor.form();
    let values = form.values();
    for field in Field::ALL {
        println!("{:>8}: {}", field.name(), values.get(field));
    }
    println!("    text: {} characters", form.text_counter());

    let errors = form.errors();
    if !errors.is_empty() {
        println!("Errors:\n{}", errors);
    }
}

/// Run one command. Returns `false` when the session should end.
async fn run_command(editor: &mut Editor<DirectorySink>, command: Command) -> bool {
    match command {
        Command::Set(field, value) => {
            let update = editor.set_field(field, &value);
            if !update.accepted {
                println!(
                    "{} not changed: value is longer than the input allows",
                    field
                );
            }
            if field == Field::Text {
                println!("text: {}", editor.form().text_counter());
            }
            if let Some(violation) = update.violation {
                println!("{}: {}", field, violation);
            }
        }
        Command::Submit => match editor.submit() {
            Ok(request) => match serde_json::to_string(&request) {
                Ok(json) => println!("Drew {}", json),
                Err(err) => println!("Drew {:?} ({})", request, err),
            },
            Err(err) => println!("{}", err),
        },
        Command::Download => match editor.download().await {
            Ok(path) => println!("Saved {}", path.display()),
            Err(err) => {
                log::error!("download failed: {}", err);
                println!("Download failed: {}", err);
            }
        },
        Command::Show => print_state(editor),
        Command::Fonts => {
            let default_font = &editor.form().values().font;
            for font in editor.form().fonts() {
                let marker = if font == default_font { "*" } else { " " };
                println!("{} {}", marker, font);
            }
        }
        Command::Help => println!("{}", commands::HELP),
        Command::Quit => return false,
    }
    true
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let config = load_config(&args)?;
    log::debug!("configuration: {:?}", config);

    let sink = DirectorySink::new(&config.output_dir);
    let mut editor = Editor::new(&config, sink).context("Failed to create drawing surface")?;
    println!(
        "Canvas {}x{}. Type `help` for a list of commands.",
        editor.surface().width(),
        editor.surface().height()
    );

    let mut input = BufReader::new(tokio::io::stdin());
    let mut buf = Vec::new();
    loop {
        buf.clear();
        let read = input
            .read_until(b'\n', &mut buf)
            .await
            .context("Failed to read input")?;
        if read == 0 {
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(err) => {
                log::debug!("skipping undecodable input line: {}", err);
                println!("Input line is not valid UTF-8 and was ignored");
                continue;
            }
        };
        match commands::parse(line) {
            Ok(Some(command)) => {
                if !run_command(&mut editor, command).await {
                    break;
                }
            }
            Ok(None) => {}
            Err(err) => println!("{}", err),
        }
    }
    Ok(())
}
