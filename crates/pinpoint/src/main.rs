use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use pinpoint::cli;
use pinpoint_core::locator::{ActionOptions, MouseButton};
use pinpoint_core::to_css_selector;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "pinpoint", version, about = "Resolve page elements to robust locators")]
struct Args {
    #[command(subcommand)]
    command: Mode,

    /// Config file (defaults to ./pinpoint.yaml, then ~/.pinpoint/config.yaml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Mode {
    /// Print the resolved selector of every element matching a CSS query
    Resolve {
        html: PathBuf,
        css: String,
        /// Also print the CSS-engine form of each selector
        #[arg(long = "css")]
        css_form: bool,
    },
    /// Print Playwright locators for the first match
    Locators { html: PathBuf, css: String },
    /// Print Playwright action commands for the first match
    Command {
        html: PathBuf,
        css: String,
        /// click, dblclick, fill, type, check, uncheck, selectOption, hover, press, setInputFiles
        action: String,
        /// Value for fill/type/press; comma separated for selectOption/setInputFiles
        #[arg(long)]
        value: Option<String>,
        #[arg(long, value_enum, default_value_t = Button::Left)]
        button: Button,
        /// Modifier keys held during clicks (e.g. Shift, Control)
        #[arg(long = "modifier")]
        modifiers: Vec<String>,
    },
    /// Print Playwright assertions for the first match
    Assert {
        html: PathBuf,
        css: String,
        /// toBeVisible, toHaveText, toHaveValue, toBeEnabled, toBeDisabled, toHaveCount
        assertion: String,
        #[arg(long)]
        expected: Option<String>,
    },
    /// Print navigation commands for a URL
    Goto { url: String },
    /// Convert a resolver selector for plain CSS engines
    ToCss { selector: String },
    /// Print a simplified JSON tree of the page body
    Simplify {
        html: PathBuf,
        #[arg(long)]
        max_depth: Option<usize>,
        #[arg(long)]
        max_children: Option<usize>,
    },
    /// Print a JSON snapshot of the first match
    Inspect { html: PathBuf, css: String },
}

#[derive(Clone, Copy, ValueEnum)]
enum Button {
    Left,
    Right,
    Middle,
}

impl From<Button> for MouseButton {
    fn from(button: Button) -> Self {
        match button {
            Button::Left => MouseButton::Left,
            Button::Right => MouseButton::Right,
            Button::Middle => MouseButton::Middle,
        }
    }
}

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries results
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = cli::load_config(args.config.as_deref())?;

    let lines = match args.command {
        Mode::Resolve {
            html,
            css,
            css_form,
        } => cli::resolve(&cli::load_document(&html)?, &css, &config, css_form)?,
        Mode::Locators { html, css } => {
            cli::locators(&cli::load_document(&html)?, &css, &config)?
        }
        Mode::Command {
            html,
            css,
            action,
            value,
            button,
            modifiers,
        } => {
            let options = ActionOptions {
                button: button.into(),
                modifiers,
            };
            cli::commands(
                &cli::load_document(&html)?,
                &css,
                &config,
                &action,
                value.as_deref(),
                &options,
            )?
        }
        Mode::Assert {
            html,
            css,
            assertion,
            expected,
        } => cli::assertions(
            &cli::load_document(&html)?,
            &css,
            &config,
            &assertion,
            expected.as_deref(),
        )?,
        Mode::Goto { url } => cli::goto(&url),
        Mode::ToCss { selector } => vec![to_css_selector(&selector)],
        Mode::Simplify {
            html,
            max_depth,
            max_children,
        } => {
            let mut options = config.simplify.clone();
            options.max_depth = max_depth.unwrap_or(options.max_depth);
            options.max_children = max_children.unwrap_or(options.max_children);
            vec![cli::simplify(&cli::load_document(&html)?, &options)?]
        }
        Mode::Inspect { html, css } => {
            vec![cli::inspect(&cli::load_document(&html)?, &css, &config)?]
        }
    };

    for line in lines {
        println!("{}", line);
    }
    Ok(())
}
