use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use marginalia_config::Settings;
use marginalia_engine::editing::{ColorTag, Document, Editor, EditorSettings};
use marginalia_engine::popover::{
    AnchorPosition, PopoverEvent, PopoverResponse, PopoverView, Surface,
};
use marginalia_engine::{AnnotationError, MarginNoteLayout, Region, render_preview};
use std::io::Write;
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::process;

#[derive(Parser, Debug)]
#[command(name = "marginalia")]
#[command(about = "Highlight and annotate plain-text notes")]
#[command(version)]
struct Cli {
    /// Settings file (defaults to ~/.config/marginalia/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List highlights with their offsets and comments
    List { file: PathBuf },
    /// Highlight a span of text
    Highlight {
        file: PathBuf,
        #[command(flatten)]
        selection: SelectionArgs,
        /// Comment to attach to the new highlight
        #[arg(long, short)]
        comment: Option<String>,
        /// Color tag to append to the comment
        #[arg(long)]
        color: Option<String>,
        /// Highlight exactly the selected bytes, without growing to whole words
        #[arg(long)]
        no_expand: bool,
    },
    /// Set, change or clear (with an empty string) a highlight's comment
    Comment {
        file: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
        comment: String,
        /// Color tag to append to the comment
        #[arg(long)]
        color: Option<String>,
    },
    /// Remove a highlight and its comment, keeping the text
    Remove {
        file: PathBuf,
        #[command(flatten)]
        target: TargetArgs,
    },
    /// Render the document as HTML with margin notes
    Preview { file: PathBuf },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SelectionArgs {
    /// Byte range to highlight, as START..END
    #[arg(long, value_parser = parse_range)]
    range: Option<Range<usize>>,
    /// Highlight the first occurrence of this text
    #[arg(long)]
    find: Option<String>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct TargetArgs {
    /// Byte offset inside the highlight
    #[arg(long)]
    at: Option<usize>,
    /// Highlighted text to look for
    #[arg(long)]
    text: Option<String>,
}

fn parse_range(s: &str) -> Result<Range<usize>, String> {
    let (start, end) = s
        .split_once("..")
        .ok_or_else(|| format!("expected START..END, got {s:?}"))?;
    let start = start.trim().parse::<usize>().map_err(|e| e.to_string())?;
    let end = end.trim().parse::<usize>().map_err(|e| e.to_string())?;
    if end < start {
        return Err(format!("range end {end} is before start {start}"));
    }
    Ok(start..end)
}

/// Popover host with no screen: every region is considered rendered, and the
/// popover is driven by synthetic events.
struct HeadlessSurface;

impl Surface for HeadlessSurface {
    type Handle = ();

    fn mount(&mut self, view: &PopoverView) {
        log::debug!("popover opened at {:?}", view.anchor);
    }

    fn unmount(&mut self, _handle: ()) {
        log::debug!("popover closed");
    }

    fn locate(&self, from: usize, _to: usize) -> Option<AnchorPosition> {
        Some(AnchorPosition {
            x: from as f32,
            y: 0.0,
        })
    }
}

fn load_settings(config: Option<&Path>) -> Result<Settings> {
    let settings = match config {
        Some(path) => Settings::load_from_path(path)?.unwrap_or_default(),
        None => Settings::load_or_default()?,
    };
    Ok(settings)
}

fn open_editor(file: &Path, settings: EditorSettings) -> Result<Editor<HeadlessSurface>> {
    let bytes = std::fs::read(file).with_context(|| format!("reading {}", file.display()))?;
    let document = Document::from_bytes(&bytes)
        .with_context(|| format!("{} is not valid UTF-8", file.display()))?;
    let editor = Editor::new(document, HeadlessSurface, |message: &str| {
        eprintln!("{message}");
    });
    Ok(editor.with_settings(settings))
}

fn save(file: &Path, editor: &Editor<HeadlessSurface>) -> Result<()> {
    std::fs::write(file, editor.text()).with_context(|| format!("writing {}", file.display()))?;
    log::info!("wrote {}", file.display());
    Ok(())
}

fn check_color(color: Option<&str>, settings: &Settings) -> Result<()> {
    if let Some(color) = color
        && !settings.colors.iter().any(|c| c == color)
    {
        bail!(
            "unknown color {color:?}; configured colors are {}",
            settings.colors_string()
        );
    }
    Ok(())
}

fn find_target(editor: &Editor<HeadlessSurface>, target: &TargetArgs) -> Result<Region> {
    let region = match (target.at, target.text.as_deref()) {
        (Some(offset), _) => editor.regions().at(offset),
        (None, Some(text)) => editor.regions().iter().find(|r| r.text == text),
        (None, None) => None,
    };
    region.cloned().context("no highlight matches the target")
}

fn selection_range(editor: &Editor<HeadlessSurface>, selection: &SelectionArgs) -> Result<Range<usize>> {
    if let Some(range) = &selection.range {
        return Ok(range.clone());
    }
    let needle = selection.find.as_deref().unwrap_or_default();
    let start = editor
        .text()
        .find(needle)
        .with_context(|| format!("{needle:?} not found"))?;
    Ok(start..start + needle.len())
}

fn escape_newlines(s: &str) -> String {
    s.replace('\n', "\\n")
}

fn run(cli: Cli, out: &mut impl Write) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    let editor_settings = EditorSettings {
        expand_selection: settings.expand_selection,
        colors: settings.colors.clone(),
    };

    match cli.command {
        Command::List { file } => {
            let editor = open_editor(&file, editor_settings)?;
            for region in editor.regions() {
                let comment = region.comment.as_deref().unwrap_or_default();
                let (comment, color) = ColorTag::split(comment, &settings.colors);
                writeln!(
                    out,
                    "{}..{}\t{}\t{}\t{}",
                    region.from,
                    region.to,
                    escape_newlines(&region.text),
                    escape_newlines(comment),
                    color.unwrap_or_default()
                )?;
            }
        }
        Command::Highlight {
            file,
            selection,
            comment,
            color,
            no_expand,
        } => {
            check_color(color.as_deref(), &settings)?;
            let mut editor = open_editor(
                &file,
                EditorSettings {
                    expand_selection: editor_settings.expand_selection && !no_expand,
                    ..editor_settings
                },
            )?;
            let range = selection_range(&editor, &selection)?;
            editor.set_selection(range);
            editor.create_highlight()?;

            if editor.run_deferred() == 0 {
                log::warn!("new highlight was not found, comment skipped");
            } else {
                match comment.and_then(|c| ColorTag::apply(&c, color.as_deref())) {
                    Some(comment) => {
                        for c in comment.chars() {
                            editor.popover_event(PopoverEvent::Input(c));
                        }
                        if let PopoverResponse::Rejected(err) =
                            editor.popover_event(PopoverEvent::Enter { shift: false })
                        {
                            return Err(err.into());
                        }
                    }
                    None => {
                        editor.popover_event(PopoverEvent::Escape);
                    }
                }
            }
            save(&file, &editor)?;
        }
        Command::Comment {
            file,
            target,
            comment,
            color,
        } => {
            check_color(color.as_deref(), &settings)?;
            let mut editor = open_editor(&file, editor_settings)?;
            let region = find_target(&editor, &target)?;
            let comment = ColorTag::apply(&comment, color.as_deref()).unwrap_or_default();
            editor.update_comment(&region, &comment)?;
            save(&file, &editor)?;
        }
        Command::Remove { file, target } => {
            let mut editor = open_editor(&file, editor_settings)?;
            let region = find_target(&editor, &target)?;
            editor.remove_highlight(&region)?;
            save(&file, &editor)?;
        }
        Command::Preview { file } => {
            let editor = open_editor(&file, editor_settings)?;
            let mut layout = MarginNoteLayout::new();
            write!(out, "{}", render_preview(&editor.text(), &mut layout))?;
        }
    }
    Ok(())
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    let cli = Cli::parse();
    let mut stdout = std::io::stdout();
    if let Err(err) = run(cli, &mut stdout) {
        // Rejected edits have already been reported by the editor.
        if err.downcast_ref::<AnnotationError>().is_none() {
            eprintln!("Error: {err:#}");
        }
        process::exit(1);
    }
}
