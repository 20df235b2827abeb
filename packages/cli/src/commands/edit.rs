use super::project::Project;
use anyhow::{bail, Context, Result};
use clap::{Args, ValueEnum};
use colored::Colorize;
use pagekit_editor::{
    ConfigPath, CtaTarget, Direction, LinkTarget, Mutation, MutationOutcome, SubListOp,
};
use serde_json::Value;

#[derive(Debug, Args)]
pub struct InsertArgs {
    /// Page id
    pub page: String,

    /// Variant tag (see `pagekit catalog`)
    pub tag: String,

    /// Insert at this position instead of appending
    #[arg(short, long)]
    pub at: Option<usize>,
}

/// Arguments shared by commands that act on one widget
#[derive(Debug, Args)]
pub struct WidgetArgs {
    pub page: String,
    pub id: String,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum MoveDirection {
    Up,
    Down,
}

impl From<MoveDirection> for Direction {
    fn from(direction: MoveDirection) -> Self {
        match direction {
            MoveDirection::Up => Direction::Up,
            MoveDirection::Down => Direction::Down,
        }
    }
}

#[derive(Debug, Args)]
pub struct MoveArgs {
    pub page: String,
    pub id: String,

    #[arg(value_enum)]
    pub direction: MoveDirection,
}

#[derive(Debug, Args)]
pub struct ReorderArgs {
    pub page: String,
    pub id: String,

    /// Target position (clamped to the end of the page)
    pub to_index: usize,
}

#[derive(Debug, Args)]
pub struct SetArgs {
    pub page: String,
    pub id: String,

    /// Config path, e.g. `headline` or `items.0.answer`
    pub path: String,

    /// JSON value; anything that is not valid JSON is stored as a string
    pub value: String,
}

#[derive(Debug, Args)]
pub struct EditListArgs {
    pub page: String,
    pub id: String,

    /// Path of the list, e.g. `items` or `tiers.1.gifts`
    pub path: String,

    /// List edit as JSON, e.g. `{"kind":"remove","index":0}`
    pub edit: String,
}

#[derive(Debug, Args)]
pub struct CtaArgs {
    pub page: String,
    pub id: String,

    /// Scroll to another widget on the page
    #[arg(long, conflicts_with = "url")]
    pub anchor: Option<String>,

    /// Link to a URL
    #[arg(long)]
    pub url: Option<String>,

    /// Open the URL in a new tab
    #[arg(long, requires = "url")]
    pub new_tab: bool,

    /// Object holding the CTA group, for CTAs nested in list items
    #[arg(long)]
    pub at: Option<String>,
}

pub fn insert(args: InsertArgs, cwd: &str) -> Result<()> {
    let mut project = Project::open(cwd)?;
    let outcome = project.edit_page(&args.page, |session| {
        let id = session.insert_from_palette(&args.tag, args.at)?;
        Ok(MutationOutcome::Applied { id })
    })?;

    if let MutationOutcome::Applied { id } = outcome {
        println!(
            "{} Inserted {} as {}",
            "✓".green(),
            args.tag.bright_white(),
            id.cyan()
        );
    }
    Ok(())
}

pub fn move_widget(args: MoveArgs, cwd: &str) -> Result<()> {
    apply(
        cwd,
        &args.page,
        Mutation::Move {
            id: args.id,
            direction: args.direction.into(),
        },
        "Moved",
    )
}

pub fn reorder(args: ReorderArgs, cwd: &str) -> Result<()> {
    apply(
        cwd,
        &args.page,
        Mutation::Reorder {
            id: args.id,
            to_index: args.to_index,
        },
        "Reordered",
    )
}

pub fn remove(args: WidgetArgs, cwd: &str) -> Result<()> {
    apply(cwd, &args.page, Mutation::Remove { id: args.id }, "Removed")
}

pub fn duplicate(args: WidgetArgs, cwd: &str) -> Result<()> {
    apply(cwd, &args.page, Mutation::Duplicate { id: args.id }, "Duplicated as")
}

pub fn toggle(args: WidgetArgs, cwd: &str) -> Result<()> {
    apply(cwd, &args.page, Mutation::ToggleEnabled { id: args.id }, "Toggled")
}

pub fn set(args: SetArgs, cwd: &str) -> Result<()> {
    let path = ConfigPath::parse(&args.path)?;
    let value = parse_value(&args.value);

    let mut project = Project::open(cwd)?;
    let outcome = project.edit_page(&args.page, |session| {
        // A stale id is a no-op, like every other widget command
        if session.blocks().contains(&args.id) {
            session.validate_field(&args.id, &path)?;
        }
        Ok(session.set_field(&args.id, path.clone(), value)?)
    })?;

    report(&outcome, &format!("Set {} on", args.path));
    Ok(())
}

pub fn edit_list(args: EditListArgs, cwd: &str) -> Result<()> {
    let path = ConfigPath::parse(&args.path)?;
    let edit: SubListOp = serde_json::from_str(&args.edit)
        .with_context(|| format!("Invalid list edit: {}", args.edit))?;

    let mut project = Project::open(cwd)?;
    let outcome = project.edit_page(&args.page, |session| {
        // A stale id is a no-op, like every other widget command
        if session.blocks().contains(&args.id) {
            session.validate_field(&args.id, &path)?;
        }
        Ok(session.edit_list(&args.id, path.clone(), edit)?)
    })?;

    report(&outcome, &format!("Edited {} on", args.path));
    Ok(())
}

pub fn cta(args: CtaArgs, cwd: &str) -> Result<()> {
    let target = match (args.anchor, args.url) {
        (Some(widget_id), None) => CtaTarget::Anchor { widget_id },
        (None, Some(url)) => CtaTarget::External {
            url,
            target: if args.new_tab {
                LinkTarget::NewTab
            } else {
                LinkTarget::SameTab
            },
        },
        _ => bail!("Pass exactly one of --anchor or --url"),
    };
    let at = args.at.as_deref().map(ConfigPath::parse).transpose()?;

    let mut project = Project::open(cwd)?;
    let outcome = project.edit_page(&args.page, |session| {
        let outcome = match at {
            Some(at) => session.set_cta_at(&args.id, at, target)?,
            None => session.set_cta(&args.id, target)?,
        };
        Ok(outcome)
    })?;

    report(&outcome, "Updated CTA on");
    Ok(())
}

fn apply(cwd: &str, page: &str, mutation: Mutation, verb: &str) -> Result<()> {
    let mut project = Project::open(cwd)?;
    let outcome = project.edit_page(page, |session| Ok(session.apply(mutation)?))?;
    report(&outcome, verb);
    Ok(())
}

fn report(outcome: &MutationOutcome, verb: &str) {
    match outcome {
        MutationOutcome::Applied { id } => println!("{} {} {}", "✓".green(), verb, id.cyan()),
        MutationOutcome::NoOp => println!("{} Nothing changed", "-".dimmed()),
    }
}

fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_value() {
        assert_eq!(parse_value("42"), json!(42));
        assert_eq!(parse_value("true"), json!(true));
        assert_eq!(parse_value("[\"a\"]"), json!(["a"]));
        assert_eq!(parse_value("Hello world"), json!("Hello world"));
        assert_eq!(parse_value("\"quoted\""), json!("quoted"));
    }
}
