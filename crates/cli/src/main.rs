use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use kotp_content::{SiteContent, Standing};
use kotp_types::Division;
use kotp_util::preferences::UserPreferences;
use tracing::Level;

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let matches = build_cli().get_matches();

    if let Some(raw) = matches.get_one::<String>("theme") {
        apply_theme_choice(raw)?;
    }

    let content = SiteContent::from_embedded().context("embedded season content failed to load")?;

    match matches.subcommand() {
        Some(("standings", sub)) => run_standings(&content, sub),
        Some(("pundits", sub)) => run_pundits(&content, sub),
        Some(("themes", _)) => {
            run_themes();
            Ok(())
        }
        // No subcommands => TUI
        _ => kotp_tui::run(content).await,
    }
}

fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_max_level(Level::INFO)
        .try_init();
}

/// Builds the argument tree. Separate from `main` so tests can parse
/// argument vectors without spawning a process.
fn build_cli() -> Command {
    let division_arg = Arg::new("division")
        .long("division")
        .short('d')
        .value_name("DIVISION")
        .action(ArgAction::Set)
        .help("Restrict to one division (premier, championship or sunday)");

    Command::new("kotp")
        .about("King of the Pundits: the football prediction league, in your terminal")
        .arg(
            Arg::new("theme")
                .long("theme")
                .value_name("ID")
                .global(true)
                .action(ArgAction::Set)
                .help("Color theme to use and remember (see `kotp themes`)"),
        )
        .subcommand(
            Command::new("standings")
                .about("Print the league tables")
                .arg(division_arg.clone())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit JSON instead of aligned text"),
                ),
        )
        .subcommand(
            Command::new("pundits")
                .about("Print the pundit roster")
                .arg(division_arg)
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Emit JSON instead of aligned text"),
                ),
        )
        .subcommand(Command::new("themes").about("List the available color themes"))
}

/// Parses the optional `--division` filter off a subcommand's matches.
fn parse_division(matches: &ArgMatches) -> Result<Option<Division>> {
    matches
        .get_one::<String>("division")
        .map(|raw| raw.parse::<Division>().map_err(|message| anyhow::anyhow!(message)))
        .transpose()
}

/// Resolves `--theme` against the catalog and persists the choice, so both
/// this run and later ones pick it up.
fn apply_theme_choice(raw: &str) -> Result<()> {
    let definition = kotp_tui::themes::resolve(raw).with_context(|| {
        let known: Vec<&str> = kotp_tui::themes::all().iter().map(|theme| theme.id).collect();
        format!("unknown theme `{raw}` (known themes: {})", known.join(", "))
    })?;
    let preferences = UserPreferences::load_or_ephemeral();
    preferences
        .set_preferred_theme(Some(definition.id.to_string()))
        .context("failed to save theme preference")?;
    Ok(())
}

fn run_standings(content: &SiteContent, matches: &ArgMatches) -> Result<()> {
    let filter = parse_division(matches)?;
    let divisions: Vec<Division> = match filter {
        Some(division) => vec![division],
        None => Division::ALL.to_vec(),
    };

    if matches.get_flag("json") {
        let rows: Vec<&Standing> = divisions
            .iter()
            .flat_map(|division| content.standings_for(*division))
            .collect();
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} season, updated {}",
        content.season,
        content.updated.format("%-d %B %Y")
    );
    for division in divisions {
        println!();
        print_division_table(content, division);
    }
    Ok(())
}

fn print_division_table(content: &SiteContent, division: Division) {
    println!("{}", division.label());
    let rows = content.standings_for(division);
    if rows.is_empty() {
        println!("  (no scored rounds yet)");
        return;
    }
    println!(
        "  {:>2}  {:<18} {:>4} {:>6} {:>6} {:>5}  {}",
        "#", "Pundit", "Pld", "Exact", "Close", "Pts", "Form"
    );
    for row in rows {
        println!(
            "  {:>2}  {:<18} {:>4} {:>6} {:>6} {:>5}  {}",
            row.position, row.pundit, row.played, row.exact, row.close, row.points, row.form
        );
    }
}

fn run_pundits(content: &SiteContent, matches: &ArgMatches) -> Result<()> {
    let filter = parse_division(matches)?;
    let roster = content.pundits_for(filter);

    if matches.get_flag("json") {
        println!("{}", serde_json::to_string_pretty(&roster)?);
        return Ok(());
    }

    for pundit in roster {
        let seasons = if pundit.seasons == 1 { "season" } else { "seasons" };
        println!(
            "{:<18} {:<18} joined {}, {} {seasons}",
            pundit.name,
            pundit.division.label(),
            pundit.joined.format("%B %Y"),
            pundit.seasons
        );
    }
    Ok(())
}

fn run_themes() {
    for theme in kotp_tui::themes::all() {
        println!("{:<12} {:<26} {}", theme.id, theme.name, theme.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches_for(args: &[&str]) -> ArgMatches {
        build_cli().try_get_matches_from(args).expect("arguments parse")
    }

    #[test]
    fn standings_accepts_a_division_filter() {
        let matches = matches_for(&["kotp", "standings", "--division", "sunday"]);
        let (_, sub) = matches.subcommand().expect("subcommand present");
        assert_eq!(parse_division(sub).expect("valid division"), Some(Division::Sunday));
    }

    #[test]
    fn an_unknown_division_is_rejected_by_name() {
        let matches = matches_for(&["kotp", "pundits", "-d", "vanarama"]);
        let (_, sub) = matches.subcommand().expect("subcommand present");
        let err = parse_division(sub).expect_err("must not parse");
        assert!(err.to_string().contains("vanarama"));
    }

    #[test]
    fn the_division_filter_is_optional() {
        let matches = matches_for(&["kotp", "pundits"]);
        let (_, sub) = matches.subcommand().expect("subcommand present");
        assert_eq!(parse_division(sub).expect("absent is fine"), None);
    }

    #[test]
    fn the_theme_flag_is_accepted_after_a_subcommand() {
        let matches = matches_for(&["kotp", "standings", "--theme", "pitch"]);
        assert_eq!(matches.get_one::<String>("theme").map(String::as_str), Some("pitch"));
    }

    #[test]
    fn an_unknown_theme_names_the_catalog() {
        let err = apply_theme_choice("solarized").expect_err("not in the catalog");
        let message = err.to_string();
        assert!(message.contains("solarized"));
        assert!(message.contains("pitch"));
    }

    #[test]
    fn bare_invocation_has_no_subcommand() {
        let matches = matches_for(&["kotp"]);
        assert!(matches.subcommand_name().is_none());
    }
}
