use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use std::path::{Path, PathBuf};

use round_robin_golf::model::{
    all_holes, holes_in_section, validate_hole, validate_pairings, HOLES, SECTIONS,
};
use round_robin_golf::scorecard::{self, Scorecard};
use round_robin_golf::store::{self, GameStore, MemoryStore};
use round_robin_golf::{report, xlsx, GameId, ReportConfig};

#[derive(Parser)]
#[command(name = "round-robin-golf")]
#[command(about = "Settle four-player round-robin golf bets", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the shareable results report
    Report {
        /// Scorecard files or CSV table directories
        #[arg(required = true)]
        inputs: Vec<PathBuf>,

        /// Only report this game (CSV directories may hold several)
        #[arg(long)]
        game: Option<GameId>,

        /// Currency symbol for amounts
        #[arg(long, env = "RRG_CURRENCY", default_value = "$")]
        currency: String,

        /// Show stroke totals in the combined standings
        #[arg(long)]
        strokes: bool,

        /// Number of parallel threads (default: number of CPU cores)
        #[arg(short, long, env = "RRG_THREADS")]
        threads: Option<usize>,
    },

    /// Export results to Excel (.xlsx) or CSV (.csv)
    Export {
        /// Scorecard file or CSV table directory
        input: PathBuf,

        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Game to export (defaults to the only game in the input)
        #[arg(long)]
        game: Option<GameId>,
    },

    /// Show which holes fall in each section
    Sections {
        /// Hole the round starts on
        #[arg(short, long, default_value = "1")]
        starting_hole: u8,
    },

    /// Display information about a scorecard or CSV directory
    Info {
        input: PathBuf,

        /// Currency symbol for amounts
        #[arg(long, env = "RRG_CURRENCY", default_value = "$")]
        currency: String,
    },

    /// Check scores and pairings for consistency
    Validate {
        input: PathBuf,
    },

    /// Convert between a scorecard file and a CSV table directory
    Convert {
        input: PathBuf,

        /// Output scorecard file or directory
        #[arg(short, long)]
        output: PathBuf,

        /// Game to convert when writing a scorecard
        #[arg(long)]
        game: Option<GameId>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Report { inputs, game, currency, strokes, threads } => {
            let config = ReportConfig::default()
                .with_currency(currency)
                .with_strokes(strokes);
            report_all(&inputs, game, &config, threads)?;
        }
        Commands::Export { input, output, game } => {
            export(&input, &output, game)?;
        }
        Commands::Sections { starting_hole } => {
            sections(starting_hole)?;
        }
        Commands::Info { input, currency } => {
            info(&input, &currency)?;
        }
        Commands::Validate { input } => {
            validate(&input)?;
        }
        Commands::Convert { input, output, game } => {
            convert(&input, &output, game)?;
        }
    }

    Ok(())
}

/// Load a CSV table directory or a scorecard file
fn load(input: &Path) -> Result<MemoryStore> {
    if input.is_dir() {
        store::read_csv_dir(input)
            .with_context(|| format!("Failed to read CSV directory {}", input.display()))
    } else {
        let card = scorecard::read_scorecard_file(input)
            .with_context(|| format!("Failed to read scorecard {}", input.display()))?;
        card.into_store()
            .with_context(|| format!("Invalid scorecard {}", input.display()))
    }
}

/// Pick the requested game, or the only one present
fn single_game(store: &MemoryStore, game: Option<GameId>) -> Result<GameId> {
    if let Some(id) = game {
        return Ok(id);
    }
    match store.games().as_slice() {
        [only] => Ok(only.id),
        [] => anyhow::bail!("Input contains no games"),
        games => anyhow::bail!("Input contains {} games; choose one with --game", games.len()),
    }
}

fn report_all(
    inputs: &[PathBuf],
    game: Option<GameId>,
    config: &ReportConfig,
    threads: Option<usize>,
) -> Result<()> {
    // Configure thread pool
    if let Some(n) = threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .ok(); // Ignore error if already initialized
    }

    let reports: Vec<Result<String>> = inputs
        .par_iter()
        .map(|input| render_reports(input, game, config))
        .collect();

    for (input, rendered) in inputs.iter().zip(reports) {
        let text = rendered.with_context(|| format!("Failed to report {}", input.display()))?;
        println!("{}", text);
    }
    Ok(())
}

fn render_reports(input: &Path, game: Option<GameId>, config: &ReportConfig) -> Result<String> {
    let store = load(input)?;
    let ids: Vec<GameId> = match game {
        Some(id) => vec![id],
        None => store.games().iter().map(|g| g.id).collect(),
    };

    let mut texts = Vec::new();
    for id in ids {
        texts.push(report::format_shareable_report(&store, id, config)?);
    }
    Ok(texts.join("\n"))
}

fn export(input: &Path, output: &Path, game: Option<GameId>) -> Result<()> {
    let output_ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let store = load(input)?;
    let game_id = single_game(&store, game)?;

    match output_ext.as_str() {
        "xlsx" => {
            println!("Writing Excel file: {}", output.display());
            xlsx::write_game_to_xlsx(&store, game_id, output)
                .context("Failed to write Excel file")?;
        }
        "csv" => {
            println!("Writing CSV file: {}", output.display());
            let results = round_robin_golf::compute_results_for_game(&store, game_id)?;
            report::write_results_csv(&results, output).context("Failed to write CSV file")?;
        }
        _ => {
            anyhow::bail!("Unsupported output format: {}", output_ext);
        }
    }

    println!("Done!");
    Ok(())
}

fn sections(starting_hole: u8) -> Result<()> {
    validate_hole(starting_hole)?;
    println!("Starting hole: {}", starting_hole);
    for section in 1..=SECTIONS {
        let holes: Vec<String> = holes_in_section(section, starting_hole)
            .iter()
            .map(|h| h.to_string())
            .collect();
        println!("  Section {}: holes {}", section, holes.join(", "));
    }
    Ok(())
}

fn info(input: &Path, currency: &str) -> Result<()> {
    let store = load(input)?;
    println!("Input: {}", input.display());
    println!();

    for game in store.games() {
        println!("Game {}: {} ({})", game.id, game.location, game.date);
        println!("  Bet unit: {}", report::format_money(game.bet_unit, currency));
        println!("  Starting hole: {}", game.starting_hole);
        println!("  Current hole: {}", game.current_hole);
        println!("  Completed: {}", if game.is_completed { "yes" } else { "no" });

        let players = store.list_players_for_game(game.id)?;
        println!("  Players: {}", players.len());
        for player in &players {
            let note = if player.participates_in_individual { "" } else { " (team game only)" };
            println!("    {}. {}{}", player.position, player.name, note);
        }

        let scores = store.list_scores_for_game(game.id)?;
        let mut complete = 0;
        for hole in all_holes() {
            if store.is_hole_complete(game.id, hole)? {
                complete += 1;
            }
        }
        println!(
            "  Scores: {} ({} of {} holes complete)",
            scores.len(),
            complete,
            HOLES
        );

        let pairings = store.list_team_pairings_for_game(game.id)?;
        println!("  Pairings: {}", pairings.len());
        for p in &pairings {
            println!(
                "    Section {}: {} & {} vs {} & {}",
                p.section,
                p.team1_player1_id,
                p.team1_player2_id,
                p.team2_player1_id,
                p.team2_player2_id
            );
        }
        println!();
    }
    Ok(())
}

fn validate(input: &Path) -> Result<()> {
    // Loading applies the entry checks on holes, pars and scores
    let store = load(input)?;
    let mut reports = Vec::new();
    let mut issue_count = 0;

    for game in store.games() {
        let players = store.list_players_for_game(game.id)?;
        let pairings = store.list_team_pairings_for_game(game.id)?;

        let mut issues = Vec::new();
        if players.len() != 4 {
            issues.push(format!("{} players (the team game needs 4)", players.len()));
        }
        if let Err(e) = validate_pairings(&pairings, &players) {
            issues.push(e.to_string());
        }
        if pairings.len() < SECTIONS as usize {
            issues.push(format!("{} of {} sections have pairings", pairings.len(), SECTIONS));
        }
        if !store.all_holes_complete(game.id)? {
            let mut missing = Vec::new();
            for hole in all_holes() {
                if !store.is_hole_complete(game.id, hole)? {
                    missing.push(hole.to_string());
                }
            }
            issues.push(format!("incomplete holes: {}", missing.join(", ")));
        }

        issue_count += issues.len();
        reports.push((game.id, players.len(), pairings.len(), issues));
    }

    if issue_count == 0 {
        println!("{} is valid", input.display());
    } else {
        println!("{}: {} issue(s) found", input.display(), issue_count);
    }
    for (game_id, player_count, pairing_count, issues) in reports {
        println!("  Game {}: {} players, {} pairings", game_id, player_count, pairing_count);
        if issues.is_empty() {
            println!("    No issues found");
        } else {
            println!("    Issues found:");
            for issue in issues {
                println!("      - {}", issue);
            }
        }
    }
    Ok(())
}

fn convert(input: &Path, output: &Path, game: Option<GameId>) -> Result<()> {
    let store = load(input)?;

    if input.is_dir() {
        let game_id = single_game(&store, game)?;
        println!("Writing scorecard: {}", output.display());
        let card = Scorecard::from_store(&store, game_id)?;
        scorecard::write_scorecard_file(&card, output).context("Failed to write scorecard")?;
    } else {
        println!("Writing CSV directory: {}", output.display());
        store::write_csv_dir(&store, output).context("Failed to write CSV directory")?;
    }

    println!("Done!");
    Ok(())
}
