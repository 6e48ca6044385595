//! Plain-text and CSV renderings of a game's results

use crate::error::Result;
use crate::model::{ContestTally, Game, GameId};
use crate::results::{compute_results_for_game, standings, PlayerResult, ResultsMap};
use crate::store::GameStore;
use serde::Serialize;
use std::fmt::Write;
use std::path::Path;

/// Rendering options for reports
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub currency_symbol: String,
    /// Append each player's stroke total to the combined standings
    pub show_strokes: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            show_strokes: false,
        }
    }
}

impl ReportConfig {
    pub fn with_currency(mut self, symbol: impl Into<String>) -> Self {
        self.currency_symbol = symbol.into();
        self
    }

    pub fn with_strokes(mut self, show: bool) -> Self {
        self.show_strokes = show;
        self
    }
}

/// Format money with two decimals and the sign ahead of the symbol: -$5.00
pub fn format_money(amount: f64, symbol: &str) -> String {
    let cents = (amount * 100.0).round();
    if cents < 0.0 {
        format!("-{}{:.2}", symbol, -cents / 100.0)
    } else {
        format!("{}{:.2}", symbol, cents.abs() / 100.0)
    }
}

fn tally_line(tally: &ContestTally, symbol: &str) -> String {
    format!(
        "W{} D{} L{} = {}",
        tally.wins,
        tally.draws,
        tally.losses,
        format_money(tally.winnings, symbol)
    )
}

/// Results in seating order
fn by_seat(results: &ResultsMap) -> Vec<&PlayerResult> {
    let mut ordered: Vec<&PlayerResult> = results.values().collect();
    ordered.sort_by(|a, b| {
        a.player
            .position
            .cmp(&b.player.position)
            .then(a.player.id.cmp(&b.player.id))
    });
    ordered
}

/// Render the shareable text summary of a game's results
pub fn format_report(game: &Game, results: &ResultsMap, config: &ReportConfig) -> String {
    let symbol = config.currency_symbol.as_str();
    let seated = by_seat(results);
    let mut out = String::new();

    // Writing to a String cannot fail
    let _ = writeln!(out, "GOLF GAME RESULTS");
    let _ = writeln!(out, "Location: {}", game.location);
    let _ = writeln!(out, "Date: {}", game.date);
    let _ = writeln!(out, "Bet Unit: {}", format_money(game.bet_unit, symbol));

    out.push_str("\nINDIVIDUAL GAME\n");
    for r in &seated {
        if r.player.participates_in_individual {
            let _ = writeln!(out, "{}: {}", r.player.name, tally_line(&r.individual, symbol));
        } else {
            let _ = writeln!(out, "{}: Did not participate", r.player.name);
        }
    }

    out.push_str("\nTEAM GAME\n");
    for r in &seated {
        let _ = writeln!(out, "{}: {}", r.player.name, tally_line(&r.team, symbol));
    }

    out.push_str("\nCOMBINED TOTALS\n");
    for (rank, r) in standings(results).iter().enumerate() {
        let _ = write!(
            out,
            "{}. {}: {}",
            rank + 1,
            r.player.name,
            format_money(r.combined_winnings, symbol)
        );
        if config.show_strokes {
            let _ = write!(out, " ({} strokes)", r.total_score);
        }
        out.push('\n');
    }

    out
}

/// Compute and render the report for a stored game
pub fn format_shareable_report<S: GameStore + ?Sized>(
    store: &S,
    game_id: GameId,
    config: &ReportConfig,
) -> Result<String> {
    let game = store.get_game(game_id)?;
    let results = compute_results_for_game(store, game_id)?;
    Ok(format_report(&game, &results, config))
}

/// One row of the results CSV export
#[derive(Debug, Serialize)]
#[serde(rename_all = "PascalCase")]
struct ResultRow<'a> {
    player_id: u32,
    name: &'a str,
    strokes: u32,
    individual_wins: Option<u32>,
    individual_draws: Option<u32>,
    individual_losses: Option<u32>,
    individual_winnings: Option<f64>,
    team_wins: u32,
    team_draws: u32,
    team_losses: u32,
    team_winnings: f64,
    combined_winnings: f64,
}

impl<'a> From<&'a PlayerResult> for ResultRow<'a> {
    fn from(r: &'a PlayerResult) -> Self {
        // Blank individual columns for players who sat that game out
        let ind = r.player.participates_in_individual.then_some(&r.individual);
        Self {
            player_id: r.player.id,
            name: &r.player.name,
            strokes: r.total_score,
            individual_wins: ind.map(|t| t.wins),
            individual_draws: ind.map(|t| t.draws),
            individual_losses: ind.map(|t| t.losses),
            individual_winnings: ind.map(|t| t.winnings),
            team_wins: r.team.wins,
            team_draws: r.team.draws,
            team_losses: r.team.losses,
            team_winnings: r.team.winnings,
            combined_winnings: r.combined_winnings,
        }
    }
}

/// Write one CSV row per player, in seating order
pub fn write_results_csv(results: &ResultsMap, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for r in by_seat(results) {
        writer.serialize(ResultRow::from(r))?;
    }
    writer.flush()?;
    Ok(())
}
