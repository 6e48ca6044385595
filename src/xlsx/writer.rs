use crate::error::Result;
use crate::model::{section_for, Game, GameId, Player, Score};
use crate::results::{compute_results_for_game, standings, ResultsMap};
use crate::store::GameStore;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::collections::HashMap;
use std::path::Path;

/// Compute a stored game's results and write them to an Excel file
pub fn write_game_to_xlsx<S: GameStore + ?Sized>(store: &S, game_id: GameId, path: &Path) -> Result<()> {
    let game = store.get_game(game_id)?;
    let players = store.list_players_for_game(game_id)?;
    let scores = store.list_scores_for_game(game_id)?;
    let results = compute_results_for_game(store, game_id)?;
    write_results_to_xlsx(&game, &players, &scores, &results, path)
}

/// Write results and the hole-by-hole scorecard to an Excel file
pub fn write_results_to_xlsx(
    game: &Game,
    players: &[Player],
    scores: &[Score],
    results: &ResultsMap,
    path: &Path,
) -> Result<()> {
    let mut workbook = Workbook::new();

    let summary_sheet = workbook.add_worksheet();
    write_summary_sheet(summary_sheet, game, results)?;

    let scorecard_sheet = workbook.add_worksheet();
    write_scorecard_sheet(scorecard_sheet, game, players, scores)?;

    workbook.save(path)?;
    log::info!("Wrote results for game {} to {}", game.id, path.display());
    Ok(())
}

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_border_bottom(FormatBorder::Thin)
}

/// Write per-player totals, ordered by combined winnings
fn write_summary_sheet(sheet: &mut Worksheet, game: &Game, results: &ResultsMap) -> Result<()> {
    sheet.set_name("Summary")?;

    sheet.set_column_width(0, 20)?; // Player
    sheet.set_column_width(1, 8)?; // Strokes
    for col in 2..=11 {
        sheet.set_column_width(col, 9)?;
    }

    let title_format = Format::new().set_bold();
    sheet.write_string_with_format(0, 0, &game.location, &title_format)?;
    sheet.write_string(0, 1, &game.date)?;
    sheet.write_string(0, 3, "Bet Unit")?;
    let money_format = Format::new()
        .set_align(FormatAlign::Right)
        .set_num_format("$#,##0.00;-$#,##0.00");
    sheet.write_number_with_format(0, 4, game.bet_unit, &money_format)?;

    let headers = [
        "Player", "Strokes",
        "Ind W", "Ind D", "Ind L", "Ind $",
        "Team W", "Team D", "Team L", "Team $",
        "Combined $",
    ];
    let header_format = header_format();
    for (col, header) in headers.iter().enumerate() {
        sheet.write_string_with_format(2, col as u16, *header, &header_format)?;
    }

    let center_format = Format::new().set_align(FormatAlign::Center);

    for (idx, r) in standings(results).iter().enumerate() {
        let row = (idx + 3) as u32;

        sheet.write_string(row, 0, &r.player.name)?;
        sheet.write_number_with_format(row, 1, r.total_score as f64, &center_format)?;

        if r.player.participates_in_individual {
            sheet.write_number_with_format(row, 2, r.individual.wins as f64, &center_format)?;
            sheet.write_number_with_format(row, 3, r.individual.draws as f64, &center_format)?;
            sheet.write_number_with_format(row, 4, r.individual.losses as f64, &center_format)?;
            sheet.write_number_with_format(row, 5, r.individual.winnings, &money_format)?;
        } else {
            sheet.write_string_with_format(row, 2, "-", &center_format)?;
        }

        sheet.write_number_with_format(row, 6, r.team.wins as f64, &center_format)?;
        sheet.write_number_with_format(row, 7, r.team.draws as f64, &center_format)?;
        sheet.write_number_with_format(row, 8, r.team.losses as f64, &center_format)?;
        sheet.write_number_with_format(row, 9, r.team.winnings, &money_format)?;
        sheet.write_number_with_format(row, 10, r.combined_winnings, &money_format)?;
    }

    Ok(())
}

/// Write holes across in playing order, with section and par rows above the players
/// Total strokes and strokes relative to par over the holes a player has scored
fn player_totals(scores: &[Score], player_id: u32) -> (u32, i32) {
    scores
        .iter()
        .filter(|s| s.player_id == player_id)
        .fold((0, 0), |(total, to_par), s| (total + s.strokes, to_par + s.to_par()))
}

fn format_to_par(to_par: i32) -> String {
    match to_par {
        0 => "E".to_string(),
        n if n > 0 => format!("+{}", n),
        n => n.to_string(),
    }
}

fn write_scorecard_sheet(
    sheet: &mut Worksheet,
    game: &Game,
    players: &[Player],
    scores: &[Score],
) -> Result<()> {
    sheet.set_name("Scorecard")?;
    sheet.set_column_width(0, 20)?;

    let header_format = header_format();
    let center_format = Format::new().set_align(FormatAlign::Center);
    let label_format = Format::new().set_bold();

    let strokes: HashMap<(u32, u8), u32> = scores
        .iter()
        .map(|s| ((s.player_id, s.hole), s.strokes))
        .collect();
    let pars: HashMap<u8, u8> = scores.iter().map(|s| (s.hole, s.par)).collect();

    sheet.write_string_with_format(0, 0, "Hole", &header_format)?;
    sheet.write_string_with_format(1, 0, "Section", &label_format)?;
    sheet.write_string_with_format(2, 0, "Par", &label_format)?;

    let order = game.playing_order();
    let total_col = order.len() as u16 + 1;
    sheet.write_string_with_format(0, total_col, "Total", &header_format)?;
    sheet.write_string_with_format(0, total_col + 1, "To Par", &header_format)?;

    for (idx, &hole) in order.iter().enumerate() {
        let col = idx as u16 + 1;
        sheet.set_column_width(col, 5)?;
        sheet.write_number_with_format(0, col, hole as f64, &header_format)?;
        let section = section_for(hole, game.starting_hole);
        sheet.write_number_with_format(1, col, section as f64, &center_format)?;
        if let Some(&par) = pars.get(&hole) {
            sheet.write_number_with_format(2, col, par as f64, &center_format)?;
        }
    }

    let mut seated: Vec<&Player> = players.iter().collect();
    seated.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));

    for (idx, player) in seated.iter().enumerate() {
        let row = (idx + 3) as u32;
        sheet.write_string(row, 0, &player.name)?;

        for (hole_idx, &hole) in order.iter().enumerate() {
            if let Some(&s) = strokes.get(&(player.id, hole)) {
                sheet.write_number_with_format(row, hole_idx as u16 + 1, s as f64, &center_format)?;
            }
        }
        let (total, to_par) = player_totals(scores, player.id);
        sheet.write_number_with_format(row, total_col, total as f64, &center_format)?;
        sheet.write_string_with_format(row, total_col + 1, &format_to_par(to_par), &center_format)?;
    }

    Ok(())
}
