use super::Scorecard;
use crate::error::Result;
use crate::model::DEFAULT_PAR;
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::Path;

/// Backslash-escape quotes and backslashes inside a tag value
fn escape(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render a scorecard in the tag-pair format read by [`super::read_scorecard`]
pub fn write_scorecard(card: &Scorecard) -> String {
    let mut out = String::new();
    let game = &card.game;

    // Writing to a String cannot fail
    let _ = writeln!(out, "[Game \"{}\"]", game.id);
    let _ = writeln!(out, "[Location \"{}\"]", escape(&game.location));
    let _ = writeln!(out, "[Date \"{}\"]", escape(&game.date));
    let _ = writeln!(out, "[BetUnit \"{}\"]", game.bet_unit);
    let _ = writeln!(out, "[StartingHole \"{}\"]", game.starting_hole);
    let _ = writeln!(out, "[CurrentHole \"{}\"]", game.current_hole);
    let _ = writeln!(out, "[Completed \"{}\"]", game.is_completed);
    let _ = writeln!(out, "[MaxScore \"{}\"]", game.max_score_limit);
    out.push('\n');

    let mut players: Vec<_> = card.players.iter().collect();
    players.sort_by(|a, b| a.position.cmp(&b.position).then(a.id.cmp(&b.id)));
    for player in &players {
        let _ = writeln!(out, "[Player \"{} {}\"]", player.id, escape(&player.name));
    }
    for player in players.iter().filter(|p| !p.participates_in_individual) {
        let _ = writeln!(out, "[OptOut \"{}\"]", player.id);
    }

    if !card.pairings.is_empty() {
        out.push('\n');
        let mut pairings = card.pairings.clone();
        pairings.sort_by_key(|p| p.section);
        for p in &pairings {
            let _ = writeln!(
                out,
                "[Pairing \"{} {} {} {} {}\"]",
                p.section,
                p.team1_player1_id,
                p.team1_player2_id,
                p.team2_player1_id,
                p.team2_player2_id
            );
        }
    }

    // Par is stored per score; write it once per hole where it differs from the default
    let mut pars: BTreeMap<u8, u8> = BTreeMap::new();
    for score in &card.scores {
        pars.entry(score.hole).or_insert(score.par);
    }
    let mut scores = card.scores.clone();
    scores.sort_by_key(|s| (s.hole, s.player_id));

    if !scores.is_empty() {
        out.push('\n');
        for (hole, par) in pars.iter().filter(|(_, par)| **par != DEFAULT_PAR) {
            let _ = writeln!(out, "[Par \"{} {}\"]", hole, par);
        }
        for s in &scores {
            let _ = writeln!(out, "[Score \"{} {} {}\"]", s.hole, s.player_id, s.strokes);
        }
    }

    out
}

pub fn write_scorecard_file(card: &Scorecard, path: &Path) -> Result<()> {
    std::fs::write(path, write_scorecard(card))?;
    Ok(())
}
