use super::Scorecard;
use crate::error::{GolfError, Result};
use crate::model::{Game, Player, Score, TeamPairing, DEFAULT_PAR, HOLES};
use nom::{
    branch::alt,
    bytes::complete::take_while1,
    character::complete::{char, none_of, one_of, space0, space1, u32 as number},
    combinator::all_consuming,
    multi::{fold_many0, separated_list1},
    sequence::{delimited, preceded},
    IResult, Parser,
};

/// A parsed tag pair
#[derive(Debug, Clone)]
pub struct TagPair {
    pub name: String,
    pub value: String,
}

fn tag_name(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_').parse(input)
}

/// One character of a quoted value; `\"` and `\\` are escapes
fn quoted_char(input: &str) -> IResult<&str, char> {
    alt((preceded(char('\\'), one_of("\\\"")), none_of("\\\""))).parse(input)
}

fn quoted_string(input: &str) -> IResult<&str, String> {
    delimited(
        char('"'),
        fold_many0(quoted_char, String::new, |mut s, c| {
            s.push(c);
            s
        }),
        char('"'),
    )
    .parse(input)
}

/// Parse a tag pair: [TagName "value"]
fn tag_pair(input: &str) -> IResult<&str, TagPair> {
    let (input, _) = char('[').parse(input)?;
    let (input, _) = space0.parse(input)?;
    let (input, name) = tag_name(input)?;
    let (input, _) = space0.parse(input)?;
    let (input, value) = quoted_string(input)?;
    let (input, _) = space0.parse(input)?;
    let (input, _) = char(']').parse(input)?;

    Ok((
        input,
        TagPair {
            name: name.to_string(),
            value,
        },
    ))
}

/// Whitespace-separated unsigned numbers
fn numbers(input: &str) -> IResult<&str, Vec<u32>> {
    delimited(space0, separated_list1(space1, number), space0).parse(input)
}

/// A leading id followed by free text: `3 Cat Smith`
fn id_and_name(input: &str) -> IResult<&str, (u32, &str)> {
    let (input, _) = space0.parse(input)?;
    let (input, id) = number(input)?;
    let (input, _) = space1.parse(input)?;
    Ok(("", (id, input.trim())))
}

fn parse_numbers(tag: &TagPair, expected: usize, line_no: usize) -> Result<Vec<u32>> {
    match all_consuming(numbers).parse(tag.value.as_str()) {
        Ok((_, values)) if values.len() == expected => Ok(values),
        _ => Err(GolfError::Parse(format!(
            "line {}: {} expects {} numbers, got \"{}\"",
            line_no, tag.name, expected, tag.value
        ))),
    }
}

fn parse_value<T: std::str::FromStr>(tag: &TagPair, line_no: usize) -> Result<T> {
    tag.value.trim().parse().map_err(|_| {
        GolfError::Parse(format!(
            "line {}: bad {} value \"{}\"",
            line_no, tag.name, tag.value
        ))
    })
}

fn to_u8(value: u32, tag: &TagPair, line_no: usize) -> Result<u8> {
    u8::try_from(value).map_err(|_| {
        GolfError::Parse(format!("line {}: {} value {} too large", line_no, tag.name, value))
    })
}

/// Read a scorecard from text
pub fn read_scorecard(content: &str) -> Result<Scorecard> {
    let mut game = Game::new(1, "", "", 0.0);
    let mut current_hole = None;
    let mut players: Vec<Player> = Vec::new();
    let mut opt_outs = Vec::new();
    // (hole, player, strokes)
    let mut strokes: Vec<(u8, u32, u32)> = Vec::new();
    let mut pars = [DEFAULT_PAR; HOLES as usize];
    let mut pairings = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = line.trim();

        if line.is_empty() || line.starts_with(';') || line.starts_with('%') {
            continue;
        }

        let tag = match tag_pair(line) {
            Ok((_, tag)) => tag,
            Err(_) => {
                return Err(GolfError::Parse(format!(
                    "line {}: expected [Tag \"value\"], got \"{}\"",
                    line_no, line
                )))
            }
        };

        match tag.name.as_str() {
            "Game" => game.id = parse_value(&tag, line_no)?,
            "Location" => game.location = tag.value.clone(),
            "Date" => game.date = crate::model::normalize_date(&tag.value),
            "BetUnit" => game.bet_unit = parse_value(&tag, line_no)?,
            "StartingHole" => game.starting_hole = parse_value(&tag, line_no)?,
            "CurrentHole" => current_hole = Some(parse_value(&tag, line_no)?),
            "Completed" => game.is_completed = parse_value(&tag, line_no)?,
            "MaxScore" => game.max_score_limit = parse_value(&tag, line_no)?,
            "Player" => {
                let (id, name) = match id_and_name(&tag.value) {
                    Ok((_, (id, name))) if !name.is_empty() => (id, name),
                    _ => {
                        return Err(GolfError::Parse(format!(
                            "line {}: Player expects \"<id> <name>\"",
                            line_no
                        )))
                    }
                };
                let position = players.len() as u8 + 1;
                players.push(Player::new(id, 0, name).with_position(position));
            }
            "OptOut" => opt_outs.push(parse_value::<u32>(&tag, line_no)?),
            "Pairing" => {
                let v = parse_numbers(&tag, 5, line_no)?;
                let section = to_u8(v[0], &tag, line_no)?;
                pairings.push(TeamPairing::new(0, section, [v[1], v[2]], [v[3], v[4]]));
            }
            "Par" => {
                let v = parse_numbers(&tag, 2, line_no)?;
                let hole = to_u8(v[0], &tag, line_no)?;
                let par = to_u8(v[1], &tag, line_no)?;
                match pars.get_mut((hole as usize).wrapping_sub(1)) {
                    Some(slot) => *slot = par,
                    None => return Err(GolfError::InvalidHole(hole)),
                }
            }
            "Score" => {
                let v = parse_numbers(&tag, 3, line_no)?;
                strokes.push((to_u8(v[0], &tag, line_no)?, v[1], v[2]));
            }
            _ => log::warn!("line {}: ignoring unknown tag {}", line_no, tag.name),
        }
    }

    // Starting hole sets the resume pointer unless one was given
    game.current_hole = current_hole.unwrap_or(game.starting_hole);
    game.validate()?;

    for player in &mut players {
        player.game_id = game.id;
    }
    for id in opt_outs {
        match players.iter_mut().find(|p| p.id == id) {
            Some(p) => p.participates_in_individual = false,
            None => return Err(GolfError::PlayerNotFound(id)),
        }
    }

    let scores = strokes
        .into_iter()
        .map(|(hole, player, s)| {
            let par = pars
                .get((hole as usize).wrapping_sub(1))
                .copied()
                .unwrap_or(DEFAULT_PAR);
            Score::new(game.id, player, hole, s).with_par(par)
        })
        .collect();
    for pairing in &mut pairings {
        pairing.game_id = game.id;
    }

    Ok(Scorecard {
        game,
        players,
        scores,
        pairings,
    })
}

/// Read a scorecard file
pub fn read_scorecard_file(path: &std::path::Path) -> Result<Scorecard> {
    let content = std::fs::read_to_string(path)?;
    let card = read_scorecard(&content)?;
    log::info!(
        "Read {} players and {} scores from {}",
        card.players.len(),
        card.scores.len(),
        path.display()
    );
    Ok(card)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD: &str = r#"
; Saturday four-ball
[Game "3"]
[Location "Pine Hollow"]
[Date "6/1/2024"]
[BetUnit "2.5"]
[StartingHole "10"]
[Player "1 Ann Lee"]
[Player "2 Bob"]
[Player "3 Cat"]
[Player "4 Dan"]
[OptOut "4"]
[Pairing "1 1 2 3 4"]
[Par "10 5"]
[Score "10 1 5"]
[Score "10 2 6"]
[Score "11 1 4"]
[Weather "sunny"]
"#;

    #[test]
    fn test_parse_tag_pair() {
        let (_, tag) = tag_pair("[Score \"10 1 5\"]").unwrap();
        assert_eq!(tag.name, "Score");
        assert_eq!(tag.value, "10 1 5");
    }

    #[test]
    fn test_quoted_value_escapes() {
        let (_, tag) = tag_pair(r#"[Player "2 Bob \"Ace\" Smith"]"#).unwrap();
        assert_eq!(tag.value, r#"2 Bob "Ace" Smith"#);
        let (_, tag) = tag_pair(r#"[Location "C:\\Links"]"#).unwrap();
        assert_eq!(tag.value, r"C:\Links");
        assert!(tag_pair(r#"[Location "open]"#).is_err());
    }

    #[test]
    fn test_numbers() {
        let (_, v) = numbers(" 1  2 3 ").unwrap();
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn test_read_scorecard() {
        let card = read_scorecard(CARD).unwrap();
        assert_eq!(card.game.id, 3);
        assert_eq!(card.game.location, "Pine Hollow");
        assert_eq!(card.game.date, "2024-06-01");
        assert_eq!(card.game.bet_unit, 2.5);
        assert_eq!(card.game.starting_hole, 10);
        assert_eq!(card.game.current_hole, 10);

        assert_eq!(card.players.len(), 4);
        assert_eq!(card.players[0].name, "Ann Lee");
        assert_eq!(card.players[3].position, 4);
        assert!(!card.players[3].participates_in_individual);
        assert!(card.players.iter().all(|p| p.game_id == 3));

        assert_eq!(card.scores.len(), 3);
        assert_eq!(card.scores[0].par, 5);
        assert_eq!(card.scores[2].par, 4);
        assert_eq!(card.pairings[0].team2(), [3, 4]);
        assert_eq!(card.pairings[0].game_id, 3);
    }

    #[test]
    fn test_bad_lines_are_errors() {
        assert!(read_scorecard("[Score \"1 2\"]").is_err());
        assert!(read_scorecard("[Player \"Ann\"]").is_err());
        assert!(read_scorecard("not a tag").is_err());
        assert!(read_scorecard("[StartingHole \"19\"]").is_err());
        assert!(read_scorecard("[Par \"19 4\"]").is_err());
        assert!(matches!(
            read_scorecard("[Player \"1 Ann\"]\n[OptOut \"2\"]"),
            Err(GolfError::PlayerNotFound(2))
        ));
    }

    #[test]
    fn test_into_store_validates() {
        let card = read_scorecard(CARD).unwrap();
        assert!(card.into_store().is_ok());

        let bad = read_scorecard("[Player \"1 Ann\"]\n[Score \"1 1 0\"]").unwrap();
        assert!(bad.into_store().is_err());
    }
}
