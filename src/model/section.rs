//! Section rotation: three 6-hole bands counted from the starting hole

use super::game::HOLES;

pub const SECTIONS: u8 = 3;
pub const HOLES_PER_SECTION: u8 = HOLES / SECTIONS;

/// Calculate the section (1-3) a hole belongs to for a given starting hole.
///
/// Holes are renumbered so the starting hole is position 1, wrapping past 18.
/// Inputs must already be validated to 1-18.
pub fn section_for(hole: u8, starting_hole: u8) -> u8 {
    let position = (hole + HOLES - starting_hole) % HOLES + 1;
    (position - 1) / HOLES_PER_SECTION + 1
}

/// The six hole numbers of a section, in playing order
pub fn holes_in_section(section: u8, starting_hole: u8) -> [u8; HOLES_PER_SECTION as usize] {
    let first = (section - 1) * HOLES_PER_SECTION;
    let mut holes = [0; HOLES_PER_SECTION as usize];
    for (i, hole) in holes.iter_mut().enumerate() {
        *hole = (starting_hole - 1 + first + i as u8) % HOLES + 1;
    }
    holes
}
