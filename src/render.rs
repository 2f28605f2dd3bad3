use crate::assignment::Assignment;
use crate::crossword::Crossword;

/// Drawn for cells that can't hold a letter.
pub const BLOCK: char = '█';

/// Turn the given crossword and assignment into a rendered string: letters where a word has been
/// placed, a space for unfilled letter cells and `BLOCK` everywhere else.
pub fn render_grid(crossword: &Crossword, assignment: &Assignment) -> String {
    let structure = crossword.structure();
    let letters = assignment.letter_grid(crossword);

    letters
        .iter()
        .enumerate()
        .map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(|(col, letter)| {
                    if structure.is_open((row, col)) {
                        letter.unwrap_or(' ')
                    } else {
                        BLOCK
                    }
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::render_grid;
    use crate::assignment::Assignment;
    use crate::crossword::Crossword;
    use crate::structure::Structure;
    use crate::word_list::WordList;

    #[test]
    fn test_render_full_assignment() {
        let crossword = Crossword::new(
            Structure::from_template("___\n#_#\n#_#").unwrap(),
            WordList::new(["ANT", "CAT"]),
        );
        let assignment = Assignment::from_strings(&crossword, &[(0, "CAT"), (1, "ANT")]).unwrap();

        assert_eq!(render_grid(&crossword, &assignment), "CAT\n█N█\n█T█");
    }

    #[test]
    fn test_render_partial_assignment() {
        let crossword = Crossword::new(
            Structure::from_template("___\n#_#\n#_#").unwrap(),
            WordList::new(["ANT", "CAT"]),
        );
        let assignment = Assignment::from_strings(&crossword, &[(1, "ANT")]).unwrap();

        assert_eq!(render_grid(&crossword, &assignment), " A \n█N█\n█T█");
    }
}
