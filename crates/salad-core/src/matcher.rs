use crate::puzzle::{Puzzle, Word};
use crate::Position;
use std::collections::HashSet;

/// Keys of the words found so far
pub type FoundSet = HashSet<String>;

/// Find the unfound word whose canonical path is exactly `path`.
///
/// Both the coordinate sequence and the letters read off the grid along it
/// must equal the word's path and display string.
pub fn find_match<'a>(puzzle: &'a Puzzle, path: &[Position], found: &FoundSet) -> Option<&'a Word> {
    if path.is_empty() {
        return None;
    }

    // A path that leaves the grid cannot spell anything
    let letters = puzzle.grid().spell(path).ok()?;

    puzzle
        .words()
        .iter()
        .filter(|word| !found.contains(word.key()))
        .find(|word| word.path() == path && word.display() == letters)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn puzzle() -> Puzzle {
        Puzzle::from_json(
            r#"{"id":"m","title":"M","size":3,
                "grid":"CAT\nXAX\nTAC",
                "words":[
                    {"key":"cat","display":"CAT","path":[[0,0],[0,1],[0,2]]},
                    {"key":"tac","display":"TAC","path":[[2,0],[2,1],[2,2]]},
                    {"key":"bad","display":"XYZ","path":[[1,0],[1,1],[1,2]]}
                ]}"#,
        )
        .unwrap()
    }

    fn path(cells: &[(usize, usize)]) -> Vec<Position> {
        cells.iter().copied().map(Position::from).collect()
    }

    #[test]
    fn test_exact_path_matches() {
        let puzzle = puzzle();
        let found = FoundSet::new();
        let word = find_match(&puzzle, &path(&[(0, 0), (0, 1), (0, 2)]), &found).unwrap();
        assert_eq!(word.key(), "cat");
    }

    #[test]
    fn test_same_letters_elsewhere_do_not_match() {
        let puzzle = puzzle();
        let found = FoundSet::new();
        // Spells CAT, but not along the canonical path of "cat"
        let reversed = path(&[(2, 2), (2, 1), (2, 0)]);
        assert_eq!(puzzle.grid().spell(&reversed).unwrap(), "CAT");
        assert!(find_match(&puzzle, &reversed, &found).is_none());
    }

    #[test]
    fn test_prefix_does_not_match() {
        let puzzle = puzzle();
        let found = FoundSet::new();
        assert!(find_match(&puzzle, &path(&[(0, 0), (0, 1)]), &found).is_none());
        assert!(find_match(&puzzle, &[], &found).is_none());
    }

    #[test]
    fn test_found_words_are_skipped() {
        let puzzle = puzzle();
        let mut found = FoundSet::new();
        found.insert("cat".to_string());
        assert!(find_match(&puzzle, &path(&[(0, 0), (0, 1), (0, 2)]), &found).is_none());
    }

    #[test]
    fn test_letter_mismatch_blocks_match() {
        let puzzle = puzzle();
        let found = FoundSet::new();
        assert!(find_match(&puzzle, &path(&[(1, 0), (1, 1), (1, 2)]), &found).is_none());
    }
}
