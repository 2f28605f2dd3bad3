//! Image output: each letter cell is a white square with its letter centered in it, drawn on a
//! black background so that blocked cells and cell borders come out black.

use std::fs;
use std::path::Path;

use ab_glyph::{FontVec, PxScale};
use image::{ImageFormat, Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_text_mut, text_size};
use imageproc::rect::Rect;

use crate::assignment::Assignment;
use crate::crossword::Crossword;
use crate::error::{Error, Result};

pub const CELL_SIZE: u32 = 100;
pub const CELL_BORDER: u32 = 2;
const INTERIOR_SIZE: u32 = CELL_SIZE - 2 * CELL_BORDER;
const LETTER_SCALE: PxScale = PxScale { x: 80.0, y: 80.0 };
/// Pixels to lift each letter above the cell's center line.
const LETTER_RAISE: i32 = 10;

const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Load a TrueType or OpenType font to draw letters with.
pub fn load_font<P: AsRef<Path>>(path: P) -> Result<FontVec> {
    let path = path.as_ref();
    let data =
        fs::read(path).map_err(|err| Error::FileReadingError(err, path.display().to_string()))?;

    FontVec::try_from_vec(data).map_err(|_| Error::InvalidFont(path.display().to_string()))
}

/// Does this path name a raster image format we can write, judging by its extension?
pub fn is_image_path<P: AsRef<Path>>(path: P) -> bool {
    ImageFormat::from_path(path).is_ok()
}

/// Draw the grid. Without a font the letter cells are left blank.
pub fn render_image(
    crossword: &Crossword,
    assignment: &Assignment,
    font: Option<&FontVec>,
) -> RgbaImage {
    let structure = crossword.structure();
    let letters = assignment.letter_grid(crossword);

    let mut image = RgbaImage::from_pixel(
        structure.width() as u32 * CELL_SIZE,
        structure.height() as u32 * CELL_SIZE,
        BLACK,
    );

    for (row, line) in letters.iter().enumerate() {
        for (col, letter) in line.iter().enumerate() {
            if !structure.is_open((row, col)) {
                continue;
            }

            let x = (col as u32 * CELL_SIZE + CELL_BORDER) as i32;
            let y = (row as u32 * CELL_SIZE + CELL_BORDER) as i32;
            draw_filled_rect_mut(
                &mut image,
                Rect::at(x, y).of_size(INTERIOR_SIZE, INTERIOR_SIZE),
                WHITE,
            );

            if let (Some(letter), Some(font)) = (letter, font) {
                let text = letter.to_string();
                let (width, height) = text_size(LETTER_SCALE, font, &text);
                let left = x + (INTERIOR_SIZE as i32 - width as i32) / 2;
                let top = y + (INTERIOR_SIZE as i32 - height as i32) / 2 - LETTER_RAISE;

                draw_text_mut(&mut image, BLACK, left, top, LETTER_SCALE, font, &text);
            }
        }
    }

    image
}

/// Render the grid and write it to `path`, in the format its extension names.
pub fn save_image<P: AsRef<Path>>(
    crossword: &Crossword,
    assignment: &Assignment,
    font: Option<&FontVec>,
    path: P,
) -> Result<()> {
    render_image(crossword, assignment, font).save(path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{is_image_path, load_font, render_image, save_image, BLACK, CELL_SIZE, WHITE};
    use crate::assignment::Assignment;
    use crate::crossword::Crossword;
    use crate::error::Error;
    use crate::structure::Structure;
    use crate::word_list::WordList;

    /// ___
    /// #_#
    /// #_#
    fn crossword() -> Crossword {
        Crossword::new(
            Structure::from_template("___\n#_#\n#_#").unwrap(),
            WordList::new(["ANT", "CAT"]),
        )
    }

    #[test]
    fn test_cells_are_drawn_on_a_black_background() {
        let crossword = crossword();
        let assignment = Assignment::from_strings(&crossword, &[(0, "CAT"), (1, "ANT")]).unwrap();
        let image = render_image(&crossword, &assignment, None);

        assert_eq!(image.dimensions(), (3 * CELL_SIZE, 3 * CELL_SIZE));

        // Letter cell interiors.
        assert_eq!(*image.get_pixel(50, 50), WHITE);
        assert_eq!(*image.get_pixel(150, 150), WHITE);
        assert_eq!(*image.get_pixel(150, 250), WHITE);

        // Blocked cells.
        assert_eq!(*image.get_pixel(50, 150), BLACK);
        assert_eq!(*image.get_pixel(250, 250), BLACK);

        // Borders between letter cells.
        assert_eq!(*image.get_pixel(0, 0), BLACK);
        assert_eq!(*image.get_pixel(99, 50), BLACK);
        assert_eq!(*image.get_pixel(100, 50), BLACK);
        assert_eq!(*image.get_pixel(102, 50), WHITE);
    }

    #[test]
    fn test_image_paths_are_recognized_by_extension() {
        assert!(is_image_path("solution.png"));
        assert!(is_image_path("out/solution.png"));
        assert!(!is_image_path("solution.txt"));
        assert!(!is_image_path("solution"));
    }

    #[test]
    fn test_saved_image_reads_back() {
        let crossword = crossword();
        let assignment = Assignment::new(&crossword);
        let path = std::env::temp_dir().join("crossword_csp_test_saved_image.png");

        save_image(&crossword, &assignment, None, &path).unwrap();
        let saved = image::open(&path).unwrap().to_rgba8();
        let _ = std::fs::remove_file(&path);

        assert_eq!(saved, render_image(&crossword, &assignment, None));
    }

    #[test]
    fn test_invalid_font_is_rejected() {
        let path = std::env::temp_dir().join("crossword_csp_test_invalid_font.ttf");
        std::fs::write(&path, b"not a font").unwrap();
        let result = load_font(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(Error::InvalidFont(_))));
        assert!(matches!(
            load_font("/nonexistent/font.ttf"),
            Err(Error::FileReadingError(_, _))
        ));
    }
}
