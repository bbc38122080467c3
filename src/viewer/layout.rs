/// Column and row budget derived from the terminal size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub term_width: u16,
    pub term_height: u16,
    pub name_width: usize,
    pub bar_width: usize,
    pub display_rows: usize,
}

// Rank prefix, separator, count and "(+N today)" marker.
const RESERVED_COLUMNS: i32 = 30;
// Title, date, status, section header, progress bar and controls.
const RESERVED_LINES: i32 = 11;

impl Default for Layout {
    fn default() -> Self {
        Self::calculate(80, 24)
    }
}

impl Layout {
    pub fn calculate(term_width: u16, term_height: u16) -> Self {
        let width = i32::from(term_width);
        let height = i32::from(term_height);

        let available_for_name = width - RESERVED_COLUMNS;
        let name_width = if available_for_name > 20 {
            available_for_name.min(40)
        } else if available_for_name < 10 {
            10
        } else {
            20
        };

        let bar_available = width - 4 - name_width - 15;
        let bar_width = if bar_available >= 60 {
            60
        } else if bar_available > 20 {
            bar_available
        } else {
            40
        };

        let display_rows = (height - RESERVED_LINES).max(3);

        Self {
            term_width,
            term_height,
            name_width: name_width as usize,
            bar_width: bar_width as usize,
            display_rows: display_rows as usize,
        }
    }
}
