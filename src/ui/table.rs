use tabled::{settings::Style, Table, Tabled};

#[derive(Tabled)]
pub struct RoundTripRow {
    #[tabled(rename = "Load pattern")]
    pub pattern: String,
    #[tabled(rename = "Authors")]
    pub authors: usize,
    #[tabled(rename = "Round-trips")]
    pub round_trips: usize,
}

/// Summary of how many statements each load pattern needed
pub struct RoundTripTable {
    rows: Vec<RoundTripRow>,
}

impl RoundTripTable {
    pub fn new() -> Self {
        Self { rows: Vec::new() }
    }

    pub fn add_row(&mut self, pattern: &str, authors: usize, round_trips: usize) {
        self.rows.push(RoundTripRow {
            pattern: pattern.to_string(),
            authors,
            round_trips,
        });
    }

    pub fn build(&self) -> String {
        if self.rows.is_empty() {
            return String::new();
        }

        Table::new(&self.rows).with(Style::rounded()).to_string()
    }
}

impl Default for RoundTripTable {
    fn default() -> Self {
        Self::new()
    }
}
