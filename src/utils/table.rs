/// Column alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

/// Plain-text table for terminal output
pub struct Table {
    headers: Vec<String>,
    aligns: Vec<Align>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl Table {
    /// Create a table with the given headers, all columns left-aligned
    pub fn new(headers: &[&str]) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            aligns: vec![Align::Left; headers.len()],
            rows: Vec::new(),
            col_widths: headers.iter().map(|h| h.chars().count()).collect(),
        }
    }

    pub fn align(mut self, column: usize, align: Align) -> Self {
        if let Some(slot) = self.aligns.get_mut(column) {
            *slot = align;
        }
        self
    }

    /// Add a row; cells past the header count are dropped, missing ones are blank
    pub fn add_row<S: Into<String>>(&mut self, row: Vec<S>) {
        let mut cells: Vec<String> = row.into_iter().map(Into::into).collect();
        cells.resize(self.headers.len(), String::new());

        for (width, cell) in self.col_widths.iter_mut().zip(&cells) {
            *width = (*width).max(cell.chars().count());
        }
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn render(&self) -> String {
        let mut output = self.render_row(&self.headers);
        output.push('\n');
        output.push_str(&self.render_separator());
        output.push('\n');

        for row in &self.rows {
            output.push_str(&self.render_row(row));
            output.push('\n');
        }
        output
    }

    fn render_row(&self, row: &[String]) -> String {
        row.iter()
            .zip(self.col_widths.iter().zip(&self.aligns))
            .map(|(cell, (&width, align))| match align {
                Align::Left => format!("{:<width$}", cell, width = width),
                Align::Right => format!("{:>width$}", cell, width = width),
            })
            .collect::<Vec<_>>()
            .join(" | ")
            .trim_end()
            .to_string()
    }

    fn render_separator(&self) -> String {
        self.col_widths
            .iter()
            .map(|&width| "-".repeat(width))
            .collect::<Vec<_>>()
            .join("-+-")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(&["Description", "Price"]).align(1, Align::Right);
        table.add_row(vec!["Salary", "R$ 3000.00"]);
        table.add_row(vec!["Lunch", "- R$ 50.00"]);

        let rendered = table.render();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Description |      Price");
        assert_eq!(lines[1], "------------+-----------");
        assert_eq!(lines[2], "Salary      | R$ 3000.00");
        assert_eq!(lines[3], "Lunch       | - R$ 50.00");
    }

    #[test]
    fn test_short_rows_are_padded() {
        let mut table = Table::new(&["A", "B", "C"]);
        table.add_row(vec!["only"]);
        assert!(!table.is_empty());
        assert_eq!(table.render().lines().nth(2), Some("only |   |"));
    }
}
