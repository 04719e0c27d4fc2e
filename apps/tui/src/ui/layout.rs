use ratatui::layout::{Constraint, Direction, Layout, Margin, Rect};

/// Rows the mascot card reserves around its art: two borders and a caption.
pub const MASCOT_INSET_ROWS: u16 = 3;

/// Card positions for one frame of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardLayout {
    pub header: Rect,
    pub ticker: Rect,
    pub keywords: Rect,
    pub cloud: Rect,
    pub mascot: Rect,
    pub velocity: Rect,
    pub explore: Rect,
    pub footer: Rect,
}

impl DashboardLayout {
    pub fn new(area: Rect) -> Self {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Length(3),  // Ticker
                Constraint::Min(12),    // Keywords, cloud, chart
                Constraint::Length(13), // Explore grid
                Constraint::Length(1),  // Shortcuts
            ])
            .split(area);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(26), Constraint::Percentage(74)])
            .split(rows[2]);

        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(body[1]);

        let top = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(78), Constraint::Percentage(22)])
            .split(right[0]);

        Self {
            header: rows[0],
            ticker: rows[1],
            keywords: body[0],
            cloud: top[0],
            mascot: sync_tall_heights(top[0], top[1]),
            velocity: right[1],
            explore: rows[3],
            footer: rows[4],
        }
    }

    /// Drawing area inside the cloud card's border.
    pub fn cloud_canvas(&self) -> Rect {
        self.cloud.inner(Margin::new(1, 1))
    }

    /// Drawing area inside the chart card's border.
    pub fn velocity_canvas(&self) -> Rect {
        self.velocity.inner(Margin::new(1, 1))
    }

    pub fn mascot_art(&self) -> Rect {
        mascot_art_area(self.mascot)
    }
}

/// Gives the mascot card the cloud card's vertical extent so the two read as
/// one row.
pub fn sync_tall_heights(cloud: Rect, mascot: Rect) -> Rect {
    Rect {
        y: cloud.y,
        height: cloud.height,
        ..mascot
    }
}

/// The card minus its border and caption row.
pub fn mascot_art_area(card: Rect) -> Rect {
    Rect {
        x: card.x.saturating_add(1),
        y: card.y.saturating_add(2),
        width: card.width.saturating_sub(2),
        height: card.height.saturating_sub(MASCOT_INSET_ROWS),
    }
}
