use super::app::{App, InputMode};
use crate::color::{classify, ColorCategory};
use crate::pitch::Pitch;
use crate::tuning::STRING_NAMES;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Clear, Paragraph, Row, Table, TableState};
use ratatui::Frame;

const HELP_TEXT: &[&str] = &[
    "Navigation",
    "  hjkl / arrows      move the cursor",
    "  gg / G             first / last position",
    "  0 / $              first / last string",
    "  Ctrl-d / Ctrl-u    half page down / up",
    "  Tab / Shift-Tab    switch stopped / harmonic table",
    "",
    "Search",
    "  /E4                every E4 (and Fb4)",
    "  /E                 every E in any octave",
    "  /C#                every C# or Db in any octave",
    "  n / N              next / previous match",
    "  *                  highlight the note under the cursor",
    "  Esc                clear search and highlight",
    "",
    "Commands",
    "  :retune C2 D2 F2 G2 A2 C3 D3",
    "  :load <preset>",
    "  :export <file.md>",
    "  :help   :quit",
    "  r                  open :retune",
    "",
    "  ?  help        q / Ctrl-c  quit",
];

pub fn render(frame: &mut Frame<'_>, app: &App) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(5),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    frame.render_widget(title_bar(app), layout[0]);
    // Selecting the cursor row scrolls the table when it is taller than the screen
    let mut table_state = TableState::default().with_selected(Some(app.navigator().cursor().row));
    frame.render_stateful_widget(grid_table(app), layout[1], &mut table_state);
    frame.render_widget(Paragraph::new(cell_info(app)), layout[2]);
    frame.render_widget(input_line(app), layout[3]);

    let status = Paragraph::new(app.status().unwrap_or_default().to_string())
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(status, layout[4]);

    if app.help_visible() {
        let area = centered_rect(70, 80, frame.area());
        frame.render_widget(Clear, area);
        let help = Paragraph::new(HELP_TEXT.join("\n"))
            .block(Block::default().title(" Help (any key closes) ").borders(Borders::ALL));
        frame.render_widget(help, area);
    }
}

pub(crate) fn category_color(category: ColorCategory) -> Color {
    match category {
        ColorCategory::Red => Color::Red,
        ColorCategory::Green => Color::Green,
        ColorCategory::Yellow => Color::Yellow,
        ColorCategory::Blue => Color::Blue,
        ColorCategory::Magenta => Color::Magenta,
        ColorCategory::Cyan => Color::Cyan,
        ColorCategory::White => Color::White,
    }
}

/// Style of one grid cell. Search state wins over highlight; the cursor reverses
/// whatever style the cell would otherwise have.
pub(crate) fn cell_style(app: &App, row: usize, col: usize, pitch: &Pitch) -> Style {
    let nav = app.navigator();
    let color = category_color(classify(pitch));

    let style = if nav.is_current_match(row, col) {
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else if nav.is_match(row, col) {
        Style::default()
            .bg(color)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    } else if nav.is_highlighted(pitch) {
        Style::default()
            .fg(color)
            .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
    } else {
        Style::default().fg(color)
    };

    if nav.cursor().position() == (row, col) {
        style.add_modifier(Modifier::REVERSED)
    } else {
        style
    }
}

fn title_bar(app: &App) -> Paragraph<'static> {
    let kind = app.navigator().active_kind();
    let mut spans = vec![
        Span::styled(
            app.title().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
    ];
    for open in app.navigator().tuning().iter() {
        spans.push(Span::styled(
            format!("{} ", open.format_with(app.style())),
            Style::default().fg(category_color(classify(open))),
        ));
    }

    Paragraph::new(Line::from(spans)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} {} ", kind.title(), kind.title_en())),
    )
}

fn grid_table(app: &App) -> Table<'static> {
    let nav = app.navigator();
    let grid = nav.active_grid();

    let mut header = vec![Cell::from("徽位")];
    for (name, open) in STRING_NAMES.iter().zip(grid.tuning().iter()) {
        header.push(Cell::from(format!("{}({})", name, open.format_with(app.style()))));
    }
    header.push(Cell::from("音程"));

    let rows: Vec<Row> = (0..grid.rows())
        .map(|row| {
            let position = grid.position(row);
            let mut cells = vec![Cell::from(position.hui)];
            for (col, pitch) in grid.row(row).iter().enumerate() {
                cells.push(
                    Cell::from(pitch.format_with(app.style()))
                        .style(cell_style(app, row, col, pitch)),
                );
            }
            cells.push(Cell::from(position.interval));
            Row::new(cells)
        })
        .collect();

    let mut widths = vec![Constraint::Length(12)];
    widths.extend([Constraint::Length(10); 7]);
    widths.push(Constraint::Min(14));

    Table::new(rows, widths)
        .header(Row::new(header).style(Style::default().add_modifier(Modifier::BOLD)))
        .block(Block::default().borders(Borders::ALL))
}

/// One-line description of the cell under the cursor
pub(crate) fn cell_info(app: &App) -> String {
    let nav = app.navigator();
    let grid = nav.active_grid();
    let (row, col) = nav.cursor().position();
    let pitch = nav.cell_under_cursor();
    let position = grid.position(row);

    let mut info = format!(
        "{} {}  {} ({})  {}  ET {:.2} Hz",
        STRING_NAMES[col],
        position.hui,
        position.interval,
        position.interval_en,
        pitch.format_with(app.style()),
        pitch.concert_frequency()
    );
    if let Some(just) = grid.just_frequency(row, col) {
        info.push_str(&format!(
            "  just {:.2} Hz ({:+.1} cents)",
            just,
            position.just_cents_deviation()
        ));
    }
    info
}

fn input_line(app: &App) -> Paragraph<'static> {
    let text = match app.mode() {
        InputMode::Search => format!("/{}", app.input()),
        InputMode::Command => format!(":{}", app.input()),
        InputMode::Normal => "? help  / search  : command  Tab switch table  q quit".to_string(),
    };
    let style = match app.mode() {
        InputMode::Normal => Style::default().fg(Color::DarkGray),
        _ => Style::default(),
    };
    Paragraph::new(text).style(style)
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
