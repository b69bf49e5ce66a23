use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use net_worth_tracker::report::{format_delta, format_money};
use net_worth_tracker::{
    today, year_options, Dashboard, DashboardChanges, Ledger, Month, MonthDraft, Polarity, Selection,
    WipeConfirmation,
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols,
    text::{Line, Span},
    widgets::{Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame, Terminal,
};
use std::io;
use tracing::{error, info};

// ============================================================================
// FORM FIELDS
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Bank,
    Cash,
    Investments,
    IncomeLabel(usize),
    IncomeAmount(usize),
    ExpenseLabel(usize),
    ExpenseAmount(usize),
}

impl Field {
    fn title(&self) -> String {
        match self {
            Field::Bank => "Bank".to_string(),
            Field::Cash => "Cash".to_string(),
            Field::Investments => "Investments".to_string(),
            Field::IncomeLabel(i) | Field::ExpenseLabel(i) => format!("#{} concept", i + 1),
            Field::IncomeAmount(i) | Field::ExpenseAmount(i) => format!("#{} amount", i + 1),
        }
    }

    fn section(&self) -> &'static str {
        match self {
            Field::Bank | Field::Cash | Field::Investments => "NET WORTH",
            Field::IncomeLabel(_) | Field::IncomeAmount(_) => "INCOME",
            Field::ExpenseLabel(_) | Field::ExpenseAmount(_) => "EXPENSES",
        }
    }
}

// ============================================================================
// CHART DATA (rebuilt only for series that changed)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct ChartData {
    pub split: [f64; 2],
    pub year_points: Vec<(f64, f64)>,
    pub year_bounds: [f64; 2],
    pub decade: Vec<(String, f64)>,
    /// How many times each series has been rebuilt: split, year, decade
    pub rebuilds: [usize; 3],
}

impl ChartData {
    fn update(&mut self, dashboard: &Dashboard, changes: DashboardChanges) {
        if changes.split {
            self.split = [dashboard.split.income, dashboard.split.expenses];
            self.rebuilds[0] += 1;
        }

        if changes.year_series {
            self.year_points = dashboard
                .year_series
                .iter()
                .enumerate()
                .map(|(i, value)| (i as f64, *value))
                .collect();

            let min = dashboard.year_series.iter().cloned().fold(0.0, f64::min);
            let max = dashboard.year_series.iter().cloned().fold(0.0, f64::max);
            let top = if max > 0.0 { max * 1.1 } else { 1.0 };
            self.year_bounds = [min * 1.1, top];
            self.rebuilds[1] += 1;
        }

        if changes.decade_series {
            self.decade = dashboard
                .decade_series
                .iter()
                .map(|point| (format!("{:02}", point.year.rem_euclid(100)), point.value))
                .collect();
            self.rebuilds[2] += 1;
        }
    }
}

// ============================================================================
// APP STATE
// ============================================================================

pub struct App {
    pub ledger: Ledger,
    pub currency: String,
    pub current_year: i32,
    pub selection: Selection,
    pub draft: MonthDraft,
    pub focus: usize,
    /// Field value before editing started; Some while editing
    pub edit_backup: Option<String>,
    pub dashboard: Dashboard,
    pub charts: ChartData,
    pub wipe: WipeConfirmation,
    /// True while a wipe confirmation question is on screen
    pub wipe_prompt: bool,
    pub status: String,
}

impl App {
    pub fn new(ledger: Ledger, currency: String) -> Self {
        let (current_year, _) = today();
        Self::with_selection(ledger, currency, Selection::current(), current_year)
    }

    pub fn with_selection(
        ledger: Ledger,
        currency: String,
        selection: Selection,
        current_year: i32,
    ) -> Self {
        let dashboard = ledger.dashboard(selection, current_year);
        let mut charts = ChartData::default();
        charts.update(&dashboard, DashboardChanges::all());

        let draft = MonthDraft::from_record(&ledger.month(selection.year(), selection.month()));

        Self {
            ledger,
            currency,
            current_year,
            selection,
            draft,
            focus: 0,
            edit_backup: None,
            dashboard,
            charts,
            wipe: WipeConfirmation::Idle,
            wipe_prompt: false,
            status: String::new(),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.edit_backup.is_some()
    }

    /// Recompute derived values and rebuild only the chart series that moved
    pub fn refresh(&mut self) {
        let next = self.ledger.dashboard(self.selection, self.current_year);
        let changes = next.changes_from(&self.dashboard);
        if changes.any() {
            self.charts.update(&next, changes);
        }
        self.dashboard = next;
    }

    /// Reload the form for the current selection
    fn load_selection(&mut self) {
        self.edit_backup = None;
        self.draft = MonthDraft::from_record(
            &self.ledger.month(self.selection.year(), self.selection.month()),
        );
        self.focus = 0;
        self.refresh();
    }

    pub fn select(&mut self, selection: Selection) {
        if selection != self.selection {
            self.selection = selection;
            self.load_selection();
        }
    }

    pub fn next_month(&mut self) {
        self.select(self.selection.next_month());
    }

    pub fn previous_month(&mut self) {
        self.select(self.selection.previous_month());
    }

    pub fn next_year(&mut self) {
        self.select(self.selection.shift_year(1, self.current_year));
    }

    pub fn previous_year(&mut self) {
        self.select(self.selection.shift_year(-1, self.current_year));
    }

    // ------------------------------------------------------------------------
    // Form navigation and editing
    // ------------------------------------------------------------------------

    pub fn fields(&self) -> Vec<Field> {
        let mut fields = vec![Field::Bank, Field::Cash, Field::Investments];
        for i in 0..self.draft.income.len() {
            fields.push(Field::IncomeLabel(i));
            fields.push(Field::IncomeAmount(i));
        }
        for i in 0..self.draft.expenses.len() {
            fields.push(Field::ExpenseLabel(i));
            fields.push(Field::ExpenseAmount(i));
        }
        fields
    }

    pub fn focused_field(&self) -> Field {
        let fields = self.fields();
        fields[self.focus.min(fields.len() - 1)]
    }

    fn field_value(&self, field: Field) -> &str {
        let value = match field {
            Field::Bank => Some(&self.draft.bank),
            Field::Cash => Some(&self.draft.cash),
            Field::Investments => Some(&self.draft.investments),
            Field::IncomeLabel(i) => self.draft.income.get(i).map(|row| &row.label),
            Field::IncomeAmount(i) => self.draft.income.get(i).map(|row| &row.amount),
            Field::ExpenseLabel(i) => self.draft.expenses.get(i).map(|row| &row.label),
            Field::ExpenseAmount(i) => self.draft.expenses.get(i).map(|row| &row.amount),
        };
        value.map(String::as_str).unwrap_or("")
    }

    fn field_mut(&mut self, field: Field) -> Option<&mut String> {
        match field {
            Field::Bank => Some(&mut self.draft.bank),
            Field::Cash => Some(&mut self.draft.cash),
            Field::Investments => Some(&mut self.draft.investments),
            Field::IncomeLabel(i) => self.draft.income.get_mut(i).map(|row| &mut row.label),
            Field::IncomeAmount(i) => self.draft.income.get_mut(i).map(|row| &mut row.amount),
            Field::ExpenseLabel(i) => self.draft.expenses.get_mut(i).map(|row| &mut row.label),
            Field::ExpenseAmount(i) => self.draft.expenses.get_mut(i).map(|row| &mut row.amount),
        }
    }

    pub fn next_field(&mut self) {
        let len = self.fields().len();
        self.focus = if self.focus >= len - 1 { 0 } else { self.focus + 1 };
    }

    pub fn previous_field(&mut self) {
        let len = self.fields().len();
        self.focus = if self.focus == 0 { len - 1 } else { self.focus - 1 };
    }

    pub fn start_edit(&mut self) {
        let field = self.focused_field();
        self.edit_backup = Some(self.field_value(field).to_string());
    }

    pub fn input_char(&mut self, c: char) {
        if !self.is_editing() {
            return;
        }
        let field = self.focused_field();
        if let Some(value) = self.field_mut(field) {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if !self.is_editing() {
            return;
        }
        let field = self.focused_field();
        if let Some(value) = self.field_mut(field) {
            value.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        if let Some(backup) = self.edit_backup.take() {
            let field = self.focused_field();
            if let Some(value) = self.field_mut(field) {
                *value = backup;
            }
        }
    }

    /// Store the whole form for the selected month, then recompute
    pub fn commit(&mut self) {
        self.edit_backup = None;
        let (year, month) = (self.selection.year(), self.selection.month());

        match self.ledger.commit_draft(year, month, &self.draft) {
            Ok(record) => {
                // Show the coerced values ("12abc" → 12)
                self.draft = MonthDraft::from_record(&record);
                self.status = format!("Saved {} {}", month, year);
            }
            Err(e) => {
                error!("Commit failed: {}", e);
                self.status = format!("Save failed: {}", e);
            }
        }
        self.refresh();
    }

    pub fn add_income_row(&mut self) {
        self.draft.add_income_row();
        let index = self.draft.income.len() - 1;
        self.focus_field(Field::IncomeLabel(index));
        self.start_edit();
    }

    pub fn add_expense_row(&mut self) {
        self.draft.add_expense_row();
        let index = self.draft.expenses.len() - 1;
        self.focus_field(Field::ExpenseLabel(index));
        self.start_edit();
    }

    fn focus_field(&mut self, field: Field) {
        if let Some(position) = self.fields().iter().position(|f| *f == field) {
            self.focus = position;
        }
    }

    pub fn toggle_theme(&mut self) {
        match self.ledger.toggle_theme() {
            Ok(theme) => self.status = format!("{} {} theme", theme.icon(), theme),
            Err(e) => self.status = format!("Theme not saved: {}", e),
        }
    }

    // ------------------------------------------------------------------------
    // Two-step wipe
    // ------------------------------------------------------------------------

    pub fn request_wipe(&mut self) {
        self.wipe = WipeConfirmation::Idle;
        self.wipe_prompt = true;
        self.status = "⚠️  Delete ALL data? This cannot be undone. (y/n)".to_string();
    }

    pub fn cancel_wipe(&mut self) {
        self.wipe = self.wipe.cancel();
        self.wipe_prompt = false;
        self.status = "Wipe cancelled".to_string();
    }

    /// Advance the wipe gate; wipes once both steps are confirmed
    pub fn confirm_wipe(&mut self) {
        if !self.wipe_prompt {
            return;
        }
        self.wipe = self.wipe.confirm();

        match self.wipe {
            WipeConfirmation::Idle => {}
            WipeConfirmation::FirstConfirmed => {
                self.status =
                    "Last warning: every historical record will be lost. Continue? (y/n)"
                        .to_string();
            }
            WipeConfirmation::Confirmed => {
                let result = self.ledger.wipe(self.wipe);
                self.wipe = WipeConfirmation::Idle;
                self.wipe_prompt = false;
                match result {
                    Ok(()) => self.status = "All financial data deleted".to_string(),
                    Err(e) => self.status = format!("Wipe failed: {}", e),
                }
                self.load_selection();
            }
        }
    }

    /// Years shown in the header, newest first, flagged when selected
    pub fn year_strip(&self) -> Vec<(i32, bool)> {
        year_options(self.current_year)
            .into_iter()
            .map(|year| (year, year == self.selection.year()))
            .collect()
    }
}

// ============================================================================
// TERMINAL LOOP
// ============================================================================

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        error!("UI loop failed: {:?}", err);
        println!("Error: {:?}", err);
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> io::Result<()> {
    info!("Dashboard started on {} {}", app.selection.month(), app.selection.year());

    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if app.is_editing() {
                match key.code {
                    KeyCode::Enter => app.commit(),
                    KeyCode::Tab => {
                        app.commit();
                        app.next_field();
                    }
                    KeyCode::Esc => app.cancel_edit(),
                    KeyCode::Backspace => app.backspace(),
                    KeyCode::Char(c) => app.input_char(c),
                    _ => {}
                }
                continue;
            }

            if app.wipe_prompt {
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_wipe(),
                    _ => app.cancel_wipe(),
                }
                continue;
            }

            match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(())
                }
                KeyCode::Enter => app.start_edit(),
                KeyCode::Down | KeyCode::Char('j') => app.next_field(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_field(),
                KeyCode::Tab => app.next_field(),
                KeyCode::BackTab => app.previous_field(),
                KeyCode::Right | KeyCode::Char('l') => app.next_month(),
                KeyCode::Left | KeyCode::Char('h') => app.previous_month(),
                KeyCode::Char(']') => app.next_year(),
                KeyCode::Char('[') => app.previous_year(),
                KeyCode::Char('a') => app.add_income_row(),
                KeyCode::Char('e') => app.add_expense_row(),
                KeyCode::Char('t') => app.toggle_theme(),
                KeyCode::Char('X') => app.request_wipe(),
                _ => {}
            }
        }
    }
}

// ============================================================================
// RENDERING
// ============================================================================

fn rgb((r, g, b): (u8, u8, u8)) -> Color {
    Color::Rgb(r, g, b)
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Header with selection
            Constraint::Min(0),    // Content area
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let content = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40), // Totals + form
            Constraint::Percentage(60), // Charts
        ])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(9), Constraint::Min(0)])
        .split(content[0]);

    render_totals(f, left[0], app);
    render_form(f, left[1], app);

    let charts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(35),
            Constraint::Percentage(35),
        ])
        .split(content[1]);

    render_split_chart(f, charts[0], app);
    render_year_chart(f, charts[1], app);
    render_decade_chart(f, charts[2], app);

    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let theme = app.ledger.theme();
    let palette = theme.palette();

    let mut month_spans = vec![];
    for month in Month::all() {
        if month.index() > 0 {
            month_spans.push(Span::raw(" "));
        }
        let style = if month == app.selection.month() {
            Style::default()
                .fg(rgb(palette.accent))
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        month_spans.push(Span::styled(month.label(), style));
    }

    let mut year_spans = vec![Span::raw(" ◀ ")];
    for (year, selected) in app.year_strip() {
        let style = if selected {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        year_spans.push(Span::styled(year.to_string(), style));
        year_spans.push(Span::raw(" "));
    }
    year_spans.push(Span::raw("▶"));

    let mut spans = vec![Span::raw(" ")];
    spans.extend(month_spans);
    spans.push(Span::raw("  │  "));
    spans.push(Span::styled(
        format!("{} {}", theme.icon(), theme),
        Style::default().fg(rgb(palette.text)),
    ));

    let header = Paragraph::new(vec![Line::from(year_spans), Line::from(spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(rgb(palette.accent)))
            .title(" Net Worth Tracker "),
    );

    f.render_widget(header, area);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.ledger.theme().palette();
    let totals = &app.dashboard.totals;
    let currency = app.currency.as_str();

    let delta_color = match app.dashboard.polarity {
        Polarity::Gain => rgb(palette.income),
        Polarity::Loss => rgb(palette.expense),
    };

    let row = |name: &'static str, value: String, color: Color| {
        Line::from(vec![
            Span::styled(
                format!("  {:<12}", name),
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::styled(value, Style::default().fg(color)),
        ])
    };

    let content = vec![
        Line::from(""),
        row("Income", format_money(totals.income_sum, currency), rgb(palette.income)),
        row("Expenses", format_money(totals.expense_sum, currency), rgb(palette.expense)),
        row("Balance", format_money(totals.balance, currency), Color::White),
        Line::from(""),
        row("Net worth", format_money(totals.net_worth_sum, currency), rgb(palette.accent)),
        row("vs. prev", format_delta(app.dashboard.delta), delta_color),
    ];

    let panel = Paragraph::new(content).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(" Totals "),
    );

    f.render_widget(panel, area);
}

fn render_form(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.ledger.theme().palette();
    let focused = app.focus.min(app.fields().len() - 1);

    let mut lines = vec![];
    let mut section = "";

    for (i, field) in app.fields().into_iter().enumerate() {
        if field.section() != section {
            section = field.section();
            if !lines.is_empty() {
                lines.push(Line::from(""));
            }
            lines.push(Line::from(Span::styled(
                format!("  {}", section),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )));
        }

        let value = app.field_value(field);
        let is_focused = i == focused;
        let (marker, value_text) = match (is_focused, app.is_editing()) {
            (true, true) => ("✎ ", format!("{}▏", value)),
            (true, false) => ("→ ", value.to_string()),
            _ => ("  ", value.to_string()),
        };

        let value_style = if value.is_empty() && !is_focused {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default().fg(rgb(palette.text))
        };
        let shown = if value_text.is_empty() && !is_focused {
            "—".to_string()
        } else {
            value_text
        };

        let mut line = Line::from(vec![
            Span::raw(marker),
            Span::styled(format!("{:<14}", field.title()), Style::default().fg(Color::Cyan)),
            Span::styled(shown, value_style),
        ]);
        if is_focused {
            line = line.patch_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));
        }
        lines.push(line);
    }

    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} {} ", app.selection.month(), app.selection.year())),
    );

    f.render_widget(form, area);
}

fn bar(label: String, value: f64, color: Color) -> Bar<'static> {
    // Bars cannot go below zero; the text keeps the real value
    Bar::default()
        .label(Line::from(label))
        .value(value.max(0.0).round() as u64)
        .text_value(format!("{:.0}", value))
        .style(Style::default().fg(color))
}

fn render_split_chart(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.ledger.theme().palette();
    let [income, expenses] = app.charts.split;

    let bars = [
        bar("Income".to_string(), income, rgb(palette.income)),
        bar("Expenses".to_string(), expenses, rgb(palette.expense)),
    ];

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Income vs Expenses "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(10)
        .bar_gap(3);

    f.render_widget(chart, area);
}

fn render_year_chart(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.ledger.theme().palette();
    let [low, high] = app.charts.year_bounds;

    let dataset = Dataset::default()
        .name("Net worth")
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(rgb(palette.accent)))
        .data(&app.charts.year_points);

    let x_labels: Vec<Span> = ["Jan", "Apr", "Jul", "Oct", "Dec"]
        .into_iter()
        .map(|label| Span::styled(label, Style::default().fg(rgb(palette.text))))
        .collect();

    let y_labels = vec![
        Span::styled(format!("{:.0}", low), Style::default().fg(rgb(palette.text))),
        Span::styled(format!("{:.0}", high), Style::default().fg(rgb(palette.text))),
    ];

    let chart = Chart::new(vec![dataset])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(format!(" Net worth {} ", app.selection.year())),
        )
        .x_axis(
            Axis::default()
                .style(Style::default().fg(rgb(palette.grid)))
                .bounds([0.0, 11.0])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(rgb(palette.grid)))
                .bounds([low, high])
                .labels(y_labels),
        );

    f.render_widget(chart, area);
}

fn render_decade_chart(f: &mut Frame, area: Rect, app: &App) {
    let palette = app.ledger.theme().palette();

    let bars: Vec<Bar> = app
        .charts
        .decade
        .iter()
        .map(|(label, value)| bar(label.clone(), *value, rgb(palette.accent)))
        .collect();

    let count = bars.len().max(1) as u16;
    let bar_width = (area.width.saturating_sub(2) / count).saturating_sub(1).max(1);

    let chart = BarChart::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(" Year-end net worth "),
        )
        .data(BarGroup::default().bars(&bars))
        .bar_width(bar_width)
        .bar_gap(1);

    f.render_widget(chart, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = vec![];

    if !app.status.is_empty() {
        let color = if app.wipe_prompt { Color::Red } else { Color::Green };
        status_spans.push(Span::styled(
            format!(" {} ", app.status),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ));
        status_spans.push(Span::raw(" | "));
    }

    let keys: &[(&str, &str)] = if app.is_editing() {
        &[("Enter", " Save | "), ("Tab", " Save+Next | "), ("Esc", " Cancel")]
    } else {
        &[
            ("←/→", " Month | "),
            ("[/]", " Year | "),
            ("↑/↓", " Field | "),
            ("Enter", " Edit | "),
            ("a/e", " +Income/+Expense | "),
            ("t", " Theme | "),
            ("X", " Wipe | "),
        ]
    };

    for (key, action) in keys {
        status_spans.push(Span::styled(*key, Style::default().fg(Color::Yellow)));
        status_spans.push(Span::raw(*action));
    }
    if !app.is_editing() {
        status_spans.push(Span::styled("q", Style::default().fg(Color::Red)));
        status_spans.push(Span::raw(" Quit"));
    }

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );

    f.render_widget(status_bar, area);
}
