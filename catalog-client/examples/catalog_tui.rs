//! Catalog TUI - add, list, edit and delete products
//!
//! Run against the in-memory server:
//!   cargo run -p catalog-mock
//!   CATALOG_API_URL=http://127.0.0.1:5000 cargo run --example catalog_tui

use catalog_client::{
    Action, CatalogController, ClientConfig, Command, Field, NetworkHttpClient, NoticeLevel,
    ToastPosition, ToastQueue,
};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{prelude::*, widgets::*};
use std::io::{self, Stdout};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;
use tui_logger::{TuiLoggerLevelOutput, TuiLoggerWidget, TuiWidgetEvent, TuiWidgetState};

const FIELDS: [Field; 4] = [Field::Name, Field::Price, Field::ImageUrl, Field::Description];

type Controller = CatalogController<NetworkHttpClient, ToastQueue>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// A submitted form closes once its request succeeds; nothing else moves
/// the user out of the form.
fn mode_after_outcome(mode: InputMode, outcome: &Action) -> InputMode {
    match outcome {
        Action::CreateSucceeded | Action::UpdateSucceeded => InputMode::Normal,
        _ => mode,
    }
}

struct App {
    controller: Controller,
    toasts: ToastQueue,
    base_url: String,
    /// Request outcomes flow back here
    outcome_tx: mpsc::Sender<Action>,
    input_mode: InputMode,
    /// Index into FIELDS
    focus: usize,
    input: Input,
    grid_state: ListState,
    logger_state: TuiWidgetState,
}

impl App {
    fn focused_field(&self) -> Field {
        FIELDS[self.focus]
    }

    /// Apply an action and spawn the requests it issues
    fn dispatch(&mut self, action: Action) {
        match self.controller.apply(action) {
            Ok(commands) => commands.into_iter().for_each(|cmd| self.spawn(cmd)),
            Err(e) => tracing::debug!("Ignored: {}", e),
        }
        self.clamp_selection();
        self.sync_input();
    }

    fn spawn(&self, command: Command) {
        let dispatcher = self.controller.dispatcher().clone();
        let tx = self.outcome_tx.clone();
        tokio::spawn(async move {
            let (outcome, _) = dispatcher.execute(command).await;
            if tx.send(outcome).await.is_err() {
                tracing::error!("UI closed before request settled");
            }
        });
    }

    /// Reload the focused input from the draft
    fn sync_input(&mut self) {
        let value = self.controller.state().draft().get(self.focused_field());
        if self.input.value() != value {
            self.input = Input::new(value.to_string());
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let n = FIELDS.len();
        self.focus = if forward {
            (self.focus + 1) % n
        } else {
            (self.focus + n - 1) % n
        };
        self.sync_input();
    }

    fn clamp_selection(&mut self) {
        let len = self.controller.state().products().len();
        match self.grid_state.selected() {
            _ if len == 0 => self.grid_state.select(None),
            None => self.grid_state.select(Some(0)),
            Some(i) if i >= len => self.grid_state.select(Some(len - 1)),
            _ => {}
        }
    }

    fn selected_product(&self) -> Option<catalog_client::Product> {
        let i = self.grid_state.selected()?;
        self.controller.state().products().get(i).cloned()
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize TUI Logger with Tracing
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,catalog_client=debug"));

    tracing_subscriber::registry()
        .with(tui_logger::tracing_subscriber_layer())
        .with(env_filter)
        .init();

    tui_logger::init_logger(log::LevelFilter::Info).ok();
    tui_logger::set_default_level(log::LevelFilter::Info);

    let config = ClientConfig::from_env();
    let http = config.build_http_client()?;
    let toasts = ToastQueue::from_config(&config);
    let (outcome_tx, mut outcome_rx) = mpsc::channel(32);

    let mut app = App {
        controller: CatalogController::new(&config, http, toasts.clone()),
        toasts,
        base_url: config.base_url.clone(),
        outcome_tx,
        input_mode: InputMode::default(),
        focus: 0,
        input: Input::default(),
        grid_state: ListState::default(),
        logger_state: TuiWidgetState::new(),
    };

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    tracing::info!("Catalog API: {}", app.base_url);
    tracing::info!("'a' add, 'e' edit, 'd' delete, 'r' refresh, 'q' quit");
    app.dispatch(Action::LoadRequested);

    let res = run_app(&mut terminal, &mut app, &mut outcome_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{:?}", err);
    }

    Ok(())
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    outcome_rx: &mut mpsc::Receiver<Action>,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        // Settle finished requests (non-blocking)
        while let Ok(outcome) = outcome_rx.try_recv() {
            let mode = mode_after_outcome(app.input_mode, &outcome);
            if mode != app.input_mode {
                app.input_mode = mode;
                app.focus = 0;
            }
            app.dispatch(outcome);
        }

        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if !matches!(key.kind, KeyEventKind::Press | KeyEventKind::Repeat) {
            continue;
        }

        match app.input_mode {
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                KeyCode::Char('a') => {
                    app.input_mode = InputMode::Editing;
                    app.sync_input();
                }
                KeyCode::Char('e') => {
                    if let Some(product) = app.selected_product() {
                        app.dispatch(Action::OpenEdit(product));
                        if app.controller.state().form().is_overlay_open() {
                            app.focus = 0;
                            app.input_mode = InputMode::Editing;
                            app.sync_input();
                        }
                    }
                }
                KeyCode::Char('d') => {
                    if let Some(product) = app.selected_product() {
                        app.dispatch(Action::DeleteRequested { id: product.id });
                    }
                }
                KeyCode::Char('r') => app.dispatch(Action::LoadRequested),
                KeyCode::Up => app.grid_state.select_previous(),
                KeyCode::Down => app.grid_state.select_next(),
                KeyCode::PageUp => app.logger_state.transition(TuiWidgetEvent::PrevPageKey),
                KeyCode::PageDown => app.logger_state.transition(TuiWidgetEvent::NextPageKey),
                _ => {}
            },
            InputMode::Editing => match key.code {
                KeyCode::Enter => {
                    let editing = app.controller.state().form().is_overlay_open();
                    app.dispatch(if editing {
                        Action::UpdateRequested
                    } else {
                        Action::CreateRequested
                    });
                }
                KeyCode::Tab | KeyCode::Down => app.move_focus(true),
                KeyCode::BackTab | KeyCode::Up => app.move_focus(false),
                KeyCode::Esc => {
                    if app.controller.state().form().is_overlay_open() {
                        app.dispatch(Action::CancelEdit);
                    }
                    if !app.controller.state().form().is_overlay_open() {
                        app.input_mode = InputMode::Normal;
                    }
                }
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(());
                }
                _ => {
                    app.input.handle_event(&Event::Key(key));
                    let value = app.input.value().to_string();
                    app.dispatch(Action::set_field(app.focused_field(), value));
                }
            },
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(8),    // Grid + Form
            Constraint::Length(8), // Logs
        ])
        .split(f.area());

    let main_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);

    render_header(f, app, chunks[0]);
    render_grid(f, app, main_chunks[0]);

    let overlay_open = app.controller.state().form().is_overlay_open();
    render_form(f, app, main_chunks[1], !overlay_open);

    // Logs (TuiLoggerWidget)
    let logs = TuiLoggerWidget::default()
        .block(
            Block::default()
                .title(" Logs ")
                .border_style(Style::default().fg(Color::White).add_modifier(Modifier::DIM))
                .borders(Borders::ALL),
        )
        .output_separator('|')
        .output_timestamp(Some("%H:%M:%S".to_string()))
        .output_level(Some(TuiLoggerLevelOutput::Abbreviated))
        .output_target(false)
        .output_file(false)
        .output_line(false)
        .style(Style::default().fg(Color::White))
        .state(&app.logger_state);
    f.render_widget(logs, chunks[2]);

    if overlay_open {
        let area = centered(f.area(), 50, 12);
        f.render_widget(Clear, area);
        render_form(f, app, area, true);
    }

    render_toasts(f, app);
}

fn render_header(f: &mut Frame, app: &App, area: Rect) {
    let state = app.controller.state();
    let status = if state.is_loading() {
        Span::styled(
            " LOADING ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else if state.is_busy() {
        Span::styled(
            " BUSY ",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )
    } else {
        Span::styled(
            " Ready ",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )
    };

    let title = Paragraph::new(Line::from(vec![
        Span::raw(" 🛒 Product Catalog "),
        Span::styled(format!(" {} ", app.base_url), Style::default().fg(Color::Cyan)),
        Span::raw(" | "),
        status,
    ]))
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan)),
    );
    f.render_widget(title, area);
}

fn render_grid(f: &mut Frame, app: &mut App, area: Rect) {
    let state = app.controller.state();
    let block = Block::default()
        .title(format!(" Products ({}) ", state.products().len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));

    if let Some(placeholder) = state.grid_placeholder() {
        let p = Paragraph::new(placeholder)
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let label = Style::default().fg(Color::Cyan);
    let items: Vec<ListItem> = state
        .products()
        .iter()
        .map(|p| {
            ListItem::new(vec![
                Line::from(vec![Span::styled("Name:  ", label), Span::raw(p.name.clone())]),
                Line::from(vec![
                    Span::styled("Price: ", label),
                    Span::raw(p.display_price()),
                ]),
                Line::from(vec![
                    Span::styled("Title: ", label),
                    Span::raw(p.description.clone()),
                ]),
                Line::from(vec![
                    Span::styled("Image: ", label),
                    Span::styled(
                        p.img_url.clone().unwrap_or_else(|| "-".to_string()),
                        Style::default().fg(Color::DarkGray),
                    ),
                ]),
                Line::from(""),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::DarkGray))
        .highlight_symbol("▶ ");
    f.render_stateful_widget(list, area, &mut app.grid_state);
}

fn render_form(f: &mut Frame, app: &App, area: Rect, active: bool) {
    let state = app.controller.state();
    let editing = state.form().is_overlay_open();
    let (title, submit) = if editing {
        (" Edit Product ", state.update_label())
    } else {
        (" Add Product ", state.create_label())
    };

    let focused = active && app.input_mode == InputMode::Editing;
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if focused { Color::Yellow } else { Color::Cyan }));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let mut constraints = vec![Constraint::Length(1); FIELDS.len()];
    constraints.push(Constraint::Length(1));
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    const LABEL_WIDTH: u16 = 14;
    for (i, field) in FIELDS.iter().enumerate() {
        let label = match field {
            Field::Name => "Product Name",
            Field::Price => "Product Price",
            Field::ImageUrl => "Image URL",
            Field::Description => "Product Title",
        };
        let is_focus = focused && i == app.focus;
        let value = state.draft().get(*field);
        let style = if is_focus {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let line = Line::from(vec![
            Span::styled(
                format!("{:<width$}", label, width = LABEL_WIDTH as usize),
                Style::default().fg(Color::Cyan),
            ),
            Span::styled(value.to_string(), style),
        ]);
        f.render_widget(Paragraph::new(line), rows[i]);

        if is_focus {
            let width = rows[i].width.saturating_sub(LABEL_WIDTH).max(1);
            let scroll = app.input.visual_scroll(width as usize);
            f.set_cursor_position((
                rows[i].x + LABEL_WIDTH + (app.input.visual_cursor().max(scroll) - scroll) as u16,
                rows[i].y,
            ));
        }
    }

    let hint = if editing {
        format!("[Enter] {}   [Esc] Cancel", submit)
    } else {
        format!("[Enter] {}   [Tab] next field", submit)
    };
    let hint_style = if state.is_busy() {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green)
    };
    f.render_widget(
        Paragraph::new(hint).style(hint_style),
        rows[FIELDS.len() + 1],
    );
}

fn render_toasts(f: &mut Frame, app: &App) {
    let toasts = app.toasts.visible();
    let area = f.area();
    let width = 36.min(area.width);
    for (i, toast) in toasts.iter().rev().take(4).enumerate() {
        let offset = i as u16 * 3;
        if offset + 3 > area.height {
            break;
        }
        let x = match app.toasts.position() {
            ToastPosition::TopRight | ToastPosition::BottomRight => area.right() - width,
            ToastPosition::TopLeft | ToastPosition::BottomLeft => area.x,
        };
        let y = match app.toasts.position() {
            ToastPosition::TopRight | ToastPosition::TopLeft => area.y + offset,
            ToastPosition::BottomRight | ToastPosition::BottomLeft => area.bottom() - 3 - offset,
        };
        let color = match toast.level {
            NoticeLevel::Success => Color::Green,
            NoticeLevel::Error => Color::Red,
        };
        let rect = Rect::new(x, y, width, 3);
        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(toast.message.as_str()).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color)),
            ),
            rect,
        );
    }
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
