use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use paper_processor_config::{Config, ProseModeSetting};
use paper_processor_engine::{
    Alignment, DisplayNode, EchoService, Operation, PaperFile, ProseMode, Segmenter, Session,
    SessionEvent, Table, io, render,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap},
};
use relative_path::RelativePathBuf;
use std::{
    env,
    fs::OpenOptions,
    io::stdout,
    path::{Path, PathBuf},
    process,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    Papers,
    Blocks,
}

struct App {
    papers_root: PathBuf,
    papers: Vec<PaperFile>,
    paper_list_state: ListState,
    open_paper: Option<usize>,
    session: Session,
    block_list_state: ListState,
    focus: Focus,
    status: String,
    service: EchoService,
}

impl App {
    fn new(papers_root: PathBuf, papers: Vec<PaperFile>, session: Session) -> Self {
        let mut app = Self {
            papers_root,
            papers,
            paper_list_state: ListState::default(),
            open_paper: None,
            session,
            block_list_state: ListState::default(),
            focus: Focus::Papers,
            status: String::new(),
            service: EchoService,
        };

        // Select first paper if available
        if !app.papers.is_empty() {
            app.paper_list_state.select(Some(0));
        }
        app.status = format!("{} paper(s) in {}", app.papers.len(), app.papers_root.display());

        app
    }

    /// A single file is opened straight away; a folder lists its papers.
    fn open_target(target: &Path, session: Session) -> Result<Self> {
        if target.is_file() {
            let root = target.parent().map(Path::to_path_buf).unwrap_or_default();
            let name = target.file_name().context("paper path has no file name")?;
            let relative = RelativePathBuf::from_path(Path::new(name))?;
            let mut app = Self::new(root, vec![PaperFile::new(relative)], session);
            app.open_selected();
            Ok(app)
        } else {
            io::validate_papers_dir(target)?;
            let papers = io::list_papers(target)?;
            Ok(Self::new(target.to_path_buf(), papers, session))
        }
    }

    fn move_down(&mut self) {
        match self.focus {
            Focus::Papers => step(&mut self.paper_list_state, self.papers.len(), true),
            Focus::Blocks => step(&mut self.block_list_state, self.session.len(), true),
        }
    }

    fn move_up(&mut self) {
        match self.focus {
            Focus::Papers => step(&mut self.paper_list_state, self.papers.len(), false),
            Focus::Blocks => step(&mut self.block_list_state, self.session.len(), false),
        }
    }

    fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Papers if !self.session.is_empty() => Focus::Blocks,
            Focus::Papers => Focus::Papers,
            Focus::Blocks => Focus::Papers,
        };
    }

    fn open_selected(&mut self) {
        let Some(index) = self.paper_list_state.selected() else {
            return;
        };
        let Some(paper) = self.papers.get(index) else {
            return;
        };

        let path = paper.relative_path().to_path(&self.papers_root);
        match io::read_document(&path) {
            Ok(document) => {
                self.session.load(&document);
                self.open_paper = Some(index);
                if self.session.is_empty() {
                    self.block_list_state.select(None);
                    self.focus = Focus::Papers;
                } else {
                    self.block_list_state.select(Some(0));
                    self.focus = Focus::Blocks;
                }
                self.status = format!(
                    "{}: {} block(s), {:?} mode, model {}",
                    paper.display_path(),
                    self.session.len(),
                    self.session.prose_mode(),
                    self.session.model()
                );
            }
            Err(e) => {
                self.session.clear();
                self.open_paper = None;
                self.block_list_state.select(None);
                self.status = format!("Error reading {}: {e}", paper.display_path());
            }
        }
    }

    fn apply(&mut self, operation: Operation) {
        let Some(index) = self.block_list_state.selected() else {
            self.status = "No block selected".to_string();
            return;
        };

        match self
            .session
            .apply_transform(index, operation, &self.service)
        {
            Ok(()) => {
                self.status = format!("{} applied to block {}", operation.label(), index + 1);
            }
            Err(e) => self.status = format!("Error: {e}"),
        }
    }

    fn title(&self) -> String {
        self.open_paper
            .and_then(|i| self.papers.get(i))
            .map(|paper| paper.display_name().to_string())
            .unwrap_or_else(|| "Blocks".to_string())
    }
}

/// Moves a list selection one row, wrapping at either end.
fn step(state: &mut ListState, len: usize, forward: bool) {
    if len == 0 {
        return;
    }
    let i = match state.selected() {
        Some(i) if forward => (i + 1) % len,
        Some(0) => len - 1,
        Some(i) => i - 1,
        None => 0,
    };
    state.select(Some(i));
}

/// Saves `folder` as `papers_path` so later runs need no argument.
fn remember_papers_folder(config: &Config, config_path: &Path, folder: &Path) -> Result<Config> {
    let papers_path = folder
        .canonicalize()
        .unwrap_or_else(|_| folder.to_path_buf());
    let config = Config {
        papers_path: Some(papers_path),
        ..config.clone()
    };
    config.save_to_path(config_path)?;
    Ok(config)
}

fn prose_mode(setting: ProseModeSetting) -> ProseMode {
    match setting {
        ProseModeSetting::Join => ProseMode::Join,
        ProseModeSetting::LinePerBlock => ProseMode::LinePerBlock,
    }
}

/// The TUI owns the terminal, so records only go to a configured log file.
fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let mut builder = env_logger::Builder::from_default_env();
    match log_file {
        Some(path) => {
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.target(env_logger::Target::Pipe(Box::new(file)));
            if env::var_os("RUST_LOG").is_none() {
                builder.filter_level(log::LevelFilter::Info);
            }
        }
        None => {
            builder.filter_level(log::LevelFilter::Off);
        }
    }
    builder.init();
    Ok(())
}

fn main() -> Result<()> {
    // Determine paper path from CLI args or config file
    let args: Vec<String> = env::args().collect();
    let config_path = Config::config_path();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            eprintln!("Usage: {} [paper-file-or-folder]", args[0]);
            process::exit(1);
        }
    };

    let target;
    let from_config;

    if args.len() == 2 {
        target = PathBuf::from(&args[1]);
        from_config = false;
    } else if args.len() == 1 {
        match config.as_ref().and_then(|c| c.papers_path.clone()) {
            Some(path) => {
                target = path;
                from_config = true;
            }
            None => {
                eprintln!("Error: No paper path provided and no papers_path configured");
                eprintln!("Usage: {} <paper-file-or-folder>", args[0]);
                eprintln!("Or set papers_path in {}", config_path.display());
                process::exit(1);
            }
        }
    } else {
        eprintln!("Usage: {} [paper-file-or-folder]", args[0]);
        process::exit(1);
    };

    let had_config = config.is_some();
    let config = config.unwrap_or_default();
    if let Err(e) = init_logging(config.log_file.as_deref()) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }

    let mut session = Session::new(Segmenter::new(prose_mode(config.prose_mode)))
        .with_model(config.model.clone());
    session.subscribe(|event: &SessionEvent| log::debug!("session event: {event:?}"));

    let mut app = match App::open_target(&target, session) {
        Ok(app) => app,
        Err(e) => {
            let source = if from_config {
                format!(" from config file '{}'", config_path.display())
            } else {
                String::new()
            };
            eprintln!(
                "Error: Paper path '{}'{} is invalid: {e}",
                target.display(),
                source
            );
            process::exit(1);
        }
    };
    log::info!("opened {} with model {}", target.display(), app.session.model());

    if !had_config && target.is_dir() {
        match remember_papers_folder(&config, &config_path, &target) {
            Ok(_) => log::info!("Saved papers_path to {}", config_path.display()),
            Err(e) => log::warn!("Failed to save config file: {e}"),
        }
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.move_down(),
                KeyCode::Up | KeyCode::Char('k') => app.move_up(),
                KeyCode::Tab => app.toggle_focus(),
                KeyCode::Enter => app.open_selected(),
                KeyCode::Char(c @ '1'..='4') => {
                    if let Some(&operation) = Operation::ALL.get(c as usize - '1' as usize) {
                        app.apply(operation);
                    }
                }
                _ => {}
            }
        }
    }
}

/// Pads `cell` to `width` display columns according to `alignment`.
fn pad(cell: &str, width: usize, alignment: Alignment) -> String {
    let gap = width.saturating_sub(Span::raw(cell).width());
    match alignment {
        Alignment::Left => format!("{cell}{}", " ".repeat(gap)),
        Alignment::Right => format!("{}{cell}", " ".repeat(gap)),
        Alignment::Center => {
            let left = gap / 2;
            format!("{}{cell}{}", " ".repeat(left), " ".repeat(gap - left))
        }
    }
}

fn cell(row: &[String], i: usize) -> &str {
    row.get(i).map(String::as_str).unwrap_or("")
}

/// Lays a table out as fixed-width text rows, header and delimiter first.
fn table_lines(table: &Table) -> Vec<String> {
    let columns = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.column_count()))
        .max()
        .unwrap_or(0);

    let widths: Vec<usize> = (0..columns)
        .map(|i| {
            std::iter::once(&table.headers)
                .chain(&table.rows)
                .map(|row| Span::raw(cell(row, i)).width())
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |row: &[String]| {
        let cells: Vec<String> = widths
            .iter()
            .enumerate()
            .map(|(i, &w)| pad(cell(row, i), w, table.alignment(i)))
            .collect();
        format!("| {} |", cells.join(" | "))
    };

    let delimiter: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(i, &w)| match table.alignment(i) {
            Alignment::Left => "-".repeat(w + 2),
            Alignment::Center => format!(":{}:", "-".repeat(w)),
            Alignment::Right => format!("{}:", "-".repeat(w + 1)),
        })
        .collect();

    let mut lines = vec![format_row(&table.headers), format!("|{}|", delimiter.join("|"))];
    lines.extend(table.rows.iter().map(|row| format_row(row)));
    lines
}

fn node_lines(nodes: &[DisplayNode]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for node in nodes {
        match node {
            DisplayNode::Heading { level, text } => {
                let prefix = "#".repeat(level.as_u8() as usize);
                lines.push(Line::from(Span::styled(
                    format!("{prefix} {text}"),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                )));
            }
            DisplayNode::Paragraph { text } => lines.push(Line::raw(text.clone())),
            DisplayNode::Table(table) => {
                for (i, row) in table_lines(table).into_iter().enumerate() {
                    let style = if i == 0 {
                        Style::default().add_modifier(Modifier::BOLD)
                    } else {
                        Style::default()
                    };
                    lines.push(Line::from(Span::styled(row, style)));
                }
            }
        }
    }
    lines
}

fn pane(title: String, focused: bool) -> Block<'static> {
    let border = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(title)
}

fn ui(f: &mut Frame, app: &mut App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(2)].as_ref())
        .split(f.area());

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25), Constraint::Percentage(75)].as_ref())
        .split(rows[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)].as_ref())
        .split(columns[1]);

    // Paper list panel
    let paper_items: Vec<ListItem> = app
        .papers
        .iter()
        .map(|paper| ListItem::new(Line::raw(format!("📄 {}", paper.display_path()))))
        .collect();

    let papers_list = List::new(paper_items)
        .block(pane("Papers".to_string(), app.focus == Focus::Papers))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(papers_list, columns[0], &mut app.paper_list_state);

    // Block panel: rendered block with its result underneath
    let block_items: Vec<ListItem> = app
        .session
        .entries()
        .iter()
        .map(|entry| {
            let mut lines = node_lines(&render(&entry.block.text));
            if !entry.result.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("→ {}", entry.result.display_text()),
                    Style::default().fg(Color::Green),
                )));
            }
            lines.push(Line::default());
            ListItem::new(lines)
        })
        .collect();

    let blocks_list = List::new(block_items)
        .block(pane(app.title(), app.focus == Focus::Blocks))
        .highlight_style(Style::default().bg(Color::DarkGray));

    f.render_stateful_widget(blocks_list, right[0], &mut app.block_list_state);

    // Result panel
    let selected = app
        .block_list_state
        .selected()
        .and_then(|i| app.session.entry(i));
    let result_text = match selected {
        Some(entry) if !entry.result.is_empty() => entry.result.display_text(),
        Some(_) => "No result yet for this block".to_string(),
        None => "Open a paper with Enter".to_string(),
    };
    let result_title = match selected.and_then(|entry| entry.result.operation()) {
        Some(operation) => format!("Result: {}", operation.label()),
        None => "Result".to_string(),
    };

    let result = Paragraph::new(result_text)
        .block(pane(result_title, false))
        .wrap(Wrap { trim: false });

    f.render_widget(result, right[1]);

    // Status and instructions
    let operations: Vec<String> = Operation::ALL
        .iter()
        .enumerate()
        .map(|(i, op)| format!("{}: {}", i + 1, op.label()))
        .collect();
    let help = Paragraph::new(vec![
        Line::raw(app.status.clone()),
        Line::from(vec![
            Span::raw("q: Quit | ↑/k ↓/j: Move | Tab: Focus | Enter: Open | "),
            Span::raw(operations.join(" | ")),
        ]),
    ]);

    f.render_widget(help, rows[1]);
}
