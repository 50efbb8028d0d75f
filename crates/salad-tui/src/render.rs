use crate::app::{App, Screen};
use crate::layout::{GridLayout, INFO_PANEL_WIDTH, PANEL_GAP};
use crate::library::pick_daily;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    style::{Print, SetBackgroundColor, SetForegroundColor},
    terminal::{self, Clear, ClearType},
};
use salad_core::{CellStyle, CellView, Session};
use std::io;

pub fn render(stdout: &mut io::Stdout, app: &mut App) -> io::Result<()> {
    let (term_width, term_height) = terminal::size()?;

    execute!(stdout, Hide, SetBackgroundColor(app.theme.bg), Clear(ClearType::All))?;

    match app.screen {
        Screen::Catalog => render_catalog_screen(stdout, app, term_width)?,
        Screen::Playing => render_game_screen(stdout, app, term_width, term_height)?,
    }

    if let Some(ref msg) = app.message {
        render_message(stdout, app, msg, term_width)?;
    }

    execute!(stdout, Show, MoveTo(0, term_height.saturating_sub(1)))?;
    Ok(())
}

fn render_catalog_screen(stdout: &mut io::Stdout, app: &App, term_width: u16) -> io::Result<()> {
    let theme = &app.theme;
    let x = term_width.saturating_sub(INFO_PANEL_WIDTH) / 2;
    let today = chrono::Local::now().date_naive();
    let daily = pick_daily(&app.catalog, today);

    execute!(
        stdout,
        MoveTo(x, 2),
        SetForegroundColor(theme.key),
        Print("═══ NEW SALAD ═══"),
        MoveTo(x, 4),
        SetForegroundColor(theme.info),
        Print("Puzzles")
    )?;

    if app.catalog.is_empty() {
        execute!(
            stdout,
            MoveTo(x, 6),
            SetForegroundColor(theme.error),
            Print(format!("No puzzles in {}", app.library.dir().display()))
        )?;
    }

    for (i, id) in app.catalog.iter().enumerate() {
        let selected = i == app.catalog_selection;
        let marker = if selected { "> " } else { "  " };
        let daily_tag = if daily == Some(id.as_str()) { "  (today)" } else { "" };
        let (fg, bg) = if selected {
            (theme.selecting_fg, theme.selecting_bg)
        } else {
            (theme.fg, theme.bg)
        };
        execute!(
            stdout,
            MoveTo(x, 6 + i as u16),
            SetBackgroundColor(bg),
            SetForegroundColor(fg),
            Print(format!("{}{}", marker, id)),
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.success),
            Print(daily_tag)
        )?;
    }

    let controls = [
        ("j/k", "Move"),
        ("Enter", "Play"),
        ("d", "Daily"),
        ("r", "Random"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];
    let controls_y = 8 + app.catalog.len() as u16;
    for (i, (key, desc)) in controls.iter().enumerate() {
        execute!(
            stdout,
            MoveTo(x, controls_y + i as u16),
            SetForegroundColor(theme.key),
            Print(format!("{:>6}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_game_screen(
    stdout: &mut io::Stdout,
    app: &mut App,
    term_width: u16,
    term_height: u16,
) -> io::Result<()> {
    app.layout = None;
    let Some(session) = app.session.as_ref() else {
        return Ok(());
    };

    let layout = GridLayout::centered(session.puzzle().size(), term_width, term_height);

    render_grid(stdout, app, session, layout)?;

    let info_x = layout.x + layout.width() + PANEL_GAP;
    let words_y = render_info_panel(stdout, app, session, info_x, layout.y)?;
    render_word_list(stdout, app, session, info_x, words_y + 1)?;

    let controls_y = layout.y + layout.height() + 1;
    if let Some(completion) = session.completion() {
        execute!(
            stdout,
            MoveTo(layout.x, controls_y),
            SetForegroundColor(app.theme.success),
            Print(crate::app::completion_message(&completion)),
            SetForegroundColor(app.theme.info),
            Print("  (s to share)")
        )?;
    }
    render_controls(stdout, app, layout.x, controls_y + 2)?;

    app.layout = Some(layout);
    Ok(())
}

fn render_grid(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    layout: GridLayout,
) -> io::Result<()> {
    let theme = &app.theme;
    let board = session.board();
    let separator = format!("+{}", "---+".repeat(layout.size));

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(layout.x, layout.y),
        SetForegroundColor(theme.border),
        Print(&separator)
    )?;

    for (r, row) in board.rows().enumerate() {
        let cell_y = layout.y + 1 + r as u16 * 2;
        execute!(stdout, MoveTo(layout.x, cell_y))?;

        for cell in row {
            execute!(
                stdout,
                SetBackgroundColor(theme.bg),
                SetForegroundColor(theme.border),
                Print("|")
            )?;
            render_cell(stdout, app, cell)?;
        }
        execute!(
            stdout,
            SetBackgroundColor(theme.bg),
            SetForegroundColor(theme.border),
            Print("|"),
            MoveTo(layout.x, cell_y + 1),
            Print(&separator)
        )?;
    }

    Ok(())
}

fn render_cell(stdout: &mut io::Stdout, app: &App, cell: &CellView) -> io::Result<()> {
    let theme = &app.theme;
    let is_cursor = cell.position() == app.cursor;

    let (fg, bg) = match cell.style() {
        CellStyle::Selecting => (theme.selecting_fg, theme.selecting_bg),
        CellStyle::Found => (theme.found, theme.bg),
        CellStyle::Plain => (theme.letter, theme.bg),
        CellStyle::Blank => (theme.border, theme.bg),
    };
    let bg = if is_cursor && cell.style() != CellStyle::Selecting {
        theme.cursor_bg
    } else {
        bg
    };

    let glyph = match cell.shown_letter() {
        Some(letter) => letter,
        None if cell.in_found_path => '·',
        None => ' ',
    };

    execute!(
        stdout,
        SetBackgroundColor(bg),
        SetForegroundColor(fg),
        Print(format!(" {} ", glyph))
    )
}

/// Returns the first free row below the panel
fn render_info_panel(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    x: u16,
    y: u16,
) -> io::Result<u16> {
    let theme = &app.theme;
    let puzzle = session.puzzle();

    execute!(
        stdout,
        SetBackgroundColor(theme.bg),
        MoveTo(x, y),
        SetForegroundColor(theme.key),
        Print("═══ NEW SALAD ═══"),
        MoveTo(x, y + 2),
        SetForegroundColor(theme.fg),
        Print(puzzle.title())
    )?;

    let mut row = y + 3;
    if !puzzle.theme().is_empty() {
        execute!(
            stdout,
            MoveTo(x, row),
            SetForegroundColor(theme.info),
            Print(puzzle.theme())
        )?;
        row += 1;
    }
    row += 1;

    let time_color = if session.is_complete() {
        theme.success
    } else {
        theme.info
    };
    execute!(
        stdout,
        MoveTo(x, row),
        SetForegroundColor(time_color),
        Print(format!("Time: {:>10}", session.elapsed_string())),
        MoveTo(x, row + 1),
        SetForegroundColor(theme.info),
        Print(format!("Best: {:>10}", session.best_time_string())),
        MoveTo(x, row + 2),
        Print(format!(
            "Found: {:>9}",
            format!("{}/{}", session.found_count(), session.total_words())
        )),
        MoveTo(x, row + 3),
        Print(format!("Hints used: {:>4}", session.hints_used()))
    )?;

    execute!(
        stdout,
        MoveTo(x, row + 5),
        SetForegroundColor(theme.info),
        Print("Selected: "),
        SetForegroundColor(theme.selecting_fg),
        Print(session.selection_letters())
    )?;

    execute!(
        stdout,
        MoveTo(x, row + 6),
        SetForegroundColor(theme.border),
        Print("────────────────")
    )?;

    Ok(row + 7)
}

fn render_word_list(
    stdout: &mut io::Stdout,
    app: &App,
    session: &Session,
    x: u16,
    y: u16,
) -> io::Result<()> {
    let theme = &app.theme;

    execute!(
        stdout,
        MoveTo(x, y),
        SetForegroundColor(theme.info),
        Print("Words:")
    )?;

    for (i, entry) in session.word_list().iter().enumerate() {
        let color = if entry.found { theme.success } else { theme.border };
        execute!(
            stdout,
            MoveTo(x, y + 1 + i as u16),
            SetForegroundColor(theme.info),
            Print(format!("{:>2} letters: ", entry.length)),
            SetForegroundColor(color),
            Print(&entry.shown)
        )?;
    }

    Ok(())
}

fn render_controls(stdout: &mut io::Stdout, app: &App, x: u16, y: u16) -> io::Result<()> {
    let theme = &app.theme;

    execute!(stdout, SetBackgroundColor(theme.bg))?;

    let controls = [
        ("hjkl/Arrows", "Move"),
        ("Space", "Tap cell"),
        ("Mouse", "Drag word"),
        ("Bksp", "Backtrack"),
        ("x/Esc", "Clear"),
        ("v", "Verify"),
        ("?", "Hint"),
        ("s", "Share"),
        ("n", "Restart"),
        ("c", "Catalog"),
        ("d", "Daily"),
        ("r", "Random"),
        ("t", "Theme"),
        ("q", "Quit"),
    ];

    // 4 rows per column
    for (i, (key, desc)) in controls.iter().enumerate() {
        let col = i / 4;
        let row = i % 4;
        let cx = x + (col as u16) * 22;
        let cy = y + row as u16;

        execute!(
            stdout,
            MoveTo(cx, cy),
            SetForegroundColor(theme.key),
            Print(format!("{:>11}", key)),
            SetForegroundColor(theme.info),
            Print(format!(" {}", desc))
        )?;
    }

    Ok(())
}

fn render_message(
    stdout: &mut io::Stdout,
    app: &App,
    msg: &str,
    term_width: u16,
) -> io::Result<()> {
    let theme = &app.theme;
    let padded = format!("  {}  ", msg);
    let x = term_width.saturating_sub(padded.chars().count() as u16) / 2;

    execute!(
        stdout,
        MoveTo(x, 0),
        SetForegroundColor(theme.fg),
        SetBackgroundColor(theme.selecting_bg),
        Print(&padded),
        SetBackgroundColor(theme.bg)
    )?;

    Ok(())
}
