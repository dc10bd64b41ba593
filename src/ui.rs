pub mod screen;

use diktant::{app::App, view::DisplayModel};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 1;

fn bold() -> Style {
    Style::default().add_modifier(Modifier::BOLD)
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn italic() -> Style {
    Style::default().add_modifier(Modifier::ITALIC)
}

/// Rows a paragraph needs once wrapped to `width` columns.
fn wrapped_height(text: &str, width: u16) -> u16 {
    let width = width.max(1) as usize;
    text.lines()
        .map(|line| line.width().max(1).div_ceil(width))
        .sum::<usize>()
        .max(1) as u16
}

pub fn draw(app: &App, model: &DisplayModel, f: &mut Frame) {
    screen::current_screen(model.phase).render(app, model, f);
}

fn content_area(area: Rect) -> Rect {
    Layout::default()
        .horizontal_margin(HORIZONTAL_MARGIN)
        .vertical_margin(VERTICAL_MARGIN)
        .constraints([Constraint::Min(0)])
        .split(area)[0]
}

pub(crate) fn render_selection(app: &App, f: &mut Frame) {
    let area = content_area(f.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // title
            Constraint::Min(4),    // texts
            Constraint::Length(7), // help
            Constraint::Length(1), // legend
        ])
        .split(area);

    let title = Paragraph::new(vec![
        Line::from(Span::styled(
            app.catalog.title.clone(),
            bold().fg(Color::Cyan),
        )),
        Line::from(Span::styled(app.catalog.subtitle.clone(), dim())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    let items: Vec<ListItem> = app
        .catalog
        .texts()
        .iter()
        .enumerate()
        .map(|(idx, text)| {
            ListItem::new(vec![
                Line::from(vec![
                    Span::styled(format!("{}. ", idx + 1), dim()),
                    Span::styled(text.title.clone(), bold()),
                    Span::raw("  "),
                    Span::styled(
                        format!("[{} слов]", text.word_count()),
                        Style::default().fg(Color::Cyan),
                    ),
                ]),
                Line::from(Span::styled(format!("   {}", text.description), dim())),
            ])
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Диктанты"))
        .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(app.cursor));
    f.render_stateful_widget(list, chunks[1], &mut list_state);

    let help = Paragraph::new(vec![
        Line::from("1. Выберите диктант из списка выше"),
        Line::from("2. Прослушайте текст или прочитайте его вслух"),
        Line::from("3. Напишите текст в специальном поле"),
        Line::from("4. Нажмите (tab) для автоматической проверки"),
        Line::from(Span::styled(
            "Ошибки будут выделены красным цветом, правильные слова зелёным",
            dim(),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title("Как пользоваться?"),
    )
    .wrap(Wrap { trim: true });
    f.render_widget(help, chunks[2]);

    let legend = Paragraph::new(Span::styled(
        "(↑↓) выбор / (enter) начать / (r) случайный / (esc) выход",
        italic(),
    ));
    f.render_widget(legend, chunks[3]);
}

/// Title, description and (optionally) the reference text. Returns the
/// area left below them.
fn render_reference(app: &App, model: &DisplayModel, area: Rect, f: &mut Frame) -> Rect {
    let body = model.reference.clone().unwrap_or_default();
    let reference_height = if app.show_reference {
        wrapped_height(&body, area.width.saturating_sub(2)) + 3
    } else {
        0
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(reference_height),
            Constraint::Min(0),
        ])
        .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            model.title.clone().unwrap_or_default(),
            bold().fg(Color::Cyan),
        )),
        Line::from(Span::styled(
            model.description.clone().unwrap_or_default(),
            dim(),
        )),
    ]);
    f.render_widget(header, chunks[0]);

    if app.show_reference {
        let reference = Paragraph::new(vec![
            Line::from(body),
            Line::from(""),
            Line::from(Span::styled(
                format!("Всего слов: {}", model.reference_words),
                dim(),
            )),
        ])
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Текст диктанта"),
        )
        .wrap(Wrap { trim: false });
        f.render_widget(reference, chunks[1]);
    }

    chunks[2]
}

pub(crate) fn render_writing(app: &App, model: &DisplayModel, f: &mut Frame) {
    let area = content_area(f.area());
    let rest = render_reference(app, model, area, f);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // draft
            Constraint::Length(1), // typed word count
            Constraint::Length(1), // padding
            Constraint::Length(1), // legend
        ])
        .split(rest);

    let draft = app.session.draft();
    let text = if draft.is_empty() {
        Text::from(Line::from(vec![
            Span::styled("▏", Style::default().fg(Color::Yellow)),
            Span::styled("Начните писать здесь...", dim().add_modifier(Modifier::ITALIC)),
        ]))
    } else {
        let mut lines: Vec<Line> = draft.split('\n').map(|l| Line::from(l.to_owned())).collect();
        if let Some(last) = lines.last_mut() {
            last.push_span(Span::styled("▏", Style::default().fg(Color::Yellow)));
        }
        Text::from(lines)
    };

    let editor = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Напишите текст"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(editor, chunks[0]);

    let counter = Paragraph::new(Span::styled(
        format!("Слов написано: {}", model.draft_words),
        dim(),
    ));
    f.render_widget(counter, chunks[1]);

    let check_style = if model.can_check { italic() } else { dim() };
    let legend = Paragraph::new(Line::from(vec![
        Span::styled("(tab) проверить", check_style),
        Span::styled(" / (ctrl+r) очистить / (esc) к списку", italic()),
    ]));
    f.render_widget(legend, chunks[3]);
}

pub(crate) fn render_checked(app: &App, model: &DisplayModel, f: &mut Frame) {
    let area = content_area(f.area());
    let rest = render_reference(app, model, area, f);

    let marked: String = model
        .words
        .iter()
        .map(|w| w.text.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let marked_height = wrapped_height(&marked, rest.width.saturating_sub(2)) + 2;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(marked_height),
            Constraint::Length(7), // result
            Constraint::Min(0),
            Constraint::Length(1), // legend
        ])
        .split(rest);

    let mut spans = Vec::with_capacity(model.words.len() * 2);
    for (idx, word) in model.words.iter().enumerate() {
        let style = if word.correct {
            bold().fg(Color::Green)
        } else {
            bold().fg(Color::Red).add_modifier(Modifier::UNDERLINED)
        };
        spans.push(Span::styled(word.text.clone(), style));
        if idx + 1 < model.words.len() {
            spans.push(Span::raw(" "));
        }
    }

    let checked_text = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Ваш текст с проверкой"),
        )
        .wrap(Wrap { trim: true });
    f.render_widget(checked_text, chunks[0]);

    if let Some(summary) = model.summary {
        let result_block = Block::default()
            .borders(Borders::ALL)
            .title("Результат проверки");
        let inner = result_block.inner(chunks[1]);
        f.render_widget(result_block, chunks[1]);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(2),
            ])
            .split(inner);

        let score_line = Paragraph::new(Line::from(vec![
            Span::styled("Правильность: ", bold()),
            Span::styled(format!("{}%", summary.score), bold().fg(Color::Cyan)),
        ]));
        f.render_widget(score_line, rows[0]);

        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(Color::Cyan))
            .percent(summary.score.clamp(0, 100) as u16)
            .label("");
        f.render_widget(gauge, rows[1]);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(rows[3]);

        let cells = [
            ("Оценка", summary.grade.to_string(), Color::Cyan),
            ("Ошибок", summary.errors.to_string(), Color::Red),
            ("Правильно", summary.correct.to_string(), Color::Green),
        ];
        for ((label, value, color), column) in cells.into_iter().zip(columns.iter()) {
            let cell = Paragraph::new(vec![
                Line::from(Span::styled(label, dim())),
                Line::from(Span::styled(value, bold().fg(color))),
            ])
            .alignment(Alignment::Center);
            f.render_widget(cell, *column);
        }
    }

    let legend = Paragraph::new(Span::styled(
        "(r) попробовать снова / (b) к списку / (q) выход",
        italic(),
    ));
    f.render_widget(legend, chunks[3]);
}
