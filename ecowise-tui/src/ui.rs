use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

use ecowise_core::centers::haversine_km;
use ecowise_core::model::{CenterKind, EcoLevel, RecyclingCenter};

use crate::app::{App, Screen};

pub(crate) fn draw(frame: &mut Frame<'_>, app: &App) {
    let area = frame.area();

    // Outer layout: title, main content, status line
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [header_area, content_area, status_area] = chunks else {
        return;
    };

    // Title / header
    let header = Paragraph::new("ecowise – snap an item, get recycling guidance")
        .block(Block::default().borders(Borders::ALL).title("EcoWise"));
    frame.render_widget(header, *header_area);

    // Main screen
    match app.screen {
        Screen::Analyze => draw_analyze(frame, app, *content_area),
        Screen::Results => draw_results(frame, app, *content_area),
        Screen::Centers => draw_centers(frame, app, *content_area),
        Screen::Directions => draw_directions(frame, app, *content_area),
        Screen::Profile => draw_profile(frame, app, *content_area),
        Screen::Leaderboard => draw_leaderboard(frame, app, *content_area),
    }

    // Status bar
    let nav_hint = match app.screen {
        Screen::Analyze => "Type an image path · Enter analyze · Tab centers · Esc/Ctrl-C quit",
        Screen::Results => "c/Tab centers · p profile · a/Esc analyze another · q quit",
        Screen::Centers => {
            "Type to search · Tab cycle filter · ↑/↓ move · Enter/→ directions · Esc back"
        }
        Screen::Directions => "Esc/←/b back to centers · q/Ctrl-C quit",
        Screen::Profile => "l leaderboard · e export · r refresh · Esc back · q quit",
        Screen::Leaderboard => "Esc/←/b back to profile · q/Ctrl-C quit",
    };

    let status_text = if app.is_loading {
        format!("Loading… · {nav_hint}")
    } else if let Some(msg) = &app.error_message {
        format!("{msg} · {nav_hint}")
    } else if let Some(msg) = &app.status_message {
        format!("{msg} · {nav_hint}")
    } else {
        nav_hint.to_owned()
    };

    let status_style = if app.error_message.is_some() && !app.is_loading {
        Style::default().fg(Color::Red)
    } else if app.is_loading {
        Style::default().fg(Color::Yellow)
    } else if app.status_message.is_some() {
        Style::default().fg(Color::Green)
    } else {
        Style::default()
    };

    let status = Paragraph::new(status_text)
        .block(Block::default().borders(Borders::ALL).title("Status"))
        .style(status_style)
        .wrap(Wrap { trim: true });

    frame.render_widget(status, *status_area);
}

fn draw_analyze(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // input
            Constraint::Min(0),    // hints
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, hint_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.path_input.as_str())
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Image to analyze (type a path, Enter)"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let hints = vec![
        Line::raw(format!("Analyzing as {}", app.username)),
        Line::raw(""),
        Line::raw("Point EcoWise at a photo of an item and it answers with the"),
        Line::raw("recycling category, action, tips, and the centers that take it."),
        Line::raw(""),
        Line::raw("Supported formats: png, jpg, jpeg, gif, bmp (up to 5 MiB)."),
    ];
    let help = Paragraph::new(hints)
        .block(Block::default().borders(Borders::ALL).title("How it works"))
        .wrap(Wrap { trim: true });
    frame.render_widget(help, *hint_area);
}

fn draw_results(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(analysis) = app.analysis.as_ref() else {
        let paragraph = Paragraph::new("Run an analysis first (Esc to go back).")
            .block(Block::default().borders(Borders::ALL).title("Results"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let title = if analysis.degraded {
        "Results (offline analysis)"
    } else {
        "Results"
    };

    let Some(view) = analysis.view.as_ref() else {
        let lines = vec![
            Line::styled("No items detected", Style::default().add_modifier(Modifier::BOLD)),
            Line::raw(""),
            Line::raw("Try taking a clearer photo or a different angle."),
            Line::raw("Press a to analyze another image."),
        ];
        let paragraph = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(title))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let layout_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [item_area, centers_area] = chunks else {
        return;
    };

    let mut lines = vec![
        Line::from(vec![
            Span::raw(format!("{} ", view.item.icon)),
            Span::styled(view.item.name, Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(view.item.category, Style::default().fg(Color::Green)),
        ]),
        Line::raw(""),
        Line::raw(view.item.description),
        Line::raw(""),
        Line::from(vec![
            Span::styled("Action: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!(
                "{} – {}",
                view.item.action, view.item.action_description
            )),
        ]),
        Line::raw(""),
        Line::raw(format!(
            "🏆 +{} EcoPoints   🌍 {} kg carbon saved   ⏱ {}",
            view.item.points, view.item.carbon_saved_kg, view.item.processing_time
        )),
        Line::raw(""),
        Line::styled(
            "Recycling tips",
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    for tip in view.item.tips {
        lines.push(Line::raw(format!("  • {tip}")));
    }
    lines.push(Line::raw(""));
    lines.push(Line::raw(format!(
        "Detected \"{}\" with {:.0}% confidence",
        view.detected.name,
        view.detected.confidence * 100.0
    )));

    let item = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(Wrap { trim: true });
    frame.render_widget(item, *item_area);

    let items: Vec<ListItem<'_>> = if view.centers.is_empty() {
        vec![ListItem::new(
            "No specific centers found. Open the center list for general options.",
        )]
    } else {
        view.centers
            .iter()
            .map(|center| {
                let name_line = Line::styled(
                    center.name.clone(),
                    Style::default().fg(kind_color(&center.kind)),
                );
                let detail_line = Line::raw(format!(
                    "  {} · {}",
                    center.services.join(", "),
                    center.address
                ));
                ListItem::new(Text::from(vec![name_line, detail_line]))
            })
            .collect()
    };

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Where to take it (c for all centers)"),
    );
    frame.render_widget(list, *centers_area);
}

fn draw_centers(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // search input
            Constraint::Min(0),    // results
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [input_area, results_area] = chunks else {
        return;
    };

    let input = Paragraph::new(app.search_input.as_str())
        .block(Block::default().borders(Borders::ALL).title(format!(
            "Search centers – filter: {} (Tab cycles)",
            app.kind_filter.label()
        )))
        .wrap(Wrap { trim: true });
    frame.render_widget(input, *input_area);

    let visible = app.visible_centers();

    let items: Vec<ListItem<'_>> = if visible.is_empty() {
        vec![ListItem::new(
            "No centers match. Clear the search or cycle the filter with Tab.",
        )]
    } else {
        visible
            .iter()
            .map(|center| center_list_item(center, app.user_location))
            .collect()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Centers (↑/↓, Enter for directions)"),
        )
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );

    let mut state = ListState::default();
    if !visible.is_empty() {
        state.select(Some(app.center_index));
    }
    frame.render_stateful_widget(list, *results_area, &mut state);
}

fn center_list_item(center: &RecyclingCenter, location: Option<(f64, f64)>) -> ListItem<'static> {
    let rating = center
        .rating
        .map_or_else(String::new, |value| format!("  ⭐ {value}"));
    let distance = location.map_or_else(String::new, |(lat, lng)| {
        let km = haversine_km(lat, lng, center.lat, center.lng);
        format!("  ({km:.1} km)")
    });

    let name_line = Line::from(vec![
        Span::styled(
            center.name.clone(),
            Style::default().fg(kind_color(&center.kind)),
        ),
        Span::raw(rating),
        Span::raw(distance),
    ]);

    let mut services: Vec<&str> = center
        .services
        .iter()
        .take(3)
        .map(String::as_str)
        .collect();
    if services.is_empty() {
        services.push("Check services on site");
    }
    let detail_line = Line::raw(format!(
        "  [{}] {} · {}",
        center.kind,
        services.join(", "),
        center.address
    ));

    ListItem::new(Text::from(vec![name_line, detail_line]))
}

fn draw_directions(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(info) = app.directions.as_ref() else {
        let paragraph = Paragraph::new("Pick a center first (Esc to go back).")
            .block(Block::default().borders(Borders::ALL).title("Directions"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let mut lines = vec![
        Line::styled(
            info.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Line::raw(info.address.clone()),
        Line::raw(format!("({:.4}, {:.4})", info.lat, info.lng)),
        Line::raw(""),
        Line::raw(info.route.clone()),
    ];

    if !info.transport.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Transport options",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        for option in &info.transport {
            lines.push(Line::raw(format!("  • {option}")));
        }
    }

    if !info.landmarks.is_empty() {
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            "Nearby landmarks",
            Style::default().add_modifier(Modifier::BOLD),
        ));
        for landmark in &info.landmarks {
            lines.push(Line::raw(format!("  • {landmark}")));
        }
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Directions (Esc/←/b to go back)"),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}

fn draw_profile(frame: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(profile) = app.profile.as_ref() else {
        let paragraph = Paragraph::new("Profile not loaded yet.")
            .block(Block::default().borders(Borders::ALL).title("Profile"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    };

    let layout_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6), // stats
            Constraint::Length(5), // achievements
            Constraint::Min(0),    // history
        ])
        .split(area);

    let chunks = layout_chunks.as_ref();
    let [stats_area, achievements_area, history_area] = chunks else {
        return;
    };

    let progress = match EcoLevel::next_threshold(profile.eco_points) {
        Some(threshold) => format!("{} points to the next level", threshold - profile.eco_points),
        None => String::from("Top level reached"),
    };

    let stats = vec![
        Line::from(vec![
            Span::styled(
                profile.username.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  ·  {}", profile.level)),
        ]),
        Line::raw(""),
        Line::raw(format!(
            "🏆 {} EcoPoints   📦 {} items recycled   🌍 {} kg carbon saved",
            profile.eco_points, profile.items_recycled, profile.carbon_saved_kg
        )),
        Line::raw(progress),
    ];
    let stats = Paragraph::new(stats)
        .block(Block::default().borders(Borders::ALL).title("Profile"))
        .wrap(Wrap { trim: true });
    frame.render_widget(stats, *stats_area);

    let badges: Vec<ListItem<'_>> = profile
        .achievements()
        .into_iter()
        .map(|badge| {
            let (marker, style) = if badge.unlocked {
                ("✔", Style::default().fg(Color::Green))
            } else {
                ("🔒", Style::default().fg(Color::DarkGray))
            };
            ListItem::new(format!(
                "{marker} {} – {}",
                badge.title, badge.description
            ))
            .style(style)
        })
        .collect();
    let badges = List::new(badges).block(
        Block::default()
            .borders(Borders::ALL)
            .title("Achievements"),
    );
    frame.render_widget(badges, *achievements_area);

    if app.history.is_empty() {
        let paragraph =
            Paragraph::new("No recycling history yet. Analyze an item to get started!")
                .block(Block::default().borders(Borders::ALL).title("History"))
                .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, *history_area);
        return;
    }

    let rows = app.history.iter().map(|entry| {
        Row::new(vec![
            Cell::from(entry.processed_at.format("%d.%m.%Y %H:%M").to_string()),
            Cell::from(entry.filename.clone()),
            Cell::from(format!("+{} pts", entry.points)),
        ])
    });

    let column_widths = [
        Constraint::Length(18),
        Constraint::Min(20),
        Constraint::Length(10),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["When", "Image", "Points"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("History (last 5)"),
        )
        .column_spacing(1);
    frame.render_widget(table, *history_area);
}

fn draw_leaderboard(frame: &mut Frame<'_>, app: &App, area: Rect) {
    if app.leaderboard.is_empty() {
        let paragraph = Paragraph::new("Leaderboard is empty right now.")
            .block(Block::default().borders(Borders::ALL).title("Leaderboard"))
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let rows = app.leaderboard.iter().enumerate().map(|(index, entry)| {
        let mut style = Style::default();
        if entry.username == app.username {
            style = style.fg(Color::Yellow).add_modifier(Modifier::BOLD);
        }
        Row::new(vec![
            Cell::from(rank_medal(index + 1)),
            Cell::from(entry.username.clone()),
            Cell::from(format!("{} pts", entry.eco_points)),
            Cell::from(entry.level.clone()),
        ])
        .style(style)
    });

    let column_widths = [
        Constraint::Length(4),
        Constraint::Min(16),
        Constraint::Length(10),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, column_widths)
        .header(
            Row::new(vec!["#", "User", "Points", "Level"])
                .style(Style::default().add_modifier(Modifier::BOLD)),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Eco leaderboard (Esc to go back)"),
        )
        .column_spacing(1);
    frame.render_widget(table, area);
}

fn kind_color(kind: &CenterKind) -> Color {
    match kind {
        CenterKind::Recycling => Color::Green,
        CenterKind::Donation => Color::Blue,
        CenterKind::Special => Color::Yellow,
        CenterKind::Other(_) => Color::Magenta,
    }
}

fn rank_medal(rank: usize) -> String {
    match rank {
        1 => String::from("🥇"),
        2 => String::from("🥈"),
        3 => String::from("🥉"),
        other => format!("{other}."),
    }
}
