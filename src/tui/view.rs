use crate::model::{LoadingState, PlantSummary};
use crate::tui::action::Screen;
use crate::tui::state::AppState;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    let selected = match state.screen {
        Screen::Search => 0,
        Screen::Home => 1,
    };
    let tabs = Tabs::new(vec![Screen::Search.title(), Screen::Home.title()])
        .select(selected)
        .block(Block::default().borders(Borders::ALL).title(" Folium "))
        .highlight_style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );
    f.render_widget(tabs, v_chunks[0]);

    match state.screen {
        Screen::Search => draw_search(f, state, v_chunks[1]),
        Screen::Home => draw_home(f, state, v_chunks[1]),
    }

    // --- Footer ---
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[2]);
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(Color::Cyan))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );
    let help_str = match state.screen {
        Screen::Search => "Enter:Search | ^S:Save | Tab:My Plants | Esc:Quit",
        Screen::Home => "d:Remove | Tab:Search | q:Quit",
    };
    let help = Paragraph::new(help_str)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);
}

fn plant_item(plant: &PlantSummary, saved: bool) -> ListItem<'static> {
    let marker = if saved { "* " } else { "  " };
    let mut spans = vec![
        Span::raw(marker),
        Span::styled(
            plant.common_name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ];
    let scientific = plant.primary_scientific_name();
    if !scientific.is_empty() {
        spans.push(Span::styled(
            format!("  {}", scientific),
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ));
    }
    if let Some(watering) = &plant.watering {
        spans.push(Span::styled(
            format!("  [{}]", watering),
            Style::default().fg(Color::Blue),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn draw_search(f: &mut Frame, state: &mut AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let input = Paragraph::new(state.input_buffer.as_str())
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::ALL).title(" Species Name "));
    f.render_widget(input, chunks[0]);
    f.set_cursor_position((
        chunks[0].x.saturating_add(1).saturating_add(state.cursor_column()),
        chunks[0].y + 1,
    ));

    let results_block = Block::default().borders(Borders::ALL).title(" Results ");
    let placeholder = match &state.loading {
        LoadingState::Idle => Some(("Search for a plant by species name.", Color::DarkGray)),
        LoadingState::Loading => Some(("Searching...", Color::Yellow)),
        LoadingState::Error(e) => Some((e.as_str(), Color::Red)),
        LoadingState::Success(list) if list.is_empty() => {
            Some(("No plants found.", Color::DarkGray))
        }
        LoadingState::Success(_) => None,
    };

    if let Some((text, color)) = placeholder {
        let p = Paragraph::new(text.to_string())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(results_block);
        f.render_widget(p, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = state
        .results()
        .iter()
        .map(|p| plant_item(p, state.home.contains(p.id)))
        .collect();
    let list = List::new(items)
        .block(results_block)
        .highlight_style(Style::default().bg(Color::Blue));
    f.render_stateful_widget(list, chunks[1], &mut state.results_state);
}

fn draw_home(f: &mut Frame, state: &mut AppState, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" My Plants ");
    if state.home.is_empty() {
        let p = Paragraph::new("No saved plants yet. Save one from the search screen.")
            .style(Style::default().fg(Color::DarkGray))
            .alignment(Alignment::Center)
            .block(block);
        f.render_widget(p, area);
        return;
    }

    let items: Vec<ListItem> = state
        .home
        .plants()
        .iter()
        .map(|p| plant_item(p, false))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().bg(Color::Blue));
    f.render_stateful_widget(list, area, &mut state.home_state);
}
