//! Voice table widget - one row per voice with knobs and live gate state

use ratatui::{
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table},
    Frame,
};
use randclock::{dsp::density::map_voice_multiplier, module::RandomClockParams};

use super::UiStateUpdate;

const VOICE_COLORS: [Color; 8] = [
    Color::LightRed,
    Color::LightGreen,
    Color::LightYellow,
    Color::LightBlue,
    Color::LightMagenta,
    Color::LightCyan,
    Color::White,
    Color::Gray,
];

/// Short label for a gate length knob position.
fn gate_label(control: f32) -> String {
    if control <= 0.5 {
        format!("fix {:>3.0}%", (0.01 + control / 0.5 * 0.98) * 100.0)
    } else {
        format!("rnd {:>3.0}%", (control - 0.5) / 0.5 * 100.0)
    }
}

pub fn render_voices(
    frame: &mut Frame,
    area: Rect,
    params: &RandomClockParams,
    state: &UiStateUpdate,
    selected: usize,
) {
    let rows: Vec<Row> = state
        .voices
        .iter()
        .enumerate()
        .map(|(i, voice)| {
            let knobs = &params.voices[i];
            let color = VOICE_COLORS[i % VOICE_COLORS.len()];

            let gate = match (voice.connected, voice.gate_open) {
                (false, _) => Cell::from("  -  ").style(Style::default().fg(Color::DarkGray)),
                (true, true) => Cell::from(" ███ ").style(Style::default().fg(color)),
                (true, false) => Cell::from(" ··· ").style(Style::default().fg(Color::DarkGray)),
            };

            let mut row = Row::new(vec![
                Cell::from(format!("{}", i + 1)).style(Style::default().fg(color)),
                gate,
                Cell::from(format!("x{:.2}", map_voice_multiplier(knobs.multiplier))),
                Cell::from(format!("{:.2} Hz", voice.density_hz)),
                Cell::from(gate_label(knobs.gate_len)),
                Cell::from(format!(
                    "{:.2}{}",
                    voice.gate_len,
                    if voice.stochastic { "*" } else { "" }
                )),
                Cell::from(format!("{}", voice.pulses)),
            ]);
            if i == selected {
                row = row.style(Style::default().add_modifier(Modifier::REVERSED));
            }
            row
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Length(6),
            Constraint::Length(8),
            Constraint::Length(12),
            Constraint::Length(10),
            Constraint::Length(7),
            Constraint::Min(8),
        ],
    )
    .header(
        Row::new(["#", "Gate", "Mult", "Density", "Length", "Last", "Pulses"])
            .style(Style::default().add_modifier(Modifier::BOLD)),
    )
    .block(Block::default().title(" Voices ").borders(Borders::ALL));

    frame.render_widget(table, area);
}
