//! Transport bar widget - shows master density, stream time and audio stats

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use randclock::module::RandomClockParams;

use super::UiStateUpdate;

/// Audio statistics for display
pub struct AudioStats {
    pub peak: f32,
    pub rms: f32,
}

impl AudioStats {
    /// Compute audio stats from a buffer
    pub fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

pub fn render_transport(
    frame: &mut Frame,
    area: Rect,
    params: &RandomClockParams,
    state: &UiStateUpdate,
    sample_rate: f32,
    audio_stats: &AudioStats,
) {
    let block = Block::default().title(" randclock ").borders(Borders::ALL);

    let total_pulses: u64 = state.voices.iter().map(|v| v.pulses).sum();

    let line = Line::from(vec![
        Span::styled(
            format!(" Master: {:.2} ", params.master_density),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("({:.2} Hz)  ", state.master_hz),
            Style::default().fg(Color::Green),
        ),
        Span::styled(
            format!("{:.1}s  ", state.time),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{} pulses  ", total_pulses),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("{:.1}kHz  ", sample_rate / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", audio_stats.peak, audio_stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ]);

    let paragraph = Paragraph::new(line).block(block);
    frame.render_widget(paragraph, area);
}
