//! Waveform oscilloscope widget for the click output

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Render the click output, downsampled to the chart width
pub fn render_waveform(frame: &mut Frame, area: Rect, audio_buffer: &[f32]) {
    let block = Block::default().title(" Output ").borders(Borders::ALL);

    let target_w = (area.width.max(1) as usize) * 2; // two braille dots per cell
    let step = audio_buffer.len().div_ceil(target_w).max(1);
    let len = audio_buffer.len().max(1) as f64;

    // Keep the largest excursion per step so short clicks stay visible
    let data: Vec<(f64, f64)> = audio_buffer
        .chunks(step)
        .enumerate()
        .map(|(i, chunk)| {
            let peak = chunk
                .iter()
                .copied()
                .fold(0.0f32, |acc, x| if x.abs() > acc.abs() { x } else { acc });
            ((i * step) as f64 / len, peak as f64)
        })
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([0.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}
