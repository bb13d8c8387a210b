//! TUI module for randclock
//!
//! Shows the knobs and live gate state of every voice, and turns key presses
//! into control messages for the audio thread.

pub mod state;
mod transport;
mod voices;
mod waveform;

use color_eyre::eyre::Result as EyreResult;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    DefaultTerminal, Frame,
};
use randclock::{
    dsp::density::sanitize_control,
    module::{ClockMessage, RandomClockParams},
    NUM_VOICES,
};
use rtrb::{Consumer, Producer};
use std::time::Duration;

use state::{PatchMessage, UiStateUpdate};
use transport::{render_transport, AudioStats};
use voices::render_voices;
use waveform::render_waveform;

/// Audio visualization buffer size
const VIS_BUFFER_SIZE: usize = 2048;
/// Knob change per key press
const KNOB_STEP: f32 = 0.01;

/// UI application state
pub struct UiApp {
    clock_tx: Producer<ClockMessage>,
    patch_tx: Producer<PatchMessage>,
    state_rx: Consumer<UiStateUpdate>,
    audio_rx: Consumer<f32>,
    /// Knob positions as last sent to the audio thread
    params: RandomClockParams,
    connected: [bool; NUM_VOICES],
    selected: usize,
    sample_rate: f32,
    /// Latest snapshot from the audio thread
    current_state: UiStateUpdate,
    audio_buffer: Vec<f32>,
    should_quit: bool,
}

impl UiApp {
    pub fn new(
        clock_tx: Producer<ClockMessage>,
        patch_tx: Producer<PatchMessage>,
        state_rx: Consumer<UiStateUpdate>,
        audio_rx: Consumer<f32>,
        params: RandomClockParams,
        sample_rate: f32,
    ) -> Self {
        Self {
            clock_tx,
            patch_tx,
            state_rx,
            audio_rx,
            params,
            connected: [true; NUM_VOICES],
            selected: 0,
            sample_rate,
            current_state: UiStateUpdate::default(),
            audio_buffer: vec![0.0; VIS_BUFFER_SIZE],
            should_quit: false,
        }
    }

    /// Run the UI event loop
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> EyreResult<()> {
        while !self.should_quit {
            self.poll_audio();
            self.poll_state();

            terminal.draw(|frame| self.render(frame))?;

            // Handle keyboard input (non-blocking, ~60fps)
            if event::poll(Duration::from_millis(16))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key.code);
                    }
                }
            }
        }

        Ok(())
    }

    /// Keep the last VIS_BUFFER_SIZE samples
    fn poll_audio(&mut self) {
        while let Ok(sample) = self.audio_rx.pop() {
            self.audio_buffer.push(sample);
        }
        if self.audio_buffer.len() > VIS_BUFFER_SIZE {
            let excess = self.audio_buffer.len() - VIS_BUFFER_SIZE;
            self.audio_buffer.drain(0..excess);
        }
    }

    /// Keep only the latest state
    fn poll_state(&mut self) {
        while let Ok(state) = self.state_rx.pop() {
            self.current_state = state;
        }
    }

    fn handle_key(&mut self, key: KeyCode) {
        let voice = self.selected;
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Left => self.nudge_master(-KNOB_STEP),
            KeyCode::Right => self.nudge_master(KNOB_STEP),
            KeyCode::Up => self.selected = voice.checked_sub(1).unwrap_or(NUM_VOICES - 1),
            KeyCode::Down => self.selected = (voice + 1) % NUM_VOICES,
            KeyCode::Char('m') => self.nudge_multiplier(-KNOB_STEP),
            KeyCode::Char('M') => self.nudge_multiplier(KNOB_STEP),
            KeyCode::Char('g') => self.nudge_gate_len(-KNOB_STEP),
            KeyCode::Char('G') => self.nudge_gate_len(KNOB_STEP),
            KeyCode::Char('c') | KeyCode::Char('C') => {
                let connected = !self.connected[voice];
                self.connected[voice] = connected;
                let _ = self
                    .patch_tx
                    .push(PatchMessage::SetConnected { voice, connected });
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                let _ = self.clock_tx.push(ClockMessage::Reset);
            }
            _ => {}
        }
    }

    fn nudge_master(&mut self, delta: f32) {
        let value = sanitize_control(self.params.master_density + delta);
        self.params.master_density = value;
        let _ = self.clock_tx.push(ClockMessage::SetMasterDensity(value));
    }

    fn nudge_multiplier(&mut self, delta: f32) {
        let voice = self.selected;
        let value = sanitize_control(self.params.voices[voice].multiplier + delta);
        self.params.voices[voice].multiplier = value;
        let _ = self
            .clock_tx
            .push(ClockMessage::SetMultiplier { voice, value });
    }

    fn nudge_gate_len(&mut self, delta: f32) {
        let voice = self.selected;
        let value = sanitize_control(self.params.voices[voice].gate_len + delta);
        self.params.voices[voice].gate_len = value;
        let _ = self.clock_tx.push(ClockMessage::SetGateLen { voice, value });
    }

    fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),  // Transport bar
                Constraint::Min(12),    // Voice table
                Constraint::Length(8),  // Waveform
                Constraint::Length(1),  // Help bar
            ])
            .split(frame.area());

        let stats = AudioStats::from_buffer(&self.audio_buffer);
        render_transport(
            frame,
            chunks[0],
            &self.params,
            &self.current_state,
            self.sample_rate,
            &stats,
        );
        render_voices(frame, chunks[1], &self.params, &self.current_state, self.selected);
        render_waveform(frame, chunks[2], &self.audio_buffer);

        let help = Paragraph::new(
            " [←/→] Master  [↑/↓] Voice  [m/M] Multiplier  [g/G] Gate  [C] Patch  [R] Reset  [Q] Quit",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(help, chunks[3]);
    }
}
