//! RandClock - interactive application builder and runner

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{PushError, RingBuffer};

use super::click::ClickBank;
use super::ui::{
    state::{PatchMessage, UiStateUpdate, VoiceSnapshot},
    UiApp,
};

use randclock::{
    module::{ClockConfig, ClockMessage, RandomClock, RandomClockOutputs, RandomClockParams},
    RenderCtx, MAX_BLOCK_SIZE, NUM_VOICES,
};

/// Capacity of the audio→UI sample ring
const AUDIO_RING_LEN: usize = 16 * 1024;

/// Main application builder
pub struct RandClock {
    params: RandomClockParams,
    config: ClockConfig,
}

impl RandClock {
    pub fn new(params: RandomClockParams, config: ClockConfig) -> Self {
        Self { params, config }
    }

    /// Run the application (takes over the terminal, plays audio)
    pub fn run(self) -> EyreResult<()> {
        // Set up audio
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        let sample_rate = config.sample_rate().0 as f32;
        let channels = config.channels() as usize;

        tracing::info!(
            device = %device.name().unwrap_or_default(),
            sample_rate,
            channels,
            "opening output stream"
        );

        // Cross-thread rings
        let (clock_tx, clock_rx) = RingBuffer::<ClockMessage>::new(64);
        let (patch_tx, mut patch_rx) = RingBuffer::<PatchMessage>::new(32);
        let (state_tx, state_rx) = RingBuffer::<UiStateUpdate>::new(32);
        let (audio_tx, audio_rx) = RingBuffer::<f32>::new(AUDIO_RING_LEN);

        let module = RandomClock::new(self.params, self.config)?;

        let stream = device
            .build_output_stream(
                &config.into(),
                {
                    let mut module = module;
                    let mut clock_rx = clock_rx;
                    let mut state_tx = state_tx;
                    let mut audio_tx = audio_tx;
                    let mut clicks = ClickBank::new(sample_rate);
                    let mut connected = [true; NUM_VOICES];
                    let mut ctx = RenderCtx::new(sample_rate);
                    let mut frame_buf = vec![RandomClockOutputs::default(); MAX_BLOCK_SIZE];
                    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

                    move |data: &mut [f32], _| {
                        // Knob and patch changes land between blocks
                        module.drain_messages(&mut clock_rx);
                        while let Ok(msg) = patch_rx.pop() {
                            match msg {
                                PatchMessage::SetConnected { voice, connected: on } => {
                                    if let Some(slot) = connected.get_mut(voice) {
                                        *slot = on;
                                    }
                                }
                            }
                        }

                        let total_frames = data.len() / channels;
                        let mut frames_written = 0;

                        while frames_written < total_frames {
                            let frames_remaining = total_frames - frames_written;
                            let frames_to_render = frames_remaining.min(MAX_BLOCK_SIZE);

                            let frames = &mut frame_buf[..frames_to_render];
                            module.render_block(frames, &connected, &ctx);
                            ctx.advance(frames_to_render);

                            let block = &mut render_buf[..frames_to_render];
                            for (out, frame) in block.iter_mut().zip(frames.iter()) {
                                *out = clicks.next(frame);
                            }

                            // Duplicate mono to all channels
                            let out_off = frames_written * channels;
                            for (i, &s) in block.iter().enumerate() {
                                for ch in 0..channels {
                                    data[out_off + i * channels + ch] = s;
                                }
                            }

                            // Push to the scope, drop on overflow
                            for &s in block.iter() {
                                if let Err(PushError::Full(_)) = audio_tx.push(s) {
                                    break;
                                }
                            }

                            frames_written += frames_to_render;
                        }

                        let mut update = UiStateUpdate {
                            master_hz: module.current_density(),
                            time: ctx.time,
                            ..UiStateUpdate::default()
                        };
                        for (i, clock) in module.voices().iter().enumerate() {
                            update.voices[i] = VoiceSnapshot::capture(clock, connected[i]);
                        }
                        let _ = state_tx.push(update);
                    }
                },
                |err| tracing::error!(%err, "stream error"),
                None,
            )
            .wrap_err("failed to build output stream")?;

        stream.play().wrap_err("failed to start output stream")?;

        let mut ui = UiApp::new(clock_tx, patch_tx, state_rx, audio_rx, self.params, sample_rate);
        let mut terminal = ratatui::init();
        let result = ui.run(&mut terminal);
        ratatui::restore();

        tracing::info!("stream closed");
        result
    }
}
